use actix_web::{HttpResponse, Responder, web};
use serde::Serialize;
use serde_json::json;
use sqlx::SqlitePool;
use tracing::error;
use utoipa::ToSchema;

use crate::store::stats::{Stats, compute_stats};

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    #[schema(example = "success")]
    pub status: String,
    pub stats: Stats,
}

/// Aggregate attendance statistics
#[utoipa::path(
    get,
    path = "/stats",
    responses(
        (status = 200, description = "Aggregate counters and recent activity", body = StatsResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Stats"
)]
pub async fn get_stats(pool: web::Data<SqlitePool>) -> impl Responder {
    match compute_stats(pool.get_ref()).await {
        Ok(stats) => HttpResponse::Ok().json(StatsResponse {
            status: "success".to_string(),
            stats,
        }),
        Err(e) => {
            error!(error = %e, "Failed to compute stats");
            HttpResponse::InternalServerError().json(json!({
                "status": "error",
                "message": "Internal Server Error"
            }))
        }
    }
}
