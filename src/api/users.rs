use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::SqlitePool;
use tracing::{error, info, warn};
use utoipa::ToSchema;

use crate::model::attendance::DEVICE_ID_RANGE;
use crate::model::user::User;
use crate::store;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpsertUser {
    #[schema(example = 5)]
    pub device_id: i64,
    #[schema(example = "John Doe", value_type = String)]
    pub name: String,
    #[schema(example = "EMP001", value_type = String)]
    pub employee_id: Option<String>,
    #[schema(example = "Engineering", value_type = String)]
    pub department: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserListResponse {
    #[schema(example = "success")]
    pub status: String,
    #[schema(example = 1)]
    pub count: usize,
    pub users: Vec<User>,
}

/// Register or replace the user mapped to a sensor slot
#[utoipa::path(
    post,
    path = "/users",
    request_body = UpsertUser,
    responses(
        (status = 200, description = "User added or updated", body = Object, example = json!({
            "status": "success",
            "message": "User added/updated",
            "deviceId": 5,
            "name": "John Doe"
        })),
        (status = 400, description = "Missing or invalid fields"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Users"
)]
pub async fn add_user(
    pool: web::Data<SqlitePool>,
    payload: web::Json<UpsertUser>,
) -> impl Responder {
    let payload = payload.into_inner();

    if !DEVICE_ID_RANGE.contains(&payload.device_id) {
        warn!(device_id = payload.device_id, "Rejected out-of-range device id");
        return HttpResponse::BadRequest().json(json!({
            "status": "error",
            "message": "Invalid deviceId (must be 1-20)"
        }));
    }

    let result = store::users::upsert_user(
        pool.get_ref(),
        payload.device_id,
        &payload.name,
        payload.employee_id.as_deref(),
        payload.department.as_deref(),
    )
    .await;

    match result {
        Ok(()) => {
            info!(device_id = payload.device_id, name = %payload.name, "User added/updated");
            HttpResponse::Ok().json(json!({
                "status": "success",
                "message": "User added/updated",
                "deviceId": payload.device_id,
                "name": payload.name
            }))
        }
        Err(e) => {
            error!(error = %e, device_id = payload.device_id, "Failed to upsert user");
            HttpResponse::InternalServerError().json(json!({
                "status": "error",
                "message": "Internal Server Error"
            }))
        }
    }
}

/// List all registered users
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "Users ordered by name", body = UserListResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Users"
)]
pub async fn list_users(pool: web::Data<SqlitePool>) -> impl Responder {
    match store::users::list_users(pool.get_ref()).await {
        Ok(users) => HttpResponse::Ok().json(UserListResponse {
            status: "success".to_string(),
            count: users.len(),
            users,
        }),
        Err(e) => {
            error!(error = %e, "Failed to fetch users");
            HttpResponse::InternalServerError().json(json!({
                "status": "error",
                "message": "Internal Server Error"
            }))
        }
    }
}
