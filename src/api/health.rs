use actix_web::{HttpResponse, Responder, web};
use chrono::Local;
use serde_json::json;
use std::path::Path;

use crate::config::Config;

/// Liveness probe; reports whether the storage file is present
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Always healthy while the process serves requests", body = Object, example = json!({
            "status": "healthy",
            "timestamp": "2025-12-18T14:30:00+02:00",
            "storage": "connected"
        }))
    ),
    tag = "System"
)]
pub async fn health_check(config: web::Data<Config>) -> impl Responder {
    let storage = if Path::new(&config.database_path).exists() {
        "connected"
    } else {
        "not found"
    };

    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "timestamp": Local::now().to_rfc3339(),
        "storage": storage
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::web::Data;
    use actix_web::{App, test, web};
    use serde_json::Value;

    #[actix_web::test]
    async fn health_always_responds_ok() {
        let config = Config {
            server_addr: "127.0.0.1:0".to_string(),
            database_path: "does-not-exist.db".to_string(),
            rate_ingest_per_min: 1000,
            rate_api_per_min: 1000,
        };
        let app = test::init_service(
            App::new()
                .app_data(Data::new(config))
                .route("/health", web::get().to(health_check)),
        )
        .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["storage"], "not found");
    }
}
