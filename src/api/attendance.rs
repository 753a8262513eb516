use actix_web::{HttpRequest, HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::SqlitePool;
use tracing::{error, info, warn};
use utoipa::ToSchema;

use crate::model::attendance::{AttendanceRecord, DEVICE_ID_RANGE};
use crate::store::attendance::{self, InsertOutcome};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordAttendance {
    #[schema(example = 5)]
    pub device_id: i64,
    #[schema(example = "2025-12-18T14:30:00+02:00", value_type = String)]
    pub event_timestamp: String,
    #[schema(example = "fingerprint", value_type = String)]
    pub login_method: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceQuery {
    pub limit: Option<u32>,
    pub device_id: Option<i64>,
    pub date: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordAttendanceResponse {
    #[schema(example = "success")]
    pub status: String,
    #[schema(example = "Attendance recorded")]
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_id: Option<i64>,
    pub device_id: i64,
    pub event_timestamp: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceListResponse {
    #[schema(example = "success")]
    pub status: String,
    #[schema(example = 1)]
    pub count: usize,
    pub records: Vec<AttendanceRecord>,
}

/// Attendance ingestion endpoint
#[utoipa::path(
    post,
    path = "/attendance",
    request_body = RecordAttendance,
    responses(
        (status = 200, description = "Recorded, or duplicate of an already stored record", body = RecordAttendanceResponse),
        (status = 400, description = "Missing or invalid fields", body = Object, example = json!({
            "status": "error",
            "message": "Invalid deviceId (must be 1-20)"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn record_attendance(
    req: HttpRequest,
    pool: web::Data<SqlitePool>,
    payload: web::Json<RecordAttendance>,
) -> impl Responder {
    let payload = payload.into_inner();

    if !DEVICE_ID_RANGE.contains(&payload.device_id) {
        warn!(device_id = payload.device_id, "Rejected out-of-range device id");
        return HttpResponse::BadRequest().json(json!({
            "status": "error",
            "message": "Invalid deviceId (must be 1-20)"
        }));
    }

    // reported by the connection, never by the caller
    let device_ip = req.peer_addr().map(|addr| addr.ip().to_string());

    let result = attendance::insert_attendance(
        pool.get_ref(),
        payload.device_id,
        &payload.event_timestamp,
        &payload.login_method,
        device_ip.as_deref(),
    )
    .await;

    match result {
        Ok(InsertOutcome::Recorded(record_id)) => {
            info!(
                record_id,
                device_id = payload.device_id,
                timestamp = %payload.event_timestamp,
                "Attendance recorded"
            );
            HttpResponse::Ok().json(RecordAttendanceResponse {
                status: "success".to_string(),
                message: "Attendance recorded".to_string(),
                record_id: Some(record_id),
                device_id: payload.device_id,
                event_timestamp: payload.event_timestamp,
            })
        }
        Ok(InsertOutcome::Duplicate) => {
            info!(
                device_id = payload.device_id,
                timestamp = %payload.event_timestamp,
                "Duplicate attendance record"
            );
            HttpResponse::Ok().json(RecordAttendanceResponse {
                status: "duplicate".to_string(),
                message: "Duplicate attendance record (already exists)".to_string(),
                record_id: None,
                device_id: payload.device_id,
                event_timestamp: payload.event_timestamp,
            })
        }
        Err(e) => {
            error!(error = %e, device_id = payload.device_id, "Failed to record attendance");
            HttpResponse::InternalServerError().json(json!({
                "status": "error",
                "message": "Internal Server Error"
            }))
        }
    }
}

/// List attendance records with optional filters
#[utoipa::path(
    get,
    path = "/attendance",
    params(
        ("limit", Query, description = "Maximum number of records to return (default 100)"),
        ("deviceId", Query, description = "Filter by device id"),
        ("date", Query, description = "Filter by calendar date (YYYY-MM-DD)")
    ),
    responses(
        (status = 200, description = "Matching records, newest first", body = AttendanceListResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn list_attendance(
    pool: web::Data<SqlitePool>,
    query: web::Query<AttendanceQuery>,
) -> impl Responder {
    let limit = i64::from(query.limit.unwrap_or(100));

    let result = attendance::query_attendance(
        pool.get_ref(),
        limit,
        query.device_id,
        query.date.as_deref(),
    )
    .await;

    match result {
        Ok(records) => HttpResponse::Ok().json(AttendanceListResponse {
            status: "success".to_string(),
            count: records.len(),
            records,
        }),
        Err(e) => {
            error!(error = %e, "Failed to fetch attendance records");
            HttpResponse::InternalServerError().json(json!({
                "status": "error",
                "message": "Internal Server Error"
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::db::test_pool;
    use crate::routes;
    use actix_web::web::Data;
    use actix_web::{App, test};
    use serde_json::{Value, json};
    use std::net::SocketAddr;

    fn test_config() -> Config {
        Config {
            server_addr: "127.0.0.1:0".to_string(),
            database_path: ":memory:".to_string(),
            rate_ingest_per_min: 1000,
            rate_api_per_min: 1000,
        }
    }

    fn peer() -> SocketAddr {
        "192.168.1.50:40000".parse().unwrap()
    }

    #[actix_web::test]
    async fn record_then_duplicate_then_filtered_list() {
        let pool = test_pool().await;
        let config = test_config();
        let app = test::init_service(
            App::new()
                .app_data(Data::new(pool.clone()))
                .app_data(Data::new(config.clone()))
                .configure(|cfg| routes::configure(cfg, config.clone())),
        )
        .await;

        // register the user first so the list resolves a name
        let req = test::TestRequest::post()
            .uri("/users")
            .peer_addr(peer())
            .set_json(json!({ "deviceId": 1, "name": "Alice" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let body = json!({
            "deviceId": 1,
            "eventTimestamp": "2025-01-01T08:00:00+00:00",
            "loginMethod": "fingerprint"
        });

        let req = test::TestRequest::post()
            .uri("/attendance")
            .peer_addr(peer())
            .set_json(&body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
        let json: Value = test::read_body_json(resp).await;
        assert_eq!(json["status"], "success");
        assert!(json["recordId"].as_i64().unwrap() > 0);
        assert_eq!(json["deviceId"], 1);

        // identical resubmission is a distinguished outcome, still 200
        let req = test::TestRequest::post()
            .uri("/attendance")
            .peer_addr(peer())
            .set_json(&body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
        let json: Value = test::read_body_json(resp).await;
        assert_eq!(json["status"], "duplicate");
        assert!(json.get("recordId").is_none());

        let req = test::TestRequest::get()
            .uri("/attendance?deviceId=1")
            .peer_addr(peer())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
        let json: Value = test::read_body_json(resp).await;
        assert_eq!(json["count"], 1);
        assert_eq!(json["records"][0]["name"], "Alice");
        assert_eq!(json["records"][0]["deviceIp"], "192.168.1.50");
    }

    #[actix_web::test]
    async fn out_of_range_device_id_is_rejected_without_a_write() {
        let pool = test_pool().await;
        let config = test_config();
        let app = test::init_service(
            App::new()
                .app_data(Data::new(pool.clone()))
                .app_data(Data::new(config.clone()))
                .configure(|cfg| routes::configure(cfg, config.clone())),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/attendance")
            .peer_addr(peer())
            .set_json(json!({
                "deviceId": 25,
                "eventTimestamp": "2025-01-01T08:00:00+00:00",
                "loginMethod": "fingerprint"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM attendance")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(total, 0);
    }

    #[actix_web::test]
    async fn missing_and_mistyped_fields_are_rejected() {
        let pool = test_pool().await;
        let config = test_config();
        let app = test::init_service(
            App::new()
                .app_data(Data::new(pool.clone()))
                .app_data(Data::new(config.clone()))
                .configure(|cfg| routes::configure(cfg, config.clone())),
        )
        .await;

        // loginMethod missing
        let req = test::TestRequest::post()
            .uri("/attendance")
            .peer_addr(peer())
            .set_json(json!({
                "deviceId": 1,
                "eventTimestamp": "2025-01-01T08:00:00+00:00"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);

        // deviceId as a numeric string is a type mismatch, not coerced
        let req = test::TestRequest::post()
            .uri("/attendance")
            .peer_addr(peer())
            .set_json(json!({
                "deviceId": "5",
                "eventTimestamp": "2025-01-01T08:00:00+00:00",
                "loginMethod": "fingerprint"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM attendance")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(total, 0);
    }

    #[actix_web::test]
    async fn list_honors_limit() {
        let pool = test_pool().await;
        let config = test_config();
        let app = test::init_service(
            App::new()
                .app_data(Data::new(pool.clone()))
                .app_data(Data::new(config.clone()))
                .configure(|cfg| routes::configure(cfg, config.clone())),
        )
        .await;

        for hour in 0..6 {
            let req = test::TestRequest::post()
                .uri("/attendance")
                .peer_addr(peer())
                .set_json(json!({
                    "deviceId": 2,
                    "eventTimestamp": format!("2025-01-01T{hour:02}:00:00+00:00"),
                    "loginMethod": "fingerprint"
                }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert!(resp.status().is_success());
        }

        let req = test::TestRequest::get()
            .uri("/attendance?limit=3")
            .peer_addr(peer())
            .to_request();
        let resp = test::call_service(&app, req).await;
        let json: Value = test::read_body_json(resp).await;
        assert_eq!(json["count"], 3);
        assert_eq!(json["records"].as_array().unwrap().len(), 3);
    }
}
