use crate::{
    api::{attendance, health, stats, users},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{HttpRequest, HttpResponse, web};
use serde_json::json;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    // malformed bodies and query strings surface as JSON 400s
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler));

    cfg.service(
        web::resource("/attendance")
            .wrap(build_limiter(config.rate_ingest_per_min))
            .route(web::post().to(attendance::record_attendance))
            .route(web::get().to(attendance::list_attendance)),
    )
    .service(
        web::resource("/users")
            .wrap(build_limiter(config.rate_api_per_min))
            .route(web::post().to(users::add_user))
            .route(web::get().to(users::list_users)),
    )
    .service(
        web::resource("/stats")
            .wrap(build_limiter(config.rate_api_per_min))
            .route(web::get().to(stats::get_stats)),
    )
    // liveness probes stay unthrottled
    .service(web::resource("/health").route(web::get().to(health::health_check)));
}

fn json_error_handler(err: actix_web::error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let message = err.to_string();
    actix_web::error::InternalError::from_response(
        err,
        HttpResponse::BadRequest().json(json!({ "status": "error", "message": message })),
    )
    .into()
}

fn query_error_handler(
    err: actix_web::error::QueryPayloadError,
    _req: &HttpRequest,
) -> actix_web::Error {
    let message = err.to_string();
    actix_web::error::InternalError::from_response(
        err,
        HttpResponse::BadRequest().json(json!({ "status": "error", "message": message })),
    )
    .into()
}
