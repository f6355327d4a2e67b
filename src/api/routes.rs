use axum::{
    http::{header, HeaderName, Method},
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::health::health_check;
use super::plan_week::plan_week_routes;
use crate::services::PlanGenerationService;

pub fn create_routes(plan_generation_service: PlanGenerationService) -> Router {
    // Paths mirror the hosted edge functions the web client already calls
    let functions_v1 = Router::new()
        .route("/health", get(health_check))
        .merge(plan_week_routes(plan_generation_service));

    Router::new()
        .route("/health", get(health_check))
        .nest("/functions/v1", functions_v1)
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}

/// Browser clients call from any origin
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
        ])
}
