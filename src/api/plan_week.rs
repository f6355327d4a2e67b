use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::post,
    Router,
};
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::models::{validate_plan_request, PlanEnvelope, RawPlanRequest};
use crate::services::PlanGenerationService;

#[derive(Clone)]
pub struct PlanWeekAppState {
    pub plan_generation_service: PlanGenerationService,
}

pub fn plan_week_routes(plan_generation_service: PlanGenerationService) -> Router {
    let shared_state = PlanWeekAppState {
        plan_generation_service,
    };

    Router::new()
        .route("/plan-week", post(plan_week).options(preflight))
        .with_state(shared_state)
}

/// Bare `OPTIONS` without CORS request headers still gets a 200
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// Generate a weekly workout plan
pub async fn plan_week(State(state): State<PlanWeekAppState>, body: Bytes) -> Response {
    let request_id = Uuid::new_v4();

    generate(state, body)
        .instrument(info_span!("plan_week", %request_id))
        .await
}

async fn generate(state: PlanWeekAppState, body: Bytes) -> Response {
    let raw = match parse_body(&body) {
        Ok(raw) => raw,
        Err(e) => {
            warn!("Rejected plan request body: {}", e);
            return (
                StatusCode::BAD_GATEWAY,
                Json(PlanEnvelope::failure("Invalid request body")),
            )
                .into_response();
        }
    };

    let request = validate_plan_request(raw);

    match state.plan_generation_service.generate_week(&request).await {
        Ok(week) => {
            info!(days = week.len(), "Weekly plan generated");
            Json(PlanEnvelope::success(week)).into_response()
        }
        Err(e) => {
            error!(kind = ?e.kind(), "Failed to generate plan: {}", e);
            e.into_response()
        }
    }
}

/// An empty body is the same as `{}`; every field is optional.
fn parse_body(body: &[u8]) -> Result<RawPlanRequest, serde_json::Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(RawPlanRequest::default());
    }
    serde_json::from_slice(body)
}
