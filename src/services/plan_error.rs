use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::PlanEnvelope;

/// Coarse failure classes callers map to status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanErrorKind {
    ConfigurationError,
    Timeout,
    ProviderError,
    EmptyResponse,
    MalformedResponse,
}

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("OpenAI API key not configured. Please add your API key to continue.")]
    MissingApiKey,
    #[error("Request timeout - please try again")]
    Timeout,
    #[error("OpenAI API error: {0}")]
    ProviderStatus(u16),
    #[error("Failed to generate plan")]
    ProviderTransport(String),
    #[error("No content in OpenAI response")]
    EmptyResponse,
    /// `raw` holds the model's reply for diagnostics and is never rendered.
    #[error("Failed to parse OpenAI response as JSON")]
    MalformedResponse { raw: String },
}

impl PlanError {
    pub fn kind(&self) -> PlanErrorKind {
        match self {
            PlanError::MissingApiKey => PlanErrorKind::ConfigurationError,
            PlanError::Timeout => PlanErrorKind::Timeout,
            PlanError::ProviderStatus(_) | PlanError::ProviderTransport(_) => {
                PlanErrorKind::ProviderError
            }
            PlanError::EmptyResponse => PlanErrorKind::EmptyResponse,
            PlanError::MalformedResponse { .. } => PlanErrorKind::MalformedResponse,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self.kind() {
            PlanErrorKind::ConfigurationError => StatusCode::BAD_REQUEST,
            PlanErrorKind::Timeout => StatusCode::GATEWAY_TIMEOUT,
            PlanErrorKind::ProviderError
            | PlanErrorKind::EmptyResponse
            | PlanErrorKind::MalformedResponse => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for PlanError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(PlanEnvelope::failure(self.to_string()));

        (status, body).into_response()
    }
}
