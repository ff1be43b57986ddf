use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::core::errors::ProxyError;

#[derive(Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MonthQuery {
    pub group_name: String,
    /// Month in YYYY-MM format
    pub month: String,
}

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub cache_enabled: bool,
    pub database: String,
}

// Error response struct
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

// Newtype wrapper for ProxyError to implement IntoResponse
pub struct ApiError(pub ProxyError);

impl From<ProxyError> for ApiError {
    fn from(err: ProxyError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self.0 {
            ProxyError::UnsupportedMethod(_) => StatusCode::NOT_FOUND,
            ProxyError::InvalidInput(..) | ProxyError::InvalidMonth(_) => StatusCode::BAD_REQUEST,
            ProxyError::GroupNotFound(_) | ProxyError::ParticipantNotFound(_) => StatusCode::BAD_REQUEST,
            ProxyError::UpstreamStatus { status, .. } => match *status {
                400..=499 => StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
                _ => StatusCode::BAD_GATEWAY,
            },
            ProxyError::UpstreamRejected(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ProxyError::UpstreamRequest(_) | ProxyError::InvalidResponse(_) => StatusCode::BAD_GATEWAY,
            ProxyError::CurrentUserUnavailable => StatusCode::BAD_GATEWAY,
            ProxyError::MissingCredentials => StatusCode::SERVICE_UNAVAILABLE,
            ProxyError::StorageError(_)
            | ProxyError::CacheError(_)
            | ProxyError::MalformedEntry(_)
            | ProxyError::LoggingError(_)
            | ProxyError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (
            status,
            Json(ErrorResponse {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}
