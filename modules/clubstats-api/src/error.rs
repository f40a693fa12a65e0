use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use tracing::warn;

use clubstats_common::StatsError;

/// HTTP face of [`StatsError`]: a status code plus `{ "error", "message" }`.
#[derive(Debug)]
pub struct ApiError(pub StatsError);

impl From<StatsError> for ApiError {
    fn from(err: StatsError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            StatsError::NotFound { .. } => StatusCode::NOT_FOUND,
            StatsError::Validation(_) => StatusCode::BAD_REQUEST,
            StatsError::StoreUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            warn!(error = %self.0, "Request failed");
        }

        let body = serde_json::json!({
            "error": self.0.code(),
            "message": self.0.to_string(),
        });
        (status, Json(body)).into_response()
    }
}
