use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use hd_core::errors::Error;

/// Message returned to clients when the reply could not be generated. The
/// underlying cause only goes to the log.
pub const UPSTREAM_FAILURE_DETAIL: &str = "Failed to generate a response. Please try again later.";

/// A failed chat request. Every cause maps to the same generic 500.
#[derive(Debug)]
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!(cause = %self.0, upstream = self.0.is_upstream(), "chat request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": UPSTREAM_FAILURE_DETAIL })),
        )
            .into_response()
    }
}
