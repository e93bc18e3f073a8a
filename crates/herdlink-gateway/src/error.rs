// SPDX-FileCopyrightText: 2026 Herdlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP error mapping for gateway handlers.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use herdlink_core::HerdlinkError;

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error description.
    pub error: String,
}

/// Wraps a [`HerdlinkError`] for use as an axum handler error.
///
/// Validation errors surface to the caller as 4xx with their message;
/// everything else collapses to a generic 500 so internals never leak.
#[derive(Debug)]
pub struct ApiError(pub HerdlinkError);

impl From<HerdlinkError> for ApiError {
    fn from(err: HerdlinkError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            HerdlinkError::InvalidArgument(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            HerdlinkError::Unauthenticated => {
                (StatusCode::UNAUTHORIZED, "unauthenticated".to_string())
            }
            other => {
                error!(error = %other, "request failed with internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
            }
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
