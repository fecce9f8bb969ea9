// SPDX-FileCopyrightText: 2026 Elite Finder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error responses for the admin routes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use elite_core::EliteError;
use serde_json::json;

/// An [`EliteError`] rendered as `{"detail": ...}`.
#[derive(Debug)]
pub struct ApiError(pub EliteError);

impl From<EliteError> for ApiError {
    fn from(err: EliteError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            EliteError::NotFound { .. } => StatusCode::NOT_FOUND,
            _ => {
                tracing::error!(error = %self.0, "admin request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(json!({"detail": self.0.to_string()}))).into_response()
    }
}
