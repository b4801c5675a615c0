// SPDX-FileCopyrightText: 2026 UI Hub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mapping from registry errors to HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use uihub_core::HubError;

/// A registry error on its way out of a handler.
#[derive(Debug)]
pub struct ApiError(pub HubError);

impl From<HubError> for ApiError {
    fn from(err: HubError) -> Self {
        Self(err)
    }
}

/// The status code each error category is reported with.
pub fn status_for(err: &HubError) -> StatusCode {
    match err {
        HubError::InvalidName(_) | HubError::InvalidRequestBody(_) => StatusCode::BAD_REQUEST,
        HubError::InvalidPluginType(_) | HubError::NotFound(_) => StatusCode::NOT_FOUND,
        HubError::CreateConflict(_) => StatusCode::CONFLICT,
        HubError::Conversion(_)
        | HubError::StoreUnavailable { .. }
        | HubError::Config(_)
        | HubError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self.0, "request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %self.0, "request rejected");
        }
        (status, self.0.to_string()).into_response()
    }
}
