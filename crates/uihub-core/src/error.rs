// SPDX-FileCopyrightText: 2026 UI Hub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the UI hub.

use thiserror::Error;

use crate::traits::store::StoreError;

/// The error type returned by every registry operation.
///
/// Each variant is a stable category: the HTTP layer maps it to exactly one
/// status code, so clients never need to parse the message text.
#[derive(Debug, Error)]
pub enum HubError {
    /// The plugin name is empty or not a valid DNS label.
    #[error("invalid plugin name: {0}")]
    InvalidName(String),

    /// The request body is not valid JSON or has unknown/missing fields.
    #[error("invalid plugin data: {0}")]
    InvalidRequestBody(String),

    /// The requested plugin type does not resolve to a usable catalog entry.
    #[error("invalid plugin type: {0}")]
    InvalidPluginType(String),

    /// No plugin resource with this name exists in the store.
    #[error("observability ui plugin not found: {0}")]
    NotFound(String),

    /// A plugin resource with this name already exists in the store.
    #[error("observability ui plugin already exists: {0}")]
    CreateConflict(String),

    /// A store document could not be mapped to the plugin resource shape.
    #[error("unable to convert observability ui plugin: {0}")]
    Conversion(String),

    /// The store could not be reached or returned an unexpected failure.
    #[error("resource store unavailable: {message}")]
    StoreUnavailable {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration errors (bad catalog, unusable store settings).
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for HubError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { name } => HubError::NotFound(name),
            StoreError::Conflict { name } => HubError::CreateConflict(name),
            StoreError::Malformed { message } => HubError::Conversion(message),
            StoreError::Unavailable { message, source } => {
                HubError::StoreUnavailable { message, source }
            }
        }
    }
}
