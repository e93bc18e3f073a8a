// SPDX-FileCopyrightText: 2026 Herdlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Herdlink notification service.

use thiserror::Error;

/// The primary error type used across Herdlink adapter traits and core operations.
///
/// Note that an empty recipient set is NOT an error: resolution that yields
/// zero tokens is a valid terminal state reported through
/// [`crate::types::DeliveryReport::no_recipients`].
#[derive(Debug, Error)]
pub enum HerdlinkError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Document store backend errors (connection, query failure, malformed document).
    #[error("store error: {source}")]
    Store {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A referenced document does not exist in the store.
    #[error("not found: {collection}/{id}")]
    NotFound { collection: String, id: String },

    /// The push sender rejected a token or batch (invalid token, transport failure).
    #[error("delivery failed: {message}")]
    Delivery {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A required request field is missing or empty.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An authenticated operation was invoked without a caller identity.
    #[error("unauthenticated")]
    Unauthenticated,

    /// An adapter was used before its `initialize` completed.
    #[error("adapter not ready: {name}")]
    AdapterNotReady { name: String },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
