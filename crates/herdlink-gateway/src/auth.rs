// SPDX-FileCopyrightText: 2026 Herdlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Caller identity resolution for authenticated endpoints.
//!
//! The identity provider is opaque to this layer: a bearer API key is
//! matched against the `apiKey` field of a user document. No key, an empty
//! key, or an unknown key all resolve to `Unauthenticated` (fail-closed).

use std::sync::Arc;

use axum::http::HeaderMap;
use tracing::debug;

use herdlink_core::types::collections;
use herdlink_core::{DocumentStore, HerdlinkError};

/// A resolved caller identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Id of the user document the credential belongs to.
    pub user_id: String,
}

/// Resolve the caller identity from the `Authorization: Bearer` header.
pub async fn authenticate(
    store: &Arc<dyn DocumentStore>,
    headers: &HeaderMap,
) -> Result<Identity, HerdlinkError> {
    let key = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .ok_or(HerdlinkError::Unauthenticated)?;

    let mut matches = store
        .query_eq(collections::USERS, "apiKey", key)
        .await?;
    match matches.len() {
        0 => {
            debug!("bearer key matched no user");
            Err(HerdlinkError::Unauthenticated)
        }
        1 => {
            let doc = matches.remove(0);
            Ok(Identity { user_id: doc.id })
        }
        n => {
            // A credential shared across user records is a data problem;
            // refuse rather than guess.
            debug!(count = n, "bearer key matched multiple users");
            Err(HerdlinkError::Unauthenticated)
        }
    }
}
