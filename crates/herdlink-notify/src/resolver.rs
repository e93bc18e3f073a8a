// SPDX-FileCopyrightText: 2026 Herdlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Recipient resolution: role or user id -> deliverable tokens.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use herdlink_core::types::{collections, Role, User};
use herdlink_core::{DocumentStore, HerdlinkError};

/// Resolves notification recipients against the user collection.
pub struct RecipientResolver {
    store: Arc<dyn DocumentStore>,
}

impl RecipientResolver {
    /// Create a resolver over the given store handle.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Collect the delivery tokens of every user with the given role.
    ///
    /// Users without a token are skipped silently -- a missing token means
    /// "not eligible for push delivery", never an error. Documents that fail
    /// to decode are skipped the same way. An empty result is a valid
    /// terminal state. Tokens come back de-duplicated in first-seen store
    /// order; callers must not depend on any other ordering.
    pub async fn resolve_by_role(&self, role: Role) -> Result<Vec<String>, HerdlinkError> {
        let docs = self
            .store
            .query_eq(collections::USERS, "role", &role.to_string())
            .await?;

        let mut seen = HashSet::new();
        let mut tokens = Vec::new();
        for doc in docs {
            let user: User = match doc.decode() {
                Ok(user) => user,
                Err(e) => {
                    debug!(user = %doc.id, error = %e, "skipping undecodable user document");
                    continue;
                }
            };
            match user.delivery_token {
                Some(token) if !token.is_empty() => {
                    if seen.insert(token.clone()) {
                        tokens.push(token);
                    }
                }
                _ => debug!(user = %doc.id, "skipping user without delivery token"),
            }
        }
        debug!(%role, count = tokens.len(), "resolved role recipients");
        Ok(tokens)
    }

    /// Resolve a single user's delivery token.
    ///
    /// Fails with `NotFound` when the user document does not exist. Returns
    /// `None` when the user exists but has no (or an empty) token -- callers
    /// must treat this as "cannot deliver, skip silently".
    pub async fn resolve_by_user(
        &self,
        user_id: &str,
    ) -> Result<Option<String>, HerdlinkError> {
        let doc = self
            .store
            .get(collections::USERS, user_id)
            .await?
            .ok_or_else(|| HerdlinkError::NotFound {
                collection: collections::USERS.to_string(),
                id: user_id.to_string(),
            })?;
        let user: User = doc.decode()?;
        Ok(user.delivery_token.filter(|token| !token.is_empty()))
    }
}
