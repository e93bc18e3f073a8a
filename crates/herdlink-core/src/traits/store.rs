// SPDX-FileCopyrightText: 2026 Herdlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Document store trait for persistence backends (SQLite, in-memory, etc.).

use async_trait::async_trait;

use crate::error::HerdlinkError;
use crate::traits::adapter::Adapter;
use crate::types::Document;

/// Adapter for the collection/document store consumed by the service.
///
/// The operation set is deliberately small: get by id, query by field
/// equality, and set/merge fields. Everything the resolver and the token
/// registration flow need is expressible through these three.
#[async_trait]
pub trait DocumentStore: Adapter {
    /// Fetch a single document by id, or `None` when it does not exist.
    async fn get(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<Document>, HerdlinkError>;

    /// Fetch all documents whose top-level `field` equals `value`.
    ///
    /// Results come back in store insertion order; callers must not depend
    /// on any other ordering.
    async fn query_eq(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Vec<Document>, HerdlinkError>;

    /// Merge `fields` (a JSON object) into the document, creating it when
    /// absent. The merge is shallow and field-level last-write-wins; the
    /// backend's per-document write semantics are the only synchronization.
    async fn upsert_merge(
        &self,
        collection: &str,
        id: &str,
        fields: serde_json::Value,
    ) -> Result<(), HerdlinkError>;
}
