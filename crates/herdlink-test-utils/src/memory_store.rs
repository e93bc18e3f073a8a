// SPDX-FileCopyrightText: 2026 Herdlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory document store for deterministic testing.
//!
//! Documents are kept per collection in insertion order, matching the
//! ordering contract of the SQLite backend.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use herdlink_core::types::{AdapterType, Document, HealthStatus};
use herdlink_core::{Adapter, DocumentStore, HerdlinkError};

type Collection = Vec<(String, serde_json::Value)>;

/// An in-memory document store.
pub struct MemoryStore {
    collections: Arc<Mutex<HashMap<String, Collection>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            collections: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Number of documents in a collection.
    pub async fn len(&self, collection: &str) -> usize {
        self.collections
            .lock()
            .await
            .get(collection)
            .map(Vec::len)
            .unwrap_or(0)
    }

    /// True when the collection holds no documents.
    pub async fn is_empty(&self, collection: &str) -> bool {
        self.len(collection).await == 0
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Adapter for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Store
    }

    async fn health_check(&self) -> Result<HealthStatus, HerdlinkError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), HerdlinkError> {
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<Document>, HerdlinkError> {
        let collections = self.collections.lock().await;
        Ok(collections.get(collection).and_then(|docs| {
            docs.iter()
                .find(|(doc_id, _)| doc_id == id)
                .map(|(doc_id, body)| Document::new(doc_id.clone(), body.clone()))
        }))
    }

    async fn query_eq(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Vec<Document>, HerdlinkError> {
        let collections = self.collections.lock().await;
        let Some(docs) = collections.get(collection) else {
            return Ok(Vec::new());
        };
        Ok(docs
            .iter()
            .filter(|(_, body)| {
                body.get(field)
                    .and_then(serde_json::Value::as_str)
                    .is_some_and(|v| v == value)
            })
            .map(|(id, body)| Document::new(id.clone(), body.clone()))
            .collect())
    }

    async fn upsert_merge(
        &self,
        collection: &str,
        id: &str,
        fields: serde_json::Value,
    ) -> Result<(), HerdlinkError> {
        let serde_json::Value::Object(fields) = fields else {
            return Err(HerdlinkError::InvalidArgument(
                "merge fields must be a JSON object".to_string(),
            ));
        };

        let mut collections = self.collections.lock().await;
        let docs = collections.entry(collection.to_string()).or_default();
        match docs.iter_mut().find(|(doc_id, _)| doc_id == id) {
            Some((_, body)) => {
                let merged = body.as_object_mut().ok_or_else(|| {
                    HerdlinkError::Internal(format!("document {collection}/{id} is not an object"))
                })?;
                for (key, value) in fields {
                    merged.insert(key, value);
                }
            }
            None => docs.push((id.to_string(), serde_json::Value::Object(fields))),
        }
        Ok(())
    }
}
