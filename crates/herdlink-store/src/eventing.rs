// SPDX-FileCopyrightText: 2026 Herdlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Event-emitting wrapper around a document store.
//!
//! [`EventingStore`] delegates every operation to the wrapped store and,
//! after a successful `upsert_merge`, publishes a [`DocumentEvent`] on a
//! bounded feed. The trigger engine consumes the other end of the channel.

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use herdlink_core::types::{AdapterType, Document, DocumentEvent, EventKind, HealthStatus};
use herdlink_core::{Adapter, DocumentStore, HerdlinkError};

/// Wraps a [`DocumentStore`] and publishes change events after writes.
///
/// A write that finds no prior document publishes `Created`; otherwise
/// `Updated` with the pre-image attached, so edge-triggered handlers can
/// gate on the transition. When the feed is full the event is dropped with
/// a warning -- notification delivery is best-effort and must never block
/// a store write.
pub struct EventingStore<S: DocumentStore> {
    inner: S,
    tx: mpsc::Sender<DocumentEvent>,
}

impl<S: DocumentStore> EventingStore<S> {
    pub fn new(inner: S, tx: mpsc::Sender<DocumentEvent>) -> Self {
        Self { inner, tx }
    }
}

#[async_trait]
impl<S: DocumentStore> Adapter for EventingStore<S> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn version(&self) -> semver::Version {
        self.inner.version()
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Store
    }

    async fn health_check(&self) -> Result<HealthStatus, HerdlinkError> {
        self.inner.health_check().await
    }

    async fn shutdown(&self) -> Result<(), HerdlinkError> {
        self.inner.shutdown().await
    }
}

#[async_trait]
impl<S: DocumentStore> DocumentStore for EventingStore<S> {
    async fn get(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<Document>, HerdlinkError> {
        self.inner.get(collection, id).await
    }

    async fn query_eq(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Vec<Document>, HerdlinkError> {
        self.inner.query_eq(collection, field, value).await
    }

    async fn upsert_merge(
        &self,
        collection: &str,
        id: &str,
        fields: serde_json::Value,
    ) -> Result<(), HerdlinkError> {
        let before = self.inner.get(collection, id).await?;
        self.inner.upsert_merge(collection, id, fields).await?;
        let doc = self
            .inner
            .get(collection, id)
            .await?
            .ok_or_else(|| HerdlinkError::Internal(format!(
                "document {collection}/{id} missing after write"
            )))?;

        let kind = if before.is_some() {
            EventKind::Updated
        } else {
            EventKind::Created
        };
        let event = DocumentEvent {
            collection: collection.to_string(),
            kind,
            doc,
            before,
        };
        match self.tx.try_send(event) {
            Ok(()) => debug!(collection, id, %kind, "document event published"),
            Err(mpsc::error::TrySendError::Full(_)) => {
                warn!(collection, id, "event feed full, dropping document event");
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                debug!(collection, id, "event feed closed, dropping document event");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herdlink_core::types::collections;
    use herdlink_test_utils::MemoryStore;

    #[tokio::test]
    async fn first_write_publishes_created() {
        let (tx, mut rx) = mpsc::channel(8);
        let store = EventingStore::new(MemoryStore::new(), tx);

        store
            .upsert_merge(
                collections::ALERTS,
                "a1",
                serde_json::json!({"id": "a1", "userId": "u1", "message": "m"}),
            )
            .await
            .unwrap();

        let event = rx.recv().await.unwrap();
        assert_eq!(event.kind, EventKind::Created);
        assert_eq!(event.collection, collections::ALERTS);
        assert_eq!(event.doc.id, "a1");
        assert!(event.before.is_none());
    }

    #[tokio::test]
    async fn second_write_publishes_updated_with_pre_image() {
        let (tx, mut rx) = mpsc::channel(8);
        let store = EventingStore::new(MemoryStore::new(), tx);

        store
            .upsert_merge(
                collections::VET_REQUESTS,
                "r1",
                serde_json::json!({"id": "r1", "status": "pending"}),
            )
            .await
            .unwrap();
        store
            .upsert_merge(
                collections::VET_REQUESTS,
                "r1",
                serde_json::json!({"status": "completed"}),
            )
            .await
            .unwrap();

        let _created = rx.recv().await.unwrap();
        let updated = rx.recv().await.unwrap();
        assert_eq!(updated.kind, EventKind::Updated);
        let before = updated.before.expect("pre-image attached");
        assert_eq!(before.body["status"], "pending");
        assert_eq!(updated.doc.body["status"], "completed");
    }

    #[tokio::test]
    async fn full_feed_drops_event_without_failing_write() {
        let (tx, _rx) = mpsc::channel(1);
        let store = EventingStore::new(MemoryStore::new(), tx);

        // First event fills the feed; the second is dropped but the write
        // still succeeds.
        for id in ["a1", "a2"] {
            store
                .upsert_merge(collections::ALERTS, id, serde_json::json!({"id": id}))
                .await
                .unwrap();
        }
        let doc = store.get(collections::ALERTS, "a2").await.unwrap();
        assert!(doc.is_some(), "write must succeed even when the feed is full");
    }

    #[tokio::test]
    async fn reads_do_not_publish_events() {
        let (tx, mut rx) = mpsc::channel(8);
        let store = EventingStore::new(MemoryStore::new(), tx);

        store
            .upsert_merge(collections::USERS, "u1", serde_json::json!({"id": "u1"}))
            .await
            .unwrap();
        let _ = rx.recv().await.unwrap();

        store.get(collections::USERS, "u1").await.unwrap();
        store
            .query_eq(collections::USERS, "role", "farmer")
            .await
            .unwrap();
        assert!(rx.try_recv().is_err(), "reads must not publish events");
    }
}
