// SPDX-FileCopyrightText: 2026 Herdlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The trigger registration table and dispatch loop.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use herdlink_core::types::{DocumentEvent, EventKind};
use herdlink_core::HerdlinkError;

/// A one-shot reaction to a document event.
#[async_trait]
pub trait TriggerHandler: Send + Sync {
    /// Stable name used in logs.
    fn name(&self) -> &'static str;

    /// React to one event. Errors are logged by the engine and never
    /// propagate to the event feed.
    async fn handle(&self, event: &DocumentEvent) -> Result<(), HerdlinkError>;
}

/// One row of the registration table.
pub struct TriggerBinding {
    pub collection: &'static str,
    pub kind: EventKind,
    pub handler: Arc<dyn TriggerHandler>,
}

/// Matches document events against the registration table and invokes the
/// bound handlers.
#[derive(Default)]
pub struct TriggerEngine {
    bindings: Vec<TriggerBinding>,
}

impl TriggerEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for events of `kind` on `collection`.
    pub fn register(
        &mut self,
        collection: &'static str,
        kind: EventKind,
        handler: Arc<dyn TriggerHandler>,
    ) {
        debug!(collection, %kind, trigger = handler.name(), "trigger registered");
        self.bindings.push(TriggerBinding {
            collection,
            kind,
            handler,
        });
    }

    /// Number of registered bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Fan one event out to every matching binding.
    ///
    /// Returns the number of handlers invoked. Handler errors are logged
    /// and swallowed; the event pipeline always completes.
    pub async fn dispatch_event(&self, event: &DocumentEvent) -> usize {
        let mut invoked = 0;
        for binding in &self.bindings {
            if binding.collection != event.collection || binding.kind != event.kind {
                continue;
            }
            invoked += 1;
            if let Err(e) = binding.handler.handle(event).await {
                warn!(
                    trigger = binding.handler.name(),
                    collection = %event.collection,
                    doc = %event.doc.id,
                    error = %e,
                    "trigger handler failed, event dropped"
                );
            }
        }
        invoked
    }

    /// Drive the engine from the document event feed until it closes.
    pub async fn run(self, mut rx: mpsc::Receiver<DocumentEvent>) {
        info!(bindings = self.len(), "trigger engine running");
        while let Some(event) = rx.recv().await {
            self.dispatch_event(&event).await;
        }
        debug!("event feed closed, trigger engine stopping");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herdlink_core::types::Document;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingHandler {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingHandler {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail,
            })
        }
    }

    #[async_trait]
    impl TriggerHandler for CountingHandler {
        fn name(&self) -> &'static str {
            "counting"
        }

        async fn handle(&self, _event: &DocumentEvent) -> Result<(), HerdlinkError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(HerdlinkError::Internal("scripted failure".to_string()))
            } else {
                Ok(())
            }
        }
    }

    fn event(collection: &str, kind: EventKind) -> DocumentEvent {
        DocumentEvent {
            collection: collection.to_string(),
            kind,
            doc: Document::new("d1", serde_json::json!({"id": "d1"})),
            before: None,
        }
    }

    #[tokio::test]
    async fn dispatch_matches_collection_and_kind() {
        let handler = CountingHandler::new(false);
        let mut engine = TriggerEngine::new();
        engine.register("alerts", EventKind::Created, handler.clone());

        assert_eq!(engine.dispatch_event(&event("alerts", EventKind::Created)).await, 1);
        assert_eq!(engine.dispatch_event(&event("alerts", EventKind::Updated)).await, 0);
        assert_eq!(engine.dispatch_event(&event("users", EventKind::Created)).await, 0);
        assert_eq!(handler.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn handler_failure_is_swallowed() {
        let failing = CountingHandler::new(true);
        let healthy = CountingHandler::new(false);
        let mut engine = TriggerEngine::new();
        engine.register("alerts", EventKind::Created, failing.clone());
        engine.register("alerts", EventKind::Created, healthy.clone());

        // Both handlers run; the failure does not stop the fan-out.
        let invoked = engine.dispatch_event(&event("alerts", EventKind::Created)).await;
        assert_eq!(invoked, 2);
        assert_eq!(healthy.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn run_drains_feed_until_close() {
        let handler = CountingHandler::new(false);
        let mut engine = TriggerEngine::new();
        engine.register("alerts", EventKind::Created, handler.clone());

        let (tx, rx) = mpsc::channel(8);
        let task = tokio::spawn(engine.run(rx));

        tx.send(event("alerts", EventKind::Created)).await.unwrap();
        tx.send(event("alerts", EventKind::Created)).await.unwrap();
        drop(tx);
        task.await.unwrap();

        assert_eq!(handler.calls.load(Ordering::SeqCst), 2);
    }
}
