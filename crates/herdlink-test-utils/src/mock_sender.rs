// SPDX-FileCopyrightText: 2026 Herdlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock push sender for deterministic testing.
//!
//! `MockSender` implements `PushSender` with scriptable per-token failures
//! and captured sends for assertion in tests.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use herdlink_core::types::{
    AdapterType, DeliveryReport, HealthStatus, MessageEnvelope, TargetOutcome,
};
use herdlink_core::{Adapter, HerdlinkError, PushSender};

/// One captured send: the envelope and the tokens it targeted.
#[derive(Debug, Clone)]
pub struct SentBatch {
    pub envelope: MessageEnvelope,
    pub tokens: Vec<String>,
}

/// A mock push sender.
///
/// - `fail_token()` scripts a per-token rejection (reported inside the
///   returned shapes, the way a real transport reports stale tokens).
/// - `set_transport_failure()` makes the next calls fail wholesale with a
///   `Delivery` error.
/// - Every send is captured and retrievable via `sent()` / `call_count()`.
pub struct MockSender {
    sent: Arc<Mutex<Vec<SentBatch>>>,
    failing_tokens: Arc<Mutex<HashSet<String>>>,
    transport_failure: Arc<Mutex<bool>>,
}

impl MockSender {
    /// Create a mock sender where every delivery succeeds.
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            failing_tokens: Arc::new(Mutex::new(HashSet::new())),
            transport_failure: Arc::new(Mutex::new(false)),
        }
    }

    /// Script a per-token rejection with reason "NotRegistered".
    pub async fn fail_token(&self, token: impl Into<String>) {
        self.failing_tokens.lock().await.insert(token.into());
    }

    /// Make subsequent sends fail at the transport level.
    pub async fn set_transport_failure(&self, failing: bool) {
        *self.transport_failure.lock().await = failing;
    }

    /// All captured sends, in order.
    pub async fn sent(&self) -> Vec<SentBatch> {
        self.sent.lock().await.clone()
    }

    /// Number of times the sender was invoked.
    pub async fn call_count(&self) -> usize {
        self.sent.lock().await.len()
    }

    /// Clear the captured sends.
    pub async fn clear(&self) {
        self.sent.lock().await.clear();
    }

    async fn outcome_for(&self, token: &str) -> TargetOutcome {
        let failing = self.failing_tokens.lock().await;
        if failing.contains(token) {
            TargetOutcome {
                token: token.to_string(),
                ok: false,
                error_reason: Some("NotRegistered".to_string()),
            }
        } else {
            TargetOutcome {
                token: token.to_string(),
                ok: true,
                error_reason: None,
            }
        }
    }

    async fn check_transport(&self) -> Result<(), HerdlinkError> {
        if *self.transport_failure.lock().await {
            return Err(HerdlinkError::Delivery {
                message: "mock transport failure".to_string(),
                source: None,
            });
        }
        Ok(())
    }
}

impl Default for MockSender {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Adapter for MockSender {
    fn name(&self) -> &str {
        "mock-sender"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Sender
    }

    async fn health_check(&self) -> Result<HealthStatus, HerdlinkError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), HerdlinkError> {
        Ok(())
    }
}

#[async_trait]
impl PushSender for MockSender {
    async fn send_multicast(
        &self,
        envelope: &MessageEnvelope,
        tokens: &[String],
    ) -> Result<DeliveryReport, HerdlinkError> {
        self.check_transport().await?;

        self.sent.lock().await.push(SentBatch {
            envelope: envelope.clone(),
            tokens: tokens.to_vec(),
        });

        let mut outcomes = Vec::with_capacity(tokens.len());
        for token in tokens {
            outcomes.push(self.outcome_for(token).await);
        }
        let success_count = outcomes.iter().filter(|o| o.ok).count() as u32;
        let failure_count = outcomes.len() as u32 - success_count;
        Ok(DeliveryReport {
            success_count,
            failure_count,
            outcomes,
        })
    }

    async fn send_single(
        &self,
        envelope: &MessageEnvelope,
        token: &str,
    ) -> Result<TargetOutcome, HerdlinkError> {
        self.check_transport().await?;

        self.sent.lock().await.push(SentBatch {
            envelope: envelope.clone(),
            tokens: vec![token.to_string()],
        });
        Ok(self.outcome_for(token).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope() -> MessageEnvelope {
        MessageEnvelope::new("title", "body")
    }

    #[tokio::test]
    async fn multicast_reports_all_success_by_default() {
        let sender = MockSender::new();
        let tokens = vec!["a".to_string(), "b".to_string()];
        let report = sender.send_multicast(&envelope(), &tokens).await.unwrap();
        assert_eq!(report.success_count, 2);
        assert_eq!(report.failure_count, 0);
        assert_eq!(sender.call_count().await, 1);
    }

    #[tokio::test]
    async fn scripted_token_failure_is_counted() {
        let sender = MockSender::new();
        sender.fail_token("stale").await;
        let tokens = vec!["fresh".to_string(), "stale".to_string()];
        let report = sender.send_multicast(&envelope(), &tokens).await.unwrap();
        assert_eq!(report.success_count, 1);
        assert_eq!(report.failure_count, 1);
        let failed = report.outcomes.iter().find(|o| !o.ok).unwrap();
        assert_eq!(failed.token, "stale");
        assert_eq!(failed.error_reason.as_deref(), Some("NotRegistered"));
    }

    #[tokio::test]
    async fn transport_failure_returns_delivery_error() {
        let sender = MockSender::new();
        sender.set_transport_failure(true).await;
        let result = sender.send_single(&envelope(), "tok").await;
        assert!(matches!(result, Err(HerdlinkError::Delivery { .. })));
        assert_eq!(sender.call_count().await, 0, "failed transport captures nothing");
    }

    #[tokio::test]
    async fn sent_batches_capture_envelope_and_tokens() {
        let sender = MockSender::new();
        let env = MessageEnvelope::new("New alert", "msg").with_data("route", "/alerts");
        sender.send_single(&env, "tokA").await.unwrap();

        let sent = sender.sent().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].envelope.title, "New alert");
        assert_eq!(sent[0].tokens, vec!["tokA".to_string()]);

        sender.clear().await;
        assert_eq!(sender.call_count().await, 0);
    }
}
