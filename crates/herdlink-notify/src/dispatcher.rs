// SPDX-FileCopyrightText: 2026 Herdlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Notification dispatch: envelope + tokens -> delivery report.

use std::sync::Arc;

use tracing::{debug, info};

use herdlink_core::types::{DeliveryReport, MessageEnvelope};
use herdlink_core::{HerdlinkError, PushSender};

/// Hands composed envelopes to the push sender and reports outcomes.
pub struct NotificationDispatcher {
    sender: Arc<dyn PushSender>,
}

impl NotificationDispatcher {
    /// Create a dispatcher over the given sender handle.
    pub fn new(sender: Arc<dyn PushSender>) -> Self {
        Self { sender }
    }

    /// Send one envelope to a set of tokens.
    ///
    /// An empty token set short-circuits to the distinct no-recipients
    /// report WITHOUT invoking the sender -- the transport's own validation
    /// would reject an empty batch, and zero recipients is a valid terminal
    /// state, not a failure. Otherwise the sender is invoked once and its
    /// per-token accounting is passed through verbatim.
    pub async fn dispatch_to_set(
        &self,
        envelope: &MessageEnvelope,
        tokens: &[String],
    ) -> Result<DeliveryReport, HerdlinkError> {
        if tokens.is_empty() {
            info!(title = %envelope.title, "no recipients resolved, skipping send");
            return Ok(DeliveryReport::no_recipients());
        }

        let report = self.sender.send_multicast(envelope, tokens).await?;
        info!(
            title = %envelope.title,
            success = report.success_count,
            failure = report.failure_count,
            "dispatched notification batch"
        );
        Ok(report)
    }

    /// Send one envelope to a single token.
    ///
    /// A rejected delivery converts to a `Delivery` error carrying the
    /// transport's reason. Trigger-context callers catch and log it --
    /// delivery is best-effort and must never abort the event pipeline.
    pub async fn dispatch_to_one(
        &self,
        envelope: &MessageEnvelope,
        token: &str,
    ) -> Result<(), HerdlinkError> {
        let outcome = self.sender.send_single(envelope, token).await?;
        if outcome.ok {
            debug!(title = %envelope.title, "notification delivered");
            Ok(())
        } else {
            Err(HerdlinkError::Delivery {
                message: outcome
                    .error_reason
                    .unwrap_or_else(|| "delivery rejected".to_string()),
                source: None,
            })
        }
    }
}
