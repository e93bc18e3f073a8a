// SPDX-FileCopyrightText: 2026 Herdlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Push sender trait for delivery transports (FCM, mock, etc.).

use async_trait::async_trait;

use crate::error::HerdlinkError;
use crate::traits::adapter::Adapter;
use crate::types::{DeliveryReport, MessageEnvelope, TargetOutcome};

/// Adapter for the push delivery transport.
///
/// Per-token rejection (stale/unregistered tokens) is reported inside the
/// returned shapes; an `Err` means the whole call failed at the transport
/// level. Callers guarantee a non-empty token set -- the empty-set
/// short-circuit happens in the dispatcher before the sender is reached.
#[async_trait]
pub trait PushSender: Adapter {
    /// Send one envelope to many tokens, returning the transport's own
    /// per-token accounting.
    async fn send_multicast(
        &self,
        envelope: &MessageEnvelope,
        tokens: &[String],
    ) -> Result<DeliveryReport, HerdlinkError>;

    /// Send one envelope to a single token.
    async fn send_single(
        &self,
        envelope: &MessageEnvelope,
        token: &str,
    ) -> Result<TargetOutcome, HerdlinkError>;
}
