// SPDX-FileCopyrightText: 2026 Herdlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across adapter traits and the Herdlink service.
//!
//! Domain structs mirror the stored document shapes, so all field names use
//! camelCase on the wire (`farmerId`, `deliveryToken`, ...).

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::HerdlinkError;

/// Canonical collection names consumed by the service.
pub mod collections {
    pub const USERS: &str = "users";
    pub const VET_REQUESTS: &str = "vetRequests";
    pub const VET_REPORTS: &str = "vetReports";
    pub const ALERTS: &str = "alerts";
}

/// User role within the livestock platform.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Farmer,
    Veterinarian,
    Government,
}

/// A platform user, as stored in the `users` collection.
///
/// `delivery_token` identifies one client installation for push delivery.
/// Absence means "not eligible for push delivery", never an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_token_updated_at: Option<String>,
    /// Opaque bearer credential used by the gateway to resolve a caller identity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

/// Lifecycle status of a treatment request. The status set is open on the
/// wire; unrecognized values decode as [`RequestStatus::Unknown`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    #[serde(other)]
    Unknown,
}

/// A treatment request created by a farmer, stored in `vetRequests`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentRequest {
    pub id: String,
    pub farmer_id: String,
    pub animal_type: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub status: RequestStatus,
}

/// A treatment report written once by a veterinarian, stored in `vetReports`.
/// Immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentReport {
    pub id: String,
    pub farmer_id: String,
    pub animal_type: String,
    #[serde(default)]
    pub diagnosis: String,
    #[serde(default)]
    pub treatment: String,
    #[serde(default)]
    pub created_at: String,
}

/// Severity of an alert.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    #[default]
    Info,
    Warning,
    Alert,
}

/// An alert addressed to a single user, stored in `alerts`. Immutable after
/// creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: String,
    pub user_id: String,
    #[serde(rename = "type", default)]
    pub kind: AlertKind,
    pub message: String,
    #[serde(default)]
    pub created_at: String,
}

/// The composed title/body/data payload built from a domain event, prior to
/// transport. Ephemeral, never persisted.
///
/// `data` always carries enough identifiers (`entityId`, `entityType`,
/// `route`) for the receiving client to route a tap-through without an
/// additional fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageEnvelope {
    pub title: String,
    pub body: String,
    pub data: BTreeMap<String, String>,
}

impl MessageEnvelope {
    /// Create an envelope with an empty data map.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            data: BTreeMap::new(),
        }
    }

    /// Attach a data entry, builder-style.
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }
}

/// Per-token delivery outcome as reported by the push sender.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetOutcome {
    pub token: String,
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_reason: Option<String>,
}

/// Aggregate delivery report for one send.
///
/// The counts come from the sender's response and are never re-derived by
/// counting `outcomes` -- the sender is the source of truth for partial
/// failures such as unregistered tokens.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryReport {
    pub success_count: u32,
    pub failure_count: u32,
    #[serde(default)]
    pub outcomes: Vec<TargetOutcome>,
}

impl DeliveryReport {
    /// The distinct no-recipients outcome: zero successes, zero failures,
    /// and the sender was never invoked.
    pub fn no_recipients() -> Self {
        Self::default()
    }

    /// True when this report represents a resolution that yielded no tokens.
    pub fn is_no_recipients(&self) -> bool {
        self.success_count == 0 && self.failure_count == 0 && self.outcomes.is_empty()
    }
}

/// A document fetched from or written to the store: an id plus a JSON body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub body: serde_json::Value,
}

impl Document {
    pub fn new(id: impl Into<String>, body: serde_json::Value) -> Self {
        Self { id: id.into(), body }
    }

    /// Decode the body into a typed domain struct.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, HerdlinkError> {
        serde_json::from_value(self.body.clone()).map_err(|e| HerdlinkError::Store {
            source: Box::new(e),
        })
    }
}

/// The kind of change a document event describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Created,
    Updated,
}

/// A change observed on a stored document, delivered to the trigger engine.
///
/// `before` carries the pre-image for updates so edge-triggered handlers can
/// gate on the transition rather than the observed state.
#[derive(Debug, Clone)]
pub struct DocumentEvent {
    pub collection: String,
    pub kind: EventKind,
    pub doc: Document,
    pub before: Option<Document>,
}

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the type of adapter behind a trait object.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Store,
    Sender,
}
