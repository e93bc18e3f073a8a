// SPDX-FileCopyrightText: 2026 Herdlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Herdlink notification service.
//!
//! This crate provides the foundational trait definitions, error types, and
//! common types used throughout the Herdlink workspace. Store and sender
//! backends implement traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::HerdlinkError;
pub use types::{
    AdapterType, DeliveryReport, Document, DocumentEvent, EventKind, HealthStatus,
    MessageEnvelope, Role, TargetOutcome,
};

// Re-export adapter traits at crate root.
pub use traits::{Adapter, DocumentStore, PushSender};
