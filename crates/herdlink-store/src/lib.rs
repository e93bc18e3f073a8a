// SPDX-FileCopyrightText: 2026 Herdlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence layer and document event feed for Herdlink.
//!
//! [`SqliteStore`] implements the [`herdlink_core::DocumentStore`] trait over
//! a generic `(collection, id, body)` table. [`EventingStore`] wraps any
//! store and publishes a [`herdlink_core::DocumentEvent`] after each
//! successful write, feeding the trigger engine.

pub mod database;
pub mod eventing;
pub mod migrations;
mod queries;
pub mod sqlite;

pub use eventing::EventingStore;
pub use sqlite::SqliteStore;
