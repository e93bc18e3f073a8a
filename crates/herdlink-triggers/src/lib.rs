// SPDX-FileCopyrightText: 2026 Herdlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Document trigger engine and the domain handlers bound to it.
//!
//! Triggers are one-shot reactions to document events: an explicit
//! registration table maps `{collection, event kind}` to handlers, and the
//! engine drives the table from the document event feed. Handler failures
//! are logged and swallowed -- from the feed's perspective a trigger
//! invocation always completes, because a stuck trigger is worse than a
//! dropped notification.

pub mod engine;
pub mod handlers;

pub use engine::{TriggerBinding, TriggerEngine, TriggerHandler};
pub use handlers::register_defaults;
