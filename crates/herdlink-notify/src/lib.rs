// SPDX-FileCopyrightText: 2026 Herdlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Recipient resolution and notification dispatch.
//!
//! [`RecipientResolver`] translates a role or user id into deliverable
//! tokens; [`NotificationDispatcher`] hands a composed envelope to the push
//! sender and reports the outcome. Both take their collaborators through
//! constructor injection -- there are no global handles.

pub mod dispatcher;
pub mod envelope;
pub mod resolver;

pub use dispatcher::NotificationDispatcher;
pub use resolver::RecipientResolver;
