// SPDX-FileCopyrightText: 2026 Herdlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! FCM push sender adapter.
//!
//! Speaks the FCM legacy HTTP API: one POST per send, per-token outcomes
//! read positionally from the downstream `results` array. The downstream
//! response is the source of truth for success/failure accounting.

pub mod sender;
pub mod types;

pub use sender::FcmSender;
