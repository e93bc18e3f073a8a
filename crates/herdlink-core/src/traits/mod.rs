// SPDX-FileCopyrightText: 2026 Herdlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait seams for pluggable backends.

pub mod adapter;
pub mod sender;
pub mod store;

pub use adapter::Adapter;
pub use sender::PushSender;
pub use store::DocumentStore;
