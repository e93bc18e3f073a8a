// SPDX-FileCopyrightText: 2026 Herdlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Herdlink integration tests.
//!
//! Provides an in-memory [`MemoryStore`], a scriptable [`MockSender`], and
//! document fixtures, enabling fast, CI-runnable tests without SQLite files
//! or external push endpoints.

pub mod fixtures;
pub mod memory_store;
pub mod mock_sender;

pub use memory_store::MemoryStore;
pub use mock_sender::{MockSender, SentBatch};
