// SPDX-FileCopyrightText: 2026 Herdlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the Herdlink notification service.
//!
//! Exposes the direct-invocation surface: role broadcasts, admin-code
//! validation, authenticated token registration, and a liveness endpoint.
//! All POST routes answer OPTIONS pre-flights with an empty 204 and carry
//! permissive CORS headers.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod server;

pub use error::ApiError;
pub use server::{build_router, start_server, GatewayState};
