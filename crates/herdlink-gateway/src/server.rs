// SPDX-FileCopyrightText: 2026 Herdlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, permissive CORS, and shared state for the handlers.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use herdlink_core::{DocumentStore, HerdlinkError};
use herdlink_notify::{NotificationDispatcher, RecipientResolver};

use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// Recipient resolver for the broadcast endpoints.
    pub resolver: Arc<RecipientResolver>,
    /// Notification dispatcher.
    pub dispatcher: Arc<NotificationDispatcher>,
    /// Store handle for identity lookup and token registration.
    pub store: Arc<dyn DocumentStore>,
    /// The one value accepted by /validate-admin-code (None disables it).
    pub admin_code: Option<String>,
    /// Process start time for uptime reporting.
    pub start_time: Instant,
}

/// Gateway server configuration (mirrors GatewayConfig from herdlink-config).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

/// Build the gateway router.
///
/// Every POST route answers a bare OPTIONS with an empty 204; pre-flights
/// carrying CORS request headers are answered by the permissive CORS layer.
pub fn build_router(state: GatewayState) -> Router {
    Router::new()
        .route(
            "/notify-farmers-new-alert",
            post(handlers::notify_farmers_new_alert).options(handlers::preflight),
        )
        .route(
            "/notify-vets-new-request",
            post(handlers::notify_vets_new_request).options(handlers::preflight),
        )
        .route(
            "/notify-farmer-treatment",
            post(handlers::notify_farmer_treatment).options(handlers::preflight),
        )
        .route(
            "/validate-admin-code",
            post(handlers::validate_admin_code).options(handlers::preflight),
        )
        .route(
            "/store-user-token",
            post(handlers::store_user_token).options(handlers::preflight),
        )
        .route("/health", get(handlers::get_health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the gateway HTTP server and serve until the shutdown future
/// resolves.
pub async fn start_server(
    config: &ServerConfig,
    state: GatewayState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), HerdlinkError> {
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| HerdlinkError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;

    tracing::info!("gateway listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| HerdlinkError::Internal(format!("gateway server error: {e}")))?;

    Ok(())
}
