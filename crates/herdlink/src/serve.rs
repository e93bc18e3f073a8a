// SPDX-FileCopyrightText: 2026 Herdlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `herdlink serve` command implementation.
//!
//! Wires the SQLite store (wrapped in the event-emitting store), the FCM
//! sender, the resolver/dispatcher pair, the trigger engine, and the HTTP
//! gateway, then serves until SIGINT/SIGTERM.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::mpsc;
use tracing::{debug, info};

use herdlink_config::model::HerdlinkConfig;
use herdlink_core::{Adapter, DocumentStore, HerdlinkError, PushSender};
use herdlink_fcm::FcmSender;
use herdlink_gateway::server::ServerConfig;
use herdlink_gateway::GatewayState;
use herdlink_notify::{NotificationDispatcher, RecipientResolver};
use herdlink_store::{EventingStore, SqliteStore};
use herdlink_triggers::{register_defaults, TriggerEngine};

/// Runs the `herdlink serve` command.
pub async fn run_serve(config: HerdlinkConfig) -> Result<(), HerdlinkError> {
    init_tracing(&config.service.log_level);

    info!(name = %config.service.name, "starting herdlink serve");

    // Document store, wrapped so writes feed the trigger engine.
    let sqlite = SqliteStore::new(config.store.clone());
    sqlite.initialize().await?;
    let (event_tx, event_rx) = mpsc::channel(config.triggers.queue_capacity);
    let store: Arc<dyn DocumentStore> = Arc::new(EventingStore::new(sqlite, event_tx));

    // Push sender.
    let sender: Arc<dyn PushSender> = Arc::new(FcmSender::new(&config.push)?);
    if config.push.server_key.is_none() {
        info!("push server key not configured -- deliveries will fail until one is set");
    }

    let resolver = Arc::new(RecipientResolver::new(store.clone()));
    let dispatcher = Arc::new(NotificationDispatcher::new(sender.clone()));

    // Trigger engine on the document event feed.
    let engine_task = if config.triggers.enabled {
        let mut engine = TriggerEngine::new();
        register_defaults(&mut engine, resolver.clone(), dispatcher.clone());
        info!(bindings = engine.len(), "trigger engine initialized");
        Some(tokio::spawn(engine.run(event_rx)))
    } else {
        info!("document triggers disabled by configuration");
        drop(event_rx);
        None
    };

    // HTTP gateway.
    if config.gateway.admin_code.is_none() {
        info!("gateway admin code not configured -- /validate-admin-code always answers invalid");
    }
    let state = GatewayState {
        resolver,
        dispatcher,
        store: store.clone(),
        admin_code: config.gateway.admin_code.clone(),
        start_time: Instant::now(),
    };
    let server_config = ServerConfig {
        host: config.gateway.host.clone(),
        port: config.gateway.port,
    };
    herdlink_gateway::start_server(&server_config, state, shutdown_signal()).await?;

    // The gateway has stopped; stop the trigger engine and flush the store.
    // Events still in flight are dropped -- delivery is best-effort.
    if let Some(task) = engine_task {
        task.abort();
        debug!("trigger engine stopped");
    }
    store.shutdown().await?;
    sender.shutdown().await?;
    info!("herdlink serve stopped");
    Ok(())
}

/// Initialize the tracing subscriber from the configured log level.
///
/// `RUST_LOG` overrides the config value when set.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("herdlink={log_level}")));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Resolve on SIGINT or, on unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}
