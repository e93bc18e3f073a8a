// SPDX-FileCopyrightText: 2026 Herdlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `herdlink doctor` command implementation.
//!
//! Runs diagnostic checks against the configured environment to identify
//! configuration issues and unreachable backends before `serve` is started.

use std::io::IsTerminal;
use std::time::{Duration, Instant};

use herdlink_config::model::HerdlinkConfig;
use herdlink_core::types::HealthStatus;
use herdlink_core::{Adapter, HerdlinkError};
use herdlink_fcm::FcmSender;
use herdlink_store::SqliteStore;

/// Status of a diagnostic check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    /// Check passed successfully.
    Pass,
    /// Check passed with a warning.
    Warn,
    /// Check failed.
    Fail,
}

/// Result of a single diagnostic check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// Name of the check.
    pub name: String,
    /// Check status.
    pub status: CheckStatus,
    /// Human-readable message.
    pub message: String,
    /// Duration the check took.
    pub duration: Duration,
}

/// Run the `herdlink doctor` command.
///
/// With `--plain`, disables colored output.
pub async fn run_doctor(config: &HerdlinkConfig, plain: bool) -> Result<(), HerdlinkError> {
    let use_color = !plain && std::io::stdout().is_terminal();

    let results = vec![
        check_config(config),
        check_store(config).await,
        check_sender(config).await,
    ];

    println!();
    println!("  herdlink doctor");
    println!("  {}", "-".repeat(50));

    let mut fail_count = 0;
    let mut warn_count = 0;

    for result in &results {
        let duration_ms = result.duration.as_millis();
        let line = match result.status {
            CheckStatus::Pass => {
                if use_color {
                    use colored::Colorize;
                    format!(
                        "    {} {:<12} {} ({duration_ms}ms)",
                        "ok".green(),
                        result.name,
                        result.message
                    )
                } else {
                    format!(
                        "    [OK]   {:<12} {} ({duration_ms}ms)",
                        result.name, result.message
                    )
                }
            }
            CheckStatus::Warn => {
                warn_count += 1;
                if use_color {
                    use colored::Colorize;
                    format!(
                        "    {} {:<12} {} ({duration_ms}ms)",
                        "!!".yellow(),
                        result.name,
                        result.message.yellow()
                    )
                } else {
                    format!(
                        "    [WARN] {:<12} {} ({duration_ms}ms)",
                        result.name, result.message
                    )
                }
            }
            CheckStatus::Fail => {
                fail_count += 1;
                if use_color {
                    use colored::Colorize;
                    format!(
                        "    {} {:<12} {} ({duration_ms}ms)",
                        "xx".red(),
                        result.name,
                        result.message.red()
                    )
                } else {
                    format!(
                        "    [FAIL] {:<12} {} ({duration_ms}ms)",
                        result.name, result.message
                    )
                }
            }
        };
        println!("{line}");
    }

    println!("  {}", "-".repeat(50));
    println!(
        "  {} checks, {} warnings, {} failures",
        results.len(),
        warn_count,
        fail_count
    );
    println!();

    if fail_count > 0 {
        return Err(HerdlinkError::Internal(format!(
            "{fail_count} doctor check(s) failed"
        )));
    }
    Ok(())
}

/// Configuration is already loaded and validated by the time doctor runs;
/// report what it resolved to.
fn check_config(config: &HerdlinkConfig) -> CheckResult {
    let start = Instant::now();
    CheckResult {
        name: "config".to_string(),
        status: CheckStatus::Pass,
        message: format!(
            "gateway {}:{}, store {}",
            config.gateway.host, config.gateway.port, config.store.database_path
        ),
        duration: start.elapsed(),
    }
}

/// Open the store and run its health check.
async fn check_store(config: &HerdlinkConfig) -> CheckResult {
    let start = Instant::now();
    let store = SqliteStore::new(config.store.clone());
    let outcome = async {
        store.initialize().await?;
        let status = store.health_check().await?;
        store.shutdown().await?;
        Ok::<HealthStatus, HerdlinkError>(status)
    }
    .await;

    let (status, message) = match outcome {
        Ok(HealthStatus::Healthy) => (CheckStatus::Pass, "reachable".to_string()),
        Ok(HealthStatus::Degraded(msg)) => (CheckStatus::Warn, msg),
        Ok(HealthStatus::Unhealthy(msg)) => (CheckStatus::Fail, msg),
        Err(e) => (CheckStatus::Fail, e.to_string()),
    };
    CheckResult {
        name: "store".to_string(),
        status,
        message,
        duration: start.elapsed(),
    }
}

/// Build the sender and run its health check (credential presence).
async fn check_sender(config: &HerdlinkConfig) -> CheckResult {
    let start = Instant::now();
    let outcome = match FcmSender::new(&config.push) {
        Ok(sender) => sender.health_check().await,
        Err(e) => Err(e),
    };

    let (status, message) = match outcome {
        Ok(HealthStatus::Healthy) => (CheckStatus::Pass, "credential configured".to_string()),
        Ok(HealthStatus::Degraded(msg)) => (CheckStatus::Warn, msg),
        // A missing push key keeps the service bootable; flag, don't fail.
        Ok(HealthStatus::Unhealthy(msg)) => (CheckStatus::Warn, msg),
        Err(e) => (CheckStatus::Fail, e.to_string()),
    };
    CheckResult {
        name: "push".to_string(),
        status,
        message,
        duration: start.elapsed(),
    }
}
