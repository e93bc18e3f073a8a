// SPDX-FileCopyrightText: 2026 Herdlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Herdlink - push notification fan-out for livestock operations.
//!
//! This is the binary entry point for the Herdlink service.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use clap::{Parser, Subcommand};

mod doctor;
mod serve;

/// Herdlink - push notification fan-out for livestock operations.
#[derive(Parser, Debug)]
#[command(name = "herdlink", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the Herdlink service.
    Serve,
    /// Run diagnostic checks against the configured environment.
    Doctor {
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup.
    let config = match herdlink_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            herdlink_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::Serve) => {
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("herdlink serve failed: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Doctor { plain }) => {
            if let Err(e) = doctor::run_doctor(&config, plain).await {
                eprintln!("herdlink doctor failed: {e}");
                std::process::exit(1);
            }
        }
        None => {
            println!("herdlink: use --help for available commands");
        }
    }
}

#[cfg(test)]
mod tests {
    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_active() {
        // Verify jemalloc is the global allocator by advancing the epoch.
        // Only jemalloc supports this -- the system allocator would fail.
        use tikv_jemalloc_ctl::{epoch, stats};
        epoch::advance().unwrap();
        let allocated = stats::allocated::read().unwrap();
        assert!(allocated > 0, "jemalloc should report non-zero allocation");
    }

    #[test]
    fn binary_loads_config_defaults() {
        // Verify config loads with defaults (no config file needed).
        let config = herdlink_config::load_and_validate_str("")
            .expect("default config should be valid");
        assert_eq!(config.service.name, "herdlink");
    }
}
