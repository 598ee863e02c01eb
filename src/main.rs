//! Pokecache shell
//!
//! Line-oriented shell for poking at a live cache: reads commands from stdin
//! and runs them against a cache built from environment configuration.
//!
//! # Commands
//! - `add <key> <value>` - store a value
//! - `get <key>` - look a value up
//! - `stats` - print cache statistics as JSON
//! - `quit` - exit

use std::io::BufRead;

use anyhow::Context;
use tokio::signal;
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pokecache::{Cache, Config};

/// Main entry point for the cache shell.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the cache, which starts its reclamation task
/// 4. Run commands from stdin until `quit`, EOF or Ctrl+C
/// 5. Shut the cache down
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pokecache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting pokecache shell");

    let config = Config::from_env();
    info!(
        "Configuration loaded: interval={}s, read_policy={:?}",
        config.interval_secs, config.read_policy
    );

    let cache = Cache::with_config(config.cache_config()).context("failed to create cache")?;
    info!("Cache initialized");

    let lines = spawn_stdin_reader().context("failed to start stdin reader")?;

    let outcome = tokio::select! {
        result = run_shell(&cache, lines) => result,
        _ = shutdown_signal() => Ok(()),
    };

    cache.shutdown().await;
    info!("Shutdown complete");
    outcome
}

/// Reads stdin on a dedicated thread and forwards each line.
///
/// A blocking read cannot be cancelled, so it stays off the runtime's
/// blocking pool; the thread is left behind when the process exits.
fn spawn_stdin_reader() -> std::io::Result<mpsc::Receiver<String>> {
    let (tx, rx) = mpsc::channel(16);

    std::thread::Builder::new()
        .name("stdin-reader".to_string())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                match line {
                    Ok(line) => {
                        if tx.blocking_send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        warn!("Failed to read stdin: {}", e);
                        break;
                    }
                }
            }
        })?;

    Ok(rx)
}

/// Runs commands until `quit` or until the line source closes.
async fn run_shell(cache: &Cache, mut lines: mpsc::Receiver<String>) -> anyhow::Result<()> {
    while let Some(line) = lines.recv().await {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };

        match (command.to_lowercase().as_str(), words.next(), words.next()) {
            ("add", Some(key), Some(value)) => {
                cache.add(key, value);
                println!("stored {}", key);
            }
            ("get", Some(key), None) => match cache.get(key) {
                Some(value) => println!("{}", String::from_utf8_lossy(&value)),
                None => println!("(miss)"),
            },
            ("stats", None, None) => {
                let stats = serde_json::to_string_pretty(&cache.stats())?;
                println!("{}", stats);
            }
            ("quit", None, None) => break,
            _ => warn!("Unrecognized command: {}", line.trim()),
        }
    }

    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
