//! Memo Cache - demo runner
//!
//! Builds a cache from environment configuration, starts the background
//! sweep, runs a small memoized workload and reports cache statistics.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use memo_cache::{spawn_cleanup_task, CacheManager, Config};

/// Main entry point for the demo runner.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the cache manager
/// 4. Start background sweep task
/// 5. Run the memoized workload and print statistics
/// 6. Wait for SIGINT/SIGTERM, then stop the sweep
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "memo_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Memo Cache demo");

    let config = Config::from_env();
    info!(
        "Configuration loaded: enabled={}, duration={}s, cleanup_interval={}s",
        config.settings.enabled, config.settings.duration, config.cleanup_interval
    );

    let cache = Arc::new(CacheManager::new(config.settings));
    let cleanup_handle = spawn_cleanup_task(cache.clone(), config.cleanup_interval);
    info!("Background sweep task started");

    run_workload(&cache)?;

    let stats = serde_json::to_string_pretty(&cache.stats()).context("serializing cache stats")?;
    println!("{}", stats);

    info!("Workload finished, press Ctrl+C to exit");
    shutdown_signal(cleanup_handle).await;

    info!("Shutdown complete");
    Ok(())
}

/// Memoizes a deliberately slow computation and shows hits, argument-keyed
/// entries and a bulk clear.
fn run_workload(cache: &CacheManager) -> anyhow::Result<()> {
    for round in 1..=3 {
        let started = Instant::now();
        let report = cache.try_get_or_compute_with(
            "report:2024:q1",
            |year: u16, quarter: u8| slow_report(year, quarter),
            (2024, 1),
            None,
        )?;
        info!("Round {}: '{}' in {:?}", round, report, started.elapsed());
    }

    let keys: Vec<String> = (1..=4).map(|id| format!("user:{}", id)).collect();
    for (id, key) in (1u32..).zip(&keys) {
        cache.try_get_or_compute_with(key, |id: u32| format!("user #{}", id), (id,), Some(60))?;
    }
    cache.remove_many(&keys[..2]);
    info!(
        "Removed two users; user:3 cached = {}",
        cache.has("user:3")
    );

    cache.clear_all();
    info!("After clear: report cached = {}", cache.has("report:2024:q1"));
    Ok(())
}

fn slow_report(year: u16, quarter: u8) -> String {
    std::thread::sleep(Duration::from_millis(200));
    format!("Q{} {} revenue report", quarter, year)
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM), then aborts the sweep task.
async fn shutdown_signal(cleanup_handle: tokio::task::JoinHandle<()>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
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

    cleanup_handle.abort();
    warn!("Sweep task aborted");
}
