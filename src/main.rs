//! Tickersweep main entry point
//!
//! Command-line interface for the ticker catalog ingestion pipeline.

use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};
use tickersweep::config::{load_config_with_hash, Config};
use tickersweep::pipeline::run_sweep;
use tickersweep::scheduler::run_scheduler;
use tickersweep::warehouse::WarehouseSink;
use tracing_subscriber::EnvFilter;

/// Tickersweep: periodic full-catalog ticker ingestion
///
/// Walks the paginated reference-data endpoint, writes the complete
/// catalog as a CSV snapshot, and optionally replicates it into a local
/// warehouse table. Requires POLYGON_API_KEY in the environment.
#[derive(Parser, Debug)]
#[command(name = "tickersweep")]
#[command(version)]
#[command(about = "Paginated ticker catalog ingestion", long_about = None)]
struct Cli {
    /// Path to an optional TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Run the long-lived scheduler instead of a single sweep
    #[arg(long, conflicts_with_all = ["dry_run", "stats"])]
    schedule: bool,

    /// Validate config and show what would be swept without fetching
    #[arg(long, conflicts_with_all = ["schedule", "stats"])]
    dry_run: bool,

    /// Show warehouse statistics and exit
    #[arg(long, conflicts_with_all = ["schedule", "dry_run"])]
    stats: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let (config, config_hash) = match load_config_with_hash(cli.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    match config_hash {
        Some(hash) => tracing::info!("Configuration loaded successfully (hash: {})", hash),
        None => tracing::info!("No config file given, using defaults plus environment"),
    }

    if cli.dry_run {
        handle_dry_run(&config);
    } else if cli.stats {
        handle_stats(&config)?;
    } else if cli.schedule {
        run_scheduler(config).await?;
    } else {
        handle_sweep(&config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("tickersweep=info,warn"),
            1 => EnvFilter::new("tickersweep=debug,info"),
            2 => EnvFilter::new("tickersweep=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what would run
fn handle_dry_run(config: &Config) {
    println!("=== Tickersweep Dry Run ===\n");

    println!("API:");
    println!("  Endpoint: {}", config.api.base_url);
    println!("  Market: {}", config.api.market);
    println!("  Active only: {}", config.api.active_only);
    println!("  Sort: {} ({})", config.api.sort, config.api.order);
    println!("  Page limit: {}", config.api.page_limit);

    println!("\nPacing:");
    println!(
        "  Inter-page delay: {}s",
        config.pacing.inter_page_delay_secs
    );
    println!("  Request timeout: {}s", config.pacing.request_timeout_secs);

    println!("\nOutput:");
    println!("  Snapshot: {}", config.output.csv_path);
    match &config.warehouse {
        Some(warehouse) => {
            println!("  Warehouse: {}", warehouse.database_path);
            println!("  Sink policy: {:?}", warehouse.policy);
        }
        None => println!("  Warehouse: disabled"),
    }

    println!("\nSchedule:");
    println!("  Daily sweep at: {}", config.schedule.daily_at);
    println!("  Heartbeat: every {}s", config.schedule.heartbeat_secs);

    println!("\n✓ Configuration is valid");
}

/// Handles the --stats mode: shows warehouse statistics
fn handle_stats(config: &Config) -> Result<()> {
    let Some(warehouse) = &config.warehouse else {
        println!("Warehouse is not configured; nothing to report.");
        return Ok(());
    };

    println!("Warehouse: {}\n", warehouse.database_path);

    let sink = WarehouseSink::open(Path::new(&warehouse.database_path))?;
    let summary = sink.summary()?;

    println!("Batches loaded: {}", summary.batches);
    println!("Total rows: {}", summary.rows);
    println!(
        "Last load: {}",
        summary.last_loaded_at.as_deref().unwrap_or("never")
    );

    Ok(())
}

/// Handles a single sweep run
async fn handle_sweep(config: &Config) -> Result<()> {
    match run_sweep(config).await {
        Ok(stats) => {
            println!("Batch {} completed", stats.batch_id);
            println!(
                "  {} records across {} pages",
                stats.records, stats.pages
            );
            println!(
                "  Snapshot: {} ({} bytes)",
                config.output.csv_path, stats.snapshot_bytes
            );
            println!("  Warehouse rows: {}", stats.sink.inserted_rows());
            Ok(())
        }
        Err(e) => {
            tracing::error!("Sweep failed: {}", e);
            Err(e.into())
        }
    }
}
