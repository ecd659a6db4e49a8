//! Chartrake main entry point
//!
//! This is the command-line interface for the chartrake daily-chart
//! harvester.

use chartrake::config::load_config_with_hash;
use chartrake::crawler::Coordinator;
use chartrake::output::{print_report, read_dataset, write_dataset};
use chartrake::records::merge;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::atomic::Ordering;
use tracing_subscriber::EnvFilter;

/// Chartrake: a polite daily-chart harvester
///
/// Chartrake crawls a site breadth-first under strict page and depth
/// budgets, extracts daily result tables from arbitrarily formatted pages,
/// and reconciles datasets from multiple runs into one date-keyed CSV.
#[derive(Parser, Debug)]
#[command(name = "chartrake")]
#[command(version = "1.0.0")]
#[command(about = "A polite daily-chart harvester", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl the configured site and write the extracted dataset as CSV
    Crawl {
        /// Path to TOML configuration file
        #[arg(value_name = "CONFIG")]
        config: PathBuf,

        /// Validate config and show what would be crawled without crawling
        #[arg(long)]
        dry_run: bool,
    },

    /// Merge two dataset CSVs, the first taking priority on conflicts
    Merge {
        /// Primary dataset (its observed values win)
        #[arg(value_name = "PRIMARY")]
        primary: PathBuf,

        /// Secondary dataset (fills the primary's gaps)
        #[arg(value_name = "SECONDARY")]
        secondary: PathBuf,

        /// Output path for the merged CSV
        #[arg(short, long, value_name = "OUT")]
        output: PathBuf,

        /// Name of the date key column both files must carry
        #[arg(long, default_value = "date")]
        key: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    match cli.command {
        Command::Crawl { config, dry_run } => {
            tracing::info!("Loading configuration from: {}", config.display());
            let (config, _config_hash) = match load_config_with_hash(&config) {
                Ok((cfg, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    (cfg, hash)
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            };

            if dry_run {
                handle_dry_run(&config)?;
            } else {
                handle_crawl(config).await?;
            }
        }
        Command::Merge {
            primary,
            secondary,
            output,
            key,
        } => {
            handle_merge(&primary, &secondary, &output, &key)?;
        }
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
            0 => EnvFilter::new("chartrake=info,warn"),
            1 => EnvFilter::new("chartrake=debug,info"),
            2 => EnvFilter::new("chartrake=trace,debug"),
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
fn handle_dry_run(config: &chartrake::Config) -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Chartrake Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Max pages: {}", config.crawler.max_pages);
    println!("  Max depth: {}", config.crawler.max_depth);
    println!("  Request delay: {}ms", config.crawler.request_delay_ms);
    println!("  Max retries: {}", config.crawler.max_retries);
    println!("  Request timeout: {}s", config.crawler.timeout_secs);

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.crawler_name);
    println!("  Version: {}", config.user_agent.crawler_version);
    println!("  Contact URL: {}", config.user_agent.contact_url);
    println!("  Contact Email: {}", config.user_agent.contact_email);

    println!("\nAccepted Years: {}-{}", config.dates.min_year, config.dates.max_year);

    println!("\nOutput:");
    println!("  CSV: {}", config.output.csv_path);

    println!("\nFields ({}):", config.fields.len());
    for field in &config.fields {
        println!("  - {} (aliases: {})", field.name, field.aliases.join(", "));
    }

    println!("\nSeed URLs ({}):", config.seed.len());
    for entry in &config.seed {
        println!("  - {}", entry.url);
    }

    println!("\n✓ Configuration is valid");
    println!("✓ Would crawl up to {} pages", config.crawler.max_pages);

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: chartrake::Config) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        "Starting crawl: {} seeds, budget {} pages, depth {}",
        config.seed.len(),
        config.crawler.max_pages,
        config.crawler.max_depth
    );

    let csv_path = PathBuf::from(&config.output.csv_path);

    let mut coordinator = Coordinator::new(config)?;

    // Ctrl-C requests a stop between pages; accumulated records still land
    let stop = coordinator.stop_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupt received, stopping after the current page");
            stop.store(true, Ordering::Relaxed);
        }
    });

    match coordinator.run().await {
        Ok(outcome) => {
            write_dataset(&outcome.dataset, &csv_path)?;
            print_report(&outcome.report);
            println!("\n✓ Dataset written to: {}", csv_path.display());
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}

/// Handles the merge operation between two dataset CSVs
fn handle_merge(
    primary: &Path,
    secondary: &Path,
    output: &Path,
    key: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Merging Datasets ===\n");
    println!("Primary:   {}", primary.display());
    println!("Secondary: {}", secondary.display());
    println!("Key:       {}", key);

    let primary_ds = read_dataset(primary, key)?;
    let secondary_ds = read_dataset(secondary, key)?;

    tracing::info!(
        "Merging {} + {} days of data",
        primary_ds.len(),
        secondary_ds.len()
    );

    let merged = merge(&primary_ds, &secondary_ds);
    write_dataset(&merged, output)?;

    println!("\n✓ Merged {} days to: {}", merged.len(), output.display());
    if merged.quarantine_len() > 0 {
        println!(
            "  ({} records kept aside with unresolved dates)",
            merged.quarantine_len()
        );
    }

    Ok(())
}
