//! Wayfarer main entry point
//!
//! Command-line interface for the Wayfarer web crawler.

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use wayfarer::config::load_config;
use wayfarer::crawler::crawl;

/// Wayfarer: a focused, polite web crawler
///
/// Given a seed query, discovers starting URLs and performs a bounded,
/// priority-driven traversal of the reachable web graph, recording a
/// per-fetch log and an end-of-run summary.
#[derive(Parser, Debug)]
#[command(name = "wayfarer")]
#[command(version = "0.1.0")]
#[command(about = "A focused, polite web crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    match crawl(config).await {
        Ok(()) => {
            tracing::info!("Crawl completed successfully");
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("wayfarer=info,warn"),
            1 => EnvFilter::new("wayfarer=debug,info"),
            2 => EnvFilter::new("wayfarer=trace,debug"),
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

/// Handles `--dry-run`: validates config and shows what would be crawled.
fn handle_dry_run(config: &wayfarer::config::Config) {
    println!("=== Wayfarer Dry Run ===\n");

    println!("Query: {}", config.query.text);
    println!("Max seed results: {}", config.query.max_seed_results);

    println!("\nCrawler Configuration:");
    println!("  Max pages: {}", config.crawler.max_pages);
    println!("  Max time: {}s", config.crawler.max_time_secs);
    println!("  Max timeouts per host: {}", config.crawler.max_timeouts);
    println!("  Worker threads: {}", config.crawler.num_threads);
    println!("  Debug: {}", config.crawler.debug);

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.crawler_name);
    println!("  Version: {}", config.user_agent.crawler_version);
    println!("  Contact URL: {}", config.user_agent.contact_url);
    println!("  Contact Email: {}", config.user_agent.contact_email);

    println!("\nOutput:");
    println!("  Log file: {}", config.output.log_path);

    println!("\nConfiguration is valid.");
}
