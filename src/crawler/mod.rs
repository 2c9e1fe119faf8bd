//! Crawler module: orchestrates a complete run from config to summary.
//!
//! - HTTP fetching (`fetcher`)
//! - Link extraction (`parser`)
//! - Per-item processing (`worker`)
//! - Worker-pool lifecycle and termination (`scheduler`)

mod fetcher;
mod parser;
mod scheduler;
mod worker;

pub use fetcher::{build_http_client, fetch_url, FetchMeta};
pub use parser::extract_links;
pub use scheduler::Scheduler;
pub use worker::{process, WorkerContext};

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::config::Config;
use crate::logger::Logger;
use crate::robots::RobotsCache;
use crate::state::SharedState;
use crate::Result;

/// Runs a complete crawl: discovers seeds, runs the worker pool to
/// termination, then writes the summary block.
pub async fn crawl(config: Config) -> Result<()> {
    info!(
        query = %config.query.text,
        max_pages = config.crawler.max_pages,
        num_threads = config.crawler.num_threads,
        "starting crawl"
    );

    let client = build_http_client(&config.user_agent)?;
    let logger = Arc::new(Logger::open(Path::new(&config.output.log_path))?);
    let state = Arc::new(SharedState::new());
    let robots = Arc::new(RobotsCache::new());
    let user_agent = config.user_agent.header_value();

    let seeds = crate::seed::query(
        &client,
        &config.query.text,
        config.query.max_seed_results as usize,
    )
    .await;
    info!(seed_count = seeds.len(), "seed discovery complete");

    let ctx = Arc::new(WorkerContext {
        client,
        robots,
        state: state.clone(),
        logger: logger.clone(),
        user_agent,
        max_timeouts: config.crawler.max_timeouts,
        debug: config.crawler.debug,
    });

    let mut scheduler = Scheduler::new(
        ctx,
        config.crawler.num_threads,
        config.crawler.max_pages,
        Duration::from_secs(config.crawler.max_time_secs),
    );

    let start = std::time::Instant::now();
    scheduler.seed(seeds).await;
    scheduler.run().await?;

    let summary = state.summary();
    logger.write_summary(&summary, start.elapsed().as_secs_f64(), config.crawler.debug)?;

    info!(
        total_pages = summary.total_pages,
        total_bytes = summary.total_bytes,
        "crawl complete"
    );

    Ok(())
}
