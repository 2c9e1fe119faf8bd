//! One unit of work: fetch a popped frontier entry, admit or reject its
//! children, and hand back whatever should be pushed back onto the
//! frontier.

use std::sync::Arc;

use tracing::trace;
use url::Url;

use crate::crawler::fetcher::fetch_url;
use crate::crawler::parser::extract_links;
use crate::frontier::FrontierEntry;
use crate::logger::Logger;
use crate::priority::compute_priority;
use crate::robots::RobotsCache;
use crate::state::SharedState;
use crate::url::{clean, host, is_admissible, registered_domain};

/// A frontier entry ready to be pushed: `(url, depth, score)`.
pub type NewEntry = (String, u32, f64);

pub struct WorkerContext {
    pub client: reqwest::Client,
    pub robots: Arc<RobotsCache>,
    pub state: Arc<SharedState>,
    pub logger: Arc<Logger>,
    pub user_agent: String,
    pub max_timeouts: u32,
    pub debug: bool,
}

/// Processes one popped frontier entry end to end, per the worker contract.
pub async fn process(ctx: &WorkerContext, entry: FrontierEntry) -> crate::Result<Vec<NewEntry>> {
    if ctx.state.should_exit() {
        return Ok(Vec::new());
    }

    let (raw_final_url, html, meta) = fetch_url(&ctx.client, &entry.url).await;

    let final_url = match clean(&raw_final_url) {
        Ok(cleaned) => cleaned,
        Err(_) => raw_final_url,
    };

    if !ctx
        .robots
        .is_allowed(&ctx.client, &final_url, &ctx.user_agent)
        .await
    {
        ctx.state.add_disallowed(&final_url);
        return Ok(Vec::new());
    }

    if !ctx.state.mark_visited(&final_url) {
        return Ok(Vec::new());
    }

    let final_host = host(&final_url).unwrap_or_default();

    if meta.status_code == 0 && meta.content_length == 0 {
        ctx.state.record_timeout(&final_host);
    }

    ctx.logger.log_url(
        &final_url,
        meta.timestamp,
        meta.content_length,
        entry.depth,
        meta.status_code,
        entry.score,
    )?;

    ctx.state.record_status(meta.status_code, meta.content_length);

    let Some(html) = html.filter(|h| !h.is_empty()) else {
        return Ok(Vec::new());
    };
    if meta.status_code != 200 {
        return Ok(Vec::new());
    }

    let final_registered_domain = registered_domain(&final_url).unwrap_or_default();
    ctx.state.record_success(&final_host, &final_registered_domain);

    let Ok(base_url) = Url::parse(&final_url) else {
        return Ok(Vec::new());
    };

    let mut new_entries = Vec::new();
    for raw_link in extract_links(&html, &base_url) {
        if let Some(entry) = admit_link(ctx, &raw_link, entry.depth + 1).await {
            new_entries.push(entry);
        }
    }

    Ok(new_entries)
}

async fn admit_link(ctx: &WorkerContext, raw_link: &str, depth: u32) -> Option<NewEntry> {
    let link = clean(raw_link).ok()?;

    if !is_admissible(&link) {
        if ctx.debug {
            ctx.state.skip_invalid();
        }
        return None;
    }

    if ctx.state.is_scheduled(&link) || ctx.state.is_visited(&link) {
        if ctx.debug {
            ctx.state.skip_dupe();
        }
        return None;
    }

    if ctx.state.is_disallowed(&link) {
        if ctx.debug {
            ctx.state.skip_robots();
        }
        return None;
    }

    let link_host = host(&link)?;

    if ctx.state.timeout_count(&link_host) >= ctx.max_timeouts {
        if ctx.debug {
            ctx.state.skip_timeout();
        }
        return None;
    }

    if !ctx.robots.is_allowed(&ctx.client, &link, &ctx.user_agent).await {
        ctx.state.add_disallowed(&link);
        if ctx.debug {
            ctx.state.skip_robots();
        }
        return None;
    }

    let link_registered_domain = registered_domain(&link)?;
    let superdomain_size = ctx
        .state
        .insert_superdomain_and_size(&link_registered_domain, &link_host);
    let domain_crawl_count = ctx.state.domain_crawl_count(&link_host);
    let priority = compute_priority(domain_crawl_count, superdomain_size as u64);

    if !ctx.state.try_schedule(&link) {
        trace!(%link, "lost race to schedule link, dropping");
        return None;
    }

    Some((link, depth, priority))
}
