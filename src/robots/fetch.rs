//! Per-origin robots.txt fetching with an at-most-one-fetch guarantee.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::OnceCell;
use tracing::{debug, warn};
use url::Url;

use crate::robots::parser::ParsedRobots;

const ROBOTS_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Caches one parsed robots.txt ruleset per origin (scheme://authority),
/// guaranteeing that concurrent callers for the same origin share a
/// single in-flight fetch instead of each issuing their own request.
#[derive(Debug, Default)]
pub struct RobotsCache {
    entries: Mutex<HashMap<String, Arc<OnceCell<ParsedRobots>>>>,
}

impl RobotsCache {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns whether `url` is allowed, fetching and caching the
    /// origin's robots.txt on first reference. `user_agent` identifies
    /// the crawler to the origin on the wire (the robots.txt GET and
    /// any subsequent page fetch); the ruleset itself is evaluated
    /// against the wildcard agent `"*"`, per §4.2's
    /// `ruleset.can_fetch("*", url)` contract. Fails open: any network
    /// or parse error is treated as "allow everything".
    pub async fn is_allowed(&self, client: &reqwest::Client, url: &str, user_agent: &str) -> bool {
        let Ok(parsed) = Url::parse(url) else {
            return true;
        };
        let Some(origin) = origin_of(&parsed) else {
            return true;
        };

        let cell = {
            let mut entries = self.entries.lock();
            entries
                .entry(origin.clone())
                .or_insert_with(|| Arc::new(OnceCell::new()))
                .clone()
        };

        let robots = cell
            .get_or_init(|| fetch_one(client, &origin, user_agent))
            .await;

        robots.is_allowed(parsed.path(), "*")
    }
}

async fn fetch_one(client: &reqwest::Client, origin: &str, user_agent: &str) -> ParsedRobots {
    let robots_url = format!("{origin}/robots.txt");

    let response = match client
        .get(&robots_url)
        .header(reqwest::header::USER_AGENT, user_agent)
        .timeout(ROBOTS_FETCH_TIMEOUT)
        .send()
        .await
    {
        Ok(response) => response,
        Err(err) => {
            debug!(%robots_url, error = %err, "robots.txt fetch failed, failing open");
            return ParsedRobots::allow_all();
        }
    };

    if !response.status().is_success() {
        debug!(%robots_url, status = %response.status(), "robots.txt non-success status, failing open");
        return ParsedRobots::allow_all();
    }

    match response.text().await {
        Ok(content) => ParsedRobots::from_content(&content),
        Err(err) => {
            warn!(%robots_url, error = %err, "robots.txt body read failed, failing open");
            ParsedRobots::allow_all()
        }
    }
}

fn origin_of(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    match url.port() {
        Some(port) => Some(format!("{}://{}:{}", url.scheme(), host, port)),
        None => Some(format!("{}://{}", url.scheme(), host)),
    }
}
