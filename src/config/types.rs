use serde::Deserialize;

/// Top-level configuration for a Wayfarer run
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub query: QueryConfig,
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
}

/// Seed discovery configuration
#[derive(Debug, Clone, Deserialize)]
pub struct QueryConfig {
    /// The seed query text handed to the seed adapter
    pub text: String,

    /// How many seed URLs to request from the seed adapter
    #[serde(rename = "max-seed-results", default = "default_max_seed_results")]
    pub max_seed_results: u32,
}

fn default_max_seed_results() -> u32 {
    10
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Hard cap on the number of pages fetched in this run
    #[serde(rename = "max-pages")]
    pub max_pages: u64,

    /// Wall-clock budget for the run, in seconds
    #[serde(rename = "max-time-secs")]
    pub max_time_secs: u64,

    /// Per-host transport-failure cap; a host is excluded once it is reached
    #[serde(rename = "max-timeouts")]
    pub max_timeouts: u32,

    /// Size of the worker pool
    #[serde(rename = "num-threads")]
    pub num_threads: usize,

    /// Verbose skip-counting and per-skip trace logging
    #[serde(default)]
    pub debug: bool,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

impl UserAgentConfig {
    /// Builds the `User-Agent` header value sent with every request.
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{}; {})",
            self.crawler_name, self.crawler_version, self.contact_url, self.contact_email
        )
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the tab-separated log file written during the run
    #[serde(rename = "log-path")]
    pub log_path: String,
}
