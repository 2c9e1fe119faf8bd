//! Wayfarer: a focused, polite web crawler
//!
//! Given a seed query, discovers starting URLs, then performs a bounded,
//! priority-driven traversal of the reachable web graph under a fixed
//! worker pool, recording per-fetch metadata and aggregate statistics.

pub mod config;
pub mod crawler;
pub mod frontier;
pub mod logger;
pub mod priority;
pub mod robots;
pub mod seed;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Wayfarer operations
#[derive(Debug, Error)]
pub enum WayfarerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("HTML parse error for {url}: {message}")]
    HtmlParse { url: String, message: String },

    #[error("URL disallowed by robots.txt: {url}")]
    RobotsDenied { url: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Robots.txt error: {0}")]
    Robots(String),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

/// Result type alias for Wayfarer operations
pub type Result<T> = std::result::Result<T, WayfarerError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use state::SharedState;
pub use url::{clean, host, is_valid, registered_domain};
