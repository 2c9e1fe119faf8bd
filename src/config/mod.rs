//! Configuration module for Wayfarer
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use wayfarer::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Crawler will fetch at most: {}", config.crawler.max_pages);
//! ```

mod parser;
mod types;
mod validation;

pub use types::{Config, CrawlerConfig, OutputConfig, QueryConfig, UserAgentConfig};

pub use parser::load_config;
