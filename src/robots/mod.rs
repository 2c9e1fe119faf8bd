//! Robots.txt handling module
//!
//! Fetches, parses, and caches robots.txt files, failing open on any
//! error so a denial always reflects an actual `Disallow` rule.

mod fetch;
mod parser;

pub use fetch::RobotsCache;
pub use parser::ParsedRobots;
