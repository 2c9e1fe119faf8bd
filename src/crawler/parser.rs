//! Link extraction.
//!
//! Turns a page's HTML body into a list of absolute URLs resolved
//! against the page's final URL. Malformed HTML never causes a panic
//! or error — `scraper`/`html5ever` tolerate arbitrary byte soup by
//! design — and any single href that fails to resolve is skipped.

use scraper::{Html, Selector};
use tracing::trace;
use url::Url;

/// Extracts every followable link from `html`, resolved against `base_url`.
pub fn extract_links(html: &str, base_url: &Url) -> Vec<String> {
    let document = Html::parse_document(html);
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_link(href, base_url))
        .collect()
}

fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let trimmed = href.trim();

    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }

    let lower = trimmed.to_lowercase();
    if lower.starts_with("javascript:")
        || lower.starts_with("mailto:")
        || lower.starts_with("tel:")
        || lower.starts_with("data:")
    {
        return None;
    }

    match base_url.join(trimmed) {
        Ok(resolved) if resolved.scheme() == "http" || resolved.scheme() == "https" => {
            Some(resolved.to_string())
        }
        Ok(_) => None,
        Err(err) => {
            trace!(%href, error = %err, "failed to resolve link");
            None
        }
    }
}
