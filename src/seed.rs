//! Seed discovery: turns a query string into a list of starting URLs.
//!
//! The core crawl engine treats this as an opaque external collaborator
//! (`query(text, max_results) -> urls`); this module ships one concrete
//! implementation backed by DuckDuckGo's HTML-only search endpoint so
//! the crate is runnable end to end without a separate search API key.

use scraper::{Html, Selector};
use tracing::{debug, warn};

const SEARCH_ENDPOINT: &str = "https://html.duckduckgo.com/html/";

/// Discovers up to `max_results` seed URLs for `query_text`.
///
/// Never returns an error: a failed request or an unparseable response
/// yields an empty vector, since a seed-query failure should not abort
/// the run (see the error handling design).
pub async fn query(client: &reqwest::Client, query_text: &str, max_results: usize) -> Vec<String> {
    let response = match client
        .post(SEARCH_ENDPOINT)
        .form(&[("q", query_text)])
        .send()
        .await
    {
        Ok(response) => response,
        Err(err) => {
            warn!(error = %err, "seed query request failed");
            return Vec::new();
        }
    };

    let body = match response.text().await {
        Ok(body) => body,
        Err(err) => {
            warn!(error = %err, "seed query response body read failed");
            return Vec::new();
        }
    };

    extract_result_urls(&body, max_results)
}

fn extract_result_urls(html: &str, max_results: usize) -> Vec<String> {
    let document = Html::parse_document(html);
    let Ok(selector) = Selector::parse("a.result__a") else {
        return Vec::new();
    };

    let mut results = Vec::new();
    for element in document.select(&selector) {
        if results.len() >= max_results {
            break;
        }

        let Some(href) = element.value().attr("href") else {
            continue;
        };

        if href.contains("duckduckgo.com/y.js") {
            debug!(%href, "skipping ad redirect in seed results");
            continue;
        }

        if href.starts_with("http://") || href.starts_with("https://") {
            results.push(href.to_string());
        }
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_result_urls_filters_ads() {
        let html = r#"
            <div class="results">
                <a class="result__a" href="https://example.com/page">Example</a>
                <a class="result__a" href="//duckduckgo.com/y.js?ad=1">Ad</a>
                <a class="result__a" href="https://other.com/page">Other</a>
            </div>
        "#;

        let results = extract_result_urls(html, 10);
        assert_eq!(results, vec!["https://example.com/page", "https://other.com/page"]);
    }

    #[test]
    fn test_extract_result_urls_respects_max_results() {
        let html = r#"
            <a class="result__a" href="https://a.com/1">a</a>
            <a class="result__a" href="https://b.com/1">b</a>
            <a class="result__a" href="https://c.com/1">c</a>
        "#;

        let results = extract_result_urls(html, 2);
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_extract_result_urls_empty_on_no_matches() {
        let html = "<html><body>no results here</body></html>";
        assert!(extract_result_urls(html, 10).is_empty());
    }
}
