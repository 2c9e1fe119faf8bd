//! HTTP fetcher implementation
//!
//! Builds the run's single `reqwest::Client` and performs one GET per
//! URL with a flat timeout budget, classifying the outcome into the
//! page-fetcher contract: `(final_url, html?, meta)`.

use std::time::Duration;

use chrono::Utc;
use reqwest::redirect::Policy;
use reqwest::Client;

use crate::config::UserAgentConfig;

const FETCH_TIMEOUT: Duration = Duration::from_secs(5);
const MAX_REDIRECTS: usize = 10;

/// Metadata recorded for every fetch attempt, successful or not.
#[derive(Debug, Clone)]
pub struct FetchMeta {
    pub status_code: u16,
    pub content_length: u64,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub final_url: String,
}

/// Builds the one HTTP client used for the whole run.
pub fn build_http_client(user_agent: &UserAgentConfig) -> reqwest::Result<Client> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .redirect(Policy::limited(MAX_REDIRECTS))
        .timeout(FETCH_TIMEOUT)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches `url`, following redirects, and classifies the result.
///
/// Transport failures (DNS, connect, read timeout) are reported
/// in-band with `status_code = 0` rather than as a `Result::Err` —
/// nothing here escalates to a caller-visible error, matching the
/// fetcher's "never throw" contract.
pub async fn fetch_url(client: &Client, url: &str) -> (String, Option<String>, FetchMeta) {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(_) => {
            return (
                url.to_string(),
                None,
                FetchMeta {
                    status_code: 0,
                    content_length: 0,
                    timestamp: Utc::now(),
                    final_url: url.to_string(),
                },
            );
        }
    };

    let final_url = response.url().to_string();
    let status_code = response.status().as_u16();

    let is_html = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|content_type| content_type.contains("text/html"))
        .unwrap_or(false);

    if !is_html {
        return (
            final_url.clone(),
            None,
            FetchMeta {
                status_code,
                content_length: 0,
                timestamp: Utc::now(),
                final_url,
            },
        );
    }

    match response.text().await {
        Ok(body) => {
            let content_length = body.len() as u64;
            let meta = FetchMeta {
                status_code,
                content_length,
                timestamp: Utc::now(),
                final_url: final_url.clone(),
            };
            (final_url, Some(body), meta)
        }
        Err(_) => (
            final_url.clone(),
            None,
            FetchMeta {
                status_code: 0,
                content_length: 0,
                timestamp: Utc::now(),
                final_url,
            },
        ),
    }
}
