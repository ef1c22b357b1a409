//! Blocking HTTP fetcher. Maps responses onto [FetchOutcome] so callers never see a hard failure.

use crate::scraper::error::ScraperError;
use crate::scraper::{Fetch, FetchOutcome};
use reqwest::StatusCode;
use std::time::Duration;

const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (compatible; mangacheck/0.1; +https://github.com/mangacheck)";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const MAX_REDIRECTS: usize = 10;

/// Blocking HTTP client used to fetch chapter-listing pages.
#[derive(Debug)]
pub struct HttpFetcher {
    inner: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn builder() -> HttpFetcherBuilder {
        HttpFetcherBuilder::default()
    }

    fn get_text(&self, url: &str) -> Result<Option<String>, ScraperError> {
        let response = self
            .inner
            .get(url)
            .send()
            .map_err(|e| ScraperError::Network {
                url: url.to_string(),
                source: e,
            })?;
        let status = response.status();
        if is_not_found(status) {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(ScraperError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        response
            .text()
            .map(Some)
            .map_err(|e| ScraperError::BodyRead {
                url: url.to_string(),
                source: e,
            })
    }
}

fn is_not_found(status: StatusCode) -> bool {
    status == StatusCode::NOT_FOUND || status == StatusCode::GONE
}

impl Fetch for HttpFetcher {
    fn fetch(&mut self, url: &str) -> FetchOutcome {
        match self.get_text(url) {
            Ok(Some(markup)) => FetchOutcome::Markup(markup),
            Ok(None) => FetchOutcome::NotFound,
            Err(e) => FetchOutcome::Failed(e),
        }
    }
}

/// Builder for HttpFetcher with optional User-Agent and timeout.
#[derive(Debug)]
pub struct HttpFetcherBuilder {
    user_agent: Option<String>,
    timeout_secs: u64,
}

impl Default for HttpFetcherBuilder {
    fn default() -> Self {
        Self {
            user_agent: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl HttpFetcherBuilder {
    /// Set a custom User-Agent. If not set, a browser-like default is used.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Set request timeout in seconds. Default 30. A timed-out request is a failed fetch.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn build(self) -> Result<HttpFetcher, ScraperError> {
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());
        let inner = reqwest::blocking::Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(self.timeout_secs))
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| ScraperError::Client { source: e })?;
        Ok(HttpFetcher { inner })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_statuses() {
        assert!(is_not_found(StatusCode::NOT_FOUND));
        assert!(is_not_found(StatusCode::GONE));
        assert!(!is_not_found(StatusCode::OK));
        assert!(!is_not_found(StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[test]
    fn unreachable_host_is_a_failed_fetch() -> Result<(), ScraperError> {
        let mut fetcher = HttpFetcher::builder().timeout_secs(2).build()?;
        match fetcher.fetch("http://127.0.0.1:1/bleach") {
            FetchOutcome::Failed(ScraperError::Network { url, .. }) => {
                assert_eq!(url, "http://127.0.0.1:1/bleach");
            }
            other => panic!("expected network failure, got {:?}", other),
        }
        Ok(())
    }
}
