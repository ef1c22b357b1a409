//! Shared error type for site resolution and fetching.

use thiserror::Error;

/// Errors from site lookup, URL building, and HTTP fetches.
#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("Unknown site '{name}'. Use mangareader, mangapanda, or mangahere.")]
    UnknownSite { name: String },

    #[error("Invalid URL: {input}: {reason}")]
    InvalidUrl { input: String, reason: String },

    #[error("Network error: could not reach {url}: {source}")]
    Network { url: String, source: reqwest::Error },

    #[error("HTTP {status} when fetching: {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Failed to read response body from {url}: {source}")]
    BodyRead { url: String, source: reqwest::Error },

    #[error("Failed to create HTTP client: {source}")]
    Client { source: reqwest::Error },
}
