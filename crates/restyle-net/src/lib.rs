//! restyle Networking
//!
//! Fetches source HTML over HTTP(S).

mod fetch;

pub use fetch::{DEFAULT_TIMEOUT, DEFAULT_USER_AGENT, Fetch, HttpFetcher, validate_url};
pub use url::Url;

/// Fetch a URL with the default fetcher
pub fn fetch_html(url: &str) -> Result<String, FetchError> {
    HttpFetcher::new()?.fetch_html(url)
}

/// Network error
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Unsupported URL scheme `{0}`: only http and https are allowed")]
    UnsupportedScheme(String),

    #[error("HTTP error: {status}")]
    HttpError { status: u16 },

    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
}
