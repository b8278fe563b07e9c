//! Source fetcher

use std::time::Duration;

use url::Url;

use crate::FetchError;

/// Browser-like user agent; some sites refuse unknown clients
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Capability to retrieve source HTML
pub trait Fetch: Send + Sync {
    fn fetch_html(&self, url: &str) -> Result<String, FetchError>;
}

/// Check that a URL is absolute http(s)
pub fn validate_url(url: &str) -> Result<Url, FetchError> {
    let parsed = Url::parse(url.trim())?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(FetchError::UnsupportedScheme(other.to_string())),
    }
}

/// Blocking HTTP fetcher
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    /// Fetcher with the default user agent and timeout
    pub fn new() -> Result<Self, FetchError> {
        Self::with_options(DEFAULT_USER_AGENT, DEFAULT_TIMEOUT)
    }

    pub fn with_options(user_agent: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    fn fetch_html(&self, url: &str) -> Result<String, FetchError> {
        let url = validate_url(url)?;
        tracing::debug!("Fetching from network: {}", url);

        let response = self.client.get(url.clone()).send().map_err(|e| {
            tracing::warn!("Fetch failed for {}: {}", url, e);
            FetchError::RequestFailed(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("HTTP {} for {}", status.as_u16(), url);
            return Err(FetchError::HttpError {
                status: status.as_u16(),
            });
        }

        let body = response.text()?;
        tracing::debug!("Fetched {} ({} bytes)", url, body.len());
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("https://example.com/page").is_ok());
        assert!(validate_url("  http://example.com  ").is_ok());
        assert!(matches!(validate_url("example.com"), Err(FetchError::InvalidUrl(_))));
        assert!(matches!(
            validate_url("file:///etc/passwd"),
            Err(FetchError::UnsupportedScheme(scheme)) if scheme == "file"
        ));
        assert!(matches!(
            validate_url("javascript:alert(1)"),
            Err(FetchError::UnsupportedScheme(_))
        ));
    }

    #[test]
    fn test_invalid_url_never_reaches_network() {
        let fetcher = HttpFetcher::new().unwrap();
        assert!(matches!(
            fetcher.fetch_html("ftp://example.com/file.html"),
            Err(FetchError::UnsupportedScheme(_))
        ));
    }

    #[test]
    fn test_stub_fetcher() {
        struct Canned(&'static str);

        impl Fetch for Canned {
            fn fetch_html(&self, url: &str) -> Result<String, FetchError> {
                validate_url(url)?;
                Ok(self.0.to_string())
            }
        }

        let fetcher: Box<dyn Fetch> = Box::new(Canned("<p>hi</p>"));
        assert_eq!(fetcher.fetch_html("https://example.com").unwrap(), "<p>hi</p>");
        assert!(fetcher.fetch_html("nope").is_err());
    }
}
