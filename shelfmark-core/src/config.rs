//! Lookup client configuration

use std::time::Duration;

/// Google Books volumes endpoint
pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/books/v1/volumes";

/// Default round-trip timeout for a single lookup
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Upper bound on candidates requested from, and kept per, lookup
pub const MAX_CANDIDATES: usize = 3;

/// Settings for the bibliographic search client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupConfig {
    /// Search endpoint URL
    pub base_url: String,

    /// Timeout applied to each request
    pub timeout: Duration,

    /// Optional API key sent as the `key` query parameter
    pub api_key: Option<String>,

    /// User-Agent header value
    pub user_agent: String,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            api_key: None,
            user_agent: concat!("shelfmark/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl LookupConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the client at a different endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the API key; blank keys are treated as absent
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|k| !k.trim().is_empty());
        self
    }
}
