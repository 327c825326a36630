//! Web Search Port - Interface for fallback search backends.
//!
//! Each backend is one alternative data source in the fallback cascade; the
//! cascade iterates a prioritized list and stops at the first success. A
//! backend owns its own transport (JSON endpoint, HTML scraping) but must
//! bound every call with a timeout so a hung instance cannot prevent the
//! cascade from trying the next one.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Port for a single web-search backend.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Human-readable backend identity (instance URL or service name).
    fn name(&self) -> &str;

    /// Runs the query, returning ranked hits.
    ///
    /// An empty hit list is a failure for cascade purposes; callers treat it
    /// the same as an error and move on.
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, SearchBackendError>;
}

/// One web search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub url: String,
    /// Content snippet, possibly empty.
    #[serde(default)]
    pub content: String,
}

impl SearchHit {
    /// Creates a hit.
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            content: content.into(),
        }
    }
}

/// Search backend errors.
#[derive(Debug, thiserror::Error)]
pub enum SearchBackendError {
    /// Non-200 HTTP response.
    #[error("unexpected status {0}")]
    Status(u16),

    /// Network failure or timeout.
    #[error("network error: {0}")]
    Network(String),

    /// Response body could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),
}

impl SearchBackendError {
    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }
}
