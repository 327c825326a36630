//! SearXNG Backend - JSON search endpoint implementation of SearchBackend.
//!
//! One instance of this adapter fronts one public SearXNG instance; the
//! fallback cascade holds several in priority order.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::ports::{SearchBackend, SearchBackendError, SearchHit};

/// Browser-like agent; some public instances reject default client agents.
const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// SearXNG JSON search backend.
pub struct SearxngBackend {
    search_url: String,
    client: Client,
}

impl SearxngBackend {
    /// Creates a backend for one instance's `/search` URL.
    pub fn new(search_url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            search_url: search_url.into(),
            client,
        }
    }
}

#[async_trait]
impl SearchBackend for SearxngBackend {
    fn name(&self) -> &str {
        &self.search_url
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, SearchBackendError> {
        let response = self
            .client
            .get(&self.search_url)
            .query(&[
                ("q", query),
                ("format", "json"),
                ("categories", "general"),
                ("language", "en"),
            ])
            .send()
            .await
            .map_err(|e| SearchBackendError::network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchBackendError::Status(status.as_u16()));
        }

        let body: SearxngResponse = response
            .json()
            .await
            .map_err(|e| SearchBackendError::decode(e.to_string()))?;

        Ok(body
            .results
            .into_iter()
            .map(|r| SearchHit::new(r.title, r.url, r.content))
            .collect())
    }
}

#[derive(Debug, Deserialize)]
struct SearxngResponse {
    #[serde(default)]
    results: Vec<SearxngResult>,
}

#[derive(Debug, Deserialize)]
struct SearxngResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_instance_url() {
        let backend =
            SearxngBackend::new("https://searx.be/search", Duration::from_secs(10));
        assert_eq!(backend.name(), "https://searx.be/search");
    }

    #[test]
    fn response_decodes_result_fields() {
        let body = r#"{"results": [{"title": "Cheap flights", "url": "https://x.test", "content": "BOM to DEL"}]}"#;
        let parsed: SearxngResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.results.len(), 1);
        assert_eq!(parsed.results[0].title, "Cheap flights");
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let body = r#"{"results": [{"url": "https://x.test"}]}"#;
        let parsed: SearxngResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.results[0].title, "");
        assert_eq!(parsed.results[0].content, "");
    }
}
