//! DuckDuckGo HTML Backend - last-resort implementation of SearchBackend.
//!
//! Speaks a different protocol from the JSON backends: a form-encoded POST
//! to the HTML endpoint, with results scraped out of the markup. The two
//! result classes (`result__a` for the link, `result__snippet` for the
//! description) are stable enough to extract with anchored regexes.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use std::time::Duration;

use crate::ports::{SearchBackend, SearchBackendError, SearchHit};

const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// At most this many results are scraped from one page.
const MAX_RESULTS: usize = 5;

static RESULT_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)<a[^>]*class="[^"]*result__a[^"]*"[^>]*href="([^"]*)"[^>]*>(.*?)</a>"#)
        .expect("result link pattern must compile")
});

static RESULT_SNIPPET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)<a[^>]*class="[^"]*result__snippet[^"]*"[^>]*>(.*?)</a>"#)
        .expect("result snippet pattern must compile")
});

static TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]+>").expect("tag pattern must compile"));

/// DuckDuckGo HTML search backend.
pub struct DuckDuckGoBackend {
    endpoint: String,
    client: Client,
}

impl DuckDuckGoBackend {
    /// Creates the backend against the public HTML endpoint.
    pub fn new(timeout: Duration) -> Self {
        Self::with_endpoint("https://html.duckduckgo.com/html/", timeout)
    }

    /// Creates the backend against a specific endpoint (tests).
    pub fn with_endpoint(endpoint: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            endpoint: endpoint.into(),
            client,
        }
    }

    /// Extracts up to [`MAX_RESULTS`] hits from a result page.
    fn scrape(html: &str) -> Vec<SearchHit> {
        let links = RESULT_LINK.captures_iter(html).take(MAX_RESULTS);
        let mut snippets = RESULT_SNIPPET.captures_iter(html);

        links
            .map(|link| {
                let url = link[1].to_string();
                let title = strip_markup(&link[2]);
                let content = snippets
                    .next()
                    .map(|s| strip_markup(&s[1]))
                    .unwrap_or_default();
                SearchHit::new(title, url, content)
            })
            .filter(|hit| !hit.title.is_empty())
            .collect()
    }
}

/// Drops tags, decodes the common entities, and collapses whitespace.
fn strip_markup(fragment: &str) -> String {
    let text = TAG.replace_all(fragment, "");
    let text = text
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&nbsp;", " ");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[async_trait]
impl SearchBackend for DuckDuckGoBackend {
    fn name(&self) -> &str {
        "duckduckgo-html"
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, SearchBackendError> {
        let response = self
            .client
            .post(&self.endpoint)
            .form(&[("q", query)])
            .send()
            .await
            .map_err(|e| SearchBackendError::network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchBackendError::Status(status.as_u16()));
        }

        let html = response
            .text()
            .await
            .map_err(|e| SearchBackendError::decode(e.to_string()))?;

        Ok(Self::scrape(&html))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r##"
        <div class="result__body">
            <a class="result__a" href="https://flights.test/bom-del">Cheap <b>BOM to DEL</b> flights</a>
            <a class="result__snippet" href="#">Fares from &#x27;low&#x27; &amp; refundable</a>
        </div>
        <div class="result__body">
            <a class="result__a" href="https://other.test">Second result</a>
            <a class="result__snippet" href="#">Another snippet</a>
        </div>
    "##;

    #[test]
    fn scrape_pairs_links_with_snippets() {
        let hits = DuckDuckGoBackend::scrape(SAMPLE);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].title, "Cheap BOM to DEL flights");
        assert_eq!(hits[0].url, "https://flights.test/bom-del");
        assert_eq!(hits[0].content, "Fares from 'low' & refundable");
        assert_eq!(hits[1].title, "Second result");
    }

    #[test]
    fn scrape_caps_results() {
        let many = SAMPLE.repeat(5);
        let hits = DuckDuckGoBackend::scrape(&many);
        assert_eq!(hits.len(), MAX_RESULTS);
    }

    #[test]
    fn scrape_of_unrelated_markup_is_empty() {
        let hits = DuckDuckGoBackend::scrape("<html><body><p>nothing here</p></body></html>");
        assert!(hits.is_empty());
    }

    #[test]
    fn strip_markup_collapses_whitespace() {
        assert_eq!(strip_markup("  a\n  <i>b</i>   c "), "a b c");
    }
}
