//! Web-search fallback configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Fallback search configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// SearXNG instance search URLs, tried in order (comma-separated)
    #[serde(default = "default_instances")]
    pub searxng_instances: String,

    /// Whether the DuckDuckGo HTML scraper runs after all instances fail
    #[serde(default = "default_true")]
    pub duckduckgo_enabled: bool,

    /// Per-backend request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Path to the local airport dataset (CSV), if any
    pub airports_csv: Option<String>,
}

impl SearchConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get instance URLs as a vector
    pub fn instance_list(&self) -> Vec<String> {
        self.searxng_instances
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Validate search configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        for url in self.instance_list() {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ValidationError::InvalidSearchUrl(url));
            }
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            searxng_instances: default_instances(),
            duckduckgo_enabled: true,
            timeout_secs: default_timeout(),
            airports_csv: None,
        }
    }
}

fn default_instances() -> String {
    [
        "https://searx.be/search",
        "https://search.bus-hit.me/search",
        "https://searx.tiekoetter.com/search",
        "https://paulgo.io/search",
    ]
    .join(",")
}

fn default_true() -> bool {
    true
}

fn default_timeout() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_instances_parse() {
        let config = SearchConfig::default();
        let instances = config.instance_list();
        assert_eq!(instances.len(), 4);
        assert_eq!(instances[0], "https://searx.be/search");
        assert!(config.validate().is_ok());
        assert!(config.duckduckgo_enabled);
    }

    #[test]
    fn test_custom_list_trims_whitespace() {
        let config = SearchConfig {
            searxng_instances: " https://a.example/search , https://b.example/search ".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.instance_list(),
            vec!["https://a.example/search", "https://b.example/search"]
        );
    }

    #[test]
    fn test_invalid_instance_url_fails() {
        let config = SearchConfig {
            searxng_instances: "not-a-url".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidSearchUrl(_))
        ));
    }
}
