//! Travel provider (Amadeus) configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Amadeus API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// API client id
    #[serde(default)]
    pub client_id: String,

    /// API client secret
    #[serde(default)]
    pub client_secret: String,

    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum flight offers requested per search
    #[serde(default = "default_max_offers")]
    pub max_flight_offers: u32,
}

impl ProviderConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate provider configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.client_id.is_empty() {
            return Err(ValidationError::MissingRequired("TRAVIA__AMADEUS__CLIENT_ID"));
        }
        if self.client_secret.is_empty() {
            return Err(ValidationError::MissingRequired(
                "TRAVIA__AMADEUS__CLIENT_SECRET",
            ));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidProviderUrl);
        }
        if self.max_flight_offers == 0 || self.max_flight_offers > 250 {
            return Err(ValidationError::InvalidOfferLimit);
        }
        Ok(())
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            max_flight_offers: default_max_offers(),
        }
    }
}

fn default_base_url() -> String {
    "https://test.api.amadeus.com".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_max_offers() -> u32 {
    10
}
