//! Intent model (Ollama) configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Language model configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// Model tag to run
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the model server
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Sampling temperature
    #[serde(default)]
    pub temperature: f32,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl ModelConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate model configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.model.is_empty() {
            return Err(ValidationError::MissingRequired("TRAVIA__LLM__MODEL"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidModelUrl);
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_base_url(),
            temperature: 0.0,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_model() -> String {
    "llama3.2:3b".to_string()
}

fn default_base_url() -> String {
    "http://127.0.0.1:11434".to_string()
}

fn default_timeout() -> u64 {
    60
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = ModelConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.model, "llama3.2:3b");
        assert_eq!(config.timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_bad_url_fails() {
        let config = ModelConfig {
            base_url: "localhost:11434".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidModelUrl)
        ));
    }
}
