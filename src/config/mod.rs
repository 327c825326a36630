//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `TRAVIA_` prefix and nested values use underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use travia::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr());
//! ```

mod amadeus;
mod error;
mod llm;
mod search;
mod server;

pub use amadeus::ProviderConfig;
pub use error::{ConfigError, ValidationError};
pub use llm::ModelConfig;
pub use search::SearchConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Contains all configuration sections for the Travia backend.
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Travel provider configuration (Amadeus credentials)
    #[serde(default)]
    pub amadeus: ProviderConfig,

    /// Intent model configuration (Ollama)
    #[serde(default)]
    pub llm: ModelConfig,

    /// Web-search fallback configuration
    #[serde(default)]
    pub search: SearchConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `TRAVIA` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `TRAVIA__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `TRAVIA__AMADEUS__CLIENT_ID=...` -> `amadeus.client_id = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("TRAVIA")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.amadeus.validate()?;
        self.llm.validate()?;
        self.search.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_needs_credentials() {
        let config = AppConfig::default();
        // Everything except the provider credentials has a usable default.
        assert!(config.server.validate().is_ok());
        assert!(config.llm.validate().is_ok());
        assert!(config.search.validate().is_ok());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_configured_provider_validates() {
        let mut config = AppConfig::default();
        config.amadeus.client_id = "id".to_string();
        config.amadeus.client_secret = "secret".to_string();
        assert!(config.validate().is_ok());
    }
}
