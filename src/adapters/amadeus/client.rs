//! Amadeus Client - Implementation of TravelProvider for the Amadeus REST API.
//!
//! Authenticates with the client-credentials flow and caches the bearer
//! token until shortly before expiry. Error responses are decoded into the
//! provider's structured `errors[]` payload so the orchestration layer can
//! classify outages by code/status.
//!
//! # Configuration
//!
//! ```ignore
//! let config = AmadeusConfig::new(client_id, client_secret)
//!     .with_base_url("https://test.api.amadeus.com");
//!
//! let provider = AmadeusClient::new(config);
//! ```

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::domain::{FlightOffer, HotelResult, HotelSummary};
use crate::ports::{
    LocationInfo, LocationType, ProviderError, ProviderErrorDetail, TravelProvider,
};

/// Configuration for the Amadeus client.
#[derive(Debug, Clone)]
pub struct AmadeusConfig {
    /// API client id.
    pub client_id: String,
    /// API client secret.
    client_secret: Secret<String>,
    /// Base URL (default: the Amadeus test environment).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum flight offers requested per search.
    pub max_flight_offers: u32,
}

impl AmadeusConfig {
    /// Creates a new configuration with the given credentials.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: Secret::new(client_secret.into()),
            base_url: "https://test.api.amadeus.com".to_string(),
            timeout: Duration::from_secs(30),
            max_flight_offers: 10,
        }
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn client_secret(&self) -> &str {
        self.client_secret.expose_secret()
    }
}

/// Amadeus REST API provider.
pub struct AmadeusClient {
    config: AmadeusConfig,
    client: Client,
    token: RwLock<Option<CachedToken>>,
}

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

/// Refresh the token this long before it actually expires.
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(30);

impl AmadeusClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: AmadeusConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            config,
            client,
            token: RwLock::new(None),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    fn map_request_error(&self, err: reqwest::Error) -> ProviderError {
        if err.is_timeout() {
            ProviderError::Timeout {
                timeout_secs: self.config.timeout.as_secs(),
            }
        } else {
            ProviderError::network(err.to_string())
        }
    }

    /// Returns a valid bearer token, refreshing when near expiry.
    async fn bearer_token(&self) -> Result<String, ProviderError> {
        if let Some(cached) = self.token.read().await.as_ref() {
            if cached.expires_at > Instant::now() + TOKEN_EXPIRY_MARGIN {
                return Ok(cached.access_token.clone());
            }
        }

        let response = self
            .client
            .post(self.url("/v1/security/oauth2/token"))
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret()),
            ])
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ProviderError::AuthenticationFailed);
        }
        if !response.status().is_success() {
            return Err(ProviderError::network(format!(
                "token endpoint returned {}",
                response.status()
            )));
        }

        let grant: TokenGrant = response
            .json()
            .await
            .map_err(|e| ProviderError::decode(e.to_string()))?;

        let cached = CachedToken {
            access_token: grant.access_token.clone(),
            expires_at: Instant::now() + Duration::from_secs(grant.expires_in),
        };
        *self.token.write().await = Some(cached);

        Ok(grant.access_token)
    }

    /// Issues an authenticated GET and decodes the `data` list envelope.
    async fn get_data<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, ProviderError> {
        let token = self.bearer_token().await?;

        let response = self
            .client
            .get(self.url(path))
            .bearer_auth(token)
            .query(query)
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::RateLimited);
        }
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ProviderError::AuthenticationFailed);
        }
        if !status.is_success() {
            let errors = response
                .json::<ErrorEnvelope>()
                .await
                .map(|e| e.errors)
                .unwrap_or_default();
            return Err(ProviderError::api(status.as_u16(), errors));
        }

        let envelope: DataEnvelope<T> = response
            .json()
            .await
            .map_err(|e| ProviderError::decode(e.to_string()))?;

        Ok(envelope.data)
    }
}

#[async_trait]
impl TravelProvider for AmadeusClient {
    async fn search_flights(
        &self,
        origin: &str,
        destination: &str,
        departure_date: &str,
        adults: u32,
    ) -> Result<Vec<FlightOffer>, ProviderError> {
        self.get_data(
            "/v2/shopping/flight-offers",
            &[
                ("originLocationCode", origin.to_string()),
                ("destinationLocationCode", destination.to_string()),
                ("departureDate", departure_date.to_string()),
                ("adults", adults.to_string()),
                ("max", self.config.max_flight_offers.to_string()),
            ],
        )
        .await
    }

    async fn search_hotels_by_city(
        &self,
        city_code: &str,
    ) -> Result<Vec<HotelSummary>, ProviderError> {
        self.get_data(
            "/v1/reference-data/locations/hotels/by-city",
            &[("cityCode", city_code.to_string())],
        )
        .await
    }

    async fn search_hotel_offers(
        &self,
        hotel_id: &str,
        adults: u32,
        check_in: &str,
        check_out: &str,
    ) -> Result<Vec<HotelResult>, ProviderError> {
        self.get_data(
            "/v3/shopping/hotel-offers",
            &[
                ("hotelIds", hotel_id.to_string()),
                ("adults", adults.to_string()),
                ("checkInDate", check_in.to_string()),
                ("checkOutDate", check_out.to_string()),
            ],
        )
        .await
    }

    async fn resolve_location(
        &self,
        keyword: &str,
        sub_type: LocationType,
    ) -> Result<Vec<LocationInfo>, ProviderError> {
        self.get_data(
            "/v1/reference-data/locations",
            &[
                ("keyword", keyword.to_string()),
                ("subType", sub_type.as_str().to_string()),
            ],
        )
        .await
    }
}

#[derive(Debug, Deserialize)]
struct TokenGrant {
    access_token: String,
    expires_in: u64,
}

/// Provider omits `data` entirely for empty result sets.
#[derive(Debug, Deserialize)]
struct DataEnvelope<T> {
    #[serde(default = "Vec::new")]
    data: Vec<T>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    errors: Vec<ProviderErrorDetail>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_to_test_environment() {
        let config = AmadeusConfig::new("id", "secret");
        assert_eq!(config.base_url, "https://test.api.amadeus.com");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn url_joins_base_and_path() {
        let client = AmadeusClient::new(
            AmadeusConfig::new("id", "secret").with_base_url("https://api.example.com"),
        );
        assert_eq!(
            client.url("/v2/shopping/flight-offers"),
            "https://api.example.com/v2/shopping/flight-offers"
        );
    }

    #[test]
    fn error_envelope_decodes_amadeus_payload() {
        let body = r#"{"errors": [{"code": 141, "status": 500, "title": "SYSTEM ERROR HAS OCCURRED"}]}"#;
        let envelope: ErrorEnvelope = serde_json::from_str(body).unwrap();
        let err = ProviderError::api(500, envelope.errors);
        assert!(err.is_outage());
        assert_eq!(err.first_code(), Some(141));
    }

    #[test]
    fn data_envelope_tolerates_missing_data() {
        let envelope: DataEnvelope<FlightOffer> =
            serde_json::from_str(r#"{"meta": {"count": 0}}"#).unwrap();
        assert!(envelope.data.is_empty());
    }
}
