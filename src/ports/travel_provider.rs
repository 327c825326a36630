//! Travel Provider Port - Interface for the flight/hotel data provider.
//!
//! Abstracts the keyed search operations of an Amadeus-style provider. All
//! operations fail with a [`ProviderError`] that preserves the provider's
//! structured error payload, because the orchestration layer classifies
//! failures by the payload's first code/status (outage vs request error).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{FlightOffer, HotelResult, HotelSummary};

/// Port for flight/hotel provider search operations.
#[async_trait]
pub trait TravelProvider: Send + Sync {
    /// Searches flight offers for one date and traveller count.
    async fn search_flights(
        &self,
        origin: &str,
        destination: &str,
        departure_date: &str,
        adults: u32,
    ) -> Result<Vec<FlightOffer>, ProviderError>;

    /// Lists hotels in a city.
    async fn search_hotels_by_city(
        &self,
        city_code: &str,
    ) -> Result<Vec<HotelSummary>, ProviderError>;

    /// Searches room offers for one hotel and date range.
    async fn search_hotel_offers(
        &self,
        hotel_id: &str,
        adults: u32,
        check_in: &str,
        check_out: &str,
    ) -> Result<Vec<HotelResult>, ProviderError>;

    /// Resolves a location code to its metadata (city name lookup).
    async fn resolve_location(
        &self,
        keyword: &str,
        sub_type: LocationType,
    ) -> Result<Vec<LocationInfo>, ProviderError>;
}

/// Location sub-type for `resolve_location`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationType {
    Airport,
    City,
}

impl LocationType {
    /// Provider wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            LocationType::Airport => "AIRPORT",
            LocationType::City => "CITY",
        }
    }
}

/// Resolved location metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationInfo {
    #[serde(default)]
    pub iata_code: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<LocationAddress>,
}

/// Address block on a resolved location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationAddress {
    #[serde(default)]
    pub city_name: Option<String>,
}

/// One entry in the provider's structured error payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderErrorDetail {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

/// Provider error code the API reports when its own backend is down.
pub const SYSTEM_UNAVAILABLE_CODE: i64 = 141;

/// Travel provider errors.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Structured API error response.
    #[error("provider error: {}", first_message(.errors))]
    Api {
        /// HTTP status of the response.
        http_status: u16,
        /// The provider's `errors[]` payload.
        errors: Vec<ProviderErrorDetail>,
    },

    /// Rate limited (HTTP 429).
    #[error("provider rate limited")]
    RateLimited,

    /// Network failure talking to the provider.
    #[error("network error: {0}")]
    Network(String),

    /// Response body could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// Authentication with the provider failed.
    #[error("provider authentication failed")]
    AuthenticationFailed,

    /// Request exceeded the configured timeout.
    #[error("provider request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },
}

fn first_message(errors: &[ProviderErrorDetail]) -> String {
    errors
        .first()
        .and_then(|e| e.detail.clone().or_else(|| e.title.clone()))
        .unwrap_or_else(|| "unknown".to_string())
}

impl ProviderError {
    /// Creates an API error from a decoded payload.
    pub fn api(http_status: u16, errors: Vec<ProviderErrorDetail>) -> Self {
        Self::Api {
            http_status,
            errors,
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    /// First error code in the payload, if any.
    pub fn first_code(&self) -> Option<i64> {
        match self {
            ProviderError::Api { errors, .. } => errors.first().and_then(|e| e.code),
            _ => None,
        }
    }

    /// First error status in the payload, if any.
    pub fn first_status(&self) -> Option<u16> {
        match self {
            ProviderError::Api { errors, .. } => errors.first().and_then(|e| e.status),
            _ => None,
        }
    }

    /// Outage classification: "the provider is down", as opposed to "this
    /// request is invalid".
    ///
    /// True when the first reported error carries the system-unavailable
    /// code or a 500-class status (payload status or HTTP status).
    pub fn is_outage(&self) -> bool {
        match self {
            ProviderError::Api {
                http_status,
                errors,
            } => {
                let first = errors.first();
                first.and_then(|e| e.code) == Some(SYSTEM_UNAVAILABLE_CODE)
                    || first.and_then(|e| e.status).is_some_and(|s| s >= 500)
                    || *http_status >= 500
            }
            _ => false,
        }
    }

    /// True for HTTP 429 responses.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, ProviderError::RateLimited)
    }
}
