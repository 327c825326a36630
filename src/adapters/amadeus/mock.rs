//! Mock Travel Provider for testing.
//!
//! Configurable mock of the TravelProvider port: fixed flight/hotel results,
//! per-call queued hotel-offer outcomes (for early-stop and rate-limit
//! tests), error injection, and call capture.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use crate::domain::{FlightOffer, HotelResult, HotelSummary};
use crate::ports::{
    LocationAddress, LocationInfo, LocationType, ProviderError, ProviderErrorDetail,
    TravelProvider,
};

/// Cloneable provider error shapes for injection.
#[derive(Debug, Clone)]
pub enum MockProviderError {
    /// Structured API error with the given HTTP status and payload entries.
    Api {
        http_status: u16,
        errors: Vec<ProviderErrorDetail>,
    },
    /// HTTP 429.
    RateLimited,
    /// Network failure.
    Network(String),
}

impl MockProviderError {
    /// The provider's "system unavailable" outage error (code 141 / 500).
    pub fn outage() -> Self {
        Self::Api {
            http_status: 500,
            errors: vec![ProviderErrorDetail {
                code: Some(141),
                status: Some(500),
                title: Some("SYSTEM ERROR HAS OCCURRED".to_string()),
                detail: None,
            }],
        }
    }

    /// A plain 400-class request error.
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::Api {
            http_status: 400,
            errors: vec![ProviderErrorDetail {
                code: Some(477),
                status: Some(400),
                title: Some("INVALID FORMAT".to_string()),
                detail: Some(detail.into()),
            }],
        }
    }
}

impl From<MockProviderError> for ProviderError {
    fn from(err: MockProviderError) -> Self {
        match err {
            MockProviderError::Api {
                http_status,
                errors,
            } => ProviderError::api(http_status, errors),
            MockProviderError::RateLimited => ProviderError::RateLimited,
            MockProviderError::Network(m) => ProviderError::network(m),
        }
    }
}

type MockOutcome<T> = Result<T, MockProviderError>;

/// Mock travel provider.
#[derive(Clone, Default)]
pub struct MockTravelProvider {
    flights: Arc<Mutex<Option<MockOutcome<Vec<FlightOffer>>>>>,
    hotels_by_city: Arc<Mutex<Option<MockOutcome<Vec<HotelSummary>>>>>,
    hotel_offers: Arc<Mutex<VecDeque<MockOutcome<Vec<HotelResult>>>>>,
    city_names: Arc<Mutex<HashMap<String, String>>>,
    offer_calls: Arc<Mutex<Vec<String>>>,
    flight_calls: Arc<Mutex<Vec<(String, String, String, u32)>>>,
}

impl MockTravelProvider {
    /// Creates an empty mock; unconfigured operations return empty results.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the flight search result.
    pub fn with_flights(self, flights: Vec<FlightOffer>) -> Self {
        *self.flights.lock().unwrap() = Some(Ok(flights));
        self
    }

    /// Sets the flight search to fail.
    pub fn with_flight_error(self, err: MockProviderError) -> Self {
        *self.flights.lock().unwrap() = Some(Err(err));
        self
    }

    /// Sets the hotels-by-city result.
    pub fn with_city_hotels(self, hotels: Vec<HotelSummary>) -> Self {
        *self.hotels_by_city.lock().unwrap() = Some(Ok(hotels));
        self
    }

    /// Sets hotels-by-city to fail.
    pub fn with_city_hotels_error(self, err: MockProviderError) -> Self {
        *self.hotels_by_city.lock().unwrap() = Some(Err(err));
        self
    }

    /// Queues one hotel-offer lookup outcome (consumed per hotel id).
    pub fn push_offer_outcome(self, outcome: MockOutcome<Vec<HotelResult>>) -> Self {
        self.hotel_offers.lock().unwrap().push_back(outcome);
        self
    }

    /// Registers a code → city-name resolution.
    pub fn with_city_name(self, code: impl Into<String>, city: impl Into<String>) -> Self {
        self.city_names
            .lock()
            .unwrap()
            .insert(code.into(), city.into());
        self
    }

    /// Hotel ids queried for offers, in order.
    pub fn offer_calls(&self) -> Vec<String> {
        self.offer_calls.lock().unwrap().clone()
    }

    /// Flight searches issued, in order.
    pub fn flight_calls(&self) -> Vec<(String, String, String, u32)> {
        self.flight_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TravelProvider for MockTravelProvider {
    async fn search_flights(
        &self,
        origin: &str,
        destination: &str,
        departure_date: &str,
        adults: u32,
    ) -> Result<Vec<FlightOffer>, ProviderError> {
        self.flight_calls.lock().unwrap().push((
            origin.to_string(),
            destination.to_string(),
            departure_date.to_string(),
            adults,
        ));
        match self.flights.lock().unwrap().clone() {
            Some(Ok(flights)) => Ok(flights),
            Some(Err(err)) => Err(err.into()),
            None => Ok(Vec::new()),
        }
    }

    async fn search_hotels_by_city(
        &self,
        _city_code: &str,
    ) -> Result<Vec<HotelSummary>, ProviderError> {
        match self.hotels_by_city.lock().unwrap().clone() {
            Some(Ok(hotels)) => Ok(hotels),
            Some(Err(err)) => Err(err.into()),
            None => Ok(Vec::new()),
        }
    }

    async fn search_hotel_offers(
        &self,
        hotel_id: &str,
        _adults: u32,
        _check_in: &str,
        _check_out: &str,
    ) -> Result<Vec<HotelResult>, ProviderError> {
        self.offer_calls.lock().unwrap().push(hotel_id.to_string());
        match self.hotel_offers.lock().unwrap().pop_front() {
            Some(Ok(results)) => Ok(results),
            Some(Err(err)) => Err(err.into()),
            None => Ok(Vec::new()),
        }
    }

    async fn resolve_location(
        &self,
        keyword: &str,
        _sub_type: LocationType,
    ) -> Result<Vec<LocationInfo>, ProviderError> {
        let names = self.city_names.lock().unwrap();
        match names.get(keyword) {
            Some(city) => Ok(vec![LocationInfo {
                iata_code: Some(keyword.to_string()),
                name: None,
                address: Some(LocationAddress {
                    city_name: Some(city.clone()),
                }),
            }]),
            None => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn configured_flight_error_converts() {
        let mock = MockTravelProvider::new().with_flight_error(MockProviderError::outage());
        let err = mock.search_flights("BOM", "DEL", "2030-01-15", 1).await;
        assert!(err.unwrap_err().is_outage());
        assert_eq!(mock.flight_calls().len(), 1);
    }

    #[tokio::test]
    async fn offer_outcomes_are_consumed_in_order() {
        let mock = MockTravelProvider::new()
            .push_offer_outcome(Err(MockProviderError::RateLimited))
            .push_offer_outcome(Ok(Vec::new()));

        assert!(mock
            .search_hotel_offers("H1", 1, "a", "b")
            .await
            .unwrap_err()
            .is_rate_limited());
        assert!(mock.search_hotel_offers("H2", 1, "a", "b").await.is_ok());
        assert_eq!(mock.offer_calls(), vec!["H1", "H2"]);
    }

    #[tokio::test]
    async fn resolve_location_returns_registered_city() {
        let mock = MockTravelProvider::new().with_city_name("BOM", "Mumbai");
        let locations = mock
            .resolve_location("BOM", LocationType::Airport)
            .await
            .unwrap();
        assert_eq!(
            locations[0]
                .address
                .as_ref()
                .and_then(|a| a.city_name.as_deref()),
            Some("Mumbai")
        );
        assert!(mock
            .resolve_location("XXX", LocationType::Airport)
            .await
            .unwrap()
            .is_empty());
    }
}
