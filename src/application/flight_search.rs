//! Flight search stage with outage classification.
//!
//! Runs the provider flight search and classifies failures: an outage (the
//! provider's own backend is down) arms the web-search fallback with a
//! human-readable query, while a request error becomes the turn's response
//! text. Location values are normalized to IATA codes through the local
//! airport dataset before the provider sees them.

use chrono::NaiveDate;
use std::sync::Arc;

use crate::adapters::airports::AirportCityCache;
use crate::domain::{FlightOffer, TravelIntent};
use crate::ports::{AirportResolver, TravelProvider};

/// What the flight stage produced for this turn.
#[derive(Debug, Clone, PartialEq)]
pub enum FlightSearchOutcome {
    /// Provider answered; the list may be empty.
    Found(Vec<FlightOffer>),
    /// Request-level failure; the text becomes the response.
    Error(String),
    /// Provider outage; pivot to the web-search cascade with this query.
    Outage { search_query: String },
}

/// Flight search over the travel provider.
pub struct FlightSearchStage {
    provider: Arc<dyn TravelProvider>,
    cities: Arc<AirportCityCache>,
    resolver: Option<Arc<dyn AirportResolver>>,
}

impl FlightSearchStage {
    /// Creates the stage.
    pub fn new(provider: Arc<dyn TravelProvider>, cities: Arc<AirportCityCache>) -> Self {
        Self {
            provider,
            cities,
            resolver: None,
        }
    }

    /// Adds a local dataset for code normalization.
    pub fn with_resolver(mut self, resolver: Arc<dyn AirportResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Searches flights for a validated intent.
    pub async fn run(&self, intent: &TravelIntent) -> FlightSearchOutcome {
        let Some(origin) = intent.origin.as_deref() else {
            return FlightSearchOutcome::Error("Missing origin airport code".to_string());
        };
        let Some(destination) = intent.destination.as_deref() else {
            return FlightSearchOutcome::Error("Missing destination airport code".to_string());
        };
        let Some(check_in) = intent.check_in.as_deref() else {
            return FlightSearchOutcome::Error("Missing departure date".to_string());
        };

        let origin = self.normalize_code(origin);
        let destination = self.normalize_code(destination);

        tracing::info!(
            %origin,
            %destination,
            date = %check_in,
            travelers = intent.travelers,
            "searching flights"
        );

        match self
            .provider
            .search_flights(&origin, &destination, check_in, intent.travelers)
            .await
        {
            Ok(flights) => {
                tracing::info!(count = flights.len(), "flight search succeeded");
                FlightSearchOutcome::Found(flights)
            }
            Err(err) if err.is_outage() => {
                tracing::warn!(error = %err, "provider outage, arming web search fallback");
                let search_query = self.fallback_query(&origin, &destination, check_in).await;
                FlightSearchOutcome::Outage { search_query }
            }
            Err(err) => {
                tracing::error!(error = %err, "flight search failed");
                FlightSearchOutcome::Error(format!("Flight search error: {err}"))
            }
        }
    }

    /// Builds the human-readable query the web cascade will run.
    async fn fallback_query(&self, origin: &str, destination: &str, check_in: &str) -> String {
        let origin_city = self.cities.city_name(origin).await;
        let dest_city = self.cities.city_name(destination).await;
        let date_str = match NaiveDate::parse_from_str(check_in, "%Y-%m-%d") {
            Ok(date) => date.format("%B %d, %Y").to_string(),
            Err(_) => check_in.to_string(),
        };
        format!("flights from {origin_city} to {dest_city} on {date_str} price")
    }

    fn normalize_code(&self, location: &str) -> String {
        if let Some(resolver) = &self.resolver {
            if let Some(code) = resolver.iata_for(location) {
                return code;
            }
        }
        location.trim().to_uppercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::amadeus::{MockProviderError, MockTravelProvider};
    use crate::domain::{
        FlightEndpoint, FlightSegment, IntentKind, Itinerary, OfferPrice,
    };

    fn intent() -> TravelIntent {
        TravelIntent::new(IntentKind::FlightSearch)
            .with_origin("BOM")
            .with_destination("DEL")
            .with_check_in("2030-01-15")
            .with_travelers(2)
    }

    fn offer() -> FlightOffer {
        FlightOffer {
            itineraries: vec![Itinerary {
                segments: vec![FlightSegment {
                    departure: FlightEndpoint {
                        iata_code: "BOM".to_string(),
                        at: "2030-01-15T06:30:00".to_string(),
                    },
                    arrival: FlightEndpoint {
                        iata_code: "DEL".to_string(),
                        at: "2030-01-15T08:40:00".to_string(),
                    },
                    carrier_code: "AI".to_string(),
                    number: "864".to_string(),
                }],
            }],
            price: OfferPrice {
                currency: Some("EUR".to_string()),
                total: "120.50".to_string(),
                base: Some("100.00".to_string()),
            },
        }
    }

    fn stage(provider: MockTravelProvider) -> FlightSearchStage {
        let provider = Arc::new(provider);
        let cities = Arc::new(AirportCityCache::new(provider.clone()));
        FlightSearchStage::new(provider, cities)
    }

    #[tokio::test]
    async fn successful_search_returns_offers() {
        let provider = MockTravelProvider::new().with_flights(vec![offer()]);
        let calls = provider.clone();
        let outcome = stage(provider).run(&intent()).await;

        assert!(matches!(outcome, FlightSearchOutcome::Found(ref f) if f.len() == 1));
        assert_eq!(
            calls.flight_calls(),
            vec![(
                "BOM".to_string(),
                "DEL".to_string(),
                "2030-01-15".to_string(),
                2
            )]
        );
    }

    #[tokio::test]
    async fn empty_results_are_still_found() {
        let outcome = stage(MockTravelProvider::new()).run(&intent()).await;
        assert_eq!(outcome, FlightSearchOutcome::Found(Vec::new()));
    }

    #[tokio::test]
    async fn outage_builds_city_level_search_query() {
        let provider = MockTravelProvider::new()
            .with_flight_error(MockProviderError::outage())
            .with_city_name("BOM", "Mumbai")
            .with_city_name("DEL", "Delhi");
        let outcome = stage(provider).run(&intent()).await;

        assert_eq!(
            outcome,
            FlightSearchOutcome::Outage {
                search_query: "flights from Mumbai to Delhi on January 15, 2030 price"
                    .to_string()
            }
        );
    }

    #[tokio::test]
    async fn outage_query_falls_back_to_codes_and_raw_date() {
        let provider =
            MockTravelProvider::new().with_flight_error(MockProviderError::outage());
        let mut intent = intent();
        intent.check_in = Some("mid January".to_string());
        let outcome = stage(provider).run(&intent).await;

        assert_eq!(
            outcome,
            FlightSearchOutcome::Outage {
                search_query: "flights from BOM to DEL on mid January price".to_string()
            }
        );
    }

    #[tokio::test]
    async fn request_error_becomes_response_text() {
        let provider = MockTravelProvider::new()
            .with_flight_error(MockProviderError::bad_request("bad date"));
        let outcome = stage(provider).run(&intent()).await;

        match outcome {
            FlightSearchOutcome::Error(msg) => {
                assert!(msg.starts_with("Flight search error:"), "got: {msg}");
            }
            other => panic!("expected error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_fields_short_circuit_without_provider_call() {
        let provider = MockTravelProvider::new();
        let calls = provider.clone();
        let mut bare = intent();
        bare.origin = None;
        let outcome = stage(provider).run(&bare).await;

        assert_eq!(
            outcome,
            FlightSearchOutcome::Error("Missing origin airport code".to_string())
        );
        assert!(calls.flight_calls().is_empty());
    }

    #[tokio::test]
    async fn codes_are_uppercased_before_the_provider() {
        let provider = MockTravelProvider::new();
        let calls = provider.clone();
        let mut lower = intent();
        lower.origin = Some("bom".to_string());
        lower.destination = Some("del".to_string());
        stage(provider).run(&lower).await;

        let (origin, destination, _, _) = calls.flight_calls().remove(0);
        assert_eq!(origin, "BOM");
        assert_eq!(destination, "DEL");
    }
}
