//! Hotel search stage: city listing, then per-hotel offer lookups.
//!
//! Phase one lists hotels in the destination city; phase two walks the
//! first [`MAX_CANDIDATE_HOTELS`] candidates querying offers one hotel at a
//! time, stopping as soon as [`OFFER_QUOTA`] offers are collected. A rate
//! limit pauses for [`RATE_LIMIT_BACKOFF`] and moves on; any other per-hotel
//! failure just skips that hotel. When no offers match at all, the first
//! few candidates are returned as unavailable "basic" entries so the user
//! still sees what exists in the city.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::{HotelResult, TravelIntent};
use crate::ports::{AirportResolver, TravelProvider};

/// How many city hotels are considered for offer lookups.
pub const MAX_CANDIDATE_HOTELS: usize = 30;
/// Offer count at which the candidate walk stops early.
pub const OFFER_QUOTA: usize = 5;
/// How many bare hotels are shown when no offers matched.
pub const BASIC_HOTEL_LIMIT: usize = 5;
/// Pause after a provider rate limit before the next candidate.
pub const RATE_LIMIT_BACKOFF: Duration = Duration::from_millis(500);

/// What the hotel stage produced for this turn.
#[derive(Debug, Clone, PartialEq)]
pub enum HotelSearchOutcome {
    /// Priced offers were found.
    Offers(Vec<HotelResult>),
    /// Hotels exist but none had offers for the dates; metadata only.
    BasicOnly {
        hotels: Vec<HotelResult>,
        message: String,
    },
    /// Failure; the text becomes the response.
    Error(String),
}

/// Hotel search over the travel provider.
pub struct HotelSearchStage {
    provider: Arc<dyn TravelProvider>,
    resolver: Option<Arc<dyn AirportResolver>>,
}

impl HotelSearchStage {
    /// Creates the stage.
    pub fn new(provider: Arc<dyn TravelProvider>) -> Self {
        Self {
            provider,
            resolver: None,
        }
    }

    /// Adds a local dataset for city-code normalization.
    pub fn with_resolver(mut self, resolver: Arc<dyn AirportResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Searches hotels for a validated intent.
    pub async fn run(&self, intent: &TravelIntent) -> HotelSearchOutcome {
        let Some(destination) = intent.destination.as_deref() else {
            return HotelSearchOutcome::Error(
                "Missing destination city for hotel search".to_string(),
            );
        };
        let (Some(check_in), Some(check_out)) =
            (intent.check_in.as_deref(), intent.check_out.as_deref())
        else {
            return HotelSearchOutcome::Error(
                "Missing check-in or check-out dates for hotel search".to_string(),
            );
        };

        let city = self.normalize_code(destination);
        tracing::info!(%city, check_in, check_out, "listing hotels in city");

        let summaries = match self.provider.search_hotels_by_city(&city).await {
            Ok(summaries) => summaries,
            Err(err) => {
                tracing::error!(error = %err, "hotel city listing failed");
                return HotelSearchOutcome::Error(format!("Hotel search error: {err}"));
            }
        };
        if summaries.is_empty() {
            return HotelSearchOutcome::Error(format!("No hotels found in city: {city}"));
        }

        let candidates = &summaries[..summaries.len().min(MAX_CANDIDATE_HOTELS)];
        tracing::info!(
            total = summaries.len(),
            candidates = candidates.len(),
            "querying hotel offers"
        );

        let mut offers: Vec<HotelResult> = Vec::new();
        for summary in candidates {
            match self
                .provider
                .search_hotel_offers(&summary.hotel_id, intent.travelers, check_in, check_out)
                .await
            {
                Ok(results) if !results.is_empty() => {
                    tracing::debug!(hotel_id = %summary.hotel_id, "offers found");
                    offers.extend(results);
                    if offers.len() >= OFFER_QUOTA {
                        break;
                    }
                }
                Ok(_) => {}
                Err(err) if err.is_rate_limited() => {
                    tracing::warn!(hotel_id = %summary.hotel_id, "rate limited, backing off");
                    tokio::time::sleep(RATE_LIMIT_BACKOFF).await;
                }
                Err(err) => {
                    tracing::debug!(hotel_id = %summary.hotel_id, error = %err, "skipping hotel");
                }
            }
        }

        if !offers.is_empty() {
            tracing::info!(count = offers.len(), "hotel search succeeded");
            return HotelSearchOutcome::Offers(offers);
        }

        // No offers at all: show what exists in the city, marked unavailable.
        let basic: Vec<HotelResult> = summaries
            .iter()
            .take(BASIC_HOTEL_LIMIT)
            .cloned()
            .map(HotelResult::basic)
            .collect();
        if basic.is_empty() {
            return HotelSearchOutcome::Error(format!(
                "No available hotel offers in {city} for {check_in} to {check_out}."
            ));
        }
        let message = format!(
            "Found {} hotels in {city}, but no pricing/availability for your dates. Here are the hotels:",
            basic.len()
        );
        HotelSearchOutcome::BasicOnly {
            hotels: basic,
            message,
        }
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
    use crate::domain::{HotelSummary, IntentKind};

    fn intent() -> TravelIntent {
        TravelIntent::new(IntentKind::HotelSearch)
            .with_destination("DEL")
            .with_check_in("2030-01-15")
            .with_check_out("2030-01-17")
    }

    fn summary(id: &str) -> HotelSummary {
        HotelSummary {
            hotel_id: id.to_string(),
            name: Some(format!("Hotel {id}")),
            address: None,
            distance: None,
        }
    }

    fn priced(id: &str) -> HotelResult {
        HotelResult {
            hotel: summary(id),
            available: true,
            offers: Vec::new(),
        }
    }

    #[tokio::test]
    async fn stops_once_quota_is_reached() {
        let mut provider = MockTravelProvider::new()
            .with_city_hotels((0..10).map(|i| summary(&format!("H{i}"))).collect());
        // Three offers per hotel: H0 and H1 together cross the quota of 5.
        for id in ["H0", "H1"] {
            provider = provider.push_offer_outcome(Ok(vec![
                priced(id),
                priced(id),
                priced(id),
            ]));
        }
        let calls = provider.clone();

        let outcome = HotelSearchStage::new(Arc::new(provider)).run(&intent()).await;

        match outcome {
            HotelSearchOutcome::Offers(offers) => assert_eq!(offers.len(), 6),
            other => panic!("expected offers, got {other:?}"),
        }
        assert_eq!(calls.offer_calls(), vec!["H0", "H1"]);
    }

    #[tokio::test]
    async fn candidate_walk_is_capped() {
        let provider = MockTravelProvider::new()
            .with_city_hotels((0..40).map(|i| summary(&format!("H{i}"))).collect());
        let calls = provider.clone();

        let outcome = HotelSearchStage::new(Arc::new(provider)).run(&intent()).await;

        // Every candidate came back empty, so the walk visits exactly the cap.
        assert_eq!(calls.offer_calls().len(), MAX_CANDIDATE_HOTELS);
        assert!(matches!(outcome, HotelSearchOutcome::BasicOnly { .. }));
    }

    #[tokio::test]
    async fn rate_limit_pauses_and_continues() {
        tokio::time::pause();
        let provider = MockTravelProvider::new()
            .with_city_hotels(vec![summary("H0"), summary("H1")])
            .push_offer_outcome(Err(MockProviderError::RateLimited))
            .push_offer_outcome(Ok(vec![priced("H1")]));
        let calls = provider.clone();

        let outcome = HotelSearchStage::new(Arc::new(provider)).run(&intent()).await;

        assert!(matches!(outcome, HotelSearchOutcome::Offers(ref o) if o.len() == 1));
        assert_eq!(calls.offer_calls(), vec!["H0", "H1"]);
    }

    #[tokio::test]
    async fn per_hotel_errors_skip_to_the_next_candidate() {
        let provider = MockTravelProvider::new()
            .with_city_hotels(vec![summary("H0"), summary("H1")])
            .push_offer_outcome(Err(MockProviderError::bad_request("no inventory")))
            .push_offer_outcome(Ok(vec![priced("H1")]));

        let outcome = HotelSearchStage::new(Arc::new(provider)).run(&intent()).await;
        assert!(matches!(outcome, HotelSearchOutcome::Offers(ref o) if o.len() == 1));
    }

    #[tokio::test]
    async fn no_offers_returns_basic_hotels() {
        let provider = MockTravelProvider::new()
            .with_city_hotels((0..8).map(|i| summary(&format!("H{i}"))).collect());

        let outcome = HotelSearchStage::new(Arc::new(provider)).run(&intent()).await;

        match outcome {
            HotelSearchOutcome::BasicOnly { hotels, message } => {
                assert_eq!(hotels.len(), BASIC_HOTEL_LIMIT);
                assert!(hotels.iter().all(|h| !h.available && h.offers.is_empty()));
                assert_eq!(
                    message,
                    "Found 5 hotels in DEL, but no pricing/availability for your dates. \
                     Here are the hotels:"
                );
            }
            other => panic!("expected basic-only, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_city_is_an_error() {
        let provider = MockTravelProvider::new().with_city_hotels(Vec::new());
        let outcome = HotelSearchStage::new(Arc::new(provider)).run(&intent()).await;
        assert_eq!(
            outcome,
            HotelSearchOutcome::Error("No hotels found in city: DEL".to_string())
        );
    }

    #[tokio::test]
    async fn city_listing_failure_is_an_error() {
        let provider = MockTravelProvider::new()
            .with_city_hotels_error(MockProviderError::bad_request("unknown city"));
        let outcome = HotelSearchStage::new(Arc::new(provider)).run(&intent()).await;
        match outcome {
            HotelSearchOutcome::Error(msg) => {
                assert!(msg.starts_with("Hotel search error:"), "got: {msg}");
            }
            other => panic!("expected error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_dates_short_circuit() {
        let provider = MockTravelProvider::new();
        let calls = provider.clone();
        let mut bare = intent();
        bare.check_out = None;
        let outcome = HotelSearchStage::new(Arc::new(provider)).run(&bare).await;

        assert_eq!(
            outcome,
            HotelSearchOutcome::Error(
                "Missing check-in or check-out dates for hotel search".to_string()
            )
        );
        assert!(calls.offer_calls().is_empty());
    }
}
