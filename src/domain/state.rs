//! Per-query orchestration state.

use serde::{Deserialize, Serialize};

use super::conversation::ConversationTurn;
use super::intent::TravelIntent;
use super::offers::{FlightOffer, HotelResult};

/// Mutable record threaded through the pipeline for one query.
///
/// Created fresh per query; each stage appends its output and no stage may
/// overwrite an earlier one. `response` is write-once: the first terminal
/// stage to produce text wins and later writes are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestrationState {
    pub query: String,
    pub conversation_history: Vec<ConversationTurn>,
    pub intent: Option<TravelIntent>,
    pub flights: Option<Vec<FlightOffer>>,
    pub hotels: Option<Vec<HotelResult>>,
    pub response: Option<String>,
    pub use_web_search_fallback: bool,
    pub fallback_search_query: Option<String>,
}

impl OrchestrationState {
    /// Creates state for a new query with the caller-owned history.
    pub fn new(query: impl Into<String>, conversation_history: Vec<ConversationTurn>) -> Self {
        Self {
            query: query.into(),
            conversation_history,
            intent: None,
            flights: None,
            hotels: None,
            response: None,
            use_web_search_fallback: false,
            fallback_search_query: None,
        }
    }

    /// Records the extracted intent.
    pub fn record_intent(&mut self, intent: TravelIntent) {
        self.intent = Some(intent);
    }

    /// Records flight results.
    pub fn record_flights(&mut self, flights: Vec<FlightOffer>) {
        self.flights = Some(flights);
    }

    /// Records hotel results.
    pub fn record_hotels(&mut self, hotels: Vec<HotelResult>) {
        self.hotels = Some(hotels);
    }

    /// Sets the response text; first write wins.
    pub fn set_response(&mut self, text: impl Into<String>) {
        if self.response.is_none() {
            self.response = Some(text.into());
        }
    }

    /// Arms the web-search fallback with a synthesized query.
    pub fn arm_fallback(&mut self, search_query: impl Into<String>) {
        self.use_web_search_fallback = true;
        self.fallback_search_query = Some(search_query.into());
    }

    /// Flight offers recorded so far, empty slice when none.
    pub fn flights(&self) -> &[FlightOffer] {
        self.flights.as_deref().unwrap_or_default()
    }

    /// Hotel results recorded so far, empty slice when none.
    pub fn hotels(&self) -> &[HotelResult] {
        self.hotels.as_deref().unwrap_or_default()
    }
}
