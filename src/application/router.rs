//! Routing decisions between pipeline stages.
//!
//! Two pure functions drive the control flow: one picks the stage after
//! intent extraction, the other picks the stage after flight search. Keeping
//! these as plain functions over the state makes the flow testable without
//! any adapters.

use crate::domain::{IntentKind, OrchestrationState};

/// Where the pipeline goes after intent extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    FlightSearch,
    HotelSearch,
    WebSearchFallback,
    Synthesis,
    Clarify,
}

/// Routes on the extracted intent kind.
///
/// Searches that include a flight leg always start with the flight stage;
/// follow-ups skip straight to synthesis over whatever the session already
/// holds; anything unresolved asks the user.
pub fn route_after_intent(state: &OrchestrationState) -> Route {
    match state.intent.as_ref().map(|i| i.intent) {
        Some(IntentKind::FlightSearch) | Some(IntentKind::Both) => Route::FlightSearch,
        Some(IntentKind::HotelSearch) => Route::HotelSearch,
        Some(IntentKind::FollowUp) => Route::Synthesis,
        _ => Route::Clarify,
    }
}

/// Routes after the flight stage has run.
///
/// An armed fallback takes precedence over everything else, including the
/// hotel leg of a combined search: a provider outage means hotel results
/// would come from the same dead backend, so the turn pivots entirely to
/// the web search cascade.
pub fn route_after_flight_search(state: &OrchestrationState) -> Route {
    if state.use_web_search_fallback {
        return Route::WebSearchFallback;
    }
    match state.intent.as_ref().map(|i| i.intent) {
        Some(IntentKind::Both) => Route::HotelSearch,
        _ => Route::Synthesis,
    }
}
