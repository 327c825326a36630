//! Query pipeline: extraction, routing, search, and synthesis for one turn.
//!
//! Owns the stage objects and drives them according to the two routing
//! decisions. The response field of the per-turn state is write-once, so a
//! stage that fails gets to keep its error text even though synthesis still
//! runs afterwards; the one exception is the basic-hotels notice, which is
//! prepended to the synthesized listing instead of replacing it.

use crate::domain::{ConversationTurn, FlightOffer, HotelResult, OrchestrationState, TravelIntent};

use super::clarify::clarify_response;
use super::extractor::IntentExtractor;
use super::fallback::WebSearchCascade;
use super::flight_search::{FlightSearchOutcome, FlightSearchStage};
use super::hotel_search::{HotelSearchOutcome, HotelSearchStage};
use super::router::{route_after_flight_search, route_after_intent, Route};
use super::synthesis::Synthesizer;

/// Response when intent extraction itself fails.
const EXTRACTION_FAILED: &str =
    "Sorry, I couldn't process your request right now. Please try again.";

/// Results carried over from the session's previous turn.
#[derive(Debug, Clone, Default)]
pub struct PriorResults {
    pub flights: Option<Vec<FlightOffer>>,
    pub hotels: Option<Vec<HotelResult>>,
}

/// Everything one turn produced.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub response: String,
    pub intent: Option<TravelIntent>,
    pub flights: Vec<FlightOffer>,
    pub hotels: Vec<HotelResult>,
}

impl PipelineOutput {
    /// True when this turn produced flight data.
    pub fn used_flight_api(&self) -> bool {
        !self.flights.is_empty()
    }

    /// True when this turn produced hotel data.
    pub fn used_hotel_api(&self) -> bool {
        !self.hotels.is_empty()
    }
}

/// The per-query orchestration pipeline.
pub struct Pipeline {
    extractor: IntentExtractor,
    flights: FlightSearchStage,
    hotels: HotelSearchStage,
    fallback: WebSearchCascade,
    synthesizer: Synthesizer,
}

impl Pipeline {
    /// Assembles the pipeline from its stages.
    pub fn new(
        extractor: IntentExtractor,
        flights: FlightSearchStage,
        hotels: HotelSearchStage,
        fallback: WebSearchCascade,
        synthesizer: Synthesizer,
    ) -> Self {
        Self {
            extractor,
            flights,
            hotels,
            fallback,
            synthesizer,
        }
    }

    /// Runs one turn end to end; always produces response text.
    pub async fn run(
        &self,
        query: &str,
        history: Vec<ConversationTurn>,
        prior: PriorResults,
    ) -> PipelineOutput {
        let mut state = OrchestrationState::new(query, history);

        match self.extractor.extract(&state.query, &state.conversation_history).await {
            Ok(intent) => state.record_intent(intent),
            Err(err) => {
                tracing::error!(error = %err, "intent extraction failed");
                state.set_response(EXTRACTION_FAILED);
            }
        }

        // The notice shown above the listing when only bare hotels matched.
        let mut hotel_notice: Option<String> = None;

        if state.response.is_none() {
            match route_after_intent(&state) {
                Route::Clarify => {
                    state.set_response(clarify_response(state.intent.as_ref()));
                }
                Route::Synthesis => {
                    // Follow-up: re-synthesize over the previous turn's results.
                    if let Some(flights) = prior.flights {
                        state.record_flights(flights);
                    }
                    if let Some(hotels) = prior.hotels {
                        state.record_hotels(hotels);
                    }
                    self.synthesize(&mut state, None).await;
                }
                Route::HotelSearch => {
                    self.run_hotels(&mut state, &mut hotel_notice).await;
                    self.synthesize(&mut state, hotel_notice.take()).await;
                }
                Route::FlightSearch => {
                    self.run_flights(&mut state).await;
                    match route_after_flight_search(&state) {
                        Route::WebSearchFallback => {
                            let search_query =
                                state.fallback_search_query.clone().unwrap_or_default();
                            let text = self
                                .fallback
                                .run(&search_query, state.intent.as_ref())
                                .await;
                            state.set_response(text);
                        }
                        Route::HotelSearch => {
                            self.run_hotels(&mut state, &mut hotel_notice).await;
                            self.synthesize(&mut state, hotel_notice.take()).await;
                        }
                        _ => self.synthesize(&mut state, None).await,
                    }
                }
                Route::WebSearchFallback => unreachable!("fallback is never the first route"),
            }
        }

        let response = state
            .response
            .take()
            .unwrap_or_else(|| "No results available for your search.".to_string());

        PipelineOutput {
            response,
            intent: state.intent,
            flights: state.flights.unwrap_or_default(),
            hotels: state.hotels.unwrap_or_default(),
        }
    }

    async fn run_flights(&self, state: &mut OrchestrationState) {
        let Some(intent) = state.intent.clone() else {
            return;
        };
        match self.flights.run(&intent).await {
            FlightSearchOutcome::Found(flights) => state.record_flights(flights),
            FlightSearchOutcome::Error(message) => {
                state.record_flights(Vec::new());
                state.set_response(message);
            }
            FlightSearchOutcome::Outage { search_query } => {
                state.record_flights(Vec::new());
                state.arm_fallback(search_query);
            }
        }
    }

    async fn run_hotels(&self, state: &mut OrchestrationState, notice: &mut Option<String>) {
        let Some(intent) = state.intent.clone() else {
            return;
        };
        match self.hotels.run(&intent).await {
            HotelSearchOutcome::Offers(hotels) => state.record_hotels(hotels),
            HotelSearchOutcome::BasicOnly { hotels, message } => {
                state.record_hotels(hotels);
                *notice = Some(message);
            }
            HotelSearchOutcome::Error(message) => {
                state.record_hotels(Vec::new());
                state.set_response(message);
            }
        }
    }

    async fn synthesize(&self, state: &mut OrchestrationState, notice: Option<String>) {
        let rendered = self
            .synthesizer
            .render(state.flights(), state.hotels())
            .await;
        let text = match notice {
            Some(notice) => format!("{notice}\n\n{rendered}"),
            None => rendered,
        };
        state.set_response(text);
    }
}
