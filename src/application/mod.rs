//! Application layer: the query orchestration pipeline and its stages.

pub mod clarify;
pub mod extractor;
pub mod fallback;
pub mod flight_search;
pub mod hotel_search;
pub mod pipeline;
pub mod router;
pub mod synthesis;

pub use clarify::clarify_response;
pub use extractor::IntentExtractor;
pub use fallback::WebSearchCascade;
pub use flight_search::{FlightSearchOutcome, FlightSearchStage};
pub use hotel_search::{HotelSearchOutcome, HotelSearchStage};
pub use pipeline::{Pipeline, PipelineOutput, PriorResults};
pub use router::{route_after_flight_search, route_after_intent, Route};
pub use synthesis::Synthesizer;
