//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `conversation` - Conversation history turns
//! - `intent` - Travel intent tagged union and completeness policy
//! - `offers` - Provider wire shapes for flight and hotel results
//! - `state` - Per-query orchestration state

pub mod conversation;
pub mod intent;
pub mod offers;
pub mod state;

pub use conversation::{ConversationTurn, Role};
pub use intent::{DateViolation, IntentKind, TravelIntent};
pub use offers::{
    Cancellation, Distance, FlightEndpoint, FlightOffer, FlightSegment, HotelAddress, HotelResult,
    HotelSummary, Itinerary, OfferPrice, Policies, Room, RoomOffer, RoomTypeEstimated, TextBlock,
};
pub use state::OrchestrationState;
