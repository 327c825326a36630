//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the orchestration engine and the outside world. Adapters implement them.
//!
//! - `IntentModel` - structured intent decoding via the LLM collaborator
//! - `TravelProvider` - flight/hotel search against the data provider
//! - `SearchBackend` - one backend in the web-search fallback cascade
//! - `SessionStore` - multi-turn session persistence
//! - `AirportResolver` - free-text location to IATA code resolution

mod airport_resolver;
mod intent_model;
mod session_store;
mod travel_provider;
mod web_search;

pub use airport_resolver::AirportResolver;
pub use intent_model::{IntentModel, IntentModelError, RawTravelIntent};
pub use session_store::{Session, SessionStore};
pub use travel_provider::{
    LocationAddress, LocationInfo, LocationType, ProviderError, ProviderErrorDetail,
    TravelProvider, SYSTEM_UNAVAILABLE_CODE,
};
pub use web_search::{SearchBackend, SearchBackendError, SearchHit};
