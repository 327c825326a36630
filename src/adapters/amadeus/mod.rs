//! Amadeus adapters implementing the TravelProvider port.

mod client;
mod mock;

pub use client::{AmadeusClient, AmadeusConfig};
pub use mock::{MockProviderError, MockTravelProvider};
