//! Web-search adapters implementing the SearchBackend port.

mod duckduckgo;
mod mock;
mod searxng;

pub use duckduckgo::DuckDuckGoBackend;
pub use mock::{MockSearchBackend, MockSearchBehavior};
pub use searxng::SearxngBackend;
