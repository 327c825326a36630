//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `llm` - Intent model implementations (Ollama, mock)
//! - `amadeus` - Travel provider implementation (Amadeus REST API, mock)
//! - `websearch` - Fallback search backends (SearXNG, DuckDuckGo, mock)
//! - `session` - Session storage (in-memory)
//! - `airports` - Local airport dataset and city-name cache
//! - `http` - REST API surface

pub mod airports;
pub mod amadeus;
pub mod http;
pub mod llm;
pub mod session;
pub mod websearch;
