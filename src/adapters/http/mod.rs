//! HTTP adapter - the REST surface over the query pipeline.

pub mod query;
pub mod validation;

pub use query::{query_routes, QueryAppState};
