//! Query endpoint module: DTOs, handlers, and routes.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::QueryAppState;
pub use routes::query_routes;
