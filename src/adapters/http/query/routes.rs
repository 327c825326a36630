//! Axum router for the query endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};

use super::handlers::{clear_session, get_session, handle_query, health_check, QueryAppState};

/// Creates the API router.
///
/// # Routes
///
/// - `POST /query` - Run one conversational turn
/// - `GET /session/:session_id` - Fetch full session state
/// - `DELETE /session/:session_id` - Discard a session
/// - `GET /health` - Liveness probe
pub fn query_routes(state: QueryAppState) -> Router {
    Router::new()
        .route("/query", post(handle_query))
        .route("/session/:session_id", get(get_session))
        .route("/session/:session_id", delete(clear_session))
        .route("/health", get(health_check))
        .with_state(state)
}
