//! HTTP handlers for the query endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::adapters::http::validation::{sanitize_query, validate_session_id};
use crate::application::{Pipeline, PriorResults};
use crate::domain::ConversationTurn;
use crate::ports::SessionStore;

use super::dto::{ErrorResponse, MessageResponse, QueryRequest, QueryResponse};

/// Application state for the query endpoints.
#[derive(Clone)]
pub struct QueryAppState {
    pub pipeline: Arc<Pipeline>,
    pub sessions: Arc<dyn SessionStore>,
}

/// POST /query - Run one conversational turn.
pub async fn handle_query(
    State(state): State<QueryAppState>,
    Json(req): Json<QueryRequest>,
) -> Response {
    let query = match sanitize_query(&req.query) {
        Ok(query) => query,
        Err(err) => {
            tracing::warn!(error = %err, "query rejected");
            return (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(err.to_string())))
                .into_response();
        }
    };

    if let Some(id) = req.session_id.as_deref() {
        if !validate_session_id(id) {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new("Invalid session ID format")),
            )
                .into_response();
        }
    }

    let mut session = state.sessions.get_or_create(req.session_id.as_deref()).await;
    session.push_turn(ConversationTurn::user(query.clone()));

    let prior = PriorResults {
        flights: session.last_flights.clone(),
        hotels: session.last_hotels.clone(),
    };
    let output = state
        .pipeline
        .run(&query, session.conversation_history.clone(), prior)
        .await;

    session.push_turn(ConversationTurn::assistant(output.response.clone()));
    session.last_intent = output.intent.clone();
    session.last_flights = Some(output.flights.clone());
    session.last_hotels = Some(output.hotels.clone());
    state.sessions.update(session.clone()).await;

    let response = QueryResponse {
        answer: output.response.clone(),
        session_id: session.session_id,
        used_flight_api: output.used_flight_api(),
        used_hotel_api: output.used_hotel_api(),
        intent: output.intent,
        conversation_history: session.conversation_history,
    };
    (StatusCode::OK, Json(response)).into_response()
}

/// GET /session/:session_id - Full session state.
pub async fn get_session(
    State(state): State<QueryAppState>,
    Path(session_id): Path<String>,
) -> Response {
    match state.sessions.get(&session_id).await {
        Some(session) => (StatusCode::OK, Json(session)).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("Session not found")),
        )
            .into_response(),
    }
}

/// DELETE /session/:session_id - Discard a session.
pub async fn clear_session(
    State(state): State<QueryAppState>,
    Path(session_id): Path<String>,
) -> Response {
    if state.sessions.delete(&session_id).await {
        (
            StatusCode::OK,
            Json(MessageResponse {
                message: "Session cleared".to_string(),
            }),
        )
            .into_response()
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("Session not found")),
        )
            .into_response()
    }
}

/// GET /health - Liveness probe.
pub async fn health_check() -> Response {
    (StatusCode::OK, Json(json!({"status": "healthy"}))).into_response()
}
