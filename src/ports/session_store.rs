//! Session Store Port - Interface for multi-turn session persistence.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{ConversationTurn, FlightOffer, HotelResult, TravelIntent};

/// Port for session storage, keyed by session id.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the existing session or creates a fresh one.
    ///
    /// A supplied id that does not exist seeds the new session's id; no id
    /// generates one.
    async fn get_or_create(&self, session_id: Option<&str>) -> Session;

    /// Persists the session.
    async fn update(&self, session: Session);

    /// Deletes the session; true when it existed.
    async fn delete(&self, session_id: &str) -> bool;

    /// Fetches the session, if present.
    async fn get(&self, session_id: &str) -> Option<Session>;
}

/// A multi-turn conversation session.
///
/// Holds the append-only conversation history plus the raw results of the
/// last pipeline run, which follow-up turns re-synthesize from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub session_id: String,
    #[serde(default)]
    pub conversation_history: Vec<ConversationTurn>,
    #[serde(default)]
    pub last_intent: Option<TravelIntent>,
    #[serde(default)]
    pub last_flights: Option<Vec<FlightOffer>>,
    #[serde(default)]
    pub last_hotels: Option<Vec<HotelResult>>,
    pub created_at: String,
}

impl Session {
    /// Creates an empty session with the given id.
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            conversation_history: Vec::new(),
            last_intent: None,
            last_flights: None,
            last_hotels: None,
            created_at: chrono::Local::now().to_rfc3339(),
        }
    }

    /// Appends a turn to the conversation history.
    pub fn push_turn(&mut self, turn: ConversationTurn) {
        self.conversation_history.push(turn);
    }
}
