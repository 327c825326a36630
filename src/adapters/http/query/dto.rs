//! HTTP DTOs for the query endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::{ConversationTurn, TravelIntent};

/// Request body for POST /query.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryRequest {
    pub query: String,
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Response body for POST /query.
#[derive(Debug, Clone, Serialize)]
pub struct QueryResponse {
    pub answer: String,
    pub session_id: String,
    pub intent: Option<TravelIntent>,
    pub used_flight_api: bool,
    pub used_hotel_api: bool,
    pub conversation_history: Vec<ConversationTurn>,
}

/// Error payload; matches the `detail` shape clients already parse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

impl ErrorResponse {
    /// Creates an error payload.
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// Acknowledgement body for DELETE /session/:id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_request_session_id_is_optional() {
        let req: QueryRequest = serde_json::from_str(r#"{"query": "hi"}"#).unwrap();
        assert_eq!(req.query, "hi");
        assert!(req.session_id.is_none());
    }

    #[test]
    fn error_response_serializes_detail() {
        let json = serde_json::to_string(&ErrorResponse::new("Session not found")).unwrap();
        assert_eq!(json, r#"{"detail":"Session not found"}"#);
    }
}
