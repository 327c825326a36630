//! Intent Model Port - Interface for the LLM collaborator.
//!
//! The model receives a fully built prompt and structurally decodes it into
//! the travel-intent shape. The returned value is deliberately loose: every
//! field is optional and tolerant of the model placing values in the wrong
//! slot, because the extractor's deterministic post-processing is the single
//! place where the shape is normalized and enforced.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{IntentKind, TravelIntent};

/// Port for structured intent extraction via a language model.
#[async_trait]
pub trait IntentModel: Send + Sync {
    /// Decodes the prompt into a raw travel intent.
    async fn extract_intent(&self, prompt: &str) -> Result<RawTravelIntent, IntentModelError>;
}

/// Loosely-typed intent as produced by the model, before normalization.
///
/// Mirrors the intent field set with everything optional; unknown or absent
/// values are resolved to defaults by [`RawTravelIntent::normalize`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawTravelIntent {
    #[serde(default)]
    pub intent: Option<IntentKind>,
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub check_in: Option<String>,
    #[serde(default)]
    pub check_out: Option<String>,
    #[serde(default)]
    pub travelers: Option<u32>,
    #[serde(default)]
    pub reasoning: Option<String>,
}

impl RawTravelIntent {
    /// Normalizes into a fully-formed intent.
    ///
    /// A missing or unrecognized kind becomes clarify; empty strings become
    /// absent fields; traveller count defaults to 1.
    pub fn normalize(self) -> TravelIntent {
        TravelIntent {
            intent: self.intent.unwrap_or(IntentKind::Clarify),
            origin: non_empty(self.origin),
            destination: non_empty(self.destination),
            check_in: non_empty(self.check_in),
            check_out: non_empty(self.check_out),
            travelers: self.travelers.unwrap_or(1).max(1),
            reasoning: self.reasoning.unwrap_or_default(),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Intent model errors.
#[derive(Debug, thiserror::Error)]
pub enum IntentModelError {
    /// Model endpoint is unreachable or returned a server error.
    #[error("model unavailable: {0}")]
    Unavailable(String),

    /// Network error during the request.
    #[error("network error: {0}")]
    Network(String),

    /// Model output could not be decoded into the intent shape.
    #[error("parse error: {0}")]
    Parse(String),

    /// Request exceeded the configured timeout.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },
}

impl IntentModelError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Returns true if retrying against the same endpoint could help.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            IntentModelError::Unavailable(_)
                | IntentModelError::Network(_)
                | IntentModelError::Timeout { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_defaults_missing_kind_to_clarify() {
        let intent = RawTravelIntent::default().normalize();
        assert_eq!(intent.intent, IntentKind::Clarify);
        assert_eq!(intent.travelers, 1);
    }

    #[test]
    fn normalize_drops_blank_fields() {
        let raw = RawTravelIntent {
            intent: Some(IntentKind::FlightSearch),
            origin: Some("  ".to_string()),
            destination: Some("DEL".to_string()),
            ..Default::default()
        };
        let intent = raw.normalize();
        assert!(intent.origin.is_none());
        assert_eq!(intent.destination.as_deref(), Some("DEL"));
    }

    #[test]
    fn normalize_floors_travelers_at_one() {
        let raw = RawTravelIntent {
            travelers: Some(0),
            ..Default::default()
        };
        assert_eq!(raw.normalize().travelers, 1);
    }

    #[test]
    fn raw_intent_decodes_loose_json() {
        let raw: RawTravelIntent = serde_json::from_str(
            r#"{"intent": "hotel_search", "destination": "DEL", "travelers": 2}"#,
        )
        .unwrap();
        assert_eq!(raw.intent, Some(IntentKind::HotelSearch));
        assert_eq!(raw.travelers, Some(2));
        assert!(raw.check_in.is_none());
    }

    #[test]
    fn error_retryable_classification() {
        assert!(IntentModelError::unavailable("down").is_retryable());
        assert!(IntentModelError::network("reset").is_retryable());
        assert!(IntentModelError::Timeout { timeout_secs: 30 }.is_retryable());
        assert!(!IntentModelError::parse("bad json").is_retryable());
    }
}
