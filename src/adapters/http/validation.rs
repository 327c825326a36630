//! Input validation for the query endpoint.
//!
//! Sanitizes free-text queries before they reach the pipeline: length cap,
//! script/injection pattern rejection, and whitespace normalization.
//! Session ids must be UUIDs.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use uuid::Uuid;

/// Maximum accepted query length, in characters.
const MAX_QUERY_LEN: usize = 1000;

static BLOCKED_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"<script>",
        r"javascript:",
        r"onerror=",
        r"onclick=",
        r"eval\(",
        r"exec\(",
        r"__import__",
    ]
    .iter()
    .map(|p| Regex::new(&format!("(?i){p}")).expect("invalid blocked pattern"))
    .collect()
});

static SQL_INJECTION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)('\s*OR\s*'1'\s*=\s*'1)",
        r"(?i)(\bDROP\s+TABLE\b)",
        r"(?i)(\bUNION\s+SELECT\b)",
        r"(--\s*$)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("invalid injection pattern"))
    .collect()
});

/// Why a query was rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryValidationError {
    #[error("Query cannot be empty")]
    Empty,

    #[error("Query too long (max {MAX_QUERY_LEN} characters)")]
    TooLong,

    #[error("Query contains potentially malicious content")]
    MaliciousContent,

    #[error("Query contains invalid characters")]
    InvalidCharacters,
}

/// Sanitizes a user query, normalizing whitespace.
pub fn sanitize_query(query: &str) -> Result<String, QueryValidationError> {
    if query.is_empty() {
        return Err(QueryValidationError::Empty);
    }
    if query.chars().count() > MAX_QUERY_LEN {
        return Err(QueryValidationError::TooLong);
    }

    for pattern in BLOCKED_PATTERNS.iter() {
        if pattern.is_match(query) {
            tracing::warn!(pattern = %pattern, "blocked malicious query pattern");
            return Err(QueryValidationError::MaliciousContent);
        }
    }
    for pattern in SQL_INJECTION_PATTERNS.iter() {
        if pattern.is_match(query) {
            tracing::warn!(pattern = %pattern, "blocked injection attempt");
            return Err(QueryValidationError::InvalidCharacters);
        }
    }

    Ok(query.split_whitespace().collect::<Vec<_>>().join(" "))
}

/// True when the session id is absent or a well-formed UUID.
pub fn validate_session_id(session_id: &str) -> bool {
    if session_id.is_empty() {
        return true;
    }
    Uuid::parse_str(session_id).is_ok()
}
