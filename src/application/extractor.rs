//! Intent Extractor - turns a query plus recent history into a typed intent.
//!
//! Delegates structured decoding to the IntentModel port, then runs the
//! deterministic post-processing that makes the result trustworthy:
//!
//! 1. hotel origin/destination swap (the model sometimes puts a requested
//!    city in the wrong field for hotel searches),
//! 2. the per-intent completeness check, downgrading to clarify with a
//!    "Missing: …" reasoning,
//! 3. the past-date guard on `check_in`, which runs unconditionally.
//!
//! The output is always a fully-formed intent; a search kind that leaves
//! this type carries every field its policy requires.

use chrono::{Duration, Local, NaiveDate};
use std::sync::Arc;

use crate::domain::{ConversationTurn, IntentKind, Role, TravelIntent};
use crate::ports::{IntentModel, IntentModelError};

/// How many trailing history turns are embedded into the prompt.
const HISTORY_WINDOW: usize = 4;

/// Intent extractor over the LLM collaborator.
pub struct IntentExtractor {
    model: Arc<dyn IntentModel>,
}

impl IntentExtractor {
    /// Creates an extractor over the given model.
    pub fn new(model: Arc<dyn IntentModel>) -> Self {
        Self { model }
    }

    /// Extracts a fully-formed travel intent for the query.
    pub async fn extract(
        &self,
        query: &str,
        history: &[ConversationTurn],
    ) -> Result<TravelIntent, IntentModelError> {
        let today = Local::now().date_naive();
        let prompt = build_prompt(query, history, today);

        let raw = self.model.extract_intent(&prompt).await?;
        let intent = post_process(raw.normalize(), today);

        if intent.intent == IntentKind::Clarify {
            tracing::info!(reasoning = %intent.reasoning, "intent downgraded to clarify");
        }

        Ok(intent)
    }
}

/// Deterministic post-processing; identical regardless of model output shape.
pub fn post_process(mut intent: TravelIntent, today: NaiveDate) -> TravelIntent {
    // The model sometimes places the hotel city in `origin`.
    if intent.intent == IntentKind::HotelSearch
        && intent.origin.is_some()
        && intent.destination.is_none()
    {
        intent.destination = intent.origin.take();
    }

    let missing = intent.missing_requirements();
    if !missing.is_empty() {
        let reasoning = format!("Missing: {}", missing.join(", "));
        tracing::warn!(kind = ?intent.intent, %reasoning, "intent validation failed");
        intent = intent.into_clarify(reasoning);
    }

    // Past-date guard runs even when nothing was flagged missing.
    if let Some(violation) = intent.check_in_violation(today) {
        intent = intent.into_clarify(violation.reasoning());
    }

    intent
}

/// Builds the extraction prompt with resolved dates, history, and rules.
pub fn build_prompt(query: &str, history: &[ConversationTurn], today: NaiveDate) -> String {
    let tomorrow = today + Duration::days(1);
    let next_week = today + Duration::days(7);

    let mut context = String::new();
    if !history.is_empty() {
        context.push_str("\n\nPrevious conversation:\n");
        let start = history.len().saturating_sub(HISTORY_WINDOW);
        for turn in &history[start..] {
            let role = match turn.role {
                Role::User => "user",
                Role::Assistant => "assistant",
            };
            context.push_str(&format!("{}: {}\n", role, turn.content));
        }
    }

    format!(
        r#"
Extract structured travel intent from the user query.
Use intent=clarify if anything required is missing.
Use intent=follow_up if the user is asking about previous results or making modifications to a previous query.

{context}

**IMPORTANT RULES:**
1. Return all dates in ISO format (YYYY-MM-DD).
   - If the user says "tomorrow", use: {tomorrow}
   - If the user says "today", use: {today}
   - If the user says "next week", use: {next_week}
   - If the user says "in X days/nights", calculate from today ({today}).

2. Field usage by intent type:
   - **flight_search**: origin = departure airport, destination = arrival airport, check_in = departure date
   - **hotel_search**: destination = hotel city code (NOT origin!), check_in = check-in date, check_out = check-out date
   - **both**: origin = departure, destination = arrival/hotel city, check_in = departure/check-in, check_out = check-out
   - **follow_up**: Extract any new parameters while keeping context from previous query

3. For hotel searches, ALWAYS put the city in the "destination" field, NOT "origin".

4. If user query is incomplete or ambiguous, use intent=clarify and explain what's missing in reasoning.

5. Common airport codes: Mumbai=BOM, Delhi=DEL, Bangalore=BLR, Chennai=MAA, Kolkata=CCU

Current Query: {query}
"#
    )
}
