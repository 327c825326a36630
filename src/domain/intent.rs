//! Travel intent types and the completeness policy.
//!
//! `TravelIntent` is the typed result of intent extraction. The completeness
//! policy (`missing_requirements`) and the past-date guard decide whether an
//! intent is actionable or must be downgraded to a clarification request.
//! The downgrade itself is an explicit transition (`into_clarify`) so the
//! kind and reasoning can never be rewritten independently of each other.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// What the user is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentKind {
    /// Search flights between two airports on a date.
    FlightSearch,
    /// Search hotels in a city for a date range.
    HotelSearch,
    /// Flight and hotel combined.
    Both,
    /// Required information is missing; ask the user for it.
    Clarify,
    /// Refinement of or question about a previous turn's results.
    FollowUp,
}

impl IntentKind {
    /// Returns true if this kind triggers a provider search.
    pub fn is_search(self) -> bool {
        matches!(
            self,
            IntentKind::FlightSearch | IntentKind::HotelSearch | IntentKind::Both
        )
    }
}

/// Structured travel intent produced by the extractor.
///
/// Invariant: once an intent has passed through post-processing, a search
/// kind always carries the fields its policy requires; anything incomplete
/// has been downgraded to [`IntentKind::Clarify`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelIntent {
    pub intent: IntentKind,
    /// Departure location code (IATA-like) for flight searches.
    pub origin: Option<String>,
    /// Arrival airport or hotel city code.
    pub destination: Option<String>,
    /// Departure date for flights, check-in date for hotels (ISO).
    pub check_in: Option<String>,
    /// Check-out date for hotel stays (ISO).
    pub check_out: Option<String>,
    /// Number of travellers, at least 1.
    pub travelers: u32,
    /// Free-text rationale; carries the "Missing: …" message for clarify.
    pub reasoning: String,
}

impl TravelIntent {
    /// Creates an intent of the given kind with no fields set.
    pub fn new(intent: IntentKind) -> Self {
        Self {
            intent,
            origin: None,
            destination: None,
            check_in: None,
            check_out: None,
            travelers: 1,
            reasoning: String::new(),
        }
    }

    /// Creates a clarify intent carrying only a reasoning message.
    pub fn clarify(reasoning: impl Into<String>) -> Self {
        Self {
            reasoning: reasoning.into(),
            ..Self::new(IntentKind::Clarify)
        }
    }

    /// Sets the origin.
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Sets the destination.
    pub fn with_destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    /// Sets the check-in / departure date.
    pub fn with_check_in(mut self, date: impl Into<String>) -> Self {
        self.check_in = Some(date.into());
        self
    }

    /// Sets the check-out date.
    pub fn with_check_out(mut self, date: impl Into<String>) -> Self {
        self.check_out = Some(date.into());
        self
    }

    /// Sets the traveller count.
    pub fn with_travelers(mut self, travelers: u32) -> Self {
        self.travelers = travelers.max(1);
        self
    }

    /// Downgrades this intent to clarify, replacing the reasoning.
    ///
    /// Known fields are kept so the clarification prompt can show what the
    /// user already provided; the kind and reasoning change together.
    pub fn into_clarify(mut self, reasoning: impl Into<String>) -> Self {
        self.intent = IntentKind::Clarify;
        self.reasoning = reasoning.into();
        self
    }

    /// Collects every requirement this intent is missing, in policy order.
    ///
    /// Returns human-readable item names ready to be comma-joined into the
    /// clarify reasoning. Empty means the intent is actionable as-is.
    pub fn missing_requirements(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        match self.intent {
            IntentKind::FlightSearch => {
                if !present(&self.origin) {
                    missing.push("departure city/airport");
                }
                if !present(&self.destination) {
                    missing.push("arrival city/airport");
                }
                if present(&self.origin)
                    && present(&self.destination)
                    && self.origin == self.destination
                {
                    missing.push("arrival city/airport (cannot be same as departure)");
                }
                if !present(&self.check_in) {
                    missing.push("departure/travel date");
                }
            }
            IntentKind::HotelSearch => {
                if !present(&self.destination) {
                    missing.push("destination city");
                }
                if !present(&self.check_in) {
                    missing.push("check-in date");
                }
                if !present(&self.check_out) {
                    missing.push("check-out date");
                }
            }
            IntentKind::Both => {
                if !present(&self.origin) {
                    missing.push("departure city/airport");
                }
                if !present(&self.destination) {
                    missing.push("destination city");
                }
                if !present(&self.check_in) {
                    missing.push("check-in/departure date");
                }
                if !present(&self.check_out) {
                    missing.push("check-out date");
                }
            }
            // Clarify is already terminal; follow_up defers to prior context.
            IntentKind::Clarify | IntentKind::FollowUp => {}
        }
        missing
    }

    /// Outcome of the past-date guard on `check_in`.
    ///
    /// Runs unconditionally for any intent carrying a check-in value: a date
    /// strictly before `today` or one that fails to parse as ISO forces a
    /// clarify downgrade.
    pub fn check_in_violation(&self, today: NaiveDate) -> Option<DateViolation> {
        let raw = self.check_in.as_deref().filter(|s| !s.is_empty())?;
        match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Ok(date) if date < today => Some(DateViolation::InPast),
            Ok(_) => None,
            Err(_) => Some(DateViolation::Unparseable),
        }
    }
}

/// Why a check-in date was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateViolation {
    /// Parsed fine but lies strictly before today.
    InPast,
    /// Not a valid ISO calendar date.
    Unparseable,
}

impl DateViolation {
    /// The clarify reasoning for this violation.
    pub fn reasoning(self) -> &'static str {
        match self {
            DateViolation::InPast => "Check-in/departure date cannot be in the past",
            DateViolation::Unparseable => "Invalid date format. Please provide a valid date.",
        }
    }
}

fn present(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn today() -> NaiveDate {
        chrono::Local::now().date_naive()
    }

    #[test]
    fn flight_search_with_all_fields_is_complete() {
        let intent = TravelIntent::new(IntentKind::FlightSearch)
            .with_origin("BOM")
            .with_destination("DEL")
            .with_check_in("2030-01-15");
        assert!(intent.missing_requirements().is_empty());
    }

    #[test]
    fn flight_search_missing_everything_lists_all_items() {
        let intent = TravelIntent::new(IntentKind::FlightSearch);
        assert_eq!(
            intent.missing_requirements(),
            vec![
                "departure city/airport",
                "arrival city/airport",
                "departure/travel date"
            ]
        );
    }

    #[test]
    fn same_origin_and_destination_is_flagged() {
        let intent = TravelIntent::new(IntentKind::FlightSearch)
            .with_origin("BOM")
            .with_destination("BOM")
            .with_check_in("2030-01-15");
        assert_eq!(
            intent.missing_requirements(),
            vec!["arrival city/airport (cannot be same as departure)"]
        );
    }

    #[test]
    fn hotel_search_requires_destination_and_both_dates() {
        let intent = TravelIntent::new(IntentKind::HotelSearch).with_destination("DEL");
        assert_eq!(
            intent.missing_requirements(),
            vec!["check-in date", "check-out date"]
        );
    }

    #[test]
    fn both_requires_four_fields() {
        let intent = TravelIntent::new(IntentKind::Both);
        assert_eq!(
            intent.missing_requirements(),
            vec![
                "departure city/airport",
                "destination city",
                "check-in/departure date",
                "check-out date"
            ]
        );
    }

    #[test]
    fn clarify_and_follow_up_have_no_requirements() {
        assert!(TravelIntent::new(IntentKind::Clarify)
            .missing_requirements()
            .is_empty());
        assert!(TravelIntent::new(IntentKind::FollowUp)
            .missing_requirements()
            .is_empty());
    }

    #[test]
    fn empty_string_fields_count_as_missing() {
        let intent = TravelIntent::new(IntentKind::HotelSearch)
            .with_destination("")
            .with_check_in("2030-01-15")
            .with_check_out("2030-01-17");
        assert_eq!(intent.missing_requirements(), vec!["destination city"]);
    }

    #[test]
    fn past_check_in_violates_guard() {
        let yesterday = today() - chrono::Duration::days(1);
        let intent = TravelIntent::new(IntentKind::FlightSearch)
            .with_check_in(yesterday.format("%Y-%m-%d").to_string());
        assert_eq!(
            intent.check_in_violation(today()),
            Some(DateViolation::InPast)
        );
    }

    #[test]
    fn today_and_future_check_in_pass_guard() {
        let intent =
            TravelIntent::new(IntentKind::FlightSearch).with_check_in(today().to_string());
        assert_eq!(intent.check_in_violation(today()), None);

        let next_week = today() + chrono::Duration::days(7);
        let intent =
            TravelIntent::new(IntentKind::FlightSearch).with_check_in(next_week.to_string());
        assert_eq!(intent.check_in_violation(today()), None);
    }

    #[test]
    fn garbage_check_in_is_unparseable() {
        let intent =
            TravelIntent::new(IntentKind::FlightSearch).with_check_in("next tuesday");
        assert_eq!(
            intent.check_in_violation(today()),
            Some(DateViolation::Unparseable)
        );
    }

    #[test]
    fn missing_check_in_never_violates_guard() {
        let intent = TravelIntent::new(IntentKind::FlightSearch);
        assert_eq!(intent.check_in_violation(today()), None);
    }

    #[test]
    fn into_clarify_replaces_kind_and_reasoning_keeps_fields() {
        let intent = TravelIntent::new(IntentKind::FlightSearch)
            .with_origin("BOM")
            .into_clarify("Missing: arrival city/airport");
        assert_eq!(intent.intent, IntentKind::Clarify);
        assert_eq!(intent.reasoning, "Missing: arrival city/airport");
        assert_eq!(intent.origin.as_deref(), Some("BOM"));
    }

    #[test]
    fn travelers_floor_is_one() {
        let intent = TravelIntent::new(IntentKind::FlightSearch).with_travelers(0);
        assert_eq!(intent.travelers, 1);
    }

    #[test]
    fn intent_kind_serializes_snake_case() {
        let json = serde_json::to_string(&IntentKind::FlightSearch).unwrap();
        assert_eq!(json, "\"flight_search\"");
        let json = serde_json::to_string(&IntentKind::FollowUp).unwrap();
        assert_eq!(json, "\"follow_up\"");
    }

    proptest! {
        /// Any search intent with no missing requirements really does carry
        /// every field its kind requires.
        #[test]
        fn complete_search_intents_have_required_fields(
            kind in prop_oneof![
                Just(IntentKind::FlightSearch),
                Just(IntentKind::HotelSearch),
                Just(IntentKind::Both)
            ],
            origin in proptest::option::of("[A-Z]{3}"),
            destination in proptest::option::of("[A-Z]{3}"),
            check_in in proptest::option::of(Just("2030-05-01".to_string())),
            check_out in proptest::option::of(Just("2030-05-03".to_string())),
        ) {
            let mut intent = TravelIntent::new(kind);
            intent.origin = origin;
            intent.destination = destination;
            intent.check_in = check_in;
            intent.check_out = check_out;

            if intent.missing_requirements().is_empty() {
                match kind {
                    IntentKind::FlightSearch => {
                        prop_assert!(intent.origin.is_some());
                        prop_assert!(intent.destination.is_some());
                        prop_assert!(intent.check_in.is_some());
                        prop_assert_ne!(&intent.origin, &intent.destination);
                    }
                    IntentKind::HotelSearch => {
                        prop_assert!(intent.destination.is_some());
                        prop_assert!(intent.check_in.is_some());
                        prop_assert!(intent.check_out.is_some());
                    }
                    IntentKind::Both => {
                        prop_assert!(intent.origin.is_some());
                        prop_assert!(intent.destination.is_some());
                        prop_assert!(intent.check_in.is_some());
                        prop_assert!(intent.check_out.is_some());
                    }
                    _ => unreachable!(),
                }
            }
        }
    }
}
