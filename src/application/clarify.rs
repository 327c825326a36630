//! Clarification response builder.
//!
//! Turns an incomplete intent into a helpful prompt: what was understood,
//! what is still needed, and an example query shaped to the gap.

use crate::domain::TravelIntent;

/// Builds the clarification text for an unresolved intent.
pub fn clarify_response(intent: Option<&TravelIntent>) -> String {
    let mut response = String::from("I need more information to help you book your travel.\n\n");

    let (origin, destination, check_in, check_out, reasoning) = match intent {
        Some(i) => (
            i.origin.as_deref(),
            i.destination.as_deref(),
            i.check_in.as_deref(),
            i.check_out.as_deref(),
            i.reasoning.as_str(),
        ),
        None => (None, None, None, None, ""),
    };

    if !reasoning.is_empty() {
        response.push_str(&format!("**{reasoning}**\n\n"));
    }

    let mut has_info = Vec::new();
    if let Some(origin) = origin {
        has_info.push(format!("✓ Departure: {origin}"));
    }
    if let Some(destination) = destination {
        has_info.push(format!("✓ Destination: {destination}"));
    }
    if let Some(check_in) = check_in {
        has_info.push(format!("✓ Check-in/Departure date: {check_in}"));
    }
    if let Some(check_out) = check_out {
        has_info.push(format!("✓ Check-out date: {check_out}"));
    }

    if !has_info.is_empty() {
        response.push_str("**What I have:**\n");
        for item in &has_info {
            response.push_str(item);
            response.push('\n');
        }
        response.push('\n');
    }

    if origin.is_some() && destination.is_none() {
        response.push_str("**What I need:**\n");
        response.push_str("• Destination/Arrival city (e.g., Delhi, Bangalore, Chennai)\n");
        if check_in.is_none() {
            response.push_str("• Travel/Departure date (e.g., tomorrow, 25th January)\n");
        }
        response.push_str("\n**Example:** 'to Delhi on 25th January'\n");
    } else if destination.is_some() && origin.is_none() {
        response.push_str("**What I need:**\n");
        response.push_str("• Departure city (e.g., Mumbai, Bangalore)\n");
        if check_in.is_none() {
            response.push_str("• Travel date (e.g., tomorrow, 25th January)\n");
        }
        response.push_str("\n**Example:** 'from Mumbai on 25th January'\n");
    } else {
        response.push_str("**For flight bookings, I need:**\n");
        response.push_str("• Departure city (e.g., Mumbai, BOM)\n");
        response.push_str("• Arrival city (e.g., Delhi, DEL)\n");
        response.push_str("• Travel date (e.g., tomorrow, 25th January)\n\n");

        response.push_str("**For hotel bookings, I need:**\n");
        response.push_str("• Destination city (e.g., Delhi, Mumbai)\n");
        response.push_str("• Check-in date (e.g., 25th January)\n");
        response.push_str("• Check-out date (e.g., 27th January, or '3 nights')\n\n");

        response.push_str("**Examples:**\n");
        response.push_str("• 'Book a flight from Mumbai to Delhi on 25th January'\n");
        response.push_str("• 'Book a hotel in Delhi from 25th to 27th January'\n");
        response.push_str("• 'Flight and hotel to Bangalore next week for 3 nights'\n");
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::IntentKind;

    #[test]
    fn no_intent_gives_generic_help() {
        let text = clarify_response(None);
        assert!(text.starts_with("I need more information"));
        assert!(text.contains("**For flight bookings, I need:**"));
        assert!(text.contains("**For hotel bookings, I need:**"));
        assert!(!text.contains("**What I have:**"));
    }

    #[test]
    fn reasoning_is_surfaced_first() {
        let intent = TravelIntent::clarify("Missing: arrival city/airport");
        let text = clarify_response(Some(&intent));
        assert!(text.contains("**Missing: arrival city/airport**"));
    }

    #[test]
    fn known_fields_are_listed() {
        let intent = TravelIntent::clarify("Missing: departure/travel date")
            .with_origin("BOM")
            .with_destination("DEL");
        let text = clarify_response(Some(&intent));
        assert!(text.contains("✓ Departure: BOM"));
        assert!(text.contains("✓ Destination: DEL"));
        assert!(!text.contains("✓ Check-in"));
    }

    #[test]
    fn origin_without_destination_asks_for_destination() {
        let intent = TravelIntent::new(IntentKind::Clarify).with_origin("BOM");
        let text = clarify_response(Some(&intent));
        assert!(text.contains("• Destination/Arrival city"));
        assert!(text.contains("**Example:** 'to Delhi on 25th January'"));
    }

    #[test]
    fn destination_without_origin_asks_for_departure() {
        let intent = TravelIntent::new(IntentKind::Clarify)
            .with_destination("DEL")
            .with_check_in("2030-01-25");
        let text = clarify_response(Some(&intent));
        assert!(text.contains("• Departure city (e.g., Mumbai, Bangalore)"));
        // Date is already known, so it is not asked for again.
        assert!(!text.contains("• Travel date"));
        assert!(text.contains("**Example:** 'from Mumbai on 25th January'"));
    }
}
