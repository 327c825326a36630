//! Result synthesis: renders flights and hotels into the response text.
//!
//! Prices are converted to INR at fixed rates keyed on the offer currency
//! (flight offers always arrive in EUR) and truncated to whole rupees.
//! Airport codes are expanded to city names through the shared cache.

use chrono::{DateTime, NaiveDateTime};
use std::sync::Arc;

use crate::adapters::airports::AirportCityCache;
use crate::domain::{FlightOffer, HotelResult, RoomOffer};

/// Fixed conversion rates into INR.
pub const EUR_TO_INR: f64 = 107.19;
pub const GBP_TO_INR: f64 = 125.0;
pub const USD_TO_INR: f64 = 83.0;

/// Offers rendered per section.
const MAX_RENDERED: usize = 5;
/// Room description truncation length.
const DESCRIPTION_LIMIT: usize = 150;

/// Renders search results into the final response.
pub struct Synthesizer {
    cities: Arc<AirportCityCache>,
}

impl Synthesizer {
    /// Creates a synthesizer over the shared city cache.
    pub fn new(cities: Arc<AirportCityCache>) -> Self {
        Self { cities }
    }

    /// Renders the top flight and hotel results.
    pub async fn render(&self, flights: &[FlightOffer], hotels: &[HotelResult]) -> String {
        let mut lines: Vec<String> = Vec::new();

        if !flights.is_empty() {
            lines.push("✈️ **FLIGHTS:**".to_string());
            for offer in flights.iter().take(MAX_RENDERED) {
                if let Some(line) = self.flight_line(offer).await {
                    lines.push(line);
                }
            }
            lines.push(String::new());
        }

        if !hotels.is_empty() {
            lines.push("🏨 **HOTELS:**".to_string());
            lines.push(String::new());
            for (idx, hotel) in hotels.iter().take(MAX_RENDERED).enumerate() {
                render_hotel(&mut lines, idx + 1, hotel);
                lines.push(String::new());
            }
        }

        if lines.is_empty() {
            return "No results available for your search.".to_string();
        }
        lines.join("\n")
    }

    async fn flight_line(&self, offer: &FlightOffer) -> Option<String> {
        let segment = offer.first_segment()?;
        let flight_code = format!("{} {}", segment.carrier_code, segment.number);
        let time_str = format_departure(&segment.departure.at);
        let price_inr = (offer.price.total_amount() * EUR_TO_INR) as i64;

        let dep_code = &segment.departure.iata_code;
        let arr_code = &segment.arrival.iata_code;
        let dep_city = self.cities.city_name(dep_code).await;
        let arr_city = self.cities.city_name(arr_code).await;
        let route_str = format!("{dep_city} ({dep_code}) → {arr_city} ({arr_code})");

        Some(format!(
            "  {flight_code} | {route_str} | {time_str} | ₹{price_inr}"
        ))
    }
}

/// Converts an amount in the given currency to whole INR.
pub fn to_inr(amount: f64, currency: &str) -> i64 {
    let rate = match currency {
        "EUR" => EUR_TO_INR,
        "GBP" => GBP_TO_INR,
        "USD" => USD_TO_INR,
        _ => 1.0,
    };
    (amount * rate) as i64
}

/// Formats a departure timestamp, tolerating an optional UTC offset.
fn format_departure(at: &str) -> String {
    let naive = DateTime::parse_from_rfc3339(at)
        .map(|dt| dt.naive_local())
        .or_else(|_| NaiveDateTime::parse_from_str(at, "%Y-%m-%dT%H:%M:%S"));
    match naive {
        Ok(dt) => dt.format("%d %b %Y, %I:%M %p").to_string(),
        Err(_) => at.to_string(),
    }
}

fn render_hotel(lines: &mut Vec<String>, idx: usize, hotel: &HotelResult) {
    let name = hotel.hotel.name.as_deref().unwrap_or("Unknown Hotel");
    let hotel_id = &hotel.hotel.hotel_id;
    lines.push(format!("{idx}. **{name}** (ID: {hotel_id})"));

    match hotel.offers.first() {
        Some(offer) => render_offer(lines, offer),
        None => {
            lines.push("   ℹ️  No pricing available for selected dates".to_string());
            if let Some(city) = hotel
                .hotel
                .address
                .as_ref()
                .and_then(|a| a.city_name.as_deref())
            {
                lines.push(format!("   📍 Location: {city}"));
            }
            if let Some(distance) = &hotel.hotel.distance {
                if let Some(value) = distance.value {
                    let unit = distance.unit.as_deref().unwrap_or_default();
                    lines.push(format!("   📏 Distance from center: {value} {unit}"));
                }
            }
        }
    }
}

fn render_offer(lines: &mut Vec<String>, offer: &RoomOffer) {
    let currency = offer
        .price
        .as_ref()
        .and_then(|p| p.currency.as_deref())
        .unwrap_or("EUR");
    let total = offer.price.as_ref().map(|p| p.total_amount()).unwrap_or(0.0);
    let base = offer.price.as_ref().map(|p| p.base_amount()).unwrap_or(0.0);
    let price_inr = to_inr(total, currency);
    let base_inr = to_inr(base, currency);
    lines.push(format!(
        "   💰 Price: ₹{price_inr} total (Base: ₹{base_inr}) | Currency: {currency}"
    ));

    let estimated = offer
        .room
        .as_ref()
        .and_then(|r| r.type_estimated.as_ref());
    let category = estimated
        .and_then(|t| t.category.as_deref())
        .unwrap_or("Standard Room");
    let category = title_case(&category.replace('_', " "));
    let beds = estimated
        .and_then(|t| t.beds)
        .map(|b| b.to_string())
        .unwrap_or_else(|| "N/A".to_string());
    let bed_type = estimated
        .and_then(|t| t.bed_type.as_deref())
        .unwrap_or("N/A");
    lines.push(format!("   🛏️  Room: {category} | {beds} bed(s) - {bed_type}"));

    if let Some(text) = offer
        .room
        .as_ref()
        .and_then(|r| r.description.as_ref())
        .and_then(|d| d.text.as_deref())
        .filter(|t| !t.is_empty())
    {
        let short = if text.chars().count() > DESCRIPTION_LIMIT {
            let truncated: String = text.chars().take(DESCRIPTION_LIMIT).collect();
            format!("{truncated}...")
        } else {
            text.to_string()
        };
        lines.push(format!("   📝 {short}"));
    }

    let check_in = offer.check_in_date.as_deref().unwrap_or("N/A");
    let check_out = offer.check_out_date.as_deref().unwrap_or("N/A");
    lines.push(format!("   📅 {check_in} to {check_out}"));

    let payment = offer
        .policies
        .as_ref()
        .and_then(|p| p.payment_type.as_deref())
        .unwrap_or("N/A");
    let cancellation = offer.policies.as_ref().and_then(|p| p.cancellation.as_ref());
    let cancel_type = cancellation
        .and_then(|c| c.kind.as_deref())
        .unwrap_or("N/A");
    let cancel_desc = cancellation
        .and_then(|c| c.description.as_ref())
        .and_then(|d| d.text.as_deref())
        .unwrap_or("No cancellation info");
    lines.push(format!(
        "   🏷️  Payment: {payment} | Cancellation: {cancel_type}"
    ));
    lines.push(format!("   ℹ️  {cancel_desc}"));
}

fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::amadeus::MockTravelProvider;
    use crate::domain::{
        Cancellation, FlightEndpoint, FlightSegment, HotelSummary, Itinerary, OfferPrice,
        Policies, Room, RoomTypeEstimated, TextBlock,
    };

    fn synthesizer() -> Synthesizer {
        Synthesizer::new(Arc::new(AirportCityCache::new(Arc::new(
            MockTravelProvider::new()
                .with_city_name("BOM", "Mumbai")
                .with_city_name("DEL", "Delhi"),
        ))))
    }

    fn flight(total: &str) -> FlightOffer {
        FlightOffer {
            itineraries: vec![Itinerary {
                segments: vec![FlightSegment {
                    departure: FlightEndpoint {
                        iata_code: "BOM".to_string(),
                        at: "2030-01-15T06:30:00".to_string(),
                    },
                    arrival: FlightEndpoint {
                        iata_code: "DEL".to_string(),
                        at: "2030-01-15T08:40:00".to_string(),
                    },
                    carrier_code: "AI".to_string(),
                    number: "864".to_string(),
                }],
            }],
            price: OfferPrice {
                currency: Some("EUR".to_string()),
                total: total.to_string(),
                base: None,
            },
        }
    }

    fn priced_hotel(currency: &str, total: &str, base: &str) -> HotelResult {
        HotelResult {
            hotel: HotelSummary {
                hotel_id: "HLDEL123".to_string(),
                name: Some("Grand Palace".to_string()),
                address: None,
                distance: None,
            },
            available: true,
            offers: vec![RoomOffer {
                price: Some(OfferPrice {
                    currency: Some(currency.to_string()),
                    total: total.to_string(),
                    base: Some(base.to_string()),
                }),
                room: Some(Room {
                    type_estimated: Some(RoomTypeEstimated {
                        category: Some("DELUXE_ROOM".to_string()),
                        beds: Some(1),
                        bed_type: Some("KING".to_string()),
                    }),
                    description: Some(TextBlock {
                        text: Some("Spacious room with city view".to_string()),
                    }),
                }),
                check_in_date: Some("2030-01-15".to_string()),
                check_out_date: Some("2030-01-17".to_string()),
                policies: Some(Policies {
                    payment_type: Some("guarantee".to_string()),
                    cancellation: Some(Cancellation {
                        kind: Some("FULL_STAY".to_string()),
                        description: Some(TextBlock {
                            text: Some("Non refundable".to_string()),
                        }),
                    }),
                }),
            }],
        }
    }

    #[tokio::test]
    async fn empty_results_yield_placeholder() {
        let text = synthesizer().render(&[], &[]).await;
        assert_eq!(text, "No results available for your search.");
    }

    #[tokio::test]
    async fn flight_line_converts_eur_and_expands_cities() {
        let text = synthesizer().render(&[flight("100.00")], &[]).await;
        assert!(text.contains("✈️ **FLIGHTS:**"));
        // 100 EUR at 107.19 truncates to 10719 rupees.
        assert!(text.contains(
            "  AI 864 | Mumbai (BOM) → Delhi (DEL) | 15 Jan 2030, 06:30 AM | ₹10719"
        ));
    }

    #[tokio::test]
    async fn offset_timestamps_render_local_time() {
        let mut offer = flight("10");
        offer.itineraries[0].segments[0].departure.at =
            "2030-01-15T18:30:00+05:30".to_string();
        let text = synthesizer().render(&[offer], &[]).await;
        assert!(text.contains("15 Jan 2030, 06:30 PM"));
    }

    #[tokio::test]
    async fn at_most_five_flights_render() {
        let flights: Vec<FlightOffer> = (0..7).map(|_| flight("10")).collect();
        let text = synthesizer().render(&flights, &[]).await;
        assert_eq!(text.matches("AI 864").count(), 5);
    }

    #[tokio::test]
    async fn hotel_offer_renders_full_detail() {
        let text = synthesizer()
            .render(&[], &[priced_hotel("EUR", "200.00", "180.00")])
            .await;

        assert!(text.contains("🏨 **HOTELS:**"));
        assert!(text.contains("1. **Grand Palace** (ID: HLDEL123)"));
        assert!(text.contains("💰 Price: ₹21438 total (Base: ₹19294) | Currency: EUR"));
        assert!(text.contains("🛏️  Room: Deluxe Room | 1 bed(s) - KING"));
        assert!(text.contains("📝 Spacious room with city view"));
        assert!(text.contains("📅 2030-01-15 to 2030-01-17"));
        assert!(text.contains("🏷️  Payment: guarantee | Cancellation: FULL_STAY"));
        assert!(text.contains("ℹ️  Non refundable"));
    }

    #[tokio::test]
    async fn currency_rates_apply_per_offer() {
        let gbp = synthesizer()
            .render(&[], &[priced_hotel("GBP", "100", "80")])
            .await;
        assert!(gbp.contains("₹12500 total (Base: ₹10000) | Currency: GBP"));

        let usd = synthesizer()
            .render(&[], &[priced_hotel("USD", "100", "80")])
            .await;
        assert!(usd.contains("₹8300 total (Base: ₹6640) | Currency: USD"));

        let inr = synthesizer()
            .render(&[], &[priced_hotel("INR", "5000", "4500")])
            .await;
        assert!(inr.contains("₹5000 total (Base: ₹4500) | Currency: INR"));
    }

    #[tokio::test]
    async fn unavailable_hotel_shows_metadata_only() {
        let hotel = HotelResult::basic(HotelSummary {
            hotel_id: "HLDEL456".to_string(),
            name: Some("City Lodge".to_string()),
            address: Some(crate::domain::HotelAddress {
                city_name: Some("NEW DELHI".to_string()),
            }),
            distance: Some(crate::domain::Distance {
                value: Some(2.5),
                unit: Some("KM".to_string()),
            }),
        });
        let text = synthesizer().render(&[], &[hotel]).await;

        assert!(text.contains("1. **City Lodge** (ID: HLDEL456)"));
        assert!(text.contains("ℹ️  No pricing available for selected dates"));
        assert!(text.contains("📍 Location: NEW DELHI"));
        assert!(text.contains("📏 Distance from center: 2.5 KM"));
        assert!(!text.contains("💰"));
    }

    #[tokio::test]
    async fn long_descriptions_truncate() {
        let mut hotel = priced_hotel("EUR", "10", "10");
        hotel.offers[0].room.as_mut().unwrap().description =
            Some(TextBlock {
                text: Some("d".repeat(300)),
            });
        let text = synthesizer().render(&[], &[hotel]).await;
        assert!(text.contains(&format!("📝 {}...", "d".repeat(150))));
    }

    #[test]
    fn to_inr_unknown_currency_is_identity() {
        assert_eq!(to_inr(1234.9, "JPY"), 1234);
        assert_eq!(to_inr(100.0, "EUR"), 10719);
    }

    #[test]
    fn title_case_normalizes_category() {
        assert_eq!(title_case("DELUXE ROOM"), "Deluxe Room");
        assert_eq!(title_case("standard"), "Standard");
    }
}
