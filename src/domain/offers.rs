//! Search result shapes returned by the travel provider.
//!
//! These mirror the provider's camelCase wire format so results can be
//! decoded, persisted in the session, and rendered without lossy remapping.
//! Prices arrive as decimal strings and are parsed at render time.

use serde::{Deserialize, Serialize};

/// A priced flight itinerary offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightOffer {
    #[serde(default)]
    pub itineraries: Vec<Itinerary>,
    pub price: OfferPrice,
}

impl FlightOffer {
    /// The first segment of the first itinerary, when present.
    pub fn first_segment(&self) -> Option<&FlightSegment> {
        self.itineraries.first()?.segments.first()
    }
}

/// One itinerary (sequence of segments) within a flight offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Itinerary {
    #[serde(default)]
    pub segments: Vec<FlightSegment>,
}

/// A single flight leg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightSegment {
    pub departure: FlightEndpoint,
    pub arrival: FlightEndpoint,
    pub carrier_code: String,
    pub number: String,
}

/// Airport and local timestamp for a departure or arrival.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightEndpoint {
    pub iata_code: String,
    /// ISO timestamp, possibly with a UTC offset.
    pub at: String,
}

/// Total price block on a flight or room offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferPrice {
    #[serde(default)]
    pub currency: Option<String>,
    pub total: String,
    #[serde(default)]
    pub base: Option<String>,
}

impl OfferPrice {
    /// Parses the total as a float, zero when malformed.
    pub fn total_amount(&self) -> f64 {
        self.total.parse().unwrap_or(0.0)
    }

    /// Parses the base as a float, zero when absent or malformed.
    pub fn base_amount(&self) -> f64 {
        self.base
            .as_deref()
            .and_then(|b| b.parse().ok())
            .unwrap_or(0.0)
    }
}

/// A hotel with its matched room offers.
///
/// `offers` is empty (and `available` false) when the hotel exists in the
/// city but no offer matched the requested dates; only the summary metadata
/// is usable then.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelResult {
    pub hotel: HotelSummary,
    #[serde(default = "default_available")]
    pub available: bool,
    #[serde(default)]
    pub offers: Vec<RoomOffer>,
}

impl HotelResult {
    /// Wraps bare hotel metadata as an unavailable result.
    pub fn basic(hotel: HotelSummary) -> Self {
        Self {
            hotel,
            available: false,
            offers: Vec::new(),
        }
    }
}

fn default_available() -> bool {
    true
}

/// Basic hotel identity and location metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelSummary {
    pub hotel_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<HotelAddress>,
    #[serde(default)]
    pub distance: Option<Distance>,
}

/// Address block carried on hotel metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelAddress {
    #[serde(default)]
    pub city_name: Option<String>,
}

/// Distance from the city centre.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Distance {
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
}

/// A priced, bookable room offer for specific dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomOffer {
    #[serde(default)]
    pub price: Option<OfferPrice>,
    #[serde(default)]
    pub room: Option<Room>,
    #[serde(default)]
    pub check_in_date: Option<String>,
    #[serde(default)]
    pub check_out_date: Option<String>,
    #[serde(default)]
    pub policies: Option<Policies>,
}

/// Room details on an offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    #[serde(default)]
    pub type_estimated: Option<RoomTypeEstimated>,
    #[serde(default)]
    pub description: Option<TextBlock>,
}

/// Estimated room category and bedding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomTypeEstimated {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub beds: Option<u32>,
    #[serde(default)]
    pub bed_type: Option<String>,
}

/// Free-text block used for descriptions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBlock {
    #[serde(default)]
    pub text: Option<String>,
}

/// Payment and cancellation policies on an offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Policies {
    #[serde(default)]
    pub payment_type: Option<String>,
    #[serde(default)]
    pub cancellation: Option<Cancellation>,
}

/// Cancellation terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cancellation {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub description: Option<TextBlock>,
}
