//! Airport Resolver Port - City/IATA code resolution.
//!
//! Resolution precedence (first hit wins): exact IATA code, alias table,
//! exact city name, fuzzy city-name similarity, keyword substring search.

/// Port for resolving free-text locations to IATA codes.
pub trait AirportResolver: Send + Sync {
    /// Resolves a city name, alias, or code to a 3-letter IATA code.
    fn iata_for(&self, location: &str) -> Option<String>;

    /// City name for an IATA code, falling back to the code itself.
    fn city_name(&self, iata: &str) -> String;
}
