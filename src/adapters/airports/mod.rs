//! Airport lookup adapters: CSV-backed resolver and the city-name cache.

mod city_cache;
mod csv_resolver;

pub use city_cache::AirportCityCache;
pub use csv_resolver::{AirportDataError, CsvAirportResolver};
