//! CSV Airport Resolver - AirportResolver over an airports dataset.
//!
//! Loads the standard airports CSV (ourairports column layout), keeping only
//! `large_airport` rows with a 3-letter IATA code. Lookup precedence: exact
//! IATA code, alias table, exact city name, fuzzy city-name similarity,
//! keyword substring search. First hit wins.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::path::Path;

use crate::ports::AirportResolver;

/// Minimum similarity for a fuzzy city-name match.
const FUZZY_THRESHOLD: f64 = 0.85;

/// Score assigned when one name contains the other.
const SUBSTRING_SCORE: f64 = 0.9;

/// Alternative city names and common code-style inputs, mapped to the
/// canonical (lowercase) city name they should resolve through.
static ALIASES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        // Historical / alternative city names
        ("cochin", "kochi"),
        ("bombay", "mumbai"),
        ("bangalore", "bengaluru"),
        ("bengaluru", "bangalore"),
        ("calcutta", "kolkata"),
        ("madras", "chennai"),
        ("trivandrum", "thiruvananthapuram"),
        ("thiruvananthapuram", "trivandrum"),
        ("calicut", "kozhikode"),
        ("kozhikode", "calicut"),
        ("poona", "pune"),
        ("baroda", "vadodara"),
        // Code-style inputs people search by
        ("bom", "mumbai"),
        ("del", "delhi"),
        ("blr", "bangalore"),
        ("maa", "chennai"),
        ("ccu", "kolkata"),
        ("hyd", "hyderabad"),
        ("goa", "goa"),
        ("cok", "kochi"),
        ("ccj", "calicut"),
        ("amd", "ahmedabad"),
        ("pnq", "pune"),
        ("jai", "jaipur"),
        ("mum", "mumbai"),
    ])
});

/// One airport row kept from the dataset.
#[derive(Debug, Clone)]
struct AirportRecord {
    city: String,
    keywords: String,
}

/// CSV-backed airport resolver.
#[derive(Debug, Default)]
pub struct CsvAirportResolver {
    /// IATA code → record.
    airports: HashMap<String, AirportRecord>,
    /// Lowercase city name (or keyword) → IATA code.
    city_to_iata: HashMap<String, String>,
}

/// Errors loading the airports dataset.
#[derive(Debug, thiserror::Error)]
pub enum AirportDataError {
    #[error("failed to read airports file: {0}")]
    Io(#[from] std::io::Error),

    #[error("airports file has no header row")]
    MissingHeader,

    #[error("airports file header is missing column '{0}'")]
    MissingColumn(&'static str),
}

impl CsvAirportResolver {
    /// Loads the dataset from a CSV file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AirportDataError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_csv(&contents)
    }

    /// Parses the dataset from CSV text.
    pub fn from_csv(contents: &str) -> Result<Self, AirportDataError> {
        let mut lines = contents.lines();
        let header = lines.next().ok_or(AirportDataError::MissingHeader)?;
        let columns = split_csv_line(header);

        let col = |name: &'static str| -> Result<usize, AirportDataError> {
            columns
                .iter()
                .position(|c| c == name)
                .ok_or(AirportDataError::MissingColumn(name))
        };
        let type_idx = col("type")?;
        let iata_idx = col("iata_code")?;
        let city_idx = col("municipality")?;
        let keywords_idx = col("keywords")?;

        let mut resolver = Self::default();

        for line in lines {
            if line.trim().is_empty() {
                continue;
            }
            let fields = split_csv_line(line);
            let get = |i: usize| fields.get(i).map(String::as_str).unwrap_or("").trim();

            if !get(type_idx).eq_ignore_ascii_case("large_airport") {
                continue;
            }
            let iata = get(iata_idx).to_uppercase();
            if iata.len() != 3 {
                continue;
            }

            let city = get(city_idx).to_lowercase();
            let keywords = get(keywords_idx).to_lowercase();

            if !city.is_empty() {
                resolver.city_to_iata.insert(city.clone(), iata.clone());
            }
            for keyword in keywords.split(',') {
                let keyword = keyword.trim();
                if !keyword.is_empty() && !resolver.city_to_iata.contains_key(keyword) {
                    resolver
                        .city_to_iata
                        .insert(keyword.to_string(), iata.clone());
                }
            }

            resolver.airports.insert(iata, AirportRecord { city, keywords });
        }

        tracing::info!(
            airports = resolver.airports.len(),
            city_names = resolver.city_to_iata.len(),
            "loaded airport dataset"
        );

        Ok(resolver)
    }

    /// Number of airports loaded.
    pub fn airport_count(&self) -> usize {
        self.airports.len()
    }

    fn fuzzy_match_city(&self, query: &str) -> Option<&str> {
        let mut best: Option<(&str, f64)> = None;
        for city in self.city_to_iata.keys() {
            let mut score = similarity(query, city);
            if query.contains(city.as_str()) || city.contains(query) {
                score = score.max(SUBSTRING_SCORE);
            }
            if score >= FUZZY_THRESHOLD && best.map_or(true, |(_, s)| score > s) {
                best = Some((city, score));
            }
        }
        best.map(|(city, _)| city)
    }
}

impl AirportResolver for CsvAirportResolver {
    fn iata_for(&self, location: &str) -> Option<String> {
        if location.trim().is_empty() {
            return None;
        }

        let normalized = normalize(location);
        let upper = location.trim().to_uppercase();

        // 1. Already a known IATA code.
        if upper.len() == 3 && self.airports.contains_key(&upper) {
            return Some(upper);
        }

        // 2. Alias table, resolved through the canonical city name.
        if let Some(&canonical) = ALIASES.get(normalized.as_str()) {
            if let Some(iata) = self.city_to_iata.get(canonical) {
                return Some(iata.clone());
            }
        }

        // 3. Exact city name.
        if let Some(iata) = self.city_to_iata.get(&normalized) {
            return Some(iata.clone());
        }

        // 4. Fuzzy city-name match.
        if let Some(city) = self.fuzzy_match_city(&normalized) {
            return self.city_to_iata.get(city).cloned();
        }

        // 5. Keyword substring search.
        for (iata, record) in &self.airports {
            if !record.keywords.is_empty() && record.keywords.contains(&normalized) {
                return Some(iata.clone());
            }
        }

        None
    }

    fn city_name(&self, iata: &str) -> String {
        let upper = iata.trim().to_uppercase();
        match self.airports.get(&upper) {
            Some(record) if !record.city.is_empty() => titlecase(&record.city),
            _ => iata.to_string(),
        }
    }
}

/// Lowercases and drops common airport-name suffixes.
fn normalize(text: &str) -> String {
    text.trim()
        .to_lowercase()
        .replace(" airport", "")
        .replace(" international", "")
        .replace(" domestic", "")
}

fn titlecase(city: &str) -> String {
    city.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalized Levenshtein similarity in [0, 1].
fn similarity(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - levenshtein(a, b) as f64 / max_len as f64
}

fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            current[j + 1] = substitution.min(prev[j + 1] + 1).min(current[j] + 1);
        }
        std::mem::swap(&mut prev, &mut current);
    }
    prev[b.len()]
}

/// Splits one CSV line honoring double-quoted fields with embedded commas
/// and doubled-quote escapes. The airports dataset needs nothing fancier.
fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                chars.next();
                field.push('"');
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut field));
            }
            _ => field.push(c),
        }
    }
    fields.push(field);
    fields
}
