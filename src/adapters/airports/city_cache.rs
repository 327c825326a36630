//! Airport City Cache - process-wide IATA code → city name cache.
//!
//! City names are needed for readable fallback queries and result rendering.
//! Lookup order: cache, local airport dataset, provider location resolution.
//! Lookups are best-effort; on any failure the raw code is returned so
//! rendering never blocks on the provider.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ports::{AirportResolver, LocationType, TravelProvider};

/// Shared cache over the provider's location resolution.
pub struct AirportCityCache {
    provider: Arc<dyn TravelProvider>,
    resolver: Option<Arc<dyn AirportResolver>>,
    cache: RwLock<HashMap<String, String>>,
}

impl AirportCityCache {
    /// Creates a cache backed by the provider only.
    pub fn new(provider: Arc<dyn TravelProvider>) -> Self {
        Self {
            provider,
            resolver: None,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Adds a local dataset consulted before the provider.
    pub fn with_resolver(mut self, resolver: Arc<dyn AirportResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Resolves an IATA code to its city name, falling back to the code.
    pub async fn city_name(&self, iata: &str) -> String {
        let code = iata.trim().to_uppercase();
        if code.is_empty() {
            return iata.to_string();
        }

        if let Some(city) = self.cache.read().await.get(&code) {
            return city.clone();
        }

        // Local dataset first: free and covers the common airports.
        if let Some(resolver) = &self.resolver {
            let city = resolver.city_name(&code);
            if city != code {
                self.cache.write().await.insert(code, city.clone());
                return city;
            }
        }

        match self.provider.resolve_location(&code, LocationType::Airport).await {
            Ok(locations) => {
                let city = locations
                    .first()
                    .and_then(|l| l.address.as_ref())
                    .and_then(|a| a.city_name.clone());
                match city {
                    Some(city) => {
                        self.cache.write().await.insert(code, city.clone());
                        city
                    }
                    None => code,
                }
            }
            Err(err) => {
                tracing::warn!(code = %code, error = %err, "city name lookup failed");
                code
            }
        }
    }

    /// Number of cached entries (useful for tests).
    pub async fn len(&self) -> usize {
        self.cache.read().await.len()
    }

    /// True when nothing is cached yet.
    pub async fn is_empty(&self) -> bool {
        self.cache.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::amadeus::MockTravelProvider;

    #[tokio::test]
    async fn resolves_through_provider_and_caches() {
        let provider = Arc::new(MockTravelProvider::new().with_city_name("BOM", "Mumbai"));
        let cache = AirportCityCache::new(provider);

        assert_eq!(cache.city_name("BOM").await, "Mumbai");
        assert_eq!(cache.len().await, 1);
        // Second hit comes from the cache.
        assert_eq!(cache.city_name("bom").await, "Mumbai");
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn unknown_code_falls_back_to_itself() {
        let provider = Arc::new(MockTravelProvider::new());
        let cache = AirportCityCache::new(provider);
        assert_eq!(cache.city_name("XYZ").await, "XYZ");
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn local_dataset_is_consulted_before_provider() {
        struct FixedResolver;
        impl AirportResolver for FixedResolver {
            fn iata_for(&self, _location: &str) -> Option<String> {
                None
            }
            fn city_name(&self, iata: &str) -> String {
                if iata == "DEL" {
                    "Delhi".to_string()
                } else {
                    iata.to_string()
                }
            }
        }

        let provider = Arc::new(MockTravelProvider::new());
        let cache =
            AirportCityCache::new(provider).with_resolver(Arc::new(FixedResolver));
        assert_eq!(cache.city_name("DEL").await, "Delhi");
        assert_eq!(cache.city_name("XYZ").await, "XYZ");
    }
}
