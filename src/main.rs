//! Travia server binary: configuration, composition, and serving.

use std::sync::Arc;

use http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use travia::adapters::airports::{AirportCityCache, CsvAirportResolver};
use travia::adapters::amadeus::{AmadeusClient, AmadeusConfig};
use travia::adapters::http::{query_routes, QueryAppState};
use travia::adapters::llm::{OllamaConfig, OllamaIntentModel};
use travia::adapters::session::InMemorySessionStore;
use travia::adapters::websearch::{DuckDuckGoBackend, SearxngBackend};
use travia::application::{
    FlightSearchStage, HotelSearchStage, IntentExtractor, Pipeline, Synthesizer,
    WebSearchCascade,
};
use travia::config::AppConfig;
use travia::ports::{AirportResolver, SearchBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(&config.server.log_level)
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Travel provider.
    let mut amadeus_config = AmadeusConfig::new(
        config.amadeus.client_id.clone(),
        config.amadeus.client_secret.clone(),
    )
    .with_base_url(config.amadeus.base_url.clone())
    .with_timeout(config.amadeus.timeout());
    amadeus_config.max_flight_offers = config.amadeus.max_flight_offers;
    let provider = Arc::new(AmadeusClient::new(amadeus_config));

    // Intent model.
    let model = Arc::new(OllamaIntentModel::new(
        OllamaConfig::new()
            .with_model(config.llm.model.clone())
            .with_base_url(config.llm.base_url.clone())
            .with_temperature(config.llm.temperature)
            .with_timeout(config.llm.timeout()),
    ));

    // Local airport dataset, when configured.
    let resolver: Option<Arc<dyn AirportResolver>> = match &config.search.airports_csv {
        Some(path) => match CsvAirportResolver::load(path) {
            Ok(resolver) => {
                tracing::info!(path, airports = resolver.airport_count(), "airport dataset loaded");
                Some(Arc::new(resolver))
            }
            Err(err) => {
                tracing::warn!(path, error = %err, "airport dataset unavailable, using provider lookups");
                None
            }
        },
        None => None,
    };

    let mut cities = AirportCityCache::new(provider.clone());
    if let Some(resolver) = &resolver {
        cities = cities.with_resolver(resolver.clone());
    }
    let cities = Arc::new(cities);

    // Fallback search backends, tried in order.
    let mut backends: Vec<Arc<dyn SearchBackend>> = config
        .search
        .instance_list()
        .into_iter()
        .map(|url| {
            Arc::new(SearxngBackend::new(url, config.search.timeout())) as Arc<dyn SearchBackend>
        })
        .collect();
    if config.search.duckduckgo_enabled {
        backends.push(Arc::new(DuckDuckGoBackend::new(config.search.timeout())));
    }

    let mut flight_stage = FlightSearchStage::new(provider.clone(), cities.clone());
    let mut hotel_stage = HotelSearchStage::new(provider.clone());
    if let Some(resolver) = &resolver {
        flight_stage = flight_stage.with_resolver(resolver.clone());
        hotel_stage = hotel_stage.with_resolver(resolver.clone());
    }

    let pipeline = Arc::new(Pipeline::new(
        IntentExtractor::new(model),
        flight_stage,
        hotel_stage,
        WebSearchCascade::new(backends, cities.clone()),
        Synthesizer::new(cities),
    ));

    let state = QueryAppState {
        pipeline,
        sessions: Arc::new(InMemorySessionStore::new()),
    };

    let cors = if config.server.cors_origins_list().is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .server
            .cors_origins_list()
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let app = query_routes(state)
        .layer(cors)
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(TraceLayer::new_for_http());

    let addr = config.server.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "travia backend started");

    axum::serve(listener, app).await?;
    Ok(())
}
