//! Web-search fallback cascade for provider outages.
//!
//! Tries each configured backend in priority order and renders the first
//! non-empty hit list into a disclaimed response. When every backend fails
//! the user still gets a useful static message with direct booking links,
//! so this stage always produces text.

use std::sync::Arc;

use crate::adapters::airports::AirportCityCache;
use crate::domain::TravelIntent;
use crate::ports::{SearchBackend, SearchHit};

/// Hits rendered into the response.
const MAX_RENDERED_HITS: usize = 5;
/// Snippet truncation length, in characters.
const SNIPPET_LIMIT: usize = 200;

/// Fallback cascade over an ordered list of search backends.
pub struct WebSearchCascade {
    backends: Vec<Arc<dyn SearchBackend>>,
    cities: Arc<AirportCityCache>,
}

impl WebSearchCascade {
    /// Creates a cascade over the given backends, tried in order.
    pub fn new(backends: Vec<Arc<dyn SearchBackend>>, cities: Arc<AirportCityCache>) -> Self {
        Self { backends, cities }
    }

    /// Runs the cascade; always returns response text.
    pub async fn run(&self, search_query: &str, intent: Option<&TravelIntent>) -> String {
        if search_query.is_empty() {
            return "Unable to search for flights at this time.".to_string();
        }

        for backend in &self.backends {
            tracing::info!(backend = backend.name(), query = search_query, "trying backend");
            match backend.search(search_query).await {
                Ok(hits) if !hits.is_empty() => {
                    tracing::info!(
                        backend = backend.name(),
                        hits = hits.len(),
                        "web search fallback succeeded"
                    );
                    return render_hits(search_query, &hits);
                }
                Ok(_) => {
                    tracing::warn!(backend = backend.name(), "backend returned no results");
                }
                Err(err) => {
                    tracing::warn!(backend = backend.name(), error = %err, "backend failed");
                }
            }
        }

        tracing::error!("all web search backends failed");
        self.terminal_message(intent).await
    }

    /// Static message with direct booking links, for when nothing worked.
    async fn terminal_message(&self, intent: Option<&TravelIntent>) -> String {
        let origin_city = match intent.and_then(|i| i.origin.as_deref()) {
            Some(code) => self.cities.city_name(code).await,
            None => "departure city".to_string(),
        };
        let dest_city = match intent.and_then(|i| i.destination.as_deref()) {
            Some(code) => self.cities.city_name(code).await,
            None => "destination city".to_string(),
        };
        let date = intent
            .and_then(|i| i.check_in.as_deref())
            .unwrap_or("your selected date");

        format!(
            r#"
⚠️ **The flight booking API is temporarily unavailable and web search is also having issues.**

📋 **Your Search Details:**
- From: {origin_city}
- To: {dest_city}
- Date: {date}

💡 **What you can do:**
1. **Visit these sites directly:**
   - Google Flights: https://www.google.com/flights
   - Skyscanner: https://www.skyscanner.com
   - Kayak: https://www.kayak.com

2. **Check airline websites:**
   - Air India: https://www.airindia.in
   - IndiGo: https://www.goindigo.in
   - Vistara: https://www.airvistara.com

3. **Try again later** - The API should be back online soon!

🔄 I'll be able to provide real-time flight data once the API is restored.
"#
        )
    }
}

/// Renders search hits with the standing availability disclaimer.
fn render_hits(search_query: &str, hits: &[SearchHit]) -> String {
    let mut text = format!(
        r#"
⚠️ **Note: The live flight booking API is temporarily unavailable.**

🔍 **Here's what I found from web search for "{search_query}":**

"#
    );

    for (idx, hit) in hits.iter().take(MAX_RENDERED_HITS).enumerate() {
        let snippet = if hit.content.is_empty() {
            "No description available".to_string()
        } else {
            hit.content.chars().take(SNIPPET_LIMIT).collect()
        };
        text.push_str(&format!(
            "\n**{}. {}**\n{}...\n🔗 {}\n\n",
            idx + 1,
            hit.title,
            snippet,
            hit.url
        ));
    }

    text.push_str(
        r#"
💡 **Recommendations:**
- Visit the links above for real-time pricing and availability
- Check airline websites directly for best deals
- Compare prices on multiple booking platforms
- The live API should be back online soon - try again later!

⚠️ **Disclaimer:** The information above is from web search results and may not reflect current prices or availability. These are estimated options found on the internet.
"#,
    );
    text
}
