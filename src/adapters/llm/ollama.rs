//! Ollama Intent Model - Implementation of IntentModel for a local Ollama server.
//!
//! Uses the `/api/chat` endpoint with a JSON-schema `format` constraint so
//! the model emits the travel-intent shape directly. The message content is
//! then decoded into the loose [`RawTravelIntent`]; normalization and
//! enforcement stay in the extractor.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OllamaConfig::new()
//!     .with_model("llama3.2:3b")
//!     .with_base_url("http://127.0.0.1:11434");
//!
//! let model = OllamaIntentModel::new(config);
//! ```

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;

use crate::ports::{IntentModel, IntentModelError, RawTravelIntent};

/// Configuration for the Ollama intent model.
#[derive(Debug, Clone)]
pub struct OllamaConfig {
    /// Model tag to run (e.g. "llama3.2:3b").
    pub model: String,
    /// Base URL of the Ollama server.
    pub base_url: String,
    /// Sampling temperature; zero keeps extraction deterministic.
    pub temperature: f32,
    /// Request timeout.
    pub timeout: Duration,
}

impl OllamaConfig {
    /// Creates the default configuration (local server, 3B model).
    pub fn new() -> Self {
        Self {
            model: "llama3.2:3b".to_string(),
            base_url: "http://127.0.0.1:11434".to_string(),
            temperature: 0.0,
            timeout: Duration::from_secs(60),
        }
    }

    /// Sets the model tag.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Ollama-backed intent model.
pub struct OllamaIntentModel {
    config: OllamaConfig,
    client: Client,
}

impl OllamaIntentModel {
    /// Creates a new model client with the given configuration.
    pub fn new(config: OllamaConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn chat_url(&self) -> String {
        format!("{}/api/chat", self.config.base_url)
    }

    /// JSON schema constraining the model to the travel-intent shape.
    fn intent_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "intent": {
                    "type": "string",
                    "enum": ["flight_search", "hotel_search", "both", "clarify", "follow_up"]
                },
                "origin": {"type": ["string", "null"]},
                "destination": {"type": ["string", "null"]},
                "check_in": {"type": ["string", "null"]},
                "check_out": {"type": ["string", "null"]},
                "travelers": {"type": "integer"},
                "reasoning": {"type": "string"}
            },
            "required": ["intent", "reasoning"]
        })
    }

    fn map_request_error(&self, err: reqwest::Error) -> IntentModelError {
        if err.is_timeout() {
            IntentModelError::Timeout {
                timeout_secs: self.config.timeout.as_secs(),
            }
        } else if err.is_connect() {
            IntentModelError::unavailable(err.to_string())
        } else {
            IntentModelError::network(err.to_string())
        }
    }
}

#[async_trait]
impl IntentModel for OllamaIntentModel {
    async fn extract_intent(&self, prompt: &str) -> Result<RawTravelIntent, IntentModelError> {
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            stream: false,
            format: Self::intent_schema(),
            options: ChatOptions {
                temperature: self.config.temperature,
            },
        };

        let response = self
            .client
            .post(self.chat_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        let status = response.status();
        if status.is_server_error() {
            return Err(IntentModelError::unavailable(format!(
                "server returned {}",
                status
            )));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(IntentModelError::network(format!(
                "unexpected status {}: {}",
                status, body
            )));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| IntentModelError::parse(e.to_string()))?;

        // The constrained output arrives as JSON text inside the message.
        serde_json::from_str(&chat.message.content)
            .map_err(|e| IntentModelError::parse(format!("intent decode failed: {e}")))
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    stream: bool,
    format: Value,
    options: ChatOptions,
}

#[derive(Debug, Serialize)]
struct ChatOptions {
    temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: ChatMessage,
}
