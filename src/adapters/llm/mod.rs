//! LLM adapters implementing the IntentModel port.

mod mock;
mod ollama;

pub use mock::{MockIntentModel, MockModelError};
pub use ollama::{OllamaConfig, OllamaIntentModel};
