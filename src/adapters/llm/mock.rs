//! Mock Intent Model for testing.
//!
//! Configurable mock of the IntentModel port: queue raw intents or errors to
//! return in order, and capture the prompts the extractor builds.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::ports::{IntentModel, IntentModelError, RawTravelIntent};

/// Mock intent model with queued responses and prompt capture.
#[derive(Debug, Clone, Default)]
pub struct MockIntentModel {
    responses: Arc<Mutex<VecDeque<Result<RawTravelIntent, MockModelError>>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

/// Cloneable error shapes for injection.
#[derive(Debug, Clone)]
pub enum MockModelError {
    Unavailable(String),
    Parse(String),
}

impl From<MockModelError> for IntentModelError {
    fn from(err: MockModelError) -> Self {
        match err {
            MockModelError::Unavailable(m) => IntentModelError::unavailable(m),
            MockModelError::Parse(m) => IntentModelError::parse(m),
        }
    }
}

impl MockIntentModel {
    /// Creates an empty mock; with no queued responses it returns a bare
    /// clarify-shaped raw intent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a raw intent to return.
    pub fn with_raw(self, raw: RawTravelIntent) -> Self {
        self.responses.lock().unwrap().push_back(Ok(raw));
        self
    }

    /// Queues an error to return.
    pub fn with_error(self, err: MockModelError) -> Self {
        self.responses.lock().unwrap().push_back(Err(err));
        self
    }

    /// Prompts captured so far.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    /// Number of calls made.
    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl IntentModel for MockIntentModel {
    async fn extract_intent(&self, prompt: &str) -> Result<RawTravelIntent, IntentModelError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match self.responses.lock().unwrap().pop_front() {
            Some(Ok(raw)) => Ok(raw),
            Some(Err(err)) => Err(err.into()),
            None => Ok(RawTravelIntent::default()),
        }
    }
}
