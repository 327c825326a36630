//! Mock Search Backend for testing the fallback cascade.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::ports::{SearchBackend, SearchBackendError, SearchHit};

/// What a mock backend does when queried.
#[derive(Debug, Clone)]
pub enum MockSearchBehavior {
    /// Return these hits.
    Hits(Vec<SearchHit>),
    /// Fail with this HTTP status.
    Status(u16),
    /// Fail with a network error.
    Network(String),
}

/// Mock search backend with a fixed behavior and call counting.
pub struct MockSearchBackend {
    name: String,
    behavior: MockSearchBehavior,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockSearchBackend {
    /// Creates a mock with the given name and behavior.
    pub fn new(name: impl Into<String>, behavior: MockSearchBehavior) -> Self {
        Self {
            name: name.into(),
            behavior,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A backend that succeeds with one hit per (title, url, snippet) tuple.
    pub fn succeeding(name: impl Into<String>, hits: Vec<SearchHit>) -> Self {
        Self::new(name, MockSearchBehavior::Hits(hits))
    }

    /// A backend that always fails with the given status.
    pub fn failing(name: impl Into<String>, status: u16) -> Self {
        Self::new(name, MockSearchBehavior::Status(status))
    }

    /// Queries received so far.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Shared handle to the call log, for asserting after a move.
    pub fn call_log(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl SearchBackend for MockSearchBackend {
    fn name(&self) -> &str {
        &self.name
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, SearchBackendError> {
        self.calls.lock().unwrap().push(query.to_string());
        match &self.behavior {
            MockSearchBehavior::Hits(hits) => Ok(hits.clone()),
            MockSearchBehavior::Status(code) => Err(SearchBackendError::Status(*code)),
            MockSearchBehavior::Network(m) => Err(SearchBackendError::network(m.clone())),
        }
    }
}
