//! Canned-response fetcher for tests and offline runs.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};

use hatch_core::application::ports::{FetchFailure, Fetcher};

/// Fetcher that answers from a fixed table and records every URL asked for.
///
/// URLs missing from the table fail with HTTP 404.
#[derive(Debug, Clone, Default)]
pub struct StaticFetcher {
    responses: HashMap<String, Result<Vec<u8>, FetchFailure>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for `url`.
    pub fn with_body(mut self, url: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.responses.insert(url.into(), Ok(body.into()));
        self
    }

    /// Fail requests for `url` with `failure`.
    pub fn with_failure(mut self, url: impl Into<String>, failure: FetchFailure) -> Self {
        self.responses.insert(url.into(), Err(failure));
        self
    }

    /// URLs requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

impl Fetcher for StaticFetcher {
    fn fetch(&self, url: &str, _timeout: Duration) -> Result<Vec<u8>, FetchFailure> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(url.to_string());
        }
        self.responses
            .get(url)
            .cloned()
            .unwrap_or(Err(FetchFailure::Status(404)))
    }
}
