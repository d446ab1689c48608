//! Blocking HTTP(S) fetcher backed by `reqwest`.

use std::time::Duration;

use reqwest::blocking::Client;
use tracing::{debug, instrument};

use hatch_core::{
    application::ports::{FetchFailure, Fetcher},
    error::{HatchError, HatchResult},
};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Production fetcher. Follows redirects and treats any non-2xx final
/// status as a failure.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> HatchResult<Self> {
        let client = Client::builder()
            .user_agent(concat!("hatch/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| HatchError::Configuration {
                message: format!("Failed to create HTTP client: {}", e),
            })?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    #[instrument(skip(self), level = "debug")]
    fn fetch(&self, url: &str, timeout: Duration) -> Result<Vec<u8>, FetchFailure> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .map_err(map_http_error)?
            .error_for_status()
            .map_err(map_http_error)?;

        let body = response.bytes().map_err(map_http_error)?;
        debug!(bytes = body.len(), "Fetched");
        Ok(body.to_vec())
    }
}

fn map_http_error(error: reqwest::Error) -> FetchFailure {
    if let Some(status) = error.status() {
        FetchFailure::Status(status.as_u16())
    } else if error.is_timeout() {
        FetchFailure::Timeout
    } else if error.is_connect() {
        FetchFailure::Connect(error.to_string())
    } else {
        FetchFailure::Other(format!("HTTP error: {}", error))
    }
}
