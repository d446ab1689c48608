//! Remote fetch adapters.

mod http;
mod static_fetcher;

pub use http::HttpFetcher;
pub use static_fetcher::StaticFetcher;
