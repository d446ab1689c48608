//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "run this generator under that directory".

pub mod generation_service;

pub use generation_service::{CancellationToken, DEFAULT_FETCH_TIMEOUT, GenerationService};
