//! Application layer for Hatch.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (GenerationService)
//! - **Ports**: Interface definitions (traits) for filesystem, network and processes
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! rendering or path rules itself. Those live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{CancellationToken, DEFAULT_FETCH_TIMEOUT, GenerationService};

// Re-export port traits (for adapter implementation)
pub use ports::{Fetcher, Filesystem, ProcessRunner, StepObserver};

pub use error::ApplicationError;
