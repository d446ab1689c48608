//! Infrastructure adapters for Hatch.
//!
//! This crate implements the ports defined in `hatch_core::application::ports`
//! and ships the built-in blueprints. It contains all I/O: disk, network and
//! child processes.

pub mod blueprints;
pub mod fetch;
pub mod filesystem;
pub mod process;

// Re-export commonly used adapters
pub use fetch::{HttpFetcher, StaticFetcher};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use process::{RecordingRunner, SystemProcessRunner};
