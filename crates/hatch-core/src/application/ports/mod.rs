//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `hatch-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: directory creation and file writes
//!   - `Fetcher`: remote file retrieval
//!   - `ProcessRunner`: external command execution
//!   - `StepObserver`: progress notifications
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{
    FetchFailure, Fetcher, Filesystem, NoopObserver, OutputMode, ProcessOutput, ProcessRunner,
    ProcessSpec, SpawnFailure, StepEvent, StepObserver, StepOutcome,
};

#[cfg(test)]
pub use output::{MockFetcher, MockFilesystem, MockProcessRunner};
