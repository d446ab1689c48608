//! Hatch Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Hatch
//! project generator, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            hatch-cli (CLI)              │
//! │      builds generators, wires ports     │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │          (GenerationService)            │
//! │   runs steps in order, fails fast       │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Filesystem, Fetcher, ProcessRunner)    │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     hatch-adapters (Infrastructure)     │
//! │ (LocalFilesystem, HttpFetcher, etc)     │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (Template, Context, Step, Generator)    │
//! │     No I/O (handlebars for rendering)   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use hatch_core::prelude::*;
//!
//! // 1. Compose a generator
//! let generator = Generator::new("hello")
//!     .with(Step::file("README.md", "# {{name}}\n"))
//!     .with(Step::command("git", ["init"]));
//!
//! // 2. Run it with injected adapters
//! let service = GenerationService::new(filesystem, fetcher, processes);
//! let ctx = Context::new().with("name", "hello");
//! generator.run(&service, Path::new("./hello"), &ctx)?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        CancellationToken, GenerationService,
        ports::{
            FetchFailure, Fetcher, Filesystem, OutputMode, ProcessOutput, ProcessRunner,
            ProcessSpec, SpawnFailure, StepEvent, StepObserver, StepOutcome,
        },
    };
    pub use crate::domain::{Context, Generator, RelativePath, Step, StepKind, Template, Value};
    pub use crate::error::{FailureKind, HatchError, HatchResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
