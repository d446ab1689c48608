//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `hatch-adapters` crate provides implementations.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

use crate::domain::StepKind;
use crate::error::HatchResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `hatch_adapters::filesystem::LocalFilesystem` (production)
/// - `hatch_adapters::filesystem::MemoryFilesystem` (testing)
///
/// ## Design Notes
///
/// - Paths passed in are already joined with the generation root
/// - `write_file` replaces the target; a failed write must not leave a
///   truncated file behind
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> HatchResult<()>;

    /// Write content to a file, replacing any existing file.
    fn write_file(&self, path: &Path, content: &[u8]) -> HatchResult<()>;

    /// Read a whole file.
    fn read_file(&self, path: &Path) -> HatchResult<Vec<u8>>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Why a remote fetch failed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    #[error("request timed out")]
    Timeout,

    #[error("server responded with HTTP {0}")]
    Status(u16),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("{0}")]
    Other(String),
}

impl FetchFailure {
    /// Timeouts and connection drops may succeed on a later run.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Timeout | Self::Connect(_))
    }
}

/// Port for retrieving remote files.
///
/// Implemented by:
/// - `hatch_adapters::fetch::HttpFetcher` (production, blocking HTTP)
/// - `hatch_adapters::fetch::StaticFetcher` (testing, canned responses)
///
/// Implementations return the complete body or an error, never a prefix.
#[cfg_attr(test, mockall::automock)]
pub trait Fetcher: Send + Sync {
    fn fetch(&self, url: &str, timeout: Duration) -> Result<Vec<u8>, FetchFailure>;
}

/// What to do with a child's stdout and stderr.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// Child writes straight to our terminal.
    #[default]
    Inherit,
    /// Child output is collected into [`ProcessOutput`].
    Capture,
}

/// A fully specified external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessSpec {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
    pub output: OutputMode,
}

/// Result of a process that started.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl ProcessOutput {
    pub fn exited(code: i32) -> Self {
        Self {
            exit_code: Some(code),
            ..Self::default()
        }
    }

    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Why a process could not be started.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SpawnFailure {
    #[error("executable not found")]
    NotFound,

    #[error("failed to start: {0}")]
    Io(String),
}

/// Port for running external commands.
///
/// Implemented by:
/// - `hatch_adapters::process::SystemProcessRunner` (production)
/// - `hatch_adapters::process::RecordingRunner` (testing, records invocations)
#[cfg_attr(test, mockall::automock)]
pub trait ProcessRunner: Send + Sync {
    /// Run to completion. Only failure to start is an `Err`; a non-zero exit
    /// is reported through [`ProcessOutput::exit_code`].
    fn run(&self, spec: &ProcessSpec) -> Result<ProcessOutput, SpawnFailure>;
}

/// A step about to run or just finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepEvent {
    pub generator: String,
    pub depth: usize,
    pub index: usize,
    pub kind: StepKind,
    pub description: String,
}

impl fmt::Display for StepEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}#{}] {} {}", self.generator, self.index, self.kind, self.description)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Succeeded,
    Failed,
}

/// Port for progress reporting. Both hooks default to doing nothing.
pub trait StepObserver: Send + Sync {
    fn step_started(&self, _event: &StepEvent) {}

    fn step_finished(&self, _event: &StepEvent, _outcome: StepOutcome) {}
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl StepObserver for NoopObserver {}
