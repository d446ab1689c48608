//! Application layer errors.
//!
//! These errors represent failures while executing steps, not template or
//! path validation. Those are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::application::ports::FetchFailure;
use crate::domain::StepKind;
use crate::error::{ErrorCategory, HatchError};

/// Errors that occur while a generator runs.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Directory creation or file write failed.
    #[error("Filesystem error at {path}: {reason}")]
    Filesystem { path: PathBuf, reason: String },

    /// Remote file could not be retrieved. Nothing was written.
    #[error("Failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: FetchFailure },

    /// External command could not start or exited unsuccessfully.
    #[error("Command '{program}' failed: {reason}")]
    Command {
        program: String,
        exit_code: Option<i32>,
        reason: String,
    },

    /// A step failed; `cause` is the step's own error, unchanged.
    #[error("step {index} ({kind} {subject}) of '{generator}' failed: {cause}")]
    StepFailed {
        generator: String,
        index: usize,
        kind: StepKind,
        subject: String,
        cause: Box<HatchError>,
    },

    /// Cancellation was observed at a step boundary.
    #[error("generation of '{generator}' cancelled after {completed} completed steps")]
    Cancelled { generator: String, completed: usize },

    /// Adapter state lock was poisoned.
    #[error("adapter state lock poisoned")]
    LockPoisoned,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Filesystem { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Check available disk space".into(),
            ],
            Self::Fetch { url, reason } => {
                let mut hints = vec![format!("Could not download {url}")];
                match reason {
                    FetchFailure::Timeout => {
                        hints.push("Raise network.fetch_timeout_secs in your config".into())
                    }
                    FetchFailure::Status(code) => {
                        hints.push(format!("The server answered HTTP {code}"))
                    }
                    FetchFailure::Connect(_) | FetchFailure::Other(_) => {
                        hints.push("Check your network connection".into())
                    }
                }
                hints.push("Files written before this step were left in place".into());
                hints
            }
            Self::Command {
                program, exit_code, ..
            } => match exit_code {
                Some(_) => vec![
                    format!("'{program}' reported an error; see its output above"),
                    "Fix the problem and run the command by hand inside the project".into(),
                ],
                None => vec![
                    format!("Ensure '{program}' is installed and in your PATH"),
                ],
            },
            Self::StepFailed { cause, .. } => cause.suggestions(),
            Self::Cancelled { .. } => vec![
                "Generation was interrupted between steps".into(),
                "Files written so far were left in place".into(),
            ],
            Self::LockPoisoned => vec!["Another thread panicked; try again".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Filesystem { .. } => ErrorCategory::Filesystem,
            Self::Fetch { .. } => ErrorCategory::Network,
            Self::Command { .. } => ErrorCategory::Process,
            Self::StepFailed { cause, .. } => cause.category(),
            Self::Cancelled { .. } => ErrorCategory::Cancelled,
            Self::LockPoisoned => ErrorCategory::Internal,
        }
    }
}
