//! Unified error handling for Hatch Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with failure attribution and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Hatch Core operations.
#[derive(Debug, Error, Clone)]
pub enum HatchError {
    /// Errors from the domain layer (template syntax, invalid steps).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Errors from the application layer (step execution).
    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

/// The kind of the innermost failure behind an error chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Parse,
    Validation,
    Io,
    Fetch,
    Command,
    Cancelled,
    Configuration,
    Internal,
}

impl HatchError {
    /// Walk through `StepFailed` wrappers to the error that started it.
    pub fn root_cause(&self) -> &HatchError {
        match self {
            Self::Application(ApplicationError::StepFailed { cause, .. }) => cause.root_cause(),
            other => other,
        }
    }

    /// Kind of the underlying failure, ignoring step wrappers.
    pub fn failure_kind(&self) -> FailureKind {
        match self.root_cause() {
            Self::Domain(e) if e.category() == crate::domain::ErrorCategory::Template => {
                FailureKind::Parse
            }
            Self::Domain(_) => FailureKind::Validation,
            Self::Application(e) => match e {
                ApplicationError::Filesystem { .. } => FailureKind::Io,
                ApplicationError::Fetch { .. } => FailureKind::Fetch,
                ApplicationError::Command { .. } => FailureKind::Command,
                ApplicationError::Cancelled { .. } => FailureKind::Cancelled,
                ApplicationError::LockPoisoned | ApplicationError::StepFailed { .. } => {
                    FailureKind::Internal
                }
            },
            Self::Configuration { .. } => FailureKind::Configuration,
            Self::Internal { .. } => FailureKind::Internal,
        }
    }

    /// Step indices from the outermost generator down to the failing step.
    pub fn step_path(&self) -> Vec<usize> {
        let mut path = Vec::new();
        let mut current = self;
        while let Self::Application(ApplicationError::StepFailed { index, cause, .. }) = current {
            path.push(*index);
            current = cause.as_ref();
        }
        path
    }

    /// Exit code of a failed command step, if that is what went wrong.
    pub fn exit_code(&self) -> Option<i32> {
        match self.root_cause() {
            Self::Application(ApplicationError::Command { exit_code, .. }) => *exit_code,
            _ => None,
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check your setup and try again".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in Hatch".into(),
                "Please report this issue at: https://github.com/hatch-rs/hatch/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Template => ErrorCategory::Template,
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Whether running the generator again could succeed without changes.
    ///
    /// Informational only: nothing in the pipeline retries on its own.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.root_cause(),
            Self::Application(ApplicationError::Fetch { reason, .. }) if reason.is_transient()
        )
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Template,
    Validation,
    Filesystem,
    Network,
    Process,
    Cancelled,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type HatchResult<T> = Result<T, HatchError>;
