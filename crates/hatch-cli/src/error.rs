//! Error handling for the Hatch CLI.
//!
//! Provides structured errors with:
//! - User-friendly messages
//! - Actionable suggestions
//! - Exit code mapping
//! - Failure attribution for generator runs in verbose mode

use std::error::Error;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use thiserror::Error;

use hatch_core::error::{ErrorCategory as CoreCategory, FailureKind, HatchError};

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid user input (validation failed).
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Target directory already exists.
    #[error("Project already exists at {path}")]
    ProjectExists { path: PathBuf },

    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    /// An input file named on the command line does not exist.
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    // ── Config errors ──────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // ── Core errors ────────────────────────────────────────────────────────
    /// A template or generator failure from `hatch-core`.
    #[error(transparent)]
    Core(#[from] HatchError),

    // ── System errors ──────────────────────────────────────────────────────
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Operation declined at the confirmation prompt.
    #[error("Operation cancelled")]
    Cancelled,
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { message, .. } => vec![
                format!("Check your input: {}", message),
                "Use --help for usage information".into(),
            ],

            Self::ProjectExists { path } => vec![
                format!("The directory '{}' already exists", path.display()),
                "Use --force to generate into it anyway; existing files are overwritten".into(),
                "Choose a different application name".into(),
            ],

            Self::InvalidProjectName { name, reason } => vec![
                format!("Application name '{}' is invalid: {}", name, reason),
                "Use letters, digits, hyphens, and underscores".into(),
                "Examples: coke, my-app, shop_api".into(),
            ],

            Self::FileNotFound { path } => vec![
                format!("Nothing exists at '{}'", path.display()),
                "Check the path and try again".into(),
            ],

            Self::ConfigError { message, .. } => vec![
                format!("Configuration issue: {}", message),
                "Show the config location with: hatch config path".into(),
                "Recreate a default config with: hatch init --force".into(),
            ],

            Self::Core(core_err) => core_err.suggestions(),

            Self::IoError { message, .. } => vec![
                format!("I/O operation failed: {}", message),
                "Check file permissions".into(),
                "Check available disk space".into(),
            ],

            Self::Cancelled => vec![
                "Operation was cancelled".into(),
                "No changes were made".into(),
            ],
        }
    }

    /// Get the error category for styling and exit codes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. }
            | Self::ProjectExists { .. }
            | Self::InvalidProjectName { .. }
            | Self::Cancelled => ErrorCategory::UserError,
            Self::FileNotFound { .. } => ErrorCategory::NotFound,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::Core(core) => match core.category() {
                CoreCategory::Template | CoreCategory::Validation | CoreCategory::Cancelled => {
                    ErrorCategory::UserError
                }
                CoreCategory::Configuration => ErrorCategory::Configuration,
                CoreCategory::Filesystem
                | CoreCategory::Network
                | CoreCategory::Process
                | CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::IoError { .. } => ErrorCategory::Internal,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Category      | Code |
    /// |---------------|------|
    /// | User error    |  2   |
    /// | Not found     |  3   |
    /// | Configuration |  4   |
    /// | Internal      |  1   |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Internal => 1,
        }
    }

    /// Attribution lines for a failed generator run, shown with `-v`.
    fn details(&self) -> Vec<String> {
        let Self::Core(core) = self else {
            return Vec::new();
        };
        let mut lines = vec![format!("kind: {}", failure_label(core.failure_kind()))];
        let path = core.step_path();
        if !path.is_empty() {
            let joined: Vec<String> = path.iter().map(usize::to_string).collect();
            lines.push(format!("step: {}", joined.join(" > ")));
        }
        if let Some(code) = core.exit_code() {
            lines.push(format!("exit code: {code}"));
        }
        if core.is_retryable() {
            lines.push("retryable: yes".into());
        }
        lines
    }

    /// Coloured report for a terminal.
    pub fn format_colored(&self, verbose: bool) -> String {
        self.report(verbose, true)
    }

    /// Same report without ANSI codes, for pipes and log files.
    pub fn format_plain(&self, verbose: bool) -> String {
        self.report(verbose, false)
    }

    /// Header, message, then (verbose only) attribution and cause chain,
    /// then suggestions. Non-verbose reports end with a `-v` hint.
    fn report(&self, verbose: bool, color: bool) -> String {
        let paint = |text: &str, f: fn(&str) -> String| {
            if color { f(text) } else { text.to_owned() }
        };
        let mut lines = vec![
            String::new(),
            format!(
                "{} {}",
                paint("\u{2717}", |t| t.red().bold().to_string()),
                paint("Error:", |t| t.red().bold().to_string()),
            ),
            format!("  {}", paint(&self.to_string(), |t| t.red().to_string())),
        ];

        if verbose {
            lines.extend(
                self.details()
                    .into_iter()
                    .map(|d| format!("  {}", paint(&d, |t| t.dimmed().to_string()))),
            );
            let mut cause = self.source();
            while let Some(err) = cause {
                let text = format!("caused by: {err}");
                lines.push(format!("  {}", paint(&text, |t| t.dimmed().to_string())));
                cause = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            lines.push(String::new());
            lines.push(paint("Suggestions:", |t| t.yellow().bold().to_string()));
            lines.extend(suggestions.iter().map(|s| format!("  {s}")));
        }

        if !verbose {
            lines.push(String::new());
            lines.push(paint(
                "Use -v / --verbose for more details.",
                |t| t.dimmed().to_string(),
            ));
        }

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }

    /// Log the error using tracing.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError => tracing::warn!("User error: {}", self),
            ErrorCategory::NotFound => tracing::warn!("Not found: {}", self),
            ErrorCategory::Configuration => tracing::error!("Configuration error: {}", self),
            ErrorCategory::Internal => tracing::error!("Internal error: {}", self),
        }

        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {}", source);
        }
    }
}

fn failure_label(kind: FailureKind) -> &'static str {
    match kind {
        FailureKind::Parse => "template parse",
        FailureKind::Validation => "validation",
        FailureKind::Io => "filesystem",
        FailureKind::Fetch => "fetch",
        FailureKind::Command => "command",
        FailureKind::Cancelled => "cancelled",
        FailureKind::Configuration => "configuration",
        FailureKind::Internal => "internal",
    }
}

/// Error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// User input error (validation, invalid arguments, bad templates).
    UserError,
    NotFound,
    Configuration,
    /// Internal/system error, including failed steps.
    Internal,
}

// ── IntoCli trait ─────────────────────────────────────────────────────────────

/// Extension trait to convert foreign error types into [`CliError`] at
/// call-sites with a descriptive context message.
pub trait IntoCli<T> {
    /// Convert to `CliResult` attaching a human-readable context message.
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for Result<T, std::io::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::IoError {
            message: f().into(),
            source: e,
        })
    }
}

impl<T> IntoCli<T> for Result<T, HatchError> {
    /// Core errors already carry their own context; the message is dropped.
    fn with_cli_context<F, S>(self, _f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(CliError::Core)
    }
}
