// ============================================================================
// domain/error.rs - TEMPLATE AND STEP VALIDATION ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (they travel inside step failure chains)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    // ========================================================================
    // Template parse errors
    // ========================================================================
    #[error("unterminated {{{{{block}}}}} block opened on line {line}")]
    UnterminatedBlock { block: String, line: usize },

    #[error("template syntax error on line {line}, column {column}: {reason}")]
    InvalidSyntax {
        line: usize,
        column: usize,
        reason: String,
    },

    #[error("{{{{/{found}}}}} on line {line} does not close the open {{{{#{expected}}}}} block")]
    MismatchedClose {
        expected: String,
        found: String,
        line: usize,
    },

    #[error("template failed to render: {reason}")]
    Render { reason: String },

    // ========================================================================
    // Step construction errors
    // ========================================================================
    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("Generated paths must not be empty")]
    EmptyPath,

    #[error("Path escapes the generation root: {path}")]
    PathEscapesRoot { path: String },

    #[error("Command step has an empty program name")]
    EmptyProgram,
}

impl DomainError {
    /// Whether this is a template parse failure.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Self::UnterminatedBlock { .. }
                | Self::InvalidSyntax { .. }
                | Self::MismatchedClose { .. }
        )
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UnterminatedBlock { block, line } => vec![
                format!("The block opened on line {line} is never closed"),
                format!("Add the matching closing tag for {{{{{block}}}}}"),
            ],
            Self::InvalidSyntax { line, .. } => vec![
                format!("Check the tags around line {line}"),
                "Every {{#if}} and {{#each}} needs a matching {{/if}} or {{/each}}".into(),
                "Escape tags meant for the generated app with a backslash: \\{{ ... }}".into(),
            ],
            Self::MismatchedClose { .. } => vec![
                "Check that every {{#if}} and {{#each}} is closed in order".into(),
            ],
            Self::Render { .. } => vec!["Check the values passed as template context".into()],
            Self::AbsolutePathNotAllowed { .. }
            | Self::PathEscapesRoot { .. }
            | Self::EmptyPath => vec![
                "Generated paths must be relative to the output directory".into(),
            ],
            Self::EmptyProgram => vec!["Give every command step a program name".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        if self.is_parse_error() || matches!(self, Self::Render { .. }) {
            ErrorCategory::Template
        } else {
            ErrorCategory::Validation
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Template,
    Validation,
}
