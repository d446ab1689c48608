//! Generation steps.
//!
//! The set of step kinds is closed, so [`Step`] is an enum and execution
//! dispatches with `match` rather than through an open trait.

use std::fmt;
use std::time::Duration;

use crate::domain::{
    entities::{common::RelativePath, generator::Generator},
    error::DomainError,
};

/// Render `body` and write it to `path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStep {
    pub path: RelativePath,
    pub body: String,
}

/// Download `url` and write the raw bytes to `path`. Never rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFileStep {
    pub path: RelativePath,
    pub url: String,
    /// Overrides the service-wide fetch timeout.
    pub timeout: Option<Duration>,
}

/// Run an external program in the generation root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandStep {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandStep {
    /// Program and arguments as a single shell-like line, for display.
    pub fn command_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

/// One unit of generation work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    File(FileStep),
    RemoteFile(RemoteFileStep),
    Command(CommandStep),
    Generator(Box<Generator>),
}

impl Step {
    /// Template file step.
    ///
    /// # Panics
    /// Panics if `path` is empty, absolute, or escapes the root; see
    /// [`Step::try_file`].
    pub fn file(path: &str, body: impl Into<String>) -> Self {
        Self::File(FileStep {
            path: RelativePath::new(path),
            body: body.into(),
        })
    }

    pub fn try_file(path: &str, body: impl Into<String>) -> Result<Self, DomainError> {
        Ok(Self::File(FileStep {
            path: RelativePath::try_new(path)?,
            body: body.into(),
        }))
    }

    /// Remote file step using the service default timeout.
    ///
    /// # Panics
    /// Panics if `path` is absolute or escapes the root; see
    /// [`Step::try_remote_file`].
    pub fn remote_file(path: &str, url: impl Into<String>) -> Self {
        Self::RemoteFile(RemoteFileStep {
            path: RelativePath::new(path),
            url: url.into(),
            timeout: None,
        })
    }

    pub fn try_remote_file(path: &str, url: impl Into<String>) -> Result<Self, DomainError> {
        Ok(Self::RemoteFile(RemoteFileStep {
            path: RelativePath::try_new(path)?,
            url: url.into(),
            timeout: None,
        }))
    }

    pub fn command<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Command(CommandStep {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        })
    }

    pub fn try_command<I, S>(program: impl Into<String>, args: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let program = program.into();
        if program.trim().is_empty() {
            return Err(DomainError::EmptyProgram);
        }
        Ok(Self::command(program, args))
    }

    /// Set a per-step timeout. Only meaningful for remote files; other kinds
    /// are returned unchanged.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        match self {
            Self::RemoteFile(step) => Self::RemoteFile(RemoteFileStep {
                timeout: Some(timeout),
                ..step
            }),
            other => other,
        }
    }

    pub fn kind(&self) -> StepKind {
        match self {
            Self::File(_) => StepKind::File,
            Self::RemoteFile(_) => StepKind::RemoteFile,
            Self::Command(_) => StepKind::Command,
            Self::Generator(_) => StepKind::Generator,
        }
    }

    /// One-line summary for plans and logs.
    pub fn describe(&self) -> String {
        match self {
            Self::File(step) => step.path.to_string(),
            Self::RemoteFile(step) => format!("{} <- {}", step.path, step.url),
            Self::Command(step) => step.command_line(),
            Self::Generator(generator) => format!(
                "{} ({} steps)",
                generator.name(),
                generator.len()
            ),
        }
    }
}

impl From<Generator> for Step {
    fn from(generator: Generator) -> Self {
        Self::Generator(Box::new(generator))
    }
}

/// User-visible label for a step variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKind {
    File,
    RemoteFile,
    Command,
    Generator,
}

impl StepKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::RemoteFile => "remote-file",
            Self::Command => "command",
            Self::Generator => "generator",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
