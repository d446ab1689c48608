//! Process runner double that records invocations instead of spawning.

use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex},
};

use hatch_core::application::ports::{ProcessOutput, ProcessRunner, ProcessSpec, SpawnFailure};

/// Records every [`ProcessSpec`] it is given.
///
/// Programs exit 0 unless scripted otherwise with
/// [`RecordingRunner::with_exit_code`]. Clones share the recorded list.
#[derive(Debug, Clone, Default)]
pub struct RecordingRunner {
    exit_codes: HashMap<String, i32>,
    missing: HashSet<String>,
    calls: Arc<Mutex<Vec<ProcessSpec>>>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every run of `program` exit with `code`.
    pub fn with_exit_code(mut self, program: impl Into<String>, code: i32) -> Self {
        self.exit_codes.insert(program.into(), code);
        self
    }

    /// Pretend `program` is not installed.
    pub fn with_missing(mut self, program: impl Into<String>) -> Self {
        self.missing.insert(program.into());
        self
    }

    pub fn calls(&self) -> Vec<ProcessSpec> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Recorded invocations as `program arg1 arg2` lines.
    pub fn command_lines(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .map(|spec| {
                std::iter::once(spec.program)
                    .chain(spec.args)
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect()
    }
}

impl ProcessRunner for RecordingRunner {
    fn run(&self, spec: &ProcessSpec) -> Result<ProcessOutput, SpawnFailure> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(spec.clone());
        }
        if self.missing.contains(&spec.program) {
            return Err(SpawnFailure::NotFound);
        }
        let code = self.exit_codes.get(&spec.program).copied().unwrap_or(0);
        Ok(ProcessOutput::exited(code))
    }
}
