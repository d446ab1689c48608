//! Process runner using `std::process::Command`.

use std::io;
use std::process::{Command, Stdio};

use tracing::{debug, instrument};

use hatch_core::application::ports::{
    OutputMode, ProcessOutput, ProcessRunner, ProcessSpec, SpawnFailure,
};

/// Production runner. Waits for the child to exit before returning.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProcessRunner;

impl SystemProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessRunner for SystemProcessRunner {
    #[instrument(skip_all, fields(program = %spec.program, cwd = %spec.cwd.display()))]
    fn run(&self, spec: &ProcessSpec) -> Result<ProcessOutput, SpawnFailure> {
        let mut command = Command::new(&spec.program);
        command
            .args(&spec.args)
            .current_dir(&spec.cwd)
            .stdin(Stdio::null());

        let output = match spec.output {
            OutputMode::Inherit => {
                let status = command
                    .stdout(Stdio::inherit())
                    .stderr(Stdio::inherit())
                    .status()
                    .map_err(map_spawn_error)?;
                ProcessOutput {
                    exit_code: status.code(),
                    ..ProcessOutput::default()
                }
            }
            OutputMode::Capture => {
                let output = command.output().map_err(map_spawn_error)?;
                ProcessOutput {
                    exit_code: output.status.code(),
                    stdout: output.stdout,
                    stderr: output.stderr,
                }
            }
        };

        debug!(exit_code = ?output.exit_code, "Process exited");
        Ok(output)
    }
}

fn map_spawn_error(e: io::Error) -> SpawnFailure {
    match e.kind() {
        io::ErrorKind::NotFound => SpawnFailure::NotFound,
        _ => SpawnFailure::Io(e.to_string()),
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sh(script: &str, cwd: &std::path::Path) -> ProcessSpec {
        ProcessSpec {
            program: "sh".into(),
            args: vec!["-c".into(), script.into()],
            cwd: cwd.to_path_buf(),
            output: OutputMode::Capture,
        }
    }

    #[test]
    fn reports_exit_code() {
        let temp = TempDir::new().unwrap();
        let output = SystemProcessRunner::new()
            .run(&sh("exit 3", temp.path()))
            .unwrap();
        assert_eq!(output.exit_code, Some(3));
        assert!(!output.success());
    }

    #[test]
    fn runs_in_requested_directory() {
        let temp = TempDir::new().unwrap();
        let output = SystemProcessRunner::new()
            .run(&sh("touch marker && echo done", temp.path()))
            .unwrap();

        assert!(output.success());
        assert_eq!(output.stdout, b"done\n");
        assert!(temp.path().join("marker").exists());
    }

    #[test]
    fn missing_program_is_not_found() {
        let temp = TempDir::new().unwrap();
        let spec = ProcessSpec {
            program: "hatch-no-such-program".into(),
            args: vec![],
            cwd: temp.path().to_path_buf(),
            output: OutputMode::Capture,
        };
        assert_eq!(
            SystemProcessRunner::new().run(&spec),
            Err(SpawnFailure::NotFound)
        );
    }
}
