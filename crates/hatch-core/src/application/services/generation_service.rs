//! Generation Service - runs generators against the driven ports.
//!
//! This service is the only place steps are executed:
//! 1. Check for cancellation at the step boundary
//! 2. Apply the step (render/write, fetch/write, spawn, or recurse)
//! 3. Stop at the first failure, wrapping it with the step position
//!
//! Nothing written by earlier steps is ever removed.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::{
    application::{
        ApplicationError,
        ports::{
            Fetcher, Filesystem, NoopObserver, OutputMode, ProcessRunner, ProcessSpec,
            SpawnFailure, StepEvent, StepObserver, StepOutcome,
        },
    },
    domain::{
        CommandStep, Context, FileStep, Generator, RelativePath, RemoteFileStep, Step, template,
    },
    error::{HatchError, HatchResult},
};

/// Remote fetch timeout when neither the step nor the caller sets one.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared flag asking a running generator to stop before its next step.
///
/// Clones observe the same flag, so one clone can be handed to a signal
/// handler while the service holds another.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Executes generators.
///
/// Holds one adapter per driven port. Adapters are boxed so the CLI can pick
/// real or fake implementations at runtime.
pub struct GenerationService {
    filesystem: Box<dyn Filesystem>,
    fetcher: Box<dyn Fetcher>,
    processes: Box<dyn ProcessRunner>,
    observer: Box<dyn StepObserver>,
    cancellation: CancellationToken,
    default_timeout: Duration,
    output: OutputMode,
}

impl GenerationService {
    /// Create a service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let service = GenerationService::new(
    ///     Box::new(LocalFilesystem::new()),
    ///     Box::new(HttpFetcher::new()?),
    ///     Box::new(SystemProcessRunner::new()),
    /// );
    /// ```
    pub fn new(
        filesystem: Box<dyn Filesystem>,
        fetcher: Box<dyn Fetcher>,
        processes: Box<dyn ProcessRunner>,
    ) -> Self {
        Self {
            filesystem,
            fetcher,
            processes,
            observer: Box::new(NoopObserver),
            cancellation: CancellationToken::new(),
            default_timeout: DEFAULT_FETCH_TIMEOUT,
            output: OutputMode::Inherit,
        }
    }

    pub fn with_observer(mut self, observer: Box<dyn StepObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    pub fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    pub fn with_output_mode(mut self, output: OutputMode) -> Self {
        self.output = output;
        self
    }

    /// Run every step of `generator` in order under `root`.
    ///
    /// Stops at the first failing step. The returned error is a
    /// [`ApplicationError::StepFailed`] naming the generator, the zero-based
    /// step index and kind, with the step's own error as its cause.
    #[instrument(
        skip_all,
        fields(
            generator = %generator.name(),
            root = %root.display(),
            run_id = %Uuid::new_v4()
        )
    )]
    pub fn run(&self, generator: &Generator, root: &Path, context: &Context) -> HatchResult<()> {
        info!(steps = generator.len(), "Running generator");

        match self.run_generator(generator, root, context, 0) {
            Ok(()) => {
                info!("Generator completed successfully");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Generator stopped");
                Err(e)
            }
        }
    }

    fn run_generator(
        &self,
        generator: &Generator,
        root: &Path,
        context: &Context,
        depth: usize,
    ) -> HatchResult<()> {
        for (index, step) in generator.steps().iter().enumerate() {
            if self.cancellation.is_cancelled() {
                return Err(ApplicationError::Cancelled {
                    generator: generator.name().to_string(),
                    completed: index,
                }
                .into());
            }

            let event = StepEvent {
                generator: generator.name().to_string(),
                depth,
                index,
                kind: step.kind(),
                description: step.describe(),
            };
            info!(step = %event, "Step started");
            self.observer.step_started(&event);

            let result = self.apply(step, root, context, depth);

            let outcome = match result {
                Ok(()) => StepOutcome::Succeeded,
                Err(_) => StepOutcome::Failed,
            };
            self.observer.step_finished(&event, outcome);

            result.map_err(|cause| ApplicationError::StepFailed {
                generator: event.generator,
                index,
                kind: event.kind,
                subject: match step {
                    Step::Generator(nested) => nested.name().to_string(),
                    _ => event.description,
                },
                cause: Box::new(cause),
            })?;
        }

        Ok(())
    }

    #[instrument(skip_all, level = "debug", fields(kind = %step.kind(), depth = depth))]
    fn apply(&self, step: &Step, root: &Path, context: &Context, depth: usize) -> HatchResult<()> {
        match step {
            Step::File(file) => self.write_template(file, root, context),
            Step::RemoteFile(remote) => self.download(remote, root),
            Step::Command(command) => self.spawn(command, root),
            Step::Generator(nested) => self.run_generator(nested, root, context, depth + 1),
        }
    }

    fn write_template(&self, step: &FileStep, root: &Path, context: &Context) -> HatchResult<()> {
        let rendered = template::render(&step.body, context)?;
        self.write_bytes(&step.path, root, rendered.as_bytes())
    }

    fn download(&self, step: &RemoteFileStep, root: &Path) -> HatchResult<()> {
        let timeout = step.timeout.unwrap_or(self.default_timeout);
        debug!(url = %step.url, ?timeout, "Fetching remote file");

        // The body must be complete before anything touches the disk.
        let body = self
            .fetcher
            .fetch(&step.url, timeout)
            .map_err(|reason| ApplicationError::Fetch {
                url: step.url.clone(),
                reason,
            })?;

        self.write_bytes(&step.path, root, &body)
    }

    fn spawn(&self, step: &CommandStep, root: &Path) -> HatchResult<()> {
        self.filesystem
            .create_dir_all(root)
            .map_err(|e| relocate(e, root.to_path_buf()))?;

        let spec = ProcessSpec {
            program: step.program.clone(),
            args: step.args.clone(),
            cwd: root.to_path_buf(),
            output: self.output,
        };
        debug!(command = %step.command_line(), "Running command");

        let output = self.processes.run(&spec).map_err(|failure| {
            ApplicationError::Command {
                program: step.program.clone(),
                exit_code: None,
                reason: match failure {
                    SpawnFailure::NotFound => "executable not found".to_string(),
                    SpawnFailure::Io(reason) => reason,
                },
            }
        })?;

        if output.success() {
            return Ok(());
        }

        Err(ApplicationError::Command {
            program: step.program.clone(),
            exit_code: output.exit_code,
            reason: match output.exit_code {
                Some(code) => format!("exited with status {code}"),
                None => "terminated by signal".to_string(),
            },
        }
        .into())
    }

    fn write_bytes(&self, relative: &RelativePath, root: &Path, bytes: &[u8]) -> HatchResult<()> {
        let target = relative.under(root);

        if let Some(parent) = target.parent() {
            self.filesystem
                .create_dir_all(parent)
                .map_err(|e| relocate(e, relative.as_path().to_path_buf()))?;
        }

        self.filesystem
            .write_file(&target, bytes)
            .map_err(|e| relocate(e, relative.as_path().to_path_buf()))?;

        debug!(path = %relative, bytes = bytes.len(), "Wrote file");
        Ok(())
    }
}

/// Report filesystem errors against the path the step names, not the
/// adapter's absolute path.
fn relocate(err: HatchError, path: PathBuf) -> HatchError {
    match err {
        HatchError::Application(ApplicationError::Filesystem { reason, .. }) => {
            ApplicationError::Filesystem { path, reason }.into()
        }
        other => other,
    }
}

impl Generator {
    /// Run this generator with `service`. Same as [`GenerationService::run`].
    pub fn run(&self, service: &GenerationService, root: &Path, context: &Context) -> HatchResult<()> {
        service.run(self, root, context)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    use mockall::predicate::*;

    use super::*;
    use crate::application::ports::{
        FetchFailure, MockFetcher, MockFilesystem, MockProcessRunner, ProcessOutput,
    };
    use crate::domain::StepKind;
    use crate::error::FailureKind;

    /// Filesystem double that keeps files in a map and logs each write.
    #[derive(Default)]
    struct FakeFs {
        files: Mutex<BTreeMap<PathBuf, Vec<u8>>>,
        log: Arc<Mutex<Vec<String>>>,
        fail_on: Option<PathBuf>,
    }

    impl FakeFs {
        fn with_log(log: Arc<Mutex<Vec<String>>>) -> Self {
            Self {
                log,
                ..Self::default()
            }
        }

        fn snapshot(&self) -> BTreeMap<PathBuf, Vec<u8>> {
            self.files.lock().unwrap().clone()
        }
    }

    impl Filesystem for Arc<FakeFs> {
        fn create_dir_all(&self, _path: &Path) -> HatchResult<()> {
            Ok(())
        }

        fn write_file(&self, path: &Path, content: &[u8]) -> HatchResult<()> {
            if self.fail_on.as_deref() == Some(path) {
                return Err(ApplicationError::Filesystem {
                    path: path.to_path_buf(),
                    reason: "disk full".into(),
                }
                .into());
            }
            self.log
                .lock()
                .unwrap()
                .push(format!("write {}", path.display()));
            self.files
                .lock()
                .unwrap()
                .insert(path.to_path_buf(), content.to_vec());
            Ok(())
        }

        fn read_file(&self, path: &Path) -> HatchResult<Vec<u8>> {
            self.files
                .lock()
                .unwrap()
                .get(path)
                .cloned()
                .ok_or_else(|| {
                    ApplicationError::Filesystem {
                        path: path.to_path_buf(),
                        reason: "not found".into(),
                    }
                    .into()
                })
        }

        fn exists(&self, path: &Path) -> bool {
            self.files.lock().unwrap().contains_key(path)
        }
    }

    /// Runner double that logs each command line and exits with a fixed code.
    struct FakeRunner {
        log: Arc<Mutex<Vec<String>>>,
        code: i32,
    }

    impl ProcessRunner for FakeRunner {
        fn run(&self, spec: &ProcessSpec) -> Result<ProcessOutput, SpawnFailure> {
            let mut line = spec.program.clone();
            for arg in &spec.args {
                line.push(' ');
                line.push_str(arg);
            }
            self.log.lock().unwrap().push(format!("run {line}"));
            Ok(ProcessOutput::exited(self.code))
        }
    }

    struct RecordingObserver(Arc<Mutex<Vec<(usize, usize, StepOutcome)>>>);

    impl StepObserver for RecordingObserver {
        fn step_finished(&self, event: &StepEvent, outcome: StepOutcome) {
            self.0.lock().unwrap().push((event.depth, event.index, outcome));
        }
    }

    fn no_fetch() -> Box<dyn Fetcher> {
        let mut fetcher = MockFetcher::new();
        fetcher.expect_fetch().never();
        Box::new(fetcher)
    }

    fn no_processes() -> Box<dyn ProcessRunner> {
        let mut runner = MockProcessRunner::new();
        runner.expect_run().never();
        Box::new(runner)
    }

    fn root() -> PathBuf {
        PathBuf::from("/work/coke")
    }

    #[test]
    fn steps_run_in_declaration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let fs = Arc::new(FakeFs::with_log(log.clone()));
        let service = GenerationService::new(
            Box::new(fs.clone()),
            no_fetch(),
            Box::new(FakeRunner {
                log: log.clone(),
                code: 0,
            }),
        );

        let generator = Generator::new("app")
            .with(Step::file("a.txt", "1"))
            .with(Step::command("go", ["fmt"]))
            .with(Step::file("b.txt", "2"));

        generator.run(&service, &root(), &Context::new()).unwrap();

        assert_eq!(
            *log.lock().unwrap(),
            [
                "write /work/coke/a.txt",
                "run go fmt",
                "write /work/coke/b.txt"
            ]
        );
    }

    #[test]
    fn file_step_renders_with_context() {
        let fs = Arc::new(FakeFs::default());
        let service = GenerationService::new(Box::new(fs.clone()), no_fetch(), no_processes());
        let generator = Generator::new("app").with(Step::file(
            "README.md",
            "# {{name}}\n{{#if withPop}}pop\n{{/if}}done\n",
        ));
        let ctx = Context::new().with("name", "coke").with("withPop", false);

        service.run(&generator, &root(), &ctx).unwrap();

        assert_eq!(
            fs.snapshot()[&root().join("README.md")],
            b"# coke\ndone\n".to_vec()
        );
    }

    #[test]
    fn rerunning_file_steps_gives_identical_tree() {
        let fs = Arc::new(FakeFs::default());
        let service = GenerationService::new(Box::new(fs.clone()), no_fetch(), no_processes());
        let generator = Generator::new("app")
            .with(Step::file("a/b.txt", "{{x}}"))
            .with(Step::file("c.txt", "static"));
        let ctx = Context::new().with("x", "1");

        service.run(&generator, &root(), &ctx).unwrap();
        let first = fs.snapshot();
        service.run(&generator, &root(), &ctx).unwrap();

        assert_eq!(first, fs.snapshot());
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn failing_middle_step_keeps_earlier_output_and_skips_later() {
        let mut fs = FakeFs::default();
        fs.fail_on = Some(root().join("f2.txt"));
        let fs = Arc::new(fs);
        let service = GenerationService::new(Box::new(fs.clone()), no_fetch(), no_processes());
        let generator = Generator::new("app")
            .with(Step::file("f1.txt", "1"))
            .with(Step::file("f2.txt", "2"))
            .with(Step::file("f3.txt", "3"));

        let err = service
            .run(&generator, &root(), &Context::new())
            .unwrap_err();

        let files = fs.snapshot();
        assert!(files.contains_key(&root().join("f1.txt")));
        assert!(!files.contains_key(&root().join("f3.txt")));
        assert_eq!(err.step_path(), [1]);
        assert_eq!(err.failure_kind(), FailureKind::Io);
        match err.root_cause() {
            HatchError::Application(ApplicationError::Filesystem { path, .. }) => {
                assert_eq!(path, Path::new("f2.txt"));
            }
            other => panic!("unexpected cause {other:?}"),
        }
    }

    #[test]
    fn parse_error_is_attributed_to_its_step() {
        let fs = Arc::new(FakeFs::default());
        let service = GenerationService::new(Box::new(fs.clone()), no_fetch(), no_processes());
        let generator = Generator::new("app")
            .with(Step::file("ok.txt", "fine"))
            .with(Step::file("bad.txt", "{{#if x}}never closed"));

        let err = service
            .run(&generator, &root(), &Context::new())
            .unwrap_err();

        assert_eq!(err.failure_kind(), FailureKind::Parse);
        assert!(err.to_string().contains("step 1 (file bad.txt)"));
        assert!(!fs.exists(&root().join("bad.txt")));
    }

    #[test]
    fn remote_file_failure_writes_nothing() {
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().never();
        fs.expect_write_file().never();

        let mut fetcher = MockFetcher::new();
        fetcher
            .expect_fetch()
            .withf(|url, timeout| url == "https://example.com/logo.svg" && *timeout == DEFAULT_FETCH_TIMEOUT)
            .times(1)
            .returning(|_, _| Err(FetchFailure::Status(404)));

        let service = GenerationService::new(Box::new(fs), Box::new(fetcher), no_processes());
        let generator = Generator::new("app").with(Step::remote_file(
            "assets/images/logo.svg",
            "https://example.com/logo.svg",
        ));

        let err = service
            .run(&generator, &root(), &Context::new())
            .unwrap_err();

        assert_eq!(err.failure_kind(), FailureKind::Fetch);
        assert!(!err.is_retryable());
    }

    #[test]
    fn remote_file_bytes_are_written_verbatim() {
        let fs = Arc::new(FakeFs::default());
        let mut fetcher = MockFetcher::new();
        fetcher
            .expect_fetch()
            .with(always(), eq(Duration::from_secs(5)))
            .returning(|_, _| Ok(b"<svg>{{not a tag}}</svg>".to_vec()));

        let service = GenerationService::new(Box::new(fs.clone()), Box::new(fetcher), no_processes());
        let generator = Generator::new("app").with(
            Step::remote_file("logo.svg", "https://example.com/logo.svg")
                .with_timeout(Duration::from_secs(5)),
        );

        service.run(&generator, &root(), &Context::new()).unwrap();

        assert_eq!(
            fs.snapshot()[&root().join("logo.svg")],
            b"<svg>{{not a tag}}</svg>".to_vec()
        );
    }

    #[test]
    fn command_runs_in_root_and_surfaces_exit_code() {
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().returning(|_| Ok(()));

        let mut runner = MockProcessRunner::new();
        runner
            .expect_run()
            .withf(|spec| {
                spec.program == "go"
                    && spec.args == ["get", "-t", "./..."]
                    && spec.cwd == Path::new("/work/coke")
                    && spec.output == OutputMode::Capture
            })
            .times(1)
            .returning(|_| Ok(ProcessOutput::exited(2)));

        let service = GenerationService::new(Box::new(fs), no_fetch(), Box::new(runner))
            .with_output_mode(OutputMode::Capture);
        let generator = Generator::new("app").with(Step::command("go", ["get", "-t", "./..."]));

        let err = service
            .run(&generator, &root(), &Context::new())
            .unwrap_err();

        assert_eq!(err.exit_code(), Some(2));
        assert_eq!(err.failure_kind(), FailureKind::Command);
    }

    #[test]
    fn missing_executable_has_no_exit_code() {
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        let mut runner = MockProcessRunner::new();
        runner
            .expect_run()
            .returning(|_| Err(SpawnFailure::NotFound));

        let service = GenerationService::new(Box::new(fs), no_fetch(), Box::new(runner));
        let generator = Generator::new("app").with(Step::command("goimports", ["-w", "."]));

        let err = service
            .run(&generator, &root(), &Context::new())
            .unwrap_err();

        assert_eq!(err.failure_kind(), FailureKind::Command);
        assert_eq!(err.exit_code(), None);
        assert!(err.to_string().contains("executable not found"));
    }

    #[test]
    fn signalled_command_fails_without_exit_code() {
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        let mut runner = MockProcessRunner::new();
        runner.expect_run().times(1).returning(|_| {
            Ok(ProcessOutput {
                exit_code: None,
                ..ProcessOutput::default()
            })
        });

        let service = GenerationService::new(Box::new(fs), no_fetch(), Box::new(runner));
        let generator = Generator::new("app")
            .with(Step::command("npm", ["install"]))
            .with(Step::command("go", ["fmt"]));

        let err = service
            .run(&generator, &root(), &Context::new())
            .unwrap_err();

        assert_eq!(err.failure_kind(), FailureKind::Command);
        assert_eq!(err.step_path(), [0]);
        match err.root_cause() {
            HatchError::Application(ApplicationError::Command {
                program,
                exit_code,
                reason,
            }) => {
                assert_eq!(program, "npm");
                assert_eq!(*exit_code, None);
                assert_eq!(reason, "terminated by signal");
            }
            other => panic!("unexpected cause {other:?}"),
        }
    }

    #[test]
    fn nested_failure_names_both_generators() {
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().returning(|_, _| Ok(()));
        let mut runner = MockProcessRunner::new();
        runner
            .expect_run()
            .returning(|_| Ok(ProcessOutput::exited(1)));

        let soda = Generator::new("soda")
            .with(Step::file("database.yml", "db"))
            .with(Step::command("go", ["get", "github.com/markbates/pop/..."]));
        let app = Generator::new("app")
            .with(Step::file("main.go", "package main"))
            .with(soda);

        let service = GenerationService::new(Box::new(fs), no_fetch(), Box::new(runner));
        let err = service.run(&app, &root(), &Context::new()).unwrap_err();

        assert_eq!(err.step_path(), [1, 1]);
        let message = err.to_string();
        assert!(message.starts_with("step 1 (generator soda) of 'app' failed"));
        assert!(message.contains("of 'soda' failed"));
        match &err {
            HatchError::Application(ApplicationError::StepFailed { kind, .. }) => {
                assert_eq!(*kind, StepKind::Generator);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn empty_nested_generator_is_a_no_op() {
        let fs = Arc::new(FakeFs::default());
        let service = GenerationService::new(Box::new(fs.clone()), no_fetch(), no_processes());
        let app = Generator::new("app")
            .with(Generator::new("empty"))
            .with(Step::file("after.txt", "x"));

        service.run(&app, &root(), &Context::new()).unwrap();
        assert_eq!(fs.snapshot().len(), 1);
    }

    #[test]
    fn cancellation_is_checked_between_steps() {
        let token = CancellationToken::new();

        struct CancelAfterFirst(CancellationToken);
        impl StepObserver for CancelAfterFirst {
            fn step_finished(&self, _event: &StepEvent, _outcome: StepOutcome) {
                self.0.cancel();
            }
        }

        let fs = Arc::new(FakeFs::default());
        let service = GenerationService::new(Box::new(fs.clone()), no_fetch(), no_processes())
            .with_cancellation(token.clone())
            .with_observer(Box::new(CancelAfterFirst(token.clone())));
        let generator = Generator::new("app")
            .with(Step::file("one.txt", "1"))
            .with(Step::file("two.txt", "2"));

        let err = service
            .run(&generator, &root(), &Context::new())
            .unwrap_err();

        assert!(token.is_cancelled());
        assert_eq!(err.failure_kind(), FailureKind::Cancelled);
        assert!(matches!(
            err,
            HatchError::Application(ApplicationError::Cancelled { completed: 1, .. })
        ));
        assert_eq!(fs.snapshot().len(), 1);
    }

    #[test]
    fn observer_sees_every_step_including_nested() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let fs = Arc::new(FakeFs::default());
        let service = GenerationService::new(Box::new(fs), no_fetch(), no_processes())
            .with_observer(Box::new(RecordingObserver(seen.clone())));
        let app = Generator::new("app")
            .with(Step::file("a", ""))
            .with(Generator::new("inner").with(Step::file("b", "")));

        service.run(&app, &root(), &Context::new()).unwrap();

        assert_eq!(
            *seen.lock().unwrap(),
            [
                (0, 0, StepOutcome::Succeeded),
                (1, 0, StepOutcome::Succeeded),
                (0, 1, StepOutcome::Succeeded),
            ]
        );
    }
}
