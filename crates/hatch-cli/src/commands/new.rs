//! Implementation of the `hatch new` command.
//!
//! Responsibility: turn CLI arguments and config into blueprint options, run
//! the resulting generator through the generation service, and report. No
//! generation logic lives here.

use std::io::IsTerminal as _;
use std::path::{Path, PathBuf};

use chrono::Datelike as _;
use serde::Serialize;
use tracing::{debug, info, instrument};

use hatch_adapters::{
    HttpFetcher, LocalFilesystem, SystemProcessRunner,
    blueprints::{AppOptions, app_context, app_generator},
};
use hatch_core::{
    application::{GenerationService, ports::OutputMode},
    domain::{Context, Generator, Value},
};

use crate::{
    cli::{GlobalArgs, NewArgs, OutputFormat},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
    progress::ProgressObserver,
};

/// Execute the `hatch new` command.
///
/// 1. Resolve and validate the application name / target directory
/// 2. Build blueprint options from flags and config
/// 3. Refuse an existing directory unless `--force`
/// 4. `--dry-run`: print the plan and stop
/// 5. Confirm unless `--yes`, `--quiet` or non-interactive
/// 6. Run the generator
/// 7. Print next steps
#[instrument(skip_all, fields(app = %args.name))]
pub fn execute(
    args: NewArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    // 1. Resolve project path
    let (app_name, project_path) = resolve_project_path(&args.name)?;
    validate_project_name(&app_name)?;

    // 2. Options, generator and context
    let options = build_options(&args, &global, &config, &app_name);
    let generator = app_generator(&options);
    let context = build_context(&options, &args.vars);

    debug!(
        import_path = %options.import_path,
        with_pop = options.with_pop,
        with_webpack = options.with_webpack,
        steps = generator.len(),
        "Blueprint resolved"
    );

    // 3. Existing directory
    if project_path.exists() && !args.force {
        return Err(CliError::ProjectExists { path: project_path });
    }

    // 4. Dry run: describe but do not touch anything.
    if args.dry_run {
        if output.format() != OutputFormat::Json {
            output.header(&format!(
                "Dry run: would create '{}' at {}",
                app_name,
                project_path.display()
            ))?;
        }
        output.plan(&generator.plan())?;
        return Ok(());
    }

    // 5. Confirm
    if !args.yes && !global.quiet && std::io::stdin().is_terminal() {
        show_configuration(&options, &project_path, &generator, &output)?;
        if !confirm()? {
            return Err(CliError::Cancelled);
        }
    }

    // 6. Run
    let progress = output.wants_progress().then(ProgressObserver::new);
    let service = build_service(&config, &global, &output, progress.clone())?;

    output.header(&format!("Creating '{app_name}'..."))?;
    info!(app = %app_name, path = %project_path.display(), "Generation started");

    let result = generator.run(&service, &project_path, &context);
    if let Some(progress) = &progress {
        progress.finish();
    }
    result?;

    info!(app = %app_name, "Generation completed");

    // 7. Success + next steps
    if output.format() == OutputFormat::Json {
        output.json(&Summary {
            name: &app_name,
            path: &project_path,
            import_path: &options.import_path,
            steps: generator.plan().len(),
        })?;
        return Ok(());
    }

    output.success(&format!("Application '{app_name}' created!"))?;
    output.print("")?;
    output.print("Next steps:")?;
    output.print(&format!("  cd {}", project_path.display()))?;
    if options.with_pop {
        output.print("  # edit database.yml, then: soda create -a")?;
    }
    output.print("  go run .")?;

    Ok(())
}

#[derive(Serialize)]
struct Summary<'a> {
    name: &'a str,
    path: &'a Path,
    import_path: &'a str,
    steps: usize,
}

// ── Path resolution ───────────────────────────────────────────────────────────

/// Split a user argument into the application name (last component) and
/// the directory to generate into (the whole argument).
pub fn resolve_project_path(name: &str) -> CliResult<(String, PathBuf)> {
    let path = Path::new(name);

    let app_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| CliError::InvalidProjectName {
            name: name.into(),
            reason: "cannot extract a valid application name".into(),
        })?
        .to_string();

    Ok((app_name, path.to_path_buf()))
}

fn validate_project_name(name: &str) -> CliResult<()> {
    if name.is_empty() {
        return Err(CliError::InvalidProjectName {
            name: name.into(),
            reason: "name cannot be empty".into(),
        });
    }
    if name.starts_with('.') {
        return Err(CliError::InvalidProjectName {
            name: name.into(),
            reason: "name cannot start with '.'".into(),
        });
    }
    if let Some(bad) = name
        .chars()
        .find(|c| !(c.is_alphanumeric() || *c == '-' || *c == '_'))
    {
        return Err(CliError::InvalidProjectName {
            name: name.into(),
            reason: format!("'{bad}' is not allowed"),
        });
    }
    Ok(())
}

// ── Options / context ─────────────────────────────────────────────────────────

fn build_options(
    args: &NewArgs,
    global: &GlobalArgs,
    config: &AppConfig,
    app_name: &str,
) -> AppOptions {
    let import_path = args.import_path.clone().unwrap_or_else(|| {
        match config.defaults.import_prefix.as_deref() {
            Some(prefix) if !prefix.is_empty() => {
                format!("{}/{app_name}", prefix.trim_end_matches('/'))
            }
            _ => app_name.to_string(),
        }
    });

    AppOptions {
        import_path,
        with_pop: config.defaults.with_pop && !args.skip_pop,
        with_webpack: config.defaults.with_webpack && !args.skip_webpack,
        verbose: global.verbose > 0,
        year: Some(chrono::Local::now().year()),
        ..AppOptions::new(app_name)
    }
}

/// Blueprint context with `--var` values layered on top.
fn build_context(options: &AppOptions, vars: &[(String, Value)]) -> Context {
    let mut context = app_context(options);
    context.merge(vars.iter().cloned().collect());
    context
}

fn build_service(
    config: &AppConfig,
    global: &GlobalArgs,
    output: &OutputManager,
    progress: Option<ProgressObserver>,
) -> CliResult<GenerationService> {
    let fetcher = HttpFetcher::new()?;

    // Keep stdout clean for quiet and JSON runs.
    let child_output = if global.quiet || output.format() == OutputFormat::Json {
        OutputMode::Capture
    } else {
        OutputMode::Inherit
    };

    let mut service = GenerationService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(fetcher),
        Box::new(SystemProcessRunner::new()),
    )
    .with_default_timeout(config.network.fetch_timeout())
    .with_output_mode(child_output);

    if let Some(progress) = progress {
        service = service.with_observer(Box::new(progress));
    }
    Ok(service)
}

// ── UI helpers ────────────────────────────────────────────────────────────────

fn show_configuration(
    options: &AppOptions,
    path: &Path,
    generator: &Generator,
    out: &OutputManager,
) -> CliResult<()> {
    let yes_no = |b: bool| if b { "yes" } else { "no" };
    out.header("Configuration")?;
    out.print(&format!("  Application:  {}", options.name))?;
    out.print(&format!("  Import path:  {}", options.import_path))?;
    out.print(&format!("  Database:     {}", yes_no(options.with_pop)))?;
    out.print(&format!("  Webpack:      {}", yes_no(options.with_webpack)))?;
    out.print(&format!("  Location:     {}", path.display()))?;
    out.print(&format!("  Steps:        {}", generator.plan().len()))?;
    out.print("")?;
    Ok(())
}

#[cfg(feature = "interactive")]
fn confirm() -> CliResult<bool> {
    dialoguer::Confirm::new()
        .with_prompt("Continue?")
        .default(true)
        .interact()
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation input".into(),
            source: std::io::Error::other(e),
        })
}

#[cfg(not(feature = "interactive"))]
fn confirm() -> CliResult<bool> {
    use std::io::{self, Write};

    print!("Continue? [Y/n] ");
    io::stdout().flush().map_err(|e| CliError::IoError {
        message: "failed to flush stdout".into(),
        source: e,
    })?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation input".into(),
            source: e,
        })?;

    let input = input.trim().to_ascii_lowercase();
    Ok(input.is_empty() || input == "y" || input == "yes")
}

// ── Tests ─────────────────────────────────────────────────────────────────────
