//! `hatch render` — render one template file to stdout.

use std::fs;
use std::path::Path;

use tracing::{debug, instrument};

use hatch_core::{domain::Context, error::HatchError};

use crate::{
    cli::RenderArgs,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

#[instrument(skip_all, fields(file = %args.file.display()))]
pub fn execute(args: RenderArgs, output: OutputManager) -> CliResult<()> {
    let body = read_input(&args.file)?;

    let mut context = match &args.context {
        Some(path) => load_context(path)?,
        None => Context::new(),
    };
    context.merge(args.vars.into_iter().collect());
    debug!(variables = context.len(), "Context assembled");

    let rendered = hatch_core::domain::render(&body, &context).map_err(HatchError::from)?;
    output.raw(&rendered)?;
    Ok(())
}

fn read_input(path: &Path) -> CliResult<String> {
    if !path.exists() {
        return Err(CliError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    fs::read_to_string(path).with_cli_context(|| format!("Failed to read '{}'", path.display()))
}

/// Parse a JSON object into a context. Nested objects and arrays are kept
/// so `{{#each}}` and dotted paths work.
fn load_context(path: &Path) -> CliResult<Context> {
    let text = read_input(path)?;
    serde_json::from_str(&text).map_err(|e| CliError::InvalidInput {
        message: format!("'{}' is not a JSON object: {e}", path.display()),
        source: Some(Box::new(e)),
    })
}
