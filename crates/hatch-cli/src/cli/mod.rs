//! CLI argument definitions using the clap derive API.
//!
//! Argument names, aliases, help text and value enums live here. Commands
//! in `crate::commands` receive the parsed structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use hatch_core::domain::Value;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name     = "hatch",
    bin_name = "hatch",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Generate a ready-to-run web application skeleton",
    long_about = "Hatch renders project files from templates, downloads \
                  assets and runs setup commands as one ordered pipeline. \
                  It stops at the first failing step and leaves everything \
                  written so far in place.",
    after_help = "EXAMPLES:\n\
        \x20 hatch new coke --import-path github.com/me/coke\n\
        \x20 hatch new coke --skip-pop --skip-webpack --dry-run\n\
        \x20 hatch render templates/index.html --var name=coke\n\
        \x20 hatch completions bash > ~/.local/share/bash-completion/completions/hatch",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new application.
    #[command(
        visible_alias = "n",
        about = "Create a new application",
        after_help = "EXAMPLES:\n\
            \x20 hatch new coke\n\
            \x20 hatch new coke --import-path github.com/me/coke --yes\n\
            \x20 hatch new coke --skip-pop --var version=dev"
    )]
    New(NewArgs),

    /// Render one template file to stdout.
    #[command(
        about = "Render a template file to stdout",
        after_help = "EXAMPLES:\n\
            \x20 hatch render README.md.tmpl --var name=coke\n\
            \x20 hatch render app.go.tmpl --context ctx.json --var withPop=false"
    )]
    Render(RenderArgs),

    /// Initialise a Hatch configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 hatch init\n\
            \x20 hatch init --force\n\
            \x20 hatch --config ./hatch.toml init"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 hatch completions bash > ~/.local/share/bash-completion/completions/hatch\n\
            \x20 hatch completions zsh  > ~/.zfunc/_hatch\n\
            \x20 hatch completions fish > ~/.config/fish/completions/hatch.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the configuration.
    #[command(
        about = "Configuration inspection",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 hatch config get defaults.with_pop\n\
            \x20 hatch config list\n\
            \x20 hatch config path"
    )]
    Config(ConfigCommands),
}

// ── new ───────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct NewArgs {
    /// Project name or path. A plain name creates `./name`; `../foo`
    /// places the project one level up.
    #[arg(value_name = "NAME", help = "Project name or path")]
    pub name: String,

    /// Go import path of the new project.
    #[arg(
        long = "import-path",
        value_name = "PATH",
        help = "Go import path (default: <defaults.import_prefix>/<name>)"
    )]
    pub import_path: Option<String>,

    /// Leave out database support.
    #[arg(long = "skip-pop", help = "Skip database (pop/soda) support")]
    pub skip_pop: bool,

    /// Leave out the front-end asset pipeline.
    #[arg(long = "skip-webpack", help = "Skip webpack asset pipeline")]
    pub skip_webpack: bool,

    /// Extra or overriding template values.
    #[arg(
        long = "var",
        value_name = "KEY=VALUE",
        value_parser = parse_var,
        help = "Set a template value (repeatable)"
    )]
    pub vars: Vec<(String, Value)>,

    #[arg(
        short = 'y',
        long = "yes",
        help = "Skip confirmation and create immediately"
    )]
    pub yes: bool,

    /// Generate into an existing directory. Files with the same name are
    /// replaced; nothing else is removed.
    #[arg(long = "force", help = "Generate into an existing directory")]
    pub force: bool,

    #[arg(long = "dry-run", help = "Print the steps without running them")]
    pub dry_run: bool,
}

// ── render ────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Template file to render.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// JSON object used as the base context.
    #[arg(long = "context", value_name = "FILE", help = "JSON context file")]
    pub context: Option<PathBuf>,

    /// Values layered over the context file.
    #[arg(
        long = "var",
        value_name = "KEY=VALUE",
        value_parser = parse_var,
        help = "Set a template value (repeatable)"
    )]
    pub vars: Vec<(String, Value)>,
}

// ── init ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `network.fetch_timeout_secs`.
        key: String,
    },
    /// Print the effective configuration.
    List,
    /// Print the path of the configuration file in use.
    Path,
}

// ── value parsers ─────────────────────────────────────────────────────────────

/// Parse `key=value`. The value may itself contain `=`; a bare `true` or
/// `false` is a boolean.
pub fn parse_var(raw: &str) -> Result<(String, Value), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), Value::from_literal(value)))
        }
        _ => Err(format!("expected KEY=VALUE, got '{raw}'")),
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
