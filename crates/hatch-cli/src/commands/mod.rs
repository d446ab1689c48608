//! Command handlers, one module per subcommand.
//!
//! Each handler takes its parsed arguments plus whatever shared state it
//! needs and returns a [`crate::error::CliResult`].

pub mod completions;
pub mod config;
pub mod init;
pub mod new;
pub mod render;
