//! Built-in generators.
//!
//! Each blueprint is a function returning a fully composed [`Generator`].
//! Template bodies live next to this module under `templates/` and are
//! compiled into the binary with `include_str!`.
//!
//! [`Generator`]: hatch_core::domain::Generator

pub mod app;
pub mod soda;
pub mod webpack;

pub use app::{AppOptions, app_context, app_generator};
pub use soda::soda_generator;
pub use webpack::webpack_generator;
