// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Hatch.
//!
//! This module contains pure logic with no I/O: context values, the template
//! renderer, steps, and generators. Filesystem, network, and process access
//! happen behind the ports in `crate::application::ports`.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **Few external crates**: thiserror, serde, and handlebars for rendering
//! - **Immutable entities**: Steps are Clone + PartialEq and never change once added
pub mod entities;
pub mod error;
pub mod template;
pub mod value;

// Re-exports for convenience
pub use entities::{
    CommandStep, FileStep, Generator, PlannedStep, RelativePath, RemoteFileStep, Step, StepKind,
};
pub use error::{DomainError, ErrorCategory};
pub use template::{Template, render};
pub use value::{Context, Value};

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Cross-module behaviour
    // ========================================================================

    #[test]
    fn file_bodies_render_against_shared_context() {
        let ctx = Context::new()
            .with("name", "coke")
            .with("actionsPath", "github.com/me/coke/actions");

        let generator = Generator::new("app")
            .with(Step::file("README.md", "# {{name}}\n"))
            .with(Step::file("main.go", "import \"{{actionsPath}}\"\n"));

        let rendered: Vec<String> = generator
            .steps()
            .iter()
            .filter_map(|step| match step {
                Step::File(file) => Some(render(&file.body, &ctx).unwrap()),
                _ => None,
            })
            .collect();

        assert_eq!(
            rendered,
            ["# coke\n", "import \"github.com/me/coke/actions\"\n"]
        );
    }

    #[test]
    fn nested_generator_is_one_step() {
        let soda = Generator::new("soda")
            .with(Step::file("database.yml", ""))
            .with(Step::command("go", ["get", "github.com/markbates/pop/..."]));
        let app = Generator::new("app").with(soda);

        assert_eq!(app.len(), 1);
        assert_eq!(app.plan().len(), 3);
    }
}
