//! Database support generator (pop/soda).

use hatch_core::domain::{Generator, Step};

pub fn soda_generator() -> Generator {
    Generator::new("soda")
        .with(Step::file(
            "database.yml",
            include_str!("templates/soda/database.yml.tmpl"),
        ))
        .with(Step::file(
            "models/models.go",
            include_str!("templates/soda/models.go.tmpl"),
        ))
        .with(Step::command("go", ["get", "github.com/markbates/pop/..."]))
        .with(Step::command("go", ["install", "github.com/markbates/pop/soda"]))
}
