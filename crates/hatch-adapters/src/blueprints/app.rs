//! Full web application generator.
//!
//! Produces the Go/Buffalo project skeleton: source files, HTML templates,
//! the logo (downloaded), tool installs, optional webpack and database
//! sub-generators, then dependency fetch and formatting.

use hatch_core::domain::{Context, Generator, Step};

use super::{soda::soda_generator, webpack::webpack_generator};

/// Logo downloaded into `assets/images/logo.svg`.
pub const LOGO_URL: &str = "https://raw.githubusercontent.com/gobuffalo/buffalo/master/logo.svg";

/// Tools fetched and installed into `$GOPATH/bin`, as `(go get, go install)` targets.
const TOOLS: &[(&str, &str)] = &[
    ("github.com/markbates/refresh/...", "github.com/markbates/refresh"),
    ("github.com/markbates/grift/...", "github.com/markbates/grift"),
    ("github.com/motemen/gore", "github.com/motemen/gore"),
];

/// Inputs for [`app_generator`] and [`app_context`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppOptions {
    /// Project name; also the directory and binary name.
    pub name: String,
    /// Go import path of the project root, e.g. `github.com/me/coke`.
    pub import_path: String,
    pub with_pop: bool,
    pub with_webpack: bool,
    /// Pass `-v` to the final `go get`.
    pub verbose: bool,
    /// Version string shown on the generated home page.
    pub version: String,
    /// Copyright year; the key is left unset when `None`.
    pub year: Option<i32>,
}

impl AppOptions {
    /// Options with both sub-generators enabled and the import path equal to
    /// the name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            import_path: name.clone(),
            name,
            with_pop: true,
            with_webpack: true,
            verbose: false,
            version: hatch_core::VERSION.to_string(),
            year: None,
        }
    }

    pub fn actions_path(&self) -> String {
        format!("{}/actions", self.import_path.trim_end_matches('/'))
    }

    pub fn models_path(&self) -> String {
        format!("{}/models", self.import_path.trim_end_matches('/'))
    }
}

/// Context keys the app templates read.
pub fn app_context(options: &AppOptions) -> Context {
    let mut ctx = Context::new()
        .with("name", options.name.as_str())
        .with("titleName", title_case(&options.name))
        .with("importPath", options.import_path.as_str())
        .with("actionsPath", options.actions_path())
        .with("modelsPath", options.models_path())
        .with("withPop", options.with_pop)
        .with("withWebpack", options.with_webpack)
        .with("version", options.version.as_str());
    if let Some(year) = options.year {
        ctx.insert("year", year.to_string());
    }
    ctx
}

pub fn app_generator(options: &AppOptions) -> Generator {
    let mut g = Generator::new("app");

    g.add(Step::file("README.md", include_str!("templates/app/README.md.tmpl")))
        .add(Step::file("main.go", include_str!("templates/app/main.go.tmpl")))
        .add(Step::file("Procfile", include_str!("templates/app/Procfile.tmpl")))
        .add(Step::file(
            "Procfile.development",
            include_str!("templates/app/Procfile.development.tmpl"),
        ))
        .add(Step::file(
            ".buffalo.dev.yml",
            include_str!("templates/app/buffalo.dev.yml.tmpl"),
        ))
        .add(Step::file("actions/app.go", include_str!("templates/app/app.go.tmpl")))
        .add(Step::file("actions/home.go", include_str!("templates/app/home.go.tmpl")))
        .add(Step::file(
            "actions/home_test.go",
            include_str!("templates/app/home_test.go.tmpl"),
        ))
        .add(Step::file("actions/render.go", include_str!("templates/app/render.go.tmpl")))
        .add(Step::file("grifts/routes.go", include_str!("templates/app/routes.go.tmpl")))
        .add(Step::file(
            "templates/index.html",
            include_str!("templates/app/index.html.tmpl"),
        ))
        .add(Step::file(
            "templates/application.html",
            include_str!("templates/app/application.html.tmpl"),
        ))
        .add(Step::remote_file("assets/images/logo.svg", LOGO_URL))
        .add(Step::file(".gitignore", include_str!("templates/app/gitignore.tmpl")));

    for (get, install) in TOOLS {
        g.add(Step::command("go", ["get", get]))
            .add(Step::command("go", ["install", install]));
    }

    if options.with_webpack {
        g.add(webpack_generator());
    }
    if options.with_pop {
        g.add(soda_generator());
    }

    let mut get_args = vec!["get", "-t"];
    if options.verbose {
        get_args.push("-v");
    }
    get_args.push("./...");
    g.add(Step::command("go", get_args));

    g.add(Step::command("goimports", ["-w", "."]));
    g
}

/// `my_cool-app` -> `My Cool App`.
fn title_case(name: &str) -> String {
    name.split(['_', '-', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
