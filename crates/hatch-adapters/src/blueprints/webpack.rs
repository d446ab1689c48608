//! Front-end asset pipeline generator.

use hatch_core::domain::{Generator, Step};

/// Dev dependencies installed by the final `npm install` step.
pub const NPM_PACKAGES: &[&str] = &[
    "webpack",
    "sass-loader",
    "css-loader",
    "style-loader",
    "node-sass",
    "babel-loader",
    "extract-text-webpack-plugin",
    "babel",
    "babel-core",
    "url-loader",
    "file-loader",
    "jquery",
    "bootstrap",
    "path",
    "font-awesome",
    "npm-install-webpack-plugin",
    "jquery-ujs",
    "copy-webpack-plugin",
    "expose-loader",
];

pub fn webpack_generator() -> Generator {
    let install = ["install", "--save-dev"]
        .into_iter()
        .chain(NPM_PACKAGES.iter().copied());

    Generator::new("webpack")
        .with(Step::file(
            "package.json",
            include_str!("templates/webpack/package.json.tmpl"),
        ))
        .with(Step::file(
            "webpack.config.js",
            include_str!("templates/webpack/webpack.config.js.tmpl"),
        ))
        .with(Step::file(
            "assets/js/application.js",
            include_str!("templates/webpack/application.js.tmpl"),
        ))
        .with(Step::file(
            "assets/css/application.scss",
            include_str!("templates/webpack/application.scss.tmpl"),
        ))
        .with(Step::command("npm", install))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hatch_core::domain::{Context, StepKind, render};

    #[test]
    fn ends_with_npm_install() {
        let generator = webpack_generator();
        let last = generator.steps().last().unwrap();
        assert_eq!(last.kind(), StepKind::Command);
        assert!(last.describe().starts_with("npm install --save-dev webpack "));
    }

    #[test]
    fn package_json_carries_project_name() {
        let body = include_str!("templates/webpack/package.json.tmpl");
        let rendered = render(body, &Context::new().with("name", "coke")).unwrap();
        assert!(rendered.contains(r#""name": "coke""#));
    }
}
