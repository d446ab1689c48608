//! Template rendering on top of `handlebars`.
//!
//! Supported syntax:
//!
//! ```text
//! {{ name }}                          variable (dotted paths allowed)
//! {{#if withPop}} ... {{else}} ... {{/if}}
//! {{#each routes as |r|}} {{r.path}} {{@index}} {{../name}} {{/each}}
//! {{! comment }}
//! \{{ yield }}                        emitted as "{{ yield }}"
//! ```
//!
//! The registry runs in non-strict mode: a variable that does not resolve
//! renders as an empty string. Generated templates routinely test optional
//! feature flags, so a missing key is never an error.
//!
//! Output is never HTML-escaped. Bodies are source files, not markup served
//! to a browser.
//!
//! `\{{ ... }}` is copied through with its backslash removed, ready for the
//! generated application's own runtime pass. Block tags that sit alone on a
//! line take the whole line with them.

use handlebars::{Handlebars, TemplateError, TemplateErrorReason};

use crate::domain::{error::DomainError, value::Context};

const BODY: &str = "body";

/// A compiled template, reusable across contexts.
#[derive(Debug, Clone)]
pub struct Template {
    registry: Handlebars<'static>,
}

/// Render `body` against `context` in one go.
pub fn render(body: &str, context: &Context) -> Result<String, DomainError> {
    Template::parse(body)?.render(context)
}

impl Template {
    /// Compile template source, validating block nesting.
    pub fn parse(source: &str) -> Result<Self, DomainError> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(false);
        registry.register_escape_fn(handlebars::no_escape);
        registry
            .register_template_string(BODY, source)
            .map_err(|err| parse_error(err, source))?;
        Ok(Self { registry })
    }

    /// Render against a context.
    pub fn render(&self, context: &Context) -> Result<String, DomainError> {
        self.registry
            .render(BODY, context)
            .map_err(|err| DomainError::Render {
                reason: err.to_string(),
            })
    }
}

fn parse_error(err: TemplateError, source: &str) -> DomainError {
    let (line, column) = err.pos().unwrap_or((0, 0));
    match err.reason() {
        TemplateErrorReason::MismatchingClosedHelper(open, close) => DomainError::MismatchedClose {
            expected: open.clone(),
            found: close.clone(),
            line,
        },
        other => match unclosed_block(source) {
            Some((block, line)) => DomainError::UnterminatedBlock { block, line },
            None => DomainError::InvalidSyntax {
                line,
                column,
                reason: other.to_string(),
            },
        },
    }
}

/// Innermost `{{#block}}` left open at the end of `source`, with the line it
/// opened on. Handlebars only reports where input ran out.
fn unclosed_block(source: &str) -> Option<(String, usize)> {
    let mut open: Vec<(&str, usize)> = Vec::new();
    let mut from = 0;

    while let Some(found) = source[from..].find("{{") {
        let start = from + found;
        from = start + 2;

        let before = &source[..start];
        if before.ends_with('\\') && !before.ends_with("\\\\") {
            continue;
        }
        let Some(end) = source[from..].find("}}") else {
            break;
        };
        let tag = source[from..from + end].trim_start_matches('~').trim();

        if tag.starts_with('#') {
            open.push((tag, before.matches('\n').count() + 1));
        } else if let Some(name) = tag.strip_prefix('/') {
            if open.last().is_some_and(|(block, _)| block_name(block) == name.trim()) {
                open.pop();
            }
        }
    }

    open.pop().map(|(block, line)| (block.to_string(), line))
}

fn block_name(tag: &str) -> &str {
    tag.trim_start_matches('#')
        .split_whitespace()
        .next()
        .unwrap_or_default()
}
