//! Generator aggregate: an ordered list of steps.
//!
//! A generator is composed once and then handed to
//! `GenerationService::run`. Steps run strictly in the order they were
//! added. Nested generators are boxed into the step list at construction time,
//! so running one never creates new nesting.

use crate::domain::entities::step::{Step, StepKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generator {
    name: String,
    steps: Vec<Step>,
}

/// Flattened view of one step, used for dry runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedStep {
    /// Nesting depth; 0 for the top-level generator.
    pub depth: usize,
    /// Zero-based position inside its own generator.
    pub index: usize,
    pub kind: StepKind,
    pub description: String,
}

impl Generator {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            steps: Vec::new(),
        }
    }

    /// Append a step. Returns `&mut Self` for chaining.
    pub fn add(&mut self, step: impl Into<Step>) -> &mut Self {
        self.steps.push(step.into());
        self
    }

    /// By-value builder variant of [`Generator::add`].
    pub fn with(mut self, step: impl Into<Step>) -> Self {
        self.add(step);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Every step in execution order, nested generators expanded in place
    /// right after their own row.
    pub fn plan(&self) -> Vec<PlannedStep> {
        let mut rows = Vec::new();
        self.plan_into(0, &mut rows);
        rows
    }

    fn plan_into(&self, depth: usize, rows: &mut Vec<PlannedStep>) {
        for (index, step) in self.steps.iter().enumerate() {
            rows.push(PlannedStep {
                depth,
                index,
                kind: step.kind(),
                description: step.describe(),
            });
            if let Step::Generator(nested) = step {
                nested.plan_into(depth + 1, rows);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_preserves_order_and_chains() {
        let mut g = Generator::new("app");
        g.add(Step::file("a.txt", "a"))
            .add(Step::file("b.txt", "b"))
            .add(Step::command("true", Vec::<String>::new()));

        let described: Vec<_> = g.steps().iter().map(Step::describe).collect();
        assert_eq!(described, ["a.txt", "b.txt", "true"]);
    }

    #[test]
    fn duplicate_steps_are_kept() {
        let g = Generator::new("app")
            .with(Step::file("a.txt", "1"))
            .with(Step::file("a.txt", "1"));
        assert_eq!(g.len(), 2);
    }

    #[test]
    fn plan_flattens_nested_generators() {
        let nested = Generator::new("webpack").with(Step::file("package.json", "{}"));
        let g = Generator::new("app")
            .with(Step::file("main.go", ""))
            .with(nested)
            .with(Step::command("go", ["fmt"]));

        let plan = g.plan();
        let rows: Vec<_> = plan
            .iter()
            .map(|r| (r.depth, r.index, r.kind))
            .collect();
        assert_eq!(
            rows,
            [
                (0, 0, StepKind::File),
                (0, 1, StepKind::Generator),
                (1, 0, StepKind::File),
                (0, 2, StepKind::Command),
            ]
        );
        assert_eq!(plan[1].description, "webpack (1 steps)");
    }
}
