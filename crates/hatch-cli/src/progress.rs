//! Terminal progress for generator runs.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use hatch_core::application::ports::{StepEvent, StepObserver, StepOutcome};
use hatch_core::domain::StepKind;

/// Spinner that shows the running step and prints one line per finished step.
///
/// Clones share the same spinner.
#[derive(Clone)]
pub struct ProgressObserver {
    bar: ProgressBar,
}

impl ProgressObserver {
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            bar.set_style(style);
        }
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar }
    }

    /// Remove the spinner line. Call once the run is over.
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl StepObserver for ProgressObserver {
    fn step_started(&self, event: &StepEvent) {
        self.bar.set_message(status_line(event));
    }

    fn step_finished(&self, event: &StepEvent, outcome: StepOutcome) {
        // Nested generators report their own steps.
        if event.kind == StepKind::Generator && outcome == StepOutcome::Succeeded {
            return;
        }
        let mark = match outcome {
            StepOutcome::Succeeded => "\u{2713}",
            StepOutcome::Failed => "\u{2717}",
        };
        self.bar.println(format!("{mark} {}", status_line(event)));
    }
}

fn status_line(event: &StepEvent) -> String {
    let indent = "  ".repeat(event.depth);
    format!("{indent}{:<11} {}", event.kind.as_str(), event.description)
}
