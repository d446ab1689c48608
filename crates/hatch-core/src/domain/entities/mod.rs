pub mod common;
pub mod generator;
pub mod step;

use crate::domain::error::DomainError;

pub use common::RelativePath;
pub use generator::{Generator, PlannedStep};
pub use step::{CommandStep, FileStep, RemoteFileStep, Step, StepKind};
