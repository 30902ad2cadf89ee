// Launch pipeline: command assembly, sequential orchestration, events.

pub mod commands;
pub mod orchestrator;
pub mod types;

pub use orchestrator::run_launch;
pub use types::{LaunchEvent, LaunchInput, LaunchReport, Phase, Phases, StepResult};
