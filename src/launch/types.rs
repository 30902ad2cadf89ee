use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::docker::DockerEnvironment;

/// Input to the launch pipeline.
pub struct LaunchInput {
    pub config: Config,
    /// Directory holding both build contexts and the optional `.env`.
    pub base_dir: PathBuf,
}

/// Identifies one step of the launch sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    EngineCheck,
    PortCheck,
    EnvFile,
    BuildMcp,
    BuildApp,
    Replace,
    Run,
}

impl Phase {
    /// Banner printed when the phase starts. The quick checks have none.
    pub fn banner(&self) -> Option<&'static str> {
        match self {
            Phase::BuildMcp => Some("Building Archon MCP container"),
            Phase::BuildApp => Some("Building main Archon container"),
            Phase::Replace => Some("Stopping existing Archon container"),
            Phase::Run => Some("Starting Archon container"),
            Phase::EngineCheck | Phase::PortCheck | Phase::EnvFile => None,
        }
    }
}

/// Events emitted by the launch orchestrator.
#[derive(Debug)]
pub enum LaunchEvent {
    PhaseStarted(Phase),
    Log { phase: Phase, line: String },
    PhaseFinished { phase: Phase, success: bool },
    Completed(LaunchReport),
    Aborted(String),
}

/// Summary of a finished launch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchReport {
    pub environment: DockerEnvironment,
    pub env_file: Option<String>,
    pub container: String,
    pub ui_port: u16,
    pub phases: Phases,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Phases {
    pub build_mcp: Option<StepResult>,
    pub build_app: Option<StepResult>,
    /// `None` when no stale instance was found and the step was skipped.
    pub replace: Option<StepResult>,
    pub run: Option<StepResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepResult {
    pub status: String,
    pub log: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_and_run_phases_have_banners() {
        assert!(Phase::BuildMcp.banner().is_some());
        assert!(Phase::BuildApp.banner().is_some());
        assert!(Phase::Replace.banner().is_some());
        assert!(Phase::Run.banner().is_some());
    }

    #[test]
    fn check_phases_are_quiet() {
        assert!(Phase::EngineCheck.banner().is_none());
        assert!(Phase::PortCheck.banner().is_none());
        assert!(Phase::EnvFile.banner().is_none());
    }
}
