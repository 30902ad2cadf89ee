use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One invocation of the engine CLI. `args` is the full argument list
/// passed to `docker`; `cwd` is the build context for build steps (the
/// launch layer is responsible for assembling both).
pub struct EngineCommand {
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
}

/// Outcome of one engine invocation.
#[derive(Debug)]
pub struct CommandResult {
    pub success: bool,
    pub exit_code: Option<i32>,
    pub log: String,
}

/// Streamed output from a running engine command.
#[derive(Debug)]
pub enum OutputLine {
    Stdout(String),
    Stderr(String),
    Done(CommandResult),
}

/// Host flavor the engine runs under. Picks the host-gateway alias flag
/// and the final access instructions, nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DockerEnvironment {
    Standard,
    DockerDesktop,
    DockerToolbox,
}

impl DockerEnvironment {
    pub fn as_str(&self) -> &'static str {
        match self {
            DockerEnvironment::Standard => "standard",
            DockerEnvironment::DockerDesktop => "docker-desktop",
            DockerEnvironment::DockerToolbox => "docker-toolbox",
        }
    }
}
