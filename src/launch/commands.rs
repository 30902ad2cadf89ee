use std::path::Path;

use crate::config::Config;
use crate::docker::{self, DockerEnvironment, EngineCommand};

/// Build the MCP server image from the `mcp/` subdirectory context.
pub fn build_mcp_command(cfg: &Config, base_dir: &Path) -> EngineCommand {
    EngineCommand {
        args: vec!["build".into(), "-t".into(), cfg.mcp_image.clone(), ".".into()],
        cwd: Some(base_dir.join(&cfg.mcp_context)),
    }
}

/// Build the main application image from the working-directory context.
pub fn build_app_command(cfg: &Config, base_dir: &Path) -> EngineCommand {
    EngineCommand {
        args: vec!["build".into(), "-t".into(), cfg.app_image.clone(), ".".into()],
        cwd: Some(base_dir.to_path_buf()),
    }
}

/// List running instances of the named container; prints ids only.
pub fn ps_command(cfg: &Config) -> EngineCommand {
    EngineCommand {
        args: vec![
            "ps".into(),
            "-q".into(),
            "--filter".into(),
            format!("name={}", cfg.container_name),
        ],
        cwd: None,
    }
}

pub fn stop_command(cfg: &Config) -> EngineCommand {
    EngineCommand {
        args: vec!["stop".into(), cfg.container_name.clone()],
        cwd: None,
    }
}

pub fn rm_command(cfg: &Config) -> EngineCommand {
    EngineCommand {
        args: vec!["rm".into(), cfg.container_name.clone()],
        cwd: None,
    }
}

/// Start the detached application container: both port mappings, the
/// host-gateway alias where the environment calls for it, and the
/// environment file when one was discovered. The image goes last.
pub fn run_command(
    cfg: &Config,
    env: DockerEnvironment,
    env_file: Option<&Path>,
) -> EngineCommand {
    let mut args = vec![
        "run".into(),
        "-d".into(),
        "--name".into(),
        cfg.container_name.clone(),
        "-p".into(),
        format!("{0}:{0}", cfg.ui_port),
        "-p".into(),
        format!("{0}:{0}", cfg.mcp_port),
    ];
    args.extend(docker::host_alias_args(env));
    if let Some(path) = env_file {
        args.extend(["--env-file".into(), path.display().to_string()]);
    }
    args.push(cfg.app_image.clone());

    EngineCommand { args, cwd: None }
}
