use std::process::{Command, Stdio};

use anyhow::{Context, Result, bail};

use super::types::DockerEnvironment;

/// Verify that the `docker` binary exists and the daemon is reachable.
///
/// The two failure classes get distinct messages: a missing binary fails
/// the version check, an unreachable daemon fails the info check.
pub fn ensure_available() -> Result<()> {
    let version = Command::new("docker")
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .context("docker is not installed or not in PATH")?;

    if !version.success() {
        bail!("`docker --version` failed (exit {version})");
    }

    let info = Command::new("docker")
        .arg("info")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .context("failed to invoke `docker info`")?;

    if !info.success() {
        bail!("docker daemon is not running; start Docker Desktop or the docker service");
    }

    Ok(())
}

/// Pick the host flavor. Windows distinguishes Docker Desktop (WSL2) from
/// the VirtualBox-backed Docker Toolbox by inspecting `docker info`
/// output; every other platform is standard.
pub fn detect_environment() -> DockerEnvironment {
    if !cfg!(windows) {
        return DockerEnvironment::Standard;
    }

    let output = match Command::new("docker").arg("info").output() {
        Ok(out) if out.status.success() => out,
        // A failed check resolves the same way as ambiguous output.
        _ => return DockerEnvironment::DockerDesktop,
    };

    classify_info(&String::from_utf8_lossy(&output.stdout))
}

/// Substring rules for `docker info` text, split out so they are testable
/// on any platform.
fn classify_info(info: &str) -> DockerEnvironment {
    let info = info.to_lowercase();
    if info.contains("wsl") || info.contains("microsoft") {
        return DockerEnvironment::DockerDesktop;
    }
    if info.contains("virtualbox") || info.contains("docker machine") {
        return DockerEnvironment::DockerToolbox;
    }
    DockerEnvironment::DockerDesktop
}

/// Returns `["--add-host", "host.docker.internal:host-gateway"]` under
/// Docker Desktop so the container can resolve the host machine. Empty for
/// the other flavors (Toolbox reaches the host via the VM address).
pub fn host_alias_args(env: DockerEnvironment) -> Vec<String> {
    match env {
        DockerEnvironment::DockerDesktop => vec![
            "--add-host".into(),
            "host.docker.internal:host-gateway".into(),
        ],
        DockerEnvironment::Standard | DockerEnvironment::DockerToolbox => Vec::new(),
    }
}
