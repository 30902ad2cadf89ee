use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use tracing::warn;

use crate::docker::{self, EngineCommand, OutputLine};
use crate::{envfile, ports};

use super::commands::{
    build_app_command, build_mcp_command, ps_command, rm_command, run_command, stop_command,
};
use super::types::{LaunchEvent, LaunchInput, LaunchReport, Phase, Phases, StepResult};

/// Run the launch sequence on a background thread.
///
/// Returns a receiver that streams `LaunchEvent` values. The final event
/// is always either `Completed` or `Aborted`.
pub fn run_launch(input: LaunchInput) -> Receiver<LaunchEvent> {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        run_inner(input, tx);
    });
    rx
}

fn run_inner(input: LaunchInput, tx: Sender<LaunchEvent>) {
    let cfg = &input.config;
    let mut phases = Phases::default();

    // ── Engine check ──────────────────────────────────────────────────
    let phase = Phase::EngineCheck;
    let _ = tx.send(LaunchEvent::PhaseStarted(phase));

    if let Err(e) = docker::ensure_available() {
        let _ = tx.send(LaunchEvent::Aborted(format!("{e:#}")));
        return;
    }

    let environment = docker::detect_environment();
    let _ = tx.send(LaunchEvent::Log {
        phase,
        line: format!("Detected Docker environment: {}", environment.as_str()),
    });
    let _ = tx.send(LaunchEvent::PhaseFinished {
        phase,
        success: true,
    });

    // ── Port check ────────────────────────────────────────────────────
    let phase = Phase::PortCheck;
    let _ = tx.send(LaunchEvent::PhaseStarted(phase));

    let busy = ports::occupied(&cfg.required_ports());
    if !busy.is_empty() {
        let listed = busy
            .iter()
            .map(u16::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        let _ = tx.send(LaunchEvent::Aborted(format!(
            "ports already in use: {listed}; stop the services using them or change the port settings"
        )));
        return;
    }
    let _ = tx.send(LaunchEvent::PhaseFinished {
        phase,
        success: true,
    });

    // ── Environment file ──────────────────────────────────────────────
    let phase = Phase::EnvFile;
    let _ = tx.send(LaunchEvent::PhaseStarted(phase));

    let env_file = envfile::discover(&input.base_dir);
    let line = match &env_file {
        Some(path) => format!("Using environment file: {}", path.display()),
        None => "No .env file found. Continuing without environment variables.".to_string(),
    };
    let _ = tx.send(LaunchEvent::Log { phase, line });
    let _ = tx.send(LaunchEvent::PhaseFinished {
        phase,
        success: true,
    });

    // ── Build MCP image ───────────────────────────────────────────────
    let phase = Phase::BuildMcp;
    let _ = tx.send(LaunchEvent::PhaseStarted(phase));
    let outcome = run_step(build_mcp_command(cfg, &input.base_dir), phase, &tx);
    let _ = tx.send(LaunchEvent::PhaseFinished {
        phase,
        success: outcome.success,
    });
    phases.build_mcp = Some(outcome.to_result());
    if !outcome.success {
        let _ = tx.send(LaunchEvent::Aborted("Error building MCP container".into()));
        return;
    }

    // ── Build main image ──────────────────────────────────────────────
    let phase = Phase::BuildApp;
    let _ = tx.send(LaunchEvent::PhaseStarted(phase));
    let outcome = run_step(build_app_command(cfg, &input.base_dir), phase, &tx);
    let _ = tx.send(LaunchEvent::PhaseFinished {
        phase,
        success: outcome.success,
    });
    phases.build_app = Some(outcome.to_result());
    if !outcome.success {
        let _ = tx.send(LaunchEvent::Aborted(
            "Error building main Archon container".into(),
        ));
        return;
    }

    // ── Replace running instance (best effort) ────────────────────────
    match docker::capture(ps_command(cfg)) {
        Ok(result) if result.success => {
            if !result.log.trim().is_empty() {
                let phase = Phase::Replace;
                let _ = tx.send(LaunchEvent::PhaseStarted(phase));

                let stop = run_step(stop_command(cfg), phase, &tx);
                let rm = run_step(rm_command(cfg), phase, &tx);
                let success = stop.success && rm.success;
                if !success {
                    warn!("failed to stop or remove the previous container");
                }

                phases.replace = Some(StepResult {
                    status: if success { "pass" } else { "fail" }.to_string(),
                    log: format!("{}{}", stop.log, rm.log),
                });
                let _ = tx.send(LaunchEvent::PhaseFinished { phase, success });
            }
        }
        Ok(result) => {
            warn!(exit_code = ?result.exit_code, "stale-instance query failed");
        }
        Err(e) => {
            warn!("stale-instance query failed: {e:#}");
        }
    }

    // ── Run ───────────────────────────────────────────────────────────
    let phase = Phase::Run;
    let _ = tx.send(LaunchEvent::PhaseStarted(phase));
    let outcome = run_step(
        run_command(cfg, environment, env_file.as_deref()),
        phase,
        &tx,
    );
    let _ = tx.send(LaunchEvent::PhaseFinished {
        phase,
        success: outcome.success,
    });
    phases.run = Some(outcome.to_result());
    if !outcome.success {
        let _ = tx.send(LaunchEvent::Aborted("Error starting Archon container".into()));
        return;
    }

    // Give the container a moment to come up before handing out the URL.
    std::thread::sleep(Duration::from_secs(cfg.startup_grace));

    let report = LaunchReport {
        environment,
        env_file: env_file.map(|p| p.display().to_string()),
        container: cfg.container_name.clone(),
        ui_port: cfg.ui_port,
        phases,
    };
    let _ = tx.send(LaunchEvent::Completed(report));
}

struct StepOutcome {
    success: bool,
    log: String,
}

impl StepOutcome {
    fn to_result(&self) -> StepResult {
        StepResult {
            status: if self.success { "pass" } else { "fail" }.to_string(),
            log: self.log.clone(),
        }
    }
}

/// Run a single engine command, echoing the invocation and forwarding
/// output lines as `LaunchEvent::Log`.
fn run_step(cmd: EngineCommand, phase: Phase, tx: &Sender<LaunchEvent>) -> StepOutcome {
    let _ = tx.send(LaunchEvent::Log {
        phase,
        line: format!("Running: docker {}", shell_words::join(&cmd.args)),
    });

    let rx = match docker::spawn(cmd) {
        Ok(rx) => rx,
        Err(e) => {
            return StepOutcome {
                success: false,
                log: format!("Failed to spawn docker: {e}"),
            };
        }
    };

    let mut log = String::new();
    let mut success = false;

    for line in rx {
        match line {
            OutputLine::Stdout(s) | OutputLine::Stderr(s) => {
                let _ = tx.send(LaunchEvent::Log {
                    phase,
                    line: s.clone(),
                });
                log.push_str(&s);
                log.push('\n');
            }
            OutputLine::Done(result) => {
                success = result.success;
                // Prefer the command's accumulated log if our line-by-line
                // accumulation missed anything.
                if log.is_empty() {
                    log = result.log;
                }
                break;
            }
        }
    }

    StepOutcome { success, log }
}
