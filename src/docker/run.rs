use std::io::BufRead;
use std::process::{Command, Stdio};
use std::sync::mpsc::{self, Receiver, Sender};

use anyhow::{Context, Result, bail};
use tracing::debug;

use super::types::{CommandResult, EngineCommand, OutputLine};

/// Spawn an engine command and return a channel that streams its output.
///
/// The caller receives [`OutputLine::Stdout`]/[`Stderr`] as they arrive,
/// followed by exactly one [`OutputLine::Done`] carrying the final result.
pub fn spawn(cmd: EngineCommand) -> Result<Receiver<OutputLine>> {
    debug!(args = ?cmd.args, cwd = ?cmd.cwd, "spawning docker");

    let mut process = Command::new("docker");
    process
        .args(&cmd.args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if let Some(dir) = &cmd.cwd {
        process.current_dir(dir);
    }

    let mut child = process.spawn().context("failed to spawn docker process")?;

    let stdout = child.stdout.take().expect("stdout was piped");
    let stderr = child.stderr.take().expect("stderr was piped");

    let (tx, rx) = mpsc::channel();

    std::thread::spawn(move || {
        forward(child, stdout, stderr, tx);
    });

    Ok(rx)
}

/// Run a command to completion without forwarding individual lines. Used
/// for quiet queries where only the accumulated output matters.
pub fn capture(cmd: EngineCommand) -> Result<CommandResult> {
    let rx = spawn(cmd)?;
    for line in rx {
        if let OutputLine::Done(result) = line {
            return Ok(result);
        }
    }
    bail!("engine command ended without a result");
}

fn forward(
    mut child: std::process::Child,
    stdout: std::process::ChildStdout,
    stderr: std::process::ChildStderr,
    tx: Sender<OutputLine>,
) {
    // Accumulates all output for the final result.
    let log_buf = std::sync::Arc::new(std::sync::Mutex::new(String::new()));

    let tx_out = tx.clone();
    let buf_out = log_buf.clone();
    let stdout_handle = std::thread::spawn(move || {
        let reader = std::io::BufReader::new(stdout);
        for line in reader.lines() {
            match line {
                Ok(l) => {
                    if let Ok(mut buf) = buf_out.lock() {
                        buf.push_str(&l);
                        buf.push('\n');
                    }
                    // Receiver may be dropped; ignore send errors.
                    let _ = tx_out.send(OutputLine::Stdout(l));
                }
                Err(_) => break,
            }
        }
    });

    let tx_err = tx.clone();
    let buf_err = log_buf.clone();
    let stderr_handle = std::thread::spawn(move || {
        let reader = std::io::BufReader::new(stderr);
        for line in reader.lines() {
            match line {
                Ok(l) => {
                    if let Ok(mut buf) = buf_err.lock() {
                        buf.push_str(&l);
                        buf.push('\n');
                    }
                    let _ = tx_err.send(OutputLine::Stderr(l));
                }
                Err(_) => break,
            }
        }
    });

    // Both readers run to EOF before the wait, so the status is final and
    // every line has been forwarded when `Done` goes out.
    let _ = stdout_handle.join();
    let _ = stderr_handle.join();

    let exit_code = child.wait().ok().and_then(|s| s.code());
    let success = exit_code == Some(0);
    let log = log_buf.lock().map(|b| b.clone()).unwrap_or_default();

    let _ = tx.send(OutputLine::Done(CommandResult {
        success,
        exit_code,
        log,
    }));
}
