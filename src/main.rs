use anyhow::{Result, bail};
use tracing_subscriber::EnvFilter;

use archon_launch::config::{self, Config};
use archon_launch::docker::DockerEnvironment;
use archon_launch::launch::{self, LaunchEvent, LaunchInput, LaunchReport};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()))
        .with_writer(std::io::stderr)
        .init();

    let base_dir = std::env::current_dir()?;
    let cfg = match config::load(&base_dir) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::warn!("settings ignored: {e:#}");
            Config::default()
        }
    };

    let rx = launch::run_launch(LaunchInput {
        config: cfg,
        base_dir,
    });

    for event in rx {
        match event {
            LaunchEvent::PhaseStarted(phase) => {
                if let Some(banner) = phase.banner() {
                    println!("\n=== {banner} ===");
                }
            }
            LaunchEvent::Log { line, .. } => println!("{line}"),
            LaunchEvent::PhaseFinished { .. } => {}
            LaunchEvent::Completed(report) => {
                print_access_instructions(&report);
                return Ok(());
            }
            LaunchEvent::Aborted(reason) => bail!(reason),
        }
    }

    bail!("launch ended without a result");
}

fn print_access_instructions(report: &LaunchReport) {
    println!("\n=== Archon is now running! ===");

    match report.environment {
        DockerEnvironment::DockerToolbox => {
            println!("-> Using Docker Toolbox:");
            println!("   To access the Streamlit UI, you need to use the Docker VM's IP address.");
            println!("   Run 'docker-machine ip default' to get this IP, then access:");
            println!("   http://<docker-machine-ip>:{}", report.ui_port);
        }
        DockerEnvironment::Standard | DockerEnvironment::DockerDesktop => {
            println!(
                "-> Access the Streamlit UI at: http://localhost:{}",
                report.ui_port
            );
        }
    }

    println!("-> MCP container is ready to use - see the MCP tab in the UI.");
    println!(
        "\nTo stop Archon, run: docker stop {0} && docker rm {0}",
        report.container
    );
}
