//! Integration tests for the launch pipeline.
//!
//! Tests that need a running Docker daemon are marked `#[ignore]`.
//! Run with: `cargo test -- --ignored`

use std::net::TcpListener;
use std::sync::mpsc;

use archon_launch::config::Config;
use archon_launch::launch::{LaunchEvent, LaunchInput, Phase, run_launch};

/// Collect all events from the launch receiver.
fn collect_events(rx: mpsc::Receiver<LaunchEvent>) -> Vec<LaunchEvent> {
    let mut events = Vec::new();
    while let Ok(ev) = rx.recv() {
        events.push(ev);
    }
    events
}

fn phase_started(events: &[LaunchEvent], phase: Phase) -> bool {
    events
        .iter()
        .any(|ev| matches!(ev, LaunchEvent::PhaseStarted(p) if *p == phase))
}

/// Bind an ephemeral port and release it, leaving a port that is very
/// likely free for the duration of the test.
fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

#[test]
fn engine_check_is_the_first_phase() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = Config {
        ui_port: free_port(),
        mcp_port: free_port(),
        ..Config::default()
    };

    let rx = run_launch(LaunchInput {
        config: cfg,
        base_dir: dir.path().to_path_buf(),
    });
    let events = collect_events(rx);

    assert!(
        matches!(
            events.first(),
            Some(LaunchEvent::PhaseStarted(Phase::EngineCheck))
        ),
        "launch must open with the engine check"
    );
    assert!(
        matches!(
            events.last(),
            Some(LaunchEvent::Completed(_) | LaunchEvent::Aborted(_))
        ),
        "event stream must end with a terminal event"
    );
}

#[test]
#[ignore]
fn port_conflict_aborts_before_any_build() {
    // Occupy both configured ports with plain listeners.
    let ui = TcpListener::bind("127.0.0.1:0").unwrap();
    let mcp = TcpListener::bind("127.0.0.1:0").unwrap();
    let ui_port = ui.local_addr().unwrap().port();
    let mcp_port = mcp.local_addr().unwrap().port();

    let dir = tempfile::tempdir().unwrap();
    let cfg = Config {
        ui_port,
        mcp_port,
        ..Config::default()
    };

    let rx = run_launch(LaunchInput {
        config: cfg,
        base_dir: dir.path().to_path_buf(),
    });
    let events = collect_events(rx);

    match events.last().expect("expected at least one event") {
        LaunchEvent::Aborted(reason) => {
            assert!(
                reason.contains(&ui_port.to_string()),
                "UI port missing from: {reason}"
            );
            assert!(
                reason.contains(&mcp_port.to_string()),
                "MCP port missing from: {reason}"
            );
        }
        other => panic!("expected Aborted, got: {other:?}"),
    }

    assert!(
        !phase_started(&events, Phase::BuildMcp),
        "no build may start on a port conflict"
    );
    assert!(!phase_started(&events, Phase::BuildApp));
    assert!(!phase_started(&events, Phase::Run));
}

#[test]
#[ignore]
fn missing_build_context_aborts_at_mcp_build() {
    // An empty work directory: the engine and ports are fine, but the
    // `mcp/` build context does not exist.
    let dir = tempfile::tempdir().unwrap();
    let cfg = Config {
        container_name: "archon-launch-test".into(),
        ui_port: free_port(),
        mcp_port: free_port(),
        ..Config::default()
    };

    let rx = run_launch(LaunchInput {
        config: cfg,
        base_dir: dir.path().to_path_buf(),
    });
    let events = collect_events(rx);

    assert!(phase_started(&events, Phase::BuildMcp));
    match events.last().expect("expected at least one event") {
        LaunchEvent::Aborted(reason) => {
            assert!(reason.contains("MCP"), "unexpected reason: {reason}");
        }
        other => panic!("expected Aborted, got: {other:?}"),
    }
    assert!(
        !phase_started(&events, Phase::BuildApp),
        "main build must not start after a failed MCP build"
    );
}
