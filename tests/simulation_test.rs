use std::process::Command;

fn run_headless(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_parking_sim"))
        .args(args)
        .env("RUST_LOG", "warn,parking_sim=info")
        .output()
        .expect("Failed to execute simulation")
}

/// Test that the simulation runs in headless mode without crashing
#[test]
fn test_headless_simulation_runs() {
    let output = run_headless(&["--spaces", "5", "--ticks", "200", "--seed", "7"]);

    assert!(
        output.status.success(),
        "Simulation failed to run in headless mode. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("SIMULATION COMPLETE"),
        "Simulation did not complete properly. stderr: {}",
        stderr
    );
}

/// Test that lot statistics are logged
#[test]
fn test_simulation_statistics_logged() {
    let output = run_headless(&["--spaces", "5", "--ticks", "150", "--seed", "7"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        stderr.contains("Parking Lot Summary"),
        "Missing summary header. stderr: {}",
        stderr
    );
    assert!(stderr.contains("Spaces:"), "Missing space statistics");
    assert!(stderr.contains("Agents:"), "Missing agent statistics");
}

#[test]
fn test_zero_spawn_rate_is_rejected() {
    let output = run_headless(&["--ticks", "1", "--spawn-rate", "0"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid spawn rate"),
        "Expected a config error. stderr: {}",
        stderr
    );
}
