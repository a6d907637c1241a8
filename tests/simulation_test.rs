use std::process::{Command, Output};

fn run_headless(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_signal_sim"))
        .args(args)
        .env("RUST_LOG", "warn,signal_sim=info")
        .output()
        .expect("Failed to execute simulation")
}

/// Pull the number after `label` out of the log output
fn logged_value(stderr: &str, label: &str) -> u64 {
    let line = stderr
        .lines()
        .find(|line| line.contains(label))
        .unwrap_or_else(|| panic!("Could not find '{}' line", label));
    let parts: Vec<&str> = line.split(label).collect();
    parts
        .get(1)
        .map(|s| s.trim().trim_end_matches(['s', '%']))
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| panic!("Could not parse value from line: {}", line))
}

/// Test that the simulation runs in headless mode and logs its statistics
#[test]
fn test_headless_simulation_runs() {
    let output = run_headless(&["--ticks", "60", "--seed", "42"]);

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
    for label in [
        "Elapsed ticks:",
        "Total cars:",
        "Cars processed:",
        "Cars waiting:",
        "Average wait:",
        "Max wait:",
        "Efficiency:",
    ] {
        assert!(stderr.contains(label), "Missing '{}' statistic", label);
    }

    assert_eq!(logged_value(&stderr, "Elapsed ticks:"), 60);
    let total = logged_value(&stderr, "Total cars:");
    let processed = logged_value(&stderr, "Cars processed:");
    let waiting = logged_value(&stderr, "Cars waiting:");
    assert_eq!(processed + waiting, total);
    assert!(processed > 0, "No cars crossed the intersection");
}

/// Test that light changes are logged as the controller cycles
#[test]
fn test_light_changes_logged() {
    let output = run_headless(&["--ticks", "30", "--seed", "1", "--empty-start"]);
    assert!(output.status.success(), "Simulation failed to run");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("west light is now yellow"));
    assert!(stderr.contains("west light is now red"));
}

/// Test that out-of-range settings are clamped rather than rejected
#[test]
fn test_out_of_range_settings_are_clamped() {
    let output = run_headless(&["--ticks", "5", "--green-duration", "99", "--ns-density", "-3"]);
    assert!(output.status.success(), "Simulation failed to run");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("out of range"));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("/30 ticks"));
}

/// Test that an unknown approach name is refused
#[test]
fn test_unknown_initial_green_fails() {
    let output = run_headless(&["--initial-green", "up"]);
    assert!(!output.status.success());
}
