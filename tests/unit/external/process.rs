use super::*;

#[test]
fn missing_program_is_reported_as_missing() {
    let mut cmd = Command::new("eduviz-definitely-not-installed");
    let err = run_with_timeout(&mut cmd, "ghost", Duration::from_secs(1)).unwrap_err();
    assert!(matches!(err, EduvizError::ToolMissing { ref tool } if tool == "ghost"));
    assert!(!is_available_within(
        "eduviz-definitely-not-installed",
        "--version",
        Duration::from_secs(1)
    ));
}

#[cfg(unix)]
#[test]
fn nonzero_exit_carries_stderr_tail() {
    let mut cmd = Command::new("sh");
    cmd.args(["-c", "echo boom >&2; exit 3"]);
    let err = run_with_timeout(&mut cmd, "sh", Duration::from_secs(10)).unwrap_err();
    match err {
        EduvizError::ToolFailed { tool, detail } => {
            assert_eq!(tool, "sh");
            assert!(detail.contains("boom"), "{detail}");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[cfg(unix)]
#[test]
fn slow_program_is_killed_at_deadline() {
    let mut cmd = Command::new("sleep");
    cmd.arg("5");
    let started = Instant::now();
    let err = run_with_timeout(&mut cmd, "sleep", Duration::from_millis(200)).unwrap_err();
    assert!(matches!(err, EduvizError::ToolTimeout { .. }));
    assert!(started.elapsed() < Duration::from_secs(4));
}

#[cfg(unix)]
#[test]
fn hanging_version_check_counts_as_unavailable() {
    let started = Instant::now();
    assert!(!is_available_within("sleep", "5", Duration::from_millis(200)));
    assert!(started.elapsed() < Duration::from_secs(4));
}

#[cfg(unix)]
#[test]
fn unrepresentable_timeout_waits_without_deadline() {
    let mut cmd = Command::new("true");
    run_with_timeout(&mut cmd, "true", Duration::MAX).expect("no overflow on huge timeout");
    assert!(is_available_within("true", "--version", Duration::MAX));
}

#[cfg(unix)]
#[test]
fn successful_program_returns_ok() {
    let mut cmd = Command::new("true");
    run_with_timeout(&mut cmd, "true", Duration::from_secs(10)).expect("true succeeds");
}

#[test]
fn stderr_tail_keeps_last_lines() {
    let text: String = (0..20).map(|i| format!("line {i}\n")).collect();
    let tail = stderr_tail(&text);
    assert!(tail.starts_with("line 12"));
    assert!(tail.ends_with("line 19"));
}
