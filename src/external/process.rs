use std::{
    io::Read as _,
    process::{Command, Stdio},
    time::{Duration, Instant},
};

use crate::foundation::error::{EduvizError, EduvizResult};

const POLL_INTERVAL: Duration = Duration::from_millis(50);
const STDERR_TAIL_LINES: usize = 8;

/// Whether `program version_arg` exits successfully within `timeout`.
///
/// A tool that hangs on its version flag counts as unavailable.
pub fn is_available_within(program: &str, version_arg: &str, timeout: Duration) -> bool {
    let mut cmd = Command::new(program);
    cmd.arg(version_arg);
    match run_with_timeout(&mut cmd, program, timeout) {
        Ok(()) => true,
        Err(err) => {
            tracing::debug!(program, error = %err, "availability check failed");
            false
        }
    }
}

/// Run `cmd` to completion or kill it once `timeout` elapses.
///
/// Stdout is discarded. Stderr is drained on a helper thread so a chatty tool cannot block
/// on a full pipe while we poll, and its tail is carried in the failure error.
pub fn run_with_timeout(cmd: &mut Command, tool: &str, timeout: Duration) -> EduvizResult<()> {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped());

    let mut child = cmd.spawn().map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            EduvizError::tool_missing(tool)
        } else {
            EduvizError::tool_failed(tool, format!("failed to spawn: {e}"))
        }
    })?;

    let stderr = child.stderr.take().map(|mut pipe| {
        std::thread::spawn(move || {
            let mut buf = String::new();
            let _ = pipe.read_to_string(&mut buf);
            buf
        })
    });

    // A timeout too large to represent means no deadline.
    let deadline = Instant::now().checked_add(timeout);
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) if deadline.is_some_and(|d| Instant::now() >= d) => {
                let _ = child.kill();
                let _ = child.wait();
                tracing::warn!(tool, secs = timeout.as_secs(), "tool timed out, killed");
                return Err(EduvizError::tool_timeout(tool, timeout.as_secs()));
            }
            Ok(None) => std::thread::sleep(POLL_INTERVAL),
            Err(e) => {
                let _ = child.kill();
                return Err(EduvizError::tool_failed(tool, format!("failed to wait: {e}")));
            }
        }
    };

    let stderr = stderr
        .and_then(|handle| handle.join().ok())
        .unwrap_or_default();

    if status.success() {
        Ok(())
    } else {
        Err(EduvizError::tool_failed(
            tool,
            format!("{status}: {}", stderr_tail(&stderr)),
        ))
    }
}

fn stderr_tail(stderr: &str) -> String {
    let lines: Vec<&str> = stderr.trim().lines().collect();
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    lines[start..].join("\n")
}

#[cfg(test)]
#[path = "../../tests/unit/external/process.rs"]
mod tests;
