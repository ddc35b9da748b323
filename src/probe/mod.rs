//! Bounded subprocess execution for external probes.
//!
//! The runner never raises past its boundary: spawn failures, permission
//! errors, and timeouts all come back as a synthetic non-zero exit code with
//! the error text as the sole output line. The caller decides whether the
//! absence of a tool is fatal to its own domain.

use std::time::Duration;

use tokio::process::Command;

/// Synthetic exit code for a probe binary that could not be found.
pub const EXIT_UNAVAILABLE: i32 = 127;

/// Synthetic exit code for a probe that exceeded its time budget.
pub const EXIT_TIMED_OUT: i32 = 124;

/// Captured output of one probe invocation.
#[derive(Debug, Clone)]
pub struct ProbeOutput {
    /// Trimmed stdout lines, trailing blanks removed. On execution failure
    /// this holds the error text as a single line.
    pub lines: Vec<String>,
    /// Real exit code, or a synthetic one for execution failures.
    pub exit_code: i32,
}

impl ProbeOutput {
    /// True when the probe ran and exited zero.
    pub fn succeeded(&self) -> bool {
        self.exit_code == 0
    }

    /// The captured lines joined back into one string.
    pub fn joined(&self) -> String {
        self.lines.join("\n")
    }

    fn failure(message: String, exit_code: i32) -> Self {
        Self {
            lines: vec![message],
            exit_code,
        }
    }
}

/// Runs an external probe, capturing stdout and the exit status.
///
/// `command` is the program followed by its arguments. With `use_shell` the
/// whole command is handed to the platform shell instead (`sh -c` on Unix,
/// `cmd /C` on Windows). The child is killed once `time_limit` elapses.
pub async fn run_probe(command: &[&str], use_shell: bool, time_limit: Duration) -> ProbeOutput {
    let Some(program) = command.first() else {
        return ProbeOutput::failure("empty probe command".to_string(), 1);
    };

    let mut cmd = if use_shell {
        let joined = command.join(" ");
        let mut shell = if cfg!(windows) {
            let mut c = Command::new("cmd");
            c.arg("/C");
            c
        } else {
            let mut c = Command::new("sh");
            c.arg("-c");
            c
        };
        shell.arg(joined);
        shell
    } else {
        let mut c = Command::new(program);
        c.args(&command[1..]);
        c
    };
    cmd.kill_on_drop(true);

    let waited = tokio::time::timeout(time_limit, cmd.output()).await;
    let output = match waited {
        Ok(Ok(output)) => output,
        Ok(Err(spawn_err)) => {
            let code = if spawn_err.kind() == std::io::ErrorKind::NotFound {
                EXIT_UNAVAILABLE
            } else {
                1
            };
            return ProbeOutput::failure(spawn_err.to_string(), code);
        }
        Err(_) => {
            return ProbeOutput::failure(
                format!("{program} timed out after {}s", time_limit.as_secs()),
                EXIT_TIMED_OUT,
            );
        }
    };

    let exit_code = output.status.code().unwrap_or(1);
    let mut lines: Vec<String> = String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(|line| line.trim().to_string())
        .collect();
    while lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }

    // Failed probes often explain themselves only on stderr; surface that
    // instead of an empty capture.
    if exit_code != 0 && lines.is_empty() {
        lines = String::from_utf8_lossy(&output.stderr)
            .lines()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect();
    }

    ProbeOutput { lines, exit_code }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[tokio::test]
    async fn captures_stdout_lines_and_exit_code() {
        let output = run_probe(&["echo", "hello"], false, Duration::from_secs(5)).await;
        assert!(output.succeeded());
        assert_eq!(output.lines, vec!["hello".to_string()]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn shell_mode_runs_through_sh() {
        let output = run_probe(&["echo one && echo two"], true, Duration::from_secs(5)).await;
        assert!(output.succeeded());
        assert_eq!(output.lines, vec!["one".to_string(), "two".to_string()]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn trailing_blank_lines_are_dropped() {
        let output = run_probe(&["printf", "a\\n\\n\\n"], false, Duration::from_secs(5)).await;
        assert!(output.succeeded());
        assert_eq!(output.lines, vec!["a".to_string()]);
    }

    #[tokio::test]
    async fn missing_binary_yields_synthetic_exit_code() {
        let output = run_probe(
            &["definitely-not-a-real-binary-xyz"],
            false,
            Duration::from_secs(5),
        )
        .await;
        assert_eq!(output.exit_code, EXIT_UNAVAILABLE);
        assert_eq!(output.lines.len(), 1);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn hung_probe_is_killed_at_the_deadline() {
        let output = run_probe(&["sleep", "30"], false, Duration::from_millis(100)).await;
        assert_eq!(output.exit_code, EXIT_TIMED_OUT);
        assert!(output.joined().contains("timed out"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn nonzero_exit_falls_back_to_stderr() {
        let output = run_probe(
            &["echo broken >&2; exit 2"],
            true,
            Duration::from_secs(5),
        )
        .await;
        assert_eq!(output.exit_code, 2);
        assert_eq!(output.lines, vec!["broken".to_string()]);
    }

    #[tokio::test]
    async fn empty_command_is_rejected() {
        let output = run_probe(&[], false, Duration::from_secs(1)).await;
        assert_eq!(output.exit_code, 1);
        assert_eq!(output.lines, vec!["empty probe command".to_string()]);
    }
}
