//! Subprocess executor with forced-kill timeout

use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

/// Default wall-clock execution timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Outcome of a single execution.
///
/// `output` is standard output on success, and the captured standard-error
/// text (or a synthesized message) on failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    pub succeeded: bool,
    pub output: String,
}

impl ExecutionResult {
    fn failure(output: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            output: output.into(),
        }
    }
}

/// Runs a code string through an interpreter in an isolated child process.
///
/// The code is passed as a single `-c` program argument, not a file. The
/// child gets stdin closed and `kill_on_drop(true)`, so when the timeout
/// fires the process is reliably killed rather than leaked.
#[derive(Debug, Clone)]
pub struct Executor {
    interpreter: String,
    timeout: Duration,
}

impl Default for Executor {
    fn default() -> Self {
        Self::new()
    }
}

impl Executor {
    pub fn new() -> Self {
        Self {
            interpreter: "python3".to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Use a different interpreter binary (e.g. "python", "sh")
    pub fn with_interpreter(mut self, interpreter: impl Into<String>) -> Self {
        self.interpreter = interpreter.into();
        self
    }

    /// Override the execution timeout. Must be positive; callers validate
    /// their configuration before constructing an executor.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Execute `code` once and report the outcome.
    ///
    /// Never returns an error: launch failure, non-zero exit, and timeout
    /// all become `succeeded = false` with a human-readable `output`.
    pub async fn execute(&self, code: &str) -> ExecutionResult {
        debug!(
            "Executing {} chars via {} (timeout {}s)",
            code.len(),
            self.interpreter,
            self.timeout.as_secs()
        );

        let child = Command::new(&self.interpreter)
            .arg("-c")
            .arg(code)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn();

        let child = match child {
            Ok(child) => child,
            Err(e) => {
                warn!("Failed to launch interpreter {}: {}", self.interpreter, e);
                return ExecutionResult::failure(format!(
                    "failed to launch interpreter `{}`: {}",
                    self.interpreter, e
                ));
            }
        };

        // On timeout the child is dropped here and kill_on_drop reaps it
        match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => {
                if output.status.success() {
                    ExecutionResult {
                        succeeded: true,
                        output: String::from_utf8_lossy(&output.stdout).into_owned(),
                    }
                } else {
                    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
                    let message = if stderr.trim().is_empty() {
                        format!("process exited with {}", output.status)
                    } else {
                        stderr
                    };
                    debug!("Execution failed: {}", message.lines().next().unwrap_or(""));
                    ExecutionResult::failure(message)
                }
            }
            Ok(Err(e)) => ExecutionResult::failure(format!("failed to collect output: {}", e)),
            Err(_) => {
                warn!(
                    "Execution timed out after {}s, child killed",
                    self.timeout.as_secs()
                );
                ExecutionResult::failure(format!(
                    "code execution timed out ({} seconds)",
                    self.timeout.as_secs()
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    fn sh() -> Executor {
        Executor::new().with_interpreter("sh")
    }

    #[tokio::test]
    async fn test_success_captures_stdout() {
        let result = sh().execute("echo hello world").await;
        assert!(result.succeeded);
        assert_eq!(result.output.trim(), "hello world");
    }

    #[tokio::test]
    async fn test_failure_captures_stderr() {
        let result = sh().execute("echo boom >&2; exit 1").await;
        assert!(!result.succeeded);
        assert!(result.output.contains("boom"));
    }

    #[tokio::test]
    async fn test_nonzero_exit_without_stderr_is_synthesized() {
        let result = sh().execute("exit 42").await;
        assert!(!result.succeeded);
        assert!(result.output.contains("exited with"));
    }

    #[tokio::test]
    async fn test_launch_failure_is_normalized() {
        let executor = Executor::new().with_interpreter("definitely-not-an-interpreter");
        let result = executor.execute("print('hi')").await;
        assert!(!result.succeeded);
        assert!(result.output.contains("failed to launch"));
    }

    #[tokio::test]
    async fn test_timeout_kills_child_within_budget() {
        let start = Instant::now();
        let result = sh()
            .with_timeout(Duration::from_secs(1))
            .execute("sleep 10")
            .await;

        assert!(!result.succeeded);
        assert!(result.output.contains("timed out"));
        // Bounded wall clock: the timeout, not the sleep, decides when we return
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_execution_is_idempotent() {
        let executor = sh();
        let first = executor.execute("echo same").await;
        let second = executor.execute("echo same").await;
        assert_eq!(first.succeeded, second.succeeded);
        assert_eq!(first.output, second.output);
    }

    #[tokio::test]
    async fn test_python_hello_world() {
        let result = Executor::new().execute("print('Hello, World!')").await;
        assert!(result.succeeded, "stderr: {}", result.output);
        assert!(result.output.contains("Hello, World!"));
    }

    #[tokio::test]
    async fn test_python_undefined_name_mentions_it() {
        let result = Executor::new().execute("print(x)").await;
        assert!(!result.succeeded);
        assert!(result.output.contains("NameError"));
        assert!(result.output.contains("x"));
    }
}
