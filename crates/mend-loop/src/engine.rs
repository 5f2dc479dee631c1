//! Repair engine - bounded execute/correct/re-run iteration

use chrono::Utc;
use mend_core::{Attempt, AttemptOutcome, MendError, RepairConfig, Result, Run, StopReason};
use mend_executor::Executor;
use mend_oracle::CorrectionOracle;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Drives one repair run to completion.
///
/// The engine owns an executor, an oracle, and a validated configuration;
/// `run` is a plain synchronous-in-spirit async function that returns the
/// completed [`Run`]. Presentation layers (CLI, web form) are callers, not
/// collaborators: live progress is observable through tracing events.
pub struct RepairEngine<O: CorrectionOracle> {
    executor: Executor,
    oracle: O,
    config: RepairConfig,
}

impl<O: CorrectionOracle> RepairEngine<O> {
    /// Build an engine from a validated configuration
    pub fn new(oracle: O, config: RepairConfig) -> Self {
        let executor = Executor::new()
            .with_interpreter(config.interpreter.clone())
            .with_timeout(config.timeout());
        Self {
            executor,
            oracle,
            config,
        }
    }

    /// Run the repair loop on `original_code`.
    ///
    /// Returns `Err` only for pre-loop problems (empty input, bad
    /// configuration). Everything that happens inside the loop (execution
    /// failures, oracle failures, budget exhaustion) is recorded on the
    /// returned [`Run`] as ordinary data.
    pub async fn run(&self, original_code: &str) -> Result<Run> {
        if original_code.trim().is_empty() {
            return Err(MendError::InvalidInput(
                "submitted code is empty".to_string(),
            ));
        }
        self.config.validate()?;

        let started_at = Utc::now();
        let id = Uuid::new_v4();
        info!(
            "Starting run {} (budget {}, execute: {})",
            id, self.config.max_attempts, self.config.execute_locally
        );

        let (attempts, stop_reason, final_output) = if self.config.execute_locally {
            self.run_execute_mode(original_code).await
        } else {
            self.run_suggest_only(original_code).await
        };

        info!("Run {} finished: {}", id, stop_reason);

        Ok(Run {
            id,
            original_code: original_code.to_string(),
            max_attempts: self.config.max_attempts,
            attempts,
            stop_reason,
            final_output,
            started_at,
            finished_at: Utc::now(),
        })
    }

    /// Execute mode: probe, correct on failure, re-run the correction
    /// immediately, repeat within the budget.
    async fn run_execute_mode(&self, original_code: &str) -> (Vec<Attempt>, StopReason, String) {
        let mut code = original_code.to_string();
        let mut attempts = Vec::new();
        let mut index = 1;

        loop {
            if index > self.config.max_attempts {
                warn!("Attempt budget ({}) exhausted", self.config.max_attempts);
                return (attempts, StopReason::Exhausted, String::new());
            }
            info!("=== Attempt {} of {} ===", index, self.config.max_attempts);

            let probe = self.executor.execute(&code).await;
            if probe.succeeded {
                attempts.push(Attempt {
                    index,
                    input_code: original_code.to_string(),
                    produced_code: code,
                    error: String::new(),
                    outcome: AttemptOutcome::Succeeded,
                    timestamp: Utc::now(),
                });
                return (attempts, StopReason::Succeeded, probe.output);
            }

            let error = probe.output;
            debug!("Probe failed: {}", error.lines().next().unwrap_or(""));

            let suggestion = match self
                .oracle
                .suggest(&code, &self.config.language, Some(&error))
                .await
            {
                Ok(suggestion) => suggestion,
                Err(e) => {
                    // Attempt-terminal: log what we know and stop, rather
                    // than re-running unchanged code against the budget
                    warn!("Oracle failed on attempt {}: {}", index, e);
                    attempts.push(Attempt {
                        index,
                        input_code: original_code.to_string(),
                        produced_code: code,
                        error,
                        outcome: AttemptOutcome::Failed,
                        timestamp: Utc::now(),
                    });
                    return (attempts, StopReason::OracleFailed(e.to_string()), String::new());
                }
            };

            code = suggestion;

            // Immediate re-run: the logged attempt must reflect whether the
            // corrected code works, and the next cycle (if any) starts from
            // this corrected-and-tested code
            let rerun = self.executor.execute(&code).await;
            let outcome = if rerun.succeeded {
                AttemptOutcome::Succeeded
            } else {
                AttemptOutcome::Failed
            };
            attempts.push(Attempt {
                index,
                input_code: original_code.to_string(),
                produced_code: code.clone(),
                error,
                outcome,
                timestamp: Utc::now(),
            });

            if rerun.succeeded {
                info!("Corrected code ran cleanly on attempt {}", index);
                return (attempts, StopReason::Succeeded, rerun.output);
            }

            index += 1;
        }
    }

    /// Suggest-only mode: one oracle call with no prior error, nothing is
    /// executed.
    async fn run_suggest_only(&self, original_code: &str) -> (Vec<Attempt>, StopReason, String) {
        info!("Suggest-only run, skipping execution");

        match self
            .oracle
            .suggest(original_code, &self.config.language, None)
            .await
        {
            Ok(suggestion) => {
                let attempt = Attempt {
                    index: 1,
                    input_code: original_code.to_string(),
                    produced_code: suggestion,
                    error: String::new(),
                    outcome: AttemptOutcome::NotExecuted,
                    timestamp: Utc::now(),
                };
                (vec![attempt], StopReason::SuggestOnly, String::new())
            }
            Err(e) => {
                warn!("Oracle failed in suggest-only mode: {}", e);
                (
                    Vec::new(),
                    StopReason::OracleFailed(e.to_string()),
                    String::new(),
                )
            }
        }
    }
}
