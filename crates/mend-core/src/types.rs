//! Core type definitions for repair runs and attempts

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How a single attempt ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptOutcome {
    /// The code ran and exited cleanly
    Succeeded,
    /// The code ran and failed (non-zero exit, interpreter error, timeout)
    Failed,
    /// Nothing was executed (suggest-only run)
    NotExecuted,
}

impl std::fmt::Display for AttemptOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Succeeded => write!(f, "succeeded"),
            Self::Failed => write!(f, "failed"),
            Self::NotExecuted => write!(f, "not_executed"),
        }
    }
}

/// One cycle of the repair loop.
///
/// In execute mode a cycle probes the current code, and on failure asks the
/// oracle for a correction and re-runs it immediately, so `outcome` always
/// reflects the code in `produced_code`, not the code that produced `error`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attempt {
    /// 1-based sequence number within a run, strictly contiguous
    pub index: usize,
    /// The originally submitted code this attempt started from
    pub input_code: String,
    /// The code this attempt ended with (equal to `input_code` unless a
    /// correction was applied)
    pub produced_code: String,
    /// Captured failure text from the probe execution, empty if the attempt
    /// succeeded outright or nothing ran
    pub error: String,
    /// How the attempt ended
    pub outcome: AttemptOutcome,
    /// When the attempt completed
    pub timestamp: DateTime<Utc>,
}

impl Attempt {
    /// True if this attempt ended with a clean execution
    pub fn succeeded(&self) -> bool {
        self.outcome == AttemptOutcome::Succeeded
    }
}

/// Why a run stopped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// An attempt executed the code successfully
    Succeeded,
    /// The attempt budget was consumed without a successful execution.
    /// This is a reported outcome, not an error: the caller should surface
    /// it as "needs manual review".
    Exhausted,
    /// Suggest-only run: one correction was produced, nothing was executed
    SuggestOnly,
    /// The correction oracle failed mid-run (auth, transport, or malformed
    /// response); the run stopped rather than continuing with stale code
    OracleFailed(String),
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Succeeded => write!(f, "succeeded"),
            Self::Exhausted => write!(f, "exhausted"),
            Self::SuggestOnly => write!(f, "suggest_only"),
            Self::OracleFailed(reason) => write!(f, "oracle_failed: {}", reason),
        }
    }
}

/// A completed repair run.
///
/// Immutable once the loop terminates and owned exclusively by the caller
/// that invoked it: there is no shared state across runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Run {
    /// Unique run identifier
    pub id: Uuid,
    /// The code as originally submitted
    pub original_code: String,
    /// The configured attempt budget
    pub max_attempts: usize,
    /// Ordered attempt log; `attempts.len() <= max_attempts` always holds
    pub attempts: Vec<Attempt>,
    /// Terminal state of the run
    pub stop_reason: StopReason,
    /// Standard output of the successful execution, empty if none succeeded
    pub final_output: String,
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// When the run finished
    pub finished_at: DateTime<Utc>,
}

impl Run {
    /// True if some attempt executed the code successfully
    pub fn succeeded(&self) -> bool {
        self.stop_reason == StopReason::Succeeded
    }

    /// The last code the run ended with: the final attempt's produced code,
    /// or the original submission when no attempt was logged
    pub fn final_code(&self) -> &str {
        self.attempts
            .last()
            .map(|a| a.produced_code.as_str())
            .unwrap_or(&self.original_code)
    }
}
