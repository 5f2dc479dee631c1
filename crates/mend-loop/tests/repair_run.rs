//! End-to-end repair runs against a real Python interpreter.
//!
//! The oracle is scripted so no network is involved; the executor runs
//! actual subprocesses.

use async_trait::async_trait;
use mend_core::{AttemptOutcome, MendError, RepairConfig, Result, StopReason};
use mend_loop::RepairEngine;
use mend_oracle::CorrectionOracle;
use std::collections::VecDeque;
use std::sync::Mutex;

struct ScriptedOracle {
    responses: Mutex<VecDeque<String>>,
    prior_errors: Mutex<Vec<Option<String>>>,
}

impl ScriptedOracle {
    fn new(responses: Vec<&str>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().map(String::from).collect()),
            prior_errors: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl CorrectionOracle for ScriptedOracle {
    async fn suggest(
        &self,
        _code: &str,
        _language: &str,
        prior_error: Option<&str>,
    ) -> Result<String> {
        self.prior_errors
            .lock()
            .unwrap()
            .push(prior_error.map(String::from));
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| MendError::OracleRequest("script exhausted".into()))
    }
}

fn python_config(max_attempts: usize) -> RepairConfig {
    RepairConfig {
        max_attempts,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_hello_world_succeeds_first_try() {
    let engine = RepairEngine::new(ScriptedOracle::new(vec![]), python_config(3));
    let run = engine.run("print('Hello, World!')").await.unwrap();

    assert_eq!(run.stop_reason, StopReason::Succeeded);
    assert_eq!(run.attempts.len(), 1);
    assert_eq!(run.attempts[0].outcome, AttemptOutcome::Succeeded);
    assert!(run.final_output.contains("Hello, World!"));
}

#[tokio::test]
async fn test_undefined_name_is_fed_to_the_oracle() {
    let oracle = ScriptedOracle::new(vec!["x = 1\nprint(x)"]);
    let engine = RepairEngine::new(oracle, python_config(2));
    let run = engine.run("print(x)").await.unwrap();

    assert!(run.attempts.len() <= 2);
    assert_eq!(run.stop_reason, StopReason::Succeeded);

    let attempt = &run.attempts[0];
    assert!(attempt.error.contains("NameError"));
    assert!(attempt.error.contains("x"));
    assert_eq!(attempt.produced_code, "x = 1\nprint(x)");
    assert!(run.final_output.contains('1'));
}

#[tokio::test]
async fn test_bad_fix_exhausts_the_budget() {
    let oracle = ScriptedOracle::new(vec!["print(y)", "print(z)"]);
    let engine = RepairEngine::new(oracle, python_config(2));
    let run = engine.run("print(x)").await.unwrap();

    assert_eq!(run.stop_reason, StopReason::Exhausted);
    assert_eq!(run.attempts.len(), 2);
    assert!(run
        .attempts
        .iter()
        .all(|a| a.outcome == AttemptOutcome::Failed));
}

#[tokio::test]
async fn test_timeout_is_reported_not_hung() {
    let config = RepairConfig {
        max_attempts: 1,
        timeout_secs: 1,
        ..Default::default()
    };
    let oracle = ScriptedOracle::new(vec!["print('quick')"]);
    let engine = RepairEngine::new(oracle, config);

    let start = std::time::Instant::now();
    let run = engine
        .run("import time\ntime.sleep(30)")
        .await
        .unwrap();

    assert!(start.elapsed() < std::time::Duration::from_secs(10));
    assert!(run.succeeded());
    assert!(run.attempts[0].error.contains("timed out"));
}
