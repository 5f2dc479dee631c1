//! Plain-text summary of a repair run

use mend_core::{AttemptOutcome, Run, StopReason};

/// First line of a snippet, truncated for one-line display
fn preview(text: &str, max: usize) -> String {
    let line = text.lines().next().unwrap_or("");
    if line.chars().count() <= max {
        line.to_string()
    } else {
        let truncated: String = line.chars().take(max).collect();
        format!("{}...", truncated)
    }
}

/// Render a run as a terminal-friendly summary block
pub fn render_summary(run: &Run) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Run {}: {} attempt(s) of {} allowed\n",
        run.id,
        run.attempts.len(),
        run.max_attempts
    ));

    for attempt in &run.attempts {
        let marker = match attempt.outcome {
            AttemptOutcome::Succeeded => "ok",
            AttemptOutcome::Failed => "FAIL",
            AttemptOutcome::NotExecuted => "skip",
        };
        out.push_str(&format!(
            "  [{}] attempt {}: {}\n",
            marker,
            attempt.index,
            preview(&attempt.produced_code, 60)
        ));
        if !attempt.error.is_empty() {
            out.push_str(&format!("         error: {}\n", preview(&attempt.error, 70)));
        }
    }

    match &run.stop_reason {
        StopReason::Succeeded => out.push_str("Result: code executed successfully\n"),
        StopReason::Exhausted => {
            out.push_str("Result: attempt budget exhausted: needs manual review\n")
        }
        StopReason::SuggestOnly => {
            out.push_str("Result: rewrite suggested, nothing was executed\n")
        }
        StopReason::OracleFailed(reason) => {
            out.push_str(&format!("Result: correction oracle failed ({})\n", reason))
        }
    }

    out
}
