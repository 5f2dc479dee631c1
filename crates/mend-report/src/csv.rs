//! CSV export of the attempt log
//!
//! The log is a fixed five-column table. Fields containing a delimiter,
//! quote, or line break are quoted with internal quotes doubled, so code
//! snippets (which always contain newlines) survive the round trip.

use mend_core::{AttemptOutcome, MendError, Result, Run};
use std::path::Path;
use tracing::info;

/// Column headers, in export order
pub const LOG_COLUMNS: [&str; 5] = [
    "Attempt",
    "Initial Code",
    "Suggested Code",
    "Error",
    "Success Test",
];

/// Default export filename
pub const DEFAULT_LOG_FILENAME: &str = "log.csv";

/// One parsed row of an exported log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRow {
    pub attempt: String,
    pub initial_code: String,
    pub suggested_code: String,
    pub error: String,
    pub success: String,
}

/// The "Success Test" cell for an outcome: executed attempts report a
/// boolean, suggest-only rows stay empty
fn success_cell(outcome: AttemptOutcome) -> &'static str {
    match outcome {
        AttemptOutcome::Succeeded => "true",
        AttemptOutcome::Failed => "false",
        AttemptOutcome::NotExecuted => "",
    }
}

fn escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn write_row(out: &mut String, fields: &[&str]) {
    let mut first = true;
    for field in fields {
        if !first {
            out.push(',');
        }
        out.push_str(&escape(field));
        first = false;
    }
    out.push('\n');
}

/// Serialize a run's attempt log to CSV text
pub fn run_to_csv(run: &Run) -> String {
    let mut out = String::new();
    write_row(&mut out, &LOG_COLUMNS);

    for attempt in &run.attempts {
        let index = attempt.index.to_string();
        write_row(
            &mut out,
            &[
                &index,
                &attempt.input_code,
                &attempt.produced_code,
                &attempt.error,
                success_cell(attempt.outcome),
            ],
        );
    }
    out
}

/// Write a run's attempt log to `path` as CSV
pub fn write_csv_file(run: &Run, path: &Path) -> Result<()> {
    std::fs::write(path, run_to_csv(run))?;
    info!("Attempt log written to {}", path.display());
    Ok(())
}

/// Parse CSV text produced by [`run_to_csv`] back into rows.
///
/// Validates the header and the per-row field count; used for the
/// round-trip property and by tooling that consumes exported logs.
pub fn parse_csv(text: &str) -> Result<Vec<LogRow>> {
    let mut records = parse_records(text)?;
    if records.is_empty() {
        return Err(MendError::Other("CSV is missing its header row".to_string()));
    }

    let header = records.remove(0);
    if header != LOG_COLUMNS {
        return Err(MendError::Other(format!(
            "unexpected CSV header: {:?}",
            header
        )));
    }

    records
        .into_iter()
        .map(|fields| {
            if fields.len() != LOG_COLUMNS.len() {
                return Err(MendError::Other(format!(
                    "expected {} fields per row, got {}",
                    LOG_COLUMNS.len(),
                    fields.len()
                )));
            }
            let mut fields = fields.into_iter();
            Ok(LogRow {
                attempt: fields.next().unwrap_or_default(),
                initial_code: fields.next().unwrap_or_default(),
                suggested_code: fields.next().unwrap_or_default(),
                error: fields.next().unwrap_or_default(),
                success: fields.next().unwrap_or_default(),
            })
        })
        .collect()
}

/// Split CSV text into records of unescaped fields
fn parse_records(text: &str) -> Result<Vec<Vec<String>>> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' => {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                }
                _ => field.push(c),
            }
        } else {
            match c {
                '"' => in_quotes = true,
                ',' => fields.push(std::mem::take(&mut field)),
                '\r' => {}
                '\n' => {
                    fields.push(std::mem::take(&mut field));
                    records.push(std::mem::take(&mut fields));
                }
                _ => field.push(c),
            }
        }
    }

    if in_quotes {
        return Err(MendError::Other("unterminated quoted field".to_string()));
    }
    // Trailing record without a final newline
    if !field.is_empty() || !fields.is_empty() {
        fields.push(field);
        records.push(fields);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use mend_core::{Attempt, StopReason};
    use uuid::Uuid;

    fn attempt(index: usize, produced: &str, error: &str, outcome: AttemptOutcome) -> Attempt {
        Attempt {
            index,
            input_code: "print(x)".to_string(),
            produced_code: produced.to_string(),
            error: error.to_string(),
            outcome,
            timestamp: Utc::now(),
        }
    }

    fn run(attempts: Vec<Attempt>) -> Run {
        Run {
            id: Uuid::new_v4(),
            original_code: "print(x)".to_string(),
            max_attempts: 3,
            attempts,
            stop_reason: StopReason::Exhausted,
            final_output: String::new(),
            started_at: Utc::now(),
            finished_at: Utc::now(),
        }
    }

    #[test]
    fn test_header_only_for_empty_run() {
        let csv = run_to_csv(&run(vec![]));
        assert_eq!(
            csv,
            "Attempt,Initial Code,Suggested Code,Error,Success Test\n"
        );
    }

    #[test]
    fn test_round_trip_preserves_rows_and_order() {
        let attempts = vec![
            attempt(
                1,
                "x = 1\nprint(x)",
                "NameError: name 'x' is not defined",
                AttemptOutcome::Failed,
            ),
            attempt(2, "print(\"a, b\")", "", AttemptOutcome::Succeeded),
        ];
        let source = run(attempts);

        let rows = parse_csv(&run_to_csv(&source)).unwrap();
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].attempt, "1");
        assert_eq!(rows[0].initial_code, "print(x)");
        assert_eq!(rows[0].suggested_code, "x = 1\nprint(x)");
        assert_eq!(rows[0].error, "NameError: name 'x' is not defined");
        assert_eq!(rows[0].success, "false");

        assert_eq!(rows[1].attempt, "2");
        assert_eq!(rows[1].suggested_code, "print(\"a, b\")");
        assert_eq!(rows[1].success, "true");
    }

    #[test]
    fn test_quotes_commas_and_newlines_survive() {
        let tricky = "print(\"hello, \\\"world\\\"\")\nprint('second line')";
        let source = run(vec![attempt(1, tricky, "line1\nline2", AttemptOutcome::Failed)]);

        let rows = parse_csv(&run_to_csv(&source)).unwrap();
        assert_eq!(rows[0].suggested_code, tricky);
        assert_eq!(rows[0].error, "line1\nline2");
    }

    #[test]
    fn test_suggest_only_row_has_empty_success_cell() {
        let source = run(vec![attempt(1, "print('x')", "", AttemptOutcome::NotExecuted)]);
        let rows = parse_csv(&run_to_csv(&source)).unwrap();
        assert_eq!(rows[0].success, "");
    }

    #[test]
    fn test_wrong_header_is_rejected() {
        let result = parse_csv("A,B,C,D,E\n1,2,3,4,5\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_write_csv_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_LOG_FILENAME);
        let source = run(vec![attempt(1, "print('x')", "", AttemptOutcome::Succeeded)]);

        write_csv_file(&source, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let rows = parse_csv(&text).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].success, "true");
    }
}
