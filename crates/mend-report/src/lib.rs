//! # mend-report
//!
//! Observability surface for repair runs: the exportable attempt log
//! (fixed five-column CSV, the run's primary record) and a plain-text
//! summary for terminal display.

mod csv;
mod table;

pub use csv::{parse_csv, run_to_csv, write_csv_file, LogRow, DEFAULT_LOG_FILENAME, LOG_COLUMNS};
pub use table::render_summary;
