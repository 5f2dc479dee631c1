//! # mend-core
//!
//! Core types for Mend, an iterative AI-assisted code-repair loop.
//!
//! Mend executes a code snippet, captures the failure, asks a correction
//! oracle for a fixed version, and repeats within a bounded attempt budget.
//!
//! ## Core Paradigm
//!
//! - An Attempt IS one correction cycle (probe, correct, re-run)
//! - A Run IS the full bounded sequence of Attempts for one snippet
//! - Failures ARE data: execution and oracle failures travel as values,
//!   never as panics past the loop boundary

mod config;
mod error;
mod types;

pub use config::{RepairConfig, DEFAULT_MAX_ATTEMPTS, MAX_ATTEMPT_BUDGET, MIN_ATTEMPT_BUDGET};
pub use error::{MendError, Result};
pub use types::*;
