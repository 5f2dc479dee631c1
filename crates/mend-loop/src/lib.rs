//! # mend-loop
//!
//! The repair-loop state machine: Idle → Attempting → {Succeeded, Exhausted}.
//!
//! The engine interleaves untrusted-code execution with oracle corrections
//! across a bounded attempt budget, producing an ordered attempt log.
//! It is strictly sequential: no two attempts overlap, and the oracle is
//! never consulted before the prior execution result is known.
//!
//! ## Key Pattern
//!
//! After every correction the engine re-runs the corrected code immediately,
//! so each logged attempt already reflects whether the *corrected* code
//! works. The attempt counter therefore tracks corrections, not raw
//! executions.

mod engine;

pub use engine::RepairEngine;
