//! # mend-executor
//!
//! Single-shot subprocess execution of untrusted code snippets.
//!
//! **WARNING:** the executor runs code in a child process with stdin closed
//! and a wall-clock timeout, nothing more. There is no seccomp, chroot,
//! namespace, or cgroup isolation: do not point it at hostile input in
//! security-sensitive environments without OS-level sandboxing on top.
//!
//! Every failure mode (launch failure, non-zero exit, interpreter
//! exception, timeout) is normalized into the returned [`ExecutionResult`].
//! The executor never propagates a fault past its contract, and it holds no
//! state between calls. Retry decisions belong to the repair loop.

mod executor;

pub use executor::{ExecutionResult, Executor, DEFAULT_TIMEOUT_SECS};
