//! The correction-oracle capability

use async_trait::async_trait;
use mend_core::Result;

/// A capability that proposes a corrected version of a code snippet.
///
/// Implementations build an instruction around the code ("fix this code in
/// `language`; respond with code only"), include `prior_error` as the
/// diagnostic to resolve when present, and return the model's suggestion
/// trimmed of surrounding whitespace.
///
/// The returned code is a best-effort suggestion: it is not guaranteed to
/// compile or run, and callers must re-validate it through the executor
/// rather than trusting it.
#[async_trait]
pub trait CorrectionOracle: Send + Sync {
    /// Propose a corrected version of `code`.
    ///
    /// A `prior_error` switches the oracle from first-pass cleanup to a
    /// targeted fix of that diagnostic. Failures (authentication,
    /// transport, malformed response) surface as errors, never as an empty
    /// or partially-built string.
    async fn suggest(
        &self,
        code: &str,
        language: &str,
        prior_error: Option<&str>,
    ) -> Result<String>;
}
