//! # mend-oracle
//!
//! The correction-oracle capability and its WatsonX-backed implementation.
//!
//! The repair loop only depends on the [`CorrectionOracle`] trait: given a
//! code string, its language, and an optional prior error, the oracle
//! returns a corrected code string. Alternate model providers can be
//! substituted without touching the loop.
//!
//! ## Key Pattern
//!
//! The oracle is stateless with respect to retries: it performs exactly
//! one model round-trip per `suggest` call. Authentication, transport, and
//! malformed-response problems each surface as a distinct error kind so
//! the loop can tell "oracle unavailable" from "oracle returned bad code".

mod auth;
mod oracle;
mod prompt;
mod types;
mod watsonx;

pub use auth::fetch_bearer_token;
pub use oracle::CorrectionOracle;
pub use prompt::build_repair_prompt;
pub use types::{
    GenerationParameters, GenerationRequest, GenerationResponse, GenerationResult, TokenResponse,
};
pub use watsonx::{WatsonxConfig, WatsonxOracle, DEFAULT_BASE_URL, DEFAULT_MODEL_ID};
