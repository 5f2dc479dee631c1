//! Wire types for the WatsonX text-generation API

use serde::{Deserialize, Serialize};

/// Generation parameters sent with every request.
///
/// Greedy decoding with a triple-newline stop sequence keeps the model's
/// answer deterministic and code-shaped.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationParameters {
    pub decoding_method: String,
    pub max_new_tokens: usize,
    pub stop_sequences: Vec<String>,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            decoding_method: "greedy".to_string(),
            max_new_tokens: 1000,
            stop_sequences: vec!["\n\n\n".to_string()],
        }
    }
}

/// Text-generation request body
#[derive(Debug, Clone, Serialize)]
pub struct GenerationRequest {
    pub model_id: String,
    pub input: String,
    pub parameters: GenerationParameters,
    pub project_id: String,
}

/// Text-generation response body
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationResponse {
    #[serde(default)]
    pub results: Vec<GenerationResult>,
}

/// One generated candidate in a response
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationResult {
    pub generated_text: String,
}

/// IAM token-exchange response.
///
/// `access_token` is optional so a structurally-valid but incomplete body
/// can be reported as a malformed response instead of a parse failure.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
}
