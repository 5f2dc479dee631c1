//! WatsonX-backed correction oracle
//!
//! Construction is an explicit, fallible step: [`WatsonxOracle::initialize`]
//! performs the IAM credential exchange and returns an error the caller can
//! report, instead of crashing at program load the way an eager global
//! client would.

use async_trait::async_trait;
use mend_core::{MendError, Result};
use std::env;
use std::time::Duration;
use tracing::{debug, info};

use crate::auth::fetch_bearer_token;
use crate::oracle::CorrectionOracle;
use crate::prompt::build_repair_prompt;
use crate::types::{GenerationParameters, GenerationRequest, GenerationResponse};

/// Default regional endpoint for text generation
pub const DEFAULT_BASE_URL: &str = "https://us-south.ml.cloud.ibm.com";
/// Default foundation model
pub const DEFAULT_MODEL_ID: &str = "meta-llama/llama-2-70b-chat";

const IAM_TOKEN_URL: &str = "https://iam.cloud.ibm.com/identity/token";
const GENERATION_PATH: &str = "/ml/v1/text/generation";
const API_VERSION: &str = "2023-05-29";

// Whole-request ceiling for the token exchange and generation calls;
// the loop has no other guard against a stalled oracle.
const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Credentials and endpoints for the WatsonX adapter
#[derive(Debug, Clone)]
pub struct WatsonxConfig {
    pub api_key: String,
    pub project_id: String,
    pub base_url: String,
    pub token_url: String,
    pub model_id: String,
}

impl WatsonxConfig {
    /// Build a config from `API_KEY` and `PROJECT_ID`, with an optional
    /// `WATSONX_URL` region override.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("API_KEY")
            .map_err(|_| MendError::Config("API_KEY is not set".to_string()))?;
        let project_id = env::var("PROJECT_ID")
            .map_err(|_| MendError::Config("PROJECT_ID is not set".to_string()))?;
        let base_url = env::var("WATSONX_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            api_key,
            project_id,
            base_url,
            token_url: IAM_TOKEN_URL.to_string(),
            model_id: DEFAULT_MODEL_ID.to_string(),
        })
    }
}

/// Correction oracle backed by a hosted WatsonX foundation model
pub struct WatsonxOracle {
    client: reqwest::Client,
    config: WatsonxConfig,
    token: String,
}

impl WatsonxOracle {
    /// Exchange the API key for a bearer token and build the oracle.
    ///
    /// Fails with `OracleAuth` when the credential exchange fails, so the
    /// caller can report a broken setup before any repair run starts.
    pub async fn initialize(config: WatsonxConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| MendError::OracleRequest(format!("failed to build client: {}", e)))?;

        let token = fetch_bearer_token(&client, &config.token_url, &config.api_key).await?;
        info!("WatsonX oracle initialized for model {}", config.model_id);

        Ok(Self {
            client,
            config,
            token,
        })
    }

    fn generation_url(&self) -> String {
        format!(
            "{}{}?version={}",
            self.config.base_url, GENERATION_PATH, API_VERSION
        )
    }
}

#[async_trait]
impl CorrectionOracle for WatsonxOracle {
    async fn suggest(
        &self,
        code: &str,
        language: &str,
        prior_error: Option<&str>,
    ) -> Result<String> {
        let input = build_repair_prompt(code, language, prior_error);
        debug!(
            "Sending repair prompt ({} chars, prior error: {})",
            input.len(),
            prior_error.is_some()
        );

        let request = GenerationRequest {
            model_id: self.config.model_id.clone(),
            input,
            parameters: GenerationParameters::default(),
            project_id: self.config.project_id.clone(),
        };

        let response = self
            .client
            .post(self.generation_url())
            .bearer_auth(&self.token)
            .json(&request)
            .send()
            .await
            .map_err(|e| MendError::OracleRequest(format!("generation request failed: {}", e)))?;

        let status = response.status();
        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(MendError::OracleAuth(format!(
                "generation endpoint rejected the token ({})",
                status
            )));
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown".to_string());
            return Err(MendError::OracleRequest(format!(
                "generation endpoint returned {}: {}",
                status, body
            )));
        }

        let body: GenerationResponse = response
            .json()
            .await
            .map_err(|e| MendError::OracleResponse(format!("unparsable body: {}", e)))?;

        if body.results.is_empty() {
            return Err(MendError::OracleResponse(
                "response contained no results".to_string(),
            ));
        }

        let mut suggestion = String::new();
        for result in &body.results {
            suggestion.push_str(&result.generated_text);
        }

        let suggestion = suggestion.trim().to_string();
        if suggestion.is_empty() {
            // Indistinguishable from "oracle unavailable" if returned as-is
            return Err(MendError::OracleResponse(
                "model generated empty code".to_string(),
            ));
        }

        info!("Obtained suggestion ({} chars)", suggestion.len());
        Ok(suggestion)
    }
}
