//! IBM Cloud IAM authentication
//!
//! Exchanges an API key for an OAuth2 bearer token via the IAM token
//! endpoint (client-credentials style: form-encoded apikey + grant type).

use mend_core::{MendError, Result};
use tracing::{debug, info};

use crate::types::TokenResponse;

const GRANT_TYPE: &str = "urn:ibm:params:oauth:grant-type:apikey";

/// Exchange `api_key` for a bearer access token.
///
/// Every failure is an `OracleAuth` error: a non-success status, an
/// unparsable body, or a body without an `access_token` field.
pub async fn fetch_bearer_token(
    client: &reqwest::Client,
    token_url: &str,
    api_key: &str,
) -> Result<String> {
    debug!("Requesting bearer token from {}", token_url);

    let response = client
        .post(token_url)
        .form(&[("apikey", api_key), ("grant_type", GRANT_TYPE)])
        .send()
        .await
        .map_err(|e| MendError::OracleAuth(format!("token request failed: {}", e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(MendError::OracleAuth(format!(
            "token endpoint returned {}",
            status
        )));
    }

    let body: TokenResponse = response
        .json()
        .await
        .map_err(|e| MendError::OracleAuth(format!("invalid token response: {}", e)))?;

    let token = body.access_token.ok_or_else(|| {
        MendError::OracleAuth("token response had no access_token field".to_string())
    })?;

    info!("Bearer token retrieved");
    Ok(token)
}
