//! Secrets Manager lookup for the Gemini API key.
//!
//! The key lives in a JSON blob under a single secret id, so rotation
//! happens without redeploying. A `GEMINI_API_KEY` env var bypasses the
//! lookup entirely (local runs, CI).

use anyhow::{anyhow, Context};
use aws_config::SdkConfig;

const API_KEY_FIELD: &str = "GEMINI_API_KEY";

/// Fetches and decodes the Gemini API key from AWS Secrets Manager.
pub async fn fetch_gemini_api_key(aws_config: &SdkConfig, secret_id: &str) -> anyhow::Result<String> {
    let client = aws_sdk_secretsmanager::Client::new(aws_config);
    let output = client
        .get_secret_value()
        .secret_id(secret_id)
        .send()
        .await
        .with_context(|| format!("failed to read secret '{secret_id}'"))?;
    let blob = output
        .secret_string()
        .ok_or_else(|| anyhow!("secret '{secret_id}' has no string payload"))?;
    parse_secret_blob(blob).with_context(|| format!("secret '{secret_id}' is malformed"))
}

/// Decodes the secret payload: a JSON object carrying the key under
/// `GEMINI_API_KEY`.
fn parse_secret_blob(blob: &str) -> anyhow::Result<String> {
    let value: serde_json::Value =
        serde_json::from_str(blob).context("secret payload is not valid JSON")?;
    let key = value
        .get(API_KEY_FIELD)
        .and_then(|v| v.as_str())
        .ok_or_else(|| anyhow!("secret payload is missing the {API_KEY_FIELD} field"))?;
    if key.trim().is_empty() {
        return Err(anyhow!("secret payload holds an empty {API_KEY_FIELD}"));
    }
    Ok(key.to_string())
}
