use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every field has a production default; overrides come from the
/// environment (or a local `.env` file).
#[derive(Debug, Clone)]
pub struct Config {
    pub aws_region: String,
    pub s3_bucket: String,
    /// Custom S3 endpoint for MinIO in local development. None in production.
    pub s3_endpoint: Option<String>,
    /// Secrets Manager secret id holding the Gemini API key.
    pub gemini_secret_id: String,
    /// Direct API key override that skips the Secrets Manager lookup.
    pub gemini_api_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            aws_region: env_or("AWS_REGION", "us-west-2"),
            s3_bucket: env_or("S3_BUCKET", "screening-candidate"),
            s3_endpoint: optional_env("S3_ENDPOINT"),
            gemini_secret_id: env_or("GEMINI_SECRET_ID", "geminiapikey"),
            gemini_api_key: optional_env("GEMINI_API_KEY"),
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
