mod config;
mod errors;
mod intake;
mod llm_client;
mod routes;
mod screening;
mod secrets;
mod state;

use anyhow::Result;
use aws_config::Region;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::intake::store::S3DocumentStore;
use crate::llm_client::GeminiClient;
use crate::routes::build_router;
use crate::screening::completion::GeminiCompletion;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (every field has a production default)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Sift API v{}", env!("CARGO_PKG_VERSION"));

    // One shared AWS config drives both the S3 and Secrets Manager clients
    let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new(config.aws_region.clone()))
        .load()
        .await;

    // Initialize the S3 / MinIO document store
    let s3 = build_s3_client(&config, &aws_config);
    let store = Arc::new(S3DocumentStore::new(s3, config.s3_bucket.clone()));
    info!("Document store initialized (bucket: {})", config.s3_bucket);

    // Resolve the Gemini API key: env override first, Secrets Manager otherwise
    let api_key = match &config.gemini_api_key {
        Some(key) => key.clone(),
        None => secrets::fetch_gemini_api_key(&aws_config, &config.gemini_secret_id).await?,
    };
    let completion = Arc::new(GeminiCompletion::new(GeminiClient::new(api_key)));
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Build app state
    let state = AppState { store, completion };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs an S3 client against AWS (production) or MinIO (local).
fn build_s3_client(config: &Config, aws_config: &aws_config::SdkConfig) -> aws_sdk_s3::Client {
    let mut builder = aws_sdk_s3::config::Builder::from(aws_config);
    if let Some(endpoint) = &config.s3_endpoint {
        builder = builder.endpoint_url(endpoint).force_path_style(true);
    }
    aws_sdk_s3::Client::from_conf(builder.build())
}
