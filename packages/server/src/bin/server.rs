use anyhow::Context;
use clap::Parser;
use docsync_server::remote::http_client;
use docsync_server::{
    router, AppState, GoogleDocumentStore, GoogleIdentity, HmacAuthenticator, RetryPolicy,
    ServerConfig,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Docsync server - saves markup as formatted remote documents
#[derive(Parser, Debug)]
#[command(name = "docsync-server")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the JSON config file (default: ./docsync.config.json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on (overrides config and PORT)
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let mut config = ServerConfig::from_env(args.config.as_deref()).context("Failed to load config")?;
    if let Some(port) = args.port {
        config.port = port;
    }
    if config.uses_default_secret() {
        tracing::warn!("JWT_SECRET is not set; using the built-in development secret");
    }

    let http = http_client(config.remote.request_timeout_ms).context("Failed to build HTTP client")?;

    let state = AppState {
        authenticator: Arc::new(HmacAuthenticator::new(&config.jwt_secret, config.token_ttl_secs)),
        identity: Arc::new(GoogleIdentity::new(
            http.clone(),
            config.google.clone(),
            config.remote.clone(),
        )),
        store: Arc::new(GoogleDocumentStore::new(http, &config.remote)),
        retry: RetryPolicy::from(config.retry.clone()),
        config: Arc::new(config),
    };

    let addr = format!("0.0.0.0:{}", state.config.port);
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Server running on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
