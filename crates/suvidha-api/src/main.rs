//! # suvidha-api: Binary Entry Point
//!
//! Starts the Axum HTTP server for the kiosk API.
//! Binds to a configurable port (default 8080).

use suvidha_api::state::{AppConfig, AppState};
use suvidha_identity::VerificationMode;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env().map_err(|e| {
        tracing::error!("configuration error: {e}");
        e
    })?;
    tracing::info!(?config, "configuration loaded");

    if config.auth_token.is_none() {
        tracing::warn!("AUTH_TOKEN not set; API authentication is disabled");
    }
    if config.verifier.mode == VerificationMode::Production {
        tracing::warn!(
            "production mode without a live identity authority: OTP verification will return 503"
        );
    }

    let port = config.port;
    let app = suvidha_api::app(AppState::with_config(config));

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Suvidha API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
