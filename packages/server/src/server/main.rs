// Main entry point for the auth API server

use anyhow::{Context, Result};
use server_core::{
    server::{build_app, build_server_deps},
    Config,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Log whether a variable is set, showing only its first characters
fn mask_env(name: &str) {
    match std::env::var(name) {
        Ok(val) if val.is_empty() => tracing::info!("  {}: (empty)", name),
        Ok(val) => {
            let show = val.char_indices().nth(4).map(|(i, _)| i).unwrap_or(val.len());
            tracing::info!(
                "  {}: {}{}  ({} chars)",
                name,
                &val[..show],
                "*".repeat(val.chars().count().saturating_sub(4)),
                val.len()
            );
        }
        Err(_) => tracing::warn!("  {}: NOT SET", name),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug,tower_http=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_line_number(true),
        )
        .init();

    tracing::info!("Starting Marsos Auth API");

    // Load configuration (also reads .env)
    let config = Config::from_env().context("Failed to load configuration")?;

    tracing::info!("Environment variables:");
    for name in &[
        "FIREBASE_ADMIN_CREDENTIALS",
        "TWILIO_ACCOUNT_SID",
        "TWILIO_AUTH_TOKEN",
        "TWILIO_SERVICE_SID",
        "PORT",
    ] {
        mask_env(name);
    }

    let server_deps = build_server_deps(&config)?;
    tracing::info!(
        project_id = %config.firebase_service_account.project_id,
        "Provider clients initialized"
    );

    let app = build_app(server_deps);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;
    tracing::info!("Server running on http://localhost:{}", config.port);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
