//! Application setup and server configuration.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::Extension,
    http::Method,
    routing::{get, post},
    Router,
};
use firebase::FirebaseAuth;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use twilio::{TwilioOptions, TwilioService};

use crate::config::Config;
use crate::kernel::{FirebaseAdapter, ServerDeps, TwilioAdapter};
use crate::server::routes::{health_handler, send_otp_handler, verify_otp_handler, welcome_handler};

/// Shared application state
#[derive(Clone)]
pub struct AxumAppState {
    pub server_deps: Arc<ServerDeps>,
}

/// Construct the real provider clients from configuration
pub fn build_server_deps(config: &Config) -> Result<ServerDeps> {
    let twilio = Arc::new(TwilioService::new(TwilioOptions {
        account_sid: config.twilio_account_sid.clone(),
        auth_token: config.twilio_auth_token.clone(),
        service_id: config.twilio_service_sid.clone(),
    }));

    let firebase = Arc::new(
        FirebaseAuth::new(config.firebase_service_account.clone())
            .context("Failed to initialize Firebase Admin")?,
    );

    Ok(ServerDeps::new(
        Arc::new(TwilioAdapter::new(twilio)),
        Arc::new(FirebaseAdapter::new(firebase)),
    ))
}

/// Build the Axum application router
pub fn build_app(server_deps: ServerDeps) -> Router {
    let app_state = AxumAppState {
        server_deps: Arc::new(server_deps),
    };

    // Any origin may call the auth API (mobile and web clients)
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/", get(welcome_handler))
        .route("/health", get(health_handler))
        .route("/send-otp", post(send_otp_handler))
        .route("/verify-otp", post(verify_otp_handler))
        // Layers listed outermost first
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(Extension(app_state)),
        )
}
