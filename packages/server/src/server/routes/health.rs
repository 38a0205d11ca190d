use axum::Json;
use serde::Serialize;

pub const WELCOME_MESSAGE: &str = "Welcome to the Marsos Auth API";

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
}

/// Landing route
pub async fn welcome_handler() -> &'static str {
    WELCOME_MESSAGE
}

/// Liveness probe. The service holds no local state, so being able to answer is healthy.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
