use axum::{extract::Extension, Json};

use crate::domains::auth::{actions, AuthError, OtpSent, OtpVerified, SendOtpRequest, VerifyOtpRequest};
use crate::server::app::AxumAppState;
use crate::server::extract::JsonBody;

/// `POST /send-otp`
pub async fn send_otp_handler(
    Extension(state): Extension<AxumAppState>,
    JsonBody(request): JsonBody<SendOtpRequest>,
) -> Result<Json<OtpSent>, AuthError> {
    actions::send_otp(request, &state.server_deps).await.map(Json)
}

/// `POST /verify-otp`
pub async fn verify_otp_handler(
    Extension(state): Extension<AxumAppState>,
    JsonBody(request): JsonBody<VerifyOtpRequest>,
) -> Result<Json<OtpVerified>, AuthError> {
    actions::verify_otp(request, &state.server_deps).await.map(Json)
}
