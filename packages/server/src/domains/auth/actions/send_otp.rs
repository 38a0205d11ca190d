//! Send OTP action

use tracing::{debug, error, info};

use crate::domains::auth::errors::AuthError;
use crate::domains::auth::types::{OtpSent, SendOtpRequest};
use crate::kernel::ServerDeps;

/// Ask Twilio to text a fresh code to the requested phone number.
///
/// Returns the provider's verification status (normally "pending").
pub async fn send_otp(request: SendOtpRequest, deps: &ServerDeps) -> Result<OtpSent, AuthError> {
    let phone_number = request.validate().inspect_err(|e| {
        debug!("Rejected send-otp request: {}", e);
    })?;

    match deps.twilio.send_otp(phone_number).await {
        Ok(status) => {
            info!(phone_number, %status, "OTP sent");
            Ok(OtpSent::new(status))
        }
        Err(e) => {
            error!(phone_number, error = ?e, "Twilio send-otp error");
            Err(AuthError::Provider(e))
        }
    }
}
