//! Verify OTP action

use anyhow::Result;
use tracing::{debug, error, info};

use crate::domains::auth::errors::AuthError;
use crate::domains::auth::types::{OtpVerified, VerifyOtpRequest};
use crate::kernel::{IdentityUser, ServerDeps, UserLookup};

/// Check the submitted code with Twilio and, if approved, issue a custom token.
///
/// Creates the identity user on first successful verification.
/// A check that completes without approval is `AuthError::RejectedVerification`.
pub async fn verify_otp(
    request: VerifyOtpRequest,
    deps: &ServerDeps,
) -> Result<OtpVerified, AuthError> {
    let (phone_number, code) = request.validate().inspect_err(|e| {
        debug!("Rejected verify-otp request: {}", e);
    })?;

    let result = check_and_issue(phone_number, code, deps).await;

    if let Err(AuthError::Provider(e)) = &result {
        error!(phone_number, error = ?e, "Twilio verify-otp error");
    }

    result
}

async fn check_and_issue(
    phone_number: &str,
    code: &str,
    deps: &ServerDeps,
) -> Result<OtpVerified, AuthError> {
    let status = deps.twilio.verify_otp(phone_number, code).await?;

    if !status.is_approved() {
        info!(phone_number, %status, "OTP not approved");
        return Err(AuthError::RejectedVerification);
    }

    let user = find_or_create_user(phone_number, deps).await?;
    let token = deps.identity.create_custom_token(&user.uid).await?;

    info!(uid = %user.uid, "OTP verified. Custom token issued.");
    Ok(OtpVerified::new(token))
}

/// Find the identity user bound to `phone_number`, creating one if absent
pub async fn find_or_create_user(phone_number: &str, deps: &ServerDeps) -> Result<IdentityUser> {
    match deps.identity.get_user_by_phone_number(phone_number).await? {
        UserLookup::Found(user) => Ok(user),
        UserLookup::NotFound => {
            let user = deps.identity.create_user(phone_number).await?;
            info!(uid = %user.uid, phone_number, "Created new user");
            Ok(user)
        }
    }
}
