use thiserror::Error;

pub const PHONE_REQUIRED: &str = "Phone number is required.";
pub const PHONE_AND_CODE_REQUIRED: &str = "Phone and code are required.";
pub const INVALID_OTP: &str = "Invalid or expired OTP.";

/// Outcomes of an auth request that are not a success
#[derive(Debug, Error)]
pub enum AuthError {
    /// A required field was missing; nothing was sent to a provider
    #[error("{0}")]
    Validation(String),

    /// The provider completed the check but did not approve the code
    #[error("Invalid or expired OTP.")]
    RejectedVerification,

    /// Any failure raised by Twilio or Firebase; the message is the provider's
    #[error("{0}")]
    Provider(#[from] anyhow::Error),
}

impl AuthError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
