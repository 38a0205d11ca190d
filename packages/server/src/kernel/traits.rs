// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// The auth actions in domains/auth decide what to do with the results.
//
// Naming convention: Base* for trait names (e.g., BaseTwilioService)

use std::fmt;

use anyhow::Result;
use async_trait::async_trait;

// =============================================================================
// Twilio Service Trait (Infrastructure - SMS/OTP)
// =============================================================================

/// Status of a verification as reported by the OTP provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationStatus {
    Pending,
    Approved,
    Canceled,
    Expired,
    MaxAttemptsReached,
    Failed,
    Other(String),
}

impl VerificationStatus {
    pub fn parse(status: &str) -> Self {
        match status {
            "pending" => Self::Pending,
            "approved" => Self::Approved,
            "canceled" => Self::Canceled,
            "expired" => Self::Expired,
            "max_attempts_reached" => Self::MaxAttemptsReached,
            "failed" => Self::Failed,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Canceled => "canceled",
            Self::Expired => "expired",
            Self::MaxAttemptsReached => "max_attempts_reached",
            Self::Failed => "failed",
            Self::Other(status) => status,
        }
    }

    pub fn is_approved(&self) -> bool {
        matches!(self, Self::Approved)
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[async_trait]
pub trait BaseTwilioService: Send + Sync {
    /// Send OTP code via SMS to phone number. Returns the provider's status string.
    async fn send_otp(&self, phone_number: &str) -> Result<String>;

    /// Check OTP code for phone number. A wrong code is a non-approved status, not an error.
    async fn verify_otp(&self, phone_number: &str, code: &str) -> Result<VerificationStatus>;
}

// =============================================================================
// Identity Service Trait (Infrastructure - user records + custom tokens)
// =============================================================================

/// User record owned by the identity platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityUser {
    pub uid: String,
    pub phone_number: Option<String>,
}

/// Outcome of looking a user up by phone number
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserLookup {
    Found(IdentityUser),
    NotFound,
}

#[async_trait]
pub trait BaseIdentityService: Send + Sync {
    async fn get_user_by_phone_number(&self, phone_number: &str) -> Result<UserLookup>;

    async fn create_user(&self, phone_number: &str) -> Result<IdentityUser>;

    /// Mint a signed custom token the client exchanges for a session
    async fn create_custom_token(&self, uid: &str) -> Result<String>;
}
