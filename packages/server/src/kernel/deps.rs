use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use firebase::FirebaseAuth;
use twilio::{Channel, TwilioService};

use crate::kernel::{
    BaseIdentityService, BaseTwilioService, IdentityUser, UserLookup, VerificationStatus,
};

// =============================================================================
// TwilioService Adapter (implements BaseTwilioService trait)
// =============================================================================

/// Wrapper around TwilioService that implements BaseTwilioService trait
pub struct TwilioAdapter(pub Arc<TwilioService>);

impl TwilioAdapter {
    pub fn new(service: Arc<TwilioService>) -> Self {
        Self(service)
    }
}

#[async_trait]
impl BaseTwilioService for TwilioAdapter {
    async fn send_otp(&self, phone_number: &str) -> Result<String> {
        let verification = self.0.send_otp(phone_number, Channel::Sms).await?;
        Ok(verification.status)
    }

    async fn verify_otp(&self, phone_number: &str, code: &str) -> Result<VerificationStatus> {
        let check = self.0.verify_otp(phone_number, code).await?;
        Ok(VerificationStatus::parse(&check.status))
    }
}

// =============================================================================
// FirebaseAuth Adapter (implements BaseIdentityService trait)
// =============================================================================

/// Wrapper around FirebaseAuth that implements BaseIdentityService trait
pub struct FirebaseAdapter(pub Arc<FirebaseAuth>);

impl FirebaseAdapter {
    pub fn new(auth: Arc<FirebaseAuth>) -> Self {
        Self(auth)
    }
}

fn identity_user(record: firebase::UserRecord) -> IdentityUser {
    IdentityUser {
        uid: record.uid,
        phone_number: record.phone_number,
    }
}

#[async_trait]
impl BaseIdentityService for FirebaseAdapter {
    async fn get_user_by_phone_number(&self, phone_number: &str) -> Result<UserLookup> {
        let lookup = match self.0.get_user_by_phone_number(phone_number).await? {
            Some(record) => UserLookup::Found(identity_user(record)),
            None => UserLookup::NotFound,
        };
        Ok(lookup)
    }

    async fn create_user(&self, phone_number: &str) -> Result<IdentityUser> {
        let record = self.0.create_user(phone_number).await?;
        Ok(identity_user(record))
    }

    async fn create_custom_token(&self, uid: &str) -> Result<String> {
        Ok(self.0.create_custom_token(uid)?)
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

/// Server dependencies accessible to handlers (using traits for testability)
#[derive(Clone)]
pub struct ServerDeps {
    pub twilio: Arc<dyn BaseTwilioService>,
    pub identity: Arc<dyn BaseIdentityService>,
}

impl ServerDeps {
    /// Create new ServerDeps with the given dependencies
    pub fn new(twilio: Arc<dyn BaseTwilioService>, identity: Arc<dyn BaseIdentityService>) -> Self {
        Self { twilio, identity }
    }
}
