// TestDependencies - mock implementations for testing
//
// Provides mock providers that can be injected into ServerDeps for tests.
// Every mock records its calls so tests can assert what was (not) invoked.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use super::{
    BaseIdentityService, BaseTwilioService, IdentityUser, ServerDeps, UserLookup,
    VerificationStatus,
};

// =============================================================================
// Mock Twilio Service
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyCallArgs {
    pub phone_number: String,
    pub code: String,
}

pub struct MockTwilioService {
    send_status: String,
    check_status: VerificationStatus,
    failure: Option<String>,
    send_calls: Arc<Mutex<Vec<String>>>,
    verify_calls: Arc<Mutex<Vec<VerifyCallArgs>>>,
}

impl MockTwilioService {
    pub fn new() -> Self {
        Self {
            send_status: "pending".to_string(),
            check_status: VerificationStatus::Approved,
            failure: None,
            send_calls: Arc::new(Mutex::new(Vec::new())),
            verify_calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Status returned from send_otp
    pub fn with_send_status(mut self, status: &str) -> Self {
        self.send_status = status.to_string();
        self
    }

    /// Status returned from verify_otp
    pub fn with_check_status(mut self, status: VerificationStatus) -> Self {
        self.check_status = status;
        self
    }

    /// Make every call fail with `message`
    pub fn failing(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    pub fn send_calls(&self) -> Vec<String> {
        self.send_calls.lock().unwrap().clone()
    }

    pub fn verify_calls(&self) -> Vec<VerifyCallArgs> {
        self.verify_calls.lock().unwrap().clone()
    }
}

impl Default for MockTwilioService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseTwilioService for MockTwilioService {
    async fn send_otp(&self, phone_number: &str) -> Result<String> {
        self.send_calls.lock().unwrap().push(phone_number.to_string());

        if let Some(message) = &self.failure {
            return Err(anyhow!("{}", message));
        }
        Ok(self.send_status.clone())
    }

    async fn verify_otp(&self, phone_number: &str, code: &str) -> Result<VerificationStatus> {
        self.verify_calls.lock().unwrap().push(VerifyCallArgs {
            phone_number: phone_number.to_string(),
            code: code.to_string(),
        });

        if let Some(message) = &self.failure {
            return Err(anyhow!("{}", message));
        }
        Ok(self.check_status.clone())
    }
}

// =============================================================================
// Mock Identity Service
// =============================================================================

/// Which identity call should fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityFailure {
    Lookup,
    Create,
    Token,
}

pub struct MockIdentityService {
    users: Arc<Mutex<Vec<IdentityUser>>>,
    failure: Option<(IdentityFailure, String)>,
    lookup_calls: Arc<Mutex<Vec<String>>>,
    created_users: Arc<Mutex<Vec<IdentityUser>>>,
    token_calls: Arc<Mutex<Vec<String>>>,
}

impl MockIdentityService {
    pub fn new() -> Self {
        Self {
            users: Arc::new(Mutex::new(Vec::new())),
            failure: None,
            lookup_calls: Arc::new(Mutex::new(Vec::new())),
            created_users: Arc::new(Mutex::new(Vec::new())),
            token_calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Seed an existing user
    pub fn with_user(self, uid: &str, phone_number: &str) -> Self {
        self.users.lock().unwrap().push(IdentityUser {
            uid: uid.to_string(),
            phone_number: Some(phone_number.to_string()),
        });
        self
    }

    pub fn failing(mut self, call: IdentityFailure, message: &str) -> Self {
        self.failure = Some((call, message.to_string()));
        self
    }

    fn fail_if(&self, call: IdentityFailure) -> Result<()> {
        match &self.failure {
            Some((failing, message)) if *failing == call => Err(anyhow!("{}", message)),
            _ => Ok(()),
        }
    }

    pub fn lookup_calls(&self) -> Vec<String> {
        self.lookup_calls.lock().unwrap().clone()
    }

    pub fn created_users(&self) -> Vec<IdentityUser> {
        self.created_users.lock().unwrap().clone()
    }

    pub fn token_calls(&self) -> Vec<String> {
        self.token_calls.lock().unwrap().clone()
    }
}

impl Default for MockIdentityService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseIdentityService for MockIdentityService {
    async fn get_user_by_phone_number(&self, phone_number: &str) -> Result<UserLookup> {
        self.lookup_calls
            .lock()
            .unwrap()
            .push(phone_number.to_string());
        self.fail_if(IdentityFailure::Lookup)?;

        let users = self.users.lock().unwrap();
        let lookup = match users
            .iter()
            .find(|user| user.phone_number.as_deref() == Some(phone_number))
        {
            Some(user) => UserLookup::Found(user.clone()),
            None => UserLookup::NotFound,
        };
        Ok(lookup)
    }

    async fn create_user(&self, phone_number: &str) -> Result<IdentityUser> {
        self.fail_if(IdentityFailure::Create)?;

        let user = IdentityUser {
            uid: format!("uid-{}", self.created_users.lock().unwrap().len() + 1),
            phone_number: Some(phone_number.to_string()),
        };
        self.users.lock().unwrap().push(user.clone());
        self.created_users.lock().unwrap().push(user.clone());
        Ok(user)
    }

    async fn create_custom_token(&self, uid: &str) -> Result<String> {
        self.token_calls.lock().unwrap().push(uid.to_string());
        self.fail_if(IdentityFailure::Token)?;

        Ok(format!("custom-token-for-{}", uid))
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

/// Bundle of mocks plus the ServerDeps that wraps them
pub struct TestDependencies {
    pub twilio: Arc<MockTwilioService>,
    pub identity: Arc<MockIdentityService>,
}

impl TestDependencies {
    pub fn new(twilio: MockTwilioService, identity: MockIdentityService) -> Self {
        Self {
            twilio: Arc::new(twilio),
            identity: Arc::new(identity),
        }
    }

    pub fn server_deps(&self) -> ServerDeps {
        ServerDeps::new(self.twilio.clone(), self.identity.clone())
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new(MockTwilioService::new(), MockIdentityService::new())
    }
}
