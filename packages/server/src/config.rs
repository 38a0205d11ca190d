use anyhow::{Context, Result};
use dotenvy::dotenv;
use firebase::ServiceAccount;
use std::env;

const DEFAULT_PORT: u16 = 5000;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub firebase_service_account: ServiceAccount,
    pub twilio_account_sid: String,
    pub twilio_auth_token: String,
    pub twilio_service_sid: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| -> Result<String> {
            lookup(name)
                .filter(|value| !value.is_empty())
                .with_context(|| format!("{} must be set", name))
        };

        let credentials = required("FIREBASE_ADMIN_CREDENTIALS")?;
        let firebase_service_account = ServiceAccount::from_json(&credentials)
            .context("FIREBASE_ADMIN_CREDENTIALS must be a service account JSON document")?;

        let port = match lookup("PORT").filter(|value| !value.is_empty()) {
            Some(port) => port.parse().context("PORT must be a valid number")?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            port,
            firebase_service_account,
            twilio_account_sid: required("TWILIO_ACCOUNT_SID")?,
            twilio_auth_token: required("TWILIO_AUTH_TOKEN")?,
            twilio_service_sid: required("TWILIO_SERVICE_SID")?,
        })
    }
}
