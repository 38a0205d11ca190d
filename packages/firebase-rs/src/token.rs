//! Token signing with the service account key.
//!
//! Two kinds of JWT are signed here:
//! - custom tokens handed to client apps, which exchange them for a Firebase
//!   ID token via `signInWithCustomToken`
//! - OAuth2 assertions exchanged at the service account's `token_uri` for an
//!   access token used on admin API calls

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use crate::error::{FirebaseError, Result};

pub const CUSTOM_TOKEN_AUDIENCE: &str =
    "https://identitytoolkit.googleapis.com/google.identity.identitytoolkit.v1.IdentityToolkit";

/// Scopes requested for admin API access
pub const ADMIN_SCOPES: &str =
    "https://www.googleapis.com/auth/cloud-platform https://www.googleapis.com/auth/identitytoolkit";

const TOKEN_LIFETIME_SECS: i64 = 3600;
const MAX_UID_LEN: usize = 128;

/// Refresh access tokens this long before Google expires them
const EXPIRY_MARGIN_SECS: i64 = 60;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CustomTokenClaims {
    pub iss: String,
    pub sub: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
    pub uid: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub(crate) struct AssertionClaims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

pub(crate) struct TokenSigner {
    key: EncodingKey,
    key_id: Option<String>,
    client_email: String,
}

impl TokenSigner {
    pub fn new(key: EncodingKey, key_id: Option<String>, client_email: String) -> Self {
        Self {
            key,
            key_id,
            client_email,
        }
    }

    fn header(&self) -> Header {
        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.key_id.clone();
        header
    }

    /// Sign a custom token for `uid`, valid for one hour
    pub fn custom_token(&self, uid: &str, now: DateTime<Utc>) -> Result<String> {
        if uid.is_empty() || uid.chars().count() > MAX_UID_LEN {
            return Err(FirebaseError::InvalidArgument(format!(
                "uid must be a non-empty string with at most {} characters",
                MAX_UID_LEN
            )));
        }

        let claims = CustomTokenClaims {
            iss: self.client_email.clone(),
            sub: self.client_email.clone(),
            aud: CUSTOM_TOKEN_AUDIENCE.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(TOKEN_LIFETIME_SECS)).timestamp(),
            uid: uid.to_string(),
        };

        encode(&self.header(), &claims, &self.key).map_err(Into::into)
    }

    /// Sign the JWT-bearer assertion for the OAuth2 token exchange
    pub fn assertion(&self, token_uri: &str, now: DateTime<Utc>) -> Result<String> {
        let claims = AssertionClaims {
            iss: self.client_email.clone(),
            scope: ADMIN_SCOPES.to_string(),
            aud: token_uri.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(TOKEN_LIFETIME_SECS)).timestamp(),
        };

        encode(&self.header(), &claims, &self.key).map_err(Into::into)
    }
}

/// OAuth2 token endpoint response
#[derive(Debug, Deserialize)]
pub(crate) struct AccessTokenResponse {
    pub access_token: String,
    pub expires_in: i64,
}

/// OAuth2 token endpoint error (`{"error": "invalid_grant", ...}`)
#[derive(Debug, Deserialize)]
pub(crate) struct OAuthErrorBody {
    pub error: String,
    #[serde(default)]
    pub error_description: Option<String>,
}

#[derive(Debug, Clone)]
pub(crate) struct CachedToken {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

impl CachedToken {
    pub fn from_response(response: AccessTokenResponse, now: DateTime<Utc>) -> Self {
        Self {
            access_token: response.access_token,
            expires_at: now + Duration::seconds(response.expires_in),
        }
    }

    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(EXPIRY_MARGIN_SECS) < self.expires_at
    }
}
