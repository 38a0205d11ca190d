use std::fmt;

use jsonwebtoken::EncodingKey;
use serde::Deserialize;

use crate::error::{FirebaseError, Result};

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

/// Service account key file as downloaded from the Firebase console
#[derive(Clone, Deserialize)]
pub struct ServiceAccount {
    pub project_id: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    pub private_key: String,
    pub client_email: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

impl ServiceAccount {
    /// Parse the JSON credential bundle
    pub fn from_json(json: &str) -> Result<Self> {
        let account: ServiceAccount = serde_json::from_str(json)
            .map_err(|e| FirebaseError::Credentials(e.to_string()))?;

        if account.project_id.is_empty() {
            return Err(FirebaseError::Credentials("project_id is empty".to_string()));
        }
        if account.client_email.is_empty() {
            return Err(FirebaseError::Credentials("client_email is empty".to_string()));
        }

        Ok(account)
    }

    pub(crate) fn encoding_key(&self) -> Result<EncodingKey> {
        // Keys pasted into env files often carry escaped newlines
        let pem = self.private_key.replace("\\n", "\n");
        EncodingKey::from_rsa_pem(pem.as_bytes())
            .map_err(|e| FirebaseError::Credentials(format!("private_key: {}", e)))
    }
}

impl fmt::Debug for ServiceAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccount")
            .field("project_id", &self.project_id)
            .field("private_key_id", &self.private_key_id)
            .field("private_key", &"<redacted>")
            .field("client_email", &self.client_email)
            .field("token_uri", &self.token_uri)
            .finish()
    }
}
