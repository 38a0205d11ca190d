//! Firebase Authentication admin client.
//!
//! Covers the slice of the Admin SDK a phone-auth backend needs: looking up
//! and creating users by phone number, and minting custom tokens.

pub mod credentials;
pub mod error;
pub mod models;
pub mod token;

use chrono::Utc;
use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::RwLock;

pub use crate::credentials::ServiceAccount;
pub use crate::error::{FirebaseError, Result};
pub use crate::models::UserRecord;

use crate::models::{
    CreateUserRequest, CreateUserResponse, GoogleErrorBody, LookupRequest, LookupResponse,
};
use crate::token::{AccessTokenResponse, CachedToken, OAuthErrorBody, TokenSigner};

const IDENTITY_TOOLKIT_URL: &str = "https://identitytoolkit.googleapis.com/v1";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

pub struct FirebaseAuth {
    project_id: String,
    token_uri: String,
    identity_toolkit_url: String,
    signer: TokenSigner,
    client: Client,
    access_token: RwLock<Option<CachedToken>>,
}

impl FirebaseAuth {
    pub fn new(account: ServiceAccount) -> Result<Self> {
        let key = account.encoding_key()?;

        Ok(Self {
            project_id: account.project_id,
            token_uri: account.token_uri,
            identity_toolkit_url: IDENTITY_TOOLKIT_URL.to_string(),
            signer: TokenSigner::new(key, account.private_key_id, account.client_email),
            client: Client::new(),
            access_token: RwLock::new(None),
        })
    }

    /// Override the Identity Toolkit base URL (e.g. the Auth emulator)
    pub fn with_identity_toolkit_url(mut self, url: impl Into<String>) -> Self {
        self.identity_toolkit_url = url.into().trim_end_matches('/').to_string();
        self
    }

    fn accounts_url(&self, method: &str) -> String {
        format!(
            "{}/projects/{}/accounts{}",
            self.identity_toolkit_url, self.project_id, method
        )
    }

    /// Mint a custom token for `uid`. Signed locally; no network call.
    pub fn create_custom_token(&self, uid: &str) -> Result<String> {
        self.signer.custom_token(uid, Utc::now())
    }

    /// Find the user registered with `phone_number`, if any
    pub async fn get_user_by_phone_number(&self, phone_number: &str) -> Result<Option<UserRecord>> {
        let response: LookupResponse = self
            .post_json(
                self.accounts_url(":lookup"),
                &LookupRequest {
                    phone_number: [phone_number],
                },
            )
            .await?;

        Ok(response.users.into_iter().next())
    }

    /// Create a user bound to `phone_number`
    pub async fn create_user(&self, phone_number: &str) -> Result<UserRecord> {
        let response: CreateUserResponse = self
            .post_json(self.accounts_url(""), &CreateUserRequest { phone_number })
            .await?;

        Ok(UserRecord {
            uid: response.local_id,
            phone_number: Some(phone_number.to_string()),
            disabled: false,
        })
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(&self, url: String, body: &B) -> Result<T> {
        let access_token = self.access_token().await?;

        let response = self
            .client
            .post(url)
            .bearer_auth(access_token)
            .json(body)
            .send()
            .await?;

        parse_google_response(response).await
    }

    /// Current OAuth2 access token, refreshed when close to expiry
    async fn access_token(&self) -> Result<String> {
        if let Some(cached) = self.access_token.read().await.as_ref() {
            if cached.is_fresh(Utc::now()) {
                return Ok(cached.access_token.clone());
            }
        }

        let mut slot = self.access_token.write().await;

        // Another request may have refreshed while we waited for the lock
        if let Some(cached) = slot.as_ref() {
            if cached.is_fresh(Utc::now()) {
                return Ok(cached.access_token.clone());
            }
        }

        let now = Utc::now();
        let assertion = self.signer.assertion(&self.token_uri, now)?;

        let response = self
            .client
            .post(&self.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            let message = match serde_json::from_str::<OAuthErrorBody>(&body) {
                Ok(error) => match error.error_description {
                    Some(description) => format!("{}: {}", error.error, description),
                    None => error.error,
                },
                Err(_) => format!("Failed to obtain access token ({})", status),
            };
            return Err(FirebaseError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let token: AccessTokenResponse =
            serde_json::from_str(&body).map_err(|e| FirebaseError::Decode(e.to_string()))?;
        let cached = CachedToken::from_response(token, now);
        let access_token = cached.access_token.clone();
        *slot = Some(cached);

        Ok(access_token)
    }
}

async fn parse_google_response<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let message = match serde_json::from_str::<GoogleErrorBody>(&body) {
            Ok(error) => error.error.message,
            Err(_) => format!("Firebase returned an error ({})", status),
        };
        return Err(FirebaseError::Api {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_str(&body).map_err(|e| FirebaseError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::tests::test_account;

    #[test]
    fn test_accounts_urls() {
        let auth = FirebaseAuth::new(test_account()).unwrap();
        assert_eq!(
            auth.accounts_url(":lookup"),
            "https://identitytoolkit.googleapis.com/v1/projects/marsos-test/accounts:lookup"
        );

        let auth = auth.with_identity_toolkit_url("http://localhost:9099/identitytoolkit.googleapis.com/v1/");
        assert_eq!(
            auth.accounts_url(""),
            "http://localhost:9099/identitytoolkit.googleapis.com/v1/projects/marsos-test/accounts"
        );
    }

    #[test]
    fn test_custom_token_is_local() {
        let auth = FirebaseAuth::new(test_account()).unwrap();
        let token = auth.create_custom_token("user-123").unwrap();
        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn test_rejects_garbage_private_key() {
        let mut account = test_account();
        account.private_key = "not a key".to_string();
        assert!(matches!(
            FirebaseAuth::new(account),
            Err(FirebaseError::Credentials(_))
        ));
    }

    // ========================================================================
    // Against an in-process Google stand-in
    // ========================================================================

    use axum::{
        extract::State,
        http::{HeaderMap, StatusCode, Uri},
        routing::post,
        Json, Router,
    };
    use serde_json::{json, Value};
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    const ACCESS_TOKEN: &str = "ya29.test-access-token";

    #[derive(Clone, Default)]
    struct GoogleStub {
        token_hits: Arc<AtomicUsize>,
    }

    async fn issue_token(State(stub): State<GoogleStub>, body: String) -> Json<Value> {
        stub.token_hits.fetch_add(1, Ordering::SeqCst);
        assert!(body.contains("grant_type=urn%3Aietf%3Aparams%3Aoauth%3Agrant-type%3Ajwt-bearer"));
        assert!(body.contains("assertion="));
        Json(json!({"access_token": ACCESS_TOKEN, "expires_in": 3599, "token_type": "Bearer"}))
    }

    async fn reject_token() -> (StatusCode, Json<Value>) {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "invalid_grant", "error_description": "Invalid JWT Signature."})),
        )
    }

    async fn accounts(uri: Uri, headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
        let bearer = format!("Bearer {}", ACCESS_TOKEN);
        if headers.get("authorization").and_then(|v| v.to_str().ok()) != Some(bearer.as_str()) {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({"error": {"code": 401, "message": "UNAUTHENTICATED"}})),
            );
        }

        match uri.path() {
            "/v1/projects/marsos-test/accounts:lookup" => {
                if body["phoneNumber"][0] == "bad" {
                    return (
                        StatusCode::BAD_REQUEST,
                        Json(json!({"error": {"code": 400, "message": "INVALID_PHONE_NUMBER : bad"}})),
                    );
                }
                (StatusCode::OK, Json(json!({"kind": "identitytoolkit#GetAccountInfoResponse"})))
            }
            "/v1/projects/marsos-test/accounts" => {
                assert_eq!(body, json!({"phoneNumber": "+15551234567"}));
                (StatusCode::OK, Json(json!({"kind": "identitytoolkit#SignupNewUserResponse", "localId": "NEWUID"})))
            }
            _ => (StatusCode::NOT_FOUND, Json(json!({"error": {"code": 404, "message": "Not Found"}}))),
        }
    }

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    async fn stubbed_auth(token_route: Router) -> FirebaseAuth {
        let base = serve(token_route.fallback(accounts)).await;
        let mut account = test_account();
        account.token_uri = format!("{}/token", base);
        FirebaseAuth::new(account)
            .unwrap()
            .with_identity_toolkit_url(format!("{}/v1", base))
    }

    #[tokio::test]
    async fn test_lookup_then_create_reuses_access_token() {
        let stub = GoogleStub::default();
        let auth = stubbed_auth(
            Router::new()
                .route("/token", post(issue_token))
                .with_state(stub.clone()),
        )
        .await;

        let found = auth.get_user_by_phone_number("+15551234567").await.unwrap();
        assert!(found.is_none());

        let created = auth.create_user("+15551234567").await.unwrap();
        assert_eq!(created.uid, "NEWUID");
        assert_eq!(created.phone_number.as_deref(), Some("+15551234567"));

        assert_eq!(stub.token_hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_google_error_message_is_kept() {
        let auth = stubbed_auth(
            Router::new()
                .route("/token", post(issue_token))
                .with_state(GoogleStub::default()),
        )
        .await;

        let error = auth.get_user_by_phone_number("bad").await.unwrap_err();
        assert_eq!(error.to_string(), "INVALID_PHONE_NUMBER : bad");
        assert!(matches!(error, FirebaseError::Api { status: 400, .. }));
    }

    #[tokio::test]
    async fn test_token_endpoint_error_is_reported() {
        let auth = stubbed_auth(Router::new().route("/token", post(reject_token))).await;

        let error = auth.create_user("+15551234567").await.unwrap_err();
        assert_eq!(error.to_string(), "invalid_grant: Invalid JWT Signature.");
        assert!(matches!(error, FirebaseError::Api { status: 400, .. }));
    }

    #[tokio::test]
    async fn test_unreachable_token_endpoint_fails_lookup() {
        let mut account = test_account();
        account.token_uri = "http://127.0.0.1:9/token".to_string();
        let auth = FirebaseAuth::new(account).unwrap();

        let result = auth.get_user_by_phone_number("+15551234567").await;
        assert!(result.is_err());
    }
}
