//! JSON body extractor for the auth endpoints.
//!
//! Unlike `axum::Json`, a request without a JSON content type (or with an
//! empty body) is read as an empty object, so it fails field validation with
//! the endpoint's own message rather than a 415. A top-level JSON array is
//! read the same way, since it carries no named fields.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, HeaderMap},
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domains::auth::AuthError;

pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = has_json_content_type(req.headers());

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AuthError::validation(e.body_text()))?;

        if !is_json || bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(JsonBody(T::default()));
        }

        let value: Value = serde_json::from_slice(&bytes).map_err(invalid_json)?;
        if value.is_array() {
            return Ok(JsonBody(T::default()));
        }

        serde_json::from_value(value)
            .map(JsonBody)
            .map_err(invalid_json)
    }
}

fn invalid_json(e: serde_json::Error) -> AuthError {
    AuthError::validation(format!("Invalid JSON body: {}", e))
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };

    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}
