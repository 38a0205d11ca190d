//! Minimal client for the Twilio Verify v2 API.

use std::collections::HashMap;

pub mod models;
use reqwest::{header, Client, Response};
use thiserror::Error;

pub use crate::models::{Channel, ErrorBody, OTPResponse, OTPVerifyResponse};

const DEFAULT_BASE_URL: &str = "https://verify.twilio.com/v2";

#[derive(Debug, Error)]
pub enum TwilioError {
    #[error("{0}")]
    Request(#[from] reqwest::Error),

    /// Twilio answered with an error document; `message` is Twilio's own text
    #[error("{message}")]
    Api {
        status: u16,
        code: Option<u32>,
        message: String,
    },

    #[error("Failed to parse Twilio response: {0}")]
    Decode(String),
}

#[derive(Debug, Clone)]
pub struct TwilioOptions {
    pub account_sid: String,
    pub auth_token: String,
    pub service_id: String,
}

#[derive(Debug, Clone)]
pub struct TwilioService {
    options: TwilioOptions,
    base_url: String,
    client: Client,
}

impl TwilioService {
    pub fn new(options: TwilioOptions) -> Self {
        Self {
            options,
            base_url: DEFAULT_BASE_URL.to_string(),
            client: Client::new(),
        }
    }

    /// Point the client at a different Verify host (mock servers, regional edges)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn service_url(&self, resource: &str) -> String {
        format!(
            "{base}/Services/{serv_id}/{resource}",
            base = self.base_url,
            serv_id = self.options.service_id,
        )
    }

    /// Start a verification: Twilio sends a fresh code over `channel`
    pub async fn send_otp(
        &self,
        recipient: &str,
        channel: Channel,
    ) -> Result<OTPResponse, TwilioError> {
        let mut form_body: HashMap<&str, &str> = HashMap::new();
        form_body.insert("To", recipient);
        form_body.insert("Channel", channel.as_str());

        let response = self
            .post_form(self.service_url("Verifications"), &form_body)
            .await?;

        parse_response(response).await
    }

    /// Check a submitted code against the pending verification for `recipient`.
    ///
    /// A wrong code is not an error: Twilio still answers 200 and the returned
    /// status stays "pending".
    pub async fn verify_otp(
        &self,
        recipient: &str,
        code: &str,
    ) -> Result<OTPVerifyResponse, TwilioError> {
        let mut form_body: HashMap<&str, &str> = HashMap::new();
        form_body.insert("To", recipient);
        form_body.insert("Code", code);

        let response = self
            .post_form(self.service_url("VerificationCheck"), &form_body)
            .await?;

        parse_response(response).await
    }

    async fn post_form(
        &self,
        url: String,
        form_body: &HashMap<&str, &str>,
    ) -> Result<Response, TwilioError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/x-www-form-urlencoded"),
        );

        let response = self
            .client
            .post(url)
            .basic_auth(&self.options.account_sid, Some(&self.options.auth_token))
            .headers(headers)
            .form(form_body)
            .send()
            .await?;

        Ok(response)
    }
}

async fn parse_response<T: serde::de::DeserializeOwned>(
    response: Response,
) -> Result<T, TwilioError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(api_error(status.as_u16(), &body));
    }

    serde_json::from_str(&body).map_err(|e| TwilioError::Decode(e.to_string()))
}

fn api_error(status: u16, body: &str) -> TwilioError {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(error) => TwilioError::Api {
            status,
            code: error.code,
            message: error.message,
        },
        Err(_) => TwilioError::Api {
            status,
            code: None,
            message: format!("Twilio returned an error ({})", status),
        },
    }
}
