//! Auth domain request/response types
//!
//! Requests keep every field optional so a missing field is reported with the
//! endpoint's own message instead of a deserializer error.

use serde::{Deserialize, Serialize};

use super::errors::{AuthError, PHONE_AND_CODE_REQUIRED, PHONE_REQUIRED};

/// Body of `POST /send-otp`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SendOtpRequest {
    #[serde(default)]
    pub phone: Option<String>,
}

impl SendOtpRequest {
    /// The phone number, if present and non-empty
    pub fn validate(&self) -> Result<&str, AuthError> {
        non_empty(&self.phone).ok_or_else(|| AuthError::validation(PHONE_REQUIRED))
    }
}

/// Body of `POST /verify-otp`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerifyOtpRequest {
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

impl VerifyOtpRequest {
    /// The (phone, code) pair, if both are present and non-empty
    pub fn validate(&self) -> Result<(&str, &str), AuthError> {
        match (non_empty(&self.phone), non_empty(&self.code)) {
            (Some(phone), Some(code)) => Ok((phone, code)),
            _ => Err(AuthError::validation(PHONE_AND_CODE_REQUIRED)),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}

/// Result of sending an OTP
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpSent {
    pub success: bool,
    pub status: String,
}

impl OtpSent {
    pub fn new(status: String) -> Self {
        Self {
            success: true,
            status,
        }
    }
}

/// Result of verifying an OTP
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpVerified {
    pub success: bool,
    pub token: String,
}

impl OtpVerified {
    pub fn new(token: String) -> Self {
        Self {
            success: true,
            token,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_request_requires_phone() {
        let missing: SendOtpRequest = serde_json::from_str("{}").unwrap();
        let empty: SendOtpRequest = serde_json::from_str(r#"{"phone": ""}"#).unwrap();
        let null: SendOtpRequest = serde_json::from_str(r#"{"phone": null}"#).unwrap();

        for request in [missing, empty, null] {
            let error = request.validate().unwrap_err();
            assert_eq!(error.to_string(), PHONE_REQUIRED);
        }

        let request: SendOtpRequest = serde_json::from_str(r#"{"phone": "+15551234567"}"#).unwrap();
        assert_eq!(request.validate().unwrap(), "+15551234567");
    }

    #[test]
    fn test_verify_request_requires_both_fields() {
        let no_code: VerifyOtpRequest =
            serde_json::from_str(r#"{"phone": "+15551234567"}"#).unwrap();
        let no_phone: VerifyOtpRequest = serde_json::from_str(r#"{"code": "123456"}"#).unwrap();
        let empty_code: VerifyOtpRequest =
            serde_json::from_str(r#"{"phone": "+15551234567", "code": ""}"#).unwrap();

        for request in [no_code, no_phone, empty_code] {
            let error = request.validate().unwrap_err();
            assert_eq!(error.to_string(), PHONE_AND_CODE_REQUIRED);
        }

        let request: VerifyOtpRequest =
            serde_json::from_str(r#"{"phone": "+15551234567", "code": "123456"}"#).unwrap();
        assert_eq!(request.validate().unwrap(), ("+15551234567", "123456"));
    }

    #[test]
    fn test_response_shapes() {
        assert_eq!(
            serde_json::to_value(OtpSent::new("pending".to_string())).unwrap(),
            serde_json::json!({"success": true, "status": "pending"})
        );
        assert_eq!(
            serde_json::to_value(OtpVerified::new("tok".to_string())).unwrap(),
            serde_json::json!({"success": true, "token": "tok"})
        );
    }
}
