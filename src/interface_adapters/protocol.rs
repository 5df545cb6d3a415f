use serde::{Deserialize, Serialize};

use crate::domain::errors::ApiError;
use crate::domain::ports::OtpVerdict;

#[derive(Debug, Serialize)]
pub struct SendOtpRequest<'a> {
    // Email address or phone number, as typed.
    pub identifier: &'a str,
}

#[derive(Debug, Serialize)]
pub struct VerifyOtpRequest<'a> {
    pub identifier: &'a str,
    pub otp: &'a str,
}

// Verification body. Every field is optional on the wire so a missing flag
// can be told apart from an unparseable body.
#[derive(Debug, Deserialize)]
pub struct VerifyOtpResponse {
    pub success: Option<bool>,
    pub token: Option<String>,
    pub message: Option<String>,
}

impl VerifyOtpResponse {
    pub fn into_verdict(self) -> Result<OtpVerdict, ApiError> {
        match (self.success, self.token) {
            (Some(true), Some(token)) if !token.is_empty() => Ok(OtpVerdict::Accepted { token }),
            (Some(true), _) => Err(ApiError::Decode(
                "verification succeeded without a token".to_string(),
            )),
            (Some(false), _) => Ok(OtpVerdict::Rejected {
                message: self.message,
            }),
            (None, _) => Err(ApiError::Decode(
                "verification response is missing `success`".to_string(),
            )),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
}

// Error envelope some backends attach to non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}
