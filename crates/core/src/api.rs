//! Uniform JSON envelope wrapped around every API response.
//!
//! The wire shape is always `{"code": int, "data": any|null, "message": string}`.
//! `code` is [`SUCCESS_CODE`] on success and mirrors the HTTP status otherwise, so
//! clients that only look at the body can still tell failures apart.

use serde::{Deserialize, Serialize};

/// Envelope code for a successful response.
pub const SUCCESS_CODE: u16 = 0;

/// Envelope message for a successful response.
pub const SUCCESS_MESSAGE: &str = "success";

/// Response envelope, generic over the payload type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: u16,
    pub data: Option<T>,
    pub message: String,
}

impl<T> ApiResponse<T> {
    /// Successful response carrying `data`.
    pub fn success(data: T) -> Self {
        Self {
            code: SUCCESS_CODE,
            data: Some(data),
            message: SUCCESS_MESSAGE.to_string(),
        }
    }

    /// Successful response with `data: null`.
    pub fn empty() -> Self {
        Self {
            code: SUCCESS_CODE,
            data: None,
            message: SUCCESS_MESSAGE.to_string(),
        }
    }

    /// Error response; `code` should be the HTTP status of the response.
    pub fn error(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            data: None,
            message: message.into(),
        }
    }

    /// Returns true when the envelope reports success.
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }
}
