//! HTTP client for the todos API.

pub mod todos;

use serde::de::DeserializeOwned;
use todos_core::api::ApiResponse;

use crate::error::{ClientError, Result};

/// Default server URL when neither `--base-url` nor `TODOS_URL` is given.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// HTTP client for the todos API.
#[derive(Debug, Clone)]
pub struct TodosClient {
    client: reqwest::Client,
    base_url: String,
}

impl TodosClient {
    /// Create a new client with the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a URL for an endpoint.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Unwrap the response envelope, expecting a non-null `data`.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status().as_u16();
        let body = response.bytes().await?;
        decode_envelope(status, &body)?
            .ok_or_else(|| ClientError::InvalidResponse("missing data in response".to_string()))
    }

    /// Unwrap an envelope whose `data` is expected to be null.
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        let status = response.status().as_u16();
        let body = response.bytes().await?;
        decode_envelope::<serde_json::Value>(status, &body).map(|_| ())
    }
}

/// Decodes a `{code, data, message}` body.
///
/// A non-zero `code` is an error even when the HTTP status says otherwise.
/// Bodies that are not an envelope at all are reported with the HTTP status.
pub(crate) fn decode_envelope<T: DeserializeOwned>(status: u16, body: &[u8]) -> Result<Option<T>> {
    let envelope: ApiResponse<T> = match serde_json::from_slice(body) {
        Ok(envelope) => envelope,
        Err(e) if (200..300).contains(&status) => return Err(ClientError::Json(e)),
        Err(_) => {
            return Err(ClientError::ServerError {
                status,
                message: String::from_utf8_lossy(body).into_owned(),
            })
        }
    };

    if envelope.is_success() {
        return Ok(envelope.data);
    }

    if envelope.code == 404 {
        Err(ClientError::NotFound {
            resource: envelope.message,
        })
    } else {
        Err(ClientError::ServerError {
            status: envelope.code,
            message: envelope.message,
        })
    }
}
