//! Shared plumbing for the external HTTP services.

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;

/// Failure talking to an external service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("API key not configured")]
    MissingCredential,

    #[error("request failed: {0}")]
    Network(String),

    #[error("service returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("unexpected response: {0}")]
    Decode(String),
}

/// Builds a blocking client with the given per-request timeout.
pub fn client(timeout: Duration) -> Result<Client, ServiceError> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("fishid/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| ServiceError::Network(e.to_string()))
}

/// Checks the status and decodes a JSON body.
pub fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ServiceError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().unwrap_or_default();
        return Err(ServiceError::Status {
            status: status.as_u16(),
            message: error_message(&body),
        });
    }
    response
        .json()
        .map_err(|e| ServiceError::Decode(e.to_string()))
}

/// Pulls `error.message` or `reason` out of an error body, else the trimmed body.
fn error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        let message = value
            .pointer("/error/message")
            .or_else(|| value.get("reason"))
            .and_then(serde_json::Value::as_str);
        if let Some(message) = message {
            return message.to_string();
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "no details".to_string()
    } else {
        trimmed.chars().take(200).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_from_google_style_body() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid."}}"#;
        assert_eq!(error_message(body), "API key not valid.");
    }

    #[test]
    fn error_message_from_open_meteo_style_body() {
        let body = r#"{"error": true, "reason": "Latitude must be in range of -90 to 90°."}"#;
        assert_eq!(
            error_message(body),
            "Latitude must be in range of -90 to 90°."
        );
    }

    #[test]
    fn error_message_falls_back_to_body() {
        assert_eq!(error_message("  Bad Gateway \n"), "Bad Gateway");
        assert_eq!(error_message(""), "no details");
    }
}
