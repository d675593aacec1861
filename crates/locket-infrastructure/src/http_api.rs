//! HttpAuthApi - reqwest implementation of the backend contract.
//!
//! Every transport or server failure is funneled through a single
//! normalization step before it leaves this module, so the stores only ever
//! see human-readable error messages.

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use locket_core::config::BackendConfig;
use locket_core::error::{LocketError, Result};
use locket_core::session::AuthApi;
use locket_core::user::{AuthResponse, LoginData, RegisterData, UpdateProfileData, User};

/// Client for the account backend's REST surface.
///
/// Holds a single `reqwest::Client` configured with the request timeout
/// from [`BackendConfig`]; endpoint paths are resolved against the
/// configured origin. Bearer tokens are attached per call by the session
/// store, which owns the credential.
pub struct HttpAuthApi {
    client: Client,
    config: BackendConfig,
}

impl HttpAuthApi {
    /// Creates a new client from the backend settings.
    pub fn new(config: BackendConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LocketError::internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    async fn parse_response<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(normalize_server_error(status, &body));
        }

        response.json().await.map_err(|e| {
            LocketError::serialization(format!("Failed to parse response: {}", e))
        })
    }
}

#[async_trait::async_trait]
impl AuthApi for HttpAuthApi {
    async fn signup(&self, data: &RegisterData) -> Result<AuthResponse> {
        tracing::debug!("Signup request for {}", data.email);
        let response = self
            .client
            .post(self.config.api_url("/signup"))
            .json(data)
            .send()
            .await
            .map_err(normalize_transport_error)?;

        Self::parse_response(response).await
    }

    async fn login(&self, data: &LoginData) -> Result<AuthResponse> {
        tracing::debug!("Login request for {}", data.email);
        let response = self
            .client
            .post(self.config.api_url("/login"))
            .json(data)
            .send()
            .await
            .map_err(normalize_transport_error)?;

        Self::parse_response(response).await
    }

    async fn fetch_profile(&self, token: &str) -> Result<User> {
        let response = self
            .client
            .get(self.config.api_url("/profile"))
            .bearer_auth(token)
            .send()
            .await
            .map_err(normalize_transport_error)?;

        Self::parse_response(response).await
    }

    async fn update_profile(&self, token: &str, data: &UpdateProfileData) -> Result<User> {
        let response = self
            .client
            .put(self.config.api_url("/profile"))
            .bearer_auth(token)
            .json(data)
            .send()
            .await
            .map_err(normalize_transport_error)?;

        Self::parse_response(response).await
    }

    async fn logout(&self, token: &str) -> Result<()> {
        let response = self
            .client
            .post(self.config.api_url("/logout"))
            .bearer_auth(token)
            .send()
            .await
            .map_err(normalize_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(normalize_server_error(status, &body));
        }
        Ok(())
    }
}

/// Error body shape the backend emits for 4xx/5xx responses.
#[derive(Deserialize, Default)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

/// Normalizes a non-success response: prefer `body.error`, then
/// `body.message`, then a generic status line.
fn normalize_server_error(status: StatusCode, body: &str) -> LocketError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    let message = parsed
        .error
        .filter(|m| !m.is_empty())
        .or(parsed.message.filter(|m| !m.is_empty()))
        .unwrap_or_else(|| format!("Server error ({})", status.as_u16()));

    LocketError::server(status.as_u16(), message)
}

/// Normalizes a transport failure into the fixed user-facing messages.
fn normalize_transport_error(err: reqwest::Error) -> LocketError {
    tracing::debug!("Transport error: {}", err);
    if err.is_timeout() {
        LocketError::network("Request timeout - please try again")
    } else if err.is_connect() || err.is_request() {
        LocketError::network("Network error - please check your connection")
    } else {
        LocketError::network("An unexpected error occurred")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_prefers_body_error() {
        let err = normalize_server_error(
            StatusCode::BAD_REQUEST,
            r#"{"error": "Email already registered", "message": "ignored"}"#,
        );
        assert_eq!(err.to_string(), "Email already registered");
    }

    #[test]
    fn test_normalize_falls_back_to_body_message() {
        let err = normalize_server_error(
            StatusCode::BAD_REQUEST,
            r#"{"message": "Missing password"}"#,
        );
        assert_eq!(err.to_string(), "Missing password");
    }

    #[test]
    fn test_normalize_falls_back_to_status_line() {
        let err = normalize_server_error(StatusCode::BAD_GATEWAY, "not even json");
        assert_eq!(err.to_string(), "Server error (502)");
    }

    #[test]
    fn test_normalize_ignores_empty_fields() {
        let err = normalize_server_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"error": "", "message": ""}"#,
        );
        assert_eq!(err.to_string(), "Server error (500)");
    }
}
