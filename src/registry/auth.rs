//! Authentication module for Docker registry access
//!
//! Exchanges a username/password pair for a short-lived bearer token via the
//! registry's login endpoint. One request, no retry: a failed login aborts
//! the scan before any existence check is issued.

use crate::config::RegistryConfig;
use crate::error::{CheckerError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Short-lived bearer token returned by the login endpoint.
///
/// Owned by the caller for the duration of one scan and never persisted.
#[derive(Clone)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// The token is a credential; keep it out of debug output.
impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AuthToken(<{} chars>)", self.0.len())
    }
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: Option<String>,
}

#[derive(Debug)]
pub struct Authenticator {
    client: Client,
    address: String,
}

impl Authenticator {
    pub fn new(registry: &RegistryConfig) -> Result<Self> {
        Ok(Self {
            client: super::build_http_client(registry)?,
            address: registry.address.clone(),
        })
    }

    /// Exchange credentials for a bearer token.
    ///
    /// Succeeds only on a 200 response whose body carries a `token` field;
    /// any other status, a transport failure, or a token-less body is an
    /// authentication error.
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthToken> {
        let url = format!("{}/v2/users/login/", self.address);
        let payload = LoginRequest { username, password };

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| CheckerError::Authentication(format!("Login request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CheckerError::Authentication(format!(
                "Login rejected with status {}. Please check your credentials",
                status
            )));
        }

        let token_response: TokenResponse = response.json().await.map_err(|e| {
            CheckerError::Authentication(format!("Failed to parse login response: {}", e))
        })?;

        match token_response.token {
            Some(token) => Ok(AuthToken::new(token)),
            None => Err(CheckerError::Authentication(
                "Login response did not contain a token".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RegistryConfig;

    fn registry_for(url: &str) -> RegistryConfig {
        RegistryConfig::new(url, false, 5).unwrap()
    }

    #[test]
    fn test_auth_token_debug_redacts_secret() {
        let token = AuthToken::new("super-secret-jwt");
        let rendered = format!("{:?}", token);
        assert!(!rendered.contains("super-secret-jwt"));
        assert_eq!(token.as_str(), "super-secret-jwt");
    }

    #[tokio::test]
    async fn test_login_success_returns_token() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v2/users/login/")
            .match_body(mockito::Matcher::Json(serde_json::json!({
                "username": "user",
                "password": "pass"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"token": "jwt-token-value"}"#)
            .create_async()
            .await;

        let authenticator = Authenticator::new(&registry_for(&server.url())).unwrap();
        let token = authenticator.login("user", "pass").await.unwrap();
        assert_eq!(token.as_str(), "jwt-token-value");
    }

    #[tokio::test]
    async fn test_login_rejected_is_authentication_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v2/users/login/")
            .with_status(401)
            .with_body(r#"{"detail": "Incorrect authentication credentials"}"#)
            .create_async()
            .await;

        let authenticator = Authenticator::new(&registry_for(&server.url())).unwrap();
        let result = authenticator.login("user", "wrong").await;
        assert!(matches!(result, Err(CheckerError::Authentication(_))));
    }

    #[tokio::test]
    async fn test_login_without_token_field_is_authentication_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v2/users/login/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("{}")
            .create_async()
            .await;

        let authenticator = Authenticator::new(&registry_for(&server.url())).unwrap();
        let result = authenticator.login("user", "pass").await;
        assert!(matches!(result, Err(CheckerError::Authentication(_))));
    }

    #[tokio::test]
    async fn test_login_unreachable_registry_is_authentication_error() {
        // Nothing listens on port 1
        let authenticator = Authenticator::new(&registry_for("http://127.0.0.1:1")).unwrap();
        let result = authenticator.login("user", "pass").await;
        assert!(matches!(result, Err(CheckerError::Authentication(_))));
    }
}
