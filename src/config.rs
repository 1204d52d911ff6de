//! Configuration module for registry address and credential settings

use crate::error::{CheckerError, Result};
use serde::{Deserialize, Serialize};
use url::Url;

/// Registry used when no address is given on the command line
pub const DEFAULT_REGISTRY: &str = "https://hub.docker.com";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    pub address: String,
    pub skip_tls: bool,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub registry: RegistryConfig,
    pub auth: AuthConfig,
}

impl RegistryConfig {
    /// Validate and normalize a registry address.
    ///
    /// The address must be an absolute http(s) URL; trailing slashes are
    /// stripped so endpoint paths can be appended uniformly.
    pub fn new(address: &str, skip_tls: bool, timeout_secs: u64) -> Result<Self> {
        let trimmed = address.trim().trim_end_matches('/');

        if trimmed.is_empty() {
            return Err(CheckerError::Config(
                "Registry address cannot be empty".to_string(),
            ));
        }

        let parsed = Url::parse(trimmed)
            .map_err(|e| CheckerError::Config(format!("Invalid registry address: {}", e)))?;

        match parsed.scheme() {
            "http" | "https" => {}
            other => {
                return Err(CheckerError::Config(format!(
                    "Unsupported registry scheme '{}', expected http or https",
                    other
                )));
            }
        }

        Ok(Self {
            address: trimmed.to_string(),
            skip_tls,
            timeout_secs,
        })
    }
}

impl AuthConfig {
    pub fn new(username: Option<String>, password: Option<String>) -> Self {
        Self { username, password }
    }

    pub fn has_auth(&self) -> bool {
        self.username.is_some() && self.password.is_some()
    }

    /// Return the credential pair, failing when either half is missing.
    pub fn resolved(&self) -> Result<(&str, &str)> {
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => Ok((username, password)),
            _ => Err(CheckerError::Config(
                "Registry credentials are not set. Provide --username/--password \
                 or the DOCKER_USERNAME and DOCKER_PASSWORD environment variables"
                    .to_string(),
            )),
        }
    }
}

impl AppConfig {
    pub fn new(registry: RegistryConfig, auth: AuthConfig) -> Self {
        Self { registry, auth }
    }
}
