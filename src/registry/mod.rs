//! Registry module for Docker registry interactions
//!
//! Provides login against the registry's account endpoint and per-tag
//! existence checks against the repository metadata endpoint.

pub mod auth;
pub mod client;

use crate::config::RegistryConfig;
use crate::error::Result;
use reqwest::Client;
use std::time::Duration;

pub use auth::{AuthToken, Authenticator};
pub use client::{CheckResult, CheckStatus, RegistryChecker};

/// Build the HTTP client both registry components share the settings of.
pub(crate) fn build_http_client(config: &RegistryConfig) -> Result<Client> {
    let mut builder = Client::builder().timeout(Duration::from_secs(config.timeout_secs));

    if config.skip_tls {
        builder = builder
            .danger_accept_invalid_certs(true)
            .danger_accept_invalid_hostnames(true);
    }

    Ok(builder.build()?)
}
