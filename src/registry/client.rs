//! Existence checks against the registry's per-tag metadata endpoint
//!
//! The [`RegistryChecker`] asks the registry whether one `repository:tag`
//! pair exists. Classification is tri-state: a 200 means the tag is present,
//! any other status means it is absent, and a transport failure means the
//! answer is unknown. Check calls never return `Err`; the classification is
//! the whole result.

use crate::error::Result;
use crate::image::ImageReference;
use crate::registry::auth::AuthToken;
use crate::config::RegistryConfig;
use reqwest::{Client, StatusCode, header::AUTHORIZATION};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    /// The registry answered 200 for the tag
    Present,
    /// The registry answered, but not with a 200
    Absent,
    /// The registry could not be reached for this reference
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub reference: ImageReference,
    pub status: CheckStatus,
}

#[derive(Debug)]
pub struct RegistryChecker {
    client: Client,
    address: String,
}

impl RegistryChecker {
    pub fn new(registry: &RegistryConfig) -> Result<Self> {
        Ok(Self {
            client: super::build_http_client(registry)?,
            address: registry.address.clone(),
        })
    }

    fn tag_url(&self, reference: &ImageReference) -> String {
        format!(
            "{}/v2/repositories/{}/tags/{}/",
            self.address, reference.repository, reference.tag
        )
    }

    /// Issue one authenticated read against the tag metadata endpoint and
    /// classify the outcome. Only the status code matters; the body is
    /// ignored. No retry, no caching of repeated references.
    pub async fn check(&self, token: &AuthToken, reference: &ImageReference) -> CheckResult {
        let url = self.tag_url(reference);

        let status = match self
            .client
            .get(&url)
            .header(AUTHORIZATION, format!("JWT {}", token.as_str()))
            .send()
            .await
        {
            Ok(response) if response.status() == StatusCode::OK => CheckStatus::Present,
            Ok(_) => CheckStatus::Absent,
            Err(_) => CheckStatus::Error,
        };

        CheckResult {
            reference: reference.clone(),
            status,
        }
    }
}
