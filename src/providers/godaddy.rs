//! GoDaddy DDNS provider.
//!
//! The records API echoes nothing back on success, so a 2xx status is
//! taken as acknowledgement of the requested IP.

use super::{build_domain_name, record_type, DdnsProvider, USER_AGENT};
use crate::config::IpVersion;
use crate::error::{UpdateError, ValidationError};
use crate::matcher::CredentialMatcher;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;

const DEFAULT_BASE_URL: &str = "https://api.godaddy.com";

/// GoDaddy DDNS provider.
pub struct GodaddyProvider {
    domain: String,
    host: String,
    ip_version: IpVersion,
    key: String,
    secret: String,
    ttl: u32,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct PutRecord {
    data: String,
    ttl: u32,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl GodaddyProvider {
    /// Create a new GoDaddy provider.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        domain: String,
        host: String,
        ip_version: IpVersion,
        key: String,
        secret: String,
        ttl: u32,
        matcher: &CredentialMatcher,
    ) -> Result<Self, ValidationError> {
        Self::with_base_url(
            domain,
            host,
            ip_version,
            key,
            secret,
            ttl,
            matcher,
            DEFAULT_BASE_URL.to_string(),
        )
    }

    /// Create with custom base URL (for testing).
    #[allow(clippy::too_many_arguments)]
    pub fn with_base_url(
        domain: String,
        host: String,
        ip_version: IpVersion,
        key: String,
        secret: String,
        ttl: u32,
        matcher: &CredentialMatcher,
        base_url: String,
    ) -> Result<Self, ValidationError> {
        let provider = Self {
            domain,
            host,
            ip_version,
            key,
            secret,
            ttl,
            base_url,
        };
        provider.validate(matcher)?;
        Ok(provider)
    }

    fn validate(&self, matcher: &CredentialMatcher) -> Result<(), ValidationError> {
        if !matcher.godaddy_key(&self.key) {
            return Err(ValidationError::MalformedKey);
        }
        if !matcher.godaddy_secret(&self.secret) {
            return Err(ValidationError::MalformedSecret);
        }
        if self.domain.is_empty() {
            return Err(ValidationError::EmptyDomain);
        }
        if self.host.is_empty() {
            return Err(ValidationError::EmptyHost);
        }
        Ok(())
    }

    fn auth_header(&self) -> String {
        format!("sso-key {}:{}", self.key, self.secret)
    }
}

#[async_trait]
impl DdnsProvider for GodaddyProvider {
    fn name(&self) -> &'static str {
        "godaddy"
    }

    fn domain(&self) -> String {
        build_domain_name(&self.host, &self.domain)
    }

    fn ip_version(&self) -> IpVersion {
        self.ip_version
    }

    async fn update(&self, client: &reqwest::Client, ip: IpAddr) -> Result<IpAddr, UpdateError> {
        let url = format!(
            "{}/v1/domains/{}/records/{}/{}",
            self.base_url,
            self.domain,
            record_type(ip),
            self.host
        );

        let records = vec![PutRecord {
            data: ip.to_string(),
            ttl: self.ttl,
        }];

        let response = client
            .put(&url)
            .header("Authorization", self.auth_header())
            .header("User-Agent", USER_AGENT)
            .json(&records)
            .send()
            .await
            .map_err(UpdateError::Transport)?;

        let status = response.status();
        let body = response.text().await.map_err(UpdateError::ReadBody)?;

        if !status.is_success() {
            // Surface the API's message when the error body parses.
            let detail = serde_json::from_str::<ErrorBody>(&body)
                .map(|e| e.message)
                .unwrap_or(body);
            return Err(UpdateError::BadHttpStatus {
                status: status.as_u16(),
                body: detail,
            });
        }

        Ok(ip)
    }
}
