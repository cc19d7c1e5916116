//! Namecheap DDNS provider.

use super::{build_domain_name, verify_received_ip, DdnsProvider, USER_AGENT};
use crate::config::IpVersion;
use crate::error::{UpdateError, ValidationError};
use crate::matcher::CredentialMatcher;
use crate::response;
use async_trait::async_trait;
use std::net::IpAddr;

const DEFAULT_BASE_URL: &str = "https://dynamicdns.park-your-domain.com";

/// Namecheap DDNS provider.
pub struct NamecheapProvider {
    domain: String,
    host: String,
    ip_version: IpVersion,
    password: String,
    use_provider_ip: bool,
    base_url: String,
}

impl NamecheapProvider {
    /// Create a new Namecheap provider.
    pub fn new(
        domain: String,
        host: String,
        ip_version: IpVersion,
        password: String,
        use_provider_ip: bool,
        matcher: &CredentialMatcher,
    ) -> Result<Self, ValidationError> {
        Self::with_base_url(
            domain,
            host,
            ip_version,
            password,
            use_provider_ip,
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
        password: String,
        use_provider_ip: bool,
        matcher: &CredentialMatcher,
        base_url: String,
    ) -> Result<Self, ValidationError> {
        let provider = Self {
            domain,
            host,
            ip_version,
            password,
            use_provider_ip,
            base_url,
        };
        provider.validate(matcher)?;
        Ok(provider)
    }

    fn validate(&self, matcher: &CredentialMatcher) -> Result<(), ValidationError> {
        if !matcher.namecheap_password(&self.password) {
            return Err(ValidationError::MalformedPassword);
        }
        if self.domain.is_empty() {
            return Err(ValidationError::EmptyDomain);
        }
        if self.host.is_empty() {
            return Err(ValidationError::EmptyHost);
        }
        Ok(())
    }
}

#[async_trait]
impl DdnsProvider for NamecheapProvider {
    fn name(&self) -> &'static str {
        "namecheap"
    }

    fn domain(&self) -> String {
        build_domain_name(&self.host, &self.domain)
    }

    fn ip_version(&self) -> IpVersion {
        self.ip_version
    }

    async fn update(&self, client: &reqwest::Client, ip: IpAddr) -> Result<IpAddr, UpdateError> {
        let url = format!("{}/update", self.base_url);

        let mut query: Vec<(&str, String)> = vec![
            ("host", self.host.clone()),
            ("domain", self.domain.clone()),
            ("password", self.password.clone()),
        ];
        if !self.use_provider_ip {
            query.push(("ip", ip.to_string()));
        }

        let response = client
            .get(&url)
            .query(&query)
            .header("User-Agent", USER_AGENT)
            .send()
            .await
            .map_err(UpdateError::Transport)?;

        let status = response.status();
        let body = response.text().await.map_err(UpdateError::ReadBody)?;

        response::check_status(status, &body)?;

        if body.contains("<ErrCount>0</ErrCount>") {
            return verify_received_ip(&body, ip, self.use_provider_ip);
        }

        match body
            .split("<Err1>")
            .nth(1)
            .and_then(|s| s.split("</Err1>").next())
        {
            Some(msg) => Err(UpdateError::UnsuccessfulResponse(msg.to_string())),
            None => Err(UpdateError::UnknownResponse(body)),
        }
    }
}
