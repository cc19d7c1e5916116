//! DNS-O-Matic provider (dyndns2 protocol).
//!
//! One query can fan out to every service configured in the DNS-O-Matic
//! account, see <https://www.dnsomatic.com/docs/api>.

use super::{build_domain_name, verify_received_ip, DdnsProvider, USER_AGENT};
use crate::config::IpVersion;
use crate::error::{UpdateError, ValidationError};
use crate::matcher::CredentialMatcher;
use crate::response;
use async_trait::async_trait;
use std::net::IpAddr;

const DEFAULT_BASE_URL: &str = "https://updates.dnsomatic.com";

/// DNS-O-Matic provider.
pub struct DnsomaticProvider {
    domain: String,
    host: String,
    ip_version: IpVersion,
    username: String,
    password: String,
    use_provider_ip: bool,
    base_url: String,
}

impl DnsomaticProvider {
    /// Create a new DNS-O-Matic provider.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        domain: String,
        host: String,
        ip_version: IpVersion,
        username: String,
        password: String,
        use_provider_ip: bool,
        matcher: &CredentialMatcher,
    ) -> Result<Self, ValidationError> {
        Self::with_base_url(
            domain,
            host,
            ip_version,
            username,
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
        username: String,
        password: String,
        use_provider_ip: bool,
        matcher: &CredentialMatcher,
        base_url: String,
    ) -> Result<Self, ValidationError> {
        let provider = Self {
            domain,
            host,
            ip_version,
            username,
            password,
            use_provider_ip,
            base_url,
        };
        provider.validate(matcher)?;
        Ok(provider)
    }

    fn validate(&self, matcher: &CredentialMatcher) -> Result<(), ValidationError> {
        if !matcher.dnsomatic_username(&self.username) {
            return Err(ValidationError::MalformedUsername(self.username.clone()));
        }
        if !matcher.dnsomatic_password(&self.password) {
            return Err(ValidationError::MalformedPassword);
        }
        if self.username.is_empty() {
            return Err(ValidationError::EmptyUsername);
        }
        if self.password.is_empty() {
            return Err(ValidationError::EmptyPassword);
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
impl DdnsProvider for DnsomaticProvider {
    fn name(&self) -> &'static str {
        "dnsomatic"
    }

    fn domain(&self) -> String {
        build_domain_name(&self.host, &self.domain)
    }

    fn ip_version(&self) -> IpVersion {
        self.ip_version
    }

    async fn update(&self, client: &reqwest::Client, ip: IpAddr) -> Result<IpAddr, UpdateError> {
        let url = format!("{}/nic/update", self.base_url);

        let mut query: Vec<(&str, String)> = Vec::new();
        if !self.use_provider_ip {
            query.push(("myip", ip.to_string()));
        }
        if self.host == "*" {
            // Wildcard host: target the bare domain and turn the
            // wildcard flag on instead of leaving it unchanged.
            query.push(("hostname", self.domain.clone()));
            query.push(("wildcard", "ON".to_string()));
        } else {
            query.push(("hostname", build_domain_name(&self.host, &self.domain)));
            query.push(("wildcard", "NOCHG".to_string()));
        }
        query.push(("mx", "NOCHG".to_string()));
        query.push(("backmx", "NOCHG".to_string()));

        let response = client
            .get(&url)
            .basic_auth(&self.username, Some(&self.password))
            .query(&query)
            .header("User-Agent", USER_AGENT)
            .send()
            .await
            .map_err(UpdateError::Transport)?;

        let status = response.status();
        let body = response.text().await.map_err(UpdateError::ReadBody)?;

        response::check_status(status, &body)?;
        response::classify_dyndns2(&body)?;
        verify_received_ip(&body, ip, self.use_provider_ip)
    }
}
