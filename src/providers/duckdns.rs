//! DuckDNS provider.

use super::{verify_received_ip, DdnsProvider, USER_AGENT};
use crate::config::IpVersion;
use crate::error::{UpdateError, ValidationError};
use crate::matcher::CredentialMatcher;
use crate::response;
use async_trait::async_trait;
use std::net::IpAddr;

const DEFAULT_BASE_URL: &str = "https://www.duckdns.org";

/// DuckDNS provider.
pub struct DuckdnsProvider {
    host: String,
    ip_version: IpVersion,
    token: String,
    use_provider_ip: bool,
    base_url: String,
}

impl DuckdnsProvider {
    /// Create a new DuckDNS provider.
    pub fn new(
        host: String,
        ip_version: IpVersion,
        token: String,
        use_provider_ip: bool,
        matcher: &CredentialMatcher,
    ) -> Result<Self, ValidationError> {
        Self::with_base_url(
            host,
            ip_version,
            token,
            use_provider_ip,
            matcher,
            DEFAULT_BASE_URL.to_string(),
        )
    }

    /// Create with custom base URL (for testing).
    pub fn with_base_url(
        host: String,
        ip_version: IpVersion,
        token: String,
        use_provider_ip: bool,
        matcher: &CredentialMatcher,
        base_url: String,
    ) -> Result<Self, ValidationError> {
        let provider = Self {
            host,
            ip_version,
            token,
            use_provider_ip,
            base_url,
        };
        provider.validate(matcher)?;
        Ok(provider)
    }

    fn validate(&self, matcher: &CredentialMatcher) -> Result<(), ValidationError> {
        if !matcher.duckdns_token(&self.token) {
            return Err(ValidationError::MalformedToken);
        }
        if self.host.is_empty() {
            return Err(ValidationError::EmptyHost);
        }
        Ok(())
    }
}

#[async_trait]
impl DdnsProvider for DuckdnsProvider {
    fn name(&self) -> &'static str {
        "duckdns"
    }

    fn domain(&self) -> String {
        format!("{}.duckdns.org", self.host)
    }

    fn ip_version(&self) -> IpVersion {
        self.ip_version
    }

    async fn update(&self, client: &reqwest::Client, ip: IpAddr) -> Result<IpAddr, UpdateError> {
        let url = format!("{}/update", self.base_url);

        let mut query: Vec<(&str, String)> = vec![
            ("domains", self.host.clone()),
            ("token", self.token.clone()),
            ("verbose", "true".to_string()),
        ];
        if !self.use_provider_ip {
            match ip {
                IpAddr::V4(_) => query.push(("ip", ip.to_string())),
                IpAddr::V6(_) => query.push(("ipv6", ip.to_string())),
            }
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

        if body.starts_with("KO") {
            return Err(UpdateError::Auth);
        }
        if !body.starts_with("OK") {
            return Err(UpdateError::UnknownResponse(body));
        }
        // The verbose body carries the IP on its second line; a bare
        // "OK" yields no literal and is surfaced as such.
        verify_received_ip(&body, ip, self.use_provider_ip)
    }
}
