//! Cloudflare DDNS provider.
//!
//! Two-step update: look up the record id by name, then PATCH the
//! record content. Three authentication modes are supported; the mode
//! is fixed at construction.

use super::{build_domain_name, record_type, DdnsProvider, USER_AGENT};
use crate::config::IpVersion;
use crate::error::{UpdateError, ValidationError};
use crate::matcher::CredentialMatcher;
use async_trait::async_trait;
use reqwest::{RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;

const DEFAULT_BASE_URL: &str = "https://api.cloudflare.com";

/// Cloudflare authentication mode, selected at construction.
enum Auth {
    /// Account email plus global API key.
    EmailKey { email: String, key: String },
    /// `v1.0`-prefixed user service key.
    UserServiceKey(String),
    /// Scoped API token.
    Token(String),
}

/// Cloudflare DDNS provider.
pub struct CloudflareProvider {
    domain: String,
    host: String,
    ip_version: IpVersion,
    zone_id: String,
    auth: Auth,
    proxied: bool,
    ttl: u32,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    success: bool,
    result: Option<T>,
    #[serde(default)]
    errors: Vec<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct DnsRecord {
    id: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct PatchRecord {
    #[serde(rename = "type")]
    record_type: String,
    name: String,
    content: String,
    proxied: bool,
    ttl: u32,
}

impl CloudflareProvider {
    /// Create a new Cloudflare provider.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        domain: String,
        host: String,
        ip_version: IpVersion,
        zone_id: String,
        token: Option<String>,
        user_service_key: Option<String>,
        email: Option<String>,
        key: Option<String>,
        proxied: bool,
        ttl: u32,
        matcher: &CredentialMatcher,
    ) -> Result<Self, ValidationError> {
        Self::with_base_url(
            domain,
            host,
            ip_version,
            zone_id,
            token,
            user_service_key,
            email,
            key,
            proxied,
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
        zone_id: String,
        token: Option<String>,
        user_service_key: Option<String>,
        email: Option<String>,
        key: Option<String>,
        proxied: bool,
        ttl: u32,
        matcher: &CredentialMatcher,
        base_url: String,
    ) -> Result<Self, ValidationError> {
        // Mode priority: global key, then user service key, then token.
        let auth = if let Some(key) = key {
            if !matcher.cloudflare_key(&key) {
                return Err(ValidationError::MalformedKey);
            }
            let email = email.unwrap_or_default();
            if email.is_empty() {
                return Err(ValidationError::EmptyEmail);
            }
            Auth::EmailKey { email, key }
        } else if let Some(user_service_key) = user_service_key {
            if !matcher.cloudflare_user_service_key(&user_service_key) {
                return Err(ValidationError::MalformedUserServiceKey);
            }
            Auth::UserServiceKey(user_service_key)
        } else {
            let token = token.unwrap_or_default();
            if token.is_empty() {
                return Err(ValidationError::EmptyToken);
            }
            Auth::Token(token)
        };

        if zone_id.is_empty() {
            return Err(ValidationError::EmptyZoneId);
        }
        if ttl == 0 {
            return Err(ValidationError::EmptyTtl);
        }
        if domain.is_empty() {
            return Err(ValidationError::EmptyDomain);
        }
        if host.is_empty() {
            return Err(ValidationError::EmptyHost);
        }

        Ok(Self {
            domain,
            host,
            ip_version,
            zone_id,
            auth,
            proxied,
            ttl,
            base_url,
        })
    }

    fn apply_auth(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.auth {
            Auth::EmailKey { email, key } => request
                .header("X-Auth-Email", email)
                .header("X-Auth-Key", key),
            Auth::UserServiceKey(key) => request.header("X-Auth-User-Service-Key", key),
            Auth::Token(token) => request.header("Authorization", format!("Bearer {token}")),
        }
    }

    /// Parse a Cloudflare envelope, mapping API-reported failure to an
    /// error. A non-2xx status is a failure even when the body parses
    /// as a successful envelope.
    fn parse_envelope<T: serde::de::DeserializeOwned>(
        status: StatusCode,
        body: &str,
    ) -> Result<Envelope<T>, UpdateError> {
        let envelope: Envelope<T> = match serde_json::from_str(body) {
            Ok(envelope) => envelope,
            Err(err) if status.is_success() => return Err(UpdateError::Deserialize(err)),
            Err(_) => {
                return Err(UpdateError::BadHttpStatus {
                    status: status.as_u16(),
                    body: body.to_string(),
                })
            }
        };
        if !envelope.success {
            let msg = envelope
                .errors
                .first()
                .map(|e| e.message.clone())
                .unwrap_or_else(|| body.to_string());
            return Err(UpdateError::UnsuccessfulResponse(msg));
        }
        if !status.is_success() {
            return Err(UpdateError::BadHttpStatus {
                status: status.as_u16(),
                body: body.to_string(),
            });
        }
        Ok(envelope)
    }

    /// Find the id of the record matching the configured name.
    async fn fetch_record(
        &self,
        client: &reqwest::Client,
        ip: IpAddr,
    ) -> Result<DnsRecord, UpdateError> {
        let url = format!(
            "{}/client/v4/zones/{}/dns_records",
            self.base_url, self.zone_id
        );
        let fqdn = self.domain();

        let response = self
            .apply_auth(client.get(&url))
            .query(&[("type", record_type(ip)), ("name", fqdn.as_str())])
            .header("User-Agent", USER_AGENT)
            .send()
            .await
            .map_err(UpdateError::Transport)?;

        let status = response.status();
        let body = response.text().await.map_err(UpdateError::ReadBody)?;

        let envelope: Envelope<Vec<DnsRecord>> = Self::parse_envelope(status, &body)?;
        envelope
            .result
            .and_then(|records| records.into_iter().next())
            .ok_or(UpdateError::RecordNotFound(fqdn))
    }
}

#[async_trait]
impl DdnsProvider for CloudflareProvider {
    fn name(&self) -> &'static str {
        "cloudflare"
    }

    fn domain(&self) -> String {
        build_domain_name(&self.host, &self.domain)
    }

    fn ip_version(&self) -> IpVersion {
        self.ip_version
    }

    async fn update(&self, client: &reqwest::Client, ip: IpAddr) -> Result<IpAddr, UpdateError> {
        let record = self.fetch_record(client, ip).await?;

        let url = format!(
            "{}/client/v4/zones/{}/dns_records/{}",
            self.base_url, self.zone_id, record.id
        );
        let patch = PatchRecord {
            record_type: record_type(ip).to_string(),
            name: self.domain(),
            content: ip.to_string(),
            proxied: self.proxied,
            ttl: self.ttl,
        };

        let response = self
            .apply_auth(client.patch(&url))
            .header("User-Agent", USER_AGENT)
            .json(&patch)
            .send()
            .await
            .map_err(UpdateError::Transport)?;

        let status = response.status();
        let body = response.text().await.map_err(UpdateError::ReadBody)?;

        let envelope: Envelope<DnsRecord> = Self::parse_envelope(status, &body)?;
        let content = envelope.result.map(|r| r.content).unwrap_or_default();

        let received: IpAddr = content
            .parse()
            .map_err(|_| UpdateError::IpReceivedMalformed(content.clone()))?;
        if received != ip {
            return Err(UpdateError::IpReceivedMismatch {
                sent: ip,
                received,
            });
        }
        Ok(received)
    }
}
