//! DDNS provider implementations.
//!
//! One module per vendor behind the [`DdnsProvider`] trait. Providers
//! are immutable after construction; the HTTP client is supplied per
//! call and may be shared freely across providers and tasks.

mod cloudflare;
mod dnsomatic;
mod dreamhost;
mod duckdns;
mod godaddy;
mod namecheap;

#[cfg(test)]
mod tests;

pub use cloudflare::CloudflareProvider;
pub use dnsomatic::DnsomaticProvider;
pub use dreamhost::DreamhostProvider;
pub use duckdns::DuckdnsProvider;
pub use godaddy::GodaddyProvider;
pub use namecheap::NamecheapProvider;

use crate::config::{IpVersion, ProviderConfig};
use crate::error::{Result, UpdateError};
use crate::ip_search;
use crate::matcher::CredentialMatcher;
use async_trait::async_trait;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// User agent sent with every update request.
pub const USER_AGENT: &str = concat!("ddns-sync/", env!("CARGO_PKG_VERSION"));

/// Trait for DDNS providers.
#[async_trait]
pub trait DdnsProvider: Send + Sync {
    /// Get the provider name.
    fn name(&self) -> &'static str;

    /// Get the full record name being managed.
    fn domain(&self) -> String;

    /// Get the IP family this record is configured for.
    fn ip_version(&self) -> IpVersion;

    /// Update the DNS record to `ip` and return the IP the provider
    /// acknowledged. One request round trip, no internal retry;
    /// dropping the future aborts the in-flight request.
    async fn update(
        &self,
        client: &reqwest::Client,
        ip: IpAddr,
    ) -> std::result::Result<IpAddr, UpdateError>;
}

/// Create a provider from configuration, resolving environment
/// references in credentials and validating their shape. Fails
/// atomically: no provider exists unless every check passed.
pub fn create_provider(
    config: &ProviderConfig,
    matcher: &CredentialMatcher,
) -> Result<Box<dyn DdnsProvider>> {
    tracing::debug!("creating {} provider", config.name());
    let provider: Box<dyn DdnsProvider> = match config {
        ProviderConfig::Cloudflare(s) => Box::new(CloudflareProvider::new(
            s.domain.clone(),
            s.host.clone(),
            s.ip_version,
            s.zone_id.clone(),
            s.token.as_deref().map(resolve_env),
            s.user_service_key.as_deref().map(resolve_env),
            s.email.as_deref().map(resolve_env),
            s.key.as_deref().map(resolve_env),
            s.proxied,
            s.ttl,
            matcher,
        )?),
        ProviderConfig::Dnsomatic(s) => Box::new(DnsomaticProvider::new(
            s.domain.clone(),
            s.host.clone(),
            s.ip_version,
            resolve_env(&s.username),
            resolve_env(&s.password),
            s.provider_ip,
            matcher,
        )?),
        ProviderConfig::Dreamhost(s) => Box::new(DreamhostProvider::new(
            s.domain.clone(),
            s.host.clone(),
            s.ip_version,
            resolve_env(&s.key),
            matcher,
        )?),
        ProviderConfig::Duckdns(s) => Box::new(DuckdnsProvider::new(
            s.host.clone(),
            s.ip_version,
            resolve_env(&s.token),
            s.provider_ip,
            matcher,
        )?),
        ProviderConfig::Godaddy(s) => Box::new(GodaddyProvider::new(
            s.domain.clone(),
            s.host.clone(),
            s.ip_version,
            resolve_env(&s.key),
            resolve_env(&s.secret),
            s.ttl,
            matcher,
        )?),
        ProviderConfig::Namecheap(s) => Box::new(NamecheapProvider::new(
            s.domain.clone(),
            s.host.clone(),
            s.ip_version,
            resolve_env(&s.password),
            s.provider_ip,
            matcher,
        )?),
    };
    Ok(provider)
}

/// Resolve environment variable references (values starting with $).
pub fn resolve_env(value: &str) -> String {
    if let Some(var_name) = value.strip_prefix('$') {
        std::env::var(var_name).unwrap_or_else(|_| {
            tracing::warn!("Environment variable {} not set", var_name);
            value.to_string()
        })
    } else {
        value.to_string()
    }
}

/// Join host and domain into the full record name.
pub fn build_domain_name(host: &str, domain: &str) -> String {
    match host {
        "@" => domain.to_string(),
        "*" => format!("*.{domain}"),
        _ => format!("{host}.{domain}"),
    }
}

/// DNS record type for an address family.
pub(crate) fn record_type(ip: IpAddr) -> &'static str {
    if ip.is_ipv4() {
        "A"
    } else {
        "AAAA"
    }
}

/// Extract the IP the provider echoed back in `body` and verify it.
///
/// The first literal of the same family as `sent` is used. Unless the
/// provider detects the IP itself, the echoed IP must equal the one we
/// sent; a silent substitution is surfaced, never accepted.
pub(crate) fn verify_received_ip(
    body: &str,
    sent: IpAddr,
    use_provider_ip: bool,
) -> std::result::Result<IpAddr, UpdateError> {
    let candidates = match sent {
        IpAddr::V4(_) => ip_search::search_ipv4(body),
        IpAddr::V6(_) => ip_search::search_ipv6(body),
    };
    let first = candidates.first().ok_or(UpdateError::NoIpInResponse)?;

    let received = match sent {
        IpAddr::V4(_) => first.parse::<Ipv4Addr>().map(IpAddr::V4),
        IpAddr::V6(_) => first.parse::<Ipv6Addr>().map(IpAddr::V6),
    }
    .map_err(|_| UpdateError::IpReceivedMalformed(first.to_string()))?;

    if !use_provider_ip && received != sent {
        return Err(UpdateError::IpReceivedMismatch { sent, received });
    }
    Ok(received)
}
