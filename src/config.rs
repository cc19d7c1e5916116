//! Configuration schema for ddns-sync.
//!
//! Each provider has an explicit settings struct; unknown fields are
//! rejected at parse time and missing required fields surface as named
//! deserialization errors rather than silent defaults.

use crate::error::{DdnsError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Configured DNS records, one provider entry each.
    #[serde(default)]
    pub providers: Vec<ProviderConfig>,
}

/// IP address family used for a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IpVersion {
    #[default]
    Ipv4,
    Ipv6,
}

/// Per-provider configuration, tagged on `provider`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "provider", rename_all = "lowercase")]
pub enum ProviderConfig {
    Cloudflare(CloudflareSettings),
    Dnsomatic(DnsomaticSettings),
    Dreamhost(DreamhostSettings),
    Duckdns(DuckdnsSettings),
    Godaddy(GodaddySettings),
    Namecheap(NamecheapSettings),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CloudflareSettings {
    /// Domain name.
    pub domain: String,
    /// Host (subdomain, `@` for root).
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default)]
    pub ip_version: IpVersion,
    /// Zone identifier of the domain.
    pub zone_id: String,
    /// API token (or environment variable name if prefixed with $).
    pub token: Option<String>,
    /// User service key, `v1.0` prefixed.
    pub user_service_key: Option<String>,
    /// Account email, used together with the global API key.
    pub email: Option<String>,
    /// Global API key, used together with the email.
    pub key: Option<String>,
    /// Whether to proxy the record through Cloudflare.
    #[serde(default)]
    pub proxied: bool,
    /// Record TTL in seconds; 1 means automatic.
    #[serde(default = "default_cloudflare_ttl")]
    pub ttl: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DnsomaticSettings {
    /// Domain name.
    pub domain: String,
    /// Host (subdomain, `@` for root, `*` for wildcard).
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default)]
    pub ip_version: IpVersion,
    /// DNS-O-Matic account username.
    pub username: String,
    /// DNS-O-Matic account password.
    pub password: String,
    /// Let the provider detect the IP from the connection.
    #[serde(default)]
    pub provider_ip: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DreamhostSettings {
    /// Domain name.
    pub domain: String,
    /// Host (subdomain, `@` for root).
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default)]
    pub ip_version: IpVersion,
    /// Dreamhost API key (16 alphanumerics).
    pub key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DuckdnsSettings {
    /// DuckDNS subdomain (without `.duckdns.org`).
    pub host: String,
    #[serde(default)]
    pub ip_version: IpVersion,
    /// DuckDNS token (UUID shape).
    pub token: String,
    /// Let the provider detect the IP from the connection.
    #[serde(default)]
    pub provider_ip: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GodaddySettings {
    /// Domain name.
    pub domain: String,
    /// Host (subdomain, `@` for root).
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default)]
    pub ip_version: IpVersion,
    /// API key.
    pub key: String,
    /// API secret.
    pub secret: String,
    /// Record TTL in seconds.
    #[serde(default = "default_godaddy_ttl")]
    pub ttl: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NamecheapSettings {
    /// Domain name.
    pub domain: String,
    /// Host (subdomain, `@` for root).
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default)]
    pub ip_version: IpVersion,
    /// Dynamic DNS password (32 lowercase hex characters).
    pub password: String,
    /// Let the provider detect the IP from the connection.
    #[serde(default)]
    pub provider_ip: bool,
}

fn default_host() -> String {
    "@".to_string()
}

fn default_cloudflare_ttl() -> u32 {
    1
}

fn default_godaddy_ttl() -> u32 {
    600
}

impl Config {
    /// Get the default config file path.
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| DdnsError::Config("Could not find config directory".to_string()))?;

        Ok(config_dir.join("ddns-sync").join("config.toml"))
    }

    /// Load configuration from file.
    pub fn load() -> Result<Self> {
        let path = Self::default_path()?;
        Self::load_from(&path)
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &PathBuf) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file.
    pub fn save(&self) -> Result<()> {
        let path = Self::default_path()?;
        self.save_to(&path)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Generate example configuration.
    pub fn example() -> Self {
        Self {
            providers: vec![
                ProviderConfig::Dnsomatic(DnsomaticSettings {
                    domain: "example.com".to_string(),
                    host: "vpn".to_string(),
                    ip_version: IpVersion::Ipv4,
                    username: "myuser".to_string(),
                    password: "$DNSOMATIC_PASSWORD".to_string(),
                    provider_ip: false,
                }),
                ProviderConfig::Duckdns(DuckdnsSettings {
                    host: "mysubdomain".to_string(),
                    ip_version: IpVersion::Ipv4,
                    token: "$DUCKDNS_TOKEN".to_string(),
                    provider_ip: false,
                }),
            ],
        }
    }
}

impl ProviderConfig {
    /// Get the provider name.
    pub fn name(&self) -> &'static str {
        match self {
            ProviderConfig::Cloudflare(_) => "cloudflare",
            ProviderConfig::Dnsomatic(_) => "dnsomatic",
            ProviderConfig::Dreamhost(_) => "dreamhost",
            ProviderConfig::Duckdns(_) => "duckdns",
            ProviderConfig::Godaddy(_) => "godaddy",
            ProviderConfig::Namecheap(_) => "namecheap",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.providers.is_empty());
    }

    #[test]
    fn test_example_config() {
        let config = Config::example();
        assert_eq!(config.providers.len(), 2);
    }

    #[test]
    fn test_tagged_parse_with_defaults() {
        let config: Config = toml::from_str(
            r#"
            [[providers]]
            provider = "dnsomatic"
            domain = "example.com"
            username = "myuser"
            password = "s3cr3t!"
            "#,
        )
        .unwrap();

        match &config.providers[0] {
            ProviderConfig::Dnsomatic(settings) => {
                assert_eq!(settings.host, "@");
                assert_eq!(settings.ip_version, IpVersion::Ipv4);
                assert!(!settings.provider_ip);
            }
            other => panic!("unexpected provider: {}", other.name()),
        }
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: std::result::Result<Config, _> = toml::from_str(
            r#"
            [[providers]]
            provider = "duckdns"
            host = "mysubdomain"
            token = "00112233-4455-6677-8899-aabbccddeeff"
            tokne = "typo"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_required_field_rejected() {
        let result: std::result::Result<Config, _> = toml::from_str(
            r#"
            [[providers]]
            provider = "namecheap"
            domain = "example.com"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_godaddy_ttl_default() {
        let config: Config = toml::from_str(
            r#"
            [[providers]]
            provider = "godaddy"
            domain = "example.com"
            host = "vpn"
            key = "dKCXW2dkcVWj_QKz9y7qW8sPn4Dq3mLxT5a"
            secret = "QKz9y7qW8sPn4Dq3mLxT5a"
            "#,
        )
        .unwrap();

        match &config.providers[0] {
            ProviderConfig::Godaddy(settings) => assert_eq!(settings.ttl, 600),
            other => panic!("unexpected provider: {}", other.name()),
        }
    }

    #[test]
    fn test_ip_version_parse() {
        let config: Config = toml::from_str(
            r#"
            [[providers]]
            provider = "duckdns"
            host = "mysubdomain"
            token = "00112233-4455-6677-8899-aabbccddeeff"
            ip_version = "ipv6"
            "#,
        )
        .unwrap();

        match &config.providers[0] {
            ProviderConfig::Duckdns(settings) => {
                assert_eq!(settings.ip_version, IpVersion::Ipv6)
            }
            other => panic!("unexpected provider: {}", other.name()),
        }
    }
}
