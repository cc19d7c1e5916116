//! Dreamhost DDNS provider.
//!
//! The API has no in-place update: the existing record is removed and
//! a new one added. A record already holding the requested IP is left
//! untouched.

use super::{build_domain_name, record_type, DdnsProvider, USER_AGENT};
use crate::config::IpVersion;
use crate::error::{UpdateError, ValidationError};
use crate::matcher::CredentialMatcher;
use crate::response;
use async_trait::async_trait;
use serde::Deserialize;
use std::net::IpAddr;

const DEFAULT_BASE_URL: &str = "https://api.dreamhost.com";

/// Dreamhost DDNS provider.
pub struct DreamhostProvider {
    domain: String,
    host: String,
    ip_version: IpVersion,
    key: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct DnsRecord {
    record: String,
    #[serde(rename = "type")]
    record_type: String,
    value: String,
    editable: String,
}

impl DreamhostProvider {
    /// Create a new Dreamhost provider.
    pub fn new(
        domain: String,
        host: String,
        ip_version: IpVersion,
        key: String,
        matcher: &CredentialMatcher,
    ) -> Result<Self, ValidationError> {
        Self::with_base_url(
            domain,
            host,
            ip_version,
            key,
            matcher,
            DEFAULT_BASE_URL.to_string(),
        )
    }

    /// Create with custom base URL (for testing).
    pub fn with_base_url(
        domain: String,
        host: String,
        ip_version: IpVersion,
        key: String,
        matcher: &CredentialMatcher,
        base_url: String,
    ) -> Result<Self, ValidationError> {
        let provider = Self {
            domain,
            host,
            ip_version,
            key,
            base_url,
        };
        provider.validate(matcher)?;
        Ok(provider)
    }

    fn validate(&self, matcher: &CredentialMatcher) -> Result<(), ValidationError> {
        if !matcher.dreamhost_key(&self.key) {
            return Err(ValidationError::MalformedKey);
        }
        if self.domain.is_empty() {
            return Err(ValidationError::EmptyDomain);
        }
        if self.host.is_empty() {
            return Err(ValidationError::EmptyHost);
        }
        Ok(())
    }

    /// Issue one API command and return the reply `data` after
    /// checking the result field.
    async fn call(
        &self,
        client: &reqwest::Client,
        cmd: &str,
        extra: &[(&str, String)],
    ) -> Result<serde_json::Value, UpdateError> {
        let url = format!("{}/", self.base_url);
        let mut query: Vec<(&str, String)> = vec![
            ("key", self.key.clone()),
            ("format", "json".to_string()),
            ("cmd", cmd.to_string()),
        ];
        query.extend(extra.iter().cloned());

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

        let mut reply: serde_json::Value = serde_json::from_str(&body)?;
        let result = reply.get("result").and_then(|v| v.as_str()).unwrap_or("");
        if result != "success" {
            let msg = reply
                .get("data")
                .and_then(|v| v.as_str())
                .unwrap_or(&body)
                .to_string();
            return Err(UpdateError::UnsuccessfulResponse(msg));
        }
        Ok(reply
            .get_mut("data")
            .map(serde_json::Value::take)
            .unwrap_or(serde_json::Value::Null))
    }
}

#[async_trait]
impl DdnsProvider for DreamhostProvider {
    fn name(&self) -> &'static str {
        "dreamhost"
    }

    fn domain(&self) -> String {
        build_domain_name(&self.host, &self.domain)
    }

    fn ip_version(&self) -> IpVersion {
        self.ip_version
    }

    async fn update(&self, client: &reqwest::Client, ip: IpAddr) -> Result<IpAddr, UpdateError> {
        let fqdn = self.domain();
        let rtype = record_type(ip);

        let data = self.call(client, "dns-list_records", &[]).await?;
        let records: Vec<DnsRecord> = serde_json::from_value(data)?;

        let existing = records
            .into_iter()
            .find(|r| r.record == fqdn && r.record_type == rtype);

        if let Some(record) = existing {
            if record.editable == "0" {
                return Err(UpdateError::RecordNotEditable);
            }
            if record.value == ip.to_string() {
                // Already up to date, nothing to change.
                return Ok(ip);
            }
            self.call(
                client,
                "dns-remove_record",
                &[
                    ("record", fqdn.clone()),
                    ("type", rtype.to_string()),
                    ("value", record.value),
                ],
            )
            .await?;
        }

        self.call(
            client,
            "dns-add_record",
            &[
                ("record", fqdn),
                ("type", rtype.to_string()),
                ("value", ip.to_string()),
            ],
        )
        .await?;

        Ok(ip)
    }
}
