//! Credential shape validation.
//!
//! One anchored pattern per (provider, credential field) pair, compiled
//! once at startup and shared read-only across all provider
//! constructions. Matching is full-string and case-sensitive; no
//! trimming or case-folding is applied to the input.

use crate::error::Result;
use regex::Regex;

/// Compiled credential patterns.
///
/// Construction fails only if a pattern is malformed, which is a
/// programming defect rather than a runtime condition; the error is
/// propagated so startup can abort.
pub struct CredentialMatcher {
    godaddy_key: Regex,
    godaddy_secret: Regex,
    duckdns_token: Regex,
    namecheap_password: Regex,
    dreamhost_key: Regex,
    cloudflare_key: Regex,
    cloudflare_user_service_key: Regex,
    dnsomatic_username: Regex,
    dnsomatic_password: Regex,
}

impl CredentialMatcher {
    /// Compile all credential patterns.
    pub fn new() -> Result<Self> {
        Ok(Self {
            godaddy_key: Regex::new(r"^[A-Za-z0-9]{10,14}_[A-Za-z0-9]{22}$")?,
            godaddy_secret: Regex::new(r"^[A-Za-z0-9]{22}$")?,
            duckdns_token: Regex::new(
                r"^[a-f0-9]{8}-[a-f0-9]{4}-[a-f0-9]{4}-[a-f0-9]{4}-[a-f0-9]{12}$",
            )?,
            namecheap_password: Regex::new(r"^[a-f0-9]{32}$")?,
            dreamhost_key: Regex::new(r"^[a-zA-Z0-9]{16}$")?,
            // Deliberately permissive: any non-empty alphanumeric string.
            cloudflare_key: Regex::new(r"^[a-zA-Z0-9]+$")?,
            cloudflare_user_service_key: Regex::new(r"^v1\.0.+$")?,
            dnsomatic_username: Regex::new(r"^[a-zA-Z0-9._-]{3,25}$")?,
            dnsomatic_password: Regex::new(r"^.{6,20}$")?,
        })
    }

    pub fn godaddy_key(&self, s: &str) -> bool {
        self.godaddy_key.is_match(s)
    }

    pub fn godaddy_secret(&self, s: &str) -> bool {
        self.godaddy_secret.is_match(s)
    }

    pub fn duckdns_token(&self, s: &str) -> bool {
        self.duckdns_token.is_match(s)
    }

    pub fn namecheap_password(&self, s: &str) -> bool {
        self.namecheap_password.is_match(s)
    }

    pub fn dreamhost_key(&self, s: &str) -> bool {
        self.dreamhost_key.is_match(s)
    }

    pub fn cloudflare_key(&self, s: &str) -> bool {
        self.cloudflare_key.is_match(s)
    }

    pub fn cloudflare_user_service_key(&self, s: &str) -> bool {
        self.cloudflare_user_service_key.is_match(s)
    }

    pub fn dnsomatic_username(&self, s: &str) -> bool {
        self.dnsomatic_username.is_match(s)
    }

    pub fn dnsomatic_password(&self, s: &str) -> bool {
        self.dnsomatic_password.is_match(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> CredentialMatcher {
        CredentialMatcher::new().unwrap()
    }

    #[test]
    fn test_godaddy_key() {
        let m = matcher();
        assert!(m.godaddy_key("dKCXW2dkcVWj_QKz9y7qW8sPn4Dq3mLxT5a"));
        assert!(m.godaddy_key("A1b2C3d4E5f6G7_QKz9y7qW8sPn4Dq3mLxT5a"));
        // prefix too short
        assert!(!m.godaddy_key("short_QKz9y7qW8sPn4Dq3mLxT5a"));
        // suffix not 22 characters
        assert!(!m.godaddy_key("dKCXW2dkcVWj_tooshort"));
        assert!(!m.godaddy_key(""));
    }

    #[test]
    fn test_godaddy_secret() {
        let m = matcher();
        assert!(m.godaddy_secret("QKz9y7qW8sPn4Dq3mLxT5a"));
        assert!(!m.godaddy_secret("QKz9y7qW8sPn4Dq3mLxT5"));
        assert!(!m.godaddy_secret("QKz9y7qW8sPn4Dq3mLxT5ab"));
        assert!(!m.godaddy_secret("QKz9y7qW8sPn4Dq3mLxT5!"));
    }

    #[test]
    fn test_duckdns_token() {
        let m = matcher();
        assert!(m.duckdns_token("00112233-4455-6677-8899-aabbccddeeff"));
        // uppercase hex is rejected
        assert!(!m.duckdns_token("00112233-4455-6677-8899-AABBCCDDEEFF"));
        assert!(!m.duckdns_token("00112233445566778899aabbccddeeff"));
        assert!(!m.duckdns_token(""));
    }

    #[test]
    fn test_namecheap_password() {
        let m = matcher();
        assert!(m.namecheap_password("0123456789abcdef0123456789abcdef"));
        assert!(!m.namecheap_password("0123456789ABCDEF0123456789ABCDEF"));
        assert!(!m.namecheap_password("0123456789abcdef"));
    }

    #[test]
    fn test_dreamhost_key() {
        let m = matcher();
        assert!(m.dreamhost_key("AbCd1234EfGh5678"));
        assert!(!m.dreamhost_key("AbCd1234EfGh567"));
        assert!(!m.dreamhost_key("AbCd1234EfGh56789"));
        assert!(!m.dreamhost_key("AbCd1234EfGh567-"));
    }

    #[test]
    fn test_cloudflare_key_is_permissive() {
        let m = matcher();
        assert!(m.cloudflare_key("a"));
        assert!(m.cloudflare_key("37f712aec4102275d70e929f217d2c46b4f2c"));
        assert!(!m.cloudflare_key(""));
        assert!(!m.cloudflare_key("has spaces"));
    }

    #[test]
    fn test_cloudflare_user_service_key() {
        let m = matcher();
        assert!(m.cloudflare_user_service_key("v1.0-abcdef"));
        assert!(!m.cloudflare_user_service_key("v1.0"));
        assert!(!m.cloudflare_user_service_key("v2.0-abcdef"));
    }

    #[test]
    fn test_dnsomatic_username() {
        let m = matcher();
        assert!(m.dnsomatic_username("my.user_name-1"));
        assert!(!m.dnsomatic_username("ab"));
        assert!(!m.dnsomatic_username("a".repeat(26).as_str()));
        assert!(!m.dnsomatic_username("user name"));
    }

    #[test]
    fn test_dnsomatic_password() {
        let m = matcher();
        assert!(m.dnsomatic_password("s3cr3t!"));
        assert!(!m.dnsomatic_password("short"));
        assert!(!m.dnsomatic_password("x".repeat(21).as_str()));
    }
}
