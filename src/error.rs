//! Error types for ddns-sync.

use std::net::IpAddr;
use thiserror::Error;

/// Result type alias for ddns-sync.
pub type Result<T> = std::result::Result<T, DdnsError>;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum DdnsError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Credential pattern failed to compile.
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// Provider construction rejected a credential or record setting.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// An update call failed.
    #[error("Update error: {0}")]
    Update(#[from] UpdateError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for DdnsError {
    fn from(e: toml::de::Error) -> Self {
        DdnsError::Config(e.to_string())
    }
}

impl From<toml::ser::Error> for DdnsError {
    fn from(e: toml::ser::Error) -> Self {
        DdnsError::Config(e.to_string())
    }
}

/// Construction-time errors. A provider whose settings fail any of these
/// checks never comes into existence.
///
/// Variants for secret-bearing fields never embed the offending value;
/// the username variant does.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("malformed username: {0}")]
    MalformedUsername(String),
    #[error("malformed password")]
    MalformedPassword,
    #[error("malformed token")]
    MalformedToken,
    #[error("malformed API key")]
    MalformedKey,
    #[error("malformed API secret")]
    MalformedSecret,
    #[error("malformed user service key")]
    MalformedUserServiceKey,
    #[error("empty username")]
    EmptyUsername,
    #[error("empty password")]
    EmptyPassword,
    #[error("empty token")]
    EmptyToken,
    #[error("empty email")]
    EmptyEmail,
    #[error("empty zone identifier")]
    EmptyZoneId,
    #[error("TTL is not set")]
    EmptyTtl,
    #[error("empty domain")]
    EmptyDomain,
    #[error("empty host")]
    EmptyHost,
}

/// Call-time errors for [`DdnsProvider::update`](crate::providers::DdnsProvider::update).
///
/// Every failure path surfaces a distinct kind; no variant is ever
/// retried or collapsed into a generic failure by this layer.
#[derive(Error, Debug)]
pub enum UpdateError {
    /// The request could not be sent (connect failure, caller timeout,
    /// cancellation).
    #[error("cannot send request: {0}")]
    Transport(reqwest::Error),

    /// The request was sent but the response body could not be read fully.
    #[error("cannot read response body: {0}")]
    ReadBody(reqwest::Error),

    /// Non-2xx HTTP status, regardless of body content.
    #[error("bad HTTP status {status}: {body}")]
    BadHttpStatus { status: u16, body: String },

    /// The provider does not know the hostname (`nohost`, `notfqdn`).
    #[error("hostname does not exist at the provider")]
    HostnameNotExists,

    /// Authentication rejected by the provider.
    #[error("authentication rejected")]
    Auth,

    /// The provider banned our user agent.
    #[error("user agent is banned")]
    BannedUserAgent,

    /// The provider flagged the account for abuse.
    #[error("account flagged for abuse")]
    Abuse,

    /// Server-side DNS error at the provider.
    #[error("DNS error on the provider side: {0}")]
    DnsServerSide(String),

    /// 2xx body matched neither a failure token nor a success token.
    #[error("unknown response: {0}")]
    UnknownResponse(String),

    /// The provider's response envelope reported failure.
    #[error("unsuccessful response: {0}")]
    UnsuccessfulResponse(String),

    /// The response body could not be deserialized.
    #[error("cannot deserialize response: {0}")]
    Deserialize(#[from] serde_json::Error),

    /// No DNS record exists for the requested name.
    #[error("record {0} not found")]
    RecordNotFound(String),

    /// The DNS record exists but the provider marks it read-only.
    #[error("record is not editable")]
    RecordNotEditable,

    /// Accepted response body contains no IP literal of the expected family.
    #[error("no IP address in response")]
    NoIpInResponse,

    /// An IP literal was found but does not parse as an address of the
    /// expected family.
    #[error("malformed IP address received: {0}")]
    IpReceivedMalformed(String),

    /// The provider echoed back a different IP than the one requested.
    #[error("IP address mismatch: sent {sent}, received {received}")]
    IpReceivedMismatch { sent: IpAddr, received: IpAddr },
}
