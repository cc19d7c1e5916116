//! Response classification shared across providers.
//!
//! The dyndns2 vocabulary (DNS-O-Matic and protocol-compatible vendors)
//! lives here; vendors with JSON or XML envelopes classify in their own
//! modules with the same [`UpdateError`] taxonomy.

use crate::error::UpdateError;
use reqwest::StatusCode;

// dyndns2 failure tokens, matched against the exact body.
pub const NOHOST: &str = "nohost";
pub const NOTFQDN: &str = "notfqdn";
pub const BADAUTH: &str = "badauth";
pub const BADAGENT: &str = "badagent";
pub const ABUSE: &str = "abuse";
pub const DNSERR: &str = "dnserr";
pub const NINE_ONE_ONE: &str = "911";

// dyndns2 success tokens, matched as substrings.
pub const NOCHG: &str = "nochg";
pub const GOOD: &str = "good";

/// Gate on the HTTP status: any non-2xx response is a failure carrying
/// the status code and raw body, regardless of body content.
pub fn check_status(status: StatusCode, body: &str) -> Result<(), UpdateError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(UpdateError::BadHttpStatus {
            status: status.as_u16(),
            body: body.to_string(),
        })
    }
}

/// Classify a 2xx dyndns2 response body.
///
/// Known failure tokens fail fast; a body containing neither a failure
/// token nor a success substring is an unknown response, never success.
pub fn classify_dyndns2(body: &str) -> Result<(), UpdateError> {
    match body {
        NOHOST | NOTFQDN => Err(UpdateError::HostnameNotExists),
        BADAUTH => Err(UpdateError::Auth),
        BADAGENT => Err(UpdateError::BannedUserAgent),
        ABUSE => Err(UpdateError::Abuse),
        DNSERR | NINE_ONE_ONE => Err(UpdateError::DnsServerSide(body.to_string())),
        _ if body.contains(NOCHG) || body.contains(GOOD) => Ok(()),
        _ => Err(UpdateError::UnknownResponse(body.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_status_2xx() {
        assert!(check_status(StatusCode::OK, "good").is_ok());
        assert!(check_status(StatusCode::CREATED, "").is_ok());
    }

    #[test]
    fn test_check_status_failure_carries_status_and_body() {
        let err = check_status(StatusCode::SERVICE_UNAVAILABLE, "maintenance").unwrap_err();
        match err {
            UpdateError::BadHttpStatus { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "maintenance");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_classify_failure_tokens() {
        assert!(matches!(
            classify_dyndns2("nohost"),
            Err(UpdateError::HostnameNotExists)
        ));
        assert!(matches!(
            classify_dyndns2("notfqdn"),
            Err(UpdateError::HostnameNotExists)
        ));
        assert!(matches!(classify_dyndns2("badauth"), Err(UpdateError::Auth)));
        assert!(matches!(
            classify_dyndns2("badagent"),
            Err(UpdateError::BannedUserAgent)
        ));
        assert!(matches!(classify_dyndns2("abuse"), Err(UpdateError::Abuse)));
    }

    #[test]
    fn test_classify_dns_server_side() {
        match classify_dyndns2("911") {
            Err(UpdateError::DnsServerSide(token)) => assert_eq!(token, "911"),
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(matches!(
            classify_dyndns2("dnserr"),
            Err(UpdateError::DnsServerSide(_))
        ));
    }

    #[test]
    fn test_classify_success_substrings() {
        assert!(classify_dyndns2("good 203.0.113.5").is_ok());
        assert!(classify_dyndns2("nochg 203.0.113.5").is_ok());
        assert!(classify_dyndns2("nochg").is_ok());
    }

    #[test]
    fn test_classify_unknown_is_never_success() {
        match classify_dyndns2("something new") {
            Err(UpdateError::UnknownResponse(body)) => assert_eq!(body, "something new"),
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(classify_dyndns2("").is_err());
    }
}
