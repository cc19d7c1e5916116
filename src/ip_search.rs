//! IP literal search in response bodies.
//!
//! The scan patterns are deliberately loose: they return candidate
//! literals in first-occurrence order, repeats included, and leave
//! address validation to the call site. A candidate like `999.0.113.5`
//! is returned here and fails [`std::net::Ipv4Addr`] parsing later.

use regex::Regex;
use std::sync::LazyLock;

static IPV4: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{1,3}(\.[0-9]{1,3}){3}").unwrap());

static IPV6: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:[0-9a-fA-F]{0,4}:){2,7}[0-9a-fA-F]{0,4}").unwrap());

/// Find IPv4 candidate literals in `text`, in order of first occurrence.
pub fn search_ipv4(text: &str) -> Vec<&str> {
    IPV4.find_iter(text).map(|m| m.as_str()).collect()
}

/// Find IPv6 candidate literals in `text`, in order of first occurrence.
pub fn search_ipv6(text: &str) -> Vec<&str> {
    IPV6.find_iter(text).map(|m| m.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_ipv4_first_occurrence_order() {
        let found = search_ipv4("good 203.0.113.5 was 198.51.100.1");
        assert_eq!(found, vec!["203.0.113.5", "198.51.100.1"]);
    }

    #[test]
    fn test_search_ipv4_keeps_repeats() {
        let found = search_ipv4("nochg 203.0.113.5 203.0.113.5");
        assert_eq!(found, vec!["203.0.113.5", "203.0.113.5"]);
    }

    #[test]
    fn test_search_ipv4_none() {
        assert!(search_ipv4("nochg").is_empty());
        assert!(search_ipv4("good 2001:db8::1").is_empty());
    }

    #[test]
    fn test_search_ipv4_loose_scan() {
        // The scan is not an address validator; out-of-range octets are
        // returned and rejected when parsed at the call site.
        let found = search_ipv4("good 999.0.113.5");
        assert_eq!(found, vec!["999.0.113.5"]);
        assert!(found[0].parse::<std::net::Ipv4Addr>().is_err());
    }

    #[test]
    fn test_search_ipv6() {
        assert_eq!(search_ipv6("good 2001:db8::1"), vec!["2001:db8::1"]);
        assert_eq!(search_ipv6("OK\n::1\nUPDATED"), vec!["::1"]);
        assert_eq!(
            search_ipv6("2001:0db8:0000:0000:0000:0000:0000:0001"),
            vec!["2001:0db8:0000:0000:0000:0000:0000:0001"]
        );
    }

    #[test]
    fn test_search_ipv6_ignores_ipv4() {
        assert!(search_ipv6("good 203.0.113.5").is_empty());
    }
}
