//! SSRF-resistant URL validation.
//!
//! Grounded on `original_source/src/docpull/security/url_validator.py`:
//! scheme allowlist, optional domain allowlist, and IP-range blocking
//! (private/loopback/link-local/reserved, including IPv6 site-local).

use std::collections::HashSet;
use std::net::IpAddr;
use url::Url;

const INTERNAL_SUFFIXES: &[&str] = &[".internal", ".local", ".localhost", ".localdomain"];
const LOCALHOST_NAMES: &[&str] = &["localhost", "localhost.localdomain"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    InvalidUrl,
    SchemeNotAllowed { scheme: String },
    NoHost,
    DomainNotAllowed { host: String },
    Localhost,
    InternalSuffix { suffix: &'static str },
    PrivateIp { host: String },
    LoopbackIp { host: String },
    LinkLocalIp { host: String },
    ReservedIp { host: String },
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::InvalidUrl => write!(f, "invalid URL format"),
            Rejection::SchemeNotAllowed { scheme } => write!(f, "scheme '{scheme}' not allowed"),
            Rejection::NoHost => write!(f, "URL has no host"),
            Rejection::DomainNotAllowed { host } => write!(f, "domain '{host}' not in allowed list"),
            Rejection::Localhost => write!(f, "localhost URLs not allowed"),
            Rejection::InternalSuffix { suffix } => write!(f, "internal domain suffix '{suffix}' not allowed"),
            Rejection::PrivateIp { host } => write!(f, "private IP address '{host}' not allowed"),
            Rejection::LoopbackIp { host } => write!(f, "loopback IP address '{host}' not allowed"),
            Rejection::LinkLocalIp { host } => write!(f, "link-local IP address '{host}' not allowed"),
            Rejection::ReservedIp { host } => write!(f, "reserved IP address '{host}' not allowed"),
        }
    }
}

/// Validates URLs for SSRF resistance and an optional domain allowlist.
pub struct UrlValidator {
    allowed_schemes: HashSet<String>,
    allowed_domains: Option<HashSet<String>>,
    block_private_ips: bool,
}

impl UrlValidator {
    #[must_use]
    pub fn new(allowed_schemes: HashSet<String>, allowed_domains: Option<HashSet<String>>) -> Self {
        Self {
            allowed_schemes,
            allowed_domains,
            block_private_ips: true,
        }
    }

    #[must_use]
    pub fn allow_private_ips(mut self) -> Self {
        self.block_private_ips = false;
        self
    }

    pub fn validate(&self, url: &str) -> Result<(), Rejection> {
        let parsed = Url::parse(url).map_err(|_| Rejection::InvalidUrl)?;

        if !self.allowed_schemes.contains(parsed.scheme()) {
            return Err(Rejection::SchemeNotAllowed {
                scheme: parsed.scheme().to_string(),
            });
        }

        let host = parsed.host_str().ok_or(Rejection::NoHost)?.to_ascii_lowercase();

        if let Some(allowed) = &self.allowed_domains {
            if !allowed.contains(&host) {
                return Err(Rejection::DomainNotAllowed { host });
            }
        }

        if LOCALHOST_NAMES.contains(&host.as_str()) {
            return Err(Rejection::Localhost);
        }

        for suffix in INTERNAL_SUFFIXES {
            if host.ends_with(suffix) {
                return Err(Rejection::InternalSuffix { suffix });
            }
        }

        if self.block_private_ips {
            if let Ok(ip) = host.parse::<IpAddr>() {
                check_ip(&host, ip)?;
            }
        }

        Ok(())
    }

    #[must_use]
    pub fn is_valid(&self, url: &str) -> bool {
        self.validate(url).is_ok()
    }
}

impl Default for UrlValidator {
    fn default() -> Self {
        Self::new(HashSet::from(["https".to_string()]), None)
    }
}

fn check_ip(host: &str, ip: IpAddr) -> Result<(), Rejection> {
    match ip {
        IpAddr::V4(v4) => {
            if v4.is_private() {
                return Err(Rejection::PrivateIp { host: host.to_string() });
            }
            if v4.is_loopback() {
                return Err(Rejection::LoopbackIp { host: host.to_string() });
            }
            if v4.is_link_local() {
                return Err(Rejection::LinkLocalIp { host: host.to_string() });
            }
            if v4.is_reserved() || v4.is_broadcast() {
                return Err(Rejection::ReservedIp { host: host.to_string() });
            }
        }
        IpAddr::V6(v6) => {
            if v6.is_loopback() {
                return Err(Rejection::LoopbackIp { host: host.to_string() });
            }
            if v6.is_unique_local() || is_unicast_link_local(&v6) {
                return Err(Rejection::PrivateIp { host: host.to_string() });
            }
            if let Some(v4) = v6.to_ipv4_mapped() {
                return check_ip(host, IpAddr::V4(v4));
            }
        }
    }
    Ok(())
}

fn is_unicast_link_local(v6: &std::net::Ipv6Addr) -> bool {
    (v6.segments()[0] & 0xffc0) == 0xfe80
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> UrlValidator {
        UrlValidator::default()
    }

    #[test]
    fn accepts_plain_https_url() {
        assert!(validator().is_valid("https://example.com/page"));
    }

    #[test]
    fn rejects_http_by_default() {
        assert_eq!(
            validator().validate("http://example.com"),
            Err(Rejection::SchemeNotAllowed {
                scheme: "http".to_string()
            })
        );
    }

    #[test]
    fn rejects_localhost() {
        assert_eq!(
            validator().validate("https://localhost/page"),
            Err(Rejection::Localhost)
        );
    }

    #[test]
    fn rejects_internal_suffix() {
        assert!(matches!(
            validator().validate("https://service.internal/"),
            Err(Rejection::InternalSuffix { .. })
        ));
    }

    #[test]
    fn rejects_private_ipv4() {
        assert!(matches!(
            validator().validate("https://10.0.0.1/"),
            Err(Rejection::PrivateIp { .. })
        ));
    }

    #[test]
    fn rejects_loopback_ipv4() {
        assert!(matches!(
            validator().validate("https://127.0.0.1/"),
            Err(Rejection::LoopbackIp { .. })
        ));
    }

    #[test]
    fn domain_allowlist_rejects_other_hosts() {
        let validator = UrlValidator::new(
            HashSet::from(["https".to_string()]),
            Some(HashSet::from(["example.com".to_string()])),
        );
        assert!(validator.is_valid("https://example.com/"));
        assert!(!validator.is_valid("https://evil.example.org/"));
    }
}
