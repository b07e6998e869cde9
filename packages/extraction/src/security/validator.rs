//! URL validation for SSRF protection.

use std::collections::HashSet;
use std::fmt;
use std::net::IpAddr;
use std::sync::Arc;

use ipnet::IpNet;
use tracing::{info, warn};
use url::{Host, ParseError, Url};

use crate::error::{SecurityError, SecurityResult};
use crate::traits::resolver::{DnsResolver, SystemResolver};

/// Address ranges a validated URL may never resolve into.
const FORBIDDEN_CIDRS: [&str; 8] = [
    "0.0.0.0/8",      // "This" network
    "10.0.0.0/8",     // Private
    "127.0.0.0/8",    // Loopback
    "169.254.0.0/16", // Link-local / cloud metadata
    "172.16.0.0/12",  // Private
    "192.168.0.0/16", // Private
    "::1/128",        // IPv6 loopback
    "fc00::/7",       // IPv6 unique local
];

/// URL validator for SSRF protection.
///
/// Validates URLs before any outbound fetch to prevent:
/// - Non-HTTP(S) schemes (file://, ftp://, javascript:)
/// - Access to internal services (localhost, 127.0.0.1)
/// - Access to private IP ranges (10.x, 172.16.x, 192.168.x, fc00::/7)
/// - Access to cloud metadata services (169.254.x)
///
/// The hostname is resolved once, at validation time. The fetch that follows
/// resolves again on its own, so a hostile DNS server can still answer
/// differently between the two lookups.
#[derive(Clone)]
pub struct UrlValidator {
    /// Allowed URL schemes
    allowed_schemes: HashSet<String>,

    /// Blocked CIDR ranges
    blocked_cidrs: Vec<IpNet>,

    /// Hostname resolver
    resolver: Arc<dyn DnsResolver>,
}

impl Default for UrlValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for UrlValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UrlValidator")
            .field("allowed_schemes", &self.allowed_schemes)
            .field("blocked_cidrs", &self.blocked_cidrs)
            .finish_non_exhaustive()
    }
}

impl UrlValidator {
    /// Create a validator with the default deny-list and the system resolver.
    pub fn new() -> Self {
        Self::with_resolver(Arc::new(SystemResolver))
    }

    /// Create a validator with the default deny-list and a custom resolver.
    pub fn with_resolver(resolver: Arc<dyn DnsResolver>) -> Self {
        Self {
            allowed_schemes: ["http", "https"].into_iter().map(String::from).collect(),
            blocked_cidrs: FORBIDDEN_CIDRS
                .iter()
                .filter_map(|cidr| cidr.parse().ok())
                .collect(),
            resolver,
        }
    }

    /// Block an additional CIDR range.
    pub fn block_cidr(mut self, cidr: IpNet) -> Self {
        self.blocked_cidrs.push(cidr);
        self
    }

    /// Return the blocked range containing `ip`, if any.
    ///
    /// IPv4-mapped IPv6 addresses are classified as the IPv4 address they
    /// carry, so `::ffff:127.0.0.1` is treated as loopback.
    pub fn blocked_range(&self, ip: IpAddr) -> Option<&IpNet> {
        let ip = ip.to_canonical();
        self.blocked_cidrs.iter().find(|cidr| cidr.contains(&ip))
    }

    /// Check whether `ip` falls into a forbidden range.
    pub fn is_forbidden(&self, ip: IpAddr) -> bool {
        self.blocked_range(ip).is_some()
    }

    /// Validate a candidate URL.
    ///
    /// Checks the scheme, requires a hostname, resolves it and rejects the URL
    /// if any resolved address is forbidden. On success the input string is
    /// returned unchanged; the resolved addresses are not retained.
    pub async fn validate(&self, url: &str) -> SecurityResult<String> {
        let parsed = Url::parse(url).map_err(|e| {
            warn!(url = %url, error = %e, "URL failed to parse");
            match e {
                ParseError::EmptyHost => SecurityError::NoHost,
                e => SecurityError::UrlParse(e),
            }
        })?;

        if !self.allowed_schemes.contains(parsed.scheme()) {
            warn!(url = %url, scheme = parsed.scheme(), "Rejected URL scheme");
            return Err(SecurityError::DisallowedScheme(parsed.scheme().to_string()));
        }

        // The parser is lenient with special schemes and would read
        // `https:///path` as host `path`.
        if !has_authority(url, parsed.scheme()) {
            warn!(url = %url, "URL has no hostname");
            return Err(SecurityError::NoHost);
        }

        let host = parsed.host().ok_or(SecurityError::NoHost)?;

        let addrs = match host {
            Host::Ipv4(ip) => vec![IpAddr::V4(ip)],
            Host::Ipv6(ip) => vec![IpAddr::V6(ip)],
            Host::Domain(domain) => {
                let port = parsed.port_or_known_default().unwrap_or(80);
                self.resolver.resolve(domain, port).await.map_err(|e| {
                    warn!(host = %domain, error = %e, "DNS resolution failed");
                    SecurityError::DnsResolution(domain.to_string())
                })?
            }
        };

        if addrs.is_empty() {
            warn!(host = %host, "DNS resolution returned no addresses");
            return Err(SecurityError::DnsResolution(host.to_string()));
        }

        for ip in &addrs {
            if let Some(cidr) = self.blocked_range(*ip) {
                warn!(url = %url, ip = %ip, range = %cidr, "URL resolves into forbidden range");
                return Err(SecurityError::BlockedAddress(*ip));
            }
        }

        info!(url = %url, resolved = ?addrs, "URL validated");
        Ok(url.to_string())
    }
}

/// Whether `url` spells out a non-empty `//authority` right after its scheme.
fn has_authority(url: &str, scheme: &str) -> bool {
    let raw = url.trim_start();
    let Some(rest) = raw
        .get(..scheme.len())
        .filter(|prefix| prefix.eq_ignore_ascii_case(scheme))
        .and_then(|_| raw[scheme.len()..].strip_prefix(':'))
    else {
        return false;
    };

    match rest.strip_prefix("//") {
        Some(authority) => !matches!(
            authority.chars().next(),
            None | Some('/' | '\\' | '?' | '#')
        ),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StaticResolver;
    use proptest::prelude::*;
    use std::net::{Ipv4Addr, Ipv6Addr};

    fn validator_resolving(host: &str, ip: &str) -> UrlValidator {
        let resolver = StaticResolver::new().with_host(host, ip.parse().unwrap());
        UrlValidator::with_resolver(Arc::new(resolver))
    }

    #[tokio::test]
    async fn test_allows_public_urls_unchanged() {
        let urls = [
            ("google.com", "https://google.com"),
            ("example.com", "http://example.com/path?query=string"),
            ("www.a-valid-domain.co.uk", "https://www.a-valid-domain.co.uk"),
        ];

        for (host, url) in urls {
            let validator = validator_resolving(host, "8.8.8.8");
            assert_eq!(validator.validate(url).await.unwrap(), url);
        }
    }

    #[tokio::test]
    async fn test_blocks_non_http() {
        let validator = UrlValidator::with_resolver(Arc::new(StaticResolver::new()));

        for url in [
            "file:///etc/passwd",
            "ftp://example.com",
            "ssh://user@host.com",
            "javascript:alert('xss')",
        ] {
            let err = validator.validate(url).await.unwrap_err();
            assert!(
                matches!(err, SecurityError::DisallowedScheme(_)),
                "{url}: {err:?}"
            );
            assert!(err.to_string().contains("Invalid URL scheme"));
        }
    }

    #[tokio::test]
    async fn test_scheme_rejected_before_resolution() {
        // No hosts registered: any lookup would fail with DnsResolution.
        let resolver = Arc::new(StaticResolver::new());
        let validator = UrlValidator::with_resolver(resolver.clone());

        let _ = validator.validate("ftp://example.com/file").await;

        assert!(resolver.lookups().is_empty());
    }

    #[tokio::test]
    async fn test_blocks_hosts_resolving_to_forbidden_ranges() {
        let cases = [
            ("localhost", "http://localhost", "127.0.0.1"),
            ("intranet.corp", "http://intranet.corp/admin", "192.168.1.1"),
            ("db.internal", "http://db.internal", "10.0.0.1"),
            ("metadata.cloud", "http://metadata.cloud/latest", "169.254.169.254"),
            ("v6.internal", "http://v6.internal", "::1"),
        ];

        for (host, url, ip) in cases {
            let validator = validator_resolving(host, ip);
            let err = validator.validate(url).await.unwrap_err();
            assert!(matches!(err, SecurityError::BlockedAddress(_)), "{url}");
            assert!(err.to_string().contains("forbidden IP address"));
        }
    }

    #[tokio::test]
    async fn test_blocks_ip_literals_without_lookup() {
        let resolver = Arc::new(StaticResolver::new());
        let validator = UrlValidator::with_resolver(resolver.clone());

        for url in [
            "http://127.0.0.1",
            "http://192.168.1.1",
            "http://10.0.0.1",
            "http://[::1]",
            "http://[fd00::1]/",
            "http://0.0.0.0/",
        ] {
            let err = validator.validate(url).await.unwrap_err();
            assert!(matches!(err, SecurityError::BlockedAddress(_)), "{url}");
        }
        assert!(resolver.lookups().is_empty());
    }

    #[tokio::test]
    async fn test_missing_hostname_rejected_before_resolution() {
        let resolver =
            Arc::new(StaticResolver::new().with_host("path", "8.8.8.8".parse().unwrap()));
        let validator = UrlValidator::with_resolver(resolver.clone());

        for url in [
            "http://",
            "https://",
            "https:///path",
            "http:///",
            "https:example.com",
            "http://?q=1",
        ] {
            let err = validator.validate(url).await.unwrap_err();
            assert!(matches!(err, SecurityError::NoHost), "{url}: {err:?}");
            assert_eq!(err.to_string(), "URL is missing a hostname.");
        }
        assert!(resolver.lookups().is_empty());
    }

    #[test]
    fn test_has_authority() {
        assert!(has_authority("https://example.com", "https"));
        assert!(has_authority("  HTTP://example.com/x", "http"));
        assert!(has_authority("http://user@example.com", "http"));
        assert!(!has_authority("https:///path", "https"));
        assert!(!has_authority("http:/example.com", "http"));
        assert!(!has_authority("http://", "http"));
    }

    #[tokio::test]
    async fn test_unresolvable_hostname() {
        let validator = UrlValidator::with_resolver(Arc::new(StaticResolver::new()));

        let err = validator
            .validate("http://this-is-not-a-real-domain.invalid")
            .await
            .unwrap_err();

        assert!(matches!(err, SecurityError::DnsResolution(_)));
        assert!(err.to_string().contains("Could not resolve hostname"));
    }

    #[tokio::test]
    async fn test_any_forbidden_address_rejects() {
        let resolver = StaticResolver::new()
            .with_host("split.example", "93.184.216.34".parse().unwrap())
            .with_host("split.example", "10.1.2.3".parse().unwrap());
        let validator = UrlValidator::with_resolver(Arc::new(resolver));

        assert!(validator.validate("https://split.example/").await.is_err());
    }

    #[test]
    fn test_ipv4_mapped_ipv6_is_classified_as_ipv4() {
        let validator = UrlValidator::new();
        let mapped = IpAddr::V6(Ipv4Addr::new(127, 0, 0, 1).to_ipv6_mapped());
        assert!(validator.is_forbidden(mapped));
    }

    #[test]
    fn test_range_edges() {
        let validator = UrlValidator::new();
        assert!(validator.is_forbidden("172.16.0.0".parse().unwrap()));
        assert!(validator.is_forbidden("172.31.255.255".parse().unwrap()));
        assert!(!validator.is_forbidden("172.32.0.0".parse().unwrap()));
        assert!(!validator.is_forbidden("172.15.255.255".parse().unwrap()));
        assert!(!validator.is_forbidden("8.8.8.8".parse().unwrap()));
        assert!(!validator.is_forbidden("2606:4700::1111".parse().unwrap()));
    }

    #[test]
    fn test_custom_cidr() {
        let validator = UrlValidator::new().block_cidr("100.64.0.0/10".parse().unwrap());
        assert!(validator.is_forbidden("100.64.1.1".parse().unwrap()));
    }

    proptest! {
        #[test]
        fn private_ten_slash_eight_is_forbidden(b in any::<u8>(), c in any::<u8>(), d in any::<u8>()) {
            let validator = UrlValidator::new();
            prop_assert!(validator.is_forbidden(IpAddr::V4(Ipv4Addr::new(10, b, c, d))));
        }

        #[test]
        fn loopback_slash_eight_is_forbidden(b in any::<u8>(), c in any::<u8>(), d in any::<u8>()) {
            let validator = UrlValidator::new();
            prop_assert!(validator.is_forbidden(IpAddr::V4(Ipv4Addr::new(127, b, c, d))));
        }

        #[test]
        fn unique_local_ipv6_is_forbidden(segments in any::<[u16; 8]>()) {
            let mut segments = segments;
            segments[0] = 0xfc00 | (segments[0] & 0x01ff);
            let ip = Ipv6Addr::from(segments);
            let validator = UrlValidator::new();
            prop_assert!(validator.is_forbidden(IpAddr::V6(ip)));
        }

        #[test]
        fn documentation_range_is_allowed(c in any::<u8>(), d in any::<u8>()) {
            // 198.51.0.0/16 overlaps none of the forbidden ranges
            let validator = UrlValidator::new();
            prop_assert!(!validator.is_forbidden(IpAddr::V4(Ipv4Addr::new(198, 51, c, d))));
        }
    }
}
