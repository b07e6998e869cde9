//! DNS resolution seam used by the URL validator.

use async_trait::async_trait;
use std::io;
use std::net::IpAddr;

/// Resolves a hostname to the addresses a connection would be made to.
///
/// Injected into [`crate::UrlValidator`] so that address classification can be
/// tested without touching the network.
#[async_trait]
pub trait DnsResolver: Send + Sync {
    /// Resolve `host` for a connection on `port`.
    async fn resolve(&self, host: &str, port: u16) -> io::Result<Vec<IpAddr>>;
}

/// Resolver backed by the operating system (`getaddrinfo` via tokio).
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemResolver;

#[async_trait]
impl DnsResolver for SystemResolver {
    async fn resolve(&self, host: &str, port: u16) -> io::Result<Vec<IpAddr>> {
        let addrs = tokio::net::lookup_host((host, port)).await?;
        Ok(addrs.map(|addr| addr.ip()).collect())
    }
}
