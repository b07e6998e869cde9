//! Testing utilities including mock implementations.
//!
//! These are useful for testing applications that use the extraction library
//! without making real DNS or network calls.

use async_trait::async_trait;
use std::collections::HashMap;
use std::io;
use std::net::IpAddr;
use std::sync::{Arc, RwLock};

use crate::traits::{extractor::ContentExtractor, resolver::DnsResolver};

/// A resolver answering from a fixed host table.
///
/// Unknown hosts fail with `NotFound`, mirroring an NXDOMAIN answer.
#[derive(Default)]
pub struct StaticResolver {
    hosts: RwLock<HashMap<String, Vec<IpAddr>>>,
    lookups: RwLock<Vec<String>>,
}

impl StaticResolver {
    /// Create an empty resolver (every lookup fails).
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an address for a host. Repeated calls accumulate addresses.
    pub fn with_host(self, host: impl Into<String>, ip: IpAddr) -> Self {
        self.add_host(host, ip);
        self
    }

    /// Add an address for a host through a shared reference.
    pub fn add_host(&self, host: impl Into<String>, ip: IpAddr) {
        self.hosts
            .write()
            .unwrap()
            .entry(host.into())
            .or_default()
            .push(ip);
    }

    /// Hosts that were looked up, in order.
    pub fn lookups(&self) -> Vec<String> {
        self.lookups.read().unwrap().clone()
    }
}

#[async_trait]
impl DnsResolver for StaticResolver {
    async fn resolve(&self, host: &str, _port: u16) -> io::Result<Vec<IpAddr>> {
        self.lookups.write().unwrap().push(host.to_string());
        self.hosts
            .read()
            .unwrap()
            .get(host)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("no such host: {host}")))
    }
}

/// A mock content extractor for testing.
///
/// Returns predefined text by URL (absent for unknown URLs) and records every
/// URL it was asked to extract.
#[derive(Default, Clone)]
pub struct MockExtractor {
    pages: Arc<RwLock<HashMap<String, String>>>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockExtractor {
    /// Create a mock with no pages.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add extracted text for a URL.
    pub fn with_content(self, url: impl Into<String>, text: impl Into<String>) -> Self {
        self.pages.write().unwrap().insert(url.into(), text.into());
        self
    }

    /// URLs passed to `extract`, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl ContentExtractor for MockExtractor {
    async fn extract(&self, url: &str) -> Option<String> {
        self.calls.write().unwrap().push(url.to_string());
        self.pages.read().unwrap().get(url).cloned()
    }

    fn name(&self) -> &str {
        "mock"
    }
}
