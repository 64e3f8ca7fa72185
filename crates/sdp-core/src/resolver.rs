//! Hostname resolution for mDNS candidates
//!
//! The parser never resolves names itself. It asks a [`HostnameResolver`]
//! for an IPv4 address and treats any error as a resolution failure.
//! Resolution is synchronous and may block.

use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, ToSocketAddrs};

use crate::error::{Error, Result};

/// Resolves a hostname to an IPv4 address
pub trait HostnameResolver {
    /// Resolve `hostname`, returning [`Error::ResolutionFailed`] when no IPv4
    /// address is available
    fn resolve_ipv4(&self, hostname: &str) -> Result<Ipv4Addr>;
}

impl<F> HostnameResolver for F
where
    F: Fn(&str) -> Option<Ipv4Addr>,
{
    fn resolve_ipv4(&self, hostname: &str) -> Result<Ipv4Addr> {
        self(hostname).ok_or_else(|| Error::resolution_failed(hostname, "no address"))
    }
}

/// Resolver backed by the operating system (`getaddrinfo`).
///
/// Whether `.local` names resolve depends on the host's mDNS setup
/// (e.g. nss-mdns or Bonjour).
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemResolver;

impl HostnameResolver for SystemResolver {
    fn resolve_ipv4(&self, hostname: &str) -> Result<Ipv4Addr> {
        let addrs = (hostname, 0)
            .to_socket_addrs()
            .map_err(|e| Error::resolution_failed(hostname, e.to_string()))?;

        addrs
            .filter_map(|addr| match addr.ip() {
                IpAddr::V4(ip) => Some(ip),
                IpAddr::V6(_) => None,
            })
            .next()
            .ok_or_else(|| Error::resolution_failed(hostname, "no IPv4 address"))
    }
}

/// Resolver answering from a fixed table
#[derive(Debug, Clone, Default)]
pub struct StaticResolver {
    entries: HashMap<String, Ipv4Addr>,
}

impl StaticResolver {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry
    pub fn with_entry(mut self, hostname: impl Into<String>, addr: Ipv4Addr) -> Self {
        self.entries.insert(hostname.into(), addr);
        self
    }

    /// Add or replace an entry
    pub fn insert(&mut self, hostname: impl Into<String>, addr: Ipv4Addr) {
        self.entries.insert(hostname.into(), addr);
    }
}

impl HostnameResolver for StaticResolver {
    fn resolve_ipv4(&self, hostname: &str) -> Result<Ipv4Addr> {
        self.entries
            .get(hostname)
            .copied()
            .ok_or_else(|| Error::resolution_failed(hostname, "unknown host"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_resolver() {
        let resolver = StaticResolver::new().with_entry("abcd1234.local", Ipv4Addr::new(10, 0, 0, 5));
        assert_eq!(
            resolver.resolve_ipv4("abcd1234.local").unwrap(),
            Ipv4Addr::new(10, 0, 0, 5)
        );
        assert!(matches!(
            resolver.resolve_ipv4("other.local"),
            Err(Error::ResolutionFailed { .. })
        ));
    }

    #[test]
    fn test_closure_resolver() {
        let resolver = |name: &str| (name == "peer.local").then_some(Ipv4Addr::LOCALHOST);
        assert_eq!(resolver.resolve_ipv4("peer.local").unwrap(), Ipv4Addr::LOCALHOST);
        assert!(resolver.resolve_ipv4("nope.local").is_err());
    }

    #[test]
    fn test_system_resolver_literal_address() {
        // An IPv4 literal resolves without touching the network
        let addr = SystemResolver.resolve_ipv4("192.0.2.7").unwrap();
        assert_eq!(addr, Ipv4Addr::new(192, 0, 2, 7));
    }
}
