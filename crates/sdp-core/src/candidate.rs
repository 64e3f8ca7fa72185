//! mDNS hostname rewriting for local ICE candidates
//!
//! Format: `a=candidate:<foundation> <component-id> <transport> <priority> <conn-addr> <port> typ <cand-type> ...`
//!
//! Browsers hide host addresses behind `<uuid>.local` names. Before a
//! candidate is forwarded, the name in the connection-address field is
//! replaced by the resolved IPv4 address; everything else on the line is kept
//! byte for byte.

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::resolver::HostnameResolver;

/// Index of the connection-address field in a space-separated candidate line
pub const CONNECTION_ADDRESS_FIELD: usize = 4;

/// Whether `line` looks like a local candidate carrying an mDNS hostname
pub fn is_local_candidate(line: &str) -> bool {
    line.contains("candidate") && line.contains("local")
}

/// A candidate line split around its connection address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateLine<'a> {
    /// Everything before the connection address, including the separator
    pub prefix: &'a str,
    /// The connection address (an mDNS hostname for local candidates)
    pub address: &'a str,
    /// Everything after the connection address, starting with its separator
    pub suffix: &'a str,
}

impl<'a> CandidateLine<'a> {
    /// Split `line` on single spaces and locate the connection-address field.
    ///
    /// # Examples
    ///
    /// ```
    /// use peer_sdp_core::candidate::CandidateLine;
    ///
    /// let line = "a=candidate:1 1 UDP 2130706431 abcd1234.local 54400 typ host";
    /// let parts = CandidateLine::parse(line).unwrap();
    /// assert_eq!(parts.prefix, "a=candidate:1 1 UDP 2130706431 ");
    /// assert_eq!(parts.address, "abcd1234.local");
    /// assert_eq!(parts.suffix, " 54400 typ host");
    /// ```
    pub fn parse(line: &'a str) -> Result<CandidateLine<'a>> {
        let start = line
            .match_indices(' ')
            .nth(CONNECTION_ADDRESS_FIELD - 1)
            .map(|(idx, _)| idx + 1)
            .ok_or_else(|| Error::malformed("candidate", line))?;

        let end = line[start..]
            .find(' ')
            .map(|offset| start + offset)
            .unwrap_or(line.len());

        if start == end {
            return Err(Error::malformed("candidate", line));
        }

        Ok(CandidateLine {
            prefix: &line[..start],
            address: &line[start..end],
            suffix: &line[end..],
        })
    }

    /// Rebuild the line with a different connection address
    pub fn with_address(&self, address: &str) -> String {
        let mut out = String::with_capacity(self.prefix.len() + address.len() + self.suffix.len());
        out.push_str(self.prefix);
        out.push_str(address);
        out.push_str(self.suffix);
        out
    }
}

/// Replace the mDNS hostname of a local candidate with its IPv4 address.
///
/// Fails with [`Error::MalformedLine`] when the line has no connection-address
/// field and with [`Error::ResolutionFailed`] when the resolver has no
/// answer. In both cases the caller must not forward the line.
pub fn rewrite_mdns_candidate<R>(line: &str, resolver: &R) -> Result<String>
where
    R: HostnameResolver + ?Sized,
{
    let parts = CandidateLine::parse(line)?;

    let addr = match resolver.resolve_ipv4(parts.address) {
        Ok(addr) => addr,
        Err(e) => {
            warn!(hostname = parts.address, error = %e, "Dropping candidate with unresolved mDNS hostname");
            return Err(e);
        }
    };

    debug!(hostname = parts.address, %addr, "Rewrote mDNS candidate");
    Ok(parts.with_address(&addr.to_string()))
}
