//! SCTP-over-DTLS data channel section
//!
//! Emits, in order:
//!
//! ```text
//! m=application <port> UDP/DTLS/SCTP webrtc-datachannel
//! a=mid:<mid>
//! a=sctp-port:5000
//! a=max-message-size:262144
//! a=ice-ufrag:<ufrag>
//! a=ice-pwd:<pwd>
//! a=ice-options:trickle
//! a=fingerprint:sha-256 <fingerprint>
//! a=setup:passive
//! ```

use crate::constants::{DEFAULT_DATACHANNEL_PORT, MAX_MESSAGE_SIZE, SCTP_PORT};
use crate::content::{LineTerminator, SdpContent};
use crate::error::Result;

use super::SectionTemplate;

/// Data channel media section of an answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataChannelSection {
    /// Port on the `m=application` line
    pub port: u16,
    /// Media identifier
    pub mid: u32,
    /// ICE username fragment
    pub ice_ufrag: String,
    /// ICE password
    pub ice_pwd: String,
    /// SHA-256 certificate fingerprint, colon-separated hex
    pub fingerprint: String,
}

impl DataChannelSection {
    /// Create a section on the default port
    pub fn new(
        mid: u32,
        ice_ufrag: impl Into<String>,
        ice_pwd: impl Into<String>,
        fingerprint: impl Into<String>,
    ) -> Self {
        Self {
            port: DEFAULT_DATACHANNEL_PORT,
            mid,
            ice_ufrag: ice_ufrag.into(),
            ice_pwd: ice_pwd.into(),
            fingerprint: fingerprint.into(),
        }
    }

    /// Use a different port on the media line
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }
}

impl SectionTemplate for DataChannelSection {
    fn write_to(&self, content: &mut SdpContent, terminator: LineTerminator) -> Result<()> {
        content.append(
            format_args!("m=application {} UDP/DTLS/SCTP webrtc-datachannel", self.port),
            terminator,
        )?;
        content.append(format_args!("a=mid:{}", self.mid), terminator)?;
        content.append(format_args!("a=sctp-port:{}", SCTP_PORT), terminator)?;
        content.append(format_args!("a=max-message-size:{}", MAX_MESSAGE_SIZE), terminator)?;
        content.append(format_args!("a=ice-ufrag:{}", self.ice_ufrag), terminator)?;
        content.append(format_args!("a=ice-pwd:{}", self.ice_pwd), terminator)?;
        content.append("a=ice-options:trickle", terminator)?;
        content.append(format_args!("a=fingerprint:sha-256 {}", self.fingerprint), terminator)?;
        content.append("a=setup:passive", terminator)?;
        Ok(())
    }
}
