//! Session description parsing and construction
//!
//! A [`SessionDescription`] is built once, either from a remote offer or
//! empty for an outbound answer. Parsing walks the offer line by line:
//!
//! ```text
//! raw text ──► split_lines ──┬─► MediaSections::observe_line
//!                            ├─► PayloadTypeBindings::apply_line   ("rtpmap")
//!                            └─► candidate rewrite or pass-through ──► SdpContent
//! ```
//!
//! Per-line problems (malformed rtpmap, unresolved mDNS names, lines without
//! `=`, stray CR or LF) are logged and skipped. Capacity errors abort the parse.

use tracing::{debug, trace};

use crate::candidate::{is_local_candidate, rewrite_mdns_candidate};
use crate::config::{LocalCandidatePolicy, SdpConfig};
use crate::content::{LineTerminator, SdpContent};
use crate::error::{Error, Result};
use crate::lines::split_lines;
use crate::media::{MediaKind, MediaSections};
use crate::resolver::{HostnameResolver, SystemResolver};
use crate::rtpmap::PayloadTypeBindings;
use crate::ssrc::find_ssrc;
use crate::template::{DataChannelSection, SectionTemplate};

/// Structured view and rebuilt text of one side of a negotiation
#[derive(Debug, Clone)]
pub struct SessionDescription {
    config: SdpConfig,
    media_sections: MediaSections,
    payload_types: PayloadTypeBindings,
    content: SdpContent,
}

impl SessionDescription {
    /// Create an empty description for outbound construction
    pub fn new(config: SdpConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            media_sections: MediaSections::with_capacity(config.max_media_sections),
            payload_types: PayloadTypeBindings::default(),
            content: SdpContent::new(config.max_content_size, config.max_line_len),
            config,
        })
    }

    /// Parse `text`, resolving mDNS candidates through the operating system
    pub fn parse(text: &str, config: SdpConfig) -> Result<Self> {
        Self::parse_with_resolver(text, config, &SystemResolver)
    }

    /// Parse `text`, resolving mDNS candidates through `resolver`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::net::Ipv4Addr;
    /// use peer_sdp_core::{MediaKind, SdpConfig, SessionDescription, StaticResolver};
    ///
    /// let offer = "v=0\r\n\
    ///              m=audio 9 UDP/TLS/RTP/SAVPF 111\r\n\
    ///              a=rtpmap:111 opus/48000/2\r\n\
    ///              a=candidate:1 1 UDP 2130706431 abcd1234.local 54400 typ host\r\n";
    /// let resolver = StaticResolver::new().with_entry("abcd1234.local", Ipv4Addr::new(10, 0, 0, 5));
    ///
    /// let sdp = SessionDescription::parse_with_resolver(
    ///     offer,
    ///     SdpConfig::default().with_mdns(true),
    ///     &resolver,
    /// )?;
    ///
    /// assert_eq!(sdp.media_sections(), &[MediaKind::Audio]);
    /// assert_eq!(sdp.payload_types().opus(), 111);
    /// assert!(sdp.content().contains("2130706431 10.0.0.5 54400 typ host"));
    /// # Ok::<(), peer_sdp_core::Error>(())
    /// ```
    pub fn parse_with_resolver<R>(text: &str, config: SdpConfig, resolver: &R) -> Result<Self>
    where
        R: HostnameResolver + ?Sized,
    {
        let mut sdp = Self::new(config)?;

        for line in split_lines(text, sdp.config.max_lines) {
            sdp.media_sections.observe_line(line)?;

            if line.contains("rtpmap") {
                if let Err(e) = sdp.payload_types.apply_line(line) {
                    debug!(error = %e, "Skipping rtpmap line");
                }
            }

            if is_local_candidate(line) {
                sdp.forward_local_candidate(line, resolver)?;
            } else {
                sdp.forward_line(line)?;
            }
        }

        debug!(
            media_sections = sdp.media_sections.len(),
            content_len = sdp.content.len(),
            "Parsed session description"
        );
        Ok(sdp)
    }

    fn forward_local_candidate<R>(&mut self, line: &str, resolver: &R) -> Result<()>
    where
        R: HostnameResolver + ?Sized,
    {
        if self.config.mdns_enabled {
            return match rewrite_mdns_candidate(line, resolver) {
                Ok(rewritten) => self.forward_line(&rewritten),
                // Not forwarded: neither the hostname nor a broken candidate
                Err(e) if !e.is_fatal() => Ok(()),
                Err(e) => Err(e),
            };
        }

        match self.config.local_candidate_policy {
            LocalCandidatePolicy::PassThrough => self.forward_line(line),
            LocalCandidatePolicy::Drop => {
                trace!(line, "Dropping local candidate, mDNS rewriting disabled");
                Ok(())
            }
        }
    }

    /// Append a source line, skipping lines that are not SDP attributes
    fn forward_line(&mut self, line: &str) -> Result<()> {
        match self.content.append_newline(line) {
            Err(Error::MissingDelimiter { line: skipped }) => {
                trace!(line = %skipped, "Skipping line without '=' delimiter");
                Ok(())
            }
            Err(Error::EmbeddedLineBreak { line: skipped }) => {
                debug!(line = ?skipped, "Skipping line with a stray line break");
                Ok(())
            }
            other => other,
        }
    }

    /// Append an attribute followed by CRLF
    pub fn append_newline(&mut self, attribute: impl std::fmt::Display) -> Result<()> {
        self.content.append_newline(attribute)
    }

    /// Append an attribute followed by the escaped `\r\n` sequence
    pub fn append_escaped(&mut self, attribute: impl std::fmt::Display) -> Result<()> {
        self.content.append_escaped(attribute)
    }

    /// Write a section template
    pub fn add_section(&mut self, section: &dyn SectionTemplate, terminator: LineTerminator) -> Result<()> {
        section.write_to(&mut self.content, terminator)
    }

    /// Write a data-channel section with escaped terminators, ready to embed
    /// in a signaling message
    pub fn add_data_channel(&mut self, section: &DataChannelSection) -> Result<()> {
        self.add_section(section, LineTerminator::Escaped)
    }

    /// Media sections in order of appearance
    pub fn media_sections(&self) -> &[MediaKind] {
        self.media_sections.as_slice()
    }

    /// Number of media sections
    pub fn media_section_count(&self) -> usize {
        self.media_sections.len()
    }

    /// Snapshot of the payload-type bindings
    pub fn payload_types(&self) -> PayloadTypeBindings {
        self.payload_types
    }

    /// The rebuilt SDP text
    pub fn content(&self) -> &str {
        self.content.as_str()
    }

    /// Consume the description and return its text
    pub fn into_content(self) -> String {
        self.content.into_string()
    }

    /// Whether mDNS candidates are rewritten
    pub fn mdns_enabled(&self) -> bool {
        self.config.mdns_enabled
    }

    /// The configuration this description was built with
    pub fn config(&self) -> &SdpConfig {
        &self.config
    }

    /// First SSRC of the first section of `kind` in the rebuilt text, 0 if none
    pub fn ssrc(&self, kind: MediaKind) -> u32 {
        find_ssrc(kind.marker(), self.content.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::StaticResolver;
    use std::net::Ipv4Addr;

    const OFFER: &str = "v=0\r\n\
        o=- 4611731400430051336 2 IN IP4 127.0.0.1\r\n\
        s=-\r\n\
        t=0 0\r\n\
        a=group:BUNDLE 0 1 2\r\n\
        m=audio 9 UDP/TLS/RTP/SAVPF 111 8\r\n\
        a=mid:0\r\n\
        a=rtpmap:111 opus/48000/2\r\n\
        a=rtpmap:8 PCMA/8000\r\n\
        a=ssrc:1001 cname:peer\r\n\
        m=video 9 UDP/TLS/RTP/SAVPF 96 102\r\n\
        a=mid:1\r\n\
        a=rtpmap:96 VP8/90000\r\n\
        a=rtpmap:102 H264/90000\r\n\
        a=ssrc:2002 cname:peer\r\n\
        m=application 9 UDP/DTLS/SCTP webrtc-datachannel\r\n\
        a=mid:2\r\n\
        a=candidate:1 1 UDP 2130706431 abcd1234.local 54400 typ host\r\n\
        a=candidate:2 1 UDP 1694498815 203.0.113.9 54401 typ srflx raddr 0.0.0.0 rport 0\r\n";

    fn resolver() -> StaticResolver {
        StaticResolver::new().with_entry("abcd1234.local", Ipv4Addr::new(10, 0, 0, 5))
    }

    #[test]
    fn test_parse_media_and_payload_types() {
        let sdp = SessionDescription::parse_with_resolver(OFFER, SdpConfig::default(), &resolver()).unwrap();
        assert_eq!(
            sdp.media_sections(),
            &[MediaKind::Audio, MediaKind::Video, MediaKind::DataChannel]
        );
        assert_eq!(sdp.media_section_count(), 3);

        let pts = sdp.payload_types();
        assert_eq!(pts.opus(), 111);
        assert_eq!(pts.pcma(), 8);
        assert_eq!(pts.h264(), 102);
        assert_eq!(sdp.ssrc(MediaKind::Audio), 1001);
        assert_eq!(sdp.ssrc(MediaKind::Video), 2002);
    }

    #[test]
    fn test_mdns_rewrite() {
        let config = SdpConfig::default().with_mdns(true);
        let sdp = SessionDescription::parse_with_resolver(OFFER, config, &resolver()).unwrap();
        assert!(sdp.mdns_enabled());
        assert!(sdp
            .content()
            .contains("a=candidate:1 1 UDP 2130706431 10.0.0.5 54400 typ host\r\n"));
        assert!(!sdp.content().contains(".local"));
        assert!(sdp.content().contains("typ srflx raddr 0.0.0.0 rport 0\r\n"));
    }

    #[test]
    fn test_mdns_resolution_failure_drops_candidate() {
        let config = SdpConfig::default().with_mdns(true);
        let sdp = SessionDescription::parse_with_resolver(OFFER, config, &StaticResolver::new()).unwrap();
        assert!(!sdp.content().contains("a=candidate:1 "));
        assert!(sdp.content().contains("a=candidate:2 "));
    }

    #[test]
    fn test_local_candidate_policy_when_mdns_disabled() {
        let dropped = SessionDescription::parse_with_resolver(OFFER, SdpConfig::default(), &resolver()).unwrap();
        assert!(!dropped.content().contains("abcd1234.local"));

        let config = SdpConfig::default().with_local_candidate_policy(LocalCandidatePolicy::PassThrough);
        let kept = SessionDescription::parse_with_resolver(OFFER, config, &resolver()).unwrap();
        assert!(kept
            .content()
            .contains("a=candidate:1 1 UDP 2130706431 abcd1234.local 54400 typ host\r\n"));
    }

    #[test]
    fn test_other_lines_are_copied_in_order() {
        let sdp = SessionDescription::parse_with_resolver(OFFER, SdpConfig::default(), &resolver()).unwrap();
        let expected: String = OFFER
            .split_terminator("\r\n")
            .filter(|line| !line.contains("abcd1234.local"))
            .map(|line| format!("{}\r\n", line))
            .collect();
        assert_eq!(sdp.content(), expected);
    }

    #[test]
    fn test_too_many_media_sections() {
        let config = SdpConfig::default().with_max_media_sections(2);
        let err = SessionDescription::parse_with_resolver(OFFER, config, &resolver()).unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn test_content_overflow_is_fatal() {
        let config = SdpConfig::default().with_max_content_size(64).with_max_line_len(64);
        let err = SessionDescription::parse_with_resolver(OFFER, config, &resolver()).unwrap_err();
        assert!(matches!(err, Error::CapacityExceeded { .. }));
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let sdp = SessionDescription::parse_with_resolver("v=0\r\n\r\ns=-\r\n", SdpConfig::default(), &resolver())
            .unwrap();
        assert_eq!(sdp.content(), "v=0\r\ns=-\r\n");
    }

    #[test]
    fn test_bare_lf_line_is_skipped() {
        let sdp = SessionDescription::parse_with_resolver("v=0\r\na=x\nbogus\r\ns=-\r\n", SdpConfig::default(), &resolver())
            .unwrap();
        assert_eq!(sdp.content(), "v=0\r\ns=-\r\n");
    }

    #[test]
    fn test_outbound_answer() {
        let mut answer = SessionDescription::new(SdpConfig::default()).unwrap();
        answer.append_escaped("v=0").unwrap();
        answer
            .add_data_channel(&DataChannelSection::new(0, "ufrag", "pwd", "AA:BB"))
            .unwrap();
        assert!(answer.content().starts_with("v=0\\r\\nm=application 50712 "));
        assert!(answer.content().ends_with("a=setup:passive\\r\\n"));
        assert_eq!(answer.media_section_count(), 0);
    }

    #[test]
    fn test_invalid_config() {
        let err = SessionDescription::new(SdpConfig::default().with_max_lines(0)).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { .. }));
    }
}
