//! # peer-sdp-core: SDP parsing and rewriting for WebRTC negotiation
//!
//! This crate turns a raw SDP offer into a structured view and a rebuilt,
//! negotiation-ready text, and builds the answer's data-channel section.
//!
//! ## Features
//!
//! - **Media sections**: `m=audio`, `m=video` and `m=application` lines in order of appearance
//! - **Payload types**: rtpmap bindings for H264, PCMA and Opus
//! - **mDNS candidates**: `<uuid>.local` hostnames in local ICE candidates replaced by IPv4 addresses
//! - **Bounded output**: every append is checked against the configured size limits
//! - **SSRC lookup**: first SSRC of a media type
//!
//! ## Usage
//!
//! ```rust
//! use std::net::Ipv4Addr;
//! use peer_sdp_core::{DataChannelSection, SdpConfig, SessionDescription, StaticResolver};
//!
//! let offer = "v=0\r\n\
//!              m=video 9 UDP/TLS/RTP/SAVPF 102\r\n\
//!              a=rtpmap:102 H264/90000\r\n\
//!              a=ssrc:2002 cname:peer\r\n";
//!
//! let resolver = StaticResolver::new().with_entry("abcd.local", Ipv4Addr::new(10, 0, 0, 5));
//! let remote = SessionDescription::parse_with_resolver(offer, SdpConfig::default().with_mdns(true), &resolver)?;
//! assert_eq!(remote.payload_types().h264(), 102);
//! assert_eq!(remote.ssrc(peer_sdp_core::MediaKind::Video), 2002);
//!
//! let mut answer = SessionDescription::new(SdpConfig::default())?;
//! answer.add_data_channel(&DataChannelSection::new(0, "ufrag", "password", "AA:BB:CC"))?;
//! assert!(answer.content().contains("a=setup:passive\\r\\n"));
//! # Ok::<(), peer_sdp_core::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `media-templates`: H264, Opus and PCMA media-section templates

pub mod candidate;
pub mod config;
pub mod content;
pub mod error;
pub mod lines;
pub mod media;
pub mod resolver;
pub mod rtpmap;
pub mod session;
pub mod ssrc;
pub mod template;

pub use candidate::{rewrite_mdns_candidate, CandidateLine};
pub use config::{LocalCandidatePolicy, SdpConfig};
pub use content::{LineTerminator, SdpContent};
pub use error::{Error, Resource, Result};
pub use media::{MediaKind, MediaSections};
pub use resolver::{HostnameResolver, StaticResolver, SystemResolver};
pub use rtpmap::{Codec, PayloadTypeBindings, RtpMapLine};
pub use session::SessionDescription;
pub use ssrc::find_ssrc;
pub use template::{DataChannelSection, SectionTemplate};

/// Protocol limits and fixed values
pub mod constants {
    /// Maximum number of media sections in a description
    pub const MAX_MEDIA_SECTIONS: usize = 10;

    /// Maximum size of the rebuilt SDP text in bytes
    pub const MAX_CONTENT_SIZE: usize = 10240;

    /// Maximum number of input lines considered
    pub const MAX_LINES: usize = 512;

    /// Maximum length of one formatted attribute in bytes
    pub const MAX_LINE_LEN: usize = 256;

    /// Lowest payload type accepted for H264 (start of the dynamic range)
    pub const H264_MIN_DYNAMIC_PT: u32 = 96;

    /// Port announced on the data-channel media line
    pub const DEFAULT_DATACHANNEL_PORT: u16 = 50712;

    /// SCTP port of the data channel association
    pub const SCTP_PORT: u16 = 5000;

    /// Largest data-channel message accepted, in bytes
    pub const MAX_MESSAGE_SIZE: u32 = 262144;
}
