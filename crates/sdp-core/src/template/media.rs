//! Per-codec audio and video sections
//!
//! Each section ends with `c=IN IP4 0.0.0.0` and its direction attribute.
//! ICE and DTLS attributes are not part of these templates; they are shared
//! with the data-channel section in a bundled answer.

use std::fmt;

use crate::content::{LineTerminator, SdpContent};
use crate::error::Result;

use super::SectionTemplate;

const DEFAULT_CNAME: &str = "pear";

/// Transceiver direction attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransceiverDirection {
    /// `a=sendrecv`
    #[default]
    SendRecv,
    /// `a=recvonly`
    RecvOnly,
    /// `a=sendonly`
    SendOnly,
    /// `a=inactive`
    Inactive,
}

impl fmt::Display for TransceiverDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SendRecv => write!(f, "sendrecv"),
            Self::RecvOnly => write!(f, "recvonly"),
            Self::SendOnly => write!(f, "sendonly"),
            Self::Inactive => write!(f, "inactive"),
        }
    }
}

fn write_tail(
    content: &mut SdpContent,
    direction: TransceiverDirection,
    terminator: LineTerminator,
) -> Result<()> {
    content.append("c=IN IP4 0.0.0.0", terminator)?;
    content.append(format_args!("a={}", direction), terminator)
}

/// H264 video section offering packetization modes 0 (pt 96) and 1 (pt 102)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct H264VideoSection {
    pub direction: TransceiverDirection,
    pub ssrc: u32,
    pub cname: String,
}

impl H264VideoSection {
    pub fn new(direction: TransceiverDirection) -> Self {
        Self {
            direction,
            ssrc: 1,
            cname: DEFAULT_CNAME.to_string(),
        }
    }
}

impl SectionTemplate for H264VideoSection {
    fn write_to(&self, content: &mut SdpContent, terminator: LineTerminator) -> Result<()> {
        content.append("m=video 9 UDP/TLS/RTP/SAVPF 96 102", terminator)?;
        content.append("a=rtcp-fb:102 nack", terminator)?;
        content.append("a=rtcp-fb:102 nack pli", terminator)?;
        content.append("a=fmtp:96 profile-level-id=42e01f;level-asymmetry-allowed=1", terminator)?;
        content.append(
            "a=fmtp:102 profile-level-id=42e01f;packetization-mode=1;level-asymmetry-allowed=1",
            terminator,
        )?;
        content.append(
            "a=fmtp:102 x-google-max-bitrate=6000;x-google-min-bitrate=2000;x-google-start-bitrate=4000",
            terminator,
        )?;
        content.append("a=rtpmap:96 H264/90000", terminator)?;
        content.append("a=rtpmap:102 H264/90000", terminator)?;
        content.append(format_args!("a=ssrc:{} cname:{}", self.ssrc, self.cname), terminator)?;
        write_tail(content, self.direction, terminator)
    }
}

/// Opus audio section (pt 111)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpusAudioSection {
    pub direction: TransceiverDirection,
    pub ssrc: u32,
    pub cname: String,
}

impl OpusAudioSection {
    pub fn new(direction: TransceiverDirection) -> Self {
        Self {
            direction,
            ssrc: 2,
            cname: DEFAULT_CNAME.to_string(),
        }
    }
}

impl SectionTemplate for OpusAudioSection {
    fn write_to(&self, content: &mut SdpContent, terminator: LineTerminator) -> Result<()> {
        content.append("m=audio 9 UDP/TLS/RTP/SAVP 111", terminator)?;
        content.append("a=rtcp-fb:111 nack", terminator)?;
        content.append("a=rtpmap:111 opus/48000/2", terminator)?;
        content.append(format_args!("a=ssrc:{} cname:{}", self.ssrc, self.cname), terminator)?;
        write_tail(content, self.direction, terminator)
    }
}

/// G.711 A-law audio section (pt 8)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PcmaAudioSection {
    pub direction: TransceiverDirection,
    pub ssrc: u32,
    pub cname: String,
}

impl PcmaAudioSection {
    pub fn new(direction: TransceiverDirection) -> Self {
        Self {
            direction,
            ssrc: 2,
            cname: DEFAULT_CNAME.to_string(),
        }
    }
}

impl SectionTemplate for PcmaAudioSection {
    fn write_to(&self, content: &mut SdpContent, terminator: LineTerminator) -> Result<()> {
        content.append("m=audio 9 UDP/TLS/RTP/SAVP 8", terminator)?;
        content.append("a=rtpmap:8 PCMA/8000", terminator)?;
        content.append(format_args!("a=ssrc:{} cname:{}", self.ssrc, self.cname), terminator)?;
        write_tail(content, self.direction, terminator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ssrc::find_ssrc;

    fn render(section: &dyn SectionTemplate) -> String {
        let mut content = SdpContent::new(4096, 256);
        section.write_to(&mut content, LineTerminator::Crlf).unwrap();
        content.into_string()
    }

    #[test]
    fn test_pcma_section() {
        let sdp = render(&PcmaAudioSection::new(TransceiverDirection::SendOnly));
        assert_eq!(
            sdp,
            "m=audio 9 UDP/TLS/RTP/SAVP 8\r\n\
             a=rtpmap:8 PCMA/8000\r\n\
             a=ssrc:2 cname:pear\r\n\
             c=IN IP4 0.0.0.0\r\n\
             a=sendonly\r\n"
        );
    }

    #[test]
    fn test_opus_section() {
        let sdp = render(&OpusAudioSection::new(TransceiverDirection::RecvOnly));
        assert!(sdp.starts_with("m=audio 9 UDP/TLS/RTP/SAVP 111\r\n"));
        assert!(sdp.contains("a=rtpmap:111 opus/48000/2\r\n"));
        assert!(sdp.ends_with("a=recvonly\r\n"));
        assert_eq!(find_ssrc("audio", &sdp), 2);
    }

    #[test]
    fn test_h264_section() {
        let mut section = H264VideoSection::new(TransceiverDirection::default());
        section.ssrc = 4242;
        let sdp = render(&section);
        assert_eq!(sdp.matches("\r\n").count(), 11);
        assert!(sdp.contains("a=rtpmap:102 H264/90000\r\n"));
        assert!(sdp.ends_with("c=IN IP4 0.0.0.0\r\na=sendrecv\r\n"));
        assert_eq!(find_ssrc("video", &sdp), 4242);
    }
}
