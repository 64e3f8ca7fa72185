//! Rtpmap attribute parsing and payload-type bindings
//!
//! Format: `a=rtpmap:<payload type> <encoding name>/<clock rate>[/<encoding parameters>]`
//!
//! Only three codecs are bound: H264, PCMA and Opus. Other encodings are
//! parsed and ignored.

use std::fmt;

use nom::{
    bytes::complete::{is_not, tag, take_until},
    character::complete::{char, digit1},
    combinator::{map_res, opt, rest},
    sequence::preceded,
    IResult,
};
use tracing::debug;

use crate::constants::H264_MIN_DYNAMIC_PT;
use crate::error::{Error, Result};

/// Codecs with a tracked payload-type binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Codec {
    /// H.264 video
    H264,
    /// G.711 A-law audio
    Pcma,
    /// Opus audio
    Opus,
}

impl Codec {
    /// Match an rtpmap encoding name, case-sensitively
    pub fn from_encoding(name: &str) -> Option<Codec> {
        match name {
            "H264" => Some(Codec::H264),
            "PCMA" => Some(Codec::Pcma),
            "opus" => Some(Codec::Opus),
            _ => None,
        }
    }

    /// Encoding name as written in rtpmap lines
    pub fn encoding_name(&self) -> &'static str {
        match self {
            Self::H264 => "H264",
            Self::Pcma => "PCMA",
            Self::Opus => "opus",
        }
    }

    /// Whether `pt` may be bound to this codec
    pub fn accepts_payload_type(&self, pt: u32) -> bool {
        match self {
            Self::H264 => pt >= H264_MIN_DYNAMIC_PT,
            Self::Pcma | Self::Opus => true,
        }
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.encoding_name())
    }
}

/// Tokenized rtpmap attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RtpMapLine<'a> {
    /// Payload type number
    pub payload_type: u32,
    /// Encoding name, e.g. `opus`
    pub encoding: &'a str,
    /// Clock rate, when it parses as a number
    pub clock_rate: Option<u32>,
    /// Encoding parameters (channel count for audio)
    pub channels: Option<u32>,
}

impl<'a> RtpMapLine<'a> {
    /// Tokenize a line containing an rtpmap attribute.
    ///
    /// The payload type follows the first `:`, the encoding name runs from the
    /// following space up to the next `/`. Missing anchors or a payload type
    /// that is not a decimal number yield [`Error::MalformedLine`].
    ///
    /// # Examples
    ///
    /// ```
    /// use peer_sdp_core::rtpmap::RtpMapLine;
    ///
    /// let rtpmap = RtpMapLine::parse("a=rtpmap:111 opus/48000/2").unwrap();
    /// assert_eq!(rtpmap.payload_type, 111);
    /// assert_eq!(rtpmap.encoding, "opus");
    /// assert_eq!(rtpmap.clock_rate, Some(48000));
    /// assert_eq!(rtpmap.channels, Some(2));
    ///
    /// assert!(RtpMapLine::parse("a=rtpmap:8").is_err());
    /// ```
    pub fn parse(line: &'a str) -> Result<RtpMapLine<'a>> {
        match rtpmap_parser(line) {
            Ok((_, parsed)) => Ok(parsed),
            Err(_) => Err(Error::malformed("rtpmap", line)),
        }
    }

    /// The tracked codec this line describes, if any
    pub fn codec(&self) -> Option<Codec> {
        Codec::from_encoding(self.encoding)
    }
}

fn numeric(input: &str) -> IResult<&str, u32> {
    map_res(digit1, |s: &str| s.parse::<u32>())(input)
}

fn rtpmap_parser(input: &str) -> IResult<&str, RtpMapLine<'_>> {
    let (input, _) = take_until(":")(input)?;
    let (input, _) = tag(":")(input)?;
    let (input, pt) = numeric(input)?;
    // Anything else glued to the number belongs to the payload-type token
    let (input, _) = opt(is_not(" \t"))(input)?;
    let (input, _) = take_until(" ")(input)?;
    let (input, _) = char(' ')(input)?;
    let (input, encoding) = take_until("/")(input)?;
    let (input, _) = char('/')(input)?;
    let (input, clock_rate) = opt(numeric)(input)?;
    let (input, channels) = opt(preceded(char('/'), numeric))(input)?;
    let (input, _) = rest(input)?;

    Ok((
        input,
        RtpMapLine {
            payload_type: pt,
            encoding,
            clock_rate,
            channels,
        },
    ))
}

/// Payload types bound to the tracked codecs.
///
/// An unbound codec reports payload type 0. When several rtpmap lines match
/// the same codec, the last accepted one wins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PayloadTypeBindings {
    h264: Option<u32>,
    pcma: Option<u32>,
    opus: Option<u32>,
}

impl PayloadTypeBindings {
    /// Payload type bound to `codec`, or `None` while unassigned
    pub fn get(&self, codec: Codec) -> Option<u32> {
        match codec {
            Codec::H264 => self.h264,
            Codec::Pcma => self.pcma,
            Codec::Opus => self.opus,
        }
    }

    /// Payload type bound to `codec`, 0 while unassigned
    pub fn payload_type(&self, codec: Codec) -> u32 {
        self.get(codec).unwrap_or(0)
    }

    /// H264 payload type, 0 while unassigned
    pub fn h264(&self) -> u32 {
        self.payload_type(Codec::H264)
    }

    /// PCMA payload type, 0 while unassigned
    pub fn pcma(&self) -> u32 {
        self.payload_type(Codec::Pcma)
    }

    /// Opus payload type, 0 while unassigned
    pub fn opus(&self) -> u32 {
        self.payload_type(Codec::Opus)
    }

    /// Bind `pt` to `codec` if the codec accepts it. Returns whether the
    /// binding was applied.
    pub fn bind(&mut self, codec: Codec, pt: u32) -> bool {
        if !codec.accepts_payload_type(pt) {
            debug!(codec = %codec, pt, "Ignoring payload type outside the dynamic range");
            return false;
        }

        let slot = match codec {
            Codec::H264 => &mut self.h264,
            Codec::Pcma => &mut self.pcma,
            Codec::Opus => &mut self.opus,
        };
        if let Some(previous) = slot.replace(pt) {
            if previous != pt {
                debug!(codec = %codec, previous, pt, "Rebinding payload type");
            }
        }
        true
    }

    /// Parse an rtpmap line and apply its binding.
    ///
    /// Unknown encodings are ignored; malformed lines are reported without
    /// touching the bindings.
    pub fn apply_line(&mut self, line: &str) -> Result<Option<Codec>> {
        let rtpmap = RtpMapLine::parse(line)?;
        match rtpmap.codec() {
            Some(codec) if self.bind(codec, rtpmap.payload_type) => Ok(Some(codec)),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rtpmap_lines() {
        let opus = RtpMapLine::parse("a=rtpmap:111 opus/48000/2").unwrap();
        assert_eq!(opus.payload_type, 111);
        assert_eq!(opus.codec(), Some(Codec::Opus));

        let pcma = RtpMapLine::parse("a=rtpmap:8 PCMA/8000").unwrap();
        assert_eq!(pcma.payload_type, 8);
        assert_eq!(pcma.encoding, "PCMA");
        assert_eq!(pcma.clock_rate, Some(8000));
        assert_eq!(pcma.channels, None);

        let h264 = RtpMapLine::parse("a=rtpmap:102 H264/90000").unwrap();
        assert_eq!(h264.payload_type, 102);
        assert_eq!(h264.codec(), Some(Codec::H264));
    }

    #[test]
    fn test_parse_missing_anchors() {
        // no colon
        assert!(RtpMapLine::parse("a=rtpmap 111 opus/48000").is_err());
        // no space after the payload type
        assert!(RtpMapLine::parse("a=rtpmap:111").is_err());
        // no slash
        assert!(RtpMapLine::parse("a=rtpmap:111 opus").is_err());
    }

    #[test]
    fn test_parse_invalid_payload_type() {
        assert!(RtpMapLine::parse("a=rtpmap:abc opus/48000").is_err());
        assert!(RtpMapLine::parse("a=rtpmap: 111 opus/48000").is_err());
        assert!(RtpMapLine::parse("a=rtpmap:99999999999 opus/48000").is_err());
        assert!(RtpMapLine::parse("a=rtpmap:11x opus/48000").is_ok());
    }

    #[test]
    fn test_codec_match_is_case_sensitive() {
        assert_eq!(Codec::from_encoding("opus"), Some(Codec::Opus));
        assert_eq!(Codec::from_encoding("OPUS"), None);
        assert_eq!(Codec::from_encoding("h264"), None);
        assert_eq!(Codec::from_encoding("VP8"), None);
    }

    #[test]
    fn test_bindings_default_unassigned() {
        let bindings = PayloadTypeBindings::default();
        assert_eq!(bindings.h264(), 0);
        assert_eq!(bindings.pcma(), 0);
        assert_eq!(bindings.opus(), 0);
        assert_eq!(bindings.get(Codec::Opus), None);
    }

    #[test]
    fn test_apply_lines() {
        let mut bindings = PayloadTypeBindings::default();
        assert_eq!(
            bindings.apply_line("a=rtpmap:111 opus/48000/2").unwrap(),
            Some(Codec::Opus)
        );
        assert_eq!(
            bindings.apply_line("a=rtpmap:8 PCMA/8000").unwrap(),
            Some(Codec::Pcma)
        );
        assert_eq!(
            bindings.apply_line("a=rtpmap:102 H264/90000").unwrap(),
            Some(Codec::H264)
        );
        assert_eq!(bindings.opus(), 111);
        assert_eq!(bindings.pcma(), 8);
        assert_eq!(bindings.h264(), 102);
    }

    #[test]
    fn test_h264_static_range_is_ignored() {
        let mut bindings = PayloadTypeBindings::default();
        assert_eq!(bindings.apply_line("a=rtpmap:50 H264/90000").unwrap(), None);
        assert_eq!(bindings.h264(), 0);

        bindings.apply_line("a=rtpmap:96 H264/90000").unwrap();
        bindings.apply_line("a=rtpmap:95 H264/90000").unwrap();
        assert_eq!(bindings.h264(), 96);
    }

    #[test]
    fn test_audio_codecs_accept_any_payload_type() {
        let mut bindings = PayloadTypeBindings::default();
        assert_eq!(
            bindings.apply_line("a=rtpmap:200 opus/48000/2").unwrap(),
            Some(Codec::Opus)
        );
        bindings.apply_line("a=rtpmap:300 PCMA/8000").unwrap();
        bindings.apply_line("a=rtpmap:128 H264/90000").unwrap();
        assert_eq!(bindings.opus(), 200);
        assert_eq!(bindings.pcma(), 300);
        assert_eq!(bindings.h264(), 128);
    }

    #[test]
    fn test_last_binding_wins() {
        let mut bindings = PayloadTypeBindings::default();
        bindings.apply_line("a=rtpmap:96 H264/90000").unwrap();
        bindings.apply_line("a=rtpmap:102 H264/90000").unwrap();
        assert_eq!(bindings.h264(), 102);
    }

    #[test]
    fn test_unknown_codec_and_malformed_lines() {
        let mut bindings = PayloadTypeBindings::default();
        assert_eq!(bindings.apply_line("a=rtpmap:97 VP8/90000").unwrap(), None);
        assert!(bindings.apply_line("a=rtpmap:111 opus").is_err());
        assert_eq!(bindings, PayloadTypeBindings::default());
    }
}
