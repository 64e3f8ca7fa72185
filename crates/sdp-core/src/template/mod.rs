//! Media section templates
//!
//! A template writes a fixed sequence of attribute lines, substituting its
//! own fields. Only the data-channel section is built by default; the
//! per-codec audio/video sections are compiled with the `media-templates`
//! feature.

mod datachannel;
#[cfg(feature = "media-templates")]
pub mod media;

pub use datachannel::DataChannelSection;
#[cfg(feature = "media-templates")]
pub use media::{H264VideoSection, OpusAudioSection, PcmaAudioSection, TransceiverDirection};

use crate::content::{LineTerminator, SdpContent};
use crate::error::Result;

/// A fixed sequence of SDP lines
pub trait SectionTemplate {
    /// Write every line of the section to `content`, stopping at the first
    /// failure
    fn write_to(&self, content: &mut SdpContent, terminator: LineTerminator) -> Result<()>;
}
