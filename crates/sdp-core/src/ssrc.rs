//! SSRC lookup
//!
//! Finds the first `ssrc:` value following a media marker. Only the first
//! matching block's first SSRC is reported.

/// SSRC returned when no value is found
pub const SSRC_NOT_FOUND: u32 = 0;

const SSRC_ANCHOR: &str = "ssrc:";

/// Locate the SSRC for a media type in SDP text.
///
/// Searches for the first occurrence of `media_marker` (e.g. `"audio"`),
/// then for the first `ssrc:` after it, and parses the decimal number that
/// follows. Returns [`SSRC_NOT_FOUND`] when either anchor is missing or no
/// number follows.
///
/// # Examples
///
/// ```
/// use peer_sdp_core::ssrc::find_ssrc;
///
/// let sdp = "m=audio 9 UDP/TLS/RTP/SAVPF 111\r\na=ssrc:12345 cname:x\r\n";
/// assert_eq!(find_ssrc("audio", sdp), 12345);
/// assert_eq!(find_ssrc("video", sdp), 0);
/// ```
pub fn find_ssrc(media_marker: &str, sdp: &str) -> u32 {
    let Some(media_start) = sdp.find(media_marker) else {
        return SSRC_NOT_FOUND;
    };
    let after_media = &sdp[media_start..];

    let Some(anchor) = after_media.find(SSRC_ANCHOR) else {
        return SSRC_NOT_FOUND;
    };
    let value = &after_media[anchor + SSRC_ANCHOR.len()..];

    let digits_end = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());

    value[..digits_end].parse().unwrap_or(SSRC_NOT_FOUND)
}
