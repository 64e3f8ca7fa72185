//! SDP line splitting
//!
//! SDP lines are separated by CRLF. The splitter borrows from the input and
//! stops after a fixed number of lines.

use tracing::debug;

/// SDP line separator
pub const CRLF: &str = "\r\n";

/// Split raw SDP text into lines, keeping at most `max_lines` of them.
///
/// A trailing CRLF does not produce an empty final line, and empty input
/// yields no lines. Lines past the cap are discarded.
///
/// # Examples
///
/// ```
/// use peer_sdp_core::lines::split_lines;
///
/// let lines = split_lines("v=0\r\ns=-\r\n", 512);
/// assert_eq!(lines, vec!["v=0", "s=-"]);
///
/// let capped = split_lines("a=1\r\na=2\r\na=3", 2);
/// assert_eq!(capped, vec!["a=1", "a=2"]);
/// ```
pub fn split_lines(text: &str, max_lines: usize) -> Vec<&str> {
    let lines: Vec<&str> = text.split_terminator(CRLF).take(max_lines).collect();

    if lines.len() == max_lines && text.split_terminator(CRLF).nth(max_lines).is_some() {
        debug!(max_lines, "Discarding SDP lines past the line cap");
    }

    lines
}
