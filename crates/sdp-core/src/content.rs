//! Accumulated SDP content
//!
//! [`SdpContent`] is the append-only text buffer of a session description.
//! Lines are formatted first, then checked for the `=` delimiter, for line
//! breaks and for both size limits. A rejected append leaves the buffer untouched.
//!
//! ```rust
//! use peer_sdp_core::content::{LineTerminator, SdpContent};
//!
//! let mut content = SdpContent::new(1024, 256);
//! content.append_newline(format_args!("a=mid:{}", 0)).unwrap();
//! content.append_escaped("a=setup:passive").unwrap();
//! assert!(content.append_newline("not-an-attribute").is_err());
//!
//! assert_eq!(content.as_str(), "a=mid:0\r\na=setup:passive\\r\\n");
//! assert_eq!(LineTerminator::Escaped.as_str().len(), 4);
//! ```

use std::fmt;

use crate::error::{Error, Resource, Result};

/// Line terminator written after each appended attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineTerminator {
    /// A real CRLF, for negotiation-ready SDP
    Crlf,
    /// The four characters `\r\n`, for embedding in a string literal
    Escaped,
}

impl LineTerminator {
    /// The terminator text
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Crlf => "\r\n",
            Self::Escaped => "\\r\\n",
        }
    }
}

/// Bounded SDP text buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdpContent {
    buf: String,
    max_size: usize,
    max_line_len: usize,
}

impl SdpContent {
    /// Create an empty buffer bounded to `max_size` bytes, with attributes of
    /// at most `max_line_len` bytes
    pub fn new(max_size: usize, max_line_len: usize) -> Self {
        Self {
            buf: String::new(),
            max_size,
            max_line_len,
        }
    }

    /// Append an attribute followed by CRLF
    pub fn append_newline(&mut self, attribute: impl fmt::Display) -> Result<()> {
        self.append(attribute, LineTerminator::Crlf)
    }

    /// Append an attribute followed by the escaped `\r\n` sequence
    pub fn append_escaped(&mut self, attribute: impl fmt::Display) -> Result<()> {
        self.append(attribute, LineTerminator::Escaped)
    }

    /// Format `attribute`, validate it and append it with `terminator`
    pub fn append(&mut self, attribute: impl fmt::Display, terminator: LineTerminator) -> Result<()> {
        let line = attribute.to_string();
        if !line.contains('=') {
            return Err(Error::MissingDelimiter { line });
        }
        if line.contains(['\r', '\n']) {
            return Err(Error::EmbeddedLineBreak { line });
        }

        if line.len() > self.max_line_len {
            return Err(Error::capacity_exceeded(Resource::Line, self.max_line_len, line.len()));
        }

        let terminator = terminator.as_str();
        let requested = self.buf.len() + line.len() + terminator.len();
        if requested > self.max_size {
            return Err(Error::capacity_exceeded(Resource::Content, self.max_size, requested));
        }

        self.buf.push_str(&line);
        self.buf.push_str(terminator);
        Ok(())
    }

    /// The accumulated text
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    /// Length of the accumulated text in bytes
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether nothing has been appended
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Bytes still available
    pub fn remaining(&self) -> usize {
        self.max_size - self.buf.len()
    }

    /// Consume the buffer and return its text
    pub fn into_string(self) -> String {
        self.buf
    }
}

impl fmt::Display for SdpContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.buf)
    }
}

impl AsRef<str> for SdpContent {
    fn as_ref(&self) -> &str {
        &self.buf
    }
}
