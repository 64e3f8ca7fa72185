//! Error handling for SDP parsing and rewriting
//!
//! Only [`Error::CapacityExceeded`] and [`Error::InvalidConfig`] abort a
//! parse pass. The other variants describe a single line and are recovered
//! by skipping that line.

use std::fmt;
use thiserror::Error;

/// Result type alias for SDP operations
pub type Result<T> = std::result::Result<T, Error>;

/// Bounded resources owned by a session description
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    /// The accumulated content buffer
    Content,
    /// A single formatted attribute line
    Line,
    /// The media-section list
    MediaSections,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Content => write!(f, "content buffer"),
            Self::Line => write!(f, "attribute line"),
            Self::MediaSections => write!(f, "media section list"),
        }
    }
}

/// Error type for SDP operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A line is missing a delimiter required by the attribute being parsed
    #[error("Malformed {attribute} line: {line}")]
    MalformedLine {
        attribute: &'static str,
        line: String,
    },

    /// An append request lacks the `=` delimiter of an SDP line
    #[error("Rejected SDP line without '=' delimiter: {line:?}")]
    MissingDelimiter { line: String },

    /// An append request would write more than one line
    #[error("Rejected SDP line containing a line break: {line:?}")]
    EmbeddedLineBreak { line: String },

    /// The hostname resolver could not produce an IPv4 address
    #[error("Failed to resolve mDNS hostname {hostname}: {reason}")]
    ResolutionFailed { hostname: String, reason: String },

    /// Writing would exceed a configured bound
    #[error("{resource} capacity exceeded: {requested} requested, limit is {limit}")]
    CapacityExceeded {
        resource: Resource,
        limit: usize,
        requested: usize,
    },

    /// Configuration values are inconsistent
    #[error("Invalid SDP configuration: {details}")]
    InvalidConfig { details: String },
}

impl Error {
    /// Create a new malformed line error
    pub fn malformed(attribute: &'static str, line: impl Into<String>) -> Self {
        Self::MalformedLine {
            attribute,
            line: line.into(),
        }
    }

    /// Create a new resolution failure
    pub fn resolution_failed(hostname: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ResolutionFailed {
            hostname: hostname.into(),
            reason: reason.into(),
        }
    }

    /// Create a new capacity error
    pub fn capacity_exceeded(resource: Resource, limit: usize, requested: usize) -> Self {
        Self::CapacityExceeded {
            resource,
            limit,
            requested,
        }
    }

    /// Create a new invalid configuration error
    pub fn invalid_config(details: impl Into<String>) -> Self {
        Self::InvalidConfig {
            details: details.into(),
        }
    }

    /// Whether the error should abort the current negotiation attempt
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::CapacityExceeded { .. } | Self::InvalidConfig { .. })
    }
}
