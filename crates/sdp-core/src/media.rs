//! Media section extraction
//!
//! Media sections are recognized from their `m=` line and recorded in order
//! of appearance. The position of a section in [`MediaSections`] is its media
//! index, which negotiation code uses as the `mid`.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Resource, Result};

/// Kind of a media section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// `m=audio`
    Audio,
    /// `m=video`
    Video,
    /// `m=application`, an SCTP data channel
    DataChannel,
}

impl MediaKind {
    /// All kinds, in detection order
    pub const ALL: [MediaKind; 3] = [MediaKind::Audio, MediaKind::Video, MediaKind::DataChannel];

    /// The media token used on the `m=` line
    pub fn marker(&self) -> &'static str {
        match self {
            Self::Audio => "audio",
            Self::Video => "video",
            Self::DataChannel => "application",
        }
    }

    /// The `m=` line prefix that opens a section of this kind
    pub fn line_prefix(&self) -> &'static str {
        match self {
            Self::Audio => "m=audio",
            Self::Video => "m=video",
            Self::DataChannel => "m=application",
        }
    }

    /// Detect the media kind opened by `line`, if any
    pub fn from_line(line: &str) -> Option<MediaKind> {
        Self::ALL
            .into_iter()
            .find(|kind| line.starts_with(kind.line_prefix()))
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Audio => write!(f, "audio"),
            Self::Video => write!(f, "video"),
            Self::DataChannel => write!(f, "datachannel"),
        }
    }
}

/// Ordered, bounded list of media sections
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MediaSections {
    #[serde(skip)]
    capacity: usize,
    sections: Vec<MediaKind>,
}

impl MediaSections {
    /// Create an empty list holding at most `capacity` sections
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            sections: Vec::with_capacity(capacity),
        }
    }

    /// Append a section and return its media index
    pub fn push(&mut self, kind: MediaKind) -> Result<usize> {
        if self.sections.len() >= self.capacity {
            return Err(Error::capacity_exceeded(
                Resource::MediaSections,
                self.capacity,
                self.sections.len() + 1,
            ));
        }
        let mid = self.sections.len();
        self.sections.push(kind);
        Ok(mid)
    }

    /// Record the section opened by `line`, if it is an `m=` line we track
    pub fn observe_line(&mut self, line: &str) -> Result<Option<(usize, MediaKind)>> {
        let Some(kind) = MediaKind::from_line(line) else {
            return Ok(None);
        };
        let mid = self.push(kind)?;
        debug!(kind = %kind, mid, "Found media description");
        Ok(Some((mid, kind)))
    }

    /// The sections in order of appearance
    pub fn as_slice(&self) -> &[MediaKind] {
        &self.sections
    }

    /// Number of sections
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Whether no section has been recorded
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Maximum number of sections
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Media index of the first section of `kind`
    pub fn position(&self, kind: MediaKind) -> Option<usize> {
        self.sections.iter().position(|k| *k == kind)
    }

    /// Iterate over the sections
    pub fn iter(&self) -> std::slice::Iter<'_, MediaKind> {
        self.sections.iter()
    }
}

impl<'a> IntoIterator for &'a MediaSections {
    type Item = &'a MediaKind;
    type IntoIter = std::slice::Iter<'a, MediaKind>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
