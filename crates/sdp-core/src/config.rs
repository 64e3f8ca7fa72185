//! Configuration for session description parsing
//!
//! [`SdpConfig`] carries the resource limits and the mDNS behaviour of a
//! [`SessionDescription`](crate::SessionDescription). It is fixed at
//! construction time; a parse pass never changes it.
//!
//! ```rust
//! use peer_sdp_core::{LocalCandidatePolicy, SdpConfig};
//!
//! let config = SdpConfig::default()
//!     .with_mdns(true)
//!     .with_local_candidate_policy(LocalCandidatePolicy::PassThrough);
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::{MAX_CONTENT_SIZE, MAX_LINES, MAX_LINE_LEN, MAX_MEDIA_SECTIONS};
use crate::error::{Error, Result};

/// What happens to local (mDNS) candidate lines when rewriting is disabled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LocalCandidatePolicy {
    /// Omit the candidate from the rebuilt content
    #[default]
    Drop,
    /// Copy the candidate line unchanged
    PassThrough,
}

/// Session description configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SdpConfig {
    /// Rewrite mDNS hostnames in local candidates with resolved IPv4 addresses
    pub mdns_enabled: bool,

    /// Handling of local candidates while `mdns_enabled` is false
    pub local_candidate_policy: LocalCandidatePolicy,

    /// Maximum number of media sections
    pub max_media_sections: usize,

    /// Maximum size of the content buffer in bytes, terminators included
    pub max_content_size: usize,

    /// Maximum number of lines read from the input
    pub max_lines: usize,

    /// Maximum length of one formatted attribute in bytes, terminator excluded
    pub max_line_len: usize,
}

impl Default for SdpConfig {
    fn default() -> Self {
        Self {
            mdns_enabled: false,
            local_candidate_policy: LocalCandidatePolicy::Drop,
            max_media_sections: MAX_MEDIA_SECTIONS,
            max_content_size: MAX_CONTENT_SIZE,
            max_lines: MAX_LINES,
            max_line_len: MAX_LINE_LEN,
        }
    }
}

impl SdpConfig {
    /// Enable or disable mDNS candidate rewriting
    pub fn with_mdns(mut self, enabled: bool) -> Self {
        self.mdns_enabled = enabled;
        self
    }

    /// Set the policy for local candidates when rewriting is disabled
    pub fn with_local_candidate_policy(mut self, policy: LocalCandidatePolicy) -> Self {
        self.local_candidate_policy = policy;
        self
    }

    /// Set the media-section bound
    pub fn with_max_media_sections(mut self, max: usize) -> Self {
        self.max_media_sections = max;
        self
    }

    /// Set the content buffer bound
    pub fn with_max_content_size(mut self, max: usize) -> Self {
        self.max_content_size = max;
        self
    }

    /// Set the input line cap
    pub fn with_max_lines(mut self, max: usize) -> Self {
        self.max_lines = max;
        self
    }

    /// Set the attribute length bound
    pub fn with_max_line_len(mut self, max: usize) -> Self {
        self.max_line_len = max;
        self
    }

    /// Check that the limits are usable
    pub fn validate(&self) -> Result<()> {
        if self.max_media_sections == 0 {
            return Err(Error::invalid_config("max_media_sections must be greater than 0"));
        }
        if self.max_content_size == 0 {
            return Err(Error::invalid_config("max_content_size must be greater than 0"));
        }
        if self.max_lines == 0 {
            return Err(Error::invalid_config("max_lines must be greater than 0"));
        }
        if self.max_line_len == 0 {
            return Err(Error::invalid_config("max_line_len must be greater than 0"));
        }
        if self.max_line_len > self.max_content_size {
            return Err(Error::invalid_config(format!(
                "max_line_len ({}) exceeds max_content_size ({})",
                self.max_line_len, self.max_content_size
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SdpConfig::default();
        assert!(!config.mdns_enabled);
        assert_eq!(config.local_candidate_policy, LocalCandidatePolicy::Drop);
        assert_eq!(config.max_media_sections, MAX_MEDIA_SECTIONS);
        assert_eq!(config.max_content_size, MAX_CONTENT_SIZE);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_limits() {
        assert!(SdpConfig::default().with_max_media_sections(0).validate().is_err());
        assert!(SdpConfig::default().with_max_content_size(0).validate().is_err());
        assert!(SdpConfig::default().with_max_lines(0).validate().is_err());
        assert!(SdpConfig::default().with_max_line_len(0).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_line_larger_than_content() {
        let config = SdpConfig::default()
            .with_max_content_size(100)
            .with_max_line_len(200);
        assert!(matches!(config.validate(), Err(Error::InvalidConfig { .. })));
    }

    #[test]
    fn test_deserialize_partial_config() {
        let json = r#"{ "mdns_enabled": true, "local_candidate_policy": "pass-through" }"#;
        let config: SdpConfig = serde_json::from_str(json).unwrap();
        assert!(config.mdns_enabled);
        assert_eq!(config.local_candidate_policy, LocalCandidatePolicy::PassThrough);
        assert_eq!(config.max_lines, MAX_LINES);
    }
}
