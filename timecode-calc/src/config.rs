//! Calculator configuration.

use crate::error::{CalcError, Result};
use serde::{Deserialize, Serialize};
use timecode_core::FrameRate;

/// Settings for a [`Calculator`](crate::Calculator).
///
/// Deserializes from partial documents; missing keys take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalcConfig {
    /// Rate used for every atom in the expression.
    pub frame_rate: FrameRate,
    /// Maximum parenthesis nesting.
    pub max_depth: usize,
    /// Maximum number of tokens in one expression.
    pub max_tokens: usize,
}

impl Default for CalcConfig {
    fn default() -> Self {
        Self {
            frame_rate: FrameRate::default(),
            max_depth: 32,
            max_tokens: 1024,
        }
    }
}

impl CalcConfig {
    /// Set the frame rate.
    pub fn with_frame_rate(mut self, frame_rate: FrameRate) -> Self {
        self.frame_rate = frame_rate;
        self
    }

    /// Set the maximum nesting depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the maximum token count.
    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(CalcError::Config("max_depth must be at least 1".into()));
        }
        if self.max_tokens == 0 {
            return Err(CalcError::Config("max_tokens must be at least 1".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = CalcConfig::default();
        assert_eq!(config.frame_rate, FrameRate::PAL);
        assert_eq!(config.max_depth, 32);
        assert_eq!(config.max_tokens, 1024);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = CalcConfig::default()
            .with_frame_rate(FrameRate::FPS30)
            .with_max_depth(4)
            .with_max_tokens(16);
        assert_eq!(config.frame_rate, FrameRate::FPS30);
        assert_eq!(config.max_depth, 4);
        assert_eq!(config.max_tokens, 16);
    }

    #[test]
    fn test_validation() {
        assert!(CalcConfig::default().with_max_depth(0).validate().is_err());
        assert!(CalcConfig::default().with_max_tokens(0).validate().is_err());
    }

    #[test]
    fn test_partial_json() {
        let config: CalcConfig = serde_json::from_str(r#"{ "frame_rate": 24.0 }"#).unwrap();
        assert_eq!(config.frame_rate, FrameRate::FILM);
        assert_eq!(config.max_depth, 32);

        assert!(serde_json::from_str::<CalcConfig>(r#"{ "frame_rate": 0.0 }"#).is_err());
    }
}
