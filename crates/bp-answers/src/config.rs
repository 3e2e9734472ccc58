//! Reconciler configuration
//!
//! Every knob has a default, so an empty JSON object or YAML document is a
//! valid configuration.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Completion rate below which dynamic answers are flagged as sparse
///
/// A business rule rather than a derived limit; override it through
/// [`ReconcileConfig::with_low_completion_threshold`].
pub const DEFAULT_LOW_COMPLETION_THRESHOLD: f64 = 0.5;

/// Tuning for matching and error reporting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReconcileConfig {
    /// Raw single-select values must be longer than this for substring matching
    pub substring_min_len: usize,
    /// How many current option labels an error message lists
    pub option_preview_limit: usize,
    /// Character budget for the preview of a lost answer
    pub lost_value_preview_chars: usize,
    /// Fraction of answered questions under which completion is "low"
    pub low_completion_threshold: f64,
}

impl ReconcileConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With substring threshold
    #[inline]
    #[must_use]
    pub fn with_substring_min_len(mut self, len: usize) -> Self {
        self.substring_min_len = len;
        self
    }

    /// With option preview limit
    #[inline]
    #[must_use]
    pub fn with_option_preview_limit(mut self, limit: usize) -> Self {
        self.option_preview_limit = limit;
        self
    }

    /// With lost-value preview budget
    #[inline]
    #[must_use]
    pub fn with_lost_value_preview_chars(mut self, chars: usize) -> Self {
        self.lost_value_preview_chars = chars;
        self
    }

    /// With completion threshold
    #[inline]
    #[must_use]
    pub fn with_low_completion_threshold(mut self, threshold: f64) -> Self {
        self.low_completion_threshold = threshold;
        self
    }

    /// Check value ranges
    ///
    /// # Errors
    /// Returns [`ConfigError::OutOfRange`] if the completion threshold is not
    /// within `[0, 1]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.low_completion_threshold) {
            return Err(ConfigError::OutOfRange {
                field: "lowCompletionThreshold",
                value: self.low_completion_threshold,
            });
        }
        Ok(())
    }

    /// Parse and validate from JSON
    ///
    /// # Errors
    /// Returns error if JSON is invalid or a value is out of range
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(ConfigError::InvalidJson)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate from YAML
    ///
    /// # Errors
    /// Returns error if YAML is invalid or a value is out of range
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml).map_err(ConfigError::InvalidYaml)?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            substring_min_len: 3,
            option_preview_limit: 5,
            lost_value_preview_chars: 80,
            low_completion_threshold: DEFAULT_LOW_COMPLETION_THRESHOLD,
        }
    }
}
