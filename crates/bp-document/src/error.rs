//! Error types for blueprint validation
//!
//! Every structural defect carries a machine-readable [`ErrorCode`] so the
//! caller can decide between regenerating the document and surfacing the
//! failure.

use serde::Serialize;
use std::fmt;

/// Machine-readable failure code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Not parseable, or not a JSON object
    InvalidJson,
    /// No `metadata` object
    MissingMetadata,
    /// A required metadata field is absent or empty
    MissingMetadataField,
    /// Only metadata, nothing to render
    NoSections,
}

impl ErrorCode {
    /// Wire form of the code
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidJson => "INVALID_JSON",
            Self::MissingMetadata => "MISSING_METADATA",
            Self::MissingMetadataField => "MISSING_METADATA_FIELD",
            Self::NoSections => "NO_SECTIONS",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structural defect that makes a blueprint unusable
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BlueprintError {
    /// Raw text is not valid JSON
    #[error("blueprint is not valid JSON: {0}")]
    InvalidJson(String),

    /// Parsed, but the document is not an object
    #[error("blueprint must be a JSON object")]
    NotAnObject,

    /// No `metadata` object
    #[error("blueprint is missing its metadata object")]
    MissingMetadata,

    /// Metadata field absent, empty or not a string
    #[error("blueprint metadata is missing '{field}'")]
    MissingMetadataField { field: &'static str },

    /// Metadata without any section
    #[error("blueprint has no sections")]
    NoSections,
}

impl BlueprintError {
    /// Machine-readable code
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidJson(_) | Self::NotAnObject => ErrorCode::InvalidJson,
            Self::MissingMetadata => ErrorCode::MissingMetadata,
            Self::MissingMetadataField { .. } => ErrorCode::MissingMetadataField,
            Self::NoSections => ErrorCode::NoSections,
        }
    }
}
