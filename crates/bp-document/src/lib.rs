//! Blueprint Document Normalizer
//!
//! Checks AI-generated blueprint documents for structural minimums and
//! repairs missing or invalid presentation tags.
//!
//! # Core Concepts
//!
//! - [`validate_blueprint_structure`]: fails with a coded [`BlueprintError`]
//! - [`normalize_blueprint_structure`]: pure, infallible tag repair
//! - [`InferenceRule`]: ordered, data-driven display type inference
//! - [`prepare_blueprint`]: raw model text → validated, normalized document
//!
//! # Example
//!
//! ```rust
//! use bp_document::{normalize_blueprint_structure, validate_blueprint_structure};
//! use serde_json::json;
//!
//! let doc = json!({
//!     "metadata": {
//!         "title": "Plan",
//!         "organization": "Acme",
//!         "role": "Engineer",
//!         "generated_at": "2026-01-01T00:00:00Z"
//!     },
//!     "roadmap": { "phases": [{ "phase": "One", "start_date": "2026-02-01" }] }
//! });
//!
//! assert!(validate_blueprint_structure(&doc).is_ok());
//! let normalized = normalize_blueprint_structure(&doc);
//! assert_eq!(normalized["roadmap"]["displayType"], "timeline");
//! ```

#![warn(missing_docs)]

pub mod display;
pub mod error;
pub mod inference;
pub mod normalizer;

// Re-exports
pub use display::{DisplayType, DISPLAY_TYPE_KEY};
pub use error::{BlueprintError, ErrorCode};
pub use inference::{default_rules, infer_display_type, key_words, InferenceRule};
pub use normalizer::{
    normalize_blueprint_structure, parse_blueprint, prepare_blueprint,
    validate_blueprint_structure, BlueprintNormalizer, PreparedBlueprint, StructureReport,
    METADATA_KEY, REQUIRED_METADATA_FIELDS,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
