//! Blueprint Answer Reconciler
//!
//! Reconciles submitted questionnaire answers with the *current* question
//! schema. Options may have been regenerated since an answer was captured,
//! so every selection answer walks a per-answer state machine before it is
//! validated:
//!
//! ```text
//! Exact → Normalized → Fuzzy → Boolean → Preserved → Rejected
//! ```
//!
//! # Core Concepts
//!
//! - [`OptionMatcher`]: strategy chain mapping a raw string to an option
//! - [`Sanitized`] / [`Resolution`]: the state an answer ended in
//! - [`AnswerReconciler`]: partial (autosave) and complete (submission)
//!   validation, completion assessment
//! - [`ReconcileConfig`]: matching and reporting knobs
//!
//! # Example
//!
//! ```rust
//! use bp_answers::{validate_complete_answers, AnswerMap};
//! use bp_schema::{InputKind, Question, QuestionOption, Section};
//! use serde_json::json;
//!
//! let sections = vec![Section::new(
//!     "goals",
//!     "Goals",
//!     vec![Question::new("priorities", "Priorities", InputKind::MultiSelect)
//!         .required()
//!         .with_options([
//!             QuestionOption::new("quality", "Quality"),
//!             QuestionOption::new("speed", "Speed"),
//!         ])],
//! )];
//!
//! let mut answers = AnswerMap::new();
//! answers.insert("priorities".into(), json!(["Quality", "SPEED"]));
//!
//! let result = validate_complete_answers(&answers, &sections, true);
//! assert!(result.valid);
//! assert_eq!(result.sanitized_answers["priorities"], json!(["quality", "speed"]));
//! ```

#![warn(missing_docs)]

pub mod completion;
pub mod config;
pub mod error;
pub mod matcher;
pub mod reconcile;
pub mod sanitize;

// Re-exports
pub use completion::{CompletionReport, DynamicAnswerReview};
pub use config::{ReconcileConfig, DEFAULT_LOW_COMPLETION_THRESHOLD};
pub use error::ConfigError;
pub use matcher::{MatchConfidence, MatchMode, OptionMatcher};
pub use reconcile::{
    sanitize_answers, validate_complete_answers, validate_partial_answers, AnswerMap,
    AnswerReconciler, CompleteValidation, ErrorMap, PartialValidation,
};
pub use sanitize::{sanitize_value, Resolution, Sanitized};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for answer reconciliation
    pub use crate::{
        validate_complete_answers, validate_partial_answers, AnswerMap, AnswerReconciler,
        ReconcileConfig, Resolution, Sanitized,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
