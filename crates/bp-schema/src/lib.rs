//! Blueprint Question Schema
//!
//! Typed model of AI-generated questionnaires and the per-question
//! validators built from it.
//!
//! # Core Concepts
//!
//! - [`Question`], [`QuestionOption`], [`Section`]: the generated schema
//! - [`build_validator`]: question → [`Validator`] (the Schema Builder)
//! - [`generate_standard_option_value`] / [`normalize_option_value`]:
//!   canonical lowercase-hyphenated option values
//! - [`looks_like_option_token`]: the shared "canonical token" predicate
//!
//! # Example
//!
//! ```rust
//! use bp_schema::{build_validator, Bounds, InputKind, Question};
//! use serde_json::json;
//!
//! let question = Question::new("hours", "Hours per week", InputKind::Number)
//!     .required()
//!     .with_numeric_bounds(Bounds::new(Some(1.0), Some(40.0)).with_message("Between 1 and 40"));
//!
//! let validator = build_validator(&question).unwrap();
//! assert!(validator.validate(&json!(10)).is_ok());
//! assert_eq!(validator.validate(&json!(80)).unwrap_err().message(), "Between 1 and 40");
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod option_value;
pub mod question;
pub mod validator;

// Re-exports
pub use error::{SchemaError, ValidationFailure, Violation, ViolationKind};
pub use option_value::{
    generate_standard_option_value, is_standard_option_value, looks_like_option_token,
    normalize_option_value, normalize_question_options, FALLBACK_OPTION_VALUE,
};
pub use question::{
    Bounds, InputKind, Question, QuestionOption, Questionnaire, Rule, RuleKind, Section,
};
pub use validator::{build_validator, check_questionnaire, is_blank, Shape, Validator};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for schema operations
    pub use crate::{
        build_validator, looks_like_option_token, Bounds, InputKind, Question, QuestionOption,
        Section, ValidationFailure, Validator,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
