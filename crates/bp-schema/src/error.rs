//! Error types for the schema layer
//!
//! Two families:
//! - [`SchemaError`]: a question definition the validator cannot be built from
//! - [`ValidationFailure`]: an answer that violates its question's constraints

use crate::question::RuleKind;
use serde::Serialize;
use std::fmt;

/// Malformed question definitions
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaError {
    /// Question id is empty
    #[error("question id must not be empty")]
    EmptyId,

    /// Selection question has no options
    #[error("question '{question_id}' is a selection question without options")]
    MissingOptions { question_id: String },

    /// Bounds with min > max
    #[error("question '{question_id}' has inverted {which} bounds")]
    InvertedBounds {
        question_id: String,
        which: &'static str,
    },

    /// Custom rule with a missing or unusable argument
    #[error("question '{question_id}' has an invalid {kind:?} rule: {reason}")]
    InvalidRule {
        question_id: String,
        kind: RuleKind,
        reason: String,
    },

    /// Section without questions
    #[error("section '{section_id}' has no questions")]
    EmptySection { section_id: String },

    /// Same question id used twice
    #[error("question id '{question_id}' is used more than once")]
    DuplicateQuestionId { question_id: String },

    /// Same option value used twice within a question
    #[error("question '{question_id}' repeats option value '{value}'")]
    DuplicateOptionValue { question_id: String, value: String },
}

impl SchemaError {
    /// Question the error belongs to, if any
    #[must_use]
    pub fn question_id(&self) -> Option<&str> {
        match self {
            Self::MissingOptions { question_id }
            | Self::InvertedBounds { question_id, .. }
            | Self::InvalidRule { question_id, .. }
            | Self::DuplicateQuestionId { question_id }
            | Self::DuplicateOptionValue { question_id, .. } => Some(question_id),
            Self::EmptyId | Self::EmptySection { .. } => None,
        }
    }
}

/// Which constraint an answer violated
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ViolationKind {
    /// Required answer missing
    Required,
    /// Required multi-select answered with `[]`
    EmptySelection,
    /// Wrong JSON shape for the input kind
    TypeMismatch { expected: &'static str },
    /// Value not among the allowed options
    NotAnOption { value: String },
    /// Text shorter than allowed
    TooShort { min: usize, actual: usize },
    /// Text longer than allowed
    TooLong { max: usize, actual: usize },
    /// Fewer selections than allowed
    TooFewSelections { min: usize, actual: usize },
    /// More selections than allowed
    TooManySelections { max: usize, actual: usize },
    /// Number below the lower bound
    BelowMinimum { min: f64, actual: f64 },
    /// Number above the upper bound
    AboveMaximum { max: f64, actual: f64 },
    /// Scale answer with a fractional part
    NotAnInteger { actual: f64 },
    /// Date string that does not parse
    InvalidDate { value: String },
    /// Malformed email address
    InvalidEmail,
    /// Malformed or non-http(s) URL
    InvalidUrl,
    /// Custom pattern did not match
    PatternMismatch { pattern: String },
}

/// One violated constraint with its user-facing message
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    /// Constraint detail
    #[serde(flatten)]
    pub kind: ViolationKind,
    /// Declared message, or the default for the kind
    pub message: String,
}

impl Violation {
    /// Build with the declared message when present
    #[must_use]
    pub fn new(kind: ViolationKind, declared: Option<&str>) -> Self {
        let message = declared.map_or_else(|| default_message(&kind), str::to_string);
        Self { kind, message }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

fn default_message(kind: &ViolationKind) -> String {
    match kind {
        ViolationKind::Required => "This field is required".to_string(),
        ViolationKind::EmptySelection => "Please select at least one option".to_string(),
        ViolationKind::TypeMismatch { expected } => format!("Expected {expected}"),
        ViolationKind::NotAnOption { value } => format!("{value} is not a valid option"),
        ViolationKind::TooShort { min, .. } => format!("Must be at least {min} characters"),
        ViolationKind::TooLong { max, .. } => format!("Must be at most {max} characters"),
        ViolationKind::TooFewSelections { min, .. } => format!("Select at least {min} options"),
        ViolationKind::TooManySelections { max, .. } => format!("Select at most {max} options"),
        ViolationKind::BelowMinimum { min, .. } => format!("Must be at least {min}"),
        ViolationKind::AboveMaximum { max, .. } => format!("Must be at most {max}"),
        ViolationKind::NotAnInteger { .. } => "Must be a whole number".to_string(),
        ViolationKind::InvalidDate { value } => format!("{value} is not a valid date"),
        ViolationKind::InvalidEmail => "Please enter a valid email address".to_string(),
        ViolationKind::InvalidUrl => "Please enter a valid URL".to_string(),
        ViolationKind::PatternMismatch { .. } => "Invalid format".to_string(),
    }
}

/// All constraints an answer violated
///
/// `Display` joins the messages, so a question with several violations
/// yields one combined message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationFailure {
    /// Violations in check order, never empty
    pub violations: Vec<Violation>,
}

impl ValidationFailure {
    /// Failure with a single violation
    #[must_use]
    pub fn single(violation: Violation) -> Self {
        Self {
            violations: vec![violation],
        }
    }

    /// Combined user-facing message
    #[must_use]
    pub fn message(&self) -> String {
        self.violations
            .iter()
            .map(|v| v.message.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Whether the only problem is a missing answer
    #[must_use]
    pub fn is_missing(&self) -> bool {
        self.violations.iter().all(|v| {
            matches!(
                v.kind,
                ViolationKind::Required | ViolationKind::EmptySelection
            )
        })
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for ValidationFailure {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_error_display() {
        let err = SchemaError::MissingOptions {
            question_id: "q1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "question 'q1' is a selection question without options"
        );
        assert_eq!(err.question_id(), Some("q1"));
        assert_eq!(SchemaError::EmptyId.question_id(), None);
    }

    #[test]
    fn declared_message_wins() {
        let v = Violation::new(
            ViolationKind::TooLong { max: 3, actual: 5 },
            Some("Keep it short"),
        );
        assert_eq!(v.message, "Keep it short");

        let v = Violation::new(ViolationKind::TooLong { max: 3, actual: 5 }, None);
        assert_eq!(v.message, "Must be at most 3 characters");
    }

    #[test]
    fn failure_combines_messages() {
        let failure = ValidationFailure {
            violations: vec![
                Violation::new(
                    ViolationKind::NotAnOption {
                        value: "blue".to_string(),
                    },
                    None,
                ),
                Violation::new(ViolationKind::TooLong { max: 1, actual: 2 }, Some("One only")),
            ],
        };
        assert_eq!(failure.to_string(), "blue is not a valid option; One only");
        assert!(!failure.is_missing());
    }

    #[test]
    fn violation_serializes_with_kind_tag() {
        let v = Violation::new(ViolationKind::InvalidEmail, None);
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["kind"], "invalidEmail");
        assert_eq!(json["message"], "Please enter a valid email address");
    }
}
