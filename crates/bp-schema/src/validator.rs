//! Per-question validators
//!
//! [`build_validator`] turns a [`Question`] into a [`Validator`] at request
//! time. A validator checks the base shape selected by the input kind, then
//! layers bounds and custom rules on top. Every failure names the violated
//! constraint.
//!
//! Multi-select validators are intentionally permissive: an element that is
//! not in the live option list is still accepted when it
//! [looks like an option token](crate::looks_like_option_token), so values
//! normalized against an older option catalogue are not rejected outright.

use crate::error::{SchemaError, ValidationFailure, Violation, ViolationKind};
use crate::option_value::looks_like_option_token;
use crate::question::{Bounds, InputKind, Question, Rule, RuleKind, Section};
use chrono::{DateTime, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Number, Value};
use std::collections::HashSet;

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static regex"));

/// Base shape an answer must have
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Any string
    Text,
    /// One of the listed values
    SingleChoice(Vec<String>),
    /// Array whose elements are listed values or option-like tokens
    MultiChoice(Vec<String>),
    /// One of the listed values, or a boolean when none are listed
    Toggle(Vec<String>),
    /// Whole number
    Integer,
    /// Finite number
    Real,
    /// `YYYY-MM-DD` or RFC 3339 timestamp
    Date,
}

impl Shape {
    fn for_question(question: &Question) -> Result<Self, SchemaError> {
        let values = || -> Vec<String> { question.options.iter().map(|o| o.value.clone()).collect() };
        let require_options = || {
            if question.options.is_empty() {
                Err(SchemaError::MissingOptions {
                    question_id: question.id.clone(),
                })
            } else {
                Ok(values())
            }
        };

        Ok(match question.input_kind {
            InputKind::Text | InputKind::Textarea | InputKind::Email | InputKind::Url => {
                Self::Text
            }
            InputKind::SingleSelect => Self::SingleChoice(require_options()?),
            InputKind::MultiSelect => Self::MultiChoice(require_options()?),
            InputKind::Toggle => Self::Toggle(values()),
            InputKind::Scale => Self::Integer,
            InputKind::Slider | InputKind::Currency | InputKind::Number => Self::Real,
            InputKind::Date => Self::Date,
        })
    }
}

/// Constraint layered on top of the base shape
#[derive(Debug, Clone)]
enum Check {
    Min(f64, Option<String>),
    Max(f64, Option<String>),
    MinLength(usize, Option<String>),
    MaxLength(usize, Option<String>),
    Pattern(Regex, Option<String>),
    Email(Option<String>),
    Url(Option<String>),
}

impl Check {
    fn apply(&self, value: &Value, violations: &mut Vec<Violation>) {
        match (self, value) {
            (Self::Min(min, msg), Value::Number(n)) => {
                if let Some(actual) = n.as_f64().filter(|a| a < min) {
                    violations.push(Violation::new(
                        ViolationKind::BelowMinimum { min: *min, actual },
                        msg.as_deref(),
                    ));
                }
            }
            (Self::Max(max, msg), Value::Number(n)) => {
                if let Some(actual) = n.as_f64().filter(|a| a > max) {
                    violations.push(Violation::new(
                        ViolationKind::AboveMaximum { max: *max, actual },
                        msg.as_deref(),
                    ));
                }
            }
            (Self::MinLength(min, msg), Value::String(s)) => {
                let actual = s.chars().count();
                if actual < *min {
                    violations.push(Violation::new(
                        ViolationKind::TooShort { min: *min, actual },
                        msg.as_deref(),
                    ));
                }
            }
            (Self::MaxLength(max, msg), Value::String(s)) => {
                let actual = s.chars().count();
                if actual > *max {
                    violations.push(Violation::new(
                        ViolationKind::TooLong { max: *max, actual },
                        msg.as_deref(),
                    ));
                }
            }
            (Self::MinLength(min, msg), Value::Array(items)) => {
                if items.len() < *min {
                    violations.push(Violation::new(
                        ViolationKind::TooFewSelections {
                            min: *min,
                            actual: items.len(),
                        },
                        msg.as_deref(),
                    ));
                }
            }
            (Self::MaxLength(max, msg), Value::Array(items)) => {
                if items.len() > *max {
                    violations.push(Violation::new(
                        ViolationKind::TooManySelections {
                            max: *max,
                            actual: items.len(),
                        },
                        msg.as_deref(),
                    ));
                }
            }
            (Self::Pattern(re, msg), Value::String(s)) => {
                if !re.is_match(s) {
                    violations.push(Violation::new(
                        ViolationKind::PatternMismatch {
                            pattern: re.as_str().to_string(),
                        },
                        msg.as_deref(),
                    ));
                }
            }
            (Self::Email(msg), Value::String(s)) => {
                if !EMAIL.is_match(s.trim()) {
                    violations.push(Violation::new(ViolationKind::InvalidEmail, msg.as_deref()));
                }
            }
            (Self::Url(msg), Value::String(s)) => {
                if !is_web_url(s.trim()) {
                    violations.push(Violation::new(ViolationKind::InvalidUrl, msg.as_deref()));
                }
            }
            _ => {}
        }
    }
}

fn is_web_url(s: &str) -> bool {
    url::Url::parse(s)
        .map(|u| matches!(u.scheme(), "http" | "https") && u.host().is_some())
        .unwrap_or(false)
}

/// Whether a value counts as "not answered"
///
/// `null`, a whitespace-only string and an empty array.
#[must_use]
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Validator for a single answer value
///
/// Built by [`build_validator`]; immutable and cheap to clone.
#[derive(Debug, Clone)]
pub struct Validator {
    question_id: String,
    required: bool,
    required_message: Option<String>,
    shape: Shape,
    checks: Vec<Check>,
}

impl Validator {
    /// Question this validator was built from
    #[inline]
    #[must_use]
    pub fn question_id(&self) -> &str {
        &self.question_id
    }

    /// Whether absence is rejected
    #[inline]
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Base shape
    #[inline]
    #[must_use]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Check `value`
    ///
    /// # Returns
    /// - `Ok(value)` with numeric strings coerced to numbers and boolean
    ///   strings coerced for option-less toggles
    /// - `Err(ValidationFailure)` listing every violated constraint
    ///
    /// # Errors
    /// Returns a failure when the value is missing but required, has the
    /// wrong shape, or breaks a bound or rule.
    pub fn validate(&self, value: &Value) -> Result<Value, ValidationFailure> {
        if is_blank(value) {
            if !self.required {
                return Ok(value.clone());
            }
            let kind = if value.is_array() || matches!(self.shape, Shape::MultiChoice(_)) {
                ViolationKind::EmptySelection
            } else {
                ViolationKind::Required
            };
            return Err(ValidationFailure::single(Violation::new(
                kind,
                self.required_message.as_deref(),
            )));
        }

        let mut violations = Vec::new();
        let checked = self.check_shape(value, &mut violations);

        if let Some(v) = &checked {
            for check in &self.checks {
                check.apply(v, &mut violations);
            }
        }

        if violations.is_empty() {
            Ok(checked.unwrap_or_else(|| value.clone()))
        } else {
            Err(ValidationFailure { violations })
        }
    }

    /// Base shape check; `None` when layered checks would be meaningless
    fn check_shape(&self, value: &Value, violations: &mut Vec<Violation>) -> Option<Value> {
        let mismatch = |expected: &'static str, violations: &mut Vec<Violation>| {
            violations.push(Violation::new(ViolationKind::TypeMismatch { expected }, None));
            None
        };

        match &self.shape {
            Shape::Text => match value {
                Value::String(_) => Some(value.clone()),
                _ => mismatch("text", violations),
            },
            Shape::SingleChoice(allowed) => match value {
                Value::String(s) if allowed.contains(s) => Some(value.clone()),
                Value::String(s) => {
                    violations.push(not_an_option(s));
                    None
                }
                _ => mismatch("a single option", violations),
            },
            Shape::Toggle(allowed) if allowed.is_empty() => match value {
                Value::Bool(_) => Some(value.clone()),
                Value::String(s) => match s.trim() {
                    "true" => Some(Value::Bool(true)),
                    "false" => Some(Value::Bool(false)),
                    _ => mismatch("true or false", violations),
                },
                _ => mismatch("true or false", violations),
            },
            Shape::Toggle(allowed) => match value {
                Value::String(s) if allowed.contains(s) => Some(value.clone()),
                Value::String(s) => {
                    violations.push(not_an_option(s));
                    None
                }
                _ => mismatch("a single option", violations),
            },
            Shape::MultiChoice(allowed) => match value {
                Value::Array(items) => {
                    for item in items {
                        match item {
                            Value::String(s)
                                if allowed.contains(s) || looks_like_option_token(s) => {}
                            Value::String(s) => violations.push(not_an_option(s)),
                            other => violations.push(not_an_option(&other.to_string())),
                        }
                    }
                    Some(value.clone())
                }
                _ => mismatch("a list of options", violations),
            },
            Shape::Integer => match as_number(value) {
                Some(n) if n.fract() != 0.0 => {
                    violations.push(Violation::new(ViolationKind::NotAnInteger { actual: n }, None));
                    None
                }
                Some(n) => Some(number_value(value, n)),
                None => mismatch("a whole number", violations),
            },
            Shape::Real => match as_number(value) {
                Some(n) => Some(number_value(value, n)),
                None => mismatch("a number", violations),
            },
            Shape::Date => match value {
                Value::String(s) if is_iso_date(s.trim()) => Some(value.clone()),
                Value::String(s) => {
                    violations.push(Violation::new(
                        ViolationKind::InvalidDate { value: s.clone() },
                        None,
                    ));
                    None
                }
                _ => mismatch("a date", violations),
            },
        }
    }
}

fn not_an_option(value: &str) -> Violation {
    Violation::new(
        ViolationKind::NotAnOption {
            value: value.to_string(),
        },
        None,
    )
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| n.is_finite())
}

/// Keep JSON numbers as sent; coerce numeric strings
#[allow(clippy::cast_possible_truncation)]
fn number_value(original: &Value, n: f64) -> Value {
    if original.is_number() {
        return original.clone();
    }
    if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
        return Value::from(n as i64);
    }
    Number::from_f64(n).map_or_else(|| original.clone(), Value::Number)
}

fn is_iso_date(s: &str) -> bool {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok() || DateTime::parse_from_rfc3339(s).is_ok()
}

/// Build the validator for one question
///
/// # Errors
/// Returns [`SchemaError`] when the question itself is malformed: empty id,
/// selection kind without options, inverted bounds, or an unusable rule.
///
/// # Examples
/// ```
/// use bp_schema::{build_validator, InputKind, Question, QuestionOption};
/// use serde_json::json;
///
/// let question = Question::new("pace", "Pace", InputKind::SingleSelect)
///     .with_options([QuestionOption::from_label("Self Paced")]);
/// let validator = build_validator(&question).unwrap();
///
/// assert!(validator.validate(&json!("self-paced")).is_ok());
/// assert!(validator.validate(&json!("cohort")).is_err());
/// ```
pub fn build_validator(question: &Question) -> Result<Validator, SchemaError> {
    if question.id.trim().is_empty() {
        return Err(SchemaError::EmptyId);
    }

    let shape = Shape::for_question(question)?;
    let mut checks = Vec::new();
    let mut required = question.required;
    let mut required_message = None;

    push_bounds(question, "numeric", question.numeric_bounds.as_ref(), &mut checks, |b, m| {
        [b.min.map(|v| Check::Min(v, m.clone())), b.max.map(|v| Check::Max(v, m))]
    })?;
    push_bounds(question, "scale", question.scale_bounds.as_ref(), &mut checks, |b, m| {
        [b.min.map(|v| Check::Min(v, m.clone())), b.max.map(|v| Check::Max(v, m))]
    })?;
    push_bounds(question, "length", question.length_bounds.as_ref(), &mut checks, |b, m| {
        [
            b.min.map(|v| Check::MinLength(v, m.clone())),
            b.max.map(|v| Check::MaxLength(v, m)),
        ]
    })?;

    match question.input_kind {
        InputKind::Email => checks.push(Check::Email(None)),
        InputKind::Url => checks.push(Check::Url(None)),
        _ => {}
    }

    for rule in &question.custom_rules {
        match rule.kind {
            RuleKind::Required => {
                required = true;
                required_message.clone_from(&rule.message);
            }
            RuleKind::Min => checks.push(Check::Min(rule_number(question, rule)?, rule.message.clone())),
            RuleKind::Max => checks.push(Check::Max(rule_number(question, rule)?, rule.message.clone())),
            RuleKind::MinLength => checks.push(Check::MinLength(
                rule_count(question, rule)?,
                rule.message.clone(),
            )),
            RuleKind::MaxLength => checks.push(Check::MaxLength(
                rule_count(question, rule)?,
                rule.message.clone(),
            )),
            RuleKind::Pattern => checks.push(Check::Pattern(
                rule_pattern(question, rule)?,
                rule.message.clone(),
            )),
            RuleKind::Email => upsert_format(&mut checks, Check::Email(rule.message.clone())),
            RuleKind::Url => upsert_format(&mut checks, Check::Url(rule.message.clone())),
        }
    }

    Ok(Validator {
        question_id: question.id.clone(),
        required,
        required_message,
        shape,
        checks,
    })
}

fn push_bounds<T: PartialOrd>(
    question: &Question,
    which: &'static str,
    bounds: Option<&Bounds<T>>,
    checks: &mut Vec<Check>,
    to_checks: impl FnOnce(&Bounds<T>, Option<String>) -> [Option<Check>; 2],
) -> Result<(), SchemaError> {
    let Some(bounds) = bounds else {
        return Ok(());
    };
    if !bounds.is_ordered() {
        return Err(SchemaError::InvertedBounds {
            question_id: question.id.clone(),
            which,
        });
    }
    checks.extend(to_checks(bounds, bounds.message.clone()).into_iter().flatten());
    Ok(())
}

/// A format rule replaces the implicit one from the input kind
fn upsert_format(checks: &mut Vec<Check>, check: Check) {
    let same = |c: &Check| {
        matches!(
            (c, &check),
            (Check::Email(_), Check::Email(_)) | (Check::Url(_), Check::Url(_))
        )
    };
    if let Some(existing) = checks.iter_mut().find(|c| same(c)) {
        *existing = check;
    } else {
        checks.push(check);
    }
}

fn invalid_rule(question: &Question, rule: &Rule, reason: impl Into<String>) -> SchemaError {
    SchemaError::InvalidRule {
        question_id: question.id.clone(),
        kind: rule.kind,
        reason: reason.into(),
    }
}

fn rule_number(question: &Question, rule: &Rule) -> Result<f64, SchemaError> {
    rule.value
        .as_ref()
        .and_then(Value::as_f64)
        .ok_or_else(|| invalid_rule(question, rule, "expected a numeric value"))
}

fn rule_count(question: &Question, rule: &Rule) -> Result<usize, SchemaError> {
    rule.value
        .as_ref()
        .and_then(Value::as_u64)
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| invalid_rule(question, rule, "expected a non-negative integer"))
}

fn rule_pattern(question: &Question, rule: &Rule) -> Result<Regex, SchemaError> {
    let pattern = rule
        .value
        .as_ref()
        .and_then(Value::as_str)
        .ok_or_else(|| invalid_rule(question, rule, "expected a pattern string"))?;
    Regex::new(pattern).map_err(|e| invalid_rule(question, rule, e.to_string()))
}

/// Check a generated questionnaire before it is stored
///
/// Reports empty sections, duplicate question ids, duplicate option values
/// and every question a validator cannot be built from. An empty result
/// means the questionnaire is usable as-is.
#[must_use]
pub fn check_questionnaire(sections: &[Section]) -> Vec<SchemaError> {
    let mut errors = Vec::new();
    let mut ids = HashSet::new();

    for section in sections {
        if section.questions.is_empty() {
            errors.push(SchemaError::EmptySection {
                section_id: section.id.clone(),
            });
        }

        for question in &section.questions {
            if !question.id.is_empty() && !ids.insert(question.id.as_str()) {
                errors.push(SchemaError::DuplicateQuestionId {
                    question_id: question.id.clone(),
                });
            }

            let mut values = HashSet::new();
            for option in &question.options {
                if !values.insert(option.value.as_str()) {
                    errors.push(SchemaError::DuplicateOptionValue {
                        question_id: question.id.clone(),
                        value: option.value.clone(),
                    });
                }
            }

            if let Err(e) = build_validator(question) {
                errors.push(e);
            }
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question::QuestionOption;
    use serde_json::json;

    fn options(labels: &[&str]) -> Vec<QuestionOption> {
        labels.iter().copied().map(QuestionOption::from_label).collect()
    }

    fn kinds(failure: &ValidationFailure) -> Vec<&ViolationKind> {
        failure.violations.iter().map(|v| &v.kind).collect()
    }

    #[test]
    fn optional_accepts_absence() {
        let v = build_validator(&Question::new("q", "Q", InputKind::Text)).unwrap();
        assert!(v.validate(&Value::Null).is_ok());
        assert!(v.validate(&json!("")).is_ok());
        assert!(v.validate(&json!("   ")).is_ok());
    }

    #[test]
    fn required_text_rejects_empty() {
        let v = build_validator(&Question::new("q", "Q", InputKind::Text).required()).unwrap();
        let err = v.validate(&json!("")).unwrap_err();
        assert_eq!(kinds(&err), vec![&ViolationKind::Required]);
        assert_eq!(err.message(), "This field is required");
    }

    #[test]
    fn required_multi_select_rejects_empty_array() {
        let q = Question::new("q", "Q", InputKind::MultiSelect)
            .required()
            .with_options(options(&["Quality", "Speed"]));
        let v = build_validator(&q).unwrap();

        let err = v.validate(&json!([])).unwrap_err();
        assert_eq!(kinds(&err), vec![&ViolationKind::EmptySelection]);
        assert_eq!(err.message(), "Please select at least one option");
    }

    #[test]
    fn single_select_is_strict() {
        let q = Question::new("q", "Q", InputKind::SingleSelect)
            .with_options(options(&["Quality", "Speed"]));
        let v = build_validator(&q).unwrap();

        assert_eq!(v.validate(&json!("speed")).unwrap(), json!("speed"));
        let err = v.validate(&json!("legacy-value")).unwrap_err();
        assert_eq!(err.message(), "legacy-value is not a valid option");
        let err = v.validate(&json!(3)).unwrap_err();
        assert!(matches!(err.violations[0].kind, ViolationKind::TypeMismatch { .. }));
    }

    #[test]
    fn multi_select_accepts_option_like_tokens() {
        let q = Question::new("q", "Q", InputKind::MultiSelect)
            .with_options(options(&["Quality", "Speed"]));
        let v = build_validator(&q).unwrap();

        assert!(v.validate(&json!(["quality", "retired_option"])).is_ok());
        let err = v.validate(&json!(["quality", "Not A Token", 7])).unwrap_err();
        assert_eq!(
            err.message(),
            "Not A Token is not a valid option; 7 is not a valid option"
        );
    }

    #[test]
    fn selection_count_bounds_apply_to_arrays() {
        let q = Question::new("q", "Q", InputKind::MultiSelect)
            .with_options(options(&["A", "B", "C"]))
            .with_length_bounds(Bounds::new(None, Some(2)).with_message("Pick up to two"));
        let v = build_validator(&q).unwrap();

        let err = v.validate(&json!(["a", "b", "c"])).unwrap_err();
        assert_eq!(
            kinds(&err),
            vec![&ViolationKind::TooManySelections { max: 2, actual: 3 }]
        );
        assert_eq!(err.message(), "Pick up to two");
    }

    #[test]
    fn scale_requires_integer_within_bounds() {
        let q = Question::new("q", "Q", InputKind::Scale)
            .with_scale_bounds(Bounds::new(Some(1.0), Some(5.0)).with_message("Rate 1 to 5"));
        let v = build_validator(&q).unwrap();

        assert_eq!(v.validate(&json!(3)).unwrap(), json!(3));
        assert_eq!(v.validate(&json!("4")).unwrap(), json!(4));
        assert_eq!(v.validate(&json!(9)).unwrap_err().message(), "Rate 1 to 5");
        assert!(matches!(
            v.validate(&json!(2.5)).unwrap_err().violations[0].kind,
            ViolationKind::NotAnInteger { .. }
        ));
    }

    #[test]
    fn currency_bounds_and_coercion() {
        let q = Question::new("q", "Q", InputKind::Currency)
            .with_numeric_bounds(Bounds::new(Some(0.0), None));
        let v = build_validator(&q).unwrap();

        assert_eq!(v.validate(&json!("1250.50")).unwrap(), json!(1250.5));
        let err = v.validate(&json!(-10)).unwrap_err();
        assert_eq!(err.message(), "Must be at least 0");
        assert!(v.validate(&json!("abc")).is_err());
        assert!(v.validate(&json!("NaN")).is_err());
    }

    #[test]
    fn date_accepts_iso_forms() {
        let v = build_validator(&Question::new("q", "Q", InputKind::Date)).unwrap();
        assert!(v.validate(&json!("2025-03-01")).is_ok());
        assert!(v.validate(&json!("2025-03-01T10:00:00Z")).is_ok());
        let err = v.validate(&json!("03/01/2025")).unwrap_err();
        assert_eq!(err.message(), "03/01/2025 is not a valid date");
    }

    #[test]
    fn email_and_url_formats() {
        let email = build_validator(&Question::new("e", "E", InputKind::Email)).unwrap();
        assert!(email.validate(&json!("ada@example.com")).is_ok());
        assert!(email.validate(&json!("ada@example")).is_err());

        let url = build_validator(
            &Question::new("u", "U", InputKind::Url)
                .with_rule(Rule::flag(RuleKind::Url).with_message("Link to your portfolio")),
        )
        .unwrap();
        assert!(url.validate(&json!("https://example.com/me")).is_ok());
        let err = url.validate(&json!("ftp://example.com")).unwrap_err();
        assert_eq!(err.violations.len(), 1);
        assert_eq!(err.message(), "Link to your portfolio");
    }

    #[test]
    fn multiple_violations_are_combined() {
        let q = Question::new("q", "Q", InputKind::Text)
            .with_length_bounds(Bounds::new(Some(10), None))
            .with_rule(Rule::new(RuleKind::Pattern, "^[A-Z]").with_message("Start with a capital"));
        let v = build_validator(&q).unwrap();

        let err = v.validate(&json!("short")).unwrap_err();
        assert_eq!(
            err.message(),
            "Must be at least 10 characters; Start with a capital"
        );
    }

    #[test]
    fn required_rule_carries_message() {
        let q = Question::new("q", "Q", InputKind::Textarea)
            .with_rule(Rule::flag(RuleKind::Required).with_message("Tell us about your team"));
        let v = build_validator(&q).unwrap();
        assert!(v.is_required());
        assert_eq!(
            v.validate(&Value::Null).unwrap_err().message(),
            "Tell us about your team"
        );
    }

    #[test]
    fn toggle_without_options_is_boolean() {
        let v = build_validator(&Question::new("t", "T", InputKind::Toggle)).unwrap();
        assert_eq!(v.validate(&json!(true)).unwrap(), json!(true));
        assert_eq!(v.validate(&json!("false")).unwrap(), json!(false));
        assert!(v.validate(&json!("maybe")).is_err());
    }

    #[test]
    fn malformed_questions_are_schema_errors() {
        assert_eq!(
            build_validator(&Question::new(" ", "Q", InputKind::Text)).unwrap_err(),
            SchemaError::EmptyId
        );
        assert!(matches!(
            build_validator(&Question::new("q", "Q", InputKind::MultiSelect)),
            Err(SchemaError::MissingOptions { .. })
        ));
        assert!(matches!(
            build_validator(
                &Question::new("q", "Q", InputKind::Number)
                    .with_numeric_bounds(Bounds::new(Some(5.0), Some(1.0)))
            ),
            Err(SchemaError::InvertedBounds { which: "numeric", .. })
        ));
        assert!(matches!(
            build_validator(
                &Question::new("q", "Q", InputKind::Text)
                    .with_rule(Rule::new(RuleKind::Pattern, "(unclosed"))
            ),
            Err(SchemaError::InvalidRule { .. })
        ));
        assert!(matches!(
            build_validator(
                &Question::new("q", "Q", InputKind::Number).with_rule(Rule::flag(RuleKind::Min))
            ),
            Err(SchemaError::InvalidRule { .. })
        ));
    }

    #[test]
    fn check_questionnaire_reports_all_defects() {
        let sections = vec![
            Section::new(
                "s1",
                "One",
                [
                    Question::new("a", "A", InputKind::SingleSelect).with_options([
                        QuestionOption::new("x", "X"),
                        QuestionOption::new("x", "X again"),
                    ]),
                    Question::new("b", "B", InputKind::MultiSelect),
                ],
            ),
            Section::new("s2", "Two", [Question::new("a", "A", InputKind::Text)]),
            Section::new("s3", "Empty", []),
        ];

        let errors = check_questionnaire(&sections);
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&SchemaError::DuplicateOptionValue {
            question_id: "a".to_string(),
            value: "x".to_string()
        }));
        assert!(errors.contains(&SchemaError::MissingOptions {
            question_id: "b".to_string()
        }));
        assert!(errors.contains(&SchemaError::DuplicateQuestionId {
            question_id: "a".to_string()
        }));
        assert!(errors.contains(&SchemaError::EmptySection {
            section_id: "s3".to_string()
        }));
    }
}
