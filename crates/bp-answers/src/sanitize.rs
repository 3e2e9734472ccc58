//! Answer sanitization
//!
//! Maps one raw answer onto the current option list of its question.
//! Non-selection questions and blank answers pass through untouched.
//! A selection answer that cannot be matched keeps its raw value so the
//! validator can name the offending value; it is never replaced by `null`
//! or an empty list.

use crate::matcher::{MatchConfidence, MatchMode, OptionMatcher};
use bp_schema::{is_blank, looks_like_option_token, Question};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

/// State an answer ended in after sanitization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Resolution {
    /// No option list applies, or nothing was submitted
    Untouched,
    /// Verbatim option value(s)
    Exact,
    /// Case or label variant(s)
    Normalized,
    /// Separator-insensitive or substring match
    Fuzzy,
    /// Affirmative/negative token match
    Boolean,
    /// No element matched but all look canonical; kept as submitted
    Preserved,
    /// No match; raw value kept for validation
    Rejected,
}

impl Resolution {
    /// Whether the sanitized value came from the option list
    #[inline]
    #[must_use]
    pub fn is_matched(self) -> bool {
        matches!(
            self,
            Self::Exact | Self::Normalized | Self::Fuzzy | Self::Boolean
        )
    }
}

impl From<MatchConfidence> for Resolution {
    fn from(confidence: MatchConfidence) -> Self {
        match confidence {
            MatchConfidence::Exact => Self::Exact,
            MatchConfidence::Normalized => Self::Normalized,
            MatchConfidence::Fuzzy => Self::Fuzzy,
            MatchConfidence::Boolean => Self::Boolean,
        }
    }
}

/// Result of sanitizing one answer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sanitized {
    /// Value to validate and persist
    pub value: Value,
    /// How the value was obtained
    pub resolution: Resolution,
    /// Non-canonical multi-select elements removed because others did match
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dropped: Vec<String>,
}

impl Sanitized {
    fn new(value: Value, resolution: Resolution) -> Self {
        Self {
            value,
            resolution,
            dropped: Vec::new(),
        }
    }
}

/// Sanitize `raw` against `question`'s current options
#[must_use]
pub fn sanitize_value(question: &Question, raw: &Value, substring_min_len: usize) -> Sanitized {
    if !question.input_kind.is_selection() || question.options.is_empty() || is_blank(raw) {
        return Sanitized::new(raw.clone(), Resolution::Untouched);
    }

    let sanitized = if question.input_kind.is_multi() {
        sanitize_multi(question, raw, substring_min_len)
    } else {
        sanitize_single(question, raw, substring_min_len)
    };

    debug!(
        question_id = %question.id,
        resolution = ?sanitized.resolution,
        "Sanitized answer"
    );
    sanitized
}

fn sanitize_single(question: &Question, raw: &Value, substring_min_len: usize) -> Sanitized {
    let Some(text) = scalar_text(raw) else {
        return Sanitized::new(raw.clone(), Resolution::Rejected);
    };

    let matcher = OptionMatcher::new(&question.options, MatchMode::Single, substring_min_len);
    match matcher.find(&text) {
        Some((option, confidence)) => {
            Sanitized::new(Value::String(option.value.clone()), confidence.into())
        }
        None => Sanitized::new(raw.clone(), Resolution::Rejected),
    }
}

fn sanitize_multi(question: &Question, raw: &Value, substring_min_len: usize) -> Sanitized {
    let submitted: Vec<Value> = match raw {
        Value::Array(items) => items.iter().filter(|v| !is_blank(v)).cloned().collect(),
        Value::String(_) | Value::Number(_) | Value::Bool(_) => vec![raw.clone()],
        _ => return Sanitized::new(raw.clone(), Resolution::Rejected),
    };
    if submitted.is_empty() {
        return Sanitized::new(Value::Array(Vec::new()), Resolution::Untouched);
    }

    let matcher = OptionMatcher::new(&question.options, MatchMode::Multi, substring_min_len);
    let mut kept: Vec<String> = Vec::new();
    let mut any_matched = false;
    let mut unmatched: Vec<String> = Vec::new();
    let mut dropped: Vec<String> = Vec::new();
    let mut weakest = MatchConfidence::Exact;

    for item in &submitted {
        let found = scalar_text(item).and_then(|text| matcher.find(&text));
        let value = match found {
            Some((option, confidence)) => {
                any_matched = true;
                weakest = weakest.max(confidence);
                option.value.clone()
            }
            None => {
                let text = element_text(item);
                unmatched.push(text.clone());
                // Canonical tokens may name options from a newer catalogue
                if item.as_str().is_some_and(looks_like_option_token) {
                    text
                } else {
                    dropped.push(text);
                    continue;
                }
            }
        };
        if !kept.contains(&value) {
            kept.push(value);
        }
    }

    if !any_matched {
        if dropped.is_empty() {
            warn!(
                question_id = %question.id,
                values = ?unmatched,
                "No option matches but values look canonical; preserving submitted selection"
            );
            return Sanitized::new(Value::Array(submitted), Resolution::Preserved);
        }
        return Sanitized::new(raw.clone(), Resolution::Rejected);
    }

    if !dropped.is_empty() {
        warn!(
            question_id = %question.id,
            dropped = ?dropped,
            "Removed selections that no longer match any option"
        );
    }

    Sanitized {
        value: Value::Array(kept.into_iter().map(Value::String).collect()),
        resolution: weakest.into(),
        dropped,
    }
}

/// Text form of a scalar answer
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn element_text(value: &Value) -> String {
    scalar_text(value).unwrap_or_else(|| value.to_string())
}
