//! Canonical option values
//!
//! Option values are stored as lowercase-hyphenated tokens derived from the
//! display label. The same token shape backs two checks that must stay in
//! lock-step: the permissive multi-select validator and the reconciler's
//! data-loss guard. Both call [`looks_like_option_token`].

use crate::question::{QuestionOption, Section};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Strict canonical shape: `knowledge-transfer`, `3-5-years`
static STANDARD_VALUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("static regex"));

/// Loose token shape accepted for previously normalized answers
static OPTION_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9_-]+$").expect("static regex"));

/// Fallback for labels with no usable characters
pub const FALLBACK_OPTION_VALUE: &str = "option";

/// Derive the canonical value for a label
///
/// Lowercases, turns runs of whitespace, hyphens and underscores into a
/// single hyphen, and strips every other non-alphanumeric character.
/// Non-ASCII letters are removed, not transliterated.
///
/// # Examples
/// ```
/// use bp_schema::generate_standard_option_value;
///
/// assert_eq!(generate_standard_option_value("Knowledge Transfer"), "knowledge-transfer");
/// assert_eq!(generate_standard_option_value("3-5 years"), "3-5-years");
/// assert_eq!(generate_standard_option_value("C++ & Rust"), "c-rust");
/// ```
#[must_use]
pub fn generate_standard_option_value(label: &str) -> String {
    let lowered = label.trim().to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut pending_separator = false;

    for c in lowered.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !out.is_empty() {
                out.push('-');
            }
            pending_separator = false;
            out.push(c);
        } else if c.is_whitespace() || c == '-' || c == '_' {
            pending_separator = true;
        }
    }

    out
}

/// Whether `value` already has the strict canonical shape
#[inline]
#[must_use]
pub fn is_standard_option_value(value: &str) -> bool {
    STANDARD_VALUE.is_match(value)
}

/// Whether `value` looks like a canonical option token
///
/// Lowercase alphanumerics, hyphens and underscores only. Deliberately
/// looser than [`is_standard_option_value`]: answers normalized by an older
/// pass may use underscores.
#[inline]
#[must_use]
pub fn looks_like_option_token(value: &str) -> bool {
    OPTION_TOKEN.is_match(value)
}

/// Canonicalize an option value proposed by the question generator
///
/// Returns `value` unchanged when it is already canonical, otherwise derives
/// it from `label`, then from `value` itself, then falls back to
/// [`FALLBACK_OPTION_VALUE`].
///
/// # Examples
/// ```
/// use bp_schema::normalize_option_value;
///
/// assert_eq!(normalize_option_value("knowledge-transfer", "Knowledge Transfer"), "knowledge-transfer");
/// assert_eq!(normalize_option_value("Knowledge Transfer", "Knowledge Transfer"), "knowledge-transfer");
/// ```
#[must_use]
pub fn normalize_option_value(value: &str, label: &str) -> String {
    let trimmed = value.trim();
    if is_standard_option_value(trimmed) {
        return trimmed.to_string();
    }

    let from_label = generate_standard_option_value(label);
    if !from_label.is_empty() {
        return from_label;
    }

    let from_value = generate_standard_option_value(value);
    if !from_value.is_empty() {
        return from_value;
    }

    FALLBACK_OPTION_VALUE.to_string()
}

/// Canonicalize every option of every question
///
/// Returns a new copy. Values that collide within one question get a numeric
/// suffix (`-2`, `-3`, ...) in option order so each stays addressable.
#[must_use]
pub fn normalize_question_options(sections: &[Section]) -> Vec<Section> {
    sections
        .iter()
        .map(|section| {
            let mut section = section.clone();
            for question in &mut section.questions {
                question.options = normalize_options(&question.options);
            }
            section
        })
        .collect()
}

fn normalize_options(options: &[QuestionOption]) -> Vec<QuestionOption> {
    let mut seen = HashSet::new();
    options
        .iter()
        .map(|option| {
            let base = normalize_option_value(&option.value, &option.label);
            let mut value = base.clone();
            let mut n = 2;
            while !seen.insert(value.clone()) {
                value = format!("{base}-{n}");
                n += 1;
            }
            QuestionOption {
                value,
                ..option.clone()
            }
        })
        .collect()
}
