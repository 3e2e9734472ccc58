//! Partial and complete answer validation
//!
//! Both modes are pure functions of `(answers, sections, sanitize)`.
//! Per-answer problems are collected into an error map keyed by question
//! id; nothing here returns `Err`.
//!
//! - **Partial** (autosave): only submitted, non-blank answers are checked
//! - **Complete** (submission): every question is checked and required
//!   questions must have a non-blank answer after sanitization

use crate::config::ReconcileConfig;
use crate::sanitize::{sanitize_value, Resolution, Sanitized};
use bp_schema::{build_validator, is_blank, Question, Section};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

/// Answers keyed by question id, in submission order
pub type AnswerMap = IndexMap<String, Value>;

/// One combined message per question
pub type ErrorMap = IndexMap<String, String>;

/// Result of autosave validation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialValidation {
    /// No errors
    pub valid: bool,
    /// Messages by question id
    pub errors: ErrorMap,
    /// Non-blocking notices, such as selections removed by sanitization
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub warnings: ErrorMap,
    /// Present when sanitization was requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sanitized_answers: Option<AnswerMap>,
}

/// Result of final-submission validation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteValidation {
    /// No errors and nothing required is missing
    pub valid: bool,
    /// Messages by question id
    pub errors: ErrorMap,
    /// Non-blocking notices, such as selections removed by sanitization
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub warnings: ErrorMap,
    /// Required questions without a usable answer, in questionnaire order
    pub missing_required: Vec<String>,
    /// Answers to persist
    pub sanitized_answers: AnswerMap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Partial,
    Complete,
}

/// Outcome for a single question
#[derive(Debug)]
struct Outcome {
    value: Value,
    error: Option<String>,
    warning: Option<String>,
    missing: bool,
}

impl Outcome {
    fn accepted(value: Value) -> Self {
        Self {
            value,
            error: None,
            warning: None,
            missing: false,
        }
    }
}

/// Questions by id in questionnaire order; the first definition of a
/// duplicated id wins
#[derive(Debug)]
pub(crate) struct QuestionIndex<'a> {
    by_id: IndexMap<&'a str, &'a Question>,
}

impl<'a> QuestionIndex<'a> {
    pub(crate) fn build(sections: &'a [Section]) -> Self {
        let mut by_id = IndexMap::new();
        for question in sections.iter().flat_map(|s| &s.questions) {
            if by_id.contains_key(question.id.as_str()) {
                warn!(question_id = %question.id, "Duplicate question id; keeping first definition");
                continue;
            }
            by_id.insert(question.id.as_str(), question);
        }
        Self { by_id }
    }

    pub(crate) fn get(&self, id: &str) -> Option<&'a Question> {
        self.by_id.get(id).copied()
    }

    pub(crate) fn questions(&self) -> impl Iterator<Item = &'a Question> + '_ {
        self.by_id.values().copied()
    }

    pub(crate) fn len(&self) -> usize {
        self.by_id.len()
    }
}

/// Reconciles submitted answers with the current questionnaire
#[derive(Debug, Clone, Default)]
pub struct AnswerReconciler {
    config: ReconcileConfig,
}

impl AnswerReconciler {
    /// Create reconciler
    #[inline]
    #[must_use]
    pub fn new(config: ReconcileConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ReconcileConfig {
        &self.config
    }

    /// Map one raw answer onto `question`'s current options
    #[must_use]
    pub fn sanitize_answer(&self, question: &Question, raw: &Value) -> Sanitized {
        sanitize_value(question, raw, self.config.substring_min_len)
    }

    /// Sanitize every answer; keys without a question pass through
    #[must_use]
    pub fn sanitize_answers(&self, answers: &AnswerMap, sections: &[Section]) -> AnswerMap {
        let index = QuestionIndex::build(sections);
        answers
            .iter()
            .map(|(id, raw)| {
                let value = match index.get(id) {
                    Some(question) => self.sanitize_answer(question, raw).value,
                    None => raw.clone(),
                };
                (id.clone(), value)
            })
            .collect()
    }

    /// Autosave validation
    ///
    /// Absent and blank answers are never errors. Unknown keys are ignored
    /// for validation and kept in the sanitized map.
    #[must_use]
    pub fn validate_partial(
        &self,
        answers: &AnswerMap,
        sections: &[Section],
        sanitize: bool,
    ) -> PartialValidation {
        let index = QuestionIndex::build(sections);
        let mut errors = ErrorMap::new();
        let mut warnings = ErrorMap::new();
        let mut sanitized_answers = AnswerMap::with_capacity(answers.len());

        for (id, raw) in answers {
            let value = match index.get(id) {
                Some(question) => {
                    let outcome = self.reconcile(question, raw, sanitize, Mode::Partial);
                    if let Some(message) = outcome.error {
                        errors.insert(id.clone(), message);
                    }
                    if let Some(notice) = outcome.warning {
                        warnings.insert(id.clone(), notice);
                    }
                    outcome.value
                }
                None => {
                    debug!(question_id = %id, "Answer has no matching question; passing through");
                    raw.clone()
                }
            };
            sanitized_answers.insert(id.clone(), value);
        }

        info!(
            answers = answers.len(),
            questions = index.len(),
            errors = errors.len(),
            "Partial validation finished"
        );

        PartialValidation {
            valid: errors.is_empty(),
            errors,
            warnings,
            sanitized_answers: sanitize.then_some(sanitized_answers),
        }
    }

    /// Final-submission validation
    ///
    /// Every required question must hold a non-blank answer after
    /// sanitization. A required answer that was submitted but no longer
    /// matches any current option is reported as lost, with a preview of
    /// the old value and the options to choose from.
    #[must_use]
    pub fn validate_complete(
        &self,
        answers: &AnswerMap,
        sections: &[Section],
        sanitize: bool,
    ) -> CompleteValidation {
        let index = QuestionIndex::build(sections);
        let mut errors = ErrorMap::new();
        let mut warnings = ErrorMap::new();
        let mut missing_required = Vec::new();
        let mut resolved: IndexMap<&str, Value> = IndexMap::new();
        let unanswered = Value::Null;

        for question in index.questions() {
            let raw = answers.get(&question.id).unwrap_or(&unanswered);
            let outcome = self.reconcile(question, raw, sanitize, Mode::Complete);

            if outcome.missing {
                missing_required.push(question.id.clone());
            }
            if let Some(message) = outcome.error {
                errors.insert(question.id.clone(), message);
            }
            if let Some(notice) = outcome.warning {
                warnings.insert(question.id.clone(), notice);
            }
            if answers.contains_key(&question.id) {
                resolved.insert(question.id.as_str(), outcome.value);
            }
        }

        let sanitized_answers: AnswerMap = answers
            .iter()
            .map(|(id, raw)| {
                let value = resolved
                    .swap_remove(id.as_str())
                    .unwrap_or_else(|| raw.clone());
                (id.clone(), value)
            })
            .collect();

        info!(
            questions = index.len(),
            errors = errors.len(),
            missing = missing_required.len(),
            "Complete validation finished"
        );

        CompleteValidation {
            valid: errors.is_empty() && missing_required.is_empty(),
            errors,
            warnings,
            missing_required,
            sanitized_answers,
        }
    }

    fn reconcile(&self, question: &Question, raw: &Value, sanitize: bool, mode: Mode) -> Outcome {
        let sanitized = if sanitize {
            self.sanitize_answer(question, raw)
        } else {
            Sanitized {
                value: raw.clone(),
                resolution: Resolution::Untouched,
                dropped: Vec::new(),
            }
        };

        if mode == Mode::Partial && is_blank(&sanitized.value) {
            return Outcome::accepted(sanitized.value);
        }

        let validator = match build_validator(question) {
            Ok(validator) => validator,
            Err(e) => {
                warn!(question_id = %question.id, error = %e, "Malformed question");
                return Outcome {
                    value: sanitized.value,
                    error: Some(format!("Question configuration error: {e}")),
                    warning: None,
                    missing: false,
                };
            }
        };

        let warning = (!sanitized.dropped.is_empty())
            .then(|| self.dropped_message(question, &sanitized.dropped));

        let lost = mode == Mode::Complete
            && validator.is_required()
            && sanitized.resolution == Resolution::Rejected
            && !submitted_nothing(raw);
        if lost {
            return Outcome {
                value: sanitized.value,
                error: Some(self.lost_answer_message(question, raw)),
                warning,
                missing: true,
            };
        }

        let mut missing = false;
        let mut error = None;
        let value = match validator.validate(&sanitized.value) {
            Ok(value) => value,
            Err(failure) => {
                missing = failure.is_missing();
                let mut message = failure.message();
                if sanitized.resolution == Resolution::Rejected {
                    message = format!(
                        "{}. Valid options: {}",
                        message.trim_end_matches('.'),
                        self.option_preview(question)
                    );
                }
                error = Some(message);
                sanitized.value
            }
        };

        Outcome {
            value,
            error,
            warning,
            missing,
        }
    }

    fn dropped_message(&self, question: &Question, dropped: &[String]) -> String {
        format!(
            "Removed selections that are no longer available: {}. Valid options: {}",
            self.preview(&dropped.join(", ")),
            self.option_preview(question)
        )
    }

    fn lost_answer_message(&self, question: &Question, raw: &Value) -> String {
        format!(
            "Your previous answer ({}) no longer matches the available options. \
             Please choose again from: {}",
            self.preview(&answer_text(raw)),
            self.option_preview(question)
        )
    }

    /// First option labels, with a count of the rest
    fn option_preview(&self, question: &Question) -> String {
        let limit = self.config.option_preview_limit;
        let mut preview = question.option_labels(limit).join(", ");
        if question.options.len() > limit {
            preview.push_str(&format!(" (and {} more)", question.options.len() - limit));
        }
        preview
    }

    fn preview(&self, text: &str) -> String {
        let limit = self.config.lost_value_preview_chars;
        if text.chars().count() <= limit {
            return text.to_string();
        }
        let mut cut: String = text.chars().take(limit).collect();
        cut.push_str("...");
        cut
    }
}

/// Blank, or an array holding only blank elements
fn submitted_nothing(raw: &Value) -> bool {
    match raw {
        Value::Array(items) => items.iter().all(is_blank),
        other => is_blank(other),
    }
}

fn answer_text(raw: &Value) -> String {
    match raw {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|v| v.as_str().map_or_else(|| v.to_string(), str::to_string))
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

/// Partial validation with the default configuration
#[must_use]
pub fn validate_partial_answers(
    answers: &AnswerMap,
    sections: &[Section],
    sanitize: bool,
) -> PartialValidation {
    AnswerReconciler::default().validate_partial(answers, sections, sanitize)
}

/// Complete validation with the default configuration
#[must_use]
pub fn validate_complete_answers(
    answers: &AnswerMap,
    sections: &[Section],
    sanitize: bool,
) -> CompleteValidation {
    AnswerReconciler::default().validate_complete(answers, sections, sanitize)
}

/// Sanitization with the default configuration
#[must_use]
pub fn sanitize_answers(answers: &AnswerMap, sections: &[Section]) -> AnswerMap {
    AnswerReconciler::default().sanitize_answers(answers, sections)
}
