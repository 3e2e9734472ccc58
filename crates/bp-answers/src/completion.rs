//! Completion assessment for dynamically generated questionnaires
//!
//! A sparse answer set is a warning, never a validation error.

use crate::reconcile::{AnswerMap, AnswerReconciler, CompleteValidation, QuestionIndex};
use crate::sanitize::Resolution;
use bp_schema::{is_blank, Section};
use serde::Serialize;
use tracing::{info, warn};

/// How much of a questionnaire has been answered
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionReport {
    /// Distinct questions
    pub total_questions: usize,
    /// Questions with a non-blank answer after sanitization
    pub answered: usize,
    /// Required questions
    pub required_total: usize,
    /// Required questions with a non-blank answer
    pub required_answered: usize,
    /// `answered / total_questions`, 1.0 for an empty questionnaire
    pub completion_rate: f64,
    /// Rate is below the configured threshold
    pub low_completion: bool,
}

/// Complete validation plus completion warnings
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicAnswerReview {
    /// Submission validation result
    pub validation: CompleteValidation,
    /// Completion figures
    pub completion: CompletionReport,
    /// Non-blocking notices
    pub warnings: Vec<String>,
}

impl DynamicAnswerReview {
    /// Whether the answers can be submitted
    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validation.valid
    }
}

impl AnswerReconciler {
    /// Count answered questions against the questionnaire
    #[must_use]
    pub fn assess_completion(&self, answers: &AnswerMap, sections: &[Section]) -> CompletionReport {
        let index = QuestionIndex::build(sections);
        let mut report = CompletionReport {
            total_questions: index.len(),
            answered: 0,
            required_total: 0,
            required_answered: 0,
            completion_rate: 1.0,
            low_completion: false,
        };

        for question in index.questions() {
            let answered = answers
                .get(&question.id)
                .map(|raw| self.sanitize_answer(question, raw))
                .is_some_and(|s| !is_blank(&s.value));

            if answered {
                report.answered += 1;
            }
            if question.required {
                report.required_total += 1;
                if answered {
                    report.required_answered += 1;
                }
            }
        }

        if report.total_questions > 0 {
            report.completion_rate = ratio(report.answered, report.total_questions);
        }
        report.low_completion = report.completion_rate < self.config().low_completion_threshold;
        report
    }

    /// Complete validation with completion and drift warnings
    #[must_use]
    pub fn review_dynamic_answers(
        &self,
        answers: &AnswerMap,
        sections: &[Section],
    ) -> DynamicAnswerReview {
        let validation = self.validate_complete(answers, sections, true);
        let completion = self.assess_completion(answers, sections);
        let mut warnings = Vec::new();

        if completion.low_completion {
            warn!(
                rate = completion.completion_rate,
                threshold = self.config().low_completion_threshold,
                "Low completion rate"
            );
            warnings.push(format!(
                "Low completion rate: {:.0}% of questions answered",
                completion.completion_rate * 100.0
            ));
        }

        warnings.extend(validation.warnings.values().cloned());

        let index = QuestionIndex::build(sections);
        for (id, raw) in answers {
            let Some(question) = index.get(id) else {
                continue;
            };
            if self.sanitize_answer(question, raw).resolution == Resolution::Preserved {
                warnings.push(format!(
                    "Answer to {id} no longer matches the current options and was kept as submitted"
                ));
            }
        }

        info!(
            valid = validation.valid,
            rate = completion.completion_rate,
            warnings = warnings.len(),
            "Dynamic answer review finished"
        );

        DynamicAnswerReview {
            validation,
            completion,
            warnings,
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn ratio(part: usize, whole: usize) -> f64 {
    part as f64 / whole as f64
}
