//! Testing utilities for the blueprint engine workspace
//!
//! Shared questionnaire, answer and blueprint fixtures.

#![allow(missing_docs)]

use bp_schema::{Bounds, InputKind, Question, QuestionOption, Section};
use indexmap::IndexMap;
use serde_json::{json, Value};

pub fn option(value: &str, label: &str) -> QuestionOption {
    QuestionOption::new(value, label)
}

pub fn priorities_question() -> Question {
    Question::new("priorities", "What matters most?", InputKind::MultiSelect)
        .required()
        .with_options([
            option("quality", "Quality"),
            option("speed", "Speed"),
            option("cost", "Cost"),
        ])
}

pub fn remote_toggle() -> Question {
    Question::new("remote", "Open to remote work?", InputKind::Toggle)
        .required()
        .with_options([option("yes", "Yes"), option("no", "No")])
}

pub fn format_question() -> Question {
    Question::new("format", "Preferred format", InputKind::SingleSelect).with_options([
        option("knowledge-transfer", "Knowledge Transfer"),
        option("mentorship", "Mentorship"),
        option("self_paced", "Self paced"),
    ])
}

pub fn summary_question() -> Question {
    Question::new("summary", "Describe the role", InputKind::Textarea)
        .required()
        .with_length_bounds(Bounds::new(Some(2), Some(500)).with_message("Keep it under 500 characters"))
}

pub fn confidence_scale() -> Question {
    Question::new("confidence", "Confidence", InputKind::Scale)
        .with_scale_bounds(Bounds::new(Some(1.0), Some(5.0)).with_message("Pick a value from 1 to 5"))
}

/// Optional multi-select kept out of [`sample_sections`]
pub fn focus_areas_question() -> Question {
    Question::new("focus", "Focus areas", InputKind::MultiSelect)
        .with_options([option("quality", "Quality"), option("speed", "Speed")])
}

/// Two sections covering every reconciliation path
pub fn sample_sections() -> Vec<Section> {
    vec![
        Section::new(
            "goals",
            "Goals",
            vec![priorities_question(), format_question(), summary_question()],
        ),
        Section::new(
            "logistics",
            "Logistics",
            vec![remote_toggle(), confidence_scale()],
        ),
    ]
}

/// Answer map from a JSON object literal, keeping key order
///
/// # Panics
/// Panics if `value` is not a JSON object.
pub fn answers(value: Value) -> IndexMap<String, Value> {
    match value {
        Value::Object(map) => map.into_iter().collect(),
        other => panic!("answers fixture must be an object, got {other}"),
    }
}

pub fn metadata() -> Value {
    json!({
        "title": "Onboarding Blueprint",
        "organization": "Acme",
        "role": "Platform Engineer",
        "generated_at": "2026-01-15T10:00:00Z"
    })
}

/// Blueprint with one section of each inferable shape
pub fn sample_blueprint() -> Value {
    json!({
        "metadata": metadata(),
        "executiveSummary": {
            "content": "A short overview."
        },
        "implementationPlan": {
            "phases": [
                { "phase": "Discovery", "start_date": "2026-02-01", "end_date": "2026-02-14", "milestones": [] }
            ]
        },
        "resourcePlan": {
            "allocations": [
                { "role": "Engineer", "hoursPerWeek": 20, "owner": "Platform" }
            ]
        },
        "successMetrics": {
            "kpis": [
                { "metric": "Lead time", "baseline": 10, "target": 5 }
            ]
        },
        "_debug": { "tokens": 1234 }
    })
}
