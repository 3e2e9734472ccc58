//! End-to-end reconciliation against the shared questionnaire fixture

use bp_answers::{
    validate_complete_answers, validate_partial_answers, AnswerReconciler, ReconcileConfig,
    Resolution,
};
use bp_schema::Section;
use bp_test_utils::{answers, focus_areas_question, remote_toggle, sample_sections};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn fuzzy_equivalence_for_multi_select() {
    let submitted = answers(json!({
        "priorities": ["Quality", "SPEED", "cost"],
        "summary": "Own the platform",
        "remote": "yes"
    }));

    let result = validate_complete_answers(&submitted, &sample_sections(), true);

    assert!(result.valid, "{:?}", result.errors);
    assert_eq!(
        result.sanitized_answers["priorities"],
        json!(["quality", "speed", "cost"])
    );
}

#[test]
fn required_empty_array_is_missing() {
    let submitted = answers(json!({
        "priorities": [],
        "summary": "Own the platform",
        "remote": "no"
    }));

    let result = validate_complete_answers(&submitted, &sample_sections(), true);

    assert!(!result.valid);
    assert_eq!(result.missing_required, vec!["priorities".to_string()]);
}

#[test]
fn required_empty_text_gets_required_message() {
    let submitted = answers(json!({
        "priorities": ["quality"],
        "summary": "",
        "remote": "yes"
    }));

    let result = validate_complete_answers(&submitted, &sample_sections(), true);

    assert_eq!(result.missing_required, vec!["summary".to_string()]);
    let message = &result.errors["summary"];
    assert!(message.to_lowercase().contains("required"), "{message}");
    assert!(!message.contains("no longer matches"), "{message}");
}

#[test]
fn regenerated_options_report_the_lost_answer() {
    let submitted = answers(json!({
        "priorities": ["Time to market!"],
        "summary": "Own the platform",
        "remote": "yes"
    }));

    let result = validate_complete_answers(&submitted, &sample_sections(), true);

    assert_eq!(result.missing_required, vec!["priorities".to_string()]);
    let message = &result.errors["priorities"];
    assert!(message.contains("Time to market!"), "{message}");
    assert!(message.contains("Quality, Speed, Cost"), "{message}");
}

#[test]
fn canonical_values_survive_option_rotation() {
    let submitted = answers(json!({
        "priorities": ["time-to-market", "developer_experience"],
        "summary": "Own the platform",
        "remote": "yes"
    }));

    let result = validate_complete_answers(&submitted, &sample_sections(), true);

    assert!(result.valid, "{:?}", result.errors);
    assert_eq!(
        result.sanitized_answers["priorities"],
        json!(["time-to-market", "developer_experience"])
    );
}

fn sections_with_focus() -> Vec<Section> {
    let mut sections = sample_sections();
    sections[0].questions.push(focus_areas_question());
    sections
}

#[test]
fn retired_canonical_option_on_optional_question_is_valid() {
    let submitted = answers(json!({
        "priorities": ["quality"],
        "summary": "Own the platform",
        "remote": "yes",
        "focus": ["quality", "retired-option"]
    }));

    let result = validate_complete_answers(&submitted, &sections_with_focus(), true);

    assert!(result.valid, "{:?}", result.errors);
    assert!(result.warnings.is_empty());
    assert_eq!(
        result.sanitized_answers["focus"],
        json!(["quality", "retired-option"])
    );
}

#[test]
fn removed_free_text_selection_is_a_warning() {
    let submitted = answers(json!({
        "priorities": ["quality", "Time to market!"],
        "summary": "Own the platform",
        "remote": "yes"
    }));

    let result = validate_complete_answers(&submitted, &sample_sections(), true);

    assert!(result.valid, "{:?}", result.errors);
    assert!(result.warnings["priorities"].contains("Time to market!"));
    assert_eq!(result.sanitized_answers["priorities"], json!(["quality"]));
}

#[test]
fn autosave_drops_blank_elements_of_preserved_selection() {
    let result = validate_partial_answers(
        &answers(json!({"focus": ["old-a", ""]})),
        &sections_with_focus(),
        true,
    );

    assert!(result.valid, "{:?}", result.errors);
    assert_eq!(result.sanitized_answers.unwrap()["focus"], json!(["old-a"]));
}

#[test]
fn autosave_never_blocks_on_incompleteness() {
    let result = validate_partial_answers(
        &answers(json!({"format": "Mentorship"})),
        &sample_sections(),
        true,
    );

    assert!(result.valid);
    assert_eq!(
        result.sanitized_answers.unwrap()["format"],
        json!("mentorship")
    );
}

#[test]
fn autosave_reports_declared_messages() {
    let result = validate_partial_answers(
        &answers(json!({"confidence": 9, "summary": "x".repeat(600)})),
        &sample_sections(),
        false,
    );

    assert!(!result.valid);
    assert_eq!(result.errors["confidence"], "Pick a value from 1 to 5");
    assert_eq!(result.errors["summary"], "Keep it under 500 characters");
}

#[test]
fn numeric_strings_are_coerced() {
    let result = validate_partial_answers(
        &answers(json!({"confidence": "4"})),
        &sample_sections(),
        true,
    );

    assert!(result.valid);
    assert_eq!(result.sanitized_answers.unwrap()["confidence"], json!(4));
}

#[test]
fn ambiguous_toggle_input_is_an_error() {
    let result = validate_complete_answers(
        &answers(json!({
            "priorities": ["quality"],
            "summary": "Own the platform",
            "remote": "it depends"
        })),
        &sample_sections(),
        true,
    );

    assert!(!result.valid);
    assert!(result.errors.contains_key("remote"));
    assert_eq!(result.sanitized_answers["remote"], json!("it depends"));
}

#[test]
fn separator_variants_resolve_fuzzily() {
    let reconciler = AnswerReconciler::new(ReconcileConfig::default());
    let question = bp_test_utils::format_question();

    let s = reconciler.sanitize_answer(&question, &json!("knowledge_transfer"));
    assert_eq!(s.value, json!("knowledge-transfer"));
    assert_eq!(s.resolution, Resolution::Fuzzy);

    let s = reconciler.sanitize_answer(&question, &json!("self-paced"));
    assert_eq!(s.value, json!("self_paced"));
}

#[test]
fn toggle_keeps_boolean_resolution() {
    let s = AnswerReconciler::default().sanitize_answer(&remote_toggle(), &json!("Enabled"));
    assert_eq!(s.value, json!("yes"));
    assert_eq!(s.resolution, Resolution::Boolean);
}

#[test]
fn results_serialize_camel_case() {
    let result = validate_complete_answers(
        &answers(json!({"priorities": []})),
        &sample_sections(),
        true,
    );
    let wire = serde_json::to_value(&result).unwrap();

    assert!(wire.get("missingRequired").is_some());
    assert!(wire.get("sanitizedAnswers").is_some());
}
