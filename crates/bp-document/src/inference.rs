//! Data-driven presentation-type inference
//!
//! Rules are evaluated top to bottom and the first match wins. A rule
//! matches a section when one of the section's direct array fields holds an
//! object entry with a key word listed by the rule.

use crate::display::DisplayType;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One row of the inference table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InferenceRule {
    /// Type assigned on match
    pub display_type: DisplayType,
    /// Lowercase key words that signal this type
    pub keywords: Vec<String>,
}

impl InferenceRule {
    /// Create rule
    #[must_use]
    pub fn new<I, S>(display_type: DisplayType, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            display_type,
            keywords: keywords
                .into_iter()
                .map(|k| k.into().to_lowercase())
                .collect(),
        }
    }

    /// Whether any array entry of `section` has a matching key
    #[must_use]
    pub fn matches(&self, section: &Map<String, Value>) -> bool {
        section
            .values()
            .filter_map(Value::as_array)
            .flatten()
            .filter_map(Value::as_object)
            .flat_map(Map::keys)
            .any(|key| key_words(key).iter().any(|w| self.keywords.contains(w)))
    }
}

/// Default priority order: timeline, table, infographic
#[must_use]
pub fn default_rules() -> Vec<InferenceRule> {
    vec![
        InferenceRule::new(
            DisplayType::Timeline,
            ["date", "start", "end", "deadline", "due", "timestamp", "timeline"],
        ),
        InferenceRule::new(
            DisplayType::Table,
            [
                "role",
                "commitment",
                "effort",
                "probability",
                "likelihood",
                "cost",
                "budget",
                "impact",
                "owner",
                "hours",
                "severity",
            ],
        ),
        InferenceRule::new(
            DisplayType::Infographic,
            ["target", "baseline", "metric", "metrics", "kpi", "benchmark", "measurement"],
        ),
    ]
}

/// First matching rule's type, or markdown
#[must_use]
pub fn infer_display_type(rules: &[InferenceRule], section: &Map<String, Value>) -> DisplayType {
    rules
        .iter()
        .find(|rule| rule.matches(section))
        .map_or(DisplayType::Markdown, |rule| rule.display_type)
}

/// Lowercase words of a key
///
/// Splits on `_`, `-`, spaces and lower-to-upper camelCase boundaries:
/// `startDate` and `start_date` both yield `["start", "date"]`.
#[must_use]
pub fn key_words(key: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;

    for c in key.chars() {
        if matches!(c, '_' | '-' | ' ') {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if c.is_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = c.is_lowercase() || c.is_ascii_digit();
        current.extend(c.to_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn section(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn splits_keys_into_words() {
        assert_eq!(key_words("start_date"), vec!["start", "date"]);
        assert_eq!(key_words("hoursPerWeek"), vec!["hours", "per", "week"]);
        assert_eq!(key_words("KPI"), vec!["kpi"]);
        assert_eq!(key_words("due-by date"), vec!["due", "by", "date"]);
        assert_eq!(key_words("_internal"), vec!["internal"]);
    }

    #[test]
    fn timeline_wins_over_table() {
        let s = section(json!({
            "phases": [{ "phase": "One", "owner": "Ops", "start_date": "2026-01-01" }]
        }));
        assert_eq!(infer_display_type(&default_rules(), &s), DisplayType::Timeline);
    }

    #[test]
    fn table_and_infographic() {
        let table = section(json!({ "risks": [{ "risk": "Churn", "likelihood": "high" }] }));
        assert_eq!(infer_display_type(&default_rules(), &table), DisplayType::Table);

        let info = section(json!({ "kpis": [{ "name": "NPS", "baseline": 20, "target": 40 }] }));
        assert_eq!(infer_display_type(&default_rules(), &info), DisplayType::Infographic);
    }

    #[test]
    fn whole_words_only() {
        // "endpoint" must not read as "end", nor "rolemodel" as "role"
        let s = section(json!({ "items": [{ "endpoint": "/a", "rolemodel": "x" }] }));
        assert_eq!(infer_display_type(&default_rules(), &s), DisplayType::Markdown);
    }

    #[test]
    fn nested_or_scalar_fields_are_ignored() {
        let s = section(json!({
            "content": "Start date is soon",
            "details": { "start_date": "2026-01-01" },
            "tags": ["owner", "cost"]
        }));
        assert_eq!(infer_display_type(&default_rules(), &s), DisplayType::Markdown);
    }
}
