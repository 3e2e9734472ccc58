//! Blueprint structural validation and normalization
//!
//! Validation rejects documents no renderer can use. Normalization never
//! fails: it fills in or corrects presentation tags and returns a new
//! document, leaving the input and its `metadata` untouched.

use crate::display::{DisplayType, DISPLAY_TYPE_KEY};
use crate::error::BlueprintError;
use crate::inference::{default_rules, infer_display_type, key_words, InferenceRule};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

/// Key of the metadata object
pub const METADATA_KEY: &str = "metadata";

/// Metadata fields that must be non-empty strings
pub const REQUIRED_METADATA_FIELDS: [&str; 4] = ["title", "organization", "role", "generated_at"];

/// Outcome of a successful structural validation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureReport {
    /// Displayable sections
    pub section_count: usize,
    /// Repairable problems
    pub warnings: Vec<String>,
}

/// Parsed, validated and normalized document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreparedBlueprint {
    /// Normalized document
    pub document: Value,
    /// Warnings raised by validation
    pub warnings: Vec<String>,
}

/// Validator and normalizer with its inference table
#[derive(Debug, Clone)]
pub struct BlueprintNormalizer {
    rules: Vec<InferenceRule>,
    internal_prefixes: Vec<String>,
    internal_words: Vec<String>,
}

impl Default for BlueprintNormalizer {
    fn default() -> Self {
        Self {
            rules: default_rules(),
            internal_prefixes: vec!["_".to_string(), "$".to_string()],
            internal_words: vec!["internal".to_string(), "debug".to_string()],
        }
    }
}

impl BlueprintNormalizer {
    /// Normalizer with the default table
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule after the existing ones
    #[must_use]
    pub fn with_rule(mut self, rule: InferenceRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Treat keys starting with `prefix` as internal
    #[must_use]
    pub fn with_internal_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.internal_prefixes.push(prefix.into());
        self
    }

    /// Treat keys whose first word is `word` as internal
    #[must_use]
    pub fn with_internal_word(mut self, word: impl Into<String>) -> Self {
        self.internal_words.push(word.into().to_lowercase());
        self
    }

    /// Inference rules in priority order
    #[inline]
    #[must_use]
    pub fn rules(&self) -> &[InferenceRule] {
        &self.rules
    }

    /// Whether `key` names non-displayable data
    #[must_use]
    pub fn is_internal_key(&self, key: &str) -> bool {
        if self
            .internal_prefixes
            .iter()
            .any(|p| !p.is_empty() && key.starts_with(p.as_str()))
        {
            return true;
        }
        key_words(key)
            .first()
            .is_some_and(|w| self.internal_words.contains(w))
    }

    /// Check structural minimums
    ///
    /// # Errors
    /// - [`BlueprintError::NotAnObject`] for non-object documents
    /// - [`BlueprintError::MissingMetadata`] without a `metadata` object
    /// - [`BlueprintError::MissingMetadataField`] for an absent or empty
    ///   required field
    /// - [`BlueprintError::NoSections`] when nothing displayable remains
    pub fn validate(&self, document: &Value) -> Result<StructureReport, BlueprintError> {
        let root = document.as_object().ok_or(BlueprintError::NotAnObject)?;

        let metadata = root
            .get(METADATA_KEY)
            .and_then(Value::as_object)
            .ok_or(BlueprintError::MissingMetadata)?;

        for field in REQUIRED_METADATA_FIELDS {
            let present = metadata
                .get(field)
                .and_then(Value::as_str)
                .is_some_and(|s| !s.trim().is_empty());
            if !present {
                return Err(BlueprintError::MissingMetadataField { field });
            }
        }

        let mut report = StructureReport::default();
        for (key, section) in self.sections(root) {
            report.section_count += 1;

            let Some(body) = section.as_object() else {
                continue;
            };
            match body.get(DISPLAY_TYPE_KEY) {
                None => report
                    .warnings
                    .push(format!("Section '{key}' has no {DISPLAY_TYPE_KEY}")),
                Some(tag) if tag.as_str().and_then(DisplayType::parse).is_none() => {
                    report
                        .warnings
                        .push(format!("Section '{key}' has unknown {DISPLAY_TYPE_KEY} {tag}"));
                }
                Some(_) => {}
            }
        }

        if report.section_count == 0 {
            return Err(BlueprintError::NoSections);
        }

        debug!(
            sections = report.section_count,
            warnings = report.warnings.len(),
            "Blueprint structure valid"
        );
        Ok(report)
    }

    /// Fill in or correct presentation tags
    ///
    /// Non-object documents come back as an unchanged copy.
    #[must_use]
    pub fn normalize(&self, document: &Value) -> Value {
        let Some(root) = document.as_object() else {
            return document.clone();
        };

        let mut normalized = Map::with_capacity(root.len());
        for (key, section) in root {
            let displayable = key != METADATA_KEY && !self.is_internal_key(key);
            let value = match section {
                Value::Object(body) if displayable => Value::Object(self.normalize_section(key, body)),
                other => other.clone(),
            };
            normalized.insert(key.clone(), value);
        }
        Value::Object(normalized)
    }

    fn normalize_section(&self, key: &str, body: &Map<String, Value>) -> Map<String, Value> {
        let mut section = body.clone();
        let tag = match body.get(DISPLAY_TYPE_KEY) {
            None => {
                let inferred = infer_display_type(&self.rules, body);
                debug!(section = %key, display_type = %inferred, "Inferred display type");
                inferred
            }
            Some(tag) => match tag.as_str().and_then(DisplayType::parse) {
                Some(known) => known,
                None => {
                    warn!(section = %key, tag = %tag, "Unknown display type; using markdown");
                    DisplayType::Markdown
                }
            },
        };
        section.insert(
            DISPLAY_TYPE_KEY.to_string(),
            Value::String(tag.as_str().to_string()),
        );
        section
    }

    /// Parse raw model output, validate it and normalize it
    ///
    /// # Errors
    /// Returns [`BlueprintError::InvalidJson`] for unparseable text and any
    /// structural error from [`validate`](Self::validate).
    pub fn prepare(&self, raw: &str) -> Result<PreparedBlueprint, BlueprintError> {
        let document = parse_blueprint(raw)?;
        let report = self.validate(&document)?;
        let document = self.normalize(&document);

        info!(
            sections = report.section_count,
            warnings = report.warnings.len(),
            "Blueprint prepared"
        );

        Ok(PreparedBlueprint {
            document,
            warnings: report.warnings,
        })
    }

    fn sections<'a>(
        &'a self,
        root: &'a Map<String, Value>,
    ) -> impl Iterator<Item = (&'a String, &'a Value)> + 'a {
        root.iter()
            .filter(move |(key, _)| *key != METADATA_KEY && !self.is_internal_key(key))
    }
}

/// Parse model output, tolerating a surrounding Markdown code fence
///
/// # Errors
/// Returns [`BlueprintError::InvalidJson`] if the text is not JSON.
pub fn parse_blueprint(raw: &str) -> Result<Value, BlueprintError> {
    serde_json::from_str(strip_code_fence(raw)).map_err(|e| BlueprintError::InvalidJson(e.to_string()))
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string (```json) along with the opening fence
    let body = rest.split_once('\n').map_or(rest, |(_, body)| body);
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

/// Structural validation with the default normalizer
///
/// # Errors
/// See [`BlueprintNormalizer::validate`].
pub fn validate_blueprint_structure(document: &Value) -> Result<StructureReport, BlueprintError> {
    BlueprintNormalizer::default().validate(document)
}

/// Normalization with the default normalizer
#[must_use]
pub fn normalize_blueprint_structure(document: &Value) -> Value {
    BlueprintNormalizer::default().normalize(document)
}

/// Parse, validate and normalize with the default normalizer
///
/// # Errors
/// See [`BlueprintNormalizer::prepare`].
pub fn prepare_blueprint(raw: &str) -> Result<PreparedBlueprint, BlueprintError> {
    BlueprintNormalizer::default().prepare(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn metadata() -> Value {
        json!({
            "title": "T",
            "organization": "O",
            "role": "R",
            "generated_at": "2026-01-01"
        })
    }

    #[test]
    fn rejects_non_objects() {
        let err = validate_blueprint_structure(&json!([1, 2])).unwrap_err();
        assert_eq!(err, BlueprintError::NotAnObject);
        assert!(validate_blueprint_structure(&Value::Null).is_err());
    }

    #[test]
    fn empty_metadata_field_is_reported() {
        let mut meta = metadata();
        meta["role"] = json!("  ");
        let err = validate_blueprint_structure(&json!({"metadata": meta, "a": {}})).unwrap_err();
        assert_eq!(err, BlueprintError::MissingMetadataField { field: "role" });
    }

    #[test]
    fn internal_keys_are_not_sections() {
        let doc = json!({"metadata": metadata(), "_debug": {}, "internalNotes": {}});
        assert_eq!(
            validate_blueprint_structure(&doc).unwrap_err(),
            BlueprintError::NoSections
        );
    }

    #[test]
    fn missing_tags_are_warnings() {
        let doc = json!({
            "metadata": metadata(),
            "summary": {"content": "x"},
            "plan": {"displayType": "gantt"},
            "notes": "plain text"
        });
        let report = validate_blueprint_structure(&doc).unwrap();
        assert_eq!(report.section_count, 3);
        assert_eq!(report.warnings.len(), 2);
    }

    #[test]
    fn normalize_leaves_input_and_metadata_alone() {
        let doc = json!({
            "metadata": metadata(),
            "summary": {"content": "x"},
            "_raw": {"content": "y"}
        });
        let before = doc.clone();
        let out = normalize_blueprint_structure(&doc);

        assert_eq!(doc, before);
        assert_eq!(out["metadata"], metadata());
        assert_eq!(out["summary"]["displayType"], json!("markdown"));
        assert!(out["_raw"].get("displayType").is_none());
    }

    #[test]
    fn known_tags_are_kept() {
        let doc = json!({"metadata": metadata(), "risks": {"displayType": "table", "text": "t"}});
        assert_eq!(normalize_blueprint_structure(&doc)["risks"]["displayType"], json!("table"));
    }

    #[test]
    fn non_string_tag_becomes_markdown() {
        let doc = json!({"metadata": metadata(), "s": {"displayType": 3}});
        assert_eq!(normalize_blueprint_structure(&doc)["s"]["displayType"], json!("markdown"));
    }

    #[test]
    fn strips_code_fences() {
        assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```\n{}\n```"), "{}");
        assert_eq!(strip_code_fence("  {}  "), "{}");
    }

    #[test]
    fn parse_reports_invalid_json() {
        let err = parse_blueprint("not json").unwrap_err();
        assert_eq!(err.code().as_str(), "INVALID_JSON");
    }

    #[test]
    fn internal_markers_are_configurable() {
        let normalizer = BlueprintNormalizer::new()
            .with_internal_prefix("x-")
            .with_internal_word("raw");
        assert!(normalizer.is_internal_key("x-trace"));
        assert!(normalizer.is_internal_key("raw_output"));
        assert!(normalizer.is_internal_key("debugInfo"));
        assert!(!normalizer.is_internal_key("executiveSummary"));
    }
}
