//! Question schema model
//!
//! Questions are produced by the question generator and are read-only from
//! the engine's point of view. A regenerated questionnaire may keep the same
//! question ids while rotating the option lists underneath them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Input widget family of a question
///
/// Accepts the widget names emitted by the question generator as aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    /// Single-line free text
    Text,
    /// Multi-line free text
    Textarea,
    /// Free text in email format
    Email,
    /// Free text in URL format
    Url,
    /// Pick exactly one option
    #[serde(alias = "radio_pills", alias = "radio_cards", alias = "select")]
    SingleSelect,
    /// Pick any number of options
    #[serde(alias = "checkbox_pills", alias = "checkbox_cards")]
    MultiSelect,
    /// Two-state switch
    #[serde(alias = "toggle_switch")]
    Toggle,
    /// Bounded integer scale
    #[serde(alias = "enhanced_scale")]
    Scale,
    /// Bounded real slider
    #[serde(alias = "labeled_slider")]
    Slider,
    /// Currency amount
    Currency,
    /// Plain number
    #[serde(alias = "number_spinner")]
    Number,
    /// ISO-8601 date
    Date,
}

impl InputKind {
    /// Whether answers are matched against an option list
    #[inline]
    #[must_use]
    pub fn is_selection(&self) -> bool {
        matches!(self, Self::SingleSelect | Self::MultiSelect | Self::Toggle)
    }

    /// Whether answers are arrays
    #[inline]
    #[must_use]
    pub fn is_multi(&self) -> bool {
        matches!(self, Self::MultiSelect)
    }

    /// Whether answers are numbers
    #[inline]
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::Scale | Self::Slider | Self::Currency | Self::Number
        )
    }

    /// Wire name
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Textarea => "textarea",
            Self::Email => "email",
            Self::Url => "url",
            Self::SingleSelect => "single_select",
            Self::MultiSelect => "multi_select",
            Self::Toggle => "toggle",
            Self::Scale => "scale",
            Self::Slider => "slider",
            Self::Currency => "currency",
            Self::Number => "number",
            Self::Date => "date",
        }
    }
}

impl std::fmt::Display for InputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One selectable option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionOption {
    /// Canonical lowercase-hyphenated token
    pub value: String,
    /// Display label
    pub label: String,
    /// Optional helper text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Greyed out in the UI
    #[serde(default)]
    pub disabled: bool,
}

impl QuestionOption {
    /// Create an enabled option
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            description: None,
            disabled: false,
        }
    }

    /// Create an option whose value is derived from its label
    #[must_use]
    pub fn from_label(label: impl Into<String>) -> Self {
        let label = label.into();
        let value = crate::option_value::generate_standard_option_value(&label);
        Self::new(value, label)
    }

    /// With description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Mark disabled
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

/// Inclusive min/max constraint with an optional declared failure message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds<T> {
    /// Lower bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<T>,
    /// Upper bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<T>,
    /// Message reported instead of the default one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> Bounds<T> {
    /// Bounds on both sides
    #[must_use]
    pub fn new(min: Option<T>, max: Option<T>) -> Self {
        Self {
            min,
            max,
            message: None,
        }
    }

    /// With declared failure message
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl<T: PartialOrd> Bounds<T> {
    /// `min <= max` whenever both are set
    #[must_use]
    pub fn is_ordered(&self) -> bool {
        match (&self.min, &self.max) {
            (Some(min), Some(max)) => min <= max,
            _ => true,
        }
    }
}

/// Kind of a custom validation rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RuleKind {
    /// Answer must be present
    Required,
    /// Numeric lower bound
    Min,
    /// Numeric upper bound
    Max,
    /// Minimum text length or selection count
    MinLength,
    /// Maximum text length or selection count
    MaxLength,
    /// Text must match a regular expression
    Pattern,
    /// Text must be an email address
    Email,
    /// Text must be an http(s) URL
    Url,
}

/// Custom validation rule attached to a question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    /// What the rule checks
    #[serde(rename = "type", alias = "kind")]
    pub kind: RuleKind,
    /// Rule argument (bound or pattern)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// Message reported on failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Rule {
    /// Rule with an argument
    #[must_use]
    pub fn new(kind: RuleKind, value: impl Into<Value>) -> Self {
        Self {
            kind,
            value: Some(value.into()),
            message: None,
        }
    }

    /// Rule without an argument
    #[must_use]
    pub fn flag(kind: RuleKind) -> Self {
        Self {
            kind,
            value: None,
            message: None,
        }
    }

    /// With failure message
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// One answerable item
///
/// The widget family is read from `inputKind` or, for generator payloads,
/// `type`; when both are present `inputKind` wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "QuestionRecord")]
pub struct Question {
    /// Unique within a questionnaire
    pub id: String,
    /// Prompt shown to the user
    #[serde(default)]
    pub label: String,
    /// Widget family
    pub input_kind: InputKind,
    /// Must be answered before submission
    #[serde(default)]
    pub required: bool,
    /// Options for selection kinds
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<QuestionOption>,
    /// Numeric min/max
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numeric_bounds: Option<Bounds<f64>>,
    /// Text length or selection-count min/max
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length_bounds: Option<Bounds<usize>>,
    /// Integer scale min/max
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_bounds: Option<Bounds<f64>>,
    /// Additional rules
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_rules: Vec<Rule>,
}

/// Wire shape of a question before the widget family is settled
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuestionRecord {
    id: String,
    #[serde(default)]
    label: String,
    #[serde(default)]
    input_kind: Option<InputKind>,
    #[serde(default, rename = "type")]
    widget: Option<InputKind>,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    options: Vec<QuestionOption>,
    #[serde(default)]
    numeric_bounds: Option<Bounds<f64>>,
    #[serde(default)]
    length_bounds: Option<Bounds<usize>>,
    #[serde(default)]
    scale_bounds: Option<Bounds<f64>>,
    #[serde(default)]
    custom_rules: Vec<Rule>,
}

impl TryFrom<QuestionRecord> for Question {
    type Error = String;

    fn try_from(record: QuestionRecord) -> Result<Self, Self::Error> {
        let input_kind = record
            .input_kind
            .or(record.widget)
            .ok_or_else(|| format!("question {} has no inputKind or type", record.id))?;

        Ok(Self {
            id: record.id,
            label: record.label,
            input_kind,
            required: record.required,
            options: record.options,
            numeric_bounds: record.numeric_bounds,
            length_bounds: record.length_bounds,
            scale_bounds: record.scale_bounds,
            custom_rules: record.custom_rules,
        })
    }
}

impl Question {
    /// Create an optional question without options
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>, input_kind: InputKind) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            input_kind,
            required: false,
            options: Vec::new(),
            numeric_bounds: None,
            length_bounds: None,
            scale_bounds: None,
            custom_rules: Vec::new(),
        }
    }

    /// Mark required
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// With options
    #[must_use]
    pub fn with_options(mut self, options: impl IntoIterator<Item = QuestionOption>) -> Self {
        self.options = options.into_iter().collect();
        self
    }

    /// With numeric bounds
    #[must_use]
    pub fn with_numeric_bounds(mut self, bounds: Bounds<f64>) -> Self {
        self.numeric_bounds = Some(bounds);
        self
    }

    /// With length bounds
    #[must_use]
    pub fn with_length_bounds(mut self, bounds: Bounds<usize>) -> Self {
        self.length_bounds = Some(bounds);
        self
    }

    /// With scale bounds
    #[must_use]
    pub fn with_scale_bounds(mut self, bounds: Bounds<f64>) -> Self {
        self.scale_bounds = Some(bounds);
        self
    }

    /// Append a custom rule
    #[must_use]
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.custom_rules.push(rule);
        self
    }

    /// Find option by exact value
    #[must_use]
    pub fn option(&self, value: &str) -> Option<&QuestionOption> {
        self.options.iter().find(|o| o.value == value)
    }

    /// Option labels, at most `limit` of them
    #[must_use]
    pub fn option_labels(&self, limit: usize) -> Vec<&str> {
        self.options
            .iter()
            .take(limit)
            .map(|o| o.label.as_str())
            .collect()
    }
}

/// Ordered group of questions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// Section id
    pub id: String,
    /// Heading
    #[serde(default)]
    pub title: String,
    /// Questions in display order
    pub questions: Vec<Question>,
}

impl Section {
    /// Create a section
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        questions: impl IntoIterator<Item = Question>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            questions: questions.into_iter().collect(),
        }
    }
}

/// A full generated questionnaire
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Questionnaire {
    /// Sections in display order
    pub sections: Vec<Section>,
}

impl Questionnaire {
    /// Wrap sections
    #[must_use]
    pub fn new(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    /// All questions in display order
    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.sections.iter().flat_map(|s| s.questions.iter())
    }

    /// Find question by id
    #[must_use]
    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions().find(|q| q.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn input_kind_accepts_widget_aliases() {
        let kinds: Vec<InputKind> = serde_json::from_value(json!([
            "radio_pills",
            "checkbox_cards",
            "toggle_switch",
            "enhanced_scale",
            "labeled_slider",
            "number_spinner",
            "select",
            "date"
        ]))
        .unwrap();

        assert_eq!(
            kinds,
            vec![
                InputKind::SingleSelect,
                InputKind::MultiSelect,
                InputKind::Toggle,
                InputKind::Scale,
                InputKind::Slider,
                InputKind::Number,
                InputKind::SingleSelect,
                InputKind::Date,
            ]
        );
    }

    #[test]
    fn question_deserializes_from_generator_shape() {
        let question: Question = serde_json::from_value(json!({
            "id": "q_goals",
            "label": "What matters most?",
            "type": "checkbox_pills",
            "required": true,
            "options": [
                { "value": "quality", "label": "Quality" },
                { "value": "speed", "label": "Speed", "disabled": true }
            ],
            "lengthBounds": { "max": 2, "message": "Pick up to two" }
        }))
        .unwrap();

        assert_eq!(question.input_kind, InputKind::MultiSelect);
        assert!(question.required);
        assert_eq!(question.options.len(), 2);
        assert!(question.options[1].disabled);
        assert_eq!(
            question.length_bounds.unwrap().message.as_deref(),
            Some("Pick up to two")
        );
    }

    #[test]
    fn input_kind_prefers_explicit_key_over_widget_name() {
        let question: Question = serde_json::from_value(json!({
            "id": "q",
            "inputKind": "multi_select",
            "type": "radio_pills",
            "options": [{ "value": "a", "label": "A" }]
        }))
        .unwrap();
        assert_eq!(question.input_kind, InputKind::MultiSelect);

        let err = serde_json::from_value::<Question>(json!({ "id": "q" })).unwrap_err();
        assert!(err.to_string().contains("no inputKind or type"));
    }

    #[test]
    fn serialized_question_reads_back() {
        let question = Question::new("q", "Q", InputKind::Toggle).required();
        let wire = serde_json::to_value(&question).unwrap();
        assert_eq!(wire["inputKind"], json!("toggle"));
        assert_eq!(serde_json::from_value::<Question>(wire).unwrap(), question);
    }

    #[test]
    fn bounds_ordering() {
        assert!(Bounds::new(Some(1.0), Some(5.0)).is_ordered());
        assert!(Bounds::<f64>::new(None, Some(5.0)).is_ordered());
        assert!(!Bounds::new(Some(6usize), Some(5)).is_ordered());
    }

    #[test]
    fn option_labels_are_bounded() {
        let q = Question::new("q", "Q", InputKind::SingleSelect).with_options(
            ["A", "B", "C"].into_iter().map(QuestionOption::from_label),
        );
        assert_eq!(q.option_labels(2), vec!["A", "B"]);
        assert_eq!(q.option("b").map(|o| o.label.as_str()), Some("B"));
    }

    #[test]
    fn questionnaire_lookup_spans_sections() {
        let questionnaire = Questionnaire::new(vec![
            Section::new("s1", "One", [Question::new("a", "A", InputKind::Text)]),
            Section::new("s2", "Two", [Question::new("b", "B", InputKind::Date)]),
        ]);
        assert_eq!(questionnaire.questions().count(), 2);
        assert_eq!(
            questionnaire.question("b").map(|q| q.input_kind),
            Some(InputKind::Date)
        );
    }
}
