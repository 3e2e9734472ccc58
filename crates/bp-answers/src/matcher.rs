//! Multi-strategy option matching
//!
//! Maps one raw submitted string onto the closest option of the current
//! option list. Strategies run strongest first and the first hit wins:
//!
//! 1. **Exact**: raw equals `option.value`
//! 2. **Normalized**: case-insensitive value, or exact/case-insensitive label
//! 3. **Fuzzy**: hyphen/underscore substitution, then separator-stripped
//!    comparison; single-select also tries unambiguous substring containment
//! 4. **Boolean**: two-option single-select only, via affirmative/negative
//!    token sets
//!
//! Multi-select never uses substring or boolean matching.

use bp_schema::QuestionOption;
use serde::Serialize;

const AFFIRMATIVE: &[&str] = &["yes", "y", "true", "1", "on", "enabled", "agree"];
const NEGATIVE: &[&str] = &["no", "n", "false", "0", "off", "disabled", "disagree"];

/// Tokens shorter than this only match as whole words
const MIN_SUBSTRING_TOKEN: usize = 3;

/// How a raw value was matched, strongest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchConfidence {
    /// Verbatim option value
    Exact,
    /// Case or label variant
    Normalized,
    /// Separator-insensitive or substring match
    Fuzzy,
    /// Affirmative/negative token match
    Boolean,
}

/// Whether the question takes one value or many
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Single-select and toggles
    Single,
    /// Multi-select elements
    Multi,
}

/// Matcher over one question's option list
#[derive(Debug, Clone, Copy)]
pub struct OptionMatcher<'a> {
    options: &'a [QuestionOption],
    mode: MatchMode,
    substring_min_len: usize,
}

impl<'a> OptionMatcher<'a> {
    /// Create matcher
    #[inline]
    #[must_use]
    pub fn new(options: &'a [QuestionOption], mode: MatchMode, substring_min_len: usize) -> Self {
        Self {
            options,
            mode,
            substring_min_len,
        }
    }

    /// Closest option for `raw`, with the strategy that found it
    #[must_use]
    pub fn find(&self, raw: &str) -> Option<(&'a QuestionOption, MatchConfidence)> {
        if raw.trim().is_empty() {
            return None;
        }

        self.exact(raw)
            .map(|o| (o, MatchConfidence::Exact))
            .or_else(|| self.normalized(raw).map(|o| (o, MatchConfidence::Normalized)))
            .or_else(|| self.fuzzy(raw).map(|o| (o, MatchConfidence::Fuzzy)))
            .or_else(|| self.boolean(raw).map(|o| (o, MatchConfidence::Boolean)))
    }

    fn exact(&self, raw: &str) -> Option<&'a QuestionOption> {
        self.options.iter().find(|o| o.value == raw)
    }

    fn normalized(&self, raw: &str) -> Option<&'a QuestionOption> {
        let trimmed = raw.trim();
        let lower = trimmed.to_lowercase();

        self.options
            .iter()
            .find(|o| o.value.to_lowercase() == lower)
            .or_else(|| self.options.iter().find(|o| o.label.trim() == trimmed))
            .or_else(|| {
                self.options
                    .iter()
                    .find(|o| o.label.trim().to_lowercase() == lower)
            })
    }

    fn fuzzy(&self, raw: &str) -> Option<&'a QuestionOption> {
        let lower = raw.trim().to_lowercase();
        let underscored = lower.replace('-', "_");
        let hyphenated = lower.replace('_', "-");

        let substituted = self.options.iter().find(|o| {
            let value = o.value.to_lowercase();
            value == underscored || value == hyphenated
        });
        if substituted.is_some() {
            return substituted;
        }

        let squashed = squash(&lower);
        if !squashed.is_empty() {
            let stripped = self
                .options
                .iter()
                .find(|o| squash(&o.value) == squashed || squash(&o.label) == squashed);
            if stripped.is_some() {
                return stripped;
            }
        }

        match self.mode {
            MatchMode::Single => self.substring(&lower),
            MatchMode::Multi => None,
        }
    }

    /// Unique option related to `lower` by containment in either direction
    fn substring(&self, lower: &str) -> Option<&'a QuestionOption> {
        let min = self.substring_min_len;
        if lower.chars().count() <= min {
            return None;
        }

        let related = |candidate: String| {
            !candidate.is_empty()
                && (candidate.contains(lower)
                    || (candidate.chars().count() > min && lower.contains(candidate.as_str())))
        };

        let mut hits = self
            .options
            .iter()
            .filter(|o| related(o.value.to_lowercase()) || related(o.label.trim().to_lowercase()));

        match (hits.next(), hits.next()) {
            (Some(only), None) => Some(only),
            _ => None,
        }
    }

    fn boolean(&self, raw: &str) -> Option<&'a QuestionOption> {
        if self.mode != MatchMode::Single || self.options.len() != 2 {
            return None;
        }

        let wanted = Polarity::of_input(&raw.trim().to_lowercase())?;
        let mut hits = self
            .options
            .iter()
            .filter(|o| Polarity::of_option(o) == Some(wanted));

        match (hits.next(), hits.next()) {
            (Some(only), None) => Some(only),
            _ => None,
        }
    }
}

/// Lowercase with spaces, hyphens and underscores removed
fn squash(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

fn words(s: &str) -> Vec<String> {
    s.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Polarity {
    Affirmative,
    Negative,
}

impl Polarity {
    /// Classify user input; the longest matching token decides conflicts
    fn of_input(lower: &str) -> Option<Self> {
        let input_words = words(lower);
        let longest = |tokens: &[&str]| {
            tokens
                .iter()
                .filter(|t| {
                    lower == **t
                        || input_words.iter().any(|w| w == *t)
                        || (t.len() >= MIN_SUBSTRING_TOKEN && lower.contains(**t))
                })
                .map(|t| t.len())
                .max()
        };
        Self::decide(longest(AFFIRMATIVE), longest(NEGATIVE))
    }

    /// Classify an option by the words of its value and label
    fn of_option(option: &QuestionOption) -> Option<Self> {
        let mut option_words = words(&option.value);
        option_words.extend(words(&option.label));
        let longest = |tokens: &[&str]| {
            tokens
                .iter()
                .filter(|t| option_words.iter().any(|w| w == *t))
                .map(|t| t.len())
                .max()
        };
        Self::decide(longest(AFFIRMATIVE), longest(NEGATIVE))
    }

    fn decide(affirmative: Option<usize>, negative: Option<usize>) -> Option<Self> {
        match (affirmative, negative) {
            (Some(_), None) => Some(Self::Affirmative),
            (None, Some(_)) => Some(Self::Negative),
            (Some(a), Some(n)) if a > n => Some(Self::Affirmative),
            (Some(a), Some(n)) if n > a => Some(Self::Negative),
            _ => None,
        }
    }
}
