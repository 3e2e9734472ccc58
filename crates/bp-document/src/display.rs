//! Presentation types for blueprint sections

use serde::{Deserialize, Serialize};
use std::fmt;

/// Key holding a section's presentation tag
pub const DISPLAY_TYPE_KEY: &str = "displayType";

/// How a section is rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayType {
    /// Free-form prose; the fallback for anything unrecognized
    #[default]
    Markdown,
    /// Rows of comparable entries
    Table,
    /// Dated phases or milestones
    Timeline,
    /// Targets and measurements
    Infographic,
}

impl DisplayType {
    /// All known types
    pub const ALL: [Self; 4] = [Self::Markdown, Self::Table, Self::Timeline, Self::Infographic];

    /// Parse a tag; exact lowercase names only
    #[must_use]
    pub fn parse(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == tag)
    }

    /// Tag value
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::Table => "table",
            Self::Timeline => "timeline",
            Self::Infographic => "infographic",
        }
    }
}

impl fmt::Display for DisplayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
