use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// One stored categorization rule, as handed over by the rules repository.
///
/// `match_type` is kept as the raw stored string so that a row with an
/// unknown type still loads; it is parsed when the rule is evaluated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRuleRow {
    pub id: String,
    /// `None` for global rules shared by every household.
    #[serde(default)]
    pub family_id: Option<String>,
    pub category_id: String,
    #[serde(default)]
    pub name: String,
    pub match_type: String,
    pub pattern: String,
    #[serde(default)]
    pub flags: Option<String>,
    #[serde(default)]
    pub priority: i32,
    pub confidence: f64,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl CategoryRuleRow {
    pub fn match_type(&self) -> Result<MatchType, RuleError> {
        self.match_type.parse()
    }

    pub fn is_global(&self) -> bool {
        self.family_id.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchType {
    Contains,
    Regex,
    StartsWith,
    Equals,
}

impl MatchType {
    /// Tie-break rank between rules of equal priority: a tighter match wins.
    pub fn specificity(self) -> u8 {
        match self {
            MatchType::Equals => 3,
            MatchType::StartsWith => 2,
            MatchType::Contains => 1,
            MatchType::Regex => 0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MatchType::Contains => "contains",
            MatchType::Regex => "regex",
            MatchType::StartsWith => "startsWith",
            MatchType::Equals => "equals",
        }
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MatchType {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "contains" => Ok(MatchType::Contains),
            "regex" => Ok(MatchType::Regex),
            "startswith" | "starts_with" => Ok(MatchType::StartsWith),
            "equals" => Ok(MatchType::Equals),
            _ => Err(RuleError::UnknownMatchType(s.to_string())),
        }
    }
}

/// Why a rule cannot take part in matching. These are data-quality problems
/// in the stored rule, never runtime failures of the categorizer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuleError {
    #[error("Unknown match type: '{0}'")]
    UnknownMatchType(String),
    #[error("Invalid regex '{pattern}': {reason}")]
    InvalidRegex { pattern: String, reason: String },
    #[error("Unsupported regex flag: '{0}'")]
    UnsupportedFlag(char),
    #[error("Pattern is empty after normalization")]
    EmptyPattern,
}
