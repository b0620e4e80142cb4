use std::collections::{HashMap, HashSet};

use hearth_core::CategoryRuleRow;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Rule {rule_id} has confidence {value} outside [0, 1]")]
    InvalidConfidence { rule_id: String, value: f64 },
    #[error("Duplicate rule id: {0}")]
    DuplicateRuleId(String),
}

/// A rule set and correction cache as a host application would hand them to
/// the categorizer, loaded from a TOML or JSON document.
///
/// ```toml
/// [[global]]
/// id = "uber"
/// categoryId = "transport"
/// matchType = "contains"
/// pattern = "UBER"
/// priority = 80
/// confidence = 0.9
///
/// [corrections]
/// "padaria sao joao" = "food"
/// ```
///
/// Patterns are not checked here; a malformed rule loads fine and is skipped
/// when rules are evaluated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleBook {
    #[serde(default)]
    pub global: Vec<CategoryRuleRow>,
    #[serde(default)]
    pub household: Vec<CategoryRuleRow>,
    /// Merchant fingerprint to confirmed category id.
    #[serde(default)]
    pub corrections: HashMap<String, String>,
}

impl RuleBook {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let book: RuleBook = toml::from_str(content)?;
        book.validate()?;
        Ok(book)
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let book: RuleBook = serde_json::from_str(content)?;
        book.validate()?;
        Ok(book)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for rule in self.global.iter().chain(&self.household) {
            if !(0.0..=1.0).contains(&rule.confidence) {
                return Err(ConfigError::InvalidConfidence {
                    rule_id: rule.id.clone(),
                    value: rule.confidence,
                });
            }
            if !seen.insert(rule.id.as_str()) {
                return Err(ConfigError::DuplicateRuleId(rule.id.clone()));
            }
        }
        Ok(())
    }

    /// Global and household rules as one unordered set. Neither side
    /// outranks the other; precedence comes from each rule's priority.
    pub fn rules(&self) -> Vec<CategoryRuleRow> {
        self.global.iter().chain(&self.household).cloned().collect()
    }

    pub fn corrections(&self) -> &HashMap<String, String> {
        &self.corrections
    }
}
