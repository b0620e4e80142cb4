use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassificationSource {
    /// A category a person already confirmed for this merchant.
    Cache,
    Rule,
}

/// The outcome of categorizing one transaction.
///
/// `rule_id` and `confidence` are only set for rule-sourced results; a cache
/// hit is a confirmed human decision and carries no score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    pub category_id: String,
    pub source: ClassificationSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl ClassificationResult {
    pub fn from_cache(category_id: impl Into<String>) -> Self {
        ClassificationResult {
            category_id: category_id.into(),
            source: ClassificationSource::Cache,
            rule_id: None,
            confidence: None,
        }
    }

    pub fn from_rule(
        category_id: impl Into<String>,
        rule_id: impl Into<String>,
        confidence: f64,
    ) -> Self {
        ClassificationResult {
            category_id: category_id.into(),
            source: ClassificationSource::Rule,
            rule_id: Some(rule_id.into()),
            confidence: Some(confidence),
        }
    }

    pub fn is_cache_hit(&self) -> bool {
        self.source == ClassificationSource::Cache
    }
}
