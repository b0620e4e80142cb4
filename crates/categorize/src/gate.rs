use hearth_core::{ClassificationResult, ClassificationSource};
use serde::{Deserialize, Serialize};

/// Rule-sourced categories at or above this confidence are written without
/// asking anyone.
pub const AUTO_APPLY_CONFIDENCE: f64 = 0.85;

pub fn should_auto_apply(confidence: f64) -> bool {
    confidence >= AUTO_APPLY_CONFIDENCE
}

/// What the caller should do with a categorization outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewDecision {
    AutoApply,
    /// A category was suggested but is not trusted enough to write.
    NeedsReview,
    Uncategorized,
}

/// Cache hits are confirmed human decisions and always apply; rule results
/// go through the confidence gate.
pub fn review_decision(result: Option<&ClassificationResult>) -> ReviewDecision {
    let Some(result) = result else {
        return ReviewDecision::Uncategorized;
    };

    match result.source {
        ClassificationSource::Cache => ReviewDecision::AutoApply,
        ClassificationSource::Rule => match result.confidence {
            Some(c) if should_auto_apply(c) => ReviewDecision::AutoApply,
            _ => ReviewDecision::NeedsReview,
        },
    }
}
