pub mod cache;
pub mod config;
pub mod engine;
pub mod fingerprint;
pub mod gate;
pub mod normalize;
pub mod rules;

pub use cache::{apply_cache_first, CorrectionLookup};
pub use config::{ConfigError, RuleBook};
pub use engine::{categorize_batch, categorize_one, CategorizedTx, Categorizer};
pub use fingerprint::merchant_fingerprint;
pub use gate::{review_decision, should_auto_apply, ReviewDecision, AUTO_APPLY_CONFIDENCE};
pub use normalize::normalize_text;
pub use rules::{apply_rules, test_pattern, validate_rule, CompiledRules};
