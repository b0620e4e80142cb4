pub mod classification;
pub mod rule;
pub mod transaction;

pub use classification::{ClassificationResult, ClassificationSource};
pub use rule::{CategoryRuleRow, MatchType, RuleError};
pub use transaction::TxInput;
