use hearth_core::{CategoryRuleRow, ClassificationResult, TxInput};
use serde::Serialize;

use crate::cache::{apply_cache_first, CorrectionLookup};
use crate::gate::{review_decision, ReviewDecision};
use crate::rules::CompiledRules;

/// Cache-then-rules categorizer over one correction cache and one rule list.
///
/// Holds only borrowed, read-only inputs, so a single instance can be shared
/// across threads for a batch.
pub struct Categorizer<'a, C: ?Sized> {
    cache: &'a C,
    rules: CompiledRules<'a>,
}

impl<'a, C> Categorizer<'a, C>
where
    C: CorrectionLookup + ?Sized,
{
    pub fn new(cache: &'a C, rules: &'a [CategoryRuleRow]) -> Self {
        Self {
            cache,
            rules: CompiledRules::new(rules),
        }
    }

    /// A confirmed correction for the merchant always beats any rule.
    pub fn categorize(&self, tx: &TxInput) -> Option<ClassificationResult> {
        apply_cache_first(tx, self.cache).or_else(|| self.rules.classify(tx))
    }

    pub fn rules(&self) -> &CompiledRules<'a> {
        &self.rules
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorizedTx {
    pub tx_id: String,
    pub result: Option<ClassificationResult>,
    pub decision: ReviewDecision,
}

pub fn categorize_one<C>(
    tx: &TxInput,
    cache: &C,
    rules: &[CategoryRuleRow],
) -> Option<ClassificationResult>
where
    C: CorrectionLookup + ?Sized,
{
    Categorizer::new(cache, rules).categorize(tx)
}

/// Categorize every transaction with one rule compilation. Output order
/// follows `txs`; nothing is persisted.
pub fn categorize_batch<C>(
    txs: &[TxInput],
    cache: &C,
    rules: &[CategoryRuleRow],
) -> Vec<CategorizedTx>
where
    C: CorrectionLookup + ?Sized,
{
    let categorizer = Categorizer::new(cache, rules);
    let outcomes: Vec<CategorizedTx> = txs
        .iter()
        .map(|tx| {
            let result = categorizer.categorize(tx);
            let decision = review_decision(result.as_ref());
            CategorizedTx {
                tx_id: tx.id.clone(),
                result,
                decision,
            }
        })
        .collect();

    let applied = outcomes
        .iter()
        .filter(|o| o.decision == ReviewDecision::AutoApply)
        .count();
    tracing::info!(
        total = outcomes.len(),
        auto_apply = applied,
        skipped_rules = categorizer.rules().skipped(),
        "Categorized batch"
    );

    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fingerprint::merchant_fingerprint;
    use hearth_core::ClassificationSource;
    use std::collections::HashMap;

    fn make_rule(id: &str, pattern: &str, category: &str, confidence: f64) -> CategoryRuleRow {
        CategoryRuleRow {
            id: id.to_string(),
            family_id: None,
            category_id: category.to_string(),
            name: id.to_string(),
            match_type: "contains".to_string(),
            pattern: pattern.to_string(),
            flags: None,
            priority: 10,
            confidence,
            is_active: true,
        }
    }

    fn cache_with(description: &str, category: &str) -> HashMap<String, String> {
        HashMap::from([(merchant_fingerprint(description), category.to_string())])
    }

    #[test]
    fn cache_wins_over_matching_rule() {
        let cache = cache_with("UBER TRIP", "food");
        let rules = vec![make_rule("r1", "UBER", "transport", 0.95)];
        let result = categorize_one(&TxInput::new("t1", "UBER TRIP"), &cache, &rules).unwrap();
        assert_eq!(result, ClassificationResult::from_cache("food"));
    }

    #[test]
    fn falls_back_to_rules_on_cache_miss() {
        let cache = cache_with("IFOOD", "food");
        let rules = vec![make_rule("r1", "UBER", "transport", 0.95)];
        let result = categorize_one(&TxInput::new("t1", "UBER TRIP"), &cache, &rules).unwrap();
        assert_eq!(result.source, ClassificationSource::Rule);
        assert_eq!(result.category_id, "transport");
    }

    #[test]
    fn nothing_matches() {
        let cache: HashMap<String, String> = HashMap::new();
        assert!(categorize_one(&TxInput::new("t1", "PADARIA"), &cache, &[]).is_none());
    }

    #[test]
    fn batch_preserves_order_and_decides() {
        let cache = cache_with("NETFLIX", "streaming");
        let rules = vec![
            make_rule("r1", "UBER", "transport", 0.95),
            make_rule("r2", "MERCADO", "groceries", 0.6),
        ];
        let txs = vec![
            TxInput::new("a", "UBER TRIP"),
            TxInput::new("b", "NETFLIX 39,90"),
            TxInput::new("c", "MERCADO DO ZE"),
            TxInput::new("d", "LOJA DESCONHECIDA"),
        ];

        let out = categorize_batch(&txs, &cache, &rules);
        let ids: Vec<&str> = out.iter().map(|o| o.tx_id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c", "d"]);

        let decisions: Vec<ReviewDecision> = out.iter().map(|o| o.decision).collect();
        assert_eq!(
            decisions,
            [
                ReviewDecision::AutoApply,
                ReviewDecision::AutoApply,
                ReviewDecision::NeedsReview,
                ReviewDecision::Uncategorized,
            ]
        );
        assert_eq!(
            out[1].result.as_ref().map(|r| r.source),
            Some(ClassificationSource::Cache)
        );
    }

    #[test]
    fn categorizer_is_shareable_across_threads() {
        let cache = cache_with("UBER TRIP", "transport");
        let rules = vec![make_rule("r1", "IFOOD", "food", 0.9)];
        let categorizer = Categorizer::new(&cache, &rules);

        std::thread::scope(|s| {
            let handles: Vec<_> = ["UBER TRIP 10,00", "IFOOD 123"]
                .into_iter()
                .map(|desc| {
                    let categorizer = &categorizer;
                    s.spawn(move || categorizer.categorize(&TxInput::new("t", desc)))
                })
                .collect();
            let categories: Vec<String> = handles
                .into_iter()
                .map(|h| h.join().unwrap().unwrap().category_id)
                .collect();
            assert_eq!(categories, ["transport", "food"]);
        });
    }
}
