use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use hearth_core::{ClassificationResult, TxInput};

use crate::fingerprint::merchant_fingerprint;

/// Read-only view of the correction history: merchant fingerprint to the
/// category a person confirmed for it.
pub trait CorrectionLookup {
    fn category_for(&self, fingerprint: &str) -> Option<&str>;
}

impl<S: BuildHasher> CorrectionLookup for HashMap<String, String, S> {
    fn category_for(&self, fingerprint: &str) -> Option<&str> {
        self.get(fingerprint).map(String::as_str)
    }
}

impl CorrectionLookup for BTreeMap<String, String> {
    fn category_for(&self, fingerprint: &str) -> Option<&str> {
        self.get(fingerprint).map(String::as_str)
    }
}

/// Look the transaction's merchant up in the correction cache.
pub fn apply_cache_first<C>(tx: &TxInput, cache: &C) -> Option<ClassificationResult>
where
    C: CorrectionLookup + ?Sized,
{
    let fingerprint = merchant_fingerprint(&tx.description);
    if fingerprint.is_empty() {
        return None;
    }

    match cache.category_for(&fingerprint) {
        Some(category_id) => {
            tracing::debug!(tx_id = %tx.id, %fingerprint, category_id, "Correction cache hit");
            Some(ClassificationResult::from_cache(category_id))
        }
        None => {
            tracing::trace!(tx_id = %tx.id, %fingerprint, "Correction cache miss");
            None
        }
    }
}
