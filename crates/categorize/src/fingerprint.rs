use crate::normalize::normalize_text;

/// Leading stable tokens kept in a fingerprint. Merchant names live at the
/// front of a description; whatever trails is location or reference noise.
const MAX_FINGERPRINT_TOKENS: usize = 4;

/// Stable key identifying "the same merchant" across transactions.
///
/// Built from the normalized description with per-transaction variable parts
/// (amounts, reference numbers) removed, so `UBER *TRIP 29,90` and
/// `UBER TRIP 14,50` collapse to the same key. Deterministic across calls and
/// processes; not a cryptographic digest.
pub fn merchant_fingerprint(description: &str) -> String {
    let normalized = normalize_text(description);

    let stable: Vec<&str> = normalized
        .split_whitespace()
        .filter(|t| !is_variable_token(t))
        .take(MAX_FINGERPRINT_TOKENS)
        .collect();

    if stable.is_empty() {
        // Nothing but numbers: fall back to the full normalized text rather
        // than letting unrelated descriptions share an empty key.
        return normalized;
    }
    stable.join(" ")
}

/// Pure numbers, and long codes that are mostly digits (auth codes, NSU,
/// invoice references).
fn is_variable_token(token: &str) -> bool {
    let digits = token.chars().filter(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return false;
    }
    let len = token.chars().count();
    digits == len || (len >= 6 && digits * 2 >= len)
}
