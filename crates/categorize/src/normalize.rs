//! Canonical form of a bank description, shared by rule matching and merchant
//! fingerprints.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Payment-rail markers. They say how money moved, never who was paid, and
/// are always dropped.
const RAIL_TOKENS: &[&str] = &["pix", "ted", "tef"];

/// Statement boilerplate. Dropped whenever a more specific token survives; a
/// description made only of boilerplate is kept as-is so it can still be
/// matched literally.
const BOILERPLATE_TOKENS: &[&str] = &[
    "pagamento",
    "pagto",
    "pgto",
    "compra",
    "debito",
    "credito",
    "cartao",
    "transferencia",
    "transf",
    "enviada",
    "enviado",
    "recebida",
    "recebido",
    "payment",
    "purchase",
    "pos",
];

/// Lower-case, strip accents and punctuation, drop banking noise and collapse
/// whitespace.
///
/// Total and idempotent: any input, including the empty string, yields a
/// string that normalizes to itself.
pub fn normalize_text(raw: &str) -> String {
    let folded = fold(&fold(raw).to_lowercase());

    let cleaned: String = folded
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();

    let tokens: Vec<&str> = cleaned
        .split_whitespace()
        .filter(|t| !RAIL_TOKENS.contains(t))
        .collect();

    let has_specific = tokens.iter().any(|t| !BOILERPLATE_TOKENS.contains(t));
    let kept: Vec<&str> = if has_specific {
        tokens
            .into_iter()
            .filter(|t| !BOILERPLATE_TOKENS.contains(t))
            .collect()
    } else {
        tokens
    };

    kept.join(" ")
}

/// Compatibility decomposition with combining marks removed ("São" -> "Sao").
fn fold(s: &str) -> String {
    s.nfkd().filter(|c| !is_combining_mark(*c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_collapses_whitespace() {
        assert_eq!(normalize_text("  UBER    TRIP  "), "uber trip");
    }

    #[test]
    fn strips_accents() {
        assert_eq!(normalize_text("PADARIA SÃO JOÃO"), "padaria sao joao");
        assert_eq!(normalize_text("Café Açaí"), "cafe acai");
    }

    #[test]
    fn punctuation_becomes_separator() {
        assert_eq!(normalize_text("UBER *TRIP 29,90"), "uber trip 29 90");
        assert_eq!(normalize_text("AMAZON.COM.BR"), "amazon com br");
    }

    #[test]
    fn drops_rail_and_boilerplate_tokens() {
        let out = normalize_text("PIX UBER PAGAMENTO 123");
        assert_eq!(out, "uber 123");
        assert!(!out.contains("pix"));
    }

    #[test]
    fn rail_marker_dropped_even_when_alone() {
        assert_eq!(normalize_text("PIX"), "");
        assert_eq!(normalize_text("PIX PAGAMENTO"), "pagamento");
    }

    #[test]
    fn boilerplate_only_description_is_kept() {
        assert_eq!(normalize_text("PAGAMENTO"), "pagamento");
        assert_eq!(normalize_text("Compra Débito"), "compra debito");
    }

    #[test]
    fn rail_marker_inside_a_word_is_not_noise() {
        assert_eq!(normalize_text("PIXAR STORE"), "pixar store");
    }

    #[test]
    fn empty_and_punctuation_only_inputs() {
        assert_eq!(normalize_text(""), "");
        assert_eq!(normalize_text("   "), "");
        assert_eq!(normalize_text("*** -- ///"), "");
    }

    #[test]
    fn idempotent() {
        let samples = [
            "PIX UBER PAGAMENTO 123",
            "UBER *TRIP 29,90",
            "PAGAMENTO",
            "PIX PAGAMENTO",
            "İSTANBUL KEBAB",
            "ﬁnance Straße",
            "",
            "Supermercado Pão de Açúcar #4411",
        ];
        for s in samples {
            let once = normalize_text(s);
            assert_eq!(normalize_text(&once), once, "not idempotent for {s:?}");
        }
    }
}
