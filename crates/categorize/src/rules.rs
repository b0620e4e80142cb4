use hearth_core::{CategoryRuleRow, ClassificationResult, MatchType, RuleError, TxInput};
use regex::{Regex, RegexBuilder};

use crate::normalize::normalize_text;

/// Upper bound on a compiled rule regex. The `regex` crate matches in linear
/// time, so this only caps the cost of compiling a hostile pattern.
pub const REGEX_SIZE_LIMIT: usize = 1 << 20;

/// Lazy DFA cache budget per rule regex.
pub const REGEX_DFA_SIZE_LIMIT: usize = 1 << 20;

/// What a rule tests against the normalized description.
#[derive(Debug, Clone)]
enum Matcher {
    /// Normalized pattern for the literal match types.
    Literal { match_type: MatchType, pattern: String },
    Regex(Regex),
}

impl Matcher {
    fn compile(
        match_type: MatchType,
        pattern: &str,
        flags: Option<&str>,
    ) -> Result<Self, RuleError> {
        if let MatchType::Regex = match_type {
            if pattern.trim().is_empty() {
                return Err(RuleError::EmptyPattern);
            }
            return build_regex(pattern, flags).map(Matcher::Regex);
        }

        let pattern = normalize_text(pattern);
        if pattern.is_empty() {
            return Err(RuleError::EmptyPattern);
        }
        Ok(Matcher::Literal { match_type, pattern })
    }

    fn is_match(&self, normalized: &str) -> bool {
        match self {
            Matcher::Literal { match_type, pattern } => match match_type {
                MatchType::Equals => normalized == pattern,
                MatchType::StartsWith => normalized.starts_with(pattern.as_str()),
                MatchType::Contains => normalized.contains(pattern.as_str()),
                MatchType::Regex => false,
            },
            Matcher::Regex(re) => re.is_match(normalized),
        }
    }
}

/// Compile a stored regex rule. Descriptions are matched in normalized
/// (lower-cased) form, so matching is always case-insensitive.
fn build_regex(pattern: &str, flags: Option<&str>) -> Result<Regex, RuleError> {
    let mut builder = RegexBuilder::new(pattern);
    builder
        .case_insensitive(true)
        .size_limit(REGEX_SIZE_LIMIT)
        .dfa_size_limit(REGEX_DFA_SIZE_LIMIT);

    for flag in flags.unwrap_or_default().chars() {
        match flag {
            'i' => {
                builder.case_insensitive(true);
            }
            'm' => {
                builder.multi_line(true);
            }
            's' => {
                builder.dot_matches_new_line(true);
            }
            'u' => {
                builder.unicode(true);
            }
            'x' => {
                builder.ignore_whitespace(true);
            }
            // Stateful iteration flags; meaningless for a single test.
            'g' | 'y' | 'd' => {}
            c if c.is_whitespace() || c == ',' => {}
            other => return Err(RuleError::UnsupportedFlag(other)),
        }
    }

    builder.build().map_err(|e| RuleError::InvalidRegex {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })
}

/// A rule row paired with its ready-to-run matcher.
#[derive(Debug, Clone)]
struct CompiledRule<'a> {
    row: &'a CategoryRuleRow,
    match_type: MatchType,
    matcher: Matcher,
}

impl CompiledRule<'_> {
    /// Higher wins: priority first, then match-type specificity.
    fn rank(&self) -> (i32, u8) {
        (self.row.priority, self.match_type.specificity())
    }
}

fn compile_rule(row: &CategoryRuleRow) -> Result<CompiledRule<'_>, RuleError> {
    let match_type = row.match_type()?;
    let matcher = Matcher::compile(match_type, &row.pattern, row.flags.as_deref())?;
    Ok(CompiledRule {
        row,
        match_type,
        matcher,
    })
}

/// Active rules compiled once, ready to classify any number of transactions.
///
/// Input order is preserved: among matches of equal priority and equal
/// specificity the earliest rule wins, so results are reproducible for a
/// given rule list. Inactive and malformed rows are dropped here; malformed
/// ones are logged.
#[derive(Debug, Clone)]
pub struct CompiledRules<'a> {
    rules: Vec<CompiledRule<'a>>,
    skipped: usize,
}

impl<'a> CompiledRules<'a> {
    pub fn new(rows: &'a [CategoryRuleRow]) -> Self {
        let mut rules = Vec::with_capacity(rows.len());
        let mut skipped = 0;

        for row in rows.iter().filter(|r| r.is_active) {
            match compile_rule(row) {
                Ok(rule) => rules.push(rule),
                Err(e) => {
                    skipped += 1;
                    tracing::warn!(
                        rule_id = %row.id,
                        category_id = %row.category_id,
                        error = %e,
                        "Skipping malformed category rule"
                    );
                }
            }
        }

        Self { rules, skipped }
    }

    /// Number of usable rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Active rows that could not be compiled.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Winning rule for an already-normalized description.
    pub fn find_winner(&self, normalized: &str) -> Option<&'a CategoryRuleRow> {
        if normalized.is_empty() {
            return None;
        }

        self.rules
            .iter()
            .filter(|r| r.matcher.is_match(normalized))
            .reduce(|best, candidate| {
                if candidate.rank() > best.rank() {
                    candidate
                } else {
                    best
                }
            })
            .map(|r| r.row)
    }

    pub fn classify(&self, tx: &TxInput) -> Option<ClassificationResult> {
        let normalized = normalize_text(&tx.description);
        match self.find_winner(&normalized) {
            Some(rule) => {
                tracing::debug!(
                    tx_id = %tx.id,
                    rule_id = %rule.id,
                    category_id = %rule.category_id,
                    priority = rule.priority,
                    "Category rule matched"
                );
                Some(ClassificationResult::from_rule(
                    &rule.category_id,
                    &rule.id,
                    rule.confidence,
                ))
            }
            None => {
                tracing::trace!(tx_id = %tx.id, "No category rule matched");
                None
            }
        }
    }
}

/// Evaluate `rules` against one transaction. Inactive rules are ignored even
/// if the caller did not filter them; a malformed rule is skipped without
/// affecting the others.
pub fn apply_rules(tx: &TxInput, rules: &[CategoryRuleRow]) -> Option<ClassificationResult> {
    CompiledRules::new(rules).classify(tx)
}

/// Check that a rule row would take part in matching.
pub fn validate_rule(row: &CategoryRuleRow) -> Result<(), RuleError> {
    compile_rule(row).map(|_| ())
}

/// Try a pattern against sample text before saving it as a rule. Unlike rule
/// evaluation, a malformed pattern is reported instead of skipped.
pub fn test_pattern(
    match_type: &str,
    pattern: &str,
    flags: Option<&str>,
    text: &str,
) -> Result<bool, RuleError> {
    let matcher = Matcher::compile(match_type.parse()?, pattern, flags)?;
    Ok(matcher.is_match(&normalize_text(text)))
}
