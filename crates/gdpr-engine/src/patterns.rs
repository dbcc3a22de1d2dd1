//! Pattern evaluation primitives for the rule matcher.

use crate::catalog::{ClausePattern, Rule};

/// Fraction of keywords present in the text, or None when nothing matched.
pub fn keyword_coverage(text_lower: &str, keywords: &[String]) -> Option<f32> {
    if keywords.is_empty() {
        return None;
    }
    let matched = keywords
        .iter()
        .filter(|keyword| text_lower.contains(keyword.as_str()))
        .count();
    if matched == 0 {
        None
    } else {
        Some(matched as f32 / keywords.len() as f32)
    }
}

/// True when every synonym group contributes at least one hit.
pub fn groups_all_present(text_lower: &str, groups: &[Vec<String>]) -> bool {
    !groups.is_empty()
        && groups
            .iter()
            .all(|group| group.iter().any(|term| text_lower.contains(term.as_str())))
}

/// Score a rule's pattern against one segment.
///
/// Regex and structural hits are exact matches and score 1.0; keyword sets
/// score proportional to coverage. Catalog terms are stored lowercase and
/// matched against the lowercased segment; regexes carry their own `(?i)`.
pub fn evaluate(rule: &Rule, text: &str, text_lower: &str) -> Option<f32> {
    match &rule.pattern {
        ClausePattern::KeywordSet { keywords } => keyword_coverage(text_lower, keywords),
        ClausePattern::Regex { .. } => {
            let re = rule.regex()?;
            re.is_match(text).then_some(1.0)
        }
        ClausePattern::Structural { groups } => {
            groups_all_present(text_lower, groups).then_some(1.0)
        }
    }
}
