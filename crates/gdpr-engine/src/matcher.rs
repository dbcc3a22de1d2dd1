//! Rule matcher: declarative GDPR rules applied per segment.

use std::collections::BTreeSet;

use shared_types::{CandidateSource, ClauseCategory, Segment};

use crate::catalog::RuleCatalog;
use crate::patterns;

/// Unconfirmed evidence that a segment pertains to a category. Transient,
/// produced and consumed within one analysis run.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub segment_id: u32,
    pub rule_id: Option<String>,
    pub category: ClauseCategory,
    pub raw_score: f32,
    pub source: CandidateSource,
}

#[derive(Debug)]
pub struct MatchOutcome {
    /// At most one candidate per (segment, category), in segment order then
    /// catalog rule order.
    pub candidates: Vec<Candidate>,
    /// Catalog categories no rule fired on anywhere in the document. Total
    /// absence of a mandatory category is itself a finding.
    pub categories_with_zero_hits: BTreeSet<ClauseCategory>,
}

/// Evaluate every catalog rule against every segment.
///
/// Deterministic: identical input yields the identical candidate list. When
/// several rules of one category fire on the same segment, risk-marked hits
/// outrank presence hits regardless of score, strongest within each class;
/// a risk marker must stay visible to the aggregator.
pub fn match_segments(segments: &[Segment], catalog: &RuleCatalog) -> MatchOutcome {
    let mut candidates: Vec<Candidate> = Vec::new();
    let mut hit_categories: BTreeSet<ClauseCategory> = BTreeSet::new();

    for segment in segments {
        let text_lower = segment.text.to_lowercase();
        // (category, score, risk, rule index) winners for this segment
        let mut winners: Vec<(ClauseCategory, f32, bool, usize)> = Vec::new();

        for (rule_index, rule) in catalog.rules.iter().enumerate() {
            let Some(score) = patterns::evaluate(rule, &segment.text, &text_lower) else {
                continue;
            };
            match winners.iter_mut().find(|(cat, ..)| *cat == rule.category) {
                Some(winner) if (rule.risk, score) > (winner.2, winner.1) => {
                    *winner = (rule.category, score, rule.risk, rule_index);
                }
                Some(_) => {}
                None => winners.push((rule.category, score, rule.risk, rule_index)),
            }
        }

        for (category, score, _, rule_index) in winners {
            hit_categories.insert(category);
            candidates.push(Candidate {
                segment_id: segment.id,
                rule_id: Some(catalog.rules[rule_index].id.clone()),
                category,
                raw_score: score,
                source: CandidateSource::Rule,
            });
        }
    }

    let categories_with_zero_hits = catalog
        .categories()
        .filter(|category| !hit_categories.contains(category))
        .collect();

    MatchOutcome {
        candidates,
        categories_with_zero_hits,
    }
}
