//! Risk aggregator: merged evidence per category into final findings.
//!
//! Pure computation over already-gathered evidence. Anything inconsistent
//! reaching this stage is a programming error, not an input problem, and
//! fails loudly.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use shared_types::{CandidateSource, ClauseCategory, Finding, FindingStatus, Segment, Severity};

use crate::catalog::{Rule, RuleCatalog};
use crate::error::EngineError;
use crate::matcher::Candidate;

/// Confidence at or above which a mandatory category's severity escalates.
pub const ESCALATE_CONFIDENCE: f32 = 0.85;
/// Confidence below which severity softens one level.
pub const SOFTEN_CONFIDENCE: f32 = 0.6;

/// Weight of a candidate confirmed by both a rule and the classifier.
const BOTH_SOURCES_WEIGHT: f32 = 2.0;

/// Merge candidates into at most one finding per category, then append
/// missing-mandatory findings for required categories with no evidence.
pub fn aggregate(
    segments: &[Segment],
    candidates: &[Candidate],
    categories_with_zero_hits: &BTreeSet<ClauseCategory>,
    catalog: &RuleCatalog,
    evidence_threshold: f32,
) -> Result<Vec<Finding>, EngineError> {
    let segment_by_id: HashMap<u32, &Segment> =
        segments.iter().map(|s| (s.id, s)).collect();

    let mut by_category: BTreeMap<ClauseCategory, Vec<&Candidate>> = BTreeMap::new();
    for candidate in candidates {
        if !catalog.contains_category(candidate.category) {
            return Err(EngineError::InvariantViolation(format!(
                "candidate references category {} absent from catalog {}",
                candidate.category.name(),
                catalog.version
            )));
        }
        if !segment_by_id.contains_key(&candidate.segment_id) {
            return Err(EngineError::InvariantViolation(format!(
                "candidate references unknown segment {}",
                candidate.segment_id
            )));
        }
        by_category.entry(candidate.category).or_default().push(candidate);
    }

    let mut findings = Vec::new();
    let mut present: BTreeSet<ClauseCategory> = BTreeSet::new();

    for (category, group) in &by_category {
        let contributing: Vec<&&Candidate> = group
            .iter()
            .filter(|c| c.raw_score >= evidence_threshold)
            .collect();
        if contributing.is_empty() {
            // Weak signal only; neither present nor absent enough to report.
            continue;
        }
        present.insert(*category);

        let mut weight_sum = 0.0f32;
        let mut weighted_score = 0.0f32;
        let mut evidence_ids: Vec<u32> = Vec::new();
        let mut matched_rules: Vec<&Rule> = Vec::new();
        for candidate in &contributing {
            let weight = if candidate.source == CandidateSource::Both {
                BOTH_SOURCES_WEIGHT
            } else {
                1.0
            };
            weight_sum += weight;
            weighted_score += weight * candidate.raw_score;
            if !evidence_ids.contains(&candidate.segment_id) {
                evidence_ids.push(candidate.segment_id);
            }
            if let Some(rule_id) = &candidate.rule_id {
                let rule = catalog.rule_by_id(rule_id).ok_or_else(|| {
                    EngineError::InvariantViolation(format!(
                        "candidate references unknown rule {rule_id}"
                    ))
                })?;
                if !matched_rules.iter().any(|r| r.id == rule.id) {
                    matched_rules.push(rule);
                }
            }
        }
        let confidence = weighted_score / weight_sum;

        evidence_ids.sort_unstable();
        let evidence: Vec<Segment> = evidence_ids
            .iter()
            .map(|id| segment_by_id[id].clone())
            .collect();

        // The governing rule sets severity and status; the most severe
        // matched rule governs, falling back to the category's first
        // catalog rule for semantic-only findings.
        let governing = matched_rules
            .iter()
            .min_by_key(|r| r.base_severity.rank())
            .copied()
            .or_else(|| catalog.rules_for(*category).next());

        let base_severity = governing.map_or(Severity::Info, |r| r.base_severity);
        let risky = matched_rules.iter().any(|r| r.risk);
        let required = catalog.is_required(*category);

        let mut severity = base_severity;
        if confidence >= ESCALATE_CONFIDENCE && required {
            severity = severity.escalate();
        } else if confidence < SOFTEN_CONFIDENCE {
            severity = severity.soften();
        }

        let status = if risky {
            FindingStatus::PresentRisky
        } else {
            FindingStatus::Compliant
        };
        let explanation = if risky {
            matched_rules
                .iter()
                .filter(|r| r.risk)
                .map(|r| r.explanation.clone())
                .collect::<Vec<_>>()
                .join(" ")
        } else {
            governing.map_or_else(
                || format!("{} is addressed in the agreement.", category.name()),
                |r| r.explanation.clone(),
            )
        };

        findings.push(Finding {
            category: *category,
            severity,
            confidence,
            evidence,
            explanation,
            status,
        });
    }

    for category in categories_with_zero_hits {
        if !catalog.is_required(*category) || present.contains(category) {
            continue;
        }
        findings.push(Finding {
            category: *category,
            severity: Severity::Critical,
            confidence: 1.0,
            evidence: Vec::new(),
            explanation: format!(
                "Mandatory clause category {} is not addressed anywhere in the document.",
                category.name()
            ),
            status: FindingStatus::MissingMandatory,
        });
    }

    findings.sort_by(|a, b| {
        a.severity
            .rank()
            .cmp(&b.severity.rank())
            .then_with(|| a.category.name().cmp(b.category.name()))
    });

    Ok(findings)
}
