//! Semantic scorer: classifier-backed detection of paraphrased clauses.
//!
//! The classifier is an injected capability (local model, remote call, or a
//! deterministic stub). Calls fan out with bounded concurrency and results
//! are re-sorted by segment index, so output never depends on scheduling.
//! The scorer is the only stage allowed to touch external latency; it is
//! also the only stage that degrades instead of failing.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use futures::{stream, StreamExt};
use shared_types::{AnalysisWarning, CandidateSource, ClauseCategory, Segment, WarningCode};

use crate::catalog::RuleCatalog;
use crate::matcher::Candidate;
use crate::options::AnalyzeOptions;

/// Embedding/classification capability: per-category affinity scores in
/// 0.0..=1.0 for one piece of text. Implementations decide how: embedding
/// similarity against the catalog's category descriptions, a hosted
/// classifier, anything satisfying the signature.
#[async_trait]
pub trait ClauseClassifier: Send + Sync {
    async fn classify(&self, text: &str) -> anyhow::Result<HashMap<ClauseCategory, f32>>;
}

/// Classifier that never reports a signal. Rule-only operation.
pub struct NullClassifier;

#[async_trait]
impl ClauseClassifier for NullClassifier {
    async fn classify(&self, _text: &str) -> anyhow::Result<HashMap<ClauseCategory, f32>> {
        Ok(HashMap::new())
    }
}

#[derive(Debug)]
pub struct SemanticOutcome {
    pub candidates: Vec<Candidate>,
    pub warnings: Vec<AnalysisWarning>,
}

/// Score every segment against the category catalog and merge with the rule
/// candidates.
///
/// Guarantees at most one candidate per (segment, category): a semantic hit
/// on a pair that already has a rule candidate upgrades it to
/// `CandidateSource::Both` with the max of the two scores. Classifier
/// failure or timeout drops that segment's semantic contribution only.
pub async fn score(
    segments: &[Segment],
    rule_candidates: Vec<Candidate>,
    catalog: &RuleCatalog,
    classifier: &dyn ClauseClassifier,
    options: &AnalyzeOptions,
) -> SemanticOutcome {
    let mut candidates = rule_candidates;
    let mut warnings = Vec::new();

    let timeout = Duration::from_millis(options.embed_timeout_ms);
    let calls = segments.iter().enumerate().map(|(index, segment)| async move {
        let result = tokio::time::timeout(timeout, classifier.classify(&segment.text)).await;
        (index, result)
    });
    let mut results: Vec<_> = stream::iter(calls)
        .buffer_unordered(options.max_concurrency.max(1))
        .collect()
        .await;
    results.sort_by_key(|(index, _)| *index);

    let mut failed_calls = 0usize;
    for (index, result) in results {
        let segment = &segments[index];
        let scores = match result {
            Ok(Ok(scores)) => scores,
            Ok(Err(error)) => {
                tracing::warn!(segment_id = segment.id, %error, "classifier call failed");
                warnings.push(AnalysisWarning {
                    code: WarningCode::ClassifierError,
                    detail: format!("classifier failed: {error}"),
                    segment_id: Some(segment.id),
                });
                failed_calls += 1;
                continue;
            }
            Err(_) => {
                tracing::warn!(
                    segment_id = segment.id,
                    timeout_ms = options.embed_timeout_ms,
                    "classifier call timed out; dropping semantic signal for segment"
                );
                warnings.push(AnalysisWarning {
                    code: WarningCode::ClassifierTimeout,
                    detail: format!("classifier timed out after {}ms", options.embed_timeout_ms),
                    segment_id: Some(segment.id),
                });
                failed_calls += 1;
                continue;
            }
        };

        // Catalog order, not map order, keeps the output deterministic.
        for category in catalog.categories() {
            let Some(&semantic_score) = scores.get(&category) else {
                continue;
            };
            if semantic_score < options.semantic_threshold {
                continue;
            }
            match candidates
                .iter_mut()
                .find(|c| c.segment_id == segment.id && c.category == category)
            {
                Some(existing) => {
                    existing.source = CandidateSource::Both;
                    existing.raw_score = existing.raw_score.max(semantic_score);
                }
                None => candidates.push(Candidate {
                    segment_id: segment.id,
                    rule_id: None,
                    category,
                    raw_score: semantic_score,
                    source: CandidateSource::Semantic,
                }),
            }
        }
    }

    if !segments.is_empty() && failed_calls == segments.len() {
        tracing::warn!("classifier unavailable for every segment; findings are rule-only");
        warnings.insert(
            0,
            AnalysisWarning {
                code: WarningCode::DegradedMode,
                detail: "classifier capability unavailable; semantic scoring skipped".to_string(),
                segment_id: None,
            },
        );
    }

    SemanticOutcome {
        candidates,
        warnings,
    }
}
