//! GDPR contract clause analysis engine.
//!
//! Runs extracted contract text through sentence normalization, declarative
//! rule matching, classifier-backed semantic scoring and risk aggregation,
//! and returns a structured, evidence-backed compliance report. Text
//! extraction (PDF/DOCX) and report rendering are external collaborators;
//! this crate starts at raw text and stops at the `Report` value.

pub mod aggregate;
pub mod catalog;
pub mod doctype;
pub mod error;
pub mod matcher;
pub mod normalizer;
pub mod options;
pub mod patterns;
pub mod report;
pub mod semantic;

use std::sync::Arc;

use shared_types::{ContractDocument, Report};

pub use crate::catalog::{CategoryProfile, ClausePattern, Rule, RuleCatalog};
pub use crate::error::EngineError;
pub use crate::matcher::Candidate;
pub use crate::options::AnalyzeOptions;
pub use crate::semantic::{ClauseClassifier, NullClassifier};

/// Analysis engine entry point.
///
/// Holds only immutable, shareable state: the pinned rule catalog and the
/// injected classifier capability. Concurrent runs for different documents
/// share nothing else.
pub struct AnalysisEngine {
    catalog: &'static RuleCatalog,
    classifier: Arc<dyn ClauseClassifier>,
    options: AnalyzeOptions,
}

impl AnalysisEngine {
    /// Build an engine, resolving the catalog version pinned in `options`.
    pub fn new(
        classifier: Arc<dyn ClauseClassifier>,
        options: AnalyzeOptions,
    ) -> Result<Self, EngineError> {
        let catalog = RuleCatalog::load(&options.catalog_version)?;
        Ok(Self {
            catalog,
            classifier,
            options,
        })
    }

    /// Engine without a semantic capability; findings come from rules alone.
    pub fn rule_only(options: AnalyzeOptions) -> Result<Self, EngineError> {
        Self::new(Arc::new(NullClassifier), options)
    }

    pub fn catalog(&self) -> &RuleCatalog {
        self.catalog
    }

    /// Analyze one document's raw extracted text.
    pub async fn analyze(&self, document_id: &str, raw_text: &str) -> Result<Report, EngineError> {
        let segments = normalizer::normalize(raw_text)?;
        tracing::debug!(
            document_id,
            segments = segments.len(),
            catalog = %self.catalog.version,
            "normalized document"
        );

        let matched = matcher::match_segments(&segments, self.catalog);
        tracing::debug!(
            candidates = matched.candidates.len(),
            zero_hit_categories = matched.categories_with_zero_hits.len(),
            "rule matching complete"
        );

        let scored = semantic::score(
            &segments,
            matched.candidates,
            self.catalog,
            self.classifier.as_ref(),
            &self.options,
        )
        .await;

        let findings = aggregate::aggregate(
            &segments,
            &scored.candidates,
            &matched.categories_with_zero_hits,
            self.catalog,
            self.options.semantic_threshold,
        )?;

        let agreement_type = doctype::detect(raw_text);
        Ok(report::assemble(
            document_id,
            agreement_type,
            &self.catalog.version,
            findings,
            scored.warnings,
        ))
    }

    /// Analyze an extracted document, joining its per-page text.
    pub async fn analyze_document(&self, document: &ContractDocument) -> Result<Report, EngineError> {
        let full_text = document.text_content.join("\n");
        self.analyze(&document.id, &full_text).await
    }
}
