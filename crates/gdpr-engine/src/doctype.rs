//! Agreement-type detection.
//!
//! Classifies the document into one of the GDPR agreement families from
//! indicative keywords, most distinct hits winning. Purely informational;
//! the rule set applied does not depend on it.

use shared_types::AgreementType;

const DPA_MARKERS: &[&str] = &[
    "data processing agreement",
    "data processor",
    "data controller",
    "processing activities",
];

const JCA_MARKERS: &[&str] = &[
    "joint controller",
    "joint determination",
    "shared responsibility",
];

const C2C_MARKERS: &[&str] = &[
    "controller-to-controller",
    "controller to controller",
    "data sharing between controllers",
    "independent controller",
];

const SUBPROCESSOR_MARKERS: &[&str] = &[
    "subprocessor agreement",
    "sub-processor agreement",
    "processor to processor",
    "processor-to-subprocessor",
];

const SCC_MARKERS: &[&str] = &[
    "standard contractual clauses",
    "adequacy decision",
    "binding corporate rules",
];

/// Detect the agreement family, or None when no marker appears at all.
/// Declaration order breaks ties, so ambiguous documents resolve stably.
pub fn detect(raw_text: &str) -> Option<AgreementType> {
    let text_lower = raw_text.to_lowercase();
    let scored = [
        (AgreementType::DataProcessingAgreement, DPA_MARKERS),
        (AgreementType::JointControllerAgreement, JCA_MARKERS),
        (AgreementType::ControllerToController, C2C_MARKERS),
        (AgreementType::ProcessorToSubprocessor, SUBPROCESSOR_MARKERS),
        (AgreementType::StandardContractualClauses, SCC_MARKERS),
    ];

    let mut best: Option<(AgreementType, usize)> = None;
    for (agreement_type, markers) in scored {
        let hits = markers
            .iter()
            .filter(|marker| text_lower.contains(*marker))
            .count();
        if hits > 0 && best.map_or(true, |(_, best_hits)| hits > best_hits) {
            best = Some((agreement_type, hits));
        }
    }
    best.map(|(agreement_type, _)| agreement_type)
}
