//! Report assembly: findings into the caller-owned report value.

use shared_types::{
    AgreementType, AnalysisWarning, Finding, FindingStatus, Report, Severity, SeveritySummary,
};

/// Build the final report. Findings arrive pre-sorted from aggregation;
/// the assembler only derives the summary and the overall score.
pub fn assemble(
    document_id: &str,
    agreement_type: Option<AgreementType>,
    catalog_version: &str,
    findings: Vec<Finding>,
    warnings: Vec<AnalysisWarning>,
) -> Report {
    let mut summary = SeveritySummary::default();
    for finding in &findings {
        summary.record(finding.severity);
    }
    let compliance_score = compliance_score(&findings);

    Report {
        document_id: document_id.to_string(),
        agreement_type,
        catalog_version: catalog_version.to_string(),
        findings,
        summary,
        compliance_score,
        warnings,
    }
}

/// 0-100 score: start from 100 and charge each risky or missing finding by
/// severity. Compliant findings are free.
fn compliance_score(findings: &[Finding]) -> u8 {
    let mut score: u8 = 100;
    for finding in findings {
        if finding.status == FindingStatus::Compliant {
            continue;
        }
        let penalty = match finding.severity {
            Severity::Critical => 25,
            Severity::High => 15,
            Severity::Medium => 8,
            Severity::Low => 3,
            Severity::Info => 1,
        };
        score = score.saturating_sub(penalty);
    }
    score
}
