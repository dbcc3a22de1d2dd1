#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ContractDocument {
    pub id: String,
    pub filename: String,
    pub pages: u32,
    pub text_content: Vec<String>, // Per-page extracted text
}

/// One normalized sentence-level unit of contract text.
///
/// Offsets index into the original extracted text so findings can cite the
/// exact span they were derived from.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Segment {
    pub id: u32,
    pub text: String,
    pub start_offset: usize,
    pub end_offset: usize,
    pub sentence_index: usize,
}

/// GDPR clause categories the engine knows how to assess.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClauseCategory {
    DataRetention,
    Consent,
    DataTransfer,
    BreachNotification,
    DataSubjectRights,
    Subprocessing,
    SecurityMeasures,
    LawfulBasis,
    Confidentiality,
}

impl ClauseCategory {
    /// Stable wire name, also the sort key for report ordering.
    pub fn name(&self) -> &'static str {
        match self {
            ClauseCategory::DataRetention => "DATA_RETENTION",
            ClauseCategory::Consent => "CONSENT",
            ClauseCategory::DataTransfer => "DATA_TRANSFER",
            ClauseCategory::BreachNotification => "BREACH_NOTIFICATION",
            ClauseCategory::DataSubjectRights => "DATA_SUBJECT_RIGHTS",
            ClauseCategory::Subprocessing => "SUBPROCESSING",
            ClauseCategory::SecurityMeasures => "SECURITY_MEASURES",
            ClauseCategory::LawfulBasis => "LAWFUL_BASIS",
            ClauseCategory::Confidentiality => "CONFIDENTIALITY",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Info,
}

impl Severity {
    /// Ordering rank, 0 = most severe. Reports sort ascending on this.
    pub fn rank(&self) -> u8 {
        match self {
            Severity::Critical => 0,
            Severity::High => 1,
            Severity::Medium => 2,
            Severity::Low => 3,
            Severity::Info => 4,
        }
    }

    /// One level more severe, saturating at Critical.
    pub fn escalate(self) -> Self {
        match self {
            Severity::Critical | Severity::High => Severity::Critical,
            Severity::Medium => Severity::High,
            Severity::Low => Severity::Medium,
            Severity::Info => Severity::Low,
        }
    }

    /// One level less severe, saturating at Info.
    pub fn soften(self) -> Self {
        match self {
            Severity::Critical => Severity::High,
            Severity::High => Severity::Medium,
            Severity::Medium => Severity::Low,
            Severity::Low | Severity::Info => Severity::Info,
        }
    }
}

/// Where the evidence for a candidate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum CandidateSource {
    Rule,
    Semantic,
    Both,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum FindingStatus {
    /// The clause is present and a risk marker fired on it.
    PresentRisky,
    /// A mandatory clause category is absent from the whole document.
    MissingMandatory,
    /// The clause category is addressed and no risk marker fired.
    Compliant,
}

/// A finalized compliance assessment for one clause category.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Finding {
    pub category: ClauseCategory,
    pub severity: Severity,
    pub confidence: f32,
    pub evidence: Vec<Segment>,
    pub explanation: String,
    pub status: FindingStatus,
}

/// GDPR agreement families the detector distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum AgreementType {
    DataProcessingAgreement,
    JointControllerAgreement,
    ControllerToController,
    ProcessorToSubprocessor,
    StandardContractualClauses,
}

impl AgreementType {
    pub fn name(&self) -> &'static str {
        match self {
            AgreementType::DataProcessingAgreement => "Data Processing Agreement",
            AgreementType::JointControllerAgreement => "Joint Controller Agreement",
            AgreementType::ControllerToController => "Controller-to-Controller Agreement",
            AgreementType::ProcessorToSubprocessor => "Processor-to-Subprocessor Agreement",
            AgreementType::StandardContractualClauses => "Standard Contractual Clauses",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum WarningCode {
    /// The classifier capability failed for every segment; findings are rule-only.
    DegradedMode,
    ClassifierTimeout,
    ClassifierError,
}

/// Non-fatal problem encountered during an analysis run.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AnalysisWarning {
    pub code: WarningCode,
    pub detail: String,
    pub segment_id: Option<u32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SeveritySummary {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub info: usize,
}

impl SeveritySummary {
    pub fn record(&mut self, severity: Severity) {
        match severity {
            Severity::Critical => self.critical += 1,
            Severity::High => self.high += 1,
            Severity::Medium => self.medium += 1,
            Severity::Low => self.low += 1,
            Severity::Info => self.info += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.critical + self.high + self.medium + self.low + self.info
    }
}

/// One report per analysis run. Carries no wall-clock fields so identical
/// input and options serialize to identical bytes.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Report {
    pub document_id: String,
    pub agreement_type: Option<AgreementType>,
    pub catalog_version: String,
    pub findings: Vec<Finding>,
    pub summary: SeveritySummary,
    pub compliance_score: u8,
    pub warnings: Vec<AnalysisWarning>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn severity_scaling_saturates() {
        assert_eq!(Severity::Critical.escalate(), Severity::Critical);
        assert_eq!(Severity::Medium.escalate(), Severity::High);
        assert_eq!(Severity::Info.soften(), Severity::Info);
        assert_eq!(Severity::Critical.soften(), Severity::High);
    }

    #[test]
    fn severity_rank_orders_critical_first() {
        let mut sevs = vec![Severity::Info, Severity::Critical, Severity::Medium];
        sevs.sort_by_key(|s| s.rank());
        assert_eq!(sevs[0], Severity::Critical);
        assert_eq!(sevs[2], Severity::Info);
    }

    #[test]
    fn category_serializes_to_screaming_snake() {
        let json = serde_json::to_string(&ClauseCategory::DataRetention).unwrap();
        assert_eq!(json, "\"DATA_RETENTION\"");
        assert_eq!(ClauseCategory::DataRetention.name(), "DATA_RETENTION");
    }

    #[test]
    fn summary_counts_by_severity() {
        let mut summary = SeveritySummary::default();
        summary.record(Severity::Critical);
        summary.record(Severity::High);
        summary.record(Severity::High);
        assert_eq!(summary.critical, 1);
        assert_eq!(summary.high, 2);
        assert_eq!(summary.total(), 3);
    }
}
