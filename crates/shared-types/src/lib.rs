pub mod types;

pub use types::{
    AgreementType, AnalysisWarning, CandidateSource, ClauseCategory, ContractDocument, Finding,
    FindingStatus, Report, Segment, Severity, SeveritySummary, WarningCode,
};
