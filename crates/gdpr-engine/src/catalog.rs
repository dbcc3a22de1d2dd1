//! Versioned GDPR rule catalog.
//!
//! Rules are data, not code: each catalog version is an embedded JSON
//! document deserialized once into a process-wide immutable static. Runs
//! pin a version through `AnalyzeOptions::catalog_version` so reports stay
//! reproducible across catalog updates.

use std::collections::{BTreeSet, HashMap};

use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use shared_types::{ClauseCategory, Severity};

use crate::error::EngineError;

const CATALOG_2025_1: &str = include_str!("data/gdpr-2025.1.json");
const CATALOG_2024_2: &str = include_str!("data/gdpr-2024.2.json");

lazy_static! {
    static ref CATALOGS: HashMap<String, RuleCatalog> = {
        let mut map = HashMap::new();
        for source in [CATALOG_2025_1, CATALOG_2024_2] {
            let catalog = RuleCatalog::parse(source);
            map.insert(catalog.version.clone(), catalog);
        }
        map
    };
}

/// How a rule recognizes its clause.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClausePattern {
    /// Independent keywords; the match score is matched / total coverage.
    KeywordSet { keywords: Vec<String> },
    /// Case-insensitive regular expression; a hit scores 1.0.
    Regex { pattern: String },
    /// Synonym groups that must all be present; a hit scores 1.0.
    Structural { groups: Vec<Vec<String>> },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Rule {
    pub id: String,
    pub category: ClauseCategory,
    pub pattern: ClausePattern,
    /// Whether GDPR requires the contract to address this category at all.
    pub required: bool,
    /// Risk marker: the pattern firing is itself the hazard, as opposed to
    /// evidence that the category is addressed.
    #[serde(default)]
    pub risk: bool,
    pub base_severity: Severity,
    pub explanation: String,
    #[serde(skip)]
    compiled: Option<Regex>,
}

impl Rule {
    fn compile(&mut self) {
        if let ClausePattern::Regex { pattern } = &self.pattern {
            let re = Regex::new(&format!("(?i){pattern}"))
                .expect("embedded catalog regex must compile");
            self.compiled = Some(re);
        }
    }

    /// Compiled form of a `ClausePattern::Regex` rule.
    pub fn regex(&self) -> Option<&Regex> {
        self.compiled.as_ref()
    }
}

/// Reference description for one clause category, used by classifier
/// implementations as the category's exemplar text.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryProfile {
    pub category: ClauseCategory,
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct RuleCatalog {
    pub version: String,
    pub categories: Vec<CategoryProfile>,
    pub rules: Vec<Rule>,
}

impl RuleCatalog {
    pub const DEFAULT_VERSION: &'static str = "2025.1";

    fn parse(source: &str) -> Self {
        let mut catalog: RuleCatalog =
            serde_json::from_str(source).expect("embedded rule catalog must be valid JSON");
        for rule in &mut catalog.rules {
            rule.compile();
        }
        catalog
    }

    /// Resolve a pinned catalog version.
    pub fn load(version: &str) -> Result<&'static RuleCatalog, EngineError> {
        CATALOGS
            .get(version)
            .ok_or_else(|| EngineError::UnknownCatalogVersion(version.to_string()))
    }

    /// Categories in catalog order.
    pub fn categories(&self) -> impl Iterator<Item = ClauseCategory> + '_ {
        self.categories.iter().map(|profile| profile.category)
    }

    pub fn contains_category(&self, category: ClauseCategory) -> bool {
        self.categories.iter().any(|p| p.category == category)
    }

    pub fn profile(&self, category: ClauseCategory) -> Option<&CategoryProfile> {
        self.categories.iter().find(|p| p.category == category)
    }

    pub fn rules_for(&self, category: ClauseCategory) -> impl Iterator<Item = &Rule> {
        self.rules.iter().filter(move |r| r.category == category)
    }

    pub fn rule_by_id(&self, id: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.id == id)
    }

    /// A category is mandatory when any of its rules is marked required.
    pub fn is_required(&self, category: ClauseCategory) -> bool {
        self.rules_for(category).any(|r| r.required)
    }

    pub fn required_categories(&self) -> BTreeSet<ClauseCategory> {
        self.rules
            .iter()
            .filter(|r| r.required)
            .map(|r| r.category)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_catalogs_parse_and_compile() {
        let current = RuleCatalog::load("2025.1").unwrap();
        assert_eq!(current.version, "2025.1");
        assert!(!current.rules.is_empty());
        assert!(!current.categories.is_empty());

        let previous = RuleCatalog::load("2024.2").unwrap();
        assert!(previous.rules.len() < current.rules.len());
    }

    #[test]
    fn unknown_version_is_rejected() {
        let err = RuleCatalog::load("1999.9").unwrap_err();
        assert!(matches!(err, EngineError::UnknownCatalogVersion(v) if v == "1999.9"));
    }

    #[test]
    fn regex_rules_are_precompiled() {
        let catalog = RuleCatalog::load(RuleCatalog::DEFAULT_VERSION).unwrap();
        for rule in &catalog.rules {
            if matches!(rule.pattern, ClausePattern::Regex { .. }) {
                assert!(rule.regex().is_some(), "rule {} missing compiled regex", rule.id);
            }
        }
    }

    #[test]
    fn every_rule_category_has_a_profile() {
        let catalog = RuleCatalog::load(RuleCatalog::DEFAULT_VERSION).unwrap();
        for rule in &catalog.rules {
            assert!(
                catalog.contains_category(rule.category),
                "rule {} references unprofiled category",
                rule.id
            );
        }
    }

    #[test]
    fn mandatory_categories_cover_core_processor_duties() {
        let catalog = RuleCatalog::load(RuleCatalog::DEFAULT_VERSION).unwrap();
        let required = catalog.required_categories();
        assert!(required.contains(&ClauseCategory::DataRetention));
        assert!(required.contains(&ClauseCategory::BreachNotification));
        assert!(required.contains(&ClauseCategory::DataSubjectRights));
        assert!(required.contains(&ClauseCategory::SecurityMeasures));
        assert!(required.contains(&ClauseCategory::Subprocessing));
    }
}
