//! Findings
//!
//! Append-only, order-preserving sink for rule violations. Discovery order
//! is the only order; nothing is ever sorted or removed after the fact.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Subject name used when a finding has no meaningful name
pub const NOT_AVAILABLE: &str = "NA";

// =============================================================================
// Category
// =============================================================================

/// Kind of entity a finding is reported against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Person,
    Family,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Person => "PERSON",
            Self::Family => "FAMILY",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Rule Identifiers
// =============================================================================

/// Identifier of the rule that produced a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleId {
    /// Birth or death date after the reference instant
    #[serde(rename = "US01")]
    DateNotInFuture,
    /// Marriage date before a spouse's birth (checked during ingestion)
    #[serde(rename = "US02")]
    BirthBeforeMarriage,
    /// Death date before birth date
    #[serde(rename = "US03")]
    BirthBeforeDeath,
    /// Marriage date after a spouse's death
    #[serde(rename = "US05")]
    MarriageBeforeDeath,
    /// Divorce date after a spouse's death
    #[serde(rename = "US06")]
    DivorceBeforeDeath,
    /// Age above the configured bound
    #[serde(rename = "US07")]
    AgeBound,
    /// Spouse of a family the person is also a child of
    #[serde(rename = "US18")]
    SiblingMarriage,
    /// Person-side family link not mirrored by the family
    #[serde(rename = "US26")]
    CorrespondingEntries,
}

impl RuleId {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DateNotInFuture => "US01",
            Self::BirthBeforeMarriage => "US02",
            Self::BirthBeforeDeath => "US03",
            Self::MarriageBeforeDeath => "US05",
            Self::DivorceBeforeDeath => "US06",
            Self::AgeBound => "US07",
            Self::SiblingMarriage => "US18",
            Self::CorrespondingEntries => "US26",
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Finding
// =============================================================================

/// A single rule violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub category: Category,
    pub rule_id: RuleId,
    /// Person or family identifier
    pub subject_id: String,
    /// Person name, or `NA` for family findings and unnamed persons
    pub subject_name: String,
    pub message: String,
}

impl Finding {
    pub fn new(
        category: Category,
        rule_id: RuleId,
        subject_id: impl Into<String>,
        subject_name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            rule_id,
            subject_id: subject_id.into(),
            subject_name: subject_name.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}: {}: {}: {}",
            self.category, self.rule_id, self.subject_id, self.subject_name, self.message
        )
    }
}

// =============================================================================
// Findings Sink
// =============================================================================

/// Ordered collection of findings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Findings {
    items: Vec<Finding>,
}

impl Findings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a finding
    pub fn push(&mut self, finding: Finding) {
        self.items.push(finding);
    }

    /// Append a finding against a person
    pub fn person(
        &mut self,
        rule_id: RuleId,
        person_id: &str,
        name: Option<&str>,
        message: impl Into<String>,
    ) {
        self.push(Finding::new(
            Category::Person,
            rule_id,
            person_id,
            name.unwrap_or(NOT_AVAILABLE),
            message,
        ));
    }

    /// Append a finding against a family
    pub fn family(&mut self, rule_id: RuleId, family_id: &str, message: impl Into<String>) {
        self.push(Finding::new(
            Category::Family,
            rule_id,
            family_id,
            NOT_AVAILABLE,
            message,
        ));
    }

    /// Get all items
    pub fn all(&self) -> &[Finding] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &Finding> {
        self.items.iter()
    }

    /// Findings produced by one rule
    pub fn by_rule(&self, rule_id: RuleId) -> impl Iterator<Item = &Finding> {
        self.items.iter().filter(move |f| f.rule_id == rule_id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a> IntoIterator for &'a Findings {
    type Item = &'a Finding;
    type IntoIter = std::slice::Iter<'a, Finding>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
