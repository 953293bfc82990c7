//! Validation Engine
//!
//! Runs the rule battery over finished person and family arenas.
//!
//! ## Passes
//! 1. **Family pass**: per family in ascending id order, `US05` then `US06`
//! 2. **Person pass**: per person in ascending id order, `US03`, `US07`,
//!    `US01` (birth), `US01` (death), `US18`, `US26`
//!
//! Both arenas are constructor parameters, so the person pass can never run
//! without the family arena it cross-checks against. The reference date is
//! fixed at construction and reused for every rule in the run.

mod family_rules;
mod person_rules;

use chrono::{Local, NaiveDate};
use tracing::info;

use crate::config::ValidationConfig;
use crate::family::Families;
use crate::findings::Findings;
use crate::person::People;

/// Default inclusive upper bound on a person's age
pub const DEFAULT_MAX_AGE: i64 = 149;

/// Read-only rule engine over a built tree
#[derive(Debug, Clone, Copy)]
pub struct Validator<'a> {
    people: &'a People,
    families: &'a Families,
    reference: NaiveDate,
    max_age: i64,
}

impl<'a> Validator<'a> {
    /// Engine whose reference instant is today's local date
    pub fn new(people: &'a People, families: &'a Families) -> Self {
        Self::with_reference(people, families, Local::now().date_naive())
    }

    /// Engine with an explicit reference instant
    pub fn with_reference(people: &'a People, families: &'a Families, reference: NaiveDate) -> Self {
        Self {
            people,
            families,
            reference,
            max_age: DEFAULT_MAX_AGE,
        }
    }

    /// Engine configured from the `[validation]` section
    pub fn from_config(people: &'a People, families: &'a Families, config: &ValidationConfig) -> Self {
        Self::with_reference(people, families, config.reference_or_today()).with_max_age(config.max_age)
    }

    /// Override the age bound; ages strictly above it are reported
    pub fn with_max_age(mut self, max_age: u32) -> Self {
        self.max_age = i64::from(max_age);
        self
    }

    pub fn reference(&self) -> NaiveDate {
        self.reference
    }

    pub fn max_age(&self) -> i64 {
        self.max_age
    }

    /// Family pass then person pass
    pub fn run(&self, findings: &mut Findings) {
        let before = findings.len();
        self.validate_families(findings);
        self.validate_people(findings);
        info!(
            people = self.people.len(),
            families = self.families.len(),
            findings = findings.len() - before,
            reference = %self.reference,
            "validation complete"
        );
    }

    /// Run the family-scoped rules
    pub fn validate_families(&self, findings: &mut Findings) {
        for family in self.families.iter() {
            family_rules::death_before_marriage(family, self.people, findings);
            family_rules::death_before_divorce(family, self.people, findings);
        }
    }

    /// Run the person-scoped rules
    pub fn validate_people(&self, findings: &mut Findings) {
        for person in self.people.iter() {
            person_rules::birth_before_death(person, findings);
            person_rules::age_bound(person, self.reference, self.max_age, findings);
            person_rules::birth_not_future(person, self.reference, findings);
            person_rules::death_not_future(person, self.reference, findings);
            person_rules::sibling_marriage(person, findings);
            person_rules::corresponding_entries(person, self.families, findings);
        }
    }
}
