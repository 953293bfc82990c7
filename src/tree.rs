//! Build-then-validate pipeline

use chrono::NaiveDate;
use std::path::Path;
use tracing::info;

use crate::config::ValidationConfig;
use crate::error::Result;
use crate::family::Families;
use crate::findings::Findings;
use crate::line::read_records;
use crate::person::People;
use crate::record::TagRecord;
use crate::validate::Validator;

/// Finished person and family arenas
#[derive(Debug, Default)]
pub struct GedcomTree {
    pub people: People,
    pub families: Families,
}

impl GedcomTree {
    /// Run the person builder over every record, then the family builder.
    ///
    /// Returns the tree together with the findings raised during ingestion.
    /// Nothing is returned if any record is malformed or carries a bad date.
    pub fn from_records(records: &[TagRecord]) -> Result<(Self, Findings)> {
        let mut people = People::new();
        people.ingest_all(records)?;

        let mut findings = Findings::new();
        let mut families = Families::new();
        families.ingest_all(records, &people, &mut findings)?;

        info!(
            records = records.len(),
            people = people.len(),
            families = families.len(),
            "ingestion complete"
        );

        Ok((Self { people, families }, findings))
    }

    /// Validation engine bound to this tree
    pub fn validator(&self, reference: NaiveDate) -> Validator<'_> {
        Validator::with_reference(&self.people, &self.families, reference)
    }

    /// Run both rule passes, appending to `findings`
    pub fn validate(&self, config: &ValidationConfig, findings: &mut Findings) {
        Validator::from_config(&self.people, &self.families, config).run(findings);
    }
}

/// Outcome of auditing one input
#[derive(Debug)]
pub struct Audit {
    pub tree: GedcomTree,
    /// Ingestion findings followed by rule findings
    pub findings: Findings,
}

/// Build and validate a record sequence
pub fn audit_records(records: &[TagRecord], config: &ValidationConfig) -> Result<Audit> {
    let (tree, mut findings) = GedcomTree::from_records(records)?;
    tree.validate(config, &mut findings);
    Ok(Audit { tree, findings })
}

/// Read, build and validate a GEDCOM file
pub fn audit_file(path: impl AsRef<Path>, config: &ValidationConfig) -> Result<Audit> {
    let path = path.as_ref();
    info!(path = %path.display(), "auditing");
    let records = read_records(path)?;
    audit_records(&records, config)
}
