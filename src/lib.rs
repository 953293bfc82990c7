//! GEDCOM Validator
//!
//! Turns a stream of leveled GEDCOM tag records into person and family
//! arenas, then runs a fixed battery of consistency rules over them.
//!
//! ## Pipeline
//!
//! ```text
//! text lines ──LineParser──▶ TagRecord*
//!                              │
//!                  People::ingest (all records)
//!                              │
//!                  Families::ingest (all records, reads People) ──▶ US02
//!                              │
//!                  Validator::new(&people, &families)
//!                     ├─ family pass (US05, US06)
//!                     └─ person pass (US03, US07, US01, US18, US26)
//!                              │
//!                           Findings
//! ```
//!
//! Cross-links between persons and families are stored as identifiers only.
//! Every pass walks identifiers in ascending order, so the same input always
//! yields the same findings in the same order.

pub mod config;
pub mod date;
pub mod error;
pub mod family;
pub mod findings;
pub mod line;
pub mod person;
pub mod record;
pub mod report;
pub mod tree;
pub mod validate;

pub use config::{OutputFormat, ValidationConfig, ValidatorConfig};
pub use error::{GedcomError, Result};
pub use family::{Families, Family};
pub use findings::{Category, Finding, Findings, RuleId};
pub use line::{read_records, LineParser};
pub use person::{People, Person};
pub use record::{EventContext, Tag, TagRecord};
pub use tree::{audit_file, audit_records, Audit, GedcomTree};
pub use validate::Validator;
