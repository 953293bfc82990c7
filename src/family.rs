//! Family entities and the `FAM` record builder

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::date::parse_date;
use crate::error::Result;
use crate::findings::{Findings, RuleId};
use crate::person::People;
use crate::record::{EventContext, Tag, TagRecord};

/// A family record linking spouses and children by identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Family {
    pub id: String,
    /// Children in order of appearance, duplicates kept
    pub children: Vec<String>,
    pub husband_id: Option<String>,
    pub wife_id: Option<String>,
    pub married_date: Option<NaiveDate>,
    pub divorced_date: Option<NaiveDate>,
    pub married: bool,
    pub divorced: bool,
}

impl Family {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            children: Vec::new(),
            husband_id: None,
            wife_id: None,
            married_date: None,
            divorced_date: None,
            married: false,
            divorced: false,
        }
    }

    /// Whether `person_id` fills the husband or wife slot
    pub fn has_spouse(&self, person_id: &str) -> bool {
        self.husband_id.as_deref() == Some(person_id) || self.wife_id.as_deref() == Some(person_id)
    }

    pub fn has_child(&self, person_id: &str) -> bool {
        self.children.iter().any(|c| c == person_id)
    }

    /// Husband then wife, skipping empty slots
    pub fn spouse_ids(&self) -> impl Iterator<Item = &str> {
        self.husband_id.as_deref().into_iter().chain(self.wife_id.as_deref())
    }
}

/// Identifier-indexed arena of families built from `FAM` records.
///
/// Ingesting a marriage date consults the person arena, so every husband
/// and wife a family names should already be ingested into it.
#[derive(Debug, Default)]
pub struct Families {
    families: BTreeMap<String, Family>,
    current: Option<String>,
    context: EventContext,
}

impl Families {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one record.
    ///
    /// A marriage date is only stored when neither spouse was born after
    /// it; otherwise a `US02` finding goes to `findings`.
    pub fn ingest(&mut self, record: &TagRecord, people: &People, findings: &mut Findings) -> Result<()> {
        record.ensure_well_formed()?;
        self.context.reset_for(record);

        let tag = record.known_tag();
        let date = match tag {
            Some(Tag::Date) => Some(parse_date(&record.argument)?),
            _ => None,
        };

        if record.is_top_level() {
            self.current = None;
        }

        if tag == Some(Tag::Fam) {
            let id = record.argument.clone();
            self.families
                .entry(id.clone())
                .or_insert_with(|| Family::new(id.clone()));
            self.current = Some(id);
            return Ok(());
        }

        let Some(tag) = tag else { return Ok(()) };
        let Some(family) = self.current.as_ref().and_then(|id| self.families.get_mut(id)) else {
            debug!(record = %record, "no current family, ignoring");
            return Ok(());
        };

        match tag {
            Tag::Marr => {
                family.married = true;
                family.married_date = None;
                self.context = EventContext::Marriage;
            }
            Tag::Div => {
                family.divorced = true;
                family.divorced_date = None;
                self.context = EventContext::Divorce;
            }
            Tag::Husb => {
                family.husband_id = Some(record.argument.clone());
                self.context = EventContext::Husband;
            }
            Tag::Wife => {
                family.wife_id = Some(record.argument.clone());
                self.context = EventContext::Wife;
            }
            Tag::Chil => {
                family.children.push(record.argument.clone());
                self.context = EventContext::Child;
            }
            Tag::Date => match (self.context, date) {
                (EventContext::Marriage, Some(date)) => {
                    if births_precede_marriage(family, date, people, findings) {
                        family.married_date = Some(date);
                    }
                }
                (EventContext::Divorce, Some(date)) => family.divorced_date = Some(date),
                (other, _) => debug!(family = %family.id, context = ?other, "date not attributed"),
            },
            Tag::Indi | Tag::Fam | Tag::Name | Tag::Sex | Tag::Birt | Tag::Deat | Tag::Famc | Tag::Fams => {}
        }

        Ok(())
    }

    /// Feed a sequence of records, stopping at the first failure
    pub fn ingest_all<'a>(
        &mut self,
        records: impl IntoIterator<Item = &'a TagRecord>,
        people: &People,
        findings: &mut Findings,
    ) -> Result<()> {
        for record in records {
            self.ingest(record, people, findings)?;
        }
        Ok(())
    }

    /// Insert or replace a fully built family
    pub fn insert(&mut self, family: Family) {
        self.families.insert(family.id.clone(), family);
    }

    pub fn get(&self, id: &str) -> Option<&Family> {
        self.families.get(id)
    }

    /// Families in ascending identifier order
    pub fn iter(&self) -> impl Iterator<Item = &Family> {
        self.families.values()
    }

    pub fn len(&self) -> usize {
        self.families.len()
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }
}

/// Husband first; a failing husband short-circuits the wife check.
///
/// Spouses that are unset, unknown, or without a birth date pass. A marriage
/// on the spouse's birth date passes too; only `married < birth` fails.
fn births_precede_marriage(family: &Family, married: NaiveDate, people: &People, findings: &mut Findings) -> bool {
    for spouse_id in family.spouse_ids() {
        let Some(spouse) = people.get(spouse_id) else {
            debug!(family = %family.id, spouse = spouse_id, "spouse not ingested, skipping birth check");
            continue;
        };
        if spouse.birth_date.is_some_and(|birth| married < birth) {
            findings.person(
                RuleId::BirthBeforeMarriage,
                &spouse.id,
                spouse.name(),
                "Birth date should occur before marriage of an individual",
            );
            return false;
        }
    }
    true
}
