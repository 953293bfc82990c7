//! Person entities and the `INDI` record builder

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::date::{age_in_years, parse_date};
use crate::error::Result;
use crate::record::{EventContext, Tag, TagRecord};

/// An individual
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: String,
    pub name: Option<String>,
    pub gender: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub death_date: Option<NaiveDate>,
    /// Families this person is a child of, in order of appearance
    pub child_of_families: Vec<String>,
    /// Families this person is a spouse in, in order of appearance
    pub spouse_of_families: Vec<String>,
}

impl Person {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            gender: None,
            birth_date: None,
            death_date: None,
            child_of_families: Vec::new(),
            spouse_of_families: Vec::new(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.death_date.is_none()
    }

    /// Age at death, or at `reference` when still alive
    pub fn age(&self, reference: NaiveDate) -> Option<i64> {
        let birth = self.birth_date?;
        Some(age_in_years(birth, self.death_date.unwrap_or(reference)))
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// Identifier-indexed arena of persons built from `INDI` records.
///
/// Keys iterate in ascending identifier order.
#[derive(Debug, Default)]
pub struct People {
    individuals: BTreeMap<String, Person>,
    current: Option<String>,
    context: EventContext,
}

impl People {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one record.
    ///
    /// Fails on a malformed record or an unparseable `DATE` before touching
    /// any entity.
    pub fn ingest(&mut self, record: &TagRecord) -> Result<()> {
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

        if tag == Some(Tag::Indi) {
            let id = record.argument.clone();
            self.individuals
                .entry(id.clone())
                .or_insert_with(|| Person::new(id.clone()));
            self.current = Some(id);
            return Ok(());
        }

        let Some(tag) = tag else { return Ok(()) };
        let Some(person) = self.current.as_ref().and_then(|id| self.individuals.get_mut(id)) else {
            debug!(record = %record, "no current person, ignoring");
            return Ok(());
        };

        match tag {
            Tag::Sex => {
                person.gender = Some(record.argument.clone());
                self.context = EventContext::Sex;
            }
            Tag::Birt => self.context = EventContext::Birth,
            Tag::Deat => self.context = EventContext::Death,
            Tag::Name => {
                person.name = Some(record.argument.clone());
                self.context = EventContext::Name;
            }
            Tag::Famc => {
                person.child_of_families.push(record.argument.clone());
                self.context = EventContext::ChildLink;
            }
            Tag::Fams => {
                person.spouse_of_families.push(record.argument.clone());
                self.context = EventContext::SpouseLink;
            }
            Tag::Date => match self.context {
                EventContext::Birth => person.birth_date = date,
                EventContext::Death => person.death_date = date,
                other => debug!(person = %person.id, context = ?other, "date not attributed"),
            },
            Tag::Indi | Tag::Fam | Tag::Marr | Tag::Div | Tag::Husb | Tag::Wife | Tag::Chil => {}
        }

        Ok(())
    }

    /// Feed a sequence of records, stopping at the first failure
    pub fn ingest_all<'a>(&mut self, records: impl IntoIterator<Item = &'a TagRecord>) -> Result<()> {
        for record in records {
            self.ingest(record)?;
        }
        Ok(())
    }

    /// Insert or replace a fully built person
    pub fn insert(&mut self, person: Person) {
        self.individuals.insert(person.id.clone(), person);
    }

    pub fn get(&self, id: &str) -> Option<&Person> {
        self.individuals.get(id)
    }

    /// Persons in ascending identifier order
    pub fn iter(&self) -> impl Iterator<Item = &Person> {
        self.individuals.values()
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }
}
