//! Person-scoped rules

use chrono::NaiveDate;
use std::collections::BTreeSet;

use crate::family::Families;
use crate::findings::{Findings, RuleId};
use crate::person::Person;

/// US03
pub(super) fn birth_before_death(person: &Person, findings: &mut Findings) {
    if let (Some(birth), Some(death)) = (person.birth_date, person.death_date) {
        if death < birth {
            findings.person(
                RuleId::BirthBeforeDeath,
                &person.id,
                person.name(),
                "Birth date should occur before death of an individual",
            );
        }
    }
}

/// US07: fires when the age is strictly greater than `max_age`
pub(super) fn age_bound(person: &Person, reference: NaiveDate, max_age: i64, findings: &mut Findings) {
    if person.age(reference).is_some_and(|age| age > max_age) {
        findings.person(
            RuleId::AgeBound,
            &person.id,
            person.name(),
            format!("Age should be less than {}", max_age + 1),
        );
    }
}

/// US01 (birth)
pub(super) fn birth_not_future(person: &Person, reference: NaiveDate, findings: &mut Findings) {
    if person.birth_date.is_some_and(|birth| birth > reference) {
        findings.person(
            RuleId::DateNotInFuture,
            &person.id,
            person.name(),
            "Birth date should occur before current date",
        );
    }
}

/// US01 (death)
pub(super) fn death_not_future(person: &Person, reference: NaiveDate, findings: &mut Findings) {
    if person.death_date.is_some_and(|death| death > reference) {
        findings.person(
            RuleId::DateNotInFuture,
            &person.id,
            person.name(),
            "Death date should occur before current date",
        );
    }
}

/// US18: spouse in a family the person is also a child of.
///
/// Identifier-level only; fires at most once per person.
pub(super) fn sibling_marriage(person: &Person, findings: &mut Findings) {
    let child_of: BTreeSet<&str> = person.child_of_families.iter().map(String::as_str).collect();
    if person.spouse_of_families.iter().any(|fam| child_of.contains(fam.as_str())) {
        findings.person(
            RuleId::SiblingMarriage,
            &person.id,
            person.name(),
            "Siblings should not marry",
        );
    }
}

/// US26: every family link the person claims must be recorded by the family
pub(super) fn corresponding_entries(person: &Person, families: &Families, findings: &mut Findings) {
    for fam_id in &person.spouse_of_families {
        let linked = families.get(fam_id).is_some_and(|fam| fam.has_spouse(&person.id));
        if !linked {
            findings.person(
                RuleId::CorrespondingEntries,
                &person.id,
                person.name(),
                format!("corresponding spouse link missing in family {}", fam_id),
            );
        }
    }

    for fam_id in &person.child_of_families {
        let linked = families.get(fam_id).is_some_and(|fam| fam.has_child(&person.id));
        if !linked {
            findings.person(
                RuleId::CorrespondingEntries,
                &person.id,
                person.name(),
                format!("corresponding child link missing in family {}", fam_id),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::family::Family;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn named(id: &str) -> Person {
        Person {
            name: Some("Jane /Doe/".to_string()),
            ..Person::new(id)
        }
    }

    fn today() -> NaiveDate {
        ymd(2026, 10, 18)
    }

    #[test]
    fn test_death_before_birth() {
        let mut findings = Findings::new();
        let person = Person {
            birth_date: Some(ymd(1990, 1, 1)),
            death_date: Some(ymd(1980, 1, 1)),
            ..named("@I1@")
        };
        birth_before_death(&person, &mut findings);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings.all()[0].subject_name, "Jane /Doe/");

        let only_birth = Person {
            birth_date: Some(ymd(1990, 1, 1)),
            ..named("@I2@")
        };
        birth_before_death(&only_birth, &mut findings);
        assert_eq!(findings.len(), 1);
    }

    #[test]
    fn test_age_bound_is_strict() {
        let mut findings = Findings::new();
        let exactly_150_years = Person {
            birth_date: Some(ymd(1876, 10, 18)),
            ..named("@I1@")
        };
        age_bound(&exactly_150_years, today(), 149, &mut findings);
        assert!(findings.is_empty());

        let one_day_older = Person {
            birth_date: Some(ymd(1876, 10, 17)),
            ..named("@I2@")
        };
        age_bound(&one_day_older, today(), 149, &mut findings);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings.all()[0].message, "Age should be less than 150");
    }

    #[test]
    fn test_age_of_dead_person_uses_death_date() {
        let mut findings = Findings::new();
        let person = Person {
            birth_date: Some(ymd(1700, 1, 1)),
            death_date: Some(ymd(1780, 1, 1)),
            ..named("@I1@")
        };
        age_bound(&person, today(), 149, &mut findings);
        assert!(findings.is_empty());
    }

    #[test]
    fn test_future_dates() {
        let mut findings = Findings::new();
        let person = Person {
            birth_date: Some(ymd(2030, 1, 1)),
            death_date: Some(ymd(2031, 1, 1)),
            ..named("@I1@")
        };
        birth_not_future(&person, today(), &mut findings);
        death_not_future(&person, today(), &mut findings);
        let messages: Vec<_> = findings.iter().map(|f| f.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Birth date should occur before current date",
                "Death date should occur before current date"
            ]
        );

        let born_today = Person {
            birth_date: Some(today()),
            ..named("@I2@")
        };
        birth_not_future(&born_today, today(), &mut findings);
        assert_eq!(findings.len(), 2);
    }

    #[test]
    fn test_sibling_marriage_fires_once() {
        let mut findings = Findings::new();
        let person = Person {
            child_of_families: vec!["@F1@".into(), "@F2@".into()],
            spouse_of_families: vec!["@F2@".into(), "@F3@".into(), "@F1@".into()],
            ..named("@I1@")
        };
        sibling_marriage(&person, &mut findings);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings.all()[0].rule_id, RuleId::SiblingMarriage);

        let unrelated = Person {
            child_of_families: vec!["@F1@".into()],
            spouse_of_families: vec!["@F3@".into()],
            ..named("@I2@")
        };
        sibling_marriage(&unrelated, &mut findings);
        assert_eq!(findings.len(), 1);
    }

    #[test]
    fn test_corresponding_entries() {
        let mut families = Families::new();
        families.insert(Family {
            husband_id: Some("@I1@".into()),
            children: vec!["@I9@".into()],
            ..Family::new("@F1@")
        });
        families.insert(Family {
            wife_id: Some("@I2@".into()),
            ..Family::new("@F2@")
        });

        let mut findings = Findings::new();
        let mutual = Person {
            spouse_of_families: vec!["@F1@".into()],
            ..named("@I1@")
        };
        corresponding_entries(&mutual, &families, &mut findings);
        assert!(findings.is_empty());

        let person = Person {
            spouse_of_families: vec!["@F1@".into(), "@F2@".into(), "@F404@".into()],
            child_of_families: vec!["@F1@".into()],
            ..named("@I3@")
        };
        corresponding_entries(&person, &families, &mut findings);
        let messages: Vec<_> = findings.iter().map(|f| f.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "corresponding spouse link missing in family @F1@",
                "corresponding spouse link missing in family @F2@",
                "corresponding spouse link missing in family @F404@",
                "corresponding child link missing in family @F1@",
            ]
        );
    }
}
