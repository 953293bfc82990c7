//! Family-scoped rules

use chrono::NaiveDate;
use tracing::debug;

use crate::family::Family;
use crate::findings::{Findings, RuleId, NOT_AVAILABLE};
use crate::person::People;

/// US05: no spouse may have died before the marriage
pub(super) fn death_before_marriage(family: &Family, people: &People, findings: &mut Findings) {
    if let Some(married) = family.married_date {
        spouses_died_before(family, married, RuleId::MarriageBeforeDeath, "marriage", people, findings);
    }
}

/// US06: no spouse may have died before the divorce
pub(super) fn death_before_divorce(family: &Family, people: &People, findings: &mut Findings) {
    if let Some(divorced) = family.divorced_date {
        spouses_died_before(family, divorced, RuleId::DivorceBeforeDeath, "divorce", people, findings);
    }
}

/// Husband and wife are checked independently; both may fire
fn spouses_died_before(
    family: &Family,
    event: NaiveDate,
    rule_id: RuleId,
    event_name: &str,
    people: &People,
    findings: &mut Findings,
) {
    for spouse_id in family.spouse_ids() {
        let Some(spouse) = people.get(spouse_id) else {
            debug!(family = %family.id, spouse = spouse_id, "unknown spouse");
            continue;
        };
        if spouse.death_date.is_some_and(|death| death < event) {
            findings.family(
                rule_id,
                &family.id,
                format!(
                    "{} after death for {} {}",
                    event_name,
                    spouse.id,
                    spouse.name().unwrap_or(NOT_AVAILABLE)
                ),
            );
        }
    }
}
