//! Text and JSON rendering of trees and findings

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

use crate::config::OutputFormat;
use crate::error::Result;
use crate::family::Families;
use crate::findings::{Findings, NOT_AVAILABLE};
use crate::person::People;

// =============================================================================
// Table
// =============================================================================

/// Boxed text table with centered cells
#[derive(Debug, Clone)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<S: Into<String>>(headers: impl IntoIterator<Item = S>) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Add a row; missing cells render empty, extra cells are dropped
    pub fn add_row<S: Into<String>>(&mut self, cells: impl IntoIterator<Item = S>) {
        let mut row: Vec<String> = cells.into_iter().map(Into::into).collect();
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                self.rows
                    .iter()
                    .map(|row| row[i].chars().count())
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }
}

fn write_rule(f: &mut fmt::Formatter<'_>, widths: &[usize]) -> fmt::Result {
    for width in widths {
        write!(f, "+{}", "-".repeat(width + 2))?;
    }
    writeln!(f, "+")
}

fn write_cells(f: &mut fmt::Formatter<'_>, cells: &[String], widths: &[usize]) -> fmt::Result {
    for (cell, width) in cells.iter().zip(widths) {
        let extra = width - cell.chars().count();
        let left = extra / 2;
        write!(f, "| {}{}{} ", " ".repeat(left), cell, " ".repeat(extra - left))?;
    }
    writeln!(f, "|")
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.widths();
        write_rule(f, &widths)?;
        write_cells(f, &self.headers, &widths)?;
        write_rule(f, &widths)?;
        for row in &self.rows {
            write_cells(f, row, &widths)?;
        }
        write_rule(f, &widths)
    }
}

// =============================================================================
// Views
// =============================================================================

fn date_cell(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn list_cell(ids: &[String]) -> String {
    if ids.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        ids.join(", ")
    }
}

/// Individuals in identifier order; ages are taken at `reference`
pub fn people_table(people: &People, reference: NaiveDate) -> Table {
    let mut table = Table::new([
        "ID", "Name", "Gender", "Birthday", "Age", "Alive", "Death", "Child", "Spouse",
    ]);
    for person in people.iter() {
        table.add_row([
            person.id.clone(),
            person.name().unwrap_or(NOT_AVAILABLE).to_string(),
            person.gender.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            date_cell(person.birth_date),
            person
                .age(reference)
                .map(|age| age.to_string())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            person.is_alive().to_string(),
            date_cell(person.death_date),
            list_cell(&person.child_of_families),
            list_cell(&person.spouse_of_families),
        ]);
    }
    table
}

/// Families in identifier order, spouse names resolved through `people`
pub fn families_table(families: &Families, people: &People) -> Table {
    let name_of = |id: Option<&str>| {
        id.and_then(|id| people.get(id))
            .and_then(|p| p.name())
            .unwrap_or(NOT_AVAILABLE)
            .to_string()
    };

    let mut table = Table::new([
        "ID", "Married", "Divorced", "Husband ID", "Husband Name", "Wife ID", "Wife Name", "Children",
    ]);
    for family in families.iter() {
        table.add_row([
            family.id.clone(),
            date_cell(family.married_date),
            date_cell(family.divorced_date),
            family.husband_id.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            name_of(family.husband_id.as_deref()),
            family.wife_id.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            name_of(family.wife_id.as_deref()),
            list_cell(&family.children),
        ]);
    }
    table
}

pub fn findings_table(findings: &Findings) -> Table {
    let mut table = Table::new(["Category", "Rule", "ID", "Name", "Message"]);
    for finding in findings {
        table.add_row([
            finding.category.to_string(),
            finding.rule_id.to_string(),
            finding.subject_id.clone(),
            finding.subject_name.clone(),
            finding.message.clone(),
        ]);
    }
    table
}

#[derive(Serialize)]
struct FindingsDocument<'a> {
    source: &'a str,
    count: usize,
    findings: &'a Findings,
}

/// Render findings for one input in the requested format
pub fn render_findings(source: &str, findings: &Findings, format: OutputFormat) -> Result<String> {
    let rendered = match format {
        OutputFormat::Table => format!("{}\n{}", source, findings_table(findings)),
        OutputFormat::Plain => findings
            .iter()
            .map(|finding| format!("{}: {}\n", source, finding))
            .collect(),
        OutputFormat::Json => serde_json::to_string_pretty(&FindingsDocument {
            source,
            count: findings.len(),
            findings,
        })?,
    };
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::family::Family;
    use crate::findings::RuleId;
    use crate::person::Person;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_family_table_layout() {
        let mut people = People::new();
        for id in ["@A3@", "@A4@"] {
            people.insert(Person {
                name: Some("Jane /Doe/".to_string()),
                ..Person::new(id)
            });
        }
        let mut families = Families::new();
        families.insert(Family {
            husband_id: Some("@A4@".into()),
            wife_id: Some("@A3@".into()),
            children: vec!["@I11@".into(), "@I12@".into()],
            married_date: Some(ymd(1952, 5, 6)),
            divorced_date: Some(ymd(1992, 4, 26)),
            ..Family::new("@F1@")
        });

        let expected = "\
+------+------------+------------+------------+--------------+---------+------------+--------------+
|  ID  |  Married   |  Divorced  | Husband ID | Husband Name | Wife ID | Wife Name  |   Children   |
+------+------------+------------+------------+--------------+---------+------------+--------------+
| @F1@ | 1952-05-06 | 1992-04-26 |    @A4@    |  Jane /Doe/  |  @A3@   | Jane /Doe/ | @I11@, @I12@ |
+------+------------+------------+------------+--------------+---------+------------+--------------+
";
        assert_eq!(families_table(&families, &people).to_string(), expected);
    }

    #[test]
    fn test_family_table_without_dates_or_spouses() {
        let mut families = Families::new();
        families.insert(Family::new("@F2@"));
        let rendered = families_table(&families, &People::new()).to_string();
        assert!(rendered.contains("| @F2@ |   NA    |    NA    |     NA     |      NA      |"));
    }

    #[test]
    fn test_people_table_rows_in_order() {
        let mut people = People::new();
        people.insert(Person {
            birth_date: Some(ymd(1987, 8, 17)),
            ..Person::new("@I2@")
        });
        people.insert(Person::new("@I1@"));
        let table = people_table(&people, ymd(2017, 8, 18));
        assert_eq!(table.len(), 2);
        let rendered = table.to_string();
        let first = rendered.find("@I1@").unwrap();
        let second = rendered.find("@I2@").unwrap();
        assert!(first < second);
        assert!(rendered.contains("| 1987-08-17 | 30  |"));
    }

    #[test]
    fn test_render_findings_formats() {
        let mut findings = Findings::new();
        findings.person(RuleId::AgeBound, "@I1@", None, "Age should be less than 150");

        let plain = render_findings("tree.ged", &findings, OutputFormat::Plain).unwrap();
        assert_eq!(plain, "tree.ged: PERSON: US07: @I1@: NA: Age should be less than 150\n");

        let json = render_findings("tree.ged", &findings, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["count"], 1);
        assert_eq!(value["findings"][0]["rule_id"], "US07");

        let table = render_findings("tree.ged", &findings, OutputFormat::Table).unwrap();
        assert!(table.starts_with("tree.ged\n+"));
    }
}
