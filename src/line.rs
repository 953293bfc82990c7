//! Line record source
//!
//! Splits raw GEDCOM text lines into [`TagRecord`]s. Validity here is purely
//! lexical; which tags matter is decided by the builders.

use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::Result;
use crate::record::TagRecord;

/// Splits `LEVEL [@XREF@] TAG [ARGUMENT]` lines
pub struct LineParser {
    line_re: Regex,
    tag_re: Regex,
}

impl Default for LineParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LineParser {
    pub fn new() -> Self {
        Self {
            // level, optional xref, tag, optional argument
            line_re: Regex::new(r"^\s*(\d{1,2}) +(?:(@[^@\s]+@) +)?(\S+)(?: (.*))?$").unwrap(),
            tag_re: Regex::new(r"^[A-Za-z0-9_]+$").unwrap(),
        }
    }

    /// Parse one line; never fails, but may flag the record as malformed
    pub fn parse(&self, line: &str) -> TagRecord {
        let line = line.trim_end_matches(['\r', '\n']);
        let Some(caps) = self.line_re.captures(line) else {
            return TagRecord::malformed(0, "", line.trim());
        };

        let level: u32 = caps[1].parse().unwrap_or_default();
        let tag = caps[3].to_string();
        let rest = caps.get(4).map(|m| m.as_str().trim()).unwrap_or_default();

        match caps.get(2) {
            Some(xref) => {
                // the xref becomes the argument: `0 @I1@ INDI` => INDI @I1@
                let well_formed = level == 0 && rest.is_empty() && self.tag_re.is_match(&tag);
                TagRecord {
                    level,
                    tag,
                    argument: xref.as_str().to_string(),
                    well_formed,
                }
            }
            None => {
                let well_formed = self.tag_re.is_match(&tag);
                TagRecord {
                    level,
                    tag,
                    argument: rest.to_string(),
                    well_formed,
                }
            }
        }
    }

    /// Parse every non-blank line of `text` in order
    pub fn parse_all(&self, text: &str) -> Vec<TagRecord> {
        text.lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| self.parse(line))
            .collect()
    }
}

/// Read a GEDCOM file into records, in file order
pub fn read_records(path: impl AsRef<Path>) -> Result<Vec<TagRecord>> {
    let parser = LineParser::new();
    let reader = BufReader::new(File::open(path)?);
    let mut records = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let line = line.trim_start_matches('\u{feff}');
        if line.trim().is_empty() {
            continue;
        }
        records.push(parser.parse(line));
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_xref_line() {
        let record = LineParser::new().parse("0 @I1@ INDI");
        assert_eq!(record, TagRecord::new(0, "INDI", "@I1@"));
    }

    #[test]
    fn test_parse_argument_with_spaces() {
        let parser = LineParser::new();
        assert_eq!(parser.parse("1 NAME Bob /Saget/"), TagRecord::new(1, "NAME", "Bob /Saget/"));
        assert_eq!(parser.parse("2 DATE 6 MAY 1952\r"), TagRecord::new(2, "DATE", "6 MAY 1952"));
        assert_eq!(parser.parse("1 BIRT"), TagRecord::new(1, "BIRT", ""));
    }

    #[test]
    fn test_unknown_tags_are_still_well_formed() {
        let record = LineParser::new().parse("1 SOUR Family Echo");
        assert!(record.well_formed);
        assert_eq!(record.tag, "SOUR");
    }

    #[test]
    fn test_malformed_lines() {
        let parser = LineParser::new();
        for line in ["BLAH", "x NAME Bob", "1 @I1@ INDI", "0 @I1@ INDI extra", "1 NA-ME Bob"] {
            assert!(!parser.parse(line).well_formed, "accepted {:?}", line);
        }
    }

    #[test]
    fn test_read_records_skips_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiny.ged");
        std::fs::write(&path, "0 HEAD\n\n0 @I1@ INDI\n1 NAME Jane /Doe/\n0 TRLR\n").unwrap();

        let records = read_records(&path).unwrap();
        let tags: Vec<_> = records.iter().map(|r| r.tag.as_str()).collect();
        assert_eq!(tags, vec!["HEAD", "INDI", "NAME", "TRLR"]);
    }
}
