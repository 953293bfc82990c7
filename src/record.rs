//! Leveled tag records and the recognized tag set

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{GedcomError, Result};

/// One line of input, already split into its parts by the line source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRecord {
    /// Nesting level (0 starts a new top-level record)
    pub level: u32,
    /// Tag name, e.g. `INDI` or `DATE`
    pub tag: String,
    /// Argument string, empty when the line has none
    pub argument: String,
    /// Upstream lexical validity flag
    pub well_formed: bool,
}

impl TagRecord {
    /// Create a well-formed record
    pub fn new(level: u32, tag: impl Into<String>, argument: impl Into<String>) -> Self {
        Self {
            level,
            tag: tag.into(),
            argument: argument.into(),
            well_formed: true,
        }
    }

    /// Create a record flagged as malformed upstream
    pub fn malformed(level: u32, tag: impl Into<String>, argument: impl Into<String>) -> Self {
        Self {
            well_formed: false,
            ..Self::new(level, tag, argument)
        }
    }

    /// Whether this record starts a new top-level entity
    pub fn is_top_level(&self) -> bool {
        self.level == 0
    }

    /// The recognized tag, or `None` for tags the builders ignore
    pub fn known_tag(&self) -> Option<Tag> {
        Tag::parse(&self.tag)
    }

    /// Fail with [`GedcomError::MalformedRecord`] unless the record is well formed
    pub fn ensure_well_formed(&self) -> Result<()> {
        if self.well_formed {
            Ok(())
        } else {
            Err(GedcomError::MalformedRecord {
                level: self.level,
                tag: self.tag.clone(),
                argument: self.argument.clone(),
            })
        }
    }
}

impl fmt::Display for TagRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.argument.is_empty() {
            write!(f, "{} {}", self.level, self.tag)
        } else {
            write!(f, "{} {} {}", self.level, self.tag, self.argument)
        }
    }
}

/// Tags the builders act on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Indi,
    Fam,
    Name,
    Sex,
    Birt,
    Deat,
    Marr,
    Div,
    Husb,
    Wife,
    Chil,
    Famc,
    Fams,
    Date,
}

impl Tag {
    pub fn parse(tag: &str) -> Option<Self> {
        let tag = match tag {
            "INDI" => Self::Indi,
            "FAM" => Self::Fam,
            "NAME" => Self::Name,
            "SEX" => Self::Sex,
            "BIRT" => Self::Birt,
            "DEAT" => Self::Deat,
            "MARR" => Self::Marr,
            "DIV" => Self::Div,
            "HUSB" => Self::Husb,
            "WIFE" => Self::Wife,
            "CHIL" => Self::Chil,
            "FAMC" => Self::Famc,
            "FAMS" => Self::Fams,
            "DATE" => Self::Date,
            _ => return None,
        };
        Some(tag)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Indi => "INDI",
            Self::Fam => "FAM",
            Self::Name => "NAME",
            Self::Sex => "SEX",
            Self::Birt => "BIRT",
            Self::Deat => "DEAT",
            Self::Marr => "MARR",
            Self::Div => "DIV",
            Self::Husb => "HUSB",
            Self::Wife => "WIFE",
            Self::Chil => "CHIL",
            Self::Famc => "FAMC",
            Self::Fams => "FAMS",
            Self::Date => "DATE",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The subordinate tag group a trailing `DATE` belongs to.
///
/// Opened by a subordinate tag, cleared by any record below level 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventContext {
    #[default]
    None,
    Sex,
    Birth,
    Death,
    Marriage,
    Divorce,
    Name,
    ChildLink,
    SpouseLink,
    Husband,
    Wife,
    Child,
}

impl EventContext {
    /// Apply the level reset rule for an incoming record
    pub fn reset_for(&mut self, record: &TagRecord) {
        if record.level < 2 {
            *self = Self::None;
        }
    }
}
