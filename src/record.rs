//! Name frequency records, as found in the yearly source files and in the
//! combined tables that this program writes

use crate::{Occurrences, Result, Year};
use anyhow::bail;
use csv_async::StringRecord;
use serde::Serialize;
use std::{
    fmt::{self, Display},
    path::Path,
    str::FromStr,
};

/// Case-sensitive first name
pub type Name = Box<str>;

/// Column names of every table written by this program
///
/// The misspelled "occurences" is part of the file format that downstream
/// consumers expect, do not fix it.
pub const TABLE_HEADER: [&str; 4] = ["name", "gender", "occurences", "year"];

/// Gender under which a name was registered
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Gender {
    /// Female
    F,

    /// Male
    M,
}
//
impl FromStr for Gender {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "F" => Ok(Self::F),
            "M" => Ok(Self::M),
            other => bail!("gender {other:?} is neither \"F\" nor \"M\""),
        }
    }
}

/// Yearly usage of a name, tagged with the year where it was recorded
///
/// Serializes to one row of a combined table, see [`TABLE_HEADER`].
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct Record {
    /// Name whose frequency is being studied
    pub name: Name,

    /// Gender under which the name was registered
    pub gender: Gender,

    /// Number of times the name/gender pair was recorded over this year
    #[serde(rename = "occurences")]
    pub occurrences: Occurrences,

    /// Year on which the data was recorded
    pub year: Year,
}

/// Location of a CSV row, used to report parse errors
#[derive(Clone, Copy, Debug)]
pub struct RowLocation<'path> {
    /// File that the row comes from
    pub path: &'path Path,

    /// 1-based line number
    pub line: usize,
}
//
impl Display for RowLocation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.path.display(), self.line)
    }
}

/// Parse a `name,gender,count` row from a yearly source file
///
/// Source files do not carry the year, it must be deduced from the file name.
pub fn parse_source_row(row: &StringRecord, year: Year, at: RowLocation) -> Result<Record> {
    let [name, gender, occurrences] = split_fields(row, at)?;
    Ok(Record {
        name: parse_name(name, at)?,
        gender: parse_gender(gender, at)?,
        occurrences: parse_occurrences(occurrences, at)?,
        year,
    })
}

/// Parse a `name,gender,occurences,year` row from a combined table
pub fn parse_table_row(row: &StringRecord, at: RowLocation) -> Result<Record> {
    let [name, gender, occurrences, year] = split_fields(row, at)?;
    let Ok(year) = year.parse::<Year>() else {
        bail!("{at}: year {year:?} is not a valid year number");
    };
    Ok(Record {
        name: parse_name(name, at)?,
        gender: parse_gender(gender, at)?,
        occurrences: parse_occurrences(occurrences, at)?,
        year,
    })
}

/// Check that the first row of a combined table is the expected header
pub fn check_table_header(row: &StringRecord, at: RowLocation) -> Result<()> {
    if row.iter().ne(TABLE_HEADER) {
        bail!(
            "{at}: expected table header {:?}, found {:?}",
            TABLE_HEADER.join(","),
            row.iter().collect::<Vec<_>>().join(",")
        );
    }
    Ok(())
}

/// Check that a row has the expected number of fields and split it
fn split_fields<'row, const N: usize>(
    row: &'row StringRecord,
    at: RowLocation,
) -> Result<[&'row str; N]> {
    if row.len() != N {
        bail!(
            "{at}: expected {N} comma-separated fields, found {} in {:?}",
            row.len(),
            row.iter().collect::<Vec<_>>().join(",")
        );
    }
    Ok(std::array::from_fn(|idx| row.get(idx).unwrap_or_default()))
}

fn parse_name(name: &str, at: RowLocation) -> Result<Name> {
    if name.is_empty() {
        bail!("{at}: name field is empty");
    }
    Ok(name.into())
}

fn parse_gender(gender: &str, at: RowLocation) -> Result<Gender> {
    gender.parse().map_err(|e| anyhow::format_err!("{at}: {e}"))
}

fn parse_occurrences(occurrences: &str, at: RowLocation) -> Result<Occurrences> {
    occurrences.parse().map_err(|_| {
        anyhow::format_err!(
            "{at}: occurrence count {occurrences:?} is not a non-negative integer"
        )
    })
}
