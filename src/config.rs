//! Processing pipeline configuration

use crate::{Args, Occurrences, Year};
use std::{
    ops::RangeInclusive,
    path::{Path, PathBuf},
    sync::Arc,
};

/// Years for which the relative filter ranks names
///
/// This does not follow the collected year range, so that a table assembled
/// with different settings is still filtered over every year of the dataset.
pub const RANKED_YEARS: RangeInclusive<Year> = 1880..=2022;

/// Final process configuration
///
/// This is the result of digesting [`Args`]. Please refer to [`Args`] to know
/// more about individual fields.
#[allow(missing_docs)]
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub data_dir: Box<Path>,
    pub first_year: Year,
    pub last_year: Year,
    pub min_occurrences: Occurrences,
    pub top_rate: f64,
    pub ranked_years: RangeInclusive<Year>,
}
//
impl Config {
    /// Determine process configuration from CLI arguments
    pub(crate) fn new(args: Args) -> Arc<Self> {
        let Args {
            data_dir,
            first_year,
            last_year,
            min_occurrences,
            top_rate,
            stage: _,
        } = args;
        Arc::new(Self {
            data_dir: data_dir.into(),
            first_year,
            last_year,
            min_occurrences,
            top_rate,
            ranked_years: RANKED_YEARS,
        })
    }

    /// Years whose source files are collected
    pub fn years(&self) -> RangeInclusive<Year> {
        self.first_year..=self.last_year
    }

    /// Yearly source file
    pub fn source_path(&self, year: Year) -> PathBuf {
        self.data_dir.join(format!("yob{year}.txt"))
    }

    /// Combined table of all source files
    pub fn names_path(&self) -> PathBuf {
        self.data_dir.join("names.csv")
    }

    /// Output of the absolute occurrence count filter
    pub fn abs_common_names_path(&self) -> PathBuf {
        self.data_dir.join("abs_common_names.csv")
    }

    /// Output of the relative per-year ranking filter
    pub fn rel_common_names_path(&self) -> PathBuf {
        self.data_dir.join("rel_common_names.csv")
    }
}
//
impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: Path::new("data").into(),
            first_year: 1880,
            last_year: 2022,
            min_occurrences: 1000,
            top_rate: 0.2,
            ranked_years: RANKED_YEARS,
        }
    }
}
