//! Fixtures shared by unit tests

use crate::{config::Config, Year};
use std::path::Path;

/// Configuration that reads and writes data inside of a test directory
pub fn config(data_dir: &Path, first_year: Year, last_year: Year) -> Config {
    Config {
        data_dir: data_dir.into(),
        first_year,
        last_year,
        ..Config::default()
    }
}

/// Write down a yearly source file
pub fn write_source(config: &Config, year: Year, lines: &[&str]) {
    let contents = lines.iter().map(|line| format!("{line}\n")).collect::<String>();
    std::fs::write(config.source_path(year), contents).expect("failed to write source file");
}

/// Write down a few years of source data with varied sizes and count ties
///
/// Within each year, names are listed in decreasing popularity, girls first
/// then boys, as in the real dataset.
pub fn write_sample_sources(config: &Config) {
    for year in config.years() {
        let offset = u64::from((year - config.first_year).unsigned_abs());
        let num_names = 3 + 4 * offset;
        let mut lines = Vec::new();
        for gender in ["F", "M"] {
            for rank in 0..num_names {
                // Pairs of names share the same count to exercise tie-breaking
                let occurrences = 10 * (num_names - rank / 2) + offset;
                lines.push(format!("Name{rank}{gender},{gender},{occurrences}"));
            }
        }
        let lines = lines.iter().map(String::as_str).collect::<Vec<_>>();
        write_source(config, year, &lines);
    }
}
