//! This program works on the US Social Security Administration's baby names
//! dataset, which ships as one `yob<year>.txt` file per year, each line of
//! which records how many babies of a given gender were given a certain name.
//!
//! It collects all years into a single CSV table, then derives two subsets of
//! common names from it: one based on an absolute occurrence count cutoff, and
//! one that keeps a fixed fraction of the most common names of each year.

mod collect;
mod config;
mod filter;
mod progress;
mod record;
mod table;
#[cfg(test)]
mod testing;

use crate::{config::Config, progress::ProgressReport};
use clap::{Parser, Subcommand};
use log::LevelFilter;
use std::path::PathBuf;

/// Collect yearly baby name files into a table and extract common names
///
/// All files are read from and written to the data directory:
/// `yob<year>.txt` source files are collected into `names.csv`, which is then
/// filtered into `abs_common_names.csv` and `rel_common_names.csv`.
#[derive(Parser, Debug)]
#[command(version, author)]
struct Args {
    /// Directory where the yearly source files are located, and where output
    /// tables will be written
    #[arg(short, long, default_value = "data")]
    data_dir: PathBuf,

    /// First year to be processed
    ///
    /// A `yob<year>.txt` source file must exist for every year between this
    /// one and the last year, inclusive.
    #[arg(long, default_value = "1880")]
    first_year: Year,

    /// Last year to be processed
    #[arg(long, default_value = "2022")]
    last_year: Year,

    /// Minimum number of occurences over a year for a record to be kept by
    /// the absolute filter
    #[arg(short = 'm', long, default_value = "400")]
    min_occurrences: Occurrences,

    /// Fraction of the most common names of each year that are kept by the
    /// relative filter
    ///
    /// Must be greater than 0 and no greater than 1. The number of kept
    /// records for a year is rounded down, so very small fractions may keep
    /// no record at all for some years.
    #[arg(short = 'r', long, default_value = "0.05")]
    top_rate: f64,

    /// Processing stage to be run, by default all stages are run in order
    #[command(subcommand)]
    stage: Option<Stage>,
}
//
impl Args {
    /// Decode and validate CLI arguments
    pub fn parse_and_check() -> Result<Self> {
        // Decode CLI arguments
        let args = Args::parse();

        // Check CLI arguments for basic sanity
        anyhow::ensure!(
            args.first_year <= args.last_year,
            "requested first year {} comes after last year {}",
            args.first_year,
            args.last_year
        );
        anyhow::ensure!(
            args.top_rate > 0.0 && args.top_rate <= 1.0,
            "requested top name fraction {} is not in the ]0, 1] range",
            args.top_rate
        );
        Ok(args)
    }
}

/// Processing stage
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Subcommand)]
enum Stage {
    /// Count the records of the yearly source files, print the total
    Count,

    /// Collect the yearly source files into names.csv
    Assemble,

    /// Filter names.csv into abs_common_names.csv
    AbsFilter,

    /// Filter names.csv into rel_common_names.csv
    RelFilter,

    /// Run assemble, abs-filter and rel-filter in this order
    #[default]
    All,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Decode CLI arguments, which exits early on --help and --version
    let args = Args::parse_and_check()?;

    // Set up logging, but don't let a missing syslog daemon stop us
    if let Err(e) = setup_logging() {
        eprintln!("WARNING: Failed to set up logging, will run without it: {e}");
    }
    let stage = args.stage.unwrap_or_default();
    let config = Config::new(args);
    log::debug!("Running {stage:?} with {config:#?}");

    // Run the requested processing stages
    let report = ProgressReport::new();
    match stage {
        Stage::Count => {
            let total = collect::count(&config, &report).await?;
            println!("{total}");
        }
        Stage::Assemble => {
            collect::assemble(&config, &report).await?;
        }
        Stage::AbsFilter => {
            filter::absolute::drop_rare_names(&config).await?;
        }
        Stage::RelFilter => {
            filter::relative::keep_most_common_names(&config, &report).await?;
        }
        Stage::All => {
            collect::assemble(&config, &report).await?;
            filter::absolute::drop_rare_names(&config).await?;
            filter::relative::keep_most_common_names(&config, &report).await?;
        }
    }
    Ok(())
}

/// Use anyhow for Result type erasure
pub use anyhow::Result;

/// Year of Gregorian Calendar
pub type Year = i16;

/// Number of times a name was given over a single year
pub type Occurrences = u64;

/// Set up logging
fn setup_logging() -> syslog::Result<()> {
    syslog::init(
        syslog::Facility::LOG_USER,
        if cfg!(feature = "log-trace") {
            LevelFilter::Trace
        } else if cfg!(debug_assertions) {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        },
        None,
    )
}
