//! Relative per-year popularity cutoff

use crate::{
    config::Config,
    progress::{ProgressConfig, ProgressReport, Work},
    record::Record,
    table::{self, TableWriter},
    Result, Year,
};
use anyhow::Context;
use futures::TryStreamExt;
use std::{cmp::Reverse, collections::BTreeMap, pin::pin};

/// Combined table records, grouped by year, in table order within each year
pub type RecordsByYear = BTreeMap<Year, Vec<Record>>;

/// Rank the records of a year by decreasing occurrence count and only keep
/// the leading `top_rate` fraction of them
///
/// The number of kept records is `floor(len * top_rate)`. Records with equal
/// occurrence counts keep their relative order.
pub fn keep_top_fraction(mut records: Vec<Record>, top_rate: f64) -> Vec<Record> {
    records.sort_by_key(|record| Reverse(record.occurrences));
    let num_kept = (records.len() as f64 * top_rate) as usize;
    records.truncate(num_kept);
    records
}

/// Load the combined table in memory, grouped by year
pub async fn load_by_year(config: &Config) -> Result<RecordsByYear> {
    let input_path = config.names_path();
    let mut records = pin!(table::read_table(&input_path).await?);
    let mut by_year = RecordsByYear::new();
    while let Some(record) = records
        .try_next()
        .await
        .context("loading the combined table")?
    {
        by_year.entry(record.year).or_default().push(record);
    }
    Ok(by_year)
}

/// Keep the `config.top_rate` most common names of each ranked year
///
/// Yearly results are written in increasing year order, each year's records
/// being sorted by decreasing occurrence count. Records of years outside of
/// `config.ranked_years` are ignored, whatever years were collected. Returns
/// the number of records that were kept.
pub async fn keep_most_common_names(config: &Config, report: &ProgressReport) -> Result<usize> {
    let by_year = load_by_year(config).await?;
    let num_ignored = by_year
        .iter()
        .filter(|(year, _)| !config.ranked_years.contains(*year))
        .map(|(_, records)| records.len())
        .sum::<usize>();
    if num_ignored > 0 {
        log::warn!("Ignoring {num_ignored} records from years outside of the ranked range");
    }

    let output_path = config.rel_common_names_path();
    let mut output = TableWriter::create(&output_path).await?;
    let years = report.add(
        "Ranking names of each year",
        ProgressConfig::new(Work::PercentSteps(by_year.range(config.ranked_years.clone()).count())),
    );
    let mut num_read = 0;
    for (year, records) in by_year.into_iter() {
        if !config.ranked_years.contains(&year) {
            continue;
        }
        let num_records = records.len();
        num_read += num_records;
        let kept = keep_top_fraction(records, config.top_rate);
        log::debug!("Kept {}/{num_records} records from year {year}", kept.len());
        for record in &kept {
            output.write(record).await?;
        }
        years.make_progress(1);
    }
    let num_kept = output.finish().await?;
    log::info!(
        "Kept {num_kept}/{num_read} records from the top {}% of each year into {}",
        config.top_rate * 100.0,
        output_path.display()
    );
    Ok(num_kept)
}
