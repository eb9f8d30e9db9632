//! Absolute occurrence count cutoff

use crate::{
    config::Config,
    record::Record,
    table::{self, TableWriter},
    Occurrences, Result,
};
use anyhow::Context;
use futures::TryStreamExt;
use std::pin::pin;

/// Truth that a record is common enough to survive the absolute cutoff
pub fn is_common(record: &Record, min_occurrences: Occurrences) -> bool {
    record.occurrences >= min_occurrences
}

/// Copy the records of the combined table which occur at least
/// `config.min_occurrences` times over their year, in their original order
///
/// Returns the number of records that were kept.
pub async fn drop_rare_names(config: &Config) -> Result<usize> {
    let input_path = config.names_path();
    let output_path = config.abs_common_names_path();
    let mut records = pin!(table::read_table(&input_path).await?);
    let mut output = TableWriter::create(&output_path).await?;
    let mut num_read = 0usize;
    while let Some(record) = records
        .try_next()
        .await
        .context("reading the combined table")?
    {
        num_read += 1;
        if is_common(&record, config.min_occurrences) {
            output.write(&record).await?;
        } else {
            log::trace!("Rejected {record:?} because it's too rare");
        }
    }
    let num_kept = output.finish().await?;
    log::info!(
        "Kept {num_kept}/{num_read} records with at least {} occurences into {}",
        config.min_occurrences,
        output_path.display()
    );
    Ok(num_kept)
}
