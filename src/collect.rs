//! Collection of the yearly source files into a single combined table

use crate::{
    config::Config,
    progress::{ProgressConfig, ProgressReport, Work},
    table::{self, TableWriter},
    Result,
};
use anyhow::Context;
use futures::TryStreamExt;
use std::pin::pin;

/// Count the records available in the source files of the configured years
///
/// Rows are validated just like they are during collection, so a successful
/// count guarantees that [`assemble()`] will not fail on bad input.
pub async fn count(config: &Config, report: &ProgressReport) -> Result<usize> {
    let files = report.add(
        "Counting source records",
        ProgressConfig::new(Work::Steps(config.years().count())).dont_show_rate_eta(),
    );
    let mut total = 0;
    for year in config.years() {
        let path = config.source_path(year);
        let num_records = table::read_source(&path, year)
            .await?
            .try_fold(0, |acc, _record| async move { Ok::<_, anyhow::Error>(acc + 1) })
            .await
            .with_context(|| format!("counting records of year {year}"))?;
        log::debug!("Found {num_records} records in {}", path.display());
        total += num_records;
        files.make_progress(1);
    }
    log::info!(
        "Found {total} records between {} and {}",
        config.first_year,
        config.last_year
    );
    Ok(total)
}

/// Concatenate the source files of the configured years into the combined
/// table, tagging each record with its year
///
/// Records are neither deduplicated nor sorted: the table lists every year in
/// increasing order, and records of a year in source file order. Returns the
/// number of records written.
pub async fn assemble(config: &Config, report: &ProgressReport) -> Result<usize> {
    let output_path = config.names_path();
    let mut output = TableWriter::create(&output_path).await?;
    let files = report.add(
        "Collecting source files",
        ProgressConfig::new(Work::Steps(config.years().count())),
    );
    for year in config.years() {
        let path = config.source_path(year);
        let mut records = pin!(table::read_source(&path, year).await?);
        let mut num_records = 0usize;
        while let Some(record) = records
            .try_next()
            .await
            .with_context(|| format!("collecting records of year {year}"))?
        {
            log::trace!("Collected {record:?}");
            output.write(&record).await?;
            num_records += 1;
        }
        log::debug!("Collected {num_records} records from {}", path.display());
        files.make_progress(1);
    }
    let total = output.finish().await?;
    log::info!("Wrote {total} records to {}", output_path.display());
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;
    use tempfile::tempdir;

    #[tokio::test]
    async fn count_sums_all_years() -> Result<()> {
        let dir = tempdir()?;
        let config = testing::config(dir.path(), 1880, 1882);
        testing::write_source(&config, 1880, &["Mary,F,7065", "Anna,F,2604", "John,M,9655"]);
        testing::write_source(&config, 1881, &[]);
        testing::write_source(&config, 1882, &["Mary,F,8148"]);

        assert_eq!(count(&config, &ProgressReport::new()).await?, 4);
        assert!(!config.names_path().exists());
        Ok(())
    }

    #[tokio::test]
    async fn assembly_tags_records_with_their_year() -> Result<()> {
        let dir = tempdir()?;
        let config = testing::config(dir.path(), 1880, 1881);
        testing::write_source(&config, 1880, &["Mary,F,7065", "John,M,9655"]);
        testing::write_source(&config, 1881, &["Mary,F,6919", "Mary,F,6919"]);

        assert_eq!(assemble(&config, &ProgressReport::new()).await?, 4);
        assert_eq!(
            std::fs::read_to_string(config.names_path())?,
            "name,gender,occurences,year\n\
             Mary,F,7065,1880\n\
             John,M,9655,1880\n\
             Mary,F,6919,1881\n\
             Mary,F,6919,1881\n"
        );
        Ok(())
    }

    #[tokio::test]
    async fn assembly_matches_count_and_is_reproducible() -> Result<()> {
        let dir = tempdir()?;
        let config = testing::config(dir.path(), 1990, 1994);
        testing::write_sample_sources(&config);
        let report = ProgressReport::new();

        let expected = count(&config, &report).await?;
        assert_eq!(assemble(&config, &report).await?, expected);
        let first = std::fs::read(config.names_path())?;
        assert_eq!(assemble(&config, &report).await?, expected);
        assert_eq!(std::fs::read(config.names_path())?, first);
        Ok(())
    }

    #[tokio::test]
    async fn assembly_overwrites_previous_output() -> Result<()> {
        let dir = tempdir()?;
        let config = testing::config(dir.path(), 2000, 2000);
        std::fs::write(config.names_path(), "stale content that is rather long\n".repeat(10))?;
        testing::write_source(&config, 2000, &["Emily,F,25956"]);

        assemble(&config, &ProgressReport::new()).await?;
        assert_eq!(
            std::fs::read_to_string(config.names_path())?,
            "name,gender,occurences,year\nEmily,F,25956,2000\n"
        );
        Ok(())
    }

    #[tokio::test]
    async fn missing_years_abort_the_run() -> Result<()> {
        let dir = tempdir()?;
        let config = testing::config(dir.path(), 1880, 1881);
        testing::write_source(&config, 1880, &["Mary,F,7065"]);

        let error = assemble(&config, &ProgressReport::new()).await.unwrap_err();
        assert!(format!("{error:#}").contains("yob1881.txt"), "{error:#}");
        assert!(count(&config, &ProgressReport::new()).await.is_err());
        Ok(())
    }

    #[tokio::test]
    async fn malformed_lines_abort_the_run() -> Result<()> {
        let dir = tempdir()?;
        let config = testing::config(dir.path(), 1880, 1880);
        testing::write_source(&config, 1880, &["Mary,F,7065", "John,M"]);

        let error = assemble(&config, &ProgressReport::new()).await.unwrap_err();
        assert!(format!("{error:#}").contains("yob1880.txt:2:"), "{error:#}");
        Ok(())
    }
}
