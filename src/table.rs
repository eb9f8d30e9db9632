//! CSV input and output shared by all pipeline stages

use crate::{
    record::{self, Record, RowLocation, TABLE_HEADER},
    Result, Year,
};
use anyhow::{bail, Context};
use csv_async::{AsyncReaderBuilder, AsyncSerializer, AsyncWriterBuilder, QuoteStyle, StringRecord};
use futures::{Stream, StreamExt};
use std::path::{Path, PathBuf};
use tokio::{fs::File, io::AsyncWriteExt};

/// Read the records of a yearly source file
///
/// Source files have no header, and their rows lack the year column, which is
/// provided by the caller.
pub async fn read_source(path: &Path, year: Year) -> Result<impl Stream<Item = Result<Record>> + '_> {
    Ok(read_rows(path).await?.map(move |row| -> Result<Record> {
        let (at, row) = row?;
        record::parse_source_row(&row, year, at)
    }))
}

/// Read the records of a combined table
///
/// The header row is checked before this function returns, so a table that is
/// empty or starts with anything else is rejected upfront.
pub async fn read_table(path: &Path) -> Result<impl Stream<Item = Result<Record>> + '_> {
    let mut rows = Box::pin(read_rows(path).await?);
    let Some(header) = rows.next().await else {
        bail!("{}: table is empty, expected a header row", path.display());
    };
    let (at, header) = header?;
    record::check_table_header(&header, at)?;
    Ok(rows.map(|row| -> Result<Record> {
        let (at, row) = row?;
        record::parse_table_row(&row, at)
    }))
}

/// Open a CSV file and locate its raw rows
///
/// Quotes get no special treatment, so fields are exactly the text between
/// commas. Field count validation is left to the record parser, which produces
/// more helpful error messages than the CSV reader. Blank lines are skipped,
/// but still count towards the reported line numbers.
async fn read_rows(
    path: &Path,
) -> Result<impl Stream<Item = Result<(RowLocation<'_>, StringRecord)>>> {
    let file = File::open(path)
        .await
        .with_context(|| format!("opening {}", path.display()))?;
    let rows = AsyncReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .create_reader(file)
        .into_records();
    Ok(rows.map(move |row| {
        row.map(|row| {
            let line = row.position().map_or(0, |pos| pos.line() as usize);
            (RowLocation { path, line }, row)
        })
        .with_context(|| format!("reading {}", path.display()))
    }))
}

/// Writer of a combined table
///
/// Fields are never quoted, so records read from a source file are written
/// back with the same text. The destination is truncated on creation. Call [`TableWriter::finish()`]
/// once done, otherwise buffered rows may not reach the file.
pub struct TableWriter {
    /// Destination file
    path: PathBuf,

    /// CSV serializer
    serializer: AsyncSerializer<File>,

    /// Number of records written so far, header excluded
    len: usize,
}
//
impl TableWriter {
    /// Create or overwrite a table, writing down its header
    pub async fn create(path: &Path) -> Result<Self> {
        let context = || format!("creating table {}", path.display());
        let mut file = File::create(path).await.with_context(context)?;
        // The header is written by hand so that even empty tables get one
        let header = format!("{}\n", TABLE_HEADER.join(","));
        file.write_all(header.as_bytes())
            .await
            .with_context(context)?;
        let serializer = AsyncWriterBuilder::new()
            .has_headers(false)
            .quote_style(QuoteStyle::Never)
            .create_serializer(file);
        Ok(Self {
            path: path.into(),
            serializer,
            len: 0,
        })
    }

    /// Append a record to the table
    pub async fn write(&mut self, record: &Record) -> Result<()> {
        self.serializer
            .serialize(record)
            .await
            .with_context(|| format!("writing {record:?} to {}", self.path.display()))?;
        self.len += 1;
        Ok(())
    }

    /// Flush the table to disk, tell how many records were written
    pub async fn finish(mut self) -> Result<usize> {
        self.serializer
            .flush()
            .await
            .with_context(|| format!("flushing {}", self.path.display()))?;
        Ok(self.len)
    }
}
