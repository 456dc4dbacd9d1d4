/// Trading-date loader for historical price exports (Yahoo Finance style CSV)
use chrono::NaiveDate;
use serde::Deserialize;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use tracing::{debug, info, warn};

use crate::error::{GapError, Result};
use crate::types::KnownDates;

/// Header of the column holding trading dates, in both input and output
pub const DATE_COLUMN: &str = "Date";

/// Only the date matters; price columns are ignored
#[derive(Debug, Deserialize)]
struct PriceRow {
    #[serde(rename = "Date")]
    date: NaiveDate,
}

/// Load every trading date from a CSV file with a `Date` column
pub fn read_known_dates(path: &Path) -> Result<KnownDates> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => GapError::InputFileNotFound(path.to_path_buf()),
        _ => GapError::FileError(e),
    })?;

    let known = read_known_dates_from(file, path)?;

    match (known.first(), known.last()) {
        (Some(first), Some(last)) => info!(
            "Loaded {} trading dates from {} ({} to {})",
            known.len(),
            path.display(),
            first,
            last
        ),
        _ => warn!("{} contains no trading dates", path.display()),
    }

    Ok(known)
}

/// Load trading dates from any CSV source; `source` only labels errors
pub fn read_known_dates_from<R: Read>(input: R, source: &Path) -> Result<KnownDates> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(input);

    if !reader.headers()?.iter().any(|h| h == DATE_COLUMN) {
        return Err(GapError::MissingColumn {
            path: source.to_path_buf(),
            column: DATE_COLUMN.to_string(),
        });
    }

    let mut known = KnownDates::new();
    let mut rows = 0usize;
    for record in reader.deserialize::<PriceRow>() {
        let row = record.map_err(|e| row_error(source, e))?;
        known.insert(row.date);
        rows += 1;
    }

    if rows > known.len() {
        debug!(
            "{}: {} duplicate dates collapsed",
            source.display(),
            rows - known.len()
        );
    }

    Ok(known)
}

fn row_error(source: &Path, err: csv::Error) -> GapError {
    if let csv::ErrorKind::Deserialize { pos, err: cause } = err.kind() {
        let line = pos.as_ref().map(|p| p.line()).unwrap_or_default();
        return GapError::InvalidInputData(format!(
            "{} line {}: {} (expected YYYY-MM-DD)",
            source.display(),
            line,
            cause
        ));
    }
    GapError::Csv(err)
}
