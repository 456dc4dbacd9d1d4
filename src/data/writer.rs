/// Non-trading date CSV output
///
/// The file is staged next to its destination and renamed into place only
/// after every row is flushed, so a failed run never leaves a partial file.
use chrono::NaiveDate;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::data::reader::DATE_COLUMN;
use crate::error::{GapError, Result};
use crate::time::DateTemplate;

/// Write the `Date` header followed by one formatted row per date
pub fn write_dates(path: &Path, dates: &[NaiveDate], template: &DateTemplate) -> Result<()> {
    let staging = staging_path(path);
    debug!("Staging output in {}", staging.display());

    if let Err(e) = write_staged(&staging, dates, template) {
        let _ = fs::remove_file(&staging);
        return Err(e);
    }

    if let Err(e) = fs::rename(&staging, path) {
        let _ = fs::remove_file(&staging);
        return Err(GapError::FileWriteFailed(format!(
            "could not move output into {}: {}",
            path.display(),
            e
        )));
    }

    info!("Wrote {} dates to {}", dates.len(), path.display());
    Ok(())
}

/// Write the CSV body to any sink
pub fn write_rows<W: Write>(
    writer: &mut csv::Writer<W>,
    dates: &[NaiveDate],
    template: &DateTemplate,
) -> Result<()> {
    writer.write_record([DATE_COLUMN])?;
    for date in dates {
        writer.write_record([template.format(*date)])?;
    }
    Ok(())
}

fn write_staged(staging: &Path, dates: &[NaiveDate], template: &DateTemplate) -> Result<()> {
    let file = File::create(staging)?;
    let mut writer = csv::Writer::from_writer(file);
    write_rows(&mut writer, dates, template)?;

    let file = writer
        .into_inner()
        .map_err(|e| GapError::FileWriteFailed(format!("{}: {}", staging.display(), e)))?;
    file.sync_all()?;
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".partial");
    path.with_file_name(name)
}
