//! CSV input: turns files with a header row into [`Record`]s.

use csv::{ErrorKind, ReaderBuilder};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use tracing::{debug, info};

use crate::error::{ReportError, Result};
use crate::reports::Record;

/// Reads every file in order and concatenates their records.
///
/// All paths are checked for existence before the first file is opened.
pub fn read_csv_files<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<Record>> {
    if let Some(missing) = paths.iter().map(AsRef::<Path>::as_ref).find(|p| !p.exists()) {
        return Err(ReportError::MissingInput {
            path: missing.to_path_buf(),
        });
    }

    let mut records = Vec::new();
    for path in paths {
        records.extend(read_csv_file(path.as_ref())?);
    }

    info!(files = paths.len(), records = records.len(), "CSV input loaded");
    Ok(records)
}

/// Reads the records of a single CSV file.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn read_csv_file(path: &Path) -> Result<Vec<Record>> {
    let file = File::open(path).map_err(|e| open_error(path, e))?;
    let records = read_records(path, file)?;
    debug!(records = records.len(), "CSV file read");
    Ok(records)
}

/// Rows may have more or fewer fields than the header. Extra fields are
/// dropped and missing trailing fields are simply absent from the record.
fn read_records<R: Read>(path: &Path, reader: R) -> Result<Vec<Record>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let headers = rdr.headers().map_err(|e| csv_error(path, e))?.clone();

    let mut rows = Vec::new();
    let mut ragged = 0usize;
    for result in rdr.records() {
        let fields = result.map_err(|e| csv_error(path, e))?;
        if fields.len() != headers.len() {
            ragged += 1;
        }
        let record: Record = headers
            .iter()
            .zip(fields.iter())
            .map(|(header, value)| (header.to_string(), value.to_string()))
            .collect();
        rows.push(record);
    }

    if ragged > 0 {
        debug!(ragged, "Rows whose field count differs from the header");
    }
    Ok(rows)
}

fn open_error(path: &Path, err: io::Error) -> ReportError {
    if err.kind() == io::ErrorKind::NotFound {
        ReportError::MissingInput {
            path: path.to_path_buf(),
        }
    } else {
        ReportError::Malformed {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }
}

/// Encoding problems are data errors; anything else that stops the file
/// from being read is a processing error.
fn csv_error(path: &Path, err: csv::Error) -> ReportError {
    let invalid_data = match err.kind() {
        ErrorKind::Utf8 { .. } => true,
        ErrorKind::Io(io_err) => io_err.kind() == io::ErrorKind::InvalidData,
        _ => false,
    };

    let path = path.to_path_buf();
    let message = err.to_string();
    if invalid_data {
        ReportError::InvalidData { path, message }
    } else {
        ReportError::Malformed { path, message }
    }
}
