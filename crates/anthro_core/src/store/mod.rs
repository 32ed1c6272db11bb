//! Append-only CSV output store
//!
//! The store writes one row per assessment record. The header row is written
//! only when the file is first created; every later append goes straight to
//! the end. The core never reads this file back, and identical records are
//! appended as-is: dedup is nobody's job here.

use std::fs::OpenOptions;
use std::path::Path;

use thiserror::Error;
use tracing::info;

use crate::models::AssessmentRecord;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Append one record to the CSV at `path`, creating it with headers first
/// when absent.
pub fn append_record<P: AsRef<Path>>(
    path: P,
    record: &AssessmentRecord,
) -> Result<(), StoreError> {
    let path = path.as_ref();
    let write_headers = !path.exists();

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(write_headers)
        .from_writer(file);
    writer.serialize(record)?;
    writer.flush()?;

    info!(id = record.id, path = %path.display(), "assessment appended");
    Ok(())
}
