//! Historical anthropometry dataset ingestion
//!
//! Reads the historical measurement table used to fit the growth and sport
//! models. Column lookup is header-driven so the CSV column order does not
//! matter; the required set is checked up front and a missing column is a
//! configuration error, never a silent default.
//!
//! Height is normalized to meters here, once, at ingestion. Rows with
//! unparseable numbers are skipped and counted in [`ParseStats`] rather
//! than aborting the whole load.

use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;
use tracing::{info, warn};

use crate::models::normalize_height;

/// Required CSV headers, matching the historical spreadsheet exports
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "Edad",
    "Peso",
    "Altura",
    "PlTr",
    "PlAbd",
    "Test_Salto",
    "Test_Cooper",
    "Test_FlexCLS",
];

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Historical dataset is missing required column: {name}")]
    MissingColumn { name: String },

    #[error("Historical dataset contains no usable rows")]
    Empty,
}

impl DatasetError {
    /// Missing columns and empty datasets are configuration errors; the
    /// process should not continue to model fitting.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            DatasetError::MissingColumn { .. } | DatasetError::Empty
        )
    }
}

/// One historical row, height already in meters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoricalRecord {
    pub age: f32,
    pub weight_kg: f32,
    pub height_m: f32,
    pub skinfold_tricipital_mm: f32,
    pub skinfold_abdominal_mm: f32,
    pub vertical_jump_m: f32,
    pub cooper_distance_m: f32,
    pub flexibility_cm: f32,
}

/// Row ingestion statistics
#[derive(Debug, Clone, Default)]
pub struct ParseStats {
    pub total_rows: u32,
    pub parsed: u32,
    pub failed: u32,
}

/// In-memory historical dataset, read-only after load
#[derive(Debug, Clone)]
pub struct HistoricalDataset {
    records: Vec<HistoricalRecord>,
}

impl HistoricalDataset {
    pub fn new(records: Vec<HistoricalRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[HistoricalRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Load the dataset from a CSV file.
    ///
    /// Fails fast when a required column is absent or the file cannot be
    /// read. Individual bad rows, whether unparseable or structurally
    /// malformed, are skipped and counted.
    pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<(Self, ParseStats), DatasetError> {
        let mut reader = csv::Reader::from_path(path.as_ref())?;

        let headers = reader.headers()?.clone();
        let mut index: HashMap<&str, usize> = HashMap::new();
        for (i, name) in headers.iter().enumerate() {
            index.insert(name, i);
        }
        for required in REQUIRED_COLUMNS {
            if !index.contains_key(required) {
                return Err(DatasetError::MissingColumn {
                    name: required.to_string(),
                });
            }
        }

        let col = |name: &str| -> usize { index[name] };
        let (c_age, c_weight, c_height) = (col("Edad"), col("Peso"), col("Altura"));
        let (c_pltr, c_plabd) = (col("PlTr"), col("PlAbd"));
        let (c_jump, c_cooper, c_flex) =
            (col("Test_Salto"), col("Test_Cooper"), col("Test_FlexCLS"));

        let mut stats = ParseStats::default();
        let mut records = Vec::new();

        for result in reader.records() {
            stats.total_rows += 1;
            let row = match result {
                Ok(row) => row,
                Err(err) => {
                    stats.failed += 1;
                    warn!(row = stats.total_rows, error = %err, "skipping malformed dataset row");
                    continue;
                }
            };
            let parse = |idx: usize| -> Option<f32> {
                row.get(idx).and_then(|v| v.trim().parse::<f32>().ok())
            };
            match (
                parse(c_age),
                parse(c_weight),
                parse(c_height),
                parse(c_pltr),
                parse(c_plabd),
                parse(c_jump),
                parse(c_cooper),
                parse(c_flex),
            ) {
                (
                    Some(age),
                    Some(weight_kg),
                    Some(height_raw),
                    Some(tricipital),
                    Some(abdominal),
                    Some(jump),
                    Some(cooper),
                    Some(flex),
                ) => {
                    records.push(HistoricalRecord {
                        age,
                        weight_kg,
                        height_m: normalize_height(height_raw),
                        skinfold_tricipital_mm: tricipital,
                        skinfold_abdominal_mm: abdominal,
                        vertical_jump_m: jump,
                        cooper_distance_m: cooper,
                        flexibility_cm: flex,
                    });
                    stats.parsed += 1;
                }
                _ => {
                    stats.failed += 1;
                    warn!(row = stats.total_rows, "skipping unparseable dataset row");
                }
            }
        }

        if records.is_empty() {
            return Err(DatasetError::Empty);
        }

        info!(
            parsed = stats.parsed,
            failed = stats.failed,
            "historical dataset loaded"
        );
        Ok((Self::new(records), stats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "Edad,Peso,Altura,PlTr,PlAbd,Test_Salto,Test_Cooper,Test_FlexCLS";

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn loads_rows_and_normalizes_height() {
        let file = write_csv(&format!(
            "{HEADER}\n15,60.0,170,12,10,1.8,2500,35\n16,65.5,1.82,14,11,1.9,2700,40\n"
        ));
        let (dataset, stats) = HistoricalDataset::load_csv(file.path()).unwrap();
        assert_eq!(stats.parsed, 2);
        assert_eq!(stats.failed, 0);
        assert!((dataset.records()[0].height_m - 1.70).abs() < 1e-6);
        assert!((dataset.records()[1].height_m - 1.82).abs() < 1e-6);
    }

    #[test]
    fn missing_column_is_a_configuration_error() {
        let file = write_csv("Edad,Peso,Altura\n15,60.0,170\n");
        let err = HistoricalDataset::load_csv(file.path()).unwrap_err();
        match &err {
            DatasetError::MissingColumn { name } => assert_eq!(name, "PlTr"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
        assert!(err.is_configuration());
    }

    #[test]
    fn bad_rows_are_counted_not_fatal() {
        let file = write_csv(&format!(
            "{HEADER}\n15,60.0,170,12,10,1.8,2500,35\n15,not-a-number,170,12,10,1.8,2500,35\n"
        ));
        let (dataset, stats) = HistoricalDataset::load_csv(file.path()).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(stats.failed, 1);
    }

    #[test]
    fn ragged_row_is_counted_not_fatal() {
        // Second row has too few fields, which the reader reports as a
        // record-level error rather than a parse failure. The load must
        // still finish with the good rows.
        let file = write_csv(&format!(
            "{HEADER}\n15,60.0,170,12,10,1.8,2500,35\n16,65.5\n17,70.0,180,13,11,2.0,2800,42\n"
        ));
        let (dataset, stats) = HistoricalDataset::load_csv(file.path()).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(stats.total_rows, 3);
        assert_eq!(stats.failed, 1);
    }

    #[test]
    fn all_bad_rows_is_empty_error() {
        let file = write_csv(&format!("{HEADER}\nx,x,x,x,x,x,x,x\n"));
        let err = HistoricalDataset::load_csv(file.path()).unwrap_err();
        assert!(matches!(err, DatasetError::Empty));
    }
}
