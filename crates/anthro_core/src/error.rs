use std::fmt;

use crate::dataset::DatasetError;

#[derive(Debug)]
pub enum CoreError {
    /// Required dataset or model configuration is broken. Fatal at fit time.
    Configuration(String),
    /// Submitted input is rejected before any processing happens.
    Validation(String),
    ProcessingError(String),
    IoError(String),
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CoreError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            CoreError::Validation(msg) => write!(f, "Validation error: {}", msg),
            CoreError::ProcessingError(msg) => write!(f, "Processing error: {}", msg),
            CoreError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DatasetError> for CoreError {
    fn from(err: DatasetError) -> Self {
        match &err {
            DatasetError::MissingColumn { .. } | DatasetError::Empty => {
                CoreError::Configuration(err.to_string())
            }
            DatasetError::Io(io) => CoreError::IoError(io.to_string()),
            DatasetError::Csv(csv) => CoreError::ProcessingError(csv.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
