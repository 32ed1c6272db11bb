//! Data model for one athlete assessment
//!
//! A [`Submission`] is the raw form payload. It becomes an immutable
//! [`MeasurementRecord`] at ingestion (this is where height units are
//! normalized, exactly once), flows through the pipeline, and ends up as a
//! flat [`AssessmentRecord`] ready for the output store.

mod record;

pub use record::{
    normalize_height, AssessmentRecord, FitnessTests, MeasurementRecord, Perimeters, Skinfolds,
    Submission,
};
