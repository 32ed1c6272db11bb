//! # anthro_core - Youth Athlete Anthropometric Assessment
//!
//! Core library for turning one athlete's measurements and field-test
//! results into a scouting assessment: a projected height at age 18, a
//! recommended sport or playing position, and a qualitative fitness rating
//! with targeted recommendations.
//!
//! ## Features
//! - Deterministic model fitting (same seed + same dataset = same model)
//! - Ordered threshold-ladder classification with a trained-forest alternative
//! - Synchronous per-submission pipeline with no shared mutable state
//! - JSON API for easy integration with form frontends

pub mod api;
pub mod classify;
pub mod dataset;
pub mod error;
pub mod growth;
pub mod models;
pub mod notify;
pub mod pipeline;
pub mod rating;
pub mod registry;
pub mod store;

#[cfg(test)]
pub(crate) mod test_util;

// Re-export the JSON API entry point
pub use api::{process_assessment_json, AssessmentRequest, AssessmentResponse};
pub use error::{CoreError, Result};

// Re-export the data model
pub use models::{
    normalize_height, AssessmentRecord, FitnessTests, MeasurementRecord, Perimeters, Skinfolds,
    Submission,
};

// Re-export the pipeline and its collaborators
pub use classify::{
    football_positions, recommended_sports, Classification, ClassifierInput, SportClassifier,
    ThresholdLadder, TrainedClassifier, TrainedClassifierConfig,
};
pub use dataset::{DatasetError, HistoricalDataset, HistoricalRecord, ParseStats};
pub use growth::{GrowthModelConfig, GrowthPredictor};
pub use notify::WebhookNotifier;
pub use pipeline::RecordPipeline;
pub use rating::{FitnessRating, FitnessReport, RatingThresholds, WeakArea};
pub use registry::{RegistryError, TrainerRegistry};
pub use store::{append_record, StoreError};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = 1;
