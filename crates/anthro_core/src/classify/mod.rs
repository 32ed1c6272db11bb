//! Sport and playing-position recommendation
//!
//! Two interchangeable strategies behind one trait:
//! - [`ThresholdLadder`]: an ordered first-match-wins rule table. Rule order
//!   is load-bearing and covered by tests.
//! - [`TrainedClassifier`]: a seeded classification forest fit on labels that
//!   were themselves produced by a ladder. The circularity is inherited from
//!   the legacy system and is preserved, not fixed: the model approximates
//!   the rule table, it does not learn ground truth.

mod threshold;
mod trained;

pub use threshold::{football_positions, recommended_sports, LadderRule, ThresholdLadder};
pub use trained::{TrainedClassifier, TrainedClassifierConfig};

use serde::{Deserialize, Serialize};

use crate::models::MeasurementRecord;

/// Feature view the classifiers operate on
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassifierInput {
    pub age: f32,
    pub weight_kg: f32,
    pub height_m: f32,
    pub vertical_jump_m: f32,
    pub cooper_distance_m: f32,
    pub flexibility_cm: f32,
}

impl From<&MeasurementRecord> for ClassifierInput {
    fn from(record: &MeasurementRecord) -> Self {
        Self {
            age: f32::from(record.age),
            weight_kg: record.weight_kg,
            height_m: record.height_m,
            vertical_jump_m: record.tests.vertical_jump_m,
            cooper_distance_m: record.tests.cooper_distance_m,
            flexibility_cm: record.tests.flexibility_cm,
        }
    }
}

/// Classifier verdict: a label plus an optional human-readable reason
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub label: String,
    pub justification: Option<String>,
}

/// Common interface for both classification strategies
pub trait SportClassifier {
    fn classify(&self, input: &ClassifierInput) -> Classification;
}
