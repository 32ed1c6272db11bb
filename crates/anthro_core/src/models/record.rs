use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Normalize a raw height figure to meters.
///
/// Form inputs arrive in either centimeters or meters depending on how the
/// trainer filled the field. Values >= 100 are read as centimeters and
/// divided by 100; everything below stays untouched. The boundary is
/// deliberate: 100.0 becomes 1.0, while 99.9 is left as-is even though no
/// human is 99.9 m tall. Values in [1.0, 100) are never rescaled.
pub fn normalize_height(raw: f32) -> f32 {
    if raw >= 100.0 {
        raw / 100.0
    } else {
        raw
    }
}

/// Caliper skinfold thicknesses in millimeters
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Skinfolds {
    pub tricipital: f32,
    pub subscapular: f32,
    pub iliac_crest: f32,
    pub abdominal: f32,
    pub mid_thigh: f32,
    pub calf: f32,
}

impl Skinfolds {
    /// Mean of the six sites, used as the body-composition proxy
    pub fn average(&self) -> f32 {
        (self.tricipital
            + self.subscapular
            + self.iliac_crest
            + self.abdominal
            + self.mid_thigh
            + self.calf)
            / 6.0
    }
}

/// Tape-measured body-segment circumferences in centimeters
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Perimeters {
    pub arm_relaxed: f32,
    pub arm_flexed: f32,
    pub chest: f32,
    pub waist: f32,
    pub hip: f32,
    pub thigh: f32,
    pub calf: f32,
}

/// Field-test results
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FitnessTests {
    /// Vertical jump in meters
    pub vertical_jump_m: f32,
    /// Distance covered in the 12-minute Cooper test, meters
    pub cooper_distance_m: f32,
    /// Sit-and-reach flexibility, centimeters
    pub flexibility_cm: f32,
    /// Crunch repetitions in 30 seconds
    pub abdominal_reps: u16,
}

/// Raw form payload as submitted by the surrounding UI.
///
/// Numeric ranges are validated by the form collaborator before this struct
/// is built; the core only checks identifier presence. Height may still be
/// in centimeters here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub trainer_email: String,
    #[serde(default)]
    pub athlete_first_name: Option<String>,
    #[serde(default)]
    pub athlete_last_name: Option<String>,
    pub age: u8,
    pub weight_kg: f32,
    /// Height as typed: centimeters or meters
    pub height_raw: f32,
    #[serde(default)]
    pub skinfolds: Skinfolds,
    #[serde(default)]
    pub perimeters: Perimeters,
    pub tests: FitnessTests,
}

/// One athlete's measurements, immutable once constructed.
///
/// Height is guaranteed to be in meters here; unit normalization happens in
/// [`MeasurementRecord::from_submission`] and nowhere else.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeasurementRecord {
    pub trainer_email: String,
    pub athlete_first_name: Option<String>,
    pub athlete_last_name: Option<String>,
    pub recorded_at: DateTime<Utc>,
    pub age: u8,
    pub weight_kg: f32,
    /// Always meters
    pub height_m: f32,
    pub skinfolds: Skinfolds,
    pub perimeters: Perimeters,
    pub tests: FitnessTests,
}

impl MeasurementRecord {
    pub fn from_submission(submission: Submission, recorded_at: DateTime<Utc>) -> Self {
        Self {
            trainer_email: submission.trainer_email,
            athlete_first_name: submission.athlete_first_name,
            athlete_last_name: submission.athlete_last_name,
            recorded_at,
            age: submission.age,
            weight_kg: submission.weight_kg,
            height_m: normalize_height(submission.height_raw),
            skinfolds: submission.skinfolds,
            perimeters: submission.perimeters,
            tests: submission.tests,
        }
    }
}

/// Assembled pipeline output, one flat row per submission.
///
/// Kept flat on purpose: the output store serializes it straight into a CSV
/// row and the webhook posts it as a single-level JSON object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentRecord {
    /// Unix timestamp of the submission, used as record id
    pub id: i64,
    pub trainer_email: String,
    pub athlete_first_name: String,
    pub athlete_last_name: String,
    pub age: u8,
    pub weight_kg: f32,
    pub height_m: f32,
    pub skinfold_tricipital_mm: f32,
    pub skinfold_abdominal_mm: f32,
    pub skinfold_average_mm: f32,
    pub perimeter_arm_relaxed_cm: f32,
    pub perimeter_arm_flexed_cm: f32,
    pub perimeter_chest_cm: f32,
    pub perimeter_waist_cm: f32,
    pub perimeter_hip_cm: f32,
    pub perimeter_thigh_cm: f32,
    pub perimeter_calf_cm: f32,
    pub vertical_jump_m: f32,
    pub cooper_distance_m: f32,
    pub flexibility_cm: f32,
    pub abdominal_reps: u16,
    pub predicted_height_18_m: f32,
    pub expected_growth_m: f32,
    pub recommended_label: String,
    pub rating: String,
    /// Weak areas joined with `;`, empty when none
    pub weak_areas: String,
    pub recorded_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centimeter_input_is_divided() {
        assert!((normalize_height(170.0) - 1.70).abs() < 1e-6);
        assert!((normalize_height(100.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn meter_input_is_untouched() {
        assert_eq!(normalize_height(1.70), 1.70);
        // The documented discontinuity: just below the threshold nothing is
        // rescaled, even for implausible values.
        assert_eq!(normalize_height(99.9), 99.9);
    }

    #[test]
    fn normalization_is_idempotent_on_normalized_values() {
        let once = normalize_height(185.0);
        assert_eq!(normalize_height(once), once);
    }

    #[test]
    fn from_submission_normalizes_exactly_once() {
        let submission = Submission {
            trainer_email: "coach@club.example".into(),
            athlete_first_name: Some("Ana".into()),
            athlete_last_name: None,
            age: 15,
            weight_kg: 60.0,
            height_raw: 170.0,
            skinfolds: Skinfolds::default(),
            perimeters: Perimeters::default(),
            tests: FitnessTests::default(),
        };
        let record = MeasurementRecord::from_submission(submission, Utc::now());
        assert!((record.height_m - 1.70).abs() < 1e-6);
    }

    #[test]
    fn skinfold_average_is_site_mean() {
        let folds = Skinfolds {
            tricipital: 12.0,
            subscapular: 10.0,
            iliac_crest: 12.0,
            abdominal: 10.0,
            mid_thigh: 12.0,
            calf: 10.0,
        };
        assert!((folds.average() - 11.0).abs() < 1e-6);
    }

    #[cfg(all(test, feature = "proptest"))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: values below 100 pass through unchanged
            #[test]
            fn prop_sub_threshold_identity(h in 1.0f32..100.0f32) {
                prop_assert_eq!(normalize_height(h), h);
            }

            /// Property: normalization never needs a second pass
            #[test]
            fn prop_idempotent_after_one_pass(h in 100.0f32..260.0f32) {
                let once = normalize_height(h);
                prop_assert_eq!(normalize_height(once), once);
            }
        }
    }
}
