//! Submission-to-record orchestration
//!
//! One synchronous pass per submission: validate the identifier, normalize
//! units at ingestion, run the growth predictor, the classifier and the
//! rating engine, then assemble the flat output record. The fitted models
//! are immutable values handed in at construction; the pipeline holds no
//! mutable state and every submission is independent. Resubmitting the same
//! input yields a fresh record each time; deduplication is deliberately not
//! the pipeline's business.

use chrono::Utc;
use tracing::{debug, info};

use crate::classify::{ClassifierInput, SportClassifier};
use crate::dataset::HistoricalDataset;
use crate::error::{CoreError, Result};
use crate::growth::{GrowthModelConfig, GrowthPredictor};
use crate::models::{AssessmentRecord, MeasurementRecord, Submission};
use crate::rating::{self, RatingThresholds};

pub struct RecordPipeline {
    growth: GrowthPredictor,
    classifier: Box<dyn SportClassifier + Send + Sync>,
    thresholds: RatingThresholds,
}

impl std::fmt::Debug for RecordPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordPipeline").finish_non_exhaustive()
    }
}

impl RecordPipeline {
    pub fn new(
        growth: GrowthPredictor,
        classifier: Box<dyn SportClassifier + Send + Sync>,
        thresholds: RatingThresholds,
    ) -> Self {
        Self {
            growth,
            classifier,
            thresholds,
        }
    }

    /// Fit the growth model on `dataset` and build the pipeline around it.
    ///
    /// Dataset problems surface as [`CoreError::Configuration`] (empty or
    /// misconfigured data); callers that already hold a fitted predictor
    /// should use [`RecordPipeline::new`] instead.
    pub fn from_dataset(
        dataset: &HistoricalDataset,
        config: &GrowthModelConfig,
        classifier: Box<dyn SportClassifier + Send + Sync>,
        thresholds: RatingThresholds,
    ) -> Result<Self> {
        let growth = GrowthPredictor::fit(dataset, config)?;
        Ok(Self::new(growth, classifier, thresholds))
    }

    /// Process one submission end to end.
    ///
    /// Rejects with a validation error when the trainer identifier is
    /// missing; nothing is partially processed in that case.
    pub fn assess(&self, submission: Submission) -> Result<AssessmentRecord> {
        if submission.trainer_email.trim().is_empty() {
            return Err(CoreError::Validation(
                "trainer email is required".to_string(),
            ));
        }

        let now = Utc::now();
        let record = MeasurementRecord::from_submission(submission, now);
        debug!(height_m = record.height_m, "submission normalized");

        let predicted_height = self.growth.predict_height_at_18(&record);
        let expected_growth = predicted_height - record.height_m;

        let classification = self.classifier.classify(&ClassifierInput::from(&record));
        let report = rating::evaluate(&record.tests, &record.skinfolds, &self.thresholds);

        let weak_areas = report
            .weak_areas
            .iter()
            .map(|a| a.as_str())
            .collect::<Vec<_>>()
            .join(";");

        let output = AssessmentRecord {
            id: now.timestamp(),
            trainer_email: record.trainer_email,
            athlete_first_name: record.athlete_first_name.unwrap_or_default(),
            athlete_last_name: record.athlete_last_name.unwrap_or_default(),
            age: record.age,
            weight_kg: record.weight_kg,
            height_m: record.height_m,
            skinfold_tricipital_mm: record.skinfolds.tricipital,
            skinfold_abdominal_mm: record.skinfolds.abdominal,
            skinfold_average_mm: record.skinfolds.average(),
            perimeter_arm_relaxed_cm: record.perimeters.arm_relaxed,
            perimeter_arm_flexed_cm: record.perimeters.arm_flexed,
            perimeter_chest_cm: record.perimeters.chest,
            perimeter_waist_cm: record.perimeters.waist,
            perimeter_hip_cm: record.perimeters.hip,
            perimeter_thigh_cm: record.perimeters.thigh,
            perimeter_calf_cm: record.perimeters.calf,
            vertical_jump_m: record.tests.vertical_jump_m,
            cooper_distance_m: record.tests.cooper_distance_m,
            flexibility_cm: record.tests.flexibility_cm,
            abdominal_reps: record.tests.abdominal_reps,
            predicted_height_18_m: predicted_height,
            expected_growth_m: expected_growth,
            recommended_label: classification.label,
            rating: report.rating.as_str().to_string(),
            weak_areas,
            recorded_at: now.format("%Y-%m-%d %H:%M:%S").to_string(),
        };

        info!(
            label = %output.recommended_label,
            rating = %output.rating,
            "assessment completed"
        );
        Ok(output)
    }

    /// Run only the classifier, without touching the rest of the pipeline
    pub fn classify_only(&self, input: &ClassifierInput) -> crate::classify::Classification {
        self.classifier.classify(input)
    }

    /// Run only the rating engine
    pub fn rate_only(
        &self,
        tests: &crate::models::FitnessTests,
        skinfolds: &crate::models::Skinfolds,
    ) -> crate::rating::FitnessReport {
        rating::evaluate(tests, skinfolds, &self.thresholds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{football_positions, Classification};
    use crate::models::Perimeters;
    use crate::test_util::{sample_submission, synthetic_dataset};

    /// Constant-label classifier for isolating pipeline behavior
    struct FixedLabel(&'static str);

    impl SportClassifier for FixedLabel {
        fn classify(&self, _input: &ClassifierInput) -> Classification {
            Classification {
                label: self.0.to_string(),
                justification: None,
            }
        }
    }

    fn fitted_pipeline(classifier: Box<dyn SportClassifier + Send + Sync>) -> RecordPipeline {
        let dataset = synthetic_dataset(300);
        RecordPipeline::from_dataset(
            &dataset,
            &GrowthModelConfig::default(),
            classifier,
            RatingThresholds::default(),
        )
        .unwrap()
    }

    #[test]
    fn empty_dataset_is_a_configuration_error() {
        let dataset = HistoricalDataset::new(Vec::new());
        let err = RecordPipeline::from_dataset(
            &dataset,
            &GrowthModelConfig::default(),
            Box::new(FixedLabel("General")),
            RatingThresholds::default(),
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::Configuration(_)));
    }

    #[test]
    fn empty_trainer_email_is_rejected() {
        let pipeline = fitted_pipeline(Box::new(FixedLabel("General")));
        let mut submission = sample_submission();
        submission.trainer_email = "   ".into();
        let err = pipeline.assess(submission).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn reference_scenario_end_to_end() {
        // 15 years, 60 kg, 170 cm, jump 1.8, cooper 2500, flex 35:
        // height normalizes to 1.70 m, rating lands on "Bueno", and the
        // position ladder's first matching rule is Mediocampista
        // (jump >= 1.8 and cooper >= 2400).
        let pipeline = fitted_pipeline(Box::new(football_positions()));
        let record = pipeline.assess(sample_submission()).unwrap();

        assert!((record.height_m - 1.70).abs() < 1e-6);
        assert_eq!(record.rating, "Bueno");
        assert_eq!(record.recommended_label, "Mediocampista");
        assert!(record.weak_areas.is_empty());
        assert!(
            (record.expected_growth_m - (record.predicted_height_18_m - record.height_m)).abs()
                < 1e-6
        );
    }

    #[test]
    fn perimeters_flow_through_to_the_output_row() {
        let pipeline = fitted_pipeline(Box::new(FixedLabel("General")));
        let mut submission = sample_submission();
        submission.perimeters = Perimeters {
            arm_relaxed: 24.5,
            arm_flexed: 26.0,
            chest: 84.0,
            waist: 68.5,
            hip: 90.0,
            thigh: 50.5,
            calf: 33.0,
        };
        let record = pipeline.assess(submission).unwrap();
        assert_eq!(record.perimeter_arm_relaxed_cm, 24.5);
        assert_eq!(record.perimeter_waist_cm, 68.5);
        assert_eq!(record.perimeter_calf_cm, 33.0);
    }

    #[test]
    fn resubmission_produces_an_independent_record() {
        let pipeline = fitted_pipeline(Box::new(FixedLabel("General")));
        let first = pipeline.assess(sample_submission()).unwrap();
        let second = pipeline.assess(sample_submission()).unwrap();
        // Same input, same derived values; no deduplication happens
        assert_eq!(first.recommended_label, second.recommended_label);
        assert_eq!(first.rating, second.rating);
        assert_eq!(
            first.predicted_height_18_m.to_bits(),
            second.predicted_height_18_m.to_bits()
        );
    }
}
