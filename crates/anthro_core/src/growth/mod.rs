//! Future-height prediction at reference age 18
//!
//! A regression forest is fit once per process on the historical dataset and
//! is read-only afterwards; prediction is a pure function of the frozen
//! model. The training target is the historical height plus a small uniform
//! "expected growth" perturbation in [0.02, 0.08] m. That synthetic label is
//! kept for behavioral parity with the legacy system, which had no real
//! longitudinal data. It is not a growth model; do not read accuracy into it.
//!
//! The age-18 reference point lives entirely in the labels: features carry
//! the athlete's current age unchanged, and no age shifting happens at
//! prediction time.
//!
//! Unlike the legacy system, the noise RNG here is explicitly seeded, so a
//! fixed configuration always yields the same fitted model.

mod forest;

pub use forest::{ForestParams, RegressionForest, RegressionTree};

use rand::distributions::{Distribution, Uniform};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::dataset::{DatasetError, HistoricalDataset, HistoricalRecord};
use crate::models::MeasurementRecord;

/// Bounds of the synthetic growth perturbation, meters
pub const GROWTH_NOISE_MIN_M: f32 = 0.02;
pub const GROWTH_NOISE_MAX_M: f32 = 0.08;

/// Model feature count: age, weight, height, tricipital skinfold,
/// abdominal skinfold, vertical jump, Cooper distance
pub const N_FEATURES: usize = 7;

/// Growth model configuration
#[derive(Debug, Clone, Copy)]
pub struct GrowthModelConfig {
    pub params: ForestParams,
    /// Seed for tree bootstrap and split sampling
    pub model_seed: u64,
    /// Seed for the synthetic growth-noise labels
    pub noise_seed: u64,
}

impl Default for GrowthModelConfig {
    fn default() -> Self {
        Self {
            params: ForestParams::default(),
            model_seed: 42,
            noise_seed: 7,
        }
    }
}

/// Fitted growth predictor, immutable after [`GrowthPredictor::fit`]
#[derive(Debug, Clone)]
pub struct GrowthPredictor {
    forest: RegressionForest,
}

impl GrowthPredictor {
    /// Fit the forest on the historical dataset.
    ///
    /// An empty dataset is a configuration error; callers should have loaded
    /// it through [`HistoricalDataset::load_csv`], which already rejects
    /// missing columns.
    pub fn fit(
        dataset: &HistoricalDataset,
        config: &GrowthModelConfig,
    ) -> Result<Self, DatasetError> {
        if dataset.is_empty() {
            return Err(DatasetError::Empty);
        }

        let x: Vec<Vec<f32>> = dataset
            .records()
            .iter()
            .map(|r| historical_features(r).to_vec())
            .collect();

        let noise = Uniform::new_inclusive(GROWTH_NOISE_MIN_M, GROWTH_NOISE_MAX_M);
        let mut noise_rng = ChaCha8Rng::seed_from_u64(config.noise_seed);
        let y: Vec<f32> = dataset
            .records()
            .iter()
            .map(|r| r.height_m + noise.sample(&mut noise_rng))
            .collect();

        let mut model_rng = ChaCha8Rng::seed_from_u64(config.model_seed);
        let forest = RegressionForest::fit(&x, &y, &config.params, &mut model_rng);
        info!(
            samples = dataset.len(),
            trees = forest.n_trees(),
            "growth model fitted"
        );
        Ok(Self { forest })
    }

    /// Predicted height in meters at age 18
    pub fn predict_height_at_18(&self, record: &MeasurementRecord) -> f32 {
        self.forest.predict(&record_features(record))
    }

    /// Predicted height minus current height
    pub fn expected_growth(&self, record: &MeasurementRecord) -> f32 {
        self.predict_height_at_18(record) - record.height_m
    }
}

fn historical_features(r: &HistoricalRecord) -> [f32; N_FEATURES] {
    [
        r.age,
        r.weight_kg,
        r.height_m,
        r.skinfold_tricipital_mm,
        r.skinfold_abdominal_mm,
        r.vertical_jump_m,
        r.cooper_distance_m,
    ]
}

fn record_features(r: &MeasurementRecord) -> [f32; N_FEATURES] {
    [
        f32::from(r.age),
        r.weight_kg,
        r.height_m,
        r.skinfolds.tricipital,
        r.skinfolds.abdominal,
        r.tests.vertical_jump_m,
        r.tests.cooper_distance_m,
    ]
}
