//! Shared fixtures for unit tests

use chrono::Utc;

use crate::dataset::{HistoricalDataset, HistoricalRecord};
use crate::models::{FitnessTests, MeasurementRecord, Perimeters, Skinfolds, Submission};

/// Deterministic synthetic historical dataset spanning the youth ranges
pub fn synthetic_dataset(n: usize) -> HistoricalDataset {
    let records = (0..n)
        .map(|i| {
            let t = i as f32 / n as f32;
            HistoricalRecord {
                age: 13.0 + (t * 4.0).floor(),
                weight_kg: 45.0 + t * 40.0,
                height_m: 1.45 + t * 0.45,
                skinfold_tricipital_mm: 8.0 + t * 14.0,
                skinfold_abdominal_mm: 7.0 + t * 14.0,
                vertical_jump_m: 1.2 + t * 1.2,
                cooper_distance_m: 1800.0 + t * 1500.0,
                flexibility_cm: 15.0 + t * 40.0,
            }
        })
        .collect();
    HistoricalDataset::new(records)
}

/// Measurement record mirroring one historical row
pub fn record_like(historical: &HistoricalRecord) -> MeasurementRecord {
    MeasurementRecord {
        trainer_email: "coach@club.example".into(),
        athlete_first_name: None,
        athlete_last_name: None,
        recorded_at: Utc::now(),
        age: historical.age as u8,
        weight_kg: historical.weight_kg,
        height_m: historical.height_m,
        skinfolds: Skinfolds {
            tricipital: historical.skinfold_tricipital_mm,
            abdominal: historical.skinfold_abdominal_mm,
            ..Skinfolds::default()
        },
        perimeters: Perimeters::default(),
        tests: FitnessTests {
            vertical_jump_m: historical.vertical_jump_m,
            cooper_distance_m: historical.cooper_distance_m,
            flexibility_cm: historical.flexibility_cm,
            abdominal_reps: 25,
        },
    }
}

/// Reference end-to-end submission: 15 years, 60 kg, 170 cm,
/// jump 1.8 m, Cooper 2500 m, flexibility 35 cm
pub fn sample_submission() -> Submission {
    Submission {
        trainer_email: "coach@club.example".into(),
        athlete_first_name: Some("Ana".into()),
        athlete_last_name: Some("Morales".into()),
        age: 15,
        weight_kg: 60.0,
        height_raw: 170.0,
        skinfolds: Skinfolds {
            tricipital: 12.0,
            subscapular: 10.0,
            iliac_crest: 12.0,
            abdominal: 10.0,
            mid_thigh: 12.0,
            calf: 10.0,
        },
        perimeters: Perimeters::default(),
        tests: FitnessTests {
            vertical_jump_m: 1.8,
            cooper_distance_m: 2500.0,
            flexibility_cm: 35.0,
            abdominal_reps: 25,
        },
    }
}
