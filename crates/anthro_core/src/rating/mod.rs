//! Fitness rating and weak-area detection
//!
//! Two separate rule sets run over the test scores:
//! - The overall rating is ordered: the "any floor broken" check runs first,
//!   then the "all excellence bars met" check, and "Bueno" is what remains.
//! - Weak areas are independent flags, each checked against its own floor.
//!   All failing areas are collected; they are not mutually exclusive.
//! Every weak area maps to one fixed recommendation string.

use serde::{Deserialize, Serialize};

use crate::models::{FitnessTests, Skinfolds};

/// Overall qualitative rating, worst to best
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FitnessRating {
    Malo,
    Bueno,
    Excelente,
}

impl FitnessRating {
    pub fn as_str(&self) -> &'static str {
        match self {
            FitnessRating::Malo => "Malo",
            FitnessRating::Bueno => "Bueno",
            FitnessRating::Excelente => "Excelente",
        }
    }
}

/// Fitness dimension flagged when its score misses the floor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeakArea {
    LegPower,
    AerobicEndurance,
    Flexibility,
    CoreStrength,
    BodyComposition,
}

impl WeakArea {
    pub const ALL: [WeakArea; 5] = [
        WeakArea::LegPower,
        WeakArea::AerobicEndurance,
        WeakArea::Flexibility,
        WeakArea::CoreStrength,
        WeakArea::BodyComposition,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WeakArea::LegPower => "potencia de piernas",
            WeakArea::AerobicEndurance => "resistencia aeróbica",
            WeakArea::Flexibility => "flexibilidad",
            WeakArea::CoreStrength => "fuerza de core",
            WeakArea::BodyComposition => "composición corporal",
        }
    }

    /// Canned training recommendation for the area
    pub fn recommendation(&self) -> &'static str {
        match self {
            WeakArea::LegPower => {
                "Trabajo pliométrico: saltos al cajón y sentadillas con salto, 2 sesiones por semana"
            }
            WeakArea::AerobicEndurance => {
                "Carrera continua de 20-30 minutos e intervalos, 3 sesiones por semana"
            }
            WeakArea::Flexibility => {
                "Rutina diaria de estiramientos de 15 minutos, con énfasis en isquiotibiales"
            }
            WeakArea::CoreStrength => {
                "Circuito de core: planchas y abdominales progresivos, 3 series en días alternos"
            }
            WeakArea::BodyComposition => {
                "Revisión del plan nutricional junto con trabajo aeróbico de baja intensidad"
            }
        }
    }
}

/// Floors and excellence bars for the rating rules
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingThresholds {
    pub jump_floor_m: f32,
    pub cooper_floor_m: f32,
    pub flexibility_floor_cm: f32,
    pub jump_excellent_m: f32,
    pub cooper_excellent_m: f32,
    pub flexibility_excellent_cm: f32,
    /// Crunch repetitions below this flag core strength
    pub abdominal_floor_reps: u16,
    /// Skinfold average above this flags body composition
    pub skinfold_avg_ceiling_mm: f32,
}

impl Default for RatingThresholds {
    fn default() -> Self {
        Self {
            jump_floor_m: 1.6,
            cooper_floor_m: 2200.0,
            flexibility_floor_cm: 30.0,
            jump_excellent_m: 1.9,
            cooper_excellent_m: 2700.0,
            flexibility_excellent_cm: 45.0,
            abdominal_floor_reps: 20,
            skinfold_avg_ceiling_mm: 20.0,
        }
    }
}

/// Rating engine output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitnessReport {
    pub rating: FitnessRating,
    pub weak_areas: Vec<WeakArea>,
}

impl FitnessReport {
    /// (area, recommendation) pairs for every flagged area
    pub fn recommendations(&self) -> Vec<(WeakArea, &'static str)> {
        self.weak_areas
            .iter()
            .map(|area| (*area, area.recommendation()))
            .collect()
    }
}

/// Run both rule sets over one athlete's scores.
pub fn evaluate(
    tests: &FitnessTests,
    skinfolds: &Skinfolds,
    thresholds: &RatingThresholds,
) -> FitnessReport {
    let rating = overall_rating(tests, thresholds);

    let mut weak_areas = Vec::new();
    if tests.vertical_jump_m < thresholds.jump_floor_m {
        weak_areas.push(WeakArea::LegPower);
    }
    if tests.cooper_distance_m < thresholds.cooper_floor_m {
        weak_areas.push(WeakArea::AerobicEndurance);
    }
    if tests.flexibility_cm < thresholds.flexibility_floor_cm {
        weak_areas.push(WeakArea::Flexibility);
    }
    if tests.abdominal_reps < thresholds.abdominal_floor_reps {
        weak_areas.push(WeakArea::CoreStrength);
    }
    if skinfolds.average() > thresholds.skinfold_avg_ceiling_mm {
        weak_areas.push(WeakArea::BodyComposition);
    }

    FitnessReport { rating, weak_areas }
}

/// Ordered rating rules: worst case first, then excellence, else "Bueno"
fn overall_rating(tests: &FitnessTests, thresholds: &RatingThresholds) -> FitnessRating {
    if tests.vertical_jump_m < thresholds.jump_floor_m
        || tests.cooper_distance_m < thresholds.cooper_floor_m
        || tests.flexibility_cm < thresholds.flexibility_floor_cm
    {
        FitnessRating::Malo
    } else if tests.vertical_jump_m >= thresholds.jump_excellent_m
        && tests.cooper_distance_m >= thresholds.cooper_excellent_m
        && tests.flexibility_cm >= thresholds.flexibility_excellent_cm
    {
        FitnessRating::Excelente
    } else {
        FitnessRating::Bueno
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tests_with(jump: f32, cooper: f32, flex: f32, reps: u16) -> FitnessTests {
        FitnessTests {
            vertical_jump_m: jump,
            cooper_distance_m: cooper,
            flexibility_cm: flex,
            abdominal_reps: reps,
        }
    }

    fn lean_folds() -> Skinfolds {
        Skinfolds {
            tricipital: 10.0,
            subscapular: 9.0,
            iliac_crest: 10.0,
            abdominal: 9.0,
            mid_thigh: 10.0,
            calf: 9.0,
        }
    }

    #[test]
    fn single_broken_floor_rates_malo() {
        let report = evaluate(
            &tests_with(1.5, 2800.0, 50.0, 30),
            &lean_folds(),
            &RatingThresholds::default(),
        );
        assert_eq!(report.rating, FitnessRating::Malo);
    }

    #[test]
    fn all_excellence_bars_rate_excelente() {
        let report = evaluate(
            &tests_with(2.0, 2750.0, 46.0, 30),
            &lean_folds(),
            &RatingThresholds::default(),
        );
        assert_eq!(report.rating, FitnessRating::Excelente);
    }

    #[test]
    fn middle_ground_rates_bueno() {
        // Reference scenario: no floor broken, excellence not met
        let report = evaluate(
            &tests_with(1.8, 2500.0, 35.0, 25),
            &lean_folds(),
            &RatingThresholds::default(),
        );
        assert_eq!(report.rating, FitnessRating::Bueno);
        assert!(report.weak_areas.is_empty());
    }

    #[test]
    fn weak_areas_are_independent_flags() {
        // Jump and flexibility fail, everything else passes: the flag set
        // must be exactly those two, no more, no less.
        let report = evaluate(
            &tests_with(1.4, 2600.0, 20.0, 30),
            &lean_folds(),
            &RatingThresholds::default(),
        );
        assert_eq!(
            report.weak_areas,
            vec![WeakArea::LegPower, WeakArea::Flexibility]
        );
    }

    #[test]
    fn core_and_body_composition_have_their_own_floors() {
        let fat_folds = Skinfolds {
            tricipital: 25.0,
            subscapular: 24.0,
            iliac_crest: 25.0,
            abdominal: 26.0,
            mid_thigh: 25.0,
            calf: 24.0,
        };
        let report = evaluate(
            &tests_with(1.8, 2500.0, 35.0, 10),
            &fat_folds,
            &RatingThresholds::default(),
        );
        assert_eq!(
            report.weak_areas,
            vec![WeakArea::CoreStrength, WeakArea::BodyComposition]
        );
        // Rating only looks at jump/cooper/flexibility, so this stays Bueno
        assert_eq!(report.rating, FitnessRating::Bueno);
    }

    #[test]
    fn every_area_has_a_recommendation() {
        for area in WeakArea::ALL {
            assert!(!area.recommendation().is_empty());
        }
    }

    #[test]
    fn recommendations_match_flagged_areas() {
        let report = evaluate(
            &tests_with(1.4, 1800.0, 20.0, 10),
            &lean_folds(),
            &RatingThresholds::default(),
        );
        let recs = report.recommendations();
        assert_eq!(recs.len(), 4);
        assert!(recs.iter().all(|(area, text)| area.recommendation() == *text));
    }
}
