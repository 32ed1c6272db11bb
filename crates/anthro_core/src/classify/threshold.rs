//! Ordered threshold ladder, first match wins
//!
//! Each rule is a conjunction of lower bounds over the feature set. Rules
//! are evaluated top to bottom and the first whose bounds are all met gives
//! the label; reordering changes results for inputs matching several rules.
//! The final fallback label always exists, so classification never fails.

use once_cell::sync::Lazy;

use super::{Classification, ClassifierInput, SportClassifier};

/// One ladder rule: every set bound must hold for the rule to match
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LadderRule {
    pub label: &'static str,
    pub min_height_m: Option<f32>,
    pub min_jump_m: Option<f32>,
    pub min_cooper_m: Option<f32>,
    pub min_flexibility_cm: Option<f32>,
}

impl LadderRule {
    pub const fn new(label: &'static str) -> Self {
        Self {
            label,
            min_height_m: None,
            min_jump_m: None,
            min_cooper_m: None,
            min_flexibility_cm: None,
        }
    }

    pub fn height(mut self, min: f32) -> Self {
        self.min_height_m = Some(min);
        self
    }

    pub fn jump(mut self, min: f32) -> Self {
        self.min_jump_m = Some(min);
        self
    }

    pub fn cooper(mut self, min: f32) -> Self {
        self.min_cooper_m = Some(min);
        self
    }

    pub fn flexibility(mut self, min: f32) -> Self {
        self.min_flexibility_cm = Some(min);
        self
    }

    pub fn matches(&self, input: &ClassifierInput) -> bool {
        let meets = |bound: Option<f32>, value: f32| bound.map_or(true, |min| value >= min);
        meets(self.min_height_m, input.height_m)
            && meets(self.min_jump_m, input.vertical_jump_m)
            && meets(self.min_cooper_m, input.cooper_distance_m)
            && meets(self.min_flexibility_cm, input.flexibility_cm)
    }

    /// Human-readable conjunction of the rule's bounds
    fn describe(&self) -> String {
        let mut parts = Vec::new();
        if let Some(min) = self.min_height_m {
            parts.push(format!("altura >= {min:.2} m"));
        }
        if let Some(min) = self.min_jump_m {
            parts.push(format!("salto >= {min:.1} m"));
        }
        if let Some(min) = self.min_cooper_m {
            parts.push(format!("cooper >= {min:.0} m"));
        }
        if let Some(min) = self.min_flexibility_cm {
            parts.push(format!("flexibilidad >= {min:.0} cm"));
        }
        parts.join(" y ")
    }
}

/// Ordered rule table with a mandatory catch-all label
#[derive(Debug, Clone)]
pub struct ThresholdLadder {
    rules: Vec<LadderRule>,
    fallback: &'static str,
}

impl ThresholdLadder {
    pub fn new(rules: Vec<LadderRule>, fallback: &'static str) -> Self {
        Self { rules, fallback }
    }

    pub fn rules(&self) -> &[LadderRule] {
        &self.rules
    }

    pub fn fallback(&self) -> &'static str {
        self.fallback
    }

    /// Label an input without building the justification string
    pub fn label_for(&self, input: &ClassifierInput) -> &'static str {
        self.rules
            .iter()
            .find(|rule| rule.matches(input))
            .map_or(self.fallback, |rule| rule.label)
    }
}

impl SportClassifier for ThresholdLadder {
    fn classify(&self, input: &ClassifierInput) -> Classification {
        match self.rules.iter().find(|rule| rule.matches(input)) {
            Some(rule) => Classification {
                label: rule.label.to_string(),
                justification: Some(rule.describe()),
            },
            None => Classification {
                label: self.fallback.to_string(),
                justification: None,
            },
        }
    }
}

/// Football position ladder. The order here is part of the contract.
pub static FOOTBALL_POSITIONS: Lazy<ThresholdLadder> = Lazy::new(|| {
    ThresholdLadder::new(
        vec![
            LadderRule::new("Portero").height(1.85).jump(2.0),
            LadderRule::new("Defensa Central").height(1.80).cooper(2500.0),
            LadderRule::new("Lateral").cooper(2600.0).flexibility(40.0),
            LadderRule::new("Mediocampista").jump(1.8).cooper(2400.0),
            LadderRule::new("Delantero").jump(1.9).flexibility(40.0),
        ],
        "General",
    )
});

/// General sport recommendation ladder
pub static RECOMMENDED_SPORTS: Lazy<ThresholdLadder> = Lazy::new(|| {
    ThresholdLadder::new(
        vec![
            LadderRule::new("Baloncesto").jump(2.0).cooper(2500.0),
            LadderRule::new("Voleibol").jump(1.8).cooper(2800.0),
            LadderRule::new("Atletismo").cooper(2900.0),
            LadderRule::new("Gimnasia").flexibility(45.0).jump(1.6),
        ],
        "Fútbol",
    )
});

/// Clone of the football position table
pub fn football_positions() -> ThresholdLadder {
    FOOTBALL_POSITIONS.clone()
}

/// Clone of the sport recommendation table
pub fn recommended_sports() -> ThresholdLadder {
    RECOMMENDED_SPORTS.clone()
}
