// ABOUTME: Meal scoring configuration for nutrient sub-scores, weights, and grade breakpoints
// ABOUTME: Calibrated defaults for protein, fiber, sodium, potassium, and macro-balance scoring
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Meal Scoring Configuration
//!
//! Every threshold used by the meal score calculator lives here so that the
//! calibration can be tuned through environment overrides without touching
//! the algorithm.

use super::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Meal scoring configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MealScoringConfig {
    /// Weight of each sub-score in the total
    pub weights: ScoreWeights,
    /// Sub-score thresholds
    pub thresholds: NutrientThresholds,
    /// Macro-balance bands
    pub macro_balance: MacroBalanceConfig,
    /// Total-score breakpoints for letter grades
    pub grades: GradeBreakpoints,
    /// Feedback generation
    pub feedback: FeedbackConfig,
}

/// Weights applied to sub-scores; must sum to 1.0
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreWeights {
    /// Protein share weight
    pub protein: f64,
    /// Fiber density weight
    pub fiber: f64,
    /// Sodium weight
    pub sodium: f64,
    /// Potassium weight
    pub potassium: f64,
    /// Macro-balance weight
    pub macro_balance: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            protein: 0.25,
            fiber: 0.20,
            sodium: 0.20,
            potassium: 0.15,
            macro_balance: 0.20,
        }
    }
}

impl ScoreWeights {
    /// Sum of all weights
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.protein + self.fiber + self.sodium + self.potassium + self.macro_balance
    }
}

/// Per-nutrient thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NutrientThresholds {
    /// Protein share of energy earning full marks (0.25 = 25%)
    pub protein_target_share: f64,
    /// Protein grams earning full marks when calories are zero
    pub protein_target_g_absolute: f64,
    /// Fiber grams per 1000 kcal earning full marks
    pub fiber_target_g_per_1000_kcal: f64,
    /// Fiber grams earning full marks when calories are zero
    pub fiber_target_g_absolute: f64,
    /// Sodium at or above this drives the sub-score to zero regardless of calories
    pub sodium_hard_cap_mg: f64,
    /// Sodium per kcal at or below which the sub-score is full
    pub sodium_ideal_mg_per_kcal: f64,
    /// Sodium per kcal at or above which the sub-score is zero
    pub sodium_max_mg_per_kcal: f64,
    /// Sodium at or below which the sub-score is full when calories are zero
    pub sodium_ideal_mg_absolute: f64,
    /// Potassium earning full marks
    pub potassium_target_mg: f64,
}

impl Default for NutrientThresholds {
    fn default() -> Self {
        Self {
            protein_target_share: 0.25,
            protein_target_g_absolute: 25.0,
            fiber_target_g_per_1000_kcal: 14.0,
            fiber_target_g_absolute: 8.0,
            sodium_hard_cap_mg: 1500.0,
            sodium_ideal_mg_per_kcal: 1.0,
            sodium_max_mg_per_kcal: 3.0,
            sodium_ideal_mg_absolute: 600.0,
            potassium_target_mg: 600.0,
        }
    }
}

/// Healthy bands for fat and carbohydrate energy shares
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MacroBalanceConfig {
    /// Lower bound of the fat share band
    pub fat_share_min: f64,
    /// Upper bound of the fat share band
    pub fat_share_max: f64,
    /// Lower bound of the carbohydrate share band
    pub carb_share_min: f64,
    /// Upper bound of the carbohydrate share band
    pub carb_share_max: f64,
    /// Points lost per unit of share outside a band
    pub deviation_penalty: f64,
    /// Score used when calories are zero and shares are undefined
    pub calorie_free_score: f64,
}

impl Default for MacroBalanceConfig {
    fn default() -> Self {
        Self {
            fat_share_min: 0.20,
            fat_share_max: 0.35,
            carb_share_min: 0.30,
            carb_share_max: 0.60,
            deviation_penalty: 250.0,
            calorie_free_score: 50.0,
        }
    }
}

/// Minimum total score for each grade; anything below `d` is an E
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeBreakpoints {
    /// Minimum for A
    pub a: f64,
    /// Minimum for B
    pub b: f64,
    /// Minimum for C
    pub c: f64,
    /// Minimum for D
    pub d: f64,
}

impl Default for GradeBreakpoints {
    fn default() -> Self {
        Self {
            a: 85.0,
            b: 70.0,
            c: 55.0,
            d: 40.0,
        }
    }
}

/// Feedback text generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackConfig {
    /// Sub-scores below this are reported as weak areas
    pub weak_area_threshold: f64,
    /// Maximum number of weak areas named
    pub max_weak_areas: usize,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            weak_area_threshold: 60.0,
            max_weak_areas: 2,
        }
    }
}

impl MealScoringConfig {
    /// Validate weights, thresholds, bands, and breakpoints
    ///
    /// # Errors
    ///
    /// Returns an error if any value is out of range or inconsistent
    pub fn validate(&self) -> Result<(), ConfigError> {
        let w = &self.weights;
        if [w.protein, w.fiber, w.sodium, w.potassium, w.macro_balance]
            .iter()
            .any(|weight| *weight < 0.0)
        {
            return Err(ConfigError::InvalidWeights(
                "Meal scoring weights must be non-negative",
            ));
        }
        if (w.sum() - 1.0).abs() > 0.01 {
            return Err(ConfigError::InvalidWeights(
                "Meal scoring weights must sum to 1.0",
            ));
        }

        let t = &self.thresholds;
        if t.protein_target_share <= 0.0
            || t.protein_target_g_absolute <= 0.0
            || t.fiber_target_g_per_1000_kcal <= 0.0
            || t.fiber_target_g_absolute <= 0.0
            || t.potassium_target_mg <= 0.0
        {
            return Err(ConfigError::ValueOutOfRange(
                "Nutrient targets must be positive",
            ));
        }
        if t.sodium_ideal_mg_per_kcal >= t.sodium_max_mg_per_kcal {
            return Err(ConfigError::InvalidRange(
                "sodium_ideal_mg_per_kcal must be < sodium_max_mg_per_kcal",
            ));
        }
        if t.sodium_ideal_mg_absolute >= t.sodium_hard_cap_mg {
            return Err(ConfigError::InvalidRange(
                "sodium_ideal_mg_absolute must be < sodium_hard_cap_mg",
            ));
        }

        let m = &self.macro_balance;
        if m.fat_share_min >= m.fat_share_max || m.carb_share_min >= m.carb_share_max {
            return Err(ConfigError::InvalidRange(
                "Macro balance bands must have min < max",
            ));
        }
        if !(0.0..=100.0).contains(&m.calorie_free_score) {
            return Err(ConfigError::ValueOutOfRange(
                "calorie_free_score must be within [0, 100]",
            ));
        }

        let g = &self.grades;
        if !(g.a > g.b && g.b > g.c && g.c > g.d && g.d > 0.0 && g.a <= 100.0) {
            return Err(ConfigError::InvalidRange(
                "Grade breakpoints must be strictly decreasing within (0, 100]",
            ));
        }

        if self.feedback.max_weak_areas == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "max_weak_areas must be at least 1",
            ));
        }

        Ok(())
    }
}
