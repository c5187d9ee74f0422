// ABOUTME: Nutrition models consumed and produced by meal scoring
// ABOUTME: NutrientProfile, ScoreGrade, and ScoreBreakdown definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Computed nutrient totals for one serving of a meal or recipe.
///
/// Values are supplied by the nutrition-calculation collaborator already
/// scaled to the portion eaten. The engine never derives them from raw
/// ingredients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct NutrientProfile {
    /// Energy in kcal
    pub calories: f64,
    /// Protein in grams
    pub protein_g: f64,
    /// Carbohydrates in grams
    pub carbs_g: f64,
    /// Fat in grams
    pub fat_g: f64,
    /// Dietary fiber in grams
    pub fiber_g: f64,
    /// Sodium in milligrams
    pub sodium_mg: f64,
    /// Potassium in milligrams
    pub potassium_mg: f64,
}

impl NutrientProfile {
    /// Profile with every nutrient at zero
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            calories: 0.0,
            protein_g: 0.0,
            carbs_g: 0.0,
            fat_g: 0.0,
            fiber_g: 0.0,
            sodium_mg: 0.0,
            potassium_mg: 0.0,
        }
    }

    /// Named nutrient values in declaration order
    #[must_use]
    pub const fn fields(&self) -> [(&'static str, f64); 7] {
        [
            ("calories", self.calories),
            ("protein_g", self.protein_g),
            ("carbs_g", self.carbs_g),
            ("fat_g", self.fat_g),
            ("fiber_g", self.fiber_g),
            ("sodium_mg", self.sodium_mg),
            ("potassium_mg", self.potassium_mg),
        ]
    }

    /// Reject negative or non-finite values.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` naming the first offending field
    pub fn validate(&self) -> AppResult<()> {
        for (field, value) in self.fields() {
            if !value.is_finite() {
                return Err(AppError::invalid_input(format!(
                    "{field} must be a finite number"
                ))
                .with_details(serde_json::json!({ "field": field })));
            }
            if value < 0.0 {
                return Err(AppError::invalid_input(format!(
                    "{field} must be non-negative, got {value}"
                ))
                .with_details(serde_json::json!({ "field": field, "value": value })));
            }
        }
        Ok(())
    }

    /// True when the profile carries no energy, so calorie-relative ratios are undefined
    #[must_use]
    pub fn is_calorie_free(&self) -> bool {
        self.calories <= 0.0
    }
}

/// Letter grade for a meal, `A` best and `E` worst.
///
/// Ordering follows declaration order, so `A < B < ... < E`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ScoreGrade {
    /// Excellent nutritional balance
    A,
    /// Good nutritional value
    B,
    /// Average
    C,
    /// Below average
    D,
    /// Poor
    E,
}

impl ScoreGrade {
    /// All grades, best first
    pub const ALL: [Self; 5] = [Self::A, Self::B, Self::C, Self::D, Self::E];

    /// Whether this grade ranks strictly above `other`
    #[must_use]
    pub fn is_better_than(self, other: Self) -> bool {
        self < other
    }

    /// Canned summary sentence for the grade
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::A => {
                "Excellent nutritional balance with great macro and micronutrient distribution."
            }
            Self::B => "Good meal choice with solid nutritional value.",
            Self::C => "Average meal with room for improvement.",
            Self::D => {
                "Below average nutritional quality; include more whole foods and balance macronutrients."
            }
            Self::E => "Poor nutritional quality.",
        }
    }
}

impl fmt::Display for ScoreGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
        };
        f.write_str(letter)
    }
}

/// Explainable breakdown behind a meal grade.
///
/// Sub-scores are on 0-100 scales. Derived from a [`NutrientProfile`] on
/// demand and never stored on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Protein share of energy
    pub protein_score: f64,
    /// Fiber density
    pub fiber_score: f64,
    /// Sodium load (higher is better, meaning less sodium)
    pub sodium_score: f64,
    /// Potassium content
    pub potassium_score: f64,
    /// Fat and carbohydrate shares inside healthy bands
    pub macro_balance_score: f64,
    /// Weighted total in [0, 100]
    pub total_score: f64,
    /// Human-readable summary, never empty
    pub feedback: String,
}
