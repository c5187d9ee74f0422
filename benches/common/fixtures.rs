// ABOUTME: Benchmark fixtures generating meals, recipes, and dietary profiles
// ABOUTME: Deterministic data so measurements are reproducible across runs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Benchmark fixtures for meals, recipes, and profiles.

use uuid::Uuid;
use welltrack_core::models::{
    Allergy, AllergySeverity, DietaryProfile, DietaryRestriction, DietaryRestrictionType,
    NutrientProfile, PreferenceLevel, RecipeInput, RestrictionSeverity,
};

/// Predefined batch sizes for benchmark scenarios
#[derive(Debug, Clone, Copy)]
pub enum RecipeBatchSize {
    /// One page of search results
    Small,
    /// A user's saved recipe collection
    Medium,
    /// A catalog import
    Large,
}

impl RecipeBatchSize {
    #[must_use]
    pub const fn count(self) -> usize {
        match self {
            Self::Small => 20,
            Self::Medium => 200,
            Self::Large => 2000,
        }
    }
}

const INGREDIENT_POOL: &[&str] = &[
    "chicken breast",
    "brown rice",
    "broccoli",
    "whole milk",
    "cheddar cheese",
    "eggs",
    "oat milk",
    "tofu",
    "soy sauce",
    "shrimp",
    "wheat flour",
    "olive oil",
    "peanut butter",
    "honey",
    "eggplant",
    "black beans",
    "pasta",
    "spinach",
    "bacon",
    "cilantro",
];

/// Deterministic recipes of 6 to 11 ingredients drawn from a fixed pool
#[must_use]
pub fn generate_recipes(size: RecipeBatchSize) -> Vec<RecipeInput> {
    (0..size.count())
        .map(|index| {
            let len = 6 + index % 6;
            let names =
                (0..len).map(|k| INGREDIENT_POOL[(index * 7 + k * 3) % INGREDIENT_POOL.len()]);
            RecipeInput::from_names(format!("bench-recipe-{index}"), names)
        })
        .collect()
}

/// Meals spread across the grade range
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn generate_meals(count: usize) -> Vec<NutrientProfile> {
    (0..count)
        .map(|index| {
            let step = (index % 10) as f64;
            NutrientProfile {
                calories: 300.0 + step * 40.0,
                protein_g: 5.0 + step * 3.0,
                carbs_g: 30.0 + step * 4.0,
                fat_g: 10.0 + step * 2.5,
                fiber_g: step * 1.5,
                sodium_mg: 200.0 + step * 180.0,
                potassium_mg: 100.0 + step * 70.0,
            }
        })
        .collect()
}

/// Profile exercising restrictions, a medical allergy, and a preference
#[must_use]
pub fn busy_profile() -> DietaryProfile {
    let mut profile = DietaryProfile::new(Uuid::from_u128(0x5eed));
    profile.add_restriction(DietaryRestriction::new(
        DietaryRestrictionType::Vegetarian,
        RestrictionSeverity::Strict,
    ));
    profile.add_restriction(DietaryRestriction::new(
        DietaryRestrictionType::GlutenFree,
        RestrictionSeverity::Moderate,
    ));
    if let Ok(allergy) = Allergy::new("peanuts", AllergySeverity::Anaphylaxis) {
        let _ = profile.add_allergy(allergy);
    }
    let _ = profile.add_preference("cilantro", PreferenceLevel::Dislike);
    profile
}
