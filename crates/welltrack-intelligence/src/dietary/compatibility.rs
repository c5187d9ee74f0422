// ABOUTME: Evaluates a recipe's ingredients against a dietary profile into a compatibility verdict
// ABOUTME: Severity-weighted scoring, medical-violation veto, and filter-criteria thresholds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Compatibility Evaluation
//!
//! The score subtracts every violation's severity weight from one. Mild
//! violations share a capped budget:
//!
//! ```text
//! penalty = min(sum(mild weights), mild_penalty_cap) + sum(other weights)
//! score   = clamp(1 - penalty, 0, 1)
//! ```
//!
//! Adding a violation never raises the score. A single medical violation
//! drives it to zero, while any number of mild violations alone leaves it at
//! `1 - mild_penalty_cap` or above.

use super::reference_data::DietaryReferenceData;
use super::restriction_matcher::{match_ingredient, match_preferences};
use crate::config::intelligence::CompatibilityConfig;
use tracing::debug;
use welltrack_core::errors::{AppError, AppResult};
use welltrack_core::models::{
    DietaryCompatibility, DietaryProfile, FilterCriteria, IngredientInput, NutrientProfile,
    RecipeInput, RestrictionSeverity, Violation,
};

/// Severity-weighted compatibility score in [0, 1]
#[must_use]
pub fn compatibility_score(violations: &[Violation], config: &CompatibilityConfig) -> f64 {
    let (mild, other) = violations
        .iter()
        .fold((0.0_f64, 0.0_f64), |(mild, other), v| {
            let weight = config.weight_for(v.severity);
            if v.severity == RestrictionSeverity::Mild {
                (mild + weight, other)
            } else {
                (mild, other + weight)
            }
        });
    let penalty = mild.min(config.mild_penalty_cap) + other;
    (1.0 - penalty).clamp(0.0, 1.0)
}

/// Evaluate an ingredient list against a profile.
///
/// # Arguments
/// * `ingredients` - Recipe ingredient lines; every line must carry a name
/// * `nutrients` - Optional per-serving totals, validated but not scored
/// * `profile` - Read-only dietary profile snapshot
/// * `criteria` - Minimum score and violation cap
/// * `reference` - Exclusion and allergen tables
/// * `config` - Severity weights
///
/// # Errors
///
/// Returns `InvalidInput` for a missing or blank ingredient name or an
/// invalid nutrient profile, and `ValueOutOfRange` for invalid criteria.
/// Ingredients are never skipped.
pub fn evaluate_compatibility(
    ingredients: &[IngredientInput],
    nutrients: Option<&NutrientProfile>,
    profile: &DietaryProfile,
    criteria: &FilterCriteria,
    reference: &dyn DietaryReferenceData,
    config: &CompatibilityConfig,
) -> AppResult<DietaryCompatibility> {
    criteria.validate()?;
    if let Some(nutrients) = nutrients {
        nutrients.validate()?;
    }

    let mut violations = Vec::new();
    let mut warnings = Vec::new();
    for (index, ingredient) in ingredients.iter().enumerate() {
        let name = ingredient.normalized_name().map_err(|e| {
            AppError::invalid_input(format!("ingredient #{index}: {}", e.message))
                .with_details(serde_json::json!({ "ingredient_index": index }))
        })?;
        violations.extend(match_ingredient(&name, profile, reference)?);
        warnings.extend(match_preferences(&name, profile));
    }

    let score = compatibility_score(&violations, config);
    let has_medical = violations
        .iter()
        .any(|v| v.severity == RestrictionSeverity::Medical);
    let within_cap = !criteria
        .max_violations
        .is_some_and(|max| violations.len() > max);
    let is_compatible = !has_medical && score >= criteria.min_score && within_cap;

    debug!(
        ingredients = ingredients.len(),
        violations = violations.len(),
        score,
        is_compatible,
        "Evaluated dietary compatibility"
    );

    Ok(DietaryCompatibility {
        is_compatible,
        violations,
        warnings,
        score,
    })
}

/// Evaluate a whole recipe input
///
/// # Errors
///
/// Same as [`evaluate_compatibility`]
pub fn evaluate_recipe(
    recipe: &RecipeInput,
    profile: &DietaryProfile,
    criteria: &FilterCriteria,
    reference: &dyn DietaryReferenceData,
    config: &CompatibilityConfig,
) -> AppResult<DietaryCompatibility> {
    evaluate_compatibility(
        &recipe.ingredients,
        recipe.nutrients.as_ref(),
        profile,
        criteria,
        reference,
        config,
    )
}
