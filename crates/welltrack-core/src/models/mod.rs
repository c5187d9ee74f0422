// ABOUTME: Core data models for nutrition scoring and dietary compatibility
// ABOUTME: Re-exports nutrition, dietary profile, and recipe input types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Data models shared between the engine and its collaborators.

/// Dietary profiles, severities, violations, and substitutions
pub mod dietary;
/// Nutrient profiles and meal grades
pub mod nutrition;
/// Recipe inputs and filter criteria
pub mod recipe;

pub use dietary::{
    normalize_name, Allergy, AllergySeverity, DietaryCompatibility, DietaryProfile,
    DietaryRestriction, DietaryRestrictionType, DietaryWarning, Preference, PreferenceLevel,
    ProcessingStatus, RestrictionCategory, RestrictionSeverity, Substitution, SubstitutionPlan,
    Violation, ViolationSource,
};
pub use nutrition::{NutrientProfile, ScoreBreakdown, ScoreGrade};
pub use recipe::{FilterCriteria, IngredientInput, RecipeInput, DEFAULT_MIN_COMPATIBILITY_SCORE};
