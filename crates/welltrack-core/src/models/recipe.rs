// ABOUTME: Recipe input models handed to the compatibility engine by recipe collaborators
// ABOUTME: RecipeInput, IngredientInput, and FilterCriteria with validation helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::dietary::normalize_name;
use super::nutrition::NutrientProfile;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Default minimum compatibility score for a recipe to pass
pub const DEFAULT_MIN_COMPATIBILITY_SCORE: f64 = 0.7;

/// One ingredient line of a recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct IngredientInput {
    /// Ingredient name; required for evaluation
    #[serde(default)]
    pub name: Option<String>,
    /// Amount (informational only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    /// Unit for the amount (informational only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl IngredientInput {
    /// Ingredient with just a name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            quantity: None,
            unit: None,
        }
    }

    /// Normalized name.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the name is missing or blank
    pub fn normalized_name(&self) -> AppResult<String> {
        let name = self
            .name
            .as_deref()
            .map(normalize_name)
            .unwrap_or_default();
        if name.is_empty() {
            return Err(AppError::invalid_input("ingredient name is missing or blank"));
        }
        Ok(name)
    }
}

/// A recipe as supplied by the recipe collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeInput {
    /// Caller-assigned identifier
    pub id: String,
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Ingredient lines
    #[serde(default)]
    pub ingredients: Vec<IngredientInput>,
    /// Per-serving nutrient totals, when already computed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutrients: Option<NutrientProfile>,
}

impl RecipeInput {
    /// Recipe from plain ingredient names
    pub fn from_names<I, S>(id: impl Into<String>, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            name: None,
            ingredients: names.into_iter().map(IngredientInput::named).collect(),
            nutrients: None,
        }
    }

    /// Attach nutrient totals
    #[must_use]
    pub fn with_nutrients(mut self, nutrients: NutrientProfile) -> Self {
        self.nutrients = Some(nutrients);
        self
    }
}

/// Thresholds a recipe must meet to count as compatible
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Minimum compatibility score in [0, 1]
    #[serde(default = "default_min_score")]
    pub min_score: f64,
    /// Maximum number of violations; `None` means unlimited
    #[serde(default)]
    pub max_violations: Option<usize>,
}

const fn default_min_score() -> f64 {
    DEFAULT_MIN_COMPATIBILITY_SCORE
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            min_score: DEFAULT_MIN_COMPATIBILITY_SCORE,
            max_violations: None,
        }
    }
}

impl FilterCriteria {
    /// Criteria with a custom minimum score
    #[must_use]
    pub const fn with_min_score(mut self, min_score: f64) -> Self {
        self.min_score = min_score;
        self
    }

    /// Criteria with a violation cap
    #[must_use]
    pub const fn with_max_violations(mut self, max_violations: usize) -> Self {
        self.max_violations = Some(max_violations);
        self
    }

    /// Check that `min_score` lies in [0, 1].
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` otherwise
    pub fn validate(&self) -> AppResult<()> {
        if !(0.0..=1.0).contains(&self.min_score) {
            return Err(AppError::out_of_range(format!(
                "min_score must be within [0, 1], got {}",
                self.min_score
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_ingredient_name_rejected() {
        let missing = IngredientInput::default();
        let blank = IngredientInput::named("   ");
        assert!(missing.normalized_name().is_err());
        assert!(blank.normalized_name().is_err());
        assert_eq!(
            IngredientInput::named(" Cheddar  Cheese").normalized_name().unwrap(),
            "cheddar cheese"
        );
    }

    #[test]
    fn test_default_criteria() {
        let criteria = FilterCriteria::default();
        assert!((criteria.min_score - 0.7).abs() < f64::EPSILON);
        assert!(criteria.max_violations.is_none());
        assert!(criteria.validate().is_ok());
        assert!(criteria.with_min_score(1.5).validate().is_err());
    }

    #[test]
    fn test_recipe_deserializes_with_missing_fields() {
        let recipe: RecipeInput =
            serde_json::from_str(r#"{"id":"r1","ingredients":[{"name":"rice"},{}]}"#).unwrap();
        assert_eq!(recipe.ingredients.len(), 2);
        assert!(recipe.ingredients[1].name.is_none());
        assert!(recipe.nutrients.is_none());
    }
}
