// ABOUTME: Subcommand implementations for welltrack-cli
// ABOUTME: Meal scoring, single-recipe checks, and batch filtering over JSON inputs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::helpers::{read_json, EngineContext};
use anyhow::Result;
use serde_json::{json, Value};
use std::path::Path;
use std::time::Duration;
use welltrack_core::models::{DietaryProfile, FilterCriteria, NutrientProfile, RecipeInput};
use welltrack_intelligence::dietary::BatchRequest;

/// Grade a meal
pub fn score(context: &EngineContext, input: &Path) -> Result<Value> {
    let nutrients: NutrientProfile = read_json(input)?;
    let (grade, breakdown) = context.engine().score_meal(&nutrients)?;
    Ok(json!({
        "grade": grade,
        "description": grade.description(),
        "breakdown": breakdown,
    }))
}

/// Check one recipe
pub fn check(
    context: &EngineContext,
    profile: &Path,
    recipe: &Path,
    criteria: &FilterCriteria,
) -> Result<Value> {
    let profile: DietaryProfile = read_json(profile)?;
    let recipe: RecipeInput = read_json(recipe)?;
    let user_id = profile.user_id;
    let result = context
        .engine_for(profile)
        .check_recipe(user_id, &recipe, criteria)?;
    Ok(serde_json::to_value(result)?)
}

/// Filter a batch of recipes
pub fn batch(
    context: &EngineContext,
    profile: &Path,
    recipes: &Path,
    criteria: FilterCriteria,
    substitutions: bool,
    time_budget_ms: Option<u64>,
) -> Result<Value> {
    let profile: DietaryProfile = read_json(profile)?;
    let recipes: Vec<RecipeInput> = read_json(recipes)?;

    let mut request = BatchRequest::new(criteria);
    if substitutions {
        request = request.with_substitutions();
    }
    if let Some(ms) = time_budget_ms {
        request = request.with_time_budget(Duration::from_millis(ms));
    }

    let user_id = profile.user_id;
    let report = context
        .engine_for(profile)
        .filter_recipes(user_id, &recipes, &request)?;
    Ok(json!({
        "compatibility_rate": report.summary.compatibility_rate(),
        "report": report,
    }))
}
