// ABOUTME: Shared test utilities and fixtures for WellTrack integration tests
// ABOUTME: Provides quiet logging setup, profile builders, and a ready engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `welltrack`

use std::env;
use std::sync::{Arc, Once};
use tracing::Level;
use uuid::Uuid;
use welltrack::services::{DietaryEngine, InMemoryProfileProvider};
use welltrack_core::models::{
    Allergy, AllergySeverity, DietaryProfile, DietaryRestriction, DietaryRestrictionType,
    IngredientInput, NutrientProfile, PreferenceLevel, RecipeInput, RestrictionSeverity,
};
use welltrack_intelligence::dietary::StaticReferenceData;
use welltrack_intelligence::IntelligenceConfig;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Nutrient totals in constructor order: calories, carbs, protein, fat, fiber, sodium, potassium
pub fn nutrients(
    calories: f64,
    carbs_g: f64,
    protein_g: f64,
    fat_g: f64,
    fiber_g: f64,
    sodium_mg: f64,
    potassium_mg: f64,
) -> NutrientProfile {
    NutrientProfile {
        calories,
        protein_g,
        carbs_g,
        fat_g,
        fiber_g,
        sodium_mg,
        potassium_mg,
    }
}

/// Profile with a single restriction
pub fn restricted_profile(
    restriction: DietaryRestrictionType,
    severity: RestrictionSeverity,
) -> DietaryProfile {
    let mut profile = DietaryProfile::new(Uuid::new_v4());
    profile.add_restriction(DietaryRestriction::new(restriction, severity));
    profile
}

/// Strict vegan with an anaphylactic shellfish allergy and a dislike of cilantro
pub fn vegan_shellfish_profile() -> DietaryProfile {
    let mut profile =
        restricted_profile(DietaryRestrictionType::Vegan, RestrictionSeverity::Strict);
    profile
        .add_allergy(Allergy::new("shellfish", AllergySeverity::Anaphylaxis).unwrap())
        .unwrap();
    profile
        .add_preference("cilantro", PreferenceLevel::Dislike)
        .unwrap();
    profile
}

/// Engine over the built-in tables and default configuration that knows `profiles`
pub fn engine_with(
    profiles: impl IntoIterator<Item = DietaryProfile>,
) -> DietaryEngine<InMemoryProfileProvider> {
    init_test_logging();
    let provider = profiles
        .into_iter()
        .fold(InMemoryProfileProvider::default(), InMemoryProfileProvider::with_profile);
    DietaryEngine::new(
        provider,
        Arc::new(StaticReferenceData::standard()),
        IntelligenceConfig::default(),
    )
}

/// Engine with no stored profiles
pub fn empty_engine() -> DietaryEngine<InMemoryProfileProvider> {
    engine_with(Vec::<DietaryProfile>::new())
}

/// A mixed batch: compatible, substitutable, medical, and malformed recipes
pub fn mixed_recipes() -> Vec<RecipeInput> {
    let mut broken = RecipeInput::from_names("broken", ["rice"]);
    broken.ingredients.push(IngredientInput::default());
    vec![
        RecipeInput::from_names("stir fry", ["tofu", "broccoli", "rice"]),
        RecipeInput::from_names("latte", ["espresso", "whole milk"]),
        RecipeInput::from_names("crab salad", ["crab", "lime", "cilantro"]),
        broken,
        RecipeInput::from_names("omelette", ["eggs", "cheese", "chives"]),
    ]
}
