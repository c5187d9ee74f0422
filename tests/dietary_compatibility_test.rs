// ABOUTME: Integration tests for recipe checks against stored dietary profiles
// ABOUTME: Medical vetoes, inactive entries, exception phrases, preferences, and unknown users
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{engine_with, restricted_profile, vegan_shellfish_profile};
use uuid::Uuid;
use welltrack_core::errors::ErrorCode;
use welltrack_core::models::{
    Allergy, AllergySeverity, DietaryProfile, DietaryRestriction, DietaryRestrictionType,
    FilterCriteria, IngredientInput, RecipeInput, RestrictionSeverity, ViolationSource,
};
use welltrack_intelligence::dietary::{
    evaluate_compatibility, match_ingredient, suggest_substitutions, StaticReferenceData,
};
use welltrack_intelligence::config::CompatibilityConfig;

#[test]
fn test_medical_violation_is_never_compatible() {
    let profile = vegan_shellfish_profile();
    let user_id = profile.user_id;
    let engine = engine_with([profile]);
    let recipe = RecipeInput::from_names("crab salad", ["crab", "lime"]);

    let lenient = FilterCriteria::default().with_min_score(0.0);
    let check = engine.check_recipe(user_id, &recipe, &lenient).unwrap();

    assert!(!check.compatibility.is_compatible);
    assert!(check.compatibility.has_medical_violation());
    assert!(!check.can_import);
}

#[test]
fn test_unknown_user_fails_instead_of_passing() {
    let engine = engine_with([vegan_shellfish_profile()]);
    let recipe = RecipeInput::from_names("crab salad", ["crab"]);
    let error = engine
        .check_recipe(Uuid::new_v4(), &recipe, &FilterCriteria::default())
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::ResourceNotFound);
    assert!(error.message.contains("Dietary profile"));
}

#[test]
fn test_plant_milk_is_not_dairy() {
    let data = StaticReferenceData::standard();
    let mut profile = DietaryProfile::new(Uuid::new_v4());
    profile
        .add_allergy(Allergy::new("milk", AllergySeverity::Severe).unwrap())
        .unwrap();

    assert!(match_ingredient("oat milk", &profile, &data)
        .unwrap()
        .is_empty());
    let violations = match_ingredient("whole milk", &profile, &data).unwrap();
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].source, ViolationSource::Allergy("milk".into()));
}

#[test]
fn test_inactive_restriction_never_matches() {
    let data = StaticReferenceData::standard();
    let mut profile =
        restricted_profile(DietaryRestrictionType::Vegetarian, RestrictionSeverity::Strict);
    assert!(profile.set_restriction_active(DietaryRestrictionType::Vegetarian, false));

    assert!(match_ingredient("chicken breast", &profile, &data)
        .unwrap()
        .is_empty());
}

#[test]
fn test_preferences_only_warn() {
    let profile = vegan_shellfish_profile();
    let user_id = profile.user_id;
    let engine = engine_with([profile]);
    let recipe = RecipeInput::from_names("salsa", ["tomato", "cilantro", "onion"]);
    let check = engine
        .check_recipe(user_id, &recipe, &FilterCriteria::default())
        .unwrap();

    assert!(check.compatibility.is_compatible);
    assert_eq!(check.compatibility.warnings.len(), 1);
    assert_eq!(check.compatibility.warnings[0].item, "cilantro");
}

#[test]
fn test_blank_ingredient_is_rejected_not_skipped() {
    let data = StaticReferenceData::standard();
    let profile = vegan_shellfish_profile();
    let ingredients = vec![
        IngredientInput::named("rice"),
        IngredientInput::named("   "),
    ];
    let error = evaluate_compatibility(
        &ingredients,
        None,
        &profile,
        &FilterCriteria::default(),
        &data,
        &CompatibilityConfig::default(),
    )
    .unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidInput);
}

#[test]
fn test_evaluation_is_idempotent() {
    let data = StaticReferenceData::standard();
    let profile = vegan_shellfish_profile();
    let recipe = RecipeInput::from_names("omelette", ["eggs", "cheese", "shrimp"]);
    let run = || {
        evaluate_compatibility(
            &recipe.ingredients,
            None,
            &profile,
            &FilterCriteria::default(),
            &data,
            &CompatibilityConfig::default(),
        )
        .unwrap()
    };
    assert_eq!(run(), run());
}

#[test]
fn test_substitutions_come_only_from_the_table() {
    let data = StaticReferenceData::standard();
    let profile =
        restricted_profile(DietaryRestrictionType::GlutenFree, RestrictionSeverity::Strict);
    let violations = match_ingredient("pasta", &profile, &data).unwrap();
    let plan = suggest_substitutions(&violations, &data);

    assert_eq!(
        plan.get("pasta").unwrap(),
        ["rice pasta".to_owned(), "chickpea pasta".to_owned()]
    );
    assert!(suggest_substitutions(&[], &data).is_empty());
}

#[test]
fn test_mild_preference_restriction_still_passes() {
    let profile = restricted_profile(DietaryRestrictionType::Vegetarian, RestrictionSeverity::Mild);
    let user_id = profile.user_id;
    let engine = engine_with([profile]);
    let recipe = RecipeInput::from_names("club", ["bread", "turkey", "lettuce"]);
    let check = engine
        .check_recipe(user_id, &recipe, &FilterCriteria::default())
        .unwrap();

    assert_eq!(check.compatibility.violations.len(), 1);
    assert!(check.compatibility.is_compatible);
    assert!(check.substitutions.is_empty());
}

#[test]
fn test_profile_loaded_from_json_is_normalized() {
    let user_id = Uuid::new_v4();
    let json = format!(
        r#"{{
            "user_id": "{user_id}",
            "allergies": [{{"allergen": "Peanuts", "severity": "anaphylaxis"}}],
            "preferences": [{{"item": "CILANTRO", "level": "dislike"}}]
        }}"#
    );
    let profile: DietaryProfile = serde_json::from_str(&json).unwrap();
    let engine = engine_with([profile]);
    let recipe = RecipeInput::from_names("satay", ["Peanut Sauce", "rice", "cilantro"]);

    let lenient = FilterCriteria::default().with_min_score(0.0);
    let check = engine.check_recipe(user_id, &recipe, &lenient).unwrap();

    assert!(!check.compatibility.is_compatible);
    assert!(check.compatibility.has_medical_violation());
    assert_eq!(
        check.compatibility.violations[0].source,
        ViolationSource::Allergy("peanuts".into())
    );
    assert_eq!(check.compatibility.warnings.len(), 1);
    assert!(!check.can_import);
}

#[test]
fn test_adding_violations_never_raises_score() {
    let mut profile =
        restricted_profile(DietaryRestrictionType::Vegetarian, RestrictionSeverity::Strict);
    profile.add_restriction(DietaryRestriction::new(
        DietaryRestrictionType::Keto,
        RestrictionSeverity::Mild,
    ));
    let user_id = profile.user_id;
    let engine = engine_with([profile]);
    let criteria = FilterCriteria::default();

    let mut previous: Option<f64> = None;
    let mut names = vec!["beef"];
    for extra in ["sugar", "rice", "pasta", "chicken"] {
        let recipe = RecipeInput::from_names("stew", names.iter().copied());
        let check = engine.check_recipe(user_id, &recipe, &criteria).unwrap();
        assert!(!check.compatibility.is_compatible);
        if let Some(previous) = previous {
            assert!(check.compatibility.score <= previous);
        }
        previous = Some(check.compatibility.score);
        names.push(extra);
    }
}
