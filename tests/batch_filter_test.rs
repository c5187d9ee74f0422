// ABOUTME: Integration tests for batch recipe filtering through the engine facade
// ABOUTME: Status totals, failure isolation, time budgets, ordering, and frequency tables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{engine_with, mixed_recipes, vegan_shellfish_profile};
use std::time::Duration;
use welltrack_core::models::{FilterCriteria, ProcessingStatus, RecipeInput};
use welltrack_intelligence::dietary::BatchRequest;

#[test]
fn test_mixed_batch_classification() {
    let profile = vegan_shellfish_profile();
    let user_id = profile.user_id;
    let engine = engine_with([profile]);
    let request = BatchRequest::new(FilterCriteria::default()).with_substitutions();

    let report = engine
        .filter_recipes(user_id, &mixed_recipes(), &request)
        .unwrap();

    let statuses: Vec<_> = report.processed.iter().map(|p| p.status).collect();
    assert_eq!(
        statuses,
        vec![
            ProcessingStatus::Compatible,
            ProcessingStatus::CompatibleWithSubstitutions,
            ProcessingStatus::IncompatibleMajor,
            ProcessingStatus::ProcessingError,
            ProcessingStatus::CompatibleWithSubstitutions,
        ]
    );

    let counts = report.summary.status_counts;
    assert_eq!(counts.total(), 5);
    assert_eq!(report.summary.total_recipes, 5);
    assert_eq!(counts.get(ProcessingStatus::CompatibleWithSubstitutions), 2);
    assert!((report.summary.compatibility_rate() - 0.2).abs() < 1e-9);
}

#[test]
fn test_output_order_matches_input_order() {
    let profile = vegan_shellfish_profile();
    let user_id = profile.user_id;
    let engine = engine_with([profile]);
    let recipes: Vec<RecipeInput> = (0..40)
        .map(|i| RecipeInput::from_names(format!("recipe-{i}"), ["rice", "beans"]))
        .collect();

    let report = engine
        .filter_recipes(user_id, &recipes, &BatchRequest::default())
        .unwrap();

    let ids: Vec<_> = report.processed.iter().map(|p| p.recipe_id.as_str()).collect();
    let expected: Vec<_> = recipes.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, expected);
    assert_eq!(report.summary.status_counts.compatible, 40);
}

#[test]
fn test_zero_budget_reports_timeouts() {
    let profile = vegan_shellfish_profile();
    let user_id = profile.user_id;
    let engine = engine_with([profile]);
    let request = BatchRequest::default().with_time_budget(Duration::ZERO);

    let report = engine
        .filter_recipes(user_id, &mixed_recipes(), &request)
        .unwrap();

    assert_eq!(report.summary.status_counts.processing_error, 5);
    assert!(report
        .processed
        .iter()
        .all(|p| p.error.as_deref() == Some("processing timeout")));
}

#[test]
fn test_frequency_tables() {
    let profile = vegan_shellfish_profile();
    let user_id = profile.user_id;
    let engine = engine_with([profile]);
    let recipes = vec![
        RecipeInput::from_names("cafe au lait", ["whole milk", "coffee"]),
        RecipeInput::from_names("cheese toast", ["bread", "cheddar cheese"]),
        RecipeInput::from_names("milkshake", ["milk", "ice"]),
    ];
    let request = BatchRequest::new(FilterCriteria::default()).with_substitutions();

    let report = engine.filter_recipes(user_id, &recipes, &request).unwrap();

    assert_eq!(
        report.summary.most_common_violations,
        vec!["Violates Vegan restriction (strict)".to_owned()]
    );
    assert_eq!(
        report.summary.most_common_substitutions,
        vec![
            "whole milk".to_owned(),
            "cheddar cheese".to_owned(),
            "milk".to_owned()
        ]
    );
}

#[test]
fn test_batch_results_are_deterministic() {
    let profile = vegan_shellfish_profile();
    let user_id = profile.user_id;
    let engine = engine_with([profile]);
    let request = BatchRequest::new(FilterCriteria::default()).with_substitutions();

    let first = engine
        .filter_recipes(user_id, &mixed_recipes(), &request)
        .unwrap();
    let second = engine
        .filter_recipes(user_id, &mixed_recipes(), &request)
        .unwrap();
    assert_eq!(first, second);
}
