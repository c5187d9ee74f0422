// ABOUTME: Integration tests for meal grading through the engine facade
// ABOUTME: Concrete grades, zero and calorie-free meals, determinism, and custom breakpoints
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{empty_engine, nutrients};
use welltrack_core::errors::ErrorCode;
use welltrack_core::models::{NutrientProfile, ScoreGrade};
use welltrack_intelligence::config::MealScoringConfig;
use welltrack_intelligence::{calculate_meal_score, grade_for_score};

#[test]
fn test_balanced_meal_is_grade_a() {
    let engine = empty_engine();
    let meal = nutrients(400.0, 30.0, 30.0, 18.0, 12.0, 400.0, 600.0);
    let (grade, breakdown) = engine.score_meal(&meal).unwrap();

    assert_eq!(grade, ScoreGrade::A);
    assert!(breakdown.total_score >= 85.0);
    assert!(breakdown.feedback.starts_with(grade.description()));
}

#[test]
fn test_salty_low_fiber_meal_is_grade_e() {
    let engine = empty_engine();
    let meal = nutrients(600.0, 60.0, 5.0, 40.0, 0.0, 2000.0, 50.0);
    let (grade, breakdown) = engine.score_meal(&meal).unwrap();

    assert_eq!(grade, ScoreGrade::E);
    assert!(breakdown.total_score < 40.0);
    assert!(breakdown.feedback.contains("sodium"));
}

#[test]
fn test_middling_meal_is_grade_c() {
    let engine = empty_engine();
    let meal = nutrients(350.0, 40.0, 15.0, 15.0, 4.0, 800.0, 300.0);
    let (grade, breakdown) = engine.score_meal(&meal).unwrap();

    assert_eq!(grade, ScoreGrade::C);
    assert!((55.0..70.0).contains(&breakdown.total_score));
}

#[test]
fn test_zero_meal_is_valid_and_bounded() {
    let engine = empty_engine();
    let (grade, breakdown) = engine.score_meal(&NutrientProfile::zero()).unwrap();

    assert_eq!(grade, ScoreGrade::E);
    for score in [
        breakdown.protein_score,
        breakdown.fiber_score,
        breakdown.sodium_score,
        breakdown.potassium_score,
        breakdown.macro_balance_score,
        breakdown.total_score,
    ] {
        assert!((0.0..=100.0).contains(&score));
    }
    assert!(!breakdown.feedback.is_empty());
}

#[test]
fn test_scoring_is_deterministic() {
    let config = MealScoringConfig::default();
    let meal = nutrients(520.0, 55.0, 28.0, 20.0, 7.5, 900.0, 450.0);
    let first = calculate_meal_score(&meal, &config).unwrap();
    let second = calculate_meal_score(&meal, &config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_total_is_weighted_sum_of_sub_scores() {
    let config = MealScoringConfig::default();
    let meal = nutrients(480.0, 50.0, 25.0, 17.0, 6.0, 700.0, 400.0);
    let (_, breakdown) = calculate_meal_score(&meal, &config).unwrap();
    let weights = &config.weights;
    let expected = weights.macro_balance.mul_add(
        breakdown.macro_balance_score,
        weights.potassium.mul_add(
            breakdown.potassium_score,
            weights.sodium.mul_add(
                breakdown.sodium_score,
                weights
                    .fiber
                    .mul_add(breakdown.fiber_score, weights.protein * breakdown.protein_score),
            ),
        ),
    );
    assert!((breakdown.total_score - expected).abs() < 1e-6);
}

#[test]
fn test_non_finite_nutrient_rejected() {
    let engine = empty_engine();
    let meal = nutrients(f64::NAN, 30.0, 30.0, 18.0, 12.0, 400.0, 600.0);
    let error = engine.score_meal(&meal).unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidInput);
}

#[test]
fn test_custom_breakpoints_shift_grades() {
    let mut config = MealScoringConfig::default();
    config.grades.a = 98.0;
    config.grades.b = 90.0;
    let meal = nutrients(400.0, 30.0, 30.0, 18.0, 12.0, 400.0, 600.0);
    let (grade, _) = calculate_meal_score(&meal, &config).unwrap();
    assert_eq!(grade, ScoreGrade::B);
    assert_eq!(grade_for_score(98.0, &config.grades), ScoreGrade::A);
}
