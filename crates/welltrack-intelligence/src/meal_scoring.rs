// ABOUTME: Meal score calculator turning a nutrient profile into a letter grade
// ABOUTME: Protein, fiber, sodium, potassium, and macro-balance sub-scores with weighted total and feedback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Meal Scoring Module
//!
//! Converts the nutrient totals of one serving into a grade from `A` to `E`
//! with an explainable [`ScoreBreakdown`].
//!
//! Energy shares use the Atwater factors (4 kcal/g for protein and
//! carbohydrate, 9 kcal/g for fat). Every calorie-relative sub-score has an
//! absolute fallback so that a zero-calorie profile still scores.

use crate::config::intelligence::{GradeBreakpoints, MealScoringConfig};
use tracing::debug;
use welltrack_core::errors::AppResult;
use welltrack_core::models::{NutrientProfile, ScoreBreakdown, ScoreGrade};

/// Energy per gram of protein or carbohydrate (kcal)
const KCAL_PER_G_PROTEIN_CARB: f64 = 4.0;
/// Energy per gram of fat (kcal)
const KCAL_PER_G_FAT: f64 = 9.0;
/// Upper bound of every sub-score and of the total
const MAX_SCORE: f64 = 100.0;

/// Macronutrient shares of total energy
#[derive(Debug, Clone, Copy)]
struct EnergyShares {
    protein: f64,
    carbs: f64,
    fat: f64,
}

impl EnergyShares {
    /// Shares for a profile, `None` when calories are zero
    fn of(profile: &NutrientProfile) -> Option<Self> {
        if profile.is_calorie_free() {
            return None;
        }
        let calories = profile.calories;
        Some(Self {
            protein: profile.protein_g * KCAL_PER_G_PROTEIN_CARB / calories,
            carbs: profile.carbs_g * KCAL_PER_G_PROTEIN_CARB / calories,
            fat: profile.fat_g * KCAL_PER_G_FAT / calories,
        })
    }
}

/// Scale `value` against `target` onto 0-100, capped at full marks
fn ratio_score(value: f64, target: f64) -> f64 {
    (value / target).min(1.0) * MAX_SCORE
}

/// Linear falloff: full marks at or below `ideal`, zero at or above `limit`
fn falloff_score(value: f64, ideal: f64, limit: f64) -> f64 {
    if value <= ideal {
        MAX_SCORE
    } else if value >= limit {
        0.0
    } else {
        MAX_SCORE * (limit - value) / (limit - ideal)
    }
}

/// Distance of `share` outside `[min, max]`, zero when inside
fn band_deviation(share: f64, min: f64, max: f64) -> f64 {
    if share < min {
        min - share
    } else if share > max {
        share - max
    } else {
        0.0
    }
}

fn protein_score(
    profile: &NutrientProfile,
    shares: Option<EnergyShares>,
    config: &MealScoringConfig,
) -> f64 {
    let t = &config.thresholds;
    shares.map_or_else(
        || ratio_score(profile.protein_g, t.protein_target_g_absolute),
        |s| ratio_score(s.protein, t.protein_target_share),
    )
}

fn fiber_score(profile: &NutrientProfile, config: &MealScoringConfig) -> f64 {
    let t = &config.thresholds;
    if profile.is_calorie_free() {
        return ratio_score(profile.fiber_g, t.fiber_target_g_absolute);
    }
    let per_1000_kcal = profile.fiber_g / (profile.calories / 1000.0);
    ratio_score(per_1000_kcal, t.fiber_target_g_per_1000_kcal)
}

fn sodium_score(profile: &NutrientProfile, config: &MealScoringConfig) -> f64 {
    let t = &config.thresholds;
    if profile.sodium_mg >= t.sodium_hard_cap_mg {
        return 0.0;
    }
    if profile.is_calorie_free() {
        return falloff_score(
            profile.sodium_mg,
            t.sodium_ideal_mg_absolute,
            t.sodium_hard_cap_mg,
        );
    }
    falloff_score(
        profile.sodium_mg / profile.calories,
        t.sodium_ideal_mg_per_kcal,
        t.sodium_max_mg_per_kcal,
    )
}

fn potassium_score(profile: &NutrientProfile, config: &MealScoringConfig) -> f64 {
    ratio_score(profile.potassium_mg, config.thresholds.potassium_target_mg)
}

fn macro_balance_score(shares: Option<EnergyShares>, config: &MealScoringConfig) -> f64 {
    let m = &config.macro_balance;
    shares.map_or(m.calorie_free_score, |s| {
        let deviation = band_deviation(s.fat, m.fat_share_min, m.fat_share_max)
            + band_deviation(s.carbs, m.carb_share_min, m.carb_share_max);
        m.deviation_penalty
            .mul_add(-deviation, MAX_SCORE)
            .max(0.0)
    })
}

/// Map a total score onto a grade using the configured breakpoints
#[must_use]
pub fn grade_for_score(total: f64, breakpoints: &GradeBreakpoints) -> ScoreGrade {
    if total >= breakpoints.a {
        ScoreGrade::A
    } else if total >= breakpoints.b {
        ScoreGrade::B
    } else if total >= breakpoints.c {
        ScoreGrade::C
    } else if total >= breakpoints.d {
        ScoreGrade::D
    } else {
        ScoreGrade::E
    }
}

/// Build the feedback sentence: grade summary plus the weakest areas
fn build_feedback(
    grade: ScoreGrade,
    named_scores: &[(&str, f64)],
    config: &MealScoringConfig,
) -> String {
    let mut weak: Vec<(&str, f64)> = named_scores
        .iter()
        .copied()
        .filter(|(_, score)| *score < config.feedback.weak_area_threshold)
        .collect();
    weak.sort_by(|a, b| a.1.total_cmp(&b.1));
    weak.truncate(config.feedback.max_weak_areas);

    if weak.is_empty() {
        return format!(
            "{} All nutrient areas are well balanced.",
            grade.description()
        );
    }

    let areas = weak
        .iter()
        .map(|(name, score)| format!("{name} ({score:.0}/100)"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{} Weakest areas: {areas}.", grade.description())
}

/// Score a meal from its nutrient totals.
///
/// # Arguments
/// * `profile` - Nutrient totals for one serving, already portion-scaled
/// * `config` - Meal scoring configuration
///
/// # Errors
///
/// Returns `InvalidInput` if any nutrient is negative or non-finite. Valid
/// profiles, including the all-zero profile, always produce a grade.
pub fn calculate_meal_score(
    profile: &NutrientProfile,
    config: &MealScoringConfig,
) -> AppResult<(ScoreGrade, ScoreBreakdown)> {
    profile.validate()?;

    let shares = EnergyShares::of(profile);
    let protein = protein_score(profile, shares, config);
    let fiber = fiber_score(profile, config);
    let sodium = sodium_score(profile, config);
    let potassium = potassium_score(profile, config);
    let macro_balance = macro_balance_score(shares, config);

    let w = &config.weights;
    let total = w
        .macro_balance
        .mul_add(
            macro_balance,
            w.potassium.mul_add(
                potassium,
                w.sodium
                    .mul_add(sodium, w.fiber.mul_add(fiber, w.protein * protein)),
            ),
        )
        .clamp(0.0, MAX_SCORE);

    let grade = grade_for_score(total, &config.grades);
    let feedback = build_feedback(
        grade,
        &[
            ("protein", protein),
            ("fiber", fiber),
            ("sodium", sodium),
            ("potassium", potassium),
            ("macronutrient balance", macro_balance),
        ],
        config,
    );

    debug!(
        calories = profile.calories,
        total_score = total,
        grade = %grade,
        "Calculated meal score"
    );

    Ok((
        grade,
        ScoreBreakdown {
            protein_score: protein,
            fiber_score: fiber,
            sodium_score: sodium,
            potassium_score: potassium,
            macro_balance_score: macro_balance,
            total_score: total,
            feedback,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(
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

    #[test]
    fn test_balanced_meal_grades_a() {
        let config = MealScoringConfig::default();
        let meal = profile(400.0, 30.0, 30.0, 18.0, 12.0, 400.0, 600.0);
        let (grade, breakdown) = calculate_meal_score(&meal, &config).unwrap();
        assert_eq!(grade, ScoreGrade::A);
        assert!((breakdown.total_score - 97.25).abs() < 0.01);
        assert!((breakdown.protein_score - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_salty_fatty_meal_grades_e() {
        let config = MealScoringConfig::default();
        let meal = profile(600.0, 60.0, 5.0, 40.0, 0.0, 2000.0, 50.0);
        let (grade, breakdown) = calculate_meal_score(&meal, &config).unwrap();
        assert_eq!(grade, ScoreGrade::E);
        assert!(breakdown.sodium_score.abs() < f64::EPSILON);
        assert!(breakdown.feedback.contains("fiber"));
        assert!(breakdown.feedback.contains("sodium"));
    }

    #[test]
    fn test_average_meal_grades_c() {
        let config = MealScoringConfig::default();
        let meal = profile(350.0, 40.0, 15.0, 15.0, 4.0, 800.0, 300.0);
        let (grade, breakdown) = calculate_meal_score(&meal, &config).unwrap();
        assert_eq!(grade, ScoreGrade::C);
        assert!((breakdown.total_score - 66.33).abs() < 0.05);
    }

    #[test]
    fn test_zero_profile_uses_absolute_fallbacks() {
        let config = MealScoringConfig::default();
        let (grade, breakdown) = calculate_meal_score(&NutrientProfile::zero(), &config).unwrap();
        assert_eq!(grade, ScoreGrade::E);
        assert!((breakdown.sodium_score - 100.0).abs() < f64::EPSILON);
        assert!((breakdown.macro_balance_score - 50.0).abs() < f64::EPSILON);
        assert!((breakdown.total_score - 30.0).abs() < 1e-9);
        assert!(!breakdown.feedback.is_empty());
    }

    #[test]
    fn test_hard_sodium_cap_ignores_calories() {
        let config = MealScoringConfig::default();
        let meal = profile(5000.0, 0.0, 0.0, 0.0, 0.0, 1500.0, 0.0);
        let (_, breakdown) = calculate_meal_score(&meal, &config).unwrap();
        assert!(breakdown.sodium_score.abs() < f64::EPSILON);
    }

    #[test]
    fn test_negative_nutrient_rejected() {
        let config = MealScoringConfig::default();
        let meal = profile(400.0, -1.0, 30.0, 18.0, 12.0, 400.0, 600.0);
        assert!(calculate_meal_score(&meal, &config).is_err());
    }

    #[test]
    fn test_grade_breakpoints_are_inclusive() {
        let breakpoints = GradeBreakpoints::default();
        assert_eq!(grade_for_score(85.0, &breakpoints), ScoreGrade::A);
        assert_eq!(grade_for_score(84.99, &breakpoints), ScoreGrade::B);
        assert_eq!(grade_for_score(70.0, &breakpoints), ScoreGrade::B);
        assert_eq!(grade_for_score(55.0, &breakpoints), ScoreGrade::C);
        assert_eq!(grade_for_score(40.0, &breakpoints), ScoreGrade::D);
        assert_eq!(grade_for_score(39.9, &breakpoints), ScoreGrade::E);
    }

    #[test]
    fn test_well_balanced_feedback_when_nothing_is_weak() {
        let config = MealScoringConfig::default();
        let meal = profile(400.0, 40.0, 30.0, 12.0, 12.0, 300.0, 700.0);
        let (grade, breakdown) = calculate_meal_score(&meal, &config).unwrap();
        assert_eq!(grade, ScoreGrade::A);
        assert!(breakdown.feedback.contains("well balanced"));
    }
}
