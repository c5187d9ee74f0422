// ABOUTME: Matches one ingredient against a dietary profile's active restrictions and allergies
// ABOUTME: Produces severity-tagged violations and non-blocking preference warnings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::reference_data::DietaryReferenceData;
use welltrack_core::errors::{AppError, AppResult};
use welltrack_core::models::{
    normalize_name, DietaryProfile, DietaryWarning, PreferenceLevel, Violation, ViolationSource,
};

/// Find every violation one ingredient triggers.
///
/// Allergies are checked before restrictions, each in profile order. Every
/// matching active entry yields exactly one violation. An allergy matches
/// when the ingredient contains the allergen itself or any keyword of the
/// allergen's group.
///
/// # Errors
///
/// Returns `InvalidInput` when the ingredient name is blank
pub fn match_ingredient(
    ingredient: &str,
    profile: &DietaryProfile,
    reference: &dyn DietaryReferenceData,
) -> AppResult<Vec<Violation>> {
    let ingredient = normalize_name(ingredient);
    if ingredient.is_empty() {
        return Err(AppError::invalid_input("ingredient name must not be blank"));
    }

    let mut violations = Vec::new();

    for allergy in profile.active_allergies() {
        let triggered = reference.resolve_allergen(&allergy.allergen).map_or_else(
            || ingredient.contains(allergy.allergen.as_str()),
            |group| {
                group
                    .rule
                    .matches_with_extra(&ingredient, Some(allergy.allergen.as_str()))
            },
        );
        if triggered {
            violations.push(Violation {
                source: ViolationSource::Allergy(allergy.allergen.clone()),
                ingredient: ingredient.clone(),
                severity: allergy.severity.to_restriction_severity(),
                description: format!(
                    "Contains allergen: {} ({})",
                    allergy.allergen,
                    allergy.severity.label()
                ),
            });
        }
    }

    for restriction in profile.active_restrictions() {
        let rule = reference.restriction_exclusions(restriction.restriction_type);
        if rule.matches(&ingredient) {
            violations.push(Violation {
                source: ViolationSource::Restriction(restriction.restriction_type),
                ingredient: ingredient.clone(),
                severity: restriction.severity,
                description: format!(
                    "Violates {} restriction ({})",
                    restriction.restriction_type.display_name(),
                    restriction.severity
                ),
            });
        }
    }

    Ok(violations)
}

/// Warnings for disliked items contained in an ingredient
#[must_use]
pub fn match_preferences(ingredient: &str, profile: &DietaryProfile) -> Vec<DietaryWarning> {
    let ingredient = normalize_name(ingredient);
    profile
        .preferences()
        .iter()
        .filter(|p| p.level == PreferenceLevel::Dislike && ingredient.contains(p.item.as_str()))
        .map(|p| DietaryWarning {
            ingredient: ingredient.clone(),
            item: p.item.clone(),
            description: format!("Contains disliked ingredient: {}", p.item),
        })
        .collect()
}
