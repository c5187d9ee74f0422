// ABOUTME: Looks up replacement ingredients for violations in the substitution table
// ABOUTME: Pure, deterministic lookup keyed by violating ingredient and violation source
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::reference_data::DietaryReferenceData;
use welltrack_core::models::{Substitution, SubstitutionPlan, Violation};

/// Build a substitution plan for a list of violations.
///
/// Each violating ingredient appears once, in order of its first violation.
/// Candidates from several violations of the same ingredient are merged in
/// first-seen order without duplicates. An ingredient with no table entry
/// maps to an empty list; nothing outside the table is ever suggested.
#[must_use]
pub fn suggest_substitutions(
    violations: &[Violation],
    reference: &dyn DietaryReferenceData,
) -> SubstitutionPlan {
    let mut entries: Vec<Substitution> = Vec::new();

    for violation in violations {
        let existing = entries
            .iter()
            .position(|s| s.original == violation.ingredient);
        let index = match existing {
            Some(index) => index,
            None => {
                entries.push(Substitution {
                    original: violation.ingredient.clone(),
                    candidates: Vec::new(),
                });
                entries.len() - 1
            }
        };

        if let Some(candidates) = reference.substitutes(&violation.ingredient, &violation.source) {
            let entry = &mut entries[index];
            for candidate in candidates {
                if !entry.candidates.contains(candidate) {
                    entry.candidates.push(candidate.clone());
                }
            }
        }
    }

    SubstitutionPlan::from_entries(entries)
}
