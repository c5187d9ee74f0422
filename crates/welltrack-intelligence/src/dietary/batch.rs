// ABOUTME: Batch recipe filtering with per-recipe failure isolation and aggregate statistics
// ABOUTME: Bounded rayon pool, deadline-based time budget, and fold/reduce summary tallies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Batch Filter Aggregator
//!
//! Every recipe ends in exactly one [`ProcessingStatus`]. A failing recipe
//! becomes `ProcessingError` and the batch carries on, so the status counts
//! of a [`BatchSummary`] always add up to the number of input recipes.
//!
//! Recipes are evaluated concurrently on a dedicated pool sized by
//! `batch.max_workers`. Aggregation folds per-thread `BatchTally` partials
//! and merges them; the merge is commutative and associative, so the result
//! does not depend on scheduling.

use super::compatibility::evaluate_recipe;
use super::reference_data::DietaryReferenceData;
use super::substitution::suggest_substitutions;
use crate::config::intelligence::IntelligenceConfig;
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::{info, warn};
use welltrack_core::errors::{AppError, AppResult};
use welltrack_core::models::{
    DietaryCompatibility, DietaryProfile, FilterCriteria, ProcessingStatus, RecipeInput,
    SubstitutionPlan,
};

/// Options for one batch run
#[derive(Debug, Clone, Default)]
pub struct BatchRequest {
    /// Thresholds applied to every recipe
    pub criteria: FilterCriteria,
    /// Whether to look up substitutions for incompatible recipes
    pub include_substitutions: bool,
    /// Wall-clock budget; recipes not started in time become `ProcessingError`
    pub time_budget: Option<Duration>,
}

impl BatchRequest {
    /// Request with the given criteria and no substitutions or budget
    #[must_use]
    pub const fn new(criteria: FilterCriteria) -> Self {
        Self {
            criteria,
            include_substitutions: false,
            time_budget: None,
        }
    }

    /// Enable substitution lookup
    #[must_use]
    pub const fn with_substitutions(mut self) -> Self {
        self.include_substitutions = true;
        self
    }

    /// Bound the run by a time budget
    #[must_use]
    pub const fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = Some(budget);
        self
    }
}

/// Outcome for one recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedRecipe {
    /// Input recipe identifier
    pub recipe_id: String,
    /// Terminal classification
    pub status: ProcessingStatus,
    /// Verdict, absent when processing failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compatibility: Option<DietaryCompatibility>,
    /// Substitutions, empty unless requested and the recipe was incompatible
    #[serde(default)]
    pub substitutions: SubstitutionPlan,
    /// Failure reason for `ProcessingError`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProcessedRecipe {
    fn failed(recipe_id: &str, error: &AppError) -> Self {
        Self {
            recipe_id: recipe_id.to_owned(),
            status: ProcessingStatus::ProcessingError,
            compatibility: None,
            substitutions: SubstitutionPlan::default(),
            error: Some(error.message.clone()),
        }
    }
}

/// Recipe count per status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusCounts {
    /// Compatible as written
    pub compatible: usize,
    /// Incompatible, but substitutions exist
    pub compatible_with_substitutions: usize,
    /// Incompatible with a medical violation
    pub incompatible_major: usize,
    /// Incompatible without medical violations
    pub incompatible_minor: usize,
    /// Failed or timed out
    pub processing_error: usize,
}

impl StatusCounts {
    fn from_array(counts: [usize; 5]) -> Self {
        let [
            compatible,
            compatible_with_substitutions,
            incompatible_major,
            incompatible_minor,
            processing_error,
        ] = counts;
        Self {
            compatible,
            compatible_with_substitutions,
            incompatible_major,
            incompatible_minor,
            processing_error,
        }
    }

    /// Count for one status
    #[must_use]
    pub const fn get(&self, status: ProcessingStatus) -> usize {
        match status {
            ProcessingStatus::Compatible => self.compatible,
            ProcessingStatus::CompatibleWithSubstitutions => self.compatible_with_substitutions,
            ProcessingStatus::IncompatibleMajor => self.incompatible_major,
            ProcessingStatus::IncompatibleMinor => self.incompatible_minor,
            ProcessingStatus::ProcessingError => self.processing_error,
        }
    }

    /// Sum over all statuses
    #[must_use]
    pub const fn total(&self) -> usize {
        self.compatible
            + self.compatible_with_substitutions
            + self.incompatible_major
            + self.incompatible_minor
            + self.processing_error
    }
}

/// Aggregate statistics for a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Number of input recipes
    pub total_recipes: usize,
    /// Per-status counts, summing to `total_recipes`
    pub status_counts: StatusCounts,
    /// Most frequent violation descriptions, most common first
    pub most_common_violations: Vec<String>,
    /// Most frequent ingredients with substitution candidates, most common first
    pub most_common_substitutions: Vec<String>,
}

impl BatchSummary {
    /// Share of recipes compatible as written; zero for an empty batch
    #[must_use]
    pub fn compatibility_rate(&self) -> f64 {
        if self.total_recipes == 0 {
            return 0.0;
        }
        self.status_counts.compatible as f64 / self.total_recipes as f64
    }
}

/// Per-recipe outcomes in input order plus the summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    /// One entry per input recipe, same order
    pub processed: Vec<ProcessedRecipe>,
    /// Aggregate statistics
    pub summary: BatchSummary,
}

/// Occurrence count with the earliest (recipe index, position) it was seen at
#[derive(Debug, Clone, Copy)]
struct Frequency {
    count: usize,
    first_seen: (usize, usize),
}

impl Frequency {
    fn merge(self, other: Self) -> Self {
        Self {
            count: self.count + other.count,
            first_seen: self.first_seen.min(other.first_seen),
        }
    }
}

/// Partial aggregate over a subset of recipes
#[derive(Debug, Default)]
struct BatchTally {
    status_counts: [usize; 5],
    violations: HashMap<String, Frequency>,
    substitutions: HashMap<String, Frequency>,
}

impl BatchTally {
    fn bump(table: &mut HashMap<String, Frequency>, key: &str, seen_at: (usize, usize)) {
        let occurrence = Frequency {
            count: 1,
            first_seen: seen_at,
        };
        table
            .entry(key.to_owned())
            .and_modify(|existing| *existing = existing.merge(occurrence))
            .or_insert(occurrence);
    }

    fn record(
        mut self,
        index: usize,
        recipe: &ProcessedRecipe,
        include_substitutions: bool,
    ) -> Self {
        self.status_counts[recipe.status.index()] += 1;

        if let Some(compatibility) = &recipe.compatibility {
            for (position, violation) in compatibility.violations.iter().enumerate() {
                Self::bump(
                    &mut self.violations,
                    &violation.description,
                    (index, position),
                );
            }
        }

        if include_substitutions {
            for (position, substitution) in recipe
                .substitutions
                .entries()
                .iter()
                .filter(|s| !s.candidates.is_empty())
                .enumerate()
            {
                Self::bump(
                    &mut self.substitutions,
                    &substitution.original,
                    (index, position),
                );
            }
        }

        self
    }

    fn merge(mut self, other: Self) -> Self {
        for (slot, count) in self.status_counts.iter_mut().zip(other.status_counts) {
            *slot += count;
        }
        for (table, incoming) in [
            (&mut self.violations, other.violations),
            (&mut self.substitutions, other.substitutions),
        ] {
            for (key, frequency) in incoming {
                table
                    .entry(key)
                    .and_modify(|existing| *existing = existing.merge(frequency))
                    .or_insert(frequency);
            }
        }
        self
    }

    /// Top `n` keys by count, ties broken by first-seen position
    fn top(table: HashMap<String, Frequency>, n: usize) -> Vec<String> {
        let mut ranked: Vec<(String, Frequency)> = table.into_iter().collect();
        ranked.sort_by(|(_, a), (_, b)| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.first_seen.cmp(&b.first_seen))
        });
        ranked.into_iter().take(n).map(|(key, _)| key).collect()
    }

    fn into_summary(self, total_recipes: usize, top_n: usize) -> BatchSummary {
        BatchSummary {
            total_recipes,
            status_counts: StatusCounts::from_array(self.status_counts),
            most_common_violations: Self::top(self.violations, top_n),
            most_common_substitutions: Self::top(self.substitutions, top_n),
        }
    }
}

/// Evaluate and classify one recipe; never fails
fn process_recipe(
    recipe: &RecipeInput,
    profile: &DietaryProfile,
    request: &BatchRequest,
    reference: &dyn DietaryReferenceData,
    config: &IntelligenceConfig<true>,
) -> ProcessedRecipe {
    let compatibility = match evaluate_recipe(
        recipe,
        profile,
        &request.criteria,
        reference,
        &config.compatibility,
    ) {
        Ok(compatibility) => compatibility,
        Err(error) => {
            warn!(recipe_id = %recipe.id, error = %error, "Recipe evaluation failed");
            return ProcessedRecipe::failed(&recipe.id, &error);
        }
    };

    if compatibility.is_compatible {
        return ProcessedRecipe {
            recipe_id: recipe.id.clone(),
            status: ProcessingStatus::Compatible,
            compatibility: Some(compatibility),
            substitutions: SubstitutionPlan::default(),
            error: None,
        };
    }

    let substitutions = if request.include_substitutions {
        suggest_substitutions(&compatibility.violations, reference)
    } else {
        SubstitutionPlan::default()
    };

    let status = if substitutions.has_candidates() {
        ProcessingStatus::CompatibleWithSubstitutions
    } else if compatibility.has_medical_violation() {
        ProcessingStatus::IncompatibleMajor
    } else {
        ProcessingStatus::IncompatibleMinor
    };

    ProcessedRecipe {
        recipe_id: recipe.id.clone(),
        status,
        compatibility: Some(compatibility),
        substitutions,
        error: None,
    }
}

/// Filter a batch of recipes against one profile.
///
/// # Errors
///
/// Fails as a whole only for an invalid request (criteria out of range) or
/// when the worker pool cannot be created. Individual recipe failures are
/// reported as `ProcessingError` entries instead.
pub fn process_batch(
    recipes: &[RecipeInput],
    profile: &DietaryProfile,
    request: &BatchRequest,
    reference: &dyn DietaryReferenceData,
    config: &IntelligenceConfig<true>,
) -> AppResult<BatchReport> {
    request.criteria.validate()?;

    let started = Instant::now();
    let deadline = request.time_budget.map(|budget| started + budget);

    let pool = ThreadPoolBuilder::new()
        .num_threads(config.batch.max_workers)
        .thread_name(|index| format!("welltrack-batch-{index}"))
        .build()
        .map_err(|e| AppError::internal("Failed to build batch worker pool").with_source(e))?;

    let processed: Vec<ProcessedRecipe> = pool.install(|| {
        recipes
            .par_iter()
            .map(|recipe| {
                if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                    warn!(recipe_id = %recipe.id, "Time budget exhausted before evaluation");
                    return ProcessedRecipe::failed(&recipe.id, &AppError::processing_timeout());
                }
                process_recipe(recipe, profile, request, reference, config)
            })
            .collect()
    });

    let include_substitutions = request.include_substitutions;
    let tally = processed
        .par_iter()
        .enumerate()
        .fold(BatchTally::default, |tally, (index, recipe)| {
            tally.record(index, recipe, include_substitutions)
        })
        .reduce(BatchTally::default, BatchTally::merge);

    let summary = tally.into_summary(recipes.len(), config.batch.top_n);

    info!(
        total = summary.total_recipes,
        compatible = summary.status_counts.compatible,
        with_substitutions = summary.status_counts.compatible_with_substitutions,
        errors = summary.status_counts.processing_error,
        elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        "Batch dietary filtering complete"
    );

    Ok(BatchReport { processed, summary })
}
