// ABOUTME: Dietary compatibility engine: matching, evaluation, substitution, and batch filtering
// ABOUTME: Re-exports the public operations and result types of each stage
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Batch filtering with aggregate statistics
pub mod batch;
/// Severity-weighted compatibility verdicts
pub mod compatibility;
/// Lookup tables port and built-in tables
pub mod reference_data;
/// Per-ingredient restriction and allergy matching
pub mod restriction_matcher;
/// Substitution lookup
pub mod substitution;

pub use batch::{
    process_batch, BatchReport, BatchRequest, BatchSummary, ProcessedRecipe, StatusCounts,
};
pub use compatibility::{compatibility_score, evaluate_compatibility, evaluate_recipe};
pub use reference_data::{
    AllergenGroup, DietaryReferenceData, KeywordRule, StaticReferenceData, SubstitutionEntry,
};
pub use restriction_matcher::{match_ingredient, match_preferences};
pub use substitution::suggest_substitutions;
