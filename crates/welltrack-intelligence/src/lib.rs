// ABOUTME: Nutrition scoring and dietary compatibility engine
// ABOUTME: Meal grading, restriction matching, compatibility scoring, substitutions, and batch filtering
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # `WellTrack` Intelligence
//!
//! Pure, synchronous computation over data supplied by collaborators:
//!
//! - [`meal_scoring`] grades a meal's nutrient totals from `A` to `E`
//! - [`dietary`] checks recipes against a dietary profile, suggests
//!   substitutions, and filters recipe batches in parallel
//!
//! No function here performs I/O. Lookup tables are injected through
//! [`dietary::DietaryReferenceData`] and thresholds through
//! [`config::IntelligenceConfig`].

#![deny(unsafe_code)]

/// Engine configuration
pub mod config;
/// Dietary compatibility engine
pub mod dietary;
/// Meal score calculator
pub mod meal_scoring;

pub use config::IntelligenceConfig;
pub use meal_scoring::{calculate_meal_score, grade_for_score};
