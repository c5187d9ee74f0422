// ABOUTME: Main library entry point for the WellTrack dietary engine
// ABOUTME: Wires the scoring and compatibility engine to profile lookups, logging, and the CLI
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # `WellTrack`
//!
//! Nutrition scoring and dietary compatibility for recipes and meals.
//!
//! ## Architecture
//!
//! - **`welltrack-core`**: error types and the nutrition, dietary, and recipe models
//! - **`welltrack-intelligence`**: the pure engine (meal grades, restriction
//!   matching, compatibility verdicts, substitutions, batch filtering)
//! - **this crate**: the [`services::DietaryEngine`] facade that resolves user
//!   profiles through a provider port, structured logging, and `welltrack-cli`
//!
//! ## Example Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use uuid::Uuid;
//! use welltrack::services::{DietaryEngine, InMemoryProfileProvider};
//! use welltrack_core::models::{DietaryProfile, FilterCriteria, RecipeInput};
//! use welltrack_intelligence::dietary::StaticReferenceData;
//! use welltrack_intelligence::IntelligenceConfig;
//!
//! let user_id = Uuid::new_v4();
//! let provider = InMemoryProfileProvider::default().with_profile(DietaryProfile::new(user_id));
//!
//! let engine = DietaryEngine::new(
//!     provider,
//!     Arc::new(StaticReferenceData::standard()),
//!     IntelligenceConfig::default(),
//! );
//! let recipe = RecipeInput::from_names("toast", ["bread", "butter"]);
//! let check = engine
//!     .check_recipe(user_id, &recipe, &FilterCriteria::default())
//!     .unwrap();
//! assert!(check.compatibility.is_compatible);
//! ```

/// Structured logging setup
pub mod logging;
/// Engine facade and profile provider port
pub mod services;

pub use welltrack_core::errors::{AppError, AppResult, ErrorCode};
