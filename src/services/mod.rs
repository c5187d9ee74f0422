// ABOUTME: Domain service layer binding the dietary engine to its collaborators
// ABOUTME: Profile lookup port plus the engine facade used by the CLI and embedding callers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer
//!
//! The engine crates are pure functions over data they are handed. This layer
//! resolves a user's dietary profile through a [`DietaryProfileProvider`] and
//! passes it, the reference tables, and the validated configuration along.

/// Meal scoring, recipe checks, and batch filtering for a user
pub mod dietary_engine;

pub use dietary_engine::{
    DietaryEngine, DietaryProfileProvider, InMemoryProfileProvider, RecipeCheck,
};
