// ABOUTME: Configuration module for welltrack-intelligence crate
// ABOUTME: Re-exports engine configuration types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Engine configuration (meal scoring, compatibility, batch filtering)
pub mod intelligence;

pub use intelligence::{
    BatchConfig, CompatibilityConfig, ConfigError, GradeBreakpoints, IntelligenceConfig,
    MealScoringConfig,
};
