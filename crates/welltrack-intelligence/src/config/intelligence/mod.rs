// ABOUTME: Engine configuration for meal scoring, dietary compatibility, and batch filtering
// ABOUTME: Orchestrates domain-specific configs and provides unified validation and loading
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Intelligence Configuration Module
//!
//! Provides validated configuration for the nutrition scoring and dietary
//! compatibility engine.
//!
//! # Module Structure
//!
//! - `meal_scoring` - Sub-score thresholds, weights, and grade breakpoints
//! - `dietary` - Severity weights for compatibility and batch pool sizing
//! - `error` - Validation and environment parsing errors

pub mod dietary;
pub mod error;
pub mod meal_scoring;

pub use dietary::{BatchConfig, CompatibilityConfig};
pub use error::ConfigError;
pub use meal_scoring::{
    FeedbackConfig, GradeBreakpoints, MacroBalanceConfig, MealScoringConfig, NutrientThresholds,
    ScoreWeights,
};

use serde::{Deserialize, Serialize};
use std::env;
use std::marker::PhantomData;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::warn;

/// Global configuration singleton
static INTELLIGENCE_CONFIG: OnceLock<IntelligenceConfig<true>> = OnceLock::new();

/// Main engine configuration container
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntelligenceConfig<const VALIDATED: bool = false> {
    /// Meal score calculation
    pub meal_scoring: MealScoringConfig,
    /// Compatibility scoring
    pub compatibility: CompatibilityConfig,
    /// Batch filtering
    pub batch: BatchConfig,
    #[serde(skip)]
    _phantom: PhantomData<()>,
}

impl IntelligenceConfig<true> {
    /// Get the global configuration instance
    pub fn global() -> &'static Self {
        INTELLIGENCE_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                warn!("Failed to load intelligence config: {e}, using defaults");
                Self::default()
            })
        })
    }

    /// Load configuration from environment
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values or validation fails
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate every section
    ///
    /// # Errors
    ///
    /// Returns the first section error found
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.meal_scoring.validate()?;
        self.compatibility.validate()?;
        self.batch.validate()
    }

    /// Helper function to parse and apply an environment variable override
    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        if let Ok(val) = env::var(env_var_name) {
            *target = val
                .parse()
                .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}")))?;
        }
        Ok(())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        // Meal scoring weights
        let weights = &mut self.meal_scoring.weights;
        Self::apply_env_var("WELLTRACK_SCORE_WEIGHT_PROTEIN", &mut weights.protein)?;
        Self::apply_env_var("WELLTRACK_SCORE_WEIGHT_FIBER", &mut weights.fiber)?;
        Self::apply_env_var("WELLTRACK_SCORE_WEIGHT_SODIUM", &mut weights.sodium)?;
        Self::apply_env_var("WELLTRACK_SCORE_WEIGHT_POTASSIUM", &mut weights.potassium)?;
        Self::apply_env_var(
            "WELLTRACK_SCORE_WEIGHT_MACRO_BALANCE",
            &mut weights.macro_balance,
        )?;

        // Nutrient thresholds
        let thresholds = &mut self.meal_scoring.thresholds;
        Self::apply_env_var(
            "WELLTRACK_SCORE_SODIUM_HARD_CAP_MG",
            &mut thresholds.sodium_hard_cap_mg,
        )?;
        Self::apply_env_var(
            "WELLTRACK_SCORE_POTASSIUM_TARGET_MG",
            &mut thresholds.potassium_target_mg,
        )?;
        Self::apply_env_var(
            "WELLTRACK_SCORE_FIBER_TARGET_PER_1000_KCAL",
            &mut thresholds.fiber_target_g_per_1000_kcal,
        )?;

        // Grade breakpoints
        let grades = &mut self.meal_scoring.grades;
        Self::apply_env_var("WELLTRACK_GRADE_A_MIN", &mut grades.a)?;
        Self::apply_env_var("WELLTRACK_GRADE_B_MIN", &mut grades.b)?;
        Self::apply_env_var("WELLTRACK_GRADE_C_MIN", &mut grades.c)?;
        Self::apply_env_var("WELLTRACK_GRADE_D_MIN", &mut grades.d)?;

        // Compatibility
        Self::apply_env_var(
            "WELLTRACK_COMPAT_DEFAULT_MIN_SCORE",
            &mut self.compatibility.default_min_score,
        )?;
        Self::apply_env_var(
            "WELLTRACK_COMPAT_MILD_PENALTY_CAP",
            &mut self.compatibility.mild_penalty_cap,
        )?;

        // Batch
        Self::apply_env_var("WELLTRACK_BATCH_MAX_WORKERS", &mut self.batch.max_workers)?;
        Self::apply_env_var("WELLTRACK_BATCH_TOP_N", &mut self.batch.top_n)?;

        Ok(self)
    }
}

impl Default for IntelligenceConfig<true> {
    fn default() -> Self {
        Self {
            meal_scoring: MealScoringConfig::default(),
            compatibility: CompatibilityConfig::default(),
            batch: BatchConfig::default(),
            _phantom: PhantomData,
        }
    }
}
