// ABOUTME: Dietary compatibility and batch filtering configuration
// ABOUTME: Severity penalty weights, default minimum score, worker pool size, and report sizes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::thread;
use welltrack_core::models::{RestrictionSeverity, DEFAULT_MIN_COMPATIBILITY_SCORE};

/// Upper bound on the default batch worker count
const MAX_DEFAULT_WORKERS: usize = 8;

/// Ceiling on the combined penalty of mild violations
const DEFAULT_MILD_PENALTY_CAP: f64 = 0.2;

const fn default_mild_penalty_cap() -> f64 {
    DEFAULT_MILD_PENALTY_CAP
}

/// Compatibility scoring configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompatibilityConfig {
    /// Penalty for a mild violation
    pub mild_weight: f64,
    /// Penalty for a moderate violation
    pub moderate_weight: f64,
    /// Penalty for a strict violation
    pub strict_weight: f64,
    /// Penalty for a medical violation
    pub medical_weight: f64,
    /// Most that mild violations can subtract, however many there are
    #[serde(default = "default_mild_penalty_cap")]
    pub mild_penalty_cap: f64,
    /// Minimum score used when callers do not supply criteria
    pub default_min_score: f64,
}

impl Default for CompatibilityConfig {
    fn default() -> Self {
        Self {
            mild_weight: 0.1,
            moderate_weight: 0.3,
            strict_weight: 0.6,
            medical_weight: 1.0,
            mild_penalty_cap: DEFAULT_MILD_PENALTY_CAP,
            default_min_score: DEFAULT_MIN_COMPATIBILITY_SCORE,
        }
    }
}

impl CompatibilityConfig {
    /// Penalty weight for a severity
    #[must_use]
    pub const fn weight_for(&self, severity: RestrictionSeverity) -> f64 {
        match severity {
            RestrictionSeverity::Mild => self.mild_weight,
            RestrictionSeverity::Moderate => self.moderate_weight,
            RestrictionSeverity::Strict => self.strict_weight,
            RestrictionSeverity::Medical => self.medical_weight,
        }
    }

    /// Validate weights and default score
    ///
    /// # Errors
    ///
    /// Returns an error if weights are not strictly increasing within (0, 1],
    /// or the mild cap is below one mild weight or above 1
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.mild_weight > 0.0
            && self.mild_weight < self.moderate_weight
            && self.moderate_weight < self.strict_weight
            && self.strict_weight < self.medical_weight
            && self.medical_weight <= 1.0)
        {
            return Err(ConfigError::InvalidWeights(
                "Severity weights must be strictly increasing within (0, 1]",
            ));
        }
        if !(self.mild_weight..=1.0).contains(&self.mild_penalty_cap) {
            return Err(ConfigError::ValueOutOfRange(
                "mild_penalty_cap must be within [mild_weight, 1]",
            ));
        }
        if !(0.0..=1.0).contains(&self.default_min_score) {
            return Err(ConfigError::ValueOutOfRange(
                "default_min_score must be within [0, 1]",
            ));
        }
        Ok(())
    }
}

/// Batch filtering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Worker threads in the batch pool
    pub max_workers: usize,
    /// Entries kept in each most-common list of the summary
    pub top_n: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        let cpus = thread::available_parallelism().map_or(1, NonZeroUsize::get);
        Self {
            max_workers: cpus.min(MAX_DEFAULT_WORKERS),
            top_n: 5,
        }
    }
}

impl BatchConfig {
    /// Validate pool and report sizes
    ///
    /// # Errors
    ///
    /// Returns an error if either size is zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_workers == 0 {
            return Err(ConfigError::ValueOutOfRange("max_workers must be at least 1"));
        }
        if self.top_n == 0 {
            return Err(ConfigError::ValueOutOfRange("top_n must be at least 1"));
        }
        Ok(())
    }
}
