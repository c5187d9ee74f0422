// ABOUTME: Input loading and output helpers for welltrack-cli
// ABOUTME: JSON file reading, engine construction, and pretty-printed results
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::{anyhow, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;
use welltrack::services::{DietaryEngine, InMemoryProfileProvider};
use welltrack_core::models::{DietaryProfile, FilterCriteria};
use welltrack_intelligence::dietary::{DietaryReferenceData, StaticReferenceData};
use welltrack_intelligence::IntelligenceConfig;

/// Reference tables and configuration shared by every command
pub struct EngineContext {
    reference: Arc<dyn DietaryReferenceData>,
    config: IntelligenceConfig<true>,
}

impl EngineContext {
    /// Load configuration from the environment and tables from `reference` or the built-ins
    pub fn load(reference: Option<&Path>) -> Result<Self> {
        let config = IntelligenceConfig::load()?;
        let reference: Arc<dyn DietaryReferenceData> = match reference {
            Some(path) => {
                let text = read_text(path)?;
                debug!(path = %path.display(), "Loading custom reference tables");
                Arc::new(StaticReferenceData::from_json(&text)?)
            }
            None => Arc::new(StaticReferenceData::standard()),
        };
        Ok(Self { reference, config })
    }

    /// Filter criteria with the configured default minimum score
    pub fn criteria(
        &self,
        min_score: Option<f64>,
        max_violations: Option<usize>,
    ) -> FilterCriteria {
        FilterCriteria {
            min_score: min_score.unwrap_or(self.config.compatibility.default_min_score),
            max_violations,
        }
    }

    /// Engine over this context
    pub fn engine(&self) -> DietaryEngine<InMemoryProfileProvider> {
        DietaryEngine::new(
            InMemoryProfileProvider::default(),
            Arc::clone(&self.reference),
            self.config.clone(),
        )
    }

    /// Engine that knows exactly one profile
    pub fn engine_for(&self, profile: DietaryProfile) -> DietaryEngine<InMemoryProfileProvider> {
        DietaryEngine::new(
            InMemoryProfileProvider::default().with_profile(profile),
            Arc::clone(&self.reference),
            self.config.clone(),
        )
    }
}

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| anyhow!("Failed to read {}: {e}", path.display()))
}

/// Read and deserialize a JSON file
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = read_text(path)?;
    serde_json::from_str(&text).map_err(|e| anyhow!("Invalid JSON in {}: {e}", path.display()))
}

/// Print a value as pretty JSON on stdout
pub fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
