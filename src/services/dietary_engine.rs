// ABOUTME: Engine facade resolving dietary profiles per user before scoring and filtering
// ABOUTME: Recipe import checks with substitutions and batch filtering over a shared reference table
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;
use welltrack_core::errors::{AppError, AppResult};
use welltrack_core::models::{
    DietaryCompatibility, DietaryProfile, FilterCriteria, NutrientProfile, RecipeInput,
    ScoreBreakdown, ScoreGrade, SubstitutionPlan,
};
use welltrack_intelligence::dietary::{
    evaluate_recipe, process_batch, suggest_substitutions, BatchReport, BatchRequest,
    DietaryReferenceData, StaticReferenceData,
};
use welltrack_intelligence::{calculate_meal_score, IntelligenceConfig};

/// Read-only access to stored dietary profiles
pub trait DietaryProfileProvider: Send + Sync {
    /// Profile snapshot for a user, `None` when the user has none
    fn profile(&self, user_id: Uuid) -> Option<DietaryProfile>;
}

/// Profiles held in memory, keyed by user
#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileProvider {
    profiles: HashMap<Uuid, DietaryProfile>,
}

impl InMemoryProfileProvider {
    /// Store or replace a profile
    pub fn insert(&mut self, profile: DietaryProfile) {
        self.profiles.insert(profile.user_id, profile);
    }

    /// Builder form of [`Self::insert`]
    #[must_use]
    pub fn with_profile(mut self, profile: DietaryProfile) -> Self {
        self.insert(profile);
        self
    }

    /// Number of stored profiles
    #[must_use]
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Whether no profile is stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl DietaryProfileProvider for InMemoryProfileProvider {
    fn profile(&self, user_id: Uuid) -> Option<DietaryProfile> {
        self.profiles.get(&user_id).cloned()
    }
}

/// Result of checking one recipe before it is imported
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeCheck {
    /// Full verdict
    pub compatibility: DietaryCompatibility,
    /// Suggested replacements; empty when the recipe is already compatible
    pub substitutions: SubstitutionPlan,
    /// False only when a medical-severity violation is present
    pub can_import: bool,
}

/// Scoring and compatibility operations for stored users
pub struct DietaryEngine<P> {
    profiles: P,
    reference: Arc<dyn DietaryReferenceData>,
    config: IntelligenceConfig<true>,
}

impl<P: DietaryProfileProvider> DietaryEngine<P> {
    /// Engine over explicit tables and configuration
    #[must_use]
    pub fn new(
        profiles: P,
        reference: Arc<dyn DietaryReferenceData>,
        config: IntelligenceConfig<true>,
    ) -> Self {
        Self {
            profiles,
            reference,
            config,
        }
    }

    /// Engine over the built-in tables and the process-wide configuration
    #[must_use]
    pub fn with_standard_tables(profiles: P) -> Self {
        Self::new(
            profiles,
            Arc::new(StaticReferenceData::standard()),
            IntelligenceConfig::global().clone(),
        )
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &IntelligenceConfig<true> {
        &self.config
    }

    /// Resolve and validate a user's profile
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when the provider has no profile for the user
    /// and `InvalidInput` when the stored profile is malformed
    pub fn profile_for(&self, user_id: Uuid) -> AppResult<DietaryProfile> {
        let profile = self
            .profiles
            .profile(user_id)
            .ok_or_else(|| AppError::profile_unavailable(user_id))?;
        profile.validate()?;
        Ok(profile)
    }

    /// Grade a meal's nutrient totals
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for negative or non-finite nutrient values
    pub fn score_meal(
        &self,
        nutrients: &NutrientProfile,
    ) -> AppResult<(ScoreGrade, ScoreBreakdown)> {
        calculate_meal_score(nutrients, &self.config.meal_scoring)
    }

    /// Check one recipe for a user, suggesting substitutions when it fails
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown user, and the evaluation
    /// errors of [`evaluate_recipe`] for malformed recipes or criteria
    pub fn check_recipe(
        &self,
        user_id: Uuid,
        recipe: &RecipeInput,
        criteria: &FilterCriteria,
    ) -> AppResult<RecipeCheck> {
        let profile = self.profile_for(user_id)?;
        let compatibility = evaluate_recipe(
            recipe,
            &profile,
            criteria,
            self.reference.as_ref(),
            &self.config.compatibility,
        )?;

        let substitutions = if compatibility.is_compatible {
            SubstitutionPlan::default()
        } else {
            suggest_substitutions(&compatibility.violations, self.reference.as_ref())
        };
        let can_import = !compatibility.has_medical_violation();

        debug!(
            %user_id,
            recipe_id = %recipe.id,
            score = compatibility.score,
            can_import,
            "Checked recipe"
        );

        Ok(RecipeCheck {
            compatibility,
            substitutions,
            can_import,
        })
    }

    /// Filter a batch of recipes for a user
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown user, and the request
    /// errors of [`process_batch`]; individual recipes never fail the call
    pub fn filter_recipes(
        &self,
        user_id: Uuid,
        recipes: &[RecipeInput],
        request: &BatchRequest,
    ) -> AppResult<BatchReport> {
        let profile = self.profile_for(user_id)?;
        let report = process_batch(
            recipes,
            &profile,
            request,
            self.reference.as_ref(),
            &self.config,
        )?;
        info!(
            %user_id,
            total = report.summary.total_recipes,
            rate = report.summary.compatibility_rate(),
            "Filtered recipes for user"
        );
        Ok(report)
    }
}
