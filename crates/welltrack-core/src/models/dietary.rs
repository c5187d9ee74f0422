// ABOUTME: Dietary profile models for restriction, allergy, and preference tracking
// ABOUTME: Severities, DietaryProfile mutation API, violations, compatibility verdicts, and substitutions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Normalize a food name for matching: trimmed, lower-case, single-spaced
#[must_use]
pub fn normalize_name(raw: &str) -> String {
    raw.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// How strictly a dietary restriction must be observed.
///
/// Ordered: `Mild < Moderate < Strict < Medical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestrictionSeverity {
    /// Flexible, occasional exceptions are fine
    Mild,
    /// Usually avoided
    Moderate,
    /// Always avoided
    Strict,
    /// Must be avoided for medical reasons
    Medical,
}

impl RestrictionSeverity {
    /// Numeric level, 1 (mild) to 4 (medical)
    #[must_use]
    pub const fn level(self) -> u8 {
        match self {
            Self::Mild => 1,
            Self::Moderate => 2,
            Self::Strict => 3,
            Self::Medical => 4,
        }
    }

    /// Lower-case label used in violation descriptions
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Mild => "mild",
            Self::Moderate => "moderate",
            Self::Strict => "strict",
            Self::Medical => "medical",
        }
    }
}

impl fmt::Display for RestrictionSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Strength of an allergic reaction, ordered in parallel with [`RestrictionSeverity`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllergySeverity {
    /// Mild discomfort
    Mild,
    /// Moderate reaction
    Moderate,
    /// Severe reaction
    Severe,
    /// Life-threatening
    Anaphylaxis,
}

impl AllergySeverity {
    /// Map onto the restriction scale level for level
    #[must_use]
    pub const fn to_restriction_severity(self) -> RestrictionSeverity {
        match self {
            Self::Mild => RestrictionSeverity::Mild,
            Self::Moderate => RestrictionSeverity::Moderate,
            Self::Severe => RestrictionSeverity::Strict,
            Self::Anaphylaxis => RestrictionSeverity::Medical,
        }
    }

    /// Lower-case label used in violation descriptions
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Mild => "mild",
            Self::Moderate => "moderate",
            Self::Severe => "severe",
            Self::Anaphylaxis => "anaphylaxis",
        }
    }
}

/// Broad family a restriction type belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestrictionCategory {
    /// Plant-based diets
    PlantBased,
    /// Medical exclusions and intolerances
    Medical,
    /// Macronutrient-focused diets
    Macronutrient,
    /// Calorie management
    Calorie,
    /// Religious or cultural practice
    Religious,
    /// Specialized eating patterns
    Specialized,
}

/// Kind of dietary restriction a user can follow
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DietaryRestrictionType {
    /// No meat, poultry, or fish
    Vegetarian,
    /// No animal products
    Vegan,
    /// Mostly vegetarian with occasional meat
    Flexitarian,
    /// Vegetarian plus fish and seafood
    Pescatarian,
    /// No gluten-containing grains
    GlutenFree,
    /// No dairy products
    DairyFree,
    /// No tree nuts or peanuts
    NutFree,
    /// No soy products
    SoyFree,
    /// No eggs or egg products
    EggFree,
    /// No shellfish or crustaceans
    ShellfishFree,
    /// Very low carb, high fat
    Keto,
    /// Reduced carbohydrate intake
    LowCarb,
    /// Increased protein intake
    HighProtein,
    /// Reduced fat intake
    LowFat,
    /// Reduced sodium intake
    LowSodium,
    /// Focused on calorie control
    CalorieConscious,
    /// Calorie deficit for weight loss
    WeightLoss,
    /// Calorie surplus for weight gain
    WeightGain,
    /// Islamic dietary laws
    Halal,
    /// Jewish dietary laws
    Kosher,
    /// Hindu dietary practices
    HinduVegetarian,
    /// Paleolithic diet principles
    Paleo,
    /// Mediterranean diet pattern
    Mediterranean,
    /// Dietary Approaches to Stop Hypertension
    Dash,
    /// 30-day elimination diet
    Whole30,
}

impl DietaryRestrictionType {
    /// Every restriction type
    pub const ALL: [Self; 25] = [
        Self::Vegetarian,
        Self::Vegan,
        Self::Flexitarian,
        Self::Pescatarian,
        Self::GlutenFree,
        Self::DairyFree,
        Self::NutFree,
        Self::SoyFree,
        Self::EggFree,
        Self::ShellfishFree,
        Self::Keto,
        Self::LowCarb,
        Self::HighProtein,
        Self::LowFat,
        Self::LowSodium,
        Self::CalorieConscious,
        Self::WeightLoss,
        Self::WeightGain,
        Self::Halal,
        Self::Kosher,
        Self::HinduVegetarian,
        Self::Paleo,
        Self::Mediterranean,
        Self::Dash,
        Self::Whole30,
    ];

    /// Human-readable name
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Vegetarian => "Vegetarian",
            Self::Vegan => "Vegan",
            Self::Flexitarian => "Flexitarian",
            Self::Pescatarian => "Pescatarian",
            Self::GlutenFree => "Gluten-Free",
            Self::DairyFree => "Dairy-Free",
            Self::NutFree => "Nut-Free",
            Self::SoyFree => "Soy-Free",
            Self::EggFree => "Egg-Free",
            Self::ShellfishFree => "Shellfish-Free",
            Self::Keto => "Ketogenic",
            Self::LowCarb => "Low Carb",
            Self::HighProtein => "High Protein",
            Self::LowFat => "Low Fat",
            Self::LowSodium => "Low Sodium",
            Self::CalorieConscious => "Calorie Conscious",
            Self::WeightLoss => "Weight Loss",
            Self::WeightGain => "Weight Gain",
            Self::Halal => "Halal",
            Self::Kosher => "Kosher",
            Self::HinduVegetarian => "Hindu Vegetarian",
            Self::Paleo => "Paleo",
            Self::Mediterranean => "Mediterranean",
            Self::Dash => "DASH",
            Self::Whole30 => "Whole30",
        }
    }

    /// Family the restriction belongs to
    #[must_use]
    pub const fn category(self) -> RestrictionCategory {
        match self {
            Self::Vegetarian | Self::Vegan | Self::Flexitarian | Self::Pescatarian => {
                RestrictionCategory::PlantBased
            }
            Self::GlutenFree
            | Self::DairyFree
            | Self::NutFree
            | Self::SoyFree
            | Self::EggFree
            | Self::ShellfishFree => RestrictionCategory::Medical,
            Self::Keto | Self::LowCarb | Self::HighProtein | Self::LowFat | Self::LowSodium => {
                RestrictionCategory::Macronutrient
            }
            Self::CalorieConscious | Self::WeightLoss | Self::WeightGain => {
                RestrictionCategory::Calorie
            }
            Self::Halal | Self::Kosher | Self::HinduVegetarian => RestrictionCategory::Religious,
            Self::Paleo | Self::Mediterranean | Self::Dash | Self::Whole30 => {
                RestrictionCategory::Specialized
            }
        }
    }
}

/// A restriction entry in a user's profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DietaryRestriction {
    /// Which diet
    pub restriction_type: DietaryRestrictionType,
    /// How strictly it is followed
    pub severity: RestrictionSeverity,
    /// Inactive entries never produce violations
    #[serde(default = "default_active")]
    pub active: bool,
}

impl DietaryRestriction {
    /// Active restriction with the given severity
    #[must_use]
    pub const fn new(
        restriction_type: DietaryRestrictionType,
        severity: RestrictionSeverity,
    ) -> Self {
        Self {
            restriction_type,
            severity,
            active: true,
        }
    }
}

/// An allergy entry in a user's profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allergy {
    /// Normalized allergen name
    pub allergen: String,
    /// Reaction strength
    pub severity: AllergySeverity,
    /// Inactive entries never produce violations
    #[serde(default = "default_active")]
    pub active: bool,
}

impl Allergy {
    /// Active allergy with a normalized allergen name
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the allergen name is blank
    pub fn new(allergen: &str, severity: AllergySeverity) -> AppResult<Self> {
        let allergen = normalize_name(allergen);
        if allergen.is_empty() {
            return Err(AppError::invalid_input("allergen name must not be blank"));
        }
        Ok(Self {
            allergen,
            severity,
            active: true,
        })
    }
}

const fn default_active() -> bool {
    true
}

/// Like or dislike of a food item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreferenceLevel {
    /// Enjoys the item
    Like,
    /// Would rather avoid the item
    Dislike,
}

/// A food preference entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preference {
    /// Normalized item name
    pub item: String,
    /// Like or dislike
    pub level: PreferenceLevel,
}

/// A user's restrictions, allergies, and preferences.
///
/// The engine only ever reads a profile; changes go through the explicit
/// add/remove methods below. Deserialized profiles pass through the same
/// methods, so allergen and preference names are always normalized and
/// duplicates are folded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DietaryProfileRecord")]
pub struct DietaryProfile {
    /// Owning user
    pub user_id: Uuid,
    #[serde(default)]
    restrictions: Vec<DietaryRestriction>,
    #[serde(default)]
    allergies: Vec<Allergy>,
    #[serde(default)]
    preferences: Vec<Preference>,
}

/// Wire shape of a profile before normalization
#[derive(Deserialize)]
struct DietaryProfileRecord {
    user_id: Uuid,
    #[serde(default)]
    restrictions: Vec<DietaryRestriction>,
    #[serde(default)]
    allergies: Vec<Allergy>,
    #[serde(default)]
    preferences: Vec<Preference>,
}

impl TryFrom<DietaryProfileRecord> for DietaryProfile {
    type Error = AppError;

    fn try_from(record: DietaryProfileRecord) -> AppResult<Self> {
        let mut profile = Self::new(record.user_id);
        for restriction in record.restrictions {
            profile.add_restriction(restriction);
        }
        for allergy in record.allergies {
            profile.add_allergy(allergy)?;
        }
        for preference in record.preferences {
            profile.add_preference(&preference.item, preference.level)?;
        }
        Ok(profile)
    }
}

impl DietaryProfile {
    /// Empty profile for a user
    #[must_use]
    pub const fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            restrictions: Vec::new(),
            allergies: Vec::new(),
            preferences: Vec::new(),
        }
    }

    /// All restrictions, active or not
    #[must_use]
    pub fn restrictions(&self) -> &[DietaryRestriction] {
        &self.restrictions
    }

    /// All allergies, active or not
    #[must_use]
    pub fn allergies(&self) -> &[Allergy] {
        &self.allergies
    }

    /// All preferences
    #[must_use]
    pub fn preferences(&self) -> &[Preference] {
        &self.preferences
    }

    /// Restrictions that currently apply
    pub fn active_restrictions(&self) -> impl Iterator<Item = &DietaryRestriction> {
        self.restrictions.iter().filter(|r| r.active)
    }

    /// Allergies that currently apply
    pub fn active_allergies(&self) -> impl Iterator<Item = &Allergy> {
        self.allergies.iter().filter(|a| a.active)
    }

    /// True when the profile has no entries of any kind
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.restrictions.is_empty() && self.allergies.is_empty() && self.preferences.is_empty()
    }

    /// Add a restriction, replacing any existing entry of the same type
    pub fn add_restriction(&mut self, restriction: DietaryRestriction) {
        match self
            .restrictions
            .iter_mut()
            .find(|r| r.restriction_type == restriction.restriction_type)
        {
            Some(existing) => *existing = restriction,
            None => self.restrictions.push(restriction),
        }
    }

    /// Remove a restriction; returns whether one was removed
    pub fn remove_restriction(&mut self, restriction_type: DietaryRestrictionType) -> bool {
        let before = self.restrictions.len();
        self.restrictions
            .retain(|r| r.restriction_type != restriction_type);
        before != self.restrictions.len()
    }

    /// Toggle a restriction; returns whether it exists
    pub fn set_restriction_active(
        &mut self,
        restriction_type: DietaryRestrictionType,
        active: bool,
    ) -> bool {
        self.restrictions
            .iter_mut()
            .find(|r| r.restriction_type == restriction_type)
            .map(|r| r.active = active)
            .is_some()
    }

    /// Add an allergy, replacing any existing entry for the same allergen
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the allergen name is blank
    pub fn add_allergy(&mut self, allergy: Allergy) -> AppResult<()> {
        let allergen = normalize_name(&allergy.allergen);
        if allergen.is_empty() {
            return Err(AppError::invalid_input("allergen name must not be blank"));
        }
        let allergy = Allergy { allergen, ..allergy };
        match self
            .allergies
            .iter_mut()
            .find(|a| a.allergen == allergy.allergen)
        {
            Some(existing) => *existing = allergy,
            None => self.allergies.push(allergy),
        }
        Ok(())
    }

    /// Remove an allergy by allergen name; returns whether one was removed
    pub fn remove_allergy(&mut self, allergen: &str) -> bool {
        let allergen = normalize_name(allergen);
        let before = self.allergies.len();
        self.allergies.retain(|a| a.allergen != allergen);
        before != self.allergies.len()
    }

    /// Toggle an allergy; returns whether it exists
    pub fn set_allergy_active(&mut self, allergen: &str, active: bool) -> bool {
        let allergen = normalize_name(allergen);
        self.allergies
            .iter_mut()
            .find(|a| a.allergen == allergen)
            .map(|a| a.active = active)
            .is_some()
    }

    /// Add a preference, replacing any existing entry for the same item
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the item name is blank
    pub fn add_preference(&mut self, item: &str, level: PreferenceLevel) -> AppResult<()> {
        let item = normalize_name(item);
        if item.is_empty() {
            return Err(AppError::invalid_input("preference item must not be blank"));
        }
        match self.preferences.iter_mut().find(|p| p.item == item) {
            Some(existing) => existing.level = level,
            None => self.preferences.push(Preference { item, level }),
        }
        Ok(())
    }

    /// Remove a preference; returns whether one was removed
    pub fn remove_preference(&mut self, item: &str) -> bool {
        let item = normalize_name(item);
        let before = self.preferences.len();
        self.preferences.retain(|p| p.item != item);
        before != self.preferences.len()
    }

    /// Check entries deserialized from outside the mutation API.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when an allergen or preference item is blank
    pub fn validate(&self) -> AppResult<()> {
        if self.allergies.iter().any(|a| a.allergen.trim().is_empty()) {
            return Err(AppError::invalid_input("allergen name must not be blank"));
        }
        if self.preferences.iter().any(|p| p.item.trim().is_empty()) {
            return Err(AppError::invalid_input("preference item must not be blank"));
        }
        Ok(())
    }
}

/// Profile entry that a violation came from
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum ViolationSource {
    /// A dietary restriction
    Restriction(DietaryRestrictionType),
    /// An allergy, by normalized allergen name
    Allergy(String),
}

/// Conflict between one ingredient and one profile entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Profile entry that triggered
    pub source: ViolationSource,
    /// Normalized ingredient name
    pub ingredient: String,
    /// Severity carried over from the profile entry
    pub severity: RestrictionSeverity,
    /// Human-readable description, never empty
    pub description: String,
}

/// Non-blocking notice that a recipe contains a disliked item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DietaryWarning {
    /// Normalized ingredient name
    pub ingredient: String,
    /// Disliked preference item that matched
    pub item: String,
    /// Human-readable description
    pub description: String,
}

/// Verdict for one recipe against one profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DietaryCompatibility {
    /// Whether the recipe may be served
    pub is_compatible: bool,
    /// Violations in ingredient order
    pub violations: Vec<Violation>,
    /// Preference warnings, which never affect compatibility
    #[serde(default)]
    pub warnings: Vec<DietaryWarning>,
    /// Severity-weighted score in [0, 1]
    pub score: f64,
}

impl DietaryCompatibility {
    /// Whether any violation is medical-grade
    #[must_use]
    pub fn has_medical_violation(&self) -> bool {
        self.violations
            .iter()
            .any(|v| v.severity == RestrictionSeverity::Medical)
    }
}

/// Candidate replacements for one violating ingredient, best first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substitution {
    /// Ingredient to replace
    pub original: String,
    /// Candidate replacements; empty when the table has no entry
    pub candidates: Vec<String>,
}

/// Substitutions keyed by ingredient, in first-violation order
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubstitutionPlan {
    entries: Vec<Substitution>,
}

impl SubstitutionPlan {
    /// Build from entries that are already keyed uniquely
    #[must_use]
    pub fn from_entries(entries: Vec<Substitution>) -> Self {
        Self { entries }
    }

    /// Candidates for an ingredient, if it violated anything
    #[must_use]
    pub fn get(&self, ingredient: &str) -> Option<&[String]> {
        let ingredient = normalize_name(ingredient);
        self.entries
            .iter()
            .find(|s| s.original == ingredient)
            .map(|s| s.candidates.as_slice())
    }

    /// True when at least one ingredient has a non-empty candidate list
    #[must_use]
    pub fn has_candidates(&self) -> bool {
        self.entries.iter().any(|s| !s.candidates.is_empty())
    }

    /// Ingredient names in order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|s| s.original.as_str())
    }

    /// Entries in order
    #[must_use]
    pub fn entries(&self) -> &[Substitution] {
        &self.entries
    }

    /// Number of keyed ingredients
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no ingredient is keyed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Terminal per-recipe classification in a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcessingStatus {
    /// Compatible as written
    Compatible,
    /// Incompatible, but substitutions exist
    CompatibleWithSubstitutions,
    /// Incompatible with at least one medical violation
    IncompatibleMajor,
    /// Incompatible without medical violations
    IncompatibleMinor,
    /// Evaluation failed or timed out
    ProcessingError,
}

impl ProcessingStatus {
    /// Every status, in summary order
    pub const ALL: [Self; 5] = [
        Self::Compatible,
        Self::CompatibleWithSubstitutions,
        Self::IncompatibleMajor,
        Self::IncompatibleMinor,
        Self::ProcessingError,
    ];

    /// Dense index for counter arrays
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Compatible => 0,
            Self::CompatibleWithSubstitutions => 1,
            Self::IncompatibleMajor => 2,
            Self::IncompatibleMinor => 3,
            Self::ProcessingError => 4,
        }
    }
}
