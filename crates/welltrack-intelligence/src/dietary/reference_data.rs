// ABOUTME: Read-only reference data port for restriction exclusions, allergen groups, and substitutions
// ABOUTME: DietaryReferenceData trait plus the built-in StaticReferenceData tables and JSON loader
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Dietary Reference Data
//!
//! The engine never owns its lookup tables. Matchers and advisors receive a
//! [`DietaryReferenceData`] implementation, so tables can come from the
//! built-in defaults, a JSON document, or any other store.
//!
//! Matching is substring based on normalized names. A [`KeywordRule`] can
//! list exception phrases: a keyword occurrence that sits inside an
//! exception occurrence does not count, which keeps "oat milk" from
//! tripping a dairy rule and "eggplant" from tripping an egg rule.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use welltrack_core::errors::{AppError, AppResult};
use welltrack_core::models::{normalize_name, DietaryRestrictionType, ViolationSource};

/// Rule with no keywords, returned for restrictions absent from a table
static EMPTY_RULE: KeywordRule = KeywordRule {
    keywords: Vec::new(),
    exceptions: Vec::new(),
};

/// Keywords that trigger a match, with phrases that excuse them
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KeywordRule {
    /// Normalized substrings that trigger a match
    pub keywords: Vec<String>,
    /// Normalized phrases whose occurrences excuse a keyword occurrence
    #[serde(default)]
    pub exceptions: Vec<String>,
}

impl KeywordRule {
    /// Build a rule from literal keyword and exception lists
    #[must_use]
    pub fn new(keywords: &[&str], exceptions: &[&str]) -> Self {
        Self {
            keywords: keywords.iter().map(|k| normalize_name(k)).collect(),
            exceptions: exceptions.iter().map(|e| normalize_name(e)).collect(),
        }
    }

    /// Whether any keyword occurs in `ingredient` outside an exception phrase
    #[must_use]
    pub fn matches(&self, ingredient: &str) -> bool {
        self.matches_with_extra(ingredient, None)
    }

    /// Like [`Self::matches`], also treating `extra` as a keyword
    #[must_use]
    pub fn matches_with_extra(&self, ingredient: &str, extra: Option<&str>) -> bool {
        let excused = self.excused_spans(ingredient);
        self.keywords
            .iter()
            .map(String::as_str)
            .chain(extra)
            .any(|keyword| contains_unexcused(ingredient, keyword, &excused))
    }

    fn excused_spans(&self, ingredient: &str) -> Vec<(usize, usize)> {
        self.exceptions
            .iter()
            .flat_map(|exception| {
                ingredient
                    .match_indices(exception.as_str())
                    .map(|(start, found)| (start, start + found.len()))
            })
            .collect()
    }

    fn validate(&self, context: &str) -> AppResult<()> {
        if self
            .keywords
            .iter()
            .chain(&self.exceptions)
            .any(String::is_empty)
        {
            return Err(AppError::invalid_input(format!(
                "{context} contains a blank keyword"
            )));
        }
        Ok(())
    }

    fn normalized(self) -> Self {
        Self {
            keywords: self.keywords.iter().map(|k| normalize_name(k)).collect(),
            exceptions: self.exceptions.iter().map(|e| normalize_name(e)).collect(),
        }
    }
}

/// True when `needle` occurs in `haystack` at a position not covered by `excused`
fn contains_unexcused(haystack: &str, needle: &str, excused: &[(usize, usize)]) -> bool {
    if needle.is_empty() {
        return false;
    }
    haystack.match_indices(needle).any(|(start, found)| {
        let end = start + found.len();
        !excused.iter().any(|&(s, e)| s <= start && end <= e)
    })
}

/// A named family of allergen keywords, e.g. "dairy"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllergenGroup {
    /// Normalized group name
    pub name: String,
    /// Keywords and exceptions for the group
    #[serde(flatten)]
    pub rule: KeywordRule,
}

impl AllergenGroup {
    fn new(name: &str, keywords: &[&str], exceptions: &[&str]) -> Self {
        Self {
            name: normalize_name(name),
            rule: KeywordRule::new(keywords, exceptions),
        }
    }

    /// Whether an allergen name identifies this group
    #[must_use]
    pub fn identifies(&self, allergen: &str) -> bool {
        self.name == allergen || self.rule.keywords.iter().any(|k| k == allergen)
    }
}

/// One substitution table row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubstitutionEntry {
    /// Normalized substring of the violating ingredient
    pub ingredient: String,
    /// Restrictions this row resolves
    #[serde(default)]
    pub restrictions: Vec<DietaryRestrictionType>,
    /// Allergen groups this row resolves
    #[serde(default)]
    pub allergen_groups: Vec<String>,
    /// Replacements, best first
    pub candidates: Vec<String>,
}

impl SubstitutionEntry {
    fn new(
        ingredient: &str,
        restrictions: &[DietaryRestrictionType],
        allergen_groups: &[&str],
        candidates: &[&str],
    ) -> Self {
        Self {
            ingredient: normalize_name(ingredient),
            restrictions: restrictions.to_vec(),
            allergen_groups: allergen_groups.iter().map(|g| normalize_name(g)).collect(),
            candidates: candidates.iter().map(|c| normalize_name(c)).collect(),
        }
    }
}

/// Read-only lookup tables used by matching and substitution
pub trait DietaryReferenceData: Send + Sync {
    /// Exclusion rule for a restriction; an empty rule when the table has none
    fn restriction_exclusions(&self, restriction: DietaryRestrictionType) -> &KeywordRule;

    /// All allergen groups
    fn allergen_groups(&self) -> &[AllergenGroup];

    /// Best substitution candidates for a normalized ingredient violating `source`
    fn substitutes(&self, ingredient: &str, source: &ViolationSource) -> Option<&[String]>;

    /// Group an allergen name belongs to: an exact group name first, then a group listing it as a keyword
    fn resolve_allergen(&self, allergen: &str) -> Option<&AllergenGroup> {
        let groups = self.allergen_groups();
        groups
            .iter()
            .find(|g| g.name == allergen)
            .or_else(|| groups.iter().find(|g| g.identifies(allergen)))
    }
}

/// In-memory reference tables
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StaticReferenceData {
    #[serde(default)]
    restrictions: BTreeMap<DietaryRestrictionType, KeywordRule>,
    #[serde(default)]
    allergen_groups: Vec<AllergenGroup>,
    #[serde(default)]
    substitutions: Vec<SubstitutionEntry>,
}

impl StaticReferenceData {
    /// Parse tables from JSON, normalizing every name.
    ///
    /// # Errors
    ///
    /// Returns `SerializationError` for malformed JSON and `InvalidInput`
    /// when a keyword, group name, or substitution key is blank
    pub fn from_json(json: &str) -> AppResult<Self> {
        let raw: Self = serde_json::from_str(json)?;
        let data = Self {
            restrictions: raw
                .restrictions
                .into_iter()
                .map(|(restriction, rule)| (restriction, rule.normalized()))
                .collect(),
            allergen_groups: raw
                .allergen_groups
                .into_iter()
                .map(|group| AllergenGroup {
                    name: normalize_name(&group.name),
                    rule: group.rule.normalized(),
                })
                .collect(),
            substitutions: raw
                .substitutions
                .into_iter()
                .map(|entry| SubstitutionEntry {
                    ingredient: normalize_name(&entry.ingredient),
                    restrictions: entry.restrictions,
                    allergen_groups: entry
                        .allergen_groups
                        .iter()
                        .map(|g| normalize_name(g))
                        .collect(),
                    candidates: entry
                        .candidates
                        .iter()
                        .map(|c| normalize_name(c))
                        .filter(|c| !c.is_empty())
                        .collect(),
                })
                .collect(),
        };
        data.validate()?;
        Ok(data)
    }

    fn validate(&self) -> AppResult<()> {
        for (restriction, rule) in &self.restrictions {
            rule.validate(restriction.display_name())?;
        }
        for group in &self.allergen_groups {
            if group.name.is_empty() {
                return Err(AppError::invalid_input("allergen group name must not be blank"));
            }
            group.rule.validate(&group.name)?;
        }
        if self.substitutions.iter().any(|s| s.ingredient.is_empty()) {
            return Err(AppError::invalid_input(
                "substitution ingredient must not be blank",
            ));
        }
        Ok(())
    }

    fn entry_applies(&self, entry: &SubstitutionEntry, source: &ViolationSource) -> bool {
        match source {
            ViolationSource::Restriction(restriction) => entry.restrictions.contains(restriction),
            ViolationSource::Allergy(allergen) => {
                let group = self.resolve_allergen(allergen).map(|g| g.name.as_str());
                entry
                    .allergen_groups
                    .iter()
                    .any(|g| g == allergen || Some(g.as_str()) == group)
            }
        }
    }

    /// Built-in tables covering every restriction type and the common allergen groups
    #[must_use]
    pub fn standard() -> Self {
        Self {
            restrictions: standard_restrictions(),
            allergen_groups: standard_allergen_groups(),
            substitutions: standard_substitutions(),
        }
    }
}

impl DietaryReferenceData for StaticReferenceData {
    fn restriction_exclusions(&self, restriction: DietaryRestrictionType) -> &KeywordRule {
        self.restrictions.get(&restriction).unwrap_or(&EMPTY_RULE)
    }

    fn allergen_groups(&self) -> &[AllergenGroup] {
        &self.allergen_groups
    }

    fn substitutes(&self, ingredient: &str, source: &ViolationSource) -> Option<&[String]> {
        // Longest matching key wins; the first row wins among equal lengths
        self.substitutions
            .iter()
            .filter(|entry| ingredient.contains(entry.ingredient.as_str()))
            .filter(|entry| self.entry_applies(entry, source))
            .fold(None, |best: Option<&SubstitutionEntry>, entry| match best {
                Some(current) if current.ingredient.len() >= entry.ingredient.len() => {
                    Some(current)
                }
                _ => Some(entry),
            })
            .map(|entry| entry.candidates.as_slice())
    }
}

const MEATS: &[&str] = &[
    "meat", "chicken", "beef", "pork", "bacon", "lamb", "turkey", "veal", "gelatin",
];
const SEAFOOD: &[&str] = &[
    "fish", "seafood", "anchovy", "salmon", "tuna", "shrimp", "crab", "lobster",
];
const DAIRY: &[&str] = &[
    "milk", "cheese", "butter", "cream", "yogurt", "whey", "casein", "ghee", "lactose",
];
const PLANT_DAIRY_ALTERNATIVES: &[&str] = &[
    "almond milk",
    "oat milk",
    "coconut milk",
    "soy milk",
    "rice milk",
    "cashew milk",
    "vegan butter",
    "peanut butter",
    "almond butter",
    "cocoa butter",
    "coconut cream",
    "cream of tartar",
    "vegan cheese",
    "coconut yogurt",
];
const EGGS: &[&str] = &["egg", "mayonnaise", "albumin", "meringue"];
const EGG_LOOKALIKES: &[&str] = &["eggplant", "veggie"];
const GLUTEN_GRAINS: &[&str] = &[
    "wheat", "barley", "rye", "all-purpose flour", "bread", "pasta", "couscous", "semolina",
    "spelt", "seitan",
];
const GLUTEN_FREE_VARIANTS: &[&str] = &[
    "buckwheat",
    "gluten-free bread",
    "gluten-free pasta",
    "gluten-free flour",
];
const HIGH_CARB_STAPLES: &[&str] = &["sugar", "bread", "pasta", "rice", "potato", "syrup"];
const LOW_CARB_VARIANTS: &[&str] = &[
    "sugar-free",
    "cauliflower rice",
    "almond flour",
    "coconut flour",
];
const SALT: &[&str] = &["salt", "soy sauce", "bouillon", "fish sauce"];
const SALT_FREE_VARIANTS: &[&str] = &["unsalted", "low-sodium", "salt-free"];
const PORK_PRODUCTS: &[&str] = &["pork", "bacon", "ham", "lard", "gelatin"];
const PORK_LOOKALIKES: &[&str] = &["graham", "hamburger", "turkey bacon", "beef bacon"];
const SHELLFISH: &[&str] = &[
    "shrimp", "prawn", "crab", "lobster", "scallop", "clam", "mussel", "oyster",
];
const PALEO_EXCLUSIONS: &[&str] = &[
    "wheat", "barley", "rye", "bread", "pasta", "rice", "oats", "corn", "bean", "lentil",
    "peanut", "soy", "milk", "cheese", "yogurt", "sugar",
];
const PALEO_VARIANTS: &[&str] = &[
    "green bean",
    "almond milk",
    "coconut milk",
    "cashew milk",
    "cauliflower rice",
];

fn concat(parts: &[&[&'static str]]) -> Vec<&'static str> {
    parts.iter().flat_map(|part| part.iter().copied()).collect()
}

fn standard_restrictions() -> BTreeMap<DietaryRestrictionType, KeywordRule> {
    use DietaryRestrictionType as R;

    let vegetarian = concat(&[MEATS, SEAFOOD]);
    let vegan = concat(&[MEATS, SEAFOOD, DAIRY, EGGS, &["honey"]]);
    let vegan_exceptions = concat(&[PLANT_DAIRY_ALTERNATIVES, EGG_LOOKALIKES]);
    let hindu_vegetarian = concat(&[MEATS, SEAFOOD, EGGS]);
    let keto = concat(&[HIGH_CARB_STAPLES, &["flour", "corn", "oats", "honey"]]);
    let kosher = concat(&[PORK_PRODUCTS, SHELLFISH]);
    let kosher_exceptions = concat(&[PORK_LOOKALIKES, &["oyster mushroom"]]);
    let halal = concat(&[PORK_PRODUCTS, &["wine", "beer", "rum", "alcohol"]]);
    let halal_exceptions = concat(&[PORK_LOOKALIKES, &["halal", "drum", "crumb"]]);
    let whole30 = concat(&[PALEO_EXCLUSIONS, &["wine", "beer", "honey", "maple syrup"]]);

    [
        (R::Vegetarian, KeywordRule::new(&vegetarian, &[])),
        (R::Vegan, KeywordRule::new(&vegan, &vegan_exceptions)),
        (R::Flexitarian, KeywordRule::default()),
        (R::Pescatarian, KeywordRule::new(MEATS, &[])),
        (R::GlutenFree, KeywordRule::new(GLUTEN_GRAINS, GLUTEN_FREE_VARIANTS)),
        (
            R::DairyFree,
            KeywordRule::new(DAIRY, PLANT_DAIRY_ALTERNATIVES),
        ),
        (
            R::NutFree,
            KeywordRule::new(
                &[
                    "nut", "almond", "walnut", "peanut", "cashew", "pecan", "pistachio",
                    "hazelnut", "macadamia",
                ],
                &["nutmeg", "coconut", "butternut", "nut-free", "nutritional"],
            ),
        ),
        (
            R::SoyFree,
            KeywordRule::new(&["soy", "soya", "tofu", "tempeh", "miso", "edamame"], &[]),
        ),
        (
            R::EggFree,
            KeywordRule::new(EGGS, &concat(&[EGG_LOOKALIKES, &["egg-free"]])),
        ),
        (
            R::ShellfishFree,
            KeywordRule::new(SHELLFISH, &["oyster mushroom"]),
        ),
        (R::Keto, KeywordRule::new(&keto, LOW_CARB_VARIANTS)),
        (R::LowCarb, KeywordRule::new(HIGH_CARB_STAPLES, LOW_CARB_VARIANTS)),
        (R::HighProtein, KeywordRule::default()),
        (
            R::LowFat,
            KeywordRule::new(&["lard", "shortening", "heavy cream"], &[]),
        ),
        (R::LowSodium, KeywordRule::new(SALT, SALT_FREE_VARIANTS)),
        (R::CalorieConscious, KeywordRule::default()),
        (R::WeightLoss, KeywordRule::default()),
        (R::WeightGain, KeywordRule::default()),
        (R::Halal, KeywordRule::new(&halal, &halal_exceptions)),
        (R::Kosher, KeywordRule::new(&kosher, &kosher_exceptions)),
        (
            R::HinduVegetarian,
            KeywordRule::new(&hindu_vegetarian, EGG_LOOKALIKES),
        ),
        (R::Paleo, KeywordRule::new(PALEO_EXCLUSIONS, PALEO_VARIANTS)),
        (R::Mediterranean, KeywordRule::default()),
        (R::Dash, KeywordRule::new(&["salt", "bacon", "sausage"], SALT_FREE_VARIANTS)),
        (R::Whole30, KeywordRule::new(&whole30, PALEO_VARIANTS)),
    ]
    .into_iter()
    .collect()
}

fn standard_allergen_groups() -> Vec<AllergenGroup> {
    vec![
        AllergenGroup::new(
            "peanuts",
            &["peanut", "groundnut", "arachis"],
            &[],
        ),
        AllergenGroup::new(
            "tree nuts",
            &[
                "almond",
                "walnut",
                "cashew",
                "pecan",
                "pistachio",
                "hazelnut",
                "brazil nut",
                "macadamia",
            ],
            &[],
        ),
        AllergenGroup::new("dairy", DAIRY, PLANT_DAIRY_ALTERNATIVES),
        AllergenGroup::new("eggs", EGGS, EGG_LOOKALIKES),
        AllergenGroup::new(
            "soy",
            &["soy", "soya", "tofu", "tempeh", "miso", "edamame", "soybean"],
            &[],
        ),
        AllergenGroup::new(
            "wheat",
            &["wheat", "flour", "gluten", "bread", "pasta", "couscous"],
            &["buckwheat", "almond flour", "rice flour", "coconut flour", "oat flour"],
        ),
        AllergenGroup::new("shellfish", SHELLFISH, &["oyster mushroom"]),
        AllergenGroup::new(
            "fish",
            &["fish", "salmon", "tuna", "cod", "halibut", "sardine", "anchovy"],
            &["shellfish"],
        ),
        AllergenGroup::new("sesame", &["sesame", "tahini", "hummus"], &[]),
        AllergenGroup::new("sulfites", &["sulfite", "wine", "dried fruit"], &[]),
    ]
}

fn standard_substitutions() -> Vec<SubstitutionEntry> {
    use DietaryRestrictionType as R;

    let dairy_diets = [R::Vegan, R::DairyFree, R::Paleo, R::Whole30];
    vec![
        SubstitutionEntry::new(
            "milk",
            &dairy_diets,
            &["dairy"],
            &["almond milk", "oat milk", "coconut milk", "soy milk"],
        ),
        SubstitutionEntry::new(
            "butter",
            &[R::Vegan, R::DairyFree],
            &["dairy"],
            &["olive oil", "coconut oil", "vegan butter", "avocado oil"],
        ),
        SubstitutionEntry::new(
            "cheese",
            &dairy_diets,
            &["dairy"],
            &["nutritional yeast", "cashew cheese"],
        ),
        SubstitutionEntry::new(
            "cream",
            &[R::Vegan, R::DairyFree],
            &["dairy"],
            &["coconut cream", "cashew cream"],
        ),
        SubstitutionEntry::new(
            "yogurt",
            &dairy_diets,
            &["dairy"],
            &["coconut yogurt", "soy yogurt"],
        ),
        SubstitutionEntry::new(
            "egg",
            &[R::Vegan, R::EggFree, R::HinduVegetarian],
            &["eggs"],
            &["flax egg", "chia egg", "applesauce", "banana"],
        ),
        SubstitutionEntry::new(
            "wheat flour",
            &[R::GlutenFree, R::Paleo, R::Whole30],
            &["wheat"],
            &["almond flour", "rice flour", "oat flour", "coconut flour"],
        ),
        SubstitutionEntry::new(
            "all-purpose flour",
            &[R::GlutenFree],
            &["wheat"],
            &["almond flour", "rice flour", "oat flour", "coconut flour"],
        ),
        SubstitutionEntry::new(
            "pasta",
            &[R::GlutenFree],
            &["wheat"],
            &["rice pasta", "chickpea pasta"],
        ),
        SubstitutionEntry::new(
            "pasta",
            &[R::Keto, R::LowCarb, R::Paleo, R::Whole30],
            &[],
            &["zucchini noodles", "shirataki noodles"],
        ),
        SubstitutionEntry::new(
            "rice",
            &[R::Keto, R::LowCarb, R::Paleo, R::Whole30],
            &[],
            &["cauliflower rice"],
        ),
        SubstitutionEntry::new(
            "sugar",
            &[R::Keto, R::LowCarb],
            &[],
            &["erythritol", "monk fruit sweetener", "stevia"],
        ),
        SubstitutionEntry::new(
            "honey",
            &[R::Vegan],
            &[],
            &["maple syrup", "agave nectar"],
        ),
        SubstitutionEntry::new(
            "soy sauce",
            &[R::SoyFree, R::Paleo, R::Whole30],
            &["soy"],
            &["coconut aminos"],
        ),
        SubstitutionEntry::new(
            "soy sauce",
            &[R::LowSodium],
            &[],
            &["low-sodium soy sauce", "coconut aminos"],
        ),
        SubstitutionEntry::new("tofu", &[R::SoyFree], &["soy"], &["chickpea tofu"]),
        SubstitutionEntry::new(
            "peanut butter",
            &[R::NutFree],
            &["peanuts"],
            &["sunflower seed butter", "pumpkin seed butter"],
        ),
        SubstitutionEntry::new(
            "beef",
            &[R::Vegetarian, R::Vegan, R::HinduVegetarian, R::Pescatarian],
            &[],
            &["lentils", "mushrooms", "tempeh"],
        ),
        SubstitutionEntry::new(
            "chicken",
            &[R::Vegetarian, R::Vegan, R::HinduVegetarian, R::Pescatarian],
            &[],
            &["tofu", "chickpeas", "jackfruit"],
        ),
        SubstitutionEntry::new(
            "pork",
            &[R::Vegetarian, R::Vegan, R::HinduVegetarian, R::Pescatarian],
            &[],
            &["jackfruit", "tempeh"],
        ),
        SubstitutionEntry::new("pork", &[R::Halal, R::Kosher], &[], &["turkey", "chicken"]),
        SubstitutionEntry::new(
            "bacon",
            &[R::Halal, R::Kosher],
            &[],
            &["turkey bacon", "beef bacon"],
        ),
        SubstitutionEntry::new(
            "bacon",
            &[R::Vegetarian, R::Vegan, R::HinduVegetarian],
            &[],
            &["tempeh bacon", "coconut bacon"],
        ),
        SubstitutionEntry::new(
            "gelatin",
            &[R::Vegetarian, R::Vegan, R::Halal, R::Kosher],
            &[],
            &["agar agar"],
        ),
        SubstitutionEntry::new(
            "shrimp",
            &[R::ShellfishFree, R::Kosher],
            &["shellfish"],
            &["white fish", "chicken"],
        ),
        SubstitutionEntry::new("wine", &[R::Halal], &["sulfites"], &["grape juice", "broth"]),
        SubstitutionEntry::new("salt", &[R::LowSodium, R::Dash], &[], &["herbs", "lemon juice"]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exception_phrase_excuses_keyword() {
        let rule = KeywordRule::new(&["milk", "butter"], &["oat milk", "peanut butter"]);
        assert!(rule.matches("whole milk"));
        assert!(!rule.matches("oat milk"));
        assert!(!rule.matches("peanut butter"));
        assert!(rule.matches("butter"));
    }

    #[test]
    fn test_extra_keyword_respects_exceptions() {
        let rule = KeywordRule::new(&[], &["eggplant"]);
        assert!(rule.matches_with_extra("scrambled egg", Some("egg")));
        assert!(!rule.matches_with_extra("grilled eggplant", Some("egg")));
    }

    #[test]
    fn test_lookalike_words_do_not_match() {
        use DietaryRestrictionType as R;

        let data = StaticReferenceData::standard();
        let halal = data.restriction_exclusions(R::Halal);
        assert!(!halal.matches("chicken drumstick"));
        assert!(!halal.matches("panko breadcrumbs"));
        assert!(halal.matches("dark rum"));

        let nut_free = data.restriction_exclusions(R::NutFree);
        assert!(!nut_free.matches("nutritional yeast"));
        assert!(nut_free.matches("mixed nuts"));

        let eggs = data.resolve_allergen("eggs").unwrap();
        assert!(!eggs.rule.matches("veggie broth"));
        assert!(eggs.rule.matches("egg yolk"));
        for restriction in [R::Vegan, R::EggFree, R::HinduVegetarian] {
            assert!(!data.restriction_exclusions(restriction).matches("veggie broth"));
        }
    }

    #[test]
    fn test_allergen_resolves_by_keyword() {
        let data = StaticReferenceData::standard();
        assert_eq!(
            data.resolve_allergen("milk").map(|g| g.name.as_str()),
            Some("dairy")
        );
        assert_eq!(
            data.resolve_allergen("dairy").map(|g| g.name.as_str()),
            Some("dairy")
        );
        assert!(data.resolve_allergen("kiwi").is_none());
    }

    #[test]
    fn test_every_restriction_has_a_rule() {
        let data = StaticReferenceData::standard();
        assert!(data.validate().is_ok());
        assert!(data
            .restriction_exclusions(DietaryRestrictionType::Vegan)
            .matches("honey"));
        assert!(data
            .restriction_exclusions(DietaryRestrictionType::Flexitarian)
            .keywords
            .is_empty());
    }

    #[test]
    fn test_substitute_lookup_depends_on_source() {
        let data = StaticReferenceData::standard();
        let halal = ViolationSource::Restriction(DietaryRestrictionType::Halal);
        let vegan = ViolationSource::Restriction(DietaryRestrictionType::Vegan);
        assert_eq!(
            data.substitutes("pork shoulder", &halal),
            Some(&["turkey".to_owned(), "chicken".to_owned()][..])
        );
        assert_eq!(
            data.substitutes("pork shoulder", &vegan).map(<[String]>::len),
            Some(2)
        );
        assert!(data
            .substitutes("pork shoulder", &ViolationSource::Allergy("dairy".into()))
            .is_none());
    }

    #[test]
    fn test_longest_key_wins() {
        let data = StaticReferenceData::standard();
        let nut_free = ViolationSource::Restriction(DietaryRestrictionType::NutFree);
        let candidates = data.substitutes("crunchy peanut butter", &nut_free).unwrap();
        assert_eq!(candidates[0], "sunflower seed butter");

        let dairy = ViolationSource::Allergy("milk".into());
        let candidates = data.substitutes("whole milk", &dairy).unwrap();
        assert_eq!(candidates[0], "almond milk");
    }

    #[test]
    fn test_from_json_normalizes_and_validates() {
        let json = r#"{
            "restrictions": {"vegan": {"keywords": [" Honey "]}},
            "allergen_groups": [{"name": "Citrus", "keywords": ["Lemon", "lime"], "exceptions": []}],
            "substitutions": [{"ingredient": "Honey", "restrictions": ["vegan"], "candidates": ["Maple Syrup"]}]
        }"#;
        let data = StaticReferenceData::from_json(json).unwrap();
        assert!(data
            .restriction_exclusions(DietaryRestrictionType::Vegan)
            .matches("raw honey"));
        assert_eq!(data.allergen_groups()[0].name, "citrus");
        assert!(data
            .restriction_exclusions(DietaryRestrictionType::Keto)
            .keywords
            .is_empty());
        let vegan = ViolationSource::Restriction(DietaryRestrictionType::Vegan);
        assert_eq!(
            data.substitutes("raw honey", &vegan),
            Some(&["maple syrup".to_owned()][..])
        );

        let blank = r#"{"restrictions": {"vegan": {"keywords": ["  "]}}}"#;
        assert!(StaticReferenceData::from_json(blank).is_err());
        assert!(StaticReferenceData::from_json("not json").is_err());
    }
}
