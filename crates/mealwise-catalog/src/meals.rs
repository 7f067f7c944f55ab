//! The meal catalog: validated, read-only reference data.
//!
//! The reference catalog is defined in `data/meals.toml` and embedded in the
//! binary at compile time. Alternative catalogs can be loaded from a TOML
//! string or file with the same `[[meals]]` layout.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::CatalogError;
use crate::models::{MealRecord, MealSlot};

/// Minimum number of meals per slot. A swap always needs one alternative.
pub const MIN_MEALS_PER_SLOT: usize = 2;

/// The embedded reference catalog.
static MEALS_TOML: &str = include_str!("data/meals.toml");

/// Container for deserializing a catalog file.
#[derive(Debug, Deserialize)]
struct MealFile {
    meals: Vec<MealRecord>,
}

/// An ordered, validated collection of meals.
#[derive(Debug, Clone)]
pub struct MealCatalog {
    meals: Vec<MealRecord>,
}

impl MealCatalog {
    /// Validate and wrap a list of meals.
    ///
    /// Rejects duplicate ids, blank names, empty or repeated ingredients, and
    /// catalogs with fewer than [`MIN_MEALS_PER_SLOT`] meals for any slot.
    pub fn new(meals: Vec<MealRecord>) -> Result<Self, CatalogError> {
        let mut ids = HashSet::new();
        for meal in &meals {
            if !ids.insert(meal.id.as_str()) {
                return Err(CatalogError::DuplicateMealId(meal.id.clone()));
            }
            if meal.name.trim().is_empty() {
                return Err(CatalogError::EmptyName(meal.id.clone()));
            }
            if meal.ingredients.is_empty() {
                return Err(CatalogError::NoIngredients(meal.id.clone()));
            }
            let mut seen = HashSet::new();
            for ing in &meal.ingredients {
                if !seen.insert(ing.to_lowercase()) {
                    return Err(CatalogError::DuplicateIngredient {
                        meal: meal.id.clone(),
                        ingredient: ing.clone(),
                    });
                }
            }
        }

        for slot in MealSlot::ALL {
            let found = meals.iter().filter(|m| m.slot == slot).count();
            if found < MIN_MEALS_PER_SLOT {
                return Err(CatalogError::TooFewMeals { slot, found });
            }
        }

        debug!(meals = meals.len(), "meal catalog validated");
        Ok(Self { meals })
    }

    /// Parse and validate a `[[meals]]` TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, CatalogError> {
        let file: MealFile = toml::from_str(content)?;
        Self::new(file.meals)
    }

    /// Read, parse and validate a catalog file.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Load the embedded reference catalog.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed. The file ships with the
    /// crate, so a successful build implies valid data.
    pub fn builtin() -> Self {
        Self::from_toml_str(MEALS_TOML).expect("embedded meals.toml is invalid")
    }

    /// All meals in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &MealRecord> {
        self.meals.iter()
    }

    /// Meals for one slot, in catalog order.
    pub fn by_slot(&self, slot: MealSlot) -> Vec<&MealRecord> {
        self.meals.iter().filter(|m| m.slot == slot).collect()
    }

    /// Look up a meal by id.
    pub fn get(&self, id: &str) -> Option<&MealRecord> {
        self.meals.iter().find(|m| m.id == id)
    }

    pub fn len(&self) -> usize {
        self.meals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meals.is_empty()
    }
}

impl Default for MealCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
