//! Ingredient → grocery category lookup and pantry autocomplete.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::CatalogError;
use crate::models::Category;

/// The embedded ingredient table.
static INGREDIENTS_TOML: &str = include_str!("data/ingredients.toml");

/// Default number of autocomplete suggestions.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 8;

/// A single `[[ingredients]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub category: Category,
}

#[derive(Debug, Deserialize)]
struct IngredientFile {
    ingredients: Vec<Ingredient>,
}

/// Read-only ingredient table with case-insensitive category lookup.
#[derive(Debug, Clone)]
pub struct IngredientCatalog {
    /// Entries in file order (drives suggestion order).
    entries: Vec<Ingredient>,
    /// Lower-cased name -> category.
    categories: HashMap<String, Category>,
}

impl IngredientCatalog {
    pub fn new(entries: Vec<Ingredient>) -> Result<Self, CatalogError> {
        let mut categories = HashMap::with_capacity(entries.len());
        for entry in &entries {
            let key = entry.name.to_lowercase();
            if categories.insert(key, entry.category.clone()).is_some() {
                return Err(CatalogError::DuplicateIngredientEntry(entry.name.clone()));
            }
        }
        Ok(Self {
            entries,
            categories,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, CatalogError> {
        let file: IngredientFile = toml::from_str(content)?;
        Self::new(file.ingredients)
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Load the embedded ingredient table.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed.
    pub fn builtin() -> Self {
        Self::from_toml_str(INGREDIENTS_TOML).expect("embedded ingredients.toml is invalid")
    }

    /// Category for an ingredient name; unknown names map to [`Category::Other`].
    pub fn category_of(&self, name: &str) -> Category {
        self.categories
            .get(&name.to_lowercase())
            .cloned()
            .unwrap_or(Category::Other)
    }

    /// Names starting with `prefix` (case-insensitive), in table order.
    pub fn suggestions(&self, prefix: &str, limit: usize) -> Vec<&str> {
        if prefix.is_empty() {
            return Vec::new();
        }
        let prefix = prefix.to_lowercase();
        self.entries
            .iter()
            .filter(|e| e.name.to_lowercase().starts_with(&prefix))
            .take(limit)
            .map(|e| e.name.as_str())
            .collect()
    }

    /// Every entry in a category, in table order.
    pub fn in_category(&self, category: &Category) -> Vec<&Ingredient> {
        self.entries
            .iter()
            .filter(|e| &e.category == category)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ingredient> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for IngredientCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
