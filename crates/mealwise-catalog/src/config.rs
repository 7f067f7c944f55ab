use std::env;
use std::path::PathBuf;

use crate::error::CatalogError;
use crate::ingredients::IngredientCatalog;
use crate::meals::MealCatalog;

/// Where to load catalog data from.
///
/// Reads `MEALWISE_CATALOG` (meals) and `MEALWISE_INGREDIENTS` from the
/// environment. An unset path means the embedded reference data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Meal catalog TOML file.
    pub meals_path: Option<PathBuf>,
    /// Ingredient table TOML file.
    pub ingredients_path: Option<PathBuf>,
}

impl CatalogConfig {
    pub const MEALS_ENV: &str = "MEALWISE_CATALOG";
    pub const INGREDIENTS_ENV: &str = "MEALWISE_INGREDIENTS";

    /// Build a config from the environment.
    pub fn from_env() -> Self {
        Self {
            meals_path: env::var_os(Self::MEALS_ENV).map(PathBuf::from),
            ingredients_path: env::var_os(Self::INGREDIENTS_ENV).map(PathBuf::from),
        }
    }

    /// Build a config from explicit paths (useful for tests and CLI flags).
    pub fn new(meals_path: Option<PathBuf>, ingredients_path: Option<PathBuf>) -> Self {
        Self {
            meals_path,
            ingredients_path,
        }
    }

    pub fn load_meals(&self) -> Result<MealCatalog, CatalogError> {
        match &self.meals_path {
            Some(path) => MealCatalog::from_path(path),
            None => Ok(MealCatalog::builtin()),
        }
    }

    pub fn load_ingredients(&self) -> Result<IngredientCatalog, CatalogError> {
        match &self.ingredients_path {
            Some(path) => IngredientCatalog::from_path(path),
            None => Ok(IngredientCatalog::builtin()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_uses_builtin_data() {
        let cfg = CatalogConfig::default();
        assert_eq!(cfg.load_meals().unwrap().len(), 32);
        assert_eq!(cfg.load_ingredients().unwrap().len(), 114);
    }

    #[test]
    fn explicit_paths_are_read() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("ingredients.toml");
        std::fs::write(
            &path,
            "[[ingredients]]\nname = \"Tempeh\"\ncategory = \"protein\"\n",
        )
        .unwrap();

        let cfg = CatalogConfig::new(None, Some(path));
        let table = cfg.load_ingredients().unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn missing_file_is_an_error() {
        let cfg = CatalogConfig::new(Some(PathBuf::from("/nonexistent/meals.toml")), None);
        assert!(matches!(cfg.load_meals(), Err(CatalogError::Io { .. })));
    }
}
