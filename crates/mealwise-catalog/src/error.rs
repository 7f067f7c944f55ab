use std::path::PathBuf;

use thiserror::Error;

use crate::models::MealSlot;

/// Errors raised while loading or validating catalog data.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("failed to read catalog file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("duplicate meal id: {0:?}")]
    DuplicateMealId(String),

    #[error("meal {0:?} has an empty name")]
    EmptyName(String),

    #[error("meal {0:?} has no ingredients")]
    NoIngredients(String),

    #[error("meal {meal:?} lists ingredient {ingredient:?} more than once")]
    DuplicateIngredient { meal: String, ingredient: String },

    #[error("catalog needs at least 2 {slot} meals, found {found}")]
    TooFewMeals { slot: MealSlot, found: usize },

    #[error("ingredient catalog lists {0:?} more than once")]
    DuplicateIngredientEntry(String),
}
