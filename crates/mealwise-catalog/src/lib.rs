//! Meal and ingredient reference data for mealwise.

pub mod config;
pub mod error;
pub mod ingredients;
pub mod meals;
pub mod models;

pub use config::CatalogConfig;
pub use error::CatalogError;
pub use ingredients::{Ingredient, IngredientCatalog};
pub use meals::MealCatalog;
pub use models::{
    BudgetTier, Category, Complexity, DietClass, MealRecord, MealSlot, ParseEnumError,
    Substitution, same_ingredient,
};
