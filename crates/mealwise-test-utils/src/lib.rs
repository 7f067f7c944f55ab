//! Shared test utilities for mealwise tests.
//!
//! Provides a [`MealBuilder`] for one-off records, small hand-built catalogs
//! with known shapes, and seeded RNGs so randomized selection is repeatable.

use rand::SeedableRng;
use rand::rngs::StdRng;

use mealwise_catalog::{
    BudgetTier, Complexity, DietClass, MealCatalog, MealRecord, MealSlot, Substitution,
};

/// Deterministic RNG for a test.
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Builder for a [`MealRecord`] with sensible defaults: veg, low tier,
/// simple, 10 minutes prep and cook, name derived from the id.
#[derive(Debug, Clone)]
pub struct MealBuilder {
    meal: MealRecord,
}

impl MealBuilder {
    pub fn new(id: &str, slot: MealSlot) -> Self {
        Self {
            meal: MealRecord {
                id: id.to_owned(),
                name: format!("Meal {id}"),
                slot,
                diet: DietClass::Veg,
                ingredients: vec!["Salt".to_owned()],
                prep_time_minutes: 10,
                cook_time_minutes: 10,
                budget_tier: BudgetTier::Low,
                complexity: Complexity::Simple,
                substitutions: Vec::new(),
            },
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.meal.name = name.to_owned();
        self
    }

    pub fn diet(mut self, diet: DietClass) -> Self {
        self.meal.diet = diet;
        self
    }

    pub fn ingredients(mut self, ingredients: &[&str]) -> Self {
        self.meal.ingredients = ingredients.iter().map(|s| (*s).to_owned()).collect();
        self
    }

    pub fn times(mut self, prep: u32, cook: u32) -> Self {
        self.meal.prep_time_minutes = prep;
        self.meal.cook_time_minutes = cook;
        self
    }

    pub fn tier(mut self, tier: BudgetTier) -> Self {
        self.meal.budget_tier = tier;
        self
    }

    pub fn complexity(mut self, complexity: Complexity) -> Self {
        self.meal.complexity = complexity;
        self
    }

    pub fn substitution(mut self, original: &str, replacement: &str, note: &str) -> Self {
        self.meal.substitutions.push(Substitution {
            original: original.to_owned(),
            replacement: replacement.to_owned(),
            note: note.to_owned(),
        });
        self
    }

    pub fn build(self) -> MealRecord {
        self.meal
    }
}

/// The embedded reference catalog.
pub fn builtin_catalog() -> MealCatalog {
    MealCatalog::builtin()
}

/// A catalog where every slot has exactly one meal per tier, all veg and
/// simple. Ids are `<slot initial><tier initial>`, e.g. `bl`, `dh`.
pub fn tiered_catalog() -> MealCatalog {
    let mut meals = Vec::new();
    for slot in MealSlot::ALL {
        let prefix = &slot.to_string()[..1];
        for (tier, suffix) in [
            (BudgetTier::Low, "l"),
            (BudgetTier::Medium, "m"),
            (BudgetTier::High, "h"),
        ] {
            meals.push(
                MealBuilder::new(&format!("{prefix}{suffix}"), slot)
                    .tier(tier)
                    .ingredients(&["Salt", "Water"])
                    .build(),
            );
        }
    }
    catalog(meals)
}

/// A catalog with only expensive, complex, non-veg meals (two per slot),
/// so every filter stage other than the slot one comes up empty for a
/// frugal vegetarian student.
pub fn hostile_catalog() -> MealCatalog {
    let mut meals = Vec::new();
    for slot in MealSlot::ALL {
        let prefix = &slot.to_string()[..1];
        for n in 1..=2 {
            meals.push(
                MealBuilder::new(&format!("{prefix}{n}"), slot)
                    .diet(DietClass::NonVeg)
                    .tier(BudgetTier::High)
                    .complexity(Complexity::Complex)
                    .ingredients(&["Chicken", "Cream"])
                    .build(),
            );
        }
    }
    catalog(meals)
}

/// Every slot has one meal using "Crème" (id `<slot initial>c`) and three
/// plain meals (`<slot initial>1` to `3`), all veg, low tier and simple.
pub fn accented_catalog() -> MealCatalog {
    let mut meals = Vec::new();
    for slot in MealSlot::ALL {
        let prefix = &slot.to_string()[..1];
        meals.push(
            MealBuilder::new(&format!("{prefix}c"), slot)
                .ingredients(&["Crème", "Salt"])
                .build(),
        );
        for n in 1..=3 {
            meals.push(
                MealBuilder::new(&format!("{prefix}{n}"), slot)
                    .ingredients(&["Salt", "Water"])
                    .build(),
            );
        }
    }
    catalog(meals)
}

/// Wrap meals in a validated catalog.
///
/// # Panics
///
/// Panics if the meals do not form a valid catalog.
pub fn catalog(meals: Vec<MealRecord>) -> MealCatalog {
    MealCatalog::new(meals).expect("test catalog must be valid")
}
