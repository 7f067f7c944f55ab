//! Constraint-driven meal selection.
//!
//! Every slot runs the same [`filters::Stage::CHAIN`]. When a stage leaves
//! nothing to choose from, that one slot is drawn from the whole catalog
//! pool for its meal type instead, so a returned plan is always complete.

pub mod filters;

use std::collections::HashSet;

use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::debug;

use mealwise_catalog::{MealCatalog, MealRecord, MealSlot};

use crate::constraints::UserConstraints;
use crate::error::PlanError;
use crate::plan::{DayMeals, MealPlan};

pub use filters::Stage;

/// Uniform pick from a pool.
pub(crate) fn pick<'c, R: Rng + ?Sized>(pool: &[&'c MealRecord], rng: &mut R) -> Option<&'c MealRecord> {
    pool.choose(rng).copied()
}

/// Choose one meal for `slot`, honouring the filter chain where possible.
pub fn select_meal<R: Rng + ?Sized>(
    catalog: &MealCatalog,
    constraints: &UserConstraints,
    slot: MealSlot,
    used: &HashSet<String>,
    rng: &mut R,
) -> Result<MealRecord, PlanError> {
    let slot_pool = catalog.by_slot(slot);
    let chosen = match filters::narrow(slot_pool.clone(), constraints, used) {
        Ok(pool) => pick(&pool, rng),
        Err(stage) => {
            debug!(%slot, %stage, "filter stage left no candidates, drawing from the full slot pool");
            pick(&slot_pool, rng)
        }
    };
    chosen.cloned().ok_or(PlanError::NoCandidates(slot))
}

/// Build a complete plan of `constraints.number_of_days` days.
pub fn select_plan<R: Rng + ?Sized>(
    catalog: &MealCatalog,
    constraints: &UserConstraints,
    rng: &mut R,
) -> Result<MealPlan, PlanError> {
    constraints.validate()?;

    let mut used = HashSet::new();
    let mut days = Vec::with_capacity(usize::from(constraints.number_of_days));
    for day in 1..=constraints.number_of_days {
        days.push(DayMeals::try_build(day, |slot| {
            let meal = select_meal(catalog, constraints, slot, &used, rng)?;
            used.insert(meal.id.clone());
            Ok(meal)
        })?);
    }
    MealPlan::new(days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mealwise_catalog::{Complexity, DietClass};
    use mealwise_test_utils::{builtin_catalog, hostile_catalog, seeded_rng};

    use crate::constraints::{DietType, Persona};

    fn student_veg() -> UserConstraints {
        UserConstraints {
            diet_type: DietType::Veg,
            dislikes: vec![],
            pantry_items: vec![],
            locked_ingredients: vec![],
            budget_per_day: 400.0,
            persona: Persona::Student,
            number_of_days: 3,
        }
    }

    #[test]
    fn plan_has_requested_days_and_matching_slots() {
        let catalog = builtin_catalog();
        let plan = select_plan(&catalog, &student_veg(), &mut seeded_rng(7)).unwrap();
        assert_eq!(plan.day_count(), 3);
        for (_, slot, meal) in plan.slots() {
            assert_eq!(meal.slot, slot);
        }
    }

    #[test]
    fn same_seed_same_plan() {
        let catalog = builtin_catalog();
        let a = select_plan(&catalog, &student_veg(), &mut seeded_rng(42)).unwrap();
        let b = select_plan(&catalog, &student_veg(), &mut seeded_rng(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn honours_diet_and_complexity_when_catalog_allows() {
        // Only two simple veg lunches exist, so a third day would relax variety.
        let catalog = builtin_catalog();
        let mut c = student_veg();
        c.number_of_days = 2;
        for seed in 0..20 {
            let plan = select_plan(&catalog, &c, &mut seeded_rng(seed)).unwrap();
            for (_, _, meal) in plan.slots() {
                assert_eq!(meal.diet, DietClass::Veg, "seed {seed}: {}", meal.id);
                assert_eq!(meal.complexity, Complexity::Simple, "seed {seed}: {}", meal.id);
            }
        }
    }

    #[test]
    fn exhausted_chain_still_fills_every_slot() {
        let catalog = hostile_catalog();
        let plan = select_plan(&catalog, &student_veg(), &mut seeded_rng(1)).unwrap();
        assert_eq!(plan.day_count(), 3);
        assert!(plan.slots().all(|(_, _, m)| m.diet == DietClass::NonVeg));
    }

    #[test]
    fn rejects_invalid_day_count() {
        let catalog = builtin_catalog();
        let mut c = student_veg();
        c.number_of_days = 4;
        assert!(matches!(
            select_plan(&catalog, &c, &mut seeded_rng(0)),
            Err(PlanError::InvalidDays { days: 4, .. })
        ));
    }
}
