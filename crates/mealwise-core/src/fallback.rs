//! Budget-safe plan rebuild, used when the selected plan is over budget.

use std::collections::HashSet;

use rand::Rng;

use mealwise_catalog::{BudgetTier, MealCatalog, MealRecord, MealSlot};

use crate::constraints::UserConstraints;
use crate::error::PlanError;
use crate::plan::{DayMeals, MealPlan};
use crate::select::filters::{self, Pool};
use crate::select::pick;

/// Pick a low-tier meal for `slot`.
///
/// Pool order: low tier matching diet and dislikes and not yet used; then any
/// low-tier meal of the slot; then any meal of the slot.
pub fn select_budget_meal<R: Rng + ?Sized>(
    catalog: &MealCatalog,
    constraints: &UserConstraints,
    slot: MealSlot,
    used: &HashSet<String>,
    rng: &mut R,
) -> Result<MealRecord, PlanError> {
    let slot_pool = catalog.by_slot(slot);
    let low: Pool<'_> = filters::within_tier(slot_pool.clone(), BudgetTier::Low);

    let preferred = filters::unused(
        filters::without_dislikes(
            filters::by_diet(low.clone(), constraints.diet_type),
            &constraints.dislikes,
        ),
        used,
    );

    let pool = [preferred, low, slot_pool]
        .into_iter()
        .find(|p| !p.is_empty())
        .unwrap_or_default();
    pick(&pool, rng).cloned().ok_or(PlanError::NoCandidates(slot))
}

/// Rebuild every slot from budget-friendly meals.
pub fn fallback_plan<R: Rng + ?Sized>(
    catalog: &MealCatalog,
    constraints: &UserConstraints,
    rng: &mut R,
) -> Result<MealPlan, PlanError> {
    constraints.validate()?;

    let mut used = HashSet::new();
    let mut days = Vec::with_capacity(usize::from(constraints.number_of_days));
    for day in 1..=constraints.number_of_days {
        days.push(DayMeals::try_build(day, |slot| {
            let meal = select_budget_meal(catalog, constraints, slot, &used, rng)?;
            used.insert(meal.id.clone());
            Ok(meal)
        })?);
    }
    MealPlan::new(days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mealwise_catalog::DietClass;
    use mealwise_test_utils::{builtin_catalog, hostile_catalog, seeded_rng, tiered_catalog};

    use crate::constraints::{DietType, Persona};

    fn constraints(days: u8) -> UserConstraints {
        UserConstraints {
            diet_type: DietType::Veg,
            dislikes: vec!["Potato".to_owned()],
            pantry_items: vec![],
            locked_ingredients: vec![],
            budget_per_day: 100.0,
            persona: Persona::Household,
            number_of_days: days,
        }
    }

    #[test]
    fn builtin_fallback_is_low_veg_and_dislike_free() {
        let catalog = builtin_catalog();
        for seed in 0..10 {
            let plan = fallback_plan(&catalog, &constraints(2), &mut seeded_rng(seed)).unwrap();
            for (_, _, meal) in plan.slots() {
                assert_eq!(meal.budget_tier, BudgetTier::Low, "seed {seed}: {}", meal.id);
                assert_eq!(meal.diet, DietClass::Veg, "seed {seed}: {}", meal.id);
                assert!(!meal.has_ingredient("potato"), "seed {seed}: {}", meal.id);
            }
        }
    }

    #[test]
    fn exhausted_preferred_pool_uses_any_low_meal() {
        // One low meal per slot: day 2 cannot avoid reuse.
        let catalog = tiered_catalog();
        let plan = fallback_plan(&catalog, &constraints(2), &mut seeded_rng(3)).unwrap();
        assert!(plan.slots().all(|(_, _, m)| m.budget_tier == BudgetTier::Low));
        assert_eq!(plan.meal(2, MealSlot::Lunch).unwrap().id, "ll");
    }

    #[test]
    fn no_low_meals_uses_any_meal_of_the_slot() {
        let catalog = hostile_catalog();
        let plan = fallback_plan(&catalog, &constraints(1), &mut seeded_rng(0)).unwrap();
        assert_eq!(plan.day_count(), 1);
        assert!(plan.slots().all(|(_, s, m)| m.slot == s));
    }
}
