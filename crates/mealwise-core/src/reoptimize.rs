//! Single-meal swaps and whole-plan re-optimization.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use mealwise_catalog::{BudgetTier, MealCatalog, MealRecord, ParseEnumError};

use crate::constraints::UserConstraints;
use crate::error::PlanError;
use crate::plan::{DayMeals, MealPlan};
use crate::select::filters::{self, Pool};
use crate::select::pick;

/// Ingredients that qualify a dish for the protein goal.
pub const PROTEIN_INGREDIENTS: [&str; 7] = [
    "Chicken",
    "Eggs",
    "Paneer",
    "Fish",
    "Lentils",
    "Chickpeas",
    "Tofu",
];

/// How many of the quickest dishes the fastest goal draws from.
pub const FASTEST_POOL: usize = 5;

/// Goal for a swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptimizeFor {
    Cheapest,
    Fastest,
    Protein,
}

impl OptimizeFor {
    fn narrow<'c>(self, mut pool: Pool<'c>) -> Pool<'c> {
        match self {
            Self::Cheapest => filters::within_tier(pool, BudgetTier::Low),
            Self::Fastest => {
                pool.sort_by_key(|m| m.total_time_minutes());
                pool.truncate(FASTEST_POOL);
                pool
            }
            Self::Protein => pool
                .into_iter()
                .filter(|m| m.uses_any(&PROTEIN_INGREDIENTS))
                .collect(),
        }
    }
}

impl fmt::Display for OptimizeFor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Cheapest => "cheapest",
            Self::Fastest => "fastest",
            Self::Protein => "protein",
        };
        f.write_str(s)
    }
}

impl FromStr for OptimizeFor {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cheapest" => Ok(Self::Cheapest),
            "fastest" => Ok(Self::Fastest),
            "protein" => Ok(Self::Protein),
            other => Err(ParseEnumError::new("optimization goal", other)),
        }
    }
}

/// Pick an alternative to `current` from the same slot. Never returns
/// `current` itself.
///
/// Candidates respect diet and dislikes, then the goal. If that leaves
/// nothing, any other meal of the slot is eligible.
pub fn swap_one<R: Rng + ?Sized>(
    catalog: &MealCatalog,
    current: &MealRecord,
    constraints: &UserConstraints,
    goal: Option<OptimizeFor>,
    rng: &mut R,
) -> Result<MealRecord, PlanError> {
    let others: Pool<'_> = catalog
        .by_slot(current.slot)
        .into_iter()
        .filter(|m| m.id != current.id)
        .collect();

    let mut pool = filters::without_dislikes(
        filters::by_diet(others.clone(), constraints.diet_type),
        &constraints.dislikes,
    );
    if let Some(goal) = goal {
        pool = goal.narrow(pool);
    }
    if pool.is_empty() {
        debug!(meal = %current.id, "no goal-matching alternative, relaxing to any other meal");
        pool = others;
    }

    pick(&pool, rng)
        .cloned()
        .ok_or_else(|| PlanError::NoAlternative(current.id.clone()))
}

/// Swap every slot toward `goal`, in day then serving order.
///
/// A proposed alternative already placed earlier in this pass is declined
/// and the original meal stays.
pub fn reoptimize_all<R: Rng + ?Sized>(
    catalog: &MealCatalog,
    plan: &MealPlan,
    constraints: &UserConstraints,
    goal: Option<OptimizeFor>,
    rng: &mut R,
) -> Result<MealPlan, PlanError> {
    let mut used = HashSet::new();
    let mut days = Vec::with_capacity(plan.day_count());
    for day in plan.days() {
        days.push(DayMeals::try_build(day.day, |slot| {
            let original = day.meal(slot);
            let alternative = swap_one(catalog, original, constraints, goal, rng)?;
            let chosen = if used.contains(&alternative.id) {
                original.clone()
            } else {
                alternative
            };
            used.insert(chosen.id.clone());
            Ok(chosen)
        })?);
    }
    MealPlan::new(days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mealwise_catalog::{DietClass, MealSlot};
    use mealwise_test_utils::{MealBuilder, builtin_catalog, catalog, seeded_rng};

    use crate::constraints::{DietType, Persona};
    use crate::select::select_plan;

    fn constraints(diet: DietType) -> UserConstraints {
        UserConstraints {
            diet_type: diet,
            dislikes: vec![],
            pantry_items: vec![],
            locked_ingredients: vec![],
            budget_per_day: 400.0,
            persona: Persona::WorkingProfessional,
            number_of_days: 2,
        }
    }

    #[test]
    fn swap_never_returns_current() {
        let catalog = builtin_catalog();
        let current = catalog.get("l1").unwrap();
        for seed in 0..50 {
            for goal in [None, Some(OptimizeFor::Cheapest), Some(OptimizeFor::Fastest), Some(OptimizeFor::Protein)] {
                let alt = swap_one(&catalog, current, &constraints(DietType::Veg), goal, &mut seeded_rng(seed))
                    .unwrap();
                assert_ne!(alt.id, current.id);
                assert_eq!(alt.slot, MealSlot::Lunch);
            }
        }
    }

    #[test]
    fn cheapest_goal_yields_low_tier() {
        let catalog = builtin_catalog();
        let current = catalog.get("d2").unwrap();
        for seed in 0..20 {
            let alt = swap_one(
                &catalog,
                current,
                &constraints(DietType::NonVeg),
                Some(OptimizeFor::Cheapest),
                &mut seeded_rng(seed),
            )
            .unwrap();
            assert_eq!(alt.budget_tier, BudgetTier::Low, "seed {seed}: {}", alt.id);
        }
    }

    #[test]
    fn fastest_goal_draws_from_five_quickest() {
        let meals: Vec<_> = (1..=8)
            .map(|n| {
                MealBuilder::new(&format!("b{n}"), MealSlot::Breakfast)
                    .times(n * 5, 5)
                    .build()
            })
            .chain([
                MealBuilder::new("l1", MealSlot::Lunch).build(),
                MealBuilder::new("l2", MealSlot::Lunch).build(),
                MealBuilder::new("d1", MealSlot::Dinner).build(),
                MealBuilder::new("d2", MealSlot::Dinner).build(),
            ])
            .collect();
        let catalog = catalog(meals);
        let current = catalog.get("b1").unwrap().clone();
        for seed in 0..30 {
            let alt = swap_one(
                &catalog,
                &current,
                &constraints(DietType::NoPreference),
                Some(OptimizeFor::Fastest),
                &mut seeded_rng(seed),
            )
            .unwrap();
            assert!(
                ["b2", "b3", "b4", "b5", "b6"].contains(&alt.id.as_str()),
                "seed {seed}: {}",
                alt.id
            );
        }
    }

    #[test]
    fn protein_goal_yields_protein_dish() {
        let catalog = builtin_catalog();
        let current = catalog.get("b8").unwrap();
        for seed in 0..20 {
            let alt = swap_one(
                &catalog,
                current,
                &constraints(DietType::NoPreference),
                Some(OptimizeFor::Protein),
                &mut seeded_rng(seed),
            )
            .unwrap();
            assert!(alt.uses_any(&PROTEIN_INGREDIENTS), "seed {seed}: {}", alt.id);
        }
    }

    #[test]
    fn empty_goal_pool_relaxes_to_any_other_meal() {
        // Veg requester, the only alternative is non-veg.
        let catalog = catalog(vec![
            MealBuilder::new("b1", MealSlot::Breakfast).build(),
            MealBuilder::new("b2", MealSlot::Breakfast)
                .diet(DietClass::NonVeg)
                .build(),
            MealBuilder::new("l1", MealSlot::Lunch).build(),
            MealBuilder::new("l2", MealSlot::Lunch).build(),
            MealBuilder::new("d1", MealSlot::Dinner).build(),
            MealBuilder::new("d2", MealSlot::Dinner).build(),
        ]);
        let current = catalog.get("b1").unwrap().clone();
        let alt = swap_one(&catalog, &current, &constraints(DietType::Veg), None, &mut seeded_rng(0))
            .unwrap();
        assert_eq!(alt.id, "b2");
    }

    #[test]
    fn reoptimize_keeps_original_on_collision() {
        // Two meals per slot: day 1 swaps to the other meal, day 2 proposes
        // the same one and must keep its original.
        let catalog = catalog(vec![
            MealBuilder::new("b1", MealSlot::Breakfast).build(),
            MealBuilder::new("b2", MealSlot::Breakfast).build(),
            MealBuilder::new("l1", MealSlot::Lunch).build(),
            MealBuilder::new("l2", MealSlot::Lunch).build(),
            MealBuilder::new("d1", MealSlot::Dinner).build(),
            MealBuilder::new("d2", MealSlot::Dinner).build(),
        ]);
        let day = |n| DayMeals {
            day: n,
            breakfast: catalog.get("b1").unwrap().clone(),
            lunch: catalog.get("l1").unwrap().clone(),
            dinner: catalog.get("d1").unwrap().clone(),
        };
        let plan = MealPlan::new(vec![day(1), day(2)]).unwrap();
        let out = reoptimize_all(&catalog, &plan, &constraints(DietType::Veg), None, &mut seeded_rng(9))
            .unwrap();

        assert_eq!(out.meal(1, MealSlot::Breakfast).unwrap().id, "b2");
        assert_eq!(out.meal(2, MealSlot::Breakfast).unwrap().id, "b1");
        assert_eq!(out.meal(2, MealSlot::Dinner).unwrap().id, "d1");
    }

    #[test]
    fn reoptimize_preserves_shape() {
        let catalog = builtin_catalog();
        let c = constraints(DietType::NonVeg);
        let plan = select_plan(&catalog, &c, &mut seeded_rng(2)).unwrap();
        let out = reoptimize_all(&catalog, &plan, &c, Some(OptimizeFor::Fastest), &mut seeded_rng(3))
            .unwrap();
        assert_eq!(out.day_count(), plan.day_count());
        for (_, slot, meal) in out.slots() {
            assert_eq!(meal.slot, slot);
        }
    }

    #[test]
    fn goal_parses() {
        assert_eq!("fastest".parse::<OptimizeFor>().unwrap(), OptimizeFor::Fastest);
        assert!("healthiest".parse::<OptimizeFor>().is_err());
    }
}
