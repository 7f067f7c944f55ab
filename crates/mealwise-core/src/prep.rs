//! Which meals can be partly cooked ahead and which are best made fresh.

use serde::Serialize;

use mealwise_catalog::{Complexity, MealSlot, same_ingredient};

use crate::plan::MealPlan;

/// Staples whose presence makes a simple dish batchable.
pub const BATCH_BASES: [&str; 4] = ["Rice", "Lentils", "Chickpeas", "Kidney Beans"];

/// Ingredients worth preparing in bulk for a batchable dish.
pub const BATCH_ITEMS: [&str; 5] = ["Rice", "Lentils", "Chickpeas", "Kidney Beans", "Potato"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchEntry {
    pub meal: String,
    pub day: u8,
    pub slot: MealSlot,
    pub batch_items: Vec<String>,
    pub reason: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FreshEntry {
    pub meal: String,
    pub day: u8,
    pub slot: MealSlot,
    pub reason: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PrepSchedule {
    pub batch: Vec<BatchEntry>,
    pub fresh: Vec<FreshEntry>,
}

/// Sort every slot of `plan` into batch or fresh.
pub fn prep_schedule(plan: &MealPlan) -> PrepSchedule {
    let mut schedule = PrepSchedule::default();
    for (day, slot, meal) in plan.slots() {
        let simple = meal.complexity == Complexity::Simple;
        if simple && meal.uses_any(&BATCH_BASES) {
            schedule.batch.push(BatchEntry {
                meal: meal.name.clone(),
                day,
                slot,
                batch_items: meal
                    .ingredients
                    .iter()
                    .filter(|i| BATCH_ITEMS.iter().any(|b| same_ingredient(b, i)))
                    .cloned()
                    .collect(),
                reason: "Base ingredients can be prepared in advance",
            });
        } else {
            schedule.fresh.push(FreshEntry {
                meal: meal.name.clone(),
                day,
                slot,
                reason: if simple {
                    "Quick to make fresh"
                } else {
                    "Best prepared just before serving"
                },
            });
        }
    }
    schedule
}

#[cfg(test)]
mod tests {
    use super::*;
    use mealwise_test_utils::MealBuilder;

    use crate::plan::DayMeals;

    #[test]
    fn splits_batch_and_fresh() {
        let plan = MealPlan::new(vec![DayMeals {
            day: 1,
            breakfast: MealBuilder::new("b", MealSlot::Breakfast)
                .ingredients(&["Oats", "Milk"])
                .build(),
            lunch: MealBuilder::new("l", MealSlot::Lunch)
                .name("Dal Rice")
                .ingredients(&["Rice", "Lentils", "Onion", "Potato"])
                .build(),
            dinner: MealBuilder::new("d", MealSlot::Dinner)
                .name("Rajma")
                .ingredients(&["Kidney Beans", "Rice"])
                .complexity(Complexity::Moderate)
                .build(),
        }])
        .unwrap();

        let s = prep_schedule(&plan);
        assert_eq!(s.batch.len(), 1);
        assert_eq!(s.batch[0].meal, "Dal Rice");
        assert_eq!(s.batch[0].batch_items, vec!["Rice", "Lentils", "Potato"]);

        assert_eq!(s.fresh.len(), 2);
        assert_eq!(s.fresh[0].reason, "Quick to make fresh");
        assert_eq!(s.fresh[1].meal, "Rajma");
        assert_eq!(s.fresh[1].reason, "Best prepared just before serving");
    }
}
