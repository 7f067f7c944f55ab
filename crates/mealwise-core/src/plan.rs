//! The finalized meal plan.
//!
//! A plan is built whole and never mutated in place: editing a slot returns a
//! new plan. Deserialization re-checks the shape so a hand-edited plan file
//! cannot smuggle in a missing day or a lunch dish in the dinner slot.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use mealwise_catalog::{MealRecord, MealSlot};

use crate::constraints::{MAX_DAYS, contains_ignore_case};
use crate::error::PlanError;

/// One day's three meals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayMeals {
    /// 1-based day index.
    pub day: u8,
    pub breakfast: MealRecord,
    pub lunch: MealRecord,
    pub dinner: MealRecord,
}

impl DayMeals {
    /// Fill a day slot by slot, in serving order.
    pub fn try_build<F>(day: u8, mut choose: F) -> Result<Self, PlanError>
    where
        F: FnMut(MealSlot) -> Result<MealRecord, PlanError>,
    {
        Ok(Self {
            day,
            breakfast: choose(MealSlot::Breakfast)?,
            lunch: choose(MealSlot::Lunch)?,
            dinner: choose(MealSlot::Dinner)?,
        })
    }

    pub fn meal(&self, slot: MealSlot) -> &MealRecord {
        match slot {
            MealSlot::Breakfast => &self.breakfast,
            MealSlot::Lunch => &self.lunch,
            MealSlot::Dinner => &self.dinner,
        }
    }

    /// Meals in serving order.
    pub fn meals(&self) -> [(MealSlot, &MealRecord); 3] {
        [
            (MealSlot::Breakfast, &self.breakfast),
            (MealSlot::Lunch, &self.lunch),
            (MealSlot::Dinner, &self.dinner),
        ]
    }

    fn check(&self) -> Result<(), PlanError> {
        for (slot, meal) in self.meals() {
            if meal.slot != slot {
                return Err(PlanError::SlotMismatch {
                    meal: meal.id.clone(),
                    expected: slot,
                    found: meal.slot,
                });
            }
        }
        Ok(())
    }
}

/// A fully populated plan of 1..=3 days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PlanRepr")]
pub struct MealPlan {
    days: Vec<DayMeals>,
}

#[derive(Deserialize)]
struct PlanRepr {
    days: Vec<DayMeals>,
}

impl TryFrom<PlanRepr> for MealPlan {
    type Error = PlanError;

    fn try_from(repr: PlanRepr) -> Result<Self, Self::Error> {
        MealPlan::new(repr.days)
    }
}

impl MealPlan {
    /// Check day numbering and slot assignment.
    pub fn new(days: Vec<DayMeals>) -> Result<Self, PlanError> {
        let count = days.len();
        if count == 0 || count > usize::from(MAX_DAYS) {
            return Err(PlanError::InvalidDays {
                days: u8::try_from(count).unwrap_or(u8::MAX),
                max: MAX_DAYS,
            });
        }
        for (idx, day) in days.iter().enumerate() {
            let expected = idx as u8 + 1;
            if day.day != expected {
                return Err(PlanError::DayOutOfSequence {
                    expected,
                    found: day.day,
                });
            }
            day.check()?;
        }
        Ok(Self { days })
    }

    pub fn days(&self) -> &[DayMeals] {
        &self.days
    }

    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    /// Look up a day by its 1-based index.
    pub fn day(&self, day: u8) -> Result<&DayMeals, PlanError> {
        usize::from(day)
            .checked_sub(1)
            .and_then(|idx| self.days.get(idx))
            .ok_or(PlanError::DayOutOfRange {
                day,
                days: self.days.len(),
            })
    }

    pub fn meal(&self, day: u8, slot: MealSlot) -> Result<&MealRecord, PlanError> {
        Ok(self.day(day)?.meal(slot))
    }

    /// Every `(day, slot, meal)` in day then serving order.
    pub fn slots(&self) -> impl Iterator<Item = (u8, MealSlot, &MealRecord)> {
        self.days
            .iter()
            .flat_map(|d| d.meals().into_iter().map(move |(slot, meal)| (d.day, slot, meal)))
    }

    /// A copy of this plan with one slot replaced.
    pub fn with_meal(&self, day: u8, slot: MealSlot, meal: MealRecord) -> Result<Self, PlanError> {
        if meal.slot != slot {
            return Err(PlanError::SlotMismatch {
                meal: meal.id,
                expected: slot,
                found: meal.slot,
            });
        }
        self.day(day)?;

        let mut days = self.days.clone();
        let target = &mut days[usize::from(day) - 1];
        match slot {
            MealSlot::Breakfast => target.breakfast = meal,
            MealSlot::Lunch => target.lunch = meal,
            MealSlot::Dinner => target.dinner = meal,
        }
        Ok(Self { days })
    }

    /// Distinct ingredients across the plan, first spelling wins, in
    /// order of first appearance.
    pub fn ingredients(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for (_, _, meal) in self.slots() {
            for ing in &meal.ingredients {
                if seen.insert(ing.to_lowercase()) {
                    out.push(ing.as_str());
                }
            }
        }
        out
    }
}

/// Locked ingredients that actually appear somewhere in `plan`, in the
/// caller's order.
pub fn locked_ingredients_used<'a>(plan: &MealPlan, locked: &'a [String]) -> Vec<&'a str> {
    let used = plan.ingredients();
    locked
        .iter()
        .filter(|l| contains_ignore_case(&used, l))
        .map(String::as_str)
        .collect()
}
