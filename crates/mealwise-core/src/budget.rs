//! Coarse plan cost estimate and feasibility check.

use serde::{Deserialize, Serialize};

use crate::plan::MealPlan;

/// Reason attached to a plan the fallback planner rebuilt.
pub const FALLBACK_REASON: &str =
    "Adjusted to budget-friendly alternatives using more staples and simpler meals.";

/// Whether a plan fits the daily budget, and why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetStatus {
    pub feasible: bool,
    pub reason: String,
    /// Average estimated cost per day. Absent for fallback plans, which are
    /// accepted without re-estimation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_daily_cost: Option<f64>,
}

impl BudgetStatus {
    /// Status reported for a fallback plan.
    pub fn fallback() -> Self {
        Self {
            feasible: true,
            reason: FALLBACK_REASON.to_owned(),
            estimated_daily_cost: None,
        }
    }
}

/// Average daily cost: each meal costs its tier's daily figure divided by 3.
pub fn estimate_daily_cost(plan: &MealPlan) -> f64 {
    let total: f64 = plan.slots().map(|(_, _, m)| m.budget_tier.meal_cost()).sum();
    total / plan.day_count() as f64
}

/// Judge `plan` against `budget_per_day`.
pub fn validate(plan: &MealPlan, budget_per_day: f64) -> BudgetStatus {
    let avg = estimate_daily_cost(plan);
    let budget = format_amount(budget_per_day);
    if avg <= budget_per_day {
        BudgetStatus {
            feasible: true,
            reason: format!(
                "Plan fits within ₹{budget}/day budget. Focuses on economical ingredients and home cooking."
            ),
            estimated_daily_cost: Some(avg),
        }
    } else {
        BudgetStatus {
            feasible: false,
            reason: format!(
                "Estimated cost exceeds ₹{budget}/day budget. Consider simpler meals or adjust budget."
            ),
            estimated_daily_cost: Some(avg),
        }
    }
}

/// Whole amounts print without a fractional part.
pub fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{amount:.0}")
    } else {
        format!("{amount:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mealwise_catalog::{BudgetTier, MealSlot};
    use mealwise_test_utils::MealBuilder;

    use crate::plan::DayMeals;

    fn plan_of(tiers: &[[BudgetTier; 3]]) -> MealPlan {
        let days = tiers
            .iter()
            .enumerate()
            .map(|(i, [b, l, d])| DayMeals {
                day: i as u8 + 1,
                breakfast: MealBuilder::new("b", MealSlot::Breakfast).tier(*b).build(),
                lunch: MealBuilder::new("l", MealSlot::Lunch).tier(*l).build(),
                dinner: MealBuilder::new("d", MealSlot::Dinner).tier(*d).build(),
            })
            .collect();
        MealPlan::new(days).unwrap()
    }

    #[test]
    fn all_low_two_days_averages_150() {
        let plan = plan_of(&[[BudgetTier::Low; 3], [BudgetTier::Low; 3]]);
        assert!((estimate_daily_cost(&plan) - 150.0).abs() < 1e-9);

        assert!(validate(&plan, 150.0).feasible);
        assert!(!validate(&plan, 149.0).feasible);
    }

    #[test]
    fn mixed_tiers_average_per_day() {
        // (50 + 100 + 166.67) + (50 + 50 + 50) = 466.67 over 2 days
        let plan = plan_of(&[
            [BudgetTier::Low, BudgetTier::Medium, BudgetTier::High],
            [BudgetTier::Low; 3],
        ]);
        let avg = estimate_daily_cost(&plan);
        assert!((avg - 233.333).abs() < 0.01, "got {avg}");
    }

    #[test]
    fn reasons_cite_the_budget() {
        let plan = plan_of(&[[BudgetTier::High; 3]]);
        let ok = validate(&plan, 600.0);
        assert!(ok.feasible);
        assert!(ok.reason.contains("₹600/day"), "got: {}", ok.reason);

        let bad = validate(&plan, 250.5);
        assert!(!bad.feasible);
        assert!(bad.reason.contains("₹250.50/day"), "got: {}", bad.reason);
        assert!(bad.reason.contains("simpler meals"));
    }

    #[test]
    fn fallback_status_is_feasible() {
        let s = BudgetStatus::fallback();
        assert!(s.feasible);
        assert_eq!(s.reason, FALLBACK_REASON);
        assert!(s.estimated_daily_cost.is_none());
    }
}
