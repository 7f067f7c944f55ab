//! Plan generation: select, check the budget, fall back if needed.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use mealwise_catalog::MealCatalog;

use crate::budget::{self, BudgetStatus};
use crate::constraints::UserConstraints;
use crate::error::PlanError;
use crate::fallback::fallback_plan;
use crate::plan::{MealPlan, locked_ingredients_used};
use crate::select::select_plan;

/// Locked ingredient count the planner is tuned for.
pub const RECOMMENDED_LOCKED: usize = 3;

/// The outcome of one generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedPlan {
    pub plan: MealPlan,
    pub budget_status: BudgetStatus,
    /// True when the budget fallback replaced the selected plan.
    pub is_fallback: bool,
}

/// Generate a plan for `constraints`.
pub fn generate_plan<R: Rng + ?Sized>(
    catalog: &MealCatalog,
    constraints: &UserConstraints,
    rng: &mut R,
) -> Result<GeneratedPlan, PlanError> {
    constraints.validate()?;

    if constraints.locked_ingredients.len() < RECOMMENDED_LOCKED {
        warn!(
            locked = constraints.locked_ingredients.len(),
            "fewer than {RECOMMENDED_LOCKED} locked ingredients supplied"
        );
    }

    let plan = select_plan(catalog, constraints, rng)?;
    let status = budget::validate(&plan, constraints.budget_per_day);

    let generated = if status.feasible {
        GeneratedPlan {
            plan,
            budget_status: status,
            is_fallback: false,
        }
    } else {
        info!(
            budget = constraints.budget_per_day,
            estimated = status.estimated_daily_cost,
            "plan over budget, rebuilding from budget-friendly meals"
        );
        GeneratedPlan {
            plan: fallback_plan(catalog, constraints, rng)?,
            budget_status: BudgetStatus::fallback(),
            is_fallback: true,
        }
    };

    if !constraints.locked_ingredients.is_empty()
        && locked_ingredients_used(&generated.plan, &constraints.locked_ingredients).is_empty()
    {
        warn!("none of the locked ingredients made it into the plan");
    }

    Ok(generated)
}
