//! Derive every downstream artifact from a finalized plan.
//!
//! Artifacts are always rebuilt from scratch: after generation, after a
//! single swap, and after a full re-optimization.

use chrono::NaiveDate;
use serde::Serialize;

use mealwise_catalog::IngredientCatalog;

use crate::budget::format_amount;
use crate::calendar::{self, CalendarEvent};
use crate::constraints::{ContextSettings, ReminderSettings, UserConstraints};
use crate::cooking_flow::{self, CookingFlow};
use crate::grocery::{self, GroceryList};
use crate::plan::MealPlan;
use crate::prep::{PrepSchedule, prep_schedule};
use crate::reminders::{self, Reminder};

/// Everything derivation needs besides the plan.
#[derive(Debug, Clone, Copy)]
pub struct PlanInputs<'a> {
    pub constraints: &'a UserConstraints,
    pub reminders: &'a ReminderSettings,
    pub context: &'a ContextSettings,
    pub ingredients: &'a IngredientCatalog,
    /// Date of the shopping and prep events; plan day 1 is the day after.
    pub start_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Artifacts {
    pub grocery_list: GroceryList,
    pub prep_schedule: PrepSchedule,
    pub reminders: Vec<Reminder>,
    pub cooking_flow: CookingFlow,
    pub calendar_events: Vec<CalendarEvent>,
}

pub fn derive_artifacts(plan: &MealPlan, inputs: &PlanInputs<'_>) -> Artifacts {
    let grocery_list = grocery::build(plan, &inputs.constraints.pantry_items, inputs.ingredients);
    let prep_schedule = prep_schedule(plan);
    let reminders = reminders::schedule(
        plan,
        &grocery_list,
        &prep_schedule,
        inputs.reminders,
        inputs.context,
    );
    let cooking_flow = cooking_flow::compose(plan, &inputs.constraints.locked_ingredients);
    let calendar_events = calendar::build_events(plan, inputs.start_date);

    Artifacts {
        grocery_list,
        prep_schedule,
        reminders,
        cooking_flow,
        calendar_events,
    }
}

/// The three lines showing how the plan was tailored.
pub fn personalization_summary(constraints: &UserConstraints, context: &ContextSettings) -> [String; 3] {
    [
        format!(
            "Optimized for {} with {} energy cooking",
            context.persona.label(),
            context.energy_level
        ),
        format!(
            "Staying within ₹{}/day budget in {}",
            format_amount(constraints.budget_per_day),
            context.city
        ),
        format!(
            "Cooking time kept under {} minutes per meal",
            context.cooking_time_window
        ),
    ]
}
