//! Meal plan selection and derivation.
//!
//! [`generate::generate_plan`] picks a plan under the user's constraints and
//! budget; [`reoptimize`] swaps meals in an existing plan; and
//! [`pipeline::derive_artifacts`] turns a finalized plan into a grocery list,
//! prep schedule, reminders, a cooking flow, and calendar events.
//!
//! Randomized stages take the RNG as a parameter, so a seeded generator
//! reproduces a plan exactly.

pub mod budget;
pub mod calendar;
pub mod constraints;
pub mod cooking_flow;
pub mod error;
pub mod fallback;
pub mod generate;
pub mod grocery;
pub mod hhmm;
pub mod pipeline;
pub mod plan;
pub mod prep;
pub mod reminders;
pub mod reoptimize;
pub mod select;

pub use budget::BudgetStatus;
pub use constraints::{
    ContextSettings, DietType, EnergyLevel, Persona, PreferredTime, ReminderSettings,
    UserConstraints,
};
pub use error::PlanError;
pub use generate::{GeneratedPlan, generate_plan};
pub use pipeline::{Artifacts, PlanInputs, derive_artifacts, personalization_summary};
pub use plan::{DayMeals, MealPlan};
pub use reoptimize::{OptimizeFor, reoptimize_all, swap_one};
