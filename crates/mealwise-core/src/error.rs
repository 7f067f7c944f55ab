use thiserror::Error;

use mealwise_catalog::MealSlot;

/// Errors surfaced by the planning engines.
///
/// Everything except the boundary checks is unreachable with a validated
/// catalog; they exist so a bad catalog fails loudly instead of panicking.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlanError {
    #[error("number of days must be between 1 and {max}, got {days}")]
    InvalidDays { days: u8, max: u8 },

    #[error("budget per day must be a positive amount, got {0}")]
    InvalidBudget(f64),

    #[error("day {day} is outside the plan (1..={days})")]
    DayOutOfRange { day: u8, days: usize },

    #[error("expected day {expected} at this position in the plan, found day {found}")]
    DayOutOfSequence { expected: u8, found: u8 },

    #[error("meal {meal:?} is a {found} dish and cannot fill the {expected} slot")]
    SlotMismatch {
        meal: String,
        expected: MealSlot,
        found: MealSlot,
    },

    #[error("no {0} meal available in the catalog")]
    NoCandidates(MealSlot),

    #[error("no alternative to meal {0:?} in the catalog")]
    NoAlternative(String),
}
