//! Candidate filter stages.
//!
//! Each stage is a pure function from a candidate pool to a (possibly
//! empty) narrower pool. The engines decide what to do when a stage empties
//! the pool.

use std::collections::HashSet;
use std::fmt;

use mealwise_catalog::{BudgetTier, Complexity, MealRecord};

use crate::constraints::{DietType, UserConstraints};

/// A named step of the selection chain, in application order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Diet,
    Dislikes,
    Budget,
    Complexity,
    Variety,
    LockPriority,
}

impl Stage {
    pub const CHAIN: [Stage; 6] = [
        Stage::Diet,
        Stage::Dislikes,
        Stage::Budget,
        Stage::Complexity,
        Stage::Variety,
        Stage::LockPriority,
    ];
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Diet => "diet",
            Self::Dislikes => "dislikes",
            Self::Budget => "budget",
            Self::Complexity => "complexity",
            Self::Variety => "variety",
            Self::LockPriority => "lock-priority",
        };
        f.write_str(s)
    }
}

pub type Pool<'c> = Vec<&'c MealRecord>;

pub fn by_diet(pool: Pool<'_>, diet: DietType) -> Pool<'_> {
    pool.into_iter().filter(|m| diet.admits(m.diet)).collect()
}

/// Drop meals containing any disliked ingredient (case-insensitive).
pub fn without_dislikes<'c>(pool: Pool<'c>, dislikes: &[String]) -> Pool<'c> {
    pool.into_iter().filter(|m| !m.uses_any(dislikes)).collect()
}

/// Keep meals at or below `ceiling`.
pub fn within_tier(pool: Pool<'_>, ceiling: BudgetTier) -> Pool<'_> {
    pool.into_iter()
        .filter(|m| m.budget_tier <= ceiling)
        .collect()
}

pub fn with_complexity<'c>(pool: Pool<'c>, allowed: &[Complexity]) -> Pool<'c> {
    pool.into_iter()
        .filter(|m| allowed.contains(&m.complexity))
        .collect()
}

/// Drop meals whose id is already in `used`.
pub fn unused<'c>(pool: Pool<'c>, used: &HashSet<String>) -> Pool<'c> {
    pool.into_iter().filter(|m| !used.contains(&m.id)).collect()
}

/// Restrict to meals using a locked ingredient, if any do. Never empties a
/// non-empty pool.
pub fn prefer_locked<'c>(pool: Pool<'c>, locked: &[String]) -> Pool<'c> {
    if locked.is_empty() {
        return pool;
    }
    let (hits, misses): (Pool<'c>, Pool<'c>) = pool.into_iter().partition(|m| m.uses_any(locked));
    if hits.is_empty() { misses } else { hits }
}

/// Apply one stage.
pub fn apply<'c>(
    stage: Stage,
    pool: Pool<'c>,
    constraints: &UserConstraints,
    used: &HashSet<String>,
) -> Pool<'c> {
    match stage {
        Stage::Diet => by_diet(pool, constraints.diet_type),
        Stage::Dislikes => without_dislikes(pool, &constraints.dislikes),
        Stage::Budget => within_tier(pool, constraints.budget_ceiling()),
        Stage::Complexity => with_complexity(pool, constraints.persona.allowed_complexities()),
        Stage::Variety => unused(pool, used),
        Stage::LockPriority => prefer_locked(pool, &constraints.locked_ingredients),
    }
}

/// Run the full chain. Returns the stage that emptied the pool on failure.
pub fn narrow<'c>(
    pool: Pool<'c>,
    constraints: &UserConstraints,
    used: &HashSet<String>,
) -> Result<Pool<'c>, Stage> {
    let mut pool = pool;
    for stage in Stage::CHAIN {
        pool = apply(stage, pool, constraints, used);
        if pool.is_empty() {
            return Err(stage);
        }
    }
    Ok(pool)
}
