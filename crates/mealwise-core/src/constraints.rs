//! Caller-owned inputs: user constraints, reminder preferences, and
//! cooking context. The engines only ever borrow these.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use mealwise_catalog::{BudgetTier, Complexity, DietClass, ParseEnumError, same_ingredient};

use crate::error::PlanError;

/// Longest plan the engines will build.
pub const MAX_DAYS: u8 = 3;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// The requester's diet preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DietType {
    Veg,
    NonVeg,
    NoPreference,
}

impl DietType {
    /// Whether a dish of class `diet` may be served. Non-veg requesters
    /// still receive veg dishes.
    pub fn admits(self, diet: DietClass) -> bool {
        match self {
            Self::Veg => diet == DietClass::Veg,
            Self::NonVeg | Self::NoPreference => true,
        }
    }
}

impl fmt::Display for DietType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Veg => "veg",
            Self::NonVeg => "non-veg",
            Self::NoPreference => "no-preference",
        };
        f.write_str(s)
    }
}

impl FromStr for DietType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "veg" => Ok(Self::Veg),
            "non-veg" => Ok(Self::NonVeg),
            "no-preference" => Ok(Self::NoPreference),
            other => Err(ParseEnumError::new("diet type", other)),
        }
    }
}

// ---------------------------------------------------------------------------

/// Coarse user archetype driving complexity and pacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Persona {
    WorkingProfessional,
    Student,
    Household,
}

impl Persona {
    /// Complexity tiers this persona may be served.
    pub fn allowed_complexities(self) -> &'static [Complexity] {
        match self {
            Self::WorkingProfessional => &[Complexity::Simple, Complexity::Moderate],
            Self::Student => &[Complexity::Simple],
            Self::Household => &[Complexity::Simple, Complexity::Moderate, Complexity::Complex],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::WorkingProfessional => "Working Professional",
            Self::Student => "Student",
            Self::Household => "Household/Family",
        }
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::WorkingProfessional => "working-professional",
            Self::Student => "student",
            Self::Household => "household",
        };
        f.write_str(s)
    }
}

impl FromStr for Persona {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "working-professional" => Ok(Self::WorkingProfessional),
            "student" => Ok(Self::Student),
            "household" => Ok(Self::Household),
            other => Err(ParseEnumError::new("persona", other)),
        }
    }
}

// ---------------------------------------------------------------------------

/// Self-reported cooking energy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergyLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl fmt::Display for EnergyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        };
        f.write_str(s)
    }
}

impl FromStr for EnergyLevel {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(ParseEnumError::new("energy level", other)),
        }
    }
}

// ---------------------------------------------------------------------------

/// When the user prefers to receive the shopping reminder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreferredTime {
    #[default]
    Morning,
    Evening,
}

impl fmt::Display for PreferredTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Morning => "morning",
            Self::Evening => "evening",
        };
        f.write_str(s)
    }
}

impl FromStr for PreferredTime {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "morning" => Ok(Self::Morning),
            "evening" => Ok(Self::Evening),
            other => Err(ParseEnumError::new("preferred time", other)),
        }
    }
}

// ---------------------------------------------------------------------------
// Constraints
// ---------------------------------------------------------------------------

/// Everything the selection engines need to know about the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserConstraints {
    pub diet_type: DietType,
    #[serde(default)]
    pub dislikes: Vec<String>,
    #[serde(default)]
    pub pantry_items: Vec<String>,
    /// Ingredients the plan should favour. Three or more is the intended
    /// usage but is not enforced.
    #[serde(default)]
    pub locked_ingredients: Vec<String>,
    pub budget_per_day: f64,
    pub persona: Persona,
    pub number_of_days: u8,
}

impl UserConstraints {
    /// Reject inputs the engines cannot plan for.
    pub fn validate(&self) -> Result<(), PlanError> {
        if !(1..=MAX_DAYS).contains(&self.number_of_days) {
            return Err(PlanError::InvalidDays {
                days: self.number_of_days,
                max: MAX_DAYS,
            });
        }
        if !self.budget_per_day.is_finite() || self.budget_per_day <= 0.0 {
            return Err(PlanError::InvalidBudget(self.budget_per_day));
        }
        Ok(())
    }

    /// Most expensive tier the daily budget allows.
    pub fn budget_ceiling(&self) -> BudgetTier {
        budget_ceiling(self.budget_per_day)
    }
}

/// Map a daily budget to the highest affordable tier:
/// under 300 → low, under 500 → medium, otherwise high.
pub fn budget_ceiling(budget_per_day: f64) -> BudgetTier {
    if budget_per_day < 300.0 {
        BudgetTier::Low
    } else if budget_per_day < 500.0 {
        BudgetTier::Medium
    } else {
        BudgetTier::High
    }
}

pub(crate) fn contains_ignore_case<S: AsRef<str>>(haystack: &[S], needle: &str) -> bool {
    haystack
        .iter()
        .any(|item| same_ingredient(item.as_ref(), needle))
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Reminder preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderSettings {
    pub preferred_time: PreferredTime,
    /// Dinner start time.
    #[serde(with = "crate::hhmm")]
    pub cooking_window: NaiveTime,
    /// 1 = breakfast reminder only, 2 = breakfast and dinner.
    pub reminders_per_day: u8,
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self {
            preferred_time: PreferredTime::Morning,
            cooking_window: NaiveTime::from_hms_opt(18, 0, 0).unwrap_or(NaiveTime::MIN),
            reminders_per_day: 2,
        }
    }
}

/// Cooking context that shapes reminder wording and the summary lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextSettings {
    pub persona: Persona,
    pub energy_level: EnergyLevel,
    pub number_of_days: u8,
    pub city: String,
    /// Minutes available per meal, free text such as `30-60`.
    pub cooking_time_window: String,
}

impl ContextSettings {
    /// Context with defaults for everything the constraints don't carry.
    pub fn for_constraints(constraints: &UserConstraints) -> Self {
        Self {
            persona: constraints.persona,
            energy_level: EnergyLevel::default(),
            number_of_days: constraints.number_of_days,
            city: "Delhi".to_owned(),
            cooking_time_window: "30-60".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constraints() -> UserConstraints {
        UserConstraints {
            diet_type: DietType::Veg,
            dislikes: vec!["Mushroom".to_owned()],
            pantry_items: vec!["Rice".to_owned()],
            locked_ingredients: vec![],
            budget_per_day: 400.0,
            persona: Persona::Student,
            number_of_days: 2,
        }
    }

    #[test]
    fn diet_type_admission() {
        assert!(DietType::Veg.admits(DietClass::Veg));
        assert!(!DietType::Veg.admits(DietClass::NonVeg));
        assert!(DietType::NonVeg.admits(DietClass::Veg));
        assert!(DietType::NoPreference.admits(DietClass::NonVeg));
    }

    #[test]
    fn persona_complexities() {
        assert_eq!(Persona::Student.allowed_complexities(), &[Complexity::Simple]);
        assert_eq!(Persona::Household.allowed_complexities().len(), 3);
        assert!(
            !Persona::WorkingProfessional
                .allowed_complexities()
                .contains(&Complexity::Complex)
        );
    }

    #[test]
    fn budget_ceiling_thresholds() {
        assert_eq!(budget_ceiling(299.0), BudgetTier::Low);
        assert_eq!(budget_ceiling(300.0), BudgetTier::Medium);
        assert_eq!(budget_ceiling(499.99), BudgetTier::Medium);
        assert_eq!(budget_ceiling(500.0), BudgetTier::High);
    }

    #[test]
    fn validate_rejects_bad_days_and_budget() {
        let mut c = constraints();
        assert!(c.validate().is_ok());

        c.number_of_days = 0;
        assert_eq!(
            c.validate(),
            Err(PlanError::InvalidDays { days: 0, max: 3 })
        );
        c.number_of_days = 4;
        assert!(c.validate().is_err());

        c.number_of_days = 1;
        c.budget_per_day = 0.0;
        assert_eq!(c.validate(), Err(PlanError::InvalidBudget(0.0)));
        c.budget_per_day = f64::NAN;
        assert!(c.validate().is_err());
    }

    #[test]
    fn membership_ignores_case_beyond_ascii() {
        let c = constraints();
        assert!(contains_ignore_case(&c.dislikes, "mushroom"));
        assert!(contains_ignore_case(&c.pantry_items, "RICE"));
        assert!(contains_ignore_case(&["CRÈME FRAÎCHE"], "crème fraîche"));
        assert!(!contains_ignore_case(&["Creme"], "Crème"));
    }

    #[test]
    fn enums_parse_kebab_case() {
        assert_eq!("no-preference".parse::<DietType>().unwrap(), DietType::NoPreference);
        assert_eq!(
            "working-professional".parse::<Persona>().unwrap(),
            Persona::WorkingProfessional
        );
        assert_eq!("evening".parse::<PreferredTime>().unwrap(), PreferredTime::Evening);
        assert!("vegan".parse::<DietType>().is_err());
    }

    #[test]
    fn reminder_settings_serialize_window_as_hhmm() {
        let json = serde_json::to_string(&ReminderSettings::default()).unwrap();
        assert!(json.contains("\"cooking_window\":\"18:00\""), "got: {json}");
    }
}
