//! The JSON file written by `mealwise plan --save` and rewritten by `swap`
//! and `reoptimize`.
//!
//! It carries the inputs alongside the plan so later commands re-derive
//! artifacts exactly as the original run did.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use mealwise_core::{BudgetStatus, ContextSettings, MealPlan, ReminderSettings, UserConstraints};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanFile {
    pub constraints: UserConstraints,
    pub context: ContextSettings,
    pub reminders: ReminderSettings,
    /// Shopping and prep day; plan day 1 follows it.
    pub start_date: NaiveDate,
    pub budget_status: BudgetStatus,
    #[serde(default)]
    pub is_fallback: bool,
    pub plan: MealPlan,
}

impl PlanFile {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read plan file: {}", path.display()))?;
        let file: Self = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse plan file: {}", path.display()))?;
        file.constraints
            .validate()
            .with_context(|| format!("invalid constraints in plan file: {}", path.display()))?;
        Ok(file)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize plan")?;
        std::fs::write(path, json + "\n")
            .with_context(|| format!("failed to write plan file: {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use mealwise_core::{DietType, Persona, budget, select};
    use mealwise_test_utils::{builtin_catalog, seeded_rng};

    fn sample() -> PlanFile {
        let constraints = UserConstraints {
            diet_type: DietType::Veg,
            dislikes: vec![],
            pantry_items: vec!["Rice".to_owned()],
            locked_ingredients: vec!["Rice".to_owned()],
            budget_per_day: 350.0,
            persona: Persona::Student,
            number_of_days: 2,
        };
        let plan = select::select_plan(&builtin_catalog(), &constraints, &mut seeded_rng(5)).unwrap();
        PlanFile {
            context: ContextSettings::for_constraints(&constraints),
            reminders: ReminderSettings::default(),
            start_date: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
            budget_status: budget::validate(&plan, constraints.budget_per_day),
            is_fallback: false,
            plan,
            constraints,
        }
    }

    #[test]
    fn save_and_load_roundtrip() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("plan.json");
        let original = sample();

        original.save(&path).unwrap();
        assert_eq!(PlanFile::load(&path).unwrap(), original);
    }

    #[test]
    fn tampered_plan_is_rejected() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("plan.json");
        sample().save(&path).unwrap();

        let mut json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        json["plan"]["days"][1]["day"] = serde_json::json!(7);
        std::fs::write(&path, json.to_string()).unwrap();

        let err = PlanFile::load(&path).unwrap_err();
        assert!(
            format!("{err:#}").contains("failed to parse plan file"),
            "unexpected error: {err:#}"
        );
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = PlanFile::load(Path::new("/nonexistent/plan.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/plan.json"), "unexpected error: {err}");
    }
}
