//! Handlers for the plan-producing commands.
//!
//! Implements:
//! - `mealwise plan`                      -- generate, optionally re-optimize, print
//! - `mealwise swap <file> --day --slot`  -- replace one meal in a saved plan
//! - `mealwise reoptimize <file> --for`   -- swap every meal toward a goal

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use mealwise_catalog::{CatalogConfig, IngredientCatalog, MealCatalog, MealSlot};
use mealwise_core::{
    Artifacts, OptimizeFor, PlanInputs, budget, derive_artifacts, generate_plan, reoptimize_all,
    swap_one,
};

use crate::config::Settings;
use crate::export_cmd;
use crate::plan_file::PlanFile;
use crate::render::{self, OutputFormat, Report};

pub struct PlanOptions {
    pub seed: Option<u64>,
    pub optimize: Option<OptimizeFor>,
    pub format: OutputFormat,
    pub save: Option<PathBuf>,
    pub ics: Option<PathBuf>,
    pub start_date: NaiveDate,
}

pub struct SwapRequest {
    pub day: u8,
    pub slot: MealSlot,
    pub optimize: Option<OptimizeFor>,
}

/// Seeded generator when a seed is given, otherwise one seeded from the
/// thread RNG.
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    }
}

fn load_catalogs(catalog: &CatalogConfig) -> Result<(MealCatalog, IngredientCatalog)> {
    let meals = catalog.load_meals().context("failed to load meal catalog")?;
    let ingredients = catalog
        .load_ingredients()
        .context("failed to load ingredient table")?;
    Ok((meals, ingredients))
}

fn derive(file: &PlanFile, ingredients: &IngredientCatalog) -> Artifacts {
    let inputs = PlanInputs {
        constraints: &file.constraints,
        reminders: &file.reminders,
        context: &file.context,
        ingredients,
        start_date: file.start_date,
    };
    derive_artifacts(&file.plan, &inputs)
}

fn show(file: &PlanFile, artifacts: &Artifacts, format: OutputFormat) -> Result<()> {
    let report = Report::new(
        &file.plan,
        &file.budget_status,
        file.is_fallback,
        &file.constraints,
        &file.context,
        artifacts,
    );
    render::print(&report, format)
}

// -----------------------------------------------------------------------
// mealwise plan
// -----------------------------------------------------------------------

/// Generate (and optionally re-optimize) a plan under `settings`.
pub fn build_plan(
    settings: &Settings,
    meals: &MealCatalog,
    seed: Option<u64>,
    optimize: Option<OptimizeFor>,
    start_date: NaiveDate,
) -> Result<PlanFile> {
    let mut rng = make_rng(seed);
    let generated =
        generate_plan(meals, &settings.constraints, &mut rng).context("failed to generate plan")?;

    let (plan, budget_status, is_fallback) = match optimize {
        Some(goal) => {
            let plan = reoptimize_all(meals, &generated.plan, &settings.constraints, Some(goal), &mut rng)
                .with_context(|| format!("failed to re-optimize plan for {goal}"))?;
            let status = budget::validate(&plan, settings.constraints.budget_per_day);
            (plan, status, false)
        }
        None => (generated.plan, generated.budget_status, generated.is_fallback),
    };

    Ok(PlanFile {
        constraints: settings.constraints.clone(),
        context: settings.context.clone(),
        reminders: settings.reminders.clone(),
        start_date,
        budget_status,
        is_fallback,
        plan,
    })
}

pub fn cmd_plan(settings: &Settings, options: &PlanOptions) -> Result<()> {
    let (meals, ingredients) = load_catalogs(&settings.catalog)?;
    let file = build_plan(
        settings,
        &meals,
        options.seed,
        options.optimize,
        options.start_date,
    )?;
    let artifacts = derive(&file, &ingredients);

    if let Some(path) = &options.save {
        file.save(path)?;
        info!(path = %path.display(), "saved plan");
    }
    if let Some(path) = &options.ics {
        export_cmd::write_ics(&artifacts.calendar_events, &settings.calendar, Some(path))?;
    }
    show(&file, &artifacts, options.format)
}

// -----------------------------------------------------------------------
// mealwise swap
// -----------------------------------------------------------------------

/// Replace one meal in `file`. Returns the old and new meal names.
pub fn apply_swap(
    file: &mut PlanFile,
    meals: &MealCatalog,
    request: &SwapRequest,
    seed: Option<u64>,
) -> Result<(String, String)> {
    let current = file.plan.meal(request.day, request.slot)?;
    let replacement = swap_one(
        meals,
        current,
        &file.constraints,
        request.optimize,
        &mut make_rng(seed),
    )
    .with_context(|| format!("no replacement for {}", current.name))?;
    let names = (current.name.clone(), replacement.name.clone());
    info!(day = request.day, slot = %request.slot, from = %current.id, to = %replacement.id, "swapped meal");

    file.plan = file.plan.with_meal(request.day, request.slot, replacement)?;
    file.budget_status = budget::validate(&file.plan, file.constraints.budget_per_day);
    file.is_fallback = false;
    Ok(names)
}

pub fn cmd_swap(
    catalog: &CatalogConfig,
    path: &Path,
    request: &SwapRequest,
    seed: Option<u64>,
    format: OutputFormat,
) -> Result<()> {
    let (meals, ingredients) = load_catalogs(catalog)?;
    let mut file = PlanFile::load(path)?;
    let (from, to) = apply_swap(&mut file, &meals, request, seed)?;
    file.save(path)?;

    if format == OutputFormat::Text {
        println!("Day {} {}: {from} -> {to}", request.day, request.slot);
        println!();
    }
    show(&file, &derive(&file, &ingredients), format)
}

// -----------------------------------------------------------------------
// mealwise reoptimize
// -----------------------------------------------------------------------

pub fn apply_reoptimize(
    file: &mut PlanFile,
    meals: &MealCatalog,
    goal: OptimizeFor,
    seed: Option<u64>,
) -> Result<usize> {
    let plan = reoptimize_all(meals, &file.plan, &file.constraints, Some(goal), &mut make_rng(seed))
        .with_context(|| format!("failed to re-optimize plan for {goal}"))?;
    let changed = plan
        .slots()
        .zip(file.plan.slots())
        .filter(|((_, _, new), (_, _, old))| new.id != old.id)
        .count();

    file.plan = plan;
    file.budget_status = budget::validate(&file.plan, file.constraints.budget_per_day);
    file.is_fallback = false;
    Ok(changed)
}

pub fn cmd_reoptimize(
    catalog: &CatalogConfig,
    path: &Path,
    goal: OptimizeFor,
    seed: Option<u64>,
    format: OutputFormat,
) -> Result<()> {
    let (meals, ingredients) = load_catalogs(catalog)?;
    let mut file = PlanFile::load(path)?;
    let changed = apply_reoptimize(&mut file, &meals, goal, seed)?;
    file.save(path)?;

    if format == OutputFormat::Text {
        println!(
            "Re-optimized for {goal}: {changed} of {} meals changed",
            file.plan.slots().count()
        );
        println!();
    }
    show(&file, &derive(&file, &ingredients), format)
}

#[cfg(test)]
mod tests {
    use super::*;

    use mealwise_core::calendar::ExportOptions;
    use mealwise_core::{ContextSettings, DietType, Persona, ReminderSettings, UserConstraints};
    use mealwise_test_utils::{builtin_catalog, tiered_catalog};

    fn settings() -> Settings {
        let constraints = UserConstraints {
            diet_type: DietType::Veg,
            dislikes: vec!["Mushroom".to_owned()],
            pantry_items: vec!["Rice".to_owned(), "Onion".to_owned()],
            locked_ingredients: vec!["Rice".to_owned(), "Lentils".to_owned(), "Onion".to_owned()],
            budget_per_day: 400.0,
            persona: Persona::Household,
            number_of_days: 3,
        };
        Settings {
            context: ContextSettings::for_constraints(&constraints),
            constraints,
            reminders: ReminderSettings::default(),
            calendar: ExportOptions::default(),
            catalog: CatalogConfig::default(),
        }
    }

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 3).unwrap()
    }

    #[test]
    fn same_seed_same_plan() {
        let meals = builtin_catalog();
        let a = build_plan(&settings(), &meals, Some(12), None, start()).unwrap();
        let b = build_plan(&settings(), &meals, Some(12), None, start()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.plan.day_count(), 3);
        assert_eq!(a.start_date, start());
    }

    #[test]
    fn optimize_rewrites_budget_status() {
        let meals = builtin_catalog();
        let file = build_plan(&settings(), &meals, Some(3), Some(OptimizeFor::Cheapest), start()).unwrap();
        assert!(file.budget_status.feasible);
        assert!(file.budget_status.estimated_daily_cost.is_some());
    }

    #[test]
    fn optimize_clears_the_fallback_flag() {
        let meals = tiered_catalog();
        let mut frugal = settings();
        frugal.constraints.budget_per_day = 100.0;
        frugal.constraints.number_of_days = 1;

        let plain = build_plan(&frugal, &meals, Some(5), None, start()).unwrap();
        assert!(plain.is_fallback);

        let optimized =
            build_plan(&frugal, &meals, Some(5), Some(OptimizeFor::Cheapest), start()).unwrap();
        assert!(!optimized.is_fallback);
    }

    #[test]
    fn swap_changes_only_the_requested_slot() {
        let meals = builtin_catalog();
        let mut file = build_plan(&settings(), &meals, Some(8), None, start()).unwrap();
        let before = file.plan.clone();

        let request = SwapRequest {
            day: 2,
            slot: MealSlot::Lunch,
            optimize: None,
        };
        let (from, to) = apply_swap(&mut file, &meals, &request, Some(1)).unwrap();
        assert_ne!(from, to);

        for (day, slot, meal) in file.plan.slots() {
            let old = before.meal(day, slot).unwrap();
            if (day, slot) == (2, MealSlot::Lunch) {
                assert_ne!(meal.id, old.id);
                assert_eq!(meal.name, to);
            } else {
                assert_eq!(meal.id, old.id);
            }
        }
    }

    #[test]
    fn swap_outside_the_plan_is_an_error() {
        let meals = builtin_catalog();
        let mut file = build_plan(&settings(), &meals, Some(8), None, start()).unwrap();
        let request = SwapRequest {
            day: 4,
            slot: MealSlot::Dinner,
            optimize: None,
        };
        let err = apply_swap(&mut file, &meals, &request, None).unwrap_err();
        assert!(
            err.to_string().contains("day 4 is outside the plan"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn reoptimize_for_fastest_counts_changes() {
        let meals = builtin_catalog();
        let mut file = build_plan(&settings(), &meals, Some(4), None, start()).unwrap();
        let before = file.plan.clone();

        let changed = apply_reoptimize(&mut file, &meals, OptimizeFor::Fastest, Some(4)).unwrap();
        let actual = file
            .plan
            .slots()
            .filter(|(day, slot, meal)| before.meal(*day, *slot).unwrap().id != meal.id)
            .count();
        assert_eq!(changed, actual);
        assert_eq!(file.plan.day_count(), 3);
    }
}
