//! `mealwise catalog` subcommands: browse meals and ingredients.

use std::collections::BTreeSet;
use std::io::Write;

use anyhow::{Context, Result};

use mealwise_catalog::{CatalogConfig, Category, IngredientCatalog, MealRecord, MealSlot};

use crate::CatalogCommands;
use crate::render::OutputFormat;

pub fn run_catalog_command(command: CatalogCommands, catalog: &CatalogConfig) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match command {
        CatalogCommands::Meals { slot, format } => {
            let meals = catalog.load_meals().context("failed to load meal catalog")?;
            let selected: Vec<&MealRecord> = match slot {
                Some(slot) => meals.by_slot(slot),
                None => meals.iter().collect(),
            };
            match format {
                OutputFormat::Text => write_meals(&mut out, &selected)?,
                OutputFormat::Json => {
                    serde_json::to_writer_pretty(&mut out, &selected)?;
                    writeln!(out)?;
                }
            }
        }
        CatalogCommands::Ingredients { prefix, limit } => {
            let table = catalog
                .load_ingredients()
                .context("failed to load ingredient table")?;
            match prefix {
                Some(prefix) => {
                    for name in table.suggestions(&prefix, limit) {
                        writeln!(out, "{name}")?;
                    }
                }
                None => write_ingredients(&mut out, &table)?,
            }
        }
    }
    Ok(())
}

fn write_meals<W: Write>(w: &mut W, meals: &[&MealRecord]) -> std::io::Result<()> {
    let mut current: Option<MealSlot> = None;
    for meal in meals {
        if current != Some(meal.slot) {
            if current.is_some() {
                writeln!(w)?;
            }
            writeln!(w, "{}", meal.slot)?;
            current = Some(meal.slot);
        }
        writeln!(
            w,
            "  {:<4} {:<32} {:<7} {:<6} {:<8} {:>3} min",
            meal.id,
            meal.name,
            meal.diet.to_string(),
            meal.budget_tier.to_string(),
            meal.complexity.to_string(),
            meal.total_time_minutes(),
        )?;
    }
    Ok(())
}

fn write_ingredients<W: Write>(w: &mut W, table: &IngredientCatalog) -> std::io::Result<()> {
    let categories: BTreeSet<&Category> = table.iter().map(|e| &e.category).collect();
    for category in categories {
        let names: Vec<&str> = table
            .in_category(category)
            .into_iter()
            .map(|e| e.name.as_str())
            .collect();
        writeln!(w, "{} ({})", category.label(), names.len())?;
        writeln!(w, "  {}", names.join(", "))?;
    }
    Ok(())
}
