//! Text and JSON output for a plan and its derived artifacts.

use std::io::Write;

use anyhow::Result;
use serde::Serialize;

use mealwise_core::budget::format_amount;
use mealwise_core::calendar::{self, CalendarSummary};
use mealwise_core::grocery::{self, CategoryGroup, ShoppingTripSummary};
use mealwise_core::plan::locked_ingredients_used;
use mealwise_core::{
    Artifacts, BudgetStatus, ContextSettings, MealPlan, UserConstraints, hhmm,
    personalization_summary,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Everything printed after `plan`, `swap`, and `reoptimize`.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub plan: &'a MealPlan,
    pub budget_status: &'a BudgetStatus,
    pub is_fallback: bool,
    pub personalization: [String; 3],
    pub locked_ingredients_used: Vec<&'a str>,
    pub shopping_trip: ShoppingTripSummary,
    pub calendar_summary: CalendarSummary,
    #[serde(flatten)]
    pub artifacts: &'a Artifacts,
}

impl<'a> Report<'a> {
    pub fn new(
        plan: &'a MealPlan,
        budget_status: &'a BudgetStatus,
        is_fallback: bool,
        constraints: &'a UserConstraints,
        context: &ContextSettings,
        artifacts: &'a Artifacts,
    ) -> Self {
        Self {
            plan,
            budget_status,
            is_fallback,
            personalization: personalization_summary(constraints, context),
            locked_ingredients_used: locked_ingredients_used(plan, &constraints.locked_ingredients),
            shopping_trip: grocery::shopping_trip_summary(&artifacts.grocery_list),
            calendar_summary: calendar::summary(&artifacts.calendar_events),
            artifacts,
        }
    }
}

pub fn print(report: &Report<'_>, format: OutputFormat) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Text => write_text(&mut out, report)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, report)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

// -----------------------------------------------------------------------
// Text layout
// -----------------------------------------------------------------------

pub fn write_text<W: Write>(w: &mut W, r: &Report<'_>) -> std::io::Result<()> {
    write_summary(w, r)?;
    write_plan(w, r.plan)?;
    write_grocery(w, r)?;
    write_prep(w, r.artifacts)?;
    write_reminders(w, r.artifacts)?;
    write_flow(w, r.artifacts)?;
    write_calendar(w, r)
}

fn write_summary<W: Write>(w: &mut W, r: &Report<'_>) -> std::io::Result<()> {
    for line in &r.personalization {
        writeln!(w, "* {line}")?;
    }
    writeln!(w)?;

    let verdict = if r.budget_status.feasible { "ok" } else { "over" };
    writeln!(w, "Budget: {verdict}. {}", r.budget_status.reason)?;
    if let Some(cost) = r.budget_status.estimated_daily_cost {
        writeln!(w, "  Estimated cost: ₹{}/day", format_amount(cost))?;
    }
    if r.is_fallback {
        writeln!(w, "  Budget-friendly fallback plan")?;
    }
    if r.locked_ingredients_used.is_empty() {
        writeln!(w, "Locked ingredients used: none")?;
    } else {
        writeln!(w, "Locked ingredients used: {}", r.locked_ingredients_used.join(", "))?;
    }
    writeln!(w)
}

fn write_plan<W: Write>(w: &mut W, plan: &MealPlan) -> std::io::Result<()> {
    for day in plan.days() {
        writeln!(w, "Day {}", day.day)?;
        for (slot, meal) in day.meals() {
            writeln!(
                w,
                "  {:<10} {} [{}] {} min, {} cost, {}",
                slot.to_string(),
                meal.name,
                meal.id,
                meal.total_time_minutes(),
                meal.budget_tier,
                meal.complexity,
            )?;
        }
    }
    writeln!(w)
}

fn write_groups<W: Write>(w: &mut W, heading: &str, groups: &[CategoryGroup]) -> std::io::Result<()> {
    if groups.is_empty() {
        return Ok(());
    }
    writeln!(w, "  {heading}:")?;
    for g in groups {
        writeln!(w, "    {}: {}", g.label, g.items.join(", "))?;
    }
    Ok(())
}

fn write_grocery<W: Write>(w: &mut W, r: &Report<'_>) -> std::io::Result<()> {
    let list = &r.artifacts.grocery_list;
    writeln!(
        w,
        "Grocery list: {} items ({} to buy, {} in pantry)",
        list.summary.total_items, list.summary.items_to_buy, list.summary.items_in_pantry
    )?;
    write_groups(w, "To buy", &list.to_buy)?;
    write_groups(w, "In pantry", &list.in_pantry)?;
    let trip = &r.shopping_trip;
    writeln!(
        w,
        "  Shopping trip: {} items across {} categories, about {}",
        trip.total_items, trip.categories, trip.estimated_time
    )?;
    writeln!(w)
}

fn write_prep<W: Write>(w: &mut W, a: &Artifacts) -> std::io::Result<()> {
    writeln!(w, "Prep schedule")?;
    for b in &a.prep_schedule.batch {
        writeln!(
            w,
            "  batch  Day {} {}: {} ({}). {}",
            b.day,
            b.slot,
            b.meal,
            b.batch_items.join(", "),
            b.reason
        )?;
    }
    for f in &a.prep_schedule.fresh {
        writeln!(w, "  fresh  Day {} {}: {}. {}", f.day, f.slot, f.meal, f.reason)?;
    }
    writeln!(w)
}

fn write_reminders<W: Write>(w: &mut W, a: &Artifacts) -> std::io::Result<()> {
    writeln!(w, "Reminders")?;
    for r in &a.reminders {
        writeln!(w, "  Day {} {} [{}] {}", r.day, hhmm::format(r.time), r.kind, r.title)?;
        writeln!(w, "      {}", r.description)?;
        writeln!(w, "      Why: {}", r.justification)?;
    }
    writeln!(w)
}

fn write_flow<W: Write>(w: &mut W, a: &Artifacts) -> std::io::Result<()> {
    writeln!(w, "Cooking flow ({} steps)", a.cooking_flow.total_steps())?;
    for section in a.cooking_flow.sections() {
        writeln!(w, "  {}", section.title)?;
        for step in &section.steps {
            writeln!(w, "    {:>2}. {}", step.number, step.text)?;
        }
    }
    writeln!(w)
}

fn write_calendar<W: Write>(w: &mut W, r: &Report<'_>) -> std::io::Result<()> {
    let s = &r.calendar_summary;
    writeln!(
        w,
        "Calendar: {} events over {} days ({} shopping, {} prep, {} cooking)",
        s.total, s.days, s.shopping, s.prep, s.cooking
    )?;
    for e in &r.artifacts.calendar_events {
        writeln!(
            w,
            "  {} {}-{} {}",
            e.date,
            hhmm::format(e.start_time),
            hhmm::format(e.end_time),
            e.title
        )?;
    }
    Ok(())
}
