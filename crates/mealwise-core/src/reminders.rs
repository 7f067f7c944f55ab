//! Time-ordered reminders, each carrying a concrete justification.
//!
//! Day 0 is the day before the plan starts. Every justification names a
//! meal or day from the plan, or a number (minutes, item counts).

use std::fmt;

use chrono::{Duration, NaiveTime};
use serde::Serialize;

use mealwise_catalog::Complexity;

use crate::constraints::{ContextSettings, PreferredTime, ReminderSettings};
use crate::grocery::GroceryList;
use crate::hhmm;
use crate::plan::MealPlan;
use crate::prep::PrepSchedule;

/// Dinner prep starts this many whole hours before the cooking window.
pub const PREP_LEAD_HOURS: u32 = 2;

/// Buffer added to a dinner's cook time when estimating when it is ready.
pub const SERVING_BUFFER_MINUTES: u32 = 15;

/// Dinners with at least this much prep get a same-day prep reminder.
pub const PREP_REMINDER_THRESHOLD_MINUTES: u32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderKind {
    Shopping,
    Prep,
    Cooking,
}

impl fmt::Display for ReminderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Shopping => "shopping",
            Self::Prep => "prep",
            Self::Cooking => "cooking",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reminder {
    /// Stable within one schedule, e.g. `cook-dinner-2`.
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ReminderKind,
    pub day: u8,
    #[serde(serialize_with = "hhmm::serialize")]
    pub time: NaiveTime,
    pub title: String,
    pub description: String,
    pub justification: String,
    pub associated_meal: String,
}

fn at(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

/// Build the reminder list for `plan`, sorted by day then time.
pub fn schedule(
    plan: &MealPlan,
    grocery: &GroceryList,
    prep: &PrepSchedule,
    settings: &ReminderSettings,
    context: &ContextSettings,
) -> Vec<Reminder> {
    let mut reminders = Vec::new();
    reminders.extend(shopping_reminder(plan, grocery, settings));
    reminders.extend(prep_reminders(plan, prep, settings, context));
    reminders.extend(cooking_reminders(plan, settings));
    reminders.sort_by_key(|r| (r.day, r.time));
    reminders
}

/// First slot that needs something from the shop, as `Day N slot`.
fn first_meal_needing_purchase(plan: &MealPlan, grocery: &GroceryList) -> String {
    plan.slots()
        .find(|(_, _, meal)| meal.ingredients.iter().any(|i| grocery.needs(i)))
        .map(|(day, slot, _)| format!("Day {day} {slot}"))
        .unwrap_or_else(|| "Day 1 breakfast".to_owned())
}

fn shopping_reminder(
    plan: &MealPlan,
    grocery: &GroceryList,
    settings: &ReminderSettings,
) -> Option<Reminder> {
    let items = grocery.summary.items_to_buy;
    if items == 0 {
        return None;
    }
    let first = first_meal_needing_purchase(plan, grocery);
    let time = match settings.preferred_time {
        PreferredTime::Morning => at(9, 0),
        PreferredTime::Evening => at(18, 0),
    };
    Some(Reminder {
        id: "shop-0".to_owned(),
        kind: ReminderKind::Shopping,
        day: 0,
        time,
        title: format!("Shop for {items} ingredients"),
        description: format!("Get {items} items from the grocery list before cooking starts."),
        justification: format!(
            "Scheduled because {first} requires ingredients that are not in your pantry ({items} to buy)."
        ),
        associated_meal: first,
    })
}

fn prep_reminders(
    plan: &MealPlan,
    prep: &PrepSchedule,
    settings: &ReminderSettings,
    context: &ContextSettings,
) -> Vec<Reminder> {
    let batchable = prep.batch.iter().filter(|b| b.day == 1).count();
    let mut out = vec![Reminder {
        id: "prep-0".to_owned(),
        kind: ReminderKind::Prep,
        day: 0,
        time: at(20, 0),
        title: "Prep for tomorrow's meals".to_owned(),
        description: "Wash and chop vegetables, soak lentils if needed, organize ingredients."
            .to_owned(),
        justification: format!(
            "Scheduled the evening before Day 1 so {batchable} batchable meal(s) can be prepped ahead, \
             easing next-day cooking for your {} energy level.",
            context.energy_level
        ),
        associated_meal: "Day 1 meals".to_owned(),
    }];

    let prep_time = hhmm::hours_before(settings.cooking_window, PREP_LEAD_HOURS);
    for day in plan.days() {
        let dinner = &day.dinner;
        let needs_prep = dinner.prep_time_minutes >= PREP_REMINDER_THRESHOLD_MINUTES
            || dinner.complexity != Complexity::Simple;
        if !needs_prep {
            continue;
        }
        out.push(Reminder {
            id: format!("prep-{}", day.day),
            kind: ReminderKind::Prep,
            day: day.day,
            time: prep_time,
            title: format!("Start prep for {}", dinner.name),
            description: format!(
                "Begin prep work for dinner - approximately {} mins needed.",
                dinner.prep_time_minutes
            ),
            justification: format!(
                "Scheduled {PREP_LEAD_HOURS} hours before dinner because {} requires {} minutes of prep time \
                 and your energy level is {}.",
                dinner.name, dinner.prep_time_minutes, context.energy_level
            ),
            associated_meal: dinner.name.clone(),
        });
    }
    out
}

fn cooking_reminders(plan: &MealPlan, settings: &ReminderSettings) -> Vec<Reminder> {
    let mut out = Vec::new();
    let breakfast_at = at(7, 30);
    let window = hhmm::format(settings.cooking_window);

    for day in plan.days() {
        if settings.reminders_per_day >= 1 {
            let breakfast = &day.breakfast;
            let ready = breakfast_at + Duration::minutes(i64::from(breakfast.cook_time_minutes));
            out.push(Reminder {
                id: format!("cook-breakfast-{}", day.day),
                kind: ReminderKind::Cooking,
                day: day.day,
                time: breakfast_at,
                title: format!("Make {}", breakfast.name),
                description: format!(
                    "Start cooking breakfast - {} mins cooking time.",
                    breakfast.cook_time_minutes
                ),
                justification: format!(
                    "Scheduled at {} to have breakfast ready by {} based on your {} minute cook time.",
                    hhmm::format(breakfast_at),
                    hhmm::format(ready),
                    breakfast.cook_time_minutes
                ),
                associated_meal: breakfast.name.clone(),
            });
        }

        if settings.reminders_per_day >= 2 {
            let dinner = &day.dinner;
            out.push(Reminder {
                id: format!("cook-dinner-{}", day.day),
                kind: ReminderKind::Cooking,
                day: day.day,
                time: settings.cooking_window,
                title: format!("Cook {}", dinner.name),
                description: format!(
                    "Begin cooking dinner - {} mins cooking time.",
                    dinner.cook_time_minutes
                ),
                justification: format!(
                    "Scheduled at {window} to align with your preferred cooking window and have dinner \
                     ready within {} minutes.",
                    dinner.cook_time_minutes + SERVING_BUFFER_MINUTES
                ),
                associated_meal: dinner.name.clone(),
            });
        }
    }
    out
}
