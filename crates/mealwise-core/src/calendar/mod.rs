//! Calendar events for a plan, and iCalendar export.

pub mod ics;

use std::fmt;

use chrono::{Days, NaiveDate, NaiveTime};
use serde::Serialize;

use mealwise_catalog::{MealRecord, MealSlot};

use crate::hhmm;
use crate::plan::MealPlan;

pub use ics::{ExportOptions, escape_text, to_ics, to_ics_at, unescape_text, unfold_lines};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Shopping,
    Prep,
    Cooking,
}

impl fmt::Display for EventType {
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
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    #[serde(serialize_with = "hhmm::serialize")]
    pub start_time: NaiveTime,
    #[serde(serialize_with = "hhmm::serialize")]
    pub end_time: NaiveTime,
    pub event_type: EventType,
}

fn at(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

/// Fixed slot window, title prefix, and verb for each meal.
fn slot_layout(slot: MealSlot) -> (NaiveTime, NaiveTime, &'static str, &'static str) {
    match slot {
        MealSlot::Breakfast => (at(7, 30), at(8, 15), "🍳 Breakfast", "Cook"),
        MealSlot::Lunch => (at(12, 0), at(13, 0), "🍲 Lunch", "Prepare"),
        MealSlot::Dinner => (at(18, 30), at(19, 30), "🍽️ Dinner", "Cook"),
    }
}

fn cooking_event(day: u8, slot: MealSlot, meal: &MealRecord, date: NaiveDate) -> CalendarEvent {
    let (start_time, end_time, prefix, verb) = slot_layout(slot);
    CalendarEvent {
        id: format!("cal-{slot}-{day}"),
        title: format!("{prefix}: {}", meal.name),
        description: format!(
            "{verb} {}. Prep: {} mins, Cook: {} mins.",
            meal.name, meal.prep_time_minutes, meal.cook_time_minutes
        ),
        date,
        start_time,
        end_time,
        event_type: EventType::Cooking,
    }
}

/// Events for `plan`. Shopping and prep fall on `start_date`; plan day N
/// falls on `start_date + N`.
pub fn build_events(plan: &MealPlan, start_date: NaiveDate) -> Vec<CalendarEvent> {
    let mut events = vec![
        CalendarEvent {
            id: "cal-shopping-1".to_owned(),
            title: "🛒 Grocery Shopping".to_owned(),
            description: "Shop for meal plan ingredients. Check your grocery list in the app."
                .to_owned(),
            date: start_date,
            start_time: at(10, 0),
            end_time: at(11, 0),
            event_type: EventType::Shopping,
        },
        CalendarEvent {
            id: "cal-prep-1".to_owned(),
            title: "🔪 Meal Prep Session".to_owned(),
            description: "Wash vegetables, soak lentils, chop ingredients for the week.".to_owned(),
            date: start_date,
            start_time: at(16, 0),
            end_time: at(17, 30),
            event_type: EventType::Prep,
        },
    ];

    for (day, slot, meal) in plan.slots() {
        let date = start_date
            .checked_add_days(Days::new(u64::from(day)))
            .unwrap_or(start_date);
        events.push(cooking_event(day, slot, meal, date));
    }
    events
}

/// Counts by event type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CalendarSummary {
    pub total: usize,
    pub shopping: usize,
    pub prep: usize,
    pub cooking: usize,
    /// Distinct dates carrying a cooking event.
    pub days: usize,
}

pub fn summary(events: &[CalendarEvent]) -> CalendarSummary {
    let mut s = CalendarSummary {
        total: events.len(),
        ..CalendarSummary::default()
    };
    let mut cooking_dates = Vec::new();
    for e in events {
        match e.event_type {
            EventType::Shopping => s.shopping += 1,
            EventType::Prep => s.prep += 1,
            EventType::Cooking => {
                s.cooking += 1;
                if !cooking_dates.contains(&e.date) {
                    cooking_dates.push(e.date);
                }
            }
        }
    }
    s.days = cooking_dates.len();
    s
}
