//! Consolidated cooking steps for a whole plan.

use serde::Serialize;

use crate::constraints::contains_ignore_case;
use crate::plan::{DayMeals, MealPlan};

pub const MAX_INGREDIENT_STEPS: usize = 5;
pub const MAX_PREP_STEPS: usize = 6;

/// Vegetables named in the batch chopping step, in this order.
const CHOPPING_VEGETABLES: [&str; 5] = ["Carrot", "Potato", "Cauliflower", "Cabbage", "Bell Pepper"];
const MAX_CHOPPING_VEGETABLES: usize = 3;

const WRAP_UP: [&str; 3] = [
    "Store leftovers in labeled containers in refrigerator",
    "Clean cooking surfaces and wash all utensils",
    "Take inventory of remaining ingredients for next plan",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DaySteps {
    pub day: u8,
    pub steps: Vec<String>,
}

/// Step groups in the order they are meant to be followed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CookingFlow {
    pub using_your_ingredients: Vec<String>,
    pub prep_checklist: Vec<String>,
    pub day_wise_cooking: Vec<DaySteps>,
    pub wrap_up: Vec<String>,
}

/// A numbered step in the flattened flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NumberedStep {
    pub number: usize,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlowSection {
    pub title: String,
    pub steps: Vec<NumberedStep>,
}

impl CookingFlow {
    pub fn total_steps(&self) -> usize {
        self.using_your_ingredients.len()
            + self.prep_checklist.len()
            + self.day_wise_cooking.iter().map(|d| d.steps.len()).sum::<usize>()
            + self.wrap_up.len()
    }

    /// Titled sections with steps numbered from 1 across the whole flow.
    /// Empty groups are skipped.
    pub fn sections(&self) -> Vec<FlowSection> {
        let mut groups: Vec<(String, &[String])> = vec![
            ("Using Your Ingredients".to_owned(), self.using_your_ingredients.as_slice()),
            ("Prep Checklist".to_owned(), self.prep_checklist.as_slice()),
        ];
        for day in &self.day_wise_cooking {
            groups.push((format!("Day {} Cooking Sequence", day.day), day.steps.as_slice()));
        }
        groups.push(("Wrap-up".to_owned(), self.wrap_up.as_slice()));

        let mut number = 0;
        groups
            .into_iter()
            .filter(|(_, steps)| !steps.is_empty())
            .map(|(title, steps)| FlowSection {
                title,
                steps: steps
                    .iter()
                    .map(|text| {
                        number += 1;
                        NumberedStep {
                            number,
                            text: text.clone(),
                        }
                    })
                    .collect(),
            })
            .collect()
    }
}

/// Compose the flow for `plan`.
pub fn compose(plan: &MealPlan, locked_ingredients: &[String]) -> CookingFlow {
    let used = plan.ingredients();
    CookingFlow {
        using_your_ingredients: ingredient_steps(&used, locked_ingredients),
        prep_checklist: prep_checklist(&used),
        day_wise_cooking: plan.days().iter().map(day_steps).collect(),
        wrap_up: WRAP_UP.iter().map(|s| (*s).to_owned()).collect(),
    }
}

fn has_any(used: &[&str], names: &[&str]) -> bool {
    names.iter().any(|n| contains_ignore_case(used, n))
}

fn ingredient_steps(used: &[&str], locked: &[String]) -> Vec<String> {
    let rules: [(&[&str], &str); 4] = [
        (&["Rice"], "Rinse rice thoroughly under cold water until water runs clear"),
        (
            &["Lentils", "Chickpeas", "Kidney Beans"],
            "Soak legumes in water for 4-6 hours or overnight",
        ),
        (&["Paneer"], "Cut paneer into cubes and keep refrigerated until use"),
        (
            &["Chicken", "Fish", "Mutton"],
            "Clean and marinate proteins, store covered in refrigerator",
        ),
    ];
    let mut steps: Vec<String> = rules
        .iter()
        .filter(|(names, _)| has_any(used, names))
        .map(|(_, step)| (*step).to_owned())
        .collect();

    for ing in locked {
        let needle = ing.to_lowercase();
        if !steps.iter().any(|s| s.to_lowercase().contains(&needle)) {
            steps.push(format!("Prepare {ing} as needed for multiple meals"));
        }
    }
    steps.truncate(MAX_INGREDIENT_STEPS);
    steps
}

fn prep_checklist(used: &[&str]) -> Vec<String> {
    let rules: [(&[&str], &str); 5] = [
        (&["Onion"], "Dice or slice onions and store in airtight container"),
        (&["Tomato"], "Blanch and puree tomatoes for curries"),
        (&["Ginger", "Garlic"], "Make ginger-garlic paste for quick cooking"),
        (&["Green Chili"], "Wash and slit green chilies, store in freezer"),
        (&["Coriander"], "Wash and chop fresh coriander, store wrapped in paper"),
    ];
    let mut steps: Vec<String> = rules
        .iter()
        .filter(|(names, _)| has_any(used, names))
        .map(|(_, step)| (*step).to_owned())
        .collect();

    let veggies: Vec<&str> = CHOPPING_VEGETABLES
        .iter()
        .copied()
        .filter(|v| contains_ignore_case(used, v))
        .take(MAX_CHOPPING_VEGETABLES)
        .collect();
    if !veggies.is_empty() {
        steps.push(format!("Wash and chop vegetables: {}", veggies.join(", ")));
    }
    steps.truncate(MAX_PREP_STEPS);
    steps
}

fn day_steps(day: &DayMeals) -> DaySteps {
    let (b, l, d) = (&day.breakfast.name, &day.lunch.name, &day.dinner.name);
    DaySteps {
        day: day.day,
        steps: vec![
            format!("Start with {b} - heat pan and gather ingredients"),
            format!("Cook {b} following the recipe sequence"),
            format!("Begin {l} prep 30 minutes before lunch"),
            format!("Complete {l} and serve hot"),
            format!("Start {d} prep during evening"),
            format!("Cook {d} and plate for serving"),
        ],
    }
}
