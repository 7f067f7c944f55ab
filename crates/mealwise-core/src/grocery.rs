//! Shopping list derived from a finalized plan.

use std::collections::BTreeMap;

use serde::Serialize;

use mealwise_catalog::{Category, IngredientCatalog, same_ingredient};

use crate::constraints::contains_ignore_case;
use crate::plan::MealPlan;

/// One category bucket of a partition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryGroup {
    pub category: Category,
    pub label: String,
    /// Sorted alphabetically.
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct GrocerySummary {
    pub total_items: usize,
    pub items_to_buy: usize,
    pub items_in_pantry: usize,
}

/// Plan ingredients split into what to buy and what is already at home.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroceryList {
    pub to_buy: Vec<CategoryGroup>,
    pub in_pantry: Vec<CategoryGroup>,
    pub summary: GrocerySummary,
}

impl GroceryList {
    /// Every to-buy item, in bucket order.
    pub fn items_to_buy(&self) -> impl Iterator<Item = &str> {
        self.to_buy
            .iter()
            .flat_map(|g| g.items.iter().map(String::as_str))
    }

    /// Case-insensitive membership in the to-buy partition.
    pub fn needs(&self, ingredient: &str) -> bool {
        self.items_to_buy().any(|i| same_ingredient(i, ingredient))
    }
}

/// Build the list for `plan`. Pantry matching ignores case.
pub fn build(plan: &MealPlan, pantry_items: &[String], ingredients: &IngredientCatalog) -> GroceryList {
    let mut to_buy: BTreeMap<Category, Vec<String>> = BTreeMap::new();
    let mut in_pantry: BTreeMap<Category, Vec<String>> = BTreeMap::new();
    let mut summary = GrocerySummary::default();

    for name in plan.ingredients() {
        summary.total_items += 1;
        let bucket = if contains_ignore_case(pantry_items, name) {
            summary.items_in_pantry += 1;
            &mut in_pantry
        } else {
            summary.items_to_buy += 1;
            &mut to_buy
        };
        bucket
            .entry(ingredients.category_of(name))
            .or_default()
            .push(name.to_owned());
    }

    GroceryList {
        to_buy: into_groups(to_buy),
        in_pantry: into_groups(in_pantry),
        summary,
    }
}

/// `Category`'s ordering is the shopping-list precedence, with custom
/// categories after the known ones.
fn into_groups(buckets: BTreeMap<Category, Vec<String>>) -> Vec<CategoryGroup> {
    buckets
        .into_iter()
        .map(|(category, mut items)| {
            items.sort();
            CategoryGroup {
                label: category.label().to_owned(),
                category,
                items,
            }
        })
        .collect()
}

/// At-a-glance figures for the shopping trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShoppingTripSummary {
    pub total_items: usize,
    pub categories: usize,
    pub estimated_time: &'static str,
}

pub fn shopping_trip_summary(list: &GroceryList) -> ShoppingTripSummary {
    let total_items = list.to_buy.iter().map(|g| g.items.len()).sum();
    let estimated_time = match total_items {
        0..=10 => "15-20 mins",
        11..=20 => "25-35 mins",
        _ => "40-50 mins",
    };
    ShoppingTripSummary {
        total_items,
        categories: list.to_buy.len(),
        estimated_time,
    }
}
