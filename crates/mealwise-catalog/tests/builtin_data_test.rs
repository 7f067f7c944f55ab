//! Consistency checks across the embedded meal and ingredient tables.

use std::collections::HashSet;

use mealwise_catalog::{Category, IngredientCatalog, MealCatalog, MealSlot};

#[test]
fn every_meal_ingredient_has_a_known_category() {
    let meals = MealCatalog::builtin();
    let table = IngredientCatalog::builtin();
    for meal in meals.iter() {
        for ingredient in &meal.ingredients {
            assert_ne!(
                table.category_of(ingredient),
                Category::Other,
                "{}: {ingredient} is missing from the ingredient table",
                meal.id
            );
        }
    }
}

#[test]
fn substitutions_replace_ingredients_the_meal_uses() {
    for meal in MealCatalog::builtin().iter() {
        for sub in &meal.substitutions {
            assert!(
                meal.has_ingredient(&sub.original),
                "{}: substitution for {} which the meal does not use",
                meal.id,
                sub.original
            );
            assert!(!sub.replacement.is_empty());
        }
    }
}

#[test]
fn slots_have_expected_sizes_and_unique_ids() {
    let meals = MealCatalog::builtin();
    assert_eq!(meals.by_slot(MealSlot::Breakfast).len(), 10);
    assert_eq!(meals.by_slot(MealSlot::Lunch).len(), 10);
    assert_eq!(meals.by_slot(MealSlot::Dinner).len(), 12);

    let ids: HashSet<&str> = meals.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids.len(), meals.len());
    for id in ids {
        assert_eq!(meals.get(id).map(|m| m.id.as_str()), Some(id));
    }
}

#[test]
fn every_known_category_is_populated() {
    let table = IngredientCatalog::builtin();
    for category in Category::PRECEDENCE.iter().filter(|c| **c != Category::Other) {
        assert!(
            !table.in_category(category).is_empty(),
            "no ingredients in {category}"
        );
    }
}

#[test]
fn suggestions_respect_limit_and_case() {
    let table = IngredientCatalog::builtin();
    let hits = table.suggestions("CHI", 8);
    assert_eq!(hits, vec!["Chicken", "Chickpeas"]);
    assert_eq!(table.suggestions("c", 3).len(), 3);
    assert!(table.suggestions("", 8).is_empty());
}
