//! Food and recipe nutrition resolver
//!
//! Scales catalog values to logged quantities and folds them into totals.

use crate::catalog::{Catalog, Food, Recipe};
use crate::daily_log::MealEntry;
use crate::errors::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Resolved nutrients for a quantity of food
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionFacts {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
    pub sugar: f64,
}

impl NutritionFacts {
    pub const ZERO: NutritionFacts = NutritionFacts {
        calories: 0.0,
        protein: 0.0,
        carbs: 0.0,
        fat: 0.0,
        fiber: 0.0,
        sugar: 0.0,
    };

    /// Calories to a whole kcal, everything else to one decimal
    pub fn rounded(self) -> Self {
        Self {
            calories: self.calories.round(),
            protein: round1(self.protein),
            carbs: round1(self.carbs),
            fat: round1(self.fat),
            fiber: round1(self.fiber),
            sugar: round1(self.sugar),
        }
    }

    fn scaled(self, factor: f64) -> Self {
        Self {
            calories: self.calories * factor,
            protein: self.protein * factor,
            carbs: self.carbs * factor,
            fat: self.fat * factor,
            fiber: self.fiber * factor,
            sugar: self.sugar * factor,
        }
    }
}

impl Add for NutritionFacts {
    type Output = NutritionFacts;

    fn add(self, rhs: Self) -> Self::Output {
        NutritionFacts {
            calories: self.calories + rhs.calories,
            protein: self.protein + rhs.protein,
            carbs: self.carbs + rhs.carbs,
            fat: self.fat + rhs.fat,
            fiber: self.fiber + rhs.fiber,
            sugar: self.sugar + rhs.sugar,
        }
    }
}

impl AddAssign for NutritionFacts {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for NutritionFacts {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(NutritionFacts::ZERO, Add::add)
    }
}

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// A logged or previewed quantity must be a positive, finite number of grams
pub fn ensure_quantity(quantity_g: f64) -> CoreResult<()> {
    if !quantity_g.is_finite() || quantity_g <= 0.0 {
        return Err(CoreError::invalid_input("quantity_g", "must be greater than zero"));
    }
    Ok(())
}

/// Nutrients for `quantity_g` grams of a food
///
/// Values are scaled by `quantity / serving_size`. Missing fiber or sugar
/// count as zero.
pub fn calculate_nutrition(food: &Food, quantity_g: f64) -> NutritionFacts {
    let factor = if food.serving_size_g > 0.0 {
        quantity_g / food.serving_size_g
    } else {
        0.0
    };

    NutritionFacts {
        calories: food.calories,
        protein: food.protein_g,
        carbs: food.carbs_g,
        fat: food.fat_g,
        fiber: food.fiber_g.unwrap_or(0.0),
        sugar: food.sugar_g.unwrap_or(0.0),
    }
    .scaled(factor)
    .rounded()
}

/// Resolve a food reference, reporting dangling ids
pub fn resolve_entry(catalog: &Catalog, food_id: &str, quantity_g: f64) -> CoreResult<NutritionFacts> {
    let food = catalog
        .food(food_id)
        .ok_or_else(|| CoreError::UnknownReference(format!("food '{}'", food_id)))?;
    Ok(calculate_nutrition(food, quantity_g))
}

/// Resolve a food reference for aggregation
///
/// A dangling id contributes nothing and is logged as a data-integrity
/// warning.
pub fn resolve_entry_lenient(catalog: &Catalog, food_id: &str, quantity_g: f64) -> NutritionFacts {
    match resolve_entry(catalog, food_id, quantity_g) {
        Ok(facts) => facts,
        Err(e) => {
            tracing::warn!(food_id = %food_id, error = %e, "Logged entry references unknown food");
            NutritionFacts::ZERO
        }
    }
}

/// Sum of every entry's resolved nutrients
pub fn calculate_daily_totals<'a, I>(entries: I, catalog: &Catalog) -> NutritionFacts
where
    I: IntoIterator<Item = &'a MealEntry>,
{
    entries
        .into_iter()
        .map(|entry| resolve_entry_lenient(catalog, &entry.food_id, entry.quantity_g))
        .sum::<NutritionFacts>()
        .rounded()
}

/// Whole-recipe and per-serving nutrients
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecipeNutrition {
    pub servings: f64,
    pub total: NutritionFacts,
    pub per_serving: NutritionFacts,
}

/// Nutrients of a recipe from its ingredients
///
/// A recipe declaring zero servings is treated as a single serving.
pub fn calculate_recipe_nutrition(recipe: &Recipe, catalog: &Catalog) -> RecipeNutrition {
    let total: NutritionFacts = recipe
        .ingredients
        .iter()
        .map(|i| resolve_entry_lenient(catalog, &i.food_id, i.quantity_g))
        .sum();

    let servings = if recipe.servings > 0.0 {
        recipe.servings
    } else {
        1.0
    };

    RecipeNutrition {
        servings,
        total: total.rounded(),
        per_serving: total.scaled(1.0 / servings).rounded(),
    }
}

/// Grams for a named household portion of a food
pub fn quantity_for_portion(food: &Food, portion_name: &str) -> CoreResult<f64> {
    food.common_portions
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(portion_name.trim()))
        .map(|p| p.grams)
        .ok_or_else(|| {
            CoreError::NotFound(format!("portion '{}' for food '{}'", portion_name, food.id))
        })
}
