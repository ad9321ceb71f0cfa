//! FitTrack WASM Module
//!
//! Browser bindings for the pure calculators in `fittrack_shared`, so the
//! client can preview targets and nutrition without a round trip.
//! Structured values cross the boundary as JSON strings.

use fittrack_shared::nutrition::{calculate_nutrition, calculate_recipe_nutrition, ensure_quantity};
use fittrack_shared::nutrition_goals::{calculate_bmr as bmr, calculate_tdee as tdee};
use fittrack_shared::workout_plan::generate_workout;
use fittrack_shared::{ActivityLevel, Catalog, Equipment, ExperienceLevel, FitnessGoal, Sex};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::collections::BTreeSet;
use wasm_bindgen::prelude::*;

/// Goal calculator input, mirroring the stored profile fields
#[derive(Debug, Deserialize)]
struct GoalInput {
    age_years: u32,
    sex: Sex,
    weight_kg: f64,
    height_cm: f64,
    #[serde(default)]
    activity_level: ActivityLevel,
    goal: FitnessGoal,
}

fn sex_of(is_male: bool) -> Sex {
    if is_male {
        Sex::Male
    } else {
        Sex::Female
    }
}

/// Parse a kebab-case enum tag such as `"very-active"`
fn parse_tag<T: DeserializeOwned>(field: &str, tag: &str) -> Result<T, String> {
    serde_json::from_value(serde_json::Value::String(tag.to_string()))
        .map_err(|_| format!("Unknown {}: {}", field, tag))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| e.to_string())
}

fn goals_json(input: &str) -> Result<String, String> {
    let input: GoalInput = serde_json::from_str(input).map_err(|e| e.to_string())?;
    let goals = fittrack_shared::generate_goals(
        input.age_years,
        input.sex,
        input.weight_kg,
        input.height_cm,
        input.activity_level,
        input.goal,
    )
    .map_err(|e| e.to_string())?;
    to_json(&goals)
}

fn nutrition_json(food_id: &str, quantity_g: f64) -> Result<String, String> {
    ensure_quantity(quantity_g).map_err(|e| e.to_string())?;
    let food = Catalog::builtin()
        .food(food_id)
        .ok_or_else(|| format!("Unknown food: {}", food_id))?;
    to_json(&calculate_nutrition(food, quantity_g))
}

fn recipe_json(recipe_id: &str) -> Result<String, String> {
    let catalog = Catalog::builtin();
    let recipe = catalog
        .recipe(recipe_id)
        .ok_or_else(|| format!("Unknown recipe: {}", recipe_id))?;
    to_json(&calculate_recipe_nutrition(recipe, catalog))
}

fn workout_json(goal: &str, experience: &str, equipment: &str) -> Result<String, String> {
    let goal: FitnessGoal = goal.parse()?;
    let experience: ExperienceLevel = parse_tag("experience", experience)?;
    let equipment: BTreeSet<Equipment> = serde_json::from_str(equipment).map_err(|e| e.to_string())?;
    to_json(&generate_workout(goal, experience, &equipment))
}

/// Mifflin-St Jeor basal metabolic rate
#[wasm_bindgen]
pub fn calculate_bmr(age_years: u32, is_male: bool, weight_kg: f64, height_cm: f64) -> f64 {
    bmr(age_years, sex_of(is_male), weight_kg, height_cm)
}

/// BMR × activity multiplier; `activity_level` is e.g. `"moderate"`
#[wasm_bindgen]
pub fn calculate_tdee(
    age_years: u32,
    is_male: bool,
    weight_kg: f64,
    height_cm: f64,
    activity_level: &str,
) -> Result<f64, JsError> {
    let level: ActivityLevel = parse_tag("activity level", activity_level).map_err(|e| JsError::new(&e))?;
    Ok(tdee(age_years, sex_of(is_male), weight_kg, height_cm, level))
}

/// Daily targets for a profile given as JSON
#[wasm_bindgen]
pub fn generate_goals(input_json: &str) -> Result<String, JsError> {
    goals_json(input_json).map_err(|e| JsError::new(&e))
}

/// Nutrients for a quantity of a catalog food
#[wasm_bindgen]
pub fn food_nutrition(food_id: &str, quantity_g: f64) -> Result<String, JsError> {
    nutrition_json(food_id, quantity_g).map_err(|e| JsError::new(&e))
}

#[wasm_bindgen]
pub fn recipe_nutrition(recipe_id: &str) -> Result<String, JsError> {
    recipe_json(recipe_id).map_err(|e| JsError::new(&e))
}

/// Workout plan preview; `equipment_json` is a JSON array of tags
#[wasm_bindgen]
pub fn preview_workout(goal: &str, experience: &str, equipment_json: &str) -> Result<String, JsError> {
    workout_json(goal, experience, equipment_json).map_err(|e| JsError::new(&e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_bmr_reference_profile() {
        assert!((calculate_bmr(25, true, 70.0, 170.0) - 1642.5).abs() < 1e-9);
    }

    #[test]
    fn test_goals_json() {
        let out = goals_json(
            r#"{"age_years":25,"sex":"male","weight_kg":70,"height_cm":170,"activity_level":"light","goal":"weight-loss"}"#,
        )
        .unwrap();
        let goals: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(goals["calories"], 1758);
        assert_eq!(goals["protein_g"], 110);
    }

    #[test]
    fn test_goals_json_rejects_bad_weight() {
        let err = goals_json(
            r#"{"age_years":25,"sex":"male","weight_kg":0,"height_cm":170,"goal":"maintenance"}"#,
        )
        .unwrap_err();
        assert!(err.contains("weight_kg"));
    }

    #[test]
    fn test_nutrition_json() {
        let facts: Value = serde_json::from_str(&nutrition_json("chicken-breast", 200.0).unwrap()).unwrap();
        assert_eq!(facts["calories"], 330.0);
        assert!(nutrition_json("unicorn-steak", 100.0).is_err());
    }

    #[test]
    fn test_nutrition_json_rejects_unusable_quantity() {
        for quantity in [0.0, -200.0, f64::NAN, f64::INFINITY] {
            let err = nutrition_json("chicken-breast", quantity).unwrap_err();
            assert!(err.contains("quantity_g"), "{}", err);
        }
    }

    #[test]
    fn test_workout_json_honours_equipment() {
        let plan: Value = serde_json::from_str(&workout_json("muscle-gain", "beginner", "[]").unwrap()).unwrap();
        assert_eq!(plan["goal"], "muscle-gain");
        assert!(plan["exercises"]
            .as_array()
            .unwrap()
            .iter()
            .all(|e| e["exercise_id"] != "bench-press"));
        assert!(workout_json("muscle-gain", "wizard", "[]").is_err());
    }

    #[test]
    fn test_parse_tag() {
        let level: ActivityLevel = parse_tag("activity level", "very-active").unwrap();
        assert_eq!(level, ActivityLevel::VeryActive);
        assert!(parse_tag::<ActivityLevel>("activity level", "couch").is_err());
    }
}
