//! Nutrition goal calculator
//!
//! Derives daily calorie, macro, fiber and water targets from a profile.
//!
//! # Design Principles
//!
//! 1. **Pure Functions**: no side effects, identical input gives identical output
//! 2. **Derived, not stored**: goals are cached but can always be recomputed
//!    from the profile
//! 3. **Integer outputs**: every target is rounded to a whole kcal, gram or ml

use crate::errors::{CoreError, CoreResult};
use crate::models::{ActivityLevel, Entity, EntityKind, FitnessGoal, Profile, Sex, SINGLETON_ID};
use serde::{Deserialize, Serialize};

/// Deficit applied for weight loss (kcal/day)
pub const WEIGHT_LOSS_DEFICIT_KCAL: f64 = 500.0;

/// Surplus applied for muscle gain (kcal/day)
pub const MUSCLE_GAIN_SURPLUS_KCAL: f64 = 300.0;

/// Fiber target per 1000 kcal eaten
pub const FIBER_G_PER_1000_KCAL: f64 = 14.0;

/// Water target per kg of body weight
pub const WATER_ML_PER_KG: f64 = 35.0;

const KCAL_PER_G_PROTEIN: f64 = 4.0;
const KCAL_PER_G_CARBS: f64 = 4.0;
const KCAL_PER_G_FAT: f64 = 9.0;

// ============================================================================
// Macro splits
// ============================================================================

/// Share of daily calories assigned to each macronutrient
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroSplit {
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl MacroSplit {
    /// The split used for every goal: 25 % protein, 45 % carbs, 30 % fat
    pub const BALANCED: MacroSplit = MacroSplit {
        protein: 0.25,
        carbs: 0.45,
        fat: 0.30,
    };
}

impl Default for MacroSplit {
    fn default() -> Self {
        MacroSplit::BALANCED
    }
}

// ============================================================================
// Goals
// ============================================================================

/// Daily nutrition targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutritionGoals {
    pub calories: i32,
    pub protein_g: i32,
    pub carbs_g: i32,
    pub fat_g: i32,
    pub fiber_g: i32,
    pub water_ml: i32,
}

impl Entity for NutritionGoals {
    const KIND: EntityKind = EntityKind::NutritionGoals;

    fn entity_id(&self) -> String {
        SINGLETON_ID.to_string()
    }
}

/// Calculate Basal Metabolic Rate using the Mifflin-St Jeor equation
///
/// Men: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) + 5
/// Women: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) - 161
pub fn calculate_bmr(age_years: u32, sex: Sex, weight_kg: f64, height_cm: f64) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * age_years as f64;
    match sex {
        Sex::Male => base + 5.0,
        Sex::Female => base - 161.0,
    }
}

/// Calculate Total Daily Energy Expenditure
///
/// TDEE = BMR × activity multiplier
pub fn calculate_tdee(
    age_years: u32,
    sex: Sex,
    weight_kg: f64,
    height_cm: f64,
    activity_level: ActivityLevel,
) -> f64 {
    calculate_bmr(age_years, sex, weight_kg, height_cm) * activity_level.multiplier()
}

/// Calorie target for a goal, before rounding
pub fn calorie_target(tdee: f64, goal: FitnessGoal) -> f64 {
    match goal {
        FitnessGoal::WeightLoss => tdee - WEIGHT_LOSS_DEFICIT_KCAL,
        FitnessGoal::MuscleGain => tdee + MUSCLE_GAIN_SURPLUS_KCAL,
        FitnessGoal::Endurance | FitnessGoal::Maintenance => tdee,
    }
}

/// Generate daily nutrition targets
///
/// Every goal uses the balanced macro split. Macros are derived from the
/// rounded calorie target so the goal offsets stay exact integers.
pub fn generate_goals(
    age_years: u32,
    sex: Sex,
    weight_kg: f64,
    height_cm: f64,
    activity_level: ActivityLevel,
    goal: FitnessGoal,
) -> CoreResult<NutritionGoals> {
    ensure_positive("weight_kg", weight_kg)?;
    ensure_positive("height_cm", height_cm)?;

    let split = MacroSplit::BALANCED;
    let tdee = calculate_tdee(age_years, sex, weight_kg, height_cm, activity_level);
    let calories = calorie_target(tdee, goal).round();

    Ok(NutritionGoals {
        calories: calories as i32,
        protein_g: (calories * split.protein / KCAL_PER_G_PROTEIN).round() as i32,
        carbs_g: (calories * split.carbs / KCAL_PER_G_CARBS).round() as i32,
        fat_g: (calories * split.fat / KCAL_PER_G_FAT).round() as i32,
        fiber_g: (calories / 1000.0 * FIBER_G_PER_1000_KCAL).round() as i32,
        water_ml: (weight_kg * WATER_ML_PER_KG).round() as i32,
    })
}

/// Feed a stored profile through the calculator
pub fn goals_for_profile(profile: &Profile) -> CoreResult<NutritionGoals> {
    generate_goals(
        profile.age_years,
        profile.sex,
        profile.weight_kg,
        profile.height_cm,
        profile.activity_level,
        profile.goal,
    )
}

fn ensure_positive(field: &str, value: f64) -> CoreResult<()> {
    if !value.is_finite() {
        return Err(CoreError::invalid_input(field, "must be a valid number"));
    }
    if value <= 0.0 {
        return Err(CoreError::invalid_input(field, "must be greater than zero"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[test]
    fn test_weight_loss_scenario() {
        // 70kg, 170cm, 25y male, light activity
        let bmr = calculate_bmr(25, Sex::Male, 70.0, 170.0);
        assert!((bmr - 1642.5).abs() < 1e-9);

        let tdee = calculate_tdee(25, Sex::Male, 70.0, 170.0, ActivityLevel::Light);
        assert!((tdee - 2258.4375).abs() < 1e-9);

        let goals = generate_goals(
            25,
            Sex::Male,
            70.0,
            170.0,
            ActivityLevel::Light,
            FitnessGoal::WeightLoss,
        )
        .unwrap();
        assert_eq!(goals.calories, 1758);
        assert_eq!(goals.protein_g, 110);
        assert_eq!(goals.water_ml, 2450);
    }

    #[test]
    fn test_female_offset() {
        let male = calculate_bmr(40, Sex::Male, 60.0, 165.0);
        let female = calculate_bmr(40, Sex::Female, 60.0, 165.0);
        assert!((male - female - 166.0).abs() < 1e-9);
    }

    #[rstest]
    #[case(ActivityLevel::Sedentary, 1.2)]
    #[case(ActivityLevel::Light, 1.375)]
    #[case(ActivityLevel::Moderate, 1.55)]
    #[case(ActivityLevel::Active, 1.725)]
    #[case(ActivityLevel::VeryActive, 1.9)]
    fn test_tdee_uses_fixed_multiplier(#[case] level: ActivityLevel, #[case] multiplier: f64) {
        let bmr = calculate_bmr(30, Sex::Female, 65.0, 168.0);
        let tdee = calculate_tdee(30, Sex::Female, 65.0, 168.0, level);
        assert!((tdee - bmr * multiplier).abs() < 1e-9);
    }

    #[test]
    fn test_maintenance_is_deterministic() {
        let first = generate_goals(30, Sex::Male, 80.0, 180.0, ActivityLevel::Moderate, FitnessGoal::Maintenance)
            .unwrap();
        for _ in 0..10 {
            let again = generate_goals(30, Sex::Male, 80.0, 180.0, ActivityLevel::Moderate, FitnessGoal::Maintenance)
                .unwrap();
            assert_eq!(first, again);
        }
        // 10*80 + 6.25*180 - 150 + 5 = 1780; * 1.55 = 2759
        assert_eq!(first.calories, 2759);
    }

    #[test]
    fn test_macro_split_and_fiber() {
        let goals = generate_goals(30, Sex::Male, 80.0, 180.0, ActivityLevel::Moderate, FitnessGoal::Maintenance)
            .unwrap();
        assert_eq!(goals.protein_g, (2759.0_f64 * 0.25 / 4.0).round() as i32);
        assert_eq!(goals.carbs_g, (2759.0_f64 * 0.45 / 4.0).round() as i32);
        assert_eq!(goals.fat_g, (2759.0_f64 * 0.30 / 9.0).round() as i32);
        assert_eq!(goals.fiber_g, 39);
        assert_eq!(goals.water_ml, 2800);
    }

    #[rstest]
    #[case(0.0, 180.0, "weight_kg")]
    #[case(-5.0, 180.0, "weight_kg")]
    #[case(80.0, 0.0, "height_cm")]
    #[case(f64::NAN, 180.0, "weight_kg")]
    #[case(80.0, f64::INFINITY, "height_cm")]
    fn test_rejects_unusable_measurements(
        #[case] weight: f64,
        #[case] height: f64,
        #[case] field: &str,
    ) {
        let err = generate_goals(30, Sex::Male, weight, height, ActivityLevel::Moderate, FitnessGoal::Maintenance)
            .unwrap_err();
        assert_eq!(err.field(), Some(field));
    }

    #[test]
    fn test_balanced_split_sums_to_one() {
        let split = MacroSplit::BALANCED;
        assert!((split.protein + split.carbs + split.fat - 1.0).abs() < 1e-9);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Weight-loss and muscle-gain differ from maintenance by the fixed offsets
        #[test]
        fn prop_goal_offsets_are_exact(
            age in 18u32..80,
            weight in 40.0f64..160.0,
            height in 140.0f64..210.0,
            female in proptest::bool::ANY,
        ) {
            let sex = if female { Sex::Female } else { Sex::Male };
            let maintain = generate_goals(age, sex, weight, height, ActivityLevel::Moderate, FitnessGoal::Maintenance).unwrap();
            let lose = generate_goals(age, sex, weight, height, ActivityLevel::Moderate, FitnessGoal::WeightLoss).unwrap();
            let gain = generate_goals(age, sex, weight, height, ActivityLevel::Moderate, FitnessGoal::MuscleGain).unwrap();

            prop_assert_eq!(maintain.calories - lose.calories, 500);
            prop_assert_eq!(gain.calories - maintain.calories, 300);
        }

        #[test]
        fn prop_water_scales_with_weight(weight in 1.0f64..300.0) {
            let goals = generate_goals(30, Sex::Female, weight, 170.0, ActivityLevel::Light, FitnessGoal::Endurance).unwrap();
            prop_assert_eq!(goals.water_ml, (weight * 35.0).round() as i32);
        }
    }
}
