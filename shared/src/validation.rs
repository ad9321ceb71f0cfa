//! Boundary validation
//!
//! Request DTOs carry `validator` derive rules; the helpers here run them,
//! parse the numeric strings the onboarding form sends and build typed
//! entities.

use crate::catalog::Food;
use crate::errors::{CoreError, CoreResult};
use crate::models::{Profile, WeightEntry};
use crate::nutrition::quantity_for_portion;
use crate::types::{LogFoodRequest, OnboardingRequest, UpdateProfileRequest};
use chrono::{DateTime, Utc};
use uuid::Uuid;
use validator::Validate;

pub const AGE_RANGE: (f64, f64) = (13.0, 120.0);
pub const HEIGHT_CM_RANGE: (f64, f64) = (100.0, 250.0);
pub const WEIGHT_KG_RANGE: (f64, f64) = (20.0, 500.0);

/// Run a DTO's derive rules
pub fn validate_request<T: Validate>(request: &T) -> CoreResult<()> {
    request
        .validate()
        .map_err(|e| CoreError::Validation(e.to_string()))
}

/// Parse a numeric form field
pub fn parse_number(field: &str, raw: &str) -> CoreResult<f64> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| CoreError::Validation(format!("{} must be a number", field)))?;
    if !value.is_finite() {
        return Err(CoreError::Validation(format!("{} must be a valid number", field)));
    }
    Ok(value)
}

/// Parse a numeric form field and check it against an inclusive range
pub fn parse_in_range(field: &str, raw: &str, (min, max): (f64, f64)) -> CoreResult<f64> {
    let value = parse_number(field, raw)?;
    if value < min || value > max {
        return Err(CoreError::Validation(format!(
            "{} must be between {} and {}",
            field, min, max
        )));
    }
    Ok(value)
}

/// Build a profile from a completed onboarding form
pub fn profile_from_onboarding(req: &OnboardingRequest, now: DateTime<Utc>) -> CoreResult<Profile> {
    validate_request(req)?;

    let age = parse_in_range("age", &req.age, AGE_RANGE)?;
    if age.fract() != 0.0 {
        return Err(CoreError::Validation("age must be a whole number".to_string()));
    }
    let height_cm = parse_in_range("height_cm", &req.height_cm, HEIGHT_CM_RANGE)?;
    let weight_kg = parse_in_range("weight_kg", &req.weight_kg, WEIGHT_KG_RANGE)?;

    Ok(Profile {
        goal: req.goal,
        sex: req.sex,
        age_years: age as u32,
        height_cm,
        weight_kg,
        activity_level: req.activity_level.unwrap_or_default(),
        experience: req.experience.unwrap_or_default(),
        equipment: req.equipment.iter().copied().collect(),
        training_days_per_week: req.training_days_per_week,
        created_at: now,
        updated_at: now,
    })
}

/// Apply an edit to a stored profile
pub fn apply_profile_update(profile: &mut Profile, req: &UpdateProfileRequest, now: DateTime<Utc>) -> CoreResult<()> {
    validate_request(req)?;

    if let Some(goal) = req.goal {
        profile.goal = goal;
    }
    if let Some(sex) = req.sex {
        profile.sex = sex;
    }
    if let Some(age) = req.age_years {
        profile.age_years = age;
    }
    if let Some(height) = req.height_cm {
        profile.height_cm = height;
    }
    if let Some(weight) = req.weight_kg {
        profile.weight_kg = weight;
    }
    if let Some(level) = req.activity_level {
        profile.activity_level = level;
    }
    if let Some(experience) = req.experience {
        profile.experience = experience;
    }
    if let Some(equipment) = &req.equipment {
        profile.equipment = equipment.iter().copied().collect();
    }
    if let Some(days) = req.training_days_per_week {
        profile.training_days_per_week = days;
    }
    profile.updated_at = now;
    Ok(())
}

/// Grams to log for a food request
///
/// An explicit quantity wins; otherwise a named portion times its count.
pub fn resolve_food_quantity(food: &Food, req: &LogFoodRequest) -> CoreResult<f64> {
    if let Some(grams) = req.quantity_g {
        return Ok(grams);
    }
    match &req.portion {
        Some(portion) => Ok(quantity_for_portion(food, portion)? * req.portion_count.unwrap_or(1.0)),
        None => Err(CoreError::Validation(
            "Either quantity_g or portion is required".to_string(),
        )),
    }
}

/// A new weight entry from a validated measurement
pub fn weight_entry(weight_kg: f64, recorded_at: DateTime<Utc>) -> CoreResult<WeightEntry> {
    if !weight_kg.is_finite() || weight_kg < WEIGHT_KG_RANGE.0 || weight_kg > WEIGHT_KG_RANGE.1 {
        return Err(CoreError::Validation(format!(
            "weight_kg must be between {} and {}",
            WEIGHT_KG_RANGE.0, WEIGHT_KG_RANGE.1
        )));
    }
    Ok(WeightEntry {
        id: Uuid::new_v4(),
        weight_kg,
        recorded_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::daily_log::MealType;
    use crate::models::{ActivityLevel, Equipment, ExperienceLevel, FitnessGoal, Sex};
    use rstest::rstest;

    fn onboarding() -> OnboardingRequest {
        OnboardingRequest {
            goal: FitnessGoal::MuscleGain,
            sex: Sex::Male,
            age: "28".to_string(),
            height_cm: " 182.5 ".to_string(),
            weight_kg: "77".to_string(),
            activity_level: None,
            experience: Some(ExperienceLevel::Intermediate),
            equipment: vec![Equipment::Dumbbells, Equipment::Dumbbells, Equipment::Bench],
            training_days_per_week: 4,
        }
    }

    #[test]
    fn test_profile_from_onboarding() {
        let now = Utc::now();
        let profile = profile_from_onboarding(&onboarding(), now).unwrap();
        assert_eq!(profile.age_years, 28);
        assert_eq!(profile.height_cm, 182.5);
        assert_eq!(profile.weight_kg, 77.0);
        assert_eq!(profile.activity_level, ActivityLevel::Moderate);
        assert_eq!(profile.experience, ExperienceLevel::Intermediate);
        assert_eq!(profile.equipment.len(), 2);
        assert_eq!(profile.created_at, now);
    }

    #[rstest]
    #[case("abc", "180", "80")]
    #[case("", "180", "80")]
    #[case("30", "tall", "80")]
    #[case("30", "180", "NaN")]
    #[case("8", "180", "80")]
    #[case("30.5", "180", "80")]
    #[case("30", "40", "80")]
    #[case("30", "180", "900")]
    fn test_onboarding_rejects_bad_measurements(#[case] age: &str, #[case] height: &str, #[case] weight: &str) {
        let req = OnboardingRequest {
            age: age.to_string(),
            height_cm: height.to_string(),
            weight_kg: weight.to_string(),
            ..onboarding()
        };
        let err = profile_from_onboarding(&req, Utc::now()).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)), "{:?}", err);
    }

    #[test]
    fn test_onboarding_rejects_training_days() {
        let req = OnboardingRequest {
            training_days_per_week: 0,
            ..onboarding()
        };
        assert!(matches!(
            profile_from_onboarding(&req, Utc::now()),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn test_apply_profile_update() {
        let mut profile = profile_from_onboarding(&onboarding(), Utc::now()).unwrap();
        let req = UpdateProfileRequest {
            weight_kg: Some(75.5),
            goal: Some(FitnessGoal::WeightLoss),
            equipment: Some(vec![]),
            ..UpdateProfileRequest::default()
        };
        apply_profile_update(&mut profile, &req, Utc::now()).unwrap();
        assert_eq!(profile.weight_kg, 75.5);
        assert_eq!(profile.goal, FitnessGoal::WeightLoss);
        assert!(profile.equipment.is_empty());
        assert_eq!(profile.age_years, 28);
    }

    #[test]
    fn test_apply_profile_update_rejects_out_of_range() {
        let mut profile = profile_from_onboarding(&onboarding(), Utc::now()).unwrap();
        let before = profile.clone();
        let req = UpdateProfileRequest {
            height_cm: Some(20.0),
            ..UpdateProfileRequest::default()
        };
        assert!(apply_profile_update(&mut profile, &req, Utc::now()).is_err());
        assert_eq!(profile, before);
    }

    fn food_request(quantity_g: Option<f64>, portion: Option<&str>, count: Option<f64>) -> LogFoodRequest {
        LogFoodRequest {
            food_id: "apple".to_string(),
            quantity_g,
            portion: portion.map(str::to_string),
            portion_count: count,
            meal_type: MealType::Snacks,
            logged_at: None,
        }
    }

    #[test]
    fn test_resolve_food_quantity() {
        let apple = Catalog::builtin().food("apple").unwrap();
        assert_eq!(resolve_food_quantity(apple, &food_request(Some(50.0), None, None)).unwrap(), 50.0);
        assert_eq!(
            resolve_food_quantity(apple, &food_request(None, Some("1 medium"), Some(2.0))).unwrap(),
            364.0
        );
        assert!(matches!(
            resolve_food_quantity(apple, &food_request(None, None, None)),
            Err(CoreError::Validation(_))
        ));
    }

    #[rstest]
    #[case(19.9)]
    #[case(500.1)]
    #[case(f64::NAN)]
    fn test_weight_entry_range(#[case] weight: f64) {
        assert!(weight_entry(weight, Utc::now()).is_err());
    }
}
