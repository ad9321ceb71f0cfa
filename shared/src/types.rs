//! API request and response types

use crate::daily_log::{DailyNutritionLog, MealType};
use crate::models::{ActivityLevel, Equipment, ExperienceLevel, FitnessGoal, Profile, Sex};
use crate::nutrition_goals::NutritionGoals;
use crate::records::{Achievement, PersonalRecord};
use crate::stats::DailyProgress;
use crate::workout_session::{SetUpdate, SetValues, WorkoutSession};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

// ============================================================================
// Session
// ============================================================================

/// Tokens issued for an owner key
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionTokens {
    pub owner_key: String,
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub onboarding_completed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RefreshRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

// ============================================================================
// Profile
// ============================================================================

/// Onboarding form. Measurements arrive as the strings the form collected.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OnboardingRequest {
    pub goal: FitnessGoal,
    pub sex: Sex,
    #[validate(length(min = 1, message = "Age is required"))]
    pub age: String,
    #[validate(length(min = 1, message = "Height is required"))]
    pub height_cm: String,
    #[validate(length(min = 1, message = "Weight is required"))]
    pub weight_kg: String,
    #[serde(default)]
    pub activity_level: Option<ActivityLevel>,
    #[serde(default)]
    pub experience: Option<ExperienceLevel>,
    #[serde(default)]
    pub equipment: Vec<Equipment>,
    #[validate(range(min = 1, max = 7, message = "Training days must be between 1 and 7"))]
    pub training_days_per_week: u8,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<FitnessGoal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sex: Option<Sex>,
    #[validate(range(min = 13, max = 120, message = "Age must be between 13 and 120"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_years: Option<u32>,
    #[validate(range(min = 100.0, max = 250.0, message = "Height must be between 100 and 250 cm"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height_cm: Option<f64>,
    #[validate(range(min = 20.0, max = 500.0, message = "Weight must be between 20 and 500 kg"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_level: Option<ActivityLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<ExperienceLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equipment: Option<Vec<Equipment>>,
    #[validate(range(min = 1, max = 7, message = "Training days must be between 1 and 7"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub training_days_per_week: Option<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub profile: Profile,
    pub goals: NutritionGoals,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnboardingResponse {
    pub profile: Profile,
    pub goals: NutritionGoals,
    pub session: SessionTokens,
}

// ============================================================================
// Nutrition
// ============================================================================

/// Log a food either by grams or by a named portion
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LogFoodRequest {
    #[validate(length(min = 1, max = 100, message = "Food id is required"))]
    pub food_id: String,
    #[validate(range(min = 0.1, max = 10000.0, message = "Quantity must be between 0.1 and 10000 g"))]
    pub quantity_g: Option<f64>,
    #[validate(length(min = 1, max = 50))]
    pub portion: Option<String>,
    #[validate(range(min = 0.1, max = 50.0, message = "Portion count must be between 0.1 and 50"))]
    pub portion_count: Option<f64>,
    pub meal_type: MealType,
    #[serde(default)]
    pub logged_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LogWaterRequest {
    #[validate(range(min = 1.0, max = 5000.0, message = "Amount must be between 1 and 5000 ml"))]
    pub amount_ml: f64,
    #[serde(default)]
    pub logged_at: Option<DateTime<Utc>>,
}

/// A daily log with progress against the owner's targets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyLogResponse {
    pub log: DailyNutritionLog,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goals: Option<NutritionGoals>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<DailyProgress>,
}

// ============================================================================
// Workouts
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct StartWorkoutRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub template_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddExerciseRequest {
    #[validate(length(min = 1, max = 100, message = "Exercise id is required"))]
    pub exercise_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct LogSetRequest {
    #[validate(range(max = 1000))]
    pub reps: Option<u32>,
    #[validate(range(min = 0.0, max = 1000.0, message = "Weight must be between 0 and 1000 kg"))]
    pub weight_kg: Option<f64>,
    #[validate(range(max = 86400))]
    pub duration_seconds: Option<u32>,
    #[validate(range(min = 0.0, max = 1000000.0))]
    pub distance_m: Option<f64>,
    #[serde(default)]
    pub completed: bool,
    #[validate(range(min = 1, max = 10, message = "RPE must be between 1 and 10"))]
    pub rpe: Option<u8>,
    #[validate(range(max = 3600))]
    pub rest_seconds: Option<u32>,
}

impl From<LogSetRequest> for SetValues {
    fn from(req: LogSetRequest) -> Self {
        SetValues {
            reps: req.reps,
            weight_kg: req.weight_kg,
            duration_seconds: req.duration_seconds,
            distance_m: req.distance_m,
            completed: req.completed,
            rpe: req.rpe,
            rest_seconds: req.rest_seconds,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateSetRequest {
    #[validate(range(max = 1000))]
    pub reps: Option<u32>,
    #[validate(range(min = 0.0, max = 1000.0, message = "Weight must be between 0 and 1000 kg"))]
    pub weight_kg: Option<f64>,
    #[validate(range(max = 86400))]
    pub duration_seconds: Option<u32>,
    #[validate(range(min = 0.0, max = 1000000.0))]
    pub distance_m: Option<f64>,
    pub completed: Option<bool>,
    #[validate(range(min = 1, max = 10, message = "RPE must be between 1 and 10"))]
    pub rpe: Option<u8>,
    #[validate(range(max = 3600))]
    pub rest_seconds: Option<u32>,
}

impl From<UpdateSetRequest> for SetUpdate {
    fn from(req: UpdateSetRequest) -> Self {
        SetUpdate {
            reps: req.reps,
            weight_kg: req.weight_kg,
            duration_seconds: req.duration_seconds,
            distance_m: req.distance_m,
            completed: req.completed,
            rpe: req.rpe,
            rest_seconds: req.rest_seconds,
        }
    }
}

/// Result of completing a workout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompleteWorkoutResponse {
    pub session: WorkoutSession,
    pub new_records: Vec<PersonalRecord>,
    pub unlocked_achievements: Vec<Achievement>,
}

// ============================================================================
// Progress
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LogWeightRequest {
    #[validate(range(min = 20.0, max = 500.0, message = "Weight must be between 20 and 500 kg"))]
    pub weight_kg: f64,
    #[serde(default)]
    pub recorded_at: Option<DateTime<Utc>>,
}

// ============================================================================
// Queries
// ============================================================================

/// Trailing window in days
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct WindowQuery {
    #[validate(range(min = 1, max = 365, message = "Days must be between 1 and 365"))]
    pub days: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct HistoryQuery {
    #[validate(range(min = 1, max = 200))]
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct FoodSearchQuery {
    #[validate(length(max = 100))]
    pub q: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ExerciseSearchQuery {
    #[validate(length(max = 100))]
    pub q: Option<String>,
    pub category: Option<String>,
    pub muscle: Option<String>,
}
