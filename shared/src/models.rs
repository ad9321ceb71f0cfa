//! Data models for the FitTrack application
//!
//! Every stored document is an explicit record type. Enum wire values are
//! kebab-case so they match what the browser client sends.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// ============================================================================
// Stored entity plumbing
// ============================================================================

/// Document type name used by the persistence adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Profile,
    NutritionGoals,
    NutritionLog,
    CurrentWorkout,
    Workout,
    PersonalRecords,
    Achievements,
    Weight,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Profile => "profile",
            EntityKind::NutritionGoals => "nutrition_goals",
            EntityKind::NutritionLog => "nutrition_log",
            EntityKind::CurrentWorkout => "current_workout",
            EntityKind::Workout => "workout",
            EntityKind::PersonalRecords => "personal_records",
            EntityKind::Achievements => "achievements",
            EntityKind::Weight => "weight",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record type that the persistence adapter can store under an owner key
pub trait Entity: Serialize + DeserializeOwned + Send + Sync {
    const KIND: EntityKind;

    /// Key of this entity within its owner and kind
    fn entity_id(&self) -> String;
}

/// Id used by kinds that hold exactly one document per owner
pub const SINGLETON_ID: &str = "current";

// ============================================================================
// Profile enums
// ============================================================================

/// Training goal chosen at onboarding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FitnessGoal {
    WeightLoss,
    MuscleGain,
    Endurance,
    #[default]
    Maintenance,
}

impl FitnessGoal {
    pub const ALL: [FitnessGoal; 4] = [
        FitnessGoal::WeightLoss,
        FitnessGoal::MuscleGain,
        FitnessGoal::Endurance,
        FitnessGoal::Maintenance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FitnessGoal::WeightLoss => "weight-loss",
            FitnessGoal::MuscleGain => "muscle-gain",
            FitnessGoal::Endurance => "endurance",
            FitnessGoal::Maintenance => "maintenance",
        }
    }
}

impl FromStr for FitnessGoal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "weight-loss" => Ok(FitnessGoal::WeightLoss),
            "muscle-gain" => Ok(FitnessGoal::MuscleGain),
            "endurance" => Ok(FitnessGoal::Endurance),
            "maintenance" => Ok(FitnessGoal::Maintenance),
            _ => Err(format!("Unknown goal: {}", s)),
        }
    }
}

/// Biological sex, used for the BMR equation only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

/// Activity level for TDEE calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    Light,
    /// Moderate exercise 3-5 days/week
    #[default]
    Moderate,
    /// Hard exercise 6-7 days/week
    Active,
    /// Very hard exercise or a physical job
    VeryActive,
}

impl ActivityLevel {
    /// Multiplier applied to BMR to get TDEE
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }
}

/// Training experience; selects intensity tiers in the plan generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl ExperienceLevel {
    /// Column in the fixed tier tables
    pub fn tier(&self) -> usize {
        match self {
            ExperienceLevel::Beginner => 0,
            ExperienceLevel::Intermediate => 1,
            ExperienceLevel::Advanced => 2,
        }
    }
}

/// Equipment a user has access to. Bodyweight work needs none of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Equipment {
    Dumbbells,
    Barbell,
    Kettlebell,
    Bench,
    PullUpBar,
    ResistanceBands,
    JumpRope,
    Treadmill,
    StationaryBike,
    RowingMachine,
    Mat,
    CableMachine,
}

// ============================================================================
// Profile
// ============================================================================

/// Demographic and onboarding attributes, one per owner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub goal: FitnessGoal,
    pub sex: Sex,
    pub age_years: u32,
    pub height_cm: f64,
    pub weight_kg: f64,
    #[serde(default)]
    pub activity_level: ActivityLevel,
    #[serde(default)]
    pub experience: ExperienceLevel,
    #[serde(default)]
    pub equipment: BTreeSet<Equipment>,
    pub training_days_per_week: u8,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for Profile {
    const KIND: EntityKind = EntityKind::Profile;

    fn entity_id(&self) -> String {
        SINGLETON_ID.to_string()
    }
}

// ============================================================================
// Body weight
// ============================================================================

/// A logged body weight measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightEntry {
    pub id: Uuid,
    pub weight_kg: f64,
    pub recorded_at: DateTime<Utc>,
}

impl Entity for WeightEntry {
    const KIND: EntityKind = EntityKind::Weight;

    fn entity_id(&self) -> String {
        self.id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_wire_format_is_kebab_case() {
        let json = serde_json::to_string(&FitnessGoal::WeightLoss).unwrap();
        assert_eq!(json, "\"weight-loss\"");
        let level: ActivityLevel = serde_json::from_str("\"very-active\"").unwrap();
        assert_eq!(level, ActivityLevel::VeryActive);
    }

    #[test]
    fn test_goal_from_str_accepts_snake_case() {
        assert_eq!("muscle_gain".parse::<FitnessGoal>(), Ok(FitnessGoal::MuscleGain));
        assert_eq!("Endurance".parse::<FitnessGoal>(), Ok(FitnessGoal::Endurance));
        assert!("bulk".parse::<FitnessGoal>().is_err());
    }

    #[test]
    fn test_activity_multipliers_increase() {
        let levels = [
            ActivityLevel::Sedentary,
            ActivityLevel::Light,
            ActivityLevel::Moderate,
            ActivityLevel::Active,
            ActivityLevel::VeryActive,
        ];
        for pair in levels.windows(2) {
            assert!(pair[0].multiplier() < pair[1].multiplier());
        }
    }

    #[test]
    fn test_entity_kind_names() {
        assert_eq!(EntityKind::NutritionLog.as_str(), "nutrition_log");
        assert_eq!(EntityKind::CurrentWorkout.to_string(), "current_workout");
    }
}
