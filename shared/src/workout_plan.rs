//! Rule-table workout plan generator
//!
//! Every goal has an ordered rule table. Rules whose exercise needs
//! equipment the user lacks are skipped; experience picks a literal column
//! from each rule's tier arrays. Output is fully determined by the input.

use crate::catalog::{Catalog, ExerciseCategory};
use crate::errors::CoreResult;
use crate::models::{Equipment, ExperienceLevel, FitnessGoal, Profile};
use crate::nutrition_goals::{goals_for_profile, MacroSplit, NutritionGoals};
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Upper bound on exercises in one generated workout
pub const MAX_PLAN_EXERCISES: usize = 6;

/// Prescription columns, indexed by [`ExperienceLevel::tier`]
#[derive(Debug, Clone, Copy)]
enum Prescription {
    Reps {
        sets: [u32; 3],
        reps: [&'static str; 3],
        rest_seconds: [u32; 3],
    },
    Timed {
        sets: [u32; 3],
        minutes: [u32; 3],
        rest_seconds: [u32; 3],
    },
}

#[derive(Debug, Clone, Copy)]
struct Rule {
    exercise_id: &'static str,
    prescription: Prescription,
}

const fn reps(exercise_id: &'static str, sets: [u32; 3], reps: [&'static str; 3], rest_seconds: [u32; 3]) -> Rule {
    Rule {
        exercise_id,
        prescription: Prescription::Reps {
            sets,
            reps,
            rest_seconds,
        },
    }
}

const fn timed(exercise_id: &'static str, sets: [u32; 3], minutes: [u32; 3], rest_seconds: [u32; 3]) -> Rule {
    Rule {
        exercise_id,
        prescription: Prescription::Timed {
            sets,
            minutes,
            rest_seconds,
        },
    }
}

const PUSH_UP_REPS: [&str; 3] = ["5-10", "10-15", "15-20"];
const SQUAT_REPS: [&str; 3] = ["10-15", "15-20", "20-25"];

// Cardio first
const WEIGHT_LOSS_RULES: &[Rule] = &[
    timed("jump-rope", [1, 1, 1], [5, 10, 15], [60, 60, 60]),
    timed("treadmill-intervals", [1, 1, 1], [15, 20, 25], [0, 0, 0]),
    timed("stationary-bike", [1, 1, 1], [20, 30, 40], [0, 0, 0]),
    reps("burpee", [2, 3, 4], ["5-8", "8-12", "12-15"], [90, 60, 45]),
    reps("mountain-climber", [3, 3, 4], ["20", "30", "40"], [60, 45, 30]),
    reps("bodyweight-squat", [3, 3, 4], SQUAT_REPS, [60, 45, 45]),
    reps("push-up", [2, 3, 4], PUSH_UP_REPS, [90, 60, 45]),
    timed("brisk-walk", [1, 1, 1], [20, 30, 45], [0, 0, 0]),
];

// Compound lifts first, bodyweight fallbacks after
const MUSCLE_GAIN_RULES: &[Rule] = &[
    reps("bench-press", [3, 4, 5], ["8-10", "6-8", "4-6"], [120, 150, 180]),
    reps("barbell-squat", [3, 4, 5], ["8-10", "6-8", "4-6"], [120, 150, 180]),
    reps("deadlift", [2, 3, 4], ["8", "5", "3-5"], [150, 180, 240]),
    reps("dumbbell-row", [3, 4, 4], ["10-12", "8-10", "6-8"], [90, 90, 120]),
    reps("dumbbell-press", [3, 4, 4], ["10-12", "8-10", "6-8"], [90, 90, 120]),
    reps("pull-up", [3, 3, 4], ["3-5", "6-8", "8-12"], [120, 120, 120]),
    reps("push-up", [3, 4, 5], PUSH_UP_REPS, [90, 60, 60]),
    reps("lunge", [3, 3, 4], ["8-10", "10-12", "12-15"], [90, 60, 60]),
    reps("bodyweight-squat", [3, 4, 4], SQUAT_REPS, [90, 60, 60]),
    reps("glute-bridge", [3, 3, 4], ["12-15", "15-20", "20-25"], [60, 60, 60]),
    timed("plank", [3, 3, 4], [1, 1, 2], [60, 45, 45]),
];

// Long steady efforts
const ENDURANCE_RULES: &[Rule] = &[
    timed("running", [1, 1, 1], [20, 35, 50], [0, 0, 0]),
    timed("rowing", [1, 1, 1], [15, 25, 35], [0, 0, 0]),
    timed("stationary-bike", [1, 1, 1], [30, 45, 60], [0, 0, 0]),
    timed("jump-rope", [2, 3, 4], [3, 5, 8], [90, 60, 60]),
    timed("brisk-walk", [1, 1, 1], [30, 45, 60], [0, 0, 0]),
    reps("bodyweight-squat", [2, 3, 3], SQUAT_REPS, [60, 45, 45]),
    reps("lunge", [2, 3, 3], ["10-12", "12-15", "15-20"], [60, 45, 45]),
    timed("plank", [2, 3, 3], [1, 1, 2], [60, 45, 45]),
];

// One of each pattern
const MAINTENANCE_RULES: &[Rule] = &[
    reps("push-up", [3, 3, 4], PUSH_UP_REPS, [60, 60, 45]),
    reps("bodyweight-squat", [3, 3, 4], SQUAT_REPS, [60, 60, 45]),
    reps("dumbbell-row", [3, 3, 4], ["10-12", "10-12", "8-10"], [90, 90, 90]),
    reps("kettlebell-swing", [3, 3, 4], ["10-12", "15", "20"], [60, 60, 60]),
    reps("lunge", [2, 3, 3], ["8-10", "10-12", "12-15"], [60, 60, 45]),
    timed("running", [1, 1, 1], [15, 20, 30], [0, 0, 0]),
    timed("yoga-flow", [1, 1, 1], [10, 15, 20], [0, 0, 0]),
    timed("plank", [2, 3, 3], [1, 1, 2], [45, 45, 45]),
    timed("hamstring-stretch", [1, 1, 1], [3, 5, 5], [0, 0, 0]),
];

fn rules_for(goal: FitnessGoal) -> &'static [Rule] {
    match goal {
        FitnessGoal::WeightLoss => WEIGHT_LOSS_RULES,
        FitnessGoal::MuscleGain => MUSCLE_GAIN_RULES,
        FitnessGoal::Endurance => ENDURANCE_RULES,
        FitnessGoal::Maintenance => MAINTENANCE_RULES,
    }
}

fn focus_for(goal: FitnessGoal) -> &'static str {
    match goal {
        FitnessGoal::WeightLoss => "cardio",
        FitnessGoal::MuscleGain => "strength",
        FitnessGoal::Endurance => "endurance",
        FitnessGoal::Maintenance => "balanced",
    }
}

// ============================================================================
// Output
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedExercise {
    pub exercise_id: String,
    pub name: String,
    pub category: ExerciseCategory,
    pub sets: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reps: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    pub rest_seconds: u32,
}

impl PlannedExercise {
    /// Work plus rest, in seconds
    fn estimated_seconds(&self) -> u32 {
        // A rep-based set is counted as one minute of work
        let work_per_set = self.duration_minutes.unwrap_or(1) * 60;
        self.sets * (work_per_set + self.rest_seconds)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutPlan {
    pub goal: FitnessGoal,
    pub experience: ExperienceLevel,
    pub focus: String,
    pub exercises: Vec<PlannedExercise>,
    pub estimated_minutes: u32,
}

/// Generate a workout from the built-in catalog
pub fn generate_workout(
    goal: FitnessGoal,
    experience: ExperienceLevel,
    equipment: &BTreeSet<Equipment>,
) -> WorkoutPlan {
    generate_workout_from(Catalog::builtin(), goal, experience, equipment)
}

/// Generate a workout against an explicit catalog
pub fn generate_workout_from(
    catalog: &Catalog,
    goal: FitnessGoal,
    experience: ExperienceLevel,
    equipment: &BTreeSet<Equipment>,
) -> WorkoutPlan {
    let tier = experience.tier();

    let exercises: Vec<PlannedExercise> = rules_for(goal)
        .iter()
        .filter_map(|rule| {
            let exercise = catalog.exercise(rule.exercise_id)?;
            if !exercise.equipment.iter().all(|e| equipment.contains(e)) {
                return None;
            }

            let planned = match rule.prescription {
                Prescription::Reps {
                    sets,
                    reps,
                    rest_seconds,
                } => PlannedExercise {
                    exercise_id: exercise.id.clone(),
                    name: exercise.name.clone(),
                    category: exercise.category,
                    sets: sets[tier],
                    reps: Some(reps[tier].to_string()),
                    duration_minutes: None,
                    rest_seconds: rest_seconds[tier],
                },
                Prescription::Timed {
                    sets,
                    minutes,
                    rest_seconds,
                } => PlannedExercise {
                    exercise_id: exercise.id.clone(),
                    name: exercise.name.clone(),
                    category: exercise.category,
                    sets: sets[tier],
                    reps: None,
                    duration_minutes: Some(minutes[tier]),
                    rest_seconds: rest_seconds[tier],
                },
            };
            Some(planned)
        })
        .take(MAX_PLAN_EXERCISES)
        .collect();

    let total_seconds: u32 = exercises.iter().map(PlannedExercise::estimated_seconds).sum();

    WorkoutPlan {
        goal,
        experience,
        focus: focus_for(goal).to_string(),
        exercises,
        estimated_minutes: total_seconds.div_ceil(60),
    }
}

// ============================================================================
// Personalized plan
// ============================================================================

/// Weekday spreading order per number of training days
const SCHEDULES: [&[Weekday]; 7] = [
    &[Weekday::Mon],
    &[Weekday::Mon, Weekday::Thu],
    &[Weekday::Mon, Weekday::Wed, Weekday::Fri],
    &[Weekday::Mon, Weekday::Tue, Weekday::Thu, Weekday::Fri],
    &[Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Fri, Weekday::Sat],
    &[Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri, Weekday::Sat],
    &[
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ],
];

/// Training weekdays for a weekly frequency, clamped to 1..=7
pub fn weekly_schedule(days_per_week: u8) -> Vec<Weekday> {
    let index = usize::from(days_per_week.clamp(1, 7)) - 1;
    SCHEDULES[index].to_vec()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalizedPlan {
    pub workout: WorkoutPlan,
    pub nutrition: NutritionGoals,
    pub macro_split: MacroSplit,
    pub schedule: Vec<Weekday>,
}

/// Workout, nutrition targets and weekly schedule for a profile
///
/// The nutrition block is the same derivation the cached goals use.
pub fn generate_plan(profile: &Profile) -> CoreResult<PersonalizedPlan> {
    Ok(PersonalizedPlan {
        workout: generate_workout(profile.goal, profile.experience, &profile.equipment),
        nutrition: goals_for_profile(profile)?,
        macro_split: MacroSplit::BALANCED,
        schedule: weekly_schedule(profile.training_days_per_week),
    })
}
