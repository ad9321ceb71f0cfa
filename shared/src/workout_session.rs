//! Workout session tracking
//!
//! An owner has at most one in-progress session, held in [`WorkoutTracker`].
//! `start` and `complete` (plus `discard`) are the only transitions; derived
//! totals are computed once, at completion.

use crate::catalog::{Catalog, ExerciseCategory};
use crate::errors::{CoreError, CoreResult};
use crate::models::{Entity, EntityKind, SINGLETON_ID};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Sets
// ============================================================================

/// One set of an exercise. Fields that do not apply stay `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSet {
    pub id: Uuid,
    pub reps: Option<u32>,
    pub weight_kg: Option<f64>,
    pub duration_seconds: Option<u32>,
    pub distance_m: Option<f64>,
    pub completed: bool,
    pub rpe: Option<u8>,
    pub rest_seconds: Option<u32>,
}

/// Values for a new set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SetValues {
    pub reps: Option<u32>,
    pub weight_kg: Option<f64>,
    pub duration_seconds: Option<u32>,
    pub distance_m: Option<f64>,
    #[serde(default)]
    pub completed: bool,
    pub rpe: Option<u8>,
    pub rest_seconds: Option<u32>,
}

/// Partial update of an existing set; `None` leaves the field unchanged
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SetUpdate {
    pub reps: Option<u32>,
    pub weight_kg: Option<f64>,
    pub duration_seconds: Option<u32>,
    pub distance_m: Option<f64>,
    pub completed: Option<bool>,
    pub rpe: Option<u8>,
    pub rest_seconds: Option<u32>,
}

fn check_rpe(rpe: Option<u8>) -> CoreResult<()> {
    match rpe {
        Some(value) if !(1..=10).contains(&value) => {
            Err(CoreError::invalid_input("rpe", "must be between 1 and 10"))
        }
        _ => Ok(()),
    }
}

fn check_non_negative(field: &str, value: Option<f64>) -> CoreResult<()> {
    match value {
        Some(v) if !v.is_finite() || v < 0.0 => {
            Err(CoreError::invalid_input(field, "must be zero or greater"))
        }
        _ => Ok(()),
    }
}

impl SetValues {
    fn validate(&self) -> CoreResult<()> {
        check_rpe(self.rpe)?;
        check_non_negative("weight_kg", self.weight_kg)?;
        check_non_negative("distance_m", self.distance_m)
    }
}

impl SetUpdate {
    fn validate(&self) -> CoreResult<()> {
        check_rpe(self.rpe)?;
        check_non_negative("weight_kg", self.weight_kg)?;
        check_non_negative("distance_m", self.distance_m)
    }
}

impl WorkoutSet {
    fn from_values(values: SetValues) -> Self {
        Self {
            id: Uuid::new_v4(),
            reps: values.reps,
            weight_kg: values.weight_kg,
            duration_seconds: values.duration_seconds,
            distance_m: values.distance_m,
            completed: values.completed,
            rpe: values.rpe,
            rest_seconds: values.rest_seconds,
        }
    }

    fn apply(&mut self, update: SetUpdate) {
        if let Some(reps) = update.reps {
            self.reps = Some(reps);
        }
        if let Some(weight) = update.weight_kg {
            self.weight_kg = Some(weight);
        }
        if let Some(duration) = update.duration_seconds {
            self.duration_seconds = Some(duration);
        }
        if let Some(distance) = update.distance_m {
            self.distance_m = Some(distance);
        }
        if let Some(completed) = update.completed {
            self.completed = completed;
        }
        if let Some(rpe) = update.rpe {
            self.rpe = Some(rpe);
        }
        if let Some(rest) = update.rest_seconds {
            self.rest_seconds = Some(rest);
        }
    }

    /// reps × weight, zero when either is missing
    pub fn volume(&self) -> f64 {
        f64::from(self.reps.unwrap_or(0)) * self.weight_kg.unwrap_or(0.0)
    }
}

// ============================================================================
// Exercise sessions
// ============================================================================

/// An exercise performed within a workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseSession {
    pub id: Uuid,
    pub exercise_id: String,
    pub exercise_name: String,
    pub category: ExerciseCategory,
    pub sets: Vec<WorkoutSet>,
    /// Σ reps × weight over completed sets (strength only)
    #[serde(default)]
    pub total_volume: f64,
    /// Σ duration over completed sets (cardio only), seconds
    #[serde(default)]
    pub total_time_seconds: u32,
    #[serde(default)]
    pub calories: f64,
}

impl ExerciseSession {
    pub fn completed_sets(&self) -> impl Iterator<Item = &WorkoutSet> {
        self.sets.iter().filter(|s| s.completed)
    }

    /// Minutes of work used for the calorie estimate
    ///
    /// Uses logged durations when present, otherwise one minute per
    /// completed set.
    pub fn active_minutes(&self) -> f64 {
        let seconds: u32 = self.completed_sets().filter_map(|s| s.duration_seconds).sum();
        if seconds > 0 {
            f64::from(seconds) / 60.0
        } else {
            self.completed_sets().count() as f64
        }
    }

    fn finalize(&mut self, calories_per_minute: f64) {
        self.total_volume = if self.category == ExerciseCategory::Strength {
            self.completed_sets().map(WorkoutSet::volume).sum()
        } else {
            0.0
        };
        self.total_time_seconds = if self.category == ExerciseCategory::Cardio {
            self.completed_sets().filter_map(|s| s.duration_seconds).sum()
        } else {
            0
        };
        self.calories = (calories_per_minute * self.active_minutes()).round();
    }
}

// ============================================================================
// Workout sessions
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSession {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub exercises: Vec<ExerciseSession>,
    pub completed: bool,
    /// Wall clock minutes between start and end
    #[serde(default)]
    pub total_duration_minutes: u32,
    #[serde(default)]
    pub total_calories: f64,
}

impl Entity for WorkoutSession {
    const KIND: EntityKind = EntityKind::Workout;

    fn entity_id(&self) -> String {
        self.id.to_string()
    }
}

impl WorkoutSession {
    fn new(name: &str, template_id: Option<String>, started_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            template_id,
            started_at,
            ended_at: None,
            exercises: Vec::new(),
            completed: false,
            total_duration_minutes: 0,
            total_calories: 0.0,
        }
    }

    pub fn completed_set_count(&self) -> usize {
        self.exercises.iter().map(|e| e.completed_sets().count()).sum()
    }

    /// Completed with at least one completed set; only these count toward
    /// stats, streaks and achievements
    pub fn has_completed_work(&self) -> bool {
        self.completed && self.completed_set_count() > 0
    }

    /// Σ volume over every exercise
    pub fn total_volume(&self) -> f64 {
        self.exercises.iter().map(|e| e.total_volume).sum()
    }

    /// Σ cardio time over every exercise, seconds
    pub fn total_cardio_seconds(&self) -> u32 {
        self.exercises.iter().map(|e| e.total_time_seconds).sum()
    }

    fn exercise_mut(&mut self, exercise_session_id: Uuid) -> CoreResult<&mut ExerciseSession> {
        self.exercises
            .iter_mut()
            .find(|e| e.id == exercise_session_id)
            .ok_or_else(|| CoreError::NotFound(format!("exercise {} in current workout", exercise_session_id)))
    }

    fn push_exercise(&mut self, catalog: &Catalog, exercise_id: &str) -> CoreResult<&mut ExerciseSession> {
        let exercise = catalog
            .exercise(exercise_id)
            .ok_or_else(|| CoreError::UnknownReference(format!("exercise '{}'", exercise_id)))?;

        self.exercises.push(ExerciseSession {
            id: Uuid::new_v4(),
            exercise_id: exercise.id.clone(),
            exercise_name: exercise.name.clone(),
            category: exercise.category,
            sets: Vec::new(),
            total_volume: 0.0,
            total_time_seconds: 0,
            calories: 0.0,
        });
        let last = self.exercises.len() - 1;
        Ok(&mut self.exercises[last])
    }

    fn finalize(&mut self, catalog: &Catalog, ended_at: DateTime<Utc>) {
        for exercise in &mut self.exercises {
            let per_minute = match catalog.exercise(&exercise.exercise_id) {
                Some(e) => e.calories_per_minute,
                None => {
                    tracing::warn!(exercise_id = %exercise.exercise_id, "Workout references unknown exercise");
                    0.0
                }
            };
            exercise.finalize(per_minute);
        }

        self.total_duration_minutes = (ended_at - self.started_at).num_minutes().max(0) as u32;
        self.total_calories = self.exercises.iter().map(|e| e.calories).sum();
        self.ended_at = Some(ended_at);
        self.completed = true;
    }
}

// ============================================================================
// Tracker
// ============================================================================

/// The owner's in-progress session slot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkoutTracker {
    pub current: Option<WorkoutSession>,
}

impl Entity for WorkoutTracker {
    const KIND: EntityKind = EntityKind::CurrentWorkout;

    fn entity_id(&self) -> String {
        SINGLETON_ID.to_string()
    }
}

impl WorkoutTracker {
    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }

    fn ensure_idle(&self) -> CoreResult<()> {
        match &self.current {
            Some(session) => Err(CoreError::StateInvariant(format!(
                "workout '{}' is already in progress",
                session.name
            ))),
            None => Ok(()),
        }
    }

    fn active_mut(&mut self) -> CoreResult<&mut WorkoutSession> {
        self.current
            .as_mut()
            .ok_or_else(|| CoreError::NotFound("no workout in progress".to_string()))
    }

    /// Start an empty session
    pub fn start(&mut self, name: &str, now: DateTime<Utc>) -> CoreResult<&WorkoutSession> {
        self.ensure_idle()?;
        Ok(&*self.current.insert(WorkoutSession::new(name, None, now)))
    }

    /// Start a session pre-filled with a template's exercises and planned sets
    pub fn start_from_template(
        &mut self,
        catalog: &Catalog,
        template_id: &str,
        now: DateTime<Utc>,
    ) -> CoreResult<&WorkoutSession> {
        self.ensure_idle()?;
        let template = catalog
            .template(template_id)
            .ok_or_else(|| CoreError::UnknownReference(format!("template '{}'", template_id)))?;

        let mut session = WorkoutSession::new(&template.name, Some(template.id.clone()), now);
        for line in &template.exercises {
            let defaults = catalog.exercise(&line.exercise_id);
            let sets = line
                .sets
                .or_else(|| defaults.and_then(|e| e.default_sets))
                .unwrap_or(1);
            let reps = line
                .reps
                .as_deref()
                .or_else(|| defaults.and_then(|e| e.default_reps.as_deref()))
                .and_then(lower_rep_bound);
            let rest = line
                .rest_seconds
                .or_else(|| defaults.and_then(|e| e.default_rest_seconds));

            let exercise = session.push_exercise(catalog, &line.exercise_id)?;
            for _ in 0..sets {
                exercise.sets.push(WorkoutSet::from_values(SetValues {
                    reps,
                    duration_seconds: line.duration_seconds,
                    rest_seconds: rest,
                    ..SetValues::default()
                }));
            }
        }

        Ok(&*self.current.insert(session))
    }

    pub fn add_exercise(&mut self, catalog: &Catalog, exercise_id: &str) -> CoreResult<ExerciseSession> {
        let session = self.active_mut()?;
        Ok(session.push_exercise(catalog, exercise_id)?.clone())
    }

    pub fn add_set(&mut self, exercise_session_id: Uuid, values: SetValues) -> CoreResult<WorkoutSet> {
        values.validate()?;
        let exercise = self.active_mut()?.exercise_mut(exercise_session_id)?;
        let set = WorkoutSet::from_values(values);
        exercise.sets.push(set.clone());
        Ok(set)
    }

    pub fn update_set(
        &mut self,
        exercise_session_id: Uuid,
        set_id: Uuid,
        update: SetUpdate,
    ) -> CoreResult<WorkoutSet> {
        update.validate()?;
        let exercise = self.active_mut()?.exercise_mut(exercise_session_id)?;
        let set = exercise
            .sets
            .iter_mut()
            .find(|s| s.id == set_id)
            .ok_or_else(|| CoreError::NotFound(format!("set {}", set_id)))?;
        set.apply(update);
        Ok(set.clone())
    }

    /// Finish the in-progress session, computing its derived totals
    pub fn complete(&mut self, catalog: &Catalog, now: DateTime<Utc>) -> CoreResult<WorkoutSession> {
        let mut session = self
            .current
            .take()
            .ok_or_else(|| CoreError::NotFound("no workout in progress".to_string()))?;
        session.finalize(catalog, now);
        Ok(session)
    }

    /// Drop the in-progress session without recording it
    pub fn discard(&mut self) -> CoreResult<WorkoutSession> {
        self.current
            .take()
            .ok_or_else(|| CoreError::NotFound("no workout in progress".to_string()))
    }
}

/// "8-12" → 8, "5" → 5
fn lower_rep_bound(reps: &str) -> Option<u32> {
    reps.split('-').next()?.trim().parse().ok()
}
