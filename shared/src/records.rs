//! Personal records and achievements

use crate::errors::{CoreError, CoreResult};
use crate::models::{Entity, EntityKind, SINGLETON_ID};
use crate::workout_session::{ExerciseSession, WorkoutSession};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Personal records
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecordMetric {
    MaxWeight,
    MaxReps,
    TotalVolume,
    TotalDuration,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalRecord {
    pub exercise_id: String,
    pub exercise_name: String,
    pub metric: RecordMetric,
    pub value: f64,
    pub achieved_at: DateTime<Utc>,
    pub session_id: Uuid,
}

/// Best value per (exercise, metric)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonalRecordBook {
    pub records: Vec<PersonalRecord>,
}

impl Entity for PersonalRecordBook {
    const KIND: EntityKind = EntityKind::PersonalRecords;

    fn entity_id(&self) -> String {
        SINGLETON_ID.to_string()
    }
}

/// Record candidates for one exercise, from completed sets only
pub fn record_candidates(exercise: &ExerciseSession) -> Vec<(RecordMetric, f64)> {
    let completed: Vec<_> = exercise.completed_sets().collect();
    if completed.is_empty() {
        return Vec::new();
    }

    let max_weight = completed
        .iter()
        .filter_map(|s| s.weight_kg)
        .fold(0.0_f64, f64::max);
    let max_reps = completed.iter().filter_map(|s| s.reps).max().unwrap_or(0);

    [
        (RecordMetric::MaxWeight, max_weight),
        (RecordMetric::MaxReps, f64::from(max_reps)),
        (RecordMetric::TotalVolume, exercise.total_volume),
        (RecordMetric::TotalDuration, f64::from(exercise.total_time_seconds)),
    ]
    .into_iter()
    .filter(|(_, value)| *value > 0.0)
    .collect()
}

impl PersonalRecordBook {
    pub fn get(&self, exercise_id: &str, metric: RecordMetric) -> Option<&PersonalRecord> {
        self.records
            .iter()
            .find(|r| r.exercise_id == exercise_id && r.metric == metric)
    }

    pub fn for_exercise<'a>(&'a self, exercise_id: &'a str) -> impl Iterator<Item = &'a PersonalRecord> {
        self.records.iter().filter(move |r| r.exercise_id == exercise_id)
    }

    /// Store `candidate` if it beats the current best. Ties keep the old
    /// record untouched.
    pub fn consider(&mut self, candidate: PersonalRecord) -> bool {
        match self
            .records
            .iter_mut()
            .find(|r| r.exercise_id == candidate.exercise_id && r.metric == candidate.metric)
        {
            Some(existing) if candidate.value > existing.value => {
                *existing = candidate;
                true
            }
            Some(_) => false,
            None => {
                self.records.push(candidate);
                true
            }
        }
    }

    /// Fold a completed session into the book, returning records it set
    pub fn apply_session(&mut self, session: &WorkoutSession) -> Vec<PersonalRecord> {
        let achieved_at = session.ended_at.unwrap_or(session.started_at);
        let mut improved = Vec::new();

        for exercise in &session.exercises {
            for (metric, value) in record_candidates(exercise) {
                let candidate = PersonalRecord {
                    exercise_id: exercise.exercise_id.clone(),
                    exercise_name: exercise.exercise_name.clone(),
                    metric,
                    value,
                    achieved_at,
                    session_id: session.id,
                };
                if self.consider(candidate.clone()) {
                    improved.push(candidate);
                }
            }
        }
        improved
    }
}

// ============================================================================
// Achievements
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementCategory {
    Workouts,
    Consistency,
    Strength,
    Cardio,
    Nutrition,
    Records,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: AchievementCategory,
    pub progress: f64,
    pub target: f64,
    pub unlocked_at: Option<DateTime<Utc>>,
}

impl Achievement {
    pub fn new(id: &str, name: &str, description: &str, category: AchievementCategory, target: f64) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            category,
            progress: 0.0,
            target,
            unlocked_at: None,
        }
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked_at.is_some()
    }

    /// Raise progress to `value`
    ///
    /// Returns `true` when this call unlocked the achievement. A value below
    /// the current progress is rejected.
    pub fn update_progress(&mut self, value: f64, now: DateTime<Utc>) -> CoreResult<bool> {
        if value < self.progress {
            return Err(CoreError::StateInvariant(format!(
                "progress for '{}' cannot decrease from {} to {}",
                self.id, self.progress, value
            )));
        }
        self.progress = value;

        if self.unlocked_at.is_none() && self.progress >= self.target {
            self.unlocked_at = Some(now);
            return Ok(true);
        }
        Ok(false)
    }
}

/// Lifetime figures the achievement table is measured against
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AchievementInputs {
    pub workouts_completed: u32,
    pub workout_streak: u32,
    pub total_volume_kg: f64,
    pub cardio_minutes: f64,
    pub nutrition_days_logged: u32,
    pub personal_records: u32,
}

impl AchievementInputs {
    fn value_for(&self, achievement_id: &str) -> Option<f64> {
        let value = match achievement_id {
            "first-workout" | "ten-workouts" | "fifty-workouts" => f64::from(self.workouts_completed),
            "week-streak" => f64::from(self.workout_streak),
            "volume-10000" => self.total_volume_kg,
            "cardio-600" => self.cardio_minutes,
            "nutrition-week" => f64::from(self.nutrition_days_logged),
            "ten-records" => f64::from(self.personal_records),
            _ => return None,
        };
        Some(value)
    }
}

fn default_table() -> Vec<Achievement> {
    use AchievementCategory::*;
    vec![
        Achievement::new("first-workout", "First Steps", "Complete your first workout", Workouts, 1.0),
        Achievement::new("ten-workouts", "Getting Serious", "Complete 10 workouts", Workouts, 10.0),
        Achievement::new("fifty-workouts", "Dedicated", "Complete 50 workouts", Workouts, 50.0),
        Achievement::new("week-streak", "Week Warrior", "Work out 7 days in a row", Consistency, 7.0),
        Achievement::new("volume-10000", "Heavy Lifter", "Lift 10,000 kg in total", Strength, 10_000.0),
        Achievement::new("cardio-600", "Cardio Machine", "Log 600 minutes of cardio", Cardio, 600.0),
        Achievement::new("nutrition-week", "Mindful Eater", "Log your nutrition on 7 days", Nutrition, 7.0),
        Achievement::new("ten-records", "Record Breaker", "Set 10 personal records", Records, 10.0),
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementBook {
    pub achievements: Vec<Achievement>,
}

impl Default for AchievementBook {
    fn default() -> Self {
        Self {
            achievements: default_table(),
        }
    }
}

impl Entity for AchievementBook {
    const KIND: EntityKind = EntityKind::Achievements;

    fn entity_id(&self) -> String {
        SINGLETON_ID.to_string()
    }
}

impl AchievementBook {
    pub fn get(&self, id: &str) -> Option<&Achievement> {
        self.achievements.iter().find(|a| a.id == id)
    }

    /// Append table entries missing from an older stored book
    pub fn sync_table(&mut self) {
        for entry in default_table() {
            if self.get(&entry.id).is_none() {
                self.achievements.push(entry);
            }
        }
    }

    /// Update every achievement from `inputs`, returning those unlocked now
    ///
    /// A figure lower than the stored progress (a broken streak, pruned
    /// logs) leaves that achievement unchanged.
    pub fn evaluate(&mut self, inputs: &AchievementInputs, now: DateTime<Utc>) -> Vec<Achievement> {
        self.sync_table();
        let mut unlocked = Vec::new();

        for achievement in &mut self.achievements {
            let Some(value) = inputs.value_for(&achievement.id) else {
                continue;
            };
            match achievement.update_progress(value, now) {
                Ok(true) => unlocked.push(achievement.clone()),
                Ok(false) => {}
                Err(e) => tracing::debug!(achievement = %achievement.id, error = %e, "Keeping earlier progress"),
            }
        }
        unlocked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, ExerciseCategory};
    use crate::workout_session::{SetValues, WorkoutTracker};
    use chrono::Duration;
    use proptest::prelude::*;

    fn lifting_session(sets: &[(u32, f64, bool)]) -> WorkoutSession {
        let catalog = Catalog::builtin();
        let mut tracker = WorkoutTracker::default();
        tracker.start("Bench", Utc::now()).unwrap();
        let bench = tracker.add_exercise(catalog, "bench-press").unwrap();
        for &(reps, weight_kg, completed) in sets {
            tracker
                .add_set(
                    bench.id,
                    SetValues {
                        reps: Some(reps),
                        weight_kg: Some(weight_kg),
                        completed,
                        ..SetValues::default()
                    },
                )
                .unwrap();
        }
        tracker.complete(catalog, Utc::now()).unwrap()
    }

    fn record(value: f64) -> PersonalRecord {
        PersonalRecord {
            exercise_id: "bench-press".to_string(),
            exercise_name: "Bench".to_string(),
            metric: RecordMetric::MaxWeight,
            value,
            achieved_at: Utc::now(),
            session_id: Uuid::new_v4(),
        }
    }

    #[test]
    fn test_three_sets_of_ten_at_fifty() {
        let session = lifting_session(&[(10, 50.0, true), (10, 50.0, true), (10, 50.0, true)]);
        let mut book = PersonalRecordBook::default();
        let improved = book.apply_session(&session);

        assert_eq!(improved.len(), 3);
        assert_eq!(book.get("bench-press", RecordMetric::MaxWeight).unwrap().value, 50.0);
        assert_eq!(book.get("bench-press", RecordMetric::MaxReps).unwrap().value, 10.0);
        assert_eq!(book.get("bench-press", RecordMetric::TotalVolume).unwrap().value, 1500.0);
        assert!(book.get("bench-press", RecordMetric::TotalDuration).is_none());
    }

    #[test]
    fn test_strictly_greater_replaces() {
        let mut book = PersonalRecordBook::default();
        let first = record(50.0);
        let first_date = first.achieved_at;
        assert!(book.consider(first));

        let mut tie = record(50.0);
        tie.achieved_at = first_date + Duration::days(1);
        assert!(!book.consider(tie));
        assert_eq!(book.get("bench-press", RecordMetric::MaxWeight).unwrap().achieved_at, first_date);

        assert!(book.consider(record(55.0)));
        assert_eq!(book.get("bench-press", RecordMetric::MaxWeight).unwrap().value, 55.0);

        assert!(!book.consider(record(40.0)));
        assert_eq!(book.get("bench-press", RecordMetric::MaxWeight).unwrap().value, 55.0);
        assert_eq!(book.records.len(), 1);
    }

    #[test]
    fn test_incomplete_sets_set_no_records() {
        let session = lifting_session(&[(10, 80.0, false)]);
        let mut book = PersonalRecordBook::default();
        assert!(book.apply_session(&session).is_empty());
        assert!(book.records.is_empty());
    }

    #[test]
    fn test_cardio_duration_candidate() {
        let exercise = ExerciseSession {
            id: Uuid::new_v4(),
            exercise_id: "running".to_string(),
            exercise_name: "Running".to_string(),
            category: ExerciseCategory::Cardio,
            sets: vec![crate::workout_session::WorkoutSet {
                id: Uuid::new_v4(),
                reps: None,
                weight_kg: None,
                duration_seconds: Some(1200),
                distance_m: Some(4000.0),
                completed: true,
                rpe: None,
                rest_seconds: None,
            }],
            total_volume: 0.0,
            total_time_seconds: 1200,
            calories: 0.0,
        };
        assert_eq!(record_candidates(&exercise), vec![(RecordMetric::TotalDuration, 1200.0)]);
    }

    #[test]
    fn test_achievement_unlocks_once() {
        let mut achievement = Achievement::new("t", "T", "", AchievementCategory::Workouts, 3.0);
        let t0 = Utc::now();
        assert!(!achievement.update_progress(2.0, t0).unwrap());
        assert!(achievement.update_progress(3.0, t0).unwrap());
        assert_eq!(achievement.unlocked_at, Some(t0));

        let later = t0 + Duration::days(1);
        assert!(!achievement.update_progress(5.0, later).unwrap());
        assert_eq!(achievement.unlocked_at, Some(t0));
    }

    #[test]
    fn test_achievement_rejects_regression() {
        let mut achievement = Achievement::new("t", "T", "", AchievementCategory::Workouts, 10.0);
        achievement.update_progress(4.0, Utc::now()).unwrap();
        let err = achievement.update_progress(3.0, Utc::now()).unwrap_err();
        assert!(matches!(err, CoreError::StateInvariant(_)));
        assert_eq!(achievement.progress, 4.0);
    }

    #[test]
    fn test_evaluate_first_workout() {
        let mut book = AchievementBook::default();
        let inputs = AchievementInputs {
            workouts_completed: 1,
            workout_streak: 1,
            total_volume_kg: 1500.0,
            ..AchievementInputs::default()
        };
        let unlocked = book.evaluate(&inputs, Utc::now());
        let ids: Vec<_> = unlocked.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["first-workout"]);
        assert_eq!(book.get("volume-10000").unwrap().progress, 1500.0);

        // Re-evaluating with the same figures unlocks nothing new
        assert!(book.evaluate(&inputs, Utc::now()).is_empty());
    }

    #[test]
    fn test_evaluate_keeps_progress_on_broken_streak() {
        let mut book = AchievementBook::default();
        let now = Utc::now();
        book.evaluate(&AchievementInputs { workout_streak: 5, ..Default::default() }, now);
        book.evaluate(&AchievementInputs { workout_streak: 1, ..Default::default() }, now);
        assert_eq!(book.get("week-streak").unwrap().progress, 5.0);
    }

    #[test]
    fn test_sync_table_adds_missing_entries() {
        let mut book = AchievementBook { achievements: vec![] };
        book.sync_table();
        assert_eq!(book.achievements.len(), AchievementBook::default().achievements.len());
    }

    proptest! {
        /// Progress never decreases and unlock time never changes once set
        #[test]
        fn prop_achievement_progress_is_monotonic(values in proptest::collection::vec(0.0f64..20.0, 1..30)) {
            let mut achievement = Achievement::new("t", "T", "", AchievementCategory::Workouts, 10.0);
            let mut best = 0.0_f64;
            let mut unlocked_at = None;
            let start = Utc::now();

            for (i, value) in values.into_iter().enumerate() {
                let now = start + Duration::minutes(i as i64);
                let result = achievement.update_progress(value, now);
                if value < best {
                    prop_assert!(result.is_err());
                } else {
                    best = value;
                    prop_assert!(result.is_ok());
                }
                prop_assert_eq!(achievement.progress, best);

                if unlocked_at.is_none() {
                    unlocked_at = achievement.unlocked_at;
                } else {
                    prop_assert_eq!(achievement.unlocked_at, unlocked_at);
                }
                prop_assert_eq!(achievement.is_unlocked(), best >= 10.0);
            }
        }
    }
}
