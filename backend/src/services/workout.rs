//! Workout session service
//!
//! The in-progress session lives in the owner's `current_workout` slot.
//! Starting checks that slot before writing; completing moves the session
//! into history and folds it into records and achievements.

use crate::error::{ApiError, ApiResult};
use crate::services::progress::ProgressService;
use crate::store::OwnerStore;
use chrono::{DateTime, Utc};
use fittrack_shared::records::PersonalRecordBook;
use fittrack_shared::stats::{get_workout_stats, WorkoutStats};
use fittrack_shared::validation::validate_request;
use fittrack_shared::workout_session::{ExerciseSession, WorkoutSession, WorkoutSet, WorkoutTracker};
use fittrack_shared::{
    AddExerciseRequest, Catalog, CompleteWorkoutResponse, CoreError, LogSetRequest,
    StartWorkoutRequest, UpdateSetRequest, SINGLETON_ID,
};
use tracing::info;
use uuid::Uuid;

const DEFAULT_WORKOUT_NAME: &str = "Workout";

pub struct WorkoutService;

impl WorkoutService {
    async fn tracker(docs: &OwnerStore) -> ApiResult<WorkoutTracker> {
        Ok(docs
            .load::<WorkoutTracker>(SINGLETON_ID)
            .await?
            .unwrap_or_default())
    }

    /// The in-progress session, if any
    pub async fn current(docs: &OwnerStore) -> ApiResult<Option<WorkoutSession>> {
        Ok(Self::tracker(docs).await?.current)
    }

    pub async fn start(
        docs: &OwnerStore,
        req: StartWorkoutRequest,
        now: DateTime<Utc>,
    ) -> ApiResult<WorkoutSession> {
        validate_request(&req)?;
        let mut tracker = Self::tracker(docs).await?;

        let started = match &req.template_id {
            Some(template_id) => tracker.start_from_template(Catalog::builtin(), template_id, now),
            None => tracker.start(req.name.as_deref().unwrap_or(DEFAULT_WORKOUT_NAME), now),
        };
        let session = started
            .map_err(|e| match e {
                CoreError::StateInvariant(msg) => ApiError::SessionInProgress(msg),
                other => other.into(),
            })?
            .clone();

        docs.save(&tracker).await?;

        info!(owner = %docs.owner(), session = %session.id, name = %session.name, "Workout started");
        Ok(session)
    }

    pub async fn add_exercise(docs: &OwnerStore, req: AddExerciseRequest) -> ApiResult<ExerciseSession> {
        validate_request(&req)?;
        let mut tracker = Self::tracker(docs).await?;
        let exercise = tracker.add_exercise(Catalog::builtin(), &req.exercise_id)?;
        docs.save(&tracker).await?;
        Ok(exercise)
    }

    pub async fn add_set(docs: &OwnerStore, exercise_session_id: Uuid, req: LogSetRequest) -> ApiResult<WorkoutSet> {
        validate_request(&req)?;
        let mut tracker = Self::tracker(docs).await?;
        let set = tracker.add_set(exercise_session_id, req.into())?;
        docs.save(&tracker).await?;
        Ok(set)
    }

    pub async fn update_set(
        docs: &OwnerStore,
        exercise_session_id: Uuid,
        set_id: Uuid,
        req: UpdateSetRequest,
    ) -> ApiResult<WorkoutSet> {
        validate_request(&req)?;
        let mut tracker = Self::tracker(docs).await?;
        let set = tracker.update_set(exercise_session_id, set_id, req.into())?;
        docs.save(&tracker).await?;
        Ok(set)
    }

    /// Finish the current session
    ///
    /// History is written before the slot is cleared; a retry after a
    /// partial failure rewrites the same session id.
    pub async fn complete(docs: &OwnerStore, now: DateTime<Utc>) -> ApiResult<CompleteWorkoutResponse> {
        let mut tracker = Self::tracker(docs).await?;
        let session = tracker.complete(Catalog::builtin(), now)?;

        docs.save(&session).await?;
        docs.save(&tracker).await?;

        let mut book = docs
            .load::<PersonalRecordBook>(SINGLETON_ID)
            .await?
            .unwrap_or_default();
        let new_records = book.apply_session(&session);
        if !new_records.is_empty() {
            docs.save(&book).await?;
        }

        let unlocked_achievements = ProgressService::evaluate_achievements(docs, now).await?;

        info!(
            owner = %docs.owner(),
            session = %session.id,
            minutes = session.total_duration_minutes,
            calories = session.total_calories,
            records = new_records.len(),
            "Workout completed"
        );

        Ok(CompleteWorkoutResponse {
            session,
            new_records,
            unlocked_achievements,
        })
    }

    pub async fn discard(docs: &OwnerStore) -> ApiResult<WorkoutSession> {
        let mut tracker = Self::tracker(docs).await?;
        let session = tracker.discard()?;
        docs.save(&tracker).await?;

        info!(owner = %docs.owner(), session = %session.id, "Workout discarded");
        Ok(session)
    }

    /// Completed sessions, newest first
    pub async fn history(docs: &OwnerStore, limit: usize) -> ApiResult<Vec<WorkoutSession>> {
        let mut sessions = docs.load_all::<WorkoutSession>().await?;
        sessions.sort_by(|a, b| b.started_at.cmp(&a.started_at));
        sessions.truncate(limit);
        Ok(sessions)
    }

    pub async fn stats(docs: &OwnerStore, window_days: u32, now: DateTime<Utc>) -> ApiResult<WorkoutStats> {
        let sessions = docs.load_all::<WorkoutSession>().await?;
        Ok(get_workout_stats(&sessions, window_days, now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, Store};
    use fittrack_shared::records::RecordMetric;
    use std::sync::Arc;

    fn docs() -> OwnerStore {
        let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
        OwnerStore::new(store, "owner-1")
    }

    fn named(name: &str) -> StartWorkoutRequest {
        StartWorkoutRequest {
            name: Some(name.to_string()),
            template_id: None,
        }
    }

    fn lift(reps: u32, weight_kg: f64) -> LogSetRequest {
        LogSetRequest {
            reps: Some(reps),
            weight_kg: Some(weight_kg),
            completed: true,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_second_start_is_rejected() {
        let docs = docs();
        WorkoutService::start(&docs, named("Push"), Utc::now()).await.unwrap();
        let err = WorkoutService::start(&docs, named("Pull"), Utc::now()).await.unwrap_err();
        assert!(matches!(err, ApiError::SessionInProgress(_)));

        let current = WorkoutService::current(&docs).await.unwrap().unwrap();
        assert_eq!(current.name, "Push");
    }

    #[tokio::test]
    async fn test_complete_records_volume_and_max_weight() {
        let docs = docs();
        let now = Utc::now();
        WorkoutService::start(&docs, named("Bench"), now).await.unwrap();
        let bench = WorkoutService::add_exercise(
            &docs,
            AddExerciseRequest {
                exercise_id: "bench-press".to_string(),
            },
        )
        .await
        .unwrap();
        for _ in 0..3 {
            WorkoutService::add_set(&docs, bench.id, lift(10, 50.0)).await.unwrap();
        }

        let done = WorkoutService::complete(&docs, now).await.unwrap();
        assert_eq!(done.session.exercises[0].total_volume, 1500.0);
        assert!(done.session.completed);

        let max_weight = done
            .new_records
            .iter()
            .find(|r| r.metric == RecordMetric::MaxWeight)
            .unwrap();
        assert_eq!(max_weight.value, 50.0);
        assert!(done.unlocked_achievements.iter().any(|a| a.id == "first-workout"));

        assert!(WorkoutService::current(&docs).await.unwrap().is_none());
        assert_eq!(WorkoutService::history(&docs, 10).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_session_without_completed_sets_earns_nothing() {
        let docs = docs();
        WorkoutService::start(&docs, named("Idle"), Utc::now()).await.unwrap();
        let done = WorkoutService::complete(&docs, Utc::now()).await.unwrap();
        assert!(done.new_records.is_empty());
        assert!(done.unlocked_achievements.is_empty());
    }

    #[tokio::test]
    async fn test_update_unknown_set_is_not_found() {
        let docs = docs();
        WorkoutService::start(&docs, named("Legs"), Utc::now()).await.unwrap();
        let squat = WorkoutService::add_exercise(
            &docs,
            AddExerciseRequest {
                exercise_id: "bodyweight-squat".to_string(),
            },
        )
        .await
        .unwrap();

        let err = WorkoutService::update_set(&docs, squat.id, Uuid::new_v4(), UpdateSetRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_discard_frees_the_slot() {
        let docs = docs();
        WorkoutService::start(&docs, named("Oops"), Utc::now()).await.unwrap();
        WorkoutService::discard(&docs).await.unwrap();
        assert!(WorkoutService::history(&docs, 10).await.unwrap().is_empty());
        WorkoutService::start(&docs, named("Again"), Utc::now()).await.unwrap();
    }

    #[tokio::test]
    async fn test_start_from_template_prefills_sets() {
        let docs = docs();
        let req = StartWorkoutRequest {
            name: None,
            template_id: Some("upper-body-strength".to_string()),
        };
        let session = WorkoutService::start(&docs, req, Utc::now()).await.unwrap();
        assert_eq!(session.template_id.as_deref(), Some("upper-body-strength"));
        assert_eq!(session.exercises[0].sets.len(), 4);
        assert_eq!(session.exercises[0].sets[0].reps, Some(6));
    }
}
