//! Personal records, achievements and body weight

use crate::error::ApiResult;
use crate::services::profile::ProfileService;
use crate::store::OwnerStore;
use chrono::{DateTime, Utc};
use fittrack_shared::daily_log::{is_expired, DailyNutritionLog};
use fittrack_shared::records::{Achievement, AchievementBook, AchievementInputs, PersonalRecordBook};
use fittrack_shared::stats::{current_streak, weight_trend, WeightTrend};
use fittrack_shared::validation::{validate_request, weight_entry};
use fittrack_shared::workout_session::WorkoutSession;
use fittrack_shared::{LogWeightRequest, WeightEntry, SINGLETON_ID};
use tracing::{debug, info};

pub struct ProgressService;

impl ProgressService {
    pub async fn records(docs: &OwnerStore) -> ApiResult<PersonalRecordBook> {
        Ok(docs
            .load::<PersonalRecordBook>(SINGLETON_ID)
            .await?
            .unwrap_or_default())
    }

    pub async fn achievements(docs: &OwnerStore) -> ApiResult<AchievementBook> {
        let mut book = docs
            .load::<AchievementBook>(SINGLETON_ID)
            .await?
            .unwrap_or_default();
        book.sync_table();
        Ok(book)
    }

    /// Lifetime figures from stored history
    ///
    /// Sessions without a completed set count for nothing.
    pub async fn achievement_inputs(docs: &OwnerStore, now: DateTime<Utc>) -> ApiResult<AchievementInputs> {
        let sessions: Vec<WorkoutSession> = docs
            .load_all::<WorkoutSession>()
            .await?
            .into_iter()
            .filter(|s| s.has_completed_work())
            .collect();
        let logs = docs.load_all::<DailyNutritionLog>().await?;
        let records = Self::records(docs).await?;

        Ok(AchievementInputs {
            workouts_completed: sessions.len() as u32,
            workout_streak: current_streak(
                sessions.iter().map(|s| s.started_at.date_naive()),
                now.date_naive(),
            ),
            total_volume_kg: sessions.iter().map(WorkoutSession::total_volume).sum(),
            cardio_minutes: sessions
                .iter()
                .map(|s| f64::from(s.total_cardio_seconds()) / 60.0)
                .sum(),
            nutrition_days_logged: logs.iter().filter(|l| l.has_entries()).count() as u32,
            personal_records: records.records.len() as u32,
        })
    }

    /// Re-evaluate the achievement table, returning newly unlocked entries
    pub async fn evaluate_achievements(docs: &OwnerStore, now: DateTime<Utc>) -> ApiResult<Vec<Achievement>> {
        let inputs = Self::achievement_inputs(docs, now).await?;
        let stored = docs.load::<AchievementBook>(SINGLETON_ID).await?;
        let mut book = stored.clone().unwrap_or_default();

        let unlocked = book.evaluate(&inputs, now);
        if stored.as_ref() != Some(&book) {
            docs.save(&book).await?;
        }

        for achievement in &unlocked {
            info!(owner = %docs.owner(), achievement = %achievement.id, "Achievement unlocked");
        }
        Ok(unlocked)
    }

    /// Store a weight measurement
    ///
    /// The newest measurement also becomes the profile weight, which
    /// re-derives the cached goals. Backdated entries leave the profile alone.
    pub async fn log_weight(
        docs: &OwnerStore,
        req: LogWeightRequest,
        retention_days: u32,
        now: DateTime<Utc>,
    ) -> ApiResult<WeightEntry> {
        validate_request(&req)?;
        let entry = weight_entry(req.weight_kg, req.recorded_at.unwrap_or(now))?;

        let existing = docs.load_all::<WeightEntry>().await?;
        let is_latest = existing.iter().all(|e| e.recorded_at <= entry.recorded_at);
        docs.save(&entry).await?;

        if is_latest {
            let mut profile = ProfileService::require_profile(docs).await?;
            profile.weight_kg = entry.weight_kg;
            profile.updated_at = now;
            let goals = ProfileService::save_with_goals(docs, &profile).await?;
            debug!(owner = %docs.owner(), calories = goals.calories, "Goals re-derived from new weight");
        }

        Self::prune_expired_weights(docs, &existing, retention_days, now).await?;

        info!(owner = %docs.owner(), weight_kg = entry.weight_kg, "Weight logged");
        Ok(entry)
    }

    /// Drop weight entries older than the retention window
    async fn prune_expired_weights(
        docs: &OwnerStore,
        entries: &[WeightEntry],
        retention_days: u32,
        now: DateTime<Utc>,
    ) -> ApiResult<()> {
        let today = now.date_naive();
        for entry in entries
            .iter()
            .filter(|e| is_expired(e.recorded_at.date_naive(), today, retention_days))
        {
            docs.remove::<WeightEntry>(&entry.id.to_string()).await?;
            debug!(owner = %docs.owner(), entry = %entry.id, "Pruned expired weight entry");
        }
        Ok(())
    }

    pub async fn weight_trend(docs: &OwnerStore, window_days: u32, now: DateTime<Utc>) -> ApiResult<WeightTrend> {
        let entries = docs.load_all::<WeightEntry>().await?;
        Ok(weight_trend(&entries, window_days, now))
    }
}
