//! Daily nutrition log service
//!
//! Logs are stored one per date, so reading a missing date never writes and
//! the first mutation upserts it. Every mutation recomputes the log totals,
//! prunes logs past the retention window and re-evaluates achievements.

use crate::error::{ApiError, ApiResult};
use crate::services::profile::ProfileService;
use crate::services::progress::ProgressService;
use crate::store::OwnerStore;
use chrono::{DateTime, NaiveDate, Utc};
use fittrack_shared::daily_log::{is_expired, log_id, DailyNutritionLog};
use fittrack_shared::stats::{daily_progress, nutrition_summary, NutritionSummary};
use fittrack_shared::validation::{resolve_food_quantity, validate_request};
use fittrack_shared::{Catalog, CoreError, DailyLogResponse, LogFoodRequest, LogWaterRequest};
use tracing::{debug, info};
use uuid::Uuid;

/// Settings every write needs
#[derive(Debug, Clone, Copy)]
pub struct WriteContext {
    pub retention_days: u32,
    pub now: DateTime<Utc>,
}

pub struct NutritionService;

impl NutritionService {
    /// The stored log for `date`, or an empty one. Never writes.
    pub async fn get_log_for_date(docs: &OwnerStore, date: NaiveDate) -> ApiResult<DailyNutritionLog> {
        Ok(docs
            .load::<DailyNutritionLog>(&log_id(date))
            .await?
            .unwrap_or_else(|| DailyNutritionLog::new(date)))
    }

    /// A log with progress against the owner's goals
    pub async fn daily_view(docs: &OwnerStore, date: NaiveDate) -> ApiResult<DailyLogResponse> {
        let log = Self::get_log_for_date(docs, date).await?;
        Self::with_progress(docs, log).await
    }

    async fn with_progress(docs: &OwnerStore, log: DailyNutritionLog) -> ApiResult<DailyLogResponse> {
        let goals = ProfileService::cached_goals(docs).await?;
        let progress = goals.as_ref().map(|g| daily_progress(&log.totals, g));
        Ok(DailyLogResponse { log, goals, progress })
    }

    pub async fn add_food(
        docs: &OwnerStore,
        date: NaiveDate,
        req: LogFoodRequest,
        ctx: WriteContext,
    ) -> ApiResult<DailyLogResponse> {
        validate_request(&req)?;
        let catalog = Catalog::builtin();
        let food = catalog
            .food(&req.food_id)
            .ok_or_else(|| CoreError::UnknownReference(format!("food '{}'", req.food_id)))?;
        let quantity_g = resolve_food_quantity(food, &req)?;

        let mut log = Self::get_log_for_date(docs, date).await?;
        let entry = log.add_food(
            catalog,
            &req.food_id,
            quantity_g,
            req.meal_type,
            req.logged_at.unwrap_or(ctx.now),
        )?;

        info!(
            owner = %docs.owner(),
            date = %date,
            food = %entry.food_id,
            quantity_g = entry.quantity_g,
            "Food logged"
        );
        Self::commit(docs, log, ctx).await
    }

    pub async fn remove_food(
        docs: &OwnerStore,
        date: NaiveDate,
        entry_id: Uuid,
        ctx: WriteContext,
    ) -> ApiResult<DailyLogResponse> {
        let mut log = Self::stored_log(docs, date).await?;
        log.remove_food(Catalog::builtin(), entry_id)?;
        Self::commit(docs, log, ctx).await
    }

    pub async fn add_water(
        docs: &OwnerStore,
        date: NaiveDate,
        req: LogWaterRequest,
        ctx: WriteContext,
    ) -> ApiResult<DailyLogResponse> {
        validate_request(&req)?;
        let mut log = Self::get_log_for_date(docs, date).await?;
        log.add_water(Catalog::builtin(), req.amount_ml, req.logged_at.unwrap_or(ctx.now))?;

        debug!(owner = %docs.owner(), date = %date, amount_ml = req.amount_ml, "Water logged");
        Self::commit(docs, log, ctx).await
    }

    pub async fn remove_water(
        docs: &OwnerStore,
        date: NaiveDate,
        entry_id: Uuid,
        ctx: WriteContext,
    ) -> ApiResult<DailyLogResponse> {
        let mut log = Self::stored_log(docs, date).await?;
        log.remove_water(Catalog::builtin(), entry_id)?;
        Self::commit(docs, log, ctx).await
    }

    /// Summary over the trailing window ending on the current date
    pub async fn summary(docs: &OwnerStore, window_days: u32, now: DateTime<Utc>) -> ApiResult<NutritionSummary> {
        let logs = docs.load_all::<DailyNutritionLog>().await?;
        let goals = ProfileService::cached_goals(docs).await?;
        Ok(nutrition_summary(&logs, goals.as_ref(), window_days, now.date_naive()))
    }

    async fn stored_log(docs: &OwnerStore, date: NaiveDate) -> ApiResult<DailyNutritionLog> {
        docs.load::<DailyNutritionLog>(&log_id(date))
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("No nutrition log for {}", date)))
    }

    async fn commit(docs: &OwnerStore, log: DailyNutritionLog, ctx: WriteContext) -> ApiResult<DailyLogResponse> {
        docs.save(&log).await?;
        Self::prune_expired_logs(docs, log.date, ctx).await?;
        ProgressService::evaluate_achievements(docs, ctx.now).await?;
        Self::with_progress(docs, log).await
    }

    /// Remove logs past retention, except the one just written
    async fn prune_expired_logs(docs: &OwnerStore, written: NaiveDate, ctx: WriteContext) -> ApiResult<()> {
        let today = ctx.now.date_naive();
        let expired: Vec<NaiveDate> = docs
            .load_all::<DailyNutritionLog>()
            .await?
            .into_iter()
            .map(|log| log.date)
            .filter(|date| *date != written && is_expired(*date, today, ctx.retention_days))
            .collect();

        for date in expired {
            docs.remove::<DailyNutritionLog>(&log_id(date)).await?;
            debug!(owner = %docs.owner(), date = %date, "Pruned expired nutrition log");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, Store};
    use chrono::Duration;
    use fittrack_shared::daily_log::MealType;
    use std::sync::Arc;

    fn docs() -> OwnerStore {
        let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
        OwnerStore::new(store, "owner-1")
    }

    fn ctx() -> WriteContext {
        WriteContext {
            retention_days: 90,
            now: Utc::now(),
        }
    }

    fn chicken(grams: f64) -> LogFoodRequest {
        LogFoodRequest {
            food_id: "chicken-breast".to_string(),
            quantity_g: Some(grams),
            portion: None,
            portion_count: None,
            meal_type: MealType::Lunch,
            logged_at: None,
        }
    }

    #[tokio::test]
    async fn test_reading_missing_log_does_not_write() {
        let docs = docs();
        let today = Utc::now().date_naive();
        let log = NutritionService::get_log_for_date(&docs, today).await.unwrap();
        assert!(!log.has_entries());
        assert!(docs.load_all::<DailyNutritionLog>().await.unwrap().is_empty());

        let again = NutritionService::get_log_for_date(&docs, today).await.unwrap();
        assert_eq!(log, again);
    }

    #[tokio::test]
    async fn test_add_and_remove_food_keeps_totals() {
        let docs = docs();
        let ctx = ctx();
        let date = ctx.now.date_naive();

        let view = NutritionService::add_food(&docs, date, chicken(200.0), ctx).await.unwrap();
        assert_eq!(view.log.totals.nutrients.calories, 330.0);
        assert!(view.goals.is_none());

        let entry_id = view.log.meals.lunch[0].id;
        let view = NutritionService::remove_food(&docs, date, entry_id, ctx).await.unwrap();
        assert_eq!(view.log.totals.nutrients.calories, 0.0);
        assert_eq!(docs.load_all::<DailyNutritionLog>().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_food_is_rejected() {
        let docs = docs();
        let ctx = ctx();
        let mut req = chicken(100.0);
        req.food_id = "dragon-fruit-pie".to_string();
        let err = NutritionService::add_food(&docs, ctx.now.date_naive(), req, ctx)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_old_logs_are_pruned_but_not_the_written_one() {
        let docs = docs();
        let ctx = ctx();
        let today = ctx.now.date_naive();
        let old = today - Duration::days(120);
        let older = today - Duration::days(200);

        let mut stale = DailyNutritionLog::new(older);
        stale.add_water(Catalog::builtin(), 250.0, ctx.now).unwrap();
        docs.save(&stale).await.unwrap();

        // Backfilling an expired date keeps that log
        NutritionService::add_food(&docs, old, chicken(100.0), ctx).await.unwrap();
        let dates: Vec<NaiveDate> = docs
            .load_all::<DailyNutritionLog>()
            .await
            .unwrap()
            .into_iter()
            .map(|l| l.date)
            .collect();
        assert_eq!(dates, vec![old]);

        NutritionService::add_food(&docs, today, chicken(100.0), ctx).await.unwrap();
        let dates: Vec<NaiveDate> = docs
            .load_all::<DailyNutritionLog>()
            .await
            .unwrap()
            .into_iter()
            .map(|l| l.date)
            .collect();
        assert_eq!(dates, vec![today]);
    }

    #[tokio::test]
    async fn test_water_round_trip() {
        let docs = docs();
        let ctx = ctx();
        let date = ctx.now.date_naive();
        let req = LogWaterRequest {
            amount_ml: 500.0,
            logged_at: None,
        };
        let view = NutritionService::add_water(&docs, date, req, ctx).await.unwrap();
        assert_eq!(view.log.totals.water_ml, 500.0);

        let water_id = view.log.water[0].id;
        let view = NutritionService::remove_water(&docs, date, water_id, ctx).await.unwrap();
        assert_eq!(view.log.totals.water_ml, 0.0);

        let err = NutritionService::remove_water(&docs, date, water_id, ctx).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
