//! Derived aggregates over stored logs and sessions
//!
//! Everything here is a pure fold; callers load the inputs and decide the
//! window.

use crate::daily_log::{DailyNutritionLog, DailyTotals};
use crate::models::WeightEntry;
use crate::nutrition::{round1, NutritionFacts};
use crate::nutrition_goals::NutritionGoals;
use crate::workout_session::WorkoutSession;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Fraction of the calorie goal counted as "on target", either side
pub const CALORIE_TARGET_TOLERANCE: f64 = 0.10;

// ============================================================================
// Streaks
// ============================================================================

/// Consecutive active days ending today, or yesterday if today has no
/// activity yet
pub fn current_streak<I>(dates: I, today: NaiveDate) -> u32
where
    I: IntoIterator<Item = NaiveDate>,
{
    let days: BTreeSet<NaiveDate> = dates.into_iter().collect();

    let mut cursor = if days.contains(&today) {
        today
    } else {
        match today.pred_opt() {
            Some(yesterday) if days.contains(&yesterday) => yesterday,
            _ => return 0,
        }
    };

    let mut streak = 0;
    while days.contains(&cursor) {
        streak += 1;
        cursor = match cursor.pred_opt() {
            Some(previous) => previous,
            None => break,
        };
    }
    streak
}

// ============================================================================
// Workouts
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseFrequency {
    pub exercise_id: String,
    pub name: String,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutStats {
    pub window_days: u32,
    pub session_count: u32,
    pub total_duration_minutes: u32,
    pub total_calories: f64,
    pub average_duration_minutes: f64,
    pub total_volume: f64,
    /// Most performed first; ties keep the order first seen
    pub top_exercises: Vec<ExerciseFrequency>,
    pub current_streak: u32,
}

/// Stats over completed sessions that started within the trailing window
///
/// Sessions without a completed set are ignored, as they are for
/// achievements.
pub fn get_workout_stats(sessions: &[WorkoutSession], window_days: u32, now: DateTime<Utc>) -> WorkoutStats {
    let since = now - Duration::days(i64::from(window_days));

    let mut in_window: Vec<&WorkoutSession> = sessions
        .iter()
        .filter(|s| s.has_completed_work() && s.started_at >= since && s.started_at <= now)
        .collect();
    in_window.sort_by_key(|s| s.started_at);

    let mut frequencies: Vec<ExerciseFrequency> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for session in &in_window {
        for exercise in &session.exercises {
            match index.get(exercise.exercise_id.as_str()) {
                Some(&i) => frequencies[i].count += 1,
                None => {
                    index.insert(&exercise.exercise_id, frequencies.len());
                    frequencies.push(ExerciseFrequency {
                        exercise_id: exercise.exercise_id.clone(),
                        name: exercise.exercise_name.clone(),
                        count: 1,
                    });
                }
            }
        }
    }
    // sort_by is stable, so equal counts stay in first-seen order
    frequencies.sort_by(|a, b| b.count.cmp(&a.count));

    let session_count = in_window.len() as u32;
    let total_duration_minutes: u32 = in_window.iter().map(|s| s.total_duration_minutes).sum();
    let average_duration_minutes = if session_count > 0 {
        round1(f64::from(total_duration_minutes) / f64::from(session_count))
    } else {
        0.0
    };

    WorkoutStats {
        window_days,
        session_count,
        total_duration_minutes,
        total_calories: in_window.iter().map(|s| s.total_calories).sum(),
        average_duration_minutes,
        total_volume: in_window.iter().map(|s| s.total_volume()).sum(),
        top_exercises: frequencies,
        current_streak: current_streak(
            sessions
                .iter()
                .filter(|s| s.has_completed_work())
                .map(|s| s.started_at.date_naive()),
            now.date_naive(),
        ),
    }
}

// ============================================================================
// Nutrition
// ============================================================================

/// Share of each daily target reached, in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyProgress {
    pub calories_pct: f64,
    pub protein_pct: f64,
    pub carbs_pct: f64,
    pub fat_pct: f64,
    pub fiber_pct: f64,
    pub water_pct: f64,
}

fn percent(value: f64, target: i32) -> f64 {
    if target <= 0 {
        return 0.0;
    }
    round1(value / f64::from(target) * 100.0)
}

pub fn daily_progress(totals: &DailyTotals, goals: &NutritionGoals) -> DailyProgress {
    let n = &totals.nutrients;
    DailyProgress {
        calories_pct: percent(n.calories, goals.calories),
        protein_pct: percent(n.protein, goals.protein_g),
        carbs_pct: percent(n.carbs, goals.carbs_g),
        fat_pct: percent(n.fat, goals.fat_g),
        fiber_pct: percent(n.fiber, goals.fiber_g),
        water_pct: percent(totals.water_ml, goals.water_ml),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionSummary {
    pub window_days: u32,
    pub days_logged: u32,
    /// Mean over logged days only
    pub average: NutritionFacts,
    pub average_water_ml: f64,
    pub days_on_target: u32,
    pub logging_streak: u32,
}

/// Summary of the logs dated within `window_days` days ending `today`
pub fn nutrition_summary(
    logs: &[DailyNutritionLog],
    goals: Option<&NutritionGoals>,
    window_days: u32,
    today: NaiveDate,
) -> NutritionSummary {
    let first_day = today - Duration::days(i64::from(window_days.max(1)) - 1);
    let logged: Vec<&DailyNutritionLog> = logs
        .iter()
        .filter(|l| l.has_entries() && l.date >= first_day && l.date <= today)
        .collect();

    let days_logged = logged.len() as u32;
    let (average, average_water_ml) = if days_logged > 0 {
        let count = f64::from(days_logged);
        let sum: NutritionFacts = logged.iter().map(|l| l.totals.nutrients).sum();
        let water: f64 = logged.iter().map(|l| l.totals.water_ml).sum();
        let mean = NutritionFacts {
            calories: sum.calories / count,
            protein: sum.protein / count,
            carbs: sum.carbs / count,
            fat: sum.fat / count,
            fiber: sum.fiber / count,
            sugar: sum.sugar / count,
        };
        (mean.rounded(), (water / count).round())
    } else {
        (NutritionFacts::ZERO, 0.0)
    };

    let days_on_target = match goals {
        Some(goals) if goals.calories > 0 => {
            let target = f64::from(goals.calories);
            logged
                .iter()
                .filter(|l| (l.totals.nutrients.calories - target).abs() <= target * CALORIE_TARGET_TOLERANCE)
                .count() as u32
        }
        _ => 0,
    };

    NutritionSummary {
        window_days,
        days_logged,
        average,
        average_water_ml,
        days_on_target,
        logging_streak: current_streak(
            logs.iter().filter(|l| l.has_entries()).map(|l| l.date),
            today,
        ),
    }
}

// ============================================================================
// Body weight
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightTrend {
    pub window_days: u32,
    pub entries: u32,
    pub latest_kg: Option<f64>,
    pub earliest_kg: Option<f64>,
    /// latest - earliest within the window
    pub change_kg: Option<f64>,
    pub average_kg: Option<f64>,
}

pub fn weight_trend(entries: &[WeightEntry], window_days: u32, now: DateTime<Utc>) -> WeightTrend {
    let since = now - Duration::days(i64::from(window_days));
    let mut in_window: Vec<&WeightEntry> = entries
        .iter()
        .filter(|e| e.recorded_at >= since && e.recorded_at <= now)
        .collect();
    in_window.sort_by_key(|e| e.recorded_at);

    let latest_kg = in_window.last().map(|e| e.weight_kg);
    let earliest_kg = in_window.first().map(|e| e.weight_kg);
    let average_kg = if in_window.is_empty() {
        None
    } else {
        let sum: f64 = in_window.iter().map(|e| e.weight_kg).sum();
        Some(round1(sum / in_window.len() as f64))
    };

    WeightTrend {
        window_days,
        entries: in_window.len() as u32,
        latest_kg,
        earliest_kg,
        change_kg: latest_kg.zip(earliest_kg).map(|(l, e)| round1(l - e)),
        average_kg,
    }
}
