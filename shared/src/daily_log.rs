//! Daily nutrition log
//!
//! One log per owner per calendar date. Totals are recomputed from the full
//! entry list after every mutation.

use crate::catalog::Catalog;
use crate::errors::{CoreError, CoreResult};
use crate::models::{Entity, EntityKind};
use crate::nutrition::{calculate_daily_totals, ensure_quantity, NutritionFacts};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Storage id format for a log date
pub const LOG_DATE_FORMAT: &str = "%Y-%m-%d";

/// Meal bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snacks,
}

impl FromStr for MealType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "breakfast" => Ok(MealType::Breakfast),
            "lunch" => Ok(MealType::Lunch),
            "dinner" => Ok(MealType::Dinner),
            "snacks" | "snack" => Ok(MealType::Snacks),
            _ => Err(format!("Unknown meal type: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealEntry {
    pub id: Uuid,
    pub food_id: String,
    pub quantity_g: f64,
    pub meal_type: MealType,
    pub logged_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterEntry {
    pub id: Uuid,
    pub amount_ml: f64,
    pub logged_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Meals {
    pub breakfast: Vec<MealEntry>,
    pub lunch: Vec<MealEntry>,
    pub dinner: Vec<MealEntry>,
    pub snacks: Vec<MealEntry>,
}

impl Meals {
    fn bucket_mut(&mut self, meal_type: MealType) -> &mut Vec<MealEntry> {
        match meal_type {
            MealType::Breakfast => &mut self.breakfast,
            MealType::Lunch => &mut self.lunch,
            MealType::Dinner => &mut self.dinner,
            MealType::Snacks => &mut self.snacks,
        }
    }

    /// All entries in breakfast, lunch, dinner, snacks order
    pub fn iter(&self) -> impl Iterator<Item = &MealEntry> {
        self.breakfast
            .iter()
            .chain(self.lunch.iter())
            .chain(self.dinner.iter())
            .chain(self.snacks.iter())
    }

    pub fn len(&self) -> usize {
        self.breakfast.len() + self.lunch.len() + self.dinner.len() + self.snacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Food totals plus water for one day
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyTotals {
    #[serde(flatten)]
    pub nutrients: NutritionFacts,
    pub water_ml: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyNutritionLog {
    pub date: NaiveDate,
    pub meals: Meals,
    pub water: Vec<WaterEntry>,
    pub totals: DailyTotals,
}

impl Entity for DailyNutritionLog {
    const KIND: EntityKind = EntityKind::NutritionLog;

    fn entity_id(&self) -> String {
        log_id(self.date)
    }
}

/// Storage id of the log for `date`
pub fn log_id(date: NaiveDate) -> String {
    date.format(LOG_DATE_FORMAT).to_string()
}

impl DailyNutritionLog {
    /// Empty log for a date
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            meals: Meals::default(),
            water: Vec::new(),
            totals: DailyTotals::default(),
        }
    }

    pub fn has_entries(&self) -> bool {
        !self.meals.is_empty() || !self.water.is_empty()
    }

    /// Add a food entry. The food id must resolve in the catalog.
    pub fn add_food(
        &mut self,
        catalog: &Catalog,
        food_id: &str,
        quantity_g: f64,
        meal_type: MealType,
        logged_at: DateTime<Utc>,
    ) -> CoreResult<MealEntry> {
        if catalog.food(food_id).is_none() {
            return Err(CoreError::UnknownReference(format!("food '{}'", food_id)));
        }
        ensure_quantity(quantity_g)?;

        let entry = MealEntry {
            id: Uuid::new_v4(),
            food_id: food_id.to_string(),
            quantity_g,
            meal_type,
            logged_at,
        };
        self.meals.bucket_mut(meal_type).push(entry.clone());
        self.recompute_totals(catalog);
        Ok(entry)
    }

    /// Remove a food entry from whichever meal holds it
    pub fn remove_food(&mut self, catalog: &Catalog, entry_id: Uuid) -> CoreResult<MealEntry> {
        for meal_type in [MealType::Breakfast, MealType::Lunch, MealType::Dinner, MealType::Snacks] {
            let bucket = self.meals.bucket_mut(meal_type);
            if let Some(pos) = bucket.iter().position(|e| e.id == entry_id) {
                let removed = bucket.remove(pos);
                self.recompute_totals(catalog);
                return Ok(removed);
            }
        }
        Err(CoreError::NotFound(format!("food entry {}", entry_id)))
    }

    pub fn add_water(
        &mut self,
        catalog: &Catalog,
        amount_ml: f64,
        logged_at: DateTime<Utc>,
    ) -> CoreResult<WaterEntry> {
        if !amount_ml.is_finite() || amount_ml <= 0.0 {
            return Err(CoreError::invalid_input("amount_ml", "must be greater than zero"));
        }

        let entry = WaterEntry {
            id: Uuid::new_v4(),
            amount_ml,
            logged_at,
        };
        self.water.push(entry.clone());
        self.recompute_totals(catalog);
        Ok(entry)
    }

    pub fn remove_water(&mut self, catalog: &Catalog, entry_id: Uuid) -> CoreResult<WaterEntry> {
        let pos = self
            .water
            .iter()
            .position(|e| e.id == entry_id)
            .ok_or_else(|| CoreError::NotFound(format!("water entry {}", entry_id)))?;
        let removed = self.water.remove(pos);
        self.recompute_totals(catalog);
        Ok(removed)
    }

    /// Rebuild totals from every entry
    pub fn recompute_totals(&mut self, catalog: &Catalog) {
        self.totals = DailyTotals {
            nutrients: calculate_daily_totals(self.meals.iter(), catalog),
            water_ml: self.water.iter().map(|w| w.amount_ml).sum(),
        };
    }
}

/// Whether a log dated `date` falls outside the retention window ending `today`
pub fn is_expired(date: NaiveDate, today: NaiveDate, retention_days: u32) -> bool {
    (today - date).num_days() > i64::from(retention_days)
}
