//! Persistence adapter
//!
//! Every entity is a JSON document keyed by (owner key, entity kind, id).
//! Backends only move documents; [`OwnerStore`] adds typed access for one
//! owner.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use anyhow::{Context, Result};
use async_trait::async_trait;
use fittrack_shared::{Entity, EntityKind};
use serde_json::Value;
use std::sync::Arc;

/// Document storage backend
#[async_trait]
pub trait Store: Send + Sync {
    async fn get(&self, owner: &str, kind: EntityKind, id: &str) -> Result<Option<Value>>;

    /// All documents of a kind, ordered by id
    async fn list(&self, owner: &str, kind: EntityKind) -> Result<Vec<Value>>;

    /// Insert or replace
    async fn put(&self, owner: &str, kind: EntityKind, id: &str, value: Value) -> Result<()>;

    /// Returns whether a document was removed
    async fn delete(&self, owner: &str, kind: EntityKind, id: &str) -> Result<bool>;

    async fn health_check(&self) -> Result<()>;

    fn backend_name(&self) -> &'static str;
}

/// Typed document access scoped to one owner
#[derive(Clone)]
pub struct OwnerStore {
    store: Arc<dyn Store>,
    owner: String,
}

impl OwnerStore {
    pub fn new(store: Arc<dyn Store>, owner: impl Into<String>) -> Self {
        Self {
            store,
            owner: owner.into(),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub async fn load<T: Entity>(&self, id: &str) -> Result<Option<T>> {
        match self.store.get(&self.owner, T::KIND, id).await? {
            Some(value) => {
                let entity = serde_json::from_value(value)
                    .with_context(|| format!("Malformed {} document '{}'", T::KIND, id))?;
                Ok(Some(entity))
            }
            None => Ok(None),
        }
    }

    pub async fn load_all<T: Entity>(&self) -> Result<Vec<T>> {
        self.store
            .list(&self.owner, T::KIND)
            .await?
            .into_iter()
            .map(|value| {
                serde_json::from_value(value).with_context(|| format!("Malformed {} document", T::KIND))
            })
            .collect()
    }

    pub async fn save<T: Entity>(&self, entity: &T) -> Result<()> {
        let id = entity.entity_id();
        let value = serde_json::to_value(entity)
            .with_context(|| format!("Failed to encode {} document '{}'", T::KIND, id))?;
        self.store.put(&self.owner, T::KIND, &id, value).await
    }

    pub async fn remove<T: Entity>(&self, id: &str) -> Result<bool> {
        self.store.delete(&self.owner, T::KIND, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use fittrack_shared::{WeightEntry, SINGLETON_ID};
    use fittrack_shared::nutrition_goals::NutritionGoals;
    use uuid::Uuid;

    fn owner_store(owner: &str) -> (Arc<dyn Store>, OwnerStore) {
        let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
        (store.clone(), OwnerStore::new(store, owner))
    }

    #[tokio::test]
    async fn test_typed_round_trip() {
        let (_, docs) = owner_store("owner-a");
        let goals = NutritionGoals {
            calories: 2000,
            protein_g: 125,
            carbs_g: 225,
            fat_g: 67,
            fiber_g: 28,
            water_ml: 2450,
        };
        docs.save(&goals).await.unwrap();
        let loaded: Option<NutritionGoals> = docs.load(SINGLETON_ID).await.unwrap();
        assert_eq!(loaded, Some(goals));
    }

    #[tokio::test]
    async fn test_owners_are_isolated() {
        let (store, alice) = owner_store("alice");
        let bob = OwnerStore::new(store, "bob");

        let entry = WeightEntry {
            id: Uuid::new_v4(),
            weight_kg: 70.0,
            recorded_at: Utc::now(),
        };
        alice.save(&entry).await.unwrap();

        assert_eq!(alice.load_all::<WeightEntry>().await.unwrap().len(), 1);
        assert!(bob.load_all::<WeightEntry>().await.unwrap().is_empty());
        assert!(!bob.remove::<WeightEntry>(&entry.id.to_string()).await.unwrap());
        assert!(alice.remove::<WeightEntry>(&entry.id.to_string()).await.unwrap());
    }

    #[tokio::test]
    async fn test_malformed_document_is_reported() {
        let (store, docs) = owner_store("owner-c");
        store
            .put("owner-c", EntityKind::NutritionGoals, SINGLETON_ID, serde_json::json!({"calories": "lots"}))
            .await
            .unwrap();

        let err = docs.load::<NutritionGoals>(SINGLETON_ID).await.unwrap_err();
        assert!(err.to_string().contains("Malformed nutrition_goals"));
    }
}
