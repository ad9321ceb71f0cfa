//! In-process document store for development and tests

use super::Store;
use anyhow::Result;
use async_trait::async_trait;
use fittrack_shared::EntityKind;
use serde_json::Value;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

type Key = (String, EntityKind, String);

#[derive(Default)]
pub struct MemoryStore {
    documents: RwLock<BTreeMap<Key, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(owner: &str, kind: EntityKind, id: &str) -> Key {
        (owner.to_string(), kind, id.to_string())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn get(&self, owner: &str, kind: EntityKind, id: &str) -> Result<Option<Value>> {
        let documents = self.documents.read().await;
        Ok(documents.get(&Self::key(owner, kind, id)).cloned())
    }

    async fn list(&self, owner: &str, kind: EntityKind) -> Result<Vec<Value>> {
        let documents = self.documents.read().await;
        let start = Self::key(owner, kind, "");
        Ok(documents
            .range(start..)
            .take_while(|((o, k, _), _)| o == owner && *k == kind)
            .map(|(_, value)| value.clone())
            .collect())
    }

    async fn put(&self, owner: &str, kind: EntityKind, id: &str, value: Value) -> Result<()> {
        let mut documents = self.documents.write().await;
        documents.insert(Self::key(owner, kind, id), value);
        Ok(())
    }

    async fn delete(&self, owner: &str, kind: EntityKind, id: &str) -> Result<bool> {
        let mut documents = self.documents.write().await;
        Ok(documents.remove(&Self::key(owner, kind, id)).is_some())
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_put_get_delete() {
        let store = MemoryStore::new();
        store
            .put("o", EntityKind::Profile, "current", json!({"a": 1}))
            .await
            .unwrap();
        assert_eq!(
            store.get("o", EntityKind::Profile, "current").await.unwrap(),
            Some(json!({"a": 1}))
        );
        assert!(store.delete("o", EntityKind::Profile, "current").await.unwrap());
        assert!(!store.delete("o", EntityKind::Profile, "current").await.unwrap());
        assert_eq!(store.get("o", EntityKind::Profile, "current").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_list_is_scoped_and_ordered() {
        let store = MemoryStore::new();
        store.put("o", EntityKind::NutritionLog, "2024-01-02", json!(2)).await.unwrap();
        store.put("o", EntityKind::NutritionLog, "2024-01-01", json!(1)).await.unwrap();
        store.put("o", EntityKind::Weight, "w", json!("other kind")).await.unwrap();
        store.put("p", EntityKind::NutritionLog, "2024-01-01", json!("other owner")).await.unwrap();

        let logs = store.list("o", EntityKind::NutritionLog).await.unwrap();
        assert_eq!(logs, vec![json!(1), json!(2)]);
    }

    #[tokio::test]
    async fn test_put_replaces() {
        let store = MemoryStore::new();
        store.put("o", EntityKind::Profile, "current", json!(1)).await.unwrap();
        store.put("o", EntityKind::Profile, "current", json!(2)).await.unwrap();
        assert_eq!(store.list("o", EntityKind::Profile).await.unwrap(), vec![json!(2)]);
    }
}
