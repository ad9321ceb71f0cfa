//! PostgreSQL document store
//!
//! One `entities` table with a JSONB body per (owner_key, kind, id).

use super::Store;
use crate::db;
use anyhow::Result;
use async_trait::async_trait;
use fittrack_shared::EntityKind;
use serde_json::Value;
use sqlx::PgPool;

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Store for PgStore {
    async fn get(&self, owner: &str, kind: EntityKind, id: &str) -> Result<Option<Value>> {
        let body = sqlx::query_scalar::<_, Value>(
            r#"
            SELECT body
            FROM entities
            WHERE owner_key = $1 AND kind = $2 AND id = $3
            "#,
        )
        .bind(owner)
        .bind(kind.as_str())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(body)
    }

    async fn list(&self, owner: &str, kind: EntityKind) -> Result<Vec<Value>> {
        let bodies = sqlx::query_scalar::<_, Value>(
            r#"
            SELECT body
            FROM entities
            WHERE owner_key = $1 AND kind = $2
            ORDER BY id
            "#,
        )
        .bind(owner)
        .bind(kind.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(bodies)
    }

    async fn put(&self, owner: &str, kind: EntityKind, id: &str, value: Value) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO entities (owner_key, kind, id, body)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (owner_key, kind, id)
            DO UPDATE SET body = EXCLUDED.body, updated_at = NOW()
            "#,
        )
        .bind(owner)
        .bind(kind.as_str())
        .bind(id)
        .bind(value)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, owner: &str, kind: EntityKind, id: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM entities
            WHERE owner_key = $1 AND kind = $2 AND id = $3
            "#,
        )
        .bind(owner)
        .bind(kind.as_str())
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn health_check(&self) -> Result<()> {
        db::health_check(&self.pool).await
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}
