use std::marker::PhantomData;

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::{
    EntityId, Result, StoreError,
    collection::{Collection, Stored},
};

/// PostgreSQL-backed record collection.
///
/// Records are stored as JSONB documents in a single `records` table,
/// partitioned by collection name. One `PgCollection` handle covers one
/// entity type.
#[derive(Clone)]
pub struct PgCollection<T> {
    pool: PgPool,
    _phantom: PhantomData<T>,
}

impl<T: Stored> PgCollection<T> {
    /// Creates a new collection handle on the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _phantom: PhantomData,
        }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn decode(doc: serde_json::Value) -> Result<T> {
        Ok(serde_json::from_value(doc)?)
    }
}

/// Runs the database migrations for the record and ledger tables.
pub async fn run_migrations(pool: &PgPool) -> std::result::Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}

#[async_trait]
impl<T: Stored> Collection<T> for PgCollection<T> {
    async fn get(&self, id: EntityId) -> Result<Option<T>> {
        let row = sqlx::query("SELECT doc FROM records WHERE collection = $1 AND id = $2")
            .bind(T::COLLECTION)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let doc: serde_json::Value = row.try_get("doc")?;
                Ok(Some(Self::decode(doc)?))
            }
            None => Ok(None),
        }
    }

    async fn insert(&self, record: T) -> Result<()> {
        let id = record.id();
        let doc = serde_json::to_value(&record)?;

        sqlx::query("INSERT INTO records (collection, id, doc) VALUES ($1, $2, $3)")
            .bind(T::COLLECTION)
            .bind(id.as_uuid())
            .bind(doc)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e
                    && matches!(db_err.kind(), sqlx::error::ErrorKind::UniqueViolation)
                {
                    return StoreError::DuplicateId {
                        collection: T::COLLECTION,
                        id,
                    };
                }
                StoreError::Database(e)
            })?;

        Ok(())
    }

    async fn replace(&self, record: T) -> Result<()> {
        let id = record.id();
        let doc = serde_json::to_value(&record)?;

        let result = sqlx::query(
            "UPDATE records SET doc = $3, updated_at = now() WHERE collection = $1 AND id = $2",
        )
        .bind(T::COLLECTION)
        .bind(id.as_uuid())
        .bind(doc)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound {
                collection: T::COLLECTION,
                id,
            });
        }

        Ok(())
    }

    async fn delete(&self, id: EntityId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM records WHERE collection = $1 AND id = $2")
            .bind(T::COLLECTION)
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn all(&self) -> Result<Vec<T>> {
        let rows = sqlx::query("SELECT doc FROM records WHERE collection = $1")
            .bind(T::COLLECTION)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter()
            .map(|row| {
                let doc: serde_json::Value = row.try_get("doc")?;
                Self::decode(doc)
            })
            .collect()
    }
}
