use async_trait::async_trait;
use common::Money;
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use crate::{EntityId, EventKind, HistoryEvent, Ledger, LedgerQuery, Result};

/// PostgreSQL-backed ledger implementation.
///
/// Insertion order comes from a `BIGSERIAL` sequence column, so tiebreak
/// ordering survives restarts.
#[derive(Clone)]
pub struct PgLedger {
    pool: PgPool,
}

impl PgLedger {
    /// Creates a new PostgreSQL ledger.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn row_to_event(row: PgRow) -> Result<HistoryEvent> {
        let kind: String = row.try_get("kind")?;
        let kind: EventKind = serde_json::from_value(serde_json::Value::String(kind))?;

        let metadata_json: serde_json::Value = row.try_get("metadata")?;
        let metadata = serde_json::from_value(metadata_json)?;

        Ok(HistoryEvent {
            id: EntityId::from_uuid(row.try_get::<Uuid, _>("id")?),
            animal_id: row
                .try_get::<Option<Uuid>, _>("animal_id")?
                .map(EntityId::from_uuid),
            kind,
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            date: row.try_get("date")?,
            cost: row
                .try_get::<Option<i64>, _>("cost_cents")?
                .map(Money::from_cents),
            metadata,
            seq: row.try_get::<i64, _>("seq")? as u64,
        })
    }
}

#[async_trait]
impl Ledger for PgLedger {
    async fn append(&self, mut event: HistoryEvent) -> Result<HistoryEvent> {
        let metadata_json = serde_json::to_value(&event.metadata)?;

        let row = sqlx::query(
            r#"
            INSERT INTO ledger_events (id, animal_id, kind, title, description, date, cost_cents, metadata)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING seq
            "#,
        )
        .bind(event.id.as_uuid())
        .bind(event.animal_id.map(|id| id.as_uuid()))
        .bind(event.kind.as_str())
        .bind(&event.title)
        .bind(&event.description)
        .bind(event.date)
        .bind(event.cost.map(|c| c.cents()))
        .bind(metadata_json)
        .fetch_one(&self.pool)
        .await?;

        event.seq = row.try_get::<i64, _>("seq")? as u64;
        metrics::counter!("ledger_entries_appended").increment(1);

        Ok(event)
    }

    async fn list(&self, query: LedgerQuery) -> Result<Vec<HistoryEvent>> {
        let mut sql = String::from(
            "SELECT seq, id, animal_id, kind, title, description, date, cost_cents, metadata \
             FROM ledger_events WHERE 1=1",
        );
        let mut param_count = 0;

        if query.animal_id.is_some() {
            param_count += 1;
            sql.push_str(&format!(" AND animal_id = ${param_count}"));
        }
        if query.kind.is_some() {
            param_count += 1;
            sql.push_str(&format!(" AND kind = ${param_count}"));
        }
        if query.from.is_some() {
            param_count += 1;
            sql.push_str(&format!(" AND date >= ${param_count}"));
        }
        if query.to.is_some() {
            param_count += 1;
            sql.push_str(&format!(" AND date <= ${param_count}"));
        }

        sql.push_str(" ORDER BY date DESC, seq ASC");

        if query.limit.is_some() {
            param_count += 1;
            sql.push_str(&format!(" LIMIT ${param_count}"));
        }

        let mut q = sqlx::query(&sql);
        if let Some(id) = query.animal_id {
            q = q.bind(id.as_uuid());
        }
        if let Some(kind) = query.kind {
            q = q.bind(kind.as_str());
        }
        if let Some(from) = query.from {
            q = q.bind(from);
        }
        if let Some(to) = query.to {
            q = q.bind(to);
        }
        if let Some(limit) = query.limit {
            q = q.bind(limit as i64);
        }

        let rows = q.fetch_all(&self.pool).await?;
        rows.into_iter().map(Self::row_to_event).collect()
    }

    async fn remove_for_animal(&self, animal_id: EntityId) -> Result<usize> {
        let result = sqlx::query("DELETE FROM ledger_events WHERE animal_id = $1")
            .bind(animal_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() as usize)
    }
}
