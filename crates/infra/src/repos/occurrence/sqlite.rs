use super::IOccurrenceRepo;
use crate::repos::shared::DeleteResult;
use chrono::{DateTime, TimeZone, Utc};
use nagging_bot_domain::{Entity, Occurrence, OccurrenceStatus, ID};
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};

pub struct SqliteOccurrenceRepo {
    pool: SqlitePool,
}

impl SqliteOccurrenceRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct OccurrenceRaw {
    id: i64,
    reminder_id: i64,
    fire_at_ms: i64,
    status: i64,
}

impl TryFrom<OccurrenceRaw> for Occurrence {
    type Error = anyhow::Error;

    fn try_from(raw: OccurrenceRaw) -> Result<Self, Self::Error> {
        let fire_at = Utc
            .timestamp_millis_opt(raw.fire_at_ms)
            .single()
            .ok_or_else(|| anyhow::anyhow!("Occurrence {} has an invalid fire time", raw.id))?;
        Ok(Self {
            id: raw.id,
            reminder_id: raw.reminder_id,
            fire_at,
            status: OccurrenceStatus::try_from(raw.status)?,
        })
    }
}

fn into_occurrences(raws: Vec<OccurrenceRaw>) -> anyhow::Result<Vec<Occurrence>> {
    raws.into_iter().map(Occurrence::try_from).collect()
}

#[async_trait::async_trait]
impl IOccurrenceRepo for SqliteOccurrenceRepo {
    async fn get(&self, occurrence_id: ID) -> anyhow::Result<Option<Occurrence>> {
        let occurrence = sqlx::query_as::<_, OccurrenceRaw>(
            r#"
            SELECT id, reminder_id, fire_at_ms, status FROM occurrences
            WHERE id = ?
            "#,
        )
        .bind(occurrence_id)
        .fetch_optional(&self.pool)
        .await?;
        occurrence.map(Occurrence::try_from).transpose()
    }

    async fn list_by_reminder(&self, reminder_id: ID) -> anyhow::Result<Vec<Occurrence>> {
        let occurrences = sqlx::query_as::<_, OccurrenceRaw>(
            r#"
            SELECT id, reminder_id, fire_at_ms, status FROM occurrences
            WHERE reminder_id = ?
            ORDER BY fire_at_ms, id
            "#,
        )
        .bind(reminder_id)
        .fetch_all(&self.pool)
        .await?;
        into_occurrences(occurrences)
    }

    async fn list_pending_in_range(
        &self,
        start: Option<DateTime<Utc>>,
        end: DateTime<Utc>,
    ) -> anyhow::Result<Vec<Occurrence>> {
        let start_ms = start.map(|s| s.timestamp_millis()).unwrap_or(i64::MIN);
        let occurrences = sqlx::query_as::<_, OccurrenceRaw>(
            r#"
            SELECT id, reminder_id, fire_at_ms, status FROM occurrences
            WHERE status = ?
            AND fire_at_ms >= ?
            AND fire_at_ms <= ?
            ORDER BY fire_at_ms, id
            "#,
        )
        .bind(OccurrenceStatus::Created.code())
        .bind(start_ms)
        .bind(end.timestamp_millis())
        .fetch_all(&self.pool)
        .await?;
        into_occurrences(occurrences)
    }

    async fn create(&self, occurrence: &Occurrence) -> anyhow::Result<Occurrence> {
        if occurrence.is_persisted() {
            sqlx::query(
                r#"
                INSERT INTO occurrences(id, reminder_id, fire_at_ms, status)
                VALUES(?, ?, ?, ?)
                ON CONFLICT(id) DO UPDATE SET
                    reminder_id = excluded.reminder_id,
                    fire_at_ms = excluded.fire_at_ms,
                    status = excluded.status
                "#,
            )
            .bind(occurrence.id)
            .bind(occurrence.reminder_id)
            .bind(occurrence.fire_at.timestamp_millis())
            .bind(occurrence.status.code())
            .execute(&self.pool)
            .await?;
            return Ok(occurrence.clone());
        }

        let id = sqlx::query(
            r#"
            INSERT INTO occurrences(reminder_id, fire_at_ms, status)
            VALUES(?, ?, ?)
            "#,
        )
        .bind(occurrence.reminder_id)
        .bind(occurrence.fire_at.timestamp_millis())
        .bind(occurrence.status.code())
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        Ok(Occurrence {
            id,
            ..occurrence.clone()
        })
    }

    async fn update_status(
        &self,
        occurrence_id: ID,
        status: OccurrenceStatus,
    ) -> anyhow::Result<bool> {
        let predecessors = OccurrenceStatus::predecessors(status);
        if predecessors.is_empty() {
            return Ok(false);
        }

        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE occurrences SET status = ");
        query
            .push_bind(status.code())
            .push(" WHERE id = ")
            .push_bind(occurrence_id)
            .push(" AND status IN (");
        let mut separated = query.separated(", ");
        for predecessor in &predecessors {
            separated.push_bind(predecessor.code());
        }
        separated.push_unseparated(")");

        let res = query.build().execute(&self.pool).await?;
        Ok(res.rows_affected() > 0)
    }

    async fn delete_by_reminder(&self, reminder_id: ID) -> anyhow::Result<DeleteResult> {
        let res = sqlx::query(
            r#"
            DELETE FROM occurrences
            WHERE reminder_id = ?
            "#,
        )
        .bind(reminder_id)
        .execute(&self.pool)
        .await?;
        Ok(DeleteResult {
            deleted_count: res.rows_affected() as i64,
        })
    }
}
