//! PostgreSQL-backed field repository.

use async_trait::async_trait;
use sqlx::PgPool;

use pitchdesk_application::{FieldRecord, FieldRepository};
use pitchdesk_core::{AppError, AppResult};
use pitchdesk_domain::{FieldDefinition, FieldId};

/// PostgreSQL implementation of the field repository port.
#[derive(Clone)]
pub struct PostgresFieldRepository {
    pool: PgPool,
}

impl PostgresFieldRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct FieldRow {
    id: uuid::Uuid,
    name: String,
    field_type: String,
    price_per_hour: i64,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<FieldRow> for FieldRecord {
    fn from(row: FieldRow) -> Self {
        Self {
            id: FieldId::from_uuid(row.id),
            name: row.name,
            field_type: row.field_type,
            price_per_hour: row.price_per_hour,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl FieldRepository for PostgresFieldRepository {
    async fn list_all(&self) -> AppResult<Vec<FieldRecord>> {
        let rows = sqlx::query_as::<_, FieldRow>(
            r#"
            SELECT id, name, field_type, price_per_hour, created_at
            FROM fields
            ORDER BY name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list fields: {error}")))?;

        Ok(rows.into_iter().map(FieldRecord::from).collect())
    }

    async fn find_by_id(&self, field_id: FieldId) -> AppResult<Option<FieldRecord>> {
        let row = sqlx::query_as::<_, FieldRow>(
            r#"
            SELECT id, name, field_type, price_per_hour, created_at
            FROM fields
            WHERE id = $1
            "#,
        )
        .bind(field_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find field: {error}")))?;

        Ok(row.map(FieldRecord::from))
    }

    async fn create(&self, definition: &FieldDefinition) -> AppResult<FieldRecord> {
        let row = sqlx::query_as::<_, FieldRow>(
            r#"
            INSERT INTO fields (name, field_type, price_per_hour)
            VALUES ($1, $2, $3)
            RETURNING id, name, field_type, price_per_hour, created_at
            "#,
        )
        .bind(definition.name.as_str())
        .bind(definition.field_type.as_str())
        .bind(definition.price_per_hour)
        .fetch_one(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to create field: {error}")))?;

        Ok(FieldRecord::from(row))
    }

    async fn delete(&self, field_id: FieldId) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM fields WHERE id = $1")
            .bind(field_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to delete field: {error}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("field not found".to_owned()));
        }

        Ok(())
    }

    async fn count(&self) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM fields")
            .fetch_one(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to count fields: {error}")))
    }
}
