//! Field catalog ports and application service.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use pitchdesk_core::AppResult;
use pitchdesk_domain::{FieldDefinition, FieldId};

/// Field record returned by repository queries.
#[derive(Debug, Clone)]
pub struct FieldRecord {
    /// Unique field identifier.
    pub id: FieldId,
    /// Display name.
    pub name: String,
    /// Surface type label.
    pub field_type: String,
    /// Rental price per hour in the smallest currency unit.
    pub price_per_hour: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Repository port for field persistence.
#[async_trait]
pub trait FieldRepository: Send + Sync {
    /// Lists all fields ordered by name.
    async fn list_all(&self) -> AppResult<Vec<FieldRecord>>;

    /// Finds a field by its unique identifier.
    async fn find_by_id(&self, field_id: FieldId) -> AppResult<Option<FieldRecord>>;

    /// Creates a new field record.
    async fn create(&self, definition: &FieldDefinition) -> AppResult<FieldRecord>;

    /// Deletes a field. Missing ids surface as `AppError::NotFound`.
    async fn delete(&self, field_id: FieldId) -> AppResult<()>;

    /// Total number of fields.
    async fn count(&self) -> AppResult<i64>;
}

/// Application service for the field catalog.
#[derive(Clone)]
pub struct FieldService {
    field_repository: Arc<dyn FieldRepository>,
}

impl FieldService {
    /// Creates a new field service.
    #[must_use]
    pub fn new(field_repository: Arc<dyn FieldRepository>) -> Self {
        Self { field_repository }
    }

    /// Lists all fields ordered by name.
    pub async fn list_fields(&self) -> AppResult<Vec<FieldRecord>> {
        self.field_repository.list_all().await
    }

    /// Creates a field from a validated definition.
    pub async fn create_field(&self, definition: FieldDefinition) -> AppResult<FieldRecord> {
        self.field_repository.create(&definition).await
    }

    /// Deletes a field.
    pub async fn delete_field(&self, field_id: FieldId) -> AppResult<()> {
        self.field_repository.delete(field_id).await
    }
}
