use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pitchdesk_application::FieldRecord;
use pitchdesk_core::AppResult;
use pitchdesk_domain::FieldDefinition;

/// Payload for creating a field.
#[derive(Debug, Deserialize)]
pub struct CreateFieldRequest {
    pub name: String,
    pub field_type: String,
    pub price_per_hour: i64,
}

impl CreateFieldRequest {
    /// Validates the payload into a field definition.
    pub fn into_definition(self) -> AppResult<FieldDefinition> {
        FieldDefinition::new(self.name, self.field_type, self.price_per_hour)
    }
}

/// API representation of a field.
#[derive(Debug, Serialize)]
pub struct FieldResponse {
    pub id: Uuid,
    pub name: String,
    pub field_type: String,
    pub price_per_hour: i64,
    pub created_at: DateTime<Utc>,
}

impl From<FieldRecord> for FieldResponse {
    fn from(record: FieldRecord) -> Self {
        Self {
            id: record.id.as_uuid(),
            name: record.name,
            field_type: record.field_type,
            price_per_hour: record.price_per_hour,
            created_at: record.created_at,
        }
    }
}
