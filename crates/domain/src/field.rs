//! Field (bookable court) domain types.

use pitchdesk_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a field record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldId(Uuid);

impl FieldId {
    /// Creates a new random field identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a field identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for FieldId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for FieldId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Validated definition of a new field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDefinition {
    /// Display name, unique in practice but not enforced.
    pub name: NonEmptyString,
    /// Surface type label, e.g. "synthetic" or "vinyl".
    pub field_type: NonEmptyString,
    /// Rental price per hour in the smallest currency unit.
    pub price_per_hour: i64,
}

impl FieldDefinition {
    /// Creates a validated field definition.
    pub fn new(
        name: impl Into<String>,
        field_type: impl Into<String>,
        price_per_hour: i64,
    ) -> AppResult<Self> {
        if price_per_hour <= 0 {
            return Err(AppError::Validation(
                "price per hour must be positive".to_owned(),
            ));
        }

        Ok(Self {
            name: NonEmptyString::new(name)?,
            field_type: NonEmptyString::new(field_type)?,
            price_per_hour,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::FieldDefinition;

    #[test]
    fn valid_definition_is_accepted() {
        assert!(FieldDefinition::new("Field A", "synthetic", 150_000).is_ok());
    }

    #[test]
    fn non_positive_price_is_rejected() {
        assert!(FieldDefinition::new("Field A", "synthetic", 0).is_err());
        assert!(FieldDefinition::new("Field A", "synthetic", -5).is_err());
    }

    #[test]
    fn blank_name_is_rejected() {
        assert!(FieldDefinition::new("  ", "synthetic", 100).is_err());
    }
}
