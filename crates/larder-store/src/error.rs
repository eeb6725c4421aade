//! Error types for the store crate.

use thiserror::Error;

/// Result type alias using the store error type.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in repository operations.
///
/// Read-time failures are deliberately absent: a collection that cannot be
/// read or parsed is treated as empty and logged, never surfaced (see
/// [`DocumentStore::load`](crate::DocumentStore::load)).
#[derive(Debug, Error)]
pub enum StoreError {
    /// A required input field was missing or empty.
    #[error("missing required field '{field}' for {entity}")]
    MissingField {
        entity: &'static str,
        field: &'static str,
    },

    /// The target of a delete or lookup does not exist for this owner.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: u64 },

    /// The collection could not be written at save time.
    #[error("failed to write collection '{collection}': {source}")]
    WriteFailed {
        collection: String,
        source: std::io::Error,
    },

    /// The collection could not be serialized.
    #[error("failed to serialize collection: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl StoreError {
    /// Create a missing-field validation error.
    pub fn missing_field(entity: &'static str, field: &'static str) -> Self {
        Self::MissingField { entity, field }
    }

    /// Create a not-found error.
    pub fn not_found(entity: &'static str, id: u64) -> Self {
        Self::NotFound { entity, id }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_context() {
        let err = StoreError::missing_field("recipe", "name");
        assert!(err.to_string().contains("recipe"));
        assert!(err.to_string().contains("name"));

        let err = StoreError::not_found("knowledge item", 7);
        assert!(err.to_string().contains("7"));
    }
}
