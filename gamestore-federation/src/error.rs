use gamestore_catalog::FilterError;
use gamestore_db::{OperationError, SchemaError};
use gamestore_legacy::LegacyError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FederationError {
    #[error("Database error: {0}")]
    Db(#[from] OperationError),
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),
    #[error("Legacy store error: {0}")]
    Legacy(#[from] LegacyError),
    #[error(transparent)]
    Filter(#[from] FilterError),
    #[error("Entity not found: {entity_type} '{key}'")]
    NotFound { entity_type: String, key: String },
    #[error("A game with key '{0}' already exists")]
    DuplicateKey(String),
}

impl FederationError {
    pub(crate) fn not_found(entity_type: &str, key: impl ToString) -> Self {
        Self::NotFound {
            entity_type: entity_type.to_string(),
            key: key.to_string(),
        }
    }
}
