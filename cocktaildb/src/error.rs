use thiserror::Error;

use crate::schema::RecordKind;

#[derive(Error, Debug)]
pub enum CocktailDbError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{kind} not found")]
    NotFound { kind: RecordKind, id: u64 },

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Failed to read document {path}: {message}")]
    StorageRead { path: String, message: String },

    #[error("Failed to write document {path}: {message}")]
    StorageWrite { path: String, message: String },

    #[error("Unknown collection '{0}'")]
    UnknownCollection(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CocktailDbError {
    /// True for the failures that come from the backing file rather than the request.
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            CocktailDbError::StorageRead { .. } | CocktailDbError::StorageWrite { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, CocktailDbError>;
