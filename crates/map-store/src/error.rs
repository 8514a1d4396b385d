//! Store Errors

use map_engine::MapError;
use serde::{Deserialize, Serialize};

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StoreError {
    NotFound(String),
    InvalidInput(String),
    Internal(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::NotFound(msg) => write!(f, "Not found: {}", msg),
            StoreError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            StoreError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError::Internal(e.to_string())
    }
}

impl StoreError {
    pub(crate) fn into_fetch(self) -> MapError {
        MapError::Fetch(self.to_string())
    }

    pub(crate) fn into_save(self) -> MapError {
        MapError::Save(self.to_string())
    }

    pub(crate) fn into_delete(self) -> MapError {
        MapError::Delete(self.to_string())
    }
}
