//! Map Engine Errors
//!
//! Error taxonomy shared by the engine and its collaborators.

use serde::{Deserialize, Serialize};

/// Common result type for map operations
pub type MapResult<T> = Result<T, MapError>;

/// Map-level errors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MapError {
    /// Forest or persisted positions could not be loaded
    Fetch(String),
    /// A position write failed
    Save(String),
    /// The delete collaborator rejected a delete
    Delete(String),
    /// Node levels do not form area -> project -> item
    InvalidTree(String),
    Config(String),
}

impl std::fmt::Display for MapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapError::Fetch(msg) => write!(f, "Fetch failed: {}", msg),
            MapError::Save(msg) => write!(f, "Save failed: {}", msg),
            MapError::Delete(msg) => write!(f, "Delete failed: {}", msg),
            MapError::InvalidTree(msg) => write!(f, "Invalid tree: {}", msg),
            MapError::Config(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for MapError {}
