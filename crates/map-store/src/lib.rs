//! Area Map Store
//!
//! Layered the same way as any repository backend:
//! - db: connection setup and schema
//! - forest_repo: areas/projects/items, implements `ForestSource`
//! - position_repo: area positions, implements `PositionStore`
//! - backend: the host command surface over both repositories

mod backend;
mod db;
mod error;
mod forest_repo;
mod position_repo;


pub use backend::MapBackend;
pub use db::{open_db, open_in_memory, SharedConnection};
pub use error::{StoreError, StoreResult};
pub use forest_repo::{ForestRepository, CLOSED_STATUSES};
pub use position_repo::PositionRepository;
