//! Tauri Backend Adapter
//!
//! Exposes the command wrappers through the map engine's source and store traits.

use async_trait::async_trait;
use map_engine::{
    ForestData, ForestSource, MapError, MapResult, NodeKind, PersistedPosition, PositionMap, PositionStore,
};

#[derive(Clone, Copy, Debug, Default)]
pub struct TauriBackend;

#[async_trait(?Send)]
impl ForestSource for TauriBackend {
    async fn fetch_forest(&self) -> MapResult<ForestData> {
        super::fetch_forest().await.map_err(MapError::Fetch)
    }

    async fn delete_record(&self, id: &str, kind: NodeKind) -> MapResult<()> {
        super::delete_record(id, kind).await.map_err(MapError::Delete)
    }
}

#[async_trait(?Send)]
impl PositionStore for TauriBackend {
    async fn load_positions(&self) -> MapResult<PositionMap> {
        super::load_area_positions().await.map_err(MapError::Fetch)
    }

    async fn save_position(&self, id: &str, x: f64, y: f64) -> MapResult<()> {
        super::save_area_position(id, x, y).await.map_err(MapError::Save)
    }

    async fn save_positions(&self, batch: &[PersistedPosition]) -> MapResult<()> {
        super::save_area_positions(batch).await.map_err(MapError::Save)
    }
}
