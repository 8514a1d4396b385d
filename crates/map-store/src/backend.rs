//! Command Backend
//!
//! Everything a host needs to answer the frontend's commands, over one shared
//! connection. Errors are flattened to strings, the form the frontend expects.
//! Futures here are `Send`, so async IPC handlers can await them directly.

use map_engine::wire::{
    DeleteArgs, SavePositionArgs, SavePositionsArgs, DELETE_RECORD, FETCH_FOREST, LOAD_AREA_POSITIONS,
    LOAD_MAP_CONFIG, SAVE_AREA_POSITION, SAVE_AREA_POSITIONS,
};
use map_engine::{ForestData, MapConfig, PersistedPosition};
use serde_json::Value;

use crate::db::SharedConnection;
use crate::forest_repo::ForestRepository;
use crate::position_repo::PositionRepository;

pub struct MapBackend {
    forest: ForestRepository,
    positions: PositionRepository,
    config_json: Option<String>,
}

impl MapBackend {
    pub fn new(conn: SharedConnection) -> Self {
        Self {
            forest: ForestRepository::new(conn.clone()),
            positions: PositionRepository::new(conn),
            config_json: None,
        }
    }

    /// Serve this JSON from `load_map_config`. Rejected up front if it does not
    /// parse, leaving the previous config in place.
    pub fn set_config_json(&mut self, json: String) -> Result<(), String> {
        MapConfig::from_json(&json).map_err(|e| e.to_string())?;
        self.config_json = Some(json);
        Ok(())
    }

    pub async fn fetch_forest(&self) -> Result<ForestData, String> {
        let data = self.forest.load_forest().await.map_err(|e| e.to_string())?;
        tracing::info!(records = data.record_count(), "forest fetched");
        Ok(data)
    }

    pub async fn delete_record(&self, args: DeleteArgs) -> Result<(), String> {
        tracing::info!(id = %args.id, kind = args.kind.as_str(), "deleting record");
        self.forest.delete(&args.id, args.kind).await.map_err(|e| e.to_string())
    }

    pub async fn load_area_positions(&self) -> Result<Vec<PersistedPosition>, String> {
        let positions = self.positions.load_all().await.map_err(|e| e.to_string())?;
        Ok(positions
            .into_iter()
            .map(|(area_id, p)| PersistedPosition { area_id, x: p.x, y: p.y })
            .collect())
    }

    pub async fn save_area_position(&self, args: SavePositionArgs) -> Result<(), String> {
        tracing::debug!(id = %args.area_id, x = args.x, y = args.y, "saving area position");
        self.positions.upsert(&args.area_id, args.x, args.y).await.map_err(|e| e.to_string())
    }

    pub async fn save_area_positions(&self, args: SavePositionsArgs) -> Result<(), String> {
        tracing::debug!(count = args.positions.len(), "saving area positions");
        self.positions.upsert_batch(&args.positions).await.map_err(|e| e.to_string())
    }

    pub fn load_map_config(&self) -> Option<String> {
        self.config_json.clone()
    }

    /// Route a command by name with its JSON arguments, as an IPC bridge would
    pub async fn handle(&self, command: &str, args: Value) -> Result<Value, String> {
        match command {
            FETCH_FOREST => to_json(self.fetch_forest().await?),
            DELETE_RECORD => to_json(self.delete_record(from_json(args)?).await?),
            LOAD_AREA_POSITIONS => to_json(self.load_area_positions().await?),
            SAVE_AREA_POSITION => to_json(self.save_area_position(from_json(args)?).await?),
            SAVE_AREA_POSITIONS => to_json(self.save_area_positions(from_json(args)?).await?),
            LOAD_MAP_CONFIG => to_json(self.load_map_config()),
            other => Err(format!("unknown command: {}", other)),
        }
    }
}

fn from_json<T: serde::de::DeserializeOwned>(args: Value) -> Result<T, String> {
    serde_json::from_value(args).map_err(|e| format!("bad arguments: {}", e))
}

fn to_json<T: serde::Serialize>(value: T) -> Result<Value, String> {
    serde_json::to_value(value).map_err(|e| e.to_string())
}
