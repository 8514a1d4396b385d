//! Host Commands
//!
//! Names and argument payloads of the commands the frontend invokes on its
//! host. Both sides serialize through these types, so the shapes cannot drift.

use crate::persistence::PersistedPosition;
use crate::tree::NodeKind;
use serde::{Deserialize, Serialize};

pub const FETCH_FOREST: &str = "fetch_forest";
pub const DELETE_RECORD: &str = "delete_record";
pub const LOAD_AREA_POSITIONS: &str = "load_area_positions";
pub const SAVE_AREA_POSITION: &str = "save_area_position";
pub const SAVE_AREA_POSITIONS: &str = "save_area_positions";
pub const LOAD_MAP_CONFIG: &str = "load_map_config";

/// `delete_record { id, kind }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteArgs {
    pub id: String,
    pub kind: NodeKind,
}

/// `save_area_position { areaId, x, y }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavePositionArgs {
    pub area_id: String,
    pub x: f64,
    pub y: f64,
}

/// `save_area_positions { positions: [{ areaId, x, y }] }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavePositionsArgs {
    pub positions: Vec<PersistedPosition>,
}
