//! Commands Layer
//!
//! Tauri command handlers that bridge the frontend to `MapBackend`.
//! Parameter names are snake_case here and arrive camelCase from the
//! frontend (`area_id` <- `areaId`), matching `map_engine::wire`.

mod config_cmd;
mod forest_cmd;
mod position_cmd;

pub use config_cmd::*;
pub use forest_cmd::*;
pub use position_cmd::*;
