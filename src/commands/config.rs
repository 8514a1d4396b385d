//! Map Config Command

use wasm_bindgen::prelude::*;
use map_engine::wire::LOAD_MAP_CONFIG;
use map_engine::MapConfig;
use super::{invoke, js_error};

/// Host-provided JSON overrides; `null` means defaults
pub async fn load_map_config() -> Result<MapConfig, String> {
    let result = invoke(LOAD_MAP_CONFIG, JsValue::NULL).await.map_err(js_error)?;
    match result.as_string() {
        Some(json) => MapConfig::from_json(&json).map_err(|e| e.to_string()),
        None => Ok(MapConfig::default()),
    }
}
