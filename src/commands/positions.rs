//! Area Position Commands
//!
//! Frontend bindings for persisted area positions.

use wasm_bindgen::prelude::*;
use map_engine::wire::{
    SavePositionArgs, SavePositionsArgs, LOAD_AREA_POSITIONS, SAVE_AREA_POSITION, SAVE_AREA_POSITIONS,
};
use map_engine::{PersistedPosition, PositionMap};
use super::{invoke, js_error};

pub async fn load_area_positions() -> Result<PositionMap, String> {
    let result = invoke(LOAD_AREA_POSITIONS, JsValue::NULL).await.map_err(js_error)?;
    let rows: Vec<PersistedPosition> = serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())?;
    Ok(rows.into_iter().map(|p| (p.area_id.clone(), p.point())).collect())
}

pub async fn save_area_position(area_id: &str, x: f64, y: f64) -> Result<(), String> {
    let args = SavePositionArgs { area_id: area_id.to_string(), x, y };
    let js_args = serde_wasm_bindgen::to_value(&args).map_err(|e| e.to_string())?;
    invoke(SAVE_AREA_POSITION, js_args).await.map_err(js_error)?;
    Ok(())
}

pub async fn save_area_positions(positions: &[PersistedPosition]) -> Result<(), String> {
    let args = SavePositionsArgs { positions: positions.to_vec() };
    let js_args = serde_wasm_bindgen::to_value(&args).map_err(|e| e.to_string())?;
    invoke(SAVE_AREA_POSITIONS, js_args).await.map_err(js_error)?;
    Ok(())
}
