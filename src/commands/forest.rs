//! Forest Commands
//!
//! Fetching the area/project/item rows and deleting a record.

use wasm_bindgen::prelude::*;
use map_engine::wire::{DeleteArgs, DELETE_RECORD, FETCH_FOREST};
use map_engine::{ForestData, NodeKind};
use super::{invoke, js_error};

pub async fn fetch_forest() -> Result<ForestData, String> {
    let result = invoke(FETCH_FOREST, JsValue::NULL).await.map_err(js_error)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

/// Delete a record; the backend cascades to everything beneath it
pub async fn delete_record(id: &str, kind: NodeKind) -> Result<(), String> {
    let args = DeleteArgs { id: id.to_string(), kind };
    let js_args = serde_wasm_bindgen::to_value(&args).map_err(|e| e.to_string())?;
    invoke(DELETE_RECORD, js_args).await.map_err(js_error)?;
    Ok(())
}
