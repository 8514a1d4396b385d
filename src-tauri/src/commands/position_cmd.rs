//! Area Position Commands

use map_engine::wire::{SavePositionArgs, SavePositionsArgs};
use map_engine::PersistedPosition;
use tauri::State;

use crate::AppState;

#[tauri::command]
pub async fn load_area_positions(state: State<'_, AppState>) -> Result<Vec<PersistedPosition>, String> {
    state.backend.load_area_positions().await
}

#[tauri::command]
pub async fn save_area_position(
    state: State<'_, AppState>,
    area_id: String,
    x: f64,
    y: f64,
) -> Result<(), String> {
    state.backend.save_area_position(SavePositionArgs { area_id, x, y }).await
}

/// Batch write from auto-arrange, one transaction
#[tauri::command]
pub async fn save_area_positions(
    state: State<'_, AppState>,
    positions: Vec<PersistedPosition>,
) -> Result<(), String> {
    state.backend.save_area_positions(SavePositionsArgs { positions }).await
}
