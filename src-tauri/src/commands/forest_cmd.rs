//! Forest Commands

use map_engine::wire::DeleteArgs;
use map_engine::{ForestData, NodeKind};
use tauri::State;

use crate::AppState;

/// All open areas, projects and items
#[tauri::command]
pub async fn fetch_forest(state: State<'_, AppState>) -> Result<ForestData, String> {
    state.backend.fetch_forest().await
}

/// Delete a record and everything beneath it
#[tauri::command]
pub async fn delete_record(state: State<'_, AppState>, id: String, kind: NodeKind) -> Result<(), String> {
    state.backend.delete_record(DeleteArgs { id, kind }).await
}
