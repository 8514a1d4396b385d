//! Map Config Command

use tauri::State;

use crate::AppState;

/// Raw JSON from the config file, or `None` for defaults
#[tauri::command]
pub fn load_map_config(state: State<'_, AppState>) -> Option<String> {
    state.backend.load_map_config()
}
