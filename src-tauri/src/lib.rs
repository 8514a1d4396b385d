//! Area Map Backend
//!
//! Tauri host: opens the map database in the app data directory and answers
//! the frontend's commands through `map_store::MapBackend`.

use std::path::{Path, PathBuf};
use tauri::Manager;

use map_store::{open_db, MapBackend};

mod commands;

/// Application state shared across commands
pub struct AppState {
    pub backend: MapBackend,
}

const DB_FILE: &str = "area_map.db";
/// Optional JSON overrides for layout, zoom and drag settings
const CONFIG_FILE: &str = "map_config.json";

fn get_app_dir(app_handle: &tauri::AppHandle) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let app_dir = app_handle.path().app_data_dir()?;
    std::fs::create_dir_all(&app_dir)?;
    Ok(app_dir)
}

fn open_backend(app_dir: &Path) -> Result<MapBackend, Box<dyn std::error::Error>> {
    let conn = open_db(&app_dir.join(DB_FILE))?;
    let mut backend = MapBackend::new(conn);

    let config_path = app_dir.join(CONFIG_FILE);
    if config_path.exists() {
        let json = std::fs::read_to_string(&config_path)?;
        // A broken config file falls back to defaults instead of blocking startup
        if let Err(e) = backend.set_config_json(json) {
            tracing::warn!(path = %config_path.display(), error = %e, "ignoring map config");
        }
    }
    Ok(backend)
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    let _ = tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).try_init();
    tracing::info!("starting area map");

    let result = tauri::Builder::default()
        .setup(|app| {
            let app_dir = get_app_dir(app.handle())?;
            let backend = open_backend(&app_dir)?;
            app.manage(AppState { backend });
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::fetch_forest,
            commands::delete_record,
            commands::load_area_positions,
            commands::save_area_position,
            commands::save_area_positions,
            commands::load_map_config,
        ])
        .run(tauri::generate_context!());

    if let Err(e) = result {
        tracing::error!(error = %e, "area map exited with an error");
    }
}
