//! Database Connection and Setup
//!
//! Opens the SQLite database and creates the schema if missing.

use rusqlite::Connection;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::error::StoreResult;

/// One connection shared by every repository
pub type SharedConnection = Arc<Mutex<Connection>>;

/// Open (or create) the database file and its tables
pub fn open_db(path: &Path) -> StoreResult<SharedConnection> {
    let conn = Connection::open(path)?;
    create_schema(&conn)?;
    tracing::info!(path = %path.display(), "map database ready");
    Ok(Arc::new(Mutex::new(conn)))
}

pub fn open_in_memory() -> StoreResult<SharedConnection> {
    let conn = Connection::open_in_memory()?;
    create_schema(&conn)?;
    Ok(Arc::new(Mutex::new(conn)))
}

fn create_schema(conn: &Connection) -> StoreResult<()> {
    // No foreign keys: dangling references are tolerated and dropped by the tree builder
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS areas (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            color TEXT,
            icon TEXT,
            status TEXT
        );
        CREATE TABLE IF NOT EXISTS projects (
            id TEXT PRIMARY KEY,
            area_id TEXT NOT NULL,
            name TEXT NOT NULL,
            color TEXT,
            icon TEXT,
            status TEXT,
            priority TEXT
        );
        CREATE TABLE IF NOT EXISTS items (
            id TEXT PRIMARY KEY,
            project_id TEXT NOT NULL,
            item_type TEXT NOT NULL,
            name TEXT NOT NULL,
            color TEXT,
            icon TEXT,
            status TEXT,
            priority TEXT
        );
        CREATE TABLE IF NOT EXISTS area_positions (
            area_id TEXT PRIMARY KEY,
            x REAL NOT NULL,
            y REAL NOT NULL,
            updated_at INTEGER
        );
        CREATE INDEX IF NOT EXISTS idx_projects_area ON projects(area_id);
        CREATE INDEX IF NOT EXISTS idx_items_project ON items(project_id);",
    )?;

    Ok(())
}
