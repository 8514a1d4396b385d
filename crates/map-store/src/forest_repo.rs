//! Forest Repository
//!
//! Areas, projects and items as flat tables linked by `area_id` /
//! `project_id`. Rows come back in insertion order.

use async_trait::async_trait;
use map_engine::{AreaRecord, ForestData, ForestSource, ItemRecord, MapResult, NodeKind, ProjectRecord};
use rusqlite::{params, Connection};

use crate::db::SharedConnection;
use crate::error::{StoreError, StoreResult};

/// Statuses that keep a record off the map
pub const CLOSED_STATUSES: &[&str] = &["completed", "done", "dismissed", "archived"];

pub struct ForestRepository {
    conn: SharedConnection,
}

impl ForestRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    pub async fn create_area(&self, area: &AreaRecord) -> StoreResult<()> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO areas (id, name, color, icon, status) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![area.id, area.name, area.color, area.icon, area.status],
        )?;
        Ok(())
    }

    pub async fn create_project(&self, project: &ProjectRecord) -> StoreResult<()> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO projects (id, area_id, name, color, icon, status, priority) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                project.id,
                project.area_id,
                project.name,
                project.color,
                project.icon,
                project.status,
                project.priority
            ],
        )?;
        Ok(())
    }

    pub async fn create_item(&self, item: &ItemRecord, kind: NodeKind) -> StoreResult<()> {
        if !kind.is_item() {
            return Err(StoreError::InvalidInput(format!("{} is not an item kind", kind.as_str())));
        }
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO items (id, project_id, item_type, name, color, icon, status, priority) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                item.id,
                item.project_id,
                kind.as_str(),
                item.name,
                item.color,
                item.icon,
                item.status,
                item.priority
            ],
        )?;
        Ok(())
    }

    /// Every open record, closed statuses excluded
    pub async fn load_forest(&self) -> StoreResult<ForestData> {
        let conn = self.conn.lock().await;
        let open = open_filter();

        let mut stmt = conn.prepare(&format!(
            "SELECT id, name, color, icon, status FROM areas WHERE {} ORDER BY rowid",
            open
        ))?;
        let areas = stmt
            .query_map([], |row| {
                Ok(AreaRecord {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    color: row.get(2)?,
                    icon: row.get(3)?,
                    status: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT id, area_id, name, color, icon, status, priority FROM projects WHERE {} ORDER BY rowid",
            open
        ))?;
        let projects = stmt
            .query_map([], |row| {
                Ok(ProjectRecord {
                    id: row.get(0)?,
                    area_id: row.get(1)?,
                    name: row.get(2)?,
                    color: row.get(3)?,
                    icon: row.get(4)?,
                    status: row.get(5)?,
                    priority: row.get(6)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ForestData {
            areas,
            projects,
            tasks: load_items(&conn, NodeKind::Task, &open)?,
            bugs: load_items(&conn, NodeKind::Bug, &open)?,
            features: load_items(&conn, NodeKind::Feature, &open)?,
        })
    }

    /// Delete a record and everything under it.
    /// Deleting an area also forgets its saved position.
    pub async fn delete(&self, id: &str, kind: NodeKind) -> StoreResult<()> {
        let mut conn = self.conn.lock().await;
        let tx = conn.transaction()?;

        let deleted = match kind {
            NodeKind::Area => {
                tx.execute(
                    "DELETE FROM items WHERE project_id IN (SELECT id FROM projects WHERE area_id = ?1)",
                    params![id],
                )?;
                tx.execute("DELETE FROM projects WHERE area_id = ?1", params![id])?;
                tx.execute("DELETE FROM area_positions WHERE area_id = ?1", params![id])?;
                tx.execute("DELETE FROM areas WHERE id = ?1", params![id])?
            }
            NodeKind::Project => {
                tx.execute("DELETE FROM items WHERE project_id = ?1", params![id])?;
                tx.execute("DELETE FROM projects WHERE id = ?1", params![id])?
            }
            NodeKind::Task | NodeKind::Bug | NodeKind::Feature => tx.execute(
                "DELETE FROM items WHERE id = ?1 AND item_type = ?2",
                params![id, kind.as_str()],
            )?,
        };

        if deleted == 0 {
            // Dropping the transaction rolls back the cascade
            return Err(StoreError::NotFound(format!("{} {}", kind.as_str(), id)));
        }
        tx.commit()?;
        Ok(())
    }
}

fn open_filter() -> String {
    let closed = CLOSED_STATUSES
        .iter()
        .map(|s| format!("'{}'", s))
        .collect::<Vec<_>>()
        .join(", ");
    format!("(status IS NULL OR status NOT IN ({}))", closed)
}

fn load_items(conn: &Connection, kind: NodeKind, open: &str) -> StoreResult<Vec<ItemRecord>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT id, project_id, name, color, icon, status, priority FROM items WHERE item_type = ?1 AND {} ORDER BY rowid",
        open
    ))?;
    let items = stmt
        .query_map(params![kind.as_str()], |row| {
            Ok(ItemRecord {
                id: row.get(0)?,
                project_id: row.get(1)?,
                name: row.get(2)?,
                color: row.get(3)?,
                icon: row.get(4)?,
                status: row.get(5)?,
                priority: row.get(6)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(items)
}

#[async_trait(?Send)]
impl ForestSource for ForestRepository {
    async fn fetch_forest(&self) -> MapResult<ForestData> {
        let data = self.load_forest().await.map_err(StoreError::into_fetch)?;
        tracing::info!(records = data.record_count(), "forest fetched");
        Ok(data)
    }

    async fn delete_record(&self, id: &str, kind: NodeKind) -> MapResult<()> {
        tracing::info!(id, kind = kind.as_str(), "deleting record");
        self.delete(id, kind).await.map_err(StoreError::into_delete)
    }
}
