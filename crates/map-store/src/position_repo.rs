//! Area Position Repository
//!
//! One row per area that has ever been dragged or auto-arranged.
//! Writes replace the whole `(x, y)` pair; last write wins.

use async_trait::async_trait;
use map_engine::{MapResult, PersistedPosition, Point, PositionMap, PositionStore};
use rusqlite::params;

use crate::db::SharedConnection;
use crate::error::{StoreError, StoreResult};

const UPSERT_SQL: &str = "INSERT INTO area_positions (area_id, x, y, updated_at) VALUES (?1, ?2, ?3, ?4)
    ON CONFLICT(area_id) DO UPDATE SET x = excluded.x, y = excluded.y, updated_at = excluded.updated_at";

pub struct PositionRepository {
    conn: SharedConnection,
}

impl PositionRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    pub async fn load_all(&self) -> StoreResult<PositionMap> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare("SELECT area_id, x, y FROM area_positions")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, Point::new(row.get(1)?, row.get(2)?)))
        })?;

        let mut positions = PositionMap::new();
        for row in rows {
            let (id, point) = row?;
            positions.insert(id, point);
        }
        Ok(positions)
    }

    pub async fn upsert(&self, area_id: &str, x: f64, y: f64) -> StoreResult<()> {
        check_coordinates(area_id, x, y)?;
        let conn = self.conn.lock().await;
        conn.execute(UPSERT_SQL, params![area_id, x, y, chrono::Utc::now().timestamp_millis()])?;
        Ok(())
    }

    /// All-or-nothing write of a batch (auto-arrange)
    pub async fn upsert_batch(&self, batch: &[PersistedPosition]) -> StoreResult<()> {
        for p in batch {
            check_coordinates(&p.area_id, p.x, p.y)?;
        }

        let mut conn = self.conn.lock().await;
        let tx = conn.transaction()?;
        let now = chrono::Utc::now().timestamp_millis();
        for p in batch {
            tx.execute(UPSERT_SQL, params![p.area_id, p.x, p.y, now])?;
        }
        tx.commit()?;
        Ok(())
    }

    pub async fn remove(&self, area_id: &str) -> StoreResult<()> {
        let conn = self.conn.lock().await;
        conn.execute("DELETE FROM area_positions WHERE area_id = ?1", params![area_id])?;
        Ok(())
    }
}

fn check_coordinates(area_id: &str, x: f64, y: f64) -> StoreResult<()> {
    if area_id.is_empty() {
        return Err(StoreError::InvalidInput("empty area id".to_string()));
    }
    if !x.is_finite() || !y.is_finite() {
        return Err(StoreError::InvalidInput(format!("non-finite position for {}", area_id)));
    }
    Ok(())
}

#[async_trait(?Send)]
impl PositionStore for PositionRepository {
    async fn load_positions(&self) -> MapResult<PositionMap> {
        self.load_all().await.map_err(StoreError::into_fetch)
    }

    async fn save_position(&self, id: &str, x: f64, y: f64) -> MapResult<()> {
        tracing::debug!(id, x, y, "saving area position");
        self.upsert(id, x, y).await.map_err(StoreError::into_save)
    }

    async fn save_positions(&self, batch: &[PersistedPosition]) -> MapResult<()> {
        tracing::debug!(count = batch.len(), "saving area positions");
        self.upsert_batch(batch).await.map_err(StoreError::into_save)
    }
}
