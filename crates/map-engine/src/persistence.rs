//! Position Persistence
//!
//! Boundary trait for storing area positions, plus the executor that turns
//! save effects into store calls.

use crate::error::{MapError, MapResult};
use crate::geometry::Point;
use crate::interaction::Effect;
use crate::layout::PositionMap;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;

/// A saved area position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedPosition {
    pub area_id: String,
    pub x: f64,
    pub y: f64,
}

impl PersistedPosition {
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Load/save `{id, x, y}` for level-0 nodes. Last write wins.
#[async_trait(?Send)]
pub trait PositionStore {
    async fn load_positions(&self) -> MapResult<PositionMap>;

    async fn save_position(&self, id: &str, x: f64, y: f64) -> MapResult<()>;

    async fn save_positions(&self, batch: &[PersistedPosition]) -> MapResult<()>;
}

/// Issue the save effects in order. Failures are logged and counted, never
/// rolled back. Returns the number of failed writes.
pub async fn persist_effects<S>(store: &S, effects: &[Effect]) -> usize
where
    S: PositionStore + ?Sized,
{
    let mut failures = 0;
    for effect in effects {
        let result = match effect {
            Effect::SavePosition(p) => store.save_position(&p.area_id, p.x, p.y).await,
            Effect::SavePositions(batch) => store.save_positions(batch).await,
            Effect::Navigate { .. } => continue,
        };
        if let Err(e) = result {
            failures += 1;
            tracing::warn!(error = %e, "position save failed, keeping in-memory layout");
        }
    }
    failures
}

/// In-process store, for tests and hosts without a backend
#[derive(Debug, Default)]
pub struct MemoryPositionStore {
    positions: RefCell<PositionMap>,
    writes: RefCell<Vec<String>>,
    failing: bool,
}

impl MemoryPositionStore {
    pub fn new(positions: PositionMap) -> Self {
        Self {
            positions: RefCell::new(positions),
            ..Default::default()
        }
    }

    /// A store whose every write fails
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Default::default()
        }
    }

    pub fn snapshot(&self) -> PositionMap {
        self.positions.borrow().clone()
    }

    /// Ids written, in call order
    pub fn writes(&self) -> Vec<String> {
        self.writes.borrow().clone()
    }
}

#[async_trait(?Send)]
impl PositionStore for MemoryPositionStore {
    async fn load_positions(&self) -> MapResult<PositionMap> {
        Ok(self.snapshot())
    }

    async fn save_position(&self, id: &str, x: f64, y: f64) -> MapResult<()> {
        self.writes.borrow_mut().push(id.to_string());
        if self.failing {
            return Err(MapError::Save(format!("store rejected {}", id)));
        }
        self.positions.borrow_mut().insert(id.to_string(), Point::new(x, y));
        Ok(())
    }

    async fn save_positions(&self, batch: &[PersistedPosition]) -> MapResult<()> {
        self.writes.borrow_mut().extend(batch.iter().map(|p| p.area_id.clone()));
        if self.failing {
            return Err(MapError::Save(format!("store rejected batch of {}", batch.len())));
        }
        let mut positions = self.positions.borrow_mut();
        for p in batch {
            positions.insert(p.area_id.clone(), p.point());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn save(id: &str, x: f64, y: f64) -> Effect {
        Effect::SavePosition(PersistedPosition { area_id: id.to_string(), x, y })
    }

    #[tokio::test]
    async fn test_effects_issued_in_order() {
        let store = MemoryPositionStore::default();
        let effects = vec![
            save("a2", 1.0, 2.0),
            Effect::Navigate { id: "p1".to_string(), kind: crate::tree::NodeKind::Project },
            Effect::SavePositions(vec![
                PersistedPosition { area_id: "a1".to_string(), x: 0.0, y: 0.0 },
                PersistedPosition { area_id: "a2".to_string(), x: 280.0, y: 0.0 },
            ]),
        ];

        assert_eq!(persist_effects(&store, &effects).await, 0);
        assert_eq!(store.writes(), vec!["a2", "a1", "a2"]);
        assert_eq!(store.snapshot().get("a2"), Some(&Point::new(280.0, 0.0)));
    }

    #[tokio::test]
    async fn test_failures_counted_not_raised() {
        let store = MemoryPositionStore::failing();
        let failures = persist_effects(&store, &[save("a1", 5.0, 5.0), save("a2", 6.0, 6.0)]).await;

        assert_eq!(failures, 2);
        assert!(store.snapshot().is_empty());
    }
}
