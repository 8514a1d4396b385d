//! Area Dragging
//!
//! Free drag of level-0 nodes. A movement threshold separates a drag from a
//! click: below it, release behaves like a click and nothing is persisted.

use crate::error::{MapError, MapResult};
use crate::geometry::Point;
use crate::persistence::PersistedPosition;
use crate::tree::TreeNode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragConfig {
    /// Movement (layout units, either axis) past which a gesture counts as a drag
    pub threshold: f64,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self { threshold: 5.0 }
    }
}

/// Row geometry used by auto-arrange
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArrangeConfig {
    pub node_width: f64,
    pub gap: f64,
    pub row_y: f64,
}

impl Default for ArrangeConfig {
    fn default() -> Self {
        Self {
            node_width: 220.0,
            gap: 60.0,
            row_y: 0.0,
        }
    }
}

impl ArrangeConfig {
    pub fn validate(&self) -> MapResult<()> {
        if self.node_width + self.gap <= 0.0 {
            return Err(MapError::Config("arrange node_width + gap must be positive".to_string()));
        }
        Ok(())
    }
}

/// The drag in progress
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveDrag {
    pub node_id: String,
    /// Pointer position at pointer-down (screen units)
    pub start_pointer: Point,
    /// Node position before the drag (layout units)
    pub origin: Point,
    /// Live node position (layout units)
    pub current: Point,
}

/// What releasing the pointer produced
#[derive(Debug, Clone, PartialEq)]
pub enum DragOutcome {
    /// Moved past the threshold: the new position must be committed and saved
    Committed(PersistedPosition),
    /// Never crossed the threshold: a plain click
    Released,
    /// Nothing was being dragged
    Idle,
}

/// Drag state machine: Idle <-> Dragging.
///
/// `has_moved` survives the release so the click that follows a real drag
/// can be swallowed; the next pointer-down clears it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NodeDrag {
    active: Option<ActiveDrag>,
    has_moved: bool,
}

impl NodeDrag {
    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    pub fn active(&self) -> Option<&ActiveDrag> {
        self.active.as_ref()
    }

    pub fn has_moved(&self) -> bool {
        self.has_moved
    }

    /// Whether a click on an area should navigate
    pub fn allows_click(&self) -> bool {
        !self.has_moved
    }

    /// Idle -> Dragging
    pub fn start(self, node_id: String, pointer: Point, origin: Point) -> Self {
        Self {
            active: Some(ActiveDrag {
                node_id,
                start_pointer: pointer,
                origin,
                current: origin,
            }),
            has_moved: false,
        }
    }

    /// Pointer moved to `pointer` (screen units) while the view is at `zoom`
    pub fn moved(self, pointer: Point, zoom: f64, config: &DragConfig) -> Self {
        let Some(active) = self.active else {
            return self;
        };

        let delta = (pointer - active.start_pointer) / zoom;
        let crossed = delta.x.abs() > config.threshold || delta.y.abs() > config.threshold;

        Self {
            active: Some(ActiveDrag {
                current: active.origin + delta,
                ..active
            }),
            has_moved: self.has_moved || crossed,
        }
    }

    /// Dragging -> Idle
    pub fn release(self) -> (Self, DragOutcome) {
        let Some(active) = self.active else {
            return (self, DragOutcome::Idle);
        };

        let outcome = if self.has_moved {
            tracing::debug!(id = %active.node_id, x = active.current.x, y = active.current.y, "area drag committed");
            DragOutcome::Committed(PersistedPosition {
                area_id: active.node_id,
                x: active.current.x,
                y: active.current.y,
            })
        } else {
            DragOutcome::Released
        };

        (
            Self {
                active: None,
                has_moved: self.has_moved,
            },
            outcome,
        )
    }
}

/// Lay all areas out in one row: `x = index * (node_width + gap)`, `y = row_y`
pub fn auto_arrange(forest: &[TreeNode], config: &ArrangeConfig) -> Vec<PersistedPosition> {
    forest
        .iter()
        .filter(|node| node.is_root())
        .enumerate()
        .map(|(index, area)| PersistedPosition {
            area_id: area.id.clone(),
            x: index as f64 * (config.node_width + config.gap),
            y: config.row_y,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::build_forest;
    use crate::tree::fixtures::*;

    fn dragging_a1() -> NodeDrag {
        NodeDrag::default().start("a1".to_string(), Point::new(100.0, 100.0), Point::ORIGIN)
    }

    #[test]
    fn test_drag_scaled_by_zoom() {
        let drag = dragging_a1().moved(Point::new(150.0, 100.0), 2.0, &DragConfig::default());

        assert_eq!(drag.active().map(|a| a.current), Some(Point::new(25.0, 0.0)));
        assert!(drag.has_moved());

        let (drag, outcome) = drag.release();
        assert!(!drag.is_dragging());
        assert_eq!(
            outcome,
            DragOutcome::Committed(PersistedPosition {
                area_id: "a1".to_string(),
                x: 25.0,
                y: 0.0
            })
        );
        assert!(!drag.allows_click());
    }

    #[test]
    fn test_release_without_movement_is_click() {
        let (drag, outcome) = dragging_a1()
            .moved(Point::new(100.0, 100.0), 1.0, &DragConfig::default())
            .release();

        assert_eq!(outcome, DragOutcome::Released);
        assert!(drag.allows_click());
    }

    #[test]
    fn test_small_jitter_below_threshold() {
        // 8 screen px at zoom 2 is 4 layout units
        let drag = dragging_a1().moved(Point::new(108.0, 92.0), 2.0, &DragConfig::default());
        assert!(!drag.has_moved());
        assert_eq!(drag.active().map(|a| a.current), Some(Point::new(4.0, -4.0)));
        assert_eq!(drag.release().1, DragOutcome::Released);
    }

    #[test]
    fn test_has_moved_is_sticky_within_gesture() {
        let config = DragConfig::default();
        let drag = dragging_a1()
            .moved(Point::new(200.0, 100.0), 1.0, &config)
            .moved(Point::new(100.0, 100.0), 1.0, &config);

        assert!(drag.has_moved());
        assert!(matches!(drag.release().1, DragOutcome::Committed(_)));
    }

    #[test]
    fn test_next_press_clears_has_moved() {
        let config = DragConfig::default();
        let (drag, _) = dragging_a1().moved(Point::new(300.0, 100.0), 1.0, &config).release();
        assert!(!drag.allows_click());

        let drag = drag.start("a1".to_string(), Point::ORIGIN, Point::new(200.0, 0.0));
        assert!(drag.allows_click());
    }

    #[test]
    fn test_idle_ignores_move_and_release() {
        let drag = NodeDrag::default().moved(Point::new(50.0, 50.0), 1.0, &DragConfig::default());
        assert_eq!(drag, NodeDrag::default());
        assert_eq!(drag.release().1, DragOutcome::Idle);
    }

    #[test]
    fn test_auto_arrange_row() {
        let forest = build_forest(&two_areas());
        let row = auto_arrange(&forest, &ArrangeConfig::default());

        assert_eq!(row.len(), 2);
        assert_eq!((row[0].area_id.as_str(), row[0].x, row[0].y), ("a1", 0.0, 0.0));
        assert_eq!((row[1].area_id.as_str(), row[1].x, row[1].y), ("a2", 280.0, 0.0));
    }
}
