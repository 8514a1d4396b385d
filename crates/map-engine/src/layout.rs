//! Lane Layout
//!
//! Every area gets its own vertical lane: the area sits on top and its whole
//! subtree is stacked beneath it in depth-first order.

use crate::geometry::Point;
use crate::tree::{level_ok, NodeKind, TreeNode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Area id -> top-left position, for level-0 nodes only
pub type PositionMap = BTreeMap<String, Point>;

/// Spacing constants for the lane layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Horizontal distance between lanes
    pub area_spacing: f64,
    /// Vertical distance between consecutive nodes in a lane
    pub vertical_spacing: f64,
    /// Re-base a lane on its area's persisted position instead of the lane slot
    pub children_follow_area: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            area_spacing: 400.0,
            vertical_spacing: 180.0,
            children_follow_area: false,
        }
    }
}

/// Render-facing attributes of a node, without its subtree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeInfo {
    pub id: String,
    pub name: String,
    pub kind: NodeKind,
    pub level: u8,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub parent_id: Option<String>,
    pub child_count: usize,
    pub descendant_count: usize,
}

impl NodeInfo {
    fn new(node: &TreeNode, parent: Option<&TreeNode>) -> Self {
        Self {
            id: node.id.clone(),
            name: node.name.clone(),
            kind: node.kind,
            level: node.level,
            color: node.color.clone(),
            icon: node.icon.clone(),
            status: node.status.clone(),
            priority: node.priority.clone(),
            parent_id: parent.map(|p| p.id.clone()),
            child_count: node.children.len(),
            descendant_count: node.descendant_count(),
        }
    }
}

/// Layout-space position of one node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodePosition {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub node: NodeInfo,
}

impl NodePosition {
    fn new(node: &TreeNode, parent: Option<&TreeNode>, at: Point) -> Self {
        Self {
            id: node.id.clone(),
            x: at.x,
            y: at.y,
            node: NodeInfo::new(node, parent),
        }
    }

    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Position every node of the forest.
///
/// Area `i` lands at `(i * area_spacing, 0)` unless `persisted` holds an entry
/// for it. Projects and items keep the lane slot `x` of their area; with
/// `children_follow_area` they are stacked under the resolved area position.
pub fn layout(forest: &[TreeNode], config: &LayoutConfig, persisted: &PositionMap) -> Vec<NodePosition> {
    let mut positions = Vec::new();

    for (index, area) in forest.iter().enumerate() {
        if !level_ok(area, None) {
            tracing::warn!(id = %area.id, level = area.level, "skipping non-area root");
            continue;
        }

        let lane = Point::new(index as f64 * config.area_spacing, 0.0);
        let resolved = persisted.get(&area.id).copied().unwrap_or(lane);
        positions.push(NodePosition::new(area, None, resolved));

        let origin = if config.children_follow_area { resolved } else { lane };
        let mut row = 1;
        stack_children(area, origin, &mut row, config, &mut positions);
    }

    positions
}

fn stack_children(
    parent: &TreeNode,
    origin: Point,
    row: &mut usize,
    config: &LayoutConfig,
    positions: &mut Vec<NodePosition>,
) {
    for child in &parent.children {
        if !level_ok(child, Some(parent)) {
            tracing::warn!(id = %child.id, level = child.level, "skipping node with unexpected level");
            continue;
        }
        let at = Point::new(origin.x, origin.y + *row as f64 * config.vertical_spacing);
        positions.push(NodePosition::new(child, Some(parent), at));
        *row += 1;
        stack_children(child, origin, row, config, positions);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::build_forest;
    use crate::tree::fixtures::*;

    fn xy(positions: &[NodePosition], id: &str) -> (f64, f64) {
        let p = positions.iter().find(|p| p.id == id).expect("position for id");
        (p.x, p.y)
    }

    #[test]
    fn test_single_lane() {
        let forest = build_forest(&health());
        let positions = layout(&forest, &LayoutConfig::default(), &PositionMap::new());

        assert_eq!(positions.len(), 3);
        assert_eq!(xy(&positions, "a1"), (0.0, 0.0));
        assert_eq!(xy(&positions, "p1"), (0.0, 180.0));
        assert_eq!(xy(&positions, "t1"), (0.0, 360.0));
        assert_eq!(positions[2].node.parent_id.as_deref(), Some("p1"));
    }

    #[test]
    fn test_lanes_stack_depth_first() {
        let forest = build_forest(&two_areas());
        let positions = layout(&forest, &LayoutConfig::default(), &PositionMap::new());

        // a1 lane: a1, p1, t1, b1, p3, f1
        assert_eq!(xy(&positions, "b1"), (0.0, 540.0));
        assert_eq!(xy(&positions, "p3"), (0.0, 720.0));
        assert_eq!(xy(&positions, "f1"), (0.0, 900.0));
        // a2 lane restarts at the top
        assert_eq!(xy(&positions, "a2"), (400.0, 0.0));
        assert_eq!(xy(&positions, "t2"), (400.0, 360.0));
    }

    #[test]
    fn test_one_position_per_node() {
        let forest = build_forest(&two_areas());
        let positions = layout(&forest, &LayoutConfig::default(), &PositionMap::new());
        let mut ids: Vec<&str> = positions.iter().map(|p| p.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), positions.len());
        assert_eq!(positions.len(), crate::tree::node_count(&forest));
    }

    #[test]
    fn test_layout_is_deterministic() {
        let forest = build_forest(&two_areas());
        let mut persisted = PositionMap::new();
        persisted.insert("a2".to_string(), Point::new(-30.0, 75.5));
        let config = LayoutConfig::default();

        assert_eq!(layout(&forest, &config, &persisted), layout(&forest, &config, &persisted));
    }

    #[test]
    fn test_persisted_override_is_exact() {
        let forest = build_forest(&two_areas());
        let mut persisted = PositionMap::new();
        persisted.insert("a2".to_string(), Point::new(1234.5, -88.0));
        let positions = layout(&forest, &LayoutConfig::default(), &persisted);

        assert_eq!(xy(&positions, "a2"), (1234.5, -88.0));
        // Children stay in the lane slot
        assert_eq!(xy(&positions, "p2"), (400.0, 180.0));
        // Other areas untouched
        assert_eq!(xy(&positions, "a1"), (0.0, 0.0));
    }

    #[test]
    fn test_children_follow_area_when_enabled() {
        let forest = build_forest(&health());
        let mut persisted = PositionMap::new();
        persisted.insert("a1".to_string(), Point::new(50.0, 20.0));
        let config = LayoutConfig {
            children_follow_area: true,
            ..LayoutConfig::default()
        };
        let positions = layout(&forest, &config, &persisted);

        assert_eq!(xy(&positions, "p1"), (50.0, 200.0));
        assert_eq!(xy(&positions, "t1"), (50.0, 380.0));
    }

    #[test]
    fn test_override_ignores_index() {
        let mut data = two_areas();
        data.areas.reverse();
        let forest = build_forest(&data);
        let mut persisted = PositionMap::new();
        persisted.insert("a1".to_string(), Point::new(7.0, 9.0));
        let positions = layout(&forest, &LayoutConfig::default(), &persisted);

        assert_eq!(xy(&positions, "a1"), (7.0, 9.0));
    }
}
