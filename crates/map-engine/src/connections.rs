//! Connectors
//!
//! Parent -> child cubic curves, derived from the visible positions only.

use crate::geometry::Point;
use crate::layout::NodePosition;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Rendered size per level: areas > projects > items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeSizes {
    pub area: Size,
    pub project: Size,
    pub item: Size,
}

impl Default for NodeSizes {
    fn default() -> Self {
        Self {
            area: Size::new(220.0, 90.0),
            project: Size::new(180.0, 70.0),
            item: Size::new(150.0, 54.0),
        }
    }
}

impl NodeSizes {
    pub fn for_level(&self, level: u8) -> Size {
        match level {
            0 => self.area,
            1 => self.project,
            _ => self.item,
        }
    }

    fn bottom_center(&self, position: &NodePosition) -> Point {
        let size = self.for_level(position.node.level);
        Point::new(position.x + size.width / 2.0, position.y + size.height)
    }

    fn top_center(&self, position: &NodePosition) -> Point {
        let size = self.for_level(position.node.level);
        Point::new(position.x + size.width / 2.0, position.y)
    }
}

/// One connector curve, in layout space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub parent_id: String,
    pub child_id: String,
    pub from: Point,
    pub control_from: Point,
    pub control_to: Point,
    pub to: Point,
}

impl Edge {
    /// SVG path data
    pub fn path(&self) -> String {
        format!(
            "M {} {} C {} {}, {} {}, {} {}",
            self.from.x,
            self.from.y,
            self.control_from.x,
            self.control_from.y,
            self.control_to.x,
            self.control_to.y,
            self.to.x,
            self.to.y
        )
    }
}

/// One edge per visible child whose parent is also visible, in child order
pub fn connections(visible: &[NodePosition], sizes: &NodeSizes) -> Vec<Edge> {
    let by_id: HashMap<&str, &NodePosition> = visible.iter().map(|p| (p.id.as_str(), p)).collect();

    visible
        .iter()
        .filter_map(|child| {
            let parent = by_id.get(child.node.parent_id.as_deref()?)?;
            let from = sizes.bottom_center(parent);
            let to = sizes.top_center(child);
            let mid_y = (from.y + to.y) / 2.0;
            Some(Edge {
                parent_id: parent.id.clone(),
                child_id: child.id.clone(),
                from,
                control_from: Point::new(from.x, mid_y),
                control_to: Point::new(to.x, mid_y),
                to,
            })
        })
        .collect()
}
