//! Map Session
//!
//! `MapModel` is everything derived from one fetch; it is rebuilt wholesale on
//! every refresh, never patched. `MapSession` pairs it with the interactive
//! state and is what hosts hold on to.

use crate::config::MapConfig;
use crate::connections::{connections, Edge};
use crate::error::MapResult;
use crate::geometry::Point;
use crate::interaction::{Effect, MapEvent, MapState, PointerInput, PointerTarget, Transition};
use crate::layout::{layout, NodePosition, PositionMap};
use crate::persistence::PositionStore;
use crate::records::ForestData;
use crate::source::ForestSource;
use crate::tree::{build_forest, find_node, node_count, NodeKind, TreeNode};
use crate::visibility::visible_filtered;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MapModel {
    pub tree: Vec<TreeNode>,
    pub config: MapConfig,
}

impl MapModel {
    pub fn new(tree: Vec<TreeNode>, config: MapConfig) -> Self {
        Self { tree, config }
    }

    pub fn from_forest(data: &ForestData, config: MapConfig) -> Self {
        let tree = build_forest(data);
        tracing::info!(records = data.record_count(), nodes = node_count(&tree), "forest built");
        Self { tree, config }
    }

    pub fn find(&self, id: &str) -> Option<&TreeNode> {
        find_node(&self.tree, id)
    }

    pub fn is_area(&self, id: &str) -> bool {
        self.tree.iter().any(|node| node.is_root() && node.id == id)
    }

    pub fn kind_of(&self, id: &str) -> Option<NodeKind> {
        self.find(id).map(|node| node.kind)
    }

    /// Algorithmic lane slot of an area, ignoring persisted positions
    pub fn lane_origin(&self, id: &str) -> Point {
        self.tree
            .iter()
            .position(|node| node.id == id)
            .map(|index| Point::new(index as f64 * self.config.layout.area_spacing, 0.0))
            .unwrap_or(Point::ORIGIN)
    }

    pub fn layout(&self, overrides: &PositionMap) -> Vec<NodePosition> {
        layout(&self.tree, &self.config.layout, overrides)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MapSession {
    pub model: MapModel,
    pub state: MapState,
}

impl MapSession {
    pub fn new(model: MapModel, persisted: PositionMap) -> Self {
        let state = MapState::new(&model.config, persisted);
        Self { model, state }
    }

    /// Run one transition and hand back its effects
    pub fn apply(&mut self, event: MapEvent) -> Vec<Effect> {
        let state = std::mem::take(&mut self.state);
        let Transition { state, effects } = state.apply(event, &self.model);
        self.state = state;
        effects
    }

    /// Full layout including the live drag position
    pub fn positions(&self) -> Vec<NodePosition> {
        self.model.layout(&self.state.live_positions())
    }

    pub fn visible_positions(&self) -> Vec<NodePosition> {
        visible_filtered(&self.positions(), &self.model.tree, &self.state.expansion, &self.state.filter)
    }

    pub fn edges(&self) -> Vec<Edge> {
        connections(&self.visible_positions(), &self.model.config.sizes)
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.state.expansion.contains(id)
    }
}

impl PointerInput for MapSession {
    fn in_gesture(&self) -> bool {
        self.state.in_gesture()
    }

    fn on_drag_start(&mut self, target: PointerTarget, at: Point) -> Vec<Effect> {
        self.apply(MapEvent::PointerDown { target, at })
    }

    fn on_drag_move(&mut self, at: Point) -> Vec<Effect> {
        self.apply(MapEvent::PointerMove { at })
    }

    fn on_drag_end(&mut self, at: Option<Point>) -> Vec<Effect> {
        match at {
            Some(at) => self.apply(MapEvent::PointerUp { at }),
            None => self.apply(MapEvent::PointerCancel),
        }
    }

    fn on_wheel(&mut self, delta_y: f64) -> Vec<Effect> {
        self.apply(MapEvent::Wheel { delta_y })
    }

    fn on_click(&mut self, node_id: &str) -> Vec<Effect> {
        self.apply(MapEvent::Click {
            node_id: node_id.to_string(),
        })
    }
}

/// Fetch the forest and the persisted positions, then build a fresh session.
/// Either fetch failing fails the whole load.
pub async fn load_session<F, P>(source: &F, store: &P, config: MapConfig) -> MapResult<MapSession>
where
    F: ForestSource + ?Sized,
    P: PositionStore + ?Sized,
{
    let data = source.fetch_forest().await?;
    let persisted = store.load_positions().await?;
    Ok(MapSession::new(MapModel::from_forest(&data, config), persisted))
}
