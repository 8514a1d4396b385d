//! Map Interaction
//!
//! Pointer, wheel and toolbar input all go through `MapState::apply`, a pure
//! `(state, event) -> (state, effects)` transition. Canvas panning and area
//! dragging are exclusive: whichever gesture starts first owns the pointer
//! until it is released or cancelled.

use crate::config::MapConfig;
use crate::drag::{auto_arrange, DragOutcome, NodeDrag};
use crate::geometry::Point;
use crate::layout::PositionMap;
use crate::persistence::PersistedPosition;
use crate::session::MapModel;
use crate::tree::NodeKind;
use crate::viewport::ViewportState;
use crate::visibility::{ExpansionSet, KindFilter};

/// What the pointer went down on
#[derive(Debug, Clone, PartialEq)]
pub enum PointerTarget {
    Canvas,
    Node(String),
    /// A control inside a node card (button, input, delete confirmation).
    /// Starts no gesture and the click that follows does not navigate.
    Control,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    PointerDown { target: PointerTarget, at: Point },
    PointerMove { at: Point },
    PointerUp { at: Point },
    /// Pointer left the canvas or the window lost focus mid-gesture
    PointerCancel,
    Wheel { delta_y: f64 },
    /// Direct pan; only honoured while a canvas pan gesture is active
    Pan { dx: f64, dy: f64 },
    Click { node_id: String },
    ZoomIn,
    ZoomOut,
    ResetView,
    Toggle { node_id: String },
    ExpandAll,
    CollapseAll,
    ToggleKind(NodeKind),
    AutoArrange,
}

/// Side effects requested by a transition, executed by the host in order
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    SavePosition(PersistedPosition),
    SavePositions(Vec<PersistedPosition>),
    Navigate { id: String, kind: NodeKind },
}

/// Canvas pan in progress (screen units)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanGesture {
    pub start: Point,
    pub last: Point,
    pub has_moved: bool,
}

impl PanGesture {
    pub fn new(at: Point) -> Self {
        Self {
            start: at,
            last: at,
            has_moved: false,
        }
    }

    /// Advance to `at`, returning the new gesture and the pan delta
    fn advanced(self, at: Point, threshold: f64) -> (Self, Point) {
        let travelled = at - self.start;
        let moved = travelled.x.abs() > threshold || travelled.y.abs() > threshold;
        (
            Self {
                last: at,
                has_moved: self.has_moved || moved,
                ..self
            },
            at - self.last,
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: MapState,
    pub effects: Vec<Effect>,
}

impl From<MapState> for Transition {
    fn from(state: MapState) -> Self {
        Self {
            state,
            effects: Vec::new(),
        }
    }
}

/// All interactive state of the map
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MapState {
    pub viewport: ViewportState,
    pub expansion: ExpansionSet,
    pub filter: KindFilter,
    /// Committed area positions: loaded, dragged or arranged
    pub positions: PositionMap,
    pub drag: NodeDrag,
    pub pan: Option<PanGesture>,
    pan_moved: bool,
    control_pressed: bool,
}

impl MapState {
    /// Fresh mount: default view, everything collapsed
    pub fn new(config: &MapConfig, persisted: PositionMap) -> Self {
        Self {
            viewport: ViewportState::reset(&config.viewport),
            positions: persisted,
            ..Default::default()
        }
    }

    pub fn apply(self, event: MapEvent, model: &MapModel) -> Transition {
        let config = &model.config;
        match event {
            MapEvent::PointerDown { target, at } => self.pointer_down(target, at, model).into(),
            MapEvent::PointerMove { at } => self.pointer_move(at, config).into(),
            MapEvent::PointerUp { at } => self.pointer_move(at, config).pointer_up(),
            MapEvent::PointerCancel => self.pointer_up(),
            MapEvent::Wheel { delta_y } => Self {
                viewport: self.viewport.wheeled(delta_y, &config.viewport),
                ..self
            }
            .into(),
            MapEvent::Pan { dx, dy } if self.pan.is_some() => Self {
                viewport: self.viewport.panned(dx, dy),
                ..self
            }
            .into(),
            MapEvent::Pan { .. } => self.into(),
            MapEvent::Click { node_id } => self.click(node_id, model),
            MapEvent::ZoomIn => Self {
                viewport: self.viewport.zoomed(config.viewport.zoom_in_factor, &config.viewport),
                ..self
            }
            .into(),
            MapEvent::ZoomOut => Self {
                viewport: self.viewport.zoomed(config.viewport.zoom_out_factor, &config.viewport),
                ..self
            }
            .into(),
            MapEvent::ResetView => Self {
                viewport: ViewportState::reset(&config.viewport),
                ..self
            }
            .into(),
            MapEvent::Toggle { node_id } => Self {
                expansion: self.expansion.toggled(&node_id),
                ..self
            }
            .into(),
            MapEvent::ExpandAll => Self {
                expansion: ExpansionSet::expanded_all(&model.tree),
                ..self
            }
            .into(),
            MapEvent::CollapseAll => Self {
                expansion: ExpansionSet::collapsed_all(),
                ..self
            }
            .into(),
            MapEvent::ToggleKind(kind) => Self {
                filter: self.filter.toggled(kind),
                ..self
            }
            .into(),
            MapEvent::AutoArrange => self.arranged(model),
        }
    }

    pub fn is_panning(&self) -> bool {
        self.pan.is_some()
    }

    pub fn in_gesture(&self) -> bool {
        self.pan.is_some() || self.drag.is_dragging()
    }

    pub fn dragging_id(&self) -> Option<&str> {
        self.drag.active().map(|a| a.node_id.as_str())
    }

    /// Whether a click should navigate: no gesture in flight and the last
    /// one never crossed the movement threshold
    pub fn allows_click(&self) -> bool {
        self.drag.allows_click()
            && !self.drag.is_dragging()
            && !self.pan_moved
            && self.pan.is_none()
            && !self.control_pressed
    }

    /// Committed positions plus the live position of the area being dragged
    pub fn live_positions(&self) -> PositionMap {
        let mut positions = self.positions.clone();
        if let Some(active) = self.drag.active() {
            positions.insert(active.node_id.clone(), active.current);
        }
        positions
    }

    fn area_position(&self, id: &str, model: &MapModel) -> Point {
        self.positions.get(id).copied().unwrap_or_else(|| model.lane_origin(id))
    }

    fn pointer_down(self, target: PointerTarget, at: Point, model: &MapModel) -> Self {
        if self.drag.is_dragging() || self.pan.is_some() {
            return self;
        }

        match target {
            PointerTarget::Control => Self {
                drag: NodeDrag::default(),
                pan_moved: false,
                control_pressed: true,
                ..self
            },
            PointerTarget::Node(id) if model.is_area(&id) => {
                let origin = self.area_position(&id, model);
                Self {
                    drag: self.drag.start(id, at, origin),
                    pan_moved: false,
                    control_pressed: false,
                    ..self
                }
            }
            _ => Self {
                drag: NodeDrag::default(),
                pan: Some(PanGesture::new(at)),
                pan_moved: false,
                control_pressed: false,
                ..self
            },
        }
    }

    fn pointer_move(self, at: Point, config: &MapConfig) -> Self {
        if self.drag.is_dragging() {
            let zoom = self.viewport.zoom;
            return Self {
                drag: self.drag.moved(at, zoom, &config.drag),
                ..self
            };
        }

        match self.pan {
            Some(pan) => {
                let (pan, delta) = pan.advanced(at, config.drag.threshold);
                Self {
                    viewport: self.viewport.panned(delta.x, delta.y),
                    pan: Some(pan),
                    ..self
                }
            }
            None => self,
        }
    }

    fn pointer_up(self) -> Transition {
        let (drag, outcome) = self.drag.release();
        let mut state = Self {
            drag,
            pan: None,
            pan_moved: self.pan.map_or(self.pan_moved, |p| p.has_moved),
            ..self
        };

        let mut effects = Vec::new();
        if let DragOutcome::Committed(position) = outcome {
            state.positions.insert(position.area_id.clone(), position.point());
            effects.push(Effect::SavePosition(position));
        }
        Transition { state, effects }
    }

    fn click(self, node_id: String, model: &MapModel) -> Transition {
        if !self.allows_click() {
            tracing::debug!(id = %node_id, "click swallowed after drag");
            return self.into();
        }
        match model.kind_of(&node_id) {
            Some(kind) => Transition {
                state: self,
                effects: vec![Effect::Navigate { id: node_id, kind }],
            },
            None => self.into(),
        }
    }

    fn arranged(mut self, model: &MapModel) -> Transition {
        if self.drag.is_dragging() {
            return self.into();
        }

        let batch = auto_arrange(&model.tree, &model.config.arrange);
        if batch.is_empty() {
            return self.into();
        }
        for position in &batch {
            self.positions.insert(position.area_id.clone(), position.point());
        }
        tracing::debug!(areas = batch.len(), "areas auto-arranged");
        Transition {
            state: self,
            effects: vec![Effect::SavePositions(batch)],
        }
    }
}

/// Host-agnostic pointer input. DOM bindings and tests drive the map
/// through this instead of raw events.
pub trait PointerInput {
    /// True while a pan or node drag owns the pointer
    fn in_gesture(&self) -> bool;

    fn on_drag_start(&mut self, target: PointerTarget, at: Point) -> Vec<Effect>;

    fn on_drag_move(&mut self, at: Point) -> Vec<Effect>;

    /// `None` when the gesture was cut short (pointer left, focus lost)
    fn on_drag_end(&mut self, at: Option<Point>) -> Vec<Effect>;

    fn on_wheel(&mut self, delta_y: f64) -> Vec<Effect>;

    fn on_click(&mut self, node_id: &str) -> Vec<Effect>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::ForestData;
    use crate::tree::fixtures::*;

    fn model(data: &ForestData) -> MapModel {
        MapModel::from_forest(data, MapConfig::default())
    }

    fn step(state: MapState, event: MapEvent, model: &MapModel) -> (MapState, Vec<Effect>) {
        let Transition { state, effects } = state.apply(event, model);
        (state, effects)
    }

    fn down(target: PointerTarget, x: f64, y: f64) -> MapEvent {
        MapEvent::PointerDown { target, at: Point::new(x, y) }
    }

    #[test]
    fn test_drag_blocks_pan() {
        let model = model(&two_areas());
        let state = MapState::new(&model.config, PositionMap::new());
        let before = state.viewport;

        let (state, _) = step(state, down(PointerTarget::Node("a1".into()), 0.0, 0.0), &model);
        assert_eq!(state.dragging_id(), Some("a1"));

        // A canvas press and a direct pan while dragging change nothing
        let (state, _) = step(state, down(PointerTarget::Canvas, 10.0, 10.0), &model);
        let (state, _) = step(state, MapEvent::Pan { dx: 40.0, dy: 40.0 }, &model);
        let (state, _) = step(state, MapEvent::PointerMove { at: Point::new(80.0, 0.0) }, &model);
        assert!(!state.is_panning());
        assert_eq!((state.viewport.pan_x, state.viewport.pan_y), (before.pan_x, before.pan_y));
        assert_eq!(state.dragging_id(), Some("a1"));
    }

    #[test]
    fn test_pan_blocks_drag() {
        let model = model(&two_areas());
        let state = MapState::new(&model.config, PositionMap::new());

        let (state, _) = step(state, down(PointerTarget::Canvas, 0.0, 0.0), &model);
        let (state, _) = step(state, down(PointerTarget::Node("a1".into()), 0.0, 0.0), &model);
        assert!(state.dragging_id().is_none());

        let (state, _) = step(state, MapEvent::PointerMove { at: Point::new(30.0, -20.0) }, &model);
        assert_eq!((state.viewport.pan_x, state.viewport.pan_y), (130.0, 80.0));
        assert!(state.live_positions().is_empty());

        let (state, effects) = step(state, MapEvent::PointerUp { at: Point::new(30.0, -20.0) }, &model);
        assert!(effects.is_empty());
        assert!(!state.is_panning());
    }

    #[test]
    fn test_non_area_press_pans() {
        let model = model(&two_areas());
        let state = MapState::new(&model.config, PositionMap::new());
        let (state, _) = step(state, down(PointerTarget::Node("p1".into()), 0.0, 0.0), &model);
        assert!(state.is_panning());
        assert!(state.dragging_id().is_none());
    }

    #[test]
    fn test_live_position_during_drag() {
        let model = model(&two_areas());
        let state = MapState::new(&model.config, PositionMap::new());

        let (state, _) = step(state, down(PointerTarget::Node("a2".into()), 0.0, 0.0), &model);
        let (state, _) = step(state, MapEvent::PointerMove { at: Point::new(40.0, 16.0) }, &model);
        // zoom 0.8 by default: 40 / 0.8 = 50, 16 / 0.8 = 20, from lane slot (400, 0)
        assert_eq!(state.live_positions().get("a2"), Some(&Point::new(450.0, 20.0)));
        assert!(state.positions.is_empty());
    }

    #[test]
    fn test_cancel_commits_like_release() {
        let model = model(&two_areas());
        let state = MapState::new(&model.config, PositionMap::new());

        let (state, _) = step(state, down(PointerTarget::Node("a1".into()), 0.0, 0.0), &model);
        let (state, _) = step(state, MapEvent::PointerMove { at: Point::new(80.0, 0.0) }, &model);
        let (state, effects) = step(state, MapEvent::PointerCancel, &model);

        assert!(state.dragging_id().is_none());
        assert_eq!(state.positions.get("a1"), Some(&Point::new(100.0, 0.0)));
        assert_eq!(effects.len(), 1);
    }

    #[test]
    fn test_click_after_drag_swallowed() {
        let model = model(&two_areas());
        let state = MapState::new(&model.config, PositionMap::new());

        let (state, _) = step(state, down(PointerTarget::Node("a1".into()), 0.0, 0.0), &model);
        let (state, _) = step(state, MapEvent::PointerUp { at: Point::new(0.0, 200.0) }, &model);
        let (state, effects) = step(state, MapEvent::Click { node_id: "a1".into() }, &model);
        assert!(effects.is_empty());

        // A clean press-release on the same node navigates again
        let (state, _) = step(state, down(PointerTarget::Node("a1".into()), 5.0, 5.0), &model);
        let (state, _) = step(state, MapEvent::PointerUp { at: Point::new(5.0, 5.0) }, &model);
        let (_, effects) = step(state, MapEvent::Click { node_id: "a1".into() }, &model);
        assert_eq!(effects, vec![Effect::Navigate { id: "a1".into(), kind: NodeKind::Area }]);
    }

    #[test]
    fn test_click_after_pan_swallowed() {
        let model = model(&two_areas());
        let state = MapState::new(&model.config, PositionMap::new());

        let (state, _) = step(state, down(PointerTarget::Node("p1".into()), 0.0, 0.0), &model);
        let (state, _) = step(state, MapEvent::PointerUp { at: Point::new(60.0, 0.0) }, &model);
        let (_, effects) = step(state, MapEvent::Click { node_id: "p1".into() }, &model);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_press_on_control_never_navigates() {
        let model = model(&two_areas());
        let state = MapState::new(&model.config, PositionMap::new());

        // Pressing the delete confirmation inside a card: no drag, no pan, no navigation
        let (state, _) = step(state, down(PointerTarget::Control, 10.0, 10.0), &model);
        assert!(!state.in_gesture());
        let (state, effects) = step(state, MapEvent::PointerUp { at: Point::new(10.0, 10.0) }, &model);
        assert!(effects.is_empty());
        let (state, effects) = step(state, MapEvent::Click { node_id: "a1".into() }, &model);
        assert!(effects.is_empty());
        assert!(state.positions.is_empty());

        // The next press on the card itself clears it
        let (state, _) = step(state, down(PointerTarget::Node("p1".into()), 0.0, 0.0), &model);
        let (state, _) = step(state, MapEvent::PointerUp { at: Point::new(0.0, 0.0) }, &model);
        let (_, effects) = step(state, MapEvent::Click { node_id: "p1".into() }, &model);
        assert_eq!(effects, vec![Effect::Navigate { id: "p1".into(), kind: NodeKind::Project }]);
    }

    #[test]
    fn test_auto_arrange_overwrites_and_batches() {
        let model = model(&two_areas());
        let mut persisted = PositionMap::new();
        persisted.insert("a1".to_string(), Point::new(-500.0, 900.0));
        let state = MapState::new(&model.config, persisted);

        let (state, effects) = step(state, MapEvent::AutoArrange, &model);
        assert_eq!(state.positions.get("a1"), Some(&Point::new(0.0, 0.0)));
        assert_eq!(state.positions.get("a2"), Some(&Point::new(280.0, 0.0)));
        match effects.as_slice() {
            [Effect::SavePositions(batch)] => assert_eq!(batch.len(), 2),
            other => panic!("unexpected effects: {:?}", other),
        }
    }

    #[test]
    fn test_toolbar_events() {
        let model = model(&two_areas());
        let state = MapState::new(&model.config, PositionMap::new());

        let (state, _) = step(state, MapEvent::ExpandAll, &model);
        assert_eq!(state.expansion.len(), 9);
        let (state, _) = step(state, MapEvent::CollapseAll, &model);
        assert!(state.expansion.is_empty());

        let (state, _) = step(state, MapEvent::ZoomIn, &model);
        assert!((state.viewport.zoom - 0.88).abs() < 1e-9);
        let (state, _) = step(state, MapEvent::ResetView, &model);
        assert_eq!(state.viewport, ViewportState::default());

        let (state, _) = step(state, MapEvent::ToggleKind(NodeKind::Task), &model);
        assert!(!state.filter.tasks);
    }
}
