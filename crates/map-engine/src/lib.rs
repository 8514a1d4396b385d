//! Map Engine
//!
//! Host-agnostic core of the area map:
//! - tree: flat area/project/item records -> three-level forest
//! - layout: deterministic lane layout with persisted area overrides
//! - visibility: expansion set and kind filter
//! - viewport / drag / interaction: pan, zoom and area dragging as pure transitions
//! - connections: parent -> child connector curves
//! - persistence / source / session: boundary traits and the load flow
//! - wire: host command names and argument payloads

mod config;
mod connections;
mod drag;
mod error;
mod geometry;
mod interaction;
mod layout;
mod persistence;
mod records;
mod session;
mod source;
mod tree;
mod viewport;
mod visibility;
pub mod wire;

pub use config::MapConfig;
pub use connections::{connections, Edge, NodeSizes, Size};
pub use drag::{auto_arrange, ActiveDrag, ArrangeConfig, DragConfig, DragOutcome, NodeDrag};
pub use error::{MapError, MapResult};
pub use geometry::Point;
pub use interaction::{Effect, MapEvent, MapState, PanGesture, PointerInput, PointerTarget, Transition};
pub use layout::{layout, LayoutConfig, NodeInfo, NodePosition, PositionMap};
pub use persistence::{persist_effects, MemoryPositionStore, PersistedPosition, PositionStore};
pub use records::{AreaRecord, ForestData, ItemRecord, ProjectRecord};
pub use session::{load_session, MapModel, MapSession};
pub use source::ForestSource;
pub use tree::{build, build_forest, check_levels, collect_ids, find_node, node_count, NodeKind, SourceRef, TreeNode, MAX_LEVEL};
pub use viewport::{ViewportConfig, ViewportState};
pub use visibility::{visible, visible_filtered, ExpansionSet, KindFilter};
