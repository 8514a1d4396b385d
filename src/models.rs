//! Frontend Models
//!
//! Load lifecycle and routing helpers around the map engine types.

use map_engine::NodeKind;

/// Where the map is in its fetch cycle
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadState {
    #[default]
    Loading,
    Ready,
    /// Fetch failed; nothing but the error screen is rendered
    Failed(String),
}

/// Hash route of a node's detail page, e.g. `/projects/p1`
pub fn detail_route(id: &str, kind: NodeKind) -> String {
    format!("/{}s/{}", kind.as_str(), id)
}
