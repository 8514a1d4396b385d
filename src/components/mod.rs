//! UI Components
//!
//! Reusable Leptos components.

mod map_view;
mod map_node;
mod connection_layer;
mod map_toolbar;
mod error_state;
mod delete_confirm_button;

pub use map_view::MapView;
pub use map_node::MapNode;
pub use connection_layer::ConnectionLayer;
pub use map_toolbar::MapToolbar;
pub use error_state::ErrorState;
pub use delete_confirm_button::DeleteConfirmButton;
