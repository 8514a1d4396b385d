//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;
use crate::models::LoadState;

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Current fetch lifecycle
    pub load_state: LoadState,
    /// Nodes in the last successfully built forest
    pub node_count: usize,
    /// Failed position writes since the page loaded
    pub save_failures: usize,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

pub fn store_set_loading(store: &AppStore) {
    store.load_state().set(LoadState::Loading);
}

pub fn store_set_ready(store: &AppStore, node_count: usize) {
    store.node_count().set(node_count);
    store.load_state().set(LoadState::Ready);
}

pub fn store_set_failed(store: &AppStore, message: String) {
    store.load_state().set(LoadState::Failed(message));
}

pub fn store_add_save_failures(store: &AppStore, failures: usize) {
    store.save_failures().update(|n| *n += failures);
}
