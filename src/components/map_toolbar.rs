//! Map Toolbar Component
//!
//! Zoom, reset, expand/collapse, auto-arrange and item kind filters.

use leptos::prelude::*;
use map_engine::{MapEvent, NodeKind};

use crate::context::use_map_context;
use crate::store::{use_app_store, AppStateStoreFields};

const FILTER_KINDS: [(NodeKind, &str); 3] = [
    (NodeKind::Task, "Tasks"),
    (NodeKind::Bug, "Bugs"),
    (NodeKind::Feature, "Features"),
];

#[component]
pub fn MapToolbar() -> impl IntoView {
    let ctx = use_map_context();
    let store = use_app_store();
    let session = ctx.session;

    let zoom_label = move || format!("{}%", session.with(|s| s.state.viewport.zoom_percent()));
    let arrange_disabled = move || session.with(|s| s.model.tree.is_empty());

    view! {
        <div class="map-toolbar">
            <div class="map-toolbar-group">
                <button class="toolbar-btn" title="Zoom out" on:click=move |_| ctx.dispatch(MapEvent::ZoomOut)>"−"</button>
                <span class="zoom-label">{zoom_label}</span>
                <button class="toolbar-btn" title="Zoom in" on:click=move |_| ctx.dispatch(MapEvent::ZoomIn)>"+"</button>
                <button class="toolbar-btn" title="Reset view" on:click=move |_| ctx.dispatch(MapEvent::ResetView)>"⟲"</button>
            </div>

            <div class="map-toolbar-group">
                <button class="toolbar-btn" on:click=move |_| ctx.dispatch(MapEvent::ExpandAll)>"Expand all"</button>
                <button class="toolbar-btn" on:click=move |_| ctx.dispatch(MapEvent::CollapseAll)>"Collapse all"</button>
                <button
                    class="toolbar-btn"
                    title="Place areas side by side and save"
                    disabled=arrange_disabled
                    on:click=move |_| ctx.dispatch(MapEvent::AutoArrange)
                >
                    "Auto-arrange"
                </button>
            </div>

            <div class="map-toolbar-group kind-filter">
                {FILTER_KINDS
                    .into_iter()
                    .map(|(kind, label)| {
                        let shown = move || session.with(|s| s.state.filter.shows(kind));
                        view! {
                            <button
                                class=move || if shown() { "filter-chip active" } else { "filter-chip" }
                                on:click=move |_| ctx.dispatch(MapEvent::ToggleKind(kind))
                            >
                                {label}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>

            <span class="node-count">{move || format!("{} nodes", store.node_count().get())}</span>
            <Show when=move || { store.save_failures().get() > 0 }>
                <span class="save-warning" title="Positions are kept on screen but were not stored">
                    {move || format!("{} unsaved", store.save_failures().get())}
                </span>
            </Show>
        </div>
    }
}
