//! Map Node Component
//!
//! One card on the canvas. Areas can be dragged; every card navigates on click
//! unless the press turned into a drag.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_pointer::{make_on_node_click, make_on_node_mousedown};
use map_engine::{ForestSource, MapEvent, NodePosition};

use crate::commands::TauriBackend;
use crate::components::DeleteConfirmButton;
use crate::context::use_map_context;

#[component]
pub fn MapNode(position: NodePosition, nodes: Memo<Vec<NodePosition>>) -> impl IntoView {
    let ctx = use_map_context();
    let session = ctx.session;
    let pointer = ctx.pointer;

    let info = position.node.clone();
    let id = position.id.clone();
    let kind = info.kind;
    let size = session.with_untracked(|s| s.model.config.sizes.for_level(info.level));

    // Live position, follows the drag
    let initial = position.point();
    let point = {
        let id = id.clone();
        Memo::new(move |_| {
            nodes.with(|all| all.iter().find(|p| p.id == id).map(NodePosition::point).unwrap_or(initial))
        })
    };
    let dragging = {
        let id = id.clone();
        move || session.with(|s| s.state.dragging_id() == Some(id.as_str()))
    };
    let expanded = {
        let id = id.clone();
        move || session.with(|s| s.is_expanded(&id))
    };

    let class = move || {
        let mut class = format!("map-node map-node-{}", kind.as_str());
        if dragging() {
            class.push_str(" dragging");
        }
        class
    };
    let accent = info.color.clone().unwrap_or_else(|| "#9aa5b1".to_string());
    let style = move || {
        let p = point.get();
        format!(
            "position: absolute; left: {}px; top: {}px; width: {}px; height: {}px; border-left-color: {};",
            p.x, p.y, size.width, size.height, accent
        )
    };

    let on_delete = {
        let id = id.clone();
        let name = info.name.clone();
        Callback::new(move |_: ()| {
            let id = id.clone();
            let name = name.clone();
            spawn_local(async move {
                match TauriBackend.delete_record(&id, kind).await {
                    Ok(()) => {
                        web_sys::console::log_1(&format!("[MAP] Deleted {} {}", kind.as_str(), id).into());
                        ctx.reload();
                    }
                    Err(e) => {
                        web_sys::console::log_1(&format!("[MAP] Delete failed: {}", e).into());
                        if let Some(win) = web_sys::window() {
                            let _ = win.alert_with_message(&format!("Could not delete \"{}\": {}", name, e));
                        }
                    }
                }
            });
        })
    };

    let toggle = {
        let id = id.clone();
        move |ev: web_sys::MouseEvent| {
            ev.stop_propagation();
            ctx.dispatch(MapEvent::Toggle { node_id: id.clone() });
        }
    };

    let badge = (info.descendant_count > 0).then(|| {
        let noun = if info.descendant_count == 1 { "item" } else { "items" };
        view! { <span class="map-node-badge">{format!("{} {}", info.descendant_count, noun)}</span> }
    });
    let toggle_button = (info.child_count > 0).then(|| {
        view! {
            <button class="map-node-toggle" on:click=toggle>
                {move || if expanded() { "▼" } else { "▶" }}
            </button>
        }
    });

    view! {
        <div
            class=class
            style=style
            on:mousedown=make_on_node_mousedown(pointer, id.clone())
            on:click=make_on_node_click(pointer, id.clone())
        >
            <div class="map-node-header">
                {info.icon.clone().map(|icon| view! { <span class="map-node-icon">{icon}</span> })}
                <span class="map-node-name">{info.name.clone()}</span>
                <DeleteConfirmButton
                    button_class="map-node-delete"
                    title=format!("Delete {}", info.name)
                    on_confirm=on_delete
                />
            </div>
            <div class="map-node-meta">
                <span class="map-node-kind">{kind.as_str()}</span>
                {info.priority.clone().map(|p| view! { <span class="map-node-priority">{p}</span> })}
                {badge}
                {toggle_button}
            </div>
        </div>
    }
}
