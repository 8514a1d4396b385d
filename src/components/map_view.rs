//! Map View Component
//!
//! The pannable, zoomable canvas: one transformed layer holding the
//! connection curves and the visible node cards.

use leptos::prelude::*;
use leptos_pointer::{make_on_canvas_mousedown, make_on_canvas_mouseleave, make_on_wheel};

use crate::components::{ConnectionLayer, MapNode, MapToolbar};
use crate::context::use_map_context;

#[component]
pub fn MapView() -> impl IntoView {
    let ctx = use_map_context();
    let session = ctx.session;
    let pointer = ctx.pointer;

    let nodes = Memo::new(move |_| session.with(|s| s.visible_positions()));
    let edges = Memo::new(move |_| session.with(|s| s.edges()));
    let transform = move || {
        format!(
            "transform: {}; transform-origin: 0 0;",
            session.with(|s| s.state.viewport.transform())
        )
    };
    let canvas_class = move || {
        if session.with(|s| s.state.is_panning()) {
            "map-canvas panning"
        } else {
            "map-canvas"
        }
    };

    view! {
        <div class="map-root">
            <MapToolbar />
            <div
                class=canvas_class
                on:mousedown=make_on_canvas_mousedown(pointer)
                on:mouseleave=make_on_canvas_mouseleave(pointer)
                on:wheel=make_on_wheel(pointer)
            >
                <div class="map-world" style=transform>
                    <ConnectionLayer edges=edges />
                    <For
                        each=move || nodes.get()
                        // Position is read live inside the card, so it stays out of the key
                        key=|p| (p.id.clone(), p.node.child_count, p.node.name.clone())
                        children=move |p| view! { <MapNode position=p nodes=nodes /> }
                    />
                </div>
            </div>
        </div>
    }
}
