//! Connection Layer Component
//!
//! SVG curves between visible parents and children, drawn in layout space
//! underneath the node cards.

use leptos::prelude::*;
use map_engine::Edge;

#[component]
pub fn ConnectionLayer(edges: Memo<Vec<Edge>>) -> impl IntoView {
    view! {
        <svg class="map-connections" width="1" height="1" style="position: absolute; left: 0; top: 0; overflow: visible; pointer-events: none;">
            <For
                each=move || edges.get()
                key=|edge| edge.path()
                children=move |edge| {
                    view! {
                        <path
                            class="map-edge"
                            d=edge.path()
                            fill="none"
                            stroke="#9aa5b1"
                            stroke-width="2"
                        />
                    }
                }
            />
        </svg>
    }
}
