//! Error State Component
//!
//! Shown instead of the map when the forest could not be fetched.

use leptos::prelude::*;

#[component]
pub fn ErrorState(#[prop(into)] message: String) -> impl IntoView {
    let go_back = move |_| {
        if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
            let _ = history.back();
        }
    };

    view! {
        <div class="map-error">
            <h2>"Couldn't load the map"</h2>
            <p class="map-error-message">{message}</p>
            <button class="map-error-back" on:click=go_back>"Go back"</button>
        </div>
    }
}
