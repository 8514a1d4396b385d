//! Area Map Frontend App
//!
//! Loads the forest and saved positions, then hands the session to the map.
//! Effects coming out of the session are executed here.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_pointer::bind_global_pointer;
use map_engine::{load_session, node_count, persist_effects, Effect as MapEffect, MapSession};
use reactive_stores::Store;

use crate::commands::{self, TauriBackend};
use crate::components::{ErrorState, MapView};
use crate::context::MapContext;
use crate::models::{detail_route, LoadState};
use crate::store::{store_add_save_failures, store_set_failed, store_set_loading, store_set_ready, AppState, AppStateStoreFields, AppStore};

#[component]
pub fn App() -> impl IntoView {
    // State
    let store: AppStore = Store::new(AppState::new());
    let (reload_trigger, set_reload_trigger) = signal(0u32);
    let session = RwSignal::new(MapSession::default());
    let on_effects = Callback::new(move |effects: Vec<MapEffect>| run_effects(store, effects));

    // Provide context to all children
    provide_context(store);
    let ctx = MapContext::new((reload_trigger, set_reload_trigger), session, on_effects);
    provide_context(ctx);

    // Pointer listeners outlive reloads, so bind them once here
    bind_global_pointer(ctx.pointer);

    // Rebuild the whole session whenever the trigger changes
    Effect::new(move |_| {
        let trigger = reload_trigger.get();
        web_sys::console::log_1(&format!("[MAP] Loading map, trigger={}", trigger).into());
        store_set_loading(&store);
        spawn_local(async move {
            let config = match commands::load_map_config().await {
                Ok(config) => config,
                Err(e) => {
                    web_sys::console::log_1(&format!("[MAP] Using default config: {}", e).into());
                    Default::default()
                }
            };
            let backend = TauriBackend;
            match load_session(&backend, &backend, config).await {
                Ok(loaded) => {
                    let count = node_count(&loaded.model.tree);
                    web_sys::console::log_1(&format!("[MAP] Loaded {} nodes", count).into());
                    session.set(loaded);
                    store_set_ready(&store, count);
                }
                Err(e) => {
                    web_sys::console::log_1(&format!("[MAP] Load failed: {}", e).into());
                    store_set_failed(&store, e.to_string());
                }
            }
        });
    });

    view! {
        <div class="app-layout">
            {move || match store.load_state().get() {
                LoadState::Loading => view! { <p class="map-loading">"Loading map…"</p> }.into_any(),
                LoadState::Failed(message) => view! { <ErrorState message=message /> }.into_any(),
                LoadState::Ready => view! { <MapView /> }.into_any(),
            }}
        </div>
    }
}

/// Navigation happens right away; saves go out in the order they were produced
fn run_effects(store: AppStore, effects: Vec<MapEffect>) {
    for effect in &effects {
        if let MapEffect::Navigate { id, kind } = effect {
            navigate_to(&detail_route(id, *kind));
        }
    }

    if !has_saves(&effects) {
        return;
    }
    spawn_local(async move {
        let failures = persist_effects(&TauriBackend, &effects).await;
        if failures > 0 {
            web_sys::console::log_1(&format!("[MAP] {} position save(s) failed", failures).into());
            store_add_save_failures(&store, failures);
        }
    });
}

fn has_saves(effects: &[MapEffect]) -> bool {
    effects.iter().any(|e| !matches!(e, MapEffect::Navigate { .. }))
}

fn navigate_to(route: &str) {
    if let Some(win) = web_sys::window() {
        let _ = win.location().set_hash(route);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use map_engine::{NodeKind, PersistedPosition};

    #[test]
    fn test_navigate_only_effects_have_no_saves() {
        let effects = vec![MapEffect::Navigate { id: "p1".to_string(), kind: NodeKind::Project }];
        assert!(!has_saves(&effects));
        assert!(!has_saves(&[]));
    }

    #[test]
    fn test_drag_commit_has_saves() {
        let save = MapEffect::SavePosition(PersistedPosition { area_id: "a1".to_string(), x: 25.0, y: 0.0 });
        assert!(has_saves(&[save]));
    }

    #[test]
    fn test_detail_route_uses_plural_kind() {
        assert_eq!(detail_route("p1", NodeKind::Project), "/projects/p1");
        assert_eq!(detail_route("b7", NodeKind::Bug), "/bugs/b7");
    }
}
