//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;
use leptos_pointer::PointerBinding;
use map_engine::{Effect as MapEffect, MapEvent, MapSession};

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct MapContext {
    /// Trigger to refetch the forest - read
    pub reload_trigger: ReadSignal<u32>,
    /// Trigger to refetch the forest - write
    set_reload_trigger: WriteSignal<u32>,
    /// Current map session (model + interactive state)
    pub session: RwSignal<MapSession>,
    /// Pointer wiring into the session
    pub pointer: PointerBinding<MapSession>,
}

impl MapContext {
    pub fn new(
        reload_trigger: (ReadSignal<u32>, WriteSignal<u32>),
        session: RwSignal<MapSession>,
        on_effects: Callback<Vec<MapEffect>>,
    ) -> Self {
        Self {
            reload_trigger: reload_trigger.0,
            set_reload_trigger: reload_trigger.1,
            session,
            pointer: PointerBinding::new(session, on_effects),
        }
    }

    /// Refetch everything and rebuild the session
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }

    /// Apply a non-pointer event (toolbar, expand toggle) and run its effects
    pub fn dispatch(&self, event: MapEvent) {
        let effects = self.session.try_update(|s| s.apply(event)).unwrap_or_default();
        if !effects.is_empty() {
            self.pointer.on_effects.run(effects);
        }
    }
}

pub fn use_map_context() -> MapContext {
    expect_context::<MapContext>()
}
