//! Leptos Pointer Bindings
//!
//! Feeds mouse and wheel events into a `PointerInput` session held in a signal.
//! Movement thresholds and gesture ownership live in the session; this crate
//! only translates DOM events and forwards the resulting effects.

use leptos::prelude::*;
use map_engine::{Effect, Point, PointerInput, PointerTarget};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

/// Session signal plus the sink for effects it produces
pub struct PointerBinding<S: 'static> {
    pub session: RwSignal<S>,
    pub on_effects: Callback<Vec<Effect>>,
}

impl<S: 'static> Clone for PointerBinding<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: 'static> Copy for PointerBinding<S> {}

impl<S> PointerBinding<S>
where
    S: PointerInput + Send + Sync + 'static,
{
    pub fn new(session: RwSignal<S>, on_effects: Callback<Vec<Effect>>) -> Self {
        Self { session, on_effects }
    }

    fn in_gesture(self) -> bool {
        self.session.try_with_untracked(|s| s.in_gesture()).unwrap_or(false)
    }

    fn dispatch(self, f: impl FnOnce(&mut S) -> Vec<Effect>) {
        let effects = self.session.try_update(f).unwrap_or_default();
        if !effects.is_empty() {
            self.on_effects.run(effects);
        }
    }
}

fn pointer_at(ev: &web_sys::MouseEvent) -> Point {
    Point::new(ev.client_x() as f64, ev.client_y() as f64)
}

/// Anything matching this, or nested inside it, is a control rather than the card
pub const CONTROL_SELECTOR: &str = "button, input, .delete-confirm";

fn is_control(ev: &web_sys::MouseEvent) -> bool {
    ev.target()
        .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
        .and_then(|el| el.closest(CONTROL_SELECTOR).ok().flatten())
        .is_some()
}

/// Mousedown on a node card. Areas start a drag, other nodes pan.
pub fn make_on_node_mousedown<S>(binding: PointerBinding<S>, node_id: String) -> impl Fn(web_sys::MouseEvent) + Clone + 'static
where
    S: PointerInput + Send + Sync + 'static,
{
    move |ev: web_sys::MouseEvent| {
        if ev.button() != 0 {
            return;
        }
        // Controls inside a node neither drag nor pan, and their click must not navigate
        if is_control(&ev) {
            ev.stop_propagation();
            binding.dispatch(|s| s.on_drag_start(PointerTarget::Control, pointer_at(&ev)));
            return;
        }
        ev.stop_propagation();
        ev.prevent_default();
        let target = PointerTarget::Node(node_id.clone());
        binding.dispatch(|s| s.on_drag_start(target, pointer_at(&ev)));
    }
}

/// Mousedown on empty canvas starts a pan
pub fn make_on_canvas_mousedown<S>(binding: PointerBinding<S>) -> impl Fn(web_sys::MouseEvent) + Copy + 'static
where
    S: PointerInput + Send + Sync + 'static,
{
    move |ev: web_sys::MouseEvent| {
        if ev.button() != 0 {
            return;
        }
        ev.prevent_default();
        binding.dispatch(|s| s.on_drag_start(PointerTarget::Canvas, pointer_at(&ev)));
    }
}

/// Leaving the canvas ends whatever gesture is in progress
pub fn make_on_canvas_mouseleave<S>(binding: PointerBinding<S>) -> impl Fn(web_sys::MouseEvent) + Copy + 'static
where
    S: PointerInput + Send + Sync + 'static,
{
    move |_ev: web_sys::MouseEvent| {
        if binding.in_gesture() {
            binding.dispatch(|s| s.on_drag_end(None));
        }
    }
}

pub fn make_on_wheel<S>(binding: PointerBinding<S>) -> impl Fn(web_sys::WheelEvent) + Copy + 'static
where
    S: PointerInput + Send + Sync + 'static,
{
    move |ev: web_sys::WheelEvent| {
        ev.prevent_default();
        let delta_y = ev.delta_y();
        binding.dispatch(|s| s.on_wheel(delta_y));
    }
}

/// Click on a node card; swallowed by the session right after a drag
pub fn make_on_node_click<S>(binding: PointerBinding<S>, node_id: String) -> impl Fn(web_sys::MouseEvent) + Clone + 'static
where
    S: PointerInput + Send + Sync + 'static,
{
    move |ev: web_sys::MouseEvent| {
        ev.stop_propagation();
        if is_control(&ev) {
            return;
        }
        binding.dispatch(|s| s.on_click(&node_id));
    }
}

/// Bind document mousemove/mouseup and window blur.
/// Call once per page; the listeners live as long as the page does.
pub fn bind_global_pointer<S>(binding: PointerBinding<S>)
where
    S: PointerInput + Send + Sync + 'static,
{
    let Some(win) = web_sys::window() else {
        return;
    };

    // Idle pointer traffic must not touch the signal
    let on_mousemove = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        if binding.in_gesture() {
            binding.dispatch(|s| s.on_drag_move(pointer_at(&ev)));
        }
    });
    let on_mouseup = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        if binding.in_gesture() {
            binding.dispatch(|s| s.on_drag_end(Some(pointer_at(&ev))));
        }
    });
    let on_blur = Closure::<dyn FnMut(web_sys::Event)>::new(move |_ev: web_sys::Event| {
        if binding.in_gesture() {
            binding.dispatch(|s| s.on_drag_end(None));
        }
    });

    if let Some(doc) = win.document() {
        let _ = doc.add_event_listener_with_callback("mousemove", on_mousemove.as_ref().unchecked_ref());
        let _ = doc.add_event_listener_with_callback("mouseup", on_mouseup.as_ref().unchecked_ref());
    }
    let _ = win.add_event_listener_with_callback("blur", on_blur.as_ref().unchecked_ref());

    on_mousemove.forget();
    on_mouseup.forget();
    on_blur.forget();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_selector_covers_card_controls() {
        let selectors: Vec<&str> = CONTROL_SELECTOR.split(", ").collect();
        for expected in ["button", "input", ".delete-confirm"] {
            assert!(selectors.contains(&expected), "missing {}", expected);
        }
    }
}
