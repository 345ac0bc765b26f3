use super::Controls;
use sphere_core::{action_for_key, KeyAction};
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn handle_keydown(ev: &web::KeyboardEvent, controls: &Controls) {
    if ev.repeat() || ev.ctrl_key() || ev.meta_key() || ev.alt_key() {
        return;
    }
    let key = ev.key();
    let Some(action) = action_for_key(&key) else {
        return;
    };
    log::debug!("[keys] {key:?} -> {action:?}");
    // Space and Enter would otherwise also click whichever button has focus.
    if matches!(action, KeyAction::Start) {
        ev.prevent_default();
    }
    controls.trigger(action);
}

pub fn wire_keydown(controls: Controls) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_keydown(&ev, &controls);
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
