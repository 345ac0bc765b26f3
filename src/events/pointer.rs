use crate::constants::{WHEEL_LINE_PX, WHEEL_PAGE_PX};
use sphere_core::OrbitCamera;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Default, Clone, Copy)]
struct DragState {
    active: bool,
    pointer_id: i32,
    last_x: f32,
    last_y: f32,
}

/// Drag to orbit, wheel to zoom. The camera eases towards the input in the
/// frame loop via `OrbitCamera::update`.
pub fn wire_orbit_controls(canvas: &web::HtmlCanvasElement, orbit: Rc<RefCell<OrbitCamera>>) {
    let drag = Rc::new(RefCell::new(DragState::default()));
    wire_pointerdown(canvas, drag.clone());
    wire_pointermove(orbit.clone(), drag.clone());
    wire_pointerup(drag);
    wire_wheel(canvas, orbit);
}

fn wire_pointerdown(canvas: &web::HtmlCanvasElement, drag: Rc<RefCell<DragState>>) {
    let canvas_for_capture = canvas.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        *drag.borrow_mut() = DragState {
            active: true,
            pointer_id: ev.pointer_id(),
            last_x: ev.client_x() as f32,
            last_y: ev.client_y() as f32,
        };
        _ = canvas_for_capture.set_pointer_capture(ev.pointer_id());
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointermove(orbit: Rc<RefCell<OrbitCamera>>, drag: Rc<RefCell<DragState>>) {
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let mut ds = drag.borrow_mut();
        if !ds.active || ds.pointer_id != ev.pointer_id() {
            return;
        }
        let (x, y) = (ev.client_x() as f32, ev.client_y() as f32);
        orbit.borrow_mut().drag(x - ds.last_x, y - ds.last_y);
        ds.last_x = x;
        ds.last_y = y;
    }) as Box<dyn FnMut(_)>);
    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_pointerup(drag: Rc<RefCell<DragState>>) {
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let mut ds = drag.borrow_mut();
        if ds.pointer_id == ev.pointer_id() {
            ds.active = false;
        }
    }) as Box<dyn FnMut(_)>);
    if let Some(wnd) = web::window() {
        for name in ["pointerup", "pointercancel"] {
            _ = wnd.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
        }
    }
    closure.forget();
}

fn wire_wheel(canvas: &web::HtmlCanvasElement, orbit: Rc<RefCell<OrbitCamera>>) {
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        let scale = match ev.delta_mode() {
            web::WheelEvent::DOM_DELTA_LINE => WHEEL_LINE_PX,
            web::WheelEvent::DOM_DELTA_PAGE => WHEEL_PAGE_PX,
            _ => 1.0,
        };
        orbit.borrow_mut().zoom(ev.delta_y() as f32 * scale);
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
    closure.forget();
}
