use crate::core::{mesh_transform, pick_mesh, screen_ray};
use crate::input::{self, DragMode};
use crate::state::AppState;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

// Wheel step applied per notch when zoom is enabled
const ZOOM_STEP: f32 = 0.95;

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub app: Rc<RefCell<AppState>>,
    pub pointer: Rc<RefCell<input::PointerState>>,
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_pointerdown(&w);
    wire_pointermove(&w);
    wire_pointerup(&w);
    wire_wheel(&w);
    wire_contextmenu(&w);
}

fn wire_pointerdown(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let Some(mode) =
            input::drag_mode_for(ev.button(), ev.shift_key(), ev.ctrl_key(), ev.meta_key())
        else {
            return;
        };
        let pos = input::pointer_css_px(&ev, &w.canvas);
        w.pointer
            .borrow_mut()
            .begin(ev.pointer_id(), ev.button(), pos, mode);
        _ = w.canvas.set_pointer_capture(ev.pointer_id());
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointermove(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let pos = input::pointer_css_px(&ev, &w.canvas);
        let Some((mode, delta)) = w.pointer.borrow_mut().move_to(ev.pointer_id(), pos) else {
            return;
        };
        let height = input::canvas_css_size(&w.canvas).y;
        let mut app = w.app.borrow_mut();
        match mode {
            DragMode::Rotate => app.orbit.rotate_by_pixels(delta.x, delta.y, height),
            DragMode::Pan => app.orbit.pan_by_pixels(delta.x, delta.y, height),
        }
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerup(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let pos = input::pointer_css_px(&ev, &w.canvas);
        let Some(release) = w.pointer.borrow_mut().end(ev.pointer_id(), pos) else {
            return;
        };
        _ = w.canvas.release_pointer_capture(ev.pointer_id());
        if ev.type_() == "pointerup" && release.is_primary_click() {
            click_mesh(&w, release.up_at);
        }
    }) as Box<dyn FnMut(_)>);
    for event in ["pointerup", "pointercancel"] {
        _ = canvas_for_listener
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

/// Toggles auto-rotation when the click lands on the mesh.
fn click_mesh(w: &InputWiring, at: glam::Vec2) {
    let size = input::canvas_css_size(&w.canvas);
    let mut app = w.app.borrow_mut();
    let hit = {
        let Some(mesh) = app.geometry.mesh() else {
            return;
        };
        let aspect = size.x / size.y.max(1.0);
        let ray = screen_ray(
            app.orbit.view_matrix(),
            app.orbit.projection_matrix(aspect),
            at.x,
            at.y,
            size.x,
            size.y,
        );
        let mesh_view = &app.view.mesh;
        let model = mesh_transform(mesh_view.rotation_y(), mesh_view.scale());
        pick_mesh(&ray, model, mesh)
    };
    if hit.is_some() {
        app.view.mesh.toggle_auto_rotate();
    }
}

fn wire_wheel(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        let dy = ev.delta_y() as f32;
        if dy == 0.0 {
            return;
        }
        let scale = if dy > 0.0 { 1.0 / ZOOM_STEP } else { ZOOM_STEP };
        // page scroll passes through while zoom is disabled
        if w.app.borrow_mut().orbit.zoom(scale) {
            ev.prevent_default();
        }
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_contextmenu(w: &InputWiring) {
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::Event| {
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = w
        .canvas
        .add_event_listener_with_callback("contextmenu", closure.as_ref().unchecked_ref());
    closure.forget();
}
