use std::cell::RefCell;
use std::rc::Rc;

use decal_core::{App, EventOutcome, InputEvent};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::dom;

/// Pixels of wheel travel that count as one zoom step.
const WHEEL_PIXELS_PER_STEP: f32 = 100.0;

pub fn wire_input_handlers(canvas: &web::HtmlCanvasElement, app: &Rc<RefCell<App>>) {
    wire_pointerdown(canvas, app);
    wire_pointermove(canvas, app);
    wire_pointerup(canvas, app);
    wire_wheel(canvas, app);
    wire_resize(canvas, app);
}

fn wire_pointerdown(canvas: &web::HtmlCanvasElement, app: &Rc<RefCell<App>>) {
    let app = app.clone();
    let canvas_c = canvas.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        if !ev.is_primary() {
            return;
        }
        let position = dom::pointer_canvas_px(&ev, &canvas_c);
        app.borrow_mut().handle(InputEvent::PointerDown { position });
        _ = canvas_c.set_pointer_capture(ev.pointer_id());
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointermove(canvas: &web::HtmlCanvasElement, app: &Rc<RefCell<App>>) {
    let app = app.clone();
    let canvas_c = canvas.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let position = dom::pointer_canvas_px(&ev, &canvas_c);
        app.borrow_mut().handle(InputEvent::PointerMove {
            position,
            primary: ev.is_primary(),
        });
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerup(canvas: &web::HtmlCanvasElement, app: &Rc<RefCell<App>>) {
    let app = app.clone();
    let canvas_c = canvas.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        if !ev.is_primary() {
            return;
        }
        let position = dom::pointer_canvas_px(&ev, &canvas_c);
        let outcome = app.borrow_mut().handle(InputEvent::PointerUp { position });
        if let EventOutcome::DecalPlaced { render_order } = outcome {
            log::info!("[click] decal {render_order} at ({:.0}, {:.0})", position.x, position.y);
        }
        _ = canvas_c.release_pointer_capture(ev.pointer_id());
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_wheel(canvas: &web::HtmlCanvasElement, app: &Rc<RefCell<App>>) {
    let app = app.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        // wheel up (negative delta) zooms in
        let steps = -(ev.delta_y() as f32) / WHEEL_PIXELS_PER_STEP;
        app.borrow_mut().zoom_camera(steps);
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_resize(canvas: &web::HtmlCanvasElement, app: &Rc<RefCell<App>>) {
    let app = app.clone();
    let canvas_c = canvas.clone();
    let closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_c);
        app.borrow_mut().handle(InputEvent::Resize {
            width: canvas_c.width(),
            height: canvas_c.height(),
        });
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
