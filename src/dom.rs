use std::cell::RefCell;
use std::rc::Rc;

use decal_core::panel::{ControlKind, PANEL_CONTROLS};
use decal_core::{App, PanelEvent};
use glam::Vec2;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub const CANVAS_ID: &str = "app-canvas";
pub const PANEL_ID: &str = "panel";
pub const STATS_ID: &str = "stats";

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

/// Pointer position in canvas backing pixels, origin top-left.
#[inline]
pub fn pointer_canvas_px(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    let x_css = ev.client_x() as f32 - rect.left() as f32;
    let y_css = ev.client_y() as f32 - rect.top() as f32;
    let w = rect.width().max(1.0) as f32;
    let h = rect.height().max(1.0) as f32;
    Vec2::new(
        x_css / w * canvas.width() as f32,
        y_css / h * canvas.height() as f32,
    )
}

fn find_or_create(document: &web::Document, id: &str) -> anyhow::Result<web::Element> {
    if let Some(el) = document.get_element_by_id(id) {
        return Ok(el);
    }
    let el = document
        .create_element("div")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    el.set_id(id);
    let body = document
        .body()
        .ok_or_else(|| anyhow::anyhow!("no document body"))?;
    body.append_child(&el)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(el)
}

pub fn stats_element(document: &web::Document) -> Option<web::Element> {
    find_or_create(document, STATS_ID).ok()
}

fn listen<E: JsCast + 'static>(
    target: &web::EventTarget,
    event: &str,
    mut handler: impl FnMut(E) + 'static,
) {
    let closure = Closure::wrap(Box::new(move |ev: web::Event| {
        if let Ok(ev) = ev.dyn_into::<E>() {
            handler(ev);
        }
    }) as Box<dyn FnMut(web::Event)>);
    _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

fn dispatch(app: &Rc<RefCell<App>>, event: PanelEvent) {
    app.borrow_mut().apply_panel(event);
}

/// Render the placement controls into `#panel` and route their edits to `app`.
pub fn build_panel(document: &web::Document, app: &Rc<RefCell<App>>) -> anyhow::Result<()> {
    let panel = find_or_create(document, PANEL_ID)?;
    let params = app.borrow().params;
    let js_err = |e: wasm_bindgen::JsValue| anyhow::anyhow!("{:?}", e);

    for control in PANEL_CONTROLS {
        let row = document.create_element("div").map_err(js_err)?;
        row.set_class_name("panel-row");

        match control.kind {
            ControlKind::Slider { min, max, step } => {
                let label = document.create_element("label").map_err(js_err)?;
                label.set_text_content(Some(control.label));
                let input: web::HtmlInputElement = document
                    .create_element("input")
                    .map_err(js_err)?
                    .dyn_into()
                    .map_err(|_| anyhow::anyhow!("input element cast failed"))?;
                input.set_type("range");
                input.set_min(&min.to_string());
                input.set_max(&max.to_string());
                input.set_step(&step.to_string());
                let value = if control.id == "minScale" {
                    params.min_scale
                } else {
                    params.max_scale
                };
                input.set_value(&value.to_string());
                input.set_id(control.id);

                let app_c = app.clone();
                let input_c = input.clone();
                let id = control.id;
                listen::<web::Event>(&input, "input", move |_| {
                    if let Some(ev) = PanelEvent::from_control(id, &input_c.value()) {
                        dispatch(&app_c, ev);
                    }
                });
                row.append_child(&label).map_err(js_err)?;
                row.append_child(&input).map_err(js_err)?;
            }
            ControlKind::Toggle => {
                let label = document.create_element("label").map_err(js_err)?;
                label.set_text_content(Some(control.label));
                let input: web::HtmlInputElement = document
                    .create_element("input")
                    .map_err(js_err)?
                    .dyn_into()
                    .map_err(|_| anyhow::anyhow!("input element cast failed"))?;
                input.set_type("checkbox");
                input.set_checked(params.rotate);
                input.set_id(control.id);

                let app_c = app.clone();
                let input_c = input.clone();
                listen::<web::Event>(&input, "change", move |_| {
                    dispatch(&app_c, PanelEvent::Rotate(input_c.checked()));
                });
                row.append_child(&label).map_err(js_err)?;
                row.append_child(&input).map_err(js_err)?;
            }
            ControlKind::Button => {
                let button = document.create_element("button").map_err(js_err)?;
                button.set_text_content(Some(control.label));
                button.set_id(control.id);
                let app_c = app.clone();
                listen::<web::MouseEvent>(&button, "click", move |_| {
                    dispatch(&app_c, PanelEvent::Clear);
                });
                row.append_child(&button).map_err(js_err)?;
            }
        }
        panel.append_child(&row).map_err(js_err)?;
    }
    Ok(())
}
