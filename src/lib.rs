#![cfg(target_arch = "wasm32")]
use std::cell::RefCell;
use std::rc::Rc;

use decal_core::{App, InputEvent, SceneConfig};
use instant::Instant;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod dom;
mod events;
mod frame;
mod render;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("decal-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id(dom::CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", dom::CANVAS_ID))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    dom::sync_canvas_backing_size(&canvas);

    let mut config = SceneConfig::default();
    config.viewport.width = canvas.width();
    config.viewport.height = canvas.height();
    let app = Rc::new(RefCell::new(App::new(&config)?));

    dom::build_panel(&document, &app)?;
    events::wire_input_handlers(&canvas, &app);
    app.borrow_mut().handle(InputEvent::Resize {
        width: canvas.width(),
        height: canvas.height(),
    });

    let gpu = frame::init_gpu(&canvas, &app).await;
    if gpu.is_none() {
        log::warn!("[gpu] WebGPU unavailable, running without rendering");
    }
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        app,
        gpu,
        canvas,
        stats_el: dom::stats_element(&document),
        last_instant: Instant::now(),
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
