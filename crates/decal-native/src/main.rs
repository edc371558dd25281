mod gpu;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use glam::Vec2;
use winit::{
    dpi::PhysicalSize,
    event::*,
    event_loop::EventLoop,
    keyboard::Key,
    window::WindowBuilder,
};

use decal_core::{App, InputEvent, PanelEvent, SceneConfig};
use gpu::GpuState;

const CONFIG_ENV: &str = "CONE_DECALS_CONFIG";
const STATS_LOG_EVERY: u64 = 300;
const PIXELS_PER_WHEEL_LINE: f32 = 50.0;

fn config_path() -> Option<PathBuf> {
    std::env::args_os()
        .nth(1)
        .or_else(|| std::env::var_os(CONFIG_ENV))
        .map(PathBuf::from)
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let config = SceneConfig::load_or_default(config_path().as_deref())
        .context("loading scene config")?;
    let mut app = App::new(&config).context("building scene")?;
    log::info!("[keys] [ ] min scale, - = max scale, R rotate, C clear");

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Cone decals (native)")
        .with_inner_size(PhysicalSize::new(config.viewport.width, config.viewport.height))
        .build(&event_loop)?;

    let mut state = pollster::block_on(GpuState::new(
        &window,
        &app.scene.texture,
        &app.scene.material,
    ))?;
    let size = window.inner_size();
    app.handle(InputEvent::Resize {
        width: size.width,
        height: size.height,
    });

    let mut cursor = Vec2::ZERO;
    let mut last_frame = Instant::now();

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::Resized(size) => {
                state.resize(size);
                app.handle(InputEvent::Resize {
                    width: size.width,
                    height: size.height,
                });
            }
            WindowEvent::CursorMoved { position, .. } => {
                cursor = Vec2::new(position.x as f32, position.y as f32);
                app.handle(InputEvent::PointerMove {
                    position: cursor,
                    primary: true,
                });
            }
            WindowEvent::MouseInput {
                state: button_state,
                button: MouseButton::Left,
                ..
            } => {
                let event = match button_state {
                    ElementState::Pressed => InputEvent::PointerDown { position: cursor },
                    ElementState::Released => InputEvent::PointerUp { position: cursor },
                };
                let outcome = app.handle(event);
                log::debug!("[input] {outcome:?}");
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let steps = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(p) => p.y as f32 / PIXELS_PER_WHEEL_LINE,
                };
                app.zoom_camera(steps);
            }
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                if let Key::Character(text) = &event.logical_key {
                    if let Some(panel) = PanelEvent::from_key(text.as_str(), &app.params) {
                        app.apply_panel(panel);
                    }
                }
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                app.tick((now - last_frame).as_secs_f32());
                last_frame = now;
                if app.stats.frames() % STATS_LOG_EVERY == 0 {
                    log::info!("[stats] {} decals={}", app.stats.label(), app.scene.decals.len());
                }
                match state.render(&app.scene) {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        state.resize(state.window.inner_size())
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("[gpu] out of memory");
                        elwt.exit();
                    }
                    Err(e) => log::warn!("[gpu] frame skipped: {e:?}"),
                }
            }
            _ => {}
        },
        Event::AboutToWait => state.window.request_redraw(),
        _ => {}
    })?;
    Ok(())
}
