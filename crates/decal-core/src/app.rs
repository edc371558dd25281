//! Interaction controller: pointer picking, camera drags, decal placement
//! and the parameter panel, on top of a [`Scene`].

use std::f32::consts::TAU;

use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::SceneConfig;
use crate::decal::{BoxClipProjector, DecalProjector};
use crate::error::Result;
use crate::input::{EventOutcome, InputEvent};
use crate::math::Euler;
use crate::panel::PanelEvent;
use crate::params::PlacementParams;
use crate::scene::Scene;
use crate::stats::FrameStats;

#[derive(Clone, Copy, Debug, Default)]
struct PointerState {
    pressed: bool,
    /// Camera changed since the last pointer-down; such a release is a drag, not a click.
    moved: bool,
    last: Vec2,
}

pub struct App {
    pub scene: Scene,
    pub params: PlacementParams,
    pub stats: FrameStats,
    rng: StdRng,
    projector: Box<dyn DecalProjector>,
    pointer: PointerState,
    warned_inverted: bool,
}

impl App {
    /// Build the scene. The placement RNG uses the configured seed, or OS
    /// entropy when none is set.
    pub fn new(config: &SceneConfig) -> Result<Self> {
        let rng = match config.placement.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    pub fn with_seed(config: &SceneConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: &SceneConfig, rng: StdRng) -> Result<Self> {
        let scene = Scene::new(config)?;
        let params = PlacementParams::from(&config.placement);
        log::info!(
            "[panel] min_scale={} max_scale={} rotate={}",
            params.min_scale,
            params.max_scale,
            params.rotate
        );
        Ok(Self {
            scene,
            params,
            stats: FrameStats::default(),
            rng,
            projector: Box::new(BoxClipProjector),
            pointer: PointerState::default(),
            warned_inverted: false,
        })
    }

    /// Swap the decal geometry builder.
    pub fn set_projector(&mut self, projector: Box<dyn DecalProjector>) {
        self.projector = projector;
    }

    pub fn handle(&mut self, event: InputEvent) -> EventOutcome {
        match event {
            InputEvent::PointerDown { position } => {
                self.pointer = PointerState {
                    pressed: true,
                    moved: false,
                    last: position,
                };
                EventOutcome::Ignored
            }
            InputEvent::PointerMove { position, primary } => {
                let mut camera_moved = false;
                if self.pointer.pressed {
                    let delta = position - self.pointer.last;
                    if self.scene.orbit.rotate(delta, self.scene.viewport) {
                        self.scene.orbit.apply(&mut self.scene.camera);
                        self.pointer.moved = true;
                        camera_moved = true;
                    }
                }
                self.pointer.last = position;

                let mut outcome = if camera_moved {
                    EventOutcome::CameraMoved
                } else {
                    EventOutcome::Ignored
                };
                if primary {
                    let hit = self.track(position);
                    if !camera_moved {
                        outcome = EventOutcome::Tracked { hit };
                    }
                }
                outcome
            }
            InputEvent::PointerUp { position } => {
                self.pointer.pressed = false;
                self.pointer.last = position;
                if self.pointer.moved {
                    return EventOutcome::Ignored;
                }
                if !self.track(position) {
                    log::debug!("[click] missed at {position}");
                    return EventOutcome::ClickMissed;
                }
                match self.shoot() {
                    Some(render_order) => EventOutcome::DecalPlaced { render_order },
                    None => EventOutcome::ClickMissed,
                }
            }
            InputEvent::Resize { width, height } => {
                if self.scene.resize(width, height) {
                    EventOutcome::Resized
                } else {
                    EventOutcome::Ignored
                }
            }
        }
    }

    /// Wheel zoom; counts as camera movement for the pending click.
    pub fn zoom_camera(&mut self, delta: f32) -> bool {
        if !self.scene.orbit.zoom(delta) {
            return false;
        }
        self.scene.orbit.apply(&mut self.scene.camera);
        self.pointer.moved = true;
        true
    }

    fn track(&mut self, position: Vec2) -> bool {
        let scene = &mut self.scene;
        scene
            .tracker
            .check(position, scene.viewport, &scene.camera, &scene.target)
    }

    /// Place one decal at the current intersection. Returns its render order,
    /// or `None` when there is no hit to place on.
    pub fn shoot(&mut self) -> Option<u32> {
        let state = self.scene.tracker.state;
        if !state.hit {
            return None;
        }

        let position = state.point;
        let mut orientation = Euler::from_quat(self.scene.tracker.helper.rotation);
        if self.params.rotate {
            orientation.z = self.rng.gen::<f32>() * TAU;
        }

        if self.params.is_inverted() && !self.warned_inverted {
            log::warn!(
                "[decal] min scale {} exceeds max scale {}; sampling the swapped range",
                self.params.min_scale,
                self.params.max_scale
            );
            self.warned_inverted = true;
        }
        let scale = self.params.sample_scale(&mut self.rng);
        let size = Vec3::splat(scale);
        let material = self.scene.material.clone_with_random_tint(&mut self.rng);

        let geometry = match self
            .projector
            .project(&self.scene.target, position, orientation, size)
        {
            Ok(g) => g,
            Err(e) => {
                log::warn!("[decal] projection failed: {e}");
                return None;
            }
        };
        let triangles = geometry.triangle_count();
        let render_order = self
            .scene
            .decals
            .push(geometry, material, position, orientation, size);
        log::info!(
            "[decal] #{render_order} at ({:.2}, {:.2}, {:.2}) scale {scale:.2} color #{:06x} triangles {triangles}",
            position.x,
            position.y,
            position.z,
            material.color.to_hex()
        );
        Some(render_order)
    }

    /// Remove every decal. Safe to call on an empty scene.
    pub fn clear_decals(&mut self) -> usize {
        let removed = self.scene.decals.clear();
        log::info!("[decal] cleared {removed}");
        removed
    }

    /// Apply a panel edit. Returns whether anything changed.
    pub fn apply_panel(&mut self, event: PanelEvent) -> bool {
        if event == PanelEvent::Clear {
            return self.clear_decals() > 0;
        }
        if !event.apply(&mut self.params) {
            return false;
        }
        self.warned_inverted = false;
        log::info!(
            "[panel] min_scale={} max_scale={} rotate={}",
            self.params.min_scale,
            self.params.max_scale,
            self.params.rotate
        );
        true
    }

    /// Per-frame bookkeeping before drawing.
    pub fn tick(&mut self, dt_sec: f32) {
        self.stats.record(dt_sec);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decal::DecalGeometry;
    use crate::error::DecalError;
    use crate::geometry::TargetSurface;

    fn app() -> App {
        App::with_seed(&SceneConfig::default(), 5).unwrap()
    }

    fn cone_pixel(app: &App) -> Vec2 {
        let p = Vec3::new(0.6, -7.0, 5.0);
        app.scene
            .viewport
            .from_ndc(app.scene.camera.world_to_ndc(p).truncate())
    }

    fn click(app: &mut App, at: Vec2) -> EventOutcome {
        app.handle(InputEvent::PointerDown { position: at });
        app.handle(InputEvent::PointerUp { position: at })
    }

    #[test]
    fn click_on_cone_places_decal() {
        let mut app = app();
        let at = cone_pixel(&app);
        assert_eq!(click(&mut app, at), EventOutcome::DecalPlaced { render_order: 0 });
        assert_eq!(click(&mut app, at), EventOutcome::DecalPlaced { render_order: 1 });
        assert_eq!(app.scene.decals.len(), 2);
        let d = &app.scene.decals.as_slice()[0];
        assert!(d.size.x >= 10.0 && d.size.x <= 20.0);
        assert_eq!(d.size.x, d.size.y);
        assert!(!d.geometry.is_empty());
    }

    #[test]
    fn click_on_empty_space_misses() {
        let mut app = app();
        assert_eq!(click(&mut app, Vec2::new(2.0, 2.0)), EventOutcome::ClickMissed);
        assert!(app.scene.decals.is_empty());
    }

    #[test]
    fn drag_rotates_camera_and_suppresses_click() {
        let mut app = app();
        let at = cone_pixel(&app);
        let eye = app.scene.camera.eye;
        app.handle(InputEvent::PointerDown { position: at });
        let moved = app.handle(InputEvent::PointerMove {
            position: at + Vec2::new(30.0, 0.0),
            primary: true,
        });
        assert_eq!(moved, EventOutcome::CameraMoved);
        assert_ne!(app.scene.camera.eye, eye);
        assert_eq!(app.handle(InputEvent::PointerUp { position: at }), EventOutcome::Ignored);
        assert!(app.scene.decals.is_empty());

        // the next press starts a fresh click
        let at = cone_pixel(&app);
        assert!(matches!(click(&mut app, at), EventOutcome::DecalPlaced { .. }));
    }

    #[test]
    fn zoom_between_down_and_up_counts_as_movement() {
        let mut app = app();
        let at = cone_pixel(&app);
        app.handle(InputEvent::PointerDown { position: at });
        assert!(app.zoom_camera(1.0));
        assert_eq!(app.handle(InputEvent::PointerUp { position: at }), EventOutcome::Ignored);
        assert!(app.scene.decals.is_empty());
    }

    #[test]
    fn hover_tracks_without_placing() {
        let mut app = app();
        let at = cone_pixel(&app);
        let out = app.handle(InputEvent::PointerMove {
            position: at,
            primary: true,
        });
        assert_eq!(out, EventOutcome::Tracked { hit: true });
        assert!(app.scene.tracker.state.hit);
        let secondary = app.handle(InputEvent::PointerMove {
            position: Vec2::new(1.0, 1.0),
            primary: false,
        });
        assert_eq!(secondary, EventOutcome::Ignored);
        // non-primary pointers leave the last pick alone
        assert!(app.scene.tracker.state.hit);
        assert!(app.scene.decals.is_empty());
    }

    #[test]
    fn panel_edits_and_clear() {
        let mut app = app();
        assert!(app.apply_panel(PanelEvent::MinScale(12.0)));
        assert!(!app.apply_panel(PanelEvent::MinScale(12.0)));
        assert!(app.apply_panel(PanelEvent::Rotate(false)));
        assert_eq!(app.params.min_scale, 12.0);
        assert!(!app.params.rotate);

        let at = cone_pixel(&app);
        click(&mut app, at);
        assert!(app.apply_panel(PanelEvent::Clear));
        assert!(app.scene.decals.is_empty());
        assert!(!app.apply_panel(PanelEvent::Clear));
        assert_eq!(app.clear_decals(), 0);
    }

    struct FailingProjector;

    impl DecalProjector for FailingProjector {
        fn project(
            &self,
            _target: &TargetSurface,
            _position: Vec3,
            _orientation: Euler,
            _size: Vec3,
        ) -> Result<DecalGeometry> {
            Err(DecalError::DegenerateGeometry("no room".into()))
        }
    }

    struct EmptyProjector;

    impl DecalProjector for EmptyProjector {
        fn project(
            &self,
            _target: &TargetSurface,
            _position: Vec3,
            _orientation: Euler,
            _size: Vec3,
        ) -> Result<DecalGeometry> {
            Ok(DecalGeometry::default())
        }
    }

    #[test]
    fn projector_error_drops_the_click() {
        let mut app = app();
        app.set_projector(Box::new(FailingProjector));
        let at = cone_pixel(&app);
        assert_eq!(click(&mut app, at), EventOutcome::ClickMissed);
        assert!(app.scene.decals.is_empty());
    }

    #[test]
    fn empty_projection_still_adds_a_decal() {
        let mut app = app();
        app.set_projector(Box::new(EmptyProjector));
        let at = cone_pixel(&app);
        assert_eq!(click(&mut app, at), EventOutcome::DecalPlaced { render_order: 0 });
        assert_eq!(app.scene.decals.len(), 1);
        assert!(app.scene.decals.as_slice()[0].geometry.is_empty());
    }

    #[test]
    fn shoot_without_hit_does_nothing() {
        let mut app = app();
        assert_eq!(app.shoot(), None);
        assert!(app.scene.decals.is_empty());
    }

    #[test]
    fn resize_event() {
        let mut app = app();
        assert_eq!(
            app.handle(InputEvent::Resize {
                width: 640,
                height: 480
            }),
            EventOutcome::Resized
        );
        assert_eq!(
            app.handle(InputEvent::Resize {
                width: 0,
                height: 480
            }),
            EventOutcome::Ignored
        );
        assert!((app.scene.camera.aspect - 640.0 / 480.0).abs() < 1e-6);
    }
}
