// Host-side picking tests against the shared core.

use decal_core::raycast::{intersect_surface, Ray, Side};
use decal_core::{App, EventOutcome, InputEvent, SceneConfig};
use glam::{Vec2, Vec3};

fn app() -> App {
    App::with_seed(&SceneConfig::default(), 11).unwrap()
}

/// A point on the default cone's outer surface at world height `y`,
/// `theta` radians around the axis from the +Z seam.
fn surface_point(theta: f32, y: f32) -> Vec3 {
    // apex at the origin, base radius 10 at y = -10
    let r = -y;
    Vec3::new(r * theta.sin(), y, r * theta.cos())
}

fn pixel_of(app: &App, world: Vec3) -> Vec2 {
    app.scene
        .viewport
        .from_ndc(app.scene.camera.world_to_ndc(world).truncate())
}

fn hover(app: &mut App, at: Vec2) -> EventOutcome {
    app.handle(InputEvent::PointerMove {
        position: at,
        primary: true,
    })
}

#[test]
fn hover_reports_point_normal_and_angle() {
    let mut app = app();
    let expected = surface_point(0.3, -8.0);
    let at = pixel_of(&app, expected);
    assert_eq!(hover(&mut app, at), EventOutcome::Tracked { hit: true });

    let state = app.scene.tracker.state;
    assert!(state.hit);
    assert!(state.point.distance(expected) < 0.15, "{}", state.point);
    // front faces point back at the camera on +Z
    assert!(state.normal.z > 0.5);
    assert!((state.normal.length() - 1.0).abs() < 1e-4);

    let angle = state.surface_angle.expect("angle for an off-apex hit");
    assert!((angle.theta - 0.3).abs() < 0.03, "theta {}", angle.theta);
    let slant = (10.0f32 * 10.0 + 10.0 * 10.0).sqrt();
    assert!((angle.theta_unwrap - angle.theta * std::f32::consts::TAU / slant).abs() < 1e-4);
}

#[test]
fn helper_follows_the_normal() {
    let mut app = app();
    let at = pixel_of(&app, surface_point(-0.4, -6.0));
    hover(&mut app, at);

    let state = app.scene.tracker.state;
    let helper = app.scene.tracker.helper;
    assert_eq!(helper.position, state.point);
    let forward = helper.rotation * Vec3::Z;
    assert!(forward.dot(state.normal) > 0.999);

    let line = app.scene.tracker.line;
    assert_eq!(line.start, state.point);
    assert!(line.end.distance(state.point) > 0.0);
}

#[test]
fn miss_keeps_the_last_hit_visuals() {
    let mut app = app();
    let at = pixel_of(&app, surface_point(0.2, -7.0));
    hover(&mut app, at);
    let before = app.scene.tracker.state;
    assert!(before.hit);

    assert_eq!(
        hover(&mut app, Vec2::new(3.0, 3.0)),
        EventOutcome::Tracked { hit: false }
    );
    let after = app.scene.tracker.state;
    assert!(!after.hit);
    assert_eq!(after.point, before.point);
    assert_eq!(app.scene.tracker.helper.position, before.point);
}

#[test]
fn rays_from_inside_only_meet_back_faces() {
    let app = app();
    let target = &app.scene.target;
    let ray = Ray::new(Vec3::new(0.0, -8.0, 0.0), Vec3::Z);
    assert!(intersect_surface(&ray, target, Side::Front, 0.0, f32::INFINITY).is_none());
    let hit = intersect_surface(&ray, target, Side::Double, 0.0, f32::INFINITY)
        .expect("double-sided hit");
    assert!((hit.point.z - 8.0).abs() < 0.1);
}

#[test]
fn centre_of_view_hits_the_apex_without_an_angle() {
    let mut app = app();
    let centre = app.scene.viewport.from_ndc(Vec2::ZERO);
    assert_eq!(hover(&mut app, centre), EventOutcome::Tracked { hit: true });

    let state = app.scene.tracker.state;
    assert!(state.hit);
    assert!(state.point.length() < 0.05, "{}", state.point);
    // the ring collapses at the apex, so no angle is stored
    assert!(state.surface_angle.is_none());

    app.handle(InputEvent::PointerDown { position: centre });
    assert_eq!(
        app.handle(InputEvent::PointerUp { position: centre }),
        EventOutcome::DecalPlaced { render_order: 0 }
    );
}
