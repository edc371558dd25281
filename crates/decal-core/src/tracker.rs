//! Pointer picking against the target cone.

use glam::{Quat, Vec2, Vec3};

use crate::camera::{Camera, Viewport};
use crate::constants::{HELPER_BOX_SIZE, HELPER_NORMAL_LENGTH};
use crate::geometry::TargetSurface;
use crate::math::look_at_rotation;
use crate::raycast::{intersect_surface, Side};
use crate::surface_angle::{self, SurfaceAngle};

/// Latest pick result. On a miss only `hit` changes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct IntersectionState {
    pub hit: bool,
    pub point: Vec3,
    pub normal: Vec3,
    pub surface_angle: Option<SurfaceAngle>,
}

/// Invisible box whose +Z axis follows the picked surface normal; decals
/// copy its orientation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MouseHelper {
    pub position: Vec3,
    pub rotation: Quat,
    pub size: Vec3,
    pub visible: bool,
}

impl Default for MouseHelper {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            size: Vec3::from(HELPER_BOX_SIZE),
            visible: false,
        }
    }
}

/// Two-point segment drawn from the hit point along the normal.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DebugLine {
    pub start: Vec3,
    pub end: Vec3,
}

#[derive(Clone, Debug, Default)]
pub struct PointerTracker {
    pub state: IntersectionState,
    pub helper: MouseHelper,
    pub line: DebugLine,
}

impl PointerTracker {
    /// Cast a ray through the pixel `px` and record the nearest front-facing
    /// hit on `target`. Returns whether anything was hit.
    pub fn check(
        &mut self,
        px: Vec2,
        viewport: Viewport,
        camera: &Camera,
        target: &TargetSurface,
    ) -> bool {
        let ray = camera.ray_through_ndc(viewport.to_ndc(px));
        let Some(hit) = intersect_surface(&ray, target, Side::Front, 0.0, f32::INFINITY) else {
            self.state.hit = false;
            return false;
        };

        let point = hit.point;
        let normal = hit.face_normal;
        let tip = point + normal * HELPER_NORMAL_LENGTH;

        self.helper.position = point;
        self.helper.rotation = look_at_rotation(point, tip, Vec3::Y);
        self.line = DebugLine {
            start: point,
            end: tip,
        };

        // base cap hits have no angle around the axis
        let surface_angle = if hit.face_index >= target.geometry.lateral_triangle_count() {
            None
        } else {
            match surface_angle::estimate(&target.geometry, target.to_local(point)) {
                Ok(angle) => Some(angle),
                Err(e) => {
                    log::debug!("[pick] no surface angle: {e}");
                    None
                }
            }
        };

        self.state = IntersectionState {
            hit: true,
            point,
            normal,
            surface_angle,
        };
        true
    }
}
