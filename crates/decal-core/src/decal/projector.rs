//! Box projection of a decal onto a target mesh.
//!
//! Every target triangle is moved into the projector's frame, clipped against
//! the six faces of the decal box and re-emitted in world space with UVs taken
//! from the projector's XY plane.

use glam::{Mat4, Vec2, Vec3};

use super::DecalGeometry;
use crate::error::{DecalError, Result};
use crate::geometry::TargetSurface;
use crate::math::Euler;

/// Produces the mesh a decal draws with. Implementations must return world
/// space positions and an empty geometry when nothing falls inside the box.
pub trait DecalProjector {
    fn project(
        &self,
        target: &TargetSurface,
        position: Vec3,
        orientation: Euler,
        size: Vec3,
    ) -> Result<DecalGeometry>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct BoxClipProjector;

#[derive(Clone, Copy, Debug, PartialEq)]
struct ClipVertex {
    /// Projector-space position.
    position: Vec3,
    /// World-space normal.
    normal: Vec3,
}

impl ClipVertex {
    fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            position: self.position.lerp(other.position, t),
            normal: self.normal.lerp(other.normal, t),
        }
    }
}

const CLIP_PLANES: [Vec3; 6] = [
    Vec3::X,
    Vec3::NEG_X,
    Vec3::Y,
    Vec3::NEG_Y,
    Vec3::Z,
    Vec3::NEG_Z,
];

/// Sutherland–Hodgman pass keeping the part of `polygon` with `p · plane <= limit`.
fn clip_polygon(polygon: &[ClipVertex], plane: Vec3, limit: f32, out: &mut Vec<ClipVertex>) {
    out.clear();
    let Some(&last) = polygon.last() else {
        return;
    };
    let mut prev = last;
    let mut prev_d = prev.position.dot(plane) - limit;
    for &cur in polygon {
        let cur_d = cur.position.dot(plane) - limit;
        match (prev_d <= 0.0, cur_d <= 0.0) {
            (true, true) => out.push(cur),
            (true, false) => out.push(prev.lerp(cur, prev_d / (prev_d - cur_d))),
            (false, true) => {
                out.push(prev.lerp(cur, prev_d / (prev_d - cur_d)));
                out.push(cur);
            }
            (false, false) => {}
        }
        prev = cur;
        prev_d = cur_d;
    }
}

impl DecalProjector for BoxClipProjector {
    fn project(
        &self,
        target: &TargetSurface,
        position: Vec3,
        orientation: Euler,
        size: Vec3,
    ) -> Result<DecalGeometry> {
        if !(size.is_finite() && size.min_element() > 0.0) {
            return Err(DecalError::DegenerateGeometry(format!(
                "decal size must be positive, got {size}"
            )));
        }
        if !position.is_finite() {
            return Err(DecalError::DegenerateGeometry(format!(
                "decal position is not finite: {position}"
            )));
        }

        let projector = Mat4::from_rotation_translation(orientation.to_quat(), position);
        let to_projector = projector.inverse() * target.matrix_world();
        let normal_matrix = target.matrix_world();
        let half = size * 0.5;

        let mut geometry = DecalGeometry::default();
        let mut polygon: Vec<ClipVertex> = Vec::with_capacity(9);
        let mut scratch: Vec<ClipVertex> = Vec::with_capacity(9);
        let mesh = &target.mesh;

        for tri in 0..mesh.triangle_count() {
            polygon.clear();
            for i in mesh.triangle_indices(tri) {
                polygon.push(ClipVertex {
                    position: to_projector.transform_point3(mesh.positions[i]),
                    normal: normal_matrix
                        .transform_vector3(mesh.normals[i])
                        .normalize_or_zero(),
                });
            }

            for plane in CLIP_PLANES {
                let limit = half.dot(plane.abs());
                clip_polygon(&polygon, plane, limit, &mut scratch);
                std::mem::swap(&mut polygon, &mut scratch);
                if polygon.len() < 3 {
                    break;
                }
            }
            if polygon.len() < 3 {
                continue;
            }

            // fan triangulation keeps the source winding
            for k in 1..polygon.len() - 1 {
                for v in [polygon[0], polygon[k], polygon[k + 1]] {
                    geometry.positions.push(projector.transform_point3(v.position));
                    geometry.normals.push(v.normal);
                    geometry.uvs.push(Vec2::new(
                        0.5 + v.position.x / size.x,
                        0.5 + v.position.y / size.y,
                    ));
                }
            }
        }

        log::debug!(
            "[decal] projected {} triangles at {position} size {size}",
            geometry.triangle_count()
        );
        Ok(geometry)
    }
}
