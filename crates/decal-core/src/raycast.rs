use glam::Vec3;

use crate::geometry::TargetSurface;

const EPSILON: f32 = 1e-7;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit direction.
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Which triangle faces a ray is allowed to hit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Side {
    /// Only faces whose counter-clockwise winding faces the ray.
    #[default]
    Front,
    Double,
}

/// Nearest intersection of a ray with a surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceHit {
    pub distance: f32,
    pub point: Vec3,
    /// World-space unit normal of the hit triangle.
    pub face_normal: Vec3,
    pub face_index: usize,
}

/// Möller–Trumbore ray/triangle test; returns the ray parameter.
#[inline]
pub fn ray_triangle(ray: &Ray, a: Vec3, b: Vec3, c: Vec3, side: Side) -> Option<f32> {
    let edge1 = b - a;
    let edge2 = c - a;
    let normal = edge1.cross(edge2);

    // DdN > 0 means the ray approaches the back face
    let ddn = ray.direction.dot(normal);
    let sign = if ddn > EPSILON {
        if side == Side::Front {
            return None;
        }
        1.0
    } else if ddn < -EPSILON {
        -1.0
    } else {
        return None;
    };

    let diff = ray.origin - a;
    let ddq_x_e2 = sign * ray.direction.dot(diff.cross(edge2));
    if ddq_x_e2 < 0.0 {
        return None;
    }
    let dde1_x_q = sign * ray.direction.dot(edge1.cross(diff));
    if dde1_x_q < 0.0 {
        return None;
    }
    if ddq_x_e2 + dde1_x_q > sign * ddn {
        return None;
    }
    let qdn = -sign * diff.dot(normal);
    if qdn < 0.0 {
        return None;
    }
    Some(qdn / (sign * ddn))
}

#[inline]
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    (t >= 0.0).then_some(t)
}

/// Closest hit against every triangle of `surface` within `[near, far]`.
pub fn intersect_surface(
    ray: &Ray,
    surface: &TargetSurface,
    side: Side,
    near: f32,
    far: f32,
) -> Option<SurfaceHit> {
    // cheap reject against the cone's bounding sphere before walking triangles
    let g = &surface.geometry;
    let bound_center = surface.position;
    let bound_radius = (g.radius * g.radius + g.height * g.height * 0.25).sqrt() + 1e-3;
    let oc = ray.origin - bound_center;
    let inside = oc.length_squared() <= bound_radius * bound_radius;
    if !inside && ray_sphere(ray.origin, ray.direction, bound_center, bound_radius).is_none() {
        return None;
    }

    let mut best: Option<SurfaceHit> = None;
    for tri in 0..surface.mesh.triangle_count() {
        let [a, b, c] = surface.world_triangle(tri);
        let Some(t) = ray_triangle(ray, a, b, c, side) else {
            continue;
        };
        if t < near || t > far {
            continue;
        }
        match best {
            Some(h) if t >= h.distance => {}
            _ => {
                best = Some(SurfaceHit {
                    distance: t,
                    point: ray.at(t),
                    face_normal: surface.mesh.face_normal(tri),
                    face_index: tri,
                })
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConeConfig;

    fn tri() -> [Vec3; 3] {
        [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn front_face_hit() {
        let [a, b, c] = tri();
        let ray = Ray::new(Vec3::new(0.25, 0.25, 2.0), Vec3::NEG_Z);
        let t = ray_triangle(&ray, a, b, c, Side::Front).unwrap();
        assert!((t - 2.0).abs() < 1e-6);
    }

    #[test]
    fn back_face_is_culled_on_front_side() {
        let [a, b, c] = tri();
        let ray = Ray::new(Vec3::new(0.25, 0.25, -2.0), Vec3::Z);
        assert!(ray_triangle(&ray, a, b, c, Side::Front).is_none());
        let t = ray_triangle(&ray, a, b, c, Side::Double).unwrap();
        assert!((t - 2.0).abs() < 1e-6);
    }

    #[test]
    fn miss_outside_and_parallel() {
        let [a, b, c] = tri();
        let outside = Ray::new(Vec3::new(0.8, 0.8, 2.0), Vec3::NEG_Z);
        assert!(ray_triangle(&outside, a, b, c, Side::Double).is_none());
        let parallel = Ray::new(Vec3::new(0.25, 0.25, 1.0), Vec3::X);
        assert!(ray_triangle(&parallel, a, b, c, Side::Double).is_none());
        let behind = Ray::new(Vec3::new(0.25, 0.25, 2.0), Vec3::Z);
        assert!(ray_triangle(&behind, a, b, c, Side::Double).is_none());
    }

    #[test]
    fn ray_sphere_hits_and_misses() {
        let t = ray_sphere(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, 5.0), 2.0).unwrap();
        assert!((t - 3.0).abs() < 1e-6);
        assert!(ray_sphere(Vec3::ZERO, Vec3::X, Vec3::new(0.0, 0.0, 5.0), 2.0).is_none());
    }

    #[test]
    fn nearest_hit_on_cone_is_front_surface() {
        let surface = TargetSurface::new(&ConeConfig::default());
        // aim just beside the seam two units below the apex where the radius is 2
        let ray = Ray::new(Vec3::new(0.05, -2.0, 100.0), Vec3::NEG_Z);
        let hit = intersect_surface(&ray, &surface, Side::Front, 0.0, f32::INFINITY).unwrap();
        assert!((hit.point - Vec3::new(0.05, -2.0, 2.0)).length() < 1e-2);
        assert!(hit.face_normal.z > 0.5);
        assert!(hit.face_normal.y > 0.5);
    }

    #[test]
    fn ray_beside_cone_misses() {
        let surface = TargetSurface::new(&ConeConfig::default());
        let ray = Ray::new(Vec3::new(30.0, -5.0, 100.0), Vec3::NEG_Z);
        assert!(intersect_surface(&ray, &surface, Side::Front, 0.0, f32::INFINITY).is_none());
        let above = Ray::new(Vec3::new(0.0, 3.0, 100.0), Vec3::NEG_Z);
        assert!(intersect_surface(&above, &surface, Side::Front, 0.0, f32::INFINITY).is_none());
    }

    #[test]
    fn open_cone_interior_is_invisible_from_front_side_only() {
        let surface = TargetSurface::new(&ConeConfig::default());
        // from below the open base looking up the axis only back faces are visible
        let ray = Ray::new(Vec3::new(0.5, -50.0, 0.3), Vec3::Y);
        assert!(intersect_surface(&ray, &surface, Side::Front, 0.0, f32::INFINITY).is_none());
        assert!(intersect_surface(&ray, &surface, Side::Double, 0.0, f32::INFINITY).is_some());
    }
}
