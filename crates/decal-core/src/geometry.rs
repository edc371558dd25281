//! Indexed triangle meshes and the cone that serves as the decal target.

use fnv::FnvHashSet;
use glam::{Mat4, Vec3};

use crate::config::ConeConfig;
use crate::math::Color;

/// Indexed triangle mesh with per-vertex normals. Triangles wind
/// counter-clockwise when seen from the side their normal points to.
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn triangle_indices(&self, tri: usize) -> [usize; 3] {
        let i = tri * 3;
        [
            self.indices[i] as usize,
            self.indices[i + 1] as usize,
            self.indices[i + 2] as usize,
        ]
    }

    pub fn triangle(&self, tri: usize) -> [Vec3; 3] {
        let [a, b, c] = self.triangle_indices(tri);
        [self.positions[a], self.positions[b], self.positions[c]]
    }

    /// Unit normal of the triangle's plane following its winding.
    pub fn face_normal(&self, tri: usize) -> Vec3 {
        let [a, b, c] = self.triangle(tri);
        (c - b).cross(a - b).normalize_or_zero()
    }

    /// Unique undirected edges, for wireframe rendering.
    pub fn edges(&self) -> Vec<(u32, u32)> {
        let mut seen = FnvHashSet::default();
        let mut out = Vec::new();
        for tri in self.indices.chunks_exact(3) {
            for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
                let key = (a.min(b), a.max(b));
                if self.positions[a as usize] == self.positions[b as usize] {
                    continue;
                }
                if seen.insert(key) {
                    out.push(key);
                }
            }
        }
        out
    }
}

/// Parametric cone: apex at `+height / 2`, base ring at `-height / 2`,
/// theta measured from +Z toward +X.
#[derive(Clone, Debug, PartialEq)]
pub struct ConeGeometry {
    pub radius: f32,
    pub height: f32,
    pub radial_segments: u32,
    pub height_segments: u32,
    pub open_ended: bool,
    pub theta_start: f32,
    pub theta_length: f32,
}

impl From<&ConeConfig> for ConeGeometry {
    fn from(c: &ConeConfig) -> Self {
        Self {
            radius: c.radius,
            height: c.height,
            radial_segments: c.radial_segments,
            height_segments: c.height_segments,
            open_ended: c.open_ended,
            theta_start: c.theta_start,
            theta_length: c.theta_length,
        }
    }
}

impl ConeGeometry {
    /// Distance from apex to base rim along the surface.
    pub fn slant_length(&self) -> f32 {
        (self.height * self.height + self.radius * self.radius).sqrt()
    }

    /// Lateral radius at local height `y`; zero at the apex.
    pub fn radius_at(&self, y: f32) -> f32 {
        self.radius * self.height_fraction(y)
    }

    /// 0 at the apex, 1 at the base.
    pub fn height_fraction(&self, y: f32) -> f32 {
        (self.height * 0.5 - y) / self.height
    }

    /// Triangles in the lateral torso. `build` emits these first, so any
    /// face index below this count lies on the lateral surface.
    pub fn lateral_triangle_count(&self) -> usize {
        let rs = self.radial_segments as usize;
        let hs = self.height_segments as usize;
        rs * (2 * hs - 1)
    }

    pub fn build(&self) -> Mesh {
        let mut mesh = Mesh::default();
        self.build_torso(&mut mesh);
        if !self.open_ended {
            self.build_base_cap(&mut mesh);
        }
        mesh
    }

    fn build_torso(&self, mesh: &mut Mesh) {
        let rs = self.radial_segments as usize;
        let hs = self.height_segments as usize;
        let half_height = self.height * 0.5;
        let slope = self.radius / self.height;

        let mut rows: Vec<Vec<u32>> = Vec::with_capacity(hs + 1);
        for y in 0..=hs {
            let v = y as f32 / hs as f32;
            let ring_radius = v * self.radius;
            let mut row = Vec::with_capacity(rs + 1);
            for x in 0..=rs {
                let u = x as f32 / rs as f32;
                let theta = u * self.theta_length + self.theta_start;
                let (sin_t, cos_t) = theta.sin_cos();
                row.push(mesh.positions.len() as u32);
                mesh.positions.push(Vec3::new(
                    ring_radius * sin_t,
                    -v * self.height + half_height,
                    ring_radius * cos_t,
                ));
                mesh.normals
                    .push(Vec3::new(sin_t, slope, cos_t).normalize());
            }
            rows.push(row);
        }

        for x in 0..rs {
            for y in 0..hs {
                let a = rows[y][x];
                let b = rows[y + 1][x];
                let c = rows[y + 1][x + 1];
                let d = rows[y][x + 1];
                // the apex row collapses to a single point, so only one triangle survives there
                if y != 0 {
                    mesh.indices.extend_from_slice(&[a, b, d]);
                }
                mesh.indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    fn build_base_cap(&self, mesh: &mut Mesh) {
        let rs = self.radial_segments as usize;
        let y = -self.height * 0.5;
        let center_start = mesh.positions.len() as u32;
        for _ in 0..rs {
            mesh.positions.push(Vec3::new(0.0, y, 0.0));
            mesh.normals.push(Vec3::NEG_Y);
        }
        let ring_start = mesh.positions.len() as u32;
        for x in 0..=rs {
            let u = x as f32 / rs as f32;
            let theta = u * self.theta_length + self.theta_start;
            let (sin_t, cos_t) = theta.sin_cos();
            mesh.positions
                .push(Vec3::new(self.radius * sin_t, y, self.radius * cos_t));
            mesh.normals.push(Vec3::NEG_Y);
        }
        for x in 0..rs as u32 {
            let c = center_start + x;
            let i = ring_start + x;
            mesh.indices.extend_from_slice(&[i + 1, i, c]);
        }
    }
}

/// The immutable raycast target: the cone mesh placed in the world.
#[derive(Clone, Debug)]
pub struct TargetSurface {
    pub geometry: ConeGeometry,
    pub mesh: Mesh,
    pub position: Vec3,
    pub color: Color,
}

impl TargetSurface {
    /// Build the cone and drop it so its apex sits at the world origin.
    pub fn new(config: &ConeConfig) -> Self {
        let geometry = ConeGeometry::from(config);
        let mesh = geometry.build();
        log::info!(
            "[scene] cone r={} h={} segments={}x{} triangles={}",
            geometry.radius,
            geometry.height,
            geometry.radial_segments,
            geometry.height_segments,
            mesh.triangle_count()
        );
        Self {
            position: Vec3::new(0.0, -geometry.height * 0.5, 0.0),
            geometry,
            mesh,
            color: Color::from_hex(config.color),
        }
    }

    pub fn matrix_world(&self) -> Mat4 {
        Mat4::from_translation(self.position)
    }

    pub fn to_local(&self, world: Vec3) -> Vec3 {
        world - self.position
    }

    pub fn to_world(&self, local: Vec3) -> Vec3 {
        local + self.position
    }

    pub fn world_triangle(&self, tri: usize) -> [Vec3; 3] {
        let [a, b, c] = self.mesh.triangle(tri);
        [self.to_world(a), self.to_world(b), self.to_world(c)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cone(open_ended: bool) -> ConeGeometry {
        ConeGeometry {
            radius: 10.0,
            height: 10.0,
            radial_segments: 8,
            height_segments: 4,
            open_ended,
            theta_start: 0.0,
            theta_length: std::f32::consts::TAU,
        }
    }

    #[test]
    fn torso_vertex_and_triangle_counts() {
        let mesh = cone(true).build();
        assert_eq!(mesh.positions.len(), 9 * 5);
        assert_eq!(mesh.normals.len(), mesh.positions.len());
        // every quad contributes two triangles except the apex row which contributes one
        assert_eq!(mesh.triangle_count(), 8 * (2 * 4 - 1));
    }

    #[test]
    fn closed_cone_adds_base_cap() {
        let open = cone(true).build();
        let closed = cone(false).build();
        assert_eq!(closed.triangle_count(), open.triangle_count() + 8);
        assert_eq!(cone(false).lateral_triangle_count(), open.triangle_count());
    }

    #[test]
    fn lateral_vertices_lie_on_the_surface() {
        let g = cone(true);
        let mesh = g.build();
        for p in &mesh.positions {
            let r = (p.x * p.x + p.z * p.z).sqrt();
            assert!((r - g.radius_at(p.y)).abs() < 1e-4);
        }
    }

    #[test]
    fn face_normals_point_outward() {
        let mesh = cone(false).build();
        for tri in 0..mesh.triangle_count() {
            let [a, b, c] = mesh.triangle(tri);
            let centroid = (a + b + c) / 3.0;
            let n = mesh.face_normal(tri);
            // outward means away from the axis for the torso and downward for the cap
            let outward = Vec3::new(centroid.x, 0.0, centroid.z) + Vec3::new(0.0, 1e-3, 0.0);
            if (centroid.y + 5.0).abs() < 1e-5 {
                assert!(n.y < -0.99);
            } else {
                assert!(n.dot(outward) > 0.0, "triangle {tri} faces inward");
            }
        }
    }

    #[test]
    fn seam_at_theta_zero_is_on_positive_z() {
        let mesh = cone(true).build();
        // second row, first column
        let p = mesh.positions[9];
        assert!(p.x.abs() < 1e-6);
        assert!(p.z > 0.0);
    }

    #[test]
    fn geometry_helpers() {
        let g = cone(true);
        assert!((g.slant_length() - 200f32.sqrt()).abs() < 1e-5);
        assert_eq!(g.height_fraction(5.0), 0.0);
        assert_eq!(g.height_fraction(-5.0), 1.0);
        assert!((g.radius_at(-3.0) - 8.0).abs() < 1e-5);
    }

    #[test]
    fn target_surface_sits_below_origin() {
        let surface = TargetSurface::new(&ConeConfig::default());
        assert_eq!(surface.position, Vec3::new(0.0, -5.0, 0.0));
        let apex_local = Vec3::new(0.0, 5.0, 0.0);
        assert_eq!(surface.to_world(apex_local), Vec3::ZERO);
        assert_eq!(surface.to_local(Vec3::ZERO), apex_local);
    }

    #[test]
    fn wireframe_edges_are_unique_and_skip_collapsed_apex() {
        let mesh = cone(true).build();
        let edges = mesh.edges();
        let mut sorted = edges.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), edges.len());
        for (a, b) in edges {
            assert_ne!(mesh.positions[a as usize], mesh.positions[b as usize]);
        }
    }
}
