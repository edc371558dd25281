//! CPU-side vertex data the renderers upload each frame.
//!
//! Lines cover the axes gizmo, the cone wireframe, the debug normal segment
//! and (when visible) the helper box. Decals become one triangle list in
//! render order with the tint baked into each vertex.

use glam::{Mat4, Vec3};

use crate::camera::Camera;
use crate::decal::DecalSet;
use crate::material::DecalMaterial;
use crate::math::Color;
use crate::scene::{Lights, Scene};
use crate::tracker::MouseHelper;

pub const MAX_DIRECTIONAL_LIGHTS: usize = 4;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
    pub tint: [f32; 4],
}

/// Per-frame uniform block shared by the line and decal shaders.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub camera_pos: [f32; 4],
    /// Linear ambient color.
    pub ambient: [f32; 4],
    /// xyz: unit direction toward the light.
    pub light_dirs: [[f32; 4]; MAX_DIRECTIONAL_LIGHTS],
    /// rgb: linear color premultiplied by intensity.
    pub light_colors: [[f32; 4]; MAX_DIRECTIONAL_LIGHTS],
    /// rgb: linear specular color, a: shininess.
    pub specular: [f32; 4],
    /// x: light count.
    pub counts: [u32; 4],
}

impl SceneUniforms {
    pub fn new(camera: &Camera, lights: &Lights, material: &DecalMaterial) -> Self {
        let mut light_dirs = [[0.0; 4]; MAX_DIRECTIONAL_LIGHTS];
        let mut light_colors = [[0.0; 4]; MAX_DIRECTIONAL_LIGHTS];
        let count = lights.directional.len().min(MAX_DIRECTIONAL_LIGHTS);
        if lights.directional.len() > MAX_DIRECTIONAL_LIGHTS {
            log::warn!(
                "[render] {} directional lights configured, only {MAX_DIRECTIONAL_LIGHTS} are drawn",
                lights.directional.len()
            );
        }
        for (i, light) in lights.directional.iter().take(count).enumerate() {
            light_dirs[i] = light.direction.extend(0.0).to_array();
            let [r, g, b] = light.color.to_linear();
            light_colors[i] = [
                r * light.intensity,
                g * light.intensity,
                b * light.intensity,
                1.0,
            ];
        }
        let [sr, sg, sb] = material.specular.to_linear();
        Self {
            view_proj: camera.view_projection().to_cols_array_2d(),
            camera_pos: camera.eye.extend(1.0).to_array(),
            ambient: lights.ambient.to_linear_rgba(1.0),
            light_dirs,
            light_colors,
            specular: [sr, sg, sb, material.shininess],
            counts: [count as u32, 0, 0, 0],
        }
    }
}

fn push_line(out: &mut Vec<LineVertex>, a: Vec3, b: Vec3, color: [f32; 4]) {
    out.push(LineVertex {
        position: a.to_array(),
        color,
    });
    out.push(LineVertex {
        position: b.to_array(),
        color,
    });
}

/// Corners of the helper box in world space, ordered so bit i of the index
/// selects the sign of axis i.
fn helper_corners(helper: &MouseHelper) -> [Vec3; 8] {
    let m = Mat4::from_scale_rotation_translation(helper.size, helper.rotation, helper.position);
    std::array::from_fn(|i| {
        let local = Vec3::new(
            if i & 1 == 0 { -0.5 } else { 0.5 },
            if i & 2 == 0 { -0.5 } else { 0.5 },
            if i & 4 == 0 { -0.5 } else { 0.5 },
        );
        m.transform_point3(local)
    })
}

/// Every line segment in the scene as a line list.
pub fn line_vertices(scene: &Scene) -> Vec<LineVertex> {
    let mesh = &scene.target.mesh;
    let edges = mesh.edges();
    let mut out = Vec::with_capacity((edges.len() + 3 + 1 + 12) * 2);

    let axes = [Vec3::X, Vec3::Y, Vec3::Z];
    for (axis, color) in axes.iter().zip(scene.axes.colors) {
        push_line(
            &mut out,
            Vec3::ZERO,
            *axis * scene.axes.length,
            color.to_linear_rgba(1.0),
        );
    }

    let wire = scene.target.color.to_linear_rgba(1.0);
    for (a, b) in edges {
        push_line(
            &mut out,
            scene.target.to_world(mesh.positions[a as usize]),
            scene.target.to_world(mesh.positions[b as usize]),
            wire,
        );
    }

    let line = scene.tracker.line;
    push_line(&mut out, line.start, line.end, scene.line_color.to_linear_rgba(1.0));

    let helper = &scene.tracker.helper;
    if helper.visible {
        let c = helper_corners(helper);
        let color = Color::WHITE.to_linear_rgba(1.0);
        for (i, j) in [
            (0, 1), (2, 3), (4, 5), (6, 7),
            (0, 2), (1, 3), (4, 6), (5, 7),
            (0, 4), (1, 5), (2, 6), (3, 7),
        ] {
            push_line(&mut out, c[i], c[j], color);
        }
    }
    out
}

/// All decal triangles, ordered by render order.
pub fn decal_vertices(decals: &DecalSet) -> Vec<MeshVertex> {
    let total: usize = decals.iter().map(|d| d.geometry.positions.len()).sum();
    let mut out = Vec::with_capacity(total);
    let mut ordered: Vec<_> = decals.iter().collect();
    ordered.sort_by_key(|d| d.render_order);
    for decal in ordered {
        let tint = decal.material.color.to_linear_rgba(1.0);
        let g = &decal.geometry;
        for ((p, n), uv) in g.positions.iter().zip(&g.normals).zip(&g.uvs) {
            out.push(MeshVertex {
                position: p.to_array(),
                normal: n.to_array(),
                uv: uv.to_array(),
                tint,
            });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SceneConfig;
    use crate::decal::DecalGeometry;
    use crate::math::Euler;
    use glam::Vec2;

    #[test]
    fn line_list_holds_axes_wireframe_and_debug_segment() {
        let scene = Scene::new(&SceneConfig::default()).unwrap();
        let verts = line_vertices(&scene);
        let edges = scene.target.mesh.edges().len();
        assert_eq!(verts.len(), (3 + edges + 1) * 2);
        assert_eq!(verts[1].position, [100.0, 0.0, 0.0]);
        // x axis is drawn blue
        assert_eq!(verts[0].color, [0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn visible_helper_adds_box_edges() {
        let mut scene = Scene::new(&SceneConfig::default()).unwrap();
        let hidden = line_vertices(&scene).len();
        scene.tracker.helper.visible = true;
        assert_eq!(line_vertices(&scene).len(), hidden + 24);
    }

    #[test]
    fn decal_vertices_follow_render_order_with_tint() {
        let mut set = DecalSet::default();
        for hex in [0xff0000, 0x0000ff] {
            let geometry = DecalGeometry {
                positions: vec![Vec3::ZERO, Vec3::X, Vec3::Y],
                normals: vec![Vec3::Z; 3],
                uvs: vec![Vec2::ZERO, Vec2::X, Vec2::Y],
            };
            let material = DecalMaterial {
                color: Color::from_hex(hex),
                ..DecalMaterial::default()
            };
            set.push(geometry, material, Vec3::ZERO, Euler::IDENTITY, Vec3::ONE);
        }
        let verts = decal_vertices(&set);
        assert_eq!(verts.len(), 6);
        assert_eq!(verts[0].tint, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(verts[5].tint, [0.0, 0.0, 1.0, 1.0]);
        assert_eq!(verts[1].uv, [1.0, 0.0]);
    }

    #[test]
    fn uniforms_pack_lights() {
        let scene = Scene::new(&SceneConfig::default()).unwrap();
        let u = SceneUniforms::new(&scene.camera, &scene.lights, &scene.material);
        assert_eq!(u.counts[0], 2);
        assert_eq!(u.specular[3], 30.0);
        assert_eq!(u.camera_pos, [0.0, 0.0, 120.0, 1.0]);
        assert_eq!(std::mem::size_of::<SceneUniforms>() % 16, 0);
    }
}
