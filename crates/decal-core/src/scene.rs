//! Everything that gets drawn, built once from a [`SceneConfig`].

use glam::Vec3;

use crate::camera::{Camera, OrbitController, Viewport};
use crate::config::SceneConfig;
use crate::constants::{DEBUG_LINE_COLOR, DECAL_TEXTURE_SIZE};
use crate::decal::DecalSet;
use crate::error::Result;
use crate::geometry::TargetSurface;
use crate::material::DecalMaterial;
use crate::math::Color;
use crate::texture::DecalTexture;
use crate::tracker::PointerTracker;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalLight {
    pub color: Color,
    pub intensity: f32,
    /// Unit vector pointing from the surface toward the light.
    pub direction: Vec3,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Lights {
    pub ambient: Color,
    pub directional: Vec<DirectionalLight>,
}

/// World axes gizmo; one color per axis in x, y, z order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxesGizmo {
    pub length: f32,
    pub colors: [Color; 3],
}

pub struct Scene {
    pub camera: Camera,
    pub orbit: OrbitController,
    pub viewport: Viewport,
    pub lights: Lights,
    pub axes: AxesGizmo,
    pub target: TargetSurface,
    /// Pick state plus the helper box and debug line it moves.
    pub tracker: PointerTracker,
    pub line_color: Color,
    /// Source material every decal clones before tinting.
    pub material: DecalMaterial,
    pub texture: DecalTexture,
    pub decals: DecalSet,
}

impl Scene {
    /// Validate `config` and build the full scene. Nothing is constructed
    /// when validation fails.
    pub fn new(config: &SceneConfig) -> Result<Self> {
        config.validate()?;
        let texture = DecalTexture::focus(DECAL_TEXTURE_SIZE)?;

        let viewport = Viewport::new(config.viewport.width, config.viewport.height);
        let mut camera = Camera::new(&config.camera, viewport.aspect());
        let orbit = OrbitController::new(&config.camera);
        orbit.apply(&mut camera);

        let lights = Lights {
            ambient: Color::from_hex(config.lights.ambient),
            directional: config
                .lights
                .directional
                .iter()
                .map(|l| DirectionalLight {
                    color: Color::from_hex(l.color),
                    intensity: l.intensity,
                    direction: Vec3::from(l.position).normalize_or_zero(),
                })
                .collect(),
        };
        let axes = AxesGizmo {
            length: config.axes.length,
            colors: config.axes.colors.map(Color::from_hex),
        };
        let target = TargetSurface::new(&config.cone);

        log::info!(
            "[scene] ready: viewport {}x{}, camera at {}, {} directional lights",
            viewport.width,
            viewport.height,
            camera.eye,
            lights.directional.len()
        );

        Ok(Self {
            camera,
            orbit,
            viewport,
            lights,
            axes,
            target,
            tracker: PointerTracker::default(),
            line_color: Color::from_hex(DEBUG_LINE_COLOR),
            material: DecalMaterial::default(),
            texture,
            decals: DecalSet::default(),
        })
    }

    /// Track a new drawable size. Zero-sized updates are ignored.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        self.viewport = Viewport::new(width, height);
        self.camera.aspect = self.viewport.aspect();
        true
    }
}
