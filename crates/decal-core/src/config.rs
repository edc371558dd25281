//! Scene configuration with TOML file support.
//!
//! Every section uses `#[serde(default)]`, so a file that only overrides
//! `[cone]` or `[placement]` fills the rest from the built-in constants.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::{DecalError, Result};

/// Top-level configuration for [`crate::scene::Scene::new`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub cone: ConeConfig,
    pub camera: CameraConfig,
    pub lights: LightConfig,
    pub axes: AxesConfig,
    pub placement: PlacementConfig,
    pub viewport: ViewportConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConeConfig {
    pub radius: f32,
    pub height: f32,
    pub radial_segments: u32,
    pub height_segments: u32,
    pub open_ended: bool,
    pub theta_start: f32,
    pub theta_length: f32,
    pub color: u32,
}

impl Default for ConeConfig {
    fn default() -> Self {
        Self {
            radius: CONE_RADIUS,
            height: CONE_HEIGHT,
            radial_segments: CONE_RADIAL_SEGMENTS,
            height_segments: CONE_HEIGHT_SEGMENTS,
            open_ended: CONE_OPEN_ENDED,
            theta_start: CONE_THETA_START,
            theta_length: CONE_THETA_LENGTH,
            color: CONE_WIREFRAME_COLOR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fovy_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub eye: [f32; 3],
    pub target: [f32; 3],
    pub min_distance: f32,
    pub max_distance: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fovy_degrees: CAMERA_FOVY_DEGREES,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            eye: [0.0, 0.0, CAMERA_Z],
            target: [0.0, 0.0, 0.0],
            min_distance: ORBIT_MIN_DISTANCE,
            max_distance: ORBIT_MAX_DISTANCE,
            rotate_speed: ORBIT_ROTATE_SPEED,
            zoom_speed: ORBIT_ZOOM_SPEED,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightConfig {
    pub ambient: u32,
    pub directional: Vec<DirectionalLightConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectionalLightConfig {
    pub color: u32,
    pub intensity: f32,
    /// Position of the light; it shines toward the origin.
    pub position: [f32; 3],
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            ambient: AMBIENT_LIGHT_COLOR,
            directional: vec![
                DirectionalLightConfig {
                    color: KEY_LIGHT_COLOR,
                    intensity: DIRECTIONAL_LIGHT_INTENSITY,
                    position: KEY_LIGHT_DIRECTION,
                },
                DirectionalLightConfig {
                    color: FILL_LIGHT_COLOR,
                    intensity: DIRECTIONAL_LIGHT_INTENSITY,
                    position: FILL_LIGHT_DIRECTION,
                },
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxesConfig {
    pub length: f32,
    pub colors: [u32; 3],
}

impl Default for AxesConfig {
    fn default() -> Self {
        Self {
            length: AXIS_LENGTH,
            colors: AXIS_COLORS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    pub min_scale: f32,
    pub max_scale: f32,
    pub rotate: bool,
    /// Fixed RNG seed; `None` lets the frontend pick one.
    pub seed: Option<u64>,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            min_scale: DEFAULT_MIN_SCALE,
            max_scale: DEFAULT_MAX_SCALE,
            rotate: DEFAULT_ROTATE,
            seed: None,
        }
    }
}

/// Initial drawable size in physical pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

impl SceneConfig {
    /// Parse a TOML document. Missing fields use defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load options from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load from `path` when it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) if p.exists() => {
                log::info!("[config] loading {}", p.display());
                Self::load(p)
            }
            Some(p) => {
                log::warn!("[config] {} not found, using defaults", p.display());
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    /// Reject values that would leave the scene half-built.
    pub fn validate(&self) -> Result<()> {
        let cone = &self.cone;
        if !(cone.radius.is_finite() && cone.radius > 0.0) {
            return Err(DecalError::InvalidConfig(format!(
                "cone radius must be positive, got {}",
                cone.radius
            )));
        }
        if !(cone.height.is_finite() && cone.height > 0.0) {
            return Err(DecalError::InvalidConfig(format!(
                "cone height must be positive, got {}",
                cone.height
            )));
        }
        if cone.radial_segments < 3 {
            return Err(DecalError::InvalidConfig(format!(
                "cone needs at least 3 radial segments, got {}",
                cone.radial_segments
            )));
        }
        if cone.height_segments < 1 {
            return Err(DecalError::InvalidConfig(
                "cone needs at least 1 height segment".into(),
            ));
        }
        if !(cone.theta_length > 0.0 && cone.theta_length <= std::f32::consts::TAU + 1e-4) {
            return Err(DecalError::InvalidConfig(format!(
                "cone theta length must be in (0, 2π], got {}",
                cone.theta_length
            )));
        }

        let cam = &self.camera;
        if !(cam.near > 0.0 && cam.far > cam.near) {
            return Err(DecalError::InvalidConfig(format!(
                "camera planes must satisfy 0 < near < far, got near={} far={}",
                cam.near, cam.far
            )));
        }
        if !(cam.fovy_degrees > 0.0 && cam.fovy_degrees < 180.0) {
            return Err(DecalError::InvalidConfig(format!(
                "camera fov must be in (0, 180) degrees, got {}",
                cam.fovy_degrees
            )));
        }
        if !(cam.min_distance > 0.0 && cam.max_distance >= cam.min_distance) {
            return Err(DecalError::InvalidConfig(format!(
                "orbit distance range is empty: {}..{}",
                cam.min_distance, cam.max_distance
            )));
        }
        let eye = glam::Vec3::from(cam.eye);
        let target = glam::Vec3::from(cam.target);
        if (eye - target).length_squared() == 0.0 {
            return Err(DecalError::InvalidConfig(
                "camera eye and target coincide".into(),
            ));
        }

        let p = &self.placement;
        if !(p.min_scale.is_finite() && p.max_scale.is_finite()) {
            return Err(DecalError::InvalidConfig(
                "placement scales must be finite".into(),
            ));
        }
        if p.min_scale <= 0.0 || p.max_scale <= 0.0 {
            return Err(DecalError::InvalidConfig(format!(
                "placement scales must be positive, got {}..{}",
                p.min_scale, p.max_scale
            )));
        }

        if self.viewport.width == 0 || self.viewport.height == 0 {
            return Err(DecalError::InvalidConfig(format!(
                "viewport must be non-empty, got {}x{}",
                self.viewport.width, self.viewport.height
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constants_and_validate() {
        let cfg = SceneConfig::default();
        assert_eq!(cfg.cone.radius, CONE_RADIUS);
        assert_eq!(cfg.camera.eye, [0.0, 0.0, CAMERA_Z]);
        assert_eq!(cfg.lights.directional.len(), 2);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let cfg = SceneConfig::from_toml_str(
            r#"
            [cone]
            radius = 4.0

            [placement]
            rotate = false
            seed = 7
            "#,
        )
        .unwrap();
        assert_eq!(cfg.cone.radius, 4.0);
        assert_eq!(cfg.cone.height, CONE_HEIGHT);
        assert!(!cfg.placement.rotate);
        assert_eq!(cfg.placement.seed, Some(7));
        assert_eq!(cfg.placement.max_scale, DEFAULT_MAX_SCALE);
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = SceneConfig::from_toml_str("[cone\nradius = ").unwrap_err();
        assert!(matches!(err, DecalError::ConfigParse(_)));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let mut cfg = SceneConfig::default();
        cfg.cone.radius = 0.0;
        assert!(matches!(cfg.validate(), Err(DecalError::InvalidConfig(_))));

        let mut cfg = SceneConfig::default();
        cfg.camera.near = 10.0;
        cfg.camera.far = 5.0;
        assert!(cfg.validate().is_err());

        let mut cfg = SceneConfig::default();
        cfg.cone.radial_segments = 2;
        assert!(cfg.validate().is_err());

        let mut cfg = SceneConfig::default();
        cfg.viewport.height = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn swapped_scales_are_not_a_config_error() {
        let mut cfg = SceneConfig::default();
        cfg.placement.min_scale = 25.0;
        cfg.placement.max_scale = 5.0;
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let cfg = SceneConfig::load_or_default(Some(Path::new("/definitely/not/here.toml"))).unwrap();
        assert_eq!(cfg, SceneConfig::default());
    }
}
