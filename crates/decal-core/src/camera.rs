//! Perspective camera, orbit controls and pointer-to-ray conversion.
//!
//! These types avoid platform APIs so both frontends (and the host-side
//! tests) build the exact same view and picking rays.

use glam::{Mat4, Quat, Vec2, Vec3, Vec4};

use crate::config::CameraConfig;
use crate::raycast::Ray;

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn new(config: &CameraConfig, aspect: f32) -> Self {
        Self {
            eye: Vec3::from(config.eye),
            target: Vec3::from(config.target),
            up: Vec3::Y,
            aspect,
            fovy_radians: config.fovy_degrees.to_radians(),
            znear: config.near,
            zfar: config.far,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// World-space ray from the eye through a normalized device coordinate.
    pub fn ray_through_ndc(&self, ndc: Vec2) -> Ray {
        let inv = self.view_projection().inverse();
        let p_far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let p1: Vec3 = p_far.truncate() / p_far.w;
        Ray::new(self.eye, (p1 - self.eye).normalize())
    }

    /// Project a world point to normalized device coordinates.
    pub fn world_to_ndc(&self, p: Vec3) -> Vec3 {
        self.view_projection().project_point3(p)
    }
}

/// Drawable area in physical pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    /// Pixel position (origin top-left) to NDC in [-1, 1], +y up.
    pub fn to_ndc(&self, px: Vec2) -> Vec2 {
        let w = self.width.max(1) as f32;
        let h = self.height.max(1) as f32;
        Vec2::new((px.x / w) * 2.0 - 1.0, -(px.y / h) * 2.0 + 1.0)
    }

    pub fn from_ndc(&self, ndc: Vec2) -> Vec2 {
        let w = self.width as f32;
        let h = self.height as f32;
        Vec2::new((ndc.x + 1.0) * 0.5 * w, (1.0 - ndc.y) * 0.5 * h)
    }
}

/// Orbit controls: the eye circles a focus point at a clamped distance.
#[derive(Clone, Debug)]
pub struct OrbitController {
    orientation: Quat,
    distance: f32,
    focus_point: Vec3,
    min_distance: f32,
    max_distance: f32,
    rotate_speed: f32,
    zoom_speed: f32,
}

impl OrbitController {
    pub fn new(config: &CameraConfig) -> Self {
        let focus_point = Vec3::from(config.target);
        let offset = Vec3::from(config.eye) - focus_point;
        let distance = offset
            .length()
            .clamp(config.min_distance, config.max_distance);
        let orientation = Quat::from_rotation_arc(Vec3::Z, offset.normalize());
        Self {
            orientation,
            distance,
            focus_point,
            min_distance: config.min_distance,
            max_distance: config.max_distance,
            rotate_speed: config.rotate_speed,
            zoom_speed: config.zoom_speed,
        }
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Write eye/target/up into `camera`.
    pub fn apply(&self, camera: &mut Camera) {
        let dir = self.orientation * Vec3::Z;
        camera.eye = self.focus_point + dir * self.distance;
        camera.target = self.focus_point;
        camera.up = self.orientation * Vec3::Y;
    }

    /// Rotate by a pointer drag in pixels. Returns whether the view changed.
    pub fn rotate(&mut self, delta: Vec2, viewport: Viewport) -> bool {
        if delta == Vec2::ZERO {
            return false;
        }
        let per_pixel = std::f32::consts::TAU * self.rotate_speed / viewport.height.max(1) as f32;

        // Horizontal rotation around the camera's up vector
        let up = self.orientation * Vec3::Y;
        self.orientation = Quat::from_axis_angle(up, -delta.x * per_pixel) * self.orientation;

        // Vertical rotation around the camera's right vector
        let right = self.orientation * Vec3::X;
        self.orientation = Quat::from_axis_angle(right, -delta.y * per_pixel) * self.orientation;
        self.orientation = self.orientation.normalize();
        true
    }

    /// Dolly toward (positive) or away from (negative) the focus point.
    pub fn zoom(&mut self, delta: f32) -> bool {
        let before = self.distance;
        self.distance = (self.distance * (1.0 - delta * self.zoom_speed))
            .clamp(self.min_distance, self.max_distance);
        self.distance != before
    }
}
