//! Small math helpers shared by the tracker, projector and renderers.
//!
//! Orientation follows the conventions of the scene graph the demo was
//! designed around: Euler angles are applied in `XYZ` order and `look_at`
//! turns an object's local +Z axis toward a target point.

use glam::{Mat3, Quat, Vec3};

/// Euler angles in radians, applied as `Rx * Ry * Rz`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Euler {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Euler {
    pub const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn to_quat(self) -> Quat {
        Quat::from_rotation_x(self.x) * Quat::from_rotation_y(self.y) * Quat::from_rotation_z(self.z)
    }

    /// Decompose a rotation into `XYZ` angles. Gimbal lock pins `z` to zero.
    pub fn from_quat(q: Quat) -> Self {
        let m = Mat3::from_quat(q.normalize());
        let m11 = m.x_axis.x;
        let m12 = m.y_axis.x;
        let m13 = m.z_axis.x;
        let m22 = m.y_axis.y;
        let m23 = m.z_axis.y;
        let m32 = m.y_axis.z;
        let m33 = m.z_axis.z;

        let y = m13.clamp(-1.0, 1.0).asin();
        if m13.abs() < 0.999_999_9 {
            Self {
                x: (-m23).atan2(m33),
                y,
                z: (-m12).atan2(m11),
            }
        } else {
            Self {
                x: m32.atan2(m22),
                y,
                z: 0.0,
            }
        }
    }
}

/// Rotation that points an object's local +Z axis from `position` toward `target`.
pub fn look_at_rotation(position: Vec3, target: Vec3, up: Vec3) -> Quat {
    let mut z = target - position;
    if z.length_squared() == 0.0 {
        z.z = 1.0;
    }
    z = z.normalize();
    let mut x = up.cross(z);
    if x.length_squared() == 0.0 {
        // up and z are parallel; nudge z off the axis
        if up.z.abs() == 1.0 {
            z.x += 0.0001;
        } else {
            z.z += 0.0001;
        }
        z = z.normalize();
        x = up.cross(z);
    }
    x = x.normalize();
    let y = z.cross(x);
    Quat::from_mat3(&Mat3::from_cols(x, y, z))
}

/// sRGB color parsed from a 24-bit hex value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Color {
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    pub fn from_hex(hex: u32) -> Self {
        let hex = hex & 0xff_ffff;
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
        }
    }

    pub fn to_hex(self) -> u32 {
        let c = |v: f32| ((v.clamp(0.0, 1.0) * 255.0).round() as u32) & 0xff;
        (c(self.r) << 16) | (c(self.g) << 8) | c(self.b)
    }

    /// Linear-light components for shading.
    pub fn to_linear(self) -> [f32; 3] {
        [
            srgb_to_linear(self.r),
            srgb_to_linear(self.g),
            srgb_to_linear(self.b),
        ]
    }

    pub fn to_linear_rgba(self, alpha: f32) -> [f32; 4] {
        let [r, g, b] = self.to_linear();
        [r, g, b, alpha]
    }
}

#[inline]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c < 0.04045 {
        c * 0.077_399_38
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn euler_quat_round_trip() {
        let e = Euler::new(0.3, -0.7, 1.2);
        let back = Euler::from_quat(e.to_quat());
        assert!((e.x - back.x).abs() < 1e-5);
        assert!((e.y - back.y).abs() < 1e-5);
        assert!((e.z - back.z).abs() < 1e-5);
    }

    #[test]
    fn euler_applies_z_first() {
        // Rx(90°) * Rz(90°) sends +X to +Y then to +Z.
        let q = Euler::new(std::f32::consts::FRAC_PI_2, 0.0, std::f32::consts::FRAC_PI_2).to_quat();
        assert!(approx(q * Vec3::X, Vec3::Z));
    }

    #[test]
    fn look_at_points_local_z_at_target() {
        let q = look_at_rotation(Vec3::new(1.0, 2.0, 3.0), Vec3::new(1.0, 2.0, 13.0), Vec3::Y);
        assert!(approx(q * Vec3::Z, Vec3::Z));
        let q = look_at_rotation(Vec3::ZERO, Vec3::new(5.0, 0.0, 0.0), Vec3::Y);
        assert!(approx(q * Vec3::Z, Vec3::X));
        assert!(approx(q * Vec3::Y, Vec3::Y));
    }

    #[test]
    fn look_at_along_up_axis_stays_finite() {
        let q = look_at_rotation(Vec3::ZERO, Vec3::new(0.0, 10.0, 0.0), Vec3::Y);
        let z = q * Vec3::Z;
        assert!(z.is_finite());
        assert!(z.dot(Vec3::Y) > 0.999);
    }

    #[test]
    fn hex_colors() {
        let c = Color::from_hex(0xff8000);
        assert_eq!(c.r, 1.0);
        assert!((c.g - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.b, 0.0);
        assert_eq!(c.to_hex(), 0xff8000);
        let lin = Color::from_hex(0x808080).to_linear();
        assert!((lin[0] - 0.2158).abs() < 1e-3);
    }
}
