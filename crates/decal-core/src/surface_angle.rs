//! Angular position of a surface point on the cone's lateral face.
//!
//! A point at local height `y` lies on the circle of radius
//! `ρ = radius * height_fraction(y)`. Its chord distance `d` to the seam point
//! `(0, y, ρ)` on that circle gives `cos θ = 1 - d² / (2ρ²)`. The sign of `x`
//! picks the half turn: `x ≥ 0` is `[0, π]`, `x < 0` is `(π, 2π)`. The estimate is
//! kept alongside the intersection state for seam-aware texturing; decal
//! placement does not read it.

use std::f32::consts::TAU;

use glam::Vec3;

use crate::error::{DecalError, Result};
use crate::geometry::ConeGeometry;

/// How far below -1 the cosine may drift before the chord is rejected.
/// Hits on the faceted mesh sit slightly inside the true circle.
pub const COS_TOLERANCE: f32 = 1e-3;

/// Smallest circle radius the chord formula is evaluated on.
pub const MIN_RING_RADIUS: f32 = 1e-4;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceAngle {
    /// Angle around the axis from the +Z seam, in `[0, 2π)`.
    pub theta: f32,
    /// `theta * 2π / slant_length`.
    pub theta_unwrap: f32,
    /// Angle inside the flattened sector, `theta * radius / slant_length`.
    pub sector_angle: f32,
}

/// Estimate the angular coordinate of `local`, a point in the cone's own frame.
pub fn estimate(cone: &ConeGeometry, local: Vec3) -> Result<SurfaceAngle> {
    if !local.is_finite() {
        return Err(DecalError::DegenerateGeometry(format!(
            "non-finite surface point {local}"
        )));
    }

    let rho = cone.radius_at(local.y);
    if !(rho > MIN_RING_RADIUS) {
        return Err(DecalError::DegenerateGeometry(format!(
            "ring radius {rho} at y={} is too small to resolve an angle",
            local.y
        )));
    }

    let reference = Vec3::new(0.0, local.y, rho);
    let chord_sq = (local - reference).length_squared();
    let cos_theta = 1.0 - chord_sq / (2.0 * rho * rho);
    if cos_theta < -1.0 - COS_TOLERANCE {
        return Err(DecalError::DegenerateGeometry(format!(
            "chord {} exceeds ring diameter {}",
            chord_sq.sqrt(),
            2.0 * rho
        )));
    }

    let base = cos_theta.clamp(-1.0, 1.0).acos();
    // acos only spans [0, π]; the lateral side picks the half turn
    let theta = if local.x < 0.0 { TAU - base } else { base };
    let theta = if theta >= TAU { 0.0 } else { theta };

    let slant = cone.slant_length();
    Ok(SurfaceAngle {
        theta,
        theta_unwrap: theta * TAU / slant,
        sector_angle: theta * cone.radius / slant,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn cone() -> ConeGeometry {
        ConeGeometry {
            radius: 10.0,
            height: 10.0,
            radial_segments: 32,
            height_segments: 100,
            open_ended: true,
            theta_start: 0.0,
            theta_length: TAU,
        }
    }

    fn on_ring(cone: &ConeGeometry, y: f32, theta: f32) -> Vec3 {
        let rho = cone.radius_at(y);
        Vec3::new(rho * theta.sin(), y, rho * theta.cos())
    }

    #[test]
    fn front_seam_is_zero() {
        let c = cone();
        let a = estimate(&c, Vec3::new(0.0, -3.0, 8.0)).unwrap();
        assert_eq!(a.theta, 0.0);
        assert_eq!(a.theta_unwrap, 0.0);
    }

    #[test]
    fn quarter_turn_matches_hand_computed_unwrap() {
        let c = cone();
        let a = estimate(&c, on_ring(&c, 0.0, FRAC_PI_2)).unwrap();
        assert!((a.theta - FRAC_PI_2).abs() < 1e-4);
        // (π/2)·2π / √200
        assert!((a.theta_unwrap - 0.697_886).abs() < 1e-4);
        assert!((a.sector_angle - FRAC_PI_2 * 10.0 / 200f32.sqrt()).abs() < 1e-4);
    }

    #[test]
    fn back_and_negative_side() {
        let c = cone();
        let back = estimate(&c, on_ring(&c, 1.0, PI)).unwrap();
        assert!((back.theta - PI).abs() < 1e-3);
        let left = estimate(&c, on_ring(&c, -2.0, 1.5 * PI)).unwrap();
        assert!((left.theta - 1.5 * PI).abs() < 1e-3);
        let near_seam = estimate(&c, on_ring(&c, -2.0, TAU - 0.1)).unwrap();
        assert!((near_seam.theta - (TAU - 0.1)).abs() < 1e-3);
    }

    #[test]
    fn angle_grows_monotonically_around_the_ring() {
        let c = cone();
        let mut last = -1.0;
        for i in 0..16 {
            let theta = i as f32 * TAU / 16.0 + 0.01;
            let a = estimate(&c, on_ring(&c, -4.0, theta)).unwrap();
            assert!(a.theta > last);
            last = a.theta;
        }
    }

    #[test]
    fn chord_longer_than_diameter_is_degenerate() {
        let c = cone();
        // ρ = 5 at y = 0; this point is 4ρ away from the seam reference
        let err = estimate(&c, Vec3::new(0.0, 0.0, -15.0)).unwrap_err();
        assert!(matches!(err, DecalError::DegenerateGeometry(_)));
    }

    #[test]
    fn slightly_inside_the_ring_is_clamped() {
        let c = cone();
        // back point pushed just beyond the diameter, within tolerance
        let rho = c.radius_at(0.0);
        let a = estimate(&c, Vec3::new(0.0, 0.0, -rho * 1.0002)).unwrap();
        assert!((a.theta - PI).abs() < 1e-6);
        assert!(a.theta.is_finite());
    }

    #[test]
    fn apex_and_nan_are_degenerate() {
        let c = cone();
        assert!(estimate(&c, Vec3::new(0.0, 5.0, 0.0)).is_err());
        assert!(estimate(&c, Vec3::new(f32::NAN, 0.0, 1.0)).is_err());
        // above the apex the ring radius goes negative
        assert!(estimate(&c, Vec3::new(0.0, 6.0, 0.0)).is_err());
    }
}
