use rand::Rng;

use crate::constants::{DECAL_POLYGON_OFFSET_FACTOR, DECAL_SHININESS, DECAL_SPECULAR};
use crate::math::Color;

/// Phong-style surface settings for a decal. Every decal carries its own
/// copy so tints never leak between instances.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DecalMaterial {
    /// Multiplies the shared decal texture.
    pub color: Color,
    pub specular: Color,
    pub shininess: f32,
    pub transparent: bool,
    pub depth_test: bool,
    pub depth_write: bool,
    /// Pulls the decal toward the camera so it wins the depth test against
    /// the surface it was projected onto.
    pub polygon_offset_factor: f32,
}

impl Default for DecalMaterial {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            specular: Color::from_hex(DECAL_SPECULAR),
            shininess: DECAL_SHININESS,
            transparent: true,
            depth_test: true,
            depth_write: false,
            polygon_offset_factor: DECAL_POLYGON_OFFSET_FACTOR,
        }
    }
}

impl DecalMaterial {
    /// Copy of this material with a uniformly random 24-bit color.
    pub fn clone_with_random_tint<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        Self {
            color: Color::from_hex(rng.gen_range(0..0xff_ffff)),
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn shared_material_defaults() {
        let m = DecalMaterial::default();
        assert_eq!(m.specular.to_hex(), 0x444444);
        assert_eq!(m.shininess, 30.0);
        assert!(m.transparent && m.depth_test && !m.depth_write);
        assert_eq!(m.polygon_offset_factor, -4.0);
    }

    #[test]
    fn tinted_clone_leaves_source_untouched() {
        let shared = DecalMaterial::default();
        let mut rng = StdRng::seed_from_u64(3);
        let a = shared.clone_with_random_tint(&mut rng);
        let b = shared.clone_with_random_tint(&mut rng);
        assert_eq!(shared.color, Color::WHITE);
        assert_ne!(a.color, b.color);
        assert_eq!(a.shininess, shared.shininess);
        assert_eq!(a.depth_write, shared.depth_write);
    }
}
