use rand::Rng;

use crate::config::PlacementConfig;

/// User-tunable placement settings, edited through the panel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacementParams {
    pub min_scale: f32,
    pub max_scale: f32,
    /// Spin each decal by a random angle about its projection axis.
    pub rotate: bool,
}

impl Default for PlacementParams {
    fn default() -> Self {
        Self::from(&PlacementConfig::default())
    }
}

impl From<&PlacementConfig> for PlacementParams {
    fn from(c: &PlacementConfig) -> Self {
        Self {
            min_scale: c.min_scale,
            max_scale: c.max_scale,
            rotate: c.rotate,
        }
    }
}

impl PlacementParams {
    /// Scale range with its bounds in ascending order.
    pub fn normalized(&self) -> (f32, f32) {
        if self.min_scale <= self.max_scale {
            (self.min_scale, self.max_scale)
        } else {
            (self.max_scale, self.min_scale)
        }
    }

    pub fn is_inverted(&self) -> bool {
        self.min_scale > self.max_scale
    }

    /// Uniform scale in the normalized `[min, max]` range.
    pub fn sample_scale<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        let (lo, hi) = self.normalized();
        if lo == hi {
            return lo;
        }
        lo + rng.gen::<f32>() * (hi - lo)
    }
}
