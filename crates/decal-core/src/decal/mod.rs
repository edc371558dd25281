//! Placed decals and the geometry they draw with.

pub mod projector;

use glam::{Vec2, Vec3};

use crate::material::DecalMaterial;
use crate::math::Euler;

pub use projector::{BoxClipProjector, DecalProjector};

/// Non-indexed triangle list in world space.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DecalGeometry {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
}

impl DecalGeometry {
    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[derive(Clone, Debug)]
pub struct DecalInstance {
    pub geometry: DecalGeometry,
    pub material: DecalMaterial,
    /// Draw position among decals; equals the list length at insertion.
    pub render_order: u32,
    pub position: Vec3,
    pub orientation: Euler,
    pub size: Vec3,
}

/// Insertion-ordered set of visible decals.
#[derive(Clone, Debug, Default)]
pub struct DecalSet {
    decals: Vec<DecalInstance>,
}

impl DecalSet {
    /// Append a decal, stamping its render order. Returns that order.
    pub fn push(
        &mut self,
        geometry: DecalGeometry,
        material: DecalMaterial,
        position: Vec3,
        orientation: Euler,
        size: Vec3,
    ) -> u32 {
        let render_order = self.decals.len() as u32;
        self.decals.push(DecalInstance {
            geometry,
            material,
            render_order,
            position,
            orientation,
            size,
        });
        render_order
    }

    /// Drop every decal; returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.decals.len();
        self.decals.clear();
        removed
    }

    pub fn len(&self) -> usize {
        self.decals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decals.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DecalInstance> {
        self.decals.iter()
    }

    pub fn as_slice(&self) -> &[DecalInstance] {
        &self.decals
    }
}

impl<'a> IntoIterator for &'a DecalSet {
    type Item = &'a DecalInstance;
    type IntoIter = std::slice::Iter<'a, DecalInstance>;

    fn into_iter(self) -> Self::IntoIter {
        self.decals.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push_empty(set: &mut DecalSet) -> u32 {
        set.push(
            DecalGeometry::default(),
            DecalMaterial::default(),
            Vec3::ZERO,
            Euler::IDENTITY,
            Vec3::ONE,
        )
    }

    #[test]
    fn render_order_follows_insertion_and_restarts_after_clear() {
        let mut set = DecalSet::default();
        for expected in 0..4 {
            assert_eq!(push_empty(&mut set), expected);
        }
        let orders: Vec<u32> = set.iter().map(|d| d.render_order).collect();
        assert_eq!(orders, [0, 1, 2, 3]);

        assert_eq!(set.clear(), 4);
        assert_eq!(set.clear(), 0);
        assert!(set.is_empty());
        assert_eq!(push_empty(&mut set), 0);
    }
}
