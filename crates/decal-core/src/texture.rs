//! Decal texture generated in code, so neither front-end has to load an image.

use crate::error::{DecalError, Result};

const RING_COUNT: f32 = 4.0;
const CROSSHAIR_HALF_WIDTH: f32 = 0.015;

/// Tightly packed RGBA8 image.
#[derive(Clone, Debug, PartialEq)]
pub struct DecalTexture {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl DecalTexture {
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(DecalError::InvalidTexture(format!(
                "texture must be non-empty, got {width}x{height}"
            )));
        }
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(DecalError::InvalidTexture(format!(
                "expected {expected} bytes for {width}x{height} RGBA, got {}",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// White "focus" target: concentric rings and a crosshair on a transparent
    /// background. The material tint supplies the color.
    pub fn focus(size: u32) -> Result<Self> {
        if size == 0 {
            return Err(DecalError::InvalidTexture("focus texture size is zero".into()));
        }
        let mut pixels = Vec::with_capacity(size as usize * size as usize * 4);
        let inv = 1.0 / size as f32;
        for y in 0..size {
            for x in 0..size {
                // -1..1 across the image, sampled at texel centers
                let u = ((x as f32 + 0.5) * inv) * 2.0 - 1.0;
                let v = ((y as f32 + 0.5) * inv) * 2.0 - 1.0;
                let r = (u * u + v * v).sqrt();
                let alpha = if r > 1.0 {
                    0.0
                } else {
                    let ring = (r * RING_COUNT).fract() < 0.5;
                    let cross = u.abs() < CROSSHAIR_HALF_WIDTH || v.abs() < CROSSHAIR_HALF_WIDTH;
                    if cross || ring {
                        1.0
                    } else {
                        0.25
                    }
                };
                pixels.extend_from_slice(&[255, 255, 255, (alpha * 255.0) as u8]);
            }
        }
        Self::from_rgba(size, size, pixels)
    }

    pub fn alpha_at(&self, x: u32, y: u32) -> u8 {
        self.pixels[((y * self.width + x) * 4 + 3) as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_texture_has_transparent_corners_and_opaque_center() {
        let t = DecalTexture::focus(64).unwrap();
        assert_eq!(t.pixels.len(), 64 * 64 * 4);
        assert_eq!(t.alpha_at(0, 0), 0);
        assert_eq!(t.alpha_at(63, 63), 0);
        assert_eq!(t.alpha_at(32, 32), 255);
    }

    #[test]
    fn invalid_dimensions_are_rejected() {
        assert!(matches!(
            DecalTexture::focus(0),
            Err(DecalError::InvalidTexture(_))
        ));
        assert!(DecalTexture::from_rgba(2, 2, vec![0; 15]).is_err());
        assert!(DecalTexture::from_rgba(2, 2, vec![0; 16]).is_ok());
    }
}
