/// RGBA textures sampled on the CPU
use std::fmt;

use nalgebra::{Point2, Vector3};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextureError {
    Empty,
    SizeMismatch { expected: usize, actual: usize },
}

impl fmt::Display for TextureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "texture has no pixels"),
            Self::SizeMismatch { expected, actual } => {
                write!(f, "expected {expected} bytes of RGBA data, got {actual}")
            }
        }
    }
}

impl std::error::Error for TextureError {}

/// An RGBA8 image stored top row first
#[derive(Debug, Clone)]
pub struct Texture {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl Texture {
    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, TextureError> {
        if width == 0 || height == 0 {
            return Err(TextureError::Empty);
        }
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(TextureError::SizeMismatch {
                expected,
                actual: rgba.len(),
            });
        }
        Ok(Self {
            width,
            height,
            rgba,
        })
    }

    /// Two-tone checkerboard with `cells` squares per side.
    pub fn checkerboard(size: u32, cells: u32) -> Self {
        let size = size.max(1);
        let cell = (size / cells.max(1)).max(1);
        let mut rgba = Vec::with_capacity(size as usize * size as usize * 4);
        for y in 0..size {
            for x in 0..size {
                let texel: [u8; 4] = if (x / cell + y / cell) % 2 == 0 {
                    [40, 90, 200, 255]
                } else {
                    [235, 235, 235, 255]
                };
                rgba.extend_from_slice(&texel);
            }
        }
        Self {
            width: size,
            height: size,
            rgba,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn texel(&self, x: u32, y: u32) -> Vector3<f32> {
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        let px = &self.rgba[offset..offset + 3];
        Vector3::new(px[0], px[1], px[2]).map(|c| c as f32 / 255.0)
    }

    /// Bilinear sample with clamp-to-edge.
    ///
    /// `v = 0` is the bottom row of the image, as with a Y-flipped upload.
    pub fn sample(&self, uv: &Point2<f32>) -> Vector3<f32> {
        let u = uv.x.clamp(0.0, 1.0);
        let v = uv.y.clamp(0.0, 1.0);

        // Texel centres sit at half-integer coordinates
        let fx = (u * self.width as f32 - 0.5).max(0.0);
        let fy = ((1.0 - v) * self.height as f32 - 0.5).max(0.0);

        let x0 = (fx.floor() as u32).min(self.width - 1);
        let y0 = (fy.floor() as u32).min(self.height - 1);
        let x1 = (x0 + 1).min(self.width - 1);
        let y1 = (y0 + 1).min(self.height - 1);
        let tx = fx - x0 as f32;
        let ty = fy - y0 as f32;

        let top = self.texel(x0, y0).lerp(&self.texel(x1, y0), tx);
        let bottom = self.texel(x0, y1).lerp(&self.texel(x1, y1), tx);
        top.lerp(&bottom, ty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_rows() -> Texture {
        // Top row red, bottom row blue
        let rgba = vec![
            255, 0, 0, 255, 255, 0, 0, 255, //
            0, 0, 255, 255, 0, 0, 255, 255,
        ];
        Texture::from_rgba(2, 2, rgba).unwrap()
    }

    #[test]
    fn test_from_rgba_validates() {
        assert_eq!(Texture::from_rgba(0, 4, vec![]).unwrap_err(), TextureError::Empty);
        assert_eq!(
            Texture::from_rgba(2, 2, vec![0; 15]).unwrap_err(),
            TextureError::SizeMismatch {
                expected: 16,
                actual: 15
            }
        );
    }

    #[test]
    fn test_sample_is_flipped() {
        let texture = two_rows();
        let bottom = texture.sample(&Point2::new(0.5, 0.0));
        let top = texture.sample(&Point2::new(0.5, 1.0));
        assert!((bottom - Vector3::new(0.0, 0.0, 1.0)).norm() < 1e-6);
        assert!((top - Vector3::new(1.0, 0.0, 0.0)).norm() < 1e-6);

        let middle = texture.sample(&Point2::new(0.5, 0.5));
        assert!((middle - Vector3::new(0.5, 0.0, 0.5)).norm() < 1e-6);
    }

    #[test]
    fn test_sample_clamps() {
        let texture = two_rows();
        let outside = texture.sample(&Point2::new(-3.0, 7.0));
        assert!((outside - Vector3::new(1.0, 0.0, 0.0)).norm() < 1e-6);
    }

    #[test]
    fn test_checkerboard() {
        let texture = Texture::checkerboard(8, 2);
        assert_eq!((texture.width(), texture.height()), (8, 8));
        let a = texture.sample(&Point2::new(0.1, 0.9));
        let b = texture.sample(&Point2::new(0.9, 0.9));
        assert!((a - b).norm() > 0.5);
    }
}
