//! In-memory raster with binary transparency.

use crate::{
    error::{Error, Result},
    palette::Rgb,
};

/// A width x height grid of pixels, each either an opaque color or transparent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Picture {
    width: u32,
    height: u32,
    /// Horizontal origin offset carried over from the picture header
    pub offset_x: i16,
    /// Vertical origin offset carried over from the picture header
    pub offset_y: i16,
    pixels: Vec<Option<Rgb>>,
}

impl Picture {
    /// Create a fully transparent picture
    pub fn new(width: u32, height: u32) -> Picture {
        Picture {
            width,
            height,
            offset_x: 0,
            offset_y: 0,
            pixels: vec![None; width as usize * height as usize],
        }
    }

    /// Create a picture from row-major RGBA8 data
    ///
    /// Pixels with an alpha of 255 are opaque. Any other alpha value makes the pixel transparent,
    /// unless `strict_alpha` is set in which case values other than 0 and 255 are rejected.
    pub fn from_rgba(width: u32, height: u32, rgba: &[u8], strict_alpha: bool) -> Result<Picture> {
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(Error::BufferSizeMismatch {
                expected,
                actual: rgba.len(),
            });
        }

        let mut picture = Picture::new(width, height);
        for (i, chunk) in rgba.chunks_exact(4).enumerate() {
            let alpha = chunk[3];
            picture.pixels[i] = match alpha {
                255 => Some(Rgb(chunk[0], chunk[1], chunk[2])),
                0 => None,
                _ if strict_alpha => {
                    return Err(Error::UnsupportedPixel {
                        x: (i % width as usize) as u32,
                        y: (i / width as usize) as u32,
                        alpha,
                    })
                }
                _ => None,
            };
        }
        Ok(picture)
    }

    /// Row-major RGBA8 representation, transparent pixels are all zero
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut rgba = Vec::with_capacity(self.pixels.len() * 4);
        for pixel in &self.pixels {
            match pixel {
                Some(Rgb(r, g, b)) => rgba.extend_from_slice(&[*r, *g, *b, 0xFF]),
                None => rgba.extend_from_slice(&[0, 0, 0, 0]),
            }
        }
        rgba
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get a pixel, `None` when transparent or outside of the picture
    pub fn get(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels[self.index(x, y)]
    }

    /// Set a pixel
    ///
    /// # Panics
    ///
    /// Panics when `(x, y)` is outside of the picture.
    pub fn set(&mut self, x: u32, y: u32, pixel: Option<Rgb>) {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) is outside of a {}x{} picture",
            self.width,
            self.height
        );
        let index = self.index(x, y);
        self.pixels[index] = pixel;
    }

    /// Iterate over the pixels of column `x` from top to bottom
    pub fn column(&self, x: u32) -> impl Iterator<Item = Option<Rgb>> + '_ {
        (0..self.height).map(move |y| self.pixels[self.index(x, y)])
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}
