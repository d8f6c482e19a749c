use anyhow::bail;

use crate::Color;

/// An 8-bit RGB raster. Pixels are stored row-major, three bytes each, with no
/// padding between rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl Image {
    /// A black image.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; 3 * width * height],
        }
    }

    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> anyhow::Result<Self> {
        let expected = 3 * width * height;
        if data.len() != expected {
            bail!(
                "A {width}x{height} RGB image needs {expected} bytes, found {}",
                data.len()
            );
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Bytes per row.
    pub fn row_size(&self) -> usize {
        3 * self.width
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        // `chunks(0)` panics, and a zero-width image has no bytes to split.
        self.data.chunks(self.row_size().max(1))
    }

    /// # Panics
    ///
    /// Panics if `(x, y)` lies outside the image.
    pub fn get_pixel_color(&self, x: usize, y: usize) -> Color {
        let offset = self.offset(x, y);
        Color::new(
            self.data[offset],
            self.data[offset + 1],
            self.data[offset + 2],
        )
    }

    /// # Panics
    ///
    /// Panics if `(x, y)` lies outside the image.
    pub fn set_pixel_color(&mut self, color: Color, x: usize, y: usize) {
        let offset = self.offset(x, y);
        self.data[offset..offset + 3].copy_from_slice(&<[u8; 3]>::from(color));
    }

    fn offset(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) is outside a {}x{} image",
            self.width,
            self.height
        );
        self.row_size() * y + 3 * x
    }
}
