use anyhow::{anyhow, bail};

use crate::{
    chunks::{
        ihdr::{ColorType, IHDRChunk},
        plte::PLTEChunk,
    },
    image::Image,
    scanlines::Pass,
    utils::scale_to_u8,
};

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}
impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    const fn grey(value: u8) -> Self {
        Self::new(value, value, value)
    }
}
impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}
impl From<Color> for [u8; 3] {
    fn from(color: Color) -> Self {
        [color.r, color.g, color.b]
    }
}

/// Unpacks the samples of one scanline, most significant bits first.
struct Samples<'a> {
    row: &'a [u8],
    bit_depth: u8,
    bit_offset: usize,
}
impl<'a> Samples<'a> {
    fn new(row: &'a [u8], bit_depth: u8) -> Self {
        Self {
            row,
            bit_depth,
            bit_offset: 0,
        }
    }
}
impl Iterator for Samples<'_> {
    type Item = u16;
    fn next(&mut self) -> Option<Self::Item> {
        let index = self.bit_offset / 8;
        let sample = match self.bit_depth {
            16 => u16::from_be_bytes([*self.row.get(index)?, *self.row.get(index + 1)?]),
            8 => *self.row.get(index)? as u16,
            depth => {
                let shift = 8 - depth as usize - self.bit_offset % 8;
                let mask = (1u8 << depth) - 1;
                ((*self.row.get(index)? >> shift) & mask) as u16
            }
        };
        self.bit_offset += self.bit_depth as usize;
        Some(sample)
    }
}

/// Converts one pixel's raw samples to 8-bit RGB. Alpha is dropped, grey is
/// replicated across the three channels and palette indices are looked up.
fn sample_color(
    samples: &[u16],
    header: &IHDRChunk,
    palette: Option<&PLTEChunk>,
) -> anyhow::Result<Color> {
    let depth = header.bit_depth;
    let color = match header.color_type {
        ColorType::Greyscale | ColorType::GreyscaleWithAlpha => {
            Color::grey(scale_to_u8(samples[0], depth))
        }
        ColorType::Truecolor | ColorType::TruecolorWithAlpha => Color::new(
            scale_to_u8(samples[0], depth),
            scale_to_u8(samples[1], depth),
            scale_to_u8(samples[2], depth),
        ),
        ColorType::IndexedColor => {
            let palette = palette.ok_or_else(|| anyhow!("Indexed image has no PLTE chunk"))?;
            let index = samples[0] as u8;
            palette.get_color(index).ok_or_else(|| {
                anyhow!(
                    "Palette index {index} is out of range for {} entries",
                    palette.len()
                )
            })?
        }
    };
    Ok(color)
}

/// Builds the RGB raster from reconstructed scanlines, placing every pass's
/// pixels at their final positions.
pub(crate) fn to_rgb_image(
    data: &[u8],
    header: &IHDRChunk,
    palette: Option<&PLTEChunk>,
    passes: Vec<Pass>,
) -> anyhow::Result<Image> {
    if header.color_type == ColorType::IndexedColor && palette.is_none() {
        bail!("Indexed image has no PLTE chunk");
    }
    let width = header.width as usize;
    let mut image = Image::new(width, header.height as usize);
    let channels = header.color_type.channel_count() as usize;
    let mut pixel = [0u16; 4];

    for mut pass in passes {
        for scanline in pass.scanlines(data) {
            let mut samples = Samples::new(&scanline[1..], header.bit_depth);
            for _ in 0..pass.sub_image.width {
                for channel in pixel.iter_mut().take(channels) {
                    *channel = samples
                        .next()
                        .ok_or_else(|| anyhow!("Scanline ended before its last pixel"))?;
                }
                let color = sample_color(&pixel[..channels], header, palette)?;
                let index = pass
                    .sub_image
                    .pixel_indices
                    .next()
                    .ok_or_else(|| anyhow!("More pixels in pass than the image holds"))?;
                image.set_pixel_color(color, index % width, index / width);
            }
        }
    }
    Ok(image)
}
