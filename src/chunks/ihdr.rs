use std::borrow::Cow;

use anyhow::{anyhow, bail};
use nom::{
    number::complete::{be_u32, be_u8},
    sequence::tuple,
};

use super::{nom_error, ParseableChunk};
use crate::utils::div_ceil;

/// The image header: dimensions and the layout of the encoded samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IHDRChunk {
    pub width: u32,
    pub height: u32,
    pub(crate) bit_depth: u8,
    pub(crate) color_type: ColorType,
    pub(crate) interlace_method: Interlacing,
}
impl IHDRChunk {
    /// Header for the only layout this crate writes: 8-bit RGB, not interlaced.
    pub(crate) fn rgb8(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bit_depth: 8,
            color_type: ColorType::Truecolor,
            interlace_method: Interlacing::None,
        }
    }

    pub fn bit_depth(&self) -> u8 {
        self.bit_depth
    }

    pub fn color_type(&self) -> ColorType {
        self.color_type
    }

    pub fn is_interlaced(&self) -> bool {
        matches!(self.interlace_method, Interlacing::Adam7)
    }

    /// Distance in bytes to the corresponding byte of the previous pixel.
    pub(crate) fn filter_width(&self) -> usize {
        let sample_width = u8::max(self.bit_depth / 8, 1);
        (self.color_type.channel_count() * sample_width) as usize
    }

    /// Bits per pixel.
    pub(crate) fn pixel_width(&self) -> usize {
        self.color_type.channel_count() as usize * self.bit_depth as usize
    }

    /// Bytes in one scanline of `width` pixels, filter type byte included.
    pub(crate) fn scanline_size(&self, width: usize) -> anyhow::Result<usize> {
        width
            .checked_mul(self.pixel_width())
            .map(|bits| div_ceil(bits, 8) + 1)
            .ok_or_else(|| self.too_large())
    }

    pub(crate) fn too_large(&self) -> anyhow::Error {
        anyhow!(
            "Image dimensions {}x{} are too large",
            self.width,
            self.height
        )
    }
}
impl<'a> ParseableChunk<'a> for IHDRChunk {
    const HEADER: &'static [u8; 4] = b"IHDR";

    fn from_bytes(chunk_data: &'a [u8]) -> anyhow::Result<Self> {
        if chunk_data.len() != 13 {
            bail!("IHDR chunk must be 13 bytes, found {}", chunk_data.len());
        }
        let (_, (width, height, bit_depth, color_type, compression, filter, interlace)) =
            tuple((be_u32, be_u32, be_u8, be_u8, be_u8, be_u8, be_u8))(chunk_data)
                .map_err(|e| nom_error("IHDR chunk", e))?;

        if width == 0 || height == 0 {
            bail!("Image dimensions must be non-zero, found {width}x{height}");
        }
        if width > i32::MAX as u32 || height > i32::MAX as u32 {
            bail!("Image dimensions {width}x{height} exceed the PNG limit");
        }
        let color_type = ColorType::try_from(color_type)?;
        if !color_type.allows_bit_depth(bit_depth) {
            bail!("Bit depth {bit_depth} is not allowed for {color_type:?} images");
        }
        if compression != 0 {
            bail!("Unknown compression method {compression}");
        }
        if filter != 0 {
            bail!("Unknown filter method {filter}");
        }

        Ok(IHDRChunk {
            width,
            height,
            bit_depth,
            color_type,
            interlace_method: Interlacing::try_from(interlace)?,
        })
    }

    fn data(&self) -> Cow<'_, [u8]> {
        let mut bytes = Vec::with_capacity(13);
        bytes.extend(self.width.to_be_bytes());
        bytes.extend(self.height.to_be_bytes());
        bytes.extend([
            self.bit_depth,
            self.color_type as u8,
            0,
            0,
            self.interlace_method as u8,
        ]);
        Cow::Owned(bytes)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ColorType {
    #[default]
    Greyscale = 0,
    Truecolor = 2,
    IndexedColor = 3,
    GreyscaleWithAlpha = 4,
    TruecolorWithAlpha = 6,
}
impl TryFrom<u8> for ColorType {
    type Error = anyhow::Error;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Greyscale),
            2 => Ok(Self::Truecolor),
            3 => Ok(Self::IndexedColor),
            4 => Ok(Self::GreyscaleWithAlpha),
            6 => Ok(Self::TruecolorWithAlpha),
            i => Err(anyhow!("Unknown color type {i}")),
        }
    }
}
impl ColorType {
    pub fn channel_count(&self) -> u8 {
        match self {
            Self::Greyscale => 1,
            Self::IndexedColor => 1,
            Self::GreyscaleWithAlpha => 2,
            Self::Truecolor => 3,
            Self::TruecolorWithAlpha => 4,
        }
    }

    fn allows_bit_depth(&self, bit_depth: u8) -> bool {
        match self {
            Self::Greyscale => matches!(bit_depth, 1 | 2 | 4 | 8 | 16),
            Self::IndexedColor => matches!(bit_depth, 1 | 2 | 4 | 8),
            Self::Truecolor | Self::GreyscaleWithAlpha | Self::TruecolorWithAlpha => {
                matches!(bit_depth, 8 | 16)
            }
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Interlacing {
    #[default]
    None = 0,
    Adam7 = 1,
}
impl TryFrom<u8> for Interlacing {
    type Error = anyhow::Error;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::None),
            1 => Ok(Self::Adam7),
            i => Err(anyhow!("Unknown interlace method {i}")),
        }
    }
}
