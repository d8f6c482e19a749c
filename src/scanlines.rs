use std::ops::Range;

use crate::{
    chunks::ihdr::IHDRChunk,
    interlacing::{sub_images, SubImage},
};

/// Where one sub-image's scanlines sit in the inflated data stream.
#[derive(Debug)]
pub(crate) struct Pass {
    pub(crate) sub_image: SubImage,
    pub(crate) scanline_width: usize,
    pub(crate) range: Range<usize>,
}
impl Pass {
    pub(crate) fn scanlines<'a>(&self, data: &'a [u8]) -> std::slice::Chunks<'a, u8> {
        data[self.range.clone()].chunks(self.scanline_width)
    }

    pub(crate) fn scanlines_mut<'a>(&self, data: &'a mut [u8]) -> std::slice::ChunksMut<'a, u8> {
        data[self.range.clone()].chunks_mut(self.scanline_width)
    }
}

/// Lays out every pass of the image back to back, as the data stream stores them.
pub(crate) fn passes(header: &IHDRChunk) -> anyhow::Result<Vec<Pass>> {
    let mut offset: usize = 0;
    let mut passes = Vec::with_capacity(7);
    for sub_image in sub_images(header) {
        let scanline_width = header.scanline_size(sub_image.width)?;
        let start = offset;
        offset = scanline_width
            .checked_mul(sub_image.height)
            .and_then(|pass_len| offset.checked_add(pass_len))
            .ok_or_else(|| header.too_large())?;
        passes.push(Pass {
            sub_image,
            scanline_width,
            range: start..offset,
        });
    }
    Ok(passes)
}

/// Total bytes the passes occupy.
pub(crate) fn data_len(passes: &[Pass]) -> usize {
    passes.last().map_or(0, |pass| pass.range.end)
}
