use anyhow::{anyhow, bail};

use crate::{
    chunks::{idat::IDATChunk, iend::IENDChunk, ihdr::IHDRChunk, ParseableChunk},
    decoder::SIGNATURE,
    image::Image,
    image_data::compress_data,
};

/// Serialises `image` as an 8-bit RGB, non-interlaced PNG with a single IDAT chunk.
pub(crate) fn encode_image(image: &Image, compression_level: u8) -> anyhow::Result<Vec<u8>> {
    if image.width() == 0 || image.height() == 0 {
        bail!(
            "Cannot encode an image with no pixels ({}x{})",
            image.width(),
            image.height()
        );
    }
    let dimension = |value: usize| {
        u32::try_from(value)
            .ok()
            .filter(|&value| value <= i32::MAX as u32)
            .ok_or_else(|| anyhow!("Image dimension {value} exceeds the PNG limit"))
    };
    let header = IHDRChunk::rgb8(dimension(image.width())?, dimension(image.height())?);

    let idat = IDATChunk {
        data: compress_data(image, compression_level),
    };
    log::debug!(
        "Encoding {}x{} image, {} compressed bytes at level {compression_level}",
        header.width,
        header.height,
        idat.data.len()
    );

    let mut bytes = SIGNATURE.to_vec();
    bytes.extend(header.to_bytes()?);
    bytes.extend(idat.to_bytes()?);
    bytes.extend(IENDChunk.to_bytes()?);
    Ok(bytes)
}
