use anyhow::{bail, Context};
use miniz_oxide::{
    deflate::compress_to_vec_zlib,
    inflate::{decompress_to_vec_zlib_with_limit, TINFLStatus},
};

use crate::{
    chunks::ihdr::IHDRChunk,
    filters::{filter_scanlines, reconstruct_scanlines},
    image::Image,
    scanlines::{data_len, passes, Pass},
};

pub(crate) fn compress_data(image: &Image, level: u8) -> Vec<u8> {
    let filtered = filter_scanlines(image.as_bytes(), image.row_size(), 3);
    compress_to_vec_zlib(&filtered, level)
}

/// Inflates the concatenated IDAT payload and undoes filtering, returning the
/// raw scanlines along with the pass layout they follow. Inflation stops once
/// the header's worth of scanlines is out.
pub(crate) fn decompress_data(
    compressed_data: &[u8],
    header: &IHDRChunk,
) -> anyhow::Result<(Vec<u8>, Vec<Pass>)> {
    let passes = passes(header)?;
    let expected = data_len(&passes);
    let mut data = match decompress_to_vec_zlib_with_limit(compressed_data, expected) {
        Ok(data) => data,
        Err(e) if e.status == TINFLStatus::HasMoreOutput => {
            log::debug!("Ignoring image data past {expected} bytes");
            e.output
        }
        Err(e) => return Err(e).context("Failed to decompress image data."),
    };
    if data.len() < expected {
        bail!(
            "Image data is truncated: expected {expected} bytes, found {}",
            data.len()
        );
    }
    data.truncate(expected);
    reconstruct_scanlines(&mut data, header, &passes)?;

    Ok((data, passes))
}
