use anyhow::{anyhow, bail};
use nom::{bytes::complete::tag, IResult};

use crate::chunks::{ihdr::IHDRChunk, iter_chunks, parse_chunk, plte::PLTEChunk, Chunk};

pub(crate) const SIGNATURE: &[u8; 8] = b"\x89PNG\x0d\x0a\x1a\x0a";

pub(crate) struct PNGDecoder<'a, State>(&'a [u8], State);

pub(crate) struct Start;
pub(crate) struct Header(IHDRChunk);

/// Everything needed to rebuild the pixels: the header, the palette if any,
/// and the zlib stream gathered from every IDAT chunk.
#[derive(Debug)]
pub(crate) struct ImageStream {
    pub(crate) header: IHDRChunk,
    pub(crate) palette: Option<PLTEChunk>,
    pub(crate) compressed: Vec<u8>,
}

impl<'a> PNGDecoder<'a, Start> {
    pub(crate) fn new(data: &'a [u8]) -> anyhow::Result<Self> {
        let (rest, _) = parse_signature(data)
            .map_err(|_| anyhow!("input doesn't start with expected signature"))?;
        Ok(Self(rest, Start))
    }

    pub(crate) fn parse_ihdr(self) -> anyhow::Result<PNGDecoder<'a, Header>> {
        let (rest, chunk) = parse_chunk(self.0)?;
        match chunk {
            Chunk::IHDR(ihdr) => {
                log::debug!("{ihdr:?}");
                Ok(PNGDecoder(rest, Header(ihdr)))
            }
            other => bail!("Expected IHDR as the first chunk, found {}", other.name()),
        }
    }
}

impl PNGDecoder<'_, Header> {
    pub(crate) fn header(&self) -> &IHDRChunk {
        &self.1 .0
    }

    pub(crate) fn read_image_data(self) -> anyhow::Result<ImageStream> {
        let PNGDecoder(data, Header(header)) = self;
        let mut palette = None;
        let mut compressed = Vec::new();
        let mut idat_count = 0;
        let mut idat_ended = false;
        for chunk in iter_chunks(data) {
            let chunk = chunk?;
            if idat_count > 0 && !matches!(chunk, Chunk::IDAT(_)) {
                idat_ended = true;
            }
            match chunk {
                Chunk::IHDR(_) => bail!("Duplicate IHDR chunk"),
                Chunk::PLTE(plte) => {
                    if idat_count > 0 {
                        bail!("PLTE chunk after image data");
                    }
                    palette = Some(plte);
                }
                Chunk::IDAT(_) if idat_ended => bail!("IDAT chunks are not consecutive"),
                Chunk::IDAT(idat) => {
                    compressed.extend_from_slice(idat.data);
                    idat_count += 1;
                }
                Chunk::IEND => break,
                Chunk::Unknown(raw) => log::debug!("Skipping {} chunk", raw.name()),
            }
        }
        if idat_count == 0 {
            bail!("Couldn't find an IDAT");
        }
        log::debug!(
            "{idat_count} IDAT chunks, {} compressed bytes",
            compressed.len()
        );
        Ok(ImageStream {
            header,
            palette,
            compressed,
        })
    }
}

fn parse_signature(input: &[u8]) -> IResult<&[u8], &[u8]> {
    tag(&SIGNATURE[..])(input)
}

/// Whether `bytes` starts with the PNG signature.
pub fn is_png(bytes: &[u8]) -> bool {
    parse_signature(bytes).is_ok()
}
