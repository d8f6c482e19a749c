use std::borrow::Cow;

use anyhow::{anyhow, bail};
use nom::{
    bytes::complete::take,
    combinator::map_res,
    number::complete::be_u32,
    sequence::tuple,
    IResult,
};

use crate::crc::{calculate_crc, Crc};

pub(crate) mod idat;
pub(crate) mod iend;
pub(crate) mod ihdr;
pub(crate) mod plte;

#[allow(non_camel_case_types, clippy::upper_case_acronyms)]
#[derive(Debug)]
pub(crate) enum Chunk<'a> {
    IHDR(ihdr::IHDRChunk),
    PLTE(plte::PLTEChunk),
    IDAT(idat::IDATChunk<&'a [u8]>),
    IEND,
    Unknown(RawChunk<'a>),
}
impl Chunk<'_> {
    pub(crate) fn name(&self) -> Cow<'_, str> {
        match self {
            Chunk::IHDR(_) => Cow::Borrowed("IHDR"),
            Chunk::PLTE(_) => Cow::Borrowed("PLTE"),
            Chunk::IDAT(_) => Cow::Borrowed("IDAT"),
            Chunk::IEND => Cow::Borrowed("IEND"),
            Chunk::Unknown(raw) => raw.name(),
        }
    }
}

pub(crate) fn iter_chunks(source: &[u8]) -> ChunkIter<'_> {
    ChunkIter {
        source,
        finished: false,
    }
}

/// Walks the chunk stream that follows the signature, stopping after IEND or
/// the first error.
pub(crate) struct ChunkIter<'a> {
    source: &'a [u8],
    finished: bool,
}

impl<'a> Iterator for ChunkIter<'a> {
    type Item = anyhow::Result<Chunk<'a>>;
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        if self.source.is_empty() {
            self.finished = true;
            return Some(Err(anyhow!("Unexpected end of data before IEND")));
        }
        match parse_chunk(self.source) {
            Ok((rest, chunk)) => {
                self.source = rest;
                if matches!(chunk, Chunk::IEND) {
                    self.finished = true;
                }
                Some(Ok(chunk))
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

pub(crate) fn parse_chunk(input: &[u8]) -> anyhow::Result<(&[u8], Chunk<'_>)> {
    let (rest, raw) = raw_chunk(input).map_err(|e| nom_error("chunk", e))?;
    raw.verify()?;
    log::debug!("{} chunk, {} bytes", raw.name(), raw.data.len());
    let chunk = match raw.chunk_type {
        ihdr::IHDRChunk::HEADER => Chunk::IHDR(ihdr::IHDRChunk::from_bytes(raw.data)?),
        plte::PLTEChunk::HEADER => Chunk::PLTE(plte::PLTEChunk::from_bytes(raw.data)?),
        idat::HEADER => Chunk::IDAT(idat::IDATChunk::from_bytes(raw.data)?),
        iend::IENDChunk::HEADER => {
            iend::IENDChunk::from_bytes(raw.data)?;
            Chunk::IEND
        }
        _ if raw.is_critical() => bail!("Unsupported critical chunk {}", raw.name()),
        _ => Chunk::Unknown(raw),
    };
    Ok((rest, chunk))
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct RawChunk<'a> {
    chunk_type: &'a [u8; 4],
    data: &'a [u8],
    crc: u32,
}
impl RawChunk<'_> {
    pub(crate) fn name(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.chunk_type)
    }

    /// Bit 5 of the first type byte is clear for chunks a decoder must understand.
    fn is_critical(&self) -> bool {
        self.chunk_type[0] & 0x20 == 0
    }

    fn verify(&self) -> anyhow::Result<()> {
        let computed = Crc::new().update(self.chunk_type).update(self.data).finish();
        if computed != self.crc {
            bail!(
                "CRC mismatch in {} chunk: stored {:08x}, computed {:08x}",
                self.name(),
                self.crc,
                computed
            );
        }
        Ok(())
    }
}

fn raw_chunk(input: &[u8]) -> IResult<&[u8], RawChunk<'_>> {
    let (input, length) = be_u32(input)?;
    let (input, (chunk_type, data, crc)) = tuple((
        map_res(take(4usize), <&[u8; 4]>::try_from),
        take(length),
        be_u32,
    ))(input)?;
    Ok((
        input,
        RawChunk {
            chunk_type,
            data,
            crc,
        },
    ))
}

pub(crate) fn nom_error(what: &str, e: nom::Err<nom::error::Error<&[u8]>>) -> anyhow::Error {
    anyhow!("Malformed {what}: {}", e.map_input(|input| input.len()))
}

/// Frames `data` as a chunk: length, type, data, then the CRC of type and data.
pub(crate) fn write_chunk(chunk_type: &[u8; 4], data: &[u8]) -> anyhow::Result<Vec<u8>> {
    let length = u32::try_from(data.len())
        .map_err(|_| anyhow!("{} bytes do not fit in one chunk", data.len()))?;
    let mut bytes = Vec::with_capacity(data.len() + 12);
    bytes.extend(length.to_be_bytes());
    bytes.extend(chunk_type);
    bytes.extend(data);
    let crc = calculate_crc(&bytes[4..]).to_be_bytes();
    bytes.extend(crc);
    Ok(bytes)
}

pub(crate) trait ParseableChunk<'a>: Sized {
    const HEADER: &'static [u8; 4];

    fn from_bytes(chunk_data: &'a [u8]) -> anyhow::Result<Self>;
    fn data(&self) -> Cow<'_, [u8]>;

    fn to_bytes(&self) -> anyhow::Result<Vec<u8>> {
        write_chunk(Self::HEADER, &self.data())
    }
}
