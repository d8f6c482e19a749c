use std::borrow::Cow;

use anyhow::bail;

use super::ParseableChunk;

pub(crate) struct IENDChunk;
impl<'a> ParseableChunk<'a> for IENDChunk {
    const HEADER: &'static [u8; 4] = b"IEND";

    fn from_bytes(chunk_data: &[u8]) -> anyhow::Result<Self> {
        if !chunk_data.is_empty() {
            bail!("IEND chunk must be empty, found {} bytes", chunk_data.len());
        }
        Ok(Self)
    }

    fn data(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(&[])
    }
}
