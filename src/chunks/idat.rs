use std::borrow::Cow;

use super::ParseableChunk;

pub(crate) const HEADER: &[u8; 4] = b"IDAT";

/// A slice of the zlib stream. Decoding borrows from the input, encoding owns
/// its compressed buffer.
#[derive(Debug)]
pub(crate) struct IDATChunk<T> {
    pub(crate) data: T,
}
impl<'a, T> ParseableChunk<'a> for IDATChunk<T>
where
    T: AsRef<[u8]> + From<&'a [u8]>,
{
    const HEADER: &'static [u8; 4] = HEADER;

    fn from_bytes(chunk_data: &'a [u8]) -> anyhow::Result<Self> {
        Ok(IDATChunk {
            data: chunk_data.into(),
        })
    }

    fn data(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.data.as_ref())
    }
}
