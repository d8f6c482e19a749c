use std::borrow::Cow;

use anyhow::bail;
use nom::{bytes::complete::take, combinator::map, multi::count};

use super::{nom_error, ParseableChunk};
use crate::Color;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PLTEChunk {
    colors: Vec<Color>,
}
impl PLTEChunk {
    pub(crate) fn get_color(&self, index: u8) -> Option<Color> {
        self.colors.get(index as usize).copied()
    }

    pub(crate) fn len(&self) -> usize {
        self.colors.len()
    }
}
impl<'a> ParseableChunk<'a> for PLTEChunk {
    const HEADER: &'static [u8; 4] = b"PLTE";

    fn from_bytes(chunk_data: &'a [u8]) -> anyhow::Result<Self> {
        if chunk_data.is_empty() || chunk_data.len() % 3 != 0 || chunk_data.len() > 256 * 3 {
            bail!("Invalid PLTE chunk length {}", chunk_data.len());
        }
        let entry_count = chunk_data.len() / 3;
        let (_, colors) = count(
            map(take(3usize), |i: &[u8]| Color::new(i[0], i[1], i[2])),
            entry_count,
        )(chunk_data)
        .map_err(|e| nom_error("PLTE chunk", e))?;
        Ok(PLTEChunk { colors })
    }

    fn data(&self) -> Cow<'_, [u8]> {
        Cow::Owned(
            self.colors
                .iter()
                .flat_map(|color| [color.r, color.g, color.b])
                .collect(),
        )
    }
}
