use anyhow::anyhow;

use crate::{chunks::ihdr::IHDRChunk, scanlines::Pass};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Filter {
    None = 0,
    Sub = 1,
    Up = 2,
    Average = 3,
    Paeth = 4,
}
impl Filter {
    const ALL: [Filter; 5] = [
        Filter::None,
        Filter::Sub,
        Filter::Up,
        Filter::Average,
        Filter::Paeth,
    ];

    /// `a` is the byte to the left, `b` the byte above, `c` above and to the left.
    pub(crate) fn filter(&self, x: u8, a: u8, b: u8, c: u8) -> u8 {
        x.wrapping_sub(self.predict(a, b, c))
    }

    pub(crate) fn reconstruct(&self, x: u8, a: u8, b: u8, c: u8) -> u8 {
        x.wrapping_add(self.predict(a, b, c))
    }

    fn predict(&self, a: u8, b: u8, c: u8) -> u8 {
        match self {
            Filter::None => 0,
            Filter::Sub => a,
            Filter::Up => b,
            Filter::Average => ((a as u16 + b as u16) / 2) as u8,
            Filter::Paeth => paeth_predictor(a, b, c),
        }
    }

    fn reconstruct_row(&self, row: &mut [u8], prior: Option<&[u8]>, bpp: usize) {
        for i in 0..row.len() {
            let (a, b, c) = neighbours(row, prior, i, bpp);
            row[i] = self.reconstruct(row[i], a, b, c);
        }
    }

    fn filter_row(&self, row: &[u8], prior: Option<&[u8]>, bpp: usize, out: &mut Vec<u8>) {
        out.push(*self as u8);
        out.extend((0..row.len()).map(|i| {
            let (a, b, c) = neighbours(row, prior, i, bpp);
            self.filter(row[i], a, b, c)
        }));
    }
}
impl TryFrom<u8> for Filter {
    type Error = anyhow::Error;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Filter::ALL
            .get(value as usize)
            .copied()
            .ok_or_else(|| anyhow!("Unknown filter type {value}"))
    }
}

fn neighbours(row: &[u8], prior: Option<&[u8]>, i: usize, bpp: usize) -> (u8, u8, u8) {
    let a = if i >= bpp { row[i - bpp] } else { 0 };
    let b = prior.map_or(0, |prior| prior[i]);
    let c = match prior {
        Some(prior) if i >= bpp => prior[i - bpp],
        _ => 0,
    };
    (a, b, c)
}

fn paeth_predictor(a: u8, b: u8, c: u8) -> u8 {
    let p = a as i16 + b as i16 - c as i16;
    let pa = (p - a as i16).abs();
    let pb = (p - b as i16).abs();
    let pc = (p - c as i16).abs();
    if pa <= pb && pa <= pc {
        a
    } else if pb <= pc {
        b
    } else {
        c
    }
}

/// Undoes scanline filtering in place, pass by pass. Each pass starts with no
/// prior scanline.
pub(crate) fn reconstruct_scanlines(
    data: &mut [u8],
    header: &IHDRChunk,
    passes: &[Pass],
) -> anyhow::Result<()> {
    let bpp = header.filter_width();
    for pass in passes {
        let mut prior: Option<&[u8]> = None;
        for scanline in pass.scanlines_mut(data) {
            let (filter_type, row) = scanline
                .split_first_mut()
                .ok_or_else(|| anyhow!("Empty scanline"))?;
            let filter = Filter::try_from(*filter_type)?;
            filter.reconstruct_row(row, prior, bpp);
            prior = Some(&*row);
        }
    }
    Ok(())
}

/// Filters tightly packed rows of `row_size` bytes, picking per row the filter
/// with the smallest sum of absolute residuals.
pub(crate) fn filter_scanlines(data: &[u8], row_size: usize, bpp: usize) -> Vec<u8> {
    let mut output = Vec::with_capacity(data.len() + data.len() / row_size.max(1));
    let mut candidate = Vec::with_capacity(row_size + 1);
    let mut best = Vec::with_capacity(row_size + 1);
    let mut prior = None;
    for (index, row) in data.chunks(row_size).enumerate() {
        let mut best_score = u64::MAX;
        for filter in Filter::ALL {
            candidate.clear();
            filter.filter_row(row, prior, bpp, &mut candidate);
            let score = candidate[1..]
                .iter()
                .map(|&byte| (byte as i8).unsigned_abs() as u64)
                .sum::<u64>();
            if score < best_score {
                best_score = score;
                std::mem::swap(&mut best, &mut candidate);
            }
        }
        log::trace!("scanline {index}: filter {:?}", Filter::ALL[best[0] as usize]);
        output.extend_from_slice(&best);
        prior = Some(row);
    }
    output
}
