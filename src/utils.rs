pub(crate) const fn div_ceil(lhs: usize, rhs: usize) -> usize {
    let d = lhs / rhs;
    let r = lhs % rhs;
    if r > 0 && rhs > 0 {
        d + 1
    } else {
        d
    }
}

/// Maps a sample of `bit_depth` bits onto the full 8-bit range.
///
/// 16-bit samples keep their high byte, sub-byte samples are scaled so that
/// the maximum value becomes 255.
pub(crate) const fn scale_to_u8(sample: u16, bit_depth: u8) -> u8 {
    match bit_depth {
        16 => (sample >> 8) as u8,
        8 => sample as u8,
        depth => {
            let max = (1u16 << depth) - 1;
            (sample * (255 / max)) as u8
        }
    }
}
