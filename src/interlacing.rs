use std::{iter::StepBy, ops::Range};

use crate::{chunks::ihdr::IHDRChunk, utils::div_ceil};

/// Every sub-image stored in the data stream, in order. A non-interlaced image
/// is a single sub-image covering the whole raster.
pub(crate) fn sub_images(header: &IHDRChunk) -> Vec<SubImage> {
    let (width, height) = (header.width as usize, header.height as usize);
    if header.is_interlaced() {
        Adam7Iter::new(width, height).collect()
    } else {
        vec![SubImage::full(width, height)]
    }
}

pub(crate) struct Adam7Iter {
    current_pass: Option<usize>,
    width: usize,
    height: usize,
}
impl Adam7Iter {
    pub(crate) fn new(width: usize, height: usize) -> Self {
        Self {
            current_pass: Some(0),
            width,
            height,
        }
    }

    const STARTING_ROW: [usize; 7] = [0, 0, 4, 0, 2, 0, 1];
    const STARTING_COL: [usize; 7] = [0, 4, 0, 2, 0, 1, 0];
    const ROW_INCREMENT: [usize; 7] = [8, 8, 8, 4, 4, 2, 2];
    const COL_INCREMENT: [usize; 7] = [8, 8, 4, 4, 2, 2, 1];
}
impl Iterator for Adam7Iter {
    type Item = SubImage;
    fn next(&mut self) -> Option<Self::Item> {
        let mut pass = self.current_pass?;
        while pass < 7 {
            let pass_width = div_ceil(
                self.width.saturating_sub(Self::STARTING_COL[pass]),
                Self::COL_INCREMENT[pass],
            );
            let pass_height = div_ceil(
                self.height.saturating_sub(Self::STARTING_ROW[pass]),
                Self::ROW_INCREMENT[pass],
            );
            // Empty passes are absent from the data stream.
            if pass_width == 0 || pass_height == 0 {
                pass += 1;
                continue;
            }
            self.current_pass = Some(pass + 1);
            return Some(SubImage {
                width: pass_width,
                height: pass_height,
                pixel_indices: PixelIndicesIter::new(
                    (Self::STARTING_ROW[pass]..self.height).step_by(Self::ROW_INCREMENT[pass]),
                    (Self::STARTING_COL[pass]..self.width).step_by(Self::COL_INCREMENT[pass]),
                    self.width,
                ),
            });
        }
        self.current_pass = None;
        None
    }
}

#[derive(Debug)]
pub(crate) struct SubImage {
    pub(crate) width: usize,
    pub(crate) height: usize,
    /// Row-major positions of this sub-image's pixels in the full raster.
    pub(crate) pixel_indices: PixelIndicesIter,
}
impl SubImage {
    fn full(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixel_indices: PixelIndicesIter::new(
                (0..height).step_by(1),
                (0..width).step_by(1),
                width,
            ),
        }
    }
}

#[derive(Debug)]
pub(crate) struct PixelIndicesIter {
    rows: StepBy<Range<usize>>,
    current_row: Option<usize>,
    orig_columns: StepBy<Range<usize>>,
    columns: StepBy<Range<usize>>,
    image_width: usize,
}
impl PixelIndicesIter {
    fn new(
        mut rows: StepBy<Range<usize>>,
        columns: StepBy<Range<usize>>,
        image_width: usize,
    ) -> Self {
        let current_row = rows.next();
        Self {
            rows,
            current_row,
            orig_columns: columns.clone(),
            columns,
            image_width,
        }
    }
}
impl Iterator for PixelIndicesIter {
    type Item = usize;
    fn next(&mut self) -> Option<Self::Item> {
        if let Some(column) = self.columns.next() {
            return Some(self.current_row? * self.image_width + column);
        }
        self.current_row = Some(self.rows.next()?);
        self.columns = self.orig_columns.clone();
        Some(self.current_row? * self.image_width + self.columns.next()?)
    }
}

#[cfg(test)]
mod tests {
    use super::{Adam7Iter, SubImage};

    #[test]
    fn adam7iter_correctly_calculates_pass_dimensions() {
        let adam7 = Adam7Iter::new(8, 8);
        let expected_dimensions = [(1, 1), (1, 1), (2, 1), (2, 2), (4, 2), (4, 4), (8, 4)];
        let dimensions: Vec<_> = adam7.map(|pass| (pass.width, pass.height)).collect();
        assert_eq!(dimensions, expected_dimensions);

        let adam7 = Adam7Iter::new(9, 9);
        let expected_dimensions = [(2, 2), (1, 2), (3, 1), (2, 3), (5, 2), (4, 5), (9, 4)];
        let dimensions: Vec<_> = adam7.map(|pass| (pass.width, pass.height)).collect();
        assert_eq!(dimensions, expected_dimensions);

        let adam7 = Adam7Iter::new(4, 4);
        let expected_dimensions = [(1, 1), (1, 1), (2, 1), (2, 2), (4, 2)];
        let dimensions: Vec<_> = adam7.map(|pass| (pass.width, pass.height)).collect();
        assert_eq!(dimensions, expected_dimensions);

        assert_eq!(Adam7Iter::new(1, 1).count(), 1);
    }

    #[test]
    fn adam7iter_returns_iterator_over_pixel_indices() {
        let adam7 = Adam7Iter::new(8, 8);
        let expected_indices: [&[usize]; 7] = [
            &[0],
            &[4],
            &[32, 36],
            &[2, 6, 34, 38],
            &[16, 18, 20, 22, 48, 50, 52, 54],
            &[1, 3, 5, 7, 17, 19, 21, 23, 33, 35, 37, 39, 49, 51, 53, 55],
            &[
                8, 9, 10, 11, 12, 13, 14, 15, 24, 25, 26, 27, 28, 29, 30, 31, 40, 41, 42, 43, 44,
                45, 46, 47, 56, 57, 58, 59, 60, 61, 62, 63,
            ],
        ];
        for (pass, expected) in adam7.zip(expected_indices) {
            assert_eq!(pass.pixel_indices.collect::<Vec<_>>(), expected);
        }

        let adam7 = Adam7Iter::new(32, 32);
        let expected_lengths = [16, 16, 32, 64, 128, 256, 512];
        for (pass, expected) in adam7.zip(expected_lengths) {
            assert_eq!(pass.pixel_indices.count(), expected);
        }
    }

    #[test]
    fn pixel_indices_use_the_image_width_for_non_square_images() {
        let passes: Vec<Vec<usize>> = Adam7Iter::new(5, 3)
            .map(|pass| pass.pixel_indices.collect())
            .collect();
        let expected: [&[usize]; 6] = [
            &[0],
            &[4],
            &[2],
            &[10, 12, 14],
            &[1, 3, 11, 13],
            &[5, 6, 7, 8, 9],
        ];
        assert_eq!(passes, expected);
    }

    #[test]
    fn full_sub_image_covers_every_pixel_in_order() {
        let sub_image = SubImage::full(3, 2);
        assert_eq!((sub_image.width, sub_image.height), (3, 2));
        assert_eq!(
            sub_image.pixel_indices.collect::<Vec<_>>(),
            [0, 1, 2, 3, 4, 5]
        );
    }
}
