use core::ops::Index;

use crate::error::BitmapError;
use crate::pixel::Pixel;

/// Immutable row-major grid of [`Pixel`]s.
///
/// Every row has the same length. Transforms read a grid by reference and
/// return a new one; nothing in this crate mutates a grid after construction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PixelGrid {
    pixels: Vec<Pixel>,
    width: usize,
    height: usize,
}

impl PixelGrid {
    /// Wrap a row-major pixel buffer.
    ///
    /// Returns [`BitmapError::InvalidData`] if `pixels.len() != width * height`.
    pub fn new(width: usize, height: usize, pixels: Vec<Pixel>) -> Result<Self, BitmapError> {
        let expected = width
            .checked_mul(height)
            .ok_or(BitmapError::DimensionsTooLarge {
                width: width as u64,
                height: height as u64,
            })?;
        if pixels.len() != expected {
            return Err(BitmapError::InvalidData(format!(
                "{width}x{height} grid needs {expected} pixels, got {}",
                pixels.len()
            )));
        }
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// Internal constructor for buffers already known to be `width * height` long.
    #[cfg(feature = "parallel")]
    pub(crate) fn from_parts(width: usize, height: usize, pixels: Vec<Pixel>) -> Self {
        debug_assert_eq!(pixels.len(), width * height);
        Self {
            pixels,
            width,
            height,
        }
    }

    /// A grid where every pixel is `pixel`.
    ///
    /// # Panics
    ///
    /// If `width * height` overflows or the buffer cannot be allocated.
    pub fn filled(width: usize, height: usize, pixel: Pixel) -> Self {
        Self {
            pixels: vec![pixel; pixel_count(width, height)],
            width,
            height,
        }
    }

    /// Build a grid by calling `f(row, col)` for every position, row by row.
    ///
    /// # Panics
    ///
    /// If `width * height` overflows or the buffer cannot be allocated.
    pub fn from_fn(width: usize, height: usize, f: impl FnMut(usize, usize) -> Pixel) -> Self {
        let mut pixels = Vec::with_capacity(pixel_count(width, height));
        fill_rows(&mut pixels, width, height, f);
        Self {
            pixels,
            width,
            height,
        }
    }

    /// Fallible [`Self::from_fn`]: a size that overflows or cannot be
    /// reserved is [`BitmapError::DimensionsTooLarge`].
    pub(crate) fn try_from_fn(
        width: usize,
        height: usize,
        f: impl FnMut(usize, usize) -> Pixel,
    ) -> Result<Self, BitmapError> {
        let too_large = || BitmapError::DimensionsTooLarge {
            width: width as u64,
            height: height as u64,
        };
        let len = width.checked_mul(height).ok_or_else(too_large)?;
        let mut pixels = Vec::new();
        pixels.try_reserve_exact(len).map_err(|_| too_large())?;
        fill_rows(&mut pixels, width, height, f);
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// Build from nested rows. Width is taken from the first row.
    ///
    /// Returns [`BitmapError::InvalidData`] if any row differs in length.
    pub fn from_rows(rows: Vec<Vec<Pixel>>) -> Result<Self, BitmapError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        let mut pixels = Vec::with_capacity(width * height);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(BitmapError::InvalidData(format!(
                    "row {i} has {} pixels, expected {width}",
                    row.len()
                )));
            }
            pixels.extend(row);
        }
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether the grid holds no pixels (zero width or zero height).
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Pixel> {
        if row < self.height && col < self.width {
            Some(self.pixels[row * self.width + col])
        } else {
            None
        }
    }

    /// Iterate rows from top (row 0) to bottom.
    pub fn rows(&self) -> impl DoubleEndedIterator<Item = &[Pixel]> + ExactSizeIterator {
        // chunks_exact panics on 0; a zero-width grid has no pixels either way
        self.pixels.chunks_exact(self.width.max(1))
    }

    /// The row-major pixel buffer.
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<Pixel> {
        self.pixels
    }

    /// Copy out as nested rows.
    pub fn to_rows(&self) -> Vec<Vec<Pixel>> {
        if self.width == 0 {
            return vec![Vec::new(); self.height];
        }
        self.rows().map(<[Pixel]>::to_vec).collect()
    }

    /// Convert to an [`imgref::ImgVec`] of `RGB8`.
    #[cfg(feature = "imgref")]
    pub fn to_imgvec(&self) -> imgref::ImgVec<rgb::RGB8> {
        imgref::ImgVec::new(
            self.pixels.iter().map(|&p| p.into()).collect(),
            self.width,
            self.height,
        )
    }

    /// Copy an [`imgref::ImgRef`] of `RGB8`, honoring its stride.
    #[cfg(feature = "imgref")]
    pub fn from_imgref(img: imgref::ImgRef<'_, rgb::RGB8>) -> Self {
        let pixels = img.rows().flat_map(|row| row.iter().map(|&p| Pixel::from(p))).collect();
        Self {
            pixels,
            width: img.width(),
            height: img.height(),
        }
    }
}

fn pixel_count(width: usize, height: usize) -> usize {
    match width.checked_mul(height) {
        Some(n) => n,
        None => panic!("{width}x{height} grid overflows usize"),
    }
}

fn fill_rows(
    pixels: &mut Vec<Pixel>,
    width: usize,
    height: usize,
    mut f: impl FnMut(usize, usize) -> Pixel,
) {
    for row in 0..height {
        for col in 0..width {
            pixels.push(f(row, col));
        }
    }
}

impl Index<(usize, usize)> for PixelGrid {
    type Output = Pixel;

    /// Panics if `(row, col)` is outside the grid.
    fn index(&self, (row, col): (usize, usize)) -> &Pixel {
        assert!(
            row < self.height && col < self.width,
            "pixel ({row}, {col}) outside {}x{} grid",
            self.width,
            self.height
        );
        &self.pixels[row * self.width + col]
    }
}
