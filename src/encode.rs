use enough::Stop;

use crate::bmp;
use crate::error::BitmapError;
use crate::grid::PixelGrid;
use crate::limits::Limits;

/// Builder for encoding a grid as a 24-bit BMP.
#[derive(Clone, Debug, Default)]
pub struct EncodeRequest<'a> {
    limits: Option<&'a Limits>,
}

impl<'a> EncodeRequest<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject grids whose dimensions or encoded size exceed `limits`.
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Encode `grid`. Fails with [`BitmapError::EmptyGrid`] for a grid with
    /// no pixels.
    pub fn encode(&self, grid: &PixelGrid, stop: impl Stop) -> Result<Vec<u8>, BitmapError> {
        bmp::encode(grid, self.limits, &stop)
    }
}
