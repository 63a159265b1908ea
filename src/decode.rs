use enough::Stop;

use crate::bmp::{self, BmpPermissiveness};
use crate::error::BitmapError;
use crate::grid::PixelGrid;
use crate::limits::Limits;

/// Builder for decoding one BMP buffer.
///
/// ```
/// use bmpfx::{DecodeRequest, Limits, Unstoppable};
///
/// # let data = bmpfx::encode_bmp(&bmpfx::PixelGrid::filled(2, 2, bmpfx::Pixel::RED), Unstoppable)?;
/// let limits = Limits { max_pixels: Some(1 << 24), ..Default::default() };
/// let grid = DecodeRequest::new(&data)
///     .with_limits(&limits)
///     .decode(Unstoppable)?;
/// assert_eq!((grid.width(), grid.height()), (2, 2));
/// # Ok::<(), bmpfx::BitmapError>(())
/// ```
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
    permissiveness: BmpPermissiveness,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            limits: None,
            permissiveness: BmpPermissiveness::default(),
        }
    }

    /// Reject images whose dimensions or decoded size exceed `limits`.
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn with_permissiveness(mut self, permissiveness: BmpPermissiveness) -> Self {
        self.permissiveness = permissiveness;
        self
    }

    /// Decode the buffer.
    ///
    /// A declared file size that disagrees with the header's geometry fails
    /// with [`BitmapError::StructuralMismatch`]; no partial grid is returned.
    pub fn decode(self, stop: impl Stop) -> Result<PixelGrid, BitmapError> {
        bmp::decode(self.data, self.permissiveness, self.limits, &stop)
    }
}
