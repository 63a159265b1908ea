//! 24-bit BMP decoder and encoder (internal).
//!
//! Use top-level [`crate::decode_bmp`], [`crate::encode_bmp`], etc.

mod decode;
mod encode;
mod header;

pub use decode::BmpPermissiveness;
pub use header::{BmpInfo, row_padding};

use crate::error::BitmapError;
use crate::grid::PixelGrid;
use crate::limits::Limits;
use enough::Stop;

/// Read the header fields without validating or decoding pixels.
pub(crate) fn probe(data: &[u8]) -> Result<BmpInfo, BitmapError> {
    header::parse(data)
}

/// Decode BMP data into a grid.
pub(crate) fn decode(
    data: &[u8],
    permissiveness: BmpPermissiveness,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<PixelGrid, BitmapError> {
    let info = decode::validate(data, permissiveness)?;
    stop.check()?;
    decode::decode_bmp_pixels(data, &info, limits, stop)
}

/// Encode to 24-bit BMP.
pub(crate) fn encode(
    grid: &PixelGrid,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<Vec<u8>, BitmapError> {
    encode::encode_bmp(grid, limits, stop)
}
