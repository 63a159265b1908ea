//! # bmpfx
//!
//! Uncompressed 24-bit BMP decoder and encoder, plus a small catalog of
//! pixel-grid transforms.
//!
//! ## Codec
//!
//! Decoding reads the declared file size, pixel array offset, width, height
//! and bit depth, checks that the declared size equals
//! `offset + (row bytes + padding) * height`, and rebuilds a top-row-first
//! [`PixelGrid`] from the bottom-up, BGR, 4-byte-padded pixel array. Bit
//! depths wider than 24 are accepted on input; the extra bytes per pixel
//! (usually alpha) are dropped.
//!
//! Encoding always writes a 54-byte header and 24-bit bottom-up rows.
//!
//! ## Transforms
//!
//! See [`transform`]. Each takes a grid by reference and returns a new one.
//!
//! ## Non-Goals
//!
//! - Compressed BMP (RLE, bitfields), palettes, bit depths below 24
//! - Writing alpha
//!
//! ## Usage
//!
//! ```no_run
//! use bmpfx::{Transform, Unstoppable};
//!
//! let data: &[u8] = &[]; // your BMP bytes
//!
//! // Probe without decoding
//! let info = bmpfx::probe_bmp(data)?;
//! println!("{}x{} {}bpp", info.width, info.height, info.bits_per_pixel);
//!
//! let grid = bmpfx::decode_bmp(data, Unstoppable)?;
//! let rotated = Transform::RotateN { turns: 1 }.apply(&grid);
//! let encoded = bmpfx::encode_bmp(&rotated, Unstoppable)?;
//! # Ok::<(), bmpfx::BitmapError>(())
//! ```

#![forbid(unsafe_code)]

mod bmp;
mod error;
mod grid;
mod limits;
mod pixel;

pub mod transform;

#[cfg(feature = "cli")]
pub mod cli;

mod decode;
mod encode;

// Re-exports
pub use bmp::{BmpInfo, BmpPermissiveness, row_padding};
pub use decode::DecodeRequest;
pub use encode::EncodeRequest;
pub use enough::{Stop, Unstoppable};
pub use error::BitmapError;
pub use grid::PixelGrid;
pub use limits::Limits;
pub use pixel::Pixel;
pub use transform::Transform;

use std::path::Path;

/// Read the BMP header fields without validating or decoding pixels.
pub fn probe_bmp(data: &[u8]) -> Result<BmpInfo, BitmapError> {
    bmp::probe(data)
}

/// Decode a BMP with default settings.
pub fn decode_bmp(data: &[u8], stop: impl Stop) -> Result<PixelGrid, BitmapError> {
    DecodeRequest::new(data).decode(stop)
}

/// Encode a grid as a 24-bit BMP.
pub fn encode_bmp(grid: &PixelGrid, stop: impl Stop) -> Result<Vec<u8>, BitmapError> {
    EncodeRequest::new().encode(grid, stop)
}

/// Read and decode a BMP file.
pub fn load_bmp(path: impl AsRef<Path>) -> Result<PixelGrid, BitmapError> {
    let data = std::fs::read(path)?;
    decode_bmp(&data, Unstoppable)
}

/// Encode `grid` and write it to `path`.
///
/// The file is only created once encoding has succeeded.
pub fn save_bmp(path: impl AsRef<Path>, grid: &PixelGrid) -> Result<(), BitmapError> {
    let data = encode_bmp(grid, Unstoppable)?;
    std::fs::write(path, data)?;
    Ok(())
}
