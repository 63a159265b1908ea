//! BMP pixel extraction: bottom-up rows, BGR byte order, 4-byte row padding.

use enough::Stop;

use super::header::{self, BmpInfo};
use crate::error::BitmapError;
use crate::grid::PixelGrid;
use crate::limits::Limits;
use crate::pixel::Pixel;

// ── Permissiveness ──────────────────────────────────────────────────

/// Controls how strictly the BMP decoder validates input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BmpPermissiveness {
    /// Also require the `BM` signature, an info header of at least 40
    /// bytes, one colour plane and no compression.
    Strict,

    /// Default behavior. Only the declared file size is checked against
    /// the size implied by offset, width, height and bit depth.
    #[default]
    Standard,
}

// ── Cursor for reading from &[u8] ───────────────────────────────────

struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn set_position(&mut self, pos: usize) -> Result<(), BitmapError> {
        if pos > self.data.len() {
            return Err(BitmapError::UnexpectedEof);
        }
        self.pos = pos;
        Ok(())
    }

    fn skip(&mut self, n: usize) -> Result<(), BitmapError> {
        let new_pos = self.pos.checked_add(n).ok_or(BitmapError::UnexpectedEof)?;
        self.set_position(new_pos)
    }

    fn read_fixed_bytes<const N: usize>(&mut self) -> Result<[u8; N], BitmapError> {
        let bytes = self
            .data
            .get(self.pos..self.pos + N)
            .ok_or(BitmapError::UnexpectedEof)?;
        let mut buf = [0u8; N];
        buf.copy_from_slice(bytes);
        self.pos += N;
        Ok(buf)
    }
}

// ── Full decode ─────────────────────────────────────────────────────

/// Parse and validate the header of `data`.
pub(crate) fn validate(
    data: &[u8],
    permissiveness: BmpPermissiveness,
) -> Result<BmpInfo, BitmapError> {
    let info = header::parse(data)?;
    log::debug!(
        "BMP header: file_size={} offset={} {}x{} bpp={}",
        info.file_size,
        info.data_offset,
        info.width,
        info.height,
        info.bits_per_pixel
    );

    if permissiveness == BmpPermissiveness::Strict {
        header::check_strict(data)?;
    }

    let expected = info
        .expected_file_size()
        .ok_or(BitmapError::DimensionsTooLarge {
            width: u64::from(info.width),
            height: u64::from(info.height),
        })?;
    if u64::from(info.file_size) != expected {
        return Err(BitmapError::StructuralMismatch {
            declared: u64::from(info.file_size),
            expected,
        });
    }

    let bpp = info.bits_per_pixel;
    if bpp < 24 || bpp % 8 != 0 {
        return Err(BitmapError::UnsupportedVariant(format!(
            "BMP bit depth {bpp} unsupported, need 24 or a wider whole-byte depth"
        )));
    }

    // Declared size is consistent; the input itself may still be truncated.
    if (data.len() as u64) < expected {
        return Err(BitmapError::UnexpectedEof);
    }

    Ok(info)
}

/// Decode a validated BMP into a grid, top row first.
pub(crate) fn decode_bmp_pixels(
    data: &[u8],
    info: &BmpInfo,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<PixelGrid, BitmapError> {
    let too_large = || BitmapError::DimensionsTooLarge {
        width: u64::from(info.width),
        height: u64::from(info.height),
    };
    let w = usize::try_from(info.width).map_err(|_| too_large())?;
    let h = usize::try_from(info.height).map_err(|_| too_large())?;
    let pixel_count = w.checked_mul(h).ok_or_else(too_large)?;

    if let Some(limits) = limits {
        limits.check(u64::from(info.width), u64::from(info.height))?;
        limits.check_memory((pixel_count as u64).saturating_mul(size_of::<Pixel>() as u64))?;
    }

    stop.check()?;

    // A consistent header declares at most u32::MAX bytes and the caller
    // checked the input holds them, so these casts cannot truncate.
    let extra = info.bytes_per_pixel() as usize - 3;
    let padding = info.padding() as usize;

    let mut pixels: Vec<Pixel> = vec![Pixel::default(); pixel_count];
    let mut bytes = Cursor::new(data);
    bytes.set_position(info.data_offset as usize)?;

    // First stored row is the bottom of the image.
    for (i, row) in pixels.chunks_exact_mut(w.max(1)).rev().enumerate() {
        if i % 16 == 0 {
            stop.check()?;
        }
        for px in row.iter_mut() {
            *px = Pixel::from_bgr(bytes.read_fixed_bytes::<3>()?);
            // Alpha or other trailing bytes are dropped.
            bytes.skip(extra)?;
        }
        bytes.skip(padding)?;
    }

    PixelGrid::new(w, h, pixels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use enough::Unstoppable;

    /// Hand-built 24-bit file, rows given bottom-up as raw BGR bytes.
    fn raw_bmp(width: u32, rows_bottom_up: &[&[u8]], bpp: u16) -> Vec<u8> {
        let stride = rows_bottom_up.first().map_or(0, |r| r.len());
        let height = rows_bottom_up.len() as u32;
        let mut out = vec![0u8; 54];
        out[0] = b'B';
        out[1] = b'M';
        let size = 54 + (stride as u32) * height;
        out[2..6].copy_from_slice(&size.to_le_bytes());
        out[10..14].copy_from_slice(&54u32.to_le_bytes());
        out[14..18].copy_from_slice(&40u32.to_le_bytes());
        out[18..22].copy_from_slice(&width.to_le_bytes());
        out[22..26].copy_from_slice(&height.to_le_bytes());
        out[26..28].copy_from_slice(&1u16.to_le_bytes());
        out[28..30].copy_from_slice(&bpp.to_le_bytes());
        for row in rows_bottom_up {
            out.extend_from_slice(row);
        }
        out
    }

    fn decode(data: &[u8]) -> Result<PixelGrid, BitmapError> {
        let info = validate(data, BmpPermissiveness::Standard)?;
        decode_bmp_pixels(data, &info, None, &Unstoppable)
    }

    #[test]
    fn rows_are_bottom_up_and_bgr() {
        // width 1: 3 pixel bytes + 1 padding
        let data = raw_bmp(1, &[&[1, 2, 3, 0], &[4, 5, 6, 0]], 24);
        let grid = decode(&data).unwrap();
        assert_eq!(grid.height(), 2);
        assert_eq!(grid[(0, 0)], Pixel::new(6, 5, 4));
        assert_eq!(grid[(1, 0)], Pixel::new(3, 2, 1));
    }

    #[test]
    fn alpha_bytes_are_skipped() {
        // 32bpp, width 2: 8 bytes per row, no padding
        let data = raw_bmp(2, &[&[10, 20, 30, 99, 40, 50, 60, 99]], 32);
        let grid = decode(&data).unwrap();
        assert_eq!(grid.pixels(), &[Pixel::new(30, 20, 10), Pixel::new(60, 50, 40)]);
    }

    #[test]
    fn padding_is_skipped_for_width_3() {
        let row = [0u8, 0, 255, 0, 255, 0, 255, 0, 0, 0xAA, 0xAA, 0xAA];
        let data = raw_bmp(3, &[&row, &row], 24);
        let grid = decode(&data).unwrap();
        assert_eq!(grid.width(), 3);
        for r in grid.rows() {
            assert_eq!(r, &[Pixel::RED, Pixel::GREEN, Pixel::BLUE]);
        }
    }

    #[test]
    fn mismatched_size_is_structural() {
        let mut data = raw_bmp(1, &[&[1, 2, 3, 0]], 24);
        data[2..6].copy_from_slice(&57u32.to_le_bytes());
        match decode(&data) {
            Err(BitmapError::StructuralMismatch { declared, expected }) => {
                assert_eq!((declared, expected), (57, 58));
            }
            other => panic!("expected StructuralMismatch, got {other:?}"),
        }
    }

    #[test]
    fn truncated_input_is_eof() {
        let data = raw_bmp(1, &[&[1, 2, 3, 0], &[4, 5, 6, 0]], 24);
        assert!(matches!(decode(&data[..60]), Err(BitmapError::UnexpectedEof)));
    }

    #[test]
    fn narrow_bit_depth_rejected() {
        // 8bpp width 4: one 4-byte row, consistent size
        let data = raw_bmp(4, &[&[0, 1, 2, 3]], 8);
        assert!(matches!(decode(&data), Err(BitmapError::UnsupportedVariant(_))));
    }

    #[test]
    fn zero_height_is_a_valid_empty_grid() {
        let data = raw_bmp(5, &[], 24);
        let grid = decode(&data).unwrap();
        assert!(grid.is_empty());
        assert_eq!(grid.width(), 5);
    }

    #[test]
    fn strict_requires_signature() {
        let mut data = raw_bmp(1, &[&[1, 2, 3, 0]], 24);
        data[0] = b'X';
        assert!(decode(&data).is_ok());
        assert!(matches!(
            validate(&data, BmpPermissiveness::Strict),
            Err(BitmapError::UnrecognizedFormat)
        ));
    }
}
