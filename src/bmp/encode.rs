//! BMP encoder: uncompressed, bottom-up, 24-bit.

use enough::Stop;

use super::header::{self, PIXEL_ARRAY_OFFSET};
use crate::error::BitmapError;
use crate::grid::PixelGrid;
use crate::limits::Limits;

/// Serialize `grid` as a 24-bit BMP. Output depth is always 24; no alpha.
pub(crate) fn encode_bmp(
    grid: &PixelGrid,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<Vec<u8>, BitmapError> {
    let w = grid.width();
    let h = grid.height();
    if w == 0 || h == 0 {
        return Err(BitmapError::EmptyGrid);
    }
    let too_large = || BitmapError::DimensionsTooLarge {
        width: w as u64,
        height: h as u64,
    };

    // Header stores width and height as i32.
    let width = i32::try_from(w).map_err(|_| too_large())?;
    let height = i32::try_from(h).map_err(|_| too_large())?;

    let row_bytes = w.checked_mul(3).ok_or_else(too_large)?;
    let pad_bytes = header::row_padding(row_bytes as u64) as usize;
    let row_stride = row_bytes + pad_bytes;
    let pixel_data_size = row_stride.checked_mul(h).ok_or_else(too_large)?;
    let file_size = pixel_data_size
        .checked_add(PIXEL_ARRAY_OFFSET as usize)
        .ok_or_else(too_large)?;
    let pixel_data_size = u32::try_from(pixel_data_size).map_err(|_| too_large())?;
    let file_size_field = u32::try_from(file_size).map_err(|_| too_large())?;

    if let Some(limits) = limits {
        limits.check(w as u64, h as u64)?;
        limits.check_memory(file_size as u64)?;
    }

    stop.check()?;

    let mut out = Vec::with_capacity(file_size);
    header::write(&mut out, file_size_field, pixel_data_size, width, height);

    // Last grid row is written first.
    for (i, row) in grid.rows().rev().enumerate() {
        if i % 16 == 0 {
            stop.check()?;
        }
        for px in row {
            out.extend_from_slice(&px.to_bgr());
        }
        out.extend(core::iter::repeat_n(0u8, pad_bytes));
    }

    log::debug!("encoded {w}x{h} BMP, {} bytes", out.len());
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::Pixel;
    use enough::Unstoppable;

    #[test]
    fn layout_of_2x2() {
        let grid = PixelGrid::from_rows(vec![
            vec![Pixel::new(1, 2, 3), Pixel::new(4, 5, 6)],
            vec![Pixel::new(7, 8, 9), Pixel::new(10, 11, 12)],
        ])
        .unwrap();
        let out = encode_bmp(&grid, None, &Unstoppable).unwrap();
        // 6 pixel bytes + 2 padding per row
        assert_eq!(out.len(), 54 + 16);
        assert_eq!(&out[2..6], &70u32.to_le_bytes());
        assert_eq!(&out[34..38], &16u32.to_le_bytes());
        // bottom row first, BGR, then padding
        assert_eq!(&out[54..62], &[9, 8, 7, 12, 11, 10, 0, 0]);
        assert_eq!(&out[62..70], &[3, 2, 1, 6, 5, 4, 0, 0]);
    }

    #[test]
    fn empty_grid_rejected() {
        let grid = PixelGrid::filled(0, 3, Pixel::BLACK);
        assert!(matches!(
            encode_bmp(&grid, None, &Unstoppable),
            Err(BitmapError::EmptyGrid)
        ));
        assert!(matches!(
            encode_bmp(&PixelGrid::default(), None, &Unstoppable),
            Err(BitmapError::EmptyGrid)
        ));
    }

    #[test]
    fn memory_limit_covers_file_size() {
        let grid = PixelGrid::filled(4, 4, Pixel::WHITE);
        let limits = Limits {
            max_memory_bytes: Some(54 + 47),
            ..Default::default()
        };
        assert!(matches!(
            encode_bmp(&grid, Some(&limits), &Unstoppable),
            Err(BitmapError::LimitExceeded(_))
        ));
    }
}
