//! Rotation and nearest-neighbour enlargement.

use super::{check_degrees, check_scale, unchanged};
use crate::grid::PixelGrid;

/// Rotate a quarter turn clockwise: `(row, col)` moves to `(col, height - 1 - row)`.
pub fn rotate90(grid: &PixelGrid) -> PixelGrid {
    let h = grid.height();
    PixelGrid::from_fn(h, grid.width(), |row, col| grid[(h - 1 - col, row)])
}

fn rotate180(grid: &PixelGrid) -> PixelGrid {
    let (w, h) = (grid.width(), grid.height());
    PixelGrid::from_fn(w, h, |row, col| grid[(h - 1 - row, w - 1 - col)])
}

fn rotate270(grid: &PixelGrid) -> PixelGrid {
    let w = grid.width();
    PixelGrid::from_fn(grid.height(), w, |row, col| grid[(col, w - 1 - row)])
}

/// Rotate `turns` quarter turns clockwise. Negative values turn
/// counter-clockwise; only `turns mod 4` matters.
pub fn rotate_n(grid: &PixelGrid, turns: i32) -> PixelGrid {
    match turns.rem_euclid(4) {
        0 => grid.clone(),
        1 => rotate90(grid),
        2 => rotate180(grid),
        _ => rotate270(grid),
    }
}

/// Rotate clockwise by `degrees`, which must be a multiple of 90.
///
/// Any other angle is logged and the grid is returned unchanged.
pub fn rotate_degrees(grid: &PixelGrid, degrees: i32) -> PixelGrid {
    if let Err(e) = check_degrees(degrees) {
        return unchanged(grid, e);
    }
    rotate_n(grid, degrees / 90)
}

/// Nearest-neighbour upscale: output `(row, col)` copies input
/// `(row / y_scale, col / x_scale)`.
///
/// A zero scale, or an output too large to address, is logged and the grid
/// is returned unchanged.
pub fn enlarge(grid: &PixelGrid, x_scale: u32, y_scale: u32) -> PixelGrid {
    if let Err(e) = check_scale(grid, x_scale, y_scale) {
        return unchanged(grid, e);
    }
    let (xs, ys) = (x_scale as usize, y_scale as usize);
    let enlarged = PixelGrid::try_from_fn(grid.width() * xs, grid.height() * ys, |row, col| {
        grid[(row / ys, col / xs)]
    });
    match enlarged {
        Ok(out) => out,
        Err(e) => unchanged(grid, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::Pixel;

    /// 3 wide, 2 tall, each pixel tagged with its position.
    fn tagged() -> PixelGrid {
        PixelGrid::from_fn(3, 2, |r, c| Pixel::new(r as u8, c as u8, 0))
    }

    #[test]
    fn rotate90_moves_top_left_to_top_right() {
        let g = tagged();
        let r = rotate90(&g);
        assert_eq!((r.width(), r.height()), (2, 3));
        // (row, col) -> (col, h - 1 - row)
        for row in 0..2 {
            for col in 0..3 {
                assert_eq!(r[(col, 1 - row)], g[(row, col)]);
            }
        }
    }

    #[test]
    fn closed_forms_match_repeated_quarter_turns() {
        let g = tagged();
        assert_eq!(rotate_n(&g, 2), rotate90(&rotate90(&g)));
        assert_eq!(rotate_n(&g, 3), rotate90(&rotate90(&rotate90(&g))));
        assert_eq!(rotate_n(&g, -1), rotate_n(&g, 3));
        assert_eq!(rotate_n(&g, 4), g);
    }

    #[test]
    fn degrees_must_be_multiple_of_90() {
        let g = tagged();
        assert_eq!(rotate_degrees(&g, 45), g);
        assert_eq!(rotate_degrees(&g, 270), rotate_n(&g, 3));
        assert_eq!(rotate_degrees(&g, -90), rotate_n(&g, 3));
    }

    #[test]
    fn enlarge_uses_floor_division() {
        let g = tagged();
        let e = enlarge(&g, 2, 3);
        assert_eq!((e.width(), e.height()), (6, 6));
        assert_eq!(e[(5, 5)], g[(1, 2)]);
        assert_eq!(e[(2, 1)], g[(0, 0)]);
        assert_eq!(e[(3, 2)], g[(1, 1)]);
    }

    #[test]
    fn enlarge_beyond_addressable_memory_is_a_no_op() {
        // u32::MAX squared pixels fits a usize count but not a byte size
        let one = PixelGrid::filled(1, 1, Pixel::RED);
        assert_eq!(enlarge(&one, u32::MAX, u32::MAX), one);
    }

    #[test]
    fn enlarge_zero_scale_is_a_no_op() {
        let g = tagged();
        assert_eq!(enlarge(&g, 0, 2), g);
    }
}
