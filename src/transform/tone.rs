//! Per-pixel colour transforms.
//!
//! Float results are truncated toward zero and saturated to `[0, 255]`
//! (Rust's `f64 as u8`). Grayscale is the exception and rounds.

use super::{check_factor, map_pixels, unchanged};
use crate::grid::PixelGrid;
use crate::pixel::Pixel;

/// Average at or above which [`clarendon`] lightens a pixel.
pub const CLARENDON_LIGHT: u32 = 170;
/// Average below which [`clarendon`] darkens a pixel.
pub const CLARENDON_DARK: u32 = 90;
/// Average at or above which [`high_contrast`] maps to white.
pub const HIGH_CONTRAST_THRESHOLD: u32 = 128;
/// Channel sum at or above which [`posterize5`] maps to white.
pub const POSTERIZE_WHITE_SUM: u32 = 550;
/// Channel sum at or below which [`posterize5`] maps to black.
pub const POSTERIZE_BLACK_SUM: u32 = 150;

fn lighten_channel(c: u8, factor: f64) -> u8 {
    (255.0 - (255.0 - f64::from(c)) * factor) as u8
}

fn darken_channel(c: u8, factor: f64) -> u8 {
    (f64::from(c) * factor) as u8
}

/// Darken toward the edges in proportion to distance from the centre.
///
/// Each channel is scaled by `(height - d) / height`, where `d` is the
/// Euclidean distance from the pixel to `(height / 2, width / 2)` using
/// integer halves. Pixels further than `height` from the centre go black.
pub fn vignette(grid: &PixelGrid) -> PixelGrid {
    let h = grid.height() as f64;
    let center_row = (grid.height() / 2) as f64;
    let center_col = (grid.width() / 2) as f64;
    map_pixels(grid, |row, col, p| {
        let dr = row as f64 - center_row;
        let dc = col as f64 - center_col;
        let distance = (dr * dr + dc * dc).sqrt();
        let scale = (h - distance) / h;
        p.map(|c| (f64::from(c) * scale) as u8)
    })
}

/// Lighten bright pixels and darken dark ones by `factor`.
///
/// Pixels whose channel average is at least [`CLARENDON_LIGHT`] are
/// lightened as in [`lighten`]; below [`CLARENDON_DARK`] they are darkened
/// as in [`darken`]; anything between is copied.
pub fn clarendon(grid: &PixelGrid, factor: f64) -> PixelGrid {
    if let Err(e) = check_factor(factor) {
        return unchanged(grid, e);
    }
    map_pixels(grid, |_, _, p| {
        let avg = p.average();
        if avg >= CLARENDON_LIGHT {
            p.map(|c| lighten_channel(c, factor))
        } else if avg < CLARENDON_DARK {
            p.map(|c| darken_channel(c, factor))
        } else {
            p
        }
    })
}

/// Replace each channel with the rounded channel mean.
pub fn grayscale(grid: &PixelGrid) -> PixelGrid {
    map_pixels(grid, |_, _, p| {
        // sum / 3 never lands on .5, so +1 before flooring rounds.
        Pixel::gray(((p.sum() + 1) / 3) as u8)
    })
}

/// Black or white by comparing the channel mean with [`HIGH_CONTRAST_THRESHOLD`].
pub fn high_contrast(grid: &PixelGrid) -> PixelGrid {
    map_pixels(grid, |_, _, p| {
        if p.average() >= HIGH_CONTRAST_THRESHOLD {
            Pixel::WHITE
        } else {
            Pixel::BLACK
        }
    })
}

/// Each channel becomes `255 - (255 - c) * factor`.
pub fn lighten(grid: &PixelGrid, factor: f64) -> PixelGrid {
    if let Err(e) = check_factor(factor) {
        return unchanged(grid, e);
    }
    map_pixels(grid, |_, _, p| p.map(|c| lighten_channel(c, factor)))
}

/// Each channel becomes `c * factor`.
pub fn darken(grid: &PixelGrid, factor: f64) -> PixelGrid {
    if let Err(e) = check_factor(factor) {
        return unchanged(grid, e);
    }
    map_pixels(grid, |_, _, p| p.map(|c| darken_channel(c, factor)))
}

/// Reduce to black, white, red, green or blue.
///
/// Bright pixels become white and dark ones black, judged by channel sum;
/// the rest take the pure colour of their largest channel, with ties going
/// to red, then green.
pub fn posterize5(grid: &PixelGrid) -> PixelGrid {
    map_pixels(grid, |_, _, p| {
        let sum = p.sum();
        if sum >= POSTERIZE_WHITE_SUM {
            Pixel::WHITE
        } else if sum <= POSTERIZE_BLACK_SUM {
            Pixel::BLACK
        } else if p.red >= p.green && p.red >= p.blue {
            Pixel::RED
        } else if p.green >= p.blue {
            Pixel::GREEN
        } else {
            Pixel::BLUE
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one(p: Pixel) -> PixelGrid {
        PixelGrid::filled(1, 1, p)
    }

    #[test]
    fn channel_conversion_truncates() {
        assert_eq!(darken_channel(255, 0.5), 127);
        assert_eq!(lighten_channel(0, 0.5), 127);
        assert_eq!(darken_channel(3, 0.9), 2);
    }

    #[test]
    fn channel_conversion_saturates() {
        // 255 - 255 * 2 = -255
        assert_eq!(lighten_channel(0, 2.0), 0);
        assert_eq!(darken_channel(200, 2.0), 255);
        assert_eq!(darken_channel(200, -1.0), 0);
    }

    #[test]
    fn grayscale_rounds() {
        // 1 + 1 + 0 = 2, mean 0.67
        assert_eq!(grayscale(&one(Pixel::new(1, 1, 0)))[(0, 0)], Pixel::gray(1));
        // 1 + 0 + 0 = 1, mean 0.33
        assert_eq!(grayscale(&one(Pixel::new(1, 0, 0)))[(0, 0)], Pixel::gray(0));
        assert_eq!(grayscale(&one(Pixel::WHITE))[(0, 0)], Pixel::WHITE);
    }

    #[test]
    fn high_contrast_threshold() {
        // sum 384 -> mean 128
        assert_eq!(high_contrast(&one(Pixel::new(128, 128, 128)))[(0, 0)], Pixel::WHITE);
        // sum 383 -> mean 127
        assert_eq!(high_contrast(&one(Pixel::new(127, 128, 128)))[(0, 0)], Pixel::BLACK);
    }

    #[test]
    fn clarendon_bands() {
        let bright = one(Pixel::new(170, 170, 170));
        assert_eq!(clarendon(&bright, 0.5)[(0, 0)], Pixel::gray(212));
        let dark = one(Pixel::new(89, 89, 89));
        assert_eq!(clarendon(&dark, 0.5)[(0, 0)], Pixel::gray(44));
        let mid = one(Pixel::new(90, 120, 150));
        assert_eq!(clarendon(&mid, 0.5)[(0, 0)], Pixel::new(90, 120, 150));
    }

    #[test]
    fn posterize_ties_prefer_red_then_green() {
        let cases = [
            (Pixel::new(200, 200, 200), Pixel::WHITE),
            (Pixel::new(50, 50, 50), Pixel::BLACK),
            (Pixel::new(100, 100, 100), Pixel::RED),
            (Pixel::new(50, 100, 100), Pixel::GREEN),
            (Pixel::new(50, 60, 100), Pixel::BLUE),
            (Pixel::new(150, 100, 60), Pixel::RED),
        ];
        for (input, expected) in cases {
            assert_eq!(posterize5(&one(input))[(0, 0)], expected, "input {input:?}");
        }
    }

    #[test]
    fn vignette_keeps_centre_and_darkens_corners() {
        let grid = PixelGrid::filled(5, 5, Pixel::WHITE);
        let out = vignette(&grid);
        assert_eq!(out[(2, 2)], Pixel::WHITE);
        // distance sqrt(8) from centre: 255 * (5 - 2.828) / 5 = 110.7
        assert_eq!(out[(0, 0)], Pixel::gray(110));
    }

    #[test]
    fn non_finite_factor_is_a_no_op() {
        let grid = one(Pixel::new(10, 20, 30));
        assert_eq!(darken(&grid, f64::NAN), grid);
        assert_eq!(lighten(&grid, f64::INFINITY), grid);
    }
}
