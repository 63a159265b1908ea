//! Pixel-grid transforms.
//!
//! Every transform borrows its input and returns a new [`PixelGrid`]. A
//! transform given an invalid parameter logs a warning and returns an
//! unchanged copy, so a pipeline keeps running with the caller's grid intact.
//!
//! ```
//! use bmpfx::{Pixel, PixelGrid, Transform};
//!
//! let red = PixelGrid::filled(2, 2, Pixel::RED);
//! let gray: Transform = "grayscale".parse()?;
//! assert_eq!(gray.apply(&red)[(0, 0)], Pixel::new(85, 85, 85));
//! # Ok::<(), bmpfx::BitmapError>(())
//! ```

mod geometry;
mod tone;

pub use geometry::{enlarge, rotate_degrees, rotate_n, rotate90};
pub use tone::{
    CLARENDON_DARK, CLARENDON_LIGHT, HIGH_CONTRAST_THRESHOLD, POSTERIZE_BLACK_SUM,
    POSTERIZE_WHITE_SUM, clarendon, darken, grayscale, high_contrast, lighten, posterize5,
    vignette,
};

use core::alloc::Layout;
use core::fmt;
use core::str::FromStr;

use crate::error::BitmapError;
use crate::grid::PixelGrid;
use crate::pixel::Pixel;

/// One entry of the transform catalog, with its parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
#[non_exhaustive]
pub enum Transform {
    Vignette,
    Clarendon { factor: f64 },
    Grayscale,
    Rotate90,
    /// Clockwise quarter turns; negative turns counter-clockwise.
    RotateN { turns: i32 },
    /// Clockwise rotation in degrees, a multiple of 90.
    RotateDegrees { degrees: i32 },
    Enlarge { x_scale: u32, y_scale: u32 },
    HighContrast,
    Lighten { factor: f64 },
    Darken { factor: f64 },
    Posterize5,
}

/// Name, parameter syntax and summary of every transform, in menu order.
pub const CATALOG: &[(&str, &str, &str)] = &[
    ("vignette", "", "darken toward the edges"),
    ("clarendon", "=FACTOR", "lighten bright pixels, darken dark ones"),
    ("grayscale", "", "replace channels with their mean"),
    ("rotate90", "", "quarter turn clockwise"),
    ("rotate", "=TURNS", "TURNS quarter turns clockwise"),
    ("rotate-degrees", "=DEGREES", "rotate clockwise by a multiple of 90 degrees"),
    ("enlarge", "=XxY", "nearest-neighbour upscale by integer factors"),
    ("high-contrast", "", "black or white by brightness"),
    ("lighten", "=FACTOR", "scale each channel's distance from white"),
    ("darken", "=FACTOR", "scale each channel toward black"),
    ("posterize", "", "reduce to black, white, red, green and blue"),
];

impl Transform {
    /// Catalog name, as accepted by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            Transform::Vignette => "vignette",
            Transform::Clarendon { .. } => "clarendon",
            Transform::Grayscale => "grayscale",
            Transform::Rotate90 => "rotate90",
            Transform::RotateN { .. } => "rotate",
            Transform::RotateDegrees { .. } => "rotate-degrees",
            Transform::Enlarge { .. } => "enlarge",
            Transform::HighContrast => "high-contrast",
            Transform::Lighten { .. } => "lighten",
            Transform::Darken { .. } => "darken",
            Transform::Posterize5 => "posterize",
        }
    }

    /// Check the parameters without touching a grid.
    ///
    /// Enlarge overflow depends on the grid and is only caught by [`Self::apply`].
    pub fn validate(&self) -> Result<(), BitmapError> {
        match *self {
            Transform::Clarendon { factor }
            | Transform::Lighten { factor }
            | Transform::Darken { factor } => check_factor(factor),
            Transform::RotateDegrees { degrees } => check_degrees(degrees),
            Transform::Enlarge { x_scale, y_scale } => {
                check_scale(&PixelGrid::default(), x_scale, y_scale)
            }
            _ => Ok(()),
        }
    }

    /// Apply to `grid`, returning a new grid.
    pub fn apply(&self, grid: &PixelGrid) -> PixelGrid {
        match *self {
            Transform::Vignette => vignette(grid),
            Transform::Clarendon { factor } => clarendon(grid, factor),
            Transform::Grayscale => grayscale(grid),
            Transform::Rotate90 => rotate90(grid),
            Transform::RotateN { turns } => rotate_n(grid, turns),
            Transform::RotateDegrees { degrees } => rotate_degrees(grid, degrees),
            Transform::Enlarge { x_scale, y_scale } => enlarge(grid, x_scale, y_scale),
            Transform::HighContrast => high_contrast(grid),
            Transform::Lighten { factor } => lighten(grid, factor),
            Transform::Darken { factor } => darken(grid, factor),
            Transform::Posterize5 => posterize5(grid),
        }
    }
}

/// Apply `transforms` in order, each to the previous result.
pub fn apply_all(grid: &PixelGrid, transforms: &[Transform]) -> PixelGrid {
    transforms
        .iter()
        .fold(grid.clone(), |current, t| t.apply(&current))
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.name();
        match *self {
            Transform::Clarendon { factor }
            | Transform::Lighten { factor }
            | Transform::Darken { factor } => write!(f, "{name}={factor}"),
            Transform::RotateN { turns } => write!(f, "{name}={turns}"),
            Transform::RotateDegrees { degrees } => write!(f, "{name}={degrees}"),
            Transform::Enlarge { x_scale, y_scale } => write!(f, "{name}={x_scale}x{y_scale}"),
            _ => f.write_str(name),
        }
    }
}

impl FromStr for Transform {
    type Err = BitmapError;

    /// Parse `name` or `name=value`, e.g. `darken=0.5`, `enlarge=2x3`.
    ///
    /// Only the syntax is checked; out-of-range values such as
    /// `rotate-degrees=45` parse, and [`Transform::validate`] rejects them.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, value) = match s.split_once('=') {
            Some((n, v)) => (n.trim(), Some(v.trim())),
            None => (s.trim(), None),
        };
        let name = name.to_ascii_lowercase();

        let transform = match (name.as_str(), value) {
            ("vignette", None) => Transform::Vignette,
            ("grayscale" | "greyscale", None) => Transform::Grayscale,
            ("rotate90", None) => Transform::Rotate90,
            ("high-contrast", None) => Transform::HighContrast,
            ("posterize", None) => Transform::Posterize5,
            ("clarendon", Some(v)) => Transform::Clarendon {
                factor: parse_value(&name, v)?,
            },
            ("lighten", Some(v)) => Transform::Lighten {
                factor: parse_value(&name, v)?,
            },
            ("darken", Some(v)) => Transform::Darken {
                factor: parse_value(&name, v)?,
            },
            ("rotate", Some(v)) => Transform::RotateN {
                turns: parse_value(&name, v)?,
            },
            ("rotate-degrees", Some(v)) => Transform::RotateDegrees {
                degrees: parse_value(&name, v)?,
            },
            ("enlarge", Some(v)) => {
                let (x, y) = v.split_once(['x', 'X']).ok_or_else(|| {
                    BitmapError::InvalidParameter(format!(
                        "enlarge expects XxY, got {v:?}"
                    ))
                })?;
                Transform::Enlarge {
                    x_scale: parse_value(&name, x)?,
                    y_scale: parse_value(&name, y)?,
                }
            }
            (known, _) if CATALOG.iter().any(|(n, _, _)| *n == known) => {
                return Err(BitmapError::InvalidParameter(format!(
                    "wrong arguments for {known:?}: {s:?}"
                )));
            }
            _ => {
                return Err(BitmapError::InvalidParameter(format!(
                    "unknown transform {s:?}"
                )));
            }
        };
        Ok(transform)
    }
}

fn parse_value<T: FromStr>(name: &str, value: &str) -> Result<T, BitmapError> {
    value.trim().parse().map_err(|_| {
        BitmapError::InvalidParameter(format!("bad value {value:?} for {name}"))
    })
}

// ── Parameter checks ────────────────────────────────────────────────

pub(crate) fn check_factor(factor: f64) -> Result<(), BitmapError> {
    if factor.is_finite() {
        Ok(())
    } else {
        Err(BitmapError::InvalidParameter(format!(
            "scaling factor must be finite, got {factor}"
        )))
    }
}

pub(crate) fn check_degrees(degrees: i32) -> Result<(), BitmapError> {
    if degrees % 90 == 0 {
        Ok(())
    } else {
        Err(BitmapError::InvalidParameter(format!(
            "angle must be a multiple of 90 degrees, got {degrees}"
        )))
    }
}

pub(crate) fn check_scale(grid: &PixelGrid, x_scale: u32, y_scale: u32) -> Result<(), BitmapError> {
    if x_scale == 0 || y_scale == 0 {
        return Err(BitmapError::InvalidParameter(format!(
            "enlarge scales must be at least 1, got {x_scale}x{y_scale}"
        )));
    }
    let width = grid.width().checked_mul(x_scale as usize);
    let height = grid.height().checked_mul(y_scale as usize);
    let count = width.zip(height).and_then(|(w, h)| w.checked_mul(h));
    // The byte size of the buffer must also stay within isize::MAX.
    match count.map(Layout::array::<Pixel>) {
        Some(Ok(_)) => Ok(()),
        _ => Err(BitmapError::DimensionsTooLarge {
            width: (grid.width() as u64).saturating_mul(u64::from(x_scale)),
            height: (grid.height() as u64).saturating_mul(u64::from(y_scale)),
        }),
    }
}

/// The invalid-parameter path: report and hand back a copy of the input.
pub(crate) fn unchanged(grid: &PixelGrid, err: BitmapError) -> PixelGrid {
    log::warn!("{err}; image left unchanged");
    grid.clone()
}

/// Build a same-size grid from `f(row, col, pixel)`.
#[cfg(not(feature = "parallel"))]
pub(crate) fn map_pixels(
    grid: &PixelGrid,
    f: impl Fn(usize, usize, Pixel) -> Pixel + Sync,
) -> PixelGrid {
    PixelGrid::from_fn(grid.width(), grid.height(), |row, col| {
        f(row, col, grid[(row, col)])
    })
}

/// Build a same-size grid from `f(row, col, pixel)`, one rayon task per row.
#[cfg(feature = "parallel")]
pub(crate) fn map_pixels(
    grid: &PixelGrid,
    f: impl Fn(usize, usize, Pixel) -> Pixel + Sync,
) -> PixelGrid {
    use rayon::prelude::*;

    let (w, h) = (grid.width(), grid.height());
    let mut out = vec![Pixel::default(); grid.pixels().len()];
    if w > 0 {
        out.par_chunks_mut(w)
            .zip(grid.pixels().par_chunks(w))
            .enumerate()
            .for_each(|(row, (dst, src))| {
                for (col, (d, &s)) in dst.iter_mut().zip(src).enumerate() {
                    *d = f(row, col, s);
                }
            });
    }
    PixelGrid::from_parts(w, h, out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display_round_trip() {
        for spec in [
            "vignette",
            "clarendon=0.5",
            "grayscale",
            "rotate90",
            "rotate=-3",
            "rotate-degrees=180",
            "enlarge=2x3",
            "high-contrast",
            "lighten=0.25",
            "darken=2",
            "posterize",
        ] {
            let t: Transform = spec.parse().unwrap();
            assert_eq!(t.to_string(), spec);
        }
    }

    #[test]
    fn parse_rejects_bad_specs() {
        for spec in [
            "sepia",
            "darken",
            "vignette=1",
            "enlarge=2",
            "enlarge=-1x2",
            "lighten=abc",
        ] {
            assert!(
                matches!(
                    spec.parse::<Transform>(),
                    Err(BitmapError::InvalidParameter(_))
                ),
                "{spec} should be rejected"
            );
        }
    }

    #[test]
    fn out_of_range_values_parse_but_fail_validation() {
        for spec in ["enlarge=0x1", "rotate-degrees=45", "darken=inf"] {
            let t: Transform = spec.parse().unwrap();
            assert!(
                matches!(t.validate(), Err(BitmapError::InvalidParameter(_))),
                "{spec} should fail validation"
            );
        }
    }

    #[test]
    fn catalog_covers_every_name() {
        let names: Vec<String> = CATALOG.iter().map(|(n, _, _)| n.to_string()).collect();
        for t in [
            Transform::Vignette,
            Transform::Clarendon { factor: 1.0 },
            Transform::Grayscale,
            Transform::Rotate90,
            Transform::RotateN { turns: 1 },
            Transform::RotateDegrees { degrees: 90 },
            Transform::Enlarge { x_scale: 1, y_scale: 1 },
            Transform::HighContrast,
            Transform::Lighten { factor: 1.0 },
            Transform::Darken { factor: 1.0 },
            Transform::Posterize5,
        ] {
            assert!(names.iter().any(|n| n == t.name()), "{} missing", t.name());
        }
    }

    #[test]
    fn enlarge_byte_size_overflow_is_rejected() {
        let one = PixelGrid::filled(1, 1, Pixel::RED);
        assert!(matches!(
            check_scale(&one, u32::MAX, u32::MAX),
            Err(BitmapError::DimensionsTooLarge { .. })
        ));
        assert!(check_scale(&one, 1 << 10, 1 << 10).is_ok());
    }

    #[test]
    fn enlarge_overflow_is_rejected() {
        let grid = PixelGrid::filled(2, 2, Pixel::BLACK);
        assert!(matches!(
            check_scale(&grid, u32::MAX, u32::MAX),
            Err(BitmapError::DimensionsTooLarge { .. })
        ));
        assert_eq!(enlarge(&grid, u32::MAX, u32::MAX), grid);
    }
}
