//! Glyph trimming.
//!
//! Counts fully-empty columns (rows) from each edge of a glyph raster. The
//! two sides are scanned independently so asymmetric glyphs crop tightly.

use serde::{Deserialize, Serialize};

use crate::grid::PixelGrid;

/// Empty columns on the left and right of a glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HorizontalTrim {
    /// Leading empty columns.
    pub left: u32,
    /// Trailing empty columns.
    pub right: u32,
}

impl HorizontalTrim {
    /// Width left after trimming `width` columns.
    pub fn trimmed_width(&self, width: u32) -> u32 {
        width.saturating_sub(self.left + self.right)
    }

    /// Whether the trim consumed the whole width.
    pub fn is_blank(&self, width: u32) -> bool {
        self.trimmed_width(width) == 0
    }
}

/// Empty rows above and below a glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VerticalTrim {
    /// Leading empty rows.
    pub top: u32,
    /// Trailing empty rows.
    pub bottom: u32,
}

impl VerticalTrim {
    /// Height left after trimming `height` rows.
    pub fn trimmed_height(&self, height: u32) -> u32 {
        height.saturating_sub(self.top + self.bottom)
    }

    /// Whether the trim consumed the whole height.
    pub fn is_blank(&self, height: u32) -> bool {
        self.trimmed_height(height) == 0
    }
}

/// Count empty columns from both edges.
///
/// A blank grid yields `left == width, right == 0` so the counts sum to the
/// full width.
pub fn trim_horizontal<G: PixelGrid + ?Sized>(grid: &G, threshold: u8) -> HorizontalTrim {
    let width = grid.width();
    let height = grid.height();
    let column_empty = |x: u32| (0..height).all(|y| !grid.is_dark(x, y, threshold));

    let left = (0..width).take_while(|&x| column_empty(x)).count() as u32;
    if left == width {
        return HorizontalTrim { left, right: 0 };
    }
    let right = (0..width).rev().take_while(|&x| column_empty(x)).count() as u32;

    HorizontalTrim { left, right }
}

/// Count empty rows from both edges.
///
/// A blank grid yields `top == height, bottom == 0`.
pub fn trim_vertical<G: PixelGrid + ?Sized>(grid: &G, threshold: u8) -> VerticalTrim {
    let width = grid.width();
    let height = grid.height();
    let row_empty = |y: u32| (0..width).all(|x| !grid.is_dark(x, y, threshold));

    let top = (0..height).take_while(|&y| row_empty(y)).count() as u32;
    if top == height {
        return VerticalTrim { top, bottom: 0 };
    }
    let bottom = (0..height).rev().take_while(|&y| row_empty(y)).count() as u32;

    VerticalTrim { top, bottom }
}
