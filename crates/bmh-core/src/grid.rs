//! Pixel grid access.
//!
//! Rasterized glyphs are single-channel intensity images where `0` is black
//! ink and `255` is white paper. A pixel is "dark" when its intensity is
//! strictly below the packing threshold. Reads outside the raster are never
//! dark, which lets the packer run its 8-pixel bands past a glyph edge.

use serde::{Deserialize, Serialize};

/// Default darkness threshold on the 0-255 intensity scale.
pub const DEFAULT_THRESHOLD: u8 = 127;

/// Read-only access to a rectangular raster of intensities.
pub trait PixelGrid {
    /// Width in pixels.
    fn width(&self) -> u32;

    /// Height in pixels.
    fn height(&self) -> u32;

    /// Intensity at `(x, y)`. Only called for in-bounds coordinates.
    fn intensity(&self, x: u32, y: u32) -> u8;

    /// Whether the pixel at `(x, y)` is ink. Out-of-range reads are not dark.
    #[inline]
    fn is_dark(&self, x: u32, y: u32, threshold: u8) -> bool {
        x < self.width() && y < self.height() && self.intensity(x, y) < threshold
    }
}

/// A rectangle inside a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Region {
    /// Left edge in pixels.
    pub x: u32,
    /// Top edge in pixels.
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Region {
    /// Create a region.
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The region covering a whole grid.
    pub fn full<G: PixelGrid + ?Sized>(grid: &G) -> Self {
        Self::new(0, 0, grid.width(), grid.height())
    }

    /// Whether the region has no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Translate a region-relative position into grid coordinates.
    ///
    /// `None` when the sum does not fit in `u32`.
    #[inline]
    pub fn to_grid(&self, x: u32, y: u32) -> Option<(u32, u32)> {
        Some((self.x.checked_add(x)?, self.y.checked_add(y)?))
    }
}

/// Owned grayscale raster (single channel, row-major).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayBuffer {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel intensities, `width * height` entries.
    pub data: Vec<u8>,
}

impl GrayBuffer {
    /// Create a new buffer filled with an intensity.
    pub fn new(width: u32, height: u32, fill: u8) -> Self {
        let size = (width * height) as usize;
        Self {
            width,
            height,
            data: vec![fill; size],
        }
    }

    /// Create a blank (all white) buffer.
    pub fn new_white(width: u32, height: u32) -> Self {
        Self::new(width, height, u8::MAX)
    }

    /// Build a buffer from text rows where `#` is ink and anything else is
    /// paper. Rows shorter than the longest one are padded with paper.
    pub fn from_ascii(rows: &[&str]) -> Self {
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0) as u32;
        let mut buffer = Self::new_white(width, rows.len() as u32);
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                if c == '#' {
                    buffer.set(x as u32, y as u32, 0);
                }
            }
        }
        buffer
    }

    /// Get a pixel at the given coordinates.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> u8 {
        let idx = (y * self.width + x) as usize;
        self.data[idx]
    }

    /// Set a pixel at the given coordinates.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, value: u8) {
        let idx = (y * self.width + x) as usize;
        self.data[idx] = value;
    }

    /// Set a pixel if it lies inside the buffer; signed coordinates are
    /// clipped.
    #[inline]
    pub fn set_clipped(&mut self, x: i64, y: i64, value: u8) {
        if x >= 0 && y >= 0 && (x as u64) < self.width as u64 && (y as u64) < self.height as u64 {
            self.set(x as u32, y as u32, value);
        }
    }

    /// Borrow a sub-rectangle as a grid.
    pub fn view(&self, region: Region) -> GridView<'_, Self> {
        GridView::new(self, region)
    }
}

impl PixelGrid for GrayBuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn intensity(&self, x: u32, y: u32) -> u8 {
        self.get(x, y)
    }
}

/// A borrowed sub-rectangle of another grid.
///
/// Coordinates are relative to the region origin. Parts of the region that
/// fall outside the parent read as white.
#[derive(Debug, Clone, Copy)]
pub struct GridView<'a, G: ?Sized> {
    parent: &'a G,
    region: Region,
}

impl<'a, G: PixelGrid + ?Sized> GridView<'a, G> {
    /// Create a view of `region` inside `parent`.
    pub fn new(parent: &'a G, region: Region) -> Self {
        Self { parent, region }
    }

    /// The region this view covers, in parent coordinates.
    pub fn region(&self) -> Region {
        self.region
    }
}

impl<G: PixelGrid + ?Sized> PixelGrid for GridView<'_, G> {
    fn width(&self) -> u32 {
        self.region.width
    }

    fn height(&self) -> u32 {
        self.region.height
    }

    fn intensity(&self, x: u32, y: u32) -> u8 {
        match self.region.to_grid(x, y) {
            Some((px, py)) if px < self.parent.width() && py < self.parent.height() => {
                self.parent.intensity(px, py)
            }
            _ => u8::MAX,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set() {
        let mut buf = GrayBuffer::new_white(3, 2);
        buf.set(2, 1, 10);
        assert_eq!(buf.get(2, 1), 10);
        assert_eq!(buf.get(0, 0), 255);
        assert_eq!(buf.data.len(), 6);
    }

    #[test]
    fn test_out_of_range_is_not_dark() {
        let buf = GrayBuffer::new(2, 2, 0);
        assert!(buf.is_dark(1, 1, DEFAULT_THRESHOLD));
        assert!(!buf.is_dark(2, 0, DEFAULT_THRESHOLD));
        assert!(!buf.is_dark(0, 2, DEFAULT_THRESHOLD));
        assert!(!buf.is_dark(u32::MAX, u32::MAX, DEFAULT_THRESHOLD));
    }

    #[test]
    fn test_threshold_is_strict() {
        let buf = GrayBuffer::new(1, 1, 127);
        assert!(!buf.is_dark(0, 0, 127));
        assert!(buf.is_dark(0, 0, 128));
    }

    #[test]
    fn test_region_to_grid_overflow() {
        let region = Region::new(u32::MAX - 1, 3, 4, 4);
        assert_eq!(region.to_grid(1, 1), Some((u32::MAX, 4)));
        assert_eq!(region.to_grid(2, 0), None);
    }

    #[test]
    fn test_view_near_u32_max_reads_white() {
        let buf = GrayBuffer::new(2, 2, 0);
        let view = buf.view(Region::new(u32::MAX, u32::MAX, 4, 4));
        assert_eq!(view.intensity(0, 0), 255);
        assert_eq!(view.intensity(3, 3), 255);
        assert!(!view.is_dark(1, 1, DEFAULT_THRESHOLD));
    }

    #[test]
    fn test_from_ascii_pads_short_rows() {
        let buf = GrayBuffer::from_ascii(&["#..", "#"]);
        assert_eq!((buf.width, buf.height), (3, 2));
        assert_eq!(buf.get(0, 1), 0);
        assert_eq!(buf.get(2, 1), 255);
    }

    #[test]
    fn test_view_offsets_and_clips() {
        let buf = GrayBuffer::from_ascii(&["...", ".#.", "..."]);
        let view = buf.view(Region::new(1, 1, 3, 3));
        assert!(view.is_dark(0, 0, DEFAULT_THRESHOLD));
        assert_eq!(view.intensity(2, 2), 255);
        assert_eq!(view.width(), 3);
    }

    #[test]
    fn test_set_clipped_ignores_outside() {
        let mut buf = GrayBuffer::new_white(2, 2);
        buf.set_clipped(-1, 0, 0);
        buf.set_clipped(0, 5, 0);
        buf.set_clipped(1, 1, 0);
        assert_eq!(buf.data, vec![255, 255, 255, 0]);
    }
}
