//! Human-readable views of packed glyphs.
//!
//! Both views read the same trimmed region the packer used, so what is
//! shown is what ends up in the bitmap.

use crate::glyph::GlyphRecord;
use crate::grid::{GrayBuffer, PixelGrid, Region};

/// Render a region as `#` (ink) and `.` (paper), one line per row.
pub fn render_ascii<G: PixelGrid + ?Sized>(grid: &G, region: Region, threshold: u8) -> String {
    let mut out = String::with_capacity(((region.width + 1) * region.height) as usize);
    for y in 0..region.height {
        for x in 0..region.width {
            let ink = region
                .to_grid(x, y)
                .is_some_and(|(gx, gy)| grid.is_dark(gx, gy, threshold));
            out.push(if ink { '#' } else { '.' });
        }
        out.push('\n');
    }
    out
}

/// Composite strip of glyphs laid out left to right.
#[derive(Debug, Clone)]
pub struct PreviewStrip {
    canvas: GrayBuffer,
    cursor: u32,
    gap: u32,
    threshold: u8,
}

impl PreviewStrip {
    /// Start a strip for `glyph_count` glyphs of at most `max_width` pixels
    /// each. `gap` columns are left after every glyph.
    pub fn new(glyph_count: usize, max_width: u32, height: u32, gap: u32, threshold: u8) -> Self {
        let capacity = glyph_count as u32 * (max_width + gap);
        Self {
            canvas: GrayBuffer::new_white(capacity, height),
            cursor: 0,
            gap,
            threshold,
        }
    }

    /// Copy the packed region of `record` from its raster.
    ///
    /// Glyphs that would run past the reserved width are clipped.
    pub fn push<G: PixelGrid + ?Sized>(&mut self, grid: &G, record: &GlyphRecord) {
        let region = record.region();
        for y in 0..region.height {
            for x in 0..region.width {
                let Some((gx, gy)) = region.to_grid(x, y) else {
                    continue;
                };
                if grid.is_dark(gx, gy, self.threshold) {
                    self.canvas.set_clipped(self.cursor as i64 + x as i64, gy as i64, 0);
                }
            }
        }
        self.cursor = self.cursor.saturating_add(record.width()).saturating_add(self.gap);
    }

    /// Width used so far, including trailing gaps.
    pub fn used_width(&self) -> u32 {
        self.cursor
    }

    /// The strip cropped to the used width.
    pub fn finish(self) -> GrayBuffer {
        let width = self.cursor.min(self.canvas.width);
        let height = self.canvas.height;
        let mut out = GrayBuffer::new_white(width, height);
        for y in 0..height {
            for x in 0..width {
                out.set(x, y, self.canvas.get(x, y));
            }
        }
        out
    }
}
