//! Pixel height table and per-job glyph box dimensions.

use anyhow::{bail, Result};

/// Supported pixel heights.
pub const FONT_HEIGHTS: [u32; 8] = [8, 16, 24, 32, 40, 48, 56, 64];

/// Default render offset for each entry of [`FONT_HEIGHTS`].
pub const FONT_Y_OFFSETS: [i32; 8] = [0, 3, 6, 5, 7, 8, 9, 10];

/// Default pixel height.
pub const DEFAULT_HEIGHT: u32 = 32;

/// Parse a `--fontsize` value: one table height or `all`.
pub fn parse_fontsize(value: &str) -> Result<Vec<u32>> {
    if value == "all" {
        return Ok(FONT_HEIGHTS.to_vec());
    }
    let height: u32 = value
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid font size '{}'", value))?;
    check_height(height)?;
    Ok(vec![height])
}

/// Reject heights that are not in the table.
pub fn check_height(height: u32) -> Result<()> {
    if !FONT_HEIGHTS.contains(&height) {
        bail!(
            "Unsupported font size {}. Supported sizes: {:?} or all",
            height,
            FONT_HEIGHTS
        );
    }
    Ok(())
}

/// Options that shape the glyph box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SizeOptions {
    /// Fixed box width.
    pub width: Option<u32>,
    /// Square box (width = height) when no width is given.
    pub square: bool,
    /// Font size passed to the rasterizer.
    pub font_height: Option<u32>,
    /// Vertical render offset; the glyph is drawn this many pixels higher.
    pub offset: Option<i32>,
}

/// Dimensions for one (font, pixel height) job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobSize {
    /// Line height in pixels.
    pub height: u32,
    /// Box width in pixels.
    pub width: u32,
    /// Rasterizer font size in pixels.
    pub render_height: u32,
    /// Render offset in pixels.
    pub y_offset: i32,
}

impl JobSize {
    /// Resolve the box for a table height.
    pub fn new(height: u32, options: &SizeOptions) -> Result<Self> {
        let index = FONT_HEIGHTS
            .iter()
            .position(|&h| h == height)
            .ok_or_else(|| anyhow::anyhow!("Unsupported font size {}", height))?;

        let width = match (options.width, options.square) {
            (Some(width), _) => width,
            (None, true) => height,
            (None, false) => height * 3 / 4,
        };
        if width == 0 {
            bail!("Glyph width must be at least 1 pixel");
        }

        Ok(Self {
            height,
            width,
            render_height: options.font_height.unwrap_or(height * 11 / 10),
            y_offset: options.offset.unwrap_or(FONT_Y_OFFSETS[index]),
        })
    }
}
