//! Rendering characters into grayscale canvases with fontdue.

use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use bmh_core::GrayBuffer;
use fontdue::{Font, FontSettings, Metrics};
use serde::{Deserialize, Serialize};

use crate::sizes::JobSize;

/// Vertical reference line placed at the render origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    /// Top of the font's ascender line.
    #[default]
    Ascender,
    /// Top of the glyph's ink.
    Top,
    /// Halfway between ascender and descender.
    Middle,
    /// The baseline.
    Baseline,
    /// Bottom of the glyph's ink.
    Bottom,
    /// The font's descender line.
    Descender,
}

impl Anchor {
    /// All anchor names accepted on the command line.
    pub const NAMES: [&'static str; 6] = ["ascender", "top", "middle", "baseline", "bottom", "descender"];

    /// Lower-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Anchor::Ascender => "ascender",
            Anchor::Top => "top",
            Anchor::Middle => "middle",
            Anchor::Baseline => "baseline",
            Anchor::Bottom => "bottom",
            Anchor::Descender => "descender",
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Anchor {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ascender" => Ok(Anchor::Ascender),
            "top" => Ok(Anchor::Top),
            "middle" => Ok(Anchor::Middle),
            "baseline" => Ok(Anchor::Baseline),
            "bottom" => Ok(Anchor::Bottom),
            "descender" => Ok(Anchor::Descender),
            other => Err(anyhow!(
                "Unknown anchor '{}'. Expected one of: {}",
                other,
                Anchor::NAMES.join(", ")
            )),
        }
    }
}

/// Vertical font metrics at one render size, in pixels (y up).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineMetrics {
    /// Distance from baseline to ascender line.
    pub ascent: f32,
    /// Distance from baseline to descender line, negative below.
    pub descent: f32,
}

/// Canvas row of the baseline.
///
/// `origin_y` is the canvas row of the anchor line. `ink_bottom` and
/// `ink_height` are the glyph's bitmap bottom (relative to the baseline, y up)
/// and height.
pub fn baseline_row(anchor: Anchor, origin_y: f32, line: LineMetrics, ink_bottom: f32, ink_height: f32) -> i64 {
    let below_anchor = match anchor {
        Anchor::Ascender => line.ascent,
        Anchor::Top => ink_bottom + ink_height,
        Anchor::Middle => (line.ascent + line.descent) / 2.0,
        Anchor::Baseline => 0.0,
        Anchor::Bottom => ink_bottom,
        Anchor::Descender => line.descent,
    };
    (origin_y + below_anchor).round() as i64
}

/// A loaded font ready to render one job size.
pub struct GlyphRasterizer {
    font: Font,
    size: JobSize,
    anchor: Anchor,
    line: LineMetrics,
}

impl GlyphRasterizer {
    /// Parse font bytes for rendering at `size.render_height` pixels.
    pub fn new(data: &[u8], size: JobSize, anchor: Anchor) -> Result<Self> {
        let font = Font::from_bytes(data, FontSettings::default())
            .map_err(|e| anyhow!("Failed to parse font: {}", e))?;
        let px = size.render_height as f32;
        let line = match font.horizontal_line_metrics(px) {
            Some(metrics) => LineMetrics {
                ascent: metrics.ascent,
                descent: metrics.descent,
            },
            None => LineMetrics {
                ascent: px * 0.8,
                descent: px * -0.2,
            },
        };
        Ok(Self {
            font,
            size,
            anchor,
            line,
        })
    }

    /// Whether the font maps `c` to a real glyph.
    pub fn has_glyph(&self, c: char) -> bool {
        self.font.lookup_glyph_index(c) != 0
    }

    /// Render `c` into a fresh white `width x height` canvas.
    pub fn render(&self, c: char) -> GrayBuffer {
        let (metrics, coverage) = self.font.rasterize(c, self.size.render_height as f32);
        let mut canvas = GrayBuffer::new_white(self.size.width, self.size.height);
        self.draw(&mut canvas, &metrics, &coverage);
        canvas
    }

    fn draw(&self, canvas: &mut GrayBuffer, metrics: &Metrics, coverage: &[u8]) {
        if metrics.width == 0 || metrics.height == 0 {
            return;
        }
        let baseline = baseline_row(
            self.anchor,
            -(self.size.y_offset as f32),
            self.line,
            metrics.ymin as f32,
            metrics.height as f32,
        );
        let top = baseline - (metrics.ymin as i64 + metrics.height as i64);

        for (gy, row) in coverage.chunks(metrics.width).enumerate() {
            for (gx, &ink) in row.iter().enumerate() {
                if ink == 0 {
                    continue;
                }
                let x = metrics.xmin as i64 + gx as i64;
                let y = top + gy as i64;
                if x < 0 || y < 0 || x >= canvas.width as i64 || y >= canvas.height as i64 {
                    continue;
                }
                let current = canvas.get(x as u32, y as u32);
                canvas.set(x as u32, y as u32, current.min(255 - ink));
            }
        }
    }
}
