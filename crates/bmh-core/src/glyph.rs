//! Glyph record construction.
//!
//! Combines trimming, packing and the sizing policy into one immutable
//! [`GlyphRecord`] per character.

use serde::{Deserialize, Serialize};

use crate::error::{Axis, GlyphWarning, RecordError, Resolution};
use crate::grid::{PixelGrid, Region};
use crate::pack::{pack, packed_len, Orientation};
use crate::policy::{PackingPolicy, Sizing};
use crate::trim::{trim_horizontal, trim_vertical};

/// Code point of the space character.
pub const SPACE: u32 = 0x20;

/// Packed bitmap and metrics for one character.
///
/// Deserializing checks that the bitmap length, page count and region agree
/// with the stored width and height.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RecordFields")]
pub struct GlyphRecord {
    codepoint: u32,
    bitmap: Vec<u8>,
    width: u32,
    height: u32,
    height_pages: u32,
    x_offset: u32,
    y_offset: u32,
    orientation: Orientation,
    region: Region,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    warning: Option<GlyphWarning>,
}

#[derive(Deserialize)]
struct RecordFields {
    codepoint: u32,
    bitmap: Vec<u8>,
    width: u32,
    height: u32,
    height_pages: u32,
    x_offset: u32,
    y_offset: u32,
    orientation: Orientation,
    region: Region,
    #[serde(default)]
    warning: Option<GlyphWarning>,
}

impl TryFrom<RecordFields> for GlyphRecord {
    type Error = RecordError;

    fn try_from(fields: RecordFields) -> Result<Self, Self::Error> {
        let codepoint = fields.codepoint;
        let expected = packed_len(fields.width, fields.height, fields.orientation);
        if fields.bitmap.len() != expected {
            return Err(RecordError::BitmapLength {
                codepoint,
                expected,
                actual: fields.bitmap.len(),
            });
        }
        let pages = fields.height.div_ceil(8);
        if fields.height_pages != pages {
            return Err(RecordError::PageCount {
                codepoint,
                expected: pages,
                actual: fields.height_pages,
            });
        }
        let region = fields.region;
        if region.x != fields.x_offset || region.width != fields.width || region.height != fields.height {
            return Err(RecordError::RegionMismatch(codepoint));
        }

        Ok(GlyphRecord {
            codepoint,
            bitmap: fields.bitmap,
            width: fields.width,
            height: fields.height,
            height_pages: fields.height_pages,
            x_offset: fields.x_offset,
            y_offset: fields.y_offset,
            orientation: fields.orientation,
            region,
            warning: fields.warning,
        })
    }
}

impl GlyphRecord {
    /// Unicode code point.
    pub fn codepoint(&self) -> u32 {
        self.codepoint
    }

    /// The character, if the code point is a valid scalar value.
    pub fn character(&self) -> Option<char> {
        char::from_u32(self.codepoint)
    }

    /// Packed pixel data.
    pub fn bitmap(&self) -> &[u8] {
        &self.bitmap
    }

    /// Effective (advance) width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Effective height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of 8-pixel pages the height spans.
    pub fn height_pages(&self) -> u32 {
        self.height_pages
    }

    /// Columns trimmed from the left of the raster.
    pub fn x_offset(&self) -> u32 {
        self.x_offset
    }

    /// Rows from the top of the line to the first packed row.
    pub fn y_offset(&self) -> u32 {
        self.y_offset
    }

    /// Byte layout of [`Self::bitmap`].
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Packed rectangle in raster coordinates.
    pub fn region(&self) -> Region {
        self.region
    }

    /// Set when the glyph was blank on an axis.
    pub fn warning(&self) -> Option<GlyphWarning> {
        self.warning
    }

    /// Whether the glyph takes no horizontal space.
    pub fn is_empty(&self) -> bool {
        self.width == 0
    }

    /// Read a pixel back out of the packed bitmap.
    ///
    /// Coordinates are relative to the packed region.
    pub fn is_set(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let (index, bit) = match self.orientation {
            Orientation::RowMajor => ((y / 8) * self.width + x, 7 - y % 8),
            Orientation::ColumnMajor => (y * self.width.div_ceil(8) + x / 8, 7 - x % 8),
        };
        self.bitmap
            .get(index as usize)
            .is_some_and(|byte| byte & (1 << bit) != 0)
    }
}

/// Effective size and offset on one axis.
struct AxisExtent {
    size: u32,
    offset: u32,
    warning: Option<GlyphWarning>,
}

fn resolve_axis(
    axis: Axis,
    sizing: Sizing,
    nominal: u32,
    lead: u32,
    trail: u32,
    space_size: Option<u32>,
) -> AxisExtent {
    match sizing {
        Sizing::Fixed(size) => AxisExtent {
            size,
            offset: 0,
            warning: None,
        },
        Sizing::Variable => {
            let size = nominal.saturating_sub(lead + trail);
            if size >= 1 {
                return AxisExtent {
                    size,
                    offset: lead,
                    warning: None,
                };
            }
            let (size, resolution) = match space_size {
                Some(size) => (size, Resolution::SpaceAdvance),
                None => (0, Resolution::EmptyBitmap),
            };
            AxisExtent {
                size,
                offset: 0,
                warning: Some(GlyphWarning::Degenerate { axis, resolution }),
            }
        }
    }
}

/// Trim, pack and measure one glyph raster.
///
/// The raster's own dimensions are the nominal glyph box. A blank space
/// character keeps an advance of `round(height * 0.75)` and the full nominal
/// height; any other blank glyph collapses to an empty bitmap.
pub fn build<G: PixelGrid + ?Sized>(grid: &G, codepoint: u32, policy: &PackingPolicy) -> GlyphRecord {
    let nominal_width = grid.width();
    let nominal_height = grid.height();
    let is_space = codepoint == SPACE;

    let horizontal = match policy.width {
        Sizing::Variable => trim_horizontal(grid, policy.threshold),
        Sizing::Fixed(_) => Default::default(),
    };
    let vertical = match policy.height {
        Sizing::Variable => trim_vertical(grid, policy.threshold),
        Sizing::Fixed(_) => Default::default(),
    };

    let space_width = is_space.then(|| (nominal_height as f64 * 0.75).round() as u32);
    let space_height = is_space.then_some(nominal_height);

    let x = resolve_axis(
        Axis::Width,
        policy.width,
        nominal_width,
        horizontal.left,
        horizontal.right,
        space_width,
    );
    let y = resolve_axis(
        Axis::Height,
        policy.height,
        nominal_height,
        vertical.top,
        vertical.bottom,
        space_height,
    );

    let region = Region::new(x.offset, y.offset, x.size, y.size);
    let bitmap = pack(grid, region, policy.orientation, policy.threshold);

    GlyphRecord {
        codepoint,
        bitmap,
        width: x.size,
        height: y.size,
        height_pages: y.size.div_ceil(8),
        x_offset: x.offset,
        y_offset: policy.y_offset_base + y.offset,
        orientation: policy.orientation,
        region,
        warning: x.warning.or(y.warning),
    }
}
