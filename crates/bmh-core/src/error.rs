//! Error and warning types for glyph packing and font assembly.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected packing configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    /// Both a fixed size and variable sizing were requested for one axis.
    #[error("Conflicting {axis} policy: fixed {axis} {fixed} requested together with variable {axis}")]
    ConflictingSizing {
        /// Affected axis.
        axis: Axis,
        /// The fixed value that was requested.
        fixed: u32,
    },

    /// A fixed size of zero pixels.
    #[error("Fixed {0} must be at least 1 pixel")]
    ZeroFixedSize(Axis),

    /// A threshold of zero makes every pixel light.
    #[error("Threshold must be between 1 and 255, got 0")]
    ZeroThreshold,

    /// Orientation name not recognized.
    #[error("Unknown orientation '{0}'. Expected row_major or column_major")]
    UnknownOrientation(String),
}

/// Fatal errors from [`crate::assemble`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssembleError {
    /// A requested character has no glyph record.
    #[error("No glyph supplied for U+{0:04X}")]
    MissingGlyph(u32),

    /// The character list repeats a code point.
    #[error("Character U+{0:04X} appears more than once in the character list")]
    DuplicateCharacter(u32),

    /// Two glyph records carry the same code point.
    #[error("More than one glyph supplied for U+{0:04X}")]
    DuplicateRecord(u32),

    /// A glyph was packed in a different byte layout than the font.
    #[error("Glyph U+{0:04X} is packed in a different orientation than the font")]
    OrientationMismatch(u32),
}

/// A stored glyph record whose fields disagree with each other.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// Bitmap length does not match the width, height and orientation.
    #[error("Glyph U+{codepoint:04X} bitmap is {actual} bytes, expected {expected}")]
    BitmapLength {
        /// Code point of the record.
        codepoint: u32,
        /// Length implied by the metrics.
        expected: usize,
        /// Length found.
        actual: usize,
    },

    /// Page count is not `ceil(height / 8)`.
    #[error("Glyph U+{codepoint:04X} spans {actual} pages, expected {expected}")]
    PageCount {
        /// Code point of the record.
        codepoint: u32,
        /// Pages implied by the height.
        expected: u32,
        /// Pages found.
        actual: u32,
    },

    /// Packed region does not match the x offset and size.
    #[error("Glyph U+{0:04X} region does not match its x offset and size")]
    RegionMismatch(u32),
}

/// Glyph axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// Horizontal extent.
    Width,
    /// Vertical extent.
    Height,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Width => f.write_str("width"),
            Axis::Height => f.write_str("height"),
        }
    }
}

/// How a degenerate axis was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// The space character kept a non-zero advance.
    SpaceAdvance,
    /// The glyph collapsed to an empty bitmap.
    EmptyBitmap,
}

/// Non-fatal condition recorded on a glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GlyphWarning {
    /// Trimming left nothing on one axis.
    Degenerate {
        /// First axis found blank.
        axis: Axis,
        /// What the builder did about it.
        resolution: Resolution,
    },
}

impl fmt::Display for GlyphWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GlyphWarning::Degenerate {
                axis,
                resolution: Resolution::SpaceAdvance,
            } => write!(f, "blank glyph, {} forced for space", axis),
            GlyphWarning::Degenerate {
                axis,
                resolution: Resolution::EmptyBitmap,
            } => write!(f, "blank glyph, {} collapsed to 0", axis),
        }
    }
}
