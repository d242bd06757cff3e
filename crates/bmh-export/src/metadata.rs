//! JSON metadata sidecar.
//!
//! A flat, tool-friendly summary of a font descriptor: per-glyph metrics
//! together with the byte offset of every bitmap in the concatenated data.

use std::path::Path;

use bmh_core::{FontDescriptor, NominalWidth, Orientation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from metadata output.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Metrics for one glyph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlyphMetadata {
    /// Unicode code point.
    pub codepoint: u32,
    /// Character as a string, empty for invalid code points.
    pub character: String,
    /// Advance width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Height in 8-pixel pages.
    pub height_pages: u32,
    /// Y offset in pixels.
    pub y_offset: u32,
    /// Byte offset into the concatenated bitmaps.
    pub offset: usize,
    /// Bitmap length in bytes.
    pub len: usize,
}

/// Metadata for one font job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontMetadata {
    /// Font name.
    pub font_name: String,
    /// Line height in pixels.
    pub pixel_height: u32,
    /// Fixed width or variable.
    pub nominal_width: NominalWidth,
    /// Byte layout.
    pub orientation: Orientation,
    /// Total bitmap bytes.
    pub total_bytes: usize,
    /// BLAKE3 hash of the header file, when one was written.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_hash: Option<String>,
    /// Glyphs in output order.
    pub glyphs: Vec<GlyphMetadata>,
}

impl FontMetadata {
    /// Summarize a descriptor.
    pub fn from_descriptor(font: &FontDescriptor) -> Self {
        let glyphs = font
            .glyphs()
            .iter()
            .zip(font.address_table())
            .map(|(glyph, address)| GlyphMetadata {
                codepoint: glyph.codepoint(),
                character: glyph.character().map(String::from).unwrap_or_default(),
                width: glyph.width(),
                height: glyph.height(),
                height_pages: glyph.height_pages(),
                y_offset: glyph.y_offset(),
                offset: address.offset,
                len: address.len,
            })
            .collect();

        Self {
            font_name: font.font_name().to_string(),
            pixel_height: font.pixel_height(),
            nominal_width: font.nominal_width(),
            orientation: font.orientation(),
            total_bytes: font.total_bytes(),
            header_hash: None,
            glyphs,
        }
    }

    /// Record the hash of the header this metadata describes.
    pub fn with_header_hash(mut self, hash: impl Into<String>) -> Self {
        self.header_hash = Some(hash.into());
        self
    }
}

/// Write metadata as pretty JSON.
pub fn write_metadata(metadata: &FontMetadata, path: &Path) -> Result<(), MetadataError> {
    let json = serde_json::to_string_pretty(metadata)?;
    std::fs::write(path, json)?;
    Ok(())
}
