//! Deterministic PNG writer for preview strips.
//!
//! Uses fixed compression settings so the same font job always produces
//! byte-identical preview images.

use std::io::Write;
use std::path::Path;

use bmh_core::GrayBuffer;
use png::{BitDepth, ColorType, Compression, Encoder, FilterType};
use thiserror::Error;

/// Errors from PNG operations.
#[derive(Debug, Error)]
pub enum PngError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PNG encoding error: {0}")]
    Encoding(#[from] png::EncodingError),

    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),
}

/// PNG export configuration for deterministic output.
#[derive(Debug, Clone)]
pub struct PngConfig {
    /// Compression level. Use a fixed value for determinism.
    pub compression: Compression,
    /// Filter type. Use a fixed value for determinism.
    pub filter: FilterType,
}

impl Default for PngConfig {
    fn default() -> Self {
        Self {
            compression: Compression::Default,
            filter: FilterType::NoFilter,
        }
    }
}

/// Write a grayscale buffer to any writer.
pub fn write_grayscale_to_writer<W: Write>(
    buffer: &GrayBuffer,
    writer: W,
    config: &PngConfig,
) -> Result<(), PngError> {
    if buffer.height == 0 {
        return Err(PngError::InvalidDimensions(format!(
            "Preview height must be at least 1, got {}x{}",
            buffer.width, buffer.height
        )));
    }
    // PNG has no zero-width images; a strip of blank glyphs becomes 1px wide.
    let padded;
    let buffer = if buffer.width == 0 {
        padded = GrayBuffer::new_white(1, buffer.height);
        &padded
    } else {
        buffer
    };

    let mut encoder = Encoder::new(writer, buffer.width, buffer.height);
    encoder.set_color(ColorType::Grayscale);
    encoder.set_depth(BitDepth::Eight);
    encoder.set_compression(config.compression);
    encoder.set_filter(config.filter);

    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(&buffer.data)?;

    Ok(())
}

/// Compute the BLAKE3 hash of PNG data.
pub fn hash_png(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}

/// Write to a Vec<u8> and return the hash.
pub fn write_grayscale_to_vec_with_hash(
    buffer: &GrayBuffer,
    config: &PngConfig,
) -> Result<(Vec<u8>, String), PngError> {
    let mut data = Vec::new();
    write_grayscale_to_writer(buffer, &mut data, config)?;
    let hash = hash_png(&data);
    Ok((data, hash))
}

/// Write a grayscale buffer to a PNG file and return the hash of the file.
pub fn write_grayscale_with_hash(
    buffer: &GrayBuffer,
    path: &Path,
    config: &PngConfig,
) -> Result<String, PngError> {
    let (data, hash) = write_grayscale_to_vec_with_hash(buffer, config)?;
    std::fs::write(path, data)?;
    Ok(hash)
}
