//! bmh output writers
//!
//! Serializes [`bmh_core::FontDescriptor`] values into the artifacts firmware
//! projects consume:
//!
//! - **C header**: one array per glyph plus width, height, y-offset and
//!   address tables, in the `char`, `uint8` or `symbolic` dialect
//! - **Metadata**: JSON sidecar with per-glyph metrics and bitmap offsets
//! - **Preview**: deterministic grayscale PNG strip of all glyphs
//! - **Log**: plain-text list of every header written in a run
//!
//! Every writer that produces a file reports the BLAKE3 hash of what it
//! wrote, so repeated runs can be compared byte for byte.

pub mod header;
pub mod log;
pub mod metadata;
pub mod png;

use std::path::{Path, PathBuf};

pub use header::{render_header, write_header, ByteFormat, HeaderDialect, HeaderError, HeaderOptions};
pub use log::{GenerationLog, LogEntry, LOG_FILE_NAME};
pub use metadata::{write_metadata, FontMetadata, GlyphMetadata, MetadataError};
pub use png::{PngConfig, PngError};

/// File locations for one (font, pixel height) job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    /// Per-font directory.
    pub dir: PathBuf,
    /// `<Font>_<height>.h`
    pub header: PathBuf,
    /// `<Font>_<height>.png`
    pub preview: PathBuf,
    /// `<Font>_<height>.json`
    pub metadata: PathBuf,
}

impl OutputPaths {
    /// Paths under `output_folder/<font_name>/`.
    pub fn new(output_folder: &Path, font_name: &str, pixel_height: u32) -> Self {
        let folder_name = sanitize_file_name(font_name);
        let dir = output_folder.join(&folder_name);
        let stem = format!("{}_{}", folder_name, pixel_height);
        Self {
            header: dir.join(format!("{}.h", stem)),
            preview: dir.join(format!("{}.png", stem)),
            metadata: dir.join(format!("{}.json", stem)),
            dir,
        }
    }

    /// File name of the header, for logging.
    pub fn header_file_name(&self) -> String {
        self.header
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Replace characters that are not safe in file names.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0' => '_',
            c => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_paths() {
        let paths = OutputPaths::new(Path::new("bmh_fonts"), "DejaVu Sans", 16);
        assert_eq!(paths.dir, Path::new("bmh_fonts/DejaVu Sans"));
        assert_eq!(paths.header, Path::new("bmh_fonts/DejaVu Sans/DejaVu Sans_16.h"));
        assert_eq!(paths.preview, Path::new("bmh_fonts/DejaVu Sans/DejaVu Sans_16.png"));
        assert_eq!(paths.header_file_name(), "DejaVu Sans_16.h");
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("A/B: C"), "A_B_ C");
    }
}
