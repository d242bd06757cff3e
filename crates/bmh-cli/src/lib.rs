//! bmh command-line support
//!
//! Font discovery, rasterization and the `convert`/`fonts` commands behind
//! the `bmh` binary.

pub mod commands;
pub mod config;
pub mod fonts;
pub mod raster;
pub mod sizes;

pub use config::{CharsetSource, ConvertConfig, ConvertOverrides};
pub use fonts::{FontFile, FontScan};
pub use raster::{Anchor, GlyphRasterizer};
pub use sizes::{JobSize, SizeOptions, FONT_HEIGHTS, FONT_Y_OFFSETS};
