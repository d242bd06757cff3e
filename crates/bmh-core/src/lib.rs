//! bmh glyph packing core
//!
//! This crate turns rasterized glyph images into the byte-packed bitmaps
//! used by firmware for monochrome dot-matrix displays (SSD1306 and similar
//! page-addressed controllers). It is pure computation: rasterizing fonts and
//! writing header files live in other crates.
//!
//! # Pipeline
//!
//! - **Trim**: count empty columns/rows from each edge of a glyph
//!   ([`trim_horizontal`], [`trim_vertical`])
//! - **Pack**: turn a region into bytes, 8 pixels per byte, in row-major
//!   pages or rotated rows ([`pack`])
//! - **Build**: apply the sizing policy and space-character rule to produce a
//!   [`GlyphRecord`] ([`build`])
//! - **Assemble**: collect records for an ordered character list into a
//!   [`FontDescriptor`] ([`assemble`])
//!
//! # Example
//!
//! ```
//! use bmh_core::{assemble, build, GrayBuffer, NominalWidth, PackingPolicy};
//!
//! let grid = GrayBuffer::from_ascii(&[
//!     "........",
//!     "...##...",
//!     "..#..#..",
//!     "..####..",
//!     "..#..#..",
//!     "..#..#..",
//!     "........",
//!     "........",
//! ]);
//! let policy = PackingPolicy::variable_width(8);
//! let record = build(&grid, 'A' as u32, &policy);
//! assert_eq!(record.width(), 4);
//!
//! let font = assemble(
//!     "Demo",
//!     8,
//!     NominalWidth::Variable,
//!     policy.orientation,
//!     &['A' as u32],
//!     vec![record],
//! )
//! .unwrap();
//! assert_eq!(font.widths(), vec![4]);
//! ```
//!
//! # Bit order
//!
//! Bit `k` of every byte holds the pixel at offset `7 - k` inside its
//! 8-pixel group. Drivers depend on this exact layout.

pub mod charset;
pub mod descriptor;
pub mod error;
pub mod glyph;
pub mod grid;
pub mod pack;
pub mod policy;
pub mod preview;
pub mod trim;

// Re-export main types for convenience
pub use charset::CharacterSet;
pub use descriptor::{assemble, FontDescriptor, GlyphAddress, NominalWidth};
pub use error::{AssembleError, Axis, GlyphWarning, PolicyError, RecordError, Resolution};
pub use glyph::{build, GlyphRecord, SPACE};
pub use grid::{GrayBuffer, GridView, PixelGrid, Region, DEFAULT_THRESHOLD};
pub use pack::{pack, packed_len, Orientation};
pub use policy::{PackingPolicy, PolicyConfig, Sizing};
pub use preview::{render_ascii, PreviewStrip};
pub use trim::{trim_horizontal, trim_vertical, HorizontalTrim, VerticalTrim};
