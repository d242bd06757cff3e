//! CLI argument definitions for the bmh command-line interface.
//!
//! All `#[derive(Parser)]` and `#[derive(Subcommand)]` types are defined here,
//! keeping `main.rs` focused on dispatch logic.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use bmh_cli::config::{CharsetSource, ConvertOverrides};
use bmh_cli::sizes::parse_fontsize;

/// bmh - TrueType fonts to bitmap headers for monochrome displays
#[derive(Parser)]
#[command(name = "bmh")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Convert fonts into C header files
    Convert(ConvertArgs),

    /// List the TrueType fonts found in a folder
    Fonts {
        /// Folder to scan (default: platform font folder)
        #[arg(short = 'f', long)]
        ttf_folder: Option<PathBuf>,

        /// Output a JSON array instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug, Default)]
pub(crate) struct ConvertArgs {
    /// JSON file with conversion settings; flags override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Folder searched recursively for .ttf files
    #[arg(short = 'f', long)]
    pub ttf_folder: Option<PathBuf>,

    /// Output folder (default: bmh_fonts)
    #[arg(short = 'o', long)]
    pub output_folder: Option<PathBuf>,

    /// Convert only the font with this full name
    #[arg(long)]
    pub font: Option<String>,

    /// Pixel height (8, 16, 24, 32, 40, 48, 56, 64) or "all"
    #[arg(short = 's', long)]
    pub fontsize: Option<String>,

    /// File with the characters to convert
    #[arg(short = 'c', long)]
    pub character_file: Option<PathBuf>,

    /// Characters to convert
    #[arg(short = 'C', long)]
    pub characters: Option<String>,

    /// Convert printable ASCII
    #[arg(long)]
    pub ascii: bool,

    /// Convert space through '@'
    #[arg(long)]
    pub lowerascii: bool,

    /// Glyph box width in pixels (default: 3/4 of the height)
    #[arg(short = 'w', long)]
    pub width: Option<u32>,

    /// Square glyph box
    #[arg(long)]
    pub square: bool,

    /// Font size passed to the rasterizer (default: 110% of the height)
    #[arg(long)]
    pub font_height: Option<u32>,

    /// Render offset in pixels; positive moves glyphs up
    #[arg(short = 'O', long, allow_hyphen_values = true)]
    pub offset: Option<i32>,

    /// Vertical anchor of the render origin
    #[arg(short = 'a', long, value_parser = ["ascender", "top", "middle", "baseline", "bottom", "descender"])]
    pub anchor: Option<String>,

    /// Trim glyphs horizontally
    #[arg(long)]
    pub variable_width: bool,

    /// Trim glyphs vertically
    #[arg(long)]
    pub variable_height: bool,

    /// Pack bytes column-major (rotated displays)
    #[arg(long)]
    pub rotate: bool,

    /// Darkness threshold, 1-255
    #[arg(long)]
    pub threshold: Option<u8>,

    /// Added to every glyph's y offset
    #[arg(short = 'y', long)]
    pub y_offset_base: Option<u32>,

    /// Header declaration dialect
    #[arg(long, value_parser = ["char", "uint8", "symbolic"])]
    pub dialect: Option<String>,

    /// Byte literal format
    #[arg(long, value_parser = ["decimal", "hex", "binary"])]
    pub byte_format: Option<String>,

    /// Place bitmaps in PROGMEM
    #[arg(long)]
    pub progmem: bool,

    /// Binary literals with ASCII-art comments in the header
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Print every glyph as ASCII art
    #[arg(short = 'p', long)]
    pub print_ascii: bool,

    /// Do not write preview PNGs
    #[arg(long)]
    pub no_preview: bool,

    /// Do not write JSON metadata
    #[arg(long)]
    pub no_metadata: bool,
}

impl ConvertArgs {
    /// Charset flags, highest precedence first.
    fn charset(&self) -> Option<CharsetSource> {
        if self.lowerascii {
            Some(CharsetSource::LowerAscii)
        } else if self.ascii {
            Some(CharsetSource::Ascii)
        } else if let Some(path) = &self.character_file {
            Some(CharsetSource::File(path.clone()))
        } else {
            self.characters.clone().map(CharsetSource::Characters)
        }
    }

    /// Convert flags into config overrides.
    pub fn overrides(&self) -> Result<ConvertOverrides> {
        if self.font_height == Some(0) {
            anyhow::bail!("Font height must be at least 1 pixel");
        }

        Ok(ConvertOverrides {
            ttf_folder: self.ttf_folder.clone(),
            output_folder: self.output_folder.clone(),
            font: self.font.clone(),
            fontsizes: self.fontsize.as_deref().map(parse_fontsize).transpose()?,
            charset: self.charset(),
            width: self.width,
            square: self.square,
            font_height: self.font_height,
            offset: self.offset,
            anchor: self.anchor.as_deref().map(str::parse).transpose()?,
            variable_width: self.variable_width,
            variable_height: self.variable_height,
            rotate: self.rotate,
            threshold: self.threshold,
            y_offset_base: self.y_offset_base,
            dialect: self.dialect.as_deref().map(str::parse).transpose()?,
            byte_format: self.byte_format.as_deref().map(str::parse).transpose()?,
            progmem: self.progmem,
            verbose: self.verbose,
            print_ascii: self.print_ascii,
            no_preview: self.no_preview,
            no_metadata: self.no_metadata,
        })
    }
}
