//! Conversion settings, loaded from JSON and overridden by flags.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use bmh_core::{CharacterSet, PolicyConfig};
use bmh_export::HeaderOptions;
use serde::{Deserialize, Serialize};

use crate::raster::Anchor;
use crate::sizes::{self, SizeOptions, DEFAULT_HEIGHT};

/// Where the characters to convert come from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharsetSource {
    /// `0123456789:`
    #[default]
    Digits,
    /// Printable ASCII.
    Ascii,
    /// Space through `@`.
    LowerAscii,
    /// One file, line breaks ignored.
    File(PathBuf),
    /// Literal characters.
    Characters(String),
}

impl CharsetSource {
    /// Load the character set. Duplicates keep their first position.
    pub fn load(&self) -> Result<CharacterSet> {
        Ok(match self {
            CharsetSource::Digits => CharacterSet::digits(),
            CharsetSource::Ascii => CharacterSet::ascii(),
            CharsetSource::LowerAscii => CharacterSet::lower_ascii(),
            CharsetSource::File(path) => {
                let contents = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read character file: {}", path.display()))?;
                CharacterSet::from_file_contents(&contents)
            }
            CharsetSource::Characters(chars) => CharacterSet::from(chars.as_str()),
        })
    }
}

fn default_output_folder() -> PathBuf {
    PathBuf::from("bmh_fonts")
}

fn default_fontsizes() -> Vec<u32> {
    vec![DEFAULT_HEIGHT]
}

fn default_true() -> bool {
    true
}

/// Everything a `convert` run needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConvertConfig {
    /// Folder searched for `.ttf` files; platform default when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttf_folder: Option<PathBuf>,

    /// Output root.
    #[serde(default = "default_output_folder")]
    pub output_folder: PathBuf,

    /// Convert only the font with this full name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,

    /// Pixel heights to generate.
    #[serde(default = "default_fontsizes")]
    pub fontsizes: Vec<u32>,

    /// Character source.
    #[serde(default)]
    pub charset: CharsetSource,

    /// Fixed box width.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    /// Square box when no width is given.
    #[serde(default)]
    pub square: bool,

    /// Rasterizer font size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_height: Option<u32>,

    /// Render offset replacing the table value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<i32>,

    /// Vertical anchor.
    #[serde(default)]
    pub anchor: Anchor,

    /// Packing options.
    #[serde(default)]
    pub policy: PolicyConfig,

    /// Header options.
    #[serde(default)]
    pub header: HeaderOptions,

    /// Print every glyph as ASCII art.
    #[serde(default)]
    pub print_ascii: bool,

    /// Write the PNG preview strip.
    #[serde(default = "default_true")]
    pub preview: bool,

    /// Write the JSON metadata sidecar.
    #[serde(default = "default_true")]
    pub metadata: bool,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            ttf_folder: None,
            output_folder: default_output_folder(),
            font: None,
            fontsizes: default_fontsizes(),
            charset: CharsetSource::default(),
            width: None,
            square: false,
            font_height: None,
            offset: None,
            anchor: Anchor::default(),
            policy: PolicyConfig::default(),
            header: HeaderOptions::default(),
            print_ascii: false,
            preview: true,
            metadata: true,
        }
    }
}

impl ConvertConfig {
    /// Load from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject sizes outside the table and packing options that cannot resolve.
    pub fn validate(&self) -> Result<()> {
        for &height in &self.fontsizes {
            sizes::check_height(height)?;
        }
        if self.font_height == Some(0) {
            bail!("Font height must be at least 1 pixel");
        }
        self.policy.resolve(1, 1)?;
        Ok(())
    }

    /// Font folder to scan.
    pub fn font_folder(&self) -> PathBuf {
        self.ttf_folder.clone().unwrap_or_else(crate::fonts::default_font_folder)
    }

    /// Box options for [`sizes::JobSize`].
    pub fn size_options(&self) -> SizeOptions {
        SizeOptions {
            width: self.width,
            square: self.square,
            font_height: self.font_height,
            offset: self.offset,
        }
    }

    /// Apply command-line overrides.
    pub fn apply(&mut self, overrides: ConvertOverrides) {
        if let Some(folder) = overrides.ttf_folder {
            self.ttf_folder = Some(folder);
        }
        if let Some(folder) = overrides.output_folder {
            self.output_folder = folder;
        }
        if let Some(font) = overrides.font {
            self.font = Some(font);
        }
        if let Some(fontsizes) = overrides.fontsizes {
            self.fontsizes = fontsizes;
        }
        if let Some(charset) = overrides.charset {
            self.charset = charset;
        }
        if let Some(width) = overrides.width {
            self.width = Some(width);
        }
        self.square |= overrides.square;
        if let Some(font_height) = overrides.font_height {
            self.font_height = Some(font_height);
        }
        if let Some(offset) = overrides.offset {
            self.offset = Some(offset);
        }
        if let Some(anchor) = overrides.anchor {
            self.anchor = anchor;
        }

        self.policy.variable_width |= overrides.variable_width;
        self.policy.variable_height |= overrides.variable_height;
        if overrides.rotate {
            self.policy.orientation = Some("column_major".to_string());
        }
        if let Some(threshold) = overrides.threshold {
            self.policy.threshold = Some(threshold);
        }
        if let Some(base) = overrides.y_offset_base {
            self.policy.y_offset_base = base;
        }

        if let Some(dialect) = overrides.dialect {
            self.header.dialect = dialect;
        }
        if let Some(byte_format) = overrides.byte_format {
            self.header.byte_format = byte_format;
        }
        self.header.progmem |= overrides.progmem;
        if overrides.verbose {
            self.header = self.header.clone().verbose();
        }

        self.print_ascii |= overrides.print_ascii;
        if overrides.no_preview {
            self.preview = false;
        }
        if overrides.no_metadata {
            self.metadata = false;
        }
    }
}

/// Values given on the command line. Unset fields keep the config value.
#[derive(Debug, Clone, Default)]
pub struct ConvertOverrides {
    pub ttf_folder: Option<PathBuf>,
    pub output_folder: Option<PathBuf>,
    pub font: Option<String>,
    pub fontsizes: Option<Vec<u32>>,
    pub charset: Option<CharsetSource>,
    pub width: Option<u32>,
    pub square: bool,
    pub font_height: Option<u32>,
    pub offset: Option<i32>,
    pub anchor: Option<Anchor>,
    pub variable_width: bool,
    pub variable_height: bool,
    pub rotate: bool,
    pub threshold: Option<u8>,
    pub y_offset_base: Option<u32>,
    pub dialect: Option<bmh_export::HeaderDialect>,
    pub byte_format: Option<bmh_export::ByteFormat>,
    pub progmem: bool,
    pub verbose: bool,
    pub print_ascii: bool,
    pub no_preview: bool,
    pub no_metadata: bool,
}
