//! C header writer.
//!
//! Emits one array per glyph plus the width table and the address table,
//! in one of three declaration dialects. Tables follow the descriptor's
//! character order, which is the order firmware indexes them by.

use std::fmt::{self, Write as _};
use std::path::Path;
use std::str::FromStr;

use bmh_core::{FontDescriptor, GlyphRecord, Orientation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from header generation.
#[derive(Debug, Error)]
pub enum HeaderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown header dialect '{0}'. Expected char, uint8 or symbolic")]
    UnknownDialect(String),

    #[error("Unknown byte format '{0}'. Expected decimal, hex or binary")]
    UnknownByteFormat(String),
}

/// Declaration style of the generated arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderDialect {
    /// `const char bitmap_65[]`, `char_addr[]`; PROGMEM optional.
    #[default]
    Char,
    /// `static const uint8_t bitmap_65[] PROGMEM`, `char_addr[]`.
    Uint8,
    /// `static const uint8_t bitmap_A[] PROGMEM`, `bitmap_addr[]`.
    Symbolic,
}

impl FromStr for HeaderDialect {
    type Err = HeaderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "char" => Ok(Self::Char),
            "uint8" | "uint8_t" => Ok(Self::Uint8),
            "symbolic" => Ok(Self::Symbolic),
            other => Err(HeaderError::UnknownDialect(other.to_string())),
        }
    }
}

/// How byte values are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ByteFormat {
    /// `12`
    #[default]
    Decimal,
    /// `0x0C`
    Hex,
    /// `0b00001100`, one line per page
    Binary,
}

impl ByteFormat {
    fn write(&self, out: &mut String, byte: u8) {
        // Writing into a String cannot fail.
        let _ = match self {
            ByteFormat::Decimal => write!(out, "{}", byte),
            ByteFormat::Hex => write!(out, "0x{:02X}", byte),
            ByteFormat::Binary => write!(out, "{:#010b}", byte),
        };
    }
}

impl FromStr for ByteFormat {
    type Err = HeaderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "decimal" | "dec" => Ok(Self::Decimal),
            "hex" => Ok(Self::Hex),
            "binary" | "bin" => Ok(Self::Binary),
            other => Err(HeaderError::UnknownByteFormat(other.to_string())),
        }
    }
}

/// Header generation options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderOptions {
    /// Declaration dialect.
    #[serde(default)]
    pub dialect: HeaderDialect,
    /// Byte literal format.
    #[serde(default)]
    pub byte_format: ByteFormat,
    /// Add `PROGMEM` in the `char` dialect (always on for the others).
    #[serde(default)]
    pub progmem: bool,
    /// Add an ASCII-art comment above every bitmap.
    #[serde(default)]
    pub ascii_art: bool,
}

impl Default for HeaderOptions {
    fn default() -> Self {
        Self {
            dialect: HeaderDialect::Char,
            byte_format: ByteFormat::Decimal,
            progmem: false,
            ascii_art: false,
        }
    }
}

impl HeaderOptions {
    /// Verbose output: binary literals and ASCII-art comments.
    pub fn verbose(mut self) -> Self {
        self.byte_format = ByteFormat::Binary;
        self.ascii_art = true;
        self
    }

    fn array_type(&self) -> &'static str {
        match self.dialect {
            HeaderDialect::Char => "const char",
            HeaderDialect::Uint8 | HeaderDialect::Symbolic => "static const uint8_t",
        }
    }

    fn address_decl(&self) -> &'static str {
        match self.dialect {
            HeaderDialect::Char => "const char* char_addr[]",
            HeaderDialect::Uint8 => "static const char* char_addr[]",
            HeaderDialect::Symbolic => "static const char* bitmap_addr[]",
        }
    }

    fn progmem(&self) -> bool {
        self.progmem || self.dialect != HeaderDialect::Char
    }
}

/// C identifier suffix for a glyph's bitmap array.
pub fn bitmap_name(codepoint: u32, dialect: HeaderDialect) -> String {
    match dialect {
        HeaderDialect::Char | HeaderDialect::Uint8 => format!("bitmap_{}", codepoint),
        HeaderDialect::Symbolic => format!("bitmap_{}", symbol_name(codepoint)),
    }
}

fn symbol_name(codepoint: u32) -> String {
    let Some(c) = char::from_u32(codepoint) else {
        return format!("u{:04x}", codepoint);
    };
    if c.is_ascii_alphanumeric() {
        return c.to_string();
    }
    let name = match c {
        ' ' => "space",
        '!' => "exclam",
        '"' => "quote",
        '#' => "hash",
        '$' => "dollar",
        '%' => "percent",
        '&' => "ampersand",
        '\'' => "apostrophe",
        '(' => "lparen",
        ')' => "rparen",
        '*' => "asterisk",
        '+' => "plus",
        ',' => "comma",
        '-' => "minus",
        '.' => "period",
        '/' => "slash",
        ':' => "colon",
        ';' => "semicolon",
        '<' => "less",
        '=' => "equal",
        '>' => "greater",
        '?' => "question",
        '@' => "at",
        '[' => "lbracket",
        '\\' => "backslash",
        ']' => "rbracket",
        '^' => "caret",
        '_' => "underscore",
        '`' => "grave",
        '{' => "lbrace",
        '|' => "bar",
        '}' => "rbrace",
        '~' => "tilde",
        _ => return format!("u{:04x}", codepoint),
    };
    name.to_string()
}

/// Trailing comment naming a printable ASCII character.
fn char_comment(codepoint: u32) -> Option<String> {
    if !(32..128).contains(&codepoint) {
        return None;
    }
    let c = char::from_u32(codepoint)?;
    // A trailing backslash would splice the next line into the comment.
    if c == '\\' {
        return Some(" // char backslash".to_string());
    }
    Some(format!(" // char {}", c))
}

/// Bytes per line break in binary output: one page (row-major) or one
/// pixel row (column-major).
fn group_len(glyph: &GlyphRecord) -> usize {
    match glyph.orientation() {
        Orientation::RowMajor => glyph.width() as usize,
        Orientation::ColumnMajor => glyph.width().div_ceil(8) as usize,
    }
}

fn write_bytes(out: &mut String, glyph: &GlyphRecord, format: ByteFormat) {
    let group = group_len(glyph).max(1);
    for (i, &byte) in glyph.bitmap().iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        if format == ByteFormat::Binary && i % group == 0 {
            out.push('\n');
        }
        format.write(out, byte);
    }
}

fn write_ascii_art(out: &mut String, glyph: &GlyphRecord) {
    for y in 0..glyph.height() {
        out.push_str("// ");
        for x in 0..glyph.width() {
            out.push(if glyph.is_set(x, y) { '#' } else { '.' });
        }
        out.push('\n');
    }
}

fn join<T: fmt::Display>(values: &[T]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Render the complete header file.
pub fn render_header(font: &FontDescriptor, options: &HeaderOptions) -> String {
    let mut out = String::new();

    out.push_str("// Header File for SSD1306 characters\n");
    out.push_str("// Generated with bmh\n");
    out.push_str(&format!("// Font {}\n", font.font_name()));
    out.push_str(&format!(
        "// Font Size: {} * {}\n",
        font.pixel_height(),
        font.nominal_width()
    ));
    if font.orientation() == Orientation::ColumnMajor {
        out.push_str("// Orientation: column_major\n");
    }

    let progmem = if options.progmem() { " PROGMEM" } else { "" };
    for glyph in font.glyphs() {
        if options.ascii_art {
            write_ascii_art(&mut out, glyph);
        }
        out.push_str(&format!(
            "{} {}[]{} = {{",
            options.array_type(),
            bitmap_name(glyph.codepoint(), options.dialect),
            progmem
        ));
        write_bytes(&mut out, glyph, options.byte_format);
        out.push_str("};");
        if let Some(comment) = char_comment(glyph.codepoint()) {
            out.push_str(&comment);
        }
        out.push('\n');
    }

    let table = options.array_type();
    out.push_str(&format!("{} char_width[] = {{{}}};\n", table, join(&font.widths())));
    if font.has_variable_height() {
        out.push_str(&format!(
            "{} char_height[] = {{{}}};\n",
            table,
            join(&font.height_pages())
        ));
        out.push_str(&format!(
            "{} char_yoffset[] = {{{}}};\n",
            table,
            join(&font.y_offsets())
        ));
    }

    let addresses: Vec<String> = font
        .character_order()
        .iter()
        .map(|&cp| format!("&{}", bitmap_name(cp, options.dialect)))
        .collect();
    out.push_str(&format!(
        "{} = {{{}}};\n",
        options.address_decl(),
        addresses.join(",")
    ));

    out
}

/// Render and write the header, returning the BLAKE3 hash of its bytes.
pub fn write_header(
    font: &FontDescriptor,
    path: &Path,
    options: &HeaderOptions,
) -> Result<String, HeaderError> {
    let text = render_header(font, options);
    std::fs::write(path, text.as_bytes())?;
    Ok(blake3::hash(text.as_bytes()).to_hex().to_string())
}
