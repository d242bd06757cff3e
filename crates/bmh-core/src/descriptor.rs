//! Font descriptor assembly.
//!
//! A [`FontDescriptor`] is the finished, read-only result of one
//! (font, pixel height) job. Glyph order follows the caller's character list
//! because consumers index the metadata arrays by position.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AssembleError;
use crate::glyph::GlyphRecord;
use crate::pack::Orientation;

/// Nominal glyph width of a font.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NominalWidth {
    /// Every glyph is this wide.
    Fixed(u32),
    /// Glyph widths vary.
    Variable,
}

impl fmt::Display for NominalWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NominalWidth::Fixed(width) => write!(f, "{}", width),
            NominalWidth::Variable => f.write_str("variable"),
        }
    }
}

/// Location of one glyph's bitmap in the concatenation of all bitmaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlyphAddress {
    /// Code point.
    pub codepoint: u32,
    /// Byte offset from the start of the first bitmap.
    pub offset: usize,
    /// Bitmap length in bytes.
    pub len: usize,
}

/// All glyphs of one font at one pixel height.
///
/// Deserializing runs the stored fields back through [`assemble`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DescriptorFields")]
pub struct FontDescriptor {
    font_name: String,
    pixel_height: u32,
    nominal_width: NominalWidth,
    orientation: Orientation,
    character_order: Vec<u32>,
    glyphs: Vec<GlyphRecord>,
    variable_height: bool,
}

#[derive(Deserialize)]
struct DescriptorFields {
    font_name: String,
    pixel_height: u32,
    nominal_width: NominalWidth,
    orientation: Orientation,
    character_order: Vec<u32>,
    glyphs: Vec<GlyphRecord>,
    #[serde(default)]
    variable_height: bool,
}

impl TryFrom<DescriptorFields> for FontDescriptor {
    type Error = AssembleError;

    fn try_from(fields: DescriptorFields) -> Result<Self, Self::Error> {
        let font = assemble(
            fields.font_name,
            fields.pixel_height,
            fields.nominal_width,
            fields.orientation,
            &fields.character_order,
            fields.glyphs,
        )?;
        Ok(font.with_variable_height(fields.variable_height))
    }
}

impl FontDescriptor {
    /// Font name as read from the font file.
    pub fn font_name(&self) -> &str {
        &self.font_name
    }

    /// Line height in pixels.
    pub fn pixel_height(&self) -> u32 {
        self.pixel_height
    }

    /// Fixed width, or the variable marker.
    pub fn nominal_width(&self) -> NominalWidth {
        self.nominal_width
    }

    /// Byte layout of every bitmap.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Code points in output order.
    pub fn character_order(&self) -> &[u32] {
        &self.character_order
    }

    /// Glyph records in output order.
    pub fn glyphs(&self) -> &[GlyphRecord] {
        &self.glyphs
    }

    /// Number of glyphs.
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Whether the font has no glyphs.
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Look up a glyph by code point.
    pub fn glyph(&self, codepoint: u32) -> Option<&GlyphRecord> {
        self.character_order
            .iter()
            .position(|&cp| cp == codepoint)
            .and_then(|index| self.glyphs.get(index))
    }

    /// Effective widths in output order.
    pub fn widths(&self) -> Vec<u32> {
        self.glyphs.iter().map(GlyphRecord::width).collect()
    }

    /// Heights in 8-pixel pages, in output order.
    pub fn height_pages(&self) -> Vec<u32> {
        self.glyphs.iter().map(GlyphRecord::height_pages).collect()
    }

    /// Y offsets in output order.
    pub fn y_offsets(&self) -> Vec<u32> {
        self.glyphs.iter().map(GlyphRecord::y_offset).collect()
    }

    /// Mark the font as packed with trimmed heights.
    pub fn with_variable_height(mut self, variable_height: bool) -> Self {
        self.variable_height = variable_height;
        self
    }

    /// Whether glyphs were trimmed vertically, so consumers need the
    /// per-glyph height and y offset tables.
    pub fn has_variable_height(&self) -> bool {
        self.variable_height
    }

    /// Offset and length of every bitmap, in output order.
    pub fn address_table(&self) -> Vec<GlyphAddress> {
        let mut offset = 0;
        self.glyphs
            .iter()
            .map(|g| {
                let address = GlyphAddress {
                    codepoint: g.codepoint(),
                    offset,
                    len: g.bitmap().len(),
                };
                offset += address.len;
                address
            })
            .collect()
    }

    /// Total bitmap bytes.
    pub fn total_bytes(&self) -> usize {
        self.glyphs.iter().map(|g| g.bitmap().len()).sum()
    }
}

/// Collect glyph records into a descriptor ordered by `ordered_chars`.
///
/// Records whose code point is not in `ordered_chars` are dropped. The
/// result reports fixed heights until [`FontDescriptor::with_variable_height`]
/// says otherwise.
pub fn assemble(
    font_name: impl Into<String>,
    pixel_height: u32,
    nominal_width: NominalWidth,
    orientation: Orientation,
    ordered_chars: &[u32],
    glyph_records: impl IntoIterator<Item = GlyphRecord>,
) -> Result<FontDescriptor, AssembleError> {
    let mut seen = HashSet::with_capacity(ordered_chars.len());
    if let Some(&duplicate) = ordered_chars.iter().find(|&&cp| !seen.insert(cp)) {
        return Err(AssembleError::DuplicateCharacter(duplicate));
    }

    let mut by_codepoint: HashMap<u32, GlyphRecord> = HashMap::new();
    for record in glyph_records {
        let codepoint = record.codepoint();
        if record.orientation() != orientation {
            return Err(AssembleError::OrientationMismatch(codepoint));
        }
        if by_codepoint.insert(codepoint, record).is_some() {
            return Err(AssembleError::DuplicateRecord(codepoint));
        }
    }

    let glyphs = ordered_chars
        .iter()
        .map(|cp| by_codepoint.remove(cp).ok_or(AssembleError::MissingGlyph(*cp)))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(FontDescriptor {
        font_name: font_name.into(),
        pixel_height,
        nominal_width,
        orientation,
        character_order: ordered_chars.to_vec(),
        glyphs,
        variable_height: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph::build;
    use crate::grid::GrayBuffer;
    use crate::policy::{PackingPolicy, Sizing};
    use pretty_assertions::assert_eq;

    fn records(chars: &str) -> Vec<GlyphRecord> {
        let policy = PackingPolicy::variable_width(8);
        chars
            .chars()
            .enumerate()
            .map(|(i, c)| {
                // glyph i is i+1 columns of ink
                let mut grid = GrayBuffer::new_white(8, 8);
                for x in 0..=i as u32 {
                    grid.set(x, 0, 0);
                }
                build(&grid, c as u32, &policy)
            })
            .collect()
    }

    fn codepoints(chars: &str) -> Vec<u32> {
        chars.chars().map(|c| c as u32).collect()
    }

    #[test]
    fn test_assemble_follows_character_order() {
        let font = assemble(
            "Test Sans",
            8,
            NominalWidth::Variable,
            Orientation::RowMajor,
            &codepoints("cab"),
            records("abc"),
        )
        .unwrap();

        assert_eq!(font.character_order(), &codepoints("cab")[..]);
        assert_eq!(font.widths(), vec![3, 1, 2]);
        assert_eq!(font.height_pages(), vec![1, 1, 1]);
        assert_eq!(font.y_offsets(), vec![0, 0, 0]);
        assert_eq!(font.glyph('a' as u32).map(GlyphRecord::width), Some(1));
        assert_eq!(font.len(), 3);
    }

    #[test]
    fn test_missing_glyph() {
        let err = assemble(
            "Test Sans",
            8,
            NominalWidth::Fixed(6),
            Orientation::RowMajor,
            &codepoints("abz"),
            records("ab"),
        )
        .unwrap_err();
        assert_eq!(err, AssembleError::MissingGlyph('z' as u32));
    }

    #[test]
    fn test_duplicate_character() {
        let err = assemble(
            "Test Sans",
            8,
            NominalWidth::Fixed(6),
            Orientation::RowMajor,
            &codepoints("aba"),
            records("ab"),
        )
        .unwrap_err();
        assert_eq!(err, AssembleError::DuplicateCharacter('a' as u32));
    }

    #[test]
    fn test_duplicate_record() {
        let mut glyphs = records("ab");
        glyphs.extend(records("a"));
        let err = assemble(
            "Test Sans",
            8,
            NominalWidth::Fixed(6),
            Orientation::RowMajor,
            &codepoints("ab"),
            glyphs,
        )
        .unwrap_err();
        assert_eq!(err, AssembleError::DuplicateRecord('a' as u32));
    }

    #[test]
    fn test_extra_records_are_dropped() {
        let font = assemble(
            "Test Sans",
            8,
            NominalWidth::Variable,
            Orientation::RowMajor,
            &codepoints("b"),
            records("ab"),
        )
        .unwrap();
        assert_eq!(font.len(), 1);
        assert!(font.glyph('a' as u32).is_none());
    }

    #[test]
    fn test_address_table() {
        let font = assemble(
            "Test Sans",
            8,
            NominalWidth::Variable,
            Orientation::RowMajor,
            &codepoints("abc"),
            records("abc"),
        )
        .unwrap();
        let table = font.address_table();
        assert_eq!(
            table,
            vec![
                GlyphAddress {
                    codepoint: 'a' as u32,
                    offset: 0,
                    len: 1
                },
                GlyphAddress {
                    codepoint: 'b' as u32,
                    offset: 1,
                    len: 2
                },
                GlyphAddress {
                    codepoint: 'c' as u32,
                    offset: 3,
                    len: 3
                },
            ]
        );
        assert_eq!(font.total_bytes(), 6);
        assert!(!font.has_variable_height());
    }

    #[test]
    fn test_empty_font() {
        let font = assemble(
            "Empty",
            8,
            NominalWidth::Fixed(6),
            Orientation::RowMajor,
            &[],
            Vec::new(),
        )
        .unwrap();
        assert!(font.is_empty());
        assert!(font.address_table().is_empty());
    }

    #[test]
    fn test_nominal_width_display() {
        assert_eq!(NominalWidth::Fixed(24).to_string(), "24");
        assert_eq!(NominalWidth::Variable.to_string(), "variable");
    }

    #[test]
    fn test_orientation_mismatch() {
        let err = assemble(
            "Test Sans",
            8,
            NominalWidth::Variable,
            Orientation::ColumnMajor,
            &codepoints("ab"),
            records("ab"),
        )
        .unwrap_err();
        assert_eq!(err, AssembleError::OrientationMismatch('a' as u32));
    }

    #[test]
    fn test_variable_height_follows_flag() {
        // full-height ink, so no glyph is shorter than the line
        let policy = PackingPolicy::variable_width(8).with_height(Sizing::Variable);
        let mut grid = GrayBuffer::new_white(8, 8);
        for y in 0..8 {
            grid.set(2, y, 0);
        }
        let record = build(&grid, 'l' as u32, &policy);
        assert_eq!((record.height(), record.y_offset()), (8, 0));

        let font = assemble(
            "Test Sans",
            8,
            NominalWidth::Variable,
            Orientation::RowMajor,
            &['l' as u32],
            vec![record],
        )
        .unwrap();
        assert!(!font.has_variable_height());
        assert!(font.with_variable_height(true).has_variable_height());
    }

    #[test]
    fn test_json_round_trip() {
        let font = assemble(
            "Test Sans",
            8,
            NominalWidth::Variable,
            Orientation::RowMajor,
            &codepoints("cab"),
            records("abc"),
        )
        .unwrap()
        .with_variable_height(true);
        let json = serde_json::to_string(&font).unwrap();
        let back: FontDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, font);
        assert!(back.has_variable_height());
    }

    #[test]
    fn test_json_with_repeated_character_is_rejected() {
        let json = r#"{
            "font_name": "Broken",
            "pixel_height": 8,
            "nominal_width": "variable",
            "orientation": "row_major",
            "character_order": [65, 65],
            "glyphs": []
        }"#;
        let err = serde_json::from_str::<FontDescriptor>(json).unwrap_err();
        assert!(err.to_string().contains("U+0041 appears more than once"), "{}", err);
    }

    #[test]
    fn test_json_with_missing_glyph_is_rejected() {
        let json = r#"{
            "font_name": "Broken",
            "pixel_height": 8,
            "nominal_width": "variable",
            "orientation": "row_major",
            "character_order": [65],
            "glyphs": []
        }"#;
        assert!(serde_json::from_str::<FontDescriptor>(json).is_err());
    }

    #[test]
    fn test_json_with_malformed_glyph_is_rejected() {
        let font = assemble(
            "Test Sans",
            8,
            NominalWidth::Variable,
            Orientation::RowMajor,
            &codepoints("ab"),
            records("ab"),
        )
        .unwrap();
        let mut value = serde_json::to_value(&font).unwrap();
        value["glyphs"][1]["bitmap"] = serde_json::json!([]);
        assert!(serde_json::from_value::<FontDescriptor>(value).is_err());
    }
}
