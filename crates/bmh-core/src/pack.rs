//! Bit packing.
//!
//! Converts a rectangle of the pixel grid into the byte layout display
//! drivers read directly. The bit order is part of the wire format:
//! bit `k` of each byte holds the pixel at offset `7 - k` within its
//! 8-pixel group, so bit 0 is the last (bottom or rightmost) pixel.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PolicyError;
use crate::grid::{PixelGrid, Region};

/// How 8-pixel groups are taken from the glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// 8-pixel-tall pages, one byte per column (SSD1306 page addressing).
    #[default]
    RowMajor,
    /// Rotated: one row at a time, one byte per 8 horizontal pixels.
    ColumnMajor,
}

impl Orientation {
    /// Stable name used in configuration files and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::RowMajor => "row_major",
            Orientation::ColumnMajor => "column_major",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Orientation {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "row_major" | "row-major" | "normal" => Ok(Self::RowMajor),
            "column_major" | "column-major" | "rotated" => Ok(Self::ColumnMajor),
            other => Err(PolicyError::UnknownOrientation(other.to_string())),
        }
    }
}

/// Number of bytes `pack` produces for a `width` x `height` region.
pub fn packed_len(width: u32, height: u32, orientation: Orientation) -> usize {
    match orientation {
        Orientation::RowMajor => height.div_ceil(8) as usize * width as usize,
        Orientation::ColumnMajor => height as usize * width.div_ceil(8) as usize,
    }
}

/// Pack `region` of `grid` into bytes.
///
/// Pixels past the grid edge, including the tail of a band that overruns a
/// height (width) that is not a multiple of 8, read as not dark.
pub fn pack<G: PixelGrid + ?Sized>(
    grid: &G,
    region: Region,
    orientation: Orientation,
    threshold: u8,
) -> Vec<u8> {
    let mut out = Vec::with_capacity(packed_len(region.width, region.height, orientation));
    let dark = |x: u32, y: u32| {
        region
            .to_grid(x, y)
            .is_some_and(|(gx, gy)| grid.is_dark(gx, gy, threshold))
    };

    match orientation {
        Orientation::RowMajor => {
            for band in 0..region.height.div_ceil(8) {
                for x in 0..region.width {
                    let mut byte = 0u8;
                    for k in 0..8u32 {
                        let y = band * 8 + (7 - k);
                        if y < region.height && dark(x, y) {
                            byte |= 1 << k;
                        }
                    }
                    out.push(byte);
                }
            }
        }
        Orientation::ColumnMajor => {
            for y in 0..region.height {
                for band in 0..region.width.div_ceil(8) {
                    let mut byte = 0u8;
                    for k in 0..8u32 {
                        let x = band * 8 + (7 - k);
                        if x < region.width && dark(x, y) {
                            byte |= 1 << k;
                        }
                    }
                    out.push(byte);
                }
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{GrayBuffer, DEFAULT_THRESHOLD};

    fn single_pixel(width: u32, height: u32, x: u32, y: u32) -> GrayBuffer {
        let mut grid = GrayBuffer::new_white(width, height);
        grid.set(x, y, 0);
        grid
    }

    #[test]
    fn test_row_major_single_pixel_8x8() {
        let grid = single_pixel(8, 8, 2, 5);
        let bytes = pack(&grid, Region::full(&grid), Orientation::RowMajor, DEFAULT_THRESHOLD);
        assert_eq!(bytes, vec![0, 0, 4, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_row_major_bit_order() {
        // Top pixel is bit 7, bottom pixel is bit 0.
        let top = single_pixel(1, 8, 0, 0);
        let bottom = single_pixel(1, 8, 0, 7);
        let full = Region::new(0, 0, 1, 8);
        assert_eq!(pack(&top, full, Orientation::RowMajor, DEFAULT_THRESHOLD), vec![0x80]);
        assert_eq!(pack(&bottom, full, Orientation::RowMajor, DEFAULT_THRESHOLD), vec![0x01]);
    }

    #[test]
    fn test_row_major_bands_are_column_by_column() {
        // 2 columns, 16 rows: band 0 then band 1.
        let mut grid = GrayBuffer::new_white(2, 16);
        grid.set(1, 0, 0);
        grid.set(0, 15, 0);
        let bytes = pack(&grid, Region::full(&grid), Orientation::RowMajor, DEFAULT_THRESHOLD);
        assert_eq!(bytes, vec![0x00, 0x80, 0x01, 0x00]);
    }

    #[test]
    fn test_column_major_single_pixel() {
        let grid = single_pixel(8, 2, 5, 1);
        let bytes = pack(&grid, Region::full(&grid), Orientation::ColumnMajor, DEFAULT_THRESHOLD);
        assert_eq!(bytes, vec![0, 4]);
    }

    #[test]
    fn test_column_major_multiple_bands() {
        // 10 wide: two bytes per row, second band has only 2 real columns.
        let grid = GrayBuffer::from_ascii(&["#........#"]);
        let bytes = pack(&grid, Region::full(&grid), Orientation::ColumnMajor, DEFAULT_THRESHOLD);
        // column 9 is band 1 offset 1 -> bit 6
        assert_eq!(bytes, vec![0x80, 0x40]);
    }

    #[test]
    fn test_partial_band_reads_as_blank() {
        // Height 5 inside a fully dark grid of height 5: bits for rows 5..8 stay clear.
        let grid = GrayBuffer::new(1, 5, 0);
        let bytes = pack(&grid, Region::full(&grid), Orientation::RowMajor, DEFAULT_THRESHOLD);
        assert_eq!(bytes, vec![0b1111_1000]);
    }

    #[test]
    fn test_region_past_grid_edge_is_blank() {
        let grid = GrayBuffer::new(2, 2, 0);
        let bytes = pack(&grid, Region::new(1, 0, 3, 8), Orientation::RowMajor, DEFAULT_THRESHOLD);
        assert_eq!(bytes, vec![0b1100_0000, 0, 0]);
    }

    #[test]
    fn test_region_offset() {
        let grid = single_pixel(6, 10, 4, 9);
        let bytes = pack(&grid, Region::new(3, 2, 2, 8), Orientation::RowMajor, DEFAULT_THRESHOLD);
        // pixel lands on local (1, 7): bit 0 of column 1
        assert_eq!(bytes, vec![0, 1]);
    }

    #[test]
    fn test_packed_len_matches_output() {
        let grid = GrayBuffer::new(13, 11, 0);
        for width in 0..14 {
            for height in 0..12 {
                let region = Region::new(0, 0, width, height);
                for orientation in [Orientation::RowMajor, Orientation::ColumnMajor] {
                    let bytes = pack(&grid, region, orientation, DEFAULT_THRESHOLD);
                    assert_eq!(
                        bytes.len(),
                        packed_len(width, height, orientation),
                        "{}x{} {}",
                        width,
                        height,
                        orientation
                    );
                }
            }
        }
    }

    #[test]
    fn test_single_pixel_round_trip() {
        let (width, height) = (5, 19);
        for y in 0..height {
            for x in 0..width {
                let grid = single_pixel(width, height, x, y);
                let bytes =
                    pack(&grid, Region::full(&grid), Orientation::RowMajor, DEFAULT_THRESHOLD);
                let index = ((y / 8) * width + x) as usize;
                let bit = 7 - (y % 8);
                assert_eq!(bytes[index], 1 << bit);
                let set_bits: u32 = bytes.iter().map(|b| b.count_ones()).sum();
                assert_eq!(set_bits, 1);
            }
        }
    }

    #[test]
    fn test_orientation_parse() {
        assert_eq!("rotated".parse::<Orientation>().unwrap(), Orientation::ColumnMajor);
        assert_eq!("row-major".parse::<Orientation>().unwrap(), Orientation::RowMajor);
        assert!(matches!(
            "diagonal".parse::<Orientation>(),
            Err(PolicyError::UnknownOrientation(_))
        ));
    }
}
