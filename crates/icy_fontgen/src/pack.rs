use std::fmt::Display;

use crate::PixelBitmap;

/// One byte per scanline, bit 7 is the leftmost pixel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PackedGlyph {
    pub rows: Vec<u8>,
}

impl PackedGlyph {
    pub fn empty(cell_height: u32) -> Self {
        Self {
            rows: vec![0; cell_height as usize],
        }
    }

    pub fn is_set(&self, x: u32, y: u32) -> bool {
        x < 8 && self.rows.get(y as usize).is_some_and(|b| b & (0x80 >> x) != 0)
    }
}

impl Display for PackedGlyph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut s = String::new();
        for (y, b) in self.rows.iter().enumerate() {
            s.push_str(&format!("{y:2} "));
            for i in 0..8 {
                if *b & (128 >> i) == 0 {
                    s.push('-');
                } else {
                    s.push('#');
                }
            }
            s.push_str(&format!("  {b:08b}  0x{b:02X}\n"));
        }
        write!(f, "{s}---")
    }
}

/// Pack `bitmap` into `cell_height` bytes.
///
/// Rows past the bitmap are zero, rows past `cell_height` are dropped. Only
/// the first 8 columns fit into a byte.
pub fn pack(bitmap: &PixelBitmap, cell_height: u32) -> PackedGlyph {
    let columns = bitmap.width().min(8);
    let rows = (0..cell_height)
        .map(|y| (0..columns).filter(|&x| bitmap.get(x, y)).fold(0u8, |row, x| row | (0x80 >> x)))
        .collect();
    PackedGlyph { rows }
}
