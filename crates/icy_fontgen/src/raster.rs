use crate::{FontGenError, FontSource, GlyphId, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellSize {
    pub width: u32,
    pub height: u32,
}

impl CellSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Monochrome bitmap, row major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBitmap {
    width: u32,
    height: u32,
    pixels: Vec<bool>,
}

impl PixelBitmap {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![false; (width * height) as usize],
        }
    }

    pub fn from_rows(rows: &[&str]) -> Self {
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0) as u32;
        let mut bitmap = Self::new(width, rows.len() as u32);
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                bitmap.set(x as u32, y as u32, ch == '#');
            }
        }
        bitmap
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixels outside the bitmap are off.
    pub fn get(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.pixels[(y * self.width + x) as usize]
    }

    pub fn set(&mut self, x: u32, y: u32, on: bool) {
        if x < self.width && y < self.height {
            self.pixels[(y * self.width + x) as usize] = on;
        }
    }

    pub fn count_on(&self) -> usize {
        self.pixels.iter().filter(|p| **p).count()
    }
}

/// Rasterize one glyph into a `cell.width` x `cell.height` bitmap.
///
/// The glyph is rendered at an em size of `cell.height` pixels and shifted up
/// by `y_offset`. Any coverage above zero turns a pixel on. Identifiers that
/// resolve to glyph 0 fail with [`FontGenError::GlyphMissing`].
pub fn rasterize(font: &dyn FontSource, identifier: GlyphId, cell: CellSize, y_offset: i32) -> Result<PixelBitmap> {
    let glyph = match identifier {
        GlyphId::Codepoint(ch) => font.glyph_index(ch),
        GlyphId::Index(gid) => gid,
    };
    if glyph == 0 || glyph >= font.glyph_count() {
        return Err(FontGenError::GlyphMissing { identifier });
    }

    let coverage = font.rasterize_glyph(glyph, cell.height as f32);
    let mut bitmap = PixelBitmap::new(cell.width, cell.height);
    let top = coverage.top - y_offset;

    for gy in 0..coverage.height {
        let y = top + gy as i32;
        if y < 0 || y >= cell.height as i32 {
            continue;
        }
        for gx in 0..coverage.width {
            let x = coverage.left + gx as i32;
            if x < 0 || x >= cell.width as i32 {
                continue;
            }
            if coverage.coverage(gx, gy) > 0 {
                bitmap.set(x as u32, y as u32, true);
            }
        }
    }
    Ok(bitmap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GlyphCoverage, MemoryFont};

    const CELL: CellSize = CellSize::new(8, 16);

    #[test]
    fn solid_glyph_fills_cell() {
        let mut font = MemoryFont::new("test");
        font.add_solid_glyph('A', 8, 16);
        let bitmap = rasterize(&font, GlyphId::Codepoint('A'), CELL, 0).unwrap();
        assert_eq!((bitmap.width(), bitmap.height()), (8, 16));
        assert_eq!(bitmap.count_on(), 8 * 16);
    }

    #[test]
    fn oversized_glyph_is_clipped() {
        let mut font = MemoryFont::new("test");
        font.add_solid_glyph('W', 12, 20);
        let bitmap = rasterize(&font, GlyphId::Codepoint('W'), CELL, 0).unwrap();
        assert_eq!((bitmap.width(), bitmap.height()), (8, 16));
        assert_eq!(bitmap.count_on(), 8 * 16);
    }

    #[test]
    fn placement_and_offset() {
        let mut font = MemoryFont::new("test");
        font.add_glyph(
            '.',
            GlyphCoverage {
                left: 3,
                top: 10,
                width: 2,
                height: 2,
                data: vec![255, 1, 0, 128],
            },
        );
        let bitmap = rasterize(&font, GlyphId::Codepoint('.'), CELL, 0).unwrap();
        assert!(bitmap.get(3, 10));
        assert!(bitmap.get(4, 10));
        assert!(!bitmap.get(3, 11));
        assert!(bitmap.get(4, 11));
        assert_eq!(bitmap.count_on(), 3);

        let shifted = rasterize(&font, GlyphId::Codepoint('.'), CELL, 4).unwrap();
        assert!(shifted.get(3, 6));
        assert!(!shifted.get(3, 10));
    }

    #[test]
    fn negative_bearing_is_clipped() {
        let mut font = MemoryFont::new("test");
        font.add_glyph(
            'j',
            GlyphCoverage {
                left: -1,
                top: -1,
                width: 2,
                height: 2,
                data: vec![255; 4],
            },
        );
        let bitmap = rasterize(&font, GlyphId::Codepoint('j'), CELL, 0).unwrap();
        assert_eq!(bitmap.count_on(), 1);
        assert!(bitmap.get(0, 0));
    }

    #[test]
    fn notdef_is_reported_missing() {
        let font = MemoryFont::new("test");
        let err = rasterize(&font, GlyphId::Codepoint('A'), CELL, 0).unwrap_err();
        assert!(matches!(err, FontGenError::GlyphMissing { identifier: GlyphId::Codepoint('A') }));

        assert!(rasterize(&font, GlyphId::Index(0), CELL, 0).is_err());
        assert!(rasterize(&font, GlyphId::Index(42), CELL, 0).is_err());
    }

    #[test]
    fn rasterize_by_index() {
        let mut font = MemoryFont::new("test");
        let gid = font.push_glyph(crate::pattern_coverage(&["#.", ".#"]));
        let bitmap = rasterize(&font, GlyphId::Index(gid), CELL, 0).unwrap();
        assert!(bitmap.get(0, 0));
        assert!(bitmap.get(1, 1));
        assert_eq!(bitmap.count_on(), 2);
    }
}
