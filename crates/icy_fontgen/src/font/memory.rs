use std::collections::BTreeMap;

use super::{FontSource, GlyphCoverage};
use crate::{FontGenError, Result};

/// In-memory font built from explicit coverage bitmaps.
///
/// Glyph 0 is a solid `.notdef` box so a rendered placeholder is easy to spot.
/// The requested pixel size is ignored, glyphs are returned as stored.
#[derive(Debug, Clone)]
pub struct MemoryFont {
    name: String,
    glyphs: Vec<GlyphCoverage>,
    cmap: BTreeMap<char, u16>,
    unicode_cmap: bool,
}

impl MemoryFont {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            glyphs: vec![solid_coverage(8, 16)],
            cmap: BTreeMap::new(),
            unicode_cmap: true,
        }
    }

    /// Add a glyph without mapping it to a codepoint.
    pub fn push_glyph(&mut self, coverage: GlyphCoverage) -> u16 {
        self.glyphs.push(coverage);
        (self.glyphs.len() - 1) as u16
    }

    /// Add a glyph and map `ch` to it.
    pub fn add_glyph(&mut self, ch: char, coverage: GlyphCoverage) -> u16 {
        let gid = self.push_glyph(coverage);
        self.cmap.insert(ch, gid);
        gid
    }

    /// Add a glyph covering the whole `width` x `height` area at the cell origin.
    pub fn add_solid_glyph(&mut self, ch: char, width: usize, height: usize) -> u16 {
        self.add_glyph(ch, solid_coverage(width, height))
    }

    /// Add a glyph from `#`/`.` rows, placed at the cell origin.
    pub fn add_pattern_glyph(&mut self, ch: char, rows: &[&str]) -> u16 {
        self.add_glyph(ch, pattern_coverage(rows))
    }

    /// Drop the Unicode character map, like a symbol-only font.
    pub fn without_unicode_cmap(mut self) -> Self {
        self.unicode_cmap = false;
        self.cmap.clear();
        self
    }
}

pub fn solid_coverage(width: usize, height: usize) -> GlyphCoverage {
    GlyphCoverage {
        left: 0,
        top: 0,
        width,
        height,
        data: vec![255; width * height],
    }
}

pub fn pattern_coverage(rows: &[&str]) -> GlyphCoverage {
    let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
    let mut data = vec![0; width * rows.len()];
    for (y, row) in rows.iter().enumerate() {
        for (x, ch) in row.chars().enumerate() {
            if ch == '#' {
                data[y * width + x] = 255;
            }
        }
    }
    GlyphCoverage {
        left: 0,
        top: 0,
        width,
        height: rows.len(),
        data,
    }
}

impl FontSource for MemoryFont {
    fn name(&self) -> &str {
        &self.name
    }

    fn glyph_count(&self) -> u16 {
        self.glyphs.len() as u16
    }

    fn glyph_index(&self, ch: char) -> u16 {
        self.cmap.get(&ch).copied().unwrap_or(0)
    }

    fn mapped_codepoints(&self) -> Result<Vec<char>> {
        if !self.unicode_cmap {
            return Err(FontGenError::UnsupportedFont { name: self.name.clone() });
        }
        Ok(self.cmap.iter().filter(|(_, gid)| **gid != 0).map(|(ch, _)| *ch).collect())
    }

    fn rasterize_glyph(&self, glyph: u16, _px_size: f32) -> GlyphCoverage {
        self.glyphs.get(glyph as usize).cloned().unwrap_or_default()
    }
}
