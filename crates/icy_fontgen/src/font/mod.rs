//! Font engine access.
//!
//! The pipeline only talks to fonts through [`FontSource`]. [`TtfFont`] backs
//! it with fontdue and ttf-parser, [`MemoryFont`] with hand made bitmaps.

mod memory;
mod ttf;

pub use memory::*;
pub use ttf::*;

use crate::Result;

/// Coverage bitmap of a rendered glyph.
///
/// `left` and `top` place the bitmap relative to the top left corner of the
/// character cell, with the baseline already applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlyphCoverage {
    pub left: i32,
    pub top: i32,
    pub width: usize,
    pub height: usize,
    /// Row major coverage, 0 = empty.
    pub data: Vec<u8>,
}

impl GlyphCoverage {
    pub fn coverage(&self, x: usize, y: usize) -> u8 {
        if x >= self.width {
            return 0;
        }
        self.data.get(y * self.width + x).copied().unwrap_or(0)
    }
}

pub trait FontSource {
    fn name(&self) -> &str;

    /// Number of glyphs, valid indices are `0..glyph_count()`.
    fn glyph_count(&self) -> u16;

    /// Glyph index for `ch`, 0 if the font has none.
    fn glyph_index(&self, ch: char) -> u16;

    /// Every codepoint mapped to a real glyph by a Unicode character map.
    ///
    /// Fails with `UnsupportedFont` if the font has no Unicode character map.
    fn mapped_codepoints(&self) -> Result<Vec<char>>;

    /// Render `glyph` with an em size of `px_size` pixels.
    fn rasterize_glyph(&self, glyph: u16, px_size: f32) -> GlyphCoverage;
}
