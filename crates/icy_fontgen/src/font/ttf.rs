//! TrueType/OpenType fonts.
//!
//! fontdue renders the outlines. ttf-parser reads the name table and the
//! character map: only Unicode subtables count, fontdue's own lookup also
//! reads legacy single byte subtables (Mac Roman) as if they were Unicode.

use std::{collections::BTreeMap, path::Path};

use super::{FontSource, GlyphCoverage};
use crate::{FontGenError, Result};

pub struct TtfFont {
    name: String,
    /// `None` if the font has no Unicode character map.
    cmap: Option<BTreeMap<char, u16>>,
    font: fontdue::Font,
}

impl TtfFont {
    /// Load a font file.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read(path).map_err(|e| FontGenError::font_load(path, e))?;
        let fallback_name = path.file_stem().and_then(|s| s.to_str()).unwrap_or("Imported").to_string();
        Self::from_bytes(path, fallback_name, data)
    }

    /// Parse font data. `path` is only used for error messages, `fallback_name`
    /// is used if the font has no readable name.
    pub fn from_bytes(path: &Path, fallback_name: impl Into<String>, data: Vec<u8>) -> Result<Self> {
        let face = ttf_parser::Face::parse(&data, 0).map_err(|e| FontGenError::font_load(path, e))?;
        let name = font_name(&face).unwrap_or_else(|| fallback_name.into());
        let cmap = unicode_cmap(&face);

        let font = fontdue::Font::from_bytes(data.as_slice(), fontdue::FontSettings::default()).map_err(|e| FontGenError::font_load(path, e))?;
        log::debug!(
            "loaded font '{}' with {} glyphs, {} mapped codepoints",
            name,
            font.glyph_count(),
            cmap.as_ref().map_or(0, BTreeMap::len)
        );

        Ok(Self { name, cmap, font })
    }
}

/// Codepoint to glyph map of all Unicode subtables. The first subtable mapping
/// a codepoint to a real glyph wins.
fn unicode_cmap(face: &ttf_parser::Face<'_>) -> Option<BTreeMap<char, u16>> {
    let cmap = face.tables().cmap?;
    let mut map = BTreeMap::new();
    let mut has_unicode = false;
    for subtable in cmap.subtables.into_iter().filter(|subtable| subtable.is_unicode()) {
        has_unicode = true;
        subtable.codepoints(|cp| {
            let Some(ch) = char::from_u32(cp) else {
                return;
            };
            if let Some(gid) = subtable.glyph_index(cp).filter(|gid| gid.0 != 0) {
                map.entry(ch).or_insert(gid.0);
            }
        });
    }
    has_unicode.then_some(map)
}

fn font_name(face: &ttf_parser::Face<'_>) -> Option<String> {
    let find = |id: u16| face.names().into_iter().filter(|n| n.name_id == id).find_map(|n| n.to_string());
    find(ttf_parser::name_id::FULL_NAME).or_else(|| find(ttf_parser::name_id::FAMILY))
}

impl FontSource for TtfFont {
    fn name(&self) -> &str {
        &self.name
    }

    fn glyph_count(&self) -> u16 {
        self.font.glyph_count()
    }

    fn glyph_index(&self, ch: char) -> u16 {
        self.cmap.as_ref().and_then(|cmap| cmap.get(&ch)).copied().unwrap_or(0)
    }

    fn mapped_codepoints(&self) -> Result<Vec<char>> {
        match &self.cmap {
            Some(cmap) => Ok(cmap.keys().copied().collect()),
            None => Err(FontGenError::UnsupportedFont { name: self.name.clone() }),
        }
    }

    fn rasterize_glyph(&self, glyph: u16, px_size: f32) -> GlyphCoverage {
        let (metrics, data) = self.font.rasterize_indexed(glyph, px_size);
        // Baseline sits at the ascent below the cell top, like a text renderer drawing at y = 0.
        let ascent = self.font.horizontal_line_metrics(px_size).map_or(px_size, |m| m.ascent);
        let top = ascent.round() as i32 - (metrics.ymin + metrics.height as i32);
        GlyphCoverage {
            left: metrics.xmin,
            top,
            width: metrics.width,
            height: metrics.height,
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_font_load_error() {
        let err = TtfFont::load(Path::new("does/not/exist.ttf")).err().unwrap();
        assert!(matches!(err, FontGenError::FontLoad { .. }));
        assert!(err.to_string().contains("does/not/exist.ttf"));
    }

    #[test]
    fn garbage_is_font_load_error() {
        let res = TtfFont::from_bytes(Path::new("garbage.ttf"), "garbage", vec![0x42; 64]);
        assert!(matches!(res, Err(FontGenError::FontLoad { .. })));
    }
}
