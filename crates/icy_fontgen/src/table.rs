use crate::{pack, rasterize, CellSize, CharacterSlot, ExportConfig, FontGenError, FontSource, GlyphId, PackedGlyph, Result};

/// A slot whose glyph was replaced by an empty one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingGlyph {
    pub slot: usize,
    pub identifier: GlyphId,
}

/// Packed glyphs in slot order. Both exporters read this and nothing else.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphTable {
    pub font_name: String,
    pub cell: CellSize,
    pub entries: Vec<(CharacterSlot, PackedGlyph)>,
    pub missing: Vec<MissingGlyph>,
}

impl GlyphTable {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&(CharacterSlot, PackedGlyph)> {
        self.entries.get(index)
    }

    pub fn is_missing(&self, index: usize) -> bool {
        self.missing.binary_search_by_key(&index, |m| m.slot).is_ok()
    }

    /// Packed bytes of all glyphs, concatenated in slot order.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.entries.iter().flat_map(|(_, glyph)| glyph.rows.iter().copied()).collect()
    }
}

/// Rasterize and pack every slot in order.
///
/// Missing glyphs become empty glyphs and are recorded in
/// [`GlyphTable::missing`]; the table always has one entry per slot.
pub fn build(slots: Vec<CharacterSlot>, font: &dyn FontSource, config: &ExportConfig) -> Result<GlyphTable> {
    let cell = config.cell();
    let mut entries = Vec::with_capacity(slots.len());
    let mut missing = Vec::new();

    for slot in slots {
        let glyph = match rasterize(font, slot.identifier, cell, config.y_offset) {
            Ok(bitmap) => pack(&bitmap, cell.height),
            Err(FontGenError::GlyphMissing { identifier }) => {
                match slot.codepoint {
                    Some(ch) if GlyphId::Codepoint(ch) != identifier => {
                        log::warn!("Missing glyph for index {} ({identifier}, U+{:04X})", slot.index, ch as u32)
                    }
                    _ => log::warn!("Missing glyph for index {} ({identifier})", slot.index),
                }
                missing.push(MissingGlyph { slot: slot.index, identifier });
                PackedGlyph::empty(cell.height)
            }
            Err(err) => return Err(err),
        };
        log::debug!("slot {:3}: {:02X?}", slot.index, glyph.rows);
        entries.push((slot, glyph));
    }

    log::info!("Built {} glyphs ({} missing)", entries.len(), missing.len());
    Ok(GlyphTable {
        font_name: font.name().to_string(),
        cell,
        entries,
        missing,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{resolve, CharsetMode, MemoryFont};

    #[test]
    fn every_glyph_has_cell_height_rows() {
        let mut font = MemoryFont::new("test");
        font.add_solid_glyph('A', 8, 20);
        font.add_pattern_glyph('.', &["#"]);
        for height in [8, 14, 16] {
            for mode in [CharsetMode::Fixed256, CharsetMode::AllGlyphs] {
                let config = ExportConfig {
                    cell_height: height,
                    charset_mode: mode,
                    ..Default::default()
                };
                let slots = resolve(&font, &config).unwrap();
                let count = slots.len();
                let table = build(slots, &font, &config).unwrap();
                assert_eq!(table.len(), count);
                assert!(table.entries.iter().all(|(_, g)| g.rows.len() == height as usize));
            }
        }
    }

    #[test]
    fn missing_glyph_is_zero_filled() {
        let mut font = MemoryFont::new("test");
        font.add_solid_glyph('A', 8, 16);
        let config = ExportConfig::default();
        let table = build(resolve(&font, &config).unwrap(), &font, &config).unwrap();

        assert_eq!(table.len(), 256);
        assert_eq!(table.missing.len(), 255);
        assert!(table.is_missing(0x42));
        assert!(!table.is_missing(0x41));
        assert_eq!(table.entries[0x42].1, PackedGlyph::empty(16));
        assert_eq!(table.missing[0], MissingGlyph { slot: 0, identifier: GlyphId::Codepoint('\0') });
    }

    #[test]
    fn to_bytes_is_slot_ordered() {
        let mut font = MemoryFont::new("test");
        font.add_pattern_glyph('a', &["#"]);
        font.add_pattern_glyph('b', &[".#"]);
        let config = ExportConfig {
            cell_height: 2,
            charset_mode: CharsetMode::AllGlyphs,
            ..Default::default()
        };
        let table = build(resolve(&font, &config).unwrap(), &font, &config).unwrap();
        assert_eq!(table.to_bytes(), vec![0x80, 0x00, 0x40, 0x00]);
    }
}
