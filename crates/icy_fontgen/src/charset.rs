//! Character set resolution.
//!
//! Produces the ordered list of slots that both exporters iterate. The slot
//! index is the array index in the generated header and the grid position in
//! the preview.

use std::fmt::Display;

use crate::{CharsetMode, ExportConfig, FontGenError, FontSource, GlyphLookup, Result};

/// Slot of the full block character in code page 437.
pub const FULL_BLOCK_SLOT: usize = 0xDB;

/// Code page 437 to Unicode, with the graphical glyphs for 0x01-0x1F and 0x7F.
pub const CP437_TO_UNICODE: [char; 256] = [
    '\u{0000}', '\u{263A}', '\u{263B}', '\u{2665}', '\u{2666}', '\u{2663}', '\u{2660}', '\u{2022}', '\u{25D8}', '\u{25CB}', '\u{25D9}', '\u{2642}', '\u{2640}',
    '\u{266A}', '\u{266B}', '\u{263C}', '\u{25BA}', '\u{25C4}', '\u{2195}', '\u{203C}', '\u{00B6}', '\u{00A7}', '\u{25AC}', '\u{21A8}', '\u{2191}', '\u{2193}',
    '\u{2192}', '\u{2190}', '\u{221F}', '\u{2194}', '\u{25B2}', '\u{25BC}', ' ', '!', '"', '#', '$', '%', '&', '\'', '(', ')', '*', '+', ',', '-', '.', '/', '0',
    '1', '2', '3', '4', '5', '6', '7', '8', '9', ':', ';', '<', '=', '>', '?', '@', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O',
    'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', '[', '\\', ']', '^', '_', '`', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n',
    'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', '{', '|', '}', '~', '\u{2302}', '\u{00C7}', '\u{00FC}', '\u{00E9}', '\u{00E2}', '\u{00E4}',
    '\u{00E0}', '\u{00E5}', '\u{00E7}', '\u{00EA}', '\u{00EB}', '\u{00E8}', '\u{00EF}', '\u{00EE}', '\u{00EC}', '\u{00C4}', '\u{00C5}', '\u{00C9}', '\u{00E6}',
    '\u{00C6}', '\u{00F4}', '\u{00F6}', '\u{00F2}', '\u{00FB}', '\u{00F9}', '\u{00FF}', '\u{00D6}', '\u{00DC}', '\u{00A2}', '\u{00A3}', '\u{00A5}', '\u{20A7}',
    '\u{0192}', '\u{00E1}', '\u{00ED}', '\u{00F3}', '\u{00FA}', '\u{00F1}', '\u{00D1}', '\u{00AA}', '\u{00BA}', '\u{00BF}', '\u{2310}', '\u{00AC}', '\u{00BD}',
    '\u{00BC}', '\u{00A1}', '\u{00AB}', '\u{00BB}', '\u{2591}', '\u{2592}', '\u{2593}', '\u{2502}', '\u{2524}', '\u{2561}', '\u{2562}', '\u{2556}', '\u{2555}',
    '\u{2563}', '\u{2551}', '\u{2557}', '\u{255D}', '\u{255C}', '\u{255B}', '\u{2510}', '\u{2514}', '\u{2534}', '\u{252C}', '\u{251C}', '\u{2500}', '\u{253C}',
    '\u{255E}', '\u{255F}', '\u{255A}', '\u{2554}', '\u{2569}', '\u{2566}', '\u{2560}', '\u{2550}', '\u{256C}', '\u{2567}', '\u{2568}', '\u{2564}', '\u{2565}',
    '\u{2559}', '\u{2558}', '\u{2552}', '\u{2553}', '\u{256B}', '\u{256A}', '\u{2518}', '\u{250C}', '\u{2588}', '\u{2584}', '\u{258C}', '\u{2590}', '\u{2580}',
    '\u{03B1}', '\u{00DF}', '\u{0393}', '\u{03C0}', '\u{03A3}', '\u{03C3}', '\u{00B5}', '\u{03C4}', '\u{03A6}', '\u{0398}', '\u{03A9}', '\u{03B4}', '\u{221E}',
    '\u{03C6}', '\u{03B5}', '\u{2229}', '\u{2261}', '\u{00B1}', '\u{2265}', '\u{2264}', '\u{2320}', '\u{2321}', '\u{00F7}', '\u{2248}', '\u{00B0}', '\u{2219}',
    '\u{00B7}', '\u{221A}', '\u{207F}', '\u{00B2}', '\u{25A0}', '\u{00A0}',
];

/// Identifies the glyph to extract for a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlyphId {
    /// Unicode scalar value, looked up through the font's character map.
    Codepoint(char),
    /// Font-internal glyph index.
    Index(u16),
}

impl Display for GlyphId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GlyphId::Codepoint(ch) => write!(f, "U+{:04X}", *ch as u32),
            GlyphId::Index(gid) => write!(f, "glyph #{gid}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Codepoint,
    GlyphIndex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterSlot {
    pub index: usize,
    pub identifier: GlyphId,
    /// Logical character of the slot. Glyph index slots keep the codepoint
    /// they were resolved from.
    pub codepoint: Option<char>,
}

impl CharacterSlot {
    pub fn from_char(index: usize, ch: char) -> Self {
        Self {
            index,
            identifier: GlyphId::Codepoint(ch),
            codepoint: Some(ch),
        }
    }

    pub fn source_kind(&self) -> SourceKind {
        match self.identifier {
            GlyphId::Codepoint(_) => SourceKind::Codepoint,
            GlyphId::Index(_) => SourceKind::GlyphIndex,
        }
    }
}

/// Resolve the ordered slot list for the configured character set.
pub fn resolve(font: &dyn FontSource, config: &ExportConfig) -> Result<Vec<CharacterSlot>> {
    let chars = match config.charset_mode {
        CharsetMode::Fixed256 => code_page_chars(config)?,
        CharsetMode::AllGlyphs => {
            let mut chars = font.mapped_codepoints()?;
            if chars.is_empty() {
                return Err(FontGenError::UnsupportedFont { name: font.name().to_string() });
            }
            chars.sort_unstable();
            chars.dedup();
            chars
        }
    };

    let slots = chars
        .into_iter()
        .enumerate()
        .map(|(index, ch)| match config.glyph_lookup {
            GlyphLookup::Direct => CharacterSlot::from_char(index, ch),
            GlyphLookup::GlyphIndex => CharacterSlot {
                index,
                identifier: GlyphId::Index(font.glyph_index(ch)),
                codepoint: Some(ch),
            },
        })
        .collect::<Vec<_>>();

    log::debug!("resolved {} slots ({:?}, {:?})", slots.len(), config.charset_mode, config.glyph_lookup);
    Ok(slots)
}

fn code_page_chars(config: &ExportConfig) -> Result<Vec<char>> {
    CP437_TO_UNICODE
        .iter()
        .enumerate()
        .map(|(slot, &ch)| match config.remap.lookup(slot) {
            Some(codepoint) => char::from_u32(codepoint).ok_or_else(|| FontGenError::InvalidRemap {
                slot,
                message: format!("U+{codepoint:04X} is not a Unicode scalar value"),
            }),
            None => Ok(ch),
        })
        .collect()
}
