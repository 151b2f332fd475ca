//! C header export.
//!
//! The generated array is the format consumed by the firmware: one row per
//! slot in table order, `cell_height` bytes per row, bit 7 = leftmost pixel.
//! The text only depends on the table and the options, so identical tables
//! give byte identical headers.

use std::{fmt::Write, path::Path};

use crate::{is_printable, CellSize, CharacterSlot, FontGenError, GlyphId, GlyphTable, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderOptions {
    pub array_name: String,
    pub guard: String,
}

impl HeaderOptions {
    /// `font_8x16` / `FONT_8X16_H` for an 8x16 cell.
    pub fn for_cell(cell: CellSize) -> Self {
        Self::with_array_name(format!("font_{}x{}", cell.width, cell.height))
    }

    pub fn with_array_name(name: impl Into<String>) -> Self {
        let array_name = sanitize_identifier(&name.into());
        let guard = format!("{}_H", array_name.to_ascii_uppercase());
        Self { array_name, guard }
    }

    fn define_prefix(&self) -> String {
        self.array_name.to_ascii_uppercase()
    }
}

fn sanitize_identifier(name: &str) -> String {
    let mut result: String = name.chars().map(|ch| if ch.is_ascii_alphanumeric() { ch } else { '_' }).collect();
    if result.is_empty() || result.starts_with(|ch: char| ch.is_ascii_digit()) {
        result.insert(0, '_');
    }
    result
}

/// Render the table as a C header.
pub fn export(table: &GlyphTable, options: &HeaderOptions) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = render(table, options, &mut out);
    out
}

fn render(table: &GlyphTable, options: &HeaderOptions, out: &mut String) -> std::fmt::Result {
    let count = table.len();
    let height = table.cell.height;
    let prefix = options.define_prefix();
    let index_width = count.saturating_sub(1).to_string().len().max(3);

    writeln!(out, "#ifndef {}", options.guard)?;
    writeln!(out, "#define {}", options.guard)?;
    writeln!(out)?;
    writeln!(out, "#include <stdint.h>")?;
    writeln!(out)?;
    writeln!(out, "// Font: {}", table.font_name)?;
    writeln!(out, "// Total characters: {count}")?;
    writeln!(out)?;
    writeln!(out, "#define {prefix}_WIDTH {}", table.cell.width)?;
    writeln!(out, "#define {prefix}_HEIGHT {height}")?;
    writeln!(out, "#define {prefix}_COUNT {count}")?;
    writeln!(out)?;
    writeln!(out, "static const uint8_t {}[{count}][{height}] = {{", options.array_name)?;

    for (slot, glyph) in &table.entries {
        let bytes = glyph.rows.iter().map(|b| format!("0x{b:02X}")).collect::<Vec<_>>().join(", ");
        writeln!(
            out,
            "  /* {:>index_width$} */ {{ {bytes} }}, // {}",
            slot.index,
            slot_comment(slot, table.is_missing(slot.index))
        )?;
    }

    writeln!(out, "}};")?;
    writeln!(out)?;
    writeln!(out, "#endif")
}

fn slot_comment(slot: &CharacterSlot, missing: bool) -> String {
    let mut comment = String::new();
    if let Some(ch) = slot.codepoint {
        let _ = write!(comment, "U+{:04X}", ch as u32);
        if is_printable(ch) && ch != ' ' {
            let _ = write!(comment, " '{ch}'");
        }
    }
    if let GlyphId::Index(gid) = slot.identifier {
        if !comment.is_empty() {
            comment.push(' ');
        }
        let _ = write!(comment, "glyph {gid}");
    }
    if missing {
        comment.push_str(" (missing)");
    }
    comment
}

/// Write header text to `path`.
pub fn write_header(path: &Path, text: &str) -> Result<()> {
    std::fs::write(path, text).map_err(|e| FontGenError::io(path, e))
}
