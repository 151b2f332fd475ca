use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{CellSize, FontGenError, PreviewStyleKind, Result, FULL_BLOCK_SLOT};

pub const MAX_CELL_WIDTH: u32 = 8;
pub const MAX_CELL_HEIGHT: u32 = 64;
pub const MAX_PREVIEW_SCALE: u32 = 16;
pub const MAX_PREVIEW_COLUMNS: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharsetMode {
    /// The 256 slots of code page 437.
    #[default]
    Fixed256,
    /// Every codepoint the font maps, sorted ascending.
    AllGlyphs,
}

/// How a slot's codepoint reaches the rasterizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GlyphLookup {
    /// Rasterize by codepoint.
    #[default]
    Direct,
    /// Resolve every codepoint to its glyph index up front and rasterize by index.
    GlyphIndex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemapEntry {
    pub slot: usize,
    pub codepoint: u32,
}

/// Font specific overrides of the code page table, `slot -> codepoint`.
///
/// Some fonts place their code page glyphs at private or non standard
/// codepoints; a remap table points the affected slots there.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CodepointRemap(Vec<RemapEntry>);

#[derive(Deserialize)]
struct RemapFile {
    #[serde(default)]
    remap: CodepointRemap,
}

impl CodepointRemap {
    pub fn new(entries: Vec<RemapEntry>) -> Self {
        Self(entries)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Later entries win over earlier ones for the same slot.
    pub fn lookup(&self, slot: usize) -> Option<u32> {
        self.0.iter().rev().find(|e| e.slot == slot).map(|e| e.codepoint)
    }

    /// Parse a remap file:
    ///
    /// ```toml
    /// [[remap]]
    /// slot = 219
    /// codepoint = 0x2588
    /// ```
    pub fn from_toml_str(txt: &str) -> std::result::Result<Self, toml::de::Error> {
        let file: RemapFile = toml::from_str(txt)?;
        Ok(file.remap)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let txt = std::fs::read_to_string(path).map_err(|e| FontGenError::InvalidConfig {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let remap = Self::from_toml_str(&txt).map_err(|e| FontGenError::InvalidConfig {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        remap.validate()?;
        Ok(remap)
    }

    pub fn validate(&self) -> Result<()> {
        for entry in &self.0 {
            if entry.slot >= 256 {
                return Err(FontGenError::InvalidRemap {
                    slot: entry.slot,
                    message: "slot must be in 0..256".to_string(),
                });
            }
            if char::from_u32(entry.codepoint).is_none() {
                return Err(FontGenError::InvalidRemap {
                    slot: entry.slot,
                    message: format!("U+{:04X} is not a Unicode scalar value", entry.codepoint),
                });
            }
        }
        Ok(())
    }
}

/// Settings for one export run. Built once and passed through the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub cell_width: u32,
    pub cell_height: u32,
    pub charset_mode: CharsetMode,
    pub glyph_lookup: GlyphLookup,
    pub highlight_index: Option<usize>,
    pub preview_scale: u32,
    pub y_offset: i32,
    pub preview_style: Option<PreviewStyleKind>,
    pub columns: Option<usize>,
    pub remap: CodepointRemap,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            cell_width: 8,
            cell_height: 16,
            charset_mode: CharsetMode::default(),
            glyph_lookup: GlyphLookup::default(),
            highlight_index: None,
            preview_scale: 3,
            y_offset: 0,
            preview_style: None,
            columns: None,
            remap: CodepointRemap::default(),
        }
    }
}

impl ExportConfig {
    pub fn cell(&self) -> CellSize {
        CellSize::new(self.cell_width, self.cell_height)
    }

    /// The slot highlighted when none is configured: the full block in code
    /// page mode, nothing otherwise.
    pub fn default_highlight(mode: CharsetMode) -> Option<usize> {
        match mode {
            CharsetMode::Fixed256 => Some(FULL_BLOCK_SLOT),
            CharsetMode::AllGlyphs => None,
        }
    }

    pub fn preview_style_kind(&self) -> PreviewStyleKind {
        self.preview_style.unwrap_or(match self.charset_mode {
            CharsetMode::Fixed256 => PreviewStyleKind::Classic,
            CharsetMode::AllGlyphs => PreviewStyleKind::Boxed,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_CELL_WIDTH).contains(&self.cell_width) || !(1..=MAX_CELL_HEIGHT).contains(&self.cell_height) {
            return Err(FontGenError::InvalidCellSize {
                width: self.cell_width,
                height: self.cell_height,
            });
        }
        if !(1..=MAX_PREVIEW_SCALE).contains(&self.preview_scale) {
            return Err(FontGenError::InvalidScale { scale: self.preview_scale });
        }
        if let Some(columns) = self.columns.filter(|c| !(1..=MAX_PREVIEW_COLUMNS).contains(c)) {
            return Err(FontGenError::InvalidColumns { columns });
        }
        self.remap.validate()
    }

    pub fn from_toml_str(txt: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(txt)
    }

    /// Load a config file.
    ///
    /// The result is not validated, callers layer their overrides on top and
    /// call [`ExportConfig::validate`] once.
    pub fn load(path: &Path) -> Result<Self> {
        let txt = std::fs::read_to_string(path).map_err(|e| FontGenError::InvalidConfig {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&txt).map_err(|e| FontGenError::InvalidConfig {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_vga_cell() {
        let config = ExportConfig::default();
        assert_eq!(config.cell(), CellSize::new(8, 16));
        assert_eq!(config.charset_mode, CharsetMode::Fixed256);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_wide_cells() {
        let config = ExportConfig {
            cell_width: 9,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(FontGenError::InvalidCellSize { width: 9, height: 16 })));
    }

    #[test]
    fn rejects_zero_scale_and_columns() {
        let config = ExportConfig {
            preview_scale: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(FontGenError::InvalidScale { scale: 0 })));

        let config = ExportConfig {
            columns: Some(0),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(FontGenError::InvalidColumns { .. })));
    }

    #[test]
    fn rejects_oversized_preview() {
        let config = ExportConfig {
            columns: Some(usize::MAX),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(FontGenError::InvalidColumns { columns: usize::MAX })));

        let config = ExportConfig {
            preview_scale: MAX_PREVIEW_SCALE + 1,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(FontGenError::InvalidScale { .. })));

        let config = ExportConfig {
            preview_scale: MAX_PREVIEW_SCALE,
            columns: Some(MAX_PREVIEW_COLUMNS),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn load_leaves_validation_to_the_caller() {
        let path = std::env::temp_dir().join(format!("icy_fontgen_wide_{}.toml", std::process::id()));
        std::fs::write(&path, "cell_width = 12\n").unwrap();
        let mut config = ExportConfig::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.cell_width, 12);
        assert!(config.validate().is_err());
        config.cell_width = 8;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn load_reports_syntax_errors() {
        let path = std::env::temp_dir().join(format!("icy_fontgen_broken_{}.toml", std::process::id()));
        std::fs::write(&path, "cell_width = \"wide\"\n").unwrap();
        let result = ExportConfig::load(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(FontGenError::InvalidConfig { .. })));
    }

    #[test]
    fn parses_partial_toml() {
        let config = ExportConfig::from_toml_str(
            r#"
cell_height = 8
charset_mode = "all_glyphs"
highlight_index = 65

[[remap]]
slot = 1
codepoint = 0x263A
"#,
        )
        .unwrap();
        assert_eq!(config.cell_width, 8);
        assert_eq!(config.cell_height, 8);
        assert_eq!(config.charset_mode, CharsetMode::AllGlyphs);
        assert_eq!(config.highlight_index, Some(65));
        assert_eq!(config.preview_scale, 3);
        assert_eq!(config.remap.lookup(1), Some(0x263A));
        assert_eq!(config.preview_style_kind(), PreviewStyleKind::Boxed);
    }

    #[test]
    fn remap_last_entry_wins() {
        let remap = CodepointRemap::from_toml_str(
            r#"
[[remap]]
slot = 219
codepoint = 0x2588

[[remap]]
slot = 219
codepoint = 0xE0DB
"#,
        )
        .unwrap();
        assert_eq!(remap.lookup(219), Some(0xE0DB));
        assert_eq!(remap.lookup(0), None);
    }

    #[test]
    fn remap_rejects_surrogates() {
        let remap = CodepointRemap::new(vec![RemapEntry { slot: 3, codepoint: 0xD800 }]);
        assert!(matches!(remap.validate(), Err(FontGenError::InvalidRemap { slot: 3, .. })));
        let remap = CodepointRemap::new(vec![RemapEntry { slot: 256, codepoint: 0x41 }]);
        assert!(remap.validate().is_err());
    }
}
