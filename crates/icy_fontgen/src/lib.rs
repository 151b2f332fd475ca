//! Outline font to fixed cell bitmap font conversion.
//!
//! The pipeline resolves a character set, rasterizes every slot into a
//! monochrome cell, packs each scanline into a byte and hands the resulting
//! [`GlyphTable`] to two exporters: a C header for firmware and a preview image
//! for humans.
//!
//! ```no_run
//! use icy_fontgen::{ExportConfig, FontExporter, TtfFont};
//! use std::path::Path;
//!
//! let font = TtfFont::load(Path::new("PxPlus_IBM_VGA_8x16.ttf")).unwrap();
//! let exporter = FontExporter::new(&font, ExportConfig::default()).unwrap();
//! let table = exporter.build_table().unwrap();
//! exporter.write_outputs(&table, Path::new("font.h"), Path::new("font_preview.png")).unwrap();
//! ```

use std::path::Path;

mod error;
pub use error::*;

pub mod charset;
pub use charset::*;

pub mod config;
pub use config::*;

pub mod font;
pub use font::*;

pub mod raster;
pub use raster::*;

pub mod pack;
pub use pack::*;

pub mod table;
pub use table::*;

pub mod header;
pub use header::{HeaderOptions, write_header};

pub mod preview;
pub use preview::{PreviewLayout, PreviewStyle, PreviewStyleKind, save_preview};

mod unicode;
pub use unicode::is_printable;

/// Runs the whole pipeline for one font and one configuration.
pub struct FontExporter<'a> {
    font: &'a dyn FontSource,
    config: ExportConfig,
    header_options: HeaderOptions,
}

impl<'a> FontExporter<'a> {
    pub fn new(font: &'a dyn FontSource, config: ExportConfig) -> Result<Self> {
        config.validate()?;
        let header_options = HeaderOptions::for_cell(config.cell());
        Ok(Self { font, config, header_options })
    }

    pub fn with_header_options(mut self, options: HeaderOptions) -> Self {
        self.header_options = options;
        self
    }

    pub fn resolve(&self) -> Result<Vec<CharacterSlot>> {
        charset::resolve(self.font, &self.config)
    }

    pub fn build_table(&self) -> Result<GlyphTable> {
        let slots = self.resolve()?;
        log::info!("Total characters found: {}", slots.len());
        table::build(slots, self.font, &self.config)
    }

    pub fn header(&self, table: &GlyphTable) -> String {
        header::export(table, &self.header_options)
    }

    pub fn preview(&self, table: &GlyphTable) -> image::RgbImage {
        preview::compose(table, &self.config)
    }

    /// Write the header, then the preview.
    pub fn write_outputs(&self, table: &GlyphTable, header_path: &Path, preview_path: &Path) -> Result<()> {
        write_header(header_path, &self.header(table))?;
        log::info!("{} written", header_path.display());
        save_preview(&self.preview(table), preview_path)?;
        log::info!("Indexed preview saved to {}", preview_path.display());
        Ok(())
    }
}
