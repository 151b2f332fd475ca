#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_possible_wrap)]

use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use flexi_logger::Logger;
use icy_fontgen::{CharsetMode, CodepointRemap, ExportConfig, FontExporter, GlyphLookup, GlyphTable, HeaderOptions, PreviewStyleKind, TtfFont};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum StyleArg {
    /// Light glyphs on black, yellow labels
    Classic,
    /// Dark glyphs on white in framed boxes
    Boxed,
}

impl From<StyleArg> for PreviewStyleKind {
    fn from(style: StyleArg) -> Self {
        match style {
            StyleArg::Classic => PreviewStyleKind::Classic,
            StyleArg::Boxed => PreviewStyleKind::Boxed,
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about = "TTF font to C bitmap header converter for dot based displays.", long_about = None)]
pub struct Cli {
    #[arg(short, long, value_name = "FONT", help = "Path to the TTF/OTF font file.")]
    font: PathBuf,

    #[arg(short, long, value_name = "PIXELS", help = "Cell height in pixels [default: 16]")]
    size: Option<u32>,

    #[arg(short, long, value_name = "PIXELS", help = "Cell width in pixels, 1-8 [default: 8]")]
    width: Option<u32>,

    #[arg(long, help = "Extract all glyphs from the font. Default is to use code page 437.")]
    all_glyphs: bool,

    #[arg(long, help = "Look up glyph indices first and rasterize by index.")]
    glyph_index: bool,

    #[arg(long, value_name = "FILE", help = "TOML table remapping code page slots to other codepoints.")]
    remap: Option<PathBuf>,

    #[arg(long, value_name = "FILE", help = "TOML export configuration. Command line options override it.")]
    config: Option<PathBuf>,

    #[arg(long, value_name = "INDEX", help = "Slot to mark in the preview [default: 219 for code page 437]")]
    highlight: Option<usize>,

    #[arg(long, conflicts_with = "highlight", help = "Do not mark any slot in the preview.")]
    no_highlight: bool,

    #[arg(long, value_name = "FACTOR", help = "Preview magnification [default: 3]")]
    scale: Option<u32>,

    #[arg(long, value_name = "COUNT", help = "Preview grid columns [default: 16 classic, 30 boxed]")]
    columns: Option<usize>,

    #[arg(long, value_enum, help = "Preview style [default: classic for code page 437, boxed for all glyphs]")]
    style: Option<StyleArg>,

    #[arg(long, value_name = "PIXELS", allow_hyphen_values = true, help = "Shift glyphs up by this many pixels.")]
    y_offset: Option<i32>,

    #[arg(short, long, value_name = "DIR", help = "Directory for the header and preview [default: .]")]
    output_dir: Option<PathBuf>,

    #[arg(long, value_name = "NAME", help = "Name of the generated array [default: font_<w>x<h>]")]
    name: Option<String>,

    #[arg(long, value_name = "INDEX", help = "Print the scanlines of one slot.")]
    dump: Option<usize>,

    #[arg(short, long, help = "Enable debug logging.")]
    verbose: bool,
}

impl Cli {
    fn export_config(&self) -> anyhow::Result<ExportConfig> {
        let mut config = match &self.config {
            Some(path) => ExportConfig::load(path)?,
            None => ExportConfig::default(),
        };

        if let Some(size) = self.size {
            config.cell_height = size;
        }
        if let Some(width) = self.width {
            config.cell_width = width;
        }
        if self.all_glyphs {
            config.charset_mode = CharsetMode::AllGlyphs;
        }
        if self.glyph_index {
            config.glyph_lookup = GlyphLookup::GlyphIndex;
        }
        if let Some(path) = &self.remap {
            config.remap = CodepointRemap::load(path)?;
        }
        if let Some(scale) = self.scale {
            config.preview_scale = scale;
        }
        if let Some(columns) = self.columns {
            config.columns = Some(columns);
        }
        if let Some(style) = self.style {
            config.preview_style = Some(style.into());
        }
        if let Some(y_offset) = self.y_offset {
            config.y_offset = y_offset;
        }
        config.highlight_index = if self.no_highlight {
            None
        } else {
            self.highlight
                .or(config.highlight_index)
                .or_else(|| ExportConfig::default_highlight(config.charset_mode))
        };

        if config.charset_mode == CharsetMode::AllGlyphs && !config.remap.is_empty() {
            log::warn!("Remap table ignored, it only applies to code page 437");
        }
        config.validate()?;
        Ok(config)
    }

    fn output_paths(&self) -> (PathBuf, PathBuf) {
        let out_dir = self.output_dir.clone().unwrap_or_else(|| PathBuf::from("."));
        let stem = self.font.file_stem().and_then(|s| s.to_str()).unwrap_or("font");
        (out_dir.join(format!("{stem}.h")), out_dir.join(format!("{stem}_preview.png")))
    }
}

fn dump_glyph(table: &GlyphTable, index: usize) {
    match table.get(index) {
        Some((slot, glyph)) => {
            println!("Character {index} glyph scanlines ({}):", slot.identifier);
            println!("{glyph}");
        }
        None => log::warn!("Cannot dump slot {index}, the table has {} slots", table.len()),
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = cli.export_config()?;

    log::info!("Loading font: {}", cli.font.display());
    let font = TtfFont::load(&cli.font)?;

    match config.charset_mode {
        CharsetMode::Fixed256 => log::info!("Using code page 437..."),
        CharsetMode::AllGlyphs => log::info!("Extracting all glyphs from font..."),
    }

    let mut exporter = FontExporter::new(&font, config)?;
    if let Some(name) = &cli.name {
        exporter = exporter.with_header_options(HeaderOptions::with_array_name(name.as_str()));
    }
    let table = exporter.build_table()?;

    if let Some(index) = cli.dump {
        dump_glyph(&table, index);
    }
    if !table.missing.is_empty() {
        log::warn!("{} of {} glyphs missing, written as empty glyphs", table.missing.len(), table.len());
    }

    let (header_path, preview_path) = cli.output_paths();
    if let Some(dir) = header_path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        create_output_dir(dir)?;
    }
    exporter.write_outputs(&table, &header_path, &preview_path)?;

    log::info!("TTF2BMH finished");
    Ok(())
}

fn create_output_dir(dir: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir).with_context(|| format!("Failed to create output directory '{}'", dir.display()))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    let logger = Logger::try_with_env_or_str(level).and_then(|logger| logger.log_to_stderr().format(flexi_logger::default_format).start());
    let logger_handle = match logger {
        Ok(handle) => Some(handle),
        Err(err) => {
            eprintln!("Failed to start logger: {err}");
            None
        }
    };

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err:#}");
            if logger_handle.is_none() {
                eprintln!("Error: {err:#}");
            }
            ExitCode::FAILURE
        }
    }
}
