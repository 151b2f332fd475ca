//! Preview image of a glyph table.
//!
//! Glyphs are drawn from their packed bytes, so the preview shows exactly what
//! ends up in the header. Every slot keeps its grid position; non printable
//! slots are drawn without a glyph but still get their label.

use std::path::Path;

use image::{Rgb, RgbImage};
use serde::{Deserialize, Serialize};

use crate::{is_printable, CellSize, ExportConfig, FontGenError, GlyphTable, PackedGlyph, Result, MAX_PREVIEW_COLUMNS};

const LABEL_GLYPH_WIDTH: u32 = 3;
const LABEL_GLYPH_HEIGHT: u32 = 5;
const HIGHLIGHT_THICKNESS: u32 = 2;

/// 3x5 digits, bit 2 is the leftmost column.
const LABEL_DIGITS: [[u8; 5]; 10] = [
    [0b111, 0b101, 0b101, 0b101, 0b111],
    [0b010, 0b110, 0b010, 0b010, 0b111],
    [0b111, 0b001, 0b111, 0b100, 0b111],
    [0b111, 0b001, 0b111, 0b001, 0b111],
    [0b101, 0b101, 0b111, 0b001, 0b001],
    [0b111, 0b100, 0b111, 0b001, 0b111],
    [0b111, 0b100, 0b111, 0b101, 0b111],
    [0b111, 0b001, 0b001, 0b001, 0b001],
    [0b111, 0b101, 0b111, 0b101, 0b111],
    [0b111, 0b101, 0b111, 0b001, 0b111],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreviewStyleKind {
    /// Light glyphs on black, yellow labels, 16 columns.
    Classic,
    /// Dark glyphs on white in framed boxes, 30 columns.
    Boxed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PreviewStyle {
    pub columns: usize,
    pub background: Rgb<u8>,
    pub foreground: Rgb<u8>,
    pub label_color: Rgb<u8>,
    pub highlight_color: Rgb<u8>,
    pub frame_color: Option<Rgb<u8>>,
    /// Space around the glyph inside a grid cell, also holds the highlight box.
    pub padding: u32,
    /// Space between grid cells.
    pub spacing: u32,
    pub label_gap: u32,
    pub label_scale: u32,
}

impl PreviewStyle {
    pub fn new(kind: PreviewStyleKind) -> Self {
        match kind {
            PreviewStyleKind::Classic => Self {
                columns: 16,
                background: Rgb([0, 0, 0]),
                foreground: Rgb([255, 255, 255]),
                label_color: Rgb([255, 255, 0]),
                highlight_color: Rgb([255, 0, 0]),
                frame_color: None,
                padding: HIGHLIGHT_THICKNESS,
                spacing: 2,
                label_gap: 2,
                label_scale: 2,
            },
            PreviewStyleKind::Boxed => Self {
                columns: 30,
                background: Rgb([255, 255, 255]),
                foreground: Rgb([0, 0, 0]),
                label_color: Rgb([0, 0, 0]),
                highlight_color: Rgb([255, 0, 0]),
                frame_color: Some(Rgb([0, 0, 0])),
                padding: HIGHLIGHT_THICKNESS,
                spacing: 4,
                label_gap: 2,
                label_scale: 1,
            },
        }
    }

    pub fn from_config(config: &ExportConfig) -> Self {
        let mut style = Self::new(config.preview_style_kind());
        if let Some(columns) = config.columns {
            style.columns = columns.clamp(1, MAX_PREVIEW_COLUMNS);
        }
        style
    }
}

/// Grid geometry, derived only from slot count, cell size, scale and style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewLayout {
    pub columns: usize,
    pub rows: usize,
    pub glyph_width: u32,
    pub glyph_height: u32,
    pub box_width: u32,
    pub box_height: u32,
    pub pitch_x: u32,
    pub pitch_y: u32,
}

impl PreviewLayout {
    pub fn new(slot_count: usize, cell: CellSize, scale: u32, style: &PreviewStyle) -> Self {
        let columns = style.columns.clamp(1, MAX_PREVIEW_COLUMNS);
        let glyph_width = cell.width * scale;
        let glyph_height = cell.height * scale;
        let widest_label = label_width(&slot_count.saturating_sub(1).to_string()) * style.label_scale;
        let box_width = glyph_width.max(widest_label) + 2 * style.padding;
        let box_height = glyph_height + 2 * style.padding + style.label_gap + LABEL_GLYPH_HEIGHT * style.label_scale;
        Self {
            columns,
            rows: slot_count.div_ceil(columns),
            glyph_width,
            glyph_height,
            box_width,
            box_height,
            pitch_x: box_width + style.spacing,
            pitch_y: box_height + style.spacing,
        }
    }

    pub fn image_size(&self) -> (u32, u32) {
        (self.columns as u32 * self.pitch_x, self.rows as u32 * self.pitch_y)
    }

    /// Top left corner of the grid cell for `index`.
    pub fn cell_origin(&self, index: usize) -> (u32, u32) {
        let col = (index % self.columns) as u32;
        let row = (index / self.columns) as u32;
        (col * self.pitch_x, row * self.pitch_y)
    }

    /// Top left corner of the magnified glyph inside the grid cell for `index`.
    pub fn glyph_origin(&self, index: usize, style: &PreviewStyle) -> (u32, u32) {
        let (x, y) = self.cell_origin(index);
        (x + (self.box_width - self.glyph_width) / 2, y + style.padding)
    }
}

fn label_width(text: &str) -> u32 {
    let len = text.chars().count() as u32;
    if len == 0 {
        0
    } else {
        len * (LABEL_GLYPH_WIDTH + 1) - 1
    }
}

/// Compose the preview grid for `table`.
pub fn compose(table: &GlyphTable, config: &ExportConfig) -> RgbImage {
    compose_with_style(table, config, &PreviewStyle::from_config(config))
}

pub fn compose_with_style(table: &GlyphTable, config: &ExportConfig, style: &PreviewStyle) -> RgbImage {
    let scale = config.preview_scale.max(1);
    let layout = PreviewLayout::new(table.len(), table.cell, scale, style);
    let (width, height) = layout.image_size();
    let mut img = RgbImage::from_pixel(width, height, style.background);

    for (slot, glyph) in &table.entries {
        let index = slot.index;
        let (cell_x, cell_y) = layout.cell_origin(index);
        let (glyph_x, glyph_y) = layout.glyph_origin(index, style);

        if let Some(frame) = style.frame_color {
            outline_rect(&mut img, cell_x, cell_y, layout.box_width, layout.glyph_height + 2 * style.padding, 1, frame);
        }

        if slot.codepoint.map_or(true, is_printable) {
            draw_glyph(&mut img, glyph, table.cell, glyph_x, glyph_y, scale, style.foreground);
        }

        if config.highlight_index == Some(index) {
            let inset = HIGHLIGHT_THICKNESS.min(style.padding);
            outline_rect(
                &mut img,
                glyph_x - inset,
                glyph_y - inset,
                layout.glyph_width + 2 * inset,
                layout.glyph_height + 2 * inset,
                HIGHLIGHT_THICKNESS,
                style.highlight_color,
            );
        }

        let label = index.to_string();
        let label_x = cell_x + (layout.box_width - label_width(&label) * style.label_scale) / 2;
        let label_y = glyph_y + layout.glyph_height + style.padding + style.label_gap;
        draw_label(&mut img, &label, label_x, label_y, style.label_scale, style.label_color);
    }

    log::debug!("composed {}x{} preview ({} columns, {} rows)", width, height, layout.columns, layout.rows);
    img
}

/// Nearest neighbour magnification of the packed bits.
fn draw_glyph(img: &mut RgbImage, glyph: &PackedGlyph, cell: CellSize, x: u32, y: u32, scale: u32, color: Rgb<u8>) {
    for row in 0..cell.height {
        for col in 0..cell.width {
            if glyph.is_set(col, row) {
                fill_rect(img, x + col * scale, y + row * scale, scale, scale, color);
            }
        }
    }
}

fn draw_label(img: &mut RgbImage, text: &str, x: u32, y: u32, scale: u32, color: Rgb<u8>) {
    let mut cursor = x;
    for digit in text.chars().filter_map(|ch| ch.to_digit(10)) {
        for (row, bits) in LABEL_DIGITS[digit as usize].iter().enumerate() {
            for col in 0..LABEL_GLYPH_WIDTH {
                if bits & (0b100 >> col) != 0 {
                    fill_rect(img, cursor + col * scale, y + row as u32 * scale, scale, scale, color);
                }
            }
        }
        cursor += (LABEL_GLYPH_WIDTH + 1) * scale;
    }
}

fn fill_rect(img: &mut RgbImage, x: u32, y: u32, width: u32, height: u32, color: Rgb<u8>) {
    let x_end = (x + width).min(img.width());
    let y_end = (y + height).min(img.height());
    for py in y..y_end {
        for px in x..x_end {
            img.put_pixel(px, py, color);
        }
    }
}

fn outline_rect(img: &mut RgbImage, x: u32, y: u32, width: u32, height: u32, thickness: u32, color: Rgb<u8>) {
    let t = thickness.min(width / 2).min(height / 2).max(1);
    fill_rect(img, x, y, width, t, color);
    fill_rect(img, x, y + height - t, width, t, color);
    fill_rect(img, x, y, t, height, color);
    fill_rect(img, x + width - t, y, t, height, color);
}

/// Encode the preview as PNG (or whatever the extension of `path` names).
pub fn save_preview(img: &RgbImage, path: &Path) -> Result<()> {
    img.save(path).map_err(|e| FontGenError::ImageSave {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CharacterSlot, CharsetMode};

    fn table(glyphs: Vec<(char, Vec<u8>)>, cell: CellSize) -> GlyphTable {
        GlyphTable {
            font_name: "test".to_string(),
            cell,
            entries: glyphs
                .into_iter()
                .enumerate()
                .map(|(i, (ch, rows))| (CharacterSlot::from_char(i, ch), PackedGlyph { rows }))
                .collect(),
            missing: Vec::new(),
        }
    }

    fn config(scale: u32, highlight: Option<usize>) -> ExportConfig {
        ExportConfig {
            cell_width: 8,
            cell_height: 2,
            preview_scale: scale,
            highlight_index: highlight,
            ..Default::default()
        }
    }

    #[test]
    fn label_widths() {
        assert_eq!(label_width(""), 0);
        assert_eq!(label_width("7"), 3);
        assert_eq!(label_width("255"), 11);
    }

    #[test]
    fn layout_depends_on_count_and_columns() {
        let style = PreviewStyle::new(PreviewStyleKind::Classic);
        let layout = PreviewLayout::new(256, CellSize::new(8, 16), 3, &style);
        assert_eq!(layout.columns, 16);
        assert_eq!(layout.rows, 16);
        assert_eq!(layout.glyph_width, 24);
        assert_eq!(layout.box_width, 24 + 4);
        assert_eq!(layout.box_height, 48 + 4 + 2 + 10);
        assert_eq!(layout.image_size(), (16 * 30, 16 * 66));

        let layout = PreviewLayout::new(31, CellSize::new(8, 16), 1, &PreviewStyle::new(PreviewStyleKind::Boxed));
        assert_eq!((layout.columns, layout.rows), (30, 2));
    }

    #[test]
    fn column_count_is_bounded() {
        let mut style = PreviewStyle::new(PreviewStyleKind::Boxed);
        style.columns = usize::MAX;
        let layout = PreviewLayout::new(3, CellSize::new(8, 16), 1, &style);
        assert_eq!(layout.columns, MAX_PREVIEW_COLUMNS);
        assert_eq!(layout.image_size().0, MAX_PREVIEW_COLUMNS as u32 * layout.pitch_x);
    }

    #[test]
    fn wide_labels_widen_cells() {
        let style = PreviewStyle::new(PreviewStyleKind::Boxed);
        let layout = PreviewLayout::new(12000, CellSize::new(8, 16), 1, &style);
        assert_eq!(layout.box_width, label_width("11999") + 4);
    }

    #[test]
    fn glyph_pixels_are_magnified() {
        let table = table(vec![('A', vec![0x80, 0x01])], CellSize::new(8, 2));
        let config = config(2, None);
        let style = PreviewStyle::from_config(&config);
        let img = compose(&table, &config);
        let layout = PreviewLayout::new(1, table.cell, 2, &style);
        assert_eq!(img.dimensions(), layout.image_size());

        let (gx, gy) = layout.glyph_origin(0, &style);
        for (dx, dy) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            assert_eq!(*img.get_pixel(gx + dx, gy + dy), style.foreground);
            assert_eq!(*img.get_pixel(gx + 14 + dx, gy + 2 + dy), style.foreground);
        }
        assert_eq!(*img.get_pixel(gx + 2, gy), style.background);
        assert_eq!(*img.get_pixel(gx, gy + 2), style.background);
    }

    #[test]
    fn highlight_only_marks_its_cell() {
        let table = table(vec![('A', vec![0, 0]), ('B', vec![0, 0])], CellSize::new(8, 2));
        let config = config(3, Some(1));
        let style = PreviewStyle::from_config(&config);
        let img = compose(&table, &config);
        let layout = PreviewLayout::new(2, table.cell, 3, &style);

        let (x1, y1) = layout.cell_origin(1);
        assert_eq!(*img.get_pixel(x1 + style.padding - 1, y1 + style.padding), style.highlight_color);
        let (x0, y0) = layout.cell_origin(0);
        assert_eq!(*img.get_pixel(x0 + style.padding - 1, y0 + style.padding), style.background);
    }

    #[test]
    fn non_printable_slots_keep_position_but_stay_empty() {
        let table = table(vec![('\0', vec![0xFF, 0xFF]), ('A', vec![0xFF, 0xFF])], CellSize::new(8, 2));
        let config = config(1, None);
        let style = PreviewStyle::from_config(&config);
        let img = compose(&table, &config);
        let layout = PreviewLayout::new(2, table.cell, 1, &style);

        let (x0, y0) = layout.glyph_origin(0, &style);
        let (x1, y1) = layout.glyph_origin(1, &style);
        assert_eq!(*img.get_pixel(x0, y0), style.background);
        assert_eq!(*img.get_pixel(x1, y1), style.foreground);
    }

    #[test]
    fn style_follows_mode_and_columns() {
        let mut config = ExportConfig {
            charset_mode: CharsetMode::AllGlyphs,
            ..Default::default()
        };
        assert_eq!(PreviewStyle::from_config(&config).columns, 30);
        config.columns = Some(8);
        assert_eq!(PreviewStyle::from_config(&config).columns, 8);
        config.preview_style = Some(PreviewStyleKind::Classic);
        assert_eq!(PreviewStyle::from_config(&config).foreground, Rgb([255, 255, 255]));
    }

    #[test]
    fn labels_are_drawn() {
        let table = table(vec![('A', vec![0, 0])], CellSize::new(8, 2));
        let config = config(1, None);
        let style = PreviewStyle::from_config(&config);
        let img = compose(&table, &config);
        let label_pixels = img.pixels().filter(|p| **p == style.label_color).count();
        // "0" is 12 of 15 pixels, drawn at label_scale x label_scale
        assert_eq!(label_pixels, 12 * (style.label_scale * style.label_scale) as usize);
    }
}
