use super::Surface;
use crate::{Rgb, BLANK_GLYPH};

/// Character grid surface for terminal previews.
///
/// Each cell covers `cell_width` x `cell_height` pixels; a glyph lands in the
/// cell containing its top-left anchor and later glyphs overwrite earlier ones.
#[derive(Clone, Debug)]
pub struct TextSurface {
    width: u32,
    height: u32,
    cell_width: u32,
    cell_height: u32,
    columns: usize,
    rows: usize,
    cells: Vec<char>,
    opacity: f32,
    visible: bool,
}

impl TextSurface {
    pub fn new(cell_width: u32, cell_height: u32) -> Self {
        Self {
            width: 0,
            height: 0,
            cell_width: cell_width.max(1),
            cell_height: cell_height.max(1),
            columns: 0,
            rows: 0,
            cells: Vec::new(),
            opacity: 1.0,
            visible: true,
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn cell(&self, column: usize, row: usize) -> Option<char> {
        if column >= self.columns {
            return None;
        }
        self.cells.get(row * self.columns + column).copied()
    }

    /// Rendered rows, blank when the surface is hidden.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        let visible = self.visible;
        self.cells.chunks(self.columns.max(1)).map(move |row| {
            if visible {
                row.iter().collect::<String>()
            } else {
                row.iter().map(|_| BLANK_GLYPH).collect::<String>()
            }
        })
    }

    fn cell_index(&self, x: f64, y: f64) -> Option<usize> {
        if !(x >= 0.0 && y >= 0.0) {
            return None;
        }

        let column = (x / f64::from(self.cell_width)).floor() as usize;
        let row = (y / f64::from(self.cell_height)).floor() as usize;
        (column < self.columns && row < self.rows).then(|| row * self.columns + column)
    }
}

impl Surface for TextSurface {
    fn set_dimensions(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.columns = width.div_ceil(self.cell_width) as usize;
        self.rows = height.div_ceil(self.cell_height) as usize;
        self.cells = vec![BLANK_GLYPH; self.columns * self.rows];
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, _color: Rgb) {
        let cell_width = f64::from(self.cell_width);
        let cell_height = f64::from(self.cell_height);
        let first_column = (x.max(0.0) / cell_width).floor() as usize;
        let first_row = (y.max(0.0) / cell_height).floor() as usize;
        let end_column = (((x + width) / cell_width).ceil().max(0.0) as usize).min(self.columns);
        let end_row = (((y + height) / cell_height).ceil().max(0.0) as usize).min(self.rows);

        for row in first_row..end_row {
            for column in first_column..end_column {
                self.cells[row * self.columns + column] = BLANK_GLYPH;
            }
        }
    }

    fn set_font(&mut self, _size: f64, _family: &str) {}

    fn set_fill_color(&mut self, _color: Rgb) {}

    fn draw_text(&mut self, glyph: char, x: f64, y: f64) {
        if let Some(index) = self.cell_index(x, y) {
            self.cells[index] = glyph;
        }
    }

    fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity;
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }
}
