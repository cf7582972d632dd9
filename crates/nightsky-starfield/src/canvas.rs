//! Terminal cell raster implementing [`DrawSurface`].

use nightsky_core::{Point, Rgba, Viewport};
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use crate::chars::{VISIBLE_INTENSITY, star_glyph, stroke_glyph};
use crate::color::rgba_to_color;
use crate::surface::DrawSurface;

/// Accumulated paint of one terminal cell.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CanvasCell {
    pub color: Rgba,
    /// Set when a streak passed through the cell.
    pub stroke: Option<char>,
}

/// A pixel-addressed surface backed by a grid of terminal cells.
///
/// Each cell covers `cell_width x cell_height` pixels; everything painted
/// inside a cell is composited into a single color.
#[derive(Debug, Clone)]
pub struct CellCanvas {
    viewport: Viewport,
    cell_width: u32,
    cell_height: u32,
    cols: u16,
    rows: u16,
    cells: Vec<CanvasCell>,
}

impl CellCanvas {
    pub const DEFAULT_CELL_WIDTH: u32 = 8;
    pub const DEFAULT_CELL_HEIGHT: u32 = 16;

    /// Create a canvas for a terminal of `cols x rows` cells.
    pub fn new(cols: u16, rows: u16, cell_width: u32, cell_height: u32) -> Self {
        let cell_width = cell_width.max(1);
        let cell_height = cell_height.max(1);
        let mut canvas = Self {
            viewport: Viewport::default(),
            cell_width,
            cell_height,
            cols: 0,
            rows: 0,
            cells: Vec::new(),
        };
        let viewport = canvas.viewport_for(cols, rows);
        canvas.resize(viewport);
        canvas
    }

    /// Pixel viewport covering `cols x rows` cells, saturating at `u32::MAX`.
    pub fn viewport_for(&self, cols: u16, rows: u16) -> Viewport {
        Viewport::new(
            (cols as u32).saturating_mul(self.cell_width),
            (rows as u32).saturating_mul(self.cell_height),
        )
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn cell_size(&self) -> (u32, u32) {
        (self.cell_width, self.cell_height)
    }

    pub fn cell(&self, col: u16, row: u16) -> Option<&CanvasCell> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.cells.get(row as usize * self.cols as usize + col as usize)
    }

    /// Map a pixel position to the cell containing it.
    pub fn cell_at(&self, point: Point) -> Option<(u16, u16)> {
        if point.x < 0.0 || point.y < 0.0 {
            return None;
        }
        let col = (point.x / self.cell_width as f64) as u64;
        let row = (point.y / self.cell_height as f64) as u64;
        if col >= self.cols as u64 || row >= self.rows as u64 {
            return None;
        }
        Some((col as u16, row as u16))
    }

    fn cell_mut(&mut self, col: u16, row: u16) -> &mut CanvasCell {
        &mut self.cells[row as usize * self.cols as usize + col as usize]
    }

    fn paint(&mut self, col: u16, row: u16, color: Rgba) {
        let cell = self.cell_mut(col, row);
        cell.color = color.over(cell.color);
    }

    /// Clamp a pixel span to an inclusive range of cell indices.
    fn cell_span(lo: f64, hi: f64, size: u32, count: u16) -> Option<(u16, u16)> {
        if count == 0 || hi < 0.0 || lo >= size as f64 * count as f64 {
            return None;
        }
        let first = (lo.max(0.0) / size as f64) as u16;
        let last = ((hi / size as f64) as u64).min(count as u64 - 1) as u16;
        Some((first, last))
    }
}

impl DrawSurface for CellCanvas {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.cols = viewport
            .width
            .div_ceil(self.cell_width)
            .min(u16::MAX as u32) as u16;
        self.rows = viewport
            .height
            .div_ceil(self.cell_height)
            .min(u16::MAX as u32) as u16;
        self.cells = vec![CanvasCell::default(); self.cols as usize * self.rows as usize];
    }

    fn clear(&mut self) {
        self.cells.fill(CanvasCell::default());
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba) {
        let Some((col_lo, col_hi)) =
            Self::cell_span(center.x - radius, center.x + radius, self.cell_width, self.cols)
        else {
            return;
        };
        let Some((row_lo, row_hi)) =
            Self::cell_span(center.y - radius, center.y + radius, self.cell_height, self.rows)
        else {
            return;
        };

        let (cw, ch) = (self.cell_width as f64, self.cell_height as f64);
        for row in row_lo..=row_hi {
            for col in col_lo..=col_hi {
                // Closest point of the cell rectangle to the circle center.
                let nx = center.x.clamp(col as f64 * cw, (col as f64 + 1.0) * cw);
                let ny = center.y.clamp(row as f64 * ch, (row as f64 + 1.0) * ch);
                let (dx, dy) = (center.x - nx, center.y - ny);
                if dx * dx + dy * dy <= radius * radius {
                    self.paint(col, row, color);
                }
            }
        }
    }

    /// Strokes are rasterized one cell wide; `width` has no effect at cell resolution.
    fn stroke_gradient(&mut self, from: Point, to: Point, _width: f64, start: Rgba, end: Rgba) {
        let (cw, ch) = (self.cell_width as f64, self.cell_height as f64);
        let glyph = stroke_glyph((to.x - from.x) / cw, (to.y - from.y) / ch);

        let length = ((to.x - from.x).powi(2) + (to.y - from.y).powi(2)).sqrt();
        let step = cw.min(ch) / 2.0;
        let steps = (length / step).ceil().max(1.0) as usize;

        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            let Some((col, row)) = self.cell_at(from.lerp(to, t)) else {
                continue;
            };
            // One sample per cell, taken at the brightest (latest) point.
            let next_in_same_cell = i < steps
                && self.cell_at(from.lerp(to, (i + 1) as f64 / steps as f64)) == Some((col, row));
            if next_in_same_cell {
                continue;
            }

            let color = start.lerp(end, t);
            if color.a < VISIBLE_INTENSITY {
                continue;
            }
            self.paint(col, row, color);
            self.cell_mut(col, row).stroke = Some(glyph);
        }
    }
}

impl Widget for &CellCanvas {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let cols = self.cols.min(area.width);
        let rows = self.rows.min(area.height);

        for row in 0..rows {
            for col in 0..cols {
                let Some(cell) = self.cell(col, row) else {
                    continue;
                };
                let intensity = cell.color.a;
                if intensity < VISIBLE_INTENSITY {
                    continue;
                }
                let glyph = cell.stroke.unwrap_or_else(|| star_glyph(intensity));
                if let Some(target) = buf.cell_mut((area.x + col, area.y + row)) {
                    target.set_char(glyph).set_fg(rgba_to_color(cell.color));
                }
            }
        }
    }
}
