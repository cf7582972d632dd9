//! Nebula blobs drifting with the pointer (parallax).

use nightsky_core::{Point, Viewport};
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use crate::color::hsl_to_rgb;

/// Pixels of shift per unit of pointer offset for the first blob; blob `i`
/// moves `(i + 1)` times as far.
pub const PARALLAX_STEP: f64 = 8.0;

/// A soft colored cloud painted into cell backgrounds.
#[derive(Debug, Clone, PartialEq)]
pub struct NebulaBlob {
    /// Center as a fraction of the area, `(0.0..=1.0, 0.0..=1.0)`.
    pub anchor: (f32, f32),
    /// Radius in cells.
    pub radius: f32,
    /// Hue in degrees.
    pub hue: f32,
}

/// Default blobs: violet upper left, blue right, magenta low center.
pub fn default_blobs() -> Vec<NebulaBlob> {
    vec![
        NebulaBlob {
            anchor: (0.2, 0.25),
            radius: 28.0,
            hue: 270.0,
        },
        NebulaBlob {
            anchor: (0.8, 0.4),
            radius: 24.0,
            hue: 225.0,
        },
        NebulaBlob {
            anchor: (0.45, 0.85),
            radius: 20.0,
            hue: 320.0,
        },
    ]
}

/// Normalize a pointer position to `[-1, 1]` on both axes, 0 at the center.
pub fn pointer_offset(pointer: Point, viewport: Viewport) -> (f64, f64) {
    if viewport.is_empty() {
        return (0.0, 0.0);
    }
    (
        (pointer.x / viewport.width as f64 - 0.5) * 2.0,
        (pointer.y / viewport.height as f64 - 0.5) * 2.0,
    )
}

/// Pixel translation of blob `index` for a normalized pointer offset.
pub fn blob_shift(index: usize, offset: (f64, f64)) -> Point {
    let factor = (index + 1) as f64 * PARALLAX_STEP;
    Point::new(offset.0 * factor, offset.1 * factor)
}

/// Parallax nebula layer.
#[derive(Debug, Clone)]
pub struct Nebula {
    blobs: Vec<NebulaBlob>,
    offset: (f64, f64),
    cell_width: u32,
    cell_height: u32,
}

impl Nebula {
    pub fn new(blobs: Vec<NebulaBlob>, cell_width: u32, cell_height: u32) -> Self {
        Self {
            blobs,
            offset: (0.0, 0.0),
            cell_width: cell_width.max(1),
            cell_height: cell_height.max(1),
        }
    }

    pub fn offset(&self) -> (f64, f64) {
        self.offset
    }

    /// Track the pointer, given in surface pixels.
    pub fn set_pointer(&mut self, pointer: Point, viewport: Viewport) {
        self.offset = pointer_offset(pointer, viewport);
    }

    /// Center of blob `index` in cell coordinates within `area`.
    pub fn blob_center(&self, index: usize, area: Rect) -> Option<(f32, f32)> {
        let blob = self.blobs.get(index)?;
        let shift = blob_shift(index, self.offset);
        Some((
            area.width as f32 * blob.anchor.0 + (shift.x / self.cell_width as f64) as f32,
            area.height as f32 * blob.anchor.1 + (shift.y / self.cell_height as f64) as f32,
        ))
    }
}

impl Widget for &Nebula {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let centers: Vec<(f32, f32)> = (0..self.blobs.len())
            .filter_map(|i| self.blob_center(i, area))
            .collect();

        for y in 0..area.height {
            for x in 0..area.width {
                // Strongest blob decides the hue; overlaps add up.
                let mut total = 0.0_f32;
                let mut peak = (0.0_f32, 0.0_f32);
                for (blob, &(cx, cy)) in self.blobs.iter().zip(&centers) {
                    let dx = x as f32 - cx;
                    let dy = (y as f32 - cy) * 2.0; // Adjust for terminal aspect ratio
                    let dist = (dx * dx + dy * dy).sqrt();
                    let falloff = (1.0 - dist / blob.radius.max(1.0)).max(0.0).powi(2);
                    total += falloff;
                    if falloff > peak.0 {
                        peak = (falloff, blob.hue);
                    }
                }

                if total < 0.01 {
                    continue;
                }
                let intensity = total.min(1.0);
                let color = hsl_to_rgb(peak.1, 0.55, 0.03 + intensity * 0.12);
                if let Some(cell) = buf.cell_mut((area.x + x, area.y + y)) {
                    cell.set_bg(color);
                }
            }
        }
    }
}
