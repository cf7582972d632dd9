//! Drawing surface abstraction.

use nightsky_core::{Point, Rgba, Viewport};

/// An immediate-mode 2D surface the animator paints on.
///
/// Coordinates are in surface pixels with the origin at the top-left corner
/// and `y` growing downwards.
pub trait DrawSurface {
    /// Current pixel dimensions.
    fn viewport(&self) -> Viewport;

    /// Change the pixel dimensions. Contents are discarded.
    fn resize(&mut self, viewport: Viewport);

    /// Erase the whole surface.
    fn clear(&mut self);

    /// Fill a circle of `radius` around `center`.
    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba);

    /// Stroke a straight line whose color fades linearly from `start` at
    /// `from` to `end` at `to`.
    fn stroke_gradient(&mut self, from: Point, to: Point, width: f64, start: Rgba, end: Rgba);
}

/// A single call made against a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    FillCircle {
        center: Point,
        radius: f64,
        color: Rgba,
    },
    StrokeGradient {
        from: Point,
        to: Point,
        width: f64,
        start: Rgba,
        end: Rgba,
    },
}

/// Headless surface that keeps a log of the current frame's draw calls.
///
/// `clear` empties the log before recording itself, so after a frame the log
/// holds exactly what that frame painted.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    viewport: Viewport,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Alpha of every circle drawn since the last clear.
    pub fn circle_alphas(&self) -> impl Iterator<Item = f64> + '_ {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::FillCircle { color, .. } => Some(color.a),
            _ => None,
        })
    }

    /// Number of gradient strokes drawn since the last clear.
    pub fn stroke_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|command| matches!(command, DrawCommand::StrokeGradient { .. }))
            .count()
    }
}

impl DrawSurface for RecordingSurface {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.commands.clear();
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn stroke_gradient(&mut self, from: Point, to: Point, width: f64, start: Rgba, end: Rgba) {
        self.commands.push(DrawCommand::StrokeGradient {
            from,
            to,
            width,
            start,
            end,
        });
    }
}
