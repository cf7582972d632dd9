//! Core types shared by the nightsky crates.

use serde::{Deserialize, Serialize};

/// Size of a drawing surface in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when the surface has no drawable area.
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Check whether a point lies inside the viewport.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= 0.0
            && point.y >= 0.0
            && point.x < self.width as f64
            && point.y < self.height as f64
    }
}

/// A position in surface pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Linear interpolation towards `other`.
    pub fn lerp(self, other: Point, t: f64) -> Point {
        Point {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }
}

/// An RGB color with a floating point alpha channel in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    /// Fully transparent black, the cleared state of a surface.
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0.0);

    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with a different alpha, clamped to `0.0..=1.0`.
    pub fn with_alpha(self, a: f64) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Source-over compositing of `self` onto `dst`.
    pub fn over(self, dst: Rgba) -> Rgba {
        let src_a = self.a.clamp(0.0, 1.0);
        let dst_a = dst.a.clamp(0.0, 1.0);
        let out_a = src_a + dst_a * (1.0 - src_a);
        if out_a <= 0.0 {
            return Rgba::TRANSPARENT;
        }

        let channel = |s: u8, d: u8| {
            let v = (s as f64 * src_a + d as f64 * dst_a * (1.0 - src_a)) / out_a;
            v.round().clamp(0.0, 255.0) as u8
        };

        Rgba {
            r: channel(self.r, dst.r),
            g: channel(self.g, dst.g),
            b: channel(self.b, dst.b),
            a: out_a,
        }
    }

    /// Channel-wise linear interpolation, alpha included.
    pub fn lerp(self, other: Rgba, t: f64) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        let channel = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgba {
            r: channel(self.r, other.r),
            g: channel(self.g, other.g),
            b: channel(self.b, other.b),
            a: self.a + (other.a - self.a) * t,
        }
    }
}

/// Errors for out-of-range starfield settings.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigValueError {
    #[error("spawn probability must be within [0, 1], got {0}")]
    SpawnProbability(f64),
}

/// Tunables for the starfield animator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarfieldConfig {
    /// Number of background stars generated per viewport.
    pub star_count: usize,
    /// Maximum number of shooting stars alive at once.
    pub max_shooting_stars: usize,
    /// Chance of a shooting star spawn attempt succeeding each frame.
    pub spawn_probability: f64,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            star_count: 200,
            max_shooting_stars: 2,
            spawn_probability: 0.005,
        }
    }
}

impl StarfieldConfig {
    pub fn validate(&self) -> Result<(), ConfigValueError> {
        if !(0.0..=1.0).contains(&self.spawn_probability) {
            return Err(ConfigValueError::SpawnProbability(self.spawn_probability));
        }
        Ok(())
    }
}
