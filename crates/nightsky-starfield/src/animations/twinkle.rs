//! Twinkling background stars.

use std::f64::consts::TAU;

use nightsky_core::{Point, Rgba, Viewport};
use rand::Rng;

use crate::surface::DrawSurface;

/// Fill color of a star body.
pub const STAR_COLOR: Rgba = Rgba::new(255, 255, 255, 1.0);

/// Fill color of the glow around larger stars.
pub const HALO_COLOR: Rgba = Rgba::new(200, 210, 255, 1.0);

/// Stars strictly larger than this get a halo.
pub const HALO_MIN_RADIUS: f64 = 1.2;

const HALO_SCALE: f64 = 3.0;
const HALO_OPACITY: f64 = 0.1;

/// A fixed point of light whose brightness oscillates over time.
#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundStar {
    /// Position in surface pixels.
    pub position: Point,
    /// Body radius, in `0.3..1.8`.
    pub radius: f64,
    /// Peak opacity, in `0.2..0.9`.
    pub base_opacity: f64,
    /// Angular speed of the twinkle per millisecond.
    pub twinkle_speed: f64,
    /// Phase offset of the twinkle, in `0..2π`.
    pub twinkle_phase: f64,
}

impl BackgroundStar {
    /// Create a star with random parameters somewhere inside `viewport`.
    pub fn random<R: Rng>(rng: &mut R, viewport: Viewport) -> Self {
        Self {
            position: Point::new(
                rng.random::<f64>() * viewport.width as f64,
                rng.random::<f64>() * viewport.height as f64,
            ),
            radius: rng.random_range(0.3..1.8),
            base_opacity: rng.random_range(0.2..0.9),
            twinkle_speed: rng.random_range(0.005..0.025),
            twinkle_phase: rng.random_range(0.0..TAU),
        }
    }

    /// Sinusoidal brightness multiplier, in `0.2..=1.0`.
    pub fn twinkle_factor(&self, timestamp: f64) -> f64 {
        0.6 + 0.4 * (timestamp * self.twinkle_speed + self.twinkle_phase).sin()
    }

    /// Opacity of the star body at `timestamp` (milliseconds).
    pub fn brightness(&self, timestamp: f64) -> f64 {
        self.base_opacity * self.twinkle_factor(timestamp)
    }

    pub fn has_halo(&self) -> bool {
        self.radius > HALO_MIN_RADIUS
    }

    pub fn halo_radius(&self) -> f64 {
        self.radius * HALO_SCALE
    }

    /// Draw the star and, for large stars, its halo. Returns whether a halo
    /// was drawn.
    pub fn draw<S: DrawSurface + ?Sized>(&self, surface: &mut S, timestamp: f64) -> bool {
        let brightness = self.brightness(timestamp);
        surface.fill_circle(self.position, self.radius, STAR_COLOR.with_alpha(brightness));

        if !self.has_halo() {
            return false;
        }
        surface.fill_circle(
            self.position,
            self.halo_radius(),
            HALO_COLOR.with_alpha(brightness * HALO_OPACITY),
        );
        true
    }
}

/// Generate a fresh set of `count` stars for `viewport`.
pub fn generate<R: Rng>(
    rng: &mut R,
    viewport: Viewport,
    count: usize,
) -> Vec<BackgroundStar> {
    (0..count)
        .map(|_| BackgroundStar::random(rng, viewport))
        .collect()
}
