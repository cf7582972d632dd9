//! Shooting stars: short-lived streaks that fade as they travel.

use nightsky_core::{Point, Rgba, StarfieldConfig, Viewport};
use rand::Rng;

use crate::surface::DrawSurface;

const STREAK_COLOR: Rgba = Rgba::new(255, 255, 255, 1.0);

/// Stroke width of the tail.
pub const TAIL_WIDTH: f64 = 1.5;

/// Radius of the bright head.
pub const HEAD_RADIUS: f64 = 2.0;

/// A streak moving along a fixed heading while its opacity decays.
#[derive(Debug, Clone, PartialEq)]
pub struct ShootingStar {
    /// Head position in surface pixels.
    pub position: Point,
    /// Tail length in pixels, in `40..120`.
    pub length: f64,
    /// Pixels travelled per frame, in `4..10`.
    pub speed: f64,
    /// Heading in radians below the horizontal, in `15°..45°`.
    pub angle: f64,
    /// Current opacity; starts at 1.
    pub opacity: f64,
    /// Opacity lost per frame, in `0.01..0.025`.
    pub decay: f64,
}

impl ShootingStar {
    pub fn new(position: Point, length: f64, speed: f64, angle: f64, decay: f64) -> Self {
        Self {
            position,
            length,
            speed,
            angle,
            opacity: 1.0,
            decay,
        }
    }

    /// Create a star starting in the top half of `viewport`.
    pub fn random<R: Rng>(rng: &mut R, viewport: Viewport) -> Self {
        let position = Point::new(
            rng.random::<f64>() * viewport.width as f64,
            rng.random::<f64>() * viewport.height as f64 * 0.5,
        );
        Self::new(
            position,
            rng.random_range(40.0..120.0),
            rng.random_range(4.0..10.0),
            rng.random_range(15.0_f64..45.0).to_radians(),
            rng.random_range(0.01..0.025),
        )
    }

    /// One spawn attempt: a Bernoulli trial with the configured probability,
    /// honored only while fewer than `max_shooting_stars` are alive.
    pub fn try_spawn<R: Rng>(
        rng: &mut R,
        viewport: Viewport,
        live: usize,
        config: &StarfieldConfig,
    ) -> Option<Self> {
        if rng.random::<f64>() < config.spawn_probability && live < config.max_shooting_stars {
            Some(Self::random(rng, viewport))
        } else {
            None
        }
    }

    /// Per-frame displacement.
    pub fn velocity(&self) -> Point {
        Point::new(
            self.angle.cos() * self.speed,
            self.angle.sin() * self.speed,
        )
    }

    /// Trailing end of the streak.
    pub fn tail(&self) -> Point {
        Point::new(
            self.position.x - self.angle.cos() * self.length,
            self.position.y - self.angle.sin() * self.length,
        )
    }

    /// Move one frame and fade. Returns `false` once the star has burnt out.
    pub fn advance(&mut self) -> bool {
        let velocity = self.velocity();
        self.position.x += velocity.x;
        self.position.y += velocity.y;
        self.opacity -= self.decay;
        self.is_alive()
    }

    pub fn is_alive(&self) -> bool {
        self.opacity > 0.0
    }

    /// Draw the fading tail and the head at the current opacity.
    pub fn draw<S: DrawSurface + ?Sized>(&self, surface: &mut S) {
        let head = STREAK_COLOR.with_alpha(self.opacity);
        surface.stroke_gradient(
            self.tail(),
            self.position,
            TAIL_WIDTH,
            STREAK_COLOR.with_alpha(0.0),
            head,
        );
        surface.fill_circle(self.position, HEAD_RADIUS, head);
    }
}
