//! Starfield animation state.

use nightsky_core::{StarfieldConfig, Viewport};
use rand::{Rng, rngs::StdRng};
use tracing::{debug, trace};

use crate::animations::shooting::ShootingStar;
use crate::animations::twinkle::{self, BackgroundStar};
use crate::error::StarfieldError;
use crate::schedule::{FrameClock, StopToken};
use crate::surface::DrawSurface;

/// What a single frame did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Background stars painted.
    pub stars_drawn: usize,
    /// Halos painted around large stars.
    pub halos_drawn: usize,
    /// Whether the spawn attempt produced a shooting star.
    pub spawned: bool,
    /// Shooting stars that burnt out and were removed.
    pub expired: usize,
    /// Shooting stars alive after the frame.
    pub shooting_stars: usize,
}

/// Twinkling background stars plus transient shooting stars, painted onto
/// a [`DrawSurface`] once per frame.
#[derive(Debug)]
pub struct Starfield<S, R = StdRng> {
    config: StarfieldConfig,
    surface: S,
    rng: R,
    /// Background stars, regenerated wholesale on resize.
    stars: Vec<BackgroundStar>,
    /// Live shooting stars; never more than `max_shooting_stars` after a
    /// spawn attempt.
    shooting_stars: Vec<ShootingStar>,
}

impl<S: DrawSurface, R: Rng> Starfield<S, R> {
    /// Create a starfield sized to `surface` and populate its stars.
    pub fn new(config: StarfieldConfig, surface: S, rng: R) -> Result<Self, StarfieldError> {
        config.validate()?;
        ensure_area(surface.viewport())?;

        let mut starfield = Self {
            config,
            surface,
            rng,
            stars: Vec::new(),
            shooting_stars: Vec::new(),
        };
        starfield.regenerate_stars();
        Ok(starfield)
    }

    /// Resize the surface and regenerate every background star.
    ///
    /// Live shooting stars keep flying. A zero-area viewport is rejected and
    /// leaves the starfield untouched.
    pub fn resize(&mut self, viewport: Viewport) -> Result<(), StarfieldError> {
        ensure_area(viewport)?;
        self.surface.resize(viewport);
        self.regenerate_stars();
        Ok(())
    }

    fn regenerate_stars(&mut self) {
        let viewport = self.surface.viewport();
        self.stars = twinkle::generate(&mut self.rng, viewport, self.config.star_count);
        debug!(
            count = self.stars.len(),
            width = viewport.width,
            height = viewport.height,
            "generated background stars"
        );
    }

    /// Render one frame at `timestamp` milliseconds.
    pub fn frame(&mut self, timestamp: f64) -> FrameStats {
        let mut stats = FrameStats::default();

        self.surface.clear();

        for star in &self.stars {
            if star.draw(&mut self.surface, timestamp) {
                stats.halos_drawn += 1;
            }
            stats.stars_drawn += 1;
        }

        stats.spawned = self.spawn_attempt();

        let before = self.shooting_stars.len();
        let surface = &mut self.surface;
        self.shooting_stars.retain_mut(|star| {
            if !star.advance() {
                trace!(x = star.position.x, y = star.position.y, "shooting star burnt out");
                return false;
            }
            star.draw(&mut *surface);
            true
        });
        stats.expired = before - self.shooting_stars.len();
        stats.shooting_stars = self.shooting_stars.len();

        stats
    }

    fn spawn_attempt(&mut self) -> bool {
        let viewport = self.surface.viewport();
        let live = self.shooting_stars.len();
        match ShootingStar::try_spawn(&mut self.rng, viewport, live, &self.config) {
            Some(star) => self.push_shooting_star(star),
            None => false,
        }
    }

    /// Add a shooting star unless the live cap is reached.
    pub fn launch(&mut self, star: ShootingStar) -> bool {
        if self.shooting_stars.len() >= self.config.max_shooting_stars {
            return false;
        }
        self.push_shooting_star(star)
    }

    /// Launch a randomly generated shooting star, subject to the cap.
    pub fn launch_random(&mut self) -> bool {
        let star = ShootingStar::random(&mut self.rng, self.surface.viewport());
        self.launch(star)
    }

    fn push_shooting_star(&mut self, star: ShootingStar) -> bool {
        trace!(
            x = star.position.x,
            y = star.position.y,
            angle = star.angle.to_degrees(),
            "shooting star spawned"
        );
        self.shooting_stars.push(star);
        true
    }

    /// Render frames from `clock` until `stop` is cancelled. Returns the
    /// number of frames rendered.
    pub fn run<C: FrameClock + ?Sized>(&mut self, clock: &mut C, stop: &StopToken) -> u64 {
        let mut frames = 0;
        while !stop.is_cancelled() {
            let timestamp = clock.next_frame();
            self.frame(timestamp);
            frames += 1;
        }
        debug!(frames, "frame loop stopped");
        frames
    }

    pub fn config(&self) -> &StarfieldConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.surface.viewport()
    }

    pub fn stars(&self) -> &[BackgroundStar] {
        &self.stars
    }

    pub fn shooting_stars(&self) -> &[ShootingStar] {
        &self.shooting_stars
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}

fn ensure_area(viewport: Viewport) -> Result<(), StarfieldError> {
    if viewport.is_empty() {
        return Err(StarfieldError::EmptySurface {
            width: viewport.width,
            height: viewport.height,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, RecordingSurface};
    use nightsky_core::{ConfigValueError, Point};
    use rand::SeedableRng;

    fn starfield(config: StarfieldConfig, viewport: Viewport) -> Starfield<RecordingSurface> {
        Starfield::new(
            config,
            RecordingSurface::new(viewport),
            StdRng::seed_from_u64(42),
        )
        .unwrap()
    }

    fn quiet() -> StarfieldConfig {
        StarfieldConfig {
            spawn_probability: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_new_populates_stars() {
        let field = starfield(StarfieldConfig::default(), Viewport::new(800, 600));
        assert_eq!(field.stars().len(), 200);
        assert!(field.shooting_stars().is_empty());
        assert!(field.stars().iter().all(|s| field.viewport().contains(s.position)));
    }

    #[test]
    fn test_new_rejects_empty_surface() {
        let err = Starfield::new(
            StarfieldConfig::default(),
            RecordingSurface::new(Viewport::new(0, 600)),
            StdRng::seed_from_u64(1),
        )
        .unwrap_err();
        assert_eq!(
            err,
            StarfieldError::EmptySurface {
                width: 0,
                height: 600
            }
        );
    }

    #[test]
    fn test_new_rejects_bad_probability() {
        let config = StarfieldConfig {
            spawn_probability: -0.1,
            ..Default::default()
        };
        let err = Starfield::new(
            config,
            RecordingSurface::new(Viewport::new(10, 10)),
            StdRng::seed_from_u64(1),
        )
        .unwrap_err();
        assert_eq!(
            err,
            StarfieldError::Config(ConfigValueError::SpawnProbability(-0.1))
        );
    }

    #[test]
    fn test_star_count_stable_across_frames() {
        let mut field = starfield(StarfieldConfig::default(), Viewport::new(800, 600));
        let before = field.stars().to_vec();
        for i in 0..500 {
            let stats = field.frame(i as f64 * 16.0);
            assert_eq!(stats.stars_drawn, 200);
            assert_eq!(field.stars().len(), 200);
        }
        assert_eq!(field.stars(), before.as_slice());
    }

    #[test]
    fn test_frame_starts_with_clear_and_draws_halos() {
        let mut field = starfield(quiet(), Viewport::new(800, 600));
        let stats = field.frame(0.0);

        let commands = field.surface().commands();
        assert_eq!(commands[0], DrawCommand::Clear);
        let halos = field.stars().iter().filter(|s| s.has_halo()).count();
        assert_eq!(stats.halos_drawn, halos);
        assert_eq!(commands.len(), 1 + 200 + halos);
    }

    #[test]
    fn test_resize_regenerates_stars() {
        let mut field = starfield(StarfieldConfig::default(), Viewport::new(800, 600));
        let before: Vec<Point> = field.stars().iter().map(|s| s.position).collect();

        field.resize(Viewport::new(1200, 800)).unwrap();

        assert_eq!(field.viewport(), Viewport::new(1200, 800));
        assert_eq!(field.surface().viewport(), Viewport::new(1200, 800));
        assert_eq!(field.stars().len(), 200);
        for star in field.stars() {
            assert!(field.viewport().contains(star.position));
            assert!(!before.contains(&star.position));
        }
    }

    #[test]
    fn test_resize_keeps_shooting_stars() {
        let mut field = starfield(quiet(), Viewport::new(800, 600));
        assert!(field.launch(ShootingStar::new(Point::new(5.0, 5.0), 50.0, 5.0, 0.5, 0.01)));

        field.resize(Viewport::new(1200, 800)).unwrap();
        assert_eq!(field.shooting_stars().len(), 1);
        assert_eq!(field.shooting_stars()[0].position, Point::new(5.0, 5.0));
    }

    #[test]
    fn test_resize_rejects_empty_viewport() {
        let mut field = starfield(StarfieldConfig::default(), Viewport::new(800, 600));
        let before = field.stars().to_vec();
        assert!(field.resize(Viewport::new(1200, 0)).is_err());
        assert_eq!(field.viewport(), Viewport::new(800, 600));
        assert_eq!(field.stars(), before.as_slice());
    }

    #[test]
    fn test_shooting_star_removed_on_exact_frame() {
        let mut field = starfield(quiet(), Viewport::new(800, 600));
        assert!(field.launch(ShootingStar::new(Point::new(100.0, 100.0), 60.0, 5.0, 0.5, 0.25)));

        let mut last_opacity = 1.0;
        for _ in 0..3 {
            let stats = field.frame(0.0);
            assert_eq!(stats.shooting_stars, 1);
            let opacity = field.shooting_stars()[0].opacity;
            assert!(opacity < last_opacity);
            assert!(opacity > 0.0);
            last_opacity = opacity;
            assert_eq!(field.surface().stroke_count(), 1);
        }

        // 1.0 - 4 * 0.25 == 0.0: removed this frame, nothing drawn.
        let stats = field.frame(0.0);
        assert_eq!(stats.expired, 1);
        assert!(field.shooting_stars().is_empty());
        assert_eq!(field.surface().stroke_count(), 0);
    }

    #[test]
    fn test_shooting_stars_never_drawn_transparent() {
        let config = StarfieldConfig {
            spawn_probability: 0.2,
            ..Default::default()
        };
        let mut field = starfield(config, Viewport::new(800, 600));
        for i in 0..2_000 {
            field.frame(i as f64 * 16.0);
            for command in field.surface().commands() {
                if let DrawCommand::StrokeGradient { end, .. } = command {
                    assert!(end.a > 0.0);
                }
            }
            assert!(field.surface().circle_alphas().all(|a| a > 0.0));
        }
    }

    #[test]
    fn test_shooting_star_cap_holds() {
        let config = StarfieldConfig {
            spawn_probability: 1.0,
            ..Default::default()
        };
        let mut field = starfield(config, Viewport::new(800, 600));
        let mut spawned = 0;
        for i in 0..1_000 {
            let stats = field.frame(i as f64);
            assert!(field.shooting_stars().len() <= 2);
            spawned += stats.spawned as usize;
        }
        assert!(spawned >= 2);
    }

    #[test]
    fn test_launch_respects_cap() {
        let mut field = starfield(quiet(), Viewport::new(800, 600));
        assert!(field.launch_random());
        assert!(field.launch_random());
        assert!(!field.launch_random());
        assert_eq!(field.shooting_stars().len(), 2);
    }

    #[test]
    fn test_same_seed_same_sky() {
        let a = starfield(StarfieldConfig::default(), Viewport::new(640, 480));
        let b = starfield(StarfieldConfig::default(), Viewport::new(640, 480));
        assert_eq!(a.stars(), b.stars());
    }

    struct ManualClock {
        now: f64,
        stop_after: u64,
        ticks: u64,
        stop: StopToken,
    }

    impl FrameClock for ManualClock {
        fn next_frame(&mut self) -> f64 {
            self.ticks += 1;
            if self.ticks >= self.stop_after {
                self.stop.cancel();
            }
            self.now += 16.0;
            self.now
        }
    }

    #[test]
    fn test_run_until_stopped() {
        let mut field = starfield(StarfieldConfig::default(), Viewport::new(320, 240));
        let stop = StopToken::new();
        let mut clock = ManualClock {
            now: 0.0,
            stop_after: 25,
            ticks: 0,
            stop: stop.clone(),
        };

        assert_eq!(field.run(&mut clock, &stop), 25);
        assert!(stop.is_cancelled());
    }

    #[test]
    fn test_run_with_cancelled_token_renders_nothing() {
        let mut field = starfield(StarfieldConfig::default(), Viewport::new(320, 240));
        let stop = StopToken::new();
        stop.cancel();
        let mut clock = ManualClock {
            now: 0.0,
            stop_after: 1,
            ticks: 0,
            stop: stop.clone(),
        };
        assert_eq!(field.run(&mut clock, &stop), 0);
        assert!(field.surface().commands().is_empty());
    }
}
