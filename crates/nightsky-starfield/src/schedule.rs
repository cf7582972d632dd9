//! Frame pacing and cancellation.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

/// Shared flag that ends a frame loop.
#[derive(Debug, Clone, Default)]
pub struct StopToken(Arc<AtomicBool>);

impl StopToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// A source of frame ticks.
pub trait FrameClock {
    /// Block until the next frame is due and return its timestamp in
    /// milliseconds. Timestamps never decrease.
    fn next_frame(&mut self) -> f64;
}

/// Fixed-rate clock measuring time from its creation.
#[derive(Debug, Clone)]
pub struct FrameTicker {
    start: Instant,
    interval: Duration,
    next_due: Instant,
}

impl FrameTicker {
    /// Create a ticker firing `fps` times per second. The first frame is due
    /// immediately.
    pub fn new(fps: u32) -> Self {
        let start = Instant::now();
        Self {
            start,
            interval: Duration::from_secs(1) / fps.max(1),
            next_due: start,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Time left until the next frame is due.
    pub fn until_next(&self) -> Duration {
        self.next_due.saturating_duration_since(Instant::now())
    }

    /// Return the frame timestamp if a frame is due, without blocking.
    ///
    /// Missed frames are dropped rather than replayed.
    pub fn poll(&mut self) -> Option<f64> {
        let now = Instant::now();
        if now < self.next_due {
            return None;
        }
        self.next_due += self.interval;
        if self.next_due <= now {
            self.next_due = now + self.interval;
        }
        Some(now.duration_since(self.start).as_secs_f64() * 1000.0)
    }
}

impl FrameClock for FrameTicker {
    fn next_frame(&mut self) -> f64 {
        loop {
            if let Some(timestamp) = self.poll() {
                return timestamp;
            }
            thread::sleep(self.until_next());
        }
    }
}
