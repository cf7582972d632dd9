//! Night sky animation for the terminal.
//!
//! The [`Starfield`] animator owns a set of twinkling background stars and a
//! handful of shooting stars and repaints them onto any [`DrawSurface`] once
//! per frame. [`CellCanvas`] rasterizes that surface onto terminal cells for
//! ratatui, and [`Nebula`] adds a pointer-driven parallax backdrop.

mod animations;
mod canvas;
mod chars;
mod color;
mod error;
mod schedule;
mod state;
mod surface;

pub use animations::nebula::{Nebula, NebulaBlob, blob_shift, default_blobs, pointer_offset};
pub use animations::shooting::ShootingStar;
pub use animations::twinkle::BackgroundStar;
pub use canvas::{CanvasCell, CellCanvas};
pub use color::{hsl_to_rgb, rgba_to_color};
pub use error::StarfieldError;
pub use schedule::{FrameClock, FrameTicker, StopToken};
pub use state::{FrameStats, Starfield};
pub use surface::{DrawCommand, DrawSurface, RecordingSurface};
