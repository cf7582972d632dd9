//! Starfield error types.

use nightsky_core::ConfigValueError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StarfieldError {
    /// The drawing surface must have a non-zero area.
    #[error("drawing surface has no area ({width}x{height})")]
    EmptySurface { width: u32, height: u32 },

    #[error("invalid starfield configuration: {0}")]
    Config(#[from] ConfigValueError),
}
