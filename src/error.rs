//! Error type shared by the canvas, the state stack and the rasterizers.

use thiserror::Error;

/// Errors a drawing call can report back to the sketch.
///
/// Everything not listed here is total: transforms, style changes and draw
/// calls never fail.
#[derive(Debug, Error)]
pub enum DrawError {
    #[error("pop() called without a matching push()")]
    StackUnderflow,

    #[error("cannot invert a degenerate scale ({sx}, {sy})")]
    DegenerateScale { sx: f64, sy: f64 },

    #[error("Cairo error: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("PNG encoding error: {0}")]
    Png(#[from] cairo::IoError),

    #[error("Failed to write image: {0}")]
    Io(#[from] std::io::Error),
}
