//! Recorded transform operations.

use crate::error::DrawError;
use crate::raster::TransformTarget;

/// Which family a [`TransformOp`] belongs to; used by kind-specific resets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformKind {
    Translate,
    Rotate,
    Scale,
}

/// A single transform call as it was made by the sketch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransformOp {
    /// Integer offset of the origin.
    Translate { dx: i32, dy: i32 },
    /// Angle in degrees; negative and beyond ±360 are kept as given.
    Rotate { degrees: f64 },
    /// Multiplicative factors on each axis.
    Scale { sx: f64, sy: f64 },
}

impl TransformOp {
    pub fn kind(&self) -> TransformKind {
        match self {
            TransformOp::Translate { .. } => TransformKind::Translate,
            TransformOp::Rotate { .. } => TransformKind::Rotate,
            TransformOp::Scale { .. } => TransformKind::Scale,
        }
    }

    /// Issues the matching incremental call on the rasterizer.
    pub fn apply<T: TransformTarget + ?Sized>(&self, target: &mut T) {
        match *self {
            TransformOp::Translate { dx, dy } => target.translate_by(dx as f64, dy as f64),
            TransformOp::Rotate { degrees } => target.rotate_by(degrees),
            TransformOp::Scale { sx, sy } => target.scale_by(sx, sy),
        }
    }

    /// Maps a point from the space after this op into the space before it.
    ///
    /// Fails on a zero scale factor, which has no inverse.
    pub fn invert_point(&self, (x, y): (f64, f64)) -> Result<(f64, f64), DrawError> {
        match *self {
            TransformOp::Translate { dx, dy } => Ok((x - dx as f64, y - dy as f64)),
            TransformOp::Rotate { degrees } => Ok(rotate_point((x, y), -degrees)),
            TransformOp::Scale { sx, sy } => {
                if sx == 0.0 || sy == 0.0 {
                    return Err(DrawError::DegenerateScale { sx, sy });
                }
                Ok((x / sx, y / sy))
            }
        }
    }

    /// Maps a point from the space before this op into the space after it.
    pub fn forward_point(&self, (x, y): (f64, f64)) -> (f64, f64) {
        match *self {
            TransformOp::Translate { dx, dy } => (x + dx as f64, y + dy as f64),
            TransformOp::Rotate { degrees } => rotate_point((x, y), degrees),
            TransformOp::Scale { sx, sy } => (x * sx, y * sy),
        }
    }
}

/// Standard 2D rotation around the origin, angle in degrees.
fn rotate_point((x, y): (f64, f64), degrees: f64) -> (f64, f64) {
    let radians = degrees * std::f64::consts::PI / 180.0;
    let (sin, cos) = radians.sin_cos();
    (x * cos - y * sin, x * sin + y * cos)
}
