//! Transform bookkeeping for one scope: the log plus a cumulative summary.

use super::log::TransformLog;
use super::op::{TransformKind, TransformOp};
use crate::error::DrawError;
use crate::raster::TransformTarget;
use crate::util::Point;
use log::trace;

/// Net translation, rotation and scale of the ops in a log.
///
/// Redundant with the log; kept for cheap queries such as the current angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformSummary {
    pub translation: Point,
    /// Sum of all rotations in degrees, not wrapped to 360.
    pub rotation: f64,
    /// Product of all scale factors per axis.
    pub scale: (f64, f64),
}

impl TransformSummary {
    pub const IDENTITY: TransformSummary = TransformSummary {
        translation: Point::ORIGIN,
        rotation: 0.0,
        scale: (1.0, 1.0),
    };

    fn reset_kind(&mut self, kind: TransformKind) {
        match kind {
            TransformKind::Translate => self.translation = Point::ORIGIN,
            TransformKind::Rotate => self.rotation = 0.0,
            TransformKind::Scale => self.scale = (1.0, 1.0),
        }
    }
}

impl Default for TransformSummary {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Records transform calls and forwards them to the rasterizer.
///
/// Every mutation updates the log and summary first, then the rasterizer, so
/// that replaying [`TransformEngine::log`] from identity always reproduces the
/// rasterizer's active transform.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformEngine {
    log: TransformLog,
    summary: TransformSummary,
}

impl TransformEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self) -> &TransformLog {
        &self.log
    }

    pub fn summary(&self) -> &TransformSummary {
        &self.summary
    }

    pub fn translate<T: TransformTarget + ?Sized>(&mut self, target: &mut T, dx: i32, dy: i32) {
        // Totals wrap like the underlying i32 math; the log keeps the exact ops.
        self.summary.translation.x = self.summary.translation.x.wrapping_add(dx);
        self.summary.translation.y = self.summary.translation.y.wrapping_add(dy);
        self.log.append(TransformOp::Translate { dx, dy });
        target.translate_by(dx as f64, dy as f64);
    }

    pub fn rotate<T: TransformTarget + ?Sized>(&mut self, target: &mut T, degrees: f64) {
        self.summary.rotation += degrees;
        self.log.append(TransformOp::Rotate { degrees });
        target.rotate_by(degrees);
    }

    pub fn scale<T: TransformTarget + ?Sized>(&mut self, target: &mut T, sx: f64, sy: f64) {
        self.summary.scale.0 *= sx;
        self.summary.scale.1 *= sy;
        self.log.append(TransformOp::Scale { sx, sy });
        target.scale_by(sx, sy);
    }

    /// Back to identity: empty log, identity summary, identity rasterizer.
    pub fn reset_all<T: TransformTarget + ?Sized>(&mut self, target: &mut T) {
        self.summary = TransformSummary::IDENTITY;
        self.log.clear();
        target.reset_transform();
    }

    /// Removes one kind of transform and rebuilds the rasterizer from the rest.
    ///
    /// Linear in the log length: the rasterizer has no undo, so it is reset
    /// and the remaining ops are replayed.
    pub fn reset_kind<T: TransformTarget + ?Sized>(&mut self, target: &mut T, kind: TransformKind) {
        self.log.remove_all_of_kind(kind);
        self.summary.reset_kind(kind);
        trace!("Reset {:?}, replaying {} ops", kind, self.log.len());
        self.restore(target);
    }

    /// Resets the rasterizer and replays this engine's log onto it.
    pub fn restore<T: TransformTarget + ?Sized>(&self, target: &mut T) {
        target.reset_transform();
        self.log.replay(target);
    }

    /// See [`TransformLog::map_device_to_logical`].
    pub fn map_device_to_logical(&self, device: Point) -> Result<Point, DrawError> {
        self.log.map_device_to_logical(device)
    }
}
