//! Ordered record of the transforms applied in one scope.

use super::op::{TransformKind, TransformOp};
use crate::error::DrawError;
use crate::raster::TransformTarget;
use crate::util::Point;

/// Append-only (until cleared) sequence of [`TransformOp`]s.
///
/// Insertion order is application order. Replaying the log on a rasterizer at
/// identity reproduces the transform the ops originally built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformLog {
    ops: Vec<TransformOp>,
}

impl TransformLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, op: TransformOp) {
        self.ops.push(op);
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }

    /// Drops every op of `kind`, keeping the others in their relative order.
    pub fn remove_all_of_kind(&mut self, kind: TransformKind) {
        self.ops.retain(|op| op.kind() != kind);
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TransformOp> {
        self.ops.iter()
    }

    pub fn as_slice(&self) -> &[TransformOp] {
        &self.ops
    }

    /// Applies every op in order. The target is expected to be at identity.
    pub fn replay<T: TransformTarget + ?Sized>(&self, target: &mut T) {
        for op in &self.ops {
            op.apply(target);
        }
    }

    /// Maps a device-space point back into the logical space the log builds.
    ///
    /// Each op was composed inside the frame produced by the ops before it, so
    /// a logical point reaches the device through the newest op first and the
    /// oldest op last. Undoing that means peeling the oldest op off first:
    /// the walk goes through the log in recorded order, applying inverses.
    /// The result is rounded half away from zero.
    ///
    /// Fails with [`DrawError::DegenerateScale`] when a zero scale factor is met.
    pub fn map_device_to_logical(&self, device: Point) -> Result<Point, DrawError> {
        let mut current = (device.x as f64, device.y as f64);
        for op in &self.ops {
            current = op.invert_point(current)?;
        }
        Ok(Point::new(
            current.0.round() as i32,
            current.1.round() as i32,
        ))
    }

    /// Forward-applies the log to a logical point, giving its device position.
    pub fn map_logical_to_device(&self, logical: Point) -> (f64, f64) {
        self.ops
            .iter()
            .rev()
            .fold((logical.x as f64, logical.y as f64), |p, op| {
                op.forward_point(p)
            })
    }
}

impl<'a> IntoIterator for &'a TransformLog {
    type Item = &'a TransformOp;
    type IntoIter = std::slice::Iter<'a, TransformOp>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}

impl FromIterator<TransformOp> for TransformLog {
    fn from_iter<I: IntoIterator<Item = TransformOp>>(iter: I) -> Self {
        Self {
            ops: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::RecordingRasterizer;

    fn log_of(ops: &[TransformOp]) -> TransformLog {
        ops.iter().copied().collect()
    }

    #[test]
    fn remove_kind_preserves_order() {
        let mut log = log_of(&[
            TransformOp::Translate { dx: 5, dy: 0 },
            TransformOp::Rotate { degrees: 90.0 },
            TransformOp::Scale { sx: 2.0, sy: 2.0 },
            TransformOp::Rotate { degrees: 10.0 },
            TransformOp::Translate { dx: 1, dy: 1 },
        ]);
        log.remove_all_of_kind(TransformKind::Rotate);
        assert_eq!(
            log.as_slice(),
            &[
                TransformOp::Translate { dx: 5, dy: 0 },
                TransformOp::Scale { sx: 2.0, sy: 2.0 },
                TransformOp::Translate { dx: 1, dy: 1 },
            ]
        );
    }

    #[test]
    fn translate_then_rotate_maps_back_to_origin() {
        let log = log_of(&[
            TransformOp::Translate { dx: 10, dy: 20 },
            TransformOp::Rotate { degrees: 90.0 },
        ]);
        let device = log.map_logical_to_device(Point::ORIGIN);
        assert!((device.0 - 10.0).abs() < 1e-9 && (device.1 - 20.0).abs() < 1e-9);
        assert_eq!(
            log.map_device_to_logical(Point::new(10, 20)).unwrap(),
            Point::ORIGIN
        );
    }

    #[test]
    fn forward_map_agrees_with_rasterizer_matrix() {
        let log = log_of(&[
            TransformOp::Scale { sx: 2.0, sy: 0.5 },
            TransformOp::Translate { dx: 7, dy: -3 },
            TransformOp::Rotate { degrees: 30.0 },
            TransformOp::Translate { dx: 4, dy: 9 },
        ]);
        let mut raster = RecordingRasterizer::new(100, 100);
        log.replay(&mut raster);

        let p = Point::new(11, -6);
        let expected = raster.matrix().transform_point(11.0, -6.0);
        let actual = log.map_logical_to_device(p);
        assert!((expected.0 - actual.0).abs() < 1e-9);
        assert!((expected.1 - actual.1).abs() < 1e-9);
    }

    #[test]
    fn round_trip_recovers_logical_point() {
        let log = log_of(&[
            TransformOp::Translate { dx: 200, dy: 150 },
            TransformOp::Rotate { degrees: -45.0 },
            TransformOp::Scale { sx: 1.5, sy: 3.0 },
            TransformOp::Rotate { degrees: 400.0 },
            TransformOp::Translate { dx: -12, dy: 8 },
        ]);
        for &(x, y) in &[(0, 0), (17, -33), (-250, 90), (1000, 1000)] {
            let (dx, dy) = log.map_logical_to_device(Point::new(x, y));
            let device = Point::new(dx.round() as i32, dy.round() as i32);
            let back = log.map_device_to_logical(device).unwrap();
            assert!(
                (back.x - x).abs() <= 1 && (back.y - y).abs() <= 1,
                "({x}, {y}) came back as {back:?}"
            );
        }
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        let log = log_of(&[TransformOp::Scale { sx: 2.0, sy: 2.0 }]);
        assert_eq!(
            log.map_device_to_logical(Point::new(5, -5)).unwrap(),
            Point::new(3, -3)
        );
    }

    #[test]
    fn degenerate_scale_is_reported_on_inversion() {
        let log = log_of(&[
            TransformOp::Translate { dx: 1, dy: 1 },
            TransformOp::Scale { sx: 0.0, sy: 1.0 },
        ]);
        assert!(matches!(
            log.map_device_to_logical(Point::new(3, 3)),
            Err(DrawError::DegenerateScale { sx, .. }) if sx == 0.0
        ));
    }

    #[test]
    fn empty_log_is_identity() {
        let log = TransformLog::new();
        assert_eq!(
            log.map_device_to_logical(Point::new(-4, 9)).unwrap(),
            Point::new(-4, 9)
        );
    }
}
