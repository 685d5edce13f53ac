//! Primary scope plus a stack of pushed scopes.

use super::style::StyleState;
use crate::error::DrawError;
use crate::raster::TransformTarget;
use crate::transform::TransformEngine;
use log::{debug, warn};

/// One nesting level: transforms plus style.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scope {
    pub transforms: TransformEngine,
    pub style: StyleState,
}

impl Scope {
    pub fn with_style(style: StyleState) -> Self {
        Self {
            transforms: TransformEngine::new(),
            style,
        }
    }
}

/// Owns every scope. The current scope is the top of the stack, or the
/// primary scope when nothing is pushed.
#[derive(Debug, Clone)]
pub struct StateStack {
    primary: Scope,
    pushed: Vec<Scope>,
    defaults: StyleState,
}

impl StateStack {
    pub fn new(defaults: StyleState) -> Self {
        Self {
            primary: Scope::with_style(defaults.clone()),
            pushed: Vec::new(),
            defaults,
        }
    }

    pub fn current(&self) -> &Scope {
        self.pushed.last().unwrap_or(&self.primary)
    }

    pub fn current_mut(&mut self) -> &mut Scope {
        self.pushed.last_mut().unwrap_or(&mut self.primary)
    }

    pub fn primary(&self) -> &Scope {
        &self.primary
    }

    /// Number of pushed scopes.
    pub fn depth(&self) -> usize {
        self.pushed.len()
    }

    /// Style a freshly reset primary scope starts with.
    pub fn defaults(&self) -> &StyleState {
        &self.defaults
    }

    /// Pushes an independent copy of the current scope.
    pub fn push(&mut self) {
        let copy = self.current().clone();
        self.pushed.push(copy);
        debug!("push: depth {}", self.pushed.len());
    }

    /// Discards the top scope and rebuilds the rasterizer transform from the
    /// scope that becomes current.
    ///
    /// With nothing pushed this reports [`DrawError::StackUnderflow`] and
    /// leaves the primary scope and the rasterizer untouched.
    pub fn pop<T: TransformTarget + ?Sized>(&mut self, target: &mut T) -> Result<(), DrawError> {
        if self.pushed.pop().is_none() {
            warn!("pop() without matching push()");
            return Err(DrawError::StackUnderflow);
        }

        self.current().transforms.restore(target);
        debug!("pop: depth {}", self.pushed.len());
        Ok(())
    }

    /// Drops every pushed scope and rebuilds the primary scope from defaults.
    pub fn reset<T: TransformTarget + ?Sized>(&mut self, target: &mut T) {
        self.pushed.clear();
        self.primary = Scope::with_style(self.defaults.clone());
        target.reset_transform();
    }
}

impl Default for StateStack {
    fn default() -> Self {
        Self::new(StyleState::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{BLUE, RED};
    use crate::raster::RecordingRasterizer;
    use crate::raster::recording::matrices_close;
    use crate::state::AnchorMode;
    use crate::util::Point;

    #[test]
    fn current_falls_back_to_primary() {
        let mut stack = StateStack::default();
        assert_eq!(stack.depth(), 0);
        stack.current_mut().style.fill_color = RED;
        assert_eq!(stack.primary().style.fill_color, RED);
    }

    #[test]
    fn pushed_scope_is_independent() {
        let mut raster = RecordingRasterizer::new(10, 10);
        let mut stack = StateStack::default();
        stack
            .current_mut()
            .transforms
            .translate(&mut raster, 4, 4);

        stack.push();
        stack.current_mut().transforms.rotate(&mut raster, 45.0);
        stack.current_mut().style.stroke_color = BLUE;
        stack.current_mut().style.rect_mode = AnchorMode::Center;

        assert_eq!(stack.primary().transforms.log().len(), 1);
        assert_eq!(stack.current().transforms.log().len(), 2);
        assert_eq!(stack.primary().style, StyleState::default());
    }

    #[test]
    fn pop_restores_and_replays() {
        let mut raster = RecordingRasterizer::new(10, 10);
        let mut stack = StateStack::default();
        stack
            .current_mut()
            .transforms
            .translate(&mut raster, 10, 20);
        let before = stack.current().clone();
        let matrix_before = raster.matrix();

        stack.push();
        stack.current_mut().transforms.scale(&mut raster, 3.0, 3.0);
        stack.current_mut().style.fill_enabled = false;
        stack.pop(&mut raster).unwrap();

        assert_eq!(*stack.current(), before);
        assert!(matrices_close(&raster.matrix(), &matrix_before, 1e-12));
        assert_eq!(
            stack
                .current()
                .transforms
                .map_device_to_logical(Point::new(10, 20))
                .unwrap(),
            Point::ORIGIN
        );
    }

    #[test]
    fn nested_scopes_unwind_in_reverse() {
        let mut raster = RecordingRasterizer::new(10, 10);
        let mut stack = StateStack::default();
        let mut snapshots = Vec::new();

        for depth in 0..4 {
            snapshots.push((stack.current().clone(), raster.matrix()));
            stack.push();
            let scope = stack.current_mut();
            scope.transforms.translate(&mut raster, depth, depth * 2);
            scope.transforms.rotate(&mut raster, 15.0 * depth as f64);
            scope.style.stroke_weight = depth as f64 + 2.0;
        }

        while let Some((scope, matrix)) = snapshots.pop() {
            stack.pop(&mut raster).unwrap();
            assert_eq!(*stack.current(), scope);
            assert!(matrices_close(&raster.matrix(), &matrix, 1e-9));
        }
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn pop_on_empty_stack_leaves_primary_alone() {
        let mut raster = RecordingRasterizer::new(10, 10);
        let mut stack = StateStack::default();
        stack.current_mut().transforms.rotate(&mut raster, 90.0);
        stack.current_mut().style.fill_color = RED;
        let before = stack.current().clone();
        let calls_before = raster.calls().len();

        assert!(matches!(
            stack.pop(&mut raster),
            Err(DrawError::StackUnderflow)
        ));
        assert_eq!(*stack.current(), before);
        assert_eq!(raster.calls().len(), calls_before);
    }

    #[test]
    fn reset_rebuilds_primary_from_defaults() {
        let mut raster = RecordingRasterizer::new(10, 10);
        let defaults = StyleState {
            fill_color: BLUE,
            ..StyleState::default()
        };
        let mut stack = StateStack::new(defaults.clone());
        stack.current_mut().style.fill_color = RED;
        stack.current_mut().transforms.translate(&mut raster, 1, 1);
        stack.push();
        stack.push();

        stack.reset(&mut raster);

        assert_eq!(stack.depth(), 0);
        assert_eq!(stack.current().style, defaults);
        assert!(stack.current().transforms.log().is_empty());
    }
}
