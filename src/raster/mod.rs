//! Rasterizer capability set consumed by the canvas.
//!
//! The canvas never touches pixels. It sequences calls on a [`Rasterizer`]:
//! incremental transform updates through [`TransformTarget`] and one-to-one
//! draw/fill primitives. Two implementations ship with the crate:
//! - [`CairoRasterizer`]: paints into a Cairo ARGB32 image surface
//! - [`RecordingRasterizer`]: headless, records every call for inspection

pub mod cairo_backend;
pub mod recording;

pub use cairo_backend::CairoRasterizer;
pub use recording::{RasterCall, RecordedImage, RecordingRasterizer};

use crate::draw::{Color, FontDescriptor};
use crate::error::DrawError;
use crate::util::{Point, Rect};
use std::path::Path;

/// Incremental transform operations of a rasterizer.
///
/// Each call is composed in the rasterizer's current (already transformed)
/// coordinate frame. There is no way to read back or restore a previous
/// matrix; restoring state always means `reset_transform` followed by a replay.
pub trait TransformTarget {
    fn translate_by(&mut self, dx: f64, dy: f64);

    /// Rotates clockwise (y axis pointing down) by `degrees`.
    fn rotate_by(&mut self, degrees: f64);

    fn scale_by(&mut self, sx: f64, sy: f64);

    /// Back to the identity transform.
    fn reset_transform(&mut self);
}

/// Stroke parameters for outline primitives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
}

/// Drawing surface the canvas renders through.
pub trait Rasterizer: TransformTarget {
    /// Image handle accepted by [`Rasterizer::draw_image`].
    type Image;

    /// Frame buffer handed to a display surface after each cycle.
    type Frame;

    /// Replaces the frame buffer with a fresh, fully transparent one of the
    /// given size. The transform is back to identity afterwards.
    fn begin_frame(&mut self, width: i32, height: i32) -> Result<(), DrawError>;

    fn frame(&self) -> &Self::Frame;

    fn set_antialias(&mut self, enabled: bool);

    /// Paints the whole frame with `color`, ignoring the current transform.
    fn clear(&mut self, color: Color);

    /// Resets every pixel of the frame to transparent.
    fn clear_transparent(&mut self);

    fn fill_ellipse(&mut self, bounds: Rect, color: Color);
    fn stroke_ellipse(&mut self, bounds: Rect, stroke: Stroke);

    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn stroke_rect(&mut self, rect: Rect, stroke: Stroke);

    fn fill_polygon(&mut self, points: &[Point], color: Color);
    fn stroke_polygon(&mut self, points: &[Point], stroke: Stroke);

    fn line(&mut self, from: Point, to: Point, stroke: Stroke);

    /// Size of `text` laid out in `font`, in logical units.
    fn measure_text(&mut self, text: &str, font: &FontDescriptor) -> (i32, i32);

    /// Draws `text` with its top-left corner at `origin`.
    fn draw_text(&mut self, text: &str, font: &FontDescriptor, origin: Point, color: Color);

    fn image_size(&self, image: &Self::Image) -> (i32, i32);

    /// Draws `image` stretched to `bounds`.
    fn draw_image(&mut self, image: &Self::Image, bounds: Rect);

    /// Encodes the current frame as PNG at `path`.
    fn save_png(&self, path: &Path) -> Result<(), DrawError>;
}
