//! Headless rasterizer that records the calls it receives.
//!
//! Used when only the frame size is known (no pixels wanted) and by tests that
//! need to see exactly what the canvas asked the rasterizer to do. The current
//! transform is tracked as a [`cairo::Matrix`], composed the same way a Cairo
//! context composes it, so replays can be compared against it.

use super::{Rasterizer, Stroke, TransformTarget};
use crate::draw::{Color, FontDescriptor};
use crate::error::DrawError;
use crate::util::{Point, Rect};
use cairo::Matrix;
use std::fs::File;
use std::path::Path;

/// One call made on a [`RecordingRasterizer`].
#[derive(Debug, Clone, PartialEq)]
pub enum RasterCall {
    Translate { dx: f64, dy: f64 },
    Rotate { degrees: f64 },
    Scale { sx: f64, sy: f64 },
    ResetTransform,
    SetAntialias(bool),
    Clear(Color),
    ClearTransparent,
    FillEllipse(Rect, Color),
    StrokeEllipse(Rect, Stroke),
    FillRect(Rect, Color),
    StrokeRect(Rect, Stroke),
    FillPolygon(Vec<Point>, Color),
    StrokePolygon(Vec<Point>, Stroke),
    Line { from: Point, to: Point, stroke: Stroke },
    Text { text: String, origin: Point, font: FontDescriptor, color: Color },
    Image { bounds: Rect },
}

impl RasterCall {
    /// True for the four transform calls.
    pub fn is_transform(&self) -> bool {
        matches!(
            self,
            RasterCall::Translate { .. }
                | RasterCall::Rotate { .. }
                | RasterCall::Scale { .. }
                | RasterCall::ResetTransform
        )
    }
}

/// Component-wise comparison of two matrices within `eps`.
pub fn matrices_close(a: &Matrix, b: &Matrix, eps: f64) -> bool {
    [
        a.xx() - b.xx(),
        a.yx() - b.yx(),
        a.xy() - b.xy(),
        a.yy() - b.yy(),
        a.x0() - b.x0(),
        a.y0() - b.y0(),
    ]
    .iter()
    .all(|d| d.abs() <= eps)
}

/// Size handle standing in for an image when nothing is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordedImage {
    pub width: i32,
    pub height: i32,
}

/// Rasterizer that paints nothing and keeps a log of every call.
#[derive(Debug)]
pub struct RecordingRasterizer {
    width: i32,
    height: i32,
    calls: Vec<RasterCall>,
    matrix: Matrix,
    antialias: bool,
    frames_started: u64,
}

impl RecordingRasterizer {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            calls: Vec::new(),
            matrix: Matrix::identity(),
            antialias: false,
            frames_started: 0,
        }
    }

    /// Calls recorded since the current frame began.
    pub fn calls(&self) -> &[RasterCall] {
        &self.calls
    }

    /// Recorded calls, skipping transform updates.
    pub fn draw_calls(&self) -> Vec<&RasterCall> {
        self.calls.iter().filter(|c| !c.is_transform()).collect()
    }

    pub fn take_calls(&mut self) -> Vec<RasterCall> {
        std::mem::take(&mut self.calls)
    }

    /// Transform currently active, as the accumulated matrix.
    pub fn matrix(&self) -> Matrix {
        self.matrix
    }

    pub fn antialias(&self) -> bool {
        self.antialias
    }

    /// Number of times a fresh frame buffer was requested.
    pub fn frames_started(&self) -> u64 {
        self.frames_started
    }

    pub fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }
}

impl TransformTarget for RecordingRasterizer {
    fn translate_by(&mut self, dx: f64, dy: f64) {
        self.matrix.translate(dx, dy);
        self.calls.push(RasterCall::Translate { dx, dy });
    }

    fn rotate_by(&mut self, degrees: f64) {
        self.matrix.rotate(degrees.to_radians());
        self.calls.push(RasterCall::Rotate { degrees });
    }

    fn scale_by(&mut self, sx: f64, sy: f64) {
        self.matrix.scale(sx, sy);
        self.calls.push(RasterCall::Scale { sx, sy });
    }

    fn reset_transform(&mut self) {
        self.matrix = Matrix::identity();
        self.calls.push(RasterCall::ResetTransform);
    }
}

impl Rasterizer for RecordingRasterizer {
    type Image = RecordedImage;
    type Frame = Vec<RasterCall>;

    fn begin_frame(&mut self, width: i32, height: i32) -> Result<(), DrawError> {
        self.width = width;
        self.height = height;
        self.calls.clear();
        self.matrix = Matrix::identity();
        self.frames_started += 1;
        Ok(())
    }

    fn frame(&self) -> &Vec<RasterCall> {
        &self.calls
    }

    fn set_antialias(&mut self, enabled: bool) {
        self.antialias = enabled;
        self.calls.push(RasterCall::SetAntialias(enabled));
    }

    fn clear(&mut self, color: Color) {
        self.calls.push(RasterCall::Clear(color));
    }

    fn clear_transparent(&mut self) {
        self.calls.push(RasterCall::ClearTransparent);
    }

    fn fill_ellipse(&mut self, bounds: Rect, color: Color) {
        self.calls.push(RasterCall::FillEllipse(bounds, color));
    }

    fn stroke_ellipse(&mut self, bounds: Rect, stroke: Stroke) {
        self.calls.push(RasterCall::StrokeEllipse(bounds, stroke));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.calls.push(RasterCall::FillRect(rect, color));
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: Stroke) {
        self.calls.push(RasterCall::StrokeRect(rect, stroke));
    }

    fn fill_polygon(&mut self, points: &[Point], color: Color) {
        self.calls.push(RasterCall::FillPolygon(points.to_vec(), color));
    }

    fn stroke_polygon(&mut self, points: &[Point], stroke: Stroke) {
        self.calls
            .push(RasterCall::StrokePolygon(points.to_vec(), stroke));
    }

    fn line(&mut self, from: Point, to: Point, stroke: Stroke) {
        self.calls.push(RasterCall::Line { from, to, stroke });
    }

    /// Fixed-pitch estimate: half an em per character, one em tall.
    fn measure_text(&mut self, text: &str, font: &FontDescriptor) -> (i32, i32) {
        let chars = text.chars().count() as f64;
        (
            (chars * font.size * 0.5).round() as i32,
            font.size.ceil() as i32,
        )
    }

    fn draw_text(&mut self, text: &str, font: &FontDescriptor, origin: Point, color: Color) {
        self.calls.push(RasterCall::Text {
            text: text.to_string(),
            origin,
            font: font.clone(),
            color,
        });
    }

    fn image_size(&self, image: &RecordedImage) -> (i32, i32) {
        (image.width, image.height)
    }

    fn draw_image(&mut self, _image: &RecordedImage, bounds: Rect) {
        self.calls.push(RasterCall::Image { bounds });
    }

    /// Writes a blank PNG of the frame size; there are no pixels to encode.
    fn save_png(&self, path: &Path) -> Result<(), DrawError> {
        let surface =
            cairo::ImageSurface::create(cairo::Format::ARgb32, self.width.max(1), self.height.max(1))?;
        let mut file = File::create(path)?;
        surface.write_to_png(&mut file)?;
        Ok(())
    }
}
