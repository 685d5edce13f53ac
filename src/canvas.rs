//! Immediate-mode drawing façade.
//!
//! [`Canvas`] is what a sketch draws on. It keeps the scoped style and
//! transform state, turns shape calls into anchor-adjusted rasterizer calls,
//! and maps pointer positions back into the active logical space.

use crate::config::Config;
use crate::draw::{Color, FontDescriptor};
use crate::error::DrawError;
use crate::frame_loop::{LoopControl, LoopState, frame_interval};
use crate::raster::{Rasterizer, Stroke};
use crate::state::{AnchorMode, Scope, StateStack, StyleState};
use crate::surface::PointerSource;
use crate::transform::{TransformKind, TransformLog};
use crate::util::{Point, Rect};
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Construction parameters of a [`Canvas`].
#[derive(Debug, Clone)]
pub struct CanvasOptions {
    pub width: i32,
    pub height: i32,
    pub frame_rate: i32,
    pub anti_alias: bool,
    /// Style of the primary scope, restored on every state reset.
    pub style: StyleState,
}

impl Default for CanvasOptions {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            frame_rate: 60,
            anti_alias: false,
            style: StyleState::default(),
        }
    }
}

impl From<&Config> for CanvasOptions {
    fn from(config: &Config) -> Self {
        Self {
            width: config.canvas.width,
            height: config.canvas.height,
            frame_rate: config.frame_loop.frame_rate,
            anti_alias: config.frame_loop.anti_alias,
            style: config.style_defaults(),
        }
    }
}

/// Drawing state and API handed to a sketch.
pub struct Canvas<R: Rasterizer> {
    raster: R,
    states: StateStack,
    width: i32,
    height: i32,
    frame_count: u64,
    frame_interval: Duration,
    anti_alias: bool,
    control: LoopControl,
    pointer: Option<Box<dyn PointerSource>>,
    surface_origin: Option<Point>,
}

impl<R: Rasterizer> Canvas<R> {
    pub fn new(raster: R, options: CanvasOptions) -> Self {
        Self {
            raster,
            states: StateStack::new(options.style),
            width: options.width,
            height: options.height,
            frame_count: 0,
            frame_interval: frame_interval(options.frame_rate),
            anti_alias: options.anti_alias,
            control: LoopControl::default(),
            pointer: None,
            surface_origin: None,
        }
    }

    pub fn from_config(raster: R, config: &Config) -> Self {
        Self::new(raster, CanvasOptions::from(config))
    }

    // ------------------------------------------------------------------
    // Transforms
    // ------------------------------------------------------------------

    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.states
            .current_mut()
            .transforms
            .translate(&mut self.raster, dx, dy);
    }

    /// Rotates by `degrees` around the current origin.
    pub fn rotate(&mut self, degrees: f64) {
        self.states
            .current_mut()
            .transforms
            .rotate(&mut self.raster, degrees);
    }

    pub fn scale(&mut self, sx: f64, sy: f64) {
        self.states
            .current_mut()
            .transforms
            .scale(&mut self.raster, sx, sy);
    }

    /// Uniform scale on both axes.
    pub fn zoom(&mut self, factor: f64) {
        self.scale(factor, factor);
    }

    pub fn reset_transformations(&mut self) {
        self.states
            .current_mut()
            .transforms
            .reset_all(&mut self.raster);
    }

    pub fn reset_translation(&mut self) {
        self.reset_kind(TransformKind::Translate);
    }

    pub fn reset_rotation(&mut self) {
        self.reset_kind(TransformKind::Rotate);
    }

    pub fn reset_scaling(&mut self) {
        self.reset_kind(TransformKind::Scale);
    }

    fn reset_kind(&mut self, kind: TransformKind) {
        self.states
            .current_mut()
            .transforms
            .reset_kind(&mut self.raster, kind);
    }

    /// Net translation of the current scope.
    pub fn translation(&self) -> Point {
        self.states.current().transforms.summary().translation
    }

    /// Net rotation of the current scope in degrees, not wrapped.
    pub fn rotation(&self) -> f64 {
        self.states.current().transforms.summary().rotation
    }

    /// Net scale factors of the current scope.
    pub fn scaling(&self) -> (f64, f64) {
        self.states.current().transforms.summary().scale
    }

    pub fn transform_log(&self) -> &TransformLog {
        self.states.current().transforms.log()
    }

    /// Maps a surface-local point into the current logical space.
    pub fn map_device_to_logical(&self, device: Point) -> Result<Point, DrawError> {
        self.states
            .current()
            .transforms
            .map_device_to_logical(device)
    }

    // ------------------------------------------------------------------
    // Scopes
    // ------------------------------------------------------------------

    /// Saves style and transforms; changes until the matching `pop` are undone.
    pub fn push(&mut self) {
        self.states.push();
    }

    /// Restores the state saved by the matching `push`.
    pub fn pop(&mut self) -> Result<(), DrawError> {
        self.states.pop(&mut self.raster)
    }

    /// Number of pushed scopes.
    pub fn depth(&self) -> usize {
        self.states.depth()
    }

    pub fn current_scope(&self) -> &Scope {
        self.states.current()
    }

    pub fn style(&self) -> &StyleState {
        &self.states.current().style
    }

    fn style_mut(&mut self) -> &mut StyleState {
        &mut self.states.current_mut().style
    }

    // ------------------------------------------------------------------
    // Style
    // ------------------------------------------------------------------

    /// Sets the outline color and turns outlines on.
    pub fn stroke(&mut self, color: Color) {
        let style = self.style_mut();
        style.stroke_enabled = true;
        style.stroke_color = color;
    }

    pub fn no_stroke(&mut self) {
        self.style_mut().stroke_enabled = false;
    }

    /// Sets the fill color and turns filling on.
    pub fn fill(&mut self, color: Color) {
        let style = self.style_mut();
        style.fill_enabled = true;
        style.fill_color = color;
    }

    pub fn no_fill(&mut self) {
        self.style_mut().fill_enabled = false;
    }

    pub fn stroke_weight(&mut self, weight: f64) {
        self.style_mut().stroke_weight = weight;
    }

    pub fn change_font(&mut self, family: &str, size: f64) {
        self.style_mut().font = FontDescriptor::new(family, size);
    }

    /// Stores the background color and clears the frame with it.
    pub fn background(&mut self, color: Option<Color>) {
        self.style_mut().background = color;
        self.clear();
    }

    pub fn rect_mode(&mut self, mode: AnchorMode) {
        self.style_mut().rect_mode = mode;
    }

    pub fn ellipse_mode(&mut self, mode: AnchorMode) {
        self.style_mut().ellipse_mode = mode;
    }

    pub fn set_use_absolute_position(&mut self, enabled: bool) {
        self.style_mut().use_absolute_position = enabled;
    }

    pub fn set_account_for_transformations(&mut self, enabled: bool) {
        self.style_mut().account_for_transformations = enabled;
    }

    fn current_stroke(&self) -> Option<Stroke> {
        let style = &self.states.current().style;
        style.stroke_enabled.then_some(Stroke {
            color: style.stroke_color,
            width: style.stroke_weight,
        })
    }

    fn current_fill(&self) -> Option<Color> {
        let style = &self.states.current().style;
        style.fill_enabled.then_some(style.fill_color)
    }

    // ------------------------------------------------------------------
    // Drawing
    // ------------------------------------------------------------------

    /// Clears the frame to the background color, or to transparent when the
    /// background is `None`.
    pub fn clear(&mut self) {
        match self.states.current().style.background {
            Some(color) => self.raster.clear(color),
            None => self.raster.clear_transparent(),
        }
    }

    /// One-pixel dot in the stroke color, drawn even with outlines off.
    pub fn point(&mut self, x: i32, y: i32) {
        let style = &self.states.current().style;
        let stroke = Stroke {
            color: style.stroke_color,
            width: style.stroke_weight,
        };
        self.raster.stroke_ellipse(Rect::new(x, y, 1, 1), stroke);
    }

    pub fn line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        if let Some(stroke) = self.current_stroke() {
            self.raster
                .line(Point::new(x1, y1), Point::new(x2, y2), stroke);
        }
    }

    /// Rectangle anchored according to the rect mode.
    pub fn rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
        let offset = self.states.current().style.rect_mode.offset(w, h);
        let bounds = Rect::new(x, y, w, h).offset(offset);
        if let Some(color) = self.current_fill() {
            self.raster.fill_rect(bounds, color);
        }
        if let Some(stroke) = self.current_stroke() {
            self.raster.stroke_rect(bounds, stroke);
        }
    }

    pub fn square(&mut self, x: i32, y: i32, side: i32) {
        self.rect(x, y, side, side);
    }

    /// Ellipse inscribed in a `w` x `h` box anchored according to the ellipse mode.
    pub fn ellipse(&mut self, x: i32, y: i32, w: i32, h: i32) {
        let offset = self.states.current().style.ellipse_mode.offset(w, h);
        let bounds = Rect::new(x, y, w, h).offset(offset);
        if let Some(color) = self.current_fill() {
            self.raster.fill_ellipse(bounds, color);
        }
        if let Some(stroke) = self.current_stroke() {
            self.raster.stroke_ellipse(bounds, stroke);
        }
    }

    pub fn circle(&mut self, x: i32, y: i32, radius: i32) {
        let diameter = radius.saturating_mul(2);
        self.ellipse(x, y, diameter, diameter);
    }

    pub fn triangle(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, x3: i32, y3: i32) {
        self.polygon(&[
            Point::new(x1, y1),
            Point::new(x2, y2),
            Point::new(x3, y3),
        ]);
    }

    pub fn polygon(&mut self, points: &[Point]) {
        if let Some(color) = self.current_fill() {
            self.raster.fill_polygon(points, color);
        }
        if let Some(stroke) = self.current_stroke() {
            self.raster.stroke_polygon(points, stroke);
        }
    }

    /// Text in the fill color; the rect mode decides whether `(x, y)` is the
    /// top-left corner or the center of the measured text box.
    pub fn text(&mut self, text: &str, x: i32, y: i32) {
        let style = &self.states.current().style;
        let font = style.font.clone();
        let color = style.fill_color;
        let mode = style.rect_mode;

        let (w, h) = self.raster.measure_text(text, &font);
        let (kx, ky) = mode.offset(w, h);
        let origin = Point::new(x.wrapping_add(kx), y.wrapping_add(ky));
        self.raster.draw_text(text, &font, origin, color);
    }

    /// Image at its natural size, anchored according to the rect mode.
    pub fn image(&mut self, image: &R::Image, x: i32, y: i32) {
        let (w, h) = self.raster.image_size(image);
        self.image_sized(image, x, y, w, h);
    }

    /// Image stretched to `w` x `h`, anchored according to the rect mode.
    pub fn image_sized(&mut self, image: &R::Image, x: i32, y: i32, w: i32, h: i32) {
        let offset = self.states.current().style.rect_mode.offset(w, h);
        self.raster
            .draw_image(image, Rect::new(x, y, w, h).offset(offset));
    }

    /// Writes the current frame as PNG. Without a name (or with an empty
    /// one) the file is `<frame_count>.PNG` in the working directory.
    pub fn save(&self, path: Option<&Path>) -> Result<PathBuf, DrawError> {
        let path = match path {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from(format!("{}.PNG", self.frame_count)),
        };
        self.raster.save_png(&path)?;
        info!("Saved frame {} to {}", self.frame_count, path.display());
        Ok(path)
    }

    // ------------------------------------------------------------------
    // Pointer
    // ------------------------------------------------------------------

    pub fn attach_pointer(&mut self, pointer: Box<dyn PointerSource>) {
        self.pointer = Some(pointer);
    }

    pub(crate) fn set_surface_origin(&mut self, origin: Option<Point>) {
        self.surface_origin = origin;
    }

    /// Pointer position as the sketch should see it.
    ///
    /// `(0, 0)` without a pointer source. With `use_absolute_position` the raw
    /// screen position; otherwise window-relative, then surface-relative when
    /// a surface is attached, then mapped through the active transforms when
    /// `account_for_transformations` is on.
    pub fn mouse_pos(&self) -> Result<Point, DrawError> {
        let Some(pointer) = self.pointer.as_ref() else {
            return Ok(Point::ORIGIN);
        };

        let scope = self.states.current();
        let absolute = pointer.screen_position();
        if scope.style.use_absolute_position {
            return Ok(absolute);
        }

        let mut local = absolute.relative_to(pointer.window_origin());
        if let Some(origin) = self.surface_origin {
            local = local.relative_to(origin);
        }

        if scope.style.account_for_transformations {
            local = scope.transforms.map_device_to_logical(local)?;
        }
        Ok(local)
    }

    // ------------------------------------------------------------------
    // Loop
    // ------------------------------------------------------------------

    /// Sets the cycle interval to `1000 / fps` ms (at least 1 ms). Only
    /// honored when called before the loop starts, i.e. from `setup`.
    pub fn frame_rate(&mut self, fps: i32) {
        self.frame_interval = frame_interval(fps);
        debug!("Frame interval set to {:?}", self.frame_interval);
    }

    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    pub fn toggle_anti_alias(&mut self) {
        self.anti_alias = !self.anti_alias;
    }

    pub fn anti_alias(&self) -> bool {
        self.anti_alias
    }

    pub fn pause(&mut self) {
        self.control.pause();
    }

    pub fn unpause(&mut self) {
        self.control.unpause();
    }

    /// Stops the loop once the current cycle returns.
    pub fn quit(&mut self) {
        self.control.quit();
    }

    pub fn loop_state(&self) -> LoopState {
        self.control.state()
    }

    pub(crate) fn loop_control_mut(&mut self) -> &mut LoopControl {
        &mut self.control
    }

    /// Cycles started so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn rasterizer(&self) -> &R {
        &self.raster
    }

    pub fn rasterizer_mut(&mut self) -> &mut R {
        &mut self.raster
    }

    pub fn into_rasterizer(self) -> R {
        self.raster
    }

    /// Start of a cycle: the current scope's transforms go back to identity,
    /// the frame buffer is optionally replaced, and the frame counter advances.
    pub(crate) fn begin_cycle(&mut self, fresh_frame: bool) -> Result<(), DrawError> {
        self.states
            .current_mut()
            .transforms
            .reset_all(&mut self.raster);
        self.frame_count += 1;

        let result = if fresh_frame {
            self.raster.begin_frame(self.width, self.height)
        } else {
            Ok(())
        };
        self.raster.set_antialias(self.anti_alias);
        result
    }

    /// Drops every pushed scope and rebuilds the primary scope from defaults.
    pub(crate) fn reset_state(&mut self) {
        self.states.reset(&mut self.raster);
    }
}
