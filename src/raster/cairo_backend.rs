//! Cairo-based rasterizer painting into an in-memory ARGB32 surface.

use super::{Rasterizer, Stroke, TransformTarget};
use crate::draw::{Color, FontDescriptor};
use crate::error::DrawError;
use crate::util::{Point, Rect};
use cairo::{Antialias, Context, Format, ImageSurface, Operator};
use log::{debug, warn};
use std::fs::File;
use std::path::Path;

/// Rasterizer backed by a Cairo [`ImageSurface`].
///
/// The surface is the frame buffer; replacing it with [`Rasterizer::begin_frame`]
/// drops the previous one.
pub struct CairoRasterizer {
    surface: ImageSurface,
    ctx: Context,
}

impl CairoRasterizer {
    /// Creates a rasterizer with a transparent `width` x `height` frame.
    pub fn new(width: i32, height: i32) -> Result<Self, DrawError> {
        let (surface, ctx) = create_frame(width, height)?;
        Ok(Self { surface, ctx })
    }

    /// Cairo context currently drawing into the frame.
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    /// Releases the drawing context and hands back the frame buffer, so its
    /// pixel data can be borrowed exclusively.
    pub fn into_surface(self) -> ImageSurface {
        let Self { surface, ctx } = self;
        drop(ctx);
        surface
    }

    /// Loads a PNG file into an image usable with [`Rasterizer::draw_image`].
    pub fn load_png(path: &Path) -> Result<ImageSurface, DrawError> {
        let mut file = File::open(path)?;
        Ok(ImageSurface::create_from_png(&mut file)?)
    }

    fn set_source(&self, color: Color) {
        self.ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    }

    fn apply_stroke(&self, stroke: Stroke) {
        self.set_source(stroke.color);
        self.ctx.set_line_width(stroke.width);
    }

    /// Builds an ellipse path inscribed in `bounds` using Cairo's arc with scaling.
    fn ellipse_path(&self, bounds: Rect) -> bool {
        let bounds = bounds.normalized();
        if bounds.width == 0 || bounds.height == 0 {
            return false;
        }

        let rx = bounds.width as f64 / 2.0;
        let ry = bounds.height as f64 / 2.0;

        self.ctx.save().ok();
        self.ctx.translate(bounds.x as f64 + rx, bounds.y as f64 + ry);
        self.ctx.scale(rx, ry);
        self.ctx.new_path();
        self.ctx.arc(0.0, 0.0, 1.0, 0.0, 2.0 * std::f64::consts::PI);
        self.ctx.restore().ok();
        true
    }

    fn rect_path(&self, rect: Rect) {
        let rect = rect.normalized();
        self.ctx.new_path();
        self.ctx.rectangle(
            rect.x as f64,
            rect.y as f64,
            rect.width as f64,
            rect.height as f64,
        );
    }

    fn polygon_path(&self, points: &[Point]) -> bool {
        let Some((first, rest)) = points.split_first() else {
            return false;
        };

        self.ctx.new_path();
        self.ctx.move_to(first.x as f64, first.y as f64);
        for p in rest {
            self.ctx.line_to(p.x as f64, p.y as f64);
        }
        self.ctx.close_path();
        true
    }

    fn layout(&self, text: &str, font: &FontDescriptor) -> pango::Layout {
        let layout = pangocairo::functions::create_layout(&self.ctx);
        let font_desc = pango::FontDescription::from_string(&font.to_pango_string());
        layout.set_font_description(Some(&font_desc));
        layout.set_text(text);
        layout
    }

    /// Fresh context on the same surface, keeping the antialias setting.
    fn rebuild_context(&mut self) {
        let antialias = self.ctx.antialias();
        match Context::new(&self.surface) {
            Ok(ctx) => {
                ctx.set_antialias(antialias);
                self.ctx = ctx;
            }
            Err(err) => warn!("Failed to rebuild Cairo context: {}", err),
        }
    }

    /// Paints the whole surface with `operator`, bypassing the transform.
    fn paint_untransformed(&self, operator: Operator) {
        self.ctx.save().ok();
        self.ctx.identity_matrix();
        self.ctx.set_operator(operator);
        let _ = self.ctx.paint();
        self.ctx.restore().ok();
    }
}

fn create_frame(width: i32, height: i32) -> Result<(ImageSurface, Context), DrawError> {
    let surface = ImageSurface::create(Format::ARgb32, width.max(1), height.max(1))?;
    let ctx = Context::new(&surface)?;
    Ok((surface, ctx))
}

impl TransformTarget for CairoRasterizer {
    fn translate_by(&mut self, dx: f64, dy: f64) {
        self.ctx.translate(dx, dy);
    }

    fn rotate_by(&mut self, degrees: f64) {
        self.ctx.rotate(degrees.to_radians());
    }

    fn scale_by(&mut self, sx: f64, sy: f64) {
        self.ctx.scale(sx, sy);
    }

    /// Back to identity. A zero scale leaves the context in Cairo's sticky
    /// invalid-matrix state, so a failed context is replaced first.
    fn reset_transform(&mut self) {
        if let Err(err) = self.ctx.status() {
            debug!("Rebuilding Cairo context after {:?}", err);
            self.rebuild_context();
        }
        self.ctx.identity_matrix();
    }
}

impl Rasterizer for CairoRasterizer {
    type Image = ImageSurface;
    type Frame = ImageSurface;

    fn begin_frame(&mut self, width: i32, height: i32) -> Result<(), DrawError> {
        let antialias = self.ctx.antialias();
        let (surface, ctx) = create_frame(width, height)?;
        ctx.set_antialias(antialias);
        self.ctx = ctx;
        self.surface = surface;
        debug!("New {}x{} frame buffer", width, height);
        Ok(())
    }

    fn frame(&self) -> &ImageSurface {
        &self.surface
    }

    fn set_antialias(&mut self, enabled: bool) {
        self.ctx.set_antialias(if enabled {
            Antialias::Default
        } else {
            Antialias::None
        });
    }

    fn clear(&mut self, color: Color) {
        self.set_source(color);
        self.paint_untransformed(Operator::Source);
    }

    fn clear_transparent(&mut self) {
        self.paint_untransformed(Operator::Clear);
    }

    fn fill_ellipse(&mut self, bounds: Rect, color: Color) {
        if self.ellipse_path(bounds) {
            self.set_source(color);
            let _ = self.ctx.fill();
        }
    }

    fn stroke_ellipse(&mut self, bounds: Rect, stroke: Stroke) {
        if self.ellipse_path(bounds) {
            self.apply_stroke(stroke);
            let _ = self.ctx.stroke();
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.rect_path(rect);
        self.set_source(color);
        let _ = self.ctx.fill();
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: Stroke) {
        self.rect_path(rect);
        self.apply_stroke(stroke);
        self.ctx.set_line_join(cairo::LineJoin::Miter);
        let _ = self.ctx.stroke();
    }

    fn fill_polygon(&mut self, points: &[Point], color: Color) {
        if self.polygon_path(points) {
            self.set_source(color);
            let _ = self.ctx.fill();
        }
    }

    fn stroke_polygon(&mut self, points: &[Point], stroke: Stroke) {
        if self.polygon_path(points) {
            self.apply_stroke(stroke);
            self.ctx.set_line_join(cairo::LineJoin::Miter);
            let _ = self.ctx.stroke();
        }
    }

    fn line(&mut self, from: Point, to: Point, stroke: Stroke) {
        self.apply_stroke(stroke);
        self.ctx.set_line_cap(cairo::LineCap::Butt);

        self.ctx.new_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        let _ = self.ctx.stroke();
    }

    fn measure_text(&mut self, text: &str, font: &FontDescriptor) -> (i32, i32) {
        self.layout(text, font).pixel_size()
    }

    fn draw_text(&mut self, text: &str, font: &FontDescriptor, origin: Point, color: Color) {
        let layout = self.layout(text, font);
        self.ctx.new_path();
        self.ctx.move_to(origin.x as f64, origin.y as f64);
        self.set_source(color);
        pangocairo::functions::show_layout(&self.ctx, &layout);
    }

    fn image_size(&self, image: &ImageSurface) -> (i32, i32) {
        (image.width(), image.height())
    }

    fn draw_image(&mut self, image: &ImageSurface, bounds: Rect) {
        let (w, h) = self.image_size(image);
        if w == 0 || h == 0 || bounds.width == 0 || bounds.height == 0 {
            return;
        }

        self.ctx.save().ok();
        self.ctx.translate(bounds.x as f64, bounds.y as f64);
        self.ctx
            .scale(bounds.width as f64 / w as f64, bounds.height as f64 / h as f64);
        if self.ctx.set_source_surface(image, 0.0, 0.0).is_ok() {
            let _ = self.ctx.paint();
        }
        self.ctx.restore().ok();
    }

    fn save_png(&self, path: &Path) -> Result<(), DrawError> {
        let mut file = File::create(path)?;
        self.surface.write_to_png(&mut file)?;
        Ok(())
    }
}
