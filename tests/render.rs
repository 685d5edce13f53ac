use cairo::ImageSurface;
use sketchloop::draw::{BLUE, Color, RED, WHITE};
use sketchloop::{
    AnchorMode, CairoRasterizer, Canvas, CanvasOptions, DisplaySurface, FrameController, Point,
    Rasterizer, TickOutcome,
};
use std::cell::RefCell;
use std::rc::Rc;

type CairoCanvas = Canvas<CairoRasterizer>;

fn cairo_canvas(width: i32, height: i32) -> CairoCanvas {
    let raster = CairoRasterizer::new(width, height).unwrap();
    Canvas::new(
        raster,
        CanvasOptions {
            width,
            height,
            ..CanvasOptions::default()
        },
    )
}

/// Pixel as (r, g, b, a), un-premultiplied for opaque pixels.
fn pixel(surface: &mut ImageSurface, x: i32, y: i32) -> (u8, u8, u8, u8) {
    let stride = surface.stride() as usize;
    let data = surface.data().unwrap();
    let i = y as usize * stride + x as usize * 4;
    // ARGB32 is stored native-endian; on little-endian hosts that is B, G, R, A.
    let word = u32::from_ne_bytes([data[i], data[i + 1], data[i + 2], data[i + 3]]);
    (
        (word >> 16) as u8,
        (word >> 8) as u8,
        word as u8,
        (word >> 24) as u8,
    )
}

fn finish(canvas: CairoCanvas) -> ImageSurface {
    canvas.into_rasterizer().into_surface()
}

#[test]
fn filled_rect_covers_its_pixels() {
    let mut canvas = cairo_canvas(60, 60);
    canvas.background(Some(WHITE));
    canvas.no_stroke();
    canvas.fill(RED);
    canvas.rect(10, 10, 20, 20);

    let mut surface = finish(canvas);
    assert_eq!(pixel(&mut surface, 20, 20), (255, 0, 0, 255));
    assert_eq!(pixel(&mut surface, 40, 40), (255, 255, 255, 255));
}

#[test]
fn rotation_is_applied_around_translated_origin() {
    let mut canvas = cairo_canvas(100, 100);
    canvas.background(Some(WHITE));
    canvas.no_stroke();
    canvas.fill(BLUE);
    canvas.translate(50, 50);
    canvas.rotate(90.0);
    canvas.rect(0, 0, 10, 4);

    let mut surface = finish(canvas);
    // Logical (5, 2) lands at device (48, 55) after a quarter turn.
    assert_eq!(pixel(&mut surface, 48, 55), (0, 0, 255, 255));
    assert_eq!(pixel(&mut surface, 55, 48), (255, 255, 255, 255));
}

#[test]
fn center_mode_ellipse_is_centered_on_anchor() {
    let mut canvas = cairo_canvas(80, 80);
    canvas.background(Some(WHITE));
    canvas.no_stroke();
    canvas.fill(RED);
    canvas.ellipse_mode(AnchorMode::Center);
    canvas.circle(40, 40, 10);

    let mut surface = finish(canvas);
    assert_eq!(pixel(&mut surface, 40, 40), (255, 0, 0, 255));
    assert_eq!(pixel(&mut surface, 40, 26), (255, 255, 255, 255));
    assert_eq!(pixel(&mut surface, 5, 5), (255, 255, 255, 255));
}

#[test]
fn transparent_background_clears_alpha() {
    let mut canvas = cairo_canvas(20, 20);
    canvas.background(Some(RED));
    canvas.background(None);

    let mut surface = finish(canvas);
    assert_eq!(pixel(&mut surface, 10, 10).3, 0);
}

#[test]
fn inverse_mapping_agrees_with_cairo() {
    let mut canvas = cairo_canvas(200, 200);
    canvas.translate(80, 40);
    canvas.rotate(33.0);
    canvas.scale(1.5, 0.75);
    canvas.translate(-12, 9);
    canvas.rotate(-70.0);

    for &(x, y) in &[(0, 0), (10, 20), (-35, 17), (60, -44)] {
        let (dx, dy) = canvas
            .rasterizer()
            .context()
            .user_to_device(x as f64, y as f64);
        let device = Point::new(dx.round() as i32, dy.round() as i32);
        let logical = canvas.map_device_to_logical(device).unwrap();
        assert!(
            (logical.x - x).abs() <= 2 && (logical.y - y).abs() <= 2,
            "({x}, {y}) came back as {logical:?}"
        );
    }
}

#[test]
fn pop_restores_cairo_transform() {
    let mut canvas = cairo_canvas(50, 50);
    canvas.translate(10, 5);
    let before = canvas.rasterizer().context().user_to_device(3.0, 4.0);

    canvas.push();
    canvas.rotate(45.0);
    canvas.scale(2.0, 3.0);
    canvas.pop().unwrap();

    let after = canvas.rasterizer().context().user_to_device(3.0, 4.0);
    assert!((before.0 - after.0).abs() < 1e-9);
    assert!((before.1 - after.1).abs() < 1e-9);
}

#[test]
fn zero_scale_recovers_after_reset_scaling() {
    let mut canvas = cairo_canvas(40, 40);
    canvas.background(Some(WHITE));
    canvas.no_stroke();
    canvas.fill(RED);

    canvas.translate(5, 5);
    canvas.scale(0.0, 1.0);
    canvas.rect(0, 0, 10, 10);
    canvas.reset_scaling();
    canvas.rect(0, 0, 10, 10);

    let mut surface = finish(canvas);
    assert_eq!(pixel(&mut surface, 10, 10), (255, 0, 0, 255));
    assert_eq!(pixel(&mut surface, 2, 2), (255, 255, 255, 255));
}

#[test]
fn zero_scale_does_not_blank_later_cycles() {
    let canvas = cairo_canvas(20, 20);
    let mut controller = FrameController::new(
        canvas,
        |c: &mut CairoCanvas| -> anyhow::Result<()> {
            if c.frame_count() == 1 {
                c.scale(0.0, 0.0);
            } else {
                c.background(Some(BLUE));
                c.quit();
            }
            Ok(())
        },
    )
    .with_reset_after_loop(false);

    controller.start();
    while controller.tick() != TickOutcome::Stopped {}

    let (canvas, _) = controller.into_parts();
    let mut surface = finish(canvas);
    assert_eq!(pixel(&mut surface, 10, 10), (0, 0, 255, 255));
}

#[test]
fn saved_png_loads_back_as_image() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("swatch.png");

    let mut canvas = cairo_canvas(8, 6);
    canvas.background(Some(RED));
    canvas.save(Some(path.as_path())).unwrap();

    let image = CairoRasterizer::load_png(&path).unwrap();
    let mut target = cairo_canvas(40, 40);
    target.background(Some(WHITE));
    assert_eq!(target.rasterizer().image_size(&image), (8, 6));
    target.image_sized(&image, 10, 10, 16, 12);

    let mut surface = finish(target);
    assert_eq!(pixel(&mut surface, 15, 15), (255, 0, 0, 255));
    assert_eq!(pixel(&mut surface, 30, 30), (255, 255, 255, 255));
}

#[test]
fn text_paints_with_fill_color() {
    let mut canvas = cairo_canvas(200, 60);
    canvas.background(Some(WHITE));
    canvas.fill(Color::new(0.0, 0.0, 0.0, 1.0));
    canvas.change_font("Sans", 24.0);
    canvas.text("Hello", 4, 4);

    let mut surface = finish(canvas);
    let stride = surface.stride() as usize;
    let data = surface.data().unwrap();
    let dark = data
        .chunks(stride)
        .flat_map(|row| row.chunks(4))
        .filter(|px| px[0] < 128 && px[1] < 128 && px[2] < 128)
        .count();
    assert!(dark > 0, "text should darken some pixels");
}

struct PngSink {
    frames: Rc<RefCell<Vec<Vec<u8>>>>,
}

impl DisplaySurface<ImageSurface> for PngSink {
    fn present(&mut self, frame: &ImageSurface) {
        let mut bytes = Vec::new();
        frame.write_to_png(&mut bytes).unwrap();
        self.frames.borrow_mut().push(bytes);
    }

    fn origin(&self) -> Point {
        Point::ORIGIN
    }
}

#[test]
fn frame_loop_presents_cairo_frames() {
    let frames = Rc::new(RefCell::new(Vec::new()));
    let canvas = cairo_canvas(32, 32);
    let mut controller = FrameController::new(
        canvas,
        |c: &mut CairoCanvas| -> anyhow::Result<()> {
            c.background(Some(WHITE));
            c.fill(RED);
            c.square(4, 4, 8);
            if c.frame_count() == 2 {
                c.quit();
            }
            Ok(())
        },
    )
    .with_surface(Box::new(PngSink {
        frames: frames.clone(),
    }));

    controller.start();
    while controller.tick() != TickOutcome::Stopped {}

    assert_eq!(frames.borrow().len(), 2);
    assert!(frames.borrow().iter().all(|png| png.starts_with(b"\x89PNG")));
}
