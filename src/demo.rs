//! Built-in sketches for the `sketchloop` binary.

use anyhow::Result;
use clap::ValueEnum;
use sketchloop::draw::{BLUE, Color, GRAY, ORANGE, WHITE};
use sketchloop::{AnchorMode, Canvas, Rasterizer, Sketch};

/// Sketch selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DemoKind {
    /// Planets on nested rotating scopes
    Orbit,
    /// Grid of cells rotated and scaled by their position
    Grid,
}

/// Runs a demo for a fixed number of frames, then quits.
pub struct Demo {
    kind: DemoKind,
    frames: u64,
    frame_rate: Option<i32>,
}

impl Demo {
    pub fn new(kind: DemoKind, frames: u64, frame_rate: Option<i32>) -> Self {
        Self {
            kind,
            frames: frames.max(1),
            frame_rate,
        }
    }
}

impl<R: Rasterizer> Sketch<R> for Demo {
    fn setup(&mut self, canvas: &mut Canvas<R>) -> Result<()> {
        if let Some(fps) = self.frame_rate {
            canvas.frame_rate(fps);
        }
        Ok(())
    }

    fn draw(&mut self, canvas: &mut Canvas<R>) -> Result<()> {
        canvas.clear();
        match self.kind {
            DemoKind::Orbit => orbit(canvas)?,
            DemoKind::Grid => grid(canvas)?,
        }

        if canvas.frame_count() >= self.frames {
            canvas.quit();
        }
        Ok(())
    }
}

fn orbit<R: Rasterizer>(canvas: &mut Canvas<R>) -> Result<()> {
    let angle = canvas.frame_count() as f64 * 3.0;
    let (cx, cy) = (canvas.width() / 2, canvas.height() / 2);
    let radius = canvas.width().min(canvas.height()) / 3;

    canvas.translate(cx, cy);
    canvas.no_stroke();
    canvas.fill(ORANGE);
    canvas.circle(0, 0, radius / 4);

    canvas.push();
    canvas.rotate(angle);
    canvas.translate(radius, 0);
    canvas.fill(BLUE);
    canvas.circle(0, 0, radius / 8);

    canvas.push();
    canvas.rotate(angle * 4.0);
    canvas.translate(radius / 4, 0);
    canvas.fill(GRAY);
    canvas.circle(0, 0, radius / 20 + 1);
    canvas.pop()?;

    canvas.pop()?;

    canvas.stroke(GRAY);
    canvas.no_fill();
    canvas.circle(0, 0, radius);
    Ok(())
}

fn grid<R: Rasterizer>(canvas: &mut Canvas<R>) -> Result<()> {
    const CELL: i32 = 40;
    let t = canvas.frame_count() as f64;

    canvas.rect_mode(AnchorMode::Center);
    canvas.stroke(WHITE);
    let cols = canvas.width() / CELL;
    let rows = canvas.height() / CELL;

    for row in 0..rows {
        for col in 0..cols {
            canvas.push();
            canvas.translate(col * CELL + CELL / 2, row * CELL + CELL / 2);
            canvas.rotate(t * 2.0 + (row * cols + col) as f64 * 7.5);
            canvas.zoom(0.5 + 0.5 * ((t / 20.0) + col as f64 * 0.3).sin().abs());
            canvas.fill(Color::new(
                col as f64 / cols.max(1) as f64,
                row as f64 / rows.max(1) as f64,
                0.6,
                1.0,
            ));
            canvas.square(0, 0, CELL - 6);
            canvas.pop()?;
        }
    }

    canvas.fill(WHITE);
    canvas.rect_mode(AnchorMode::TopLeft);
    canvas.text(&format!("frame {}", canvas.frame_count()), 6, 6);
    Ok(())
}
