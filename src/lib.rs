//! Immediate-mode 2D drawing with scoped transforms and a timed frame loop.
//!
//! A sketch draws on a [`Canvas`] once per cycle of a [`FrameController`].
//! The canvas records every translate/rotate/scale it forwards to the
//! [`Rasterizer`] so that `push`/`pop` can restore earlier transforms by
//! replay, and so pointer positions can be mapped back into logical space.
//!
//! ```no_run
//! use sketchloop::{Canvas, CanvasOptions, CairoRasterizer, FrameController};
//! use sketchloop::draw::RED;
//!
//! # fn main() -> anyhow::Result<()> {
//! let raster = CairoRasterizer::new(200, 200)?;
//! let canvas = Canvas::new(raster, CanvasOptions::default());
//! let mut controller = FrameController::new(
//!     canvas,
//!     |c: &mut Canvas<CairoRasterizer>| -> anyhow::Result<()> {
//!         c.translate(100, 100);
//!         c.rotate(c.frame_count() as f64);
//!         c.fill(RED);
//!         c.rect(0, 0, 40, 40);
//!         if c.frame_count() == 60 {
//!             c.quit();
//!         }
//!         Ok(())
//!     },
//! );
//! controller.run()?;
//! # Ok(())
//! # }
//! ```

pub mod canvas;
pub mod config;
pub mod draw;
pub mod error;
pub mod frame_loop;
pub mod raster;
pub mod state;
pub mod surface;
pub mod transform;
pub mod util;

pub use canvas::{Canvas, CanvasOptions};
pub use config::Config;
pub use error::DrawError;
pub use frame_loop::{FrameController, LoopState, Sketch, TickOutcome};
pub use raster::{CairoRasterizer, Rasterizer, RecordingRasterizer};
pub use state::{AnchorMode, StyleState};
pub use surface::{DisplaySurface, PointerSource};
pub use util::{Point, Rect};
